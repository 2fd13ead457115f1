//! Configuration for the flat-file schema layer
//!
//! Supports loading configuration from:
//! - Default values
//! - Per-user config dir, then project config files (flat-schema.toml)
//! - Environment variables (FLAT_SCHEMA__*)
//!
//! ## Example config file (flat-schema.toml):
//! ```toml
//! [fields]
//! default_padding = "left"
//!
//! [checks]
//! warn_on_width_drift = true
//! require_pack_format = false
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::error::Result;
use crate::field::Padding;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Field defaults
    #[serde(default)]
    pub fields: FieldsConfig,

    /// Advisory checks run by reports
    #[serde(default)]
    pub checks: ChecksConfig,
}

/// Defaults applied when building field definitions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldsConfig {
    /// Padding side for fields built with [`crate::FieldDefinition::with_config`]
    #[serde(default)]
    pub default_padding: Padding,
}

/// Advisory checks
///
/// These only produce warnings; the registry accepts any value regardless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecksConfig {
    /// Warn when `width` differs from the sum of field widths
    #[serde(default = "default_true")]
    pub warn_on_width_drift: bool,

    /// Warn when fields are declared but `pack_format` is empty
    #[serde(default)]
    pub require_pack_format: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            warn_on_width_drift: true,
            require_pack_format: false,
        }
    }
}

/// Project-level config file names, lowest precedence first
const CONFIG_FILE_NAMES: [&str; 3] = [
    "config/flat-schema.toml",
    ".flat-schema.toml",
    "flat-schema.toml",
];

/// Environment variable prefix (`FLAT_SCHEMA__CHECKS__WARN_ON_WIDTH_DRIFT=false`)
const ENV_PREFIX: &str = "FLAT_SCHEMA";

impl SchemaConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, adding a required file on top of the defaults
    ///
    /// Precedence, lowest first: [`SchemaConfig::search_paths`] in order, the
    /// explicit file, then environment variables.
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        for path in Self::search_paths() {
            if path.is_file() {
                debug!(path = %path.display(), "loading schema config");
                builder = builder.add_source(File::from(path));
            }
        }

        if let Some(path) = config_path {
            debug!(path, "loading schema config");
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Config files consulted on every load, whether present or not
    ///
    /// The per-user file comes first so a project file overrides it.
    pub fn search_paths() -> Vec<PathBuf> {
        let user = directories::ProjectDirs::from("dev", "familiar", "flat-schema")
            .map(|dirs| dirs.config_dir().join("flat-schema.toml"));

        user.into_iter()
            .chain(CONFIG_FILE_NAMES.iter().map(PathBuf::from))
            .collect()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        debug!(path, "saved schema config");
        Ok(())
    }
}
