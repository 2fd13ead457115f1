//! Schema reports
//!
//! A serializable summary of one record type's metadata, with the advisory
//! checks enabled in [`ChecksConfig`].

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::checksum::Fingerprint;
use crate::config::ChecksConfig;
use crate::error::Result;
use crate::record::FlatFile;
use crate::registry::SchemaRegistry;

/// Summary of a record type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaReport {
    /// Record type name
    pub record: String,
    /// Declared line width
    pub width: usize,
    /// Sum of field widths
    pub fields_width: usize,
    /// Declared pack format
    pub pack_format: String,
    /// `name(width)` per field, in line order
    pub fields: Vec<String>,
    /// Layout names, in declaration order
    pub layouts: Vec<String>,
    /// Fingerprint of the whole container
    pub fingerprint: Fingerprint,
}

/// Advisory finding from [`SchemaReport::check`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaWarning {
    /// Declared width differs from the field widths
    WidthDrift { declared: usize, computed: usize },
    /// Fields exist but no pack format was set
    MissingPackFormat,
}

impl SchemaReport {
    /// Report on a record type
    pub fn for_type<T: FlatFile>() -> Self {
        Self::from_registry(T::schema())
    }

    /// Report on a registry
    pub fn from_registry(registry: &SchemaRegistry) -> Self {
        let data = registry.file_data();
        Self {
            record: registry.name().to_string(),
            width: data.width,
            fields_width: data.fields_width(),
            pack_format: data.pack_format.clone(),
            fields: data.fields.iter().map(ToString::to_string).collect(),
            layouts: data.layouts.iter().map(|l| l.name.clone()).collect(),
            fingerprint: Fingerprint::of(&data),
        }
    }

    /// Run the enabled checks, logging each finding
    pub fn check(&self, checks: &ChecksConfig) -> Vec<SchemaWarning> {
        let mut warnings = Vec::new();

        if checks.warn_on_width_drift && self.width != self.fields_width {
            warn!(
                record = %self.record,
                declared = self.width,
                computed = self.fields_width,
                "width does not match field widths"
            );
            warnings.push(SchemaWarning::WidthDrift {
                declared: self.width,
                computed: self.fields_width,
            });
        }

        if checks.require_pack_format && !self.fields.is_empty() && self.pack_format.is_empty() {
            warn!(record = %self.record, "fields declared without a pack format");
            warnings.push(SchemaWarning::MissingPackFormat);
        }

        warnings
    }

    /// Render as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
