//! Field definitions
//!
//! A field is one column of a fixed-width line. The registry stores these in
//! declaration order; the codec decides what the padding means.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::FieldsConfig;

/// Side on which a value is padded to reach its field width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    /// Value is left-justified, padding goes on the right
    #[default]
    Right,
    /// Value is right-justified, padding goes on the left
    Left,
}

/// A single column of a record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name (e.g., "name", "age")
    pub name: String,
    /// Width of the column in characters
    pub width: usize,
    /// Padding side
    #[serde(default)]
    pub padding: Padding,
}

impl FieldDefinition {
    /// Create a new right-padded field
    pub fn new(name: impl Into<String>, width: usize) -> Self {
        Self {
            name: name.into(),
            width,
            padding: Padding::default(),
        }
    }

    /// Create a field using the configured default padding
    pub fn with_config(name: impl Into<String>, width: usize, config: &FieldsConfig) -> Self {
        Self {
            name: name.into(),
            width,
            padding: config.default_padding,
        }
    }

    /// Set the padding side
    pub fn padded(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Pack directive for this column (e.g., "A10")
    pub fn pack_directive(&self) -> String {
        format!("A{}", self.width)
    }
}

impl fmt::Display for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.width)
    }
}
