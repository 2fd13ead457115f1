//! Layout definitions
//!
//! A layout is one alternate line shape a record type may take, such as the
//! header, detail, and trailer rows of a mixed file.

use serde::{Deserialize, Serialize};

use crate::field::FieldDefinition;

/// One alternate full-line shape of a record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDefinition {
    /// Layout name (e.g., "header", "detail")
    pub name: String,
    /// Columns of this shape, in line order
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl LayoutDefinition {
    /// Create an empty layout
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a column
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Total width of this shape
    pub fn width(&self) -> usize {
        self.fields.iter().map(|f| f.width).sum()
    }

    /// Pack format of this shape
    pub fn pack_format(&self) -> String {
        self.fields.iter().map(FieldDefinition::pack_directive).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_shape() {
        let header = LayoutDefinition::new("header")
            .field(FieldDefinition::new("kind", 1))
            .field(FieldDefinition::new("batch", 8));

        assert_eq!(header.width(), 9);
        assert_eq!(header.pack_format(), "A1A8");
    }

    #[test]
    fn test_empty_layout() {
        let trailer = LayoutDefinition::new("trailer");
        assert_eq!(trailer.width(), 0);
        assert_eq!(trailer.pack_format(), "");
    }
}
