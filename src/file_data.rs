//! The metadata container held for each record type

use serde::{Deserialize, Serialize};

use crate::field::FieldDefinition;
use crate::layout::LayoutDefinition;

/// Width, pack format, fields and layouts of one record type
///
/// `width` is stored independently of `fields`. Nothing here keeps the two in
/// step; use [`FileData::width_drift`] to compare them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileData {
    /// Overall length of one line
    pub width: usize,
    /// Format string handed to the codec
    pub pack_format: String,
    /// Columns in line order
    pub fields: Vec<FieldDefinition>,
    /// Alternate line shapes
    pub layouts: Vec<LayoutDefinition>,
}

impl FileData {
    /// Unconfigured state
    pub const EMPTY: FileData = FileData {
        width: 0,
        pack_format: String::new(),
        fields: Vec::new(),
        layouts: Vec::new(),
    };

    /// Sum of the declared field widths
    pub fn fields_width(&self) -> usize {
        self.fields.iter().map(|f| f.width).sum()
    }

    /// Pack format built from the declared fields (e.g., "A10A3")
    pub fn fields_pack_format(&self) -> String {
        self.fields.iter().map(FieldDefinition::pack_directive).collect()
    }

    /// `(declared, computed)` when `width` disagrees with the field widths
    pub fn width_drift(&self) -> Option<(usize, usize)> {
        let computed = self.fields_width();
        (computed != self.width).then_some((self.width, computed))
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a layout by name
    pub fn layout(&self, name: &str) -> Option<&LayoutDefinition> {
        self.layouts.iter().find(|l| l.name == name)
    }

    /// True when every slot still holds its default
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl Default for FileData {
    fn default() -> Self {
        Self::EMPTY
    }
}
