//! Schema Registry
//!
//! Holds the [`FileData`] of one record type. Each record type owns exactly one
//! registry in a `static` (see [`crate::flat_file!`]); the container inside is
//! created on first access and lives until [`SchemaRegistry::reset`].
//!
//! The container is shared as an `Arc`. Read views ([`SlotRef`]) keep the
//! `Arc` they were handed and never hold the lock, so a read can feed a write
//! in the same expression. Writes copy on write, leaving earlier views on the
//! state they were created from.
//!
//! Edit views ([`SlotMut`]) work on a copy of one slot and store it back when
//! dropped. Another change to that same slot made while the view is alive is
//! overwritten by the view.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, trace};

use crate::field::FieldDefinition;
use crate::file_data::FileData;
use crate::layout::LayoutDefinition;

/// Metadata registry for one record type
pub struct SchemaRegistry {
    /// Record type name, used in logs and reports
    name: &'static str,
    /// `None` until first access and again after a reset
    data: RwLock<Option<Arc<FileData>>>,
}

impl SchemaRegistry {
    /// Create an unconfigured registry
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            data: RwLock::new(None),
        }
    }

    /// Record type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the container currently exists
    ///
    /// Unlike every other accessor this does not create it.
    pub fn is_configured(&self) -> bool {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The whole container, created with defaults if absent
    pub fn file_data(&self) -> SlotRef<FileData> {
        SlotRef::<FileData>::new(self.current(), |data| data)
    }

    /// Edit the whole container
    pub fn file_data_mut(&self) -> SlotMut<'_, FileData> {
        let data = FileData::clone(&self.current());
        SlotMut::new(self, data, |slot, data| *slot = data)
    }

    /// Owned copy of the container
    pub fn snapshot(&self) -> FileData {
        FileData::clone(&self.current())
    }

    /// Columns in line order
    pub fn fields(&self) -> SlotRef<[FieldDefinition]> {
        SlotRef::<[FieldDefinition]>::new(self.current(), |data| data.fields.as_slice())
    }

    /// Edit the column list
    pub fn fields_mut(&self) -> SlotMut<'_, Vec<FieldDefinition>> {
        let fields = self.current().fields.clone();
        SlotMut::new(self, fields, |slot, fields| slot.fields = fields)
    }

    /// Append a column
    pub fn add_field(&self, field: FieldDefinition) {
        debug!(record = self.name, field = %field, "adding field");
        self.modify(|data| data.fields.push(field));
    }

    /// Overall line width
    pub fn width(&self) -> usize {
        self.current().width
    }

    /// Assign the line width
    ///
    /// The value is not checked against the field widths.
    pub fn set_width(&self, width: usize) {
        debug!(record = self.name, width, "setting width");
        self.modify(|data| data.width = width);
    }

    /// Grow the line width, returning the new value
    pub fn add_width(&self, delta: usize) -> usize {
        let width = self.modify(|data| {
            data.width = data.width.saturating_add(delta);
            data.width
        });
        debug!(record = self.name, width, delta, "grew width");
        width
    }

    /// Shrink the line width, stopping at zero, returning the new value
    pub fn sub_width(&self, delta: usize) -> usize {
        let width = self.modify(|data| {
            data.width = data.width.saturating_sub(delta);
            data.width
        });
        debug!(record = self.name, width, delta, "shrank width");
        width
    }

    /// Codec format string
    pub fn pack_format(&self) -> SlotRef<str> {
        SlotRef::<str>::new(self.current(), |data| data.pack_format.as_str())
    }

    /// Assign the codec format string
    pub fn set_pack_format(&self, pack_format: impl Into<String>) {
        let pack_format = pack_format.into();
        debug!(record = self.name, pack_format = %pack_format, "setting pack format");
        self.modify(|data| data.pack_format = pack_format);
    }

    /// Alternate line shapes
    pub fn layouts(&self) -> SlotRef<[LayoutDefinition]> {
        SlotRef::<[LayoutDefinition]>::new(self.current(), |data| data.layouts.as_slice())
    }

    /// Edit the layout list
    pub fn layouts_mut(&self) -> SlotMut<'_, Vec<LayoutDefinition>> {
        let layouts = self.current().layouts.clone();
        SlotMut::new(self, layouts, |slot, layouts| slot.layouts = layouts)
    }

    /// Append a layout
    pub fn add_layout(&self, layout: LayoutDefinition) {
        debug!(record = self.name, layout = %layout.name, "adding layout");
        self.modify(|data| data.layouts.push(layout));
    }

    /// Set `width` and `pack_format` from the current fields
    pub fn derive_from_fields(&self) {
        let (width, pack_format) = self.modify(|data| {
            data.width = data.fields_width();
            data.pack_format = data.fields_pack_format();
            (data.width, data.pack_format.clone())
        });
        debug!(
            record = self.name,
            width,
            pack_format = %pack_format,
            "derived width and pack format from fields"
        );
    }

    /// Discard all accumulated metadata. DESTRUCTIVE!
    ///
    /// Meant for test setup and teardown. The next access starts from an
    /// unconfigured container.
    pub fn reset(&self) {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        if data.take().is_some() {
            debug!(record = self.name, "reset file data");
        }
    }

    fn current(&self) -> Arc<FileData> {
        if let Some(data) = self.data.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Arc::clone(data);
        }
        // A reset may land between the two locks, so create under the write lock
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(data.get_or_insert_with(|| self.create()))
    }

    /// Run `f` on the container under the write lock. `f` must not call back
    /// into this registry.
    fn modify<R>(&self, f: impl FnOnce(&mut FileData) -> R) -> R {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        let data = data.get_or_insert_with(|| self.create());
        f(Arc::make_mut(data))
    }

    fn create(&self) -> Arc<FileData> {
        trace!(record = self.name, "creating file data");
        Arc::new(FileData::default())
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("SchemaRegistry")
            .field("name", &self.name)
            .field("data", &data.as_deref())
            .finish()
    }
}

/// Read view of one slot of a registry
///
/// Shows the state at the time it was created.
pub struct SlotRef<T: ?Sized> {
    data: Arc<FileData>,
    project: fn(&FileData) -> &T,
}

impl<T: ?Sized> SlotRef<T> {
    fn new(data: Arc<FileData>, project: fn(&FileData) -> &T) -> Self {
        Self { data, project }
    }
}

impl<T: ?Sized> Deref for SlotRef<T> {
    type Target = T;

    fn deref(&self) -> &T {
        (self.project)(&self.data)
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for SlotRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

/// Edit view of one slot of a registry, stored back on drop
pub struct SlotMut<'a, T: Default> {
    registry: &'a SchemaRegistry,
    value: T,
    store: fn(&mut FileData, T),
}

impl<'a, T: Default> SlotMut<'a, T> {
    fn new(registry: &'a SchemaRegistry, value: T, store: fn(&mut FileData, T)) -> Self {
        Self {
            registry,
            value,
            store,
        }
    }
}

impl<T: Default> Deref for SlotMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Default> DerefMut for SlotMut<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Default> Drop for SlotMut<'_, T> {
    fn drop(&mut self) {
        let value = std::mem::take(&mut self.value);
        let store = self.store;
        self.registry.modify(|data| store(data, value));
    }
}

impl<T: Default + fmt::Debug> fmt::Debug for SlotMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_defaults() {
        let registry = SchemaRegistry::new("Blank");
        assert!(!registry.is_configured());

        assert_eq!(registry.width(), 0);
        assert_eq!(&*registry.pack_format(), "");
        assert!(registry.fields().is_empty());
        assert!(registry.layouts().is_empty());

        // Any read creates the container
        assert!(registry.is_configured());
    }

    #[test]
    fn test_fields_keep_order() {
        let registry = SchemaRegistry::new("Ordered");
        registry.add_field(FieldDefinition::new("first", 4));
        registry.fields_mut().push(FieldDefinition::new("second", 2));
        registry.add_field(FieldDefinition::new("third", 6));

        let names: Vec<_> = registry.fields().iter().map(|f| f.name.clone()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_width_compound_updates() {
        let registry = SchemaRegistry::new("Sized");
        registry.add_field(FieldDefinition::new("only", 5));

        registry.set_width(80);
        assert_eq!(registry.add_width(4), 84);
        assert_eq!(registry.width(), 84);

        registry.file_data_mut().width -= 10;
        assert_eq!(registry.width(), 74);

        assert_eq!(registry.sub_width(100), 0);

        registry.set_width(0);
        assert_eq!(registry.width(), 0);
        assert_eq!(registry.fields().len(), 1);
    }

    #[test]
    fn test_pack_format_setter() {
        let registry = SchemaRegistry::new("Packed");
        registry.set_pack_format("A10A3");
        assert_eq!(&*registry.pack_format(), "A10A3");
    }

    #[test]
    fn test_layouts_read_what_was_written() {
        let registry = SchemaRegistry::new("Layered");
        registry.add_layout(LayoutDefinition::new("header"));
        registry.layouts_mut().push(LayoutDefinition::new("detail"));

        let layouts = registry.layouts();
        assert_eq!(layouts.len(), 2);
        assert_eq!(layouts[0].name, "header");
        assert_eq!(layouts[1].name, "detail");
    }

    #[test]
    fn test_reset() {
        let registry = SchemaRegistry::new("Resettable");
        registry.add_field(FieldDefinition::new("name", 10));
        registry.add_layout(LayoutDefinition::new("detail"));
        registry.set_width(10);
        registry.set_pack_format("A10");

        registry.reset();
        assert!(!registry.is_configured());
        assert!(registry.file_data().is_empty());

        // Resetting twice is fine
        registry.reset();
        registry.reset();
        assert_eq!(registry.width(), 0);
    }

    #[test]
    fn test_derive_from_fields() {
        let registry = SchemaRegistry::new("Derived");
        registry.add_field(FieldDefinition::new("name", 10));
        registry.add_field(FieldDefinition::new("age", 3));

        // Nothing is derived implicitly
        assert_eq!(registry.width(), 0);

        registry.derive_from_fields();
        assert_eq!(registry.width(), 13);
        assert_eq!(&*registry.pack_format(), "A10A3");
    }

    #[test]
    fn test_snapshot_is_detached() {
        let registry = SchemaRegistry::new("Snap");
        registry.set_width(7);
        let snapshot = registry.snapshot();

        registry.set_width(9);
        assert_eq!(snapshot.width, 7);
        assert_eq!(registry.width(), 9);
    }

    #[test]
    fn test_debug_output() {
        let registry = SchemaRegistry::new("Shown");
        registry.set_width(3);
        let debug = format!("{:?}", registry);
        assert!(debug.contains("Shown"));
        assert!(debug.contains("width: 3"));
    }

    #[test]
    fn test_read_feeds_write_in_one_expression() {
        let registry = SchemaRegistry::new("Chained");
        registry.add_field(FieldDefinition::new("name", 10));
        registry.add_field(FieldDefinition::new("age", 3));
        registry.set_pack_format("A10");

        registry.set_width(registry.fields().iter().map(|f| f.width).sum());
        registry.set_pack_format(registry.pack_format().to_string() + "A3");
        registry.add_width(registry.fields().len());
        registry
            .fields_mut()
            .push(FieldDefinition::new("zip", registry.width() - 10));

        assert_eq!(registry.width(), 15);
        assert_eq!(&*registry.pack_format(), "A10A3");
        assert_eq!(registry.fields()[2].width, 5);
    }

    #[test]
    fn test_read_view_keeps_its_state() {
        let registry = SchemaRegistry::new("Viewed");
        registry.add_field(FieldDefinition::new("first", 1));

        let before = registry.fields();
        registry.add_field(FieldDefinition::new("second", 2));

        assert_eq!(before.len(), 1);
        assert_eq!(registry.fields().len(), 2);
    }

    #[test]
    fn test_edit_view_stores_on_drop() {
        let registry = SchemaRegistry::new("Edited");
        {
            let mut layouts = registry.layouts_mut();
            layouts.push(LayoutDefinition::new("header"));
            layouts.push(LayoutDefinition::new("trailer"));
            assert!(registry.layouts().is_empty());
        }
        assert_eq!(registry.layouts().len(), 2);
    }
}
