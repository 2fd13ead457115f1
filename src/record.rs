//! Record types and their schema access
//!
//! A record type opts in by implementing [`FlatFile`], normally through the
//! [`flat_file!`](crate::flat_file) macro. That single step gives the type its
//! own [`SchemaRegistry`] and gives every value of the type the
//! [`RecordView`] queries. `RecordView` is sealed and blanket-implemented, so
//! it cannot be attached on its own.
//!
//! ```
//! use flat_schema::{flat_file, FieldDefinition, FlatFile, RecordView};
//!
//! struct Person;
//! flat_file!(Person);
//!
//! Person::schema().add_field(FieldDefinition::new("name", 10));
//! Person::schema().add_field(FieldDefinition::new("age", 3));
//! Person::schema().derive_from_fields();
//!
//! assert_eq!(Person.width(), 13);
//! assert_eq!(&*Person.pack_format(), "A10A3");
//! ```

use crate::field::FieldDefinition;
use crate::registry::{SchemaRegistry, SlotRef};

/// A record type with schema metadata
pub trait FlatFile {
    /// The registry owned by this record type
    fn schema() -> &'static SchemaRegistry;

    /// Discard this type's metadata. DESTRUCTIVE!
    fn reset_file_data() {
        Self::schema().reset();
    }
}

mod private {
    pub trait Sealed {}

    impl<T: super::FlatFile> Sealed for T {}
}

/// Schema queries available on every record value
///
/// Each call reads the owning type's registry, so changes made after the value
/// was created are visible. Layouts are only queryable on the type.
pub trait RecordView: private::Sealed {
    /// Line width of this record's type
    fn width(&self) -> usize;

    /// Pack format of this record's type
    fn pack_format(&self) -> SlotRef<str>;

    /// Fields of this record's type
    fn fields(&self) -> SlotRef<[FieldDefinition]>;
}

impl<T: FlatFile> RecordView for T {
    fn width(&self) -> usize {
        T::schema().width()
    }

    fn pack_format(&self) -> SlotRef<str> {
        T::schema().pack_format()
    }

    fn fields(&self) -> SlotRef<[FieldDefinition]> {
        T::schema().fields()
    }
}

/// Attach a schema registry to a record type
///
/// Expands to a [`FlatFile`] impl backed by a `static` registry named after the
/// type, or after the second argument when given. Generic types share one
/// registry across all instantiations, so implement [`FlatFile`] by hand for
/// each instantiation instead.
#[macro_export]
macro_rules! flat_file {
    ($ty:ty) => {
        $crate::flat_file!($ty, stringify!($ty));
    };
    ($ty:ty, $name:expr) => {
        impl $crate::FlatFile for $ty {
            fn schema() -> &'static $crate::SchemaRegistry {
                static SCHEMA: $crate::SchemaRegistry = $crate::SchemaRegistry::new($name);
                &SCHEMA
            }
        }
    };
}
