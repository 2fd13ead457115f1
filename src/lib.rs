//! Flat-file Schema Registry
//!
//! Schema metadata for fixed-width flat-file records. Each record type owns one
//! registry holding the four values every encode, decode and layout dispatch
//! consults:
//!
//! - **width**: overall length of one line
//! - **pack_format**: format string handed to the pack/unpack codec
//! - **fields**: column definitions, in line order
//! - **layouts**: alternate line shapes (header, detail, trailer, ...)
//!
//! ## Architecture
//!
//! ```text
//! flat_file!(Person)
//!   ├── Person::schema()  -> &'static SchemaRegistry   (type level, read/write)
//!   │       └── RwLock<Option<FileData>>               (created on first access)
//!   └── person.width()    -> RecordView                (instance level, read only)
//! ```
//!
//! The registry stores what it is given. `width` is not kept in step with the
//! field widths unless [`SchemaRegistry::derive_from_fields`] is called, and
//! [`SchemaReport::check`] only warns about it.

pub mod checksum;
pub mod config;
pub mod error;
pub mod field;
pub mod file_data;
pub mod layout;
pub mod record;
pub mod registry;
pub mod report;

pub use checksum::Fingerprint;
pub use config::{ChecksConfig, FieldsConfig, SchemaConfig};
pub use error::{Result, SchemaError};
pub use field::{FieldDefinition, Padding};
pub use file_data::FileData;
pub use layout::LayoutDefinition;
pub use record::{FlatFile, RecordView};
pub use registry::{SchemaRegistry, SlotMut, SlotRef};
pub use report::{SchemaReport, SchemaWarning};
