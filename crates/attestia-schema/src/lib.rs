pub mod catalog;
pub mod types;

pub use catalog::{create_versioned_event, get_schema_version, SchemaCatalog};
pub use types::{Migration, SchemaDescriptor, Validator};
