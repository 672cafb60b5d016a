use std::sync::Arc;

use serde_json::Value as Json;

/// A payload validator: returns `true` iff `payload` satisfies the schema.
pub type Validator = Arc<dyn Fn(&Json) -> bool + Send + Sync>;

/// A forward migration step: transforms a payload from one schema version
/// to the next.
pub type Migration = Arc<dyn Fn(Json) -> Json + Send + Sync>;

#[derive(Clone)]
pub struct SchemaDescriptor {
    pub event_type: String,
    pub version: u32,
    pub description: String,
    pub source: String,
    pub validate: Validator,
}

impl std::fmt::Debug for SchemaDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaDescriptor")
            .field("event_type", &self.event_type)
            .field("version", &self.version)
            .field("description", &self.description)
            .field("source", &self.source)
            .finish()
    }
}
