use serde::Serialize;

/// Label of the instance `create_sections` falls back to when called without
/// a parent and without an instance.
pub const DEFAULT_INSTANCE_LABEL: &str = "create-sections-instance";

/// Tenancy boundary: every section and speech belongs to exactly one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instance {
    pub id: i64,       // ⇔ instances.id
    pub label: String, // ⇔ instances.label (UNIQUE)
}
