use serde::Serialize;

/// A node of the section tree. `parent_id`, when set, points to a section of
/// the same instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: i64,
    pub instance_id: i64,
    pub parent_id: Option<i64>,
    pub title: String,
}

impl Section {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
