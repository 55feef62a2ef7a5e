use serde::{Deserialize, Serialize};

/// A selectable symptom. The `id` is the stable key used by the external
/// inference service and by the local fallback matching; `name` is the
/// user-facing label only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: String,
    pub name: String,
}
