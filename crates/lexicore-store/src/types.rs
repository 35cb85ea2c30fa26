//! Project record types matching the frontend API surface.

use serde::{Deserialize, Serialize};

/// A stored project: name, default query, and a reference to an uploaded PDF.
///
/// Serialized with the camelCase field names the frontend expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Unique, timestamp-derived identifier. Ordering is not part of the
    /// client contract.
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Default question to ask about this project's document.
    pub query: String,
    /// Public path to the stored PDF, always under `/uploads/`.
    #[serde(rename = "filePath")]
    pub file_path: String,
}

/// Input for creating a project record. The id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub query: String,
    pub file_path: String,
}
