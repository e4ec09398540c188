//! Project domain model.
//!
//! # Responsibility
//! - Define the client engagement record every document hangs off.
//! - Define the creation input and the post-creation patch shape.
//!
//! # Invariants
//! - `id` and `created_at` are assigned once by the store and never change.
//! - Projects are never deleted.

use super::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Engagement lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    Archived,
}

/// Client engagement tracked through its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: RecordId,
    pub title: String,
    pub client_name: String,
    pub address: String,
    #[serde(default)]
    pub scope_of_works: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    pub client_name: String,
    pub address: String,
    pub scope_of_works: String,
    pub description: String,
    pub notes: String,
    /// Defaults to `Active` when absent.
    pub status: Option<ProjectStatus>,
}

impl NewProject {
    pub fn new(title: impl Into<String>, client_name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            client_name: client_name.into(),
            ..Self::default()
        }
    }

    pub(crate) fn into_project(self, id: RecordId, created_at: DateTime<Utc>) -> Project {
        Project {
            id,
            title: self.title,
            client_name: self.client_name,
            address: self.address,
            scope_of_works: self.scope_of_works,
            description: self.description,
            notes: self.notes,
            status: self.status.unwrap_or_default(),
            created_at,
        }
    }
}

/// Mutable project fields; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub client_name: Option<String>,
    pub address: Option<String>,
    pub scope_of_works: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub status: Option<ProjectStatus>,
}

impl ProjectPatch {
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub(crate) fn apply_to(self, project: &mut Project) {
        if let Some(title) = self.title {
            project.title = title;
        }
        if let Some(client_name) = self.client_name {
            project.client_name = client_name;
        }
        if let Some(address) = self.address {
            project.address = address;
        }
        if let Some(scope_of_works) = self.scope_of_works {
            project.scope_of_works = scope_of_works;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(notes) = self.notes {
            project.notes = notes;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
    }
}
