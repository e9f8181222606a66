//! Projects: workspaces of tickets, each owned by exactly one user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, schema::check_bounded};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
  pub id:          Uuid,
  pub name:        String,
  pub description: Option<String>,
  /// Deleting this user deletes the project.
  pub owner_id:    Uuid,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// Input to [`crate::store::TrackerStore::create_project`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
  pub name:        String,
  pub description: Option<String>,
  pub owner_id:    Uuid,
}

impl NewProject {
  pub fn new(owner_id: Uuid, name: impl Into<String>) -> Self {
    Self { name: name.into(), description: None, owner_id }
  }

  pub fn validate(&self) -> Result<()> { check_bounded("name", &self.name) }
}

/// A partial update to a project. Setting `owner_id` transfers ownership; a
/// project can never be left without an owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPatch {
  pub name:        Option<String>,
  pub description: Option<Option<String>>,
  pub owner_id:    Option<Uuid>,
}

impl ProjectPatch {
  pub fn validate(&self) -> Result<()> {
    match &self.name {
      Some(name) => check_bounded("name", name),
      None => Ok(()),
    }
  }
}
