//! Users: identity records mirrored from the external identity provider.
//!
//! The provider owns authentication and guarantees a stable id; this table
//! extends it with profile fields. A user row must exist before any project,
//! ticket, comment or interaction references it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, schema::check_bounded};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:         Uuid,
  /// Unique across all users.
  pub email:      String,
  pub name:       Option<String>,
  pub avatar_url: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Input to [`crate::store::TrackerStore::create_user`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
  /// The identity provider's id for this user. A fresh one is generated when
  /// absent.
  pub id:         Option<Uuid>,
  pub email:      String,
  pub name:       Option<String>,
  pub avatar_url: Option<String>,
}

impl NewUser {
  pub fn new(email: impl Into<String>) -> Self {
    Self { id: None, email: email.into(), name: None, avatar_url: None }
  }

  /// A user whose id was issued by the identity provider.
  pub fn with_id(id: Uuid, email: impl Into<String>) -> Self {
    Self { id: Some(id), ..Self::new(email) }
  }

  pub fn validate(&self) -> Result<()> {
    check_bounded("email", &self.email)?;
    if let Some(name) = &self.name {
      check_bounded("name", name)?;
    }
    Ok(())
  }
}

/// A partial update to a user's profile. `None` leaves a field untouched;
/// `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
  pub email:      Option<String>,
  pub name:       Option<Option<String>>,
  pub avatar_url: Option<Option<String>>,
}

impl UserPatch {
  pub fn validate(&self) -> Result<()> {
    if let Some(email) = &self.email {
      check_bounded("email", email)?;
    }
    if let Some(Some(name)) = &self.name {
      check_bounded("name", name)?;
    }
    Ok(())
  }
}
