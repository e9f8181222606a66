//! Comments: messages attached to a ticket. Immutable once posted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  pub id:         Uuid,
  pub ticket_id:  Uuid,
  /// The author.
  pub user_id:    Uuid,
  pub content:    String,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::TrackerStore::add_comment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
  pub ticket_id: Uuid,
  pub user_id:   Uuid,
  pub content:   String,
}

impl NewComment {
  pub fn new(ticket_id: Uuid, user_id: Uuid, content: impl Into<String>) -> Self {
    Self { ticket_id, user_id, content: content.into() }
  }
}
