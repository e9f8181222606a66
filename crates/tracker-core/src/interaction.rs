//! LLM interactions: the audit trail of calls to the AI subsystem.
//!
//! An interaction belongs to the user who requested it and dies with them.
//! The optional ticket link is cleared when the ticket is deleted; the record
//! itself outlives the ticket it was about.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::EnumDomain;

/// What the AI subsystem was asked to do.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::IntoStaticStr,
  strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InteractionType {
  Summary,
  Suggestion,
  ResponseGen,
}

impl EnumDomain for InteractionType {
  const NAME: &'static str = "llm_interaction_type";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmInteraction {
  pub id:               Uuid,
  /// The requesting user.
  pub user_id:          Uuid,
  pub ticket_id:        Option<Uuid>,
  pub interaction_type: InteractionType,
  /// Stored as JSON text.
  pub request_payload:  serde_json::Value,
  /// Stored as JSON text.
  pub response_payload: serde_json::Value,
  pub created_at:       DateTime<Utc>,
}

/// Input to [`crate::store::TrackerStore::record_interaction`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLlmInteraction {
  pub user_id:          Uuid,
  pub ticket_id:        Option<Uuid>,
  pub interaction_type: InteractionType,
  pub request_payload:  serde_json::Value,
  pub response_payload: serde_json::Value,
}
