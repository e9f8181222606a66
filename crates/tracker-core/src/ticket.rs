//! Tickets: units of work ("cards") within a project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Result,
  schema::{EnumDomain, check_bounded},
};

// ─── Enumerated domains ──────────────────────────────────────────────────────

/// Workflow column of a ticket. New tickets start in [`TicketStatus::Todo`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::IntoStaticStr,
  strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TicketStatus {
  #[default]
  Todo,
  InProgress,
  Done,
  Backlog,
}

impl EnumDomain for TicketStatus {
  const NAME: &'static str = "ticket_status";
}

/// Priority of a ticket. A ticket without a priority is a distinct state, so
/// this is always carried as `Option<TicketPriority>`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::IntoStaticStr,
  strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TicketPriority {
  Low,
  Medium,
  High,
}

impl EnumDomain for TicketPriority {
  const NAME: &'static str = "ticket_priority";
}

// ─── Ticket ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
  pub id:          Uuid,
  /// Deleting the project deletes the ticket.
  pub project_id:  Uuid,
  pub title:       String,
  pub description: Option<String>,
  pub status:      TicketStatus,
  pub priority:    Option<TicketPriority>,
  /// Deleting the assignee leaves the ticket unassigned.
  pub assignee_id: Option<Uuid>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// Input to [`crate::store::TrackerStore::create_ticket`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTicket {
  pub project_id:  Uuid,
  pub title:       String,
  pub description: Option<String>,
  /// Mirrors the column default, `todo`.
  #[serde(default)]
  pub status:      TicketStatus,
  pub priority:    Option<TicketPriority>,
  pub assignee_id: Option<Uuid>,
}

impl NewTicket {
  /// Convenience constructor with all optional fields set to their defaults.
  pub fn new(project_id: Uuid, title: impl Into<String>) -> Self {
    Self {
      project_id,
      title: title.into(),
      description: None,
      status: TicketStatus::default(),
      priority: None,
      assignee_id: None,
    }
  }

  pub fn validate(&self) -> Result<()> { check_bounded("title", &self.title) }
}

/// A partial update to a ticket. `None` leaves a field untouched;
/// `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketPatch {
  pub title:       Option<String>,
  pub description: Option<Option<String>>,
  pub status:      Option<TicketStatus>,
  pub priority:    Option<Option<TicketPriority>>,
  pub assignee_id: Option<Option<Uuid>>,
}

impl TicketPatch {
  pub fn validate(&self) -> Result<()> {
    match &self.title {
      Some(title) => check_bounded("title", title),
      None => Ok(()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{ConstraintError, ConstraintKind, Error};

  #[test]
  fn status_tokens_match_the_domain() {
    assert_eq!(TicketStatus::tokens(), [
      "todo",
      "in_progress",
      "done",
      "backlog"
    ]);
    assert_eq!(TicketStatus::default(), TicketStatus::Todo);
  }

  #[test]
  fn priority_tokens_match_the_domain() {
    assert_eq!(TicketPriority::tokens(), ["low", "medium", "high"]);
  }

  #[test]
  fn unknown_status_is_a_domain_violation() {
    let err = TicketStatus::from_token("archived").unwrap_err();
    assert!(err.is_violation(ConstraintKind::Domain));
    assert!(matches!(
      err,
      Error::DomainViolation { domain: "ticket_status", ref value } if value == "archived"
    ));
  }

  #[test]
  fn tokens_are_case_sensitive() {
    assert!(TicketPriority::from_token("HIGH").is_err());
    assert_eq!(
      TicketPriority::from_token("high").unwrap(),
      TicketPriority::High
    );
  }

  #[test]
  fn serde_uses_the_same_tokens() {
    let json = serde_json::to_string(&TicketStatus::InProgress).unwrap();
    assert_eq!(json, "\"in_progress\"");
    let parsed: TicketStatus = serde_json::from_str("\"backlog\"").unwrap();
    assert_eq!(parsed, TicketStatus::Backlog);
  }

  #[test]
  fn new_ticket_omits_every_optional_field() {
    let input = NewTicket::new(Uuid::new_v4(), "Write the docs");
    assert_eq!(input.status, TicketStatus::Todo);
    assert!(input.priority.is_none());
    assert!(input.assignee_id.is_none());
    assert!(input.description.is_none());
  }
}
