//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with millisecond precision
//! and a `Z` suffix, the same form the schema's `strftime` defaults produce,
//! so text order is time order. UUIDs are stored as hyphenated lowercase
//! strings. Enumerated domains are stored as their tokens. Interaction
//! payloads are stored as compact JSON.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use tracker_core::{
  comment::Comment,
  interaction::{InteractionType, LlmInteraction},
  project::Project,
  schema::{EnumDomain, Entity},
  ticket::{Ticket, TicketPriority, TicketStatus},
  user::User,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// The current time, truncated to what a timestamp column can hold.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(3) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Patches ─────────────────────────────────────────────────────────────────

/// Split a nullable patch field into `(present, value)` so SQL can tell
/// "leave alone" from "set to NULL".
pub fn split_nullable<T>(field: Option<Option<T>>) -> (bool, Option<T>) {
  match field {
    Some(value) => (true, value),
    None => (false, None),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// A row read verbatim from one table, decoded into its model outside the
/// database thread.
pub trait RawRow: Sized + Send + 'static {
  type Model: Send;

  const ENTITY: Entity;
  /// Column list in the order [`RawRow::from_row`] reads them.
  const COLUMNS: &'static str;

  fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self>;

  fn into_model(self) -> Result<Self::Model>;
}

/// `SELECT <columns> FROM <table> WHERE id = ?1`
pub fn select_by_id<R: RawRow>() -> String {
  format!("SELECT {} FROM {} WHERE id = ?1", R::COLUMNS, R::ENTITY.table())
}

/// Raw strings read directly from a `users` row.
#[derive(Debug, Clone)]
pub struct RawUser {
  pub id:         String,
  pub email:      String,
  pub name:       Option<String>,
  pub avatar_url: Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

impl RawRow for RawUser {
  type Model = User;

  const ENTITY: Entity = Entity::User;
  const COLUMNS: &'static str =
    "id, email, name, avatar_url, created_at, updated_at";

  fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      email:      row.get(1)?,
      name:       row.get(2)?,
      avatar_url: row.get(3)?,
      created_at: row.get(4)?,
      updated_at: row.get(5)?,
    })
  }

  fn into_model(self) -> Result<User> {
    Ok(User {
      id:         decode_uuid(&self.id)?,
      email:      self.email,
      name:       self.name,
      avatar_url: self.avatar_url,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `projects` row.
#[derive(Debug, Clone)]
pub struct RawProject {
  pub id:          String,
  pub name:        String,
  pub description: Option<String>,
  pub owner_id:    String,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawRow for RawProject {
  type Model = Project;

  const ENTITY: Entity = Entity::Project;
  const COLUMNS: &'static str =
    "id, name, description, owner_id, created_at, updated_at";

  fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      name:        row.get(1)?,
      description: row.get(2)?,
      owner_id:    row.get(3)?,
      created_at:  row.get(4)?,
      updated_at:  row.get(5)?,
    })
  }

  fn into_model(self) -> Result<Project> {
    Ok(Project {
      id:          decode_uuid(&self.id)?,
      name:        self.name,
      description: self.description,
      owner_id:    decode_uuid(&self.owner_id)?,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `tickets` row.
#[derive(Debug, Clone)]
pub struct RawTicket {
  pub id:          String,
  pub project_id:  String,
  pub title:       String,
  pub description: Option<String>,
  pub status:      String,
  pub priority:    Option<String>,
  pub assignee_id: Option<String>,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawRow for RawTicket {
  type Model = Ticket;

  const ENTITY: Entity = Entity::Ticket;
  const COLUMNS: &'static str = "id, project_id, title, description, status, \
                                 priority, assignee_id, created_at, updated_at";

  fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      project_id:  row.get(1)?,
      title:       row.get(2)?,
      description: row.get(3)?,
      status:      row.get(4)?,
      priority:    row.get(5)?,
      assignee_id: row.get(6)?,
      created_at:  row.get(7)?,
      updated_at:  row.get(8)?,
    })
  }

  fn into_model(self) -> Result<Ticket> {
    Ok(Ticket {
      id:          decode_uuid(&self.id)?,
      project_id:  decode_uuid(&self.project_id)?,
      title:       self.title,
      description: self.description,
      status:      TicketStatus::from_token(&self.status)?,
      priority:    self
        .priority
        .as_deref()
        .map(TicketPriority::from_token)
        .transpose()?,
      assignee_id: self.assignee_id.as_deref().map(decode_uuid).transpose()?,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `comments` row.
#[derive(Debug, Clone)]
pub struct RawComment {
  pub id:         String,
  pub ticket_id:  String,
  pub user_id:    String,
  pub content:    String,
  pub created_at: String,
}

impl RawRow for RawComment {
  type Model = Comment;

  const ENTITY: Entity = Entity::Comment;
  const COLUMNS: &'static str = "id, ticket_id, user_id, content, created_at";

  fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      ticket_id:  row.get(1)?,
      user_id:    row.get(2)?,
      content:    row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  fn into_model(self) -> Result<Comment> {
    Ok(Comment {
      id:         decode_uuid(&self.id)?,
      ticket_id:  decode_uuid(&self.ticket_id)?,
      user_id:    decode_uuid(&self.user_id)?,
      content:    self.content,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from an `llm_interactions` row.
#[derive(Debug, Clone)]
pub struct RawInteraction {
  pub id:               String,
  pub user_id:          String,
  pub ticket_id:        Option<String>,
  pub interaction_type: String,
  pub request_payload:  String,
  pub response_payload: String,
  pub created_at:       String,
}

impl RawRow for RawInteraction {
  type Model = LlmInteraction;

  const ENTITY: Entity = Entity::LlmInteraction;
  const COLUMNS: &'static str = "id, user_id, ticket_id, interaction_type, \
                                 request_payload, response_payload, created_at";

  fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      user_id:          row.get(1)?,
      ticket_id:        row.get(2)?,
      interaction_type: row.get(3)?,
      request_payload:  row.get(4)?,
      response_payload: row.get(5)?,
      created_at:       row.get(6)?,
    })
  }

  fn into_model(self) -> Result<LlmInteraction> {
    Ok(LlmInteraction {
      id:               decode_uuid(&self.id)?,
      user_id:          decode_uuid(&self.user_id)?,
      ticket_id:        self.ticket_id.as_deref().map(decode_uuid).transpose()?,
      interaction_type: InteractionType::from_token(&self.interaction_type)?,
      request_payload:  serde_json::from_str(&self.request_payload)?,
      response_payload: serde_json::from_str(&self.response_payload)?,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn timestamps_match_the_sql_default_format() {
    let dt = decode_dt("2024-05-01T09:30:00.125Z").unwrap();
    assert_eq!(encode_dt(dt), "2024-05-01T09:30:00.125Z");
  }

  #[test]
  fn now_survives_a_round_trip() {
    let t = now();
    assert_eq!(decode_dt(&encode_dt(t)).unwrap(), t);
  }

  #[test]
  fn split_nullable_distinguishes_absent_from_null() {
    assert_eq!(split_nullable::<u8>(None), (false, None));
    assert_eq!(split_nullable::<u8>(Some(None)), (true, None));
    assert_eq!(split_nullable(Some(Some(7))), (true, Some(7)));
  }

  #[test]
  fn corrupt_status_decodes_as_domain_violation() {
    let raw = RawTicket {
      id:          encode_uuid(Uuid::new_v4()),
      project_id:  encode_uuid(Uuid::new_v4()),
      title:       "t".into(),
      description: None,
      status:      "archived".into(),
      priority:    None,
      assignee_id: None,
      created_at:  encode_dt(now()),
      updated_at:  encode_dt(now()),
    };
    let err = raw.into_model().unwrap_err();
    assert!(matches!(
      err,
      Error::Core(tracker_core::Error::DomainViolation { domain: "ticket_status", .. })
    ));
  }
}
