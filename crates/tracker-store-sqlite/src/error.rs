//! Error type for `tracker-store-sqlite`.

use std::ffi::c_int;

use rusqlite::ffi;
use thiserror::Error;
use tracker_core::{
  ConstraintError, ConstraintKind,
  schema::{Entity, FOREIGN_KEYS},
};

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] tracker_core::Error),

  /// An integrity rule rejected the write. `detail` is SQLite's message,
  /// e.g. `UNIQUE constraint failed: users.email` or
  /// `CHECK constraint failed: ticket_status`.
  #[error("{kind} violation: {detail}")]
  Constraint { kind: ConstraintKind, detail: String },

  /// An update or delete addressed a row that does not exist.
  #[error("{entity} not found: {id}")]
  NotFound { entity: Entity, id: uuid::Uuid },

  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(e: tokio_rusqlite::Error) -> Self {
    if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
      failure,
      message,
    )) = &e
      && let Some(kind) = classify(failure.extended_code, message.as_deref())
    {
      return Self::Constraint {
        kind,
        detail: message.clone().unwrap_or_else(|| failure.to_string()),
      };
    }
    Self::Database(e)
  }
}

/// Map an SQLite extended result code onto the constraint taxonomy.
///
/// A null required reference fails as NOT NULL in SQLite but is a
/// referential violation here.
fn classify(extended_code: c_int, message: Option<&str>) -> Option<ConstraintKind> {
  match extended_code {
    ffi::SQLITE_CONSTRAINT_NOTNULL if message.is_some_and(is_null_reference) => {
      Some(ConstraintKind::Referential)
    }
    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
      Some(ConstraintKind::Uniqueness)
    }
    ffi::SQLITE_CONSTRAINT_CHECK => Some(ConstraintKind::Domain),
    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(ConstraintKind::Referential),
    ffi::SQLITE_CONSTRAINT_NOTNULL => Some(ConstraintKind::NotNull),
    _ => None,
  }
}

/// Whether a `NOT NULL constraint failed: <table>.<column>` message names a
/// foreign key column.
fn is_null_reference(message: &str) -> bool {
  let Some((table, column)) = message
    .strip_prefix("NOT NULL constraint failed: ")
    .and_then(|target| target.split_once('.'))
  else {
    return false;
  };
  FOREIGN_KEYS
    .iter()
    .any(|fk| fk.child.table() == table && fk.column == column)
}

impl ConstraintError for Error {
  fn constraint_kind(&self) -> Option<ConstraintKind> {
    match self {
      Self::Constraint { kind, .. } => Some(*kind),
      Self::Core(e) => e.constraint_kind(),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  fn failure(extended_code: c_int, message: &str) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
      ffi::Error::new(extended_code),
      Some(message.to_owned()),
    ))
  }

  #[test]
  fn constraint_codes_map_onto_the_taxonomy() {
    let cases = [
      (ffi::SQLITE_CONSTRAINT_UNIQUE, ConstraintKind::Uniqueness),
      (ffi::SQLITE_CONSTRAINT_PRIMARYKEY, ConstraintKind::Uniqueness),
      (ffi::SQLITE_CONSTRAINT_CHECK, ConstraintKind::Domain),
      (ffi::SQLITE_CONSTRAINT_FOREIGNKEY, ConstraintKind::Referential),
      (ffi::SQLITE_CONSTRAINT_NOTNULL, ConstraintKind::NotNull),
    ];
    for (code, kind) in cases {
      let err = Error::from(failure(code, "constraint failed"));
      assert_eq!(err.constraint_kind(), Some(kind));
    }
  }

  #[test]
  fn null_reference_is_referential_not_not_null() {
    let err = Error::from(failure(
      ffi::SQLITE_CONSTRAINT_NOTNULL,
      "NOT NULL constraint failed: comments.ticket_id",
    ));
    assert_eq!(err.constraint_kind(), Some(ConstraintKind::Referential));

    let err = Error::from(failure(
      ffi::SQLITE_CONSTRAINT_NOTNULL,
      "NOT NULL constraint failed: comments.content",
    ));
    assert_eq!(err.constraint_kind(), Some(ConstraintKind::NotNull));
  }

  #[test]
  fn other_failures_stay_database_errors() {
    let err = Error::from(failure(ffi::SQLITE_CONSTRAINT_TRIGGER, "immutable"));
    assert!(matches!(err, Error::Database(_)));
    assert_eq!(err.constraint_kind(), None);
  }

  #[test]
  fn message_is_kept_as_detail() {
    let err = Error::from(failure(
      ffi::SQLITE_CONSTRAINT_UNIQUE,
      "UNIQUE constraint failed: users.email",
    ));
    assert_eq!(
      err.to_string(),
      "uniqueness violation: UNIQUE constraint failed: users.email"
    );
  }
}
