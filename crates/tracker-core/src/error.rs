//! Error types for `tracker-core`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The integrity rules the schema enforces at write time.
///
/// Each kind points at a caller-correctable input defect; none of them is
/// retried.
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
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "kebab-case")]
pub enum ConstraintKind {
  /// A unique column (e.g. `users.email`) already holds the value.
  Uniqueness,
  /// A value outside a closed enumerated domain.
  Domain,
  /// A reference to a row that does not exist.
  Referential,
  /// A required column was left empty.
  NotNull,
}

/// Lets callers branch on integrity failures without naming the backend.
pub trait ConstraintError {
  /// The violated rule, or `None` for errors that are not constraint
  /// violations.
  fn constraint_kind(&self) -> Option<ConstraintKind>;

  fn is_violation(&self, kind: ConstraintKind) -> bool {
    self.constraint_kind() == Some(kind)
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("domain violation: {value:?} is not a valid {domain}")]
  DomainViolation { domain: &'static str, value: String },

  #[error("{field} is {len} characters long; at most {max} are allowed")]
  TextTooLong {
    field: &'static str,
    len:   usize,
    max:   usize,
  },
}

impl ConstraintError for Error {
  fn constraint_kind(&self) -> Option<ConstraintKind> {
    match self {
      Self::DomainViolation { .. } => Some(ConstraintKind::Domain),
      Self::TextTooLong { .. } => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn constraint_kind_display_is_kebab_case() {
    assert_eq!(ConstraintKind::NotNull.to_string(), "not-null");
    assert_eq!(ConstraintKind::Uniqueness.to_string(), "uniqueness");
  }

  #[test]
  fn only_domain_violations_are_constraint_errors() {
    let domain = Error::DomainViolation {
      domain: "ticket_status",
      value:  "archived".into(),
    };
    assert!(domain.is_violation(ConstraintKind::Domain));

    let long = Error::TextTooLong { field: "title", len: 300, max: 255 };
    assert_eq!(long.constraint_kind(), None);
  }
}
