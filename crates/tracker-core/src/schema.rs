//! Declarative description of the relational schema.
//!
//! Two tables live here and they are kept deliberately apart:
//!
//! - [`FOREIGN_KEYS`] is the referential-action policy. Storage backends
//!   mirror it in their DDL and walk it to plan deletions.
//! - [`RELATIONS`] is the read-side relationship graph used to compose joined
//!   views. It carries no constraint semantics; dropping an entry changes what
//!   can be eagerly loaded, never what the engine accepts.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{Error, Result};

// ─── Entities ────────────────────────────────────────────────────────────────

/// One of the five persisted entities.
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
  strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Entity {
  User,
  Project,
  Ticket,
  Comment,
  LlmInteraction,
}

impl Entity {
  /// The table holding rows of this entity.
  pub const fn table(self) -> &'static str {
    match self {
      Self::User => "users",
      Self::Project => "projects",
      Self::Ticket => "tickets",
      Self::Comment => "comments",
      Self::LlmInteraction => "llm_interactions",
    }
  }
}

// ─── Enumerated domains ──────────────────────────────────────────────────────

/// A closed set of tokens stored in a single column.
///
/// Implementors derive their token mapping from `strum`; the storage layer
/// declares a CHECK constraint named [`EnumDomain::NAME`] over exactly
/// [`EnumDomain::tokens`].
pub trait EnumDomain:
  Copy + IntoEnumIterator + Into<&'static str> + std::str::FromStr + 'static
{
  /// Name of the domain, e.g. `ticket_status`.
  const NAME: &'static str;

  fn token(self) -> &'static str { self.into() }

  /// Parse a stored or user-supplied token, rejecting anything outside the
  /// domain.
  fn from_token(token: &str) -> Result<Self> {
    token.parse().map_err(|_| Error::DomainViolation {
      domain: Self::NAME,
      value:  token.to_owned(),
    })
  }

  fn tokens() -> Vec<&'static str> { Self::iter().map(Self::token).collect() }
}

// ─── Bounded text ────────────────────────────────────────────────────────────

/// Maximum length, in characters, of bounded text columns (emails, names,
/// titles).
pub const BOUNDED_TEXT_MAX: usize = 255;

/// Reject `value` if it exceeds [`BOUNDED_TEXT_MAX`] characters.
pub fn check_bounded(field: &'static str, value: &str) -> Result<()> {
  let len = value.chars().count();
  if len > BOUNDED_TEXT_MAX {
    return Err(Error::TextTooLong { field, len, max: BOUNDED_TEXT_MAX });
  }
  Ok(())
}

// ─── Referential action policy ───────────────────────────────────────────────

/// What happens to a child row when the row it references is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnDelete {
  /// Delete the child as well.
  Cascade,
  /// Keep the child and clear the reference column.
  SetNull,
}

impl OnDelete {
  /// The action as spelled in SQL `ON DELETE` clauses.
  pub const fn sql(self) -> &'static str {
    match self {
      Self::Cascade => "CASCADE",
      Self::SetNull => "SET NULL",
    }
  }
}

/// A physical foreign key: `child.column` references `parent.id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
  pub child:     Entity,
  pub column:    &'static str,
  pub parent:    Entity,
  pub on_delete: OnDelete,
}

/// Every foreign key in the schema with its deletion behaviour.
///
/// Owner and assignee both reference `users`, with different actions: a
/// project dies with its owner, a ticket merely loses its assignee.
pub const FOREIGN_KEYS: &[ForeignKey] = &[
  ForeignKey {
    child:     Entity::Project,
    column:    "owner_id",
    parent:    Entity::User,
    on_delete: OnDelete::Cascade,
  },
  ForeignKey {
    child:     Entity::Ticket,
    column:    "assignee_id",
    parent:    Entity::User,
    on_delete: OnDelete::SetNull,
  },
  ForeignKey {
    child:     Entity::Comment,
    column:    "user_id",
    parent:    Entity::User,
    on_delete: OnDelete::Cascade,
  },
  ForeignKey {
    child:     Entity::LlmInteraction,
    column:    "user_id",
    parent:    Entity::User,
    on_delete: OnDelete::Cascade,
  },
  ForeignKey {
    child:     Entity::Ticket,
    column:    "project_id",
    parent:    Entity::Project,
    on_delete: OnDelete::Cascade,
  },
  ForeignKey {
    child:     Entity::Comment,
    column:    "ticket_id",
    parent:    Entity::Ticket,
    on_delete: OnDelete::Cascade,
  },
  ForeignKey {
    child:     Entity::LlmInteraction,
    column:    "ticket_id",
    parent:    Entity::Ticket,
    on_delete: OnDelete::SetNull,
  },
];

/// Foreign keys whose parent is `parent`, i.e. the edges a deletion of a
/// `parent` row propagates along.
pub fn foreign_keys_into(
  parent: Entity,
) -> impl Iterator<Item = &'static ForeignKey> {
  FOREIGN_KEYS.iter().filter(move |fk| fk.parent == parent)
}

/// Foreign keys declared on `child`'s table.
pub fn foreign_keys_of(
  child: Entity,
) -> impl Iterator<Item = &'static ForeignKey> {
  FOREIGN_KEYS.iter().filter(move |fk| fk.child == child)
}

// ─── Relationship graph ──────────────────────────────────────────────────────

/// Which side of a relationship a [`Relation`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
  /// `from` holds the foreign key; at most one `to` row.
  One,
  /// `to` holds the foreign key; any number of `to` rows.
  Many,
}

/// A named, directed edge of the read-side relationship graph.
///
/// For [`Cardinality::One`] `column` lives on `from`'s table; for
/// [`Cardinality::Many`] it lives on `to`'s table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
  pub name:        &'static str,
  pub from:        Entity,
  pub to:          Entity,
  pub cardinality: Cardinality,
  pub column:      &'static str,
}

impl Relation {
  /// The physical foreign key this relation travels along, if any.
  pub fn foreign_key(&self) -> Option<&'static ForeignKey> {
    let (child, parent) = match self.cardinality {
      Cardinality::One => (self.from, self.to),
      Cardinality::Many => (self.to, self.from),
    };
    FOREIGN_KEYS.iter().find(|fk| {
      fk.child == child && fk.parent == parent && fk.column == self.column
    })
  }
}

/// Named relations, one constant per side.
pub mod relations {
  use super::{Cardinality, Entity, Relation};

  const fn many(
    name: &'static str,
    from: Entity,
    to: Entity,
    column: &'static str,
  ) -> Relation {
    Relation { name, from, to, cardinality: Cardinality::Many, column }
  }

  const fn one(
    name: &'static str,
    from: Entity,
    to: Entity,
    column: &'static str,
  ) -> Relation {
    Relation { name, from, to, cardinality: Cardinality::One, column }
  }

  // users
  pub const USER_PROJECTS: Relation =
    many("projects", Entity::User, Entity::Project, "owner_id");
  pub const USER_ASSIGNED_TICKETS: Relation =
    many("tickets", Entity::User, Entity::Ticket, "assignee_id");
  pub const USER_COMMENTS: Relation =
    many("comments", Entity::User, Entity::Comment, "user_id");
  pub const USER_INTERACTIONS: Relation =
    many("llm_interactions", Entity::User, Entity::LlmInteraction, "user_id");

  // projects
  pub const PROJECT_OWNER: Relation =
    one("owner", Entity::Project, Entity::User, "owner_id");
  pub const PROJECT_TICKETS: Relation =
    many("tickets", Entity::Project, Entity::Ticket, "project_id");

  // tickets
  pub const TICKET_PROJECT: Relation =
    one("project", Entity::Ticket, Entity::Project, "project_id");
  pub const TICKET_ASSIGNEE: Relation =
    one("assignee", Entity::Ticket, Entity::User, "assignee_id");
  pub const TICKET_COMMENTS: Relation =
    many("comments", Entity::Ticket, Entity::Comment, "ticket_id");
  pub const TICKET_INTERACTIONS: Relation = many(
    "llm_interactions",
    Entity::Ticket,
    Entity::LlmInteraction,
    "ticket_id",
  );

  // comments
  pub const COMMENT_TICKET: Relation =
    one("ticket", Entity::Comment, Entity::Ticket, "ticket_id");
  pub const COMMENT_AUTHOR: Relation =
    one("user", Entity::Comment, Entity::User, "user_id");

  // llm_interactions
  pub const INTERACTION_REQUESTER: Relation =
    one("user", Entity::LlmInteraction, Entity::User, "user_id");
  pub const INTERACTION_TICKET: Relation =
    one("ticket", Entity::LlmInteraction, Entity::Ticket, "ticket_id");
}

/// The full relationship graph.
pub const RELATIONS: &[Relation] = &[
  relations::USER_PROJECTS,
  relations::USER_ASSIGNED_TICKETS,
  relations::USER_COMMENTS,
  relations::USER_INTERACTIONS,
  relations::PROJECT_OWNER,
  relations::PROJECT_TICKETS,
  relations::TICKET_PROJECT,
  relations::TICKET_ASSIGNEE,
  relations::TICKET_COMMENTS,
  relations::TICKET_INTERACTIONS,
  relations::COMMENT_TICKET,
  relations::COMMENT_AUTHOR,
  relations::INTERACTION_REQUESTER,
  relations::INTERACTION_TICKET,
];

/// Relations leaving `from`, e.g. everything a ticket view can eager-load.
pub fn relations_from(from: Entity) -> impl Iterator<Item = &'static Relation> {
  RELATIONS.iter().filter(move |r| r.from == from)
}
