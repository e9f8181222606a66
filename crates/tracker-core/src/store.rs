//! The `TrackerStore` trait and the deletion report it returns.
//!
//! The trait is implemented by storage backends (e.g. `tracker-store-sqlite`).
//! Application layers depend on this abstraction, not on a concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  ConstraintError,
  comment::{Comment, NewComment},
  interaction::{LlmInteraction, NewLlmInteraction},
  project::{NewProject, Project, ProjectPatch},
  schema::Entity,
  ticket::{NewTicket, Ticket, TicketPatch},
  user::{NewUser, User, UserPatch},
  view::{ProjectView, TicketView},
};

// ─── Deletion report ─────────────────────────────────────────────────────────

/// Everything a single deletion touched once the referential actions have
/// run. Counts include the root row itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionReport {
  pub entity:                Entity,
  pub id:                    Uuid,
  pub users:                 usize,
  pub projects:              usize,
  pub tickets:               usize,
  pub comments:              usize,
  pub llm_interactions:      usize,
  /// Surviving tickets whose assignee was cleared.
  pub tickets_unassigned:    usize,
  /// Surviving interactions whose ticket link was cleared.
  pub interactions_detached: usize,
}

impl DeletionReport {
  pub fn new(entity: Entity, id: Uuid) -> Self {
    Self {
      entity,
      id,
      users: 0,
      projects: 0,
      tickets: 0,
      comments: 0,
      llm_interactions: 0,
      tickets_unassigned: 0,
      interactions_detached: 0,
    }
  }

  pub fn deleted(&self, entity: Entity) -> usize {
    match entity {
      Entity::User => self.users,
      Entity::Project => self.projects,
      Entity::Ticket => self.tickets,
      Entity::Comment => self.comments,
      Entity::LlmInteraction => self.llm_interactions,
    }
  }

  pub fn record_deleted(&mut self, entity: Entity, count: usize) {
    let slot = match entity {
      Entity::User => &mut self.users,
      Entity::Project => &mut self.projects,
      Entity::Ticket => &mut self.tickets,
      Entity::Comment => &mut self.comments,
      Entity::LlmInteraction => &mut self.llm_interactions,
    };
    *slot += count;
  }

  /// Record `count` surviving `child` rows whose reference was set to null.
  /// Only tickets (assignee) and interactions (ticket link) are ever
  /// nullified.
  pub fn record_nullified(&mut self, child: Entity, count: usize) {
    match child {
      Entity::Ticket => self.tickets_unassigned += count,
      Entity::LlmInteraction => self.interactions_detached += count,
      Entity::User | Entity::Project | Entity::Comment => {}
    }
  }

  pub fn total_deleted(&self) -> usize {
    self.users + self.projects + self.tickets + self.comments + self.llm_interactions
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a tracker storage backend.
///
/// Integrity (uniqueness, enumerated domains, foreign keys, required columns)
/// is enforced by the backend at write time and reported through
/// [`ConstraintError`]. Every delete applies the referential-action policy in
/// [`crate::schema::FOREIGN_KEYS`] atomically.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes.
pub trait TrackerStore: Send + Sync {
  type Error: std::error::Error + ConstraintError + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Persist a user. Fails with a uniqueness violation if the email (or the
  /// supplied id) is taken.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn get_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Apply `patch` and refresh `updated_at`.
  fn update_user(
    &self,
    id: Uuid,
    patch: UserPatch,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Delete a user together with their projects (and everything in them),
  /// comments and interactions; tickets merely assigned to them are kept and
  /// unassigned.
  fn delete_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<DeletionReport, Self::Error>> + Send + '_;

  // ── Projects ──────────────────────────────────────────────────────────

  fn create_project(
    &self,
    input: NewProject,
  ) -> impl Future<Output = Result<Project, Self::Error>> + Send + '_;

  fn get_project(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Project>, Self::Error>> + Send + '_;

  fn update_project(
    &self,
    id: Uuid,
    patch: ProjectPatch,
  ) -> impl Future<Output = Result<Project, Self::Error>> + Send + '_;

  fn delete_project(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<DeletionReport, Self::Error>> + Send + '_;

  // ── Tickets ───────────────────────────────────────────────────────────

  fn create_ticket(
    &self,
    input: NewTicket,
  ) -> impl Future<Output = Result<Ticket, Self::Error>> + Send + '_;

  fn get_ticket(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Ticket>, Self::Error>> + Send + '_;

  fn update_ticket(
    &self,
    id: Uuid,
    patch: TicketPatch,
  ) -> impl Future<Output = Result<Ticket, Self::Error>> + Send + '_;

  /// Delete a ticket and its comments; interactions about it survive with
  /// their ticket link cleared.
  fn delete_ticket(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<DeletionReport, Self::Error>> + Send + '_;

  // ── Comments ──────────────────────────────────────────────────────────

  fn add_comment(
    &self,
    input: NewComment,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  fn get_comment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Comment>, Self::Error>> + Send + '_;

  fn delete_comment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<DeletionReport, Self::Error>> + Send + '_;

  // ── LLM interactions ──────────────────────────────────────────────────

  fn record_interaction(
    &self,
    input: NewLlmInteraction,
  ) -> impl Future<Output = Result<LlmInteraction, Self::Error>> + Send + '_;

  fn get_interaction(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<LlmInteraction>, Self::Error>> + Send + '_;

  // ── Deletion preview ──────────────────────────────────────────────────

  /// Compute what deleting `entity`/`id` would touch without deleting
  /// anything.
  fn preview_deletion(
    &self,
    entity: Entity,
    id: Uuid,
  ) -> impl Future<Output = Result<DeletionReport, Self::Error>> + Send + '_;

  // ── Joins ─────────────────────────────────────────────────────────────

  /// Projects owned by a user, oldest first.
  fn projects_owned_by(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Project>, Self::Error>> + Send + '_;

  fn tickets_assigned_to(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Ticket>, Self::Error>> + Send + '_;

  fn comments_by(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send + '_;

  fn interactions_by(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<LlmInteraction>, Self::Error>> + Send + '_;

  /// `None` if the project does not exist.
  fn project_owner(
    &self,
    project_id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn tickets_in_project(
    &self,
    project_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Ticket>, Self::Error>> + Send + '_;

  fn ticket_project(
    &self,
    ticket_id: Uuid,
  ) -> impl Future<Output = Result<Option<Project>, Self::Error>> + Send + '_;

  /// `None` if the ticket does not exist or is unassigned.
  fn ticket_assignee(
    &self,
    ticket_id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn comments_on_ticket(
    &self,
    ticket_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send + '_;

  fn interactions_for_ticket(
    &self,
    ticket_id: Uuid,
  ) -> impl Future<Output = Result<Vec<LlmInteraction>, Self::Error>> + Send + '_;

  fn comment_author(
    &self,
    comment_id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn comment_ticket(
    &self,
    comment_id: Uuid,
  ) -> impl Future<Output = Result<Option<Ticket>, Self::Error>> + Send + '_;

  fn interaction_requester(
    &self,
    interaction_id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// The ticket an interaction was about; `None` once that ticket is gone.
  fn interaction_ticket(
    &self,
    interaction_id: Uuid,
  ) -> impl Future<Output = Result<Option<Ticket>, Self::Error>> + Send + '_;

  /// A project with its owner and tickets. `None` if not found.
  fn project_view(
    &self,
    project_id: Uuid,
  ) -> impl Future<Output = Result<Option<ProjectView>, Self::Error>> + Send + '_;

  /// A ticket with its project, assignee, comments (with authors) and
  /// interactions, read from one snapshot. `None` if not found.
  fn ticket_view(
    &self,
    ticket_id: Uuid,
  ) -> impl Future<Output = Result<Option<TicketView>, Self::Error>> + Send + '_;
}
