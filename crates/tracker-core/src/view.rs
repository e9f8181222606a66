//! Joined read models, assembled from the relationship graph on read and never
//! stored.

use serde::{Deserialize, Serialize};

use crate::{
  comment::Comment, interaction::LlmInteraction, project::Project,
  ticket::Ticket, user::User,
};

/// A project with its owner and tickets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectView {
  pub project: Project,
  pub owner:   User,
  /// Oldest first.
  pub tickets: Vec<Ticket>,
}

/// A comment together with its author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthoredComment {
  pub comment: Comment,
  pub author:  User,
}

/// A ticket with everything a detail page shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketView {
  pub ticket:       Ticket,
  pub project:      Project,
  pub assignee:     Option<User>,
  /// Oldest first.
  pub comments:     Vec<AuthoredComment>,
  pub interactions: Vec<LlmInteraction>,
}
