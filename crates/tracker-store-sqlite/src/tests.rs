//! Integration tests for `SqliteStore` against an in-memory database.

use std::time::Duration;

use strum::IntoEnumIterator;
use tracker_core::{
  ConstraintError, ConstraintKind,
  comment::{Comment, NewComment},
  interaction::{InteractionType, LlmInteraction, NewLlmInteraction},
  project::{NewProject, Project, ProjectPatch},
  schema::{EnumDomain, Entity, foreign_keys_of},
  store::{DeletionReport, TrackerStore},
  ticket::{NewTicket, Ticket, TicketPatch, TicketPriority, TicketStatus},
  user::{NewUser, User, UserPatch},
};
use uuid::Uuid;

use crate::{Error, SCHEMA_VERSION, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

/// Alice owns a project; Bob is assigned its one ticket, commented on it
/// and asked for a summary of it.
struct Seeded {
  s:           SqliteStore,
  alice:       User,
  bob:         User,
  project:     Project,
  ticket:      Ticket,
  comment:     Comment,
  interaction: LlmInteraction,
}

async fn seeded() -> Seeded {
  let s = store().await;
  let alice = s.create_user(NewUser::new("alice@example.com")).await.unwrap();
  let bob = s.create_user(NewUser::new("bob@example.com")).await.unwrap();
  let project = s
    .create_project(NewProject::new(alice.id, "Launch"))
    .await
    .unwrap();
  let ticket = s
    .create_ticket(NewTicket {
      priority: Some(TicketPriority::High),
      assignee_id: Some(bob.id),
      ..NewTicket::new(project.id, "Write release notes")
    })
    .await
    .unwrap();
  let comment = s
    .add_comment(NewComment::new(ticket.id, bob.id, "On it."))
    .await
    .unwrap();
  let interaction = s
    .record_interaction(NewLlmInteraction {
      user_id:          bob.id,
      ticket_id:        Some(ticket.id),
      interaction_type: InteractionType::Summary,
      request_payload:  serde_json::json!({ "prompt": "summarise" }),
      response_payload: serde_json::json!({ "text": "Release notes pending." }),
    })
    .await
    .unwrap();
  Seeded { s, alice, bob, project, ticket, comment, interaction }
}

async fn raw_execute(
  s: &SqliteStore,
  sql: &'static str,
  params: Vec<String>,
) -> Result<usize, Error> {
  s.with_conn(move |conn| conn.execute(sql, rusqlite::params_from_iter(params)))
    .await
}

async fn pause() { tokio::time::sleep(Duration::from_millis(5)).await }

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_user() {
  let s = store().await;
  let user = s
    .create_user(NewUser {
      name: Some("Alice".into()),
      ..NewUser::new("alice@example.com")
    })
    .await
    .unwrap();
  assert_eq!(user.created_at, user.updated_at);

  let fetched = s.get_user(user.id).await.unwrap().unwrap();
  assert_eq!(fetched, user);
}

#[tokio::test]
async fn user_keeps_identity_provider_id() {
  let s = store().await;
  let id = Uuid::new_v4();
  let user = s
    .create_user(NewUser::with_id(id, "idp@example.com"))
    .await
    .unwrap();
  assert_eq!(user.id, id);
  assert!(s.get_user(id).await.unwrap().is_some());
}

#[tokio::test]
async fn get_user_missing_returns_none() {
  let s = store().await;
  assert!(s.get_user(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn get_user_by_email() {
  let s = store().await;
  let user = s.create_user(NewUser::new("carol@example.com")).await.unwrap();
  let found = s.get_user_by_email("carol@example.com").await.unwrap();
  assert_eq!(found.map(|u| u.id), Some(user.id));
  assert!(s.get_user_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_is_a_uniqueness_violation() {
  let s = store().await;
  s.create_user(NewUser::new("dup@example.com")).await.unwrap();
  let err = s
    .create_user(NewUser::new("dup@example.com"))
    .await
    .unwrap_err();
  assert!(err.is_violation(ConstraintKind::Uniqueness), "{err}");
  assert!(err.to_string().contains("users.email"), "{err}");
}

#[tokio::test]
async fn duplicate_id_is_a_uniqueness_violation() {
  let s = store().await;
  let id = Uuid::new_v4();
  s.create_user(NewUser::with_id(id, "one@example.com")).await.unwrap();
  let err = s
    .create_user(NewUser::with_id(id, "two@example.com"))
    .await
    .unwrap_err();
  assert!(err.is_violation(ConstraintKind::Uniqueness), "{err}");
}

#[tokio::test]
async fn overlong_email_is_rejected_before_the_database() {
  let s = store().await;
  let email = format!("{}@example.com", "a".repeat(255));
  let err = s.create_user(NewUser::new(email)).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(tracker_core::Error::TextTooLong { field: "email", .. })
  ));
}

#[tokio::test]
async fn update_user_refreshes_updated_at() {
  let s = store().await;
  let user = s
    .create_user(NewUser {
      avatar_url: Some("https://example.com/a.png".into()),
      ..NewUser::new("dave@example.com")
    })
    .await
    .unwrap();
  pause().await;

  let updated = s
    .update_user(user.id, UserPatch {
      name: Some(Some("Dave".into())),
      avatar_url: Some(None),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(updated.name.as_deref(), Some("Dave"));
  assert_eq!(updated.avatar_url, None);
  assert_eq!(updated.email, "dave@example.com");
  assert_eq!(updated.created_at, user.created_at);
  assert!(updated.updated_at > user.updated_at);
}

#[tokio::test]
async fn update_user_to_taken_email_is_a_uniqueness_violation() {
  let t = seeded().await;
  let err = t
    .s
    .update_user(t.bob.id, UserPatch {
      email: Some(t.alice.email.clone()),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert!(err.is_violation(ConstraintKind::Uniqueness), "{err}");
}

#[tokio::test]
async fn update_missing_user_is_not_found() {
  let s = store().await;
  let id = Uuid::new_v4();
  let err = s.update_user(id, UserPatch::default()).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: Entity::User, id: e } if e == id));
}

// ─── Projects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn project_with_unknown_owner_is_a_referential_violation() {
  let s = store().await;
  let err = s
    .create_project(NewProject::new(Uuid::new_v4(), "Orphan"))
    .await
    .unwrap_err();
  assert!(err.is_violation(ConstraintKind::Referential), "{err}");
  assert!(s.row_counts().await.unwrap().iter().all(|(_, n)| *n == 0));
}

#[tokio::test]
async fn update_project_transfers_ownership() {
  let t = seeded().await;
  pause().await;
  let updated = t
    .s
    .update_project(t.project.id, ProjectPatch {
      owner_id: Some(t.bob.id),
      description: Some(Some("Q3 launch".into())),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(updated.owner_id, t.bob.id);
  assert_eq!(updated.name, "Launch");
  assert_eq!(updated.description.as_deref(), Some("Q3 launch"));
  assert!(updated.updated_at > t.project.updated_at);

  let err = t
    .s
    .update_project(t.project.id, ProjectPatch {
      owner_id: Some(Uuid::new_v4()),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert!(err.is_violation(ConstraintKind::Referential), "{err}");
}

// ─── Tickets ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ticket_defaults_to_todo_without_priority() {
  let t = seeded().await;
  let ticket = t
    .s
    .create_ticket(NewTicket::new(t.project.id, "Plain"))
    .await
    .unwrap();
  let fetched = t.s.get_ticket(ticket.id).await.unwrap().unwrap();
  assert_eq!(fetched.status, TicketStatus::Todo);
  assert_eq!(fetched.priority, None);
  assert_eq!(fetched.assignee_id, None);
  assert_eq!(fetched, ticket);
}

#[tokio::test]
async fn every_priority_and_status_round_trips() {
  let t = seeded().await;
  for priority in TicketPriority::iter().map(Some).chain([None]) {
    for status in TicketStatus::iter() {
      let ticket = t
        .s
        .create_ticket(NewTicket {
          status,
          priority,
          ..NewTicket::new(t.project.id, format!("{status} / {priority:?}"))
        })
        .await
        .unwrap();
      let fetched = t.s.get_ticket(ticket.id).await.unwrap().unwrap();
      assert_eq!(fetched.status, status);
      assert_eq!(fetched.priority, priority);
    }
  }
}

#[tokio::test]
async fn ticket_in_unknown_project_is_a_referential_violation() {
  let s = store().await;
  let err = s
    .create_ticket(NewTicket::new(Uuid::new_v4(), "Nowhere"))
    .await
    .unwrap_err();
  assert!(err.is_violation(ConstraintKind::Referential), "{err}");
}

#[tokio::test]
async fn ticket_with_unknown_assignee_is_a_referential_violation() {
  let t = seeded().await;
  let err = t
    .s
    .create_ticket(NewTicket {
      assignee_id: Some(Uuid::new_v4()),
      ..NewTicket::new(t.project.id, "Ghost")
    })
    .await
    .unwrap_err();
  assert!(err.is_violation(ConstraintKind::Referential), "{err}");

  let err = t
    .s
    .update_ticket(t.ticket.id, TicketPatch {
      assignee_id: Some(Some(Uuid::new_v4())),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert!(err.is_violation(ConstraintKind::Referential), "{err}");
}

#[tokio::test]
async fn status_outside_the_domain_is_rejected() {
  let t = seeded().await;
  let project = t.project.id.to_string();

  for bad in ["archived", "Todo", "IN_PROGRESS", ""] {
    let err = raw_execute(
      &t.s,
      "INSERT INTO tickets (project_id, title, status) VALUES (?1, 'bad', ?2)",
      vec![project.clone(), bad.to_owned()],
    )
    .await
    .unwrap_err();
    assert!(err.is_violation(ConstraintKind::Domain), "{bad:?}: {err}");
    assert!(err.to_string().contains("ticket_status"), "{err}");
  }

  for token in TicketStatus::tokens() {
    raw_execute(
      &t.s,
      "INSERT INTO tickets (project_id, title, status) VALUES (?1, 'ok', ?2)",
      vec![project.clone(), token.to_owned()],
    )
    .await
    .unwrap();
  }
}

#[tokio::test]
async fn priority_outside_the_domain_is_rejected() {
  let t = seeded().await;
  let err = raw_execute(
    &t.s,
    "UPDATE tickets SET priority = 'urgent' WHERE id = ?1",
    vec![t.ticket.id.to_string()],
  )
  .await
  .unwrap_err();
  assert!(err.is_violation(ConstraintKind::Domain), "{err}");
  assert!(err.to_string().contains("ticket_priority"), "{err}");

  let fetched = t.s.get_ticket(t.ticket.id).await.unwrap().unwrap();
  assert_eq!(fetched.priority, Some(TicketPriority::High));
}

#[tokio::test]
async fn interaction_type_outside_the_domain_is_rejected() {
  let t = seeded().await;
  let err = raw_execute(
    &t.s,
    "INSERT INTO llm_interactions
       (user_id, interaction_type, request_payload, response_payload)
     VALUES (?1, 'chat', '{}', '{}')",
    vec![t.bob.id.to_string()],
  )
  .await
  .unwrap_err();
  assert!(err.is_violation(ConstraintKind::Domain), "{err}");
  assert!(err.to_string().contains("llm_interaction_type"), "{err}");
}

#[tokio::test]
async fn missing_required_column_is_a_not_null_violation() {
  let t = seeded().await;
  let err = raw_execute(
    &t.s,
    "INSERT INTO tickets (project_id, title) VALUES (?1, NULL)",
    vec![t.project.id.to_string()],
  )
  .await
  .unwrap_err();
  assert!(err.is_violation(ConstraintKind::NotNull), "{err}");
  assert!(err.to_string().contains("tickets.title"), "{err}");
}

#[tokio::test]
async fn null_required_reference_is_a_referential_violation() {
  let t = seeded().await;
  let err = raw_execute(
    &t.s,
    "INSERT INTO projects (name, owner_id) VALUES ('Ownerless', NULL)",
    vec![],
  )
  .await
  .unwrap_err();
  assert!(err.is_violation(ConstraintKind::Referential), "{err}");
  assert!(err.to_string().contains("projects.owner_id"), "{err}");

  let err = raw_execute(
    &t.s,
    "INSERT INTO comments (ticket_id, user_id, content) VALUES (?1, NULL, 'hi')",
    vec![t.ticket.id.to_string()],
  )
  .await
  .unwrap_err();
  assert!(err.is_violation(ConstraintKind::Referential), "{err}");
}

#[tokio::test]
async fn payloads_that_are_not_json_are_rejected() {
  let t = seeded().await;
  let err = raw_execute(
    &t.s,
    "INSERT INTO llm_interactions
       (user_id, ticket_id, interaction_type, request_payload, response_payload)
     VALUES (?1, ?2, 'summary', 'plain text prompt', '{}')",
    vec![t.bob.id.to_string(), t.ticket.id.to_string()],
  )
  .await
  .unwrap_err();
  assert!(err.is_violation(ConstraintKind::Domain), "{err}");
  assert!(err.to_string().contains("request_payload_json"), "{err}");

  let err = raw_execute(
    &t.s,
    "UPDATE llm_interactions SET response_payload = 'not json' WHERE id = ?1",
    vec![t.interaction.id.to_string()],
  )
  .await
  .unwrap_err();
  assert!(err.is_violation(ConstraintKind::Domain), "{err}");

  // Nothing unreadable got in, so the ticket still assembles.
  let view = t.s.ticket_view(t.ticket.id).await.unwrap().unwrap();
  assert_eq!(view.interactions, vec![t.interaction.clone()]);
}

#[tokio::test]
async fn raw_insert_takes_column_defaults() {
  let t = seeded().await;
  raw_execute(
    &t.s,
    "INSERT INTO tickets (project_id, title) VALUES (?1, 'from sql')",
    vec![t.project.id.to_string()],
  )
  .await
  .unwrap();

  let id: String = t
    .s
    .with_conn(|conn| {
      conn.query_row("SELECT id FROM tickets WHERE title = 'from sql'", [], |r| {
        r.get(0)
      })
    })
    .await
    .unwrap();
  let id = Uuid::parse_str(&id).unwrap();
  assert_eq!(id.get_version_num(), 4);

  let ticket = t.s.get_ticket(id).await.unwrap().unwrap();
  assert_eq!(ticket.status, TicketStatus::Todo);
  assert_eq!(ticket.priority, None);
  assert_eq!(ticket.created_at, ticket.updated_at);
}

#[tokio::test]
async fn update_ticket_patches_only_named_fields() {
  let t = seeded().await;
  pause().await;
  let updated = t
    .s
    .update_ticket(t.ticket.id, TicketPatch {
      status: Some(TicketStatus::InProgress),
      priority: Some(None),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(updated.status, TicketStatus::InProgress);
  assert_eq!(updated.priority, None);
  assert_eq!(updated.title, t.ticket.title);
  assert_eq!(updated.assignee_id, Some(t.bob.id));
  assert_eq!(updated.created_at, t.ticket.created_at);
  assert!(updated.updated_at > t.ticket.updated_at);
}

#[tokio::test]
async fn writes_that_skip_updated_at_still_refresh_it() {
  let t = seeded().await;
  pause().await;
  raw_execute(
    &t.s,
    "UPDATE tickets SET title = 'Renamed' WHERE id = ?1",
    vec![t.ticket.id.to_string()],
  )
  .await
  .unwrap();

  let fetched = t.s.get_ticket(t.ticket.id).await.unwrap().unwrap();
  assert_eq!(fetched.title, "Renamed");
  assert!(fetched.updated_at > t.ticket.updated_at);
}

// ─── Comments and interactions ───────────────────────────────────────────────

#[tokio::test]
async fn comments_are_immutable() {
  let t = seeded().await;
  let err = raw_execute(
    &t.s,
    "UPDATE comments SET content = 'edited' WHERE id = ?1",
    vec![t.comment.id.to_string()],
  )
  .await
  .unwrap_err();
  assert!(matches!(err, Error::Database(_)), "{err}");

  let fetched = t.s.get_comment(t.comment.id).await.unwrap().unwrap();
  assert_eq!(fetched.content, "On it.");
}

#[tokio::test]
async fn comment_on_unknown_ticket_is_a_referential_violation() {
  let t = seeded().await;
  let err = t
    .s
    .add_comment(NewComment::new(Uuid::new_v4(), t.bob.id, "?"))
    .await
    .unwrap_err();
  assert!(err.is_violation(ConstraintKind::Referential), "{err}");
}

#[tokio::test]
async fn interaction_payloads_round_trip() {
  let t = seeded().await;
  let request = serde_json::json!({
    "model": "small",
    "messages": [{ "role": "user", "content": "draft a reply" }],
    "temperature": 0.2,
  });
  let recorded = t
    .s
    .record_interaction(NewLlmInteraction {
      user_id:          t.alice.id,
      ticket_id:        None,
      interaction_type: InteractionType::ResponseGen,
      request_payload:  request.clone(),
      response_payload: serde_json::json!(null),
    })
    .await
    .unwrap();

  let fetched = t.s.get_interaction(recorded.id).await.unwrap().unwrap();
  assert_eq!(fetched, recorded);
  assert_eq!(fetched.request_payload, request);
  assert_eq!(fetched.ticket_id, None);
}

// ─── Deletion ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn deleting_an_owner_removes_everything_they_own() {
  let t = seeded().await;
  let report = t.s.delete_user(t.alice.id).await.unwrap();

  assert_eq!(report.users, 1);
  assert_eq!(report.projects, 1);
  assert_eq!(report.tickets, 1);
  assert_eq!(report.comments, 1);
  assert_eq!(report.llm_interactions, 0);
  assert_eq!(report.tickets_unassigned, 0);
  assert_eq!(report.interactions_detached, 1);

  assert!(t.s.get_user(t.alice.id).await.unwrap().is_none());
  assert!(t.s.get_project(t.project.id).await.unwrap().is_none());
  assert!(t.s.get_ticket(t.ticket.id).await.unwrap().is_none());
  assert!(t.s.get_comment(t.comment.id).await.unwrap().is_none());
  assert!(t.s.get_user(t.bob.id).await.unwrap().is_some());

  // The audit record outlives the ticket.
  let interaction = t.s.get_interaction(t.interaction.id).await.unwrap().unwrap();
  assert_eq!(interaction.ticket_id, None);
}

#[tokio::test]
async fn deleting_a_user_removes_their_whole_graph() {
  let s = store().await;
  let user = s.create_user(NewUser::new("solo@example.com")).await.unwrap();
  let project = s
    .create_project(NewProject::new(user.id, "Solo"))
    .await
    .unwrap();
  let ticket = s
    .create_ticket(NewTicket::new(project.id, "Only ticket"))
    .await
    .unwrap();
  let comment = s
    .add_comment(NewComment::new(ticket.id, user.id, "note to self"))
    .await
    .unwrap();
  let interaction = s
    .record_interaction(NewLlmInteraction {
      user_id:          user.id,
      ticket_id:        Some(ticket.id),
      interaction_type: InteractionType::Suggestion,
      request_payload:  serde_json::json!({}),
      response_payload: serde_json::json!({ "suggestion": "split it" }),
    })
    .await
    .unwrap();

  let report = s.delete_user(user.id).await.unwrap();
  assert_eq!(report.total_deleted(), 5);
  assert_eq!(report.llm_interactions, 1);
  assert_eq!(report.interactions_detached, 0);

  assert!(s.get_project(project.id).await.unwrap().is_none());
  assert!(s.get_ticket(ticket.id).await.unwrap().is_none());
  assert!(s.get_comment(comment.id).await.unwrap().is_none());
  assert!(s.get_interaction(interaction.id).await.unwrap().is_none());
  assert!(s.row_counts().await.unwrap().iter().all(|(_, n)| *n == 0));
}

#[tokio::test]
async fn deleting_an_assignee_only_unassigns_their_tickets() {
  let t = seeded().await;
  let report = t.s.delete_user(t.bob.id).await.unwrap();

  assert_eq!(report.users, 1);
  assert_eq!(report.projects, 0);
  assert_eq!(report.tickets, 0);
  assert_eq!(report.comments, 1);
  assert_eq!(report.llm_interactions, 1);
  assert_eq!(report.tickets_unassigned, 1);
  assert_eq!(report.interactions_detached, 0);

  let ticket = t.s.get_ticket(t.ticket.id).await.unwrap().unwrap();
  assert_eq!(ticket.assignee_id, None);
  assert!(t.s.get_comment(t.comment.id).await.unwrap().is_none());
  assert!(t.s.get_interaction(t.interaction.id).await.unwrap().is_none());
}

#[tokio::test]
async fn self_assigned_ticket_is_deleted_not_unassigned() {
  let t = seeded().await;
  t.s
    .create_ticket(NewTicket {
      assignee_id: Some(t.alice.id),
      ..NewTicket::new(t.project.id, "Mine")
    })
    .await
    .unwrap();

  let report = t.s.delete_user(t.alice.id).await.unwrap();
  assert_eq!(report.tickets, 2);
  assert_eq!(report.tickets_unassigned, 0);
}

#[tokio::test]
async fn deleting_a_ticket_detaches_its_interactions() {
  let t = seeded().await;
  let report = t.s.delete_ticket(t.ticket.id).await.unwrap();
  assert_eq!(report.tickets, 1);
  assert_eq!(report.comments, 1);
  assert_eq!(report.interactions_detached, 1);
  assert_eq!(report.total_deleted(), 2);

  let interaction = t.s.get_interaction(t.interaction.id).await.unwrap().unwrap();
  assert_eq!(interaction.ticket_id, None);
  assert!(t.s.get_project(t.project.id).await.unwrap().is_some());
}

#[tokio::test]
async fn deleting_a_project_removes_its_tickets() {
  let t = seeded().await;
  let report = t.s.delete_project(t.project.id).await.unwrap();
  assert_eq!(report.projects, 1);
  assert_eq!(report.tickets, 1);
  assert_eq!(report.comments, 1);
  assert!(t.s.get_user(t.alice.id).await.unwrap().is_some());
  assert!(t.s.tickets_assigned_to(t.bob.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_comment_touches_nothing_else() {
  let t = seeded().await;
  let report = t.s.delete_comment(t.comment.id).await.unwrap();
  let mut expected = DeletionReport::new(Entity::Comment, t.comment.id);
  expected.comments = 1;
  assert_eq!(report, expected);
}

#[tokio::test]
async fn preview_reports_without_deleting() {
  let t = seeded().await;
  let before = t.s.row_counts().await.unwrap();

  let preview = t.s.preview_deletion(Entity::User, t.alice.id).await.unwrap();
  assert_eq!(t.s.row_counts().await.unwrap(), before);
  assert!(t.s.get_user(t.alice.id).await.unwrap().is_some());

  let report = t.s.delete_user(t.alice.id).await.unwrap();
  assert_eq!(preview, report);
}

#[tokio::test]
async fn report_matches_row_counts() {
  let t = seeded().await;
  let before = t.s.row_counts().await.unwrap();
  let report = t.s.delete_user(t.alice.id).await.unwrap();
  let after = t.s.row_counts().await.unwrap();

  for ((entity, b), (_, a)) in before.into_iter().zip(after) {
    assert_eq!((b - a) as usize, report.deleted(entity), "{entity}");
  }
}

#[tokio::test]
async fn deleting_a_missing_row_is_not_found() {
  let s = store().await;
  let id = Uuid::new_v4();
  let err = s.delete_ticket(id).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: Entity::Ticket, .. }));
  let err = s.preview_deletion(Entity::User, id).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: Entity::User, .. }));
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn physical_foreign_keys_match_the_declared_policy() {
  let s = store().await;
  for entity in Entity::iter() {
    let table = entity.table();
    let mut actual: Vec<(String, String, String)> = s
      .with_conn(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT \"table\", \"from\", on_delete \
           FROM pragma_foreign_key_list('{table}')"
        ))?;
        let rows = stmt
          .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))?
          .collect::<rusqlite::Result<Vec<_>>>();
        rows
      })
      .await
      .unwrap();
    let mut declared: Vec<(String, String, String)> = foreign_keys_of(entity)
      .map(|fk| {
        (
          fk.parent.table().to_owned(),
          fk.column.to_owned(),
          fk.on_delete.sql().to_owned(),
        )
      })
      .collect();
    actual.sort();
    declared.sort();
    assert_eq!(actual, declared, "{table}");
  }
}

#[tokio::test]
async fn foreign_keys_are_enforced_on_the_connection() {
  let s = store().await;
  let enabled: i64 = s
    .with_conn(|conn| conn.query_row("PRAGMA foreign_keys", [], |r| r.get(0)))
    .await
    .unwrap();
  assert_eq!(enabled, 1);
}

#[tokio::test]
async fn schema_version_is_recorded() {
  let s = store().await;
  assert_eq!(s.schema_version().await.unwrap(), SCHEMA_VERSION);
}

// ─── Joins ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn user_side_joins() {
  let t = seeded().await;
  let projects = t.s.projects_owned_by(t.alice.id).await.unwrap();
  assert_eq!(projects, vec![t.project.clone()]);
  assert!(t.s.projects_owned_by(t.bob.id).await.unwrap().is_empty());

  let assigned = t.s.tickets_assigned_to(t.bob.id).await.unwrap();
  assert_eq!(assigned, vec![t.ticket.clone()]);

  let comments = t.s.comments_by(t.bob.id).await.unwrap();
  assert_eq!(comments, vec![t.comment.clone()]);

  let interactions = t.s.interactions_by(t.bob.id).await.unwrap();
  assert_eq!(interactions, vec![t.interaction.clone()]);
}

#[tokio::test]
async fn project_and_ticket_side_joins() {
  let t = seeded().await;
  let second = t
    .s
    .create_ticket(NewTicket::new(t.project.id, "Second"))
    .await
    .unwrap();

  assert_eq!(t.s.project_owner(t.project.id).await.unwrap(), Some(t.alice.clone()));
  let tickets = t.s.tickets_in_project(t.project.id).await.unwrap();
  assert_eq!(tickets.iter().map(|t| t.id).collect::<Vec<_>>(), [
    t.ticket.id,
    second.id
  ]);

  assert_eq!(t.s.ticket_project(t.ticket.id).await.unwrap(), Some(t.project.clone()));
  assert_eq!(t.s.ticket_assignee(t.ticket.id).await.unwrap(), Some(t.bob.clone()));
  assert_eq!(t.s.ticket_assignee(second.id).await.unwrap(), None);
  assert_eq!(t.s.comments_on_ticket(t.ticket.id).await.unwrap(), vec![
    t.comment.clone()
  ]);
  assert_eq!(t.s.interactions_for_ticket(t.ticket.id).await.unwrap(), vec![
    t.interaction.clone()
  ]);
  assert_eq!(t.s.comment_author(t.comment.id).await.unwrap(), Some(t.bob.clone()));
  assert_eq!(
    t.s.interaction_ticket(t.interaction.id).await.unwrap(),
    Some(t.ticket.clone())
  );
  assert_eq!(t.s.comment_ticket(t.comment.id).await.unwrap(), Some(t.ticket.clone()));
  assert_eq!(
    t.s.interaction_requester(t.interaction.id).await.unwrap(),
    Some(t.bob.clone())
  );
  assert_eq!(t.s.comment_ticket(Uuid::new_v4()).await.unwrap(), None);
}

#[tokio::test]
async fn project_view_gathers_owner_and_tickets() {
  let t = seeded().await;
  let view = t.s.project_view(t.project.id).await.unwrap().unwrap();
  assert_eq!(view.project, t.project);
  assert_eq!(view.owner, t.alice);
  assert_eq!(view.tickets, vec![t.ticket.clone()]);
  assert!(t.s.project_view(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn ticket_view_gathers_everything() {
  let t = seeded().await;
  let reply = t
    .s
    .add_comment(NewComment::new(t.ticket.id, t.alice.id, "Thanks!"))
    .await
    .unwrap();

  let view = t.s.ticket_view(t.ticket.id).await.unwrap().unwrap();
  assert_eq!(view.ticket, t.ticket);
  assert_eq!(view.project, t.project);
  assert_eq!(view.assignee, Some(t.bob.clone()));
  assert_eq!(view.comments.len(), 2);
  assert_eq!(view.comments[0].comment, t.comment);
  assert_eq!(view.comments[0].author, t.bob);
  assert_eq!(view.comments[1].comment, reply);
  assert_eq!(view.comments[1].author, t.alice);
  assert_eq!(view.interactions, vec![t.interaction.clone()]);

  assert!(t.s.ticket_view(Uuid::new_v4()).await.unwrap().is_none());
}
