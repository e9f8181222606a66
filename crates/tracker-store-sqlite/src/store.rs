//! [`SqliteStore`], the SQLite implementation of [`TrackerStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, types::Value};
use strum::IntoEnumIterator;
use uuid::Uuid;

use tracker_core::{
  comment::{Comment, NewComment},
  interaction::{LlmInteraction, NewLlmInteraction},
  project::{NewProject, Project, ProjectPatch},
  schema::{Cardinality, EnumDomain, Entity, Relation, relations},
  store::{DeletionReport, TrackerStore},
  ticket::{NewTicket, Ticket, TicketPatch},
  user::{NewUser, User, UserPatch},
  view::{AuthoredComment, ProjectView, TicketView},
};

use crate::{
  Error, Result, cascade,
  encode::{
    RawComment, RawInteraction, RawProject, RawRow, RawTicket, RawUser,
    encode_dt, encode_uuid, now, select_by_id, split_nullable,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A tracker store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Foreign
/// keys are enforced on the connection, so every delete runs the schema's
/// referential actions.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened tracker store");
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// The schema version recorded in `PRAGMA user_version`.
  pub async fn schema_version(&self) -> Result<i64> {
    let version = self
      .conn
      .call(|conn| Ok(conn.query_row("PRAGMA user_version", [], |r| r.get(0))?))
      .await?;
    Ok(version)
  }

  /// Number of rows in every table.
  pub async fn row_counts(&self) -> Result<Vec<(Entity, u64)>> {
    let counts = self
      .conn
      .call(|conn| {
        let mut counts = Vec::new();
        for entity in Entity::iter() {
          let n: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", entity.table()),
            [],
            |r| r.get(0),
          )?;
          counts.push((entity, n as u64));
        }
        Ok(counts)
      })
      .await?;
    Ok(counts)
  }

  /// Fetch a single row by id.
  async fn get_row<R: RawRow>(&self, id: Uuid) -> Result<Option<R::Model>> {
    let id_str = encode_uuid(id);

    let raw: Option<R> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&select_by_id::<R>(), rusqlite::params![id_str], R::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(R::into_model).transpose()
  }

  /// Run a single-row `UPDATE` (with the row id bound as `?1` ahead of
  /// `params`) and re-read the row in the same transaction.
  async fn update_row<R: RawRow>(
    &self,
    id: Uuid,
    sql: &'static str,
    params: Vec<Value>,
  ) -> Result<R::Model> {
    let id_str = encode_uuid(id);

    let raw: Option<R> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let bound = std::iter::once(Value::from(id_str.clone())).chain(params);
        let changed = tx.execute(sql, rusqlite::params_from_iter(bound))?;
        if changed == 0 {
          return Ok(None);
        }
        let row =
          tx.query_row(&select_by_id::<R>(), rusqlite::params![id_str], R::from_row)?;
        tx.commit()?;
        Ok(Some(row))
      })
      .await?;

    let model = raw
      .ok_or(Error::NotFound { entity: R::ENTITY, id })?
      .into_model()?;
    tracing::debug!(entity = %R::ENTITY, %id, "updated row");
    Ok(model)
  }

  /// Follow a declared relation from the row `id` of `rel.from`.
  async fn follow<R: RawRow>(
    &self,
    rel: Relation,
    id: Uuid,
  ) -> Result<Vec<R::Model>> {
    let id_str = encode_uuid(id);

    let raws: Vec<R> = self
      .conn
      .call(move |conn| Ok(follow_rows::<R>(conn, &rel, &id_str)?))
      .await?;

    raws.into_iter().map(R::into_model).collect()
  }

  async fn follow_one<R: RawRow>(
    &self,
    rel: Relation,
    id: Uuid,
  ) -> Result<Option<R::Model>> {
    Ok(self.follow::<R>(rel, id).await?.into_iter().next())
  }

  /// Plan the deletion of `entity`/`id` and, when `commit` is set, perform
  /// it; both happen inside one transaction.
  async fn delete_row(
    &self,
    entity: Entity,
    id: Uuid,
    commit: bool,
  ) -> Result<DeletionReport> {
    let report: Option<DeletionReport> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(report) = cascade::plan(&tx, entity, id)? else {
          return Ok(None);
        };
        if commit {
          tx.execute(
            &format!("DELETE FROM {} WHERE id = ?1", entity.table()),
            rusqlite::params![encode_uuid(id)],
          )?;
          tx.commit()?;
        }
        Ok(Some(report))
      })
      .await?;

    let report = report.ok_or(Error::NotFound { entity, id })?;
    if commit {
      tracing::info!(
        %entity,
        %id,
        users = report.users,
        projects = report.projects,
        tickets = report.tickets,
        comments = report.comments,
        llm_interactions = report.llm_interactions,
        tickets_unassigned = report.tickets_unassigned,
        interactions_detached = report.interactions_detached,
        "deleted row and dependents",
      );
    }
    Ok(report)
  }
}

#[cfg(test)]
impl SqliteStore {
  /// Run `f` directly on the connection, bypassing the typed write path.
  pub(crate) async fn with_conn<R, F>(&self, f: F) -> Result<R>
  where
    R: Send + 'static,
    F: FnOnce(&mut rusqlite::Connection) -> rusqlite::Result<R> + Send + 'static,
  {
    Ok(self.conn.call(move |conn| Ok(f(conn)?)).await?)
  }
}

/// The query for one side of a relation, keyed by the `from` row id as `?1`.
fn relation_sql<R: RawRow>(rel: &Relation) -> String {
  debug_assert_eq!(rel.to, R::ENTITY, "relation {} reads the wrong table", rel.name);
  match rel.cardinality {
    Cardinality::Many => format!(
      "SELECT {} FROM {} WHERE {} = ?1 ORDER BY created_at, rowid",
      R::COLUMNS,
      rel.to.table(),
      rel.column
    ),
    Cardinality::One => format!(
      "SELECT {} FROM {} WHERE id = (SELECT {} FROM {} WHERE id = ?1)",
      R::COLUMNS,
      rel.to.table(),
      rel.column,
      rel.from.table()
    ),
  }
}

fn follow_rows<R: RawRow>(
  conn: &rusqlite::Connection,
  rel: &Relation,
  id: &str,
) -> rusqlite::Result<Vec<R>> {
  let mut stmt = conn.prepare_cached(&relation_sql::<R>(rel))?;
  stmt
    .query_map(rusqlite::params![id], R::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()
}

// ─── TrackerStore impl ───────────────────────────────────────────────────────

impl TrackerStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> Result<User> {
    input.validate()?;
    let at = now();
    let user = User {
      id:         input.id.unwrap_or_else(Uuid::new_v4),
      email:      input.email,
      name:       input.name,
      avatar_url: input.avatar_url,
      created_at: at,
      updated_at: at,
    };

    let id_str = encode_uuid(user.id);
    let email  = user.email.clone();
    let name   = user.name.clone();
    let avatar = user.avatar_url.clone();
    let at_str = encode_dt(at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (id, email, name, avatar_url, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
          rusqlite::params![id_str, email, name, avatar, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(user_id = %user.id, "created user");
    Ok(user)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    self.get_row::<RawUser>(id).await
  }

  async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let email = email.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {} FROM users WHERE email = ?1", RawUser::COLUMNS),
              rusqlite::params![email],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_model).transpose()
  }

  async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User> {
    patch.validate()?;
    let (set_name, name) = split_nullable(patch.name);
    let (set_avatar, avatar) = split_nullable(patch.avatar_url);

    self
      .update_row::<RawUser>(
        id,
        "UPDATE users SET
           email      = COALESCE(?2, email),
           name       = CASE WHEN ?3 THEN ?4 ELSE name END,
           avatar_url = CASE WHEN ?5 THEN ?6 ELSE avatar_url END,
           updated_at = ?7
         WHERE id = ?1",
        vec![
          Value::from(patch.email),
          Value::from(set_name),
          Value::from(name),
          Value::from(set_avatar),
          Value::from(avatar),
          Value::from(encode_dt(now())),
        ],
      )
      .await
  }

  async fn delete_user(&self, id: Uuid) -> Result<DeletionReport> {
    self.delete_row(Entity::User, id, true).await
  }

  // ── Projects ──────────────────────────────────────────────────────────────

  async fn create_project(&self, input: NewProject) -> Result<Project> {
    input.validate()?;
    let at = now();
    let project = Project {
      id:          Uuid::new_v4(),
      name:        input.name,
      description: input.description,
      owner_id:    input.owner_id,
      created_at:  at,
      updated_at:  at,
    };

    let id_str       = encode_uuid(project.id);
    let name         = project.name.clone();
    let description  = project.description.clone();
    let owner_id_str = encode_uuid(project.owner_id);
    let at_str       = encode_dt(at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO projects (id, name, description, owner_id, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
          rusqlite::params![id_str, name, description, owner_id_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(project_id = %project.id, owner_id = %project.owner_id, "created project");
    Ok(project)
  }

  async fn get_project(&self, id: Uuid) -> Result<Option<Project>> {
    self.get_row::<RawProject>(id).await
  }

  async fn update_project(&self, id: Uuid, patch: ProjectPatch) -> Result<Project> {
    patch.validate()?;
    let (set_description, description) = split_nullable(patch.description);

    self
      .update_row::<RawProject>(
        id,
        "UPDATE projects SET
           name        = COALESCE(?2, name),
           description = CASE WHEN ?3 THEN ?4 ELSE description END,
           owner_id    = COALESCE(?5, owner_id),
           updated_at  = ?6
         WHERE id = ?1",
        vec![
          Value::from(patch.name),
          Value::from(set_description),
          Value::from(description),
          Value::from(patch.owner_id.map(encode_uuid)),
          Value::from(encode_dt(now())),
        ],
      )
      .await
  }

  async fn delete_project(&self, id: Uuid) -> Result<DeletionReport> {
    self.delete_row(Entity::Project, id, true).await
  }

  // ── Tickets ───────────────────────────────────────────────────────────────

  async fn create_ticket(&self, input: NewTicket) -> Result<Ticket> {
    input.validate()?;
    let at = now();
    let ticket = Ticket {
      id:          Uuid::new_v4(),
      project_id:  input.project_id,
      title:       input.title,
      description: input.description,
      status:      input.status,
      priority:    input.priority,
      assignee_id: input.assignee_id,
      created_at:  at,
      updated_at:  at,
    };

    let id_str       = encode_uuid(ticket.id);
    let project_str  = encode_uuid(ticket.project_id);
    let title        = ticket.title.clone();
    let description  = ticket.description.clone();
    let status       = ticket.status.token();
    let priority     = ticket.priority.map(EnumDomain::token);
    let assignee_str = ticket.assignee_id.map(encode_uuid);
    let at_str       = encode_dt(at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO tickets (
             id, project_id, title, description, status, priority,
             assignee_id, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
          rusqlite::params![
            id_str,
            project_str,
            title,
            description,
            status,
            priority,
            assignee_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(ticket_id = %ticket.id, project_id = %ticket.project_id, "created ticket");
    Ok(ticket)
  }

  async fn get_ticket(&self, id: Uuid) -> Result<Option<Ticket>> {
    self.get_row::<RawTicket>(id).await
  }

  async fn update_ticket(&self, id: Uuid, patch: TicketPatch) -> Result<Ticket> {
    patch.validate()?;
    let (set_description, description) = split_nullable(patch.description);
    let (set_priority, priority) = split_nullable(patch.priority);
    let (set_assignee, assignee) = split_nullable(patch.assignee_id);

    self
      .update_row::<RawTicket>(
        id,
        "UPDATE tickets SET
           title       = COALESCE(?2, title),
           description = CASE WHEN ?3 THEN ?4 ELSE description END,
           status      = COALESCE(?5, status),
           priority    = CASE WHEN ?6 THEN ?7 ELSE priority END,
           assignee_id = CASE WHEN ?8 THEN ?9 ELSE assignee_id END,
           updated_at  = ?10
         WHERE id = ?1",
        vec![
          Value::from(patch.title),
          Value::from(set_description),
          Value::from(description),
          Value::from(patch.status.map(|s| s.token().to_owned())),
          Value::from(set_priority),
          Value::from(priority.map(|p| p.token().to_owned())),
          Value::from(set_assignee),
          Value::from(assignee.map(encode_uuid)),
          Value::from(encode_dt(now())),
        ],
      )
      .await
  }

  async fn delete_ticket(&self, id: Uuid) -> Result<DeletionReport> {
    self.delete_row(Entity::Ticket, id, true).await
  }

  // ── Comments ──────────────────────────────────────────────────────────────

  async fn add_comment(&self, input: NewComment) -> Result<Comment> {
    let comment = Comment {
      id:         Uuid::new_v4(),
      ticket_id:  input.ticket_id,
      user_id:    input.user_id,
      content:    input.content,
      created_at: now(),
    };

    let id_str     = encode_uuid(comment.id);
    let ticket_str = encode_uuid(comment.ticket_id);
    let user_str   = encode_uuid(comment.user_id);
    let content    = comment.content.clone();
    let at_str     = encode_dt(comment.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO comments (id, ticket_id, user_id, content, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, ticket_str, user_str, content, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(comment_id = %comment.id, ticket_id = %comment.ticket_id, "added comment");
    Ok(comment)
  }

  async fn get_comment(&self, id: Uuid) -> Result<Option<Comment>> {
    self.get_row::<RawComment>(id).await
  }

  async fn delete_comment(&self, id: Uuid) -> Result<DeletionReport> {
    self.delete_row(Entity::Comment, id, true).await
  }

  // ── LLM interactions ──────────────────────────────────────────────────────

  async fn record_interaction(
    &self,
    input: NewLlmInteraction,
  ) -> Result<LlmInteraction> {
    let interaction = LlmInteraction {
      id:               Uuid::new_v4(),
      user_id:          input.user_id,
      ticket_id:        input.ticket_id,
      interaction_type: input.interaction_type,
      request_payload:  input.request_payload,
      response_payload: input.response_payload,
      created_at:       now(),
    };

    let id_str       = encode_uuid(interaction.id);
    let user_str     = encode_uuid(interaction.user_id);
    let ticket_str   = interaction.ticket_id.map(encode_uuid);
    let kind         = interaction.interaction_type.token();
    let request_str  = serde_json::to_string(&interaction.request_payload)?;
    let response_str = serde_json::to_string(&interaction.response_payload)?;
    let at_str       = encode_dt(interaction.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO llm_interactions (
             id, user_id, ticket_id, interaction_type,
             request_payload, response_payload, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            user_str,
            ticket_str,
            kind,
            request_str,
            response_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(
      interaction_id = %interaction.id,
      user_id = %interaction.user_id,
      interaction_type = %interaction.interaction_type,
      "recorded llm interaction",
    );
    Ok(interaction)
  }

  async fn get_interaction(&self, id: Uuid) -> Result<Option<LlmInteraction>> {
    self.get_row::<RawInteraction>(id).await
  }

  // ── Deletion preview ──────────────────────────────────────────────────────

  async fn preview_deletion(&self, entity: Entity, id: Uuid) -> Result<DeletionReport> {
    self.delete_row(entity, id, false).await
  }

  // ── Joins ─────────────────────────────────────────────────────────────────

  async fn projects_owned_by(&self, user_id: Uuid) -> Result<Vec<Project>> {
    self.follow::<RawProject>(relations::USER_PROJECTS, user_id).await
  }

  async fn tickets_assigned_to(&self, user_id: Uuid) -> Result<Vec<Ticket>> {
    self.follow::<RawTicket>(relations::USER_ASSIGNED_TICKETS, user_id).await
  }

  async fn comments_by(&self, user_id: Uuid) -> Result<Vec<Comment>> {
    self.follow::<RawComment>(relations::USER_COMMENTS, user_id).await
  }

  async fn interactions_by(&self, user_id: Uuid) -> Result<Vec<LlmInteraction>> {
    self.follow::<RawInteraction>(relations::USER_INTERACTIONS, user_id).await
  }

  async fn project_owner(&self, project_id: Uuid) -> Result<Option<User>> {
    self.follow_one::<RawUser>(relations::PROJECT_OWNER, project_id).await
  }

  async fn tickets_in_project(&self, project_id: Uuid) -> Result<Vec<Ticket>> {
    self.follow::<RawTicket>(relations::PROJECT_TICKETS, project_id).await
  }

  async fn ticket_project(&self, ticket_id: Uuid) -> Result<Option<Project>> {
    self.follow_one::<RawProject>(relations::TICKET_PROJECT, ticket_id).await
  }

  async fn ticket_assignee(&self, ticket_id: Uuid) -> Result<Option<User>> {
    self.follow_one::<RawUser>(relations::TICKET_ASSIGNEE, ticket_id).await
  }

  async fn comments_on_ticket(&self, ticket_id: Uuid) -> Result<Vec<Comment>> {
    self.follow::<RawComment>(relations::TICKET_COMMENTS, ticket_id).await
  }

  async fn interactions_for_ticket(
    &self,
    ticket_id: Uuid,
  ) -> Result<Vec<LlmInteraction>> {
    self
      .follow::<RawInteraction>(relations::TICKET_INTERACTIONS, ticket_id)
      .await
  }

  async fn comment_author(&self, comment_id: Uuid) -> Result<Option<User>> {
    self.follow_one::<RawUser>(relations::COMMENT_AUTHOR, comment_id).await
  }

  async fn comment_ticket(&self, comment_id: Uuid) -> Result<Option<Ticket>> {
    self.follow_one::<RawTicket>(relations::COMMENT_TICKET, comment_id).await
  }

  async fn interaction_requester(&self, interaction_id: Uuid) -> Result<Option<User>> {
    self
      .follow_one::<RawUser>(relations::INTERACTION_REQUESTER, interaction_id)
      .await
  }

  async fn interaction_ticket(&self, interaction_id: Uuid) -> Result<Option<Ticket>> {
    self
      .follow_one::<RawTicket>(relations::INTERACTION_TICKET, interaction_id)
      .await
  }

  async fn project_view(&self, project_id: Uuid) -> Result<Option<ProjectView>> {
    let id_str = encode_uuid(project_id);

    let raw = self
      .conn
      .call(move |conn| {
        // Read-only; dropping the transaction just ends the snapshot.
        let tx = conn.transaction()?;
        let Some(project) = tx
          .query_row(
            &select_by_id::<RawProject>(),
            rusqlite::params![id_str],
            RawProject::from_row,
          )
          .optional()?
        else {
          return Ok(None);
        };
        let owner = follow_rows::<RawUser>(&tx, &relations::PROJECT_OWNER, &id_str)?;
        let tickets =
          follow_rows::<RawTicket>(&tx, &relations::PROJECT_TICKETS, &id_str)?;
        Ok(Some((project, owner, tickets)))
      })
      .await?;

    let Some((project, owner, tickets)) = raw else {
      return Ok(None);
    };
    let project = project.into_model()?;
    let owner = owner
      .into_iter()
      .next()
      .ok_or(Error::NotFound { entity: Entity::User, id: project.owner_id })?
      .into_model()?;
    let tickets = tickets
      .into_iter()
      .map(RawTicket::into_model)
      .collect::<Result<Vec<_>>>()?;

    Ok(Some(ProjectView { project, owner, tickets }))
  }

  async fn ticket_view(&self, ticket_id: Uuid) -> Result<Option<TicketView>> {
    let id_str = encode_uuid(ticket_id);

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(ticket) = tx
          .query_row(
            &select_by_id::<RawTicket>(),
            rusqlite::params![id_str],
            RawTicket::from_row,
          )
          .optional()?
        else {
          return Ok(None);
        };
        let project =
          follow_rows::<RawProject>(&tx, &relations::TICKET_PROJECT, &id_str)?;
        let assignee =
          follow_rows::<RawUser>(&tx, &relations::TICKET_ASSIGNEE, &id_str)?;
        let mut comments = Vec::new();
        for comment in
          follow_rows::<RawComment>(&tx, &relations::TICKET_COMMENTS, &id_str)?
        {
          let author =
            follow_rows::<RawUser>(&tx, &relations::COMMENT_AUTHOR, &comment.id)?;
          comments.push((comment, author));
        }
        let interactions =
          follow_rows::<RawInteraction>(&tx, &relations::TICKET_INTERACTIONS, &id_str)?;
        Ok(Some((ticket, project, assignee, comments, interactions)))
      })
      .await?;

    let Some((ticket, project, assignee, comments, interactions)) = raw else {
      return Ok(None);
    };
    let ticket = ticket.into_model()?;
    let project = project
      .into_iter()
      .next()
      .ok_or(Error::NotFound { entity: Entity::Project, id: ticket.project_id })?
      .into_model()?;
    let assignee = assignee
      .into_iter()
      .next()
      .map(RawUser::into_model)
      .transpose()?;

    let mut authored = Vec::with_capacity(comments.len());
    for (comment, author) in comments {
      let comment = comment.into_model()?;
      let author = author
        .into_iter()
        .next()
        .ok_or(Error::NotFound { entity: Entity::User, id: comment.user_id })?
        .into_model()?;
      authored.push(AuthoredComment { comment, author });
    }

    let interactions = interactions
      .into_iter()
      .map(RawInteraction::into_model)
      .collect::<Result<Vec<_>>>()?;

    Ok(Some(TicketView {
      ticket,
      project,
      assignee,
      comments: authored,
      interactions,
    }))
  }
}
