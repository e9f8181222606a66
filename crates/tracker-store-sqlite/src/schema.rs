//! SQL schema for the tracker SQLite store.
//!
//! Executed once at connection startup. The `ON DELETE` clauses mirror
//! [`tracker_core::schema::FOREIGN_KEYS`]; enumerated domains and the JSON
//! payload columns are named CHECK constraints so a violation reports the
//! rule it broke. Schema changes bump `PRAGMA user_version`.

/// Value written to `PRAGMA user_version` by [`SCHEMA`].
pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
///
/// Ids default to a random v4 UUID and timestamps to the current UTC time at
/// millisecond precision, the same text forms the Rust write path produces.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id          TEXT PRIMARY KEY NOT NULL DEFAULT (lower(
                  hex(randomblob(4)) || '-' || hex(randomblob(2)) || '-4' ||
                  substr(hex(randomblob(2)), 2) || '-' ||
                  substr('89ab', 1 + (random() & 3), 1) ||
                  substr(hex(randomblob(2)), 2) || '-' || hex(randomblob(6)))),
    email       TEXT NOT NULL UNIQUE,
    name        TEXT,
    avatar_url  TEXT,
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS projects (
    id          TEXT PRIMARY KEY NOT NULL DEFAULT (lower(
                  hex(randomblob(4)) || '-' || hex(randomblob(2)) || '-4' ||
                  substr(hex(randomblob(2)), 2) || '-' ||
                  substr('89ab', 1 + (random() & 3), 1) ||
                  substr(hex(randomblob(2)), 2) || '-' || hex(randomblob(6)))),
    name        TEXT NOT NULL,
    description TEXT,
    owner_id    TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

-- Ownership cascades; assignment does not.
CREATE TABLE IF NOT EXISTS tickets (
    id          TEXT PRIMARY KEY NOT NULL DEFAULT (lower(
                  hex(randomblob(4)) || '-' || hex(randomblob(2)) || '-4' ||
                  substr(hex(randomblob(2)), 2) || '-' ||
                  substr('89ab', 1 + (random() & 3), 1) ||
                  substr(hex(randomblob(2)), 2) || '-' || hex(randomblob(6)))),
    project_id  TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    title       TEXT NOT NULL,
    description TEXT,
    status      TEXT NOT NULL DEFAULT 'todo'
                CONSTRAINT ticket_status
                CHECK (status IN ('todo', 'in_progress', 'done', 'backlog')),
    priority    TEXT
                CONSTRAINT ticket_priority
                CHECK (priority IN ('low', 'medium', 'high')),
    assignee_id TEXT REFERENCES users(id) ON DELETE SET NULL,
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

-- Immutable once posted: no updated_at, and updates are rejected below.
CREATE TABLE IF NOT EXISTS comments (
    id          TEXT PRIMARY KEY NOT NULL DEFAULT (lower(
                  hex(randomblob(4)) || '-' || hex(randomblob(2)) || '-4' ||
                  substr(hex(randomblob(2)), 2) || '-' ||
                  substr('89ab', 1 + (random() & 3), 1) ||
                  substr(hex(randomblob(2)), 2) || '-' || hex(randomblob(6)))),
    ticket_id   TEXT NOT NULL REFERENCES tickets(id) ON DELETE CASCADE,
    user_id     TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

-- The audit record outlives the ticket it was about, not the requester.
CREATE TABLE IF NOT EXISTS llm_interactions (
    id               TEXT PRIMARY KEY NOT NULL DEFAULT (lower(
                       hex(randomblob(4)) || '-' || hex(randomblob(2)) || '-4' ||
                       substr(hex(randomblob(2)), 2) || '-' ||
                       substr('89ab', 1 + (random() & 3), 1) ||
                       substr(hex(randomblob(2)), 2) || '-' || hex(randomblob(6)))),
    user_id          TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    ticket_id        TEXT REFERENCES tickets(id) ON DELETE SET NULL,
    interaction_type TEXT NOT NULL
                     CONSTRAINT llm_interaction_type
                     CHECK (interaction_type IN ('summary', 'suggestion', 'response_gen')),
    request_payload  TEXT NOT NULL
                     CONSTRAINT request_payload_json
                     CHECK (json_valid(request_payload)),
    response_payload TEXT NOT NULL
                     CONSTRAINT response_payload_json
                     CHECK (json_valid(response_payload)),
    created_at       TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

-- Every foreign key column is indexed so cascades and joins stay cheap.
CREATE INDEX IF NOT EXISTS projects_owner_idx           ON projects(owner_id);
CREATE INDEX IF NOT EXISTS tickets_project_idx          ON tickets(project_id);
CREATE INDEX IF NOT EXISTS tickets_assignee_idx         ON tickets(assignee_id);
CREATE INDEX IF NOT EXISTS comments_ticket_idx          ON comments(ticket_id);
CREATE INDEX IF NOT EXISTS comments_user_idx            ON comments(user_id);
CREATE INDEX IF NOT EXISTS llm_interactions_user_idx    ON llm_interactions(user_id);
CREATE INDEX IF NOT EXISTS llm_interactions_ticket_idx  ON llm_interactions(ticket_id);

-- updated_at is refreshed on every mutation, including ones issued by a
-- writer that forgot to set it (and by ON DELETE SET NULL).
CREATE TRIGGER IF NOT EXISTS users_touch_updated_at
AFTER UPDATE ON users FOR EACH ROW
WHEN NEW.updated_at = OLD.updated_at
BEGIN
    UPDATE users SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
    WHERE id = NEW.id;
END;

CREATE TRIGGER IF NOT EXISTS projects_touch_updated_at
AFTER UPDATE ON projects FOR EACH ROW
WHEN NEW.updated_at = OLD.updated_at
BEGIN
    UPDATE projects SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
    WHERE id = NEW.id;
END;

CREATE TRIGGER IF NOT EXISTS tickets_touch_updated_at
AFTER UPDATE ON tickets FOR EACH ROW
WHEN NEW.updated_at = OLD.updated_at
BEGIN
    UPDATE tickets SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
    WHERE id = NEW.id;
END;

CREATE TRIGGER IF NOT EXISTS comments_immutable
BEFORE UPDATE ON comments FOR EACH ROW
BEGIN
    SELECT RAISE(ABORT, 'comments are immutable once posted');
END;

PRAGMA user_version = 1;
";
