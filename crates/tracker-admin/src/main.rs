//! tracker-admin: operator tool for a tracker SQLite store.
//!
//! Reads `tracker.toml` (or the path given with `--config`) plus `TRACKER_*`
//! environment variables, opens the store (creating the schema if needed),
//! and runs one subcommand. Reports are printed to stdout as JSON.
//!
//! ```
//! tracker-admin init
//! tracker-admin stats
//! tracker-admin preview-delete user 7f1c…
//! tracker-admin delete user 7f1c… --yes
//! ```

mod config;

use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracker_core::{
  schema::Entity,
  store::{DeletionReport, TrackerStore},
};
use tracker_store_sqlite::SqliteStore;
use uuid::Uuid;

use crate::config::AdminConfig;

#[derive(Parser)]
#[command(author, version, about = "Tracker store administration")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "tracker.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Create the store and its schema if they do not exist
  Init,

  /// Print the schema version and row counts
  Stats,

  /// Show what deleting a row would remove or detach, without deleting
  PreviewDelete {
    /// user, project, ticket, comment or llm_interaction
    entity: Entity,
    id:     Uuid,
  },

  /// Delete a row and everything its referential actions reach
  Delete {
    /// user, project, ticket or comment
    entity: Entity,
    id:     Uuid,

    /// Actually delete; without this only the preview is printed
    #[arg(long)]
    yes: bool,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let cfg = AdminConfig::load(&cli.config)?;

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;

  match cli.command {
    Command::Init => {
      let version = store.schema_version().await?;
      tracing::info!(path = %cfg.store_path.display(), version, "store ready");
    }
    Command::Stats => {
      let rows = store
        .row_counts()
        .await?
        .into_iter()
        .map(|(entity, n)| (entity.table().to_owned(), serde_json::Value::from(n)))
        .collect::<serde_json::Map<_, _>>();
      print_json(&serde_json::json!({
        "schema_version": store.schema_version().await?,
        "rows": rows,
      }))?;
    }
    Command::PreviewDelete { entity, id } => {
      let report = store
        .preview_deletion(entity, id)
        .await
        .with_context(|| format!("cannot preview deleting {entity} {id}"))?;
      print_json(&report)?;
    }
    Command::Delete { entity, id, yes } => {
      if !yes {
        let report = store.preview_deletion(entity, id).await?;
        print_json(&report)?;
        bail!("refusing to delete {entity} {id} without --yes");
      }
      let report = delete(&store, entity, id)
        .await
        .with_context(|| format!("failed to delete {entity} {id}"))?;
      print_json(&report)?;
    }
  }

  Ok(())
}

async fn delete(
  store: &SqliteStore,
  entity: Entity,
  id: Uuid,
) -> anyhow::Result<DeletionReport> {
  let report = match entity {
    Entity::User => store.delete_user(id).await?,
    Entity::Project => store.delete_project(id).await?,
    Entity::Ticket => store.delete_ticket(id).await?,
    Entity::Comment => store.delete_comment(id).await?,
    Entity::LlmInteraction => {
      bail!("llm interactions are removed only with the user who requested them")
    }
  };
  Ok(report)
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
