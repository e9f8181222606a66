//! Deletion planning.
//!
//! SQLite applies the `ON DELETE` actions itself; this module only predicts
//! what they will touch, by walking [`FOREIGN_KEYS`] outward from the root
//! row. It runs on the same transaction as the `DELETE`, so the prediction
//! and the deletion see the same rows.

use std::collections::{HashMap, HashSet};

use rusqlite::{OptionalExtension as _, Transaction};
use tracker_core::{
  schema::{Entity, ForeignKey, OnDelete, foreign_keys_into},
  store::DeletionReport,
};
use uuid::Uuid;

use crate::encode::encode_uuid;

/// Upper bound on bound parameters per `IN (...)` list.
const CHUNK: usize = 500;

/// Compute the [`DeletionReport`] for deleting `entity`/`id`, or `None` if
/// the row does not exist.
pub fn plan(
  tx: &Transaction<'_>,
  entity: Entity,
  id: Uuid,
) -> rusqlite::Result<Option<DeletionReport>> {
  let id_str = encode_uuid(id);
  let exists = tx
    .query_row(
      &format!("SELECT 1 FROM {} WHERE id = ?1", entity.table()),
      rusqlite::params![id_str],
      |_| Ok(()),
    )
    .optional()?
    .is_some();
  if !exists {
    return Ok(None);
  }

  let mut doomed: HashMap<Entity, HashSet<String>> = HashMap::new();
  let mut nullified: HashMap<Entity, HashSet<String>> = HashMap::new();
  doomed.entry(entity).or_default().insert(id_str.clone());

  let mut frontier = vec![(entity, vec![id_str])];
  while let Some((parent, parent_ids)) = frontier.pop() {
    for fk in foreign_keys_into(parent) {
      let children = child_ids(tx, fk, &parent_ids)?;
      match fk.on_delete {
        OnDelete::Cascade => {
          let seen = doomed.entry(fk.child).or_default();
          let fresh: Vec<String> =
            children.into_iter().filter(|c| seen.insert(c.clone())).collect();
          if !fresh.is_empty() {
            frontier.push((fk.child, fresh));
          }
        }
        OnDelete::SetNull => {
          nullified.entry(fk.child).or_default().extend(children);
        }
      }
    }
  }

  let mut report = DeletionReport::new(entity, id);
  for (child, ids) in &doomed {
    report.record_deleted(*child, ids.len());
  }
  // A row both nullified and deleted (e.g. a ticket assigned to the user who
  // owns its project) is only deleted.
  for (child, ids) in &nullified {
    let survivors = match doomed.get(child) {
      Some(gone) => ids.difference(gone).count(),
      None => ids.len(),
    };
    report.record_nullified(*child, survivors);
  }
  Ok(Some(report))
}

/// Ids of `fk.child` rows whose `fk.column` references any of `parent_ids`.
fn child_ids(
  tx: &Transaction<'_>,
  fk: &ForeignKey,
  parent_ids: &[String],
) -> rusqlite::Result<Vec<String>> {
  let mut ids = Vec::new();
  for chunk in parent_ids.chunks(CHUNK) {
    let placeholders = vec!["?"; chunk.len()].join(", ");
    let sql = format!(
      "SELECT id FROM {} WHERE {} IN ({placeholders})",
      fk.child.table(),
      fk.column
    );
    let mut stmt = tx.prepare_cached(&sql)?;
    let rows = stmt
      .query_map(rusqlite::params_from_iter(chunk), |row| row.get(0))?
      .collect::<rusqlite::Result<Vec<String>>>()?;
    ids.extend(rows);
  }
  Ok(ids)
}
