// store.rs — EntryStore: persistence for data entries.
//
// Each entry is stored as a JSON file: `<store_dir>/<entry_id>.json`.
// This is the reference implementation of the workflow's persistence
// contract; the portal's managed database plays the same part in
// production. The part that matters is `apply_transition`: the caller
// names the status it read, and the write is refused if the stored status
// no longer matches — the second of two racing reviewers gets
// ConcurrentModification instead of silently double-applying.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use sp_model::{Actor, DataEntry, EntryStatus};

use crate::error::WorkflowError;
use crate::transition::{propose_transition, WorkflowAction};

/// Persistent store for data entries.
///
/// Each entry gets its own JSON file in the store directory.
pub struct EntryStore {
    store_dir: PathBuf,
}

impl EntryStore {
    /// Create a new store backed by the given directory.
    /// Creates the directory if it doesn't exist.
    pub fn new(store_dir: impl AsRef<Path>) -> Result<Self, WorkflowError> {
        let store_dir = store_dir.as_ref().to_path_buf();
        fs::create_dir_all(&store_dir).map_err(|source| WorkflowError::Io {
            path: store_dir.display().to_string(),
            source,
        })?;
        Ok(Self { store_dir })
    }

    /// Save an entry to disk (creates or overwrites).
    pub fn save(&self, entry: &DataEntry) -> Result<(), WorkflowError> {
        let path = self.entry_file(entry.entry_id);
        let json = serde_json::to_string_pretty(entry)?;
        fs::write(&path, json).map_err(|source| WorkflowError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(())
    }

    /// Get a specific entry by ID.
    pub fn get(&self, entry_id: Uuid) -> Result<Option<DataEntry>, WorkflowError> {
        let path = self.entry_file(entry_id);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path).map_err(|source| WorkflowError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let entry: DataEntry = serde_json::from_str(&json)?;
        Ok(Some(entry))
    }

    /// List all entries, sorted by creation time (newest first).
    pub fn list(&self) -> Result<Vec<DataEntry>, WorkflowError> {
        let mut entries = Vec::new();

        let dir = fs::read_dir(&self.store_dir).map_err(|source| WorkflowError::Io {
            path: self.store_dir.display().to_string(),
            source,
        })?;

        for item in dir {
            let item = item.map_err(|source| WorkflowError::Io {
                path: self.store_dir.display().to_string(),
                source,
            })?;
            let path = item.path();

            if path.extension().is_some_and(|ext| ext == "json") {
                let json = fs::read_to_string(&path).map_err(|source| WorkflowError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                if let Ok(entry) = serde_json::from_str::<DataEntry>(&json) {
                    entries.push(entry);
                }
            }
        }

        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    /// List entries filtered by status (e.g. a reviewer's queue).
    pub fn list_by_status(&self, status: EntryStatus) -> Result<Vec<DataEntry>, WorkflowError> {
        let all = self.list()?;
        Ok(all.into_iter().filter(|e| e.status == status).collect())
    }

    /// List the eligible entries for one indicator and year — the set the
    /// achievement engine consumes.
    pub fn list_eligible(
        &self,
        indicator_id: Uuid,
        year: i32,
    ) -> Result<Vec<DataEntry>, WorkflowError> {
        let all = self.list()?;
        Ok(all
            .into_iter()
            .filter(|e| {
                e.indicator_id == indicator_id && e.period_year == year && e.status.is_eligible()
            })
            .collect())
    }

    /// Apply a workflow transition with an optimistic concurrency check.
    ///
    /// `expected_status` is the status the caller read before deciding to
    /// act. The stored entry is re-read, and if its status has moved the
    /// write is refused with `ConcurrentModification` — the entry is left
    /// exactly as the first writer produced it.
    pub fn apply_transition(
        &self,
        entry_id: Uuid,
        expected_status: EntryStatus,
        actor: &Actor,
        action: &WorkflowAction,
    ) -> Result<DataEntry, WorkflowError> {
        let mut entry = self.get(entry_id)?.ok_or(WorkflowError::NotFound(entry_id))?;

        if entry.status != expected_status {
            tracing::warn!(
                entry = %entry_id,
                expected = %expected_status,
                found = %entry.status,
                "stale-status transition refused"
            );
            return Err(WorkflowError::ConcurrentModification {
                entry_id,
                expected: expected_status,
                found: entry.status,
            });
        }

        let outcome = propose_transition(&entry, actor, action)?;
        outcome.apply_to(&mut entry);
        self.save(&entry)?;

        tracing::info!(
            entry = %entry_id,
            status = %entry.status,
            actor = %actor.actor_id,
            action = %action,
            "transition applied"
        );
        Ok(entry)
    }

    /// Delete an entry from the store.
    ///
    /// Approved entries are never physically deleted — corrections are
    /// filed as superseding entries, so the audit trail stays intact.
    pub fn delete(&self, entry_id: Uuid) -> Result<bool, WorkflowError> {
        let path = self.entry_file(entry_id);
        match self.get(entry_id)? {
            None => return Ok(false),
            Some(entry) if entry.status == EntryStatus::Approved => {
                return Err(WorkflowError::ApprovedEntryImmutable(entry_id));
            }
            Some(_) => {}
        }
        fs::remove_file(&path).map_err(|source| WorkflowError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(true)
    }

    /// Path to the JSON file for a given entry.
    fn entry_file(&self, entry_id: Uuid) -> PathBuf {
        self.store_dir.join(format!("{}.json", entry_id))
    }
}
