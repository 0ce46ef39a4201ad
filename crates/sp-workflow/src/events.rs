// events.rs — Workflow lifecycle events and notification dispatch.
//
// The portal's notification center, activity log, and export audit trail
// all observe the same lifecycle points: an entry entering a review queue,
// passing a gate, or being rejected. Sinks subscribe to these events; the
// dispatcher is synchronous and a failing sink never blocks the others.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sp_model::EntryStatus;

use crate::error::WorkflowError;

/// Events emitted at entry-lifecycle points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum WorkflowEvent {
    /// A draft entered a review queue.
    EntrySubmitted {
        entry_id: Uuid,
        indicator_id: Uuid,
        submitted_by: String,
        queue: String,
        timestamp: DateTime<Utc>,
    },

    /// A director passed the entry to the admin queue.
    DirectorApproved {
        entry_id: Uuid,
        approved_by: String,
        timestamp: DateTime<Utc>,
    },

    /// An admin gave final approval.
    AdminApproved {
        entry_id: Uuid,
        approved_by: String,
        timestamp: DateTime<Utc>,
    },

    /// The entry was rejected out of a pending queue.
    EntryRejected {
        entry_id: Uuid,
        rejected_by: String,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl WorkflowEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            WorkflowEvent::EntrySubmitted { .. } => "entry_submitted",
            WorkflowEvent::DirectorApproved { .. } => "director_approved",
            WorkflowEvent::AdminApproved { .. } => "admin_approved",
            WorkflowEvent::EntryRejected { .. } => "entry_rejected",
        }
    }

    pub fn entry_submitted(
        entry_id: Uuid,
        indicator_id: Uuid,
        submitted_by: &str,
        queue: EntryStatus,
    ) -> Self {
        WorkflowEvent::EntrySubmitted {
            entry_id,
            indicator_id,
            submitted_by: submitted_by.to_string(),
            queue: queue.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn director_approved(entry_id: Uuid, approved_by: &str) -> Self {
        WorkflowEvent::DirectorApproved {
            entry_id,
            approved_by: approved_by.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn admin_approved(entry_id: Uuid, approved_by: &str) -> Self {
        WorkflowEvent::AdminApproved {
            entry_id,
            approved_by: approved_by.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn entry_rejected(entry_id: Uuid, rejected_by: &str, reason: &str) -> Self {
        WorkflowEvent::EntryRejected {
            entry_id,
            rejected_by: rejected_by.to_string(),
            reason: reason.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Trait for receiving workflow events.
///
/// Implementations decide what to do with each event: append to a log,
/// call a webhook, raise a portal notification. Delivery mechanisms beyond
/// the JSONL log live outside this core.
pub trait NotificationSink: Send {
    /// Handle an event. Errors are logged but don't stop the system.
    fn send(&self, event: &WorkflowEvent) -> Result<(), WorkflowError>;
}

/// Logs events as JSONL to a file (always-on sink).
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl NotificationSink for LogSink {
    fn send(&self, event: &WorkflowEvent) -> Result<(), WorkflowError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| WorkflowError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| WorkflowError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| WorkflowError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}

/// Dispatches events to multiple sinks.
///
/// Errors from individual sinks are logged (via tracing) but don't
/// prevent other sinks from receiving the event.
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    /// Create a new dispatcher with no sinks.
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Add a notification sink.
    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    /// Dispatch an event to all sinks.
    pub fn dispatch(&self, event: &WorkflowEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.send(event) {
                tracing::warn!("notification sink error: {}", e);
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn event_serialization_round_trip() {
        let event = WorkflowEvent::entry_submitted(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "clerk-7",
            EntryStatus::PendingDirector,
        );
        let json = serde_json::to_string(&event).unwrap();
        let restored: WorkflowEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(event.event_type(), restored.event_type());
        assert!(json.contains("\"entry_submitted\""));
        assert!(json.contains("\"pending_director\""));
    }

    #[test]
    fn log_sink_appends_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let sink = LogSink::new(&path);

        sink.send(&WorkflowEvent::director_approved(Uuid::new_v4(), "dir-1"))
            .unwrap();
        sink.send(&WorkflowEvent::admin_approved(Uuid::new_v4(), "adm-1"))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("director_approved"));
        assert!(lines[1].contains("admin_approved"));
    }

    #[test]
    fn dispatcher_sends_to_all_sinks() {
        let dir = tempdir().unwrap();
        let path1 = dir.path().join("sink1.jsonl");
        let path2 = dir.path().join("sink2.jsonl");

        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_sink(Box::new(LogSink::new(&path1)));
        dispatcher.add_sink(Box::new(LogSink::new(&path2)));

        let event = WorkflowEvent::entry_rejected(Uuid::new_v4(), "dir-1", "duplicate");
        dispatcher.dispatch(&event);

        assert!(fs::read_to_string(&path1).unwrap().contains("entry_rejected"));
        assert!(fs::read_to_string(&path2).unwrap().contains("entry_rejected"));
    }

    #[test]
    fn event_type_names() {
        let id = Uuid::new_v4();
        assert_eq!(
            WorkflowEvent::director_approved(id, "dir-1").event_type(),
            "director_approved"
        );
        assert_eq!(
            WorkflowEvent::entry_rejected(id, "adm-1", "late").event_type(),
            "entry_rejected"
        );
    }
}
