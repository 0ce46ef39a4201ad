// error.rs — Error types for the approval workflow.
//
// UnauthorizedTransition and InvalidInput are always recoverable locally:
// the caller surfaces them to the actor and nothing retries automatically.
// ConcurrentModification belongs to the persistence boundary — it tells
// the second of two racing reviewers that the entry moved under them.

use thiserror::Error;
use uuid::Uuid;

use sp_model::{ActorRole, EntryStatus};

/// Errors raised by workflow decisions and the entry store.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The (status, role, action) combination is not in the transition
    /// table. The entry is untouched.
    #[error("role '{role}' may not {action} an entry in status '{status}'")]
    UnauthorizedTransition {
        status: EntryStatus,
        role: ActorRole,
        action: String,
    },

    /// The action was authorized but its payload is unusable
    /// (e.g. an empty rejection reason).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requested entry does not exist in the store.
    #[error("entry not found: {0}")]
    NotFound(Uuid),

    /// The entry's stored status no longer matches what the caller read —
    /// another reviewer got there first.
    #[error("entry {entry_id} changed status: expected '{expected}', found '{found}'")]
    ConcurrentModification {
        entry_id: Uuid,
        expected: EntryStatus,
        found: EntryStatus,
    },

    /// Approved entries are never physically deleted; corrections are
    /// filed as superseding entries.
    #[error("approved entry {0} cannot be deleted; file a superseding entry instead")]
    ApprovedEntryImmutable(Uuid),

    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize entry data.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
