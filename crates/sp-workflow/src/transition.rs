// transition.rs — The approval state machine.
//
// The permitted review transitions live in one const table keyed by
// (current status, role, action). `propose_transition` does a single table
// lookup and returns the next status plus the audit stamps to write; the
// caller owns the atomic persistence write (see store.rs). Submission is
// handled structurally rather than in the table because its next status
// depends on the submitter's role and the organization's review policy.
//
//   draft ──(submit)──────────────> pending_director | pending_admin
//   pending_director ──(director approve)──> pending_admin
//   pending_director ──(director reject)───> rejected
//   pending_admin ──(admin approve)────────> approved
//   pending_admin ──(admin reject)─────────> rejected
//
// No transition leaves `approved` or `rejected`. Corrections require a new
// entry, never mutation of a decided one.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sp_model::{Actor, ActorRole, DataEntry, EntryStatus};

use crate::error::WorkflowError;

/// An action an actor attempts against an entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WorkflowAction {
    /// Move a draft into the appropriate review queue.
    Submit {
        /// Whether the organization routes submissions through the
        /// director gate. Admin submitters skip it either way.
        requires_director_review: bool,
    },
    /// Director passes the entry to the admin queue.
    DirectorApprove,
    /// Admin gives final approval.
    AdminApprove,
    /// Reject the entry with a reason.
    Reject { reason: String },
}

/// Payload-free discriminant of a [`WorkflowAction`], used as the table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActionKind {
    Submit,
    DirectorApprove,
    AdminApprove,
    Reject,
}

impl WorkflowAction {
    fn kind(&self) -> ActionKind {
        match self {
            WorkflowAction::Submit { .. } => ActionKind::Submit,
            WorkflowAction::DirectorApprove => ActionKind::DirectorApprove,
            WorkflowAction::AdminApprove => ActionKind::AdminApprove,
            WorkflowAction::Reject { .. } => ActionKind::Reject,
        }
    }
}

// The action name doubles as the wire verb in errors and events.
impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ActionKind::Submit => write!(f, "submit"),
            ActionKind::DirectorApprove => write!(f, "director_approve"),
            ActionKind::AdminApprove => write!(f, "admin_approve"),
            ActionKind::Reject => write!(f, "reject"),
        }
    }
}

/// One row of the transition table: who may move an entry from where.
struct TransitionRule {
    current: EntryStatus,
    role: ActorRole,
    action: ActionKind,
    next: EntryStatus,
}

/// The review transitions. Each pending status is owned by exactly one
/// role; nothing leaves the terminal statuses.
const TRANSITIONS: &[TransitionRule] = &[
    TransitionRule {
        current: EntryStatus::PendingDirector,
        role: ActorRole::Director,
        action: ActionKind::DirectorApprove,
        next: EntryStatus::PendingAdmin,
    },
    TransitionRule {
        current: EntryStatus::PendingDirector,
        role: ActorRole::Director,
        action: ActionKind::Reject,
        next: EntryStatus::Rejected,
    },
    TransitionRule {
        current: EntryStatus::PendingAdmin,
        role: ActorRole::Admin,
        action: ActionKind::AdminApprove,
        next: EntryStatus::Approved,
    },
    TransitionRule {
        current: EntryStatus::PendingAdmin,
        role: ActorRole::Admin,
        action: ActionKind::Reject,
        next: EntryStatus::Rejected,
    },
];

/// Where a new submission lands.
///
/// Admin-or-above submitters skip the director gate (self-escalation);
/// everyone else goes through it when the organization requires director
/// review.
pub fn initial_status(role: ActorRole, requires_director_review: bool) -> EntryStatus {
    match role {
        ActorRole::Admin => EntryStatus::PendingAdmin,
        _ if requires_director_review => EntryStatus::PendingDirector,
        _ => EntryStatus::PendingAdmin,
    }
}

/// The status a reviewer's queue filters on when first opened.
/// Submitters own no queue.
pub fn default_queue(role: ActorRole) -> Option<EntryStatus> {
    match role {
        ActorRole::Director => Some(EntryStatus::PendingDirector),
        ActorRole::Admin => Some(EntryStatus::PendingAdmin),
        ActorRole::Submitter => None,
    }
}

/// The decided outcome of a transition: the next status plus the audit
/// stamps the persistence write must apply alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
    pub new_status: EntryStatus,
    pub director_approved_by: Option<String>,
    pub director_approved_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

impl TransitionOutcome {
    fn status_only(new_status: EntryStatus) -> Self {
        Self {
            new_status,
            director_approved_by: None,
            director_approved_at: None,
            reviewed_by: None,
            reviewed_at: None,
            rejection_reason: None,
        }
    }

    /// Apply this outcome to an entry: status, stamps, `updated_at`.
    /// Only stamps the outcome carries are written; existing audit fields
    /// (e.g. the director stamp when the admin later approves) survive.
    pub fn apply_to(&self, entry: &mut DataEntry) {
        entry.status = self.new_status;
        if self.director_approved_by.is_some() {
            entry.director_approved_by = self.director_approved_by.clone();
            entry.director_approved_at = self.director_approved_at;
        }
        if self.reviewed_by.is_some() {
            entry.reviewed_by = self.reviewed_by.clone();
            entry.reviewed_at = self.reviewed_at;
        }
        if self.rejection_reason.is_some() {
            entry.rejection_reason = self.rejection_reason.clone();
        }
        entry.updated_at = Utc::now();
    }
}

/// Decide whether `actor` may perform `action` on `entry`, and what the
/// resulting status and audit stamps are.
///
/// Pure: the entry is not mutated. On failure the caller gets an explicit
/// error and the entry stays exactly as it was — never a silent state
/// change. Authorization is checked before payload validation, so a
/// director rejecting an admin-queue entry gets `UnauthorizedTransition`
/// even if their reason is also empty.
pub fn propose_transition(
    entry: &DataEntry,
    actor: &Actor,
    action: &WorkflowAction,
) -> Result<TransitionOutcome, WorkflowError> {
    // Submission: only a draft can be submitted, by any role; the landing
    // queue depends on the role and the organization's review policy.
    if let WorkflowAction::Submit {
        requires_director_review,
    } = action
    {
        if entry.status != EntryStatus::Draft {
            return Err(unauthorized(entry, actor, action));
        }
        return Ok(TransitionOutcome::status_only(initial_status(
            actor.role,
            *requires_director_review,
        )));
    }

    let kind = action.kind();
    let rule = TRANSITIONS
        .iter()
        .find(|r| r.current == entry.status && r.role == actor.role && r.action == kind)
        .ok_or_else(|| unauthorized(entry, actor, action))?;

    let now = Utc::now();
    let mut outcome = TransitionOutcome::status_only(rule.next);
    match action {
        WorkflowAction::DirectorApprove => {
            outcome.director_approved_by = Some(actor.actor_id.clone());
            outcome.director_approved_at = Some(now);
        }
        WorkflowAction::AdminApprove => {
            outcome.reviewed_by = Some(actor.actor_id.clone());
            outcome.reviewed_at = Some(now);
        }
        WorkflowAction::Reject { reason } => {
            if reason.trim().is_empty() {
                return Err(WorkflowError::InvalidInput(
                    "rejection requires a non-empty reason".to_string(),
                ));
            }
            outcome.reviewed_by = Some(actor.actor_id.clone());
            outcome.reviewed_at = Some(now);
            outcome.rejection_reason = Some(reason.clone());
        }
        WorkflowAction::Submit { .. } => unreachable!("handled above"),
    }
    Ok(outcome)
}

fn unauthorized(entry: &DataEntry, actor: &Actor, action: &WorkflowAction) -> WorkflowError {
    tracing::debug!(
        entry = %entry.entry_id,
        status = %entry.status,
        role = %actor.role,
        action = %action,
        "transition denied"
    );
    WorkflowError::UnauthorizedTransition {
        status: entry.status,
        role: actor.role,
        action: action.to_string(),
    }
}
