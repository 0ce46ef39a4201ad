//! # sp-workflow
//!
//! The data-entry approval workflow for the strategic-planning core.
//!
//! A [`DataEntry`](sp_model::DataEntry) moves `draft → pending_director →
//! pending_admin → approved`, with rejection possible from either pending
//! state by the role that owns it. The permitted (status, role, action)
//! combinations live in one explicit transition table, so every caller
//! gets identical enforcement regardless of which screen triggered the
//! action.
//!
//! [`propose_transition`] is a pure decision function: it returns the next
//! status plus the audit stamps to write, and the persistence layer
//! performs the actual write conditioned on the entry's status not having
//! changed since it was read. [`EntryStore`] is the reference
//! implementation of that optimistic-concurrency contract.
//!
//! ## Key components
//!
//! - [`propose_transition`] / [`WorkflowAction`] / [`TransitionOutcome`]
//! - [`initial_status`] — submission escalation (admins skip the director
//!   gate) — and [`default_queue`] for reviewer work lists
//! - [`WorkflowEvent`] / [`NotificationSink`] / [`EventDispatcher`]
//! - [`EntryStore`] — JSON-file persistence with compare-and-swap
//!   transitions

pub mod error;
pub mod events;
pub mod store;
pub mod transition;

pub use error::WorkflowError;
pub use events::{EventDispatcher, LogSink, NotificationSink, WorkflowEvent};
pub use store::EntryStore;
pub use transition::{
    default_queue, initial_status, propose_transition, TransitionOutcome, WorkflowAction,
};
