// entry.rs — Entry subcommands: submit, approve, reject, list.

use std::path::Path;

use anyhow::{bail, Context};
use clap::Subcommand;
use uuid::Uuid;

use sp_model::{Actor, ActorRole, DataEntry, EntryStatus};
use sp_workflow::{
    default_queue, EntryStore, EventDispatcher, LogSink, WorkflowAction, WorkflowEvent,
};

#[derive(Subcommand)]
pub enum EntryCommands {
    /// Create a draft entry and submit it into a review queue.
    Submit {
        /// Indicator this entry measures.
        indicator_id: Uuid,
        /// The measured value.
        value: f64,
        /// Fiscal year.
        #[arg(long)]
        year: i32,
        /// Quarter 1-4 (mutually exclusive with --month).
        #[arg(long, conflicts_with = "month")]
        quarter: Option<u8>,
        /// Month 1-12 (mutually exclusive with --quarter).
        #[arg(long)]
        month: Option<u8>,
        /// Acting user id.
        #[arg(long)]
        actor: String,
        /// Acting user role (submitter, director, admin).
        #[arg(long, default_value = "submitter")]
        role: String,
        /// Skip the director gate (organizations without director review).
        #[arg(long)]
        no_director_review: bool,
    },
    /// Approve an entry out of the queue its status puts it in.
    Approve {
        /// Entry ID.
        id: Uuid,
        /// Acting user id.
        #[arg(long)]
        actor: String,
        /// Acting user role (director, admin).
        #[arg(long)]
        role: String,
    },
    /// Reject an entry with a reason.
    Reject {
        /// Entry ID.
        id: Uuid,
        /// Acting user id.
        #[arg(long)]
        actor: String,
        /// Acting user role (director, admin).
        #[arg(long)]
        role: String,
        /// Why the entry is being rejected.
        #[arg(long)]
        reason: String,
    },
    /// List entries, optionally filtered by status.
    List {
        /// Filter by status (draft, pending_director, pending_admin,
        /// approved, rejected). Defaults to the acting role's queue when
        /// --role is given.
        #[arg(long)]
        status: Option<String>,
        /// Acting user role, used to pick the default queue.
        #[arg(long)]
        role: Option<String>,
    },
}

pub fn execute(cmd: &EntryCommands, store_dir: &Path) -> anyhow::Result<()> {
    let store = EntryStore::new(store_dir.join("entries"))?;
    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_sink(Box::new(LogSink::new(store_dir.join("events.jsonl"))));

    match cmd {
        EntryCommands::Submit {
            indicator_id,
            value,
            year,
            quarter,
            month,
            actor,
            role,
            no_director_review,
        } => submit(
            &store,
            &dispatcher,
            *indicator_id,
            *value,
            *year,
            *quarter,
            *month,
            &Actor::new(actor, parse_role(role)?),
            !*no_director_review,
        ),
        EntryCommands::Approve { id, actor, role } => {
            approve(&store, &dispatcher, *id, &Actor::new(actor, parse_role(role)?))
        }
        EntryCommands::Reject {
            id,
            actor,
            role,
            reason,
        } => reject(
            &store,
            &dispatcher,
            *id,
            &Actor::new(actor, parse_role(role)?),
            reason,
        ),
        EntryCommands::List { status, role } => list(&store, status.as_deref(), role.as_deref()),
    }
}

fn parse_role(s: &str) -> anyhow::Result<ActorRole> {
    match s {
        "submitter" => Ok(ActorRole::Submitter),
        "director" => Ok(ActorRole::Director),
        "admin" => Ok(ActorRole::Admin),
        other => bail!("unknown role '{other}' (expected submitter, director, or admin)"),
    }
}

#[allow(clippy::too_many_arguments)]
fn submit(
    store: &EntryStore,
    dispatcher: &EventDispatcher,
    indicator_id: Uuid,
    value: f64,
    year: i32,
    quarter: Option<u8>,
    month: Option<u8>,
    actor: &Actor,
    requires_director_review: bool,
) -> anyhow::Result<()> {
    let draft = match (quarter, month) {
        (Some(q), None) => DataEntry::quarterly(indicator_id, value, year, q, &actor.actor_id),
        (None, Some(m)) => DataEntry::monthly(indicator_id, value, year, m, &actor.actor_id),
        (None, None) => DataEntry::annual(indicator_id, value, year, &actor.actor_id),
        (Some(_), Some(_)) => unreachable!("clap conflicts_with forbids this"),
    }
    .context("invalid entry")?;

    let id = draft.entry_id;
    store.save(&draft)?;
    let entry = store.apply_transition(
        id,
        EntryStatus::Draft,
        actor,
        &WorkflowAction::Submit {
            requires_director_review,
        },
    )?;

    dispatcher.dispatch(&WorkflowEvent::entry_submitted(
        id,
        indicator_id,
        &actor.actor_id,
        entry.status,
    ));
    println!("submitted {} into {}", id, entry.status);
    Ok(())
}

fn approve(
    store: &EntryStore,
    dispatcher: &EventDispatcher,
    id: Uuid,
    actor: &Actor,
) -> anyhow::Result<()> {
    let current = store
        .get(id)?
        .ok_or_else(|| anyhow::anyhow!("entry not found: {id}"))?;

    // The entry's current queue picks the gate; the workflow decides
    // whether this actor may operate it.
    let action = match current.status {
        EntryStatus::PendingDirector => WorkflowAction::DirectorApprove,
        EntryStatus::PendingAdmin => WorkflowAction::AdminApprove,
        other => bail!("entry {id} is in status '{other}', not a pending queue"),
    };

    let entry = store.apply_transition(id, current.status, actor, &action)?;

    let event = match entry.status {
        EntryStatus::PendingAdmin => WorkflowEvent::director_approved(id, &actor.actor_id),
        _ => WorkflowEvent::admin_approved(id, &actor.actor_id),
    };
    dispatcher.dispatch(&event);
    println!("entry {} is now {}", id, entry.status);
    Ok(())
}

fn reject(
    store: &EntryStore,
    dispatcher: &EventDispatcher,
    id: Uuid,
    actor: &Actor,
    reason: &str,
) -> anyhow::Result<()> {
    let current = store
        .get(id)?
        .ok_or_else(|| anyhow::anyhow!("entry not found: {id}"))?;

    let entry = store.apply_transition(
        id,
        current.status,
        actor,
        &WorkflowAction::Reject {
            reason: reason.to_string(),
        },
    )?;

    dispatcher.dispatch(&WorkflowEvent::entry_rejected(id, &actor.actor_id, reason));
    println!("entry {} is now {}", id, entry.status);
    Ok(())
}

fn list(store: &EntryStore, status: Option<&str>, role: Option<&str>) -> anyhow::Result<()> {
    let filter = match (status, role) {
        (Some(s), _) => Some(
            EntryStatus::from_wire(s)
                .ok_or_else(|| anyhow::anyhow!("unknown status '{s}'"))?,
        ),
        // A reviewer's list defaults to the queue their role owns.
        (None, Some(r)) => default_queue(parse_role(r)?),
        (None, None) => None,
    };

    let entries = match filter {
        Some(status) => store.list_by_status(status)?,
        None => store.list()?,
    };

    if entries.is_empty() {
        println!("no entries");
        return Ok(());
    }
    for e in entries {
        let period = e
            .period()
            .map(|p| p.to_string())
            .unwrap_or_else(|_| "?".to_string());
        println!(
            "{}  {}  {} {}  value={}  by {}  {}",
            e.entry_id,
            e.status,
            e.period_year,
            period,
            e.value,
            e.entered_by,
            e.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}
