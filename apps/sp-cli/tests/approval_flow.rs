// approval_flow.rs — End-to-end integration test for the approval-to-report flow.
//
// Flow:
//   1. A clerk submits quarterly entries for an indicator
//   2. The director works their queue: approves Q1/Q2, rejects Q3
//   3. The admin gives final approval
//   4. The achievement engine computes the year's figure from the
//      eligible entries and the rollup accumulator buckets it
//
// This is the same path the portal's pages take: workflow decides which
// entries are real, the engine decides what they mean numerically.

use tempfile::TempDir;
use uuid::Uuid;

use sp_achievement::{bucketize, compute_for_year, AchievementStats, StatusBucket};
use sp_model::{Actor, ActorRole, CalculationMethod, DataEntry, EntryStatus, Indicator, YearlyTarget};
use sp_workflow::{EntryStore, WorkflowAction, WorkflowError};

fn submit_quarter(
    store: &EntryStore,
    indicator_id: Uuid,
    value: f64,
    quarter: u8,
) -> DataEntry {
    let clerk = Actor::new("clerk-7", ActorRole::Submitter);
    let draft = DataEntry::quarterly(indicator_id, value, 2025, quarter, "clerk-7").unwrap();
    let id = draft.entry_id;
    store.save(&draft).unwrap();
    store
        .apply_transition(
            id,
            EntryStatus::Draft,
            &clerk,
            &WorkflowAction::Submit {
                requires_director_review: true,
            },
        )
        .unwrap()
}

#[test]
fn approval_flow_submit_to_rollup() {
    let dir = TempDir::new().unwrap();
    let store = EntryStore::new(dir.path().join("entries")).unwrap();
    let director = Actor::new("dir-1", ActorRole::Director);
    let admin = Actor::new("adm-1", ActorRole::Admin);

    let indicator = Indicator::new(
        Uuid::new_v4(),
        "Paved road coverage",
        CalculationMethod::Cumulative,
    )
    .with_baseline(100.0);
    let targets = vec![YearlyTarget::new(indicator.indicator_id, 2025, 200.0)];

    // 1. Clerk submits three quarters.
    let q1 = submit_quarter(&store, indicator.indicator_id, 20.0, 1);
    let q2 = submit_quarter(&store, indicator.indicator_id, 30.0, 2);
    let q3 = submit_quarter(&store, indicator.indicator_id, 999.0, 3);

    // All three landed in the director's queue.
    let queue = store.list_by_status(EntryStatus::PendingDirector).unwrap();
    assert_eq!(queue.len(), 3);

    // 2. Director approves Q1/Q2, rejects the obviously wrong Q3.
    for entry in [&q1, &q2] {
        store
            .apply_transition(
                entry.entry_id,
                EntryStatus::PendingDirector,
                &director,
                &WorkflowAction::DirectorApprove,
            )
            .unwrap();
    }
    store
        .apply_transition(
            q3.entry_id,
            EntryStatus::PendingDirector,
            &director,
            &WorkflowAction::Reject {
                reason: "value off by an order of magnitude".to_string(),
            },
        )
        .unwrap();

    // The clerk cannot sneak the rejected entry back in.
    let retry = store.apply_transition(
        q3.entry_id,
        EntryStatus::Rejected,
        &Actor::new("clerk-7", ActorRole::Submitter),
        &WorkflowAction::Submit {
            requires_director_review: true,
        },
    );
    assert!(matches!(
        retry,
        Err(WorkflowError::UnauthorizedTransition { .. })
    ));

    // 3. Admin gives final approval to Q1/Q2.
    for entry in [&q1, &q2] {
        let approved = store
            .apply_transition(
                entry.entry_id,
                EntryStatus::PendingAdmin,
                &admin,
                &WorkflowAction::AdminApprove,
            )
            .unwrap();
        assert_eq!(approved.status, EntryStatus::Approved);
        assert_eq!(approved.director_approved_by.as_deref(), Some("dir-1"));
        assert_eq!(approved.reviewed_by.as_deref(), Some("adm-1"));
    }

    // 4. Compute achievement from the eligible entries only.
    let eligible = store.list_eligible(indicator.indicator_id, 2025).unwrap();
    assert_eq!(eligible.len(), 2);

    let achievement = compute_for_year(&indicator, &targets, &eligible, 2025).unwrap();
    assert_eq!(achievement.actual(), Some(150.0));
    assert_eq!(achievement.percent(), Some(75.0));
    assert_eq!(bucketize(75.0), StatusBucket::Good);

    let mut stats = AchievementStats::new();
    stats.record_achievement(&achievement);
    assert_eq!(stats.good, 1);
    assert_eq!(stats.average_percent(), Some(75.0));
}
