//! # sp-achievement
//!
//! Achievement computation for the strategic-planning core.
//!
//! Turns an indicator's baseline, its effective target for a year, and the
//! set of eligible period entries into a single achievement percentage,
//! then buckets that percentage into a qualitative tier for goal and
//! department rollups.
//!
//! Everything here is pure, synchronous computation over read-only views:
//! no I/O, no shared state, safely callable in parallel for different
//! indicators. The caller pre-filters entries for workflow eligibility
//! (`EntryStatus::is_eligible`) — this crate never re-derives workflow
//! state.
//!
//! ## Key components
//!
//! - [`effective_target`] — yearly override → default target → none
//! - [`compute_achievement`] — the five accumulation semantics, returning
//!   [`Achievement`] so "no data" is a value rather than a zero or a panic
//! - [`bucketize`] / [`StatusBucket`] — qualitative tiers with exact cut
//!   points
//! - [`AchievementStats`] — O(1), commutative rollup accumulator

pub mod bucket;
pub mod engine;
pub mod error;

pub use bucket::{bucketize, AchievementStats, StatusBucket};
pub use engine::{compute_achievement, compute_for_year, effective_target, Achievement};
pub use error::EngineError;
