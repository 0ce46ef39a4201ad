// bucket.rs — Qualitative status buckets and the rollup accumulator.
//
// Every department/goal rollup view counts its indicators into six fixed
// tiers. The cut points are part of the reporting contract and must not
// drift between screens:
//
//   exceeding_target  percent > 100
//   excellent         80 <= percent <= 100
//   good              60 <= percent < 80
//   moderate          40 <= percent < 60
//   weak              20 <= percent < 40
//   very_weak         percent < 20

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::Achievement;

/// Qualitative performance tier derived from an achievement percentage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    ExceedingTarget,
    Excellent,
    Good,
    Moderate,
    Weak,
    VeryWeak,
}

impl fmt::Display for StatusBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusBucket::ExceedingTarget => write!(f, "exceeding_target"),
            StatusBucket::Excellent => write!(f, "excellent"),
            StatusBucket::Good => write!(f, "good"),
            StatusBucket::Moderate => write!(f, "moderate"),
            StatusBucket::Weak => write!(f, "weak"),
            StatusBucket::VeryWeak => write!(f, "very_weak"),
        }
    }
}

/// Bucket an achievement percentage into its qualitative tier.
///
/// Boundaries are exact: 100.0 is `Excellent` (not `ExceedingTarget`),
/// 20.0 is `Weak` (not `VeryWeak`).
pub fn bucketize(percent: f64) -> StatusBucket {
    if percent > 100.0 {
        StatusBucket::ExceedingTarget
    } else if percent >= 80.0 {
        StatusBucket::Excellent
    } else if percent >= 60.0 {
        StatusBucket::Good
    } else if percent >= 40.0 {
        StatusBucket::Moderate
    } else if percent >= 20.0 {
        StatusBucket::Weak
    } else {
        StatusBucket::VeryWeak
    }
}

/// Rollup accumulator: bucket counts plus a running sum for averaging.
///
/// `record` is O(1) and commutative, so callers can batch-process
/// indicator lists in any order, and per-department partials can be
/// combined with `merge`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AchievementStats {
    pub exceeding_target: u32,
    pub excellent: u32,
    pub good: u32,
    pub moderate: u32,
    pub weak: u32,
    pub very_weak: u32,
    /// Indicators with no computable achievement (no target / no entries).
    pub no_data: u32,
    /// Every indicator recorded, including no-data ones.
    pub total: u32,
    /// Sum of computed percentages, for averaging.
    pub percent_sum: f64,
}

impl AchievementStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one indicator's computed percentage.
    pub fn record(&mut self, percent: f64) {
        match bucketize(percent) {
            StatusBucket::ExceedingTarget => self.exceeding_target += 1,
            StatusBucket::Excellent => self.excellent += 1,
            StatusBucket::Good => self.good += 1,
            StatusBucket::Moderate => self.moderate += 1,
            StatusBucket::Weak => self.weak += 1,
            StatusBucket::VeryWeak => self.very_weak += 1,
        }
        self.total += 1;
        self.percent_sum += percent;
    }

    /// Count one indicator with no computable achievement.
    pub fn record_no_data(&mut self) {
        self.no_data += 1;
        self.total += 1;
    }

    /// Count one [`Achievement`], whichever kind it is.
    pub fn record_achievement(&mut self, achievement: &Achievement) {
        match achievement.percent() {
            Some(p) => self.record(p),
            None => self.record_no_data(),
        }
    }

    /// How many recorded indicators had a computable percentage.
    pub fn computed(&self) -> u32 {
        self.total - self.no_data
    }

    /// Mean achievement across computed indicators; `None` when nothing
    /// was computable (never a division by zero).
    pub fn average_percent(&self) -> Option<f64> {
        match self.computed() {
            0 => None,
            n => Some(self.percent_sum / f64::from(n)),
        }
    }

    /// Fold another accumulator into this one. Order-independent.
    pub fn merge(&mut self, other: &AchievementStats) {
        self.exceeding_target += other.exceeding_target;
        self.excellent += other.excellent;
        self.good += other.good;
        self.moderate += other.moderate;
        self.weak += other.weak;
        self.very_weak += other.very_weak;
        self.no_data += other.no_data;
        self.total += other.total;
        self.percent_sum += other.percent_sum;
    }
}
