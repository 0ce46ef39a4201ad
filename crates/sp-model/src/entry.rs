// entry.rs — DataEntry: one submitted measurement for an indicator.
//
// An entry is created by a submitter for a specific period, then moves
// through the approval workflow. Its `value` is immutable after creation —
// workflow transitions only ever touch the status and audit fields, and a
// decided entry (approved/rejected) is never mutated again. Corrections are
// filed as brand-new entries for the same period.
//
// On the wire the period is the portal's flat pair of optional columns
// (`period_quarter`, `period_month`); exactly one of them set, or neither
// (an annual entry). `period()` validates that invariant.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ModelError;

/// Workflow status of a data entry.
///
/// `Draft` and `PendingDirector` are the two possible starting points
/// depending on submitter role; `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Created but not yet submitted into a review queue.
    Draft,
    /// Awaiting director review (first approval gate).
    PendingDirector,
    /// Awaiting admin review (final approval gate).
    PendingAdmin,
    /// Fully approved — terminal.
    Approved,
    /// Rejected with a reason — terminal.
    Rejected,
}

impl EntryStatus {
    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EntryStatus::Approved | EntryStatus::Rejected)
    }

    /// Submitted but not yet decided: the two in-flight pending statuses.
    pub fn is_submitted(&self) -> bool {
        matches!(self, EntryStatus::PendingDirector | EntryStatus::PendingAdmin)
    }

    /// Whether this entry counts toward achievement computation.
    ///
    /// Approved entries always count; submitted (in-flight) entries count
    /// so dashboards can show provisional figures. Draft and rejected
    /// entries never count. Reporting callers filter with this predicate
    /// before handing entries to the achievement engine — the engine
    /// itself never re-derives workflow state.
    pub fn is_eligible(&self) -> bool {
        matches!(self, EntryStatus::Approved) || self.is_submitted()
    }

    /// Parse the wire name back into a status (for CLI filters).
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(EntryStatus::Draft),
            "pending_director" => Some(EntryStatus::PendingDirector),
            "pending_admin" => Some(EntryStatus::PendingAdmin),
            "approved" => Some(EntryStatus::Approved),
            "rejected" => Some(EntryStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Draft => write!(f, "draft"),
            EntryStatus::PendingDirector => write!(f, "pending_director"),
            EntryStatus::PendingAdmin => write!(f, "pending_admin"),
            EntryStatus::Approved => write!(f, "approved"),
            EntryStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// The validated period of an entry within its year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPeriod {
    /// One value for the whole year.
    Annual,
    /// Quarter 1–4.
    Quarter(u8),
    /// Month 1–12.
    Month(u8),
}

impl EntryPeriod {
    pub fn granularity(&self) -> PeriodGranularity {
        match self {
            EntryPeriod::Annual => PeriodGranularity::Annual,
            EntryPeriod::Quarter(_) => PeriodGranularity::Quarterly,
            EntryPeriod::Month(_) => PeriodGranularity::Monthly,
        }
    }
}

impl fmt::Display for EntryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryPeriod::Annual => write!(f, "annual"),
            EntryPeriod::Quarter(q) => write!(f, "q{}", q),
            EntryPeriod::Month(m) => write!(f, "m{}", m),
        }
    }
}

/// Coarse period kind — all entries in one computation must agree on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodGranularity {
    Annual,
    Quarterly,
    Monthly,
}

/// One submitted measurement for an indicator in a time period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEntry {
    /// Unique identifier for this entry.
    pub entry_id: Uuid,

    /// The indicator this entry measures.
    pub indicator_id: Uuid,

    /// The measured value. Immutable after creation.
    pub value: f64,

    /// Fiscal year this entry belongs to.
    pub period_year: i32,

    /// Quarter 1–4, for quarterly entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_quarter: Option<u8>,

    /// Month 1–12, for monthly entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_month: Option<u8>,

    /// Current workflow status.
    pub status: EntryStatus,

    /// Who filed this entry.
    pub entered_by: String,

    /// Who passed the director gate, and when.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director_approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director_approved_at: Option<DateTime<Utc>>,

    /// Who made the final decision (admin approval or any rejection), and when.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,

    /// Why the entry was rejected, when it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,

    /// When this entry was created.
    pub created_at: DateTime<Utc>,

    /// When this entry was last updated (by a workflow transition).
    pub updated_at: DateTime<Utc>,
}

impl DataEntry {
    fn new(
        indicator_id: Uuid,
        value: f64,
        period_year: i32,
        period_quarter: Option<u8>,
        period_month: Option<u8>,
        entered_by: impl Into<String>,
    ) -> Result<Self, ModelError> {
        if !value.is_finite() {
            return Err(ModelError::NonFiniteValue(value));
        }
        if let Some(q) = period_quarter {
            if !(1..=4).contains(&q) {
                return Err(ModelError::QuarterOutOfRange(q));
            }
        }
        if let Some(m) = period_month {
            if !(1..=12).contains(&m) {
                return Err(ModelError::MonthOutOfRange(m));
            }
        }
        if let (Some(q), Some(m)) = (period_quarter, period_month) {
            return Err(ModelError::AmbiguousPeriod {
                quarter: q,
                month: m,
            });
        }
        let now = Utc::now();
        Ok(Self {
            entry_id: Uuid::new_v4(),
            indicator_id,
            value,
            period_year,
            period_quarter,
            period_month,
            status: EntryStatus::Draft,
            entered_by: entered_by.into(),
            director_approved_by: None,
            director_approved_at: None,
            reviewed_by: None,
            reviewed_at: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Create a draft entry covering a whole year.
    pub fn annual(
        indicator_id: Uuid,
        value: f64,
        year: i32,
        entered_by: impl Into<String>,
    ) -> Result<Self, ModelError> {
        Self::new(indicator_id, value, year, None, None, entered_by)
    }

    /// Create a draft entry for one quarter.
    pub fn quarterly(
        indicator_id: Uuid,
        value: f64,
        year: i32,
        quarter: u8,
        entered_by: impl Into<String>,
    ) -> Result<Self, ModelError> {
        Self::new(indicator_id, value, year, Some(quarter), None, entered_by)
    }

    /// Create a draft entry for one month.
    pub fn monthly(
        indicator_id: Uuid,
        value: f64,
        year: i32,
        month: u8,
        entered_by: impl Into<String>,
    ) -> Result<Self, ModelError> {
        Self::new(indicator_id, value, year, None, Some(month), entered_by)
    }

    /// The validated period of this entry.
    ///
    /// Rows written by older portal versions can carry both columns;
    /// that is rejected here rather than silently preferring one.
    pub fn period(&self) -> Result<EntryPeriod, ModelError> {
        match (self.period_quarter, self.period_month) {
            (None, None) => Ok(EntryPeriod::Annual),
            (Some(q), None) => {
                if (1..=4).contains(&q) {
                    Ok(EntryPeriod::Quarter(q))
                } else {
                    Err(ModelError::QuarterOutOfRange(q))
                }
            }
            (None, Some(m)) => {
                if (1..=12).contains(&m) {
                    Ok(EntryPeriod::Month(m))
                } else {
                    Err(ModelError::MonthOutOfRange(m))
                }
            }
            (Some(q), Some(m)) => Err(ModelError::AmbiguousPeriod {
                quarter: q,
                month: m,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> DataEntry {
        DataEntry::quarterly(Uuid::new_v4(), 25.0, 2025, 2, "clerk-7").unwrap()
    }

    #[test]
    fn new_entry_starts_as_draft() {
        let e = entry();
        assert_eq!(e.status, EntryStatus::Draft);
        assert!(e.director_approved_by.is_none());
        assert!(e.reviewed_by.is_none());
        assert!(e.rejection_reason.is_none());
    }

    #[test]
    fn period_constructors_validate_ranges() {
        let id = Uuid::new_v4();
        assert!(matches!(
            DataEntry::quarterly(id, 1.0, 2025, 5, "clerk-7"),
            Err(ModelError::QuarterOutOfRange(5))
        ));
        assert!(matches!(
            DataEntry::monthly(id, 1.0, 2025, 0, "clerk-7"),
            Err(ModelError::MonthOutOfRange(0))
        ));
        assert!(matches!(
            DataEntry::annual(id, f64::NAN, 2025, "clerk-7"),
            Err(ModelError::NonFiniteValue(_))
        ));
    }

    #[test]
    fn period_accessor_reflects_granularity() {
        let id = Uuid::new_v4();
        let annual = DataEntry::annual(id, 1.0, 2025, "clerk-7").unwrap();
        assert_eq!(annual.period().unwrap(), EntryPeriod::Annual);

        let q = DataEntry::quarterly(id, 1.0, 2025, 3, "clerk-7").unwrap();
        assert_eq!(q.period().unwrap(), EntryPeriod::Quarter(3));
        assert_eq!(
            q.period().unwrap().granularity(),
            PeriodGranularity::Quarterly
        );

        let m = DataEntry::monthly(id, 1.0, 2025, 11, "clerk-7").unwrap();
        assert_eq!(m.period().unwrap(), EntryPeriod::Month(11));
    }

    #[test]
    fn ambiguous_period_rejected() {
        // Simulate a legacy row carrying both columns.
        let mut e = entry();
        e.period_month = Some(6);
        assert!(matches!(
            e.period(),
            Err(ModelError::AmbiguousPeriod { quarter: 2, month: 6 })
        ));
    }

    #[test]
    fn status_predicates() {
        assert!(EntryStatus::Approved.is_terminal());
        assert!(EntryStatus::Rejected.is_terminal());
        assert!(!EntryStatus::PendingAdmin.is_terminal());

        assert!(EntryStatus::PendingDirector.is_submitted());
        assert!(EntryStatus::PendingAdmin.is_submitted());
        assert!(!EntryStatus::Draft.is_submitted());
        assert!(!EntryStatus::Approved.is_submitted());

        // Approved and in-flight entries count; draft and rejected never do.
        assert!(EntryStatus::Approved.is_eligible());
        assert!(EntryStatus::PendingDirector.is_eligible());
        assert!(EntryStatus::PendingAdmin.is_eligible());
        assert!(!EntryStatus::Draft.is_eligible());
        assert!(!EntryStatus::Rejected.is_eligible());
    }

    #[test]
    fn status_wire_names_round_trip() {
        for status in [
            EntryStatus::Draft,
            EntryStatus::PendingDirector,
            EntryStatus::PendingAdmin,
            EntryStatus::Approved,
            EntryStatus::Rejected,
        ] {
            assert_eq!(EntryStatus::from_wire(&status.to_string()), Some(status));
        }
        assert_eq!(EntryStatus::from_wire("archived"), None);
    }

    #[test]
    fn entry_serialization_round_trip() {
        let e = entry();
        let json = serde_json::to_string_pretty(&e).unwrap();
        assert!(json.contains("\"draft\""));
        let restored: DataEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.entry_id, e.entry_id);
        assert_eq!(restored.status, e.status);
        assert_eq!(restored.period_quarter, Some(2));
    }

    #[test]
    fn unset_audit_fields_omitted_from_json() {
        let e = entry();
        let json = serde_json::to_string_pretty(&e).unwrap();
        assert!(!json.contains("director_approved_by"));
        assert!(!json.contains("reviewed_by"));
        assert!(!json.contains("rejection_reason"));
        assert!(!json.contains("period_month"));
    }
}
