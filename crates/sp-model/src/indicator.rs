// indicator.rs — Indicator and target configuration.
//
// An Indicator is authored once when a strategic plan is written and
// mutated rarely (method or baseline corrections). It is never deleted
// while entries reference it — this core exposes no indicator deletion at
// all; that policy belongs to the portal layer.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How period entries accumulate into the indicator's "actual" value.
///
/// Plans authored in the portal store this as a free-form string, with
/// several legacy aliases in circulation; [`CalculationMethod::from_config_str`]
/// accepts all of them and falls back to `Cumulative` for anything it does
/// not recognize.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    /// Progress accumulates upward from the baseline:
    /// `actual = baseline + Σ value`.
    Cumulative,

    /// Progress is measured by reduction from the baseline:
    /// `actual = baseline − Σ value`.
    CumulativeDecreasing,

    /// Entries represent the actual level directly, no baseline involved:
    /// `actual = Σ value`. Snapshot-style indicators (e.g. a percentage of
    /// completion) should submit a single entry per computation window,
    /// since multiple entries are summed, not replaced.
    Maintenance,
}

impl CalculationMethod {
    /// Parse the method from a plan configuration string.
    ///
    /// Accepts the canonical names plus the legacy aliases
    /// (`increasing`, `decreasing`, `percentage`). Unrecognized strings
    /// fall back to `Cumulative`, matching how the portal has always
    /// treated unconfigured indicators.
    pub fn from_config_str(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "cumulative" | "increasing" => CalculationMethod::Cumulative,
            "cumulative_decreasing" | "decreasing" => CalculationMethod::CumulativeDecreasing,
            "maintenance" | "percentage" => CalculationMethod::Maintenance,
            _ => CalculationMethod::Cumulative,
        }
    }
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationMethod::Cumulative => write!(f, "cumulative"),
            CalculationMethod::CumulativeDecreasing => write!(f, "cumulative_decreasing"),
            CalculationMethod::Maintenance => write!(f, "maintenance"),
        }
    }
}

/// A measured quantity belonging to a strategic goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Indicator {
    /// Stable identifier.
    pub indicator_id: Uuid,

    /// Owning goal (opaque foreign key — goals are not modeled here).
    pub goal_id: Uuid,

    /// Human-readable name (e.g., "Paved road coverage %").
    pub name: String,

    /// How period entries accumulate into the actual value.
    pub calculation_method: CalculationMethod,

    /// Starting level at plan authoring time. `None` means 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_value: Option<f64>,

    /// Default target, used for any year without a [`YearlyTarget`]
    /// override. `None` means the indicator has no usable target yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value: Option<f64>,

    /// When this indicator was created.
    pub created_at: DateTime<Utc>,

    /// When this indicator was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Indicator {
    /// Create a new indicator under a goal.
    pub fn new(
        goal_id: Uuid,
        name: impl Into<String>,
        calculation_method: CalculationMethod,
    ) -> Self {
        let now = Utc::now();
        Self {
            indicator_id: Uuid::new_v4(),
            goal_id,
            name: name.into(),
            calculation_method,
            baseline_value: None,
            target_value: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the baseline and return self (builder pattern).
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline_value = Some(baseline);
        self
    }

    /// Set the default target and return self.
    pub fn with_target(mut self, target: f64) -> Self {
        self.target_value = Some(target);
        self
    }

    /// The baseline as a number; an unset baseline counts as 0.
    pub fn baseline(&self) -> f64 {
        self.baseline_value.unwrap_or(0.0)
    }
}

/// Per-(indicator, year) target override. At most one per pair.
///
/// Planning staff create these before or during a fiscal year; once the
/// year closes they are immutable (enforced by the portal, not here).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearlyTarget {
    pub indicator_id: Uuid,
    pub year: i32,
    pub target_value: f64,
}

impl YearlyTarget {
    pub fn new(indicator_id: Uuid, year: i32, target_value: f64) -> Self {
        Self {
            indicator_id,
            year,
            target_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parses_canonical_names() {
        assert_eq!(
            CalculationMethod::from_config_str("cumulative"),
            CalculationMethod::Cumulative
        );
        assert_eq!(
            CalculationMethod::from_config_str("cumulative_decreasing"),
            CalculationMethod::CumulativeDecreasing
        );
        assert_eq!(
            CalculationMethod::from_config_str("maintenance"),
            CalculationMethod::Maintenance
        );
    }

    #[test]
    fn method_parses_legacy_aliases() {
        assert_eq!(
            CalculationMethod::from_config_str("increasing"),
            CalculationMethod::Cumulative
        );
        assert_eq!(
            CalculationMethod::from_config_str("decreasing"),
            CalculationMethod::CumulativeDecreasing
        );
        assert_eq!(
            CalculationMethod::from_config_str("percentage"),
            CalculationMethod::Maintenance
        );
    }

    #[test]
    fn unrecognized_method_falls_back_to_cumulative() {
        assert_eq!(
            CalculationMethod::from_config_str("telemetry"),
            CalculationMethod::Cumulative
        );
        assert_eq!(
            CalculationMethod::from_config_str(""),
            CalculationMethod::Cumulative
        );
    }

    #[test]
    fn method_parsing_ignores_case_and_whitespace() {
        assert_eq!(
            CalculationMethod::from_config_str("  Percentage "),
            CalculationMethod::Maintenance
        );
    }

    #[test]
    fn unset_baseline_counts_as_zero() {
        let ind = Indicator::new(Uuid::new_v4(), "Coverage", CalculationMethod::Cumulative);
        assert_eq!(ind.baseline(), 0.0);
        let ind = ind.with_baseline(100.0);
        assert_eq!(ind.baseline(), 100.0);
    }

    #[test]
    fn indicator_serialization_round_trip() {
        let ind = Indicator::new(Uuid::new_v4(), "Coverage", CalculationMethod::Maintenance)
            .with_baseline(10.0)
            .with_target(50.0);
        let json = serde_json::to_string_pretty(&ind).unwrap();
        assert!(json.contains("\"maintenance\""));
        let restored: Indicator = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.indicator_id, ind.indicator_id);
        assert_eq!(restored.calculation_method, ind.calculation_method);
        assert_eq!(restored.target_value, Some(50.0));
    }

    #[test]
    fn unset_target_omitted_from_json() {
        let ind = Indicator::new(Uuid::new_v4(), "Coverage", CalculationMethod::Cumulative);
        let json = serde_json::to_string_pretty(&ind).unwrap();
        assert!(!json.contains("target_value"));
        assert!(!json.contains("baseline_value"));
    }
}
