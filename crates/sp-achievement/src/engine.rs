// engine.rs — Achievement computation.
//
// One indicator, one year: resolve the effective target, fold the eligible
// entries into an "actual" value per the indicator's calculation method,
// and express the result as a percentage of target. The contract callers
// rely on:
//
// 1. No data is a value, not a zero. A missing/nonpositive target or an
//    empty entry set yields Achievement::NoData, so reporting surfaces
//    render "—" instead of a misleading "0%".
// 2. No clamping. Over-achievement exceeds 100; a decreasing indicator
//    that regressed goes negative.
// 3. Pure and idempotent. Inputs are read-only views; the same inputs
//    always produce the same output.

use sp_model::{CalculationMethod, DataEntry, Indicator, PeriodGranularity, YearlyTarget};

use crate::error::EngineError;

/// The result of one achievement computation.
///
/// `#[derive(PartialEq)]` lets tests compare results with `==`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Achievement {
    /// Cannot compute: no usable target, or no eligible entries.
    NoData,
    /// Computed achievement figure.
    Computed {
        /// The accumulated "actual" value per the calculation method.
        actual: f64,
        /// `actual / target * 100`, unclamped.
        percent: f64,
    },
}

impl Achievement {
    /// The achievement percentage, if one could be computed.
    pub fn percent(&self) -> Option<f64> {
        match self {
            Achievement::NoData => None,
            Achievement::Computed { percent, .. } => Some(*percent),
        }
    }

    /// The accumulated actual value, if one could be computed.
    pub fn actual(&self) -> Option<f64> {
        match self {
            Achievement::NoData => None,
            Achievement::Computed { actual, .. } => Some(*actual),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Achievement::NoData)
    }
}

/// Resolve the effective target for an indicator in a year.
///
/// Resolution order: the [`YearlyTarget`] override for (indicator, year)
/// if present, else the indicator's default `target_value`, else `None`.
/// Whether a resolved target is actually usable (positive) is judged by
/// [`compute_achievement`], not here.
pub fn effective_target(
    indicator: &Indicator,
    yearly_targets: &[YearlyTarget],
    year: i32,
) -> Option<f64> {
    yearly_targets
        .iter()
        .find(|t| t.indicator_id == indicator.indicator_id && t.year == year)
        .map(|t| t.target_value)
        .or(indicator.target_value)
}

/// Compute the achievement for one indicator from its effective target and
/// its eligible entries.
///
/// The caller has already filtered `entries` for workflow eligibility
/// (`EntryStatus::is_eligible`) and for the year under report; this
/// function trusts that filter and only validates period structure.
pub fn compute_achievement(
    indicator: &Indicator,
    effective_target: Option<f64>,
    entries: &[DataEntry],
) -> Result<Achievement, EngineError> {
    check_granularity(entries)?;

    let target = match effective_target {
        Some(t) if t > 0.0 => t,
        Some(t) => {
            // A zero or negative target is unconfigured, not a divisor.
            tracing::debug!(
                indicator = %indicator.indicator_id,
                target = t,
                "nonpositive target treated as unconfigured"
            );
            return Ok(Achievement::NoData);
        }
        None => return Ok(Achievement::NoData),
    };

    if entries.is_empty() {
        return Ok(Achievement::NoData);
    }

    let sum: f64 = entries.iter().map(|e| e.value).sum();
    let actual = match indicator.calculation_method {
        CalculationMethod::Cumulative => indicator.baseline() + sum,
        CalculationMethod::CumulativeDecreasing => indicator.baseline() - sum,
        CalculationMethod::Maintenance => sum,
    };

    Ok(Achievement::Computed {
        actual,
        percent: actual / target * 100.0,
    })
}

/// Resolve the effective target for `year` and compute in one call.
pub fn compute_for_year(
    indicator: &Indicator,
    yearly_targets: &[YearlyTarget],
    entries: &[DataEntry],
    year: i32,
) -> Result<Achievement, EngineError> {
    compute_achievement(
        indicator,
        effective_target(indicator, yearly_targets, year),
        entries,
    )
}

/// All entries in one computation must share a period granularity.
fn check_granularity(entries: &[DataEntry]) -> Result<(), EngineError> {
    let mut seen: Option<PeriodGranularity> = None;
    for entry in entries {
        let granularity = entry.period()?.granularity();
        match seen {
            None => seen = Some(granularity),
            Some(first) if first != granularity => {
                return Err(EngineError::MixedGranularity {
                    first: granularity_name(first).to_string(),
                    second: granularity_name(granularity).to_string(),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

fn granularity_name(g: PeriodGranularity) -> &'static str {
    match g {
        PeriodGranularity::Annual => "annual",
        PeriodGranularity::Quarterly => "quarterly",
        PeriodGranularity::Monthly => "monthly",
    }
}
