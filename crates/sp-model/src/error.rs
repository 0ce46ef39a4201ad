// error.rs — Error types for the data model.

use thiserror::Error;

/// Errors raised while constructing or validating model values.
#[derive(Debug, Error)]
pub enum ModelError {
    /// An entry claims both a quarter and a month — the period is ambiguous.
    #[error("entry period sets both quarter ({quarter}) and month ({month})")]
    AmbiguousPeriod { quarter: u8, month: u8 },

    /// Quarter outside 1–4.
    #[error("quarter {0} out of range (expected 1-4)")]
    QuarterOutOfRange(u8),

    /// Month outside 1–12.
    #[error("month {0} out of range (expected 1-12)")]
    MonthOutOfRange(u8),

    /// Entry values must be finite numbers (no NaN/infinity).
    #[error("entry value must be a finite number, got {0}")]
    NonFiniteValue(f64),
}
