// error.rs — Error types for the achievement engine.
//
// Numeric edge cases (missing baseline, zero target, empty entries) are
// not errors — they degrade to Achievement::NoData so a batch rollup over
// many indicators never crashes on one badly configured row. Errors are
// reserved for structurally invalid input the portal's forms should have
// made impossible.

use thiserror::Error;

use sp_model::ModelError;

/// Errors raised by the achievement engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The entry set mixes period granularities (e.g. quarterly and
    /// monthly raw values). The engine does not normalize across
    /// granularities; all entries in one computation must agree.
    #[error("entries mix period granularities ({first} and {second})")]
    MixedGranularity { first: String, second: String },

    /// An entry carries a structurally invalid period.
    #[error("invalid entry period: {0}")]
    InvalidPeriod(#[from] ModelError),
}
