//! # sp-model
//!
//! Data model for the strategic-planning core.
//!
//! An [`Indicator`] is a measured quantity belonging to a strategic goal.
//! Submitters file [`DataEntry`] measurements for an indicator per period
//! (year, quarter, or month); each entry moves through the approval
//! workflow via its [`EntryStatus`]. A [`YearlyTarget`] optionally
//! overrides the indicator's default target for one fiscal year.
//!
//! ## Key components
//!
//! - [`Indicator`] / [`CalculationMethod`] — what is measured and how
//!   period values accumulate
//! - [`YearlyTarget`] — per-(indicator, year) target override
//! - [`DataEntry`] / [`EntryPeriod`] — one submitted measurement with
//!   approval audit fields
//! - [`EntryStatus`] — workflow status with eligibility predicates
//! - [`Actor`] / [`ActorRole`] — the already-authenticated actor identity
//!   passed into every core call

pub mod actor;
pub mod entry;
pub mod error;
pub mod indicator;

pub use actor::{Actor, ActorRole};
pub use entry::{DataEntry, EntryPeriod, EntryStatus, PeriodGranularity};
pub use error::ModelError;
pub use indicator::{CalculationMethod, Indicator, YearlyTarget};
