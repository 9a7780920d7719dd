//! Tax calculations for the old and new regimes.
//!
//! Each calculator borrows the part of [`crate::TaxYearConfig`] it needs and
//! exposes a single pure entry point. [`RegimeComparator`] composes the
//! others into a full comparison.

pub mod capital_gains;
pub mod common;
pub mod comparator;
pub mod rebate;
pub mod slab_tax;
pub mod suggestions;
pub mod validation;

pub use capital_gains::CapitalGainsAggregator;
pub use comparator::{ComputeError, RegimeComparator, compute};
pub use rebate::{RebateEngine, combined_rebate_message};
pub use slab_tax::SlabTaxCalculator;
pub use suggestions::{SuggestionEngine, investment_deadline, marginal_rate};
pub use validation::{
    CrossFieldReport, CrossFieldSummary, DeductionClaims, DeductionIssue, FieldError,
    IssueCode, IssueSeverity, cross_field_validation, validate_tax_input,
};
