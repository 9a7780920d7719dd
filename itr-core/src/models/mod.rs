mod computation;
mod regime;
mod slab;
mod suggestion;
mod tax_input;
mod tax_year_config;

pub use computation::{
    CapitalGainLine, CapitalGainsResult, ComparisonMetadata, ComparisonResult,
    EquityLtcgAggregate, RebateOutcome, RegimeComputation, SlabBreakdownRow, SlabTaxResult,
};
pub use regime::{ItrForm, Regime};
pub use slab::{RebateRule, RegimeRules, Slab};
pub use suggestion::{
    CityType, CurrentDeductions, InvestmentDeadline, Priority, Recommendation, Suggestion,
    SuggestionInput, SuggestionReport, SuggestionSummary,
};
pub use tax_input::{AssetClass, CapitalGainEntry, GainType, TaxInput};
pub use tax_year_config::{
    CapitalGainsConfig, DeductionLimits, InterestExemptionConfig, TaxYearConfig,
    TaxYearConfigError,
};
