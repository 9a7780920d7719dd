use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::regime::{ItrForm, Regime};
use super::tax_input::{AssetClass, GainType};

/// One taxed slab portion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabBreakdownRow {
    /// Display range, e.g. `₹250,000 - ₹500,000` or `₹1,000,000 - Above`.
    pub range: String,
    pub rate: Decimal,
    pub taxable_amount: Decimal,
    pub tax: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabTaxResult {
    pub tax: Decimal,
    pub breakdown: Vec<SlabBreakdownRow>,
}

/// Display line for a capital-gain entry.
///
/// Equity LTCG lines carry no rate or tax of their own; they are taxed once
/// through [`EquityLtcgAggregate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalGainLine {
    pub description: String,
    #[serde(rename = "type")]
    pub gain_type: GainType,
    pub asset: AssetClass,
    pub amount: Decimal,
    pub rate: Option<Decimal>,
    pub tax: Option<Decimal>,
    pub rate_hint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityLtcgAggregate {
    pub aggregate: Decimal,
    pub exemption: Decimal,
    pub taxable: Decimal,
    pub tax: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalGainsResult {
    pub entries: Vec<CapitalGainLine>,
    pub equity_ltcg: EquityLtcgAggregate,
    pub total_tax: Decimal,
}

/// Section 87A outcome for one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebateOutcome {
    pub qualifies: bool,
    pub rebate: Decimal,
    pub threshold: Decimal,
    pub cap: Option<Decimal>,
    pub final_tax: Decimal,
    pub reason: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegimeComputation {
    pub regime: Regime,
    pub taxable_income: Decimal,
    pub deductions_used: Decimal,
    pub slab_tax: Decimal,
    pub slab_breakdown: Vec<SlabBreakdownRow>,
    pub capital_gains_tax: Decimal,
    pub tax_before_cess: Decimal,
    pub cess: Decimal,
    pub tax_before_rebate: Decimal,
    pub rebate: Decimal,
    pub qualifies_for_rebate: bool,
    pub rebate_threshold: Decimal,
    pub rebate_cap: Option<Decimal>,
    pub rebate_reason: String,
    pub rebate_message: Option<String>,
    pub final_tax_payable: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonMetadata {
    pub financial_year: String,
    pub assessment_year: String,
    pub calculated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub old_regime: RegimeComputation,
    pub new_regime: RegimeComputation,
    pub capital_gains: CapitalGainsResult,
    pub savings: Decimal,
    pub recommended_regime: Regime,
    /// Whole-number percentage of the larger liability saved by the recommendation.
    pub savings_percentage: Decimal,
    pub itr_form: ItrForm,
    pub combined_rebate_message: Option<String>,
    pub both_regimes_zero_tax: bool,
    pub metadata: ComparisonMetadata,
}
