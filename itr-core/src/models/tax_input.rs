use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GainType {
    Stcg,
    Ltcg,
}

impl GainType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stcg => "STCG",
            Self::Ltcg => "LTCG",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Equity,
    Other,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equity => "equity",
            Self::Other => "other",
        }
    }
}

/// A single realised capital gain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalGainEntry {
    #[serde(rename = "type")]
    pub gain_type: GainType,
    pub asset: AssetClass,
    pub amount: Decimal,
    /// Entry-specific rate; ignored for listed equity.
    #[serde(default)]
    pub rate: Option<Decimal>,
}

/// Per-request input of the regime comparison.
///
/// Every amount except `gross_salary` defaults to zero when absent. A missing
/// gross salary is reported as a compute error rather than silently zeroed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaxInput {
    pub gross_salary: Option<Decimal>,
    pub standard_deduction: Decimal,
    #[serde(rename = "chapter6ADeductions")]
    pub chapter_6a_deductions: Decimal,
    pub other_deductions: Decimal,
    #[serde(rename = "employerNPS")]
    pub employer_nps: Decimal,
    pub interest_savings: Decimal,
    #[serde(rename = "interestFD")]
    pub interest_fd: Decimal,
    pub is_senior: bool,
    pub capital_gains: Vec<CapitalGainEntry>,
    #[serde(rename = "hasVDA")]
    pub has_vda: bool,
}

impl TaxInput {
    /// Salary-only input, the common case for the calculator.
    pub fn salaried(
        gross_salary: Decimal,
        standard_deduction: Decimal,
    ) -> Self {
        Self {
            gross_salary: Some(gross_salary),
            standard_deduction,
            ..Self::default()
        }
    }
}
