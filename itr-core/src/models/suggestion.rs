use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ordering is significant: `High` sorts before `Medium` before `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CityType {
    #[default]
    Metro,
    NonMetro,
    #[serde(rename = "tier-2")]
    Tier2,
}

/// Deductions already claimed, keyed the way the client form sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentDeductions {
    pub section80c: Decimal,
    pub section80d: Decimal,
    pub nps: Decimal,
    pub section24b: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestionInput {
    pub gross_salary: Decimal,
    pub current_deductions: CurrentDeductions,
    pub age: u32,
    pub has_health_insurance: bool,
    pub has_home_loan: bool,
    pub is_renting: bool,
    pub city_type: CityType,
    pub has_parents: bool,
    pub parents_age: u32,
}

impl Default for SuggestionInput {
    fn default() -> Self {
        Self {
            gross_salary: Decimal::ZERO,
            current_deductions: CurrentDeductions::default(),
            age: 30,
            has_health_insurance: false,
            has_home_loan: false,
            is_renting: false,
            city_type: CityType::Metro,
            has_parents: false,
            parents_age: 0,
        }
    }
}

/// A concrete instrument or action within a category. `amount` of `None`
/// means the instrument has no statutory ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub option: String,
    pub amount: Option<Decimal>,
    pub benefit: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub category: String,
    pub priority: Priority,
    pub current_amount: Decimal,
    /// `None` for uncapped sections such as 80E.
    pub max_limit: Option<Decimal>,
    pub remaining_limit: Option<Decimal>,
    /// `None` when the saving depends on figures the engine does not have.
    pub potential_savings: Option<Decimal>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionSummary {
    pub total_suggestions_count: usize,
    pub high_priority: usize,
    pub medium_priority: usize,
    pub low_priority: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionReport {
    pub total_potential_savings: Decimal,
    pub suggestions: Vec<Suggestion>,
    pub summary: SuggestionSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentDeadline {
    pub title: String,
    pub date: NaiveDate,
    pub days_remaining: i64,
    pub urgency: Priority,
    pub message: String,
    pub actions: Vec<String>,
}
