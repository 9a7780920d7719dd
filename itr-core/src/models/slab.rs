use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One progressive bracket. `upper_bound` of `None` means the slab is open ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slab {
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl Slab {
    pub fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub fn open(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// Section 87A rebate parameters for a regime.
///
/// A `cap` of `None` forgives the whole liability once the threshold is met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebateRule {
    pub threshold: Decimal,
    pub cap: Option<Decimal>,
}

/// Slab table and rebate rule of one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegimeRules {
    pub slabs: Vec<Slab>,
    pub rebate: RebateRule,
}
