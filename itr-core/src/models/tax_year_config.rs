//! Statutory parameters for one financial year.
//!
//! Every calculator in this crate reads its slabs, thresholds and limits from
//! a [`TaxYearConfig`] instead of embedding constants, so a new financial
//! year is a new value rather than a code change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::regime::Regime;
use super::slab::{RebateRule, RegimeRules, Slab};

/// Errors reported by [`TaxYearConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxYearConfigError {
    /// A regime has no slabs at all.
    #[error("{0} regime has no slabs")]
    EmptySlabs(Regime),

    /// Slab upper bounds must be strictly ascending and positive.
    #[error("{regime} regime slab {index} upper bound {bound} does not exceed the previous bound")]
    SlabsNotAscending {
        regime: Regime,
        index: usize,
        bound: Decimal,
    },

    /// Only the last slab may be open ended, and it must be.
    #[error("{regime} regime slab {index} is open ended but is not the last slab")]
    OpenSlabNotLast { regime: Regime, index: usize },

    /// The last slab must be open ended.
    #[error("{0} regime last slab must be open ended")]
    LastSlabBounded(Regime),

    /// A rate fell outside `[0, 1]`.
    #[error("{name} must be between 0 and 1, got {value}")]
    InvalidRate { name: &'static str, value: Decimal },

    /// A threshold, cap or limit was negative.
    #[error("{name} must be non-negative, got {value}")]
    NegativeAmount { name: &'static str, value: Decimal },
}

/// Capital-gains rates and the equity LTCG exemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalGainsConfig {
    /// STCG rate on listed equity (STT paid).
    pub equity_stcg_rate: Decimal,
    /// STCG rate for other assets when the entry carries no rate.
    pub default_stcg_rate: Decimal,
    /// LTCG rate for non-equity assets when the entry carries no rate.
    pub default_ltcg_rate: Decimal,
    /// Exempt slice of the aggregated equity LTCG.
    pub equity_ltcg_exemption: Decimal,
    /// Rate on equity LTCG above the exemption.
    pub equity_ltcg_rate: Decimal,
}

/// Sections 80TTA / 80TTB interest exemption limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestExemptionConfig {
    /// 80TTA: savings-account interest, non-seniors.
    pub savings_limit: Decimal,
    /// 80TTB: savings and deposit interest, seniors.
    pub senior_limit: Decimal,
}

/// Statutory ceilings used by the suggestion engine and input validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionLimits {
    pub section_80c: Decimal,
    pub section_80d_self: Decimal,
    pub section_80d_senior: Decimal,
    pub section_80ccd_1b: Decimal,
    pub section_24b: Decimal,
    pub senior_age: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxYearConfig {
    pub financial_year: String,
    pub assessment_year: String,
    pub old_regime: RegimeRules,
    pub new_regime: RegimeRules,
    /// Health & Education cess on slab plus capital-gains tax.
    pub cess_rate: Decimal,
    pub default_standard_deduction: Decimal,
    pub capital_gains: CapitalGainsConfig,
    pub interest_exemption: InterestExemptionConfig,
    pub deduction_limits: DeductionLimits,
}

impl TaxYearConfig {
    /// FY 2024-25 (AY 2025-26) parameters.
    pub fn fy_2024_25() -> Self {
        let lakh = |n: i64| Decimal::from(n * 100_000);
        let pct = |n: i64| Decimal::new(n, 2);

        Self {
            financial_year: "FY2024-25".to_string(),
            assessment_year: "AY2025-26".to_string(),
            old_regime: RegimeRules {
                slabs: vec![
                    Slab::bounded(Decimal::from(250_000), Decimal::ZERO),
                    Slab::bounded(lakh(5), pct(5)),
                    Slab::bounded(lakh(10), pct(20)),
                    Slab::open(pct(30)),
                ],
                rebate: RebateRule {
                    threshold: lakh(5),
                    cap: Some(Decimal::from(12_500)),
                },
            },
            new_regime: RegimeRules {
                slabs: vec![
                    Slab::bounded(lakh(3), Decimal::ZERO),
                    Slab::bounded(lakh(7), pct(5)),
                    Slab::bounded(lakh(10), pct(10)),
                    Slab::bounded(lakh(12), pct(15)),
                    Slab::bounded(lakh(15), pct(20)),
                    Slab::open(pct(30)),
                ],
                rebate: RebateRule {
                    threshold: lakh(7),
                    cap: None,
                },
            },
            cess_rate: pct(4),
            default_standard_deduction: Decimal::from(50_000),
            capital_gains: CapitalGainsConfig {
                equity_stcg_rate: pct(15),
                default_stcg_rate: pct(15),
                default_ltcg_rate: pct(20),
                equity_ltcg_exemption: lakh(1),
                equity_ltcg_rate: pct(10),
            },
            interest_exemption: InterestExemptionConfig {
                savings_limit: Decimal::from(10_000),
                senior_limit: Decimal::from(50_000),
            },
            deduction_limits: DeductionLimits {
                section_80c: Decimal::from(150_000),
                section_80d_self: Decimal::from(25_000),
                section_80d_senior: Decimal::from(50_000),
                section_80ccd_1b: Decimal::from(50_000),
                section_24b: lakh(2),
                senior_age: 60,
            },
        }
    }

    /// Rules of the requested regime.
    pub fn rules(
        &self,
        regime: Regime,
    ) -> &RegimeRules {
        match regime {
            Regime::Old => &self.old_regime,
            Regime::New => &self.new_regime,
        }
    }

    /// Checks slab ordering, rate ranges and non-negative limits.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaxYearConfigError`] found.
    pub fn validate(&self) -> Result<(), TaxYearConfigError> {
        validate_regime(Regime::Old, &self.old_regime)?;
        validate_regime(Regime::New, &self.new_regime)?;

        check_rate("cessRate", self.cess_rate)?;

        let cg = &self.capital_gains;
        check_rate("equityStcgRate", cg.equity_stcg_rate)?;
        check_rate("defaultStcgRate", cg.default_stcg_rate)?;
        check_rate("defaultLtcgRate", cg.default_ltcg_rate)?;
        check_rate("equityLtcgRate", cg.equity_ltcg_rate)?;
        check_amount("equityLtcgExemption", cg.equity_ltcg_exemption)?;

        check_amount("defaultStandardDeduction", self.default_standard_deduction)?;
        check_amount("savingsLimit", self.interest_exemption.savings_limit)?;
        check_amount("seniorLimit", self.interest_exemption.senior_limit)?;

        let limits = &self.deduction_limits;
        check_amount("section80c", limits.section_80c)?;
        check_amount("section80dSelf", limits.section_80d_self)?;
        check_amount("section80dSenior", limits.section_80d_senior)?;
        check_amount("section80ccd1b", limits.section_80ccd_1b)?;
        check_amount("section24b", limits.section_24b)?;

        Ok(())
    }
}

impl Default for TaxYearConfig {
    fn default() -> Self {
        Self::fy_2024_25()
    }
}

fn validate_regime(
    regime: Regime,
    rules: &RegimeRules,
) -> Result<(), TaxYearConfigError> {
    let Some((last, rest)) = rules.slabs.split_last() else {
        return Err(TaxYearConfigError::EmptySlabs(regime));
    };

    let mut previous = Decimal::ZERO;
    for (index, slab) in rest.iter().enumerate() {
        let bound = slab
            .upper_bound
            .ok_or(TaxYearConfigError::OpenSlabNotLast { regime, index })?;
        if bound <= previous {
            return Err(TaxYearConfigError::SlabsNotAscending {
                regime,
                index,
                bound,
            });
        }
        check_rate("slab rate", slab.rate)?;
        previous = bound;
    }

    if last.upper_bound.is_some() {
        return Err(TaxYearConfigError::LastSlabBounded(regime));
    }
    check_rate("slab rate", last.rate)?;

    check_amount("rebate threshold", rules.rebate.threshold)?;
    if let Some(cap) = rules.rebate.cap {
        check_amount("rebate cap", cap)?;
    }
    Ok(())
}

fn check_rate(
    name: &'static str,
    value: Decimal,
) -> Result<(), TaxYearConfigError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(TaxYearConfigError::InvalidRate { name, value });
    }
    Ok(())
}

fn check_amount(
    name: &'static str,
    value: Decimal,
) -> Result<(), TaxYearConfigError> {
    if value < Decimal::ZERO {
        return Err(TaxYearConfigError::NegativeAmount { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn builtin_config_is_valid() {
        assert_eq!(TaxYearConfig::fy_2024_25().validate(), Ok(()));
    }

    #[test]
    fn default_is_fy_2024_25() {
        let config = TaxYearConfig::default();

        assert_eq!(config.financial_year, "FY2024-25");
        assert_eq!(config.assessment_year, "AY2025-26");
        assert_eq!(config.new_regime.rebate.threshold, dec!(700000));
        assert_eq!(config.old_regime.rebate.cap, Some(dec!(12500)));
    }

    #[test]
    fn rules_selects_regime() {
        let config = TaxYearConfig::default();

        assert_eq!(config.rules(Regime::Old).slabs.len(), 4);
        assert_eq!(config.rules(Regime::New).slabs.len(), 6);
    }

    #[test]
    fn validate_rejects_empty_slabs() {
        let mut config = TaxYearConfig::default();
        config.new_regime.slabs.clear();

        assert_eq!(
            config.validate(),
            Err(TaxYearConfigError::EmptySlabs(Regime::New))
        );
    }

    #[test]
    fn validate_rejects_descending_bounds() {
        let mut config = TaxYearConfig::default();
        config.old_regime.slabs[1].upper_bound = Some(dec!(200000));

        assert_eq!(
            config.validate(),
            Err(TaxYearConfigError::SlabsNotAscending {
                regime: Regime::Old,
                index: 1,
                bound: dec!(200000),
            })
        );
    }

    #[test]
    fn validate_rejects_bounded_last_slab() {
        let mut config = TaxYearConfig::default();
        config.old_regime.slabs[3].upper_bound = Some(dec!(5000000));

        assert_eq!(
            config.validate(),
            Err(TaxYearConfigError::LastSlabBounded(Regime::Old))
        );
    }

    #[test]
    fn validate_rejects_open_slab_in_the_middle() {
        let mut config = TaxYearConfig::default();
        config.new_regime.slabs[2].upper_bound = None;

        assert_eq!(
            config.validate(),
            Err(TaxYearConfigError::OpenSlabNotLast {
                regime: Regime::New,
                index: 2,
            })
        );
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let mut config = TaxYearConfig::default();
        config.cess_rate = dec!(4);

        assert_eq!(
            config.validate(),
            Err(TaxYearConfigError::InvalidRate {
                name: "cessRate",
                value: dec!(4),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_limit() {
        let mut config = TaxYearConfig::default();
        config.deduction_limits.section_80c = dec!(-1);

        assert_eq!(
            config.validate(),
            Err(TaxYearConfigError::NegativeAmount {
                name: "section80c",
                value: dec!(-1),
            })
        );
    }
}
