//! Capital-gains tax, computed separately from slab tax.
//!
//! | Gain | Asset  | Treatment |
//! |------|--------|-----------|
//! | STCG | equity | flat equity STCG rate (15%) |
//! | STCG | other  | entry rate, else default STCG rate (15%) |
//! | LTCG | other  | entry rate, else default LTCG rate (20%), per entry |
//! | LTCG | equity | aggregated across all entries; exemption (₹1,00,000) applied once, remainder at 10% |

use rust_decimal::Decimal;

use crate::calculations::common::{format_inr, format_rate, non_negative, round_paise};
use crate::models::{
    AssetClass, CapitalGainEntry, CapitalGainLine, CapitalGainsConfig, CapitalGainsResult,
    EquityLtcgAggregate, GainType,
};

#[derive(Debug, Clone, Copy)]
pub struct CapitalGainsAggregator<'a> {
    config: &'a CapitalGainsConfig,
}

impl<'a> CapitalGainsAggregator<'a> {
    pub fn new(config: &'a CapitalGainsConfig) -> Self {
        Self { config }
    }

    pub fn calculate(
        &self,
        gains: &[CapitalGainEntry],
    ) -> CapitalGainsResult {
        let mut entries = Vec::with_capacity(gains.len());
        let mut per_entry_tax = Decimal::ZERO;

        for gain in gains {
            match self.entry_rate(gain) {
                Some(rate) => {
                    let tax = gain.amount * rate;
                    per_entry_tax += tax;
                    entries.push(CapitalGainLine {
                        description: describe(gain),
                        gain_type: gain.gain_type,
                        asset: gain.asset,
                        amount: gain.amount,
                        rate: Some(rate),
                        tax: Some(round_paise(tax)),
                        rate_hint: None,
                    });
                }
                None => entries.push(CapitalGainLine {
                    description: describe(gain),
                    gain_type: gain.gain_type,
                    asset: gain.asset,
                    amount: gain.amount,
                    rate: None,
                    tax: None,
                    rate_hint: Some(format!(
                        "{} on aggregate above {}",
                        format_rate(self.config.equity_ltcg_rate),
                        format_inr(self.config.equity_ltcg_exemption)
                    )),
                }),
            }
        }

        let equity_ltcg = self.aggregate_equity_ltcg(gains);
        let total_tax = round_paise(per_entry_tax + equity_ltcg.tax);

        CapitalGainsResult {
            entries,
            equity_ltcg,
            total_tax,
        }
    }

    /// Rate applied to a single entry, or `None` for equity LTCG which is
    /// only taxed through the aggregate.
    fn entry_rate(
        &self,
        gain: &CapitalGainEntry,
    ) -> Option<Decimal> {
        match (gain.gain_type, gain.asset) {
            (GainType::Stcg, AssetClass::Equity) => Some(self.config.equity_stcg_rate),
            (GainType::Stcg, AssetClass::Other) => {
                Some(gain.rate.unwrap_or(self.config.default_stcg_rate))
            }
            (GainType::Ltcg, AssetClass::Other) => {
                Some(gain.rate.unwrap_or(self.config.default_ltcg_rate))
            }
            (GainType::Ltcg, AssetClass::Equity) => None,
        }
    }

    /// Sums every equity LTCG entry first so the exemption is granted once.
    fn aggregate_equity_ltcg(
        &self,
        gains: &[CapitalGainEntry],
    ) -> EquityLtcgAggregate {
        let aggregate: Decimal = gains
            .iter()
            .filter(|g| g.gain_type == GainType::Ltcg && g.asset == AssetClass::Equity)
            .map(|g| g.amount)
            .sum();

        let taxable = non_negative(aggregate - self.config.equity_ltcg_exemption);
        let tax = taxable * self.config.equity_ltcg_rate;

        EquityLtcgAggregate {
            aggregate,
            exemption: self.config.equity_ltcg_exemption.min(aggregate),
            taxable,
            tax: round_paise(tax),
        }
    }
}

fn describe(gain: &CapitalGainEntry) -> String {
    format!("{} {}", gain.gain_type.as_str(), gain.asset.as_str())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::TaxYearConfig;

    fn gain(
        gain_type: GainType,
        asset: AssetClass,
        amount: Decimal,
        rate: Option<Decimal>,
    ) -> CapitalGainEntry {
        CapitalGainEntry {
            gain_type,
            asset,
            amount,
            rate,
        }
    }

    fn calculate(gains: &[CapitalGainEntry]) -> CapitalGainsResult {
        let config = TaxYearConfig::fy_2024_25();
        CapitalGainsAggregator::new(&config.capital_gains).calculate(gains)
    }

    #[test]
    fn no_gains_no_tax() {
        let result = calculate(&[]);

        assert_eq!(result.total_tax, dec!(0));
        assert!(result.entries.is_empty());
        assert_eq!(result.equity_ltcg.aggregate, dec!(0));
    }

    #[test]
    fn equity_ltcg_at_exemption_is_untaxed() {
        let result = calculate(&[gain(GainType::Ltcg, AssetClass::Equity, dec!(100000), None)]);

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.equity_ltcg.taxable, dec!(0));
    }

    #[test]
    fn equity_ltcg_above_exemption_taxed_at_ten_percent() {
        let result = calculate(&[gain(GainType::Ltcg, AssetClass::Equity, dec!(150000), None)]);

        assert_eq!(result.total_tax, dec!(5000));
        assert_eq!(
            result.equity_ltcg,
            EquityLtcgAggregate {
                aggregate: dec!(150000),
                exemption: dec!(100000),
                taxable: dec!(50000),
                tax: dec!(5000),
            }
        );
    }

    #[test]
    fn equity_ltcg_exemption_applies_once_across_entries() {
        let result = calculate(&[
            gain(GainType::Ltcg, AssetClass::Equity, dec!(80000), None),
            gain(GainType::Ltcg, AssetClass::Equity, dec!(70000), None),
        ]);

        // Per-entry exemption would leave nothing taxable.
        assert_eq!(result.equity_ltcg.aggregate, dec!(150000));
        assert_eq!(result.total_tax, dec!(5000));
        assert!(result.entries.iter().all(|e| e.tax.is_none()));
        assert_eq!(
            result.entries[0].rate_hint.as_deref(),
            Some("10% on aggregate above ₹100,000")
        );
    }

    #[test]
    fn equity_stcg_ignores_entry_rate() {
        let result = calculate(&[gain(
            GainType::Stcg,
            AssetClass::Equity,
            dec!(100000),
            Some(dec!(0.30)),
        )]);

        assert_eq!(result.total_tax, dec!(15000));
        assert_eq!(result.entries[0].rate, Some(dec!(0.15)));
    }

    #[test]
    fn other_stcg_uses_entry_rate_or_default() {
        let result = calculate(&[
            gain(GainType::Stcg, AssetClass::Other, dec!(100000), Some(dec!(0.30))),
            gain(GainType::Stcg, AssetClass::Other, dec!(100000), None),
        ]);

        assert_eq!(result.total_tax, dec!(45000));
    }

    #[test]
    fn other_ltcg_taxed_per_entry_without_exemption() {
        let result = calculate(&[
            gain(GainType::Ltcg, AssetClass::Other, dec!(50000), None),
            gain(GainType::Ltcg, AssetClass::Other, dec!(50000), Some(dec!(0.125))),
        ]);

        assert_eq!(result.total_tax, dec!(16250));
        assert_eq!(result.entries[0].description, "LTCG other");
        assert_eq!(result.entries[1].tax, Some(dec!(6250)));
    }

    #[test]
    fn mixed_gains_sum_entries_and_aggregate() {
        let result = calculate(&[
            gain(GainType::Stcg, AssetClass::Equity, dec!(20000), None),
            gain(GainType::Ltcg, AssetClass::Equity, dec!(120000), None),
            gain(GainType::Ltcg, AssetClass::Other, dec!(10000), None),
        ]);

        // 3,000 + 2,000 + 2,000
        assert_eq!(result.total_tax, dec!(7000));
        assert_eq!(result.entries.len(), 3);
    }
}
