//! Section 87A rebate.
//!
//! The rebate is applied to the tax after cess. A regime with a cap limits
//! the rebate to `min(cap, tax)`; without a cap the whole tax is rebated.
//! Eligibility depends only on taxable income against the regime threshold.

use rust_decimal::Decimal;

use crate::calculations::common::{format_inr, non_negative, round_paise};
use crate::models::{RebateOutcome, RebateRule};

#[derive(Debug, Clone, Copy)]
pub struct RebateEngine<'a> {
    rule: &'a RebateRule,
}

impl<'a> RebateEngine<'a> {
    pub fn new(rule: &'a RebateRule) -> Self {
        Self { rule }
    }

    pub fn evaluate(
        &self,
        taxable_income: Decimal,
        tax_before_rebate: Decimal,
    ) -> RebateOutcome {
        let tax_before_rebate = non_negative(tax_before_rebate);
        let qualifies = taxable_income <= self.rule.threshold;

        let rebate = if qualifies {
            match self.rule.cap {
                Some(cap) => cap.min(tax_before_rebate),
                None => tax_before_rebate,
            }
        } else {
            Decimal::ZERO
        };
        let final_tax = non_negative(tax_before_rebate - rebate);

        RebateOutcome {
            qualifies,
            rebate,
            threshold: self.rule.threshold,
            cap: self.rule.cap,
            final_tax,
            reason: self.reason(qualifies),
            message: self.message(qualifies, rebate, final_tax),
        }
    }

    fn reason(
        &self,
        qualifies: bool,
    ) -> String {
        let threshold = format_inr(self.rule.threshold);
        if !qualifies {
            return format!("Not eligible: taxable income exceeds the {threshold} threshold");
        }
        match self.rule.cap {
            Some(cap) => format!(
                "Taxable income within {threshold}: rebate applied (capped at {})",
                format_inr(cap)
            ),
            None => format!("Taxable income within {threshold}: full rebate applied (no cap)"),
        }
    }

    fn message(
        &self,
        qualifies: bool,
        rebate: Decimal,
        final_tax: Decimal,
    ) -> Option<String> {
        if !qualifies || rebate <= Decimal::ZERO {
            return None;
        }

        let amount = format_inr(round_paise(rebate));
        let message = if final_tax.is_zero() {
            format!("{amount} rebate applied, tax fully covered")
        } else {
            match self.rule.cap {
                Some(cap) => format!("{amount} rebate applied (capped at {})", format_inr(cap)),
                None => format!("{amount} rebate applied"),
            }
        };
        Some(message)
    }
}

/// Message shown when both regimes end at zero tax thanks to the rebate.
pub fn combined_rebate_message(
    old: &RebateOutcome,
    new: &RebateOutcome,
) -> Option<String> {
    let both_covered = old.final_tax.is_zero()
        && new.final_tax.is_zero()
        && old.rebate > Decimal::ZERO
        && new.rebate > Decimal::ZERO;

    both_covered.then(|| {
        format!(
            "You pay ₹0 tax under both regimes: Section 87A rebate applied (Old: {}, New: {})",
            format_inr(old.rebate),
            format_inr(new.rebate)
        )
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::TaxYearConfig;

    // =========================================================================
    // Old regime: capped rebate
    // =========================================================================

    #[test]
    fn old_regime_rebate_covers_small_tax() {
        let config = TaxYearConfig::fy_2024_25();
        let engine = RebateEngine::new(&config.old_regime.rebate);

        // 450,000 taxable: 10,000 slab tax + 400 cess
        let outcome = engine.evaluate(dec!(450000), dec!(10400));

        assert!(outcome.qualifies);
        assert_eq!(outcome.rebate, dec!(10400));
        assert_eq!(outcome.final_tax, dec!(0));
        assert_eq!(
            outcome.message.as_deref(),
            Some("₹10,400 rebate applied, tax fully covered")
        );
    }

    #[test]
    fn old_regime_rebate_is_capped() {
        let config = TaxYearConfig::fy_2024_25();
        let engine = RebateEngine::new(&config.old_regime.rebate);

        let outcome = engine.evaluate(dec!(500000), dec!(13000));

        assert_eq!(outcome.rebate, dec!(12500));
        assert_eq!(outcome.final_tax, dec!(500));
        assert_eq!(
            outcome.reason,
            "Taxable income within ₹500,000: rebate applied (capped at ₹12,500)"
        );
        assert_eq!(
            outcome.message.as_deref(),
            Some("₹12,500 rebate applied (capped at ₹12,500)")
        );
    }

    #[test]
    fn old_regime_above_threshold_gets_nothing() {
        let config = TaxYearConfig::fy_2024_25();
        let engine = RebateEngine::new(&config.old_regime.rebate);

        let outcome = engine.evaluate(dec!(500001), dec!(13000.05));

        assert!(!outcome.qualifies);
        assert_eq!(outcome.rebate, dec!(0));
        assert_eq!(outcome.final_tax, dec!(13000.05));
        assert_eq!(
            outcome.reason,
            "Not eligible: taxable income exceeds the ₹500,000 threshold"
        );
        assert_eq!(outcome.message, None);
    }

    // =========================================================================
    // New regime: uncapped rebate
    // =========================================================================

    #[test]
    fn new_regime_rebate_clears_tax_at_threshold() {
        let config = TaxYearConfig::fy_2024_25();
        let engine = RebateEngine::new(&config.new_regime.rebate);

        // 700,000 taxable: 20,000 slab tax + 800 cess
        let outcome = engine.evaluate(dec!(700000), dec!(20800));

        assert!(outcome.qualifies);
        assert_eq!(outcome.rebate, dec!(20800));
        assert_eq!(outcome.final_tax, dec!(0));
        assert_eq!(outcome.cap, None);
    }

    #[test]
    fn qualifying_with_zero_tax_has_no_message() {
        let config = TaxYearConfig::fy_2024_25();
        let engine = RebateEngine::new(&config.new_regime.rebate);

        let outcome = engine.evaluate(dec!(250000), dec!(0));

        assert!(outcome.qualifies);
        assert_eq!(outcome.rebate, dec!(0));
        assert_eq!(outcome.message, None);
    }

    #[test]
    fn rebate_never_exceeds_tax() {
        let config = TaxYearConfig::fy_2024_25();

        for rule in [&config.old_regime.rebate, &config.new_regime.rebate] {
            let engine = RebateEngine::new(rule);
            for tax in [dec!(0), dec!(1), dec!(5000), dec!(12500), dec!(40000)] {
                let outcome = engine.evaluate(dec!(400000), tax);
                assert!(outcome.rebate <= tax);
                assert!(outcome.final_tax >= dec!(0));
            }
        }
    }

    // =========================================================================
    // Combined message
    // =========================================================================

    #[test]
    fn combined_message_when_both_regimes_fully_covered() {
        let config = TaxYearConfig::fy_2024_25();
        let old = RebateEngine::new(&config.old_regime.rebate).evaluate(dec!(450000), dec!(10400));
        let new = RebateEngine::new(&config.new_regime.rebate).evaluate(dec!(500000), dec!(10400));

        assert_eq!(
            combined_rebate_message(&old, &new).as_deref(),
            Some(
                "You pay ₹0 tax under both regimes: Section 87A rebate applied (Old: ₹10,400, New: ₹10,400)"
            )
        );
    }

    #[test]
    fn no_combined_message_when_one_regime_pays() {
        let config = TaxYearConfig::fy_2024_25();
        let old = RebateEngine::new(&config.old_regime.rebate).evaluate(dec!(600000), dec!(33800));
        let new = RebateEngine::new(&config.new_regime.rebate).evaluate(dec!(600000), dec!(15600));

        assert_eq!(combined_rebate_message(&old, &new), None);
    }
}
