//! Old-versus-new regime comparison.
//!
//! Both regimes start from the same gross salary and capital gains; they
//! differ only in which deductions are allowed and in their slab and rebate
//! rules.
//!
//! | Step | Old regime | New regime |
//! |------|------------|------------|
//! | Deductions | standard + chapter VI-A + other + exempt interest + employer NPS | standard + exempt interest + employer NPS |
//! | Taxable | `max(0, gross - deductions) + taxable interest` | same |
//! | Slab tax | old slabs | new slabs |
//! | Cess | `cess_rate × (slab + capital gains)` | same |
//! | Rebate | 87A, capped | 87A, uncapped |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use itr_core::{Regime, TaxInput, TaxYearConfig};
//! use itr_core::calculations::RegimeComparator;
//!
//! let config = TaxYearConfig::fy_2024_25();
//! let mut input = TaxInput::salaried(dec!(800000), dec!(50000));
//! input.chapter_6a_deductions = dec!(150000);
//!
//! let result = RegimeComparator::new(&config).compare(&input).unwrap();
//!
//! assert_eq!(result.old_regime.final_tax_payable, dec!(33800));
//! assert_eq!(result.new_regime.final_tax_payable, dec!(26000));
//! assert_eq!(result.recommended_regime, Regime::New);
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use tracing::debug;

use crate::calculations::capital_gains::CapitalGainsAggregator;
use crate::calculations::common::{non_negative, round_paise};
use crate::calculations::rebate::{RebateEngine, combined_rebate_message};
use crate::calculations::slab_tax::SlabTaxCalculator;
use crate::calculations::validation::{FieldError, validate_tax_input};
use crate::models::{
    CapitalGainsResult, ComparisonMetadata, ComparisonResult, ItrForm, RebateOutcome, Regime,
    RegimeComputation, TaxInput, TaxYearConfig,
};

/// Reasons a comparison cannot be produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComputeError {
    #[error("gross salary is required")]
    MissingGrossSalary,

    #[error("invalid tax input: {}", summarize(.0))]
    InvalidInput(Vec<FieldError>),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validates `input` and compares both regimes, stamping the current time.
pub fn compute(
    config: &TaxYearConfig,
    input: &TaxInput,
) -> Result<ComparisonResult, ComputeError> {
    RegimeComparator::new(config).compare(input)
}

/// Interest split shared by both regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InterestSplit {
    exempt: Decimal,
    taxable: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct RegimeComparator<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> RegimeComparator<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    pub fn compare(
        &self,
        input: &TaxInput,
    ) -> Result<ComparisonResult, ComputeError> {
        self.compare_at(input, Utc::now())
    }

    /// Same as [`Self::compare`] with a caller-supplied timestamp; identical
    /// inputs always produce identical results.
    pub fn compare_at(
        &self,
        input: &TaxInput,
        calculated_at: DateTime<Utc>,
    ) -> Result<ComparisonResult, ComputeError> {
        let gross = input.gross_salary.ok_or(ComputeError::MissingGrossSalary)?;

        let errors = validate_tax_input(input, self.config);
        if !errors.is_empty() {
            return Err(ComputeError::InvalidInput(errors));
        }

        let interest = self.split_interest(input);
        let capital_gains =
            CapitalGainsAggregator::new(&self.config.capital_gains).calculate(&input.capital_gains);

        let old_deductions = input.standard_deduction
            + input.chapter_6a_deductions
            + input.other_deductions
            + interest.exempt
            + input.employer_nps;
        let new_deductions = input.standard_deduction + input.employer_nps + interest.exempt;

        let (old_regime, old_rebate) = self.compute_regime(
            Regime::Old,
            gross,
            old_deductions,
            interest,
            &capital_gains,
        );
        let (new_regime, new_rebate) = self.compute_regime(
            Regime::New,
            gross,
            new_deductions,
            interest,
            &capital_gains,
        );

        let old_final = old_regime.final_tax_payable;
        let new_final = new_regime.final_tax_payable;
        let savings = (old_final - new_final).abs();
        let recommended_regime = if new_final < old_final {
            Regime::New
        } else {
            Regime::Old
        };
        let savings_percentage = percentage_of(savings, old_final.max(new_final));

        let itr_form = if input.capital_gains.is_empty() && !input.has_vda {
            ItrForm::Itr1
        } else {
            ItrForm::Itr2
        };

        let combined = combined_rebate_message(&old_rebate, &new_rebate);

        debug!(
            old = %old_final,
            new = %new_final,
            recommended = %recommended_regime,
            "regime comparison complete"
        );

        Ok(ComparisonResult {
            both_regimes_zero_tax: old_final.is_zero() && new_final.is_zero(),
            old_regime,
            new_regime,
            capital_gains,
            savings: round_paise(savings),
            recommended_regime,
            savings_percentage,
            itr_form,
            combined_rebate_message: combined,
            metadata: ComparisonMetadata {
                financial_year: self.config.financial_year.clone(),
                assessment_year: self.config.assessment_year.clone(),
                calculated_at,
            },
        })
    }

    /// 80TTB for seniors covers savings and deposit interest; 80TTA covers
    /// savings interest only.
    fn split_interest(
        &self,
        input: &TaxInput,
    ) -> InterestSplit {
        let limits = &self.config.interest_exemption;
        let total = input.interest_savings + input.interest_fd;
        let exempt = if input.is_senior {
            limits.senior_limit.min(total)
        } else {
            limits.savings_limit.min(input.interest_savings)
        };
        let exempt = non_negative(exempt);

        InterestSplit {
            exempt,
            taxable: non_negative(total - exempt),
        }
    }

    fn compute_regime(
        &self,
        regime: Regime,
        gross: Decimal,
        deductions: Decimal,
        interest: InterestSplit,
        capital_gains: &CapitalGainsResult,
    ) -> (RegimeComputation, RebateOutcome) {
        let rules = self.config.rules(regime);
        let taxable_income = non_negative(gross - deductions) + interest.taxable;

        let slab = SlabTaxCalculator::new(&rules.slabs).calculate(taxable_income);
        let tax_before_cess = slab.tax + capital_gains.total_tax;
        let cess = tax_before_cess * self.config.cess_rate;
        let tax_before_rebate = tax_before_cess + cess;
        let rebate = RebateEngine::new(&rules.rebate).evaluate(taxable_income, tax_before_rebate);

        debug!(
            %regime,
            taxable = %taxable_income,
            slab_tax = %slab.tax,
            rebate = %rebate.rebate,
            "regime computed"
        );

        let computation = RegimeComputation {
            regime,
            taxable_income: round_paise(taxable_income),
            deductions_used: round_paise(deductions),
            slab_tax: round_paise(slab.tax),
            slab_breakdown: slab.breakdown,
            capital_gains_tax: round_paise(capital_gains.total_tax),
            tax_before_cess: round_paise(tax_before_cess),
            cess: round_paise(cess),
            tax_before_rebate: round_paise(tax_before_rebate),
            rebate: round_paise(rebate.rebate),
            qualifies_for_rebate: rebate.qualifies,
            rebate_threshold: rebate.threshold,
            rebate_cap: rebate.cap,
            rebate_reason: rebate.reason.clone(),
            rebate_message: rebate.message.clone(),
            final_tax_payable: round_paise(rebate.final_tax),
        };
        (computation, rebate)
    }
}

/// Whole-number percentage; zero when the base is zero.
fn percentage_of(
    part: Decimal,
    base: Decimal,
) -> Decimal {
    if base.is_zero() {
        return Decimal::ZERO;
    }
    (part / base * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
