//! Progressive slab tax on a single income figure.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use itr_core::TaxYearConfig;
//! use itr_core::calculations::SlabTaxCalculator;
//!
//! let config = TaxYearConfig::fy_2024_25();
//! let calculator = SlabTaxCalculator::new(&config.old_regime.slabs);
//! let result = calculator.calculate(dec!(600000));
//!
//! // 5% of 250,000 + 20% of 100,000
//! assert_eq!(result.tax, dec!(32500));
//! assert_eq!(result.breakdown.len(), 3);
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::{format_inr, non_negative, round_paise};
use crate::models::{Slab, SlabBreakdownRow, SlabTaxResult};

/// Walks an ascending slab table, taxing the portion of income that falls in
/// each slab.
#[derive(Debug, Clone, Copy)]
pub struct SlabTaxCalculator<'a> {
    slabs: &'a [Slab],
}

impl<'a> SlabTaxCalculator<'a> {
    /// Slabs must be ascending and non-overlapping with an open-ended last
    /// slab; [`crate::TaxYearConfig::validate`] enforces this for configured
    /// tables.
    pub fn new(slabs: &'a [Slab]) -> Self {
        Self { slabs }
    }

    pub fn calculate(
        &self,
        taxable_income: Decimal,
    ) -> SlabTaxResult {
        let mut remaining = non_negative(taxable_income);
        let mut lower = Decimal::ZERO;
        let mut tax = Decimal::ZERO;
        let mut breakdown = Vec::new();

        for slab in self.slabs {
            if remaining <= Decimal::ZERO {
                break;
            }

            let portion = match slab.upper_bound {
                Some(upper) => remaining.min(non_negative(upper - lower)),
                None => remaining,
            };

            if portion > Decimal::ZERO {
                let slab_tax = portion * slab.rate;
                tax += slab_tax;
                remaining -= portion;

                breakdown.push(SlabBreakdownRow {
                    range: range_label(lower, slab.upper_bound),
                    rate: slab.rate,
                    taxable_amount: round_paise(portion),
                    tax: round_paise(slab_tax),
                });
            }

            if let Some(upper) = slab.upper_bound {
                lower = upper;
            }
        }

        SlabTaxResult { tax, breakdown }
    }
}

fn range_label(
    lower: Decimal,
    upper: Option<Decimal>,
) -> String {
    match upper {
        Some(upper) => format!("{} - {}", format_inr(lower), format_inr(upper)),
        None => format!("{} - Above", format_inr(lower)),
    }
}
