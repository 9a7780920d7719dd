//! Rounding and formatting helpers shared by the calculators.
//!
//! Computations run on exact [`Decimal`] values; rounding only happens when a
//! figure is written into a result.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to paise (two decimal places), half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itr_core::calculations::common::round_paise;
///
/// assert_eq!(round_paise(dec!(1300.004)), dec!(1300.00));
/// assert_eq!(round_paise(dec!(1300.005)), dec!(1300.01));
/// ```
pub fn round_paise(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to whole rupees, half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itr_core::calculations::common::round_rupees;
///
/// assert_eq!(round_rupees(dec!(7499.5)), dec!(7500));
/// assert_eq!(round_rupees(dec!(7499.49)), dec!(7499));
/// ```
pub fn round_rupees(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps negative values to zero.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Formats an amount as `₹` with thousands separators, dropping a zero
/// fractional part.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itr_core::calculations::common::format_inr;
///
/// assert_eq!(format_inr(dec!(12500)), "₹12,500");
/// assert_eq!(format_inr(dec!(1234567.50)), "₹1,234,567.5");
/// ```
pub fn format_inr(value: Decimal) -> String {
    let rounded = round_paise(value).normalize();
    let text = rounded.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(f) => format!("{sign}₹{grouped}.{f}"),
        None => format!("{sign}₹{grouped}"),
    }
}

/// Formats a fractional rate as a percentage, e.g. `0.05` as `5%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_paise_rounds_up_at_midpoint() {
        assert_eq!(round_paise(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_paise_preserves_rounded_values() {
        assert_eq!(round_paise(dec!(33800.00)), dec!(33800.00));
    }

    #[test]
    fn round_rupees_drops_fraction() {
        assert_eq!(round_rupees(dec!(2500.4)), dec!(2500));
        assert_eq!(round_rupees(dec!(2500.5)), dec!(2501));
    }

    #[test]
    fn non_negative_clamps_below_zero() {
        assert_eq!(non_negative(dec!(-0.01)), Decimal::ZERO);
        assert_eq!(non_negative(dec!(10)), dec!(10));
    }

    #[test]
    fn format_inr_groups_thousands() {
        assert_eq!(format_inr(dec!(0)), "₹0");
        assert_eq!(format_inr(dec!(999)), "₹999");
        assert_eq!(format_inr(dec!(1000)), "₹1,000");
        assert_eq!(format_inr(dec!(250000.00)), "₹250,000");
        assert_eq!(format_inr(dec!(10000000)), "₹10,000,000");
    }

    #[test]
    fn format_inr_keeps_significant_fraction() {
        assert_eq!(format_inr(dec!(1352.40)), "₹1,352.4");
        assert_eq!(format_inr(dec!(-1500)), "-₹1,500");
    }

    #[test]
    fn format_rate_renders_percent() {
        assert_eq!(format_rate(dec!(0.05)), "5%");
        assert_eq!(format_rate(dec!(0.30)), "30%");
        assert_eq!(format_rate(dec!(0)), "0%");
    }
}
