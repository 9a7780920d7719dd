//! Personalised deduction suggestions.
//!
//! Each category compares what the taxpayer already claims with the section
//! limit from [`DeductionLimits`](crate::models::DeductionLimits) and prices
//! the unused room at a marginal-rate estimate derived from gross salary.
//! Categories are produced in a fixed order and then sorted by priority and
//! potential savings.

use std::cmp::Reverse;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{format_inr, non_negative, round_rupees};
use crate::models::{
    CityType, InvestmentDeadline, Priority, Recommendation, Suggestion, SuggestionInput,
    SuggestionReport, SuggestionSummary, TaxYearConfig,
};

const PREVENTIVE_CHECKUP: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

#[derive(Debug, Clone, Copy)]
pub struct SuggestionEngine<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> SuggestionEngine<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    pub fn suggest(
        &self,
        input: &SuggestionInput,
    ) -> SuggestionReport {
        let rate = marginal_rate(input.gross_salary);

        // Informational categories are listed but not counted in the total.
        let counted: Vec<Suggestion> = [
            self.section_80c(input, rate),
            self.section_80d(input, rate),
            self.section_80ccd_1b(input, rate),
            self.section_24b(input, rate),
            self.hra(input, rate),
        ]
        .into_iter()
        .flatten()
        .collect();

        let total_potential_savings: Decimal = counted
            .iter()
            .filter_map(|s| s.potential_savings)
            .sum();

        let mut suggestions = counted;
        suggestions.push(self.section_80e());
        suggestions.push(self.interest_on_savings(input, rate));
        suggestions.sort_by_key(|s| {
            (
                s.priority,
                Reverse(s.potential_savings.unwrap_or(Decimal::ZERO)),
            )
        });

        let count = |p: Priority| suggestions.iter().filter(|s| s.priority == p).count();
        let summary = SuggestionSummary {
            total_suggestions_count: suggestions.len(),
            high_priority: count(Priority::High),
            medium_priority: count(Priority::Medium),
            low_priority: count(Priority::Low),
        };

        debug!(
            suggestions = summary.total_suggestions_count,
            total = %total_potential_savings,
            "deduction suggestions generated"
        );

        SuggestionReport {
            total_potential_savings,
            suggestions,
            summary,
        }
    }

    fn section_80c(
        &self,
        input: &SuggestionInput,
        rate: Decimal,
    ) -> Option<Suggestion> {
        let limit = self.config.deduction_limits.section_80c;
        let current = input.current_deductions.section80c;
        if current >= limit {
            return None;
        }
        let remaining = limit - current;
        let nps_room = remaining.min(self.config.deduction_limits.section_80ccd_1b);

        Some(Suggestion {
            category: "Section 80C".to_string(),
            priority: Priority::High,
            current_amount: current,
            max_limit: Some(limit),
            remaining_limit: Some(remaining),
            potential_savings: Some(round_rupees(remaining * rate)),
            recommendations: vec![
                recommendation(
                    "Public Provident Fund (PPF)",
                    Some(remaining),
                    "Safe investment with 7.1% returns (tax-free)",
                    "Open PPF account and invest before March 31st",
                ),
                recommendation(
                    "Equity Linked Savings Scheme (ELSS)",
                    Some(remaining),
                    "Market-linked returns with only 3-year lock-in",
                    "Invest in ELSS mutual funds",
                ),
                recommendation(
                    "Life Insurance Premium",
                    Some(remaining),
                    "Financial protection + tax benefit",
                    "Consider term insurance or whole life policy",
                ),
                recommendation(
                    "National Pension System (NPS)",
                    Some(nps_room),
                    &format!(
                        "Additional {} under 80CCD(1B)",
                        format_inr(self.config.deduction_limits.section_80ccd_1b)
                    ),
                    "Open NPS Tier-I account",
                ),
            ],
        })
    }

    fn section_80d(
        &self,
        input: &SuggestionInput,
        rate: Decimal,
    ) -> Option<Suggestion> {
        let self_limit = self.age_limit(input.age);
        // The parents' share always counts; only senior parents raise it.
        let parents_limit = if input.has_parents {
            self.age_limit(input.parents_age)
        } else {
            self.config.deduction_limits.section_80d_self
        };
        let limit = self_limit + parents_limit;

        let current = input.current_deductions.section80d;
        if current >= limit {
            return None;
        }
        let remaining = limit - current;

        let mut recommendations = vec![recommendation(
            "Family Health Insurance",
            Some(self_limit),
            "Medical coverage + tax benefit",
            "Buy family floater policy covering you and dependents",
        )];
        if input.has_parents {
            recommendations.push(recommendation(
                "Parents Health Insurance",
                Some(parents_limit),
                &format!("Additional {} deduction", format_inr(parents_limit)),
                "Buy separate health policy for parents",
            ));
        }
        recommendations.push(recommendation(
            "Preventive Health Checkup",
            Some(PREVENTIVE_CHECKUP),
            "Included in Section 80D limit",
            "Book annual health checkups for family",
        ));

        Some(Suggestion {
            category: "Section 80D - Health Insurance".to_string(),
            priority: Priority::High,
            current_amount: current,
            max_limit: Some(limit),
            remaining_limit: Some(remaining),
            potential_savings: Some(round_rupees(remaining * rate)),
            recommendations,
        })
    }

    fn section_80ccd_1b(
        &self,
        input: &SuggestionInput,
        rate: Decimal,
    ) -> Option<Suggestion> {
        let limit = self.config.deduction_limits.section_80ccd_1b;
        let current = input.current_deductions.nps;
        if current >= limit {
            return None;
        }
        let remaining = limit - current;

        Some(Suggestion {
            category: "Section 80CCD(1B) - NPS".to_string(),
            priority: Priority::Medium,
            current_amount: current,
            max_limit: Some(limit),
            remaining_limit: Some(remaining),
            potential_savings: Some(round_rupees(remaining * rate)),
            recommendations: vec![recommendation(
                "National Pension System (NPS)",
                Some(limit),
                &format!("Extra {} deduction beyond 80C limit", format_inr(limit)),
                "Invest in NPS Tier-I (separate from 80C limit)",
            )],
        })
    }

    fn section_24b(
        &self,
        input: &SuggestionInput,
        rate: Decimal,
    ) -> Option<Suggestion> {
        let limit = self.config.deduction_limits.section_24b;
        let current = input.current_deductions.section24b;
        if !input.has_home_loan || current >= limit {
            return None;
        }
        let remaining = limit - current;

        Some(Suggestion {
            category: "Section 24(b) - Home Loan Interest".to_string(),
            priority: Priority::Medium,
            current_amount: current,
            max_limit: Some(limit),
            remaining_limit: Some(remaining),
            potential_savings: Some(round_rupees(remaining * rate)),
            recommendations: vec![recommendation(
                "Claim Home Loan Interest",
                Some(remaining),
                "Deduct interest paid on home loan",
                "Get interest certificate from bank and claim deduction",
            )],
        })
    }

    /// Rent is assumed to be a quarter of salary. The exemption is the rent
    /// above 10% of salary, capped at 50% of salary in metros and 40% elsewhere.
    fn hra(
        &self,
        input: &SuggestionInput,
        rate: Decimal,
    ) -> Option<Suggestion> {
        if !input.is_renting || input.has_home_loan {
            return None;
        }

        let salary = input.gross_salary;
        let rent = salary * Decimal::new(25, 2);
        let city_cap = match input.city_type {
            CityType::Metro => Decimal::new(50, 2),
            CityType::NonMetro | CityType::Tier2 => Decimal::new(40, 2),
        };
        let exemption = non_negative((rent - salary * Decimal::new(10, 2)).min(salary * city_cap));
        let exemption = round_rupees(exemption);

        Some(Suggestion {
            category: "HRA - House Rent Allowance".to_string(),
            priority: Priority::High,
            current_amount: Decimal::ZERO,
            max_limit: Some(exemption),
            remaining_limit: Some(exemption),
            potential_savings: Some(round_rupees(exemption * rate)),
            recommendations: vec![recommendation(
                "Claim HRA Exemption",
                Some(exemption),
                "Reduce taxable income by rent paid",
                "Submit rent receipts and landlord PAN to employer",
            )],
        })
    }

    fn section_80e(&self) -> Suggestion {
        Suggestion {
            category: "Section 80E - Education Loan".to_string(),
            priority: Priority::Low,
            current_amount: Decimal::ZERO,
            max_limit: None,
            remaining_limit: None,
            potential_savings: None,
            recommendations: vec![recommendation(
                "Education Loan Interest",
                None,
                "Full interest amount deductible",
                "Claim if you have education loan for higher studies",
            )],
        }
    }

    fn interest_on_savings(
        &self,
        input: &SuggestionInput,
        rate: Decimal,
    ) -> Suggestion {
        let senior = input.age >= self.config.deduction_limits.senior_age;
        let limits = &self.config.interest_exemption;
        let (category, limit, benefit) = if senior {
            (
                "Section 80TTB",
                limits.senior_limit,
                "Deduct interest from savings, FD, post office",
            )
        } else {
            (
                "Section 80TTA",
                limits.savings_limit,
                "Deduct interest from savings account only",
            )
        };

        Suggestion {
            category: category.to_string(),
            priority: Priority::Low,
            current_amount: Decimal::ZERO,
            max_limit: Some(limit),
            remaining_limit: Some(limit),
            potential_savings: Some(round_rupees(limit * rate)),
            recommendations: vec![recommendation(
                "Interest on Savings",
                Some(limit),
                benefit,
                "Automatically claimed on interest earned",
            )],
        }
    }

    fn age_limit(
        &self,
        age: u32,
    ) -> Decimal {
        let limits = &self.config.deduction_limits;
        if age >= limits.senior_age {
            limits.section_80d_senior
        } else {
            limits.section_80d_self
        }
    }
}

/// Rough marginal slab rate used to price unused deduction room.
pub fn marginal_rate(gross_salary: Decimal) -> Decimal {
    if gross_salary > Decimal::new(1_500_000, 0) {
        Decimal::new(30, 2)
    } else if gross_salary > Decimal::new(1_200_000, 0) {
        Decimal::new(20, 2)
    } else if gross_salary > Decimal::new(500_000, 0) {
        Decimal::new(5, 2)
    } else {
        Decimal::ZERO
    }
}

fn recommendation(
    option: &str,
    amount: Option<Decimal>,
    benefit: &str,
    action: &str,
) -> Recommendation {
    Recommendation {
        option: option.to_string(),
        amount,
        benefit: benefit.to_string(),
        action: action.to_string(),
    }
}

/// The 31 March deadline for tax-saving investments in the financial year
/// containing `today`.
pub fn investment_deadline(today: NaiveDate) -> InvestmentDeadline {
    let end_year = if today.month() >= 4 {
        today.year() + 1
    } else {
        today.year()
    };
    let date = NaiveDate::from_ymd_opt(end_year, 3, 31).unwrap_or(today);
    let days_remaining = (date - today).num_days();

    let urgency = match days_remaining {
        ..=30 => Priority::High,
        31..=60 => Priority::Medium,
        _ => Priority::Low,
    };
    let message = if urgency == Priority::High {
        format!("Only {days_remaining} days left! Invest before March 31st to save tax.")
    } else {
        format!("You have {days_remaining} days to maximize tax savings for this financial year.")
    };

    InvestmentDeadline {
        title: "Tax Saving Investments Deadline".to_string(),
        date,
        days_remaining,
        urgency,
        message,
        actions: vec![
            "Complete Section 80C investments (₹1,50,000)".to_string(),
            "Buy health insurance (Section 80D)".to_string(),
            "Invest in NPS (Section 80CCD - ₹50,000 extra)".to_string(),
            "Pay home loan principal (Section 80C)".to_string(),
            "Submit rent receipts for HRA".to_string(),
        ],
    }
}
