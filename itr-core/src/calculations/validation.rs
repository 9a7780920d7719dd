//! Input checks run before a comparison, plus the cross-field deduction
//! review shown alongside a filing.
//!
//! Neither check panics: problems are collected and returned so a caller can
//! show all of them at once.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::format_inr;
use crate::models::{TaxInput, TaxYearConfig};

/// One rejected input field, named the way the JSON contract names it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Returns every problem found in `input`; an empty list means the input can
/// be computed. A missing gross salary is not reported here.
pub fn validate_tax_input(
    input: &TaxInput,
    config: &TaxYearConfig,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(gross) = input.gross_salary {
        if gross < Decimal::ZERO {
            errors.push(FieldError::new("grossSalary", "must be non-negative"));
        }
    }

    let amounts = [
        ("standardDeduction", input.standard_deduction),
        ("chapter6ADeductions", input.chapter_6a_deductions),
        ("otherDeductions", input.other_deductions),
        ("employerNPS", input.employer_nps),
        ("interestSavings", input.interest_savings),
        ("interestFD", input.interest_fd),
    ];
    for (field, value) in amounts {
        if value < Decimal::ZERO {
            errors.push(FieldError::new(field, "must be non-negative"));
        }
    }

    let limit = config.deduction_limits.section_80c;
    if input.chapter_6a_deductions > limit {
        errors.push(FieldError::new(
            "chapter6ADeductions",
            format!("cannot exceed {}", format_inr(limit)),
        ));
    }

    for (index, gain) in input.capital_gains.iter().enumerate() {
        if gain.amount < Decimal::ZERO {
            errors.push(FieldError::new(
                format!("capitalGains[{index}].amount"),
                "must be non-negative",
            ));
        }
        if let Some(rate) = gain.rate {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                errors.push(FieldError::new(
                    format!("capitalGains[{index}].rate"),
                    "must be between 0 and 1",
                ));
            }
        }
    }

    errors
}

// ─── cross-field review ──────────────────────────────────────────────────────

/// Deductions as claimed on a filing form, before any limit is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeductionClaims {
    pub gross_salary: Decimal,
    pub section80c: Decimal,
    pub section80d: Decimal,
    pub hra: Decimal,
    pub home_loan_interest: Decimal,
    pub home_loan_principal: Decimal,
    pub is_renting: bool,
    pub has_home_loan: bool,
    pub age: u32,
}

impl Default for DeductionClaims {
    fn default() -> Self {
        Self {
            gross_salary: Decimal::ZERO,
            section80c: Decimal::ZERO,
            section80d: Decimal::ZERO,
            hra: Decimal::ZERO,
            home_loan_interest: Decimal::ZERO,
            home_loan_principal: Decimal::ZERO,
            is_renting: false,
            has_home_loan: false,
            age: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Mutually exclusive claims.
    Critical,
    /// A statutory limit is breached.
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueCode {
    #[serde(rename = "HRA_HOMELOAN_CONFLICT")]
    HraHomeLoanConflict,
    #[serde(rename = "HOUSING_STATUS_CONFLICT")]
    HousingStatusConflict,
    #[serde(rename = "80C_LIMIT_EXCEEDED")]
    Section80cLimitExceeded,
    #[serde(rename = "80D_LIMIT_EXCEEDED")]
    Section80dLimitExceeded,
    #[serde(rename = "HOMELOAN_LIMIT_EXCEEDED")]
    HomeLoanLimitExceeded,
    #[serde(rename = "80C_PRINCIPAL_COMBINED")]
    Section80cPrincipalCombined,
    #[serde(rename = "HRA_HIGH")]
    HraHigh,
    #[serde(rename = "80C_LOW_UTILIZATION")]
    Section80cLowUtilization,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::HraHomeLoanConflict => "HRA_HOMELOAN_CONFLICT",
            IssueCode::HousingStatusConflict => "HOUSING_STATUS_CONFLICT",
            IssueCode::Section80cLimitExceeded => "80C_LIMIT_EXCEEDED",
            IssueCode::Section80dLimitExceeded => "80D_LIMIT_EXCEEDED",
            IssueCode::HomeLoanLimitExceeded => "HOMELOAN_LIMIT_EXCEEDED",
            IssueCode::Section80cPrincipalCombined => "80C_PRINCIPAL_COMBINED",
            IssueCode::HraHigh => "HRA_HIGH",
            IssueCode::Section80cLowUtilization => "80C_LOW_UTILIZATION",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionIssue {
    pub severity: IssueSeverity,
    pub code: IssueCode,
    pub fields: Vec<String>,
    pub message: String,
    pub explanation: String,
    pub solution: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossFieldSummary {
    pub critical_errors: usize,
    pub errors: usize,
    pub warnings: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossFieldReport {
    pub is_valid: bool,
    pub errors: Vec<DeductionIssue>,
    pub warnings: Vec<DeductionIssue>,
    pub summary: CrossFieldSummary,
}

/// Reviews claims that are individually plausible but conflict with each
/// other or with a statutory limit.
pub fn cross_field_validation(
    claims: &DeductionClaims,
    config: &TaxYearConfig,
) -> CrossFieldReport {
    let limits = &config.deduction_limits;
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if claims.hra > Decimal::ZERO && claims.home_loan_interest > Decimal::ZERO {
        errors.push(issue(
            IssueSeverity::Critical,
            IssueCode::HraHomeLoanConflict,
            &["hra", "homeLoanInterest"],
            "HRA and home loan interest cannot be claimed together",
            "HRA exemption and home loan interest cannot both be claimed on the same property.".to_string(),
            "Choose either HRA (if renting) or home loan interest (if you own)".to_string(),
        ));
    }

    if claims.is_renting && claims.has_home_loan {
        errors.push(issue(
            IssueSeverity::Critical,
            IssueCode::HousingStatusConflict,
            &["isRenting", "hasHomeLoan"],
            "Cannot be renting and have a home loan simultaneously",
            "Home loan benefits apply only if you own and occupy the property.".to_string(),
            "Update your housing status correctly".to_string(),
        ));
    }

    if claims.section80c > limits.section_80c {
        errors.push(issue(
            IssueSeverity::Error,
            IssueCode::Section80cLimitExceeded,
            &["section80c"],
            "Section 80C limit exceeded",
            format!(
                "Maximum allowed: {}. You entered: {}",
                format_inr(limits.section_80c),
                format_inr(claims.section80c)
            ),
            format!("Reduce Section 80C to {}", format_inr(limits.section_80c)),
        ));
    }

    let limit_80d = if claims.age >= limits.senior_age {
        limits.section_80d_senior
    } else {
        limits.section_80d_self
    };
    if claims.section80d > limit_80d {
        errors.push(issue(
            IssueSeverity::Error,
            IssueCode::Section80dLimitExceeded,
            &["section80d"],
            "Section 80D limit exceeded",
            format!(
                "Maximum allowed for your age: {}. You entered: {}",
                format_inr(limit_80d),
                format_inr(claims.section80d)
            ),
            format!("Reduce Section 80D to {}", format_inr(limit_80d)),
        ));
    }

    if claims.home_loan_interest > limits.section_24b {
        errors.push(issue(
            IssueSeverity::Error,
            IssueCode::HomeLoanLimitExceeded,
            &["homeLoanInterest"],
            "Home loan interest limit exceeded",
            format!(
                "Maximum allowed: {}. You entered: {}",
                format_inr(limits.section_24b),
                format_inr(claims.home_loan_interest)
            ),
            format!("Reduce home loan interest to {}", format_inr(limits.section_24b)),
        ));
    }

    if claims.section80c + claims.home_loan_principal > limits.section_80c {
        warnings.push(issue(
            IssueSeverity::Warning,
            IssueCode::Section80cPrincipalCombined,
            &["section80c", "homeLoanPrincipal"],
            "Combined 80C and home loan principal exceeds the 80C limit",
            format!(
                "Home loan principal is part of Section 80C. Combined limit is {}.",
                format_inr(limits.section_80c)
            ),
            format!("Ensure the total does not exceed {}", format_inr(limits.section_80c)),
        ));
    }

    if claims.hra > claims.gross_salary * Decimal::new(5, 1) {
        warnings.push(issue(
            IssueSeverity::Warning,
            IssueCode::HraHigh,
            &["hra"],
            "HRA seems unusually high",
            "HRA is more than 50% of your gross salary, which is uncommon.".to_string(),
            "Verify your HRA amount is correct".to_string(),
        ));
    }

    if claims.gross_salary > Decimal::new(500_000, 0)
        && claims.section80c < claims.gross_salary * Decimal::new(5, 2)
    {
        warnings.push(issue(
            IssueSeverity::Info,
            IssueCode::Section80cLowUtilization,
            &["section80c"],
            "Low Section 80C utilization",
            format!(
                "You are not utilizing much of the {} Section 80C limit.",
                format_inr(limits.section_80c)
            ),
            "Consider investing in PPF, ELSS, or other 80C instruments".to_string(),
        ));
    }

    let critical_errors = errors
        .iter()
        .filter(|e| e.severity == IssueSeverity::Critical)
        .count();
    let summary = CrossFieldSummary {
        critical_errors,
        errors: errors.len() - critical_errors,
        warnings: warnings.len(),
    };

    CrossFieldReport {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        summary,
    }
}

fn issue(
    severity: IssueSeverity,
    code: IssueCode,
    fields: &[&str],
    message: &str,
    explanation: String,
    solution: String,
) -> DeductionIssue {
    DeductionIssue {
        severity,
        code,
        fields: fields.iter().map(|f| (*f).to_string()).collect(),
        message: message.to_string(),
        explanation,
        solution,
    }
}
