//! Checks over a parsed [`Form16Record`].
//!
//! Errors mean the record cannot be used to pre-fill a return. Warnings flag
//! figures that look wrong but may still be right.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::record::Form16Record;

static PAN_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("invalid PAN pattern"));

/// Allowed gap between certificate and declared figures.
pub const CONSISTENCY_TOLERANCE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

const MIN_NAME_LEN: usize = 3;
const MIN_CONFIDENCE: u32 = 50;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

pub struct ExtractionValidator;

impl ExtractionValidator {
    pub fn validate(record: &Form16Record) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if !validate_pan(&record.pan).is_valid {
            errors.push("Invalid or missing PAN number".to_string());
        }

        if record.employee_name.chars().count() < MIN_NAME_LEN {
            warnings.push("Employee name not extracted or too short".to_string());
        }

        if record.gross_salary.is_zero() {
            errors.push("Gross salary not found or is zero".to_string());
        }

        if record.extraction_confidence < MIN_CONFIDENCE {
            warnings.push("Low extraction confidence. Please verify the data manually.".to_string());
        }

        if record.taxable_income > record.gross_total_income {
            warnings.push(
                "Taxable income is greater than gross total income - please verify".to_string(),
            );
        }

        if record.total_deductions > record.gross_total_income {
            warnings.push("Total deductions exceed gross income - please verify".to_string());
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanCheck {
    pub is_valid: bool,
    pub message: String,
}

/// Checks the `ABCDE1234F` shape of a PAN. Lowercase is rejected.
pub fn validate_pan(pan: &str) -> PanCheck {
    let is_valid = PAN_FORMAT.is_match(pan);
    PanCheck {
        is_valid,
        message: if is_valid {
            "Valid PAN format".to_string()
        } else {
            "Invalid PAN format. Format: ABCDE1234F".to_string()
        },
    }
}

/// Figures the taxpayer typed in, compared against the certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeclaredIncome {
    pub gross_salary: Decimal,
    pub tds: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchSeverity {
    Critical,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mismatch {
    pub field: String,
    pub form16_value: Decimal,
    pub user_value: Decimal,
    pub difference: Decimal,
    pub message: String,
    pub severity: MismatchSeverity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencySummary {
    pub critical_mismatches: usize,
    pub warnings: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyReport {
    pub is_consistent: bool,
    pub mismatches: Vec<Mismatch>,
    pub summary: ConsistencySummary,
}

/// Compares certificate figures with declared ones. A gross-salary gap is
/// critical; a TDS gap is a warning and is only checked when both sides
/// report TDS.
pub fn check_document_consistency(
    record: &Form16Record,
    declared: &DeclaredIncome,
) -> ConsistencyReport {
    let mut mismatches = Vec::new();

    let gross_gap = (record.gross_salary - declared.gross_salary).abs();
    if gross_gap > CONSISTENCY_TOLERANCE {
        mismatches.push(Mismatch {
            field: "grossSalary".to_string(),
            form16_value: record.gross_salary,
            user_value: declared.gross_salary,
            difference: gross_gap,
            message: "Gross salary mismatch with Form-16".to_string(),
            severity: MismatchSeverity::Critical,
        });
    }

    if !record.tds_deducted.is_zero() && !declared.tds.is_zero() {
        let tds_gap = (record.tds_deducted - declared.tds).abs();
        if tds_gap > CONSISTENCY_TOLERANCE {
            mismatches.push(Mismatch {
                field: "tds".to_string(),
                form16_value: record.tds_deducted,
                user_value: declared.tds,
                difference: tds_gap,
                message: "TDS amount mismatch".to_string(),
                severity: MismatchSeverity::Warning,
            });
        }
    }

    let critical_mismatches = mismatches
        .iter()
        .filter(|m| m.severity == MismatchSeverity::Critical)
        .count();
    if critical_mismatches > 0 {
        warn!(critical_mismatches, "form-16 disagrees with declared income");
    }

    ConsistencyReport {
        is_consistent: critical_mismatches == 0,
        summary: ConsistencySummary {
            critical_mismatches,
            warnings: mismatches.len() - critical_mismatches,
        },
        mismatches,
    }
}
