//! CSV loader for batch regime comparisons.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter and every
//! column except `gross_salary` may be left out entirely. Amounts accept
//! Indian or western digit grouping.
//!
//! | Column                  | Type    | Notes                                   |
//! |-------------------------|---------|-----------------------------------------|
//! | `label`                 | string  | Defaults to `row N`                     |
//! | `gross_salary`          | decimal | Empty cell is reported per row          |
//! | `standard_deduction`    | decimal | Empty is 0                              |
//! | `chapter_6a_deductions` | decimal |                                         |
//! | `other_deductions`      | decimal |                                         |
//! | `employer_nps`          | decimal | 80CCD(2)                                |
//! | `interest_savings`      | decimal |                                         |
//! | `interest_fd`           | decimal |                                         |
//! | `is_senior`             | flag    | `yes`/`no`, `true`/`false`, `1`/`0`     |
//! | `has_vda`               | flag    |                                         |
//!
//! Capital gains are not expressible in a flat row; use `itr compare` with
//! JSON input for those.
//!
//! ### Example
//!
//! ```csv
//! label,gross_salary,standard_deduction,chapter_6a_deductions
//! worked example,"8,00,000",50000,150000
//! ```

use std::path::{Path, PathBuf};

use itr_core::TaxInput;
use serde::Deserialize;

use crate::utils::{ParseDecimalError, parse_decimal, parse_flag, parse_optional_decimal};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    label: String,
    gross_salary: String,
    standard_deduction: String,
    chapter_6a_deductions: String,
    other_deductions: String,
    employer_nps: String,
    interest_savings: String,
    interest_fd: String,
    is_senior: String,
    has_vda: String,
}

/// One labelled comparison request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    pub label: String,
    pub input: TaxInput,
}

/// Errors that can occur while loading or converting CSV data.
///
/// `row` is 1-based with the header excluded.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("column '{column}' on row {row}: {source}")]
    InvalidAmount {
        column: &'static str,
        row: usize,
        #[source]
        source: ParseDecimalError,
    },

    #[error("column '{column}' on row {row}: '{value}' is not a yes/no flag")]
    InvalidFlag {
        column: &'static str,
        value: String,
        row: usize,
    },
}

fn amount(
    column: &'static str,
    value: &str,
    row: usize,
) -> Result<rust_decimal::Decimal, CsvLoadError> {
    parse_decimal(value).map_err(|source| CsvLoadError::InvalidAmount { column, row, source })
}

fn flag(
    column: &'static str,
    value: &str,
    row: usize,
) -> Result<bool, CsvLoadError> {
    parse_flag(value).ok_or_else(|| CsvLoadError::InvalidFlag {
        column,
        value: value.to_string(),
        row,
    })
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<BatchRow, CsvLoadError> {
    let gross_salary = parse_optional_decimal(&row.gross_salary).map_err(|source| {
        CsvLoadError::InvalidAmount {
            column: "gross_salary",
            row: row_number,
            source,
        }
    })?;

    let label = if row.label.trim().is_empty() {
        format!("row {row_number}")
    } else {
        row.label.trim().to_string()
    };

    Ok(BatchRow {
        label,
        input: TaxInput {
            gross_salary,
            standard_deduction: amount("standard_deduction", &row.standard_deduction, row_number)?,
            chapter_6a_deductions: amount(
                "chapter_6a_deductions",
                &row.chapter_6a_deductions,
                row_number,
            )?,
            other_deductions: amount("other_deductions", &row.other_deductions, row_number)?,
            employer_nps: amount("employer_nps", &row.employer_nps, row_number)?,
            interest_savings: amount("interest_savings", &row.interest_savings, row_number)?,
            interest_fd: amount("interest_fd", &row.interest_fd, row_number)?,
            is_senior: flag("is_senior", &row.is_senior, row_number)?,
            has_vda: flag("has_vda", &row.has_vda, row_number)?,
            capital_gains: Vec::new(),
        },
    })
}

/// Parses CSV text into rows, in file order.
///
/// # Errors
///
/// The first structural, amount or flag error aborts the load.
pub fn load_from_str(input: &str) -> Result<Vec<BatchRow>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

pub fn load_from_file(path: &Path) -> Result<Vec<BatchRow>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}
