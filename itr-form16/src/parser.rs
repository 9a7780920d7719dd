use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::fields::{DEDUCTIONS_ITEM_11, FIELD_SPECS};
use crate::record::{ExtractionMetadata, Form16Record, Form16Text};

/// Number of fields a complete certificate is expected to yield. More
/// descriptors exist than this, so the score saturates at 1.
pub const TOTAL_FIELDS: usize = 40;

/// Turns Form-16 text into a [`Form16Record`].
///
/// Extraction is best-effort: a field that cannot be found keeps its default
/// and is left out of `metadata.extracted_fields`. Callers should gate on
/// [`crate::ExtractionValidator`] before trusting the figures.
pub struct Form16FieldParser;

impl Form16FieldParser {
    pub fn parse(input: &Form16Text) -> Form16Record {
        Self::parse_str(input.original())
    }

    pub fn parse_str(text: &str) -> Form16Record {
        let mut record = Form16Record::default();
        let mut extracted_fields = Vec::new();

        for spec in FIELD_SPECS.iter() {
            let extraction = spec.extract(text);
            if extraction.matched {
                spec.apply(&mut record, extraction.value);
                extracted_fields.push(spec.name.to_string());
            }
        }

        if record.gross_salary > Decimal::ZERO {
            record.net_salary = record.gross_salary - record.exempt_allowances;
        }
        // The section sum is a fallback and is not counted as extracted.
        if record.total_deductions.is_zero() {
            record.total_deductions = record.deduction_sections_sum();
        }
        if record.total_deductions.is_zero() {
            let extraction = DEDUCTIONS_ITEM_11.extract(text);
            if extraction.matched {
                DEDUCTIONS_ITEM_11.apply(&mut record, extraction.value);
                extracted_fields.push(DEDUCTIONS_ITEM_11.name.to_string());
            }
        }

        let fields_extracted = extracted_fields.len();
        let confidence_score = confidence(fields_extracted);
        record.extraction_confidence = (confidence_score * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0);
        record.metadata = ExtractionMetadata {
            fields_extracted,
            total_fields: TOTAL_FIELDS,
            confidence_score,
            extracted_fields,
            is_complete: fields_extracted * 2 >= TOTAL_FIELDS,
        };

        debug!(
            fields = fields_extracted,
            confidence = record.extraction_confidence,
            "form-16 text parsed"
        );

        record
    }
}

fn confidence(fields_extracted: usize) -> Decimal {
    Decimal::from(fields_extracted.min(TOTAL_FIELDS)) / Decimal::from(TOTAL_FIELDS)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_text_yields_defaults() {
        let record = Form16FieldParser::parse_str("");

        assert_eq!(record.gross_salary, dec!(0));
        assert_eq!(record.pan, "");
        assert_eq!(record.extraction_confidence, 0);
        assert_eq!(record.metadata.fields_extracted, 0);
        assert_eq!(record.metadata.total_fields, 40);
        assert!(!record.metadata.is_complete);
    }

    #[test]
    fn gross_salary_line_is_extracted_and_counted() {
        let record = Form16FieldParser::parse_str("Gross Salary 1200000.00\n");

        assert_eq!(record.gross_salary, dec!(1200000));
        assert_eq!(record.net_salary, dec!(1200000));
        assert!(record.metadata.extracted_fields.contains(&"grossSalary".to_string()));
        assert_eq!(record.metadata.confidence_score, confidence(record.metadata.fields_extracted));
    }

    #[test]
    fn plain_and_converted_inputs_parse_the_original() {
        let plain = Form16FieldParser::parse(&Form16Text::from("Gross Salary 1200000.00\n"));
        let converted = Form16FieldParser::parse(&Form16Text::Converted {
            original: "Gross Salary 1200000.00\n".to_string(),
            normalized: "ignored".to_string(),
        });

        assert_eq!(plain, converted);
    }

    #[test]
    fn total_deductions_falls_back_to_section_sum() {
        let text = "Section 80E: Rs. 40,000\nSection 80G: Rs. 10,000\n";
        let record = Form16FieldParser::parse_str(text);

        assert_eq!(record.total_deductions, dec!(50000));
        assert!(!record.metadata.extracted_fields.contains(&"totalDeductions".to_string()));
    }

    #[test]
    fn item_11_is_used_only_without_sections() {
        let item_11 = "11. Aggregate of deductible amount under Chapter VI-A 85000.00\n";

        let record = Form16FieldParser::parse_str(item_11);
        assert_eq!(record.total_deductions, dec!(85000));
        assert!(record.metadata.extracted_fields.contains(&"totalDeductions".to_string()));

        let with_sections = format!("Section 80E: Rs. 40,000\n{item_11}");
        let record = Form16FieldParser::parse_str(&with_sections);
        assert_eq!(record.total_deductions, dec!(40000));
        assert!(!record.metadata.extracted_fields.contains(&"totalDeductions".to_string()));
    }

    #[test]
    fn confidence_saturates_at_one() {
        assert_eq!(confidence(0), dec!(0));
        assert_eq!(confidence(13), dec!(0.325));
        assert_eq!(confidence(40), dec!(1));
        assert_eq!(confidence(52), dec!(1));
    }
}
