//! End-to-end extraction over a text rendition of a Form-16 certificate.

use itr_core::TaxYearConfig;
use itr_core::calculations::RegimeComparator;
use itr_form16::{
    DeclaredIncome, Form16FieldParser, Form16Processor, PlainTextSource, TextSource,
    check_document_consistency,
};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

const SAMPLE: &str = include_str!("fixtures/form16_sample.txt");

fn fixture_path() -> String {
    format!("{}/tests/fixtures/form16_sample.txt", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn part_a_identity_fields() {
    let record = Form16FieldParser::parse_str(SAMPLE);

    assert_eq!(record.employee_name, "RAHUL KUMAR SHARMA");
    assert_eq!(record.employer_name, "ACME SOFTWARE PRIVATE LIMITED");
    assert_eq!(record.pan, "ABCDE1234F");
    assert_eq!(record.employer_tan, "MUMA12345B");
    assert_eq!(record.assessment_year, "2025-26");
    assert_eq!(record.financial_year, "2024-25");
    assert_eq!(record.certificate_number, "KLMNOPQ");
}

#[test]
fn part_b_amounts() {
    let record = Form16FieldParser::parse_str(SAMPLE);

    assert_eq!(record.gross_salary, dec!(1200000));
    assert_eq!(record.net_salary, dec!(1200000));
    assert_eq!(record.section_80e, dec!(40000));
    assert_eq!(record.section_80g, dec!(10000));
    assert_eq!(record.total_deductions, dec!(150000));
    assert_eq!(record.taxable_income, dec!(940000));
    assert_eq!(record.tds_deducted, dec!(95000));
}

#[test]
fn verification_block() {
    let record = Form16FieldParser::parse_str(SAMPLE);

    assert_eq!(record.verifier_name, "PRIYA MENON");
    assert_eq!(record.opting_out_new_regime, "No");
}

#[test]
fn metadata_matches_extracted_fields() {
    let record = Form16FieldParser::parse_str(SAMPLE);
    let metadata = &record.metadata;

    assert_eq!(metadata.fields_extracted, metadata.extracted_fields.len());
    assert!(metadata.extracted_fields.contains(&"pan".to_string()));
    assert!(!metadata.extracted_fields.contains(&"section80C".to_string()));
    assert!(!metadata.is_complete);
    assert!(record.extraction_confidence < 50);
}

#[tokio::test]
async fn processor_reads_fixture_from_disk() {
    let source = PlainTextSource::new(fixture_path());
    assert_eq!(source.extract_text().await.unwrap().original(), SAMPLE);

    let outcome = Form16Processor::new(source).process().await.unwrap();

    assert!(outcome.validation.is_valid);
    assert!(
        outcome
            .validation
            .warnings
            .contains(&"Low extraction confidence. Please verify the data manually.".to_string())
    );
}

#[test]
fn certificate_feeds_the_regime_comparator() {
    let config = TaxYearConfig::fy_2024_25();
    let record = Form16FieldParser::parse_str(SAMPLE);

    let input = record.to_tax_input(&config);
    let result = RegimeComparator::new(&config).compare(&input).unwrap();

    assert_eq!(input.chapter_6a_deductions, dec!(150000));
    assert!(result.old_regime.taxable_income < result.new_regime.taxable_income);
}

#[test]
fn declared_figures_match_the_certificate() {
    let record = Form16FieldParser::parse_str(SAMPLE);
    let declared = DeclaredIncome {
        gross_salary: dec!(1200500),
        tds: dec!(95000),
    };

    assert!(check_document_consistency(&record, &declared).is_consistent);
}
