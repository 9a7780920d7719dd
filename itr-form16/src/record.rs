use itr_core::{TaxInput, TaxYearConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Text handed to the parser: either a bare string or the pair produced by a
/// PDF converter. Patterns always run against `original`, which keeps the
/// line breaks the converter emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Form16Text {
    Plain(String),
    Converted { original: String, normalized: String },
}

impl Form16Text {
    pub fn original(&self) -> &str {
        match self {
            Form16Text::Plain(text) => text,
            Form16Text::Converted { original, .. } => original,
        }
    }

    pub fn normalized(&self) -> &str {
        match self {
            Form16Text::Plain(text) => text,
            Form16Text::Converted { normalized, .. } => normalized,
        }
    }
}

impl From<String> for Form16Text {
    fn from(text: String) -> Self {
        Form16Text::Plain(text)
    }
}

impl From<&str> for Form16Text {
    fn from(text: &str) -> Self {
        Form16Text::Plain(text.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionMetadata {
    pub fields_extracted: usize,
    pub total_fields: usize,
    /// `min(fields_extracted, total_fields) / total_fields`.
    ///
    /// There are more descriptors than `total_fields`, so `fields_extracted`
    /// can exceed it and the score then stays at 1.
    pub confidence_score: Decimal,
    pub extracted_fields: Vec<String>,
    pub is_complete: bool,
}

/// Structured Form-16 data. Fields that were not found hold `0` or an empty
/// string; `metadata.extracted_fields` tells the two cases apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form16Record {
    // Part A
    pub employee_name: String,
    pub employer_name: String,
    #[serde(rename = "employerTAN")]
    pub employer_tan: String,
    pub pan: String,
    pub assessment_year: String,
    pub financial_year: String,
    pub period_from: String,
    pub period_to: String,
    pub certificate_number: String,

    // Salary
    pub gross_salary: Decimal,
    pub total_salary: Decimal,
    pub exempt_allowances: Decimal,
    pub salary_received: Decimal,
    pub standard_deduction: Decimal,
    pub entertainment_allowance: Decimal,
    pub professional_tax: Decimal,
    pub total_deduction_16: Decimal,
    pub net_salary: Decimal,

    // Income
    pub salary_income: Decimal,
    pub other_income: Decimal,
    pub house_property_income: Decimal,
    pub total_other_income: Decimal,
    pub gross_total_income: Decimal,

    // Chapter VI-A
    #[serde(rename = "section80C")]
    pub section_80c: Decimal,
    #[serde(rename = "section80CCC")]
    pub section_80ccc: Decimal,
    #[serde(rename = "section80CCD1")]
    pub section_80ccd1: Decimal,
    #[serde(rename = "section80CCD1B")]
    pub section_80ccd1b: Decimal,
    #[serde(rename = "section80CCD2")]
    pub section_80ccd2: Decimal,
    #[serde(rename = "section80D")]
    pub section_80d: Decimal,
    #[serde(rename = "section80DD")]
    pub section_80dd: Decimal,
    #[serde(rename = "section80DDB")]
    pub section_80ddb: Decimal,
    #[serde(rename = "section80E")]
    pub section_80e: Decimal,
    #[serde(rename = "section80G")]
    pub section_80g: Decimal,
    #[serde(rename = "section80GG")]
    pub section_80gg: Decimal,
    #[serde(rename = "section80TTA")]
    pub section_80tta: Decimal,
    #[serde(rename = "section80U")]
    pub section_80u: Decimal,
    #[serde(rename = "section24b")]
    pub section_24b: Decimal,
    pub total_deductions: Decimal,

    // Tax computation
    pub taxable_income: Decimal,
    pub tax_on_income: Decimal,
    #[serde(rename = "rebate87A")]
    pub rebate_87a: Decimal,
    pub relief_under_89: Decimal,
    pub surcharge: Decimal,
    pub health_education_cess: Decimal,
    pub total_tax_payable: Decimal,
    #[serde(rename = "tcs12BAA")]
    pub tcs_12baa: Decimal,
    pub tds_deducted: Decimal,
    pub net_tax_payable: Decimal,

    // Verification
    pub verifier_name: String,
    pub verifier_designation: String,
    pub verification_date: String,
    pub verification_place: String,
    pub opting_out_new_regime: String,

    /// `round(confidence_score × 100)`.
    pub extraction_confidence: u32,
    pub metadata: ExtractionMetadata,
}

impl Form16Record {
    /// Sum of the individual deduction section fields, 24(b) included.
    pub fn deduction_sections_sum(&self) -> Decimal {
        [
            self.section_80c,
            self.section_80ccc,
            self.section_80ccd1,
            self.section_80ccd1b,
            self.section_80d,
            self.section_80dd,
            self.section_80ddb,
            self.section_80e,
            self.section_80g,
            self.section_80gg,
            self.section_80tta,
            self.section_80u,
            self.section_24b,
        ]
        .into_iter()
        .sum()
    }

    /// Builds a comparator input from the certificate.
    ///
    /// A standard deduction missing from the certificate falls back to the
    /// configured default. 80TTA is carried as savings interest and taken
    /// out of chapter VI-A, since the comparator exempts that interest
    /// itself. Chapter VI-A is capped at the 80C limit so the result always
    /// passes input validation; employer NPS comes from 80CCD(2).
    pub fn to_tax_input(
        &self,
        config: &TaxYearConfig,
    ) -> TaxInput {
        let standard_deduction = if self.standard_deduction.is_zero() {
            config.default_standard_deduction
        } else {
            self.standard_deduction
        };
        let chapter_6a = if self.total_deductions.is_zero() {
            self.deduction_sections_sum()
        } else {
            self.total_deductions
        };

        TaxInput {
            gross_salary: Some(self.gross_salary),
            standard_deduction,
            chapter_6a_deductions: (chapter_6a - self.section_80tta)
                .max(Decimal::ZERO)
                .min(config.deduction_limits.section_80c),
            employer_nps: self.section_80ccd2,
            interest_savings: self.section_80tta,
            ..TaxInput::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use itr_core::calculations::RegimeComparator;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn text_accepts_plain_string_json() {
        let text: Form16Text = serde_json::from_str(r#""Gross Salary 1200000.00""#).unwrap();
        assert_eq!(text.original(), "Gross Salary 1200000.00");
    }

    #[test]
    fn text_accepts_converted_pair_json() {
        let text: Form16Text =
            serde_json::from_str(r#"{"original": "a\r\nb", "normalized": "a\nb"}"#).unwrap();

        assert_eq!(text.original(), "a\r\nb");
        assert_eq!(text.normalized(), "a\nb");
    }

    #[test]
    fn record_serializes_section_names() {
        let record = Form16Record {
            section_80c: dec!(150000),
            employer_tan: "MUMA12345B".to_string(),
            ..Form16Record::default()
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["section80C"], "150000");
        assert_eq!(json["employerTAN"], "MUMA12345B");
        assert_eq!(json["metadata"]["totalFields"], 0);
    }

    #[test]
    fn tax_input_uses_config_default_standard_deduction() {
        let config = TaxYearConfig::fy_2024_25();
        let record = Form16Record {
            gross_salary: dec!(900000),
            section_80c: dec!(100000),
            section_80d: dec!(20000),
            section_80ccd2: dec!(30000),
            ..Form16Record::default()
        };

        let input = record.to_tax_input(&config);

        assert_eq!(input.gross_salary, Some(dec!(900000)));
        assert_eq!(input.standard_deduction, dec!(50000));
        assert_eq!(input.chapter_6a_deductions, dec!(120000));
        assert_eq!(input.employer_nps, dec!(30000));
    }

    #[test]
    fn savings_interest_is_not_deducted_twice() {
        let config = TaxYearConfig::fy_2024_25();
        let record = Form16Record {
            gross_salary: dec!(1000000),
            standard_deduction: dec!(50000),
            section_80c: dec!(100000),
            section_80tta: dec!(10000),
            ..Form16Record::default()
        };

        let input = record.to_tax_input(&config);
        let result = RegimeComparator::new(&config).compare(&input).unwrap();

        assert_eq!(input.chapter_6a_deductions, dec!(100000));
        assert_eq!(input.interest_savings, dec!(10000));
        assert_eq!(result.old_regime.deductions_used, dec!(160000));
    }

    #[test]
    fn tax_input_prefers_certificate_figures() {
        let config = TaxYearConfig::fy_2024_25();
        let record = Form16Record {
            gross_salary: dec!(1500000),
            standard_deduction: dec!(75000),
            total_deductions: dec!(210000),
            ..Form16Record::default()
        };

        let input = record.to_tax_input(&config);

        assert_eq!(input.standard_deduction, dec!(75000));
        assert_eq!(input.chapter_6a_deductions, dec!(150000));
    }
}
