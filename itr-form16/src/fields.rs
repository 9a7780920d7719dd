//! Field descriptor table for Form-16 text.
//!
//! Each descriptor names one record field and lists its patterns from most to
//! least specific. The first pattern whose capture survives the field's
//! checks wins; later patterns are never tried. Descriptors share no state,
//! so extraction order only affects the order of `extracted_fields`.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::record::Form16Record;

/// Value produced by one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Amount(Decimal),
}

/// Result of running one descriptor. An unmatched extraction carries the
/// field's default (`0` or an empty string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub value: FieldValue,
    pub matched: bool,
}

#[derive(Clone, Copy)]
enum Setter {
    Text(fn(&mut Form16Record, String)),
    Amount(fn(&mut Form16Record, Decimal)),
}

pub struct FieldSpec {
    pub name: &'static str,
    setter: Setter,
    patterns: Vec<Regex>,
    /// Amounts must be strictly greater than this.
    above: Option<Decimal>,
    /// Text must have at least this many characters after cleanup.
    min_len: usize,
}

impl FieldSpec {
    fn new(
        name: &'static str,
        setter: Setter,
        patterns: &[&str],
    ) -> Self {
        Self {
            name,
            setter,
            patterns: patterns
                .iter()
                .map(|p| Regex::new(p).expect("invalid Form-16 field pattern"))
                .collect(),
            above: None,
            min_len: 1,
        }
    }

    fn above(
        mut self,
        floor: i64,
    ) -> Self {
        self.above = Some(Decimal::from(floor));
        self
    }

    fn min_len(
        mut self,
        len: usize,
    ) -> Self {
        self.min_len = len;
        self
    }

    pub fn extract(
        &self,
        text: &str,
    ) -> Extraction {
        for regex in &self.patterns {
            let Some(capture) = regex
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
            else {
                continue;
            };

            if let Some(value) = self.accept(capture) {
                return Extraction {
                    value,
                    matched: true,
                };
            }
        }

        Extraction {
            value: self.default_value(),
            matched: false,
        }
    }

    /// Writes a matched value into `record`.
    pub fn apply(
        &self,
        record: &mut Form16Record,
        value: FieldValue,
    ) {
        match (self.setter, value) {
            (Setter::Text(set), FieldValue::Text(v)) => set(record, v),
            (Setter::Amount(set), FieldValue::Amount(v)) => set(record, v),
            (_, value) => unreachable!("{} cannot hold {value:?}", self.name),
        }
    }

    fn accept(
        &self,
        capture: &str,
    ) -> Option<FieldValue> {
        match self.setter {
            Setter::Text(_) => {
                let cleaned = collapse_whitespace(capture);
                (cleaned.chars().count() >= self.min_len).then_some(FieldValue::Text(cleaned))
            }
            Setter::Amount(_) => {
                let amount = parse_leading_integer(capture)?;
                match self.above {
                    Some(floor) if amount <= floor => None,
                    _ => Some(FieldValue::Amount(amount)),
                }
            }
        }
    }

    fn default_value(&self) -> FieldValue {
        match self.setter {
            Setter::Text(_) => FieldValue::Text(String::new()),
            Setter::Amount(_) => FieldValue::Amount(Decimal::ZERO),
        }
    }
}

fn text(
    name: &'static str,
    set: fn(&mut Form16Record, String),
    patterns: &[&str],
) -> FieldSpec {
    FieldSpec::new(name, Setter::Text(set), patterns)
}

fn amount(
    name: &'static str,
    set: fn(&mut Form16Record, Decimal),
    patterns: &[&str],
) -> FieldSpec {
    FieldSpec::new(name, Setter::Amount(set), patterns)
}

/// Drops commas and whitespace, then reads the leading run of digits.
/// Anything after the run (a decimal fraction, stray text) is ignored.
pub fn parse_leading_integer(raw: &str) -> Option<Decimal> {
    let digits: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<Decimal>().ok()
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Every descriptor, in record order.
pub static FIELD_SPECS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
    vec![
        // ─── Part A ──────────────────────────────────────────────────────
        text("employeeName", |r, v| r.employee_name = v, &[
            r"(?im)Name\s*(?:and\s*address\s*)?of\s*(?:the\s*)?Employee[/\s]*Specified\s*senior\s*citizen\s*[\n\r]+([A-Z][A-Z\s.]+?)[\n\r]",
            r"(?im)Employee[/\s]*Specified\s*senior\s*citizen\s*[\n\r]+([A-Z][A-Z\s.]+?)[\n\r]",
            r"(?im)Employee[/\s]*Specified.*?[\n\r]+([A-Z][A-Z\s.]{5,50})[\n\r]",
            r"(?im)\n([A-Z][A-Z\s]{5,50})\s*[\n\r]+.*?PAN\s*of\s*Employee",
        ])
        .min_len(3),
        text("employerName", |r, v| r.employer_name = v, &[
            r"(?im)Name\s*(?:and\s*address\s*)?of\s*(?:the\s*)?Employer[/\s]*Specified\s*Bank\s*[\n\r]+([A-Z][A-Z\s.,&-]+?)[\n\r]",
            r"(?im)Employer[/\s]*Specified\s*Bank\s*[\n\r]+([A-Z][A-Z\s.,&-]{5,60})[\n\r]",
        ])
        .min_len(3),
        text("pan", |r, v| r.pan = v, &[
            r"(?im)PAN\s*of\s*(?:the\s*)?Employee[/\s]*Specified\s*senior\s*citizen\s*[\n\r]*((?-i:[A-Z]{5}[0-9]{4}[A-Z]))",
            r"(?im)Employee.*?[\n\r]+.*?((?-i:[A-Z]{5}[0-9]{4}[A-Z]))",
        ]),
        text("employerTAN", |r, v| r.employer_tan = v, &[
            r"(?im)TAN\s*of\s*(?:the\s*)?Deductor\s*[\n\r]*((?-i:[A-Z]{4}[0-9]{5}[A-Z]))",
            r"\b([A-Z]{4}[0-9]{5}[A-Z])\b",
        ]),
        text("assessmentYear", |r, v| r.assessment_year = v, &[
            r"(?im)Assessment\s*Year\s*[\n\r]*([0-9]{4}-[0-9]{2,4})",
        ]),
        text("financialYear", |r, v| r.financial_year = v, &[
            r"(?im)Financial\s*Year\s*[\n\r]*([0-9]{4}-[0-9]{2,4})",
        ]),
        text("periodFrom", |r, v| r.period_from = v, &[
            r"(?im)From[\n\r]+([0-9]{2}-[A-Za-z]{3}-[0-9]{4})",
        ]),
        text("periodTo", |r, v| r.period_to = v, &[
            r"(?im)To[\n\r]+([0-9]{2}-[A-Za-z]{3}-[0-9]{4})",
        ]),
        text("certificateNumber", |r, v| r.certificate_number = v, &[
            r"(?im)Certificate\s*(?:Number|No)\.?[:\s]*([A-Z0-9]+)",
        ]),
        // ─── Salary (Part B, items 1 to 5) ───────────────────────────────
        amount("grossSalary", |r, v| r.gross_salary = v, &[
            r"(?im)1\.?\s*Gross\s*Salary[\s\S]*?(?:section\s*17\(1\)\(a\)|17\(1\)\(a\))[\s\S]*?([0-9]{3,}\.?[0-9]{0,2})",
            r"(?im)Gross\s*Salary[\s\S]{0,200}?([0-9]{3,}(?:\.[0-9]{2})?)",
        ]),
        amount("totalSalary", |r, v| r.total_salary = v, &[
            r"(?im)\(d\)\s*Total[\s\S]*?([0-9]{3,}\.?[0-9]{0,2})",
        ])
        .above(0),
        amount("exemptAllowances", |r, v| r.exempt_allowances = v, &[
            r"(?im)2\.\s*Less:\s*Allowances[\s\S]*?Total\s*amount\s*of\s*exemption[\s\S]*?\(i\)[\s\S]*?([0-9]+\.?[0-9]{0,2})",
        ]),
        amount("salaryReceived", |r, v| r.salary_received = v, &[
            r"3\.[\s\S]{0,150}?\b([0-9]{6,})\.00",
        ])
        .above(100_000),
        amount("standardDeduction", |r, v| r.standard_deduction = v, &[
            r"\(b\)\s+(75000|50000)\.00",
        ]),
        amount("entertainmentAllowance", |r, v| r.entertainment_allowance = v, &[
            r"\(a\)\s*([0-9]+)\.00",
        ]),
        amount("professionalTax", |r, v| r.professional_tax = v, &[
            r"(?im)\(c\)[\s\S]{0,80}?Tax\s*on\s*employment[\s\S]{0,30}?([0-9]+)\.00",
        ]),
        amount("totalDeduction16", |r, v| r.total_deduction_16 = v, &[
            r"5\.[\s\S]{0,100}?(75000|50000)\.00",
        ]),
        // ─── Income (items 6 to 9) ───────────────────────────────────────
        amount("salaryIncome", |r, v| r.salary_income = v, &[
            r"\b([0-9]{6,})\.00\s*6\.",
        ])
        .above(100_000),
        amount("otherIncome", |r, v| r.other_income = v, &[
            r"7\.[\s\S]{0,80}?\(a\)\s*([0-9]+)\.00",
        ]),
        amount("housePropertyIncome", |r, v| r.house_property_income = v, &[
            r"(?im)\(b\)[\s\S]{0,100}?house\s*property[\s\S]{0,50}?([0-9]+)\.00",
        ]),
        amount("totalOtherIncome", |r, v| r.total_other_income = v, &[
            r"8\.[\s\S]{0,100}?([0-9]+)\.00",
        ]),
        amount("grossTotalIncome", |r, v| r.gross_total_income = v, &[
            r"(?im)\b([0-9]{6,})\.00\s*Gross\s*total\s*income",
        ])
        .above(100_000),
        // ─── Chapter VI-A (item 10) ──────────────────────────────────────
        amount("section80C", |r, v| r.section_80c = v, &[
            r"(?im)10\(a\)[\s\S]*?section\s*80C[\s\S]*?([0-9]+\.?[0-9]{0,2})",
        ]),
        amount("section80CCC", |r, v| r.section_80ccc = v, &[
            r"(?im)10\(b\)[\s\S]*?section\s*80CCC[\s\S]*?([0-9]+\.?[0-9]{0,2})",
        ]),
        amount("section80CCD1", |r, v| r.section_80ccd1 = v, &[
            r"(?im)10\(d\)[\s\S]*?section\s*80CCD\s*\(1\)[\s\S]*?([0-9]+\.?[0-9]{0,2})",
        ]),
        amount("section80CCD1B", |r, v| r.section_80ccd1b = v, &[
            r"(?im)10\(e\)[\s\S]*?section\s*80CCD\s*\(1B\)[\s\S]*?([0-9]+\.?[0-9]{0,2})",
        ]),
        amount("section80CCD2", |r, v| r.section_80ccd2 = v, &[
            r"(?im)10\(f\)[\s\S]*?section\s*80CCD\s*\(2\)[\s\S]*?([0-9]+\.?[0-9]{0,2})",
        ]),
        amount("section80D", |r, v| r.section_80d = v, &[
            r"(?im)10\(g\)[\s\S]*?section\s*80D[\s\S]*?([0-9]+\.?[0-9]{0,2})",
        ]),
        amount("section80DD", |r, v| r.section_80dd = v, &[
            r"(?im)(?:Section\s*)?80DD\s*:?\s*Rs?\.?\s*([0-9][0-9, \t]*)",
        ]),
        amount("section80DDB", |r, v| r.section_80ddb = v, &[
            r"(?im)(?:Section\s*)?80DDB\s*:?\s*Rs?\.?\s*([0-9][0-9, \t]*)",
        ]),
        amount("section80E", |r, v| r.section_80e = v, &[
            r"(?im)(?:Section\s*)?80E\s*:?\s*Rs?\.?\s*([0-9][0-9, \t]*)",
        ]),
        amount("section80G", |r, v| r.section_80g = v, &[
            r"(?im)(?:Section\s*)?80G\s*:?\s*Rs?\.?\s*([0-9][0-9, \t]*)",
        ]),
        amount("section80GG", |r, v| r.section_80gg = v, &[
            r"(?im)(?:Section\s*)?80GG\s*:?\s*Rs?\.?\s*([0-9][0-9, \t]*)",
        ]),
        amount("section80TTA", |r, v| r.section_80tta = v, &[
            r"(?im)(?:Section\s*)?80TTA\s*:?\s*Rs?\.?\s*([0-9][0-9, \t]*)",
        ]),
        amount("section80U", |r, v| r.section_80u = v, &[
            r"(?im)(?:Section\s*)?80U\s*:?\s*Rs?\.?\s*([0-9][0-9, \t]*)",
        ]),
        amount("section24b", |r, v| r.section_24b = v, &[
            r"(?im)(?:Section\s*)?24\(?b\)?\s*:?\s*Rs?\.?\s*([0-9][0-9, \t]*)",
        ]),
        amount("totalDeductions", |r, v| r.total_deductions = v, &[
            r"(?im)(?:9\.?|Total)\s*deductions.*?(?:Chapter\s*VI-A|VIA)\s*.*?Rs?\.?\s*([0-9][0-9, \t]*)",
        ]),
        // ─── Tax computation (items 12 to 21) ────────────────────────────
        amount("taxableIncome", |r, v| r.taxable_income = v, &[
            r"(?im)12\.\s*Total\s*taxable\s*income[\s\S]*?([0-9]{3,}\.?[0-9]{0,2})",
            r"(?im)12\.\s*[\s\S]{0,50}?([0-9]{3,})\.00\s*Total\s*taxable\s*income",
            r"(?im)(?:10\.?|Total)\s*income\s*.*?Rs?\.?\s*([0-9][0-9, \t]*)",
        ])
        .above(0),
        amount("taxOnIncome", |r, v| r.tax_on_income = v, &[
            r"(?im)13\.\s*Tax\s*on\s*total\s*income[\s\S]*?([0-9]+\.?[0-9]{0,2})",
            r"(?im)11\.?\s*Tax\s*on\s*total\s*income\s*.*?Rs?\.?\s*([0-9][0-9, \t]*)",
            r"(?im)13\.\s*[\s\S]{0,50}?([0-9]+)\.00",
        ]),
        amount("rebate87A", |r, v| r.rebate_87a = v, &[
            r"(?im)14\.\s*Rebate\s*under\s*section\s*87A[\s\S]*?([0-9]+\.?[0-9]{0,2})",
        ]),
        amount("surcharge", |r, v| r.surcharge = v, &[
            r"(?im)15\.\s*Surcharge[\s\S]*?([0-9]+\.?[0-9]{0,2})",
        ]),
        amount("healthEducationCess", |r, v| r.health_education_cess = v, &[
            r"(?im)16\.\s*Health\s*and\s*education\s*cess[\s\S]*?([0-9]+\.?[0-9]{0,2})",
            r"(?im)(?:Health\s*(?:and\s*)?Education\s*Cess|Cess)\s*.*?Rs?\.?\s*([0-9][0-9, \t]*)",
        ]),
        amount("totalTaxPayable", |r, v| r.total_tax_payable = v, &[
            r"(?im)17\.\s*Tax\s*payable[\s\S]*?([0-9]+\.?[0-9]{0,2})",
            r"(?im)(?:13\.?|Net\s*tax\s*payable)\s*.*?Rs?\.?\s*([0-9][0-9, \t]*)",
        ]),
        amount("reliefUnder89", |r, v| r.relief_under_89 = v, &[
            r"(?im)18\.\s*Less:\s*Relief\s*under\s*section\s*89[\s\S]*?([0-9]+\.?[0-9]{0,2})",
            r"(?im)12\.?\s*Relief\s*under\s*section\s*89\s*.*?Rs?\.?\s*([0-9][0-9, \t]*)",
        ]),
        amount("tcs12BAA", |r, v| r.tcs_12baa = v, &[
            r"(?im)19\.\s*Less:\s*Tax\s*collected[\s\S]*?([0-9]+\.?[0-9]{0,2})",
        ]),
        amount("tdsDeducted", |r, v| r.tds_deducted = v, &[
            r"(?im)20\.\s*Less:\s*Tax\s*deducted[\s\S]*?([0-9]+\.?[0-9]{0,2})",
            r"(?im)(?:14\.?|Tax\s*deducted\s*at\s*source)\s*.*?Rs?\.?\s*([0-9][0-9, \t]*)",
        ]),
        amount("netTaxPayable", |r, v| r.net_tax_payable = v, &[
            r"(?im)21\.\s*Net\s*tax\s*payable[\s\S]*?([0-9]+\.?[0-9]{0,2})",
        ]),
        // ─── Verification ────────────────────────────────────────────────
        text("verifierName", |r, v| r.verifier_name = v, &[
            r"(?im)I,\s*([A-Z\s]+),\s*son/daughter",
        ]),
        text("verifierDesignation", |r, v| r.verifier_designation = v, &[
            r"(?im)capacity\s*of\s*([A-Z\s]+?)[\n\r]",
        ]),
        text("verificationDate", |r, v| r.verification_date = v, &[
            r"(?im)Date\s+([0-9]{2}-[A-Za-z]{3}-[0-9]{4})",
        ]),
        text("verificationPlace", |r, v| r.verification_place = v, &[
            r"(?im)Place\s+([A-Z\s]+?)[\n\r]",
        ]),
        text("optingOutNewRegime", |r, v| r.opting_out_new_regime = v, &[
            r"(?im)Whether\s*opting\s*out[\s\S]*?115BAC[\s\S]*?\b(Yes|No)\b",
        ]),
    ]
});

/// Item 11 of Part B. Only consulted when neither the total line nor the
/// individual sections yield anything.
pub static DEDUCTIONS_ITEM_11: LazyLock<FieldSpec> = LazyLock::new(|| {
    amount("totalDeductions", |r, v| r.total_deductions = v, &[
        r"(?im)11\.\s*[\s\S]{0,100}?([0-9]+)\.00",
    ])
});

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn spec(name: &str) -> &'static FieldSpec {
        FIELD_SPECS
            .iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("no descriptor named {name}"))
    }

    #[test]
    fn every_pattern_compiles() {
        assert_eq!(FIELD_SPECS.len(), 52);
    }

    #[test]
    #[should_panic(expected = "grossSalary cannot hold")]
    fn applying_the_wrong_kind_panics() {
        let mut record = Form16Record::default();
        spec("grossSalary").apply(&mut record, FieldValue::Text("1,200,000".to_string()));
    }

    #[test]
    fn descriptor_names_are_unique() {
        let mut names: Vec<_> = FIELD_SPECS.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FIELD_SPECS.len());
    }

    #[test]
    fn leading_integer_ignores_commas_spaces_and_fraction() {
        assert_eq!(parse_leading_integer("1200000.00"), Some(dec!(1200000)));
        assert_eq!(parse_leading_integer("1,50,000"), Some(dec!(150000)));
        assert_eq!(parse_leading_integer("25 000 "), Some(dec!(25000)));
        assert_eq!(parse_leading_integer(" , "), None);
        assert_eq!(parse_leading_integer("abc"), None);
    }

    #[test]
    fn gross_salary_from_simple_line() {
        let extraction = spec("grossSalary").extract("Gross Salary\n1200000.00\n");

        assert!(extraction.matched);
        assert_eq!(extraction.value, FieldValue::Amount(dec!(1200000)));
    }

    #[test]
    fn unmatched_amount_defaults_to_zero() {
        let extraction = spec("grossSalary").extract("nothing useful here");

        assert!(!extraction.matched);
        assert_eq!(extraction.value, FieldValue::Amount(Decimal::ZERO));
    }

    #[test]
    fn floor_rejects_small_values() {
        let field = spec("grossTotalIncome");

        assert!(!field.extract("099999.00 Gross total income").matched);
        assert_eq!(
            field.extract("1140000.00\nGross total income").value,
            FieldValue::Amount(dec!(1140000))
        );
    }

    #[test]
    fn short_name_falls_through_to_next_pattern() {
        let text = "Name and address of the Employee/Specified senior citizen\nAB\n\
                    Employee/Specified senior citizen details\nRAHUL KUMAR SHARMA\n";
        let extraction = spec("employeeName").extract(text);

        assert_eq!(extraction.value, FieldValue::Text("RAHUL KUMAR SHARMA".to_string()));
    }

    #[test]
    fn pan_capture_is_case_sensitive() {
        let field = spec("pan");

        assert!(!field.extract("PAN of the Employee/Specified senior citizen\nabcde1234f\n").matched);
        assert_eq!(
            field.extract("PAN of the Employee/Specified senior citizen\nABCDE1234F\n").value,
            FieldValue::Text("ABCDE1234F".to_string())
        );
    }

    #[test]
    fn section_amount_stops_at_line_end() {
        let extraction = spec("section80E").extract("Section 80E: Rs. 40,000\n80G: Rs. 5,000\n");

        assert_eq!(extraction.value, FieldValue::Amount(dec!(40000)));
    }

    #[test]
    fn apply_writes_into_record() {
        let mut record = Form16Record::default();
        spec("pan").apply(&mut record, FieldValue::Text("ABCDE1234F".to_string()));
        spec("section80C").apply(&mut record, FieldValue::Amount(dec!(150000)));

        assert_eq!(record.pan, "ABCDE1234F");
        assert_eq!(record.section_80c, dec!(150000));
    }
}
