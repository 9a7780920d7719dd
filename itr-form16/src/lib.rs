//! Form-16 salary certificate extraction.
//!
//! Text goes in through a [`TextSource`], [`Form16FieldParser`] turns it
//! into a [`Form16Record`] and [`ExtractionValidator`] decides whether the
//! record is usable. [`Form16Record::to_tax_input`] bridges to `itr-core`.

pub mod error;
pub mod fields;
pub mod parser;
pub mod record;
pub mod source;
pub mod validator;

pub use error::Form16Error;
pub use parser::{Form16FieldParser, TOTAL_FIELDS};
pub use record::{ExtractionMetadata, Form16Record, Form16Text};
pub use source::{Form16Outcome, Form16Processor, PlainTextSource, TextSource};
pub use validator::{
    CONSISTENCY_TOLERANCE, ConsistencyReport, ConsistencySummary, DeclaredIncome,
    ExtractionValidator, Mismatch, MismatchSeverity, PanCheck, ValidationResult,
    check_document_consistency, validate_pan,
};
