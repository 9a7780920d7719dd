use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Form16Error;
use crate::parser::Form16FieldParser;
use crate::record::{Form16Record, Form16Text};
use crate::validator::{ExtractionValidator, ValidationResult};

/// Anything that can hand over the text of a Form-16 certificate.
///
/// PDF conversion lives outside this crate. A converter only has to
/// implement this trait to feed [`Form16Processor`].
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn extract_text(&self) -> Result<Form16Text, Form16Error>;
}

/// Reads already-converted text from disk.
#[derive(Debug, Clone)]
pub struct PlainTextSource {
    path: PathBuf,
}

impl PlainTextSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TextSource for PlainTextSource {
    async fn extract_text(&self) -> Result<Form16Text, Form16Error> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| Form16Error::Io {
                path: self.path.clone(),
                source,
            })?;

        if text.trim().is_empty() {
            return Err(Form16Error::Extraction(format!(
                "{} contains no text",
                self.path.display()
            )));
        }

        debug!(path = %self.path.display(), bytes = text.len(), "form-16 text loaded");
        Ok(Form16Text::Plain(text))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Form16Outcome {
    pub record: Form16Record,
    pub validation: ValidationResult,
}

/// Source → parse → validate.
pub struct Form16Processor<S> {
    source: S,
}

impl<S: TextSource> Form16Processor<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn process(&self) -> Result<Form16Outcome, Form16Error> {
        let text = self.source.extract_text().await?;
        let record = Form16FieldParser::parse(&text);
        let validation = ExtractionValidator::validate(&record);

        if !validation.is_valid {
            warn!(errors = ?validation.errors, "form-16 extraction incomplete");
        }

        Ok(Form16Outcome { record, validation })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    struct FixedText(&'static str);

    #[async_trait]
    impl TextSource for FixedText {
        async fn extract_text(&self) -> Result<Form16Text, Form16Error> {
            Ok(Form16Text::from(self.0))
        }
    }

    struct Failing;

    #[async_trait]
    impl TextSource for Failing {
        async fn extract_text(&self) -> Result<Form16Text, Form16Error> {
            Err(Form16Error::Extraction("scanned image, no text layer".to_string()))
        }
    }

    #[tokio::test]
    async fn processor_parses_and_validates() {
        let processor = Form16Processor::new(FixedText("Gross Salary 1200000.00\n"));

        let outcome = processor.process().await.unwrap();

        assert_eq!(outcome.record.gross_salary, dec!(1200000));
        assert_eq!(outcome.validation.errors, vec!["Invalid or missing PAN number"]);
    }

    #[tokio::test]
    async fn processor_propagates_source_errors() {
        let err = Form16Processor::new(Failing).process().await.unwrap_err();

        assert!(matches!(err, Form16Error::Extraction(_)));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let source = PlainTextSource::new("/nonexistent/form16.txt");

        let err = source.extract_text().await.unwrap_err();

        assert!(err.to_string().starts_with("Could not read /nonexistent/form16.txt"));
    }
}
