//! Fault-isolated invocation of the five processor operations.

use crate::derive;
use crate::processor::{
    DocumentProcessor, Entity, FormField, LocalizedDocument, OcrResult, ProcessorError, Table,
};
use shared_types::ExtractedData;
use tracing::{debug, warn};

/// Per-operation outcomes. Every slot is its own `Result`: one operation
/// failing never hides what the others returned.
#[derive(Debug)]
pub struct RawResults {
    pub ocr: Result<OcrResult, ProcessorError>,
    pub form_fields: Result<Vec<FormField>, ProcessorError>,
    pub entities: Result<Vec<Entity>, ProcessorError>,
    pub localized: Result<LocalizedDocument, ProcessorError>,
    pub tables: Result<Vec<Table>, ProcessorError>,
}

impl RawResults {
    pub fn collect<P: DocumentProcessor>(processor: &P, bytes: &[u8]) -> Self {
        Self {
            ocr: capture("ocr", processor.ocr(bytes)),
            form_fields: capture("parse_form", processor.parse_form(bytes)),
            entities: capture("extract_entities", processor.extract_entities(bytes)),
            localized: capture(
                "extract_localized_document",
                processor.extract_localized_document(bytes),
            ),
            tables: capture("extract_tables", processor.extract_tables(bytes)),
        }
    }
}

fn capture<T>(operation: &str, result: Result<T, ProcessorError>) -> Result<T, ProcessorError> {
    match &result {
        Ok(_) => debug!(operation, "processor operation succeeded"),
        Err(e) => warn!(operation, error = %e, "processor operation failed"),
    }
    result
}

/// Primary extraction strategy: run all five operations, then derive
/// structured candidate data from whatever succeeded
pub struct PrimaryStrategy<P> {
    processor: P,
}

impl<P: DocumentProcessor> PrimaryStrategy<P> {
    pub fn new(processor: P) -> Self {
        Self { processor }
    }

    /// All five operations failing yields empty results, not an error;
    /// the caller's fallback strategy still runs.
    pub fn run(&self, bytes: &[u8]) -> ExtractedData {
        let raw = RawResults::collect(&self.processor, bytes);
        ExtractedData {
            personal: derive::personal_data(&raw),
            links: derive::employment_links(&raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Processor whose every operation fails
    struct BrokenProcessor;

    impl DocumentProcessor for BrokenProcessor {
        fn ocr(&self, _: &[u8]) -> Result<OcrResult, ProcessorError> {
            Err(ProcessorError::Timeout(60))
        }
        fn parse_form(&self, _: &[u8]) -> Result<Vec<FormField>, ProcessorError> {
            Err(ProcessorError::MissingCredentials("no key file".to_string()))
        }
        fn extract_entities(&self, _: &[u8]) -> Result<Vec<Entity>, ProcessorError> {
            Err(ProcessorError::MalformedResponse("truncated".to_string()))
        }
        fn extract_localized_document(
            &self,
            _: &[u8],
        ) -> Result<LocalizedDocument, ProcessorError> {
            Err(ProcessorError::Backend("503".to_string()))
        }
        fn extract_tables(&self, _: &[u8]) -> Result<Vec<Table>, ProcessorError> {
            Err(ProcessorError::Backend("503".to_string()))
        }
    }

    /// Entities succeed, everything else fails
    struct EntitiesOnlyProcessor;

    impl DocumentProcessor for EntitiesOnlyProcessor {
        fn ocr(&self, _: &[u8]) -> Result<OcrResult, ProcessorError> {
            Err(ProcessorError::Timeout(60))
        }
        fn parse_form(&self, _: &[u8]) -> Result<Vec<FormField>, ProcessorError> {
            Err(ProcessorError::Timeout(60))
        }
        fn extract_entities(&self, _: &[u8]) -> Result<Vec<Entity>, ProcessorError> {
            Ok(vec![Entity {
                entity_type: "CPF".to_string(),
                text: "123.456.789-01".to_string(),
                confidence: 0.99,
            }])
        }
        fn extract_localized_document(
            &self,
            _: &[u8],
        ) -> Result<LocalizedDocument, ProcessorError> {
            Err(ProcessorError::Timeout(60))
        }
        fn extract_tables(&self, _: &[u8]) -> Result<Vec<Table>, ProcessorError> {
            Err(ProcessorError::Timeout(60))
        }
    }

    #[test]
    fn test_all_operations_failing_yields_empty_results() {
        let data = PrimaryStrategy::new(BrokenProcessor).run(b"pdf bytes");
        assert!(data.personal.is_empty());
        assert!(data.links.is_empty());
    }

    #[test]
    fn test_one_operation_failure_does_not_hide_the_others() {
        let data = PrimaryStrategy::new(EntitiesOnlyProcessor).run(b"pdf bytes");
        assert_eq!(data.personal.cpf.as_deref(), Some("123.456.789-01"));
    }
}
