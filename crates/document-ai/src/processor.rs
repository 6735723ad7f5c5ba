//! The external document-understanding boundary.
//!
//! Five independent operations over raw document bytes. Any backend that can
//! honor them implements [`DocumentProcessor`]; tests use deterministic
//! stubs. Each operation fails on its own; isolation across operations is
//! handled by the strategy layer, not here.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ProcessorError {
    #[error("operation timed out after {0}s")]
    Timeout(u64),

    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("backend failure: {0}")]
    Backend(String),
}

/// Generic OCR output: full text plus the number of recognized pages
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct OcrResult {
    pub text: String,
    pub page_count: usize,
}

/// One parsed form field with the backend's confidence score
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
    pub confidence: f32,
}

/// One extracted entity mention
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Entity {
    pub entity_type: String,
    pub text: String,
    pub confidence: f32,
}

/// Output of the document-family-specific (Brazilian) parser
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct LocalizedDocument {
    pub entities: Vec<Entity>,
    pub form_fields: Vec<FormField>,
}

/// One extracted table, body rows only
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

pub trait DocumentProcessor {
    fn ocr(&self, bytes: &[u8]) -> Result<OcrResult, ProcessorError>;
    fn parse_form(&self, bytes: &[u8]) -> Result<Vec<FormField>, ProcessorError>;
    fn extract_entities(&self, bytes: &[u8]) -> Result<Vec<Entity>, ProcessorError>;
    fn extract_localized_document(&self, bytes: &[u8])
        -> Result<LocalizedDocument, ProcessorError>;
    fn extract_tables(&self, bytes: &[u8]) -> Result<Vec<Table>, ProcessorError>;
}

/// Backend addressing configuration for a hosted document-AI service
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProcessorConfig {
    pub project_id: String,
    pub location: String,
    pub ocr_processor: String,
    pub form_processor: String,
    pub entity_processor: String,
    pub localized_processor: String,
    pub table_processor: String,
    pub timeout_secs: u64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            project_id: "cnis-document-ai".to_string(),
            location: "us".to_string(),
            ocr_processor: "ocr-processor".to_string(),
            form_processor: "form-parser".to_string(),
            entity_processor: "entity-extractor".to_string(),
            localized_processor: "brazilian-document-processor".to_string(),
            table_processor: "table-extractor".to_string(),
            timeout_secs: 60,
        }
    }
}

impl ProcessorConfig {
    /// Fully-qualified resource name for one processor id
    pub fn resource_name(&self, processor_id: &str) -> String {
        format!(
            "projects/{}/locations/{}/processors/{}",
            self.project_id, self.location, processor_id
        )
    }
}
