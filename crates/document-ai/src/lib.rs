//! Primary extraction strategy: structured candidate data from an external
//! document-understanding capability.
//!
//! The capability exposes five independent operations (OCR, form parsing,
//! entity extraction, a Brazilian-document parser, table extraction). Each is
//! invoked on its own and may fail without aborting the others; derivation
//! then works off whatever subset succeeded.

pub mod derive;
pub mod processor;
pub mod strategy;

pub use processor::{
    DocumentProcessor, Entity, FormField, LocalizedDocument, OcrResult, ProcessorConfig,
    ProcessorError, Table,
};
pub use strategy::{PrimaryStrategy, RawResults};
