//! Text acquisition: raw statement bytes to a single text blob.

use crate::error::PipelineError;
use shared_types::SourceDocument;
use tracing::{debug, warn};

/// Extract the document's text according to its declared media type.
///
/// PDF documents use the embedded text layer, page by page in document
/// order. Plain text is read directly. Anything else is read as text on a
/// best-effort basis with no transcoding guarantees.
pub fn extract_text(document: &SourceDocument) -> Result<String, PipelineError> {
    if document.content.is_empty() {
        return Err(PipelineError::FileUnreadable(
            "document has no content".to_string(),
        ));
    }

    let text = if document.media_type.contains("pdf") {
        match pdf_extract::extract_text_from_mem(&document.content) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "pdf text layer extraction failed");
                return Err(PipelineError::NoTextExtracted);
            }
        }
    } else if document.media_type.contains("text") || document.media_type.contains("plain") {
        String::from_utf8_lossy(&document.content).into_owned()
    } else {
        debug!(media_type = %document.media_type, "unknown media type, reading bytes as text");
        String::from_utf8_lossy(&document.content).into_owned()
    };

    if text.trim().is_empty() {
        return Err(PipelineError::NoTextExtracted);
    }

    debug!(length = text.len(), "text acquired");
    Ok(text)
}
