//! End-to-end CNIS extraction pipeline.
//!
//! One invocation processes one statement: acquire text, run the external
//! document-AI strategy and the local heuristic strategy, merge their
//! outputs, materialize employment records against the case, and suggest a
//! benefit type. Only text acquisition can fail the run; every strategy
//! failure degrades to empty output.

pub mod benefit;
pub mod combine;
pub mod error;
pub mod materialize;
pub mod store;
pub mod text;

use chrono::Utc;
use cnis_engine::{ExtractorConfig, HeuristicExtractor};
use document_ai::{DocumentProcessor, PrimaryStrategy};
use shared_types::{BenefitType, EmploymentLink, PersonalData, SourceDocument};
use tracing::info;

pub use error::{PipelineError, StoreError};
pub use store::{EmploymentRecordStore, InMemoryStore};

/// Structured result returned to the caller
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PipelineOutput {
    pub personal_data: PersonalData,
    pub suggested_benefit_type: BenefitType,
    pub employment_links: Vec<EmploymentLink>,
    pub records_created: usize,
    pub persistence_failures: usize,
}

pub struct CnisPipeline<P, S> {
    primary: PrimaryStrategy<P>,
    fallback: HeuristicExtractor,
    store: S,
}

impl<P: DocumentProcessor, S: EmploymentRecordStore> CnisPipeline<P, S> {
    pub fn new(processor: P, store: S) -> Self {
        Self::with_config(processor, store, ExtractorConfig::default())
    }

    pub fn with_config(processor: P, store: S, config: ExtractorConfig) -> Self {
        Self {
            primary: PrimaryStrategy::new(processor),
            fallback: HeuristicExtractor::new(config),
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Process one statement end to end.
    ///
    /// Fatal errors surface only from text acquisition; afterwards the run
    /// always completes, with per-record persistence failures counted in
    /// the output rather than raised.
    pub fn process(&mut self, document: &SourceDocument) -> Result<PipelineOutput, PipelineError> {
        let text = text::extract_text(document)?;
        info!(
            case_id = document.case_id,
            text_length = text.len(),
            "processing CNIS document"
        );

        let primary = self.primary.run(&document.content);
        let fallback = self.fallback.extract(&text);
        let merged = combine::merge_strategies(primary, fallback);

        let outcome = materialize::materialize_links(document.case_id, &merged.links, &mut self.store);
        let today = Utc::now().date_naive();
        let suggested = benefit::suggest_benefit_type(&merged.links, today);

        info!(
            case_id = document.case_id,
            links = merged.links.len(),
            records_created = outcome.created,
            benefit_type = %suggested,
            "CNIS processing finished"
        );

        Ok(PipelineOutput {
            personal_data: merged.personal,
            suggested_benefit_type: suggested,
            employment_links: merged.links,
            records_created: outcome.created,
            persistence_failures: outcome.failures,
        })
    }
}
