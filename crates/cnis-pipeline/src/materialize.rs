//! Materialization of merged employment links into persisted case records.

use crate::store::EmploymentRecordStore;
use shared_types::{CaseEmploymentRecord, EmploymentLink};
use tracing::{debug, warn};

/// Audit note distinguishing automatic extraction from manual entry
pub const AUTO_EXTRACTION_NOTE: &str = "Vínculo extraído automaticamente do CNIS";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct MaterializeOutcome {
    pub created: usize,
    pub failures: usize,
}

/// Create one record per valid link. Invalid links (no employer, no
/// parseable start date) are skipped; a store failure is reported for that
/// record only and the loop continues. There is no rollback.
pub fn materialize_links<S: EmploymentRecordStore>(
    case_id: i64,
    links: &[EmploymentLink],
    store: &mut S,
) -> MaterializeOutcome {
    let mut outcome = MaterializeOutcome::default();

    for link in links {
        let Some(start_date) = link.start_date() else {
            debug!(employer = %link.employer, "skipping link without parseable start date");
            continue;
        };
        if link.employer.trim().is_empty() {
            debug!("skipping link without employer name");
            continue;
        }

        let record = CaseEmploymentRecord {
            case_id,
            employer_name: link.employer.clone(),
            employer_cnpj: link.cnpj.clone(),
            start_date,
            end_date: link.end_date(),
            salary: link.salary,
            is_active: true,
            notes: AUTO_EXTRACTION_NOTE.to_string(),
        };

        match store.create(record) {
            Ok(id) => {
                debug!(id, employer = %link.employer, "employment record created");
                outcome.created += 1;
            }
            Err(e) => {
                warn!(employer = %link.employer, error = %e, "employment record creation failed");
                outcome.failures += 1;
            }
        }
    }

    outcome
}
