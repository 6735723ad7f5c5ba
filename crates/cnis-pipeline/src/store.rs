//! Boundary to the case's employment-record store.
//!
//! Persistence belongs to the surrounding system; the pipeline only needs a
//! way to create records one at a time. No deduplication against prior runs
//! and no batch transaction: re-running extraction on the same document
//! produces duplicate records.

use crate::error::StoreError;
use shared_types::CaseEmploymentRecord;

pub trait EmploymentRecordStore {
    /// Create one record, returning its assigned id
    fn create(&mut self, record: CaseEmploymentRecord) -> Result<u64, StoreError>;
}

/// In-memory store used by tests and offline runs
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Vec<CaseEmploymentRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[CaseEmploymentRecord] {
        &self.records
    }
}

impl EmploymentRecordStore for InMemoryStore {
    fn create(&mut self, record: CaseEmploymentRecord) -> Result<u64, StoreError> {
        self.records.push(record);
        Ok(self.records.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_in_memory_store_assigns_sequential_ids() {
        let record = CaseEmploymentRecord {
            case_id: 7,
            employer_name: "ACME LTDA".to_string(),
            employer_cnpj: None,
            start_date: NaiveDate::from_ymd_opt(2010, 3, 1).unwrap(),
            end_date: None,
            salary: None,
            is_active: true,
            notes: String::new(),
        };

        let mut store = InMemoryStore::new();
        assert_eq!(store.create(record.clone()).unwrap(), 1);
        assert_eq!(store.create(record).unwrap(), 2);
        assert_eq!(store.records().len(), 2);
    }
}
