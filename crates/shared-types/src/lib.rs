pub mod types;

pub use types::{
    BenefitType, CaseEmploymentRecord, EmploymentLink, ExtractedData, PersonalData, SourceDocument,
};
