//! Benefit-type heuristic over total contribution time.
//!
//! Advisory only: this suggests a classification for the case file, it is
//! not a legal determination.

use chrono::NaiveDate;
use shared_types::{BenefitType, EmploymentLink};

/// Total contribution time across all links, in fractional years. Links
/// without an end date count until `today`.
pub fn total_contribution_years(links: &[EmploymentLink], today: NaiveDate) -> f64 {
    links
        .iter()
        .filter_map(|link| link.duration_years(today))
        .sum()
}

/// ≥35 years: length-of-service; ≥30 years: teacher; otherwise age-based.
/// Both boundaries are inclusive.
pub fn classify(total_years: f64) -> BenefitType {
    if total_years >= 35.0 {
        BenefitType::LengthOfService
    } else if total_years >= 30.0 {
        BenefitType::Teacher
    } else {
        BenefitType::Age
    }
}

pub fn suggest_benefit_type(links: &[EmploymentLink], today: NaiveDate) -> BenefitType {
    classify(total_contribution_years(links, today))
}
