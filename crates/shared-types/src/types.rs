use chrono::{Datelike, NaiveDate};
use std::path::Path;

/// Date format used throughout CNIS statements
pub const BR_DATE_FORMAT: &str = "%d/%m/%Y";

/// An uploaded contribution statement, immutable once acquired
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SourceDocument {
    pub case_id: i64,
    pub content: Vec<u8>,
    pub media_type: String,
}

impl SourceDocument {
    pub fn new(case_id: i64, content: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            case_id,
            content,
            media_type: media_type.into(),
        }
    }

    /// Read a document from disk with its declared media type
    pub fn from_path(
        case_id: i64,
        path: impl AsRef<Path>,
        media_type: impl Into<String>,
    ) -> std::io::Result<Self> {
        let content = std::fs::read(path)?;
        Ok(Self::new(case_id, content, media_type))
    }
}

/// Identity fields extracted from a statement; every field is independently
/// optional and absence is not an error
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PersonalData {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub birth_date: Option<String>,
}

impl PersonalData {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.cpf.is_none() && self.birth_date.is_none()
    }
}

/// One employer relationship ("vínculo") from a CNIS statement.
///
/// Dates are kept as `dd/mm/yyyy` strings exactly as extracted; use the
/// typed accessors for calendar math. A missing end date means the link is
/// still active, never that the date failed to parse.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EmploymentLink {
    pub employer: String,
    pub cnpj: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub salary: Option<f64>,
    pub last_salary_reference: Option<String>,
}

impl EmploymentLink {
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, BR_DATE_FORMAT).ok())
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, BR_DATE_FORMAT).ok())
    }

    /// A link is materializable only with a named employer and a parseable
    /// start date
    pub fn is_valid(&self) -> bool {
        !self.employer.trim().is_empty() && self.start_date().is_some()
    }

    /// Contribution time in fractional years, counting until `today` when the
    /// link has no end date
    pub fn duration_years(&self, today: NaiveDate) -> Option<f64> {
        let start = self.start_date()?;
        let end = self.end_date().unwrap_or(today);
        if end < start {
            return None;
        }

        let mut years = end.year() - start.year();
        let mut months = end.month() as i32 - start.month() as i32;
        let mut days = end.day() as i32 - start.day() as i32;

        if days < 0 {
            months -= 1;
            let (py, pm) = if end.month() == 1 {
                (end.year() - 1, 12)
            } else {
                (end.year(), end.month() - 1)
            };
            days += days_in_month(py, pm);
        }
        if months < 0 {
            years -= 1;
            months += 12;
        }

        Some(years as f64 + months as f64 / 12.0 + days as f64 / 365.0)
    }
}

fn days_in_month(year: i32, month: u32) -> i32 {
    let first = match month {
        12 => NaiveDate::from_ymd_opt(year + 1, 1, 1),
        _ => NaiveDate::from_ymd_opt(year, month + 1, 1),
    };
    first
        .and_then(|d| d.pred_opt())
        .map(|d| d.day() as i32)
        .unwrap_or(30)
}

/// Per-strategy extraction output, consumed by the result combiner
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExtractedData {
    pub personal: PersonalData,
    pub links: Vec<EmploymentLink>,
}

/// Persisted employment record, created once per materialized link and owned
/// by case management afterwards
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaseEmploymentRecord {
    pub case_id: i64,
    pub employer_name: String,
    pub employer_cnpj: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub is_active: bool,
    pub notes: String,
}

/// Advisory benefit classification derived from total contribution time
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BenefitType {
    #[serde(rename = "aposentadoria_por_tempo_contribuicao")]
    LengthOfService,
    #[serde(rename = "aposentadoria_professor")]
    Teacher,
    #[serde(rename = "aposentadoria_por_idade")]
    Age,
}

impl BenefitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BenefitType::LengthOfService => "aposentadoria_por_tempo_contribuicao",
            BenefitType::Teacher => "aposentadoria_professor",
            BenefitType::Age => "aposentadoria_por_idade",
        }
    }
}

impl std::fmt::Display for BenefitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
