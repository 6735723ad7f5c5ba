//! Pattern tables driving the heuristic extractor.
//!
//! The fixed regexes live here as compiled constants; the keywords that vary
//! between statement layouts live in [`ExtractorConfig`] so the extractor
//! stays a pure function of (text, config).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// 14-character legal-entity id: NN.NNN.NNN/NNNN-NN
    pub static ref CNPJ_RE: Regex = Regex::new(r"\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}").unwrap();

    /// Full Brazilian date dd/mm/yyyy
    pub static ref FULL_DATE_RE: Regex = Regex::new(r"\d{2}/\d{2}/\d{4}").unwrap();

    /// Numeric-prefixed line: record index followed by the rest of the row
    pub static ref NUMBERED_LINE_RE: Regex = Regex::new(r"^\d+\s+(.+)$").unwrap();

    /// Record row carrying index, entity id and employer name in one line
    pub static ref EMPLOYER_LINE_RE: Regex =
        Regex::new(r"^\d+\s+(\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2})\s+(.+)$").unwrap();

    /// Two full dates on one line: start and end of a link
    pub static ref DATE_PAIR_RE: Regex =
        Regex::new(r"(\d{2}/\d{2}/\d{4})\s+(\d{2}/\d{2}/\d{4})").unwrap();

    /// Full start date followed by a month/year end reference
    pub static ref DATE_MONTH_YEAR_RE: Regex =
        Regex::new(r"(\d{2}/\d{2}/\d{4})\s+(\d{2}/\d{4})(?:\s|$)").unwrap();

    /// Month/year competência followed by a comma-decimal amount
    pub static ref SALARY_PAIR_RE: Regex =
        Regex::new(r"(\d{2}/\d{4})\s+((?:\d{1,3}(?:\.\d{3})*|\d+),\d{2})").unwrap();

    /// Bare month/year reference
    pub static ref MONTH_YEAR_RE: Regex = Regex::new(r"(\d{2}/\d{4})").unwrap();

    /// Characters stripped out of candidate person names
    pub static ref NAME_NOISE_RE: Regex = Regex::new(r"[0-9\-_\.]").unwrap();

    /// Rows that are all digits and separators carry no employer name
    pub static ref NUMERIC_ONLY_RE: Regex = Regex::new(r"^[0-9,\./\-\s]+$").unwrap();
}

/// One ordered extraction rule: first match wins within its table
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: &'static str,
    pub pattern: Regex,
}

impl FieldRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("invalid extraction rule"),
        }
    }
}

/// Evaluate an ordered rule table, returning the first rule that captures
pub fn first_capture<'r>(rules: &'r [FieldRule], text: &str) -> Option<(&'r FieldRule, String)> {
    for rule in rules {
        if let Some(caps) = rule.pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                return Some((rule, m.as_str().to_string()));
            }
        }
    }
    None
}

/// Immutable pattern configuration for one extractor instance.
///
/// `Default` carries the standard CNIS tables; tests can swap in reduced
/// tables to exercise individual rules.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub cpf_rules: Vec<FieldRule>,
    pub name_rules: Vec<FieldRule>,
    pub birth_date_rules: Vec<FieldRule>,

    /// Literal header keyword opening a record block ("Código Emp.")
    pub record_header: String,
    /// Keyword marking grouped records without their own entity id
    pub grouping_keyword: String,
    /// Section-header phrases that close the employment-history area
    pub closing_phrases: Vec<String>,
    /// A real link must name one of these relationship types near its header
    pub link_type_keywords: Vec<String>,
    /// Rows carrying this marker are noise, not employment records
    pub noise_markers: Vec<String>,
    /// Trailing classification phrases stripped from grouped employer names
    pub classification_suffixes: Vec<String>,
    /// Label preceding the last-compensation month/year reference
    pub last_salary_label: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            cpf_rules: vec![
                FieldRule::new("cpf-labeled", r"CPF[:\s]*(\d{3}\.\d{3}\.\d{3}-\d{2})"),
                FieldRule::new("cpf-bare", r"(\d{3}\.\d{3}\.\d{3}-\d{2})"),
                FieldRule::new("cpf-labeled-digits", r"CPF[:\s]*(\d{11})\b"),
                FieldRule::new("cpf-bare-digits", r"\b(\d{11})\b"),
            ],
            name_rules: vec![
                FieldRule::new("name-nome", r"(?i)NOME[:\s]*([^\n\r]+)"),
                FieldRule::new("name-cliente", r"(?i)CLIENTE[:\s]*([^\n\r]+)"),
                FieldRule::new("name-servidor", r"(?i)SERVIDOR[:\s]*([^\n\r]+)"),
                FieldRule::new("name-beneficiario", r"(?i)BENEFICI[ÁA]RIO[:\s]*([^\n\r]+)"),
                FieldRule::new("name-titular", r"(?i)TITULAR[:\s]*([^\n\r]+)"),
            ],
            birth_date_rules: vec![
                FieldRule::new("birth-nascimento", r"NASCIMENTO[:\s]*(\d{2}/\d{2}/\d{4})"),
                FieldRule::new("birth-nasc", r"NASC[:\s]*(\d{2}/\d{2}/\d{4})"),
                FieldRule::new("birth-data-nasc", r"DATA[:\s]*NASC[:\s]*(\d{2}/\d{2}/\d{4})"),
                FieldRule::new(
                    "birth-data-nascimento",
                    r"(?i)Data de nascimento[:\s]*(\d{2}/\d{2}/\d{4})",
                ),
            ],
            record_header: "Código Emp.".to_string(),
            grouping_keyword: "AGRUPAMENTO".to_string(),
            closing_phrases: vec![
                "Relações Previdenciárias".to_string(),
                "Valores Consolidados".to_string(),
            ],
            link_type_keywords: vec![
                "Empregado".to_string(),
                "Contribuinte Individual".to_string(),
                "Trabalhador".to_string(),
                "Público".to_string(),
                "Cooperativa".to_string(),
            ],
            noise_markers: vec!["Não Cooperado".to_string()],
            classification_suffixes: vec![
                "Empregado ou Agente".to_string(),
                "Contribuinte Individual".to_string(),
            ],
            last_salary_label: "Última remuneração".to_string(),
        }
    }
}
