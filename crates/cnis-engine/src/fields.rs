//! Per-section field extraction: employer identity, date range, compensation.

use crate::dates::{month_year_to_full, parse_amount};
use crate::patterns::{
    ExtractorConfig, CNPJ_RE, DATE_MONTH_YEAR_RE, DATE_PAIR_RE, EMPLOYER_LINE_RE, FULL_DATE_RE,
    MONTH_YEAR_RE, NUMBERED_LINE_RE, NUMERIC_ONLY_RE, SALARY_PAIR_RE,
};
use shared_types::EmploymentLink;
use tracing::debug;

/// How many lines below the employer row may carry its relationship type
const LINK_TYPE_WINDOW: usize = 5;

/// Extract one employment link from a raw record block.
///
/// Returns `None` for noise rows: blocks without an employer line, without a
/// relationship-type keyword nearby, or whose captured name is empty, purely
/// numeric, or carries a noise marker.
pub fn extract_link_from_section(
    section: &[String],
    config: &ExtractorConfig,
) -> Option<EmploymentLink> {
    let (row, employer, cnpj) = find_employer(section, config)?;

    if !has_link_type_nearby(section, row, config) {
        debug!(employer = %employer, "discarding block without relationship type");
        return None;
    }
    if employer.is_empty()
        || NUMERIC_ONLY_RE.is_match(&employer)
        || config.noise_markers.iter().any(|m| employer.contains(m))
    {
        debug!(employer = %employer, "discarding noise row");
        return None;
    }

    let (start, end) = extract_dates(section);
    Some(EmploymentLink {
        employer,
        cnpj,
        start,
        end,
        salary: extract_salary(section),
        last_salary_reference: extract_last_salary_reference(section, config),
    })
}

/// Locate the employer row: either `index entity-id name` or a
/// grouping-keyword row whose remainder is the name
fn find_employer(
    section: &[String],
    config: &ExtractorConfig,
) -> Option<(usize, String, Option<String>)> {
    for (i, line) in section.iter().enumerate() {
        if let Some(caps) = EMPLOYER_LINE_RE.captures(line) {
            return Some((i, caps[2].trim().to_string(), Some(caps[1].to_string())));
        }
        if let Some(caps) = NUMBERED_LINE_RE.captures(line) {
            let rest = &caps[1];
            if rest.contains(&config.grouping_keyword) {
                return Some((i, clean_grouped_name(rest, config), None));
            }
        }
    }
    None
}

/// Strip the trailing classification phrase and any embedded entity id from
/// a grouped employer name
fn clean_grouped_name(raw: &str, config: &ExtractorConfig) -> String {
    let lower = raw.to_lowercase();
    let mut cut = raw.len();
    for suffix in &config.classification_suffixes {
        if let Some(pos) = lower.find(&suffix.to_lowercase()) {
            cut = cut.min(pos);
        }
    }
    let truncated = raw.get(..cut).unwrap_or(raw);
    let without_cnpj = CNPJ_RE.replace_all(truncated, "");
    without_cnpj.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A real link names its relationship type within the next few lines
fn has_link_type_nearby(section: &[String], row: usize, config: &ExtractorConfig) -> bool {
    section
        .iter()
        .skip(row + 1)
        .take(LINK_TYPE_WINDOW)
        .any(|line| {
            let lower = line.to_lowercase();
            config
                .link_type_keywords
                .iter()
                .any(|kw| lower.contains(&kw.to_lowercase()))
        })
}

/// Ordered date cascade: a start/end pair on one line, then a full date with
/// a month/year end reference, then lone full dates filling start before end
fn extract_dates(section: &[String]) -> (Option<String>, Option<String>) {
    let mut start: Option<String> = None;
    let mut end: Option<String> = None;

    for line in section {
        if start.is_some() && end.is_some() {
            break;
        }

        if start.is_none() {
            if let Some(caps) = DATE_PAIR_RE.captures(line) {
                start = Some(caps[1].to_string());
                end = Some(caps[2].to_string());
                continue;
            }
            if let Some(caps) = DATE_MONTH_YEAR_RE.captures(line) {
                if let Some(month_end) = month_year_to_full(&caps[2]) {
                    start = Some(caps[1].to_string());
                    end = Some(month_end);
                    continue;
                }
            }
        }

        for found in FULL_DATE_RE.find_iter(line) {
            let value = found.as_str();
            if start.is_none() {
                start = Some(value.to_string());
            } else if end.is_none() && start.as_deref() != Some(value) {
                end = Some(value.to_string());
            }
        }
    }

    (start, end)
}

/// Labeled month/year of the last recorded compensation, kept as metadata
fn extract_last_salary_reference(section: &[String], config: &ExtractorConfig) -> Option<String> {
    let label = config.last_salary_label.to_lowercase();
    for line in section {
        if line.to_lowercase().contains(&label) {
            if let Some(caps) = MONTH_YEAR_RE.captures(line) {
                return Some(caps[1].to_string());
            }
        }
    }
    None
}

/// Most recent `mm/yyyy amount` pair in the block wins
fn extract_salary(section: &[String]) -> Option<f64> {
    let mut salary = None;
    for line in section {
        for caps in SALARY_PAIR_RE.captures_iter(line) {
            if let Some(value) = parse_amount(&caps[2]) {
                salary = Some(value);
            }
        }
    }
    salary
}
