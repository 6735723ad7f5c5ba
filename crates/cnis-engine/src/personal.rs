//! Ordered-rule extraction of the statement holder's identity fields.

use crate::patterns::{first_capture, ExtractorConfig, NAME_NOISE_RE};
use shared_types::PersonalData;
use tracing::debug;

pub fn extract_personal_data(text: &str, config: &ExtractorConfig) -> PersonalData {
    PersonalData {
        name: extract_name(text, config),
        cpf: extract_cpf(text, config),
        birth_date: extract_birth_date(text, config),
    }
}

fn extract_cpf(text: &str, config: &ExtractorConfig) -> Option<String> {
    let (rule, raw) = first_capture(&config.cpf_rules, text)?;
    debug!(rule = rule.name, "cpf rule matched");
    Some(normalize_cpf(&raw))
}

/// Canonical CPF grouping: an unformatted 11-digit run becomes XXX.XXX.XXX-XX
pub fn normalize_cpf(raw: &str) -> String {
    if raw.len() == 11 && raw.chars().all(|c| c.is_ascii_digit()) {
        format!("{}.{}.{}-{}", &raw[..3], &raw[3..6], &raw[6..9], &raw[9..])
    } else {
        raw.to_string()
    }
}

fn extract_name(text: &str, config: &ExtractorConfig) -> Option<String> {
    for rule in &config.name_rules {
        let Some(caps) = rule.pattern.captures(text) else {
            continue;
        };
        let Some(raw) = caps.get(1) else { continue };

        let cleaned = NAME_NOISE_RE.replace_all(raw.as_str(), "");
        let cleaned = cleaned.trim();
        if cleaned.chars().count() > 3 && !cleaned.chars().all(|c| c.is_ascii_digit()) {
            debug!(rule = rule.name, "name rule matched");
            return Some(cleaned.to_string());
        }
        // Too short after cleanup: keep trying later rules
    }
    None
}

fn extract_birth_date(text: &str, config: &ExtractorConfig) -> Option<String> {
    let (rule, value) = first_capture(&config.birth_date_rules, text)?;
    debug!(rule = rule.name, "birth date rule matched");
    Some(value)
}
