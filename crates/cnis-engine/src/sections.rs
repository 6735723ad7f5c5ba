//! Line-based segmentation of the employment-history area.
//!
//! Record boundaries are purely line-pattern-driven: a block opens on a
//! record-header keyword or a numbered row carrying an entity id or the
//! grouping keyword, and runs until a closing section header or the next
//! opening line.

use crate::patterns::{ExtractorConfig, CNPJ_RE, NUMBERED_LINE_RE};
use tracing::debug;

/// One raw record block: the trimmed lines between two boundaries
pub type Section = Vec<String>;

pub fn split_sections(text: &str, config: &ExtractorConfig) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for raw_line in text.lines() {
        let line = raw_line.trim();

        if is_opening_line(line, config) {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            current = Some(vec![line.to_string()]);
            continue;
        }

        if current.is_some() && is_closing_line(line, config) {
            if let Some(section) = current.take() {
                sections.push(section);
            }
        } else if let Some(section) = current.as_mut() {
            section.push(line.to_string());
        }
    }

    if let Some(section) = current.take() {
        sections.push(section);
    }

    debug!(count = sections.len(), "segmented employment sections");
    sections
}

fn is_opening_line(line: &str, config: &ExtractorConfig) -> bool {
    if line.contains(&config.record_header) {
        return true;
    }
    match NUMBERED_LINE_RE.captures(line) {
        Some(caps) => {
            let rest = &caps[1];
            CNPJ_RE.is_match(rest) || rest.contains(&config.grouping_keyword)
        }
        None => false,
    }
}

fn is_closing_line(line: &str, config: &ExtractorConfig) -> bool {
    config.closing_phrases.iter().any(|p| line.contains(p))
}
