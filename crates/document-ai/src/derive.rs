//! Derivation of candidate personal data and employment links from the raw
//! per-operation outputs.
//!
//! Sources are consulted in decreasing order of structure: form fields,
//! then the localized parser, then table rows, and only when all of those
//! produced nothing, a raw scan of the OCR text anchored on DATE entities.

use crate::processor::{Entity, FormField, LocalizedDocument, Table};
use crate::strategy::RawResults;
use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{EmploymentLink, PersonalData};

lazy_static! {
    static ref INDEXED_CNPJ_LINE_RE: Regex =
        Regex::new(r"^\d+\s+(\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2})\s+(.+)$").unwrap();
    static ref INDEXED_GROUPING_RE: Regex = Regex::new(r"^\d+\s+(AGRUPAMENTO.+)$").unwrap();
    static ref RECORD_OPENING_RE: Regex =
        Regex::new(r"^\d+\s+\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}").unwrap();
}

pub fn personal_data(raw: &RawResults) -> PersonalData {
    let mut personal = PersonalData::default();

    if let Ok(entities) = &raw.entities {
        personal.cpf = entities
            .iter()
            .find(|e| e.entity_type == "CPF" || (e.text.contains('.') && e.text.contains('-')))
            .map(|e| e.text.clone());
        personal.birth_date = entities
            .iter()
            .find(|e| e.entity_type == "DATE" && e.text.contains('/'))
            .map(|e| e.text.clone());
    }

    if let Ok(fields) = &raw.form_fields {
        personal.name = fields
            .iter()
            .find(|f| is_name_field(&f.name))
            .map(|f| f.value.clone());
    }

    // The localized parser is a secondary source for whatever is still empty
    if let Ok(localized) = &raw.localized {
        if personal.cpf.is_none() {
            personal.cpf = localized
                .entities
                .iter()
                .find(|e| e.entity_type == "CPF")
                .map(|e| e.text.clone());
        }
        if personal.name.is_none() {
            personal.name = localized
                .form_fields
                .iter()
                .find(|f| is_name_field(&f.name))
                .map(|f| f.value.clone());
        }
    }

    personal
}

fn is_name_field(field_name: &str) -> bool {
    let lower = field_name.to_lowercase();
    lower.contains("nome") || lower.contains("name")
}

pub fn employment_links(raw: &RawResults) -> Vec<EmploymentLink> {
    let mut links = Vec::new();

    if let Ok(fields) = &raw.form_fields {
        links.extend(from_form_fields(fields));
    }
    if let Ok(localized) = &raw.localized {
        links.extend(from_localized(localized));
    }
    if let Ok(tables) = &raw.tables {
        links.extend(from_tables(tables));
    }

    if links.is_empty() {
        if let Ok(ocr) = &raw.ocr {
            let entities = raw.entities.as_deref().unwrap_or(&[]);
            links = from_ocr_text(&ocr.text, entities);
        }
    }

    links
}

/// Fold a form-field stream into records: an employer marker field starts a
/// new record, other recognized fields attach to the current one
fn from_form_fields(fields: &[FormField]) -> Vec<EmploymentLink> {
    let mut links = Vec::new();
    let mut current = EmploymentLink::default();
    let mut dirty = false;

    for field in fields {
        let name = field.name.to_lowercase();
        if name.contains("empregador") || name.contains("employer") {
            if dirty {
                links.push(std::mem::take(&mut current));
            }
            current.employer = field.value.clone();
            dirty = true;
        } else if name.contains("cnpj") {
            current.cnpj = Some(field.value.clone());
            dirty = true;
        } else if name.contains("data_inicio") || name.contains("start_date") {
            current.start = Some(field.value.clone());
            dirty = true;
        } else if name.contains("data_fim") || name.contains("end_date") {
            current.end = Some(field.value.clone());
            dirty = true;
        } else if name.contains("salario") || name.contains("salary") {
            current.salary = parse_amount(&field.value);
            dirty = true;
        }
    }

    if dirty {
        links.push(current);
    }
    links
}

fn from_localized(doc: &LocalizedDocument) -> Vec<EmploymentLink> {
    let mut links = Vec::new();
    let mut current = EmploymentLink::default();
    let mut dirty = false;

    for entity in &doc.entities {
        match entity.entity_type.as_str() {
            "CNPJ" => {
                current.cnpj = Some(entity.text.clone());
                dirty = true;
            }
            "DATE" => {
                if current.start.is_none() {
                    current.start = Some(entity.text.clone());
                } else if current.end.is_none() {
                    current.end = Some(entity.text.clone());
                }
                dirty = true;
            }
            _ => {}
        }
    }

    for field in &doc.form_fields {
        let name = field.name.to_lowercase();
        if name.contains("empregador") {
            if dirty {
                links.push(std::mem::take(&mut current));
            }
            current.employer = field.value.clone();
            dirty = true;
        } else if name.contains("cnpj") {
            current.cnpj = Some(field.value.clone());
            dirty = true;
        } else if name.contains("data_inicio") {
            current.start = Some(field.value.clone());
            dirty = true;
        } else if name.contains("data_fim") {
            current.end = Some(field.value.clone());
            dirty = true;
        } else if name.contains("salario") {
            current.salary = parse_amount(&field.value);
            dirty = true;
        }
    }

    if dirty {
        links.push(current);
    }
    links
}

/// Rows with at least employer, entity id and start date become one link each
fn from_tables(tables: &[Table]) -> Vec<EmploymentLink> {
    let mut links = Vec::new();
    for table in tables {
        for row in &table.rows {
            if row.len() < 3 {
                continue;
            }
            let employer = row[0].trim();
            if employer.is_empty() {
                continue;
            }
            links.push(EmploymentLink {
                employer: employer.to_string(),
                cnpj: non_empty(&row[1]),
                start: non_empty(&row[2]),
                end: row.get(3).and_then(|v| non_empty(v)),
                salary: row.get(4).and_then(|v| parse_amount(v)),
                last_salary_reference: None,
            });
        }
    }
    links
}

/// Raw-text fallback over the OCR output. Record rows are recognized by the
/// same line shapes the statements use; start/end dates are pulled from the
/// DATE entities in document order.
fn from_ocr_text(text: &str, entities: &[Entity]) -> Vec<EmploymentLink> {
    let mut links = Vec::new();
    let mut current: Option<EmploymentLink> = None;
    let mut date_anchors = entities
        .iter()
        .filter(|e| e.entity_type == "DATE" && e.text.contains('/'));

    for raw_line in text.lines() {
        let line = raw_line.trim();

        let opens = line.contains("Código Emp.")
            || RECORD_OPENING_RE.is_match(line)
            || line.contains("AGRUPAMENTO");
        if opens {
            if let Some(link) = current.take() {
                links.push(link);
            }
            current = Some(EmploymentLink {
                start: date_anchors.next().map(|e| e.text.clone()),
                end: date_anchors.next().map(|e| e.text.clone()),
                ..Default::default()
            });
        }

        if let Some(link) = current.as_mut() {
            if let Some(caps) = INDEXED_CNPJ_LINE_RE.captures(line) {
                link.cnpj = Some(caps[1].to_string());
                link.employer = caps[2].trim().to_string();
            } else if let Some(caps) = INDEXED_GROUPING_RE.captures(line) {
                link.employer = caps[1].trim().to_string();
                link.cnpj = None;
            }
        }

        let closes = line.contains("Relações Previdenciárias")
            || line.contains("Valores Consolidados");
        if closes {
            if let Some(link) = current.take() {
                links.push(link);
            }
        }
    }

    if let Some(link) = current.take() {
        links.push(link);
    }
    links
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("sem data fim") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_amount(value: &str) -> Option<f64> {
    let normalized = value.trim().replace('.', "").replace(',', ".");
    normalized.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::OcrResult;
    use crate::processor::ProcessorError;
    use pretty_assertions::assert_eq;

    fn empty_raw() -> RawResults {
        RawResults {
            ocr: Err(ProcessorError::Timeout(60)),
            form_fields: Err(ProcessorError::Timeout(60)),
            entities: Err(ProcessorError::Timeout(60)),
            localized: Err(ProcessorError::Timeout(60)),
            tables: Err(ProcessorError::Timeout(60)),
        }
    }

    fn field(name: &str, value: &str) -> FormField {
        FormField {
            name: name.to_string(),
            value: value.to_string(),
            confidence: 0.9,
        }
    }

    fn date_entity(text: &str) -> Entity {
        Entity {
            entity_type: "DATE".to_string(),
            text: text.to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_form_fields_group_on_employer_marker() {
        let mut raw = empty_raw();
        raw.form_fields = Ok(vec![
            field("empregador", "ACME LTDA"),
            field("cnpj", "12.345.678/0001-99"),
            field("data_inicio", "01/03/2010"),
            field("data_fim", "15/06/2015"),
            field("empregador", "BETA SA"),
            field("data_inicio", "01/08/2015"),
        ]);

        let links = employment_links(&raw);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].employer, "ACME LTDA");
        assert_eq!(links[0].end.as_deref(), Some("15/06/2015"));
        assert_eq!(links[1].employer, "BETA SA");
        assert_eq!(links[1].end, None);
    }

    #[test]
    fn test_table_rows_need_three_columns() {
        let mut raw = empty_raw();
        raw.tables = Ok(vec![Table {
            rows: vec![
                vec!["ACME LTDA".into(), "12.345.678/0001-99".into(), "01/03/2010".into()],
                vec!["curta".into(), "linha".into()],
                vec![
                    "BETA SA".into(),
                    "".into(),
                    "01/08/2015".into(),
                    "sem data fim".into(),
                    "1.234,56".into(),
                ],
            ],
        }]);

        let links = employment_links(&raw);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].employer, "ACME LTDA");
        assert_eq!(links[1].cnpj, None);
        assert_eq!(links[1].end, None);
        assert_eq!(links[1].salary, Some(1234.56));
    }

    #[test]
    fn test_ocr_scan_runs_only_when_structured_sources_are_empty() {
        let mut raw = empty_raw();
        raw.ocr = Ok(OcrResult {
            text: "1  12.345.678/0001-99  ACME LTDA\nRelações Previdenciárias\n".to_string(),
            page_count: 1,
        });
        raw.entities = Ok(vec![date_entity("01/03/2010"), date_entity("15/06/2015")]);

        let links = employment_links(&raw);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].employer, "ACME LTDA");
        assert_eq!(links[0].start.as_deref(), Some("01/03/2010"));
        assert_eq!(links[0].end.as_deref(), Some("15/06/2015"));

        // A structured source suppresses the OCR scan
        raw.tables = Ok(vec![Table {
            rows: vec![vec![
                "BETA SA".into(),
                "98.765.432/0001-10".into(),
                "01/08/2015".into(),
            ]],
        }]);
        let links = employment_links(&raw);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].employer, "BETA SA");
    }

    #[test]
    fn test_personal_data_prefers_entities_then_localized() {
        let mut raw = empty_raw();
        raw.entities = Ok(vec![Entity {
            entity_type: "CPF".to_string(),
            text: "123.456.789-01".to_string(),
            confidence: 0.99,
        }]);
        raw.localized = Ok(LocalizedDocument {
            entities: vec![Entity {
                entity_type: "CPF".to_string(),
                text: "999.999.999-99".to_string(),
                confidence: 0.5,
            }],
            form_fields: vec![field("nome do contribuinte", "MARIA DA SILVA")],
        });

        let personal = personal_data(&raw);
        assert_eq!(personal.cpf.as_deref(), Some("123.456.789-01"));
        assert_eq!(personal.name.as_deref(), Some("MARIA DA SILVA"));
    }

    #[test]
    fn test_birth_date_from_date_entities() {
        let mut raw = empty_raw();
        raw.entities = Ok(vec![date_entity("12/11/1965")]);
        let personal = personal_data(&raw);
        assert_eq!(personal.birth_date.as_deref(), Some("12/11/1965"));
    }
}
