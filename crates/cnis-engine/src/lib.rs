//! Heuristic CNIS extraction over raw statement text.
//!
//! This is the local fallback strategy: ordered-regex personal-data rules,
//! line-based segmentation into one block per employment record, and
//! per-block field extraction. It is a pure function of (text, config) and
//! never fails; fields that match nothing are simply absent.

pub mod dates;
pub mod fields;
pub mod patterns;
pub mod personal;
pub mod sections;

use shared_types::ExtractedData;

pub use patterns::{ExtractorConfig, FieldRule};

/// Fallback extraction strategy entry point
pub struct HeuristicExtractor {
    config: ExtractorConfig,
}

impl HeuristicExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Run the full heuristic pass over one statement's text
    pub fn extract(&self, text: &str) -> ExtractedData {
        let personal = personal::extract_personal_data(text, &self.config);
        let links = sections::split_sections(text, &self.config)
            .iter()
            .filter_map(|section| fields::extract_link_from_section(section, &self.config))
            .collect();
        ExtractedData { personal, links }
    }
}

impl Default for HeuristicExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STATEMENT: &str = "\
NIT: 1.234.567.890-1 CPF: 123.456.789-01 NOME: MARIA DA SILVA
NASCIMENTO: 12/11/1965
Código Emp.  Origem do Vínculo
1  12.345.678/0001-99  ACME LTDA
Empregado
01/03/2010 15/06/2015
04/2015 1.234,56
2  98.765.432/0001-10  BETA TRANSPORTES SA
Empregado
01/08/2015 05/2020
Relações Previdenciárias
Valores Consolidados
";

    #[test]
    fn test_extracts_personal_data_and_links() {
        let data = HeuristicExtractor::default().extract(STATEMENT);

        assert_eq!(data.personal.name.as_deref(), Some("MARIA DA SILVA"));
        assert_eq!(data.personal.cpf.as_deref(), Some("123.456.789-01"));
        assert_eq!(data.personal.birth_date.as_deref(), Some("12/11/1965"));

        assert_eq!(data.links.len(), 2);
        assert_eq!(data.links[0].employer, "ACME LTDA");
        assert_eq!(data.links[0].salary, Some(1234.56));
        assert_eq!(data.links[1].employer, "BETA TRANSPORTES SA");
        assert_eq!(data.links[1].end.as_deref(), Some("31/05/2020"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = HeuristicExtractor::default();
        let first = extractor.extract(STATEMENT);
        let second = extractor.extract(STATEMENT);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[test]
    fn test_empty_text_yields_empty_result() {
        let data = HeuristicExtractor::default().extract("");
        assert!(data.personal.is_empty());
        assert!(data.links.is_empty());
    }
}
