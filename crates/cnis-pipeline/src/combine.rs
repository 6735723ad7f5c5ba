//! Field-by-field merge of the two strategies' outputs.
//!
//! Personal data merges per field, preferring the primary strategy and
//! back-filling from the fallback. Employment links merge whole-list: the
//! primary list wins iff non-empty. Merging employer records at the field
//! level would mix unrelated work histories, so whole lists are kept intact.

use shared_types::{ExtractedData, PersonalData};
use tracing::debug;

pub fn merge_strategies(primary: ExtractedData, fallback: ExtractedData) -> ExtractedData {
    let personal = PersonalData {
        name: primary.personal.name.or(fallback.personal.name),
        cpf: primary.personal.cpf.or(fallback.personal.cpf),
        birth_date: primary.personal.birth_date.or(fallback.personal.birth_date),
    };

    let links = if primary.links.is_empty() {
        debug!(
            count = fallback.links.len(),
            "primary strategy produced no links, using fallback list"
        );
        fallback.links
    } else {
        primary.links
    };

    ExtractedData { personal, links }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::EmploymentLink;

    fn link(employer: &str) -> EmploymentLink {
        EmploymentLink {
            employer: employer.to_string(),
            start: Some("01/03/2010".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_primary_name_wins_with_fallback_links() {
        let primary = ExtractedData {
            personal: PersonalData {
                name: Some("MARIA DA SILVA".to_string()),
                ..Default::default()
            },
            links: vec![],
        };
        let fallback = ExtractedData {
            personal: PersonalData::default(),
            links: vec![link("ACME LTDA"), link("BETA SA")],
        };

        let merged = merge_strategies(primary, fallback);
        assert_eq!(merged.personal.name.as_deref(), Some("MARIA DA SILVA"));
        assert_eq!(merged.links.len(), 2);
    }

    #[test]
    fn test_personal_fields_merge_independently() {
        let primary = ExtractedData {
            personal: PersonalData {
                cpf: Some("123.456.789-01".to_string()),
                ..Default::default()
            },
            links: vec![],
        };
        let fallback = ExtractedData {
            personal: PersonalData {
                cpf: Some("999.999.999-99".to_string()),
                name: Some("MARIA DA SILVA".to_string()),
                birth_date: Some("12/11/1965".to_string()),
            },
            links: vec![],
        };

        let merged = merge_strategies(primary, fallback);
        assert_eq!(merged.personal.cpf.as_deref(), Some("123.456.789-01"));
        assert_eq!(merged.personal.name.as_deref(), Some("MARIA DA SILVA"));
        assert_eq!(merged.personal.birth_date.as_deref(), Some("12/11/1965"));
    }

    #[test]
    fn test_nonempty_primary_list_is_never_replaced() {
        let primary = ExtractedData {
            personal: PersonalData::default(),
            links: vec![link("ACME LTDA")],
        };
        let fallback = ExtractedData {
            personal: PersonalData::default(),
            links: vec![link("BETA SA"), link("GAMA ME")],
        };

        let merged = merge_strategies(primary, fallback);
        assert_eq!(merged.links.len(), 1);
        assert_eq!(merged.links[0].employer, "ACME LTDA");
    }

    #[test]
    fn test_both_empty_stays_empty() {
        let merged = merge_strategies(ExtractedData::default(), ExtractedData::default());
        assert!(merged.personal.is_empty());
        assert!(merged.links.is_empty());
    }
}
