use std::collections::BTreeSet;

use pcl_types::normalize_tags;

use crate::error::LedgerError;

/// A single permitted mutation. Only `tags` and `proof` are editable;
/// every other field is unrepresentable here, which makes the mutability
/// contract a type-level guarantee for Rust callers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldEdit {
    /// Replace the tag set.
    Tags(BTreeSet<String>),
    /// Replace the proof text.
    Proof(String),
}

/// Fields of a prediction record that exist but cannot be edited. Named
/// here so the untyped boundary can distinguish "immutable" from
/// "unknown".
const IMMUTABLE_FIELDS: &[&str] = &[
    "id",
    "statement",
    "confidence",
    "created_at",
    "term_at",
    "outcome",
    "resolved_at",
];

impl FieldEdit {
    /// Parse a `field=value` assignment from an untyped caller (the CLI).
    ///
    /// `tags` takes a comma-separated list, normalized; `proof` takes the
    /// raw value. Assignments to any other record field are rejected:
    /// immutable fields with [`LedgerError::ImmutableField`], everything
    /// else with [`LedgerError::UnknownField`].
    pub fn parse(assignment: &str) -> Result<Self, LedgerError> {
        let (field, value) = assignment.split_once('=').ok_or_else(|| LedgerError::Validation {
            reason: format!("expected FIELD=VALUE, got '{assignment}'"),
        })?;
        let field = field.trim().to_lowercase();

        match field.as_str() {
            "tags" => Ok(Self::Tags(normalize_tags(value.split(',')))),
            "proof" => Ok(Self::Proof(value.trim().to_string())),
            _ if IMMUTABLE_FIELDS.contains(&field.as_str()) => {
                Err(LedgerError::ImmutableField { field })
            }
            _ => Err(LedgerError::UnknownField { field }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tags_with_normalization() {
        let edit = FieldEdit::parse("tags=weather, tech ,,").unwrap();
        let FieldEdit::Tags(tags) = edit else {
            panic!("expected a tags edit");
        };
        assert_eq!(
            tags.into_iter().collect::<Vec<_>>(),
            vec!["TECH".to_string(), "WEATHER".to_string()]
        );
    }

    #[test]
    fn parses_proof() {
        assert_eq!(
            FieldEdit::parse("proof=https://example.org/article").unwrap(),
            FieldEdit::Proof("https://example.org/article".into())
        );
    }

    #[test]
    fn empty_tags_value_clears_the_set() {
        let edit = FieldEdit::parse("tags=").unwrap();
        assert_eq!(edit, FieldEdit::Tags(BTreeSet::new()));
    }

    #[test]
    fn immutable_fields_are_rejected() {
        for field in ["statement", "confidence", "created_at", "term_at", "id", "outcome"] {
            let err = FieldEdit::parse(&format!("{field}=x")).unwrap_err();
            assert_eq!(
                err,
                LedgerError::ImmutableField {
                    field: field.into()
                },
                "field {field}"
            );
        }
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert_eq!(
            FieldEdit::parse("color=blue").unwrap_err(),
            LedgerError::UnknownField {
                field: "color".into()
            }
        );
    }

    #[test]
    fn missing_equals_sign_is_rejected() {
        assert!(matches!(
            FieldEdit::parse("proof").unwrap_err(),
            LedgerError::Validation { .. }
        ));
    }
}
