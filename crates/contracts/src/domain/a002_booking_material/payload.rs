//! Submission payload written into the booking form's `materials_json` field.

use super::aggregate::{MaterialLine, MaterialScope};
use super::mode::MaterialMode;
use crate::domain::a001_authority::AuthorityId;
use crate::shared::number_format::parse_number;
use serde::{Deserialize, Serialize};

/// Name of the hidden input carrying the JSON payload
pub const MATERIALS_FIELD_NAME: &str = "materials_json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLinePayload {
    pub description: String,
    pub unit: Option<String>,
    pub quantity: Option<f64>,
    pub rate: Option<f64>,
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialPayload {
    pub mode: Option<MaterialMode>,
    pub total_quantity: Option<f64>,
    pub total_quantity_unit: Option<String>,
    pub total_amount: Option<f64>,
    pub lines: Vec<MaterialLinePayload>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityRef {
    pub authority_id: AuthorityId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopePayload {
    pub from: Option<AuthorityRef>,
    pub to: Option<AuthorityRef>,
    pub material: MaterialPayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionMode {
    AuthorityPair,
}

/// `{ mode: "AUTHORITY_PAIR", scopes: [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub mode: SubmissionMode,
    pub scopes: Vec<ScopePayload>,
}

impl SubmissionPayload {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn text_or_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn serialize_line(line: &MaterialLine) -> MaterialLinePayload {
    MaterialLinePayload {
        description: line.description.trim().to_string(),
        unit: text_or_none(&line.unit),
        quantity: parse_number(&line.quantity),
        rate: parse_number(&line.rate),
        amount: parse_number(&line.amount),
    }
}

/// Builds the payload of one scope. Lines with every field blank are dropped.
pub fn serialize_scope(scope: &MaterialScope) -> MaterialPayload {
    MaterialPayload {
        mode: scope.mode,
        total_quantity: parse_number(&scope.header.total_quantity),
        total_quantity_unit: text_or_none(&scope.header.total_quantity_unit),
        total_amount: parse_number(&scope.header.total_amount),
        lines: scope
            .lines
            .iter()
            .filter(|l| !l.is_empty())
            .map(serialize_line)
            .collect(),
    }
}

pub fn build_submission(scopes: &[MaterialScope]) -> SubmissionPayload {
    SubmissionPayload {
        mode: SubmissionMode::AuthorityPair,
        scopes: scopes
            .iter()
            .map(|scope| ScopePayload {
                from: scope.key.from.map(|authority_id| AuthorityRef { authority_id }),
                to: scope.key.to.map(|authority_id| AuthorityRef { authority_id }),
                material: serialize_scope(scope),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_booking_material::aggregate::ScopeKey;
    use crate::domain::a002_booking_material::rules::{apply_mode_rules, set_mode};
    use serde_json::json;

    #[test]
    fn test_empty_line_is_omitted() {
        let scope = MaterialScope::base();
        let payload = serialize_scope(&scope);
        assert!(payload.lines.is_empty());
        assert_eq!(payload.mode, None);
        assert_eq!(payload.total_amount, None);
    }

    #[test]
    fn test_one_populated_line_gives_one_entry() {
        let mut scope = MaterialScope::base();
        scope.mode = Some(MaterialMode::Item);
        scope.lines[0].description = " Cement ".into();
        scope.lines[0].quantity = "10".into();
        scope.lines[0].rate = "2.5".into();
        scope.lines.push(MaterialLine::blank(2));
        apply_mode_rules(&mut scope);

        let payload = serialize_scope(&scope);
        assert_eq!(payload.lines.len(), 1);
        assert_eq!(
            payload.lines[0],
            MaterialLinePayload {
                description: "Cement".into(),
                unit: None,
                quantity: Some(10.0),
                rate: Some(2.5),
                amount: Some(25.0),
            }
        );
        assert_eq!(payload.total_amount, Some(25.0));
    }

    #[test]
    fn test_malformed_numbers_become_null() {
        let mut scope = MaterialScope::base();
        scope.lines[0].description = "Sand".into();
        scope.lines[0].quantity = "lots".into();
        scope.header.total_amount = "1,000".into();
        let payload = serialize_scope(&scope);
        assert_eq!(payload.lines[0].quantity, None);
        assert_eq!(payload.total_amount, Some(1000.0));
    }

    #[test]
    fn test_submission_json_shape() {
        let mut attached = MaterialScope::new(ScopeKey::pair(AuthorityId(1), AuthorityId(2)));
        set_mode(&mut attached, Some(MaterialMode::Attached));
        attached.header.total_amount = "1500".into();

        let json = serde_json::to_value(build_submission(&[attached])).unwrap();
        assert_eq!(
            json,
            json!({
                "mode": "AUTHORITY_PAIR",
                "scopes": [{
                    "from": {"authority_id": 1},
                    "to": {"authority_id": 2},
                    "material": {
                        "mode": "ATTACHED",
                        "total_quantity": null,
                        "total_quantity_unit": null,
                        "total_amount": 1500.0,
                        "lines": [{
                            "description": "As per list attached.",
                            "unit": null,
                            "quantity": null,
                            "rate": null,
                            "amount": null
                        }]
                    }
                }]
            })
        );
    }

    #[test]
    fn test_base_scope_has_null_authorities() {
        let payload = build_submission(&[MaterialScope::base()]);
        assert_eq!(payload.scopes[0].from, None);
        assert_eq!(payload.scopes[0].to, None);
        assert!(payload.to_json().unwrap().starts_with("{\"mode\":\"AUTHORITY_PAIR\""));
    }
}
