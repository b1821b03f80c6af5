//! JSON Schema validation (Draft 2020-12) for snapshot inputs.
//!
//! Schemas are embedded at compile time so the binary stays self-contained
//! and offline. Validation runs on the parsed `Value` before typed
//! deserialization; failures carry the instance path of the first offending
//! node.

use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

use crate::IoError;

/// Which input document a value claims to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaKind {
    Teams,
    Participants,
    Programmes,
    Results,
    ScoringConfig,
    Manifest,
}

impl SchemaKind {
    pub fn doc_name(&self) -> &'static str {
        match self {
            SchemaKind::Teams => "teams",
            SchemaKind::Participants => "participants",
            SchemaKind::Programmes => "programmes",
            SchemaKind::Results => "results",
            SchemaKind::ScoringConfig => "scoring_config",
            SchemaKind::Manifest => "manifest",
        }
    }

    fn raw(&self) -> &'static str {
        match self {
            SchemaKind::Teams => include_str!("../schemas/teams.schema.json"),
            SchemaKind::Participants => include_str!("../schemas/participants.schema.json"),
            SchemaKind::Programmes => include_str!("../schemas/programmes.schema.json"),
            SchemaKind::Results => include_str!("../schemas/results.schema.json"),
            SchemaKind::ScoringConfig => include_str!("../schemas/scoring_config.schema.json"),
            SchemaKind::Manifest => include_str!("../schemas/manifest.schema.json"),
        }
    }
}

/// Compile the embedded schema for `kind`. Embedded schemas are trusted;
/// a compile failure is a build defect surfaced as `IoError::Schema`.
fn compile(kind: SchemaKind) -> Result<JSONSchema, IoError> {
    let schema_value: Value = serde_json::from_str(kind.raw())?;
    JSONSchema::options()
        .with_draft(Draft::Draft202012)
        .compile(&schema_value)
        .map_err(|e| IoError::Schema {
            doc: kind.doc_name(),
            detail: format!("embedded schema failed to compile: {e}"),
        })
}

/// Validate `instance` against the embedded schema for `kind`.
///
/// Reports up to three violations in one message; data-entry mistakes tend
/// to repeat, and the first path alone rarely tells the whole story.
pub fn validate(kind: SchemaKind, instance: &Value) -> Result<(), IoError> {
    let compiled = compile(kind)?;
    let result = compiled.validate(instance);
    if let Err(errors) = result {
        let mut details: Vec<String> = Vec::new();
        for (i, error) in errors.enumerate() {
            if i == 3 {
                details.push("...".to_string());
                break;
            }
            details.push(format!("{}: {}", error.instance_path, error));
        }
        return Err(IoError::Schema {
            doc: kind.doc_name(),
            detail: details.join("; "),
        });
    }
    Ok(())
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_embedded_schemas_compile() {
        for kind in [
            SchemaKind::Teams,
            SchemaKind::Participants,
            SchemaKind::Programmes,
            SchemaKind::Results,
            SchemaKind::ScoringConfig,
            SchemaKind::Manifest,
        ] {
            compile(kind).unwrap();
        }
    }

    #[test]
    fn valid_documents_pass() {
        let teams = json!([{"code": "SMD", "name": "Sumud", "color": "#d33"}]);
        validate(SchemaKind::Teams, &teams).unwrap();

        let results = json!([{
            "id": "R1",
            "programmeId": "P1",
            "status": "published",
            "firstPlace": [{"chestNumber": "SMD001", "grade": "A"}],
            "secondPlace": [{"teamCode": "JNB"}]
        }]);
        validate(SchemaKind::Results, &results).unwrap();
    }

    #[test]
    fn winner_entry_must_not_mix_identities() {
        let results = json!([{
            "id": "R1",
            "programmeId": "P1",
            "status": "published",
            "firstPlace": [{"chestNumber": "SMD001", "teamCode": "SMD"}]
        }]);
        let err = validate(SchemaKind::Results, &results).unwrap_err();
        assert!(matches!(err, IoError::Schema { doc: "results", .. }));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let results = json!([{"id": "R1", "programmeId": "P1", "status": "live"}]);
        assert!(validate(SchemaKind::Results, &results).is_err());
    }
}
