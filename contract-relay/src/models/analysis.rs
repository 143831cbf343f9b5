//! Transfer shapes returned by the analysis engine.
//!
//! Every field is optional: the relay neither validates nor fills anything
//! in. Missing keys and explicit `null`s both come back out as `null`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub contract_summary: Option<String>,
    pub clauses: Option<Vec<Clause>>,
    pub missing_clauses: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clause {
    #[serde(rename = "type")]
    pub clause_type: Option<String>,
    pub text: Option<String>,
    /// Free-form extracted facts; the engine imposes no schema.
    pub facts: Option<Map<String, Value>>,
    pub explanation_simple: Option<String>,
    pub key_facts: Option<Vec<String>>,
    pub risk_flags: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_clauses_stay_empty() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "contractSummary": "ok",
            "clauses": [],
            "missingClauses": ["indemnity"]
        }))
        .unwrap();

        assert_eq!(result.contract_summary.as_deref(), Some("ok"));
        assert_eq!(result.clauses, Some(vec![]));
        assert_eq!(result.missing_clauses, Some(vec!["indemnity".to_string()]));
    }

    #[test]
    fn absent_fields_serialize_as_null() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "clauses": [{ "type": "payment" }]
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "contractSummary": null,
                "clauses": [{
                    "type": "payment",
                    "text": null,
                    "facts": null,
                    "explanationSimple": null,
                    "keyFacts": null,
                    "riskFlags": null
                }],
                "missingClauses": null
            })
        );
    }

    #[test]
    fn facts_accept_arbitrary_json() {
        let facts = json!({
            "amounts": ["$1,000", "USD 250"],
            "has_cap": true,
            "term_months": 12,
            "governing_law": null,
            "parties": { "lessor": "Acme" }
        });
        let clause: Clause = serde_json::from_value(json!({
            "type": "Limitation of Liability",
            "facts": facts.clone()
        }))
        .unwrap();

        assert_eq!(Value::Object(clause.facts.unwrap()), facts);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "contractSummary": "x",
            "engineVersion": "0.5"
        }))
        .unwrap();

        assert_eq!(result.contract_summary.as_deref(), Some("x"));
    }

    #[test]
    fn mistyped_field_is_rejected() {
        let parsed = serde_json::from_value::<AnalysisResult>(json!({ "clauses": "none" }));
        assert!(parsed.is_err());
    }
}
