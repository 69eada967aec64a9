//! GraphQL response envelope.

use serde::Serialize;
use serde_json::{Value, json};

use super::document::Position;
use crate::domain::Error;

/// Step in the response path of a field error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// One entry of the `errors` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphError {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Position>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
    pub extensions: Value,
}

impl GraphError {
    /// Document-level failure detected before execution.
    pub fn validation(message: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            message: message.into(),
            locations: position.into_iter().collect(),
            path: Vec::new(),
            extensions: json!({ "code": "GRAPHQL_VALIDATION_FAILED" }),
        }
    }

    /// Failure of one field during execution.
    #[must_use]
    pub fn field(error: &Error, path: Vec<PathSegment>) -> Self {
        let mut extensions = json!({ "code": error.code().graphql_code() });
        if let Some(trace_id) = error.trace_id() {
            extensions["traceId"] = Value::String(trace_id.to_owned());
        }
        Self {
            message: error.message().to_owned(),
            locations: Vec::new(),
            path,
            extensions,
        }
    }

    /// A non-null relationship resolved to nothing.
    pub fn contract_violation(message: impl Into<String>, path: Vec<PathSegment>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path,
            extensions: json!({ "code": "CONTRACT_VIOLATION" }),
        }
    }

    /// Value of `extensions.code`.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.extensions.get("code").and_then(Value::as_str)
    }
}

/// Result of executing one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphError>,
}

impl GraphResponse {
    /// Response for a document rejected before execution.
    #[must_use]
    pub const fn rejected(errors: Vec<GraphError>) -> Self {
        Self { data: None, errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_response_omits_data() {
        let response = GraphResponse::rejected(vec![GraphError::validation(
            "Unknown field \"nope\" on type \"Query\"",
            Some(Position { line: 1, column: 3 }),
        )]);
        let value = serde_json::to_value(&response).expect("serialise");
        assert_eq!(
            value,
            json!({
                "errors": [{
                    "message": "Unknown field \"nope\" on type \"Query\"",
                    "locations": [{ "line": 1, "column": 3 }],
                    "extensions": { "code": "GRAPHQL_VALIDATION_FAILED" },
                }]
            })
        );
    }

    #[test]
    fn field_error_carries_path_and_code() {
        let error = GraphError::field(
            &Error::not_found("user does not exist"),
            vec![PathSegment::Key("users".to_owned()), PathSegment::Index(2)],
        );
        let value = serde_json::to_value(&error).expect("serialise");
        assert_eq!(value["path"], json!(["users", 2]));
        assert_eq!(error.code(), Some("NOT_FOUND"));
    }
}
