//! OpenAPI schemas for the GraphQL envelope.
//!
//! The graph response types stay free of utoipa; these wrappers mirror their
//! wire shape for documentation only.

use utoipa::ToSchema;

/// Source position of a validation error.
#[derive(ToSchema)]
#[schema(as = GraphLocation)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct LocationSchema {
    #[schema(example = 1)]
    line: usize,
    #[schema(example = 3)]
    column: usize,
}

/// One entry of the `errors` list.
#[derive(ToSchema)]
#[schema(as = GraphError)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct GraphErrorSchema {
    #[schema(example = "user 3fa85f64-5717-4562-b3fc-2c963f66afa6 does not exist")]
    message: String,
    /// Present on validation errors.
    locations: Option<Vec<LocationSchema>>,
    /// Response path of the failed field; keys and list indices.
    #[schema(value_type = Option<Vec<Object>>, example = json!(["users", 0, "posts"]))]
    path: Option<Vec<serde_json::Value>>,
    /// Carries `code`, and `traceId` for field errors.
    #[schema(value_type = Object, example = json!({"code": "NOT_FOUND"}))]
    extensions: serde_json::Value,
}

/// GraphQL response body.
#[derive(ToSchema)]
#[schema(as = GraphResponse)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct GraphResponseSchema {
    /// Absent when the document was rejected before execution.
    #[schema(value_type = Option<Object>)]
    data: Option<serde_json::Value>,
    errors: Option<Vec<GraphErrorSchema>>,
}
