//! OpenAPI documentation for the HTTP surface.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::graphql::GraphRequest;
use crate::inbound::http::schemas::{GraphErrorSchema, GraphResponseSchema, LocationSchema};

/// OpenAPI document for the service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "social-graph API",
        description = "GraphQL endpoint over users, profiles, member types, posts and subscriptions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::graphql::graphql,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        GraphRequest,
        GraphResponseSchema,
        GraphErrorSchema,
        LocationSchema,
        Error,
        ErrorCode
    )),
    tags(
        (name = "graphql", description = "GraphQL query and mutation execution"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
