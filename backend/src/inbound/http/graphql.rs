//! `POST /graphql` endpoint.

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::graph::GraphResponse;
use crate::inbound::graphql::parse_request;
use crate::inbound::http::schemas::GraphResponseSchema;
use crate::inbound::http::state::HttpState;

/// Standard GraphQL request envelope.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphRequest {
    #[schema(example = "{ users { id name posts { title } } }")]
    pub query: String,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub variables: Option<Map<String, Value>>,
    #[serde(default)]
    pub operation_name: Option<String>,
}

/// Execute one GraphQL operation.
///
/// Every well-formed envelope is answered with 200; document and field
/// failures are reported in the `errors` list.
#[utoipa::path(
    post,
    path = "/graphql",
    request_body = GraphRequest,
    responses(
        (status = 200, description = "Operation result", body = GraphResponseSchema),
        (status = 400, description = "Malformed request envelope", body = Error)
    ),
    tags = ["graphql"],
    operation_id = "executeGraphql"
)]
#[post("/graphql")]
pub async fn graphql(
    state: web::Data<HttpState>,
    payload: web::Json<GraphRequest>,
) -> HttpResponse {
    let GraphRequest {
        query,
        variables,
        operation_name,
    } = payload.into_inner();

    let response = match parse_request(&query, operation_name.as_deref()) {
        Ok(operation) => {
            state
                .graph
                .execute(&operation, &variables.unwrap_or_default())
                .await
        }
        Err(errors) => GraphResponse::rejected(errors),
    };
    HttpResponse::Ok().json(response)
}
