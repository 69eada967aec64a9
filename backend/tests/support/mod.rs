//! Shared harness for end-to-end tests over the in-memory store.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::sync::Arc;

use serde_json::{Value, json};

use social_graph::domain::graph::{GraphResponse, GraphService};
use social_graph::domain::loader::SubscriptionAttribution;
use social_graph::domain::ports::{GraphExecutor, StoragePorts};
use social_graph::inbound::graphql::parse_request;
use social_graph::outbound::memory::InMemoryStore;

/// Graph service wired to a fresh in-memory store.
pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub ports: StoragePorts,
    service: GraphService,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_attribution(SubscriptionAttribution::PerKey)
    }

    pub fn with_attribution(attribution: SubscriptionAttribution) -> Self {
        let store = Arc::new(InMemoryStore::recording());
        let ports = StoragePorts::from_adapter(store.clone());
        let service = GraphService::new(&ports, attribution);
        Self {
            store,
            ports,
            service,
        }
    }

    /// Execute `query` and return the response as JSON.
    pub async fn run(&self, query: &str) -> Value {
        self.run_with(query, json!({})).await
    }

    pub async fn run_with(&self, query: &str, variables: Value) -> Value {
        let variables = variables.as_object().cloned().unwrap_or_default();
        let response = match parse_request(query, None) {
            Ok(operation) => self.service.execute(&operation, &variables).await,
            Err(errors) => GraphResponse::rejected(errors),
        };
        serde_json::to_value(response).expect("response serialises")
    }

    /// Create a user and return its id.
    pub async fn user(&self, name: &str) -> String {
        let response = self
            .run_with(
                "mutation ($dto: CreateUserInput!) { createUser(dto: $dto) { id } }",
                json!({ "dto": { "name": name, "balance": 100 } }),
            )
            .await;
        string_at(&response, "/data/createUser/id")
    }

    /// Create a post for `author` and return its id.
    pub async fn post(&self, author: &str, title: &str) -> String {
        let response = self
            .run_with(
                "mutation ($dto: CreatePostInput!) { createPost(dto: $dto) { id } }",
                json!({ "dto": { "title": title, "content": "body", "authorId": author } }),
            )
            .await;
        string_at(&response, "/data/createPost/id")
    }

    /// Create a BASIC profile for `user` and return its id.
    pub async fn profile(&self, user: &str) -> String {
        let response = self
            .run_with(
                "mutation ($dto: CreateProfileInput!) { createProfile(dto: $dto) { id } }",
                json!({ "dto": {
                    "userId": user,
                    "memberTypeId": "BASIC",
                    "isMale": false,
                    "yearOfBirth": 1990,
                } }),
            )
            .await;
        string_at(&response, "/data/createProfile/id")
    }

    /// Make `subscriber` follow `author`.
    pub async fn follow(&self, subscriber: &str, author: &str) {
        let response = self
            .run_with(
                "mutation ($s: UUID!, $a: UUID!) { subscribeTo(userId: $s, authorId: $a) }",
                json!({ "s": subscriber, "a": author }),
            )
            .await;
        assert_eq!(response.pointer("/data/subscribeTo"), Some(&json!(subscriber)));
    }
}

pub fn string_at(value: &Value, pointer: &str) -> String {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("{pointer} missing in {value}"))
        .to_owned()
}

/// `extensions.code` of every reported error.
pub fn error_codes(response: &Value) -> Vec<String> {
    response
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .map(|error| string_at(error, "/extensions/code"))
                .collect()
        })
        .unwrap_or_default()
}
