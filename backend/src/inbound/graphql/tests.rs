//! Parser adapter tests.

use rstest::rstest;
use serde_json::json;

use super::*;

fn single_error(result: Result<Operation, Vec<GraphError>>) -> GraphError {
    let mut errors = result.expect_err("document is rejected");
    assert_eq!(errors.len(), 1, "{errors:?}");
    errors.remove(0)
}

#[rstest]
fn lowers_fields_aliases_and_arguments() {
    let operation = parse_request(
        r#"query Feed($id: UUID!) { me: user(id: $id) { name posts { title } } }"#,
        None,
    )
    .expect("parses");

    assert_eq!(operation.kind, OperationKind::Query);
    assert_eq!(operation.name.as_deref(), Some("Feed"));
    assert_eq!(operation.variables[0].name, "id");
    let [user] = operation.selection.as_slice() else {
        panic!("one root field expected");
    };
    assert_eq!(user.response_key(), "me");
    assert_eq!(user.name, "user");
    assert_eq!(
        user.arguments,
        [("id".to_owned(), InputValue::Variable("id".to_owned()))]
    );
    assert_eq!(user.position.line, 1);
    let names: Vec<_> = user.selection.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["name", "posts"]);
}

#[rstest]
fn object_and_enum_arguments_are_kept() {
    let operation = parse_request(
        r#"mutation { changeProfile(id: "p", dto: { memberTypeId: BUSINESS, yearOfBirth: 1990 }) { id } }"#,
        None,
    )
    .expect("parses");

    let dto = &operation.selection[0].arguments[1].1;
    assert_eq!(
        dto,
        &InputValue::Object(vec![
            ("memberTypeId".to_owned(), InputValue::Enum("BUSINESS".to_owned())),
            ("yearOfBirth".to_owned(), InputValue::Number(1990.into())),
        ])
    );
}

#[rstest]
fn variable_defaults_become_json() {
    let operation = parse_request(
        r#"query ($dto: ChangeUserInput = { name: "x", balance: 1.5 }) { users { id } }"#,
        None,
    )
    .expect("parses");

    assert_eq!(
        operation.variables[0].default,
        Some(json!({ "name": "x", "balance": 1.5 }))
    );
}

#[rstest]
fn syntax_errors_carry_a_location() {
    let error = single_error(parse_request("{ users { id }", None));

    assert_eq!(error.code(), Some("GRAPHQL_VALIDATION_FAILED"));
    assert_eq!(error.locations.len(), 1);
}

#[rstest]
#[case("{ ...F } fragment F on RootQueryType { users { id } }", "Fragments are not supported.")]
#[case("{ users { ... on User { id } } }", "Fragments are not supported.")]
#[case("{ users @skip(if: true) { id } }", "Directives are not supported.")]
#[case("subscription { users { id } }", "Subscriptions are not supported.")]
fn unsupported_constructs_are_rejected(#[case] query: &str, #[case] message: &str) {
    let error = single_error(parse_request(query, None));
    assert_eq!(error.message, message);
}

#[rstest]
fn operation_name_selects_among_several() {
    let query = "query A { users { id } } mutation B { deletePost(id: \"x\") }";

    let picked = parse_request(query, Some("B")).expect("B exists");
    assert_eq!(picked.kind, OperationKind::Mutation);

    let ambiguous = single_error(parse_request(query, None));
    assert_eq!(
        ambiguous.message,
        "Must provide operation name if query contains multiple operations."
    );

    let unknown = single_error(parse_request(query, Some("C")));
    assert_eq!(unknown.message, "Unknown operation named \"C\".");
}

#[rstest]
fn lone_named_operation_runs_without_a_name() {
    let operation = parse_request("query Only { memberTypes { id } }", None).expect("parses");
    assert_eq!(operation.name.as_deref(), Some("Only"));
}
