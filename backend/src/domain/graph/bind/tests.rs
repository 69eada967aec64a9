//! Validation coverage for operation binding.

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::graph::document::{InputValue, OperationKind};
use crate::domain::{MemberTypeId, UserId};

fn at(line: usize) -> Position {
    Position { line, column: 1 }
}

fn leaf(name: &str) -> FieldNode {
    FieldNode {
        alias: None,
        name: name.to_owned(),
        arguments: Vec::new(),
        selection: Vec::new(),
        position: at(1),
    }
}

fn node(name: &str, selection: Vec<FieldNode>) -> FieldNode {
    FieldNode {
        selection,
        ..leaf(name)
    }
}

fn with_args(mut field: FieldNode, arguments: Vec<(&str, InputValue)>) -> FieldNode {
    field.arguments = arguments
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value))
        .collect();
    field
}

fn query(selection: Vec<FieldNode>) -> Operation {
    Operation {
        kind: OperationKind::Query,
        name: None,
        variables: Vec::new(),
        selection,
    }
}

fn messages(errors: &[GraphError]) -> Vec<&str> {
    errors.iter().map(|error| error.message.as_str()).collect()
}

/// `users { userSubscribedTo { ... } }` nested `levels` times, ending in `id`.
fn nested_users(levels: usize) -> FieldNode {
    let mut field = leaf("id");
    for _ in 0..levels {
        field = node("userSubscribedTo", vec![field]);
    }
    node("users", vec![field])
}

#[test]
fn binds_root_and_relationship_fields() {
    let operation = query(vec![node(
        "users",
        vec![leaf("id"), node("posts", vec![leaf("title")]), leaf("__typename")],
    )]);

    let bound = bind(&operation, &Map::new()).expect("valid");

    let [users] = bound.fields.as_slice() else {
        panic!("one root field");
    };
    assert_eq!(users.kind, FieldKind::Query(QueryField::Users));
    let kinds: Vec<_> = users.selection.iter().map(|f| f.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            FieldKind::User(UserField::Id),
            FieldKind::User(UserField::Posts),
            FieldKind::Typename,
        ]
    );
}

#[test]
fn aliases_become_response_keys() {
    let mut aliased = node("users", vec![leaf("id")]);
    aliased.alias = Some("everyone".to_owned());

    let bound = bind(&query(vec![aliased]), &Map::new()).expect("valid");

    assert_eq!(bound.fields[0].response_key, "everyone");
}

#[rstest]
#[case(5, true)]
#[case(6, false)]
fn depth_ceiling_is_five(#[case] levels: usize, #[case] accepted: bool) {
    // The innermost `id` sits at depth `levels`.
    let result = bind(&query(vec![nested_users(levels - 1)]), &Map::new());
    assert_eq!(result.is_ok(), accepted);
}

#[test]
fn depth_error_is_reported_once() {
    let operation = query(vec![nested_users(8), nested_users(9)]);

    let errors = bind(&operation, &Map::new()).expect_err("too deep");

    assert_eq!(
        messages(&errors),
        vec!["'' exceeds maximum operation depth of 5"]
    );
}

#[test]
fn reports_every_problem_with_locations() {
    let mut unknown = leaf("nope");
    unknown.position = Position { line: 3, column: 5 };
    let operation = query(vec![
        unknown,
        leaf("users"),
        node("memberTypes", vec![node("discount", vec![leaf("x")])]),
    ]);

    let errors = bind(&operation, &Map::new()).expect_err("invalid");

    assert_eq!(
        messages(&errors),
        vec![
            "Cannot query field \"nope\" on type \"RootQueryType\".",
            "Field \"users\" of type \"User\" must have a selection of subfields.",
            "Field \"discount\" must not have a selection since it is a scalar.",
        ]
    );
    assert_eq!(errors[0].locations, vec![Position { line: 3, column: 5 }]);
}

#[test]
fn decodes_arguments_through_variables() {
    let user_id = UserId::random();
    let mut operation = query(vec![
        with_args(
            node("user", vec![leaf("name")]),
            vec![("id", InputValue::Variable("id".to_owned()))],
        ),
        with_args(
            node("memberType", vec![leaf("discount")]),
            vec![("id", InputValue::Enum("BUSINESS".to_owned()))],
        ),
    ]);
    operation.variables.push(VariableDefinition {
        name: "id".to_owned(),
        default: None,
    });
    let Value::Object(variables) = json!({ "id": user_id.to_string() }) else {
        panic!("object literal");
    };

    let bound = bind(&operation, &variables).expect("valid");

    assert_eq!(bound.fields[0].kind, FieldKind::Query(QueryField::User(user_id)));
    assert_eq!(
        bound.fields[1].kind,
        FieldKind::Query(QueryField::MemberType(MemberTypeId::Business))
    );
}

#[rstest]
#[case(
    vec![],
    "Field \"user\" argument \"id\" is required but not provided."
)]
#[case(
    vec![("id", InputValue::String("42".to_owned()))],
    "Argument \"id\" on field \"user\" has an invalid value"
)]
#[case(
    vec![("id", InputValue::Variable("missing".to_owned()))],
    "Variable \"$missing\" is not defined."
)]
fn rejects_bad_arguments(#[case] arguments: Vec<(&str, InputValue)>, #[case] expected: &str) {
    let operation = query(vec![with_args(node("user", vec![leaf("id")]), arguments)]);

    let errors = bind(&operation, &Map::new()).expect_err("invalid");

    assert!(
        errors[0].message.starts_with(expected),
        "unexpected message: {}",
        errors[0].message
    );
}

#[test]
fn rejects_unknown_arguments() {
    let operation = query(vec![with_args(
        node("users", vec![leaf("id")]),
        vec![("first", InputValue::Number(10_u64.into()))],
    )]);

    let errors = bind(&operation, &Map::new()).expect_err("invalid");

    assert_eq!(
        messages(&errors),
        vec!["Unknown argument \"first\" on field \"RootQueryType.users\"."]
    );
}

#[test]
fn binds_mutation_inputs() {
    let operation = Operation {
        kind: OperationKind::Mutation,
        name: Some("Seed".to_owned()),
        variables: Vec::new(),
        selection: vec![with_args(
            node("createUser", vec![leaf("id")]),
            vec![(
                "dto",
                InputValue::Object(vec![
                    ("name".to_owned(), InputValue::String("Ada".to_owned())),
                    ("balance".to_owned(), InputValue::Number(12_u64.into())),
                ]),
            )],
        )],
    };

    let bound = bind(&operation, &Map::new()).expect("valid");

    let FieldKind::Mutation(MutationField::CreateUser(draft)) = &bound.fields[0].kind else {
        panic!("createUser binds to its mutation");
    };
    assert_eq!(draft.name, "Ada");
}

#[test]
fn query_fields_are_not_mutations() {
    let operation = Operation {
        kind: OperationKind::Mutation,
        name: None,
        variables: Vec::new(),
        selection: vec![node("users", vec![leaf("id")])],
    };

    let errors = bind(&operation, &Map::new()).expect_err("invalid");

    assert_eq!(
        messages(&errors),
        vec!["Cannot query field \"users\" on type \"Mutations\"."]
    );
}
