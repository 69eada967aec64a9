//! GraphQL document adapter.
//!
//! Parses request text with `async-graphql-parser` and lowers the selected
//! operation into the domain's untyped [`Operation`] tree. Only the subset
//! the graph executes is accepted: queries and mutations built from plain
//! fields, aliases, arguments and variables.

use async_graphql_parser::types::{
    DocumentOperations, ExecutableDocument, Field, OperationDefinition, OperationType, Selection,
    SelectionSet,
};
use async_graphql_parser::{Pos, Positioned};
use async_graphql_value::{Name, Value};

use crate::domain::graph::{
    FieldNode, GraphError, InputValue, Operation, OperationKind, Position, VariableDefinition,
};

/// Parse `query` and pick the operation to run.
///
/// # Errors
///
/// Returns validation errors for syntax errors, unsupported constructs
/// (fragments, directives, subscriptions) and ambiguous or unknown operation
/// names.
pub fn parse_request(
    query: &str,
    operation_name: Option<&str>,
) -> Result<Operation, Vec<GraphError>> {
    let document = async_graphql_parser::parse_query(query).map_err(|err| {
        let position = err.positions().next().map(position);
        vec![GraphError::validation(err.to_string(), position)]
    })?;
    if let Some((_, fragment)) = document.fragments.iter().next() {
        return Err(vec![unsupported("Fragments", fragment.pos)]);
    }
    let (name, definition) = select_operation(document, operation_name)?;
    lower_operation(name, definition)
}

fn select_operation(
    document: ExecutableDocument,
    requested: Option<&str>,
) -> Result<(Option<String>, Positioned<OperationDefinition>), Vec<GraphError>> {
    let unknown = |name: &str| {
        vec![GraphError::validation(
            format!("Unknown operation named \"{name}\"."),
            None,
        )]
    };
    match (document.operations, requested) {
        (DocumentOperations::Single(definition), None) => Ok((None, definition)),
        (DocumentOperations::Single(_), Some(name)) => Err(unknown(name)),
        (DocumentOperations::Multiple(mut named), Some(name)) => named
            .remove(name)
            .map(|definition| (Some(name.to_owned()), definition))
            .ok_or_else(|| unknown(name)),
        (DocumentOperations::Multiple(named), None) => {
            let mut operations = named.into_iter();
            match (operations.next(), operations.next()) {
                (Some((name, definition)), None) => Ok((Some(name.to_string()), definition)),
                _ => Err(vec![GraphError::validation(
                    "Must provide operation name if query contains multiple operations.",
                    None,
                )]),
            }
        }
    }
}

fn lower_operation(
    name: Option<String>,
    definition: Positioned<OperationDefinition>,
) -> Result<Operation, Vec<GraphError>> {
    let Positioned { pos, node } = definition;
    let kind = match node.ty {
        OperationType::Query => OperationKind::Query,
        OperationType::Mutation => OperationKind::Mutation,
        OperationType::Subscription => return Err(vec![unsupported("Subscriptions", pos)]),
    };

    let mut errors = Vec::new();
    if let Some(directive) = node.directives.first() {
        errors.push(unsupported("Directives", directive.pos));
    }
    let variables = node
        .variable_definitions
        .into_iter()
        .filter_map(|definition| {
            let Positioned { pos, node } = definition;
            let default = match node.default_value.map(|value| value.node.into_json()) {
                Some(Ok(json)) => Some(json),
                Some(Err(err)) => {
                    errors.push(GraphError::validation(
                        format!("Default value of \"${}\" is invalid: {err}.", node.name.node),
                        Some(position(pos)),
                    ));
                    return None;
                }
                None => None,
            };
            Some(VariableDefinition {
                name: node.name.node.to_string(),
                default,
            })
        })
        .collect();
    let selection = lower_selection(node.selection_set.node, &mut errors);

    if errors.is_empty() {
        Ok(Operation {
            kind,
            name,
            variables,
            selection,
        })
    } else {
        Err(errors)
    }
}

fn lower_selection(set: SelectionSet, errors: &mut Vec<GraphError>) -> Vec<FieldNode> {
    set.items
        .into_iter()
        .filter_map(|item| match item.node {
            Selection::Field(field) => Some(lower_field(field, errors)),
            Selection::FragmentSpread(_) | Selection::InlineFragment(_) => {
                errors.push(unsupported("Fragments", item.pos));
                None
            }
        })
        .collect()
}

fn lower_field(field: Positioned<Field>, errors: &mut Vec<GraphError>) -> FieldNode {
    let Positioned { pos, node } = field;
    if let Some(directive) = node.directives.first() {
        errors.push(unsupported("Directives", directive.pos));
    }
    FieldNode {
        alias: node.alias.map(|alias| alias.node.to_string()),
        name: node.name.node.to_string(),
        arguments: node
            .arguments
            .into_iter()
            .map(|(name, value)| (name.node.to_string(), input_value(value.node)))
            .collect(),
        selection: lower_selection(node.selection_set.node, errors),
        position: position(pos),
    }
}

fn input_value(value: Value) -> InputValue {
    match value {
        Value::Variable(name) => InputValue::Variable(name.to_string()),
        Value::Null => InputValue::Null,
        Value::Number(number) => InputValue::Number(number),
        Value::String(text) => InputValue::String(text),
        Value::Boolean(flag) => InputValue::Boolean(flag),
        Value::Binary(bytes) => InputValue::String(String::from_utf8_lossy(&bytes).into_owned()),
        Value::Enum(name) => InputValue::Enum(name.to_string()),
        Value::List(items) => InputValue::List(items.into_iter().map(input_value).collect()),
        Value::Object(fields) => InputValue::Object(
            fields
                .into_iter()
                .map(|(key, value): (Name, Value)| (key.to_string(), input_value(value)))
                .collect(),
        ),
    }
}

fn unsupported(construct: &str, pos: Pos) -> GraphError {
    GraphError::validation(
        format!("{construct} are not supported."),
        Some(position(pos)),
    )
}

const fn position(pos: Pos) -> Position {
    Position {
        line: pos.line,
        column: pos.column,
    }
}

#[cfg(test)]
mod tests;
