//! Parsed query tree handed to the engine by inbound adapters.
//!
//! The tree is untyped: field names and argument values are exactly what the
//! client sent. [`super::bind`] checks it against the schema.

use serde_json::{Map, Number, Value};

/// Line and column of a node in the request document, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Root operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

/// One executable operation selected from the request document.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,
    pub name: Option<String>,
    pub variables: Vec<VariableDefinition>,
    pub selection: Vec<FieldNode>,
}

/// Declared operation variable and its default, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDefinition {
    pub name: String,
    pub default: Option<Value>,
}

/// One field selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<(String, InputValue)>,
    pub selection: Vec<FieldNode>,
    pub position: Position,
}

impl FieldNode {
    /// Key the field's value is stored under in the response.
    #[must_use]
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// Argument value as written in the document.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Null,
    Boolean(bool),
    Number(Number),
    String(String),
    Enum(String),
    List(Vec<InputValue>),
    Object(Vec<(String, InputValue)>),
    Variable(String),
}

/// Raised when a value refers to a variable the operation does not declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndefinedVariable(pub String);

impl InputValue {
    /// Substitute variables and convert to JSON.
    ///
    /// Declared variables missing from `supplied` fall back to their default,
    /// then to `null`.
    pub fn resolve(
        &self,
        declared: &[VariableDefinition],
        supplied: &Map<String, Value>,
    ) -> Result<Value, UndefinedVariable> {
        Ok(match self {
            Self::Null => Value::Null,
            Self::Boolean(value) => Value::Bool(*value),
            Self::Number(value) => Value::Number(value.clone()),
            Self::String(value) | Self::Enum(value) => Value::String(value.clone()),
            Self::List(items) => Value::Array(
                items
                    .iter()
                    .map(|item| item.resolve(declared, supplied))
                    .collect::<Result<_, _>>()?,
            ),
            Self::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, item)| {
                        Ok::<_, UndefinedVariable>((key.clone(), item.resolve(declared, supplied)?))
                    })
                    .collect::<Result<_, _>>()?,
            ),
            Self::Variable(name) => {
                let definition = declared
                    .iter()
                    .find(|definition| definition.name == *name)
                    .ok_or_else(|| UndefinedVariable(name.clone()))?;
                supplied
                    .get(name)
                    .or(definition.default.as_ref())
                    .cloned()
                    .unwrap_or(Value::Null)
            }
        })
    }
}
