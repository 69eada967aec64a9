//! Static validation: binds a parsed operation to the schema.
//!
//! Binding reports every problem it finds, with locations, and performs no
//! storage access. An operation that binds cleanly only needs execution.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::document::{FieldNode, Operation, Position, UndefinedVariable, VariableDefinition};
use super::response::GraphError;
use super::schema::{
    BoundField, BoundOperation, FieldKind, MAX_DEPTH, MemberTypeField, MutationField,
    ObjectType, PostField, ProfileField, QueryField, UserField,
};
use crate::domain::Subscription;

/// Validate `operation` and decode its arguments.
///
/// # Errors
/// Returns every validation error found; the operation must not be executed.
pub fn bind(
    operation: &Operation,
    variables: &Map<String, Value>,
) -> Result<BoundOperation, Vec<GraphError>> {
    let mut binder = Binder {
        operation,
        variables,
        errors: Vec::new(),
        depth_exceeded: false,
    };
    let fields = binder.bind_selection(
        ObjectType::root(operation.kind),
        &operation.selection,
        0,
    );
    if binder.errors.is_empty() {
        Ok(BoundOperation {
            kind: operation.kind,
            fields,
        })
    } else {
        Err(binder.errors)
    }
}

struct Binder<'a> {
    operation: &'a Operation,
    variables: &'a Map<String, Value>,
    errors: Vec<GraphError>,
    depth_exceeded: bool,
}

impl Binder<'_> {
    fn bind_selection(
        &mut self,
        parent: ObjectType,
        nodes: &[FieldNode],
        depth: usize,
    ) -> Vec<BoundField> {
        nodes
            .iter()
            .filter_map(|node| self.bind_field(parent, node, depth))
            .collect()
    }

    fn bind_field(
        &mut self,
        parent: ObjectType,
        node: &FieldNode,
        depth: usize,
    ) -> Option<BoundField> {
        if depth > MAX_DEPTH {
            self.report_depth(node.position);
            return None;
        }

        let mut arguments = self.arguments(node)?;
        let kind = match resolve_field(parent, &node.name, &mut arguments) {
            Ok(kind) => kind,
            Err(message) => {
                self.report(message, node.position);
                return None;
            }
        };
        for unknown in arguments.unused() {
            self.report(
                format!(
                    "Unknown argument \"{unknown}\" on field \"{}.{}\".",
                    parent.name(),
                    node.name
                ),
                node.position,
            );
        }

        let selection = match kind.output().object {
            Some(object) if node.selection.is_empty() => {
                self.report(
                    format!(
                        "Field \"{}\" of type \"{}\" must have a selection of subfields.",
                        node.name,
                        object.name()
                    ),
                    node.position,
                );
                return None;
            }
            Some(object) => self.bind_selection(object, &node.selection, depth + 1),
            None if !node.selection.is_empty() => {
                self.report(
                    format!(
                        "Field \"{}\" must not have a selection since it is a scalar.",
                        node.name
                    ),
                    node.position,
                );
                return None;
            }
            None => Vec::new(),
        };

        Some(BoundField {
            response_key: node.response_key().to_owned(),
            kind,
            selection,
        })
    }

    fn arguments(&mut self, node: &FieldNode) -> Option<Arguments> {
        let operation = self.operation;
        let declared: &[VariableDefinition] = &operation.variables;
        let variables = self.variables;
        let mut values = Vec::with_capacity(node.arguments.len());
        for (name, value) in &node.arguments {
            match value.resolve(declared, variables) {
                Ok(resolved) => values.push((name.clone(), resolved, false)),
                Err(UndefinedVariable(variable)) => {
                    self.report(
                        format!("Variable \"${variable}\" is not defined."),
                        node.position,
                    );
                    return None;
                }
            }
        }
        Some(Arguments {
            field: node.name.clone(),
            values,
        })
    }

    fn report_depth(&mut self, position: Position) {
        if self.depth_exceeded {
            return;
        }
        self.depth_exceeded = true;
        let operation = self.operation;
        let name = operation.name.as_deref().unwrap_or("");
        self.report(
            format!("'{name}' exceeds maximum operation depth of {MAX_DEPTH}"),
            position,
        );
    }

    fn report(&mut self, message: String, position: Position) {
        self.errors
            .push(GraphError::validation(message, Some(position)));
    }
}

/// Arguments of one field, consumed as they are decoded.
struct Arguments {
    field: String,
    values: Vec<(String, Value, bool)>,
}

impl Arguments {
    fn required<T: DeserializeOwned>(&mut self, name: &str) -> Result<T, String> {
        let value = self
            .values
            .iter_mut()
            .find(|(candidate, _, _)| candidate == name)
            .map(|(_, value, used)| {
                *used = true;
                value.take()
            })
            .unwrap_or(Value::Null);
        if value.is_null() {
            return Err(format!(
                "Field \"{}\" argument \"{name}\" is required but not provided.",
                self.field
            ));
        }
        serde_json::from_value(value).map_err(|err| {
            format!(
                "Argument \"{name}\" on field \"{}\" has an invalid value: {err}.",
                self.field
            )
        })
    }

    fn unused(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .filter(|(_, _, used)| !used)
            .map(|(name, _, _)| name.as_str())
    }
}

fn resolve_field(
    parent: ObjectType,
    name: &str,
    args: &mut Arguments,
) -> Result<FieldKind, String> {
    if name == "__typename" {
        return Ok(FieldKind::Typename);
    }
    let kind = match (parent, name) {
        (ObjectType::Query, "users") => FieldKind::Query(QueryField::Users),
        (ObjectType::Query, "user") => FieldKind::Query(QueryField::User(args.required("id")?)),
        (ObjectType::Query, "posts") => FieldKind::Query(QueryField::Posts),
        (ObjectType::Query, "post") => FieldKind::Query(QueryField::Post(args.required("id")?)),
        (ObjectType::Query, "profiles") => FieldKind::Query(QueryField::Profiles),
        (ObjectType::Query, "profile") => {
            FieldKind::Query(QueryField::Profile(args.required("id")?))
        }
        (ObjectType::Query, "memberTypes") => FieldKind::Query(QueryField::MemberTypes),
        (ObjectType::Query, "memberType") => {
            FieldKind::Query(QueryField::MemberType(args.required("id")?))
        }

        (ObjectType::Mutation, "createUser") => {
            FieldKind::Mutation(MutationField::CreateUser(args.required("dto")?))
        }
        (ObjectType::Mutation, "changeUser") => FieldKind::Mutation(MutationField::ChangeUser(
            args.required("id")?,
            args.required("dto")?,
        )),
        (ObjectType::Mutation, "deleteUser") => {
            FieldKind::Mutation(MutationField::DeleteUser(args.required("id")?))
        }
        (ObjectType::Mutation, "createProfile") => {
            FieldKind::Mutation(MutationField::CreateProfile(args.required("dto")?))
        }
        (ObjectType::Mutation, "changeProfile") => {
            FieldKind::Mutation(MutationField::ChangeProfile(
                args.required("id")?,
                args.required("dto")?,
            ))
        }
        (ObjectType::Mutation, "deleteProfile") => {
            FieldKind::Mutation(MutationField::DeleteProfile(args.required("id")?))
        }
        (ObjectType::Mutation, "createPost") => {
            FieldKind::Mutation(MutationField::CreatePost(args.required("dto")?))
        }
        (ObjectType::Mutation, "changePost") => FieldKind::Mutation(MutationField::ChangePost(
            args.required("id")?,
            args.required("dto")?,
        )),
        (ObjectType::Mutation, "deletePost") => {
            FieldKind::Mutation(MutationField::DeletePost(args.required("id")?))
        }
        (ObjectType::Mutation, "subscribeTo") => FieldKind::Mutation(MutationField::SubscribeTo(
            Subscription::new(args.required("userId")?, args.required("authorId")?),
        )),
        (ObjectType::Mutation, "unsubscribeFrom") => {
            FieldKind::Mutation(MutationField::UnsubscribeFrom(Subscription::new(
                args.required("userId")?,
                args.required("authorId")?,
            )))
        }

        (ObjectType::User, "id") => FieldKind::User(UserField::Id),
        (ObjectType::User, "name") => FieldKind::User(UserField::Name),
        (ObjectType::User, "balance") => FieldKind::User(UserField::Balance),
        (ObjectType::User, "profile") => FieldKind::User(UserField::Profile),
        (ObjectType::User, "posts") => FieldKind::User(UserField::Posts),
        (ObjectType::User, "userSubscribedTo") => FieldKind::User(UserField::UserSubscribedTo),
        (ObjectType::User, "subscribedToUser") => FieldKind::User(UserField::SubscribedToUser),

        (ObjectType::Profile, "id") => FieldKind::Profile(ProfileField::Id),
        (ObjectType::Profile, "isMale") => FieldKind::Profile(ProfileField::IsMale),
        (ObjectType::Profile, "yearOfBirth") => FieldKind::Profile(ProfileField::YearOfBirth),
        (ObjectType::Profile, "memberType") => FieldKind::Profile(ProfileField::MemberType),

        (ObjectType::Post, "id") => FieldKind::Post(PostField::Id),
        (ObjectType::Post, "title") => FieldKind::Post(PostField::Title),
        (ObjectType::Post, "content") => FieldKind::Post(PostField::Content),

        (ObjectType::MemberType, "id") => FieldKind::MemberType(MemberTypeField::Id),
        (ObjectType::MemberType, "discount") => FieldKind::MemberType(MemberTypeField::Discount),
        (ObjectType::MemberType, "postsLimitPerMonth") => {
            FieldKind::MemberType(MemberTypeField::PostsLimitPerMonth)
        }

        _ => {
            return Err(format!(
                "Cannot query field \"{name}\" on type \"{}\".",
                parent.name()
            ));
        }
    };
    Ok(kind)
}

#[cfg(test)]
mod tests;
