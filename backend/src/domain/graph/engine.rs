//! Breadth-first execution of bound operations.
//!
//! The engine walks the selection tree one level at a time. Every
//! relationship field of a level registers its key with the request's batch
//! loaders before any of them is awaited, so each loader fetches once per
//! level no matter how many parents ask. Values are written into an arena
//! and rendered to JSON at the end.

use futures_util::future::join_all;
use serde_json::Value;
use tracing::warn;

use super::document::OperationKind;
use super::response::{GraphError, GraphResponse, PathSegment};
use super::schema::{
    BoundField, BoundOperation, FieldKind, MemberTypeField, MutationField, ObjectType, PostField,
    ProfileField, QueryField, UserField,
};
use crate::domain::context::RequestContext;
use crate::domain::loader::{LoadHandle, SubscriptionBatch, ToMany, ToOne};
use crate::domain::mutations::MutationHandlers;
use crate::domain::providers::{
    EntityProvider, MemberTypesProvider, PostsProvider, ProfilesProvider, Providers,
};
use crate::domain::{Error, MemberType, Post, Profile, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

enum Node {
    Null,
    Leaf(Value),
    Object(Vec<(String, NodeId)>),
    List(Vec<NodeId>),
}

#[derive(Default)]
struct ResponseTree {
    nodes: Vec<Node>,
}

impl ResponseTree {
    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn set(&mut self, id: NodeId, node: Node) {
        if let Some(slot) = self.nodes.get_mut(id.0) {
            *slot = node;
        }
    }

    fn attach(&mut self, object: NodeId, key: String, child: NodeId) {
        if let Some(Node::Object(fields)) = self.nodes.get_mut(object.0) {
            fields.push((key, child));
        }
    }

    fn render(&self, id: NodeId) -> Value {
        match self.nodes.get(id.0) {
            Some(Node::Leaf(value)) => value.clone(),
            Some(Node::Object(fields)) => Value::Object(
                fields
                    .iter()
                    .map(|(key, child)| (key.clone(), self.render(*child)))
                    .collect(),
            ),
            Some(Node::List(items)) => {
                Value::Array(items.iter().map(|item| self.render(*item)).collect())
            }
            Some(Node::Null) | None => Value::Null,
        }
    }
}

#[derive(Debug, Clone)]
enum Entity {
    User(User),
    Profile(Profile),
    Post(Post),
    MemberType(MemberType),
}

impl Entity {
    const fn object_type(&self) -> ObjectType {
        match self {
            Self::User(_) => ObjectType::User,
            Self::Profile(_) => ObjectType::Profile,
            Self::Post(_) => ObjectType::Post,
            Self::MemberType(_) => ObjectType::MemberType,
        }
    }
}

enum Loaded {
    One(Option<Entity>),
    Many(Vec<Entity>),
}

impl Loaded {
    fn many<T>(items: Vec<T>, wrap: fn(T) -> Entity) -> Self {
        Self::Many(items.into_iter().map(wrap).collect())
    }
}

/// A relationship load registered with one of the request's loaders.
enum PendingLoad<'c> {
    Profile(LoadHandle<'c, ToOne<ProfilesProvider>>),
    Posts(LoadHandle<'c, ToMany<PostsProvider>>),
    MemberType(LoadHandle<'c, ToOne<MemberTypesProvider>>),
    Users(LoadHandle<'c, SubscriptionBatch>),
}

impl PendingLoad<'_> {
    async fn resolve(self) -> Result<Loaded, Error> {
        Ok(match self {
            Self::Profile(handle) => Loaded::One(handle.resolve().await?.map(Entity::Profile)),
            Self::Posts(handle) => {
                Loaded::many(handle.resolve().await?.unwrap_or_default(), Entity::Post)
            }
            Self::MemberType(handle) => {
                Loaded::One(handle.resolve().await?.map(Entity::MemberType))
            }
            Self::Users(handle) => {
                Loaded::many(handle.resolve().await?.unwrap_or_default(), Entity::User)
            }
        })
    }
}

/// How one field of an object gets its value.
enum Resolution<'c> {
    Value(Value),
    Load(PendingLoad<'c>),
}

/// Object whose selection still needs resolving.
struct ObjectTask<'q> {
    node: NodeId,
    entity: Entity,
    selection: &'q [BoundField],
    path: Vec<PathSegment>,
}

/// Field slot waiting for a relationship load.
struct Target<'q> {
    node: NodeId,
    field: &'q BoundField,
    path: Vec<PathSegment>,
}

pub(crate) struct Engine<'a> {
    context: &'a RequestContext,
    providers: &'a Providers,
    mutations: &'a MutationHandlers,
    tree: ResponseTree,
    errors: Vec<GraphError>,
}

impl<'a> Engine<'a> {
    pub(crate) fn new(
        context: &'a RequestContext,
        providers: &'a Providers,
        mutations: &'a MutationHandlers,
    ) -> Self {
        Self {
            context,
            providers,
            mutations,
            tree: ResponseTree::default(),
            errors: Vec::new(),
        }
    }

    pub(crate) async fn run(mut self, operation: &BoundOperation) -> GraphResponse {
        let root = self.tree.push(Node::Object(Vec::new()));
        match operation.kind {
            OperationKind::Query => self.run_query(root, &operation.fields).await,
            OperationKind::Mutation => self.run_mutations(root, &operation.fields).await,
        }
        GraphResponse {
            data: Some(self.tree.render(root)),
            errors: self.errors,
        }
    }

    async fn run_query<'q>(&mut self, root: NodeId, fields: &'q [BoundField]) {
        let providers = self.providers;
        let mut targets = Vec::new();
        let mut fetches = Vec::new();
        for field in fields {
            let node = self.child(root, field);
            match &field.kind {
                FieldKind::Query(query) => {
                    fetches.push(fetch_root(providers, query));
                    targets.push(Target {
                        node,
                        field,
                        path: vec![PathSegment::Key(field.response_key.clone())],
                    });
                }
                _ => self.set_typename(node, ObjectType::Query),
            }
        }

        let results = join_all(fetches).await;
        let mut wave = Vec::new();
        for (target, result) in targets.into_iter().zip(results) {
            self.settle(target, result, &mut wave);
        }
        self.resolve_waves(wave).await;
    }

    async fn run_mutations<'q>(&mut self, root: NodeId, fields: &'q [BoundField]) {
        for field in fields {
            let node = self.child(root, field);
            let FieldKind::Mutation(mutation) = &field.kind else {
                self.set_typename(node, ObjectType::Mutation);
                continue;
            };
            let target = Target {
                node,
                field,
                path: vec![PathSegment::Key(field.response_key.clone())],
            };

            match self.apply(mutation).await {
                Ok(Mutated::Entity(entity)) => {
                    let mut wave = Vec::new();
                    self.settle(target, Ok(Loaded::One(Some(entity))), &mut wave);
                    self.resolve_waves(wave).await;
                }
                Ok(Mutated::Id(id)) => self.tree.set(node, Node::Leaf(Value::String(id))),
                Err(error) => self.fail(node, &error, target.path),
            }
        }
    }

    async fn apply(&self, mutation: &MutationField) -> Result<Mutated, Error> {
        let handlers = self.mutations;
        let outcome = match mutation.clone() {
            MutationField::CreateUser(draft) => {
                Mutated::Entity(Entity::User(handlers.create_user(draft).await?))
            }
            MutationField::ChangeUser(id, patch) => {
                Mutated::Entity(Entity::User(handlers.change_user(id, patch).await?))
            }
            MutationField::DeleteUser(id) => Mutated::id(handlers.delete_user(id).await?),
            MutationField::CreateProfile(draft) => {
                Mutated::Entity(Entity::Profile(handlers.create_profile(draft).await?))
            }
            MutationField::ChangeProfile(id, patch) => {
                Mutated::Entity(Entity::Profile(handlers.change_profile(id, patch).await?))
            }
            MutationField::DeleteProfile(id) => Mutated::id(handlers.delete_profile(id).await?),
            MutationField::CreatePost(draft) => {
                Mutated::Entity(Entity::Post(handlers.create_post(draft).await?))
            }
            MutationField::ChangePost(id, patch) => {
                Mutated::Entity(Entity::Post(handlers.change_post(id, patch).await?))
            }
            MutationField::DeletePost(id) => Mutated::id(handlers.delete_post(id).await?),
            MutationField::SubscribeTo(edge) => Mutated::id(handlers.subscribe_to(edge).await?),
            MutationField::UnsubscribeFrom(edge) => {
                Mutated::id(handlers.unsubscribe_from(edge).await?)
            }
        };
        // Cached relationship results may predate the write.
        self.context.invalidate();
        Ok(outcome)
    }

    async fn resolve_waves<'q>(&mut self, mut wave: Vec<ObjectTask<'q>>) {
        let context = self.context;
        while !wave.is_empty() {
            let mut targets = Vec::new();
            let mut loads = Vec::new();
            for task in wave.drain(..) {
                self.expand(context, task, &mut targets, &mut loads);
            }

            let results = join_all(loads.into_iter().map(PendingLoad::resolve)).await;
            for (target, result) in targets.into_iter().zip(results) {
                self.settle(target, result, &mut wave);
            }
        }
    }

    /// Write scalar fields of `task` and register its relationship loads.
    fn expand<'q>(
        &mut self,
        context: &'a RequestContext,
        task: ObjectTask<'q>,
        targets: &mut Vec<Target<'q>>,
        loads: &mut Vec<PendingLoad<'a>>,
    ) {
        for field in task.selection {
            let node = self.child(task.node, field);
            let mut path = task.path.clone();
            path.push(PathSegment::Key(field.response_key.clone()));

            match resolve_field(context, &field.kind, &task.entity) {
                Some(Resolution::Value(value)) => self.tree.set(node, Node::Leaf(value)),
                Some(Resolution::Load(load)) => {
                    targets.push(Target { node, field, path });
                    loads.push(load);
                }
                None => self.record(GraphError::field(
                    &Error::internal(format!(
                        "field \"{}\" is not defined on {}",
                        field.response_key,
                        task.entity.object_type().name()
                    )),
                    path,
                )),
            }
        }
    }

    /// Store a loaded value at `target`, queueing any objects for the next wave.
    fn settle<'q>(
        &mut self,
        target: Target<'q>,
        result: Result<Loaded, Error>,
        wave: &mut Vec<ObjectTask<'q>>,
    ) {
        let Target { node, field, path } = target;
        match result {
            Ok(Loaded::One(Some(entity))) => {
                self.tree.set(node, Node::Object(Vec::new()));
                wave.push(ObjectTask {
                    node,
                    entity,
                    selection: &field.selection,
                    path,
                });
            }
            Ok(Loaded::One(None)) => {
                if !field.kind.output().nullable {
                    self.record(GraphError::contract_violation(
                        format!(
                            "non-null field \"{}\" resolved to no value",
                            field.response_key
                        ),
                        path,
                    ));
                }
            }
            Ok(Loaded::Many(entities)) => {
                let mut items = Vec::with_capacity(entities.len());
                for (index, entity) in entities.into_iter().enumerate() {
                    let item = self.tree.push(Node::Object(Vec::new()));
                    let mut item_path = path.clone();
                    item_path.push(PathSegment::Index(index));
                    wave.push(ObjectTask {
                        node: item,
                        entity,
                        selection: &field.selection,
                        path: item_path,
                    });
                    items.push(item);
                }
                self.tree.set(node, Node::List(items));
            }
            Err(error) => self.fail(node, &error, path),
        }
    }

    fn child(&mut self, parent: NodeId, field: &BoundField) -> NodeId {
        let node = self.tree.push(Node::Null);
        self.tree.attach(parent, field.response_key.clone(), node);
        node
    }

    fn set_typename(&mut self, node: NodeId, object: ObjectType) {
        self.tree
            .set(node, Node::Leaf(Value::String(object.name().to_owned())));
    }

    fn fail(&mut self, node: NodeId, error: &Error, path: Vec<PathSegment>) {
        self.tree.set(node, Node::Null);
        self.record(GraphError::field(error, path));
    }

    fn record(&mut self, error: GraphError) {
        warn!(
            path = ?error.path,
            code = error.code().unwrap_or_default(),
            message = %error.message,
            "field resolution failed"
        );
        self.errors.push(error);
    }
}

enum Mutated {
    Entity(Entity),
    Id(String),
}

impl Mutated {
    fn id(id: impl ToString) -> Self {
        Self::Id(id.to_string())
    }
}

async fn fetch_root(providers: &Providers, field: &QueryField) -> Result<Loaded, Error> {
    Ok(match field {
        QueryField::Users => Loaded::many(providers.users.list_all().await?, Entity::User),
        QueryField::User(id) => {
            let user = providers.users.get_by_id(id).await?;
            Loaded::One(Some(Entity::User(
                user.ok_or_else(|| Error::not_found(format!("user {id} does not exist")))?,
            )))
        }
        QueryField::Posts => Loaded::many(providers.posts.list_all().await?, Entity::Post),
        QueryField::Post(id) => {
            let post = providers.posts.get_by_id(id).await?;
            Loaded::One(Some(Entity::Post(
                post.ok_or_else(|| Error::not_found(format!("post {id} does not exist")))?,
            )))
        }
        QueryField::Profiles => {
            Loaded::many(providers.profiles.list_all().await?, Entity::Profile)
        }
        QueryField::Profile(id) => {
            let profile = providers.profiles.get_by_id(id).await?;
            Loaded::One(Some(Entity::Profile(profile.ok_or_else(|| {
                Error::not_found(format!("profile {id} does not exist"))
            })?)))
        }
        QueryField::MemberTypes => {
            Loaded::many(providers.member_types.list_all().await?, Entity::MemberType)
        }
        QueryField::MemberType(id) => {
            let member_type = providers.member_types.get_by_id(id).await?;
            Loaded::One(Some(Entity::MemberType(member_type.ok_or_else(|| {
                Error::not_found(format!("member type {id} does not exist"))
            })?)))
        }
    })
}

fn resolve_field<'c>(
    context: &'c RequestContext,
    kind: &FieldKind,
    entity: &Entity,
) -> Option<Resolution<'c>> {
    let resolution = match (kind, entity) {
        (FieldKind::Typename, _) => string(entity.object_type().name()),
        (FieldKind::User(field), Entity::User(user)) => match field {
            UserField::Id => string(user.id()),
            UserField::Name => string(user.name()),
            UserField::Balance => Resolution::Value(Value::from(user.balance())),
            UserField::Profile => {
                Resolution::Load(PendingLoad::Profile(context.profile.load(*user.id())))
            }
            UserField::Posts => {
                Resolution::Load(PendingLoad::Posts(context.posts.load(*user.id())))
            }
            UserField::UserSubscribedTo => Resolution::Load(PendingLoad::Users(
                context.user_subscribed_to.load(*user.id()),
            )),
            UserField::SubscribedToUser => Resolution::Load(PendingLoad::Users(
                context.subscribed_to_user.load(*user.id()),
            )),
        },
        (FieldKind::Profile(field), Entity::Profile(profile)) => match field {
            ProfileField::Id => string(profile.id()),
            ProfileField::IsMale => Resolution::Value(Value::Bool(profile.is_male())),
            ProfileField::YearOfBirth => Resolution::Value(Value::from(profile.year_of_birth())),
            ProfileField::MemberType => Resolution::Load(PendingLoad::MemberType(
                context.member_type.load(profile.member_type_id()),
            )),
        },
        (FieldKind::Post(field), Entity::Post(post)) => match field {
            PostField::Id => string(post.id()),
            PostField::Title => string(post.title()),
            PostField::Content => string(post.content()),
        },
        (FieldKind::MemberType(field), Entity::MemberType(member_type)) => match field {
            MemberTypeField::Id => string(member_type.id()),
            MemberTypeField::Discount => Resolution::Value(Value::from(member_type.discount())),
            MemberTypeField::PostsLimitPerMonth => {
                Resolution::Value(Value::from(member_type.posts_limit_per_month()))
            }
        },
        _ => return None,
    };
    Some(resolution)
}

fn string<'c>(value: impl ToString) -> Resolution<'c> {
    Resolution::Value(Value::String(value.to_string()))
}
