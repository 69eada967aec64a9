//! The fixed graph schema.
//!
//! Fields are bound to these enums during validation, so execution dispatches
//! on field identity and never on names.

use super::document::OperationKind;
use crate::domain::{
    MemberTypeId, NewPost, NewProfile, NewUser, PostId, PostPatch, ProfileId, ProfilePatch,
    Subscription, UserId, UserPatch,
};

/// Maximum nesting below a root field. Root fields sit at depth 0.
pub const MAX_DEPTH: usize = 5;

/// Object types of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Query,
    Mutation,
    User,
    Profile,
    Post,
    MemberType,
}

impl ObjectType {
    /// Type name as exposed through `__typename`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Query => "RootQueryType",
            Self::Mutation => "Mutations",
            Self::User => "User",
            Self::Profile => "Profile",
            Self::Post => "Post",
            Self::MemberType => "MemberType",
        }
    }

    #[must_use]
    pub const fn root(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Query => Self::Query,
            OperationKind::Mutation => Self::Mutation,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryField {
    Users,
    User(UserId),
    Posts,
    Post(PostId),
    Profiles,
    Profile(ProfileId),
    MemberTypes,
    MemberType(MemberTypeId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationField {
    CreateUser(NewUser),
    ChangeUser(UserId, UserPatch),
    DeleteUser(UserId),
    CreateProfile(NewProfile),
    ChangeProfile(ProfileId, ProfilePatch),
    DeleteProfile(ProfileId),
    CreatePost(NewPost),
    ChangePost(PostId, PostPatch),
    DeletePost(PostId),
    SubscribeTo(Subscription),
    UnsubscribeFrom(Subscription),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Id,
    Name,
    Balance,
    Profile,
    Posts,
    UserSubscribedTo,
    SubscribedToUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Id,
    IsMale,
    YearOfBirth,
    MemberType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostField {
    Id,
    Title,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberTypeField {
    Id,
    Discount,
    PostsLimitPerMonth,
}

/// A field bound to its schema definition, arguments decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Typename,
    Query(QueryField),
    Mutation(MutationField),
    User(UserField),
    Profile(ProfileField),
    Post(PostField),
    MemberType(MemberTypeField),
}

/// Shape of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputShape {
    /// Object type of the value, `None` for scalars.
    pub object: Option<ObjectType>,
    pub list: bool,
    pub nullable: bool,
}

impl OutputShape {
    const fn scalar() -> Self {
        Self {
            object: None,
            list: false,
            nullable: false,
        }
    }

    const fn one(object: ObjectType, nullable: bool) -> Self {
        Self {
            object: Some(object),
            list: false,
            nullable,
        }
    }

    const fn many(object: ObjectType) -> Self {
        Self {
            object: Some(object),
            list: true,
            nullable: false,
        }
    }
}

impl FieldKind {
    /// Output shape, used to check selection sets and nullability.
    #[must_use]
    pub fn output(&self) -> OutputShape {
        match self {
            Self::Query(field) => match field {
                QueryField::Users => OutputShape::many(ObjectType::User),
                QueryField::User(_) => OutputShape::one(ObjectType::User, true),
                QueryField::Posts => OutputShape::many(ObjectType::Post),
                QueryField::Post(_) => OutputShape::one(ObjectType::Post, true),
                QueryField::Profiles => OutputShape::many(ObjectType::Profile),
                QueryField::Profile(_) => OutputShape::one(ObjectType::Profile, true),
                QueryField::MemberTypes => OutputShape::many(ObjectType::MemberType),
                QueryField::MemberType(_) => OutputShape::one(ObjectType::MemberType, true),
            },
            Self::Mutation(field) => match field {
                MutationField::CreateUser(_) | MutationField::ChangeUser(..) => {
                    OutputShape::one(ObjectType::User, false)
                }
                MutationField::CreateProfile(_) | MutationField::ChangeProfile(..) => {
                    OutputShape::one(ObjectType::Profile, false)
                }
                MutationField::CreatePost(_) | MutationField::ChangePost(..) => {
                    OutputShape::one(ObjectType::Post, false)
                }
                MutationField::DeleteUser(_)
                | MutationField::DeleteProfile(_)
                | MutationField::DeletePost(_)
                | MutationField::SubscribeTo(_)
                | MutationField::UnsubscribeFrom(_) => OutputShape::scalar(),
            },
            Self::User(UserField::Profile) => OutputShape::one(ObjectType::Profile, true),
            Self::User(UserField::Posts) => OutputShape::many(ObjectType::Post),
            Self::User(UserField::UserSubscribedTo | UserField::SubscribedToUser) => {
                OutputShape::many(ObjectType::User)
            }
            Self::Profile(ProfileField::MemberType) => {
                OutputShape::one(ObjectType::MemberType, false)
            }
            Self::Typename
            | Self::User(_)
            | Self::Profile(_)
            | Self::Post(_)
            | Self::MemberType(_) => OutputShape::scalar(),
        }
    }
}

/// Field with its bound sub-selection.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundField {
    pub response_key: String,
    pub kind: FieldKind,
    pub selection: Vec<BoundField>,
}

/// Operation that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundOperation {
    pub kind: OperationKind,
    pub fields: Vec<BoundField>,
}
