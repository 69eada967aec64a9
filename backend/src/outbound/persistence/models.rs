//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them to
//! domain entities at the boundary.

use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::StorageError;
use crate::domain::{
    MemberType, MemberTypeId, Post, PostId, PostPatch, Profile, ProfileId, ProfilePatch,
    Subscription, User, UserId, UserPatch,
};

use super::schema::{member_types, posts, profiles, subscriptions, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub balance: f64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self::new(UserId::from_uuid(row.id), row.name, row.balance)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub balance: f64,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            name: user.name(),
            balance: user.balance(),
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub name: Option<&'a str>,
    pub balance: Option<f64>,
}

impl<'a> From<&'a UserPatch> for UserChangeset<'a> {
    fn from(patch: &'a UserPatch) -> Self {
        Self {
            name: patch.name.as_deref(),
            balance: patch.balance,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = member_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MemberTypeRow {
    pub id: String,
    pub discount: f64,
    pub posts_limit_per_month: i32,
}

/// Parse a stored tier key; unknown values mean the table drifted from the
/// enum and are reported as query failures.
pub(crate) fn parse_member_type_id(raw: &str) -> Result<MemberTypeId, StorageError> {
    raw.parse()
        .map_err(|_| StorageError::query(format!("unknown member type `{raw}` in storage")))
}

impl TryFrom<MemberTypeRow> for MemberType {
    type Error = StorageError;

    fn try_from(row: MemberTypeRow) -> Result<Self, Self::Error> {
        Ok(Self::new(
            parse_member_type_id(&row.id)?,
            row.discount,
            row.posts_limit_per_month,
        ))
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: Uuid,
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: String,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = StorageError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Self::new(
            ProfileId::from_uuid(row.id),
            row.is_male,
            row.year_of_birth,
            UserId::from_uuid(row.user_id),
            parse_member_type_id(&row.member_type_id)?,
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profiles)]
pub(crate) struct NewProfileRow {
    pub id: Uuid,
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: &'static str,
}

impl From<&Profile> for NewProfileRow {
    fn from(profile: &Profile) -> Self {
        Self {
            id: *profile.id().as_uuid(),
            is_male: profile.is_male(),
            year_of_birth: profile.year_of_birth(),
            user_id: *profile.user_id().as_uuid(),
            member_type_id: profile.member_type_id().as_str(),
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = profiles)]
pub(crate) struct ProfileChangeset {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub member_type_id: Option<&'static str>,
}

impl From<&ProfilePatch> for ProfileChangeset {
    fn from(patch: &ProfilePatch) -> Self {
        Self {
            is_male: patch.is_male,
            year_of_birth: patch.year_of_birth,
            member_type_id: patch.member_type_id.map(MemberTypeId::as_str),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self::new(
            PostId::from_uuid(row.id),
            row.title,
            row.content,
            UserId::from_uuid(row.author_id),
        )
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub content: &'a str,
    pub author_id: Uuid,
}

impl<'a> From<&'a Post> for NewPostRow<'a> {
    fn from(post: &'a Post) -> Self {
        Self {
            id: *post.id().as_uuid(),
            title: post.title(),
            content: post.content(),
            author_id: *post.author_id().as_uuid(),
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
pub(crate) struct PostChangeset<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
}

impl<'a> From<&'a PostPatch> for PostChangeset<'a> {
    fn from(patch: &'a PostPatch) -> Self {
        Self {
            title: patch.title.as_deref(),
            content: patch.content.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscriptions)]
pub(crate) struct SubscriptionRow {
    pub subscriber_id: Uuid,
    pub author_id: Uuid,
}

impl From<&Subscription> for SubscriptionRow {
    fn from(edge: &Subscription) -> Self {
        Self {
            subscriber_id: *edge.subscriber_id().as_uuid(),
            author_id: *edge.author_id().as_uuid(),
        }
    }
}
