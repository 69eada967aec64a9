//! Profiles: optional per-user details and membership tier.

use serde::Deserialize;

use super::ids::define_entity_id;
use super::{MemberTypeId, UserId};

define_entity_id!(
    /// Stable profile identifier.
    ProfileId,
    "profile"
);

/// Profile owned by exactly one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    id: ProfileId,
    is_male: bool,
    year_of_birth: i32,
    user_id: UserId,
    member_type_id: MemberTypeId,
}

impl Profile {
    /// Build a profile from its stored fields.
    #[must_use]
    pub const fn new(
        id: ProfileId,
        is_male: bool,
        year_of_birth: i32,
        user_id: UserId,
        member_type_id: MemberTypeId,
    ) -> Self {
        Self {
            id,
            is_male,
            year_of_birth,
            user_id,
            member_type_id,
        }
    }

    /// Create a profile with a freshly generated identifier.
    #[must_use]
    pub fn from_draft(draft: NewProfile) -> Self {
        Self::new(
            ProfileId::random(),
            draft.is_male,
            draft.year_of_birth,
            draft.user_id,
            draft.member_type_id,
        )
    }

    #[must_use]
    pub const fn id(&self) -> &ProfileId {
        &self.id
    }

    #[must_use]
    pub const fn is_male(&self) -> bool {
        self.is_male
    }

    #[must_use]
    pub const fn year_of_birth(&self) -> i32 {
        self.year_of_birth
    }

    /// Owner of the profile.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Tier the owner belongs to.
    #[must_use]
    pub const fn member_type_id(&self) -> MemberTypeId {
        self.member_type_id
    }

    /// Overwrite the fields present in `patch`.
    pub fn apply(&mut self, patch: &ProfilePatch) {
        if let Some(is_male) = patch.is_male {
            self.is_male = is_male;
        }
        if let Some(year) = patch.year_of_birth {
            self.year_of_birth = year;
        }
        if let Some(member_type_id) = patch.member_type_id {
            self.member_type_id = member_type_id;
        }
    }
}

/// Input for `createProfile`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewProfile {
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: UserId,
    pub member_type_id: MemberTypeId,
}

/// Input for `changeProfile`. The owner cannot be reassigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfilePatch {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub member_type_id: Option<MemberTypeId>,
}

impl ProfilePatch {
    /// True when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.is_male.is_none() && self.year_of_birth.is_none() && self.member_type_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_rejects_owner_change() {
        let result = serde_json::from_str::<ProfilePatch>(
            r#"{"userId":"3fa85f64-5717-4562-b3fc-2c963f66afa6"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn apply_switches_tier() {
        let mut profile = Profile::new(
            ProfileId::random(),
            true,
            1990,
            UserId::random(),
            MemberTypeId::Basic,
        );
        profile.apply(&ProfilePatch {
            member_type_id: Some(MemberTypeId::Business),
            ..ProfilePatch::default()
        });
        assert_eq!(profile.member_type_id(), MemberTypeId::Business);
        assert_eq!(profile.year_of_birth(), 1990);
    }

    #[test]
    fn draft_decodes_tier_and_owner() {
        let draft: NewProfile = serde_json::from_str(
            r#"{"isMale":false,"yearOfBirth":1985,"userId":"3fa85f64-5717-4562-b3fc-2c963f66afa6","memberTypeId":"BUSINESS"}"#,
        )
        .expect("decode");
        assert_eq!(draft.member_type_id, MemberTypeId::Business);
        assert!(!draft.is_male);
    }
}
