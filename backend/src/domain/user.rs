//! Users: the root of the social graph.

use serde::Deserialize;

use super::ids::define_entity_id;

define_entity_id!(
    /// Stable user identifier.
    UserId,
    "user"
);

/// A registered user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: String,
    balance: f64,
}

impl User {
    /// Build a user from its stored fields.
    pub fn new(id: UserId, name: impl Into<String>, balance: f64) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
        }
    }

    /// Create a user with a freshly generated identifier.
    #[must_use]
    pub fn from_draft(draft: NewUser) -> Self {
        Self::new(UserId::random(), draft.name, draft.balance)
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Account balance.
    #[must_use]
    pub const fn balance(&self) -> f64 {
        self.balance
    }

    /// Overwrite the fields present in `patch`.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(balance) = patch.balance {
            self.balance = balance;
        }
    }
}

/// Input for `createUser`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewUser {
    pub name: String,
    pub balance: f64,
}

/// Input for `changeUser`; absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPatch {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

impl UserPatch {
    /// True when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.balance.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_only_touches_present_fields() {
        let mut user = User::new(UserId::random(), "Ada", 10.0);
        user.apply(&UserPatch {
            name: None,
            balance: Some(12.5),
        });
        assert_eq!(user.name(), "Ada");
        assert!((user.balance() - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn patch_decodes_partial_input() {
        let patch: UserPatch = serde_json::from_str(r#"{"name":"Grace"}"#).expect("decode");
        assert_eq!(patch.name.as_deref(), Some("Grace"));
        assert!(patch.balance.is_none());
        assert!(!patch.is_empty());
    }

    #[test]
    fn draft_rejects_unknown_fields() {
        let result = serde_json::from_str::<NewUser>(r#"{"name":"A","balance":1,"age":3}"#);
        assert!(result.is_err());
    }
}
