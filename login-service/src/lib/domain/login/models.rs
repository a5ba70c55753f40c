use std::fmt::Display;

use auth::Claims;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::login::errors::IdentityError;
use crate::domain::login::errors::RoleError;

/// Identifier of a stored user account.
///
/// Matches the `person_id` column of the shared accounts table, so it is an
/// `i64` rather than a UUID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a user account.
///
/// Serialized as its numeric database tag on every surface: request bodies,
/// token claims and the `role_id` column all speak the same numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Role {
    Recruiter,
    Applicant,
}

impl TryFrom<i32> for Role {
    type Error = RoleError;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(Role::Recruiter),
            2 => Ok(Role::Applicant),
            unknown => Err(RoleError::UnknownTag(unknown)),
        }
    }
}

impl From<Role> for i32 {
    fn from(role: Role) -> Self {
        match role {
            Role::Recruiter => 1,
            Role::Applicant => 2,
        }
    }
}

/// A username-or-email login handle, guaranteed non-empty.
///
/// A single opaque string matched against both columns; the service never
/// guesses which one the client meant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity(String);

impl Identity {
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentityError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored user account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub role: Role,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

/// The subset of a user account embedded in token claims.
///
/// The password hash never travels here. Absent handles are omitted from the
/// serialized form entirely, so tokens stay free of null keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub id: UserId,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserSnapshot {
    /// Human-readable handle for log lines: the username when present,
    /// falling back to the email.
    pub fn label(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown")
    }
}

impl From<&User> for UserSnapshot {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// Token claims carried by every login and reset token this service mints.
pub type UserClaims = Claims<UserSnapshot>;

/// Outcome of a credential check.
///
/// Verification failures are outcomes rather than errors: the service
/// reports what it found and leaves the response policy to the caller. The
/// matched user travels with the non-success variants that have one, so the
/// caller can mint a recovery token without a second lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthOutcome {
    /// Credentials check out.
    Success(User),
    /// The account exists but has no password on record yet.
    MissingPassword(User),
    /// The password does not match the stored hash.
    WrongPassword(User),
    /// No account matched, or one matched but not with the requested role.
    WrongIdentity(Option<User>),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId(7),
            role: Role::Applicant,
            username: Some("jdoe".to_string()),
            email: None,
            password_hash: Some("$2a$10$abcdefghijklmnopqrstuv".to_string()),
        }
    }

    #[test]
    fn test_role_serializes_as_database_tag() {
        assert_eq!(serde_json::to_value(Role::Recruiter).unwrap(), json!(1));
        assert_eq!(serde_json::to_value(Role::Applicant).unwrap(), json!(2));
    }

    #[test]
    fn test_role_rejects_unknown_tag() {
        let result: Result<Role, _> = serde_json::from_value(json!(7));
        assert!(result.is_err());

        assert_eq!(Role::try_from(7), Err(RoleError::UnknownTag(7)));
    }

    #[test]
    fn test_identity_rejects_blank_input() {
        assert_eq!(Identity::new(""), Err(IdentityError::Empty));
        assert_eq!(Identity::new("   "), Err(IdentityError::Empty));
    }

    #[test]
    fn test_identity_trims_whitespace() {
        let identity = Identity::new("  jdoe  ").unwrap();
        assert_eq!(identity.as_str(), "jdoe");
    }

    #[test]
    fn test_snapshot_drops_password_hash_and_null_handles() {
        let snapshot = UserSnapshot::from(&sample_user());
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 7,
                "role": 2,
                "username": "jdoe",
            })
        );
    }

    #[test]
    fn test_snapshot_label_falls_back_to_email() {
        let mut snapshot = UserSnapshot::from(&sample_user());
        assert_eq!(snapshot.label(), "jdoe");

        snapshot.username = None;
        snapshot.email = Some("jdoe@example.com".to_string());
        assert_eq!(snapshot.label(), "jdoe@example.com");

        snapshot.email = None;
        assert_eq!(snapshot.label(), "unknown");
    }
}
