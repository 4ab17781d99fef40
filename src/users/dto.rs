use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::repo::User;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(serialize_with = "crate::datetime::timestamp::serialize")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Request body for updating a user. Name and email are mandatory; the
/// password is only re-hashed when supplied.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("john@example.com"));
        assert!(is_valid_email("a.b+c@mail.co.id"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
    }

    #[test]
    fn public_user_never_leaks_the_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "John Doe".into(),
            email: "john@example.com".into(),
            password_hash: "secret-hash".into(),
            role: "user".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&PublicUser::from(user)).unwrap();
        assert!(json.contains("john@example.com"));
        assert!(!json.contains("secret-hash"));
    }
}
