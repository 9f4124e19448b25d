use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const STATUS_ACTIVE: &str = "active";

/// A user account.
///
/// `id`, `status` and `date_created` are server-assigned; values a client
/// sends for them are overwritten. `password` is accepted on input but never
/// serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_created: String,
    pub status: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl User {
    /// Trims and lower-cases names and email; rejects an empty email.
    pub fn validate(&mut self) -> AppResult<()> {
        self.first_name = normalize(&self.first_name);
        self.last_name = normalize(&self.last_name);
        self.email = normalize(&self.email);
        if self.email.is_empty() {
            return Err(AppError::bad_request("Invalid e-mail address."));
        }
        Ok(())
    }

    /// Trims the plaintext password; rejects an empty one.
    pub fn validate_password(&mut self) -> AppResult<()> {
        self.password = self.password.trim().to_owned();
        if self.password.is_empty() {
            return Err(AppError::bad_request("Invalid password."));
        }
        Ok(())
    }

    /// Copies the editable fields of `candidate` onto `self`.
    ///
    /// A partial merge keeps the current value wherever the candidate field is
    /// empty; a full merge overwrites unconditionally.
    pub fn merge(&mut self, candidate: &User, partial: bool) {
        if partial {
            if !candidate.first_name.is_empty() {
                self.first_name = candidate.first_name.clone();
            }
            if !candidate.last_name.is_empty() {
                self.last_name = candidate.last_name.clone();
            }
            if !candidate.email.is_empty() {
                self.email = candidate.email.clone();
            }
        } else {
            self.first_name = candidate.first_name.clone();
            self.last_name = candidate.last_name.clone();
            self.email = candidate.email.clone();
        }
    }

    pub fn view(&self, public: bool) -> UserView {
        if public {
            UserView::Public(PublicUser {
                id: self.id,
                date_created: self.date_created.clone(),
                status: self.status.clone(),
            })
        } else {
            UserView::Private(PrivateUser {
                id: self.id,
                first_name: self.first_name.clone(),
                last_name: self.last_name.clone(),
                email: self.email.clone(),
                date_created: self.date_created.clone(),
                status: self.status.clone(),
            })
        }
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// What anonymous callers see.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    pub id: i64,
    pub date_created: String,
    pub status: String,
}

/// What the account owner and internal callers see.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrivateUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_created: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UserView {
    Public(PublicUser),
    Private(PrivateUser),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> User {
        User {
            id: 7,
            first_name: "a".into(),
            last_name: "b".into(),
            email: "c@x.com".into(),
            date_created: "2024-01-01 00:00:00".into(),
            status: STATUS_ACTIVE.into(),
            password: String::new(),
        }
    }

    #[test]
    fn validate_trims_and_lowercases() {
        let mut user = User {
            first_name: "  Ada ".into(),
            last_name: "LOVELACE".into(),
            email: "  Ada@Example.COM\t".into(),
            ..Default::default()
        };
        user.validate().unwrap();
        assert_eq!(user.first_name, "ada");
        assert_eq!(user.last_name, "lovelace");
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn validate_rejects_blank_email() {
        let mut user = User {
            email: "   ".into(),
            ..Default::default()
        };
        let err = user.validate().unwrap_err();
        assert_eq!(err.status().as_u16(), 400);
        assert_eq!(err.message(), "Invalid e-mail address.");
    }

    #[test]
    fn validate_accepts_any_non_empty_email() {
        let mut user = User {
            email: "not-an-address".into(),
            ..Default::default()
        };
        assert!(user.validate().is_ok());
    }

    #[test]
    fn validate_password_rejects_blank() {
        let mut user = User {
            password: " \n ".into(),
            ..Default::default()
        };
        let err = user.validate_password().unwrap_err();
        assert_eq!(err.message(), "Invalid password.");
    }

    #[test]
    fn validate_password_does_not_touch_email() {
        let mut user = User {
            email: "a@b.c".into(),
            password: " s3cret ".into(),
            ..Default::default()
        };
        user.validate_password().unwrap();
        assert_eq!(user.password, "s3cret");
        assert_eq!(user.email, "a@b.c");
    }

    #[test]
    fn partial_merge_skips_empty_fields() {
        let mut user = current();
        let candidate = User {
            first_name: String::new(),
            last_name: "d".into(),
            ..Default::default()
        };
        user.merge(&candidate, true);
        assert_eq!(user.first_name, "a");
        assert_eq!(user.last_name, "d");
        assert_eq!(user.email, "c@x.com");
    }

    #[test]
    fn full_merge_overwrites_with_empty() {
        let mut user = current();
        let candidate = User {
            first_name: String::new(),
            last_name: "d".into(),
            email: "e@x.com".into(),
            ..Default::default()
        };
        user.merge(&candidate, false);
        assert_eq!(user.first_name, "");
        assert_eq!(user.last_name, "d");
        assert_eq!(user.email, "e@x.com");
        assert_eq!(user.id, 7);
        assert_eq!(user.status, STATUS_ACTIVE);
    }

    #[test]
    fn password_is_never_serialized() {
        let user = User {
            password: "hash".into(),
            ..current()
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());

        let private = serde_json::to_value(user.view(false)).unwrap();
        assert!(private.get("password").is_none());
        assert_eq!(private["email"], "c@x.com");
    }

    #[test]
    fn public_view_hides_personal_fields() {
        let json = serde_json::to_value(current().view(true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "date_created": "2024-01-01 00:00:00",
                "status": "active",
            })
        );
    }

    #[test]
    fn deserializes_partial_body_with_defaults() {
        let user: User = serde_json::from_str(r#"{"last_name":"d","password":"p"}"#).unwrap();
        assert_eq!(user.id, 0);
        assert_eq!(user.first_name, "");
        assert_eq!(user.last_name, "d");
        assert_eq!(user.password, "p");
    }
}
