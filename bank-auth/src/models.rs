use serde::{Deserialize, Serialize};
use std::fmt;

use crate::service::AuthError;

/// Username and password for a single login attempt
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// JSON body sent to the login endpoint
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequestBody<'a> {
    pub user: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginRequestBody<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            user: &credentials.username,
            password: &credentials.password,
        }
    }
}

/// Response from a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "userId", alias = "id")]
    pub user_id: String,
}

/// Outcome of one submitted attempt
pub type LoginResult = Result<LoginResponse, AuthError>;

/// Per-field validation flags, recomputed for every attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub username_valid: bool,
    pub password_valid: bool,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.username_valid && self.password_valid
    }
}

/// State of a login attempt
#[derive(Debug, Clone, PartialEq)]
pub enum LoginState {
    /// Nothing submitted yet
    Idle,
    /// Checking the raw input
    Validating,
    /// Input failed validation, nothing was sent
    RejectedLocally,
    /// Waiting for the authentication endpoint
    Submitting,
    /// Endpoint answered (or the transport failed)
    Completed(LoginResult),
}

/// What a call to `LoginController::submit` ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed, an error event was dispatched
    RejectedLocally,
    /// The request went out and this is its result
    Completed(LoginResult),
    /// Another attempt was still in flight
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("test@test.com", "T3st!ng");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("test@test.com"));
        assert!(!printed.contains("T3st!ng"));
    }

    #[test]
    fn test_request_body_field_names() {
        let creds = Credentials::new("699.876.200-35", "T3st!ng");
        let json = serde_json::to_value(LoginRequestBody::from(&creds)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "user": "699.876.200-35", "password": "T3st!ng" })
        );
    }

    #[test]
    fn test_response_accepts_user_id_and_id() {
        let a: LoginResponse = serde_json::from_str(r#"{"userId":"42","name":"x"}"#).unwrap();
        let b: LoginResponse = serde_json::from_str(r#"{"id":"7"}"#).unwrap();
        assert_eq!(a.user_id, "42");
        assert_eq!(b.user_id, "7");
    }

    #[test]
    fn test_response_rejects_other_shapes() {
        assert!(serde_json::from_str::<LoginResponse>(r#"{"user":"42"}"#).is_err());
        assert!(serde_json::from_str::<LoginResponse>(r#"{"userId":42}"#).is_err());
    }
}
