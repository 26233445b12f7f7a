use reqwest::Url;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{Credentials, LoginRequestBody, LoginResponse, LoginResult};
use crate::transport::{
    HttpMethod, HttpRequest, HttpTransport, ReqwestTransport, TransportConfig, TransportError,
};

/// Default login endpoint of the MyBank backend
pub const DEFAULT_LOGIN_ENDPOINT: &str = "https://6092aef785ff5100172136c2.mockapi.io/api/login";

/// Error type for authentication operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Request failed")]
    RequestFailed,
    #[error("Invalid response received")]
    InvalidResponse,
    #[error("Decoding failed")]
    DecodingFailed,
    #[error("{0}")]
    ValidationFailed(String),
}

impl AuthError {
    /// Text shown to the user
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Endpoint and transport settings for [`AuthClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthClientConfig {
    pub endpoint: String,
    pub transport: TransportConfig,
}

impl Default for AuthClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_LOGIN_ENDPOINT.to_string(),
            transport: TransportConfig::default(),
        }
    }
}

/// Sends credentials to the login endpoint
pub struct AuthClient {
    endpoint: String,
    transport: Arc<dyn HttpTransport>,
}

impl AuthClient {
    /// Create a client talking through the given transport
    pub fn new(endpoint: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }

    /// Create a client backed by a real `reqwest` transport
    pub fn from_config(config: &AuthClientConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(&config.transport)?;
        Ok(Self::new(config.endpoint.clone(), Arc::new(transport)))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the credentials and classify the outcome.
    ///
    /// Resolves exactly once and never retries.
    pub async fn login(&self, credentials: &Credentials) -> LoginResult {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            log::error!("Invalid login endpoint {:?}: {}", self.endpoint, e);
            AuthError::InvalidResponse
        })?;

        let body = serde_json::to_value(LoginRequestBody::from(credentials)).map_err(|e| {
            log::error!("Failed to encode login body: {}", e);
            AuthError::InvalidResponse
        })?;

        let request = HttpRequest {
            url,
            method: HttpMethod::Post,
            body: Some(body),
        };

        let response = self.transport.send(request).await.map_err(|e| {
            log::warn!("Login request failed: {}", e);
            AuthError::RequestFailed
        })?;

        if !response.is_success() {
            log::warn!("Login endpoint returned status: {}", response.status);
            return Err(AuthError::InvalidResponse);
        }

        let decoded: LoginResponse = serde_json::from_slice(&response.body).map_err(|e| {
            log::warn!("Failed to parse login response: {}", e);
            AuthError::DecodingFailed
        })?;

        if decoded.user_id.trim().is_empty() {
            log::warn!("Login response carried an empty user id");
            return Err(AuthError::DecodingFailed);
        }

        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HttpResponse, MockHttpTransport};

    fn ok_response(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.as_bytes().to_vec(),
        }
    }

    fn creds() -> Credentials {
        Credentials::new("test@test.com", "T3st!ng")
    }

    #[tokio::test]
    async fn test_login_success_posts_json_body() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|req| {
                req.method == HttpMethod::Post
                    && req.url.as_str() == DEFAULT_LOGIN_ENDPOINT
                    && req.body
                        == Some(serde_json::json!({
                            "user": "test@test.com",
                            "password": "T3st!ng"
                        }))
            })
            .times(1)
            .returning(|_| Ok(ok_response(r#"{"userId":"abc-123"}"#)));

        let client = AuthClient::new(DEFAULT_LOGIN_ENDPOINT, Arc::new(transport));
        let result = client.login(&creds()).await;
        assert_eq!(
            result,
            Ok(LoginResponse {
                user_id: "abc-123".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_request_failed() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Err(TransportError::Connect("no route to host".to_string())));

        let client = AuthClient::new(DEFAULT_LOGIN_ENDPOINT, Arc::new(transport));
        assert_eq!(client.login(&creds()).await, Err(AuthError::RequestFailed));
    }

    #[tokio::test]
    async fn test_timeout_is_request_failed() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Err(TransportError::Timeout));

        let client = AuthClient::new(DEFAULT_LOGIN_ENDPOINT, Arc::new(transport));
        assert_eq!(client.login(&creds()).await, Err(AuthError::RequestFailed));
    }

    #[tokio::test]
    async fn test_malformed_endpoint_is_invalid_response() {
        let mut transport = MockHttpTransport::new();
        transport.expect_send().times(0);

        let client = AuthClient::new("not a url", Arc::new(transport));
        assert_eq!(client.login(&creds()).await, Err(AuthError::InvalidResponse));
    }

    #[tokio::test]
    async fn test_error_status_is_invalid_response() {
        let mut transport = MockHttpTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Ok(HttpResponse {
                status: 500,
                body: br#"{"userId":"abc"}"#.to_vec(),
            })
        });

        let client = AuthClient::new(DEFAULT_LOGIN_ENDPOINT, Arc::new(transport));
        assert_eq!(client.login(&creds()).await, Err(AuthError::InvalidResponse));
    }

    #[tokio::test]
    async fn test_unexpected_body_is_decoding_failed() {
        for body in ["", "not json", r#"{"token":"x"}"#, r#"[]"#, r#"{"userId":""}"#] {
            let mut transport = MockHttpTransport::new();
            let owned = body.to_string();
            transport
                .expect_send()
                .times(1)
                .returning(move |_| Ok(ok_response(&owned)));

            let client = AuthClient::new(DEFAULT_LOGIN_ENDPOINT, Arc::new(transport));
            assert_eq!(
                client.login(&creds()).await,
                Err(AuthError::DecodingFailed),
                "body {:?}",
                body
            );
        }
    }

    #[test]
    fn test_from_config_keeps_endpoint() {
        let config = AuthClientConfig {
            endpoint: "https://bank.example.com/api/login".to_string(),
            ..AuthClientConfig::default()
        };
        let client = AuthClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "https://bank.example.com/api/login");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(AuthError::RequestFailed.message(), "Request failed");
        assert_eq!(AuthError::InvalidResponse.message(), "Invalid response received");
        assert_eq!(AuthError::DecodingFailed.message(), "Decoding failed");
        assert_eq!(
            AuthError::ValidationFailed("fill the form".to_string()).message(),
            "fill the form"
        );
    }
}
