//! # Bank Auth
//!
//! Credential validation, submission and result dispatch for the MyBank
//! login screen.
//!
//! This crate provides:
//! - Username and password entry rules (email or CPF, password strength)
//! - An authentication client over an injectable HTTP transport
//! - A login controller that reports exactly one event per attempt
//! - Dispatchers that deliver those events on the presentation context
//!
//! ## Separation of Concerns
//!
//! This crate focuses solely on the login pipeline. It does **not**:
//! - Store credentials or sessions (nothing is persisted)
//! - Draw the login form or alerts (handled by the application)
//! - Navigate between screens (the application's presentation sink does that)
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bank_auth::{AuthClient, AuthClientConfig, LoginController, ImmediateDispatcher};
//!
//! let client = AuthClient::from_config(&AuthClientConfig::default())?;
//! let controller = LoginController::new(client, Arc::new(ImmediateDispatcher), sink);
//! controller.submit("699.876.200-35", "T3st!ng").await;
//! ```

pub mod controller;
pub mod dispatch;
pub mod models;
pub mod service;
pub mod transport;
pub mod validator;

pub use controller::{LoginController, PresentationSink, VALIDATION_ERROR_MESSAGE};
pub use dispatch::{ChannelDispatcher, DispatchQueue, Dispatcher, ImmediateDispatcher, Job};
pub use models::{
    Credentials, LoginResponse, LoginResult, LoginState, SubmitOutcome, ValidationOutcome,
};
pub use service::{AuthClient, AuthClientConfig, AuthError, DEFAULT_LOGIN_ENDPOINT};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportConfig,
    TransportError,
};
pub use validator::{
    is_valid_form, is_valid_password, is_valid_username, ValidatorConfig,
};
