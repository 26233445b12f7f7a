use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::dispatch::Dispatcher;
use crate::models::{Credentials, LoginResult, LoginState, SubmitOutcome};
use crate::service::{AuthClient, AuthError};
use crate::validator::{self, ValidatorConfig};

/// Shown when the form does not pass validation
pub const VALIDATION_ERROR_MESSAGE: &str = "Please fill user and password fields correctly!";

/// Receives the single completion event of every attempt
pub trait PresentationSink: Send + Sync {
    fn on_success(&self, user_id: String);
    fn on_error(&self, message: String);
}

/// Drives one login form: validate, submit, report back.
///
/// Only one attempt runs at a time. Anything submitted while a request is
/// still outstanding is ignored and produces no event.
pub struct LoginController {
    validator: ValidatorConfig,
    client: AuthClient,
    dispatcher: Arc<dyn Dispatcher>,
    sink: Arc<dyn PresentationSink>,
    in_flight: AtomicBool,
    state: Mutex<LoginState>,
}

/// Clears the in-flight flag even if the attempt future is dropped
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl LoginController {
    pub fn new(
        client: AuthClient,
        dispatcher: Arc<dyn Dispatcher>,
        sink: Arc<dyn PresentationSink>,
    ) -> Self {
        Self {
            validator: ValidatorConfig::default(),
            client,
            dispatcher,
            sink,
            in_flight: AtomicBool::new(false),
            state: Mutex::new(LoginState::Idle),
        }
    }

    pub fn with_validator_config(mut self, config: ValidatorConfig) -> Self {
        self.validator = config;
        self
    }

    /// State of the most recent attempt
    pub fn state(&self) -> LoginState {
        match self.state.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Run one attempt to completion.
    ///
    /// Invalid input is reported to the sink before this returns and before
    /// any request is made. Otherwise the result of the request is reported.
    pub async fn submit(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> SubmitOutcome {
        let attempt = Uuid::new_v4();
        if self.is_in_flight() {
            log::debug!("[{}] Ignored, another login is in flight", attempt);
            return SubmitOutcome::Ignored;
        }
        let credentials = Credentials::new(username, password);

        self.set_state(LoginState::Validating);
        let outcome = validator::validate_with(&self.validator, &credentials);
        if !outcome.is_valid() {
            log::debug!(
                "[{}] Rejected locally (username valid: {}, password valid: {})",
                attempt,
                outcome.username_valid,
                outcome.password_valid
            );
            self.set_state(LoginState::RejectedLocally);
            self.deliver(&Err(AuthError::ValidationFailed(
                VALIDATION_ERROR_MESSAGE.to_string(),
            )));
            return SubmitOutcome::RejectedLocally;
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::debug!("[{}] Ignored, another login is in flight", attempt);
            return SubmitOutcome::Ignored;
        }

        let result = {
            let _guard = InFlightGuard(&self.in_flight);
            self.set_state(LoginState::Submitting);
            log::debug!("[{}] Submitting login for {}", attempt, credentials.username);
            self.client.login(&credentials).await
        };

        match &result {
            Ok(response) => log::info!("[{}] Login successful: {}", attempt, response.user_id),
            Err(e) => log::warn!("[{}] Login failed: {}", attempt, e),
        }

        self.set_state(LoginState::Completed(result.clone()));
        self.deliver(&result);
        SubmitOutcome::Completed(result)
    }

    /// Start an attempt on the runtime and return immediately.
    pub fn spawn_submit(
        self: &Arc<Self>,
        username: String,
        password: String,
    ) -> JoinHandle<SubmitOutcome> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.submit(username, password).await })
    }

    fn set_state(&self, next: LoginState) {
        if let Ok(mut guard) = self.state.lock() {
            *guard = next;
        }
    }

    fn deliver(&self, result: &LoginResult) {
        let sink = Arc::clone(&self.sink);
        match result {
            Ok(response) => {
                let user_id = response.user_id.clone();
                self.dispatcher
                    .dispatch(Box::new(move || sink.on_success(user_id)));
            }
            Err(e) => {
                let message = e.message();
                self.dispatcher
                    .dispatch(Box::new(move || sink.on_error(message)));
            }
        }
    }
}
