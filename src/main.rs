use bank_auth::{AuthClient, DispatchQueue, LoginController, SubmitOutcome};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

mod config;
mod error;
mod presenter;

use config::{AppConfig, DEFAULT_CONFIG_PATH};
use error::AppError;
use presenter::{LoginPresenter, Screen, ScreenRouter};

/// Log in to MyBank from the terminal
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Email address or CPF
    #[arg(long)]
    user: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // RUST_LOG controls verbosity
    env_logger::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(Screen::Home { user_id }) => {
            println!("Welcome! Logged in as {}", user_id);
            ExitCode::SUCCESS
        }
        Ok(Screen::Login) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Screen, AppError> {
    let config = AppConfig::load(&cli.config)?;
    let client = AuthClient::from_config(&config.auth_client_config())?;
    info!("Logging in against {}", client.endpoint());

    let (dispatcher, mut queue) = bank_auth::dispatch::channel();
    let presenter = Arc::new(LoginPresenter::new(ScreenRouter::default()));
    let controller = Arc::new(
        LoginController::new(client, Arc::new(dispatcher), presenter.clone())
            .with_validator_config(config.validator_config()),
    );

    let password = read_password().await?;
    login_once(&controller, &mut queue, cli.user, password).await?;

    for alert in presenter.take_alerts() {
        eprintln!("⚠ {}", alert);
    }
    Ok(presenter.router().current())
}

/// Run one attempt and then deliver its completion event on this task
async fn login_once(
    controller: &Arc<LoginController>,
    queue: &mut DispatchQueue,
    user: String,
    password: String,
) -> Result<SubmitOutcome, AppError> {
    let outcome = controller
        .spawn_submit(user, password)
        .await
        .map_err(|e| AppError::Task(e.to_string()))?;
    queue.drain();
    Ok(outcome)
}

async fn read_password() -> Result<String, AppError> {
    let mut stderr = tokio::io::stderr();
    stderr.write_all(b"Password: ").await?;
    stderr.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bank_auth::{HttpRequest, HttpResponse, HttpTransport, TransportError};

    struct FixedTransport(Result<HttpResponse, TransportError>);

    #[async_trait]
    impl HttpTransport for FixedTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.0.clone()
        }
    }

    fn setup(
        reply: Result<HttpResponse, TransportError>,
    ) -> (
        Arc<LoginController>,
        DispatchQueue,
        Arc<LoginPresenter<ScreenRouter>>,
    ) {
        let client = AuthClient::new(
            bank_auth::DEFAULT_LOGIN_ENDPOINT,
            Arc::new(FixedTransport(reply)),
        );
        let (dispatcher, queue) = bank_auth::dispatch::channel();
        let presenter = Arc::new(LoginPresenter::new(ScreenRouter::default()));
        let controller = Arc::new(LoginController::new(
            client,
            Arc::new(dispatcher),
            presenter.clone(),
        ));
        (controller, queue, presenter)
    }

    #[tokio::test]
    async fn test_successful_login_routes_home() {
        let (controller, mut queue, presenter) = setup(Ok(HttpResponse {
            status: 200,
            body: br#"{"userId":"7"}"#.to_vec(),
        }));

        let outcome = login_once(
            &controller,
            &mut queue,
            "test@test.com".to_string(),
            "T3st!ng".to_string(),
        )
        .await
        .unwrap();

        assert!(matches!(outcome, SubmitOutcome::Completed(Ok(_))));
        assert_eq!(
            presenter.router().current(),
            Screen::Home {
                user_id: "7".to_string()
            }
        );
        assert!(presenter.take_alerts().is_empty());
    }

    #[tokio::test]
    async fn test_failed_login_stays_on_login_with_alert() {
        let (controller, mut queue, presenter) = setup(Err(TransportError::Timeout));

        login_once(
            &controller,
            &mut queue,
            "699.876.200-35".to_string(),
            "T3st!ng".to_string(),
        )
        .await
        .unwrap();

        assert_eq!(presenter.router().current(), Screen::Login);
        assert_eq!(presenter.take_alerts(), vec!["Request failed".to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_form_alerts_locally() {
        let (controller, mut queue, presenter) = setup(Err(TransportError::Timeout));

        let outcome = login_once(&controller, &mut queue, "test@test.com".to_string(), String::new())
            .await
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::RejectedLocally);
        assert_eq!(
            presenter.take_alerts(),
            vec![bank_auth::VALIDATION_ERROR_MESSAGE.to_string()]
        );
    }
}
