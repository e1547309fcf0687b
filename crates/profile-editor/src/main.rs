/*
[INPUT]:  CLI arguments, YAML configuration file, user service
[OUTPUT]: Profile editor TUI, config validation, or generated config
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or session bootstrap
*/

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use profile_adapter::{ProfileClient, SessionStore};
use profile_editor::config::SessionConfig;
use profile_editor::{AppConfig, CountryDirectory, ProfileController};

const LOG_FILE_NAME: &str = "profile-editor.log";

#[derive(Parser, Debug)]
#[command(name = "profile-editor", version, about = "Terminal profile viewer and editor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a configuration file interactively
    Init {
        #[arg(long, value_name = "PATH", default_value = "profile-editor.yaml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Command::Init { output }) = args.command {
        return cli::init::run_init(output);
    }

    let config_path = match args.config_path {
        Some(path) => path,
        None => default_config_path()?,
    };

    if args.dry_run {
        init_tracing(&args.log_level)?;
        info!(config_path = %config_path.display(), "validating configuration");
        let config = load_config(&config_path)?;
        let directory = load_directory(&config)?;
        ProfileClient::with_config(config.client_config(), &config.api.base_url)
            .context("build user service client")?;
        info!(
            base_url = %config.api.base_url,
            user_id = %config.session.user_id,
            signed_in = config.session.token.is_some(),
            countries = directory.len(),
            "dry-run requested; configuration validated"
        );
        return Ok(());
    }

    let config = load_config(&config_path)?;
    let log_dir = match &config.log_dir {
        Some(dir) => dir.clone(),
        None => default_log_dir()?,
    };
    let _log_guard = init_file_tracing(&args.log_level, &log_dir)?;
    info!(
        config_path = %config_path.display(),
        log_dir = %log_dir.display(),
        "starting profile-editor"
    );

    let directory = Arc::new(load_directory(&config)?);
    let client = ProfileClient::with_config(config.client_config(), &config.api.base_url)
        .context("build user service client")?;
    let session = bootstrap_session(&config.session, &client).await;

    let session = Arc::new(session);
    let controller = ProfileController::new(session.clone(), session, directory);
    profile_editor::tui::run_tui(controller, Arc::new(client)).await?;

    info!("profile-editor exited");
    Ok(())
}

/// Store the configured token and fetch the signed-in user; failures leave the session signed out
async fn bootstrap_session(config: &SessionConfig, client: &ProfileClient) -> SessionStore {
    let session = SessionStore::new();
    let Some(token) = config.token.clone() else {
        info!("no session token configured; starting signed out");
        return session;
    };

    session.set_token(token.clone(), config.token_ttl_secs);
    match client.fetch_user(&config.user_id, &token).await {
        Ok(user) => {
            info!(user_id = %user.id, "session user loaded");
            session.set_user(user);
        }
        Err(err) if err.is_auth_error() => {
            warn!(error = %err, user_id = %config.user_id, "session token rejected; clearing session");
            session.clear();
        }
        Err(err) => {
            warn!(error = %err, user_id = %config.user_id, "failed to load session user");
        }
    }
    session
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

/// Log to a daily file so output does not tear the TUI
fn init_file_tracing(log_level: &str, log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("create log directory {}", log_dir.display()))?;
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}

fn load_config(path: &Path) -> Result<AppConfig> {
    AppConfig::load(path).context("load config")
}

fn load_directory(config: &AppConfig) -> Result<CountryDirectory> {
    match &config.countries_path {
        Some(path) => CountryDirectory::load(path).context("load country directory"),
        None => Ok(CountryDirectory::builtin()),
    }
}

fn default_config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().context("no config directory for this platform")?;
    Ok(dir.join("profile-editor").join("config.yaml"))
}

fn default_log_dir() -> Result<PathBuf> {
    let dir = dirs::data_local_dir().context("no data directory for this platform")?;
    Ok(dir.join("profile-editor").join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use profile_adapter::{ClientConfig, SessionProvider, SessionSnapshot};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session_config(token: Option<&str>) -> SessionConfig {
        SessionConfig {
            user_id: "7".to_string(),
            token: token.map(str::to_string),
            token_ttl_secs: 600,
        }
    }

    async fn client_for(server: &MockServer) -> ProfileClient {
        ProfileClient::with_config(ClientConfig::default(), &server.uri()).expect("client init")
    }

    #[tokio::test]
    async fn bootstrap_loads_signed_in_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "7",
                "email": "a@x.com",
                "name": "Alice",
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let session = bootstrap_session(&session_config(Some("tok")), &client).await;
        let snapshot = session.snapshot();
        assert!(snapshot.is_authed);
        assert_eq!(snapshot.user.map(|user| user.name), Some("Alice".to_string()));
    }

    #[tokio::test]
    async fn bootstrap_clears_rejected_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/7"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "revoked"})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let session = bootstrap_session(&session_config(Some("tok")), &client).await;
        assert_eq!(session.snapshot(), SessionSnapshot::default());
    }

    #[tokio::test]
    async fn bootstrap_keeps_token_on_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/7"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let session = bootstrap_session(&session_config(Some("tok")), &client).await;
        let snapshot = session.snapshot();
        assert_eq!(snapshot.token.as_deref(), Some("tok"));
        assert!(!snapshot.is_authed);
    }

    #[tokio::test]
    async fn bootstrap_without_token_skips_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let session = bootstrap_session(&session_config(None), &client).await;
        assert!(session.snapshot().token.is_none());
    }
}
