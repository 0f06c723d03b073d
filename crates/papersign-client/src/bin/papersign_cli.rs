//! Terminal front end for the papersign client controllers.
//!
//! Each run starts a fresh HTTP client, so the session cookie is kept in a
//! file between runs: written after a successful sign-in, replayed and then
//! removed by `logout`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use papersign_client::{
    ApiClient, AuthService, ClientError, Credentials, DocumentListView, HttpSessionProvider,
    Level, ListScreen, Navigator, Notification, Notifier, RegisterData, Route,
};
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "papersign", version, about = "Sign in to papersign and list documents")]
struct Cli {
    /// Backend base URL.
    #[arg(long, env = "PAPERSIGN_URL", default_value = "http://localhost:8080")]
    base_url: String,
    /// File holding the session cookie between runs.
    #[arg(long, env = "PAPERSIGN_SESSION_FILE", default_value = ".papersign-session")]
    session_file: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and report the outcome.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PAPERSIGN_PASSWORD")]
        password: String,
    },
    /// Create an account and sign in with it.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "PAPERSIGN_PASSWORD")]
        password: String,
        /// Defaults to `--password`.
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// End the session saved by an earlier sign-in.
    Logout,
    /// Sign in, then print the document list.
    Documents {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PAPERSIGN_PASSWORD")]
        password: String,
    },
}

struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn push(&self, route: Route) {
        tracing::debug!(%route, "navigate");
    }
}

struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let tag = match notification.level {
            Level::Success => "ok",
            Level::Error => "error",
        };
        if let Err(err) = writeln!(io::stderr(), "[{tag}] {}", notification.message) {
            warn!(error = %err, "failed to write notification");
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn io_error(err: &io::Error) -> ClientError {
    ClientError::Transport {
        message: err.to_string(),
    }
}

/// Write the client's cookies to `path`, readable by the owner only.
fn save_session(api: &ApiClient, path: &Path) -> io::Result<()> {
    let Some(header) = api.cookie_header() else {
        return Ok(());
    };
    fs::write(path, header)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

/// Load cookies saved by `save_session`; a missing file means signed out.
fn restore_session(api: &ApiClient, path: &Path) -> io::Result<bool> {
    match fs::read_to_string(path) {
        Ok(header) => {
            api.restore_cookies(&header);
            Ok(true)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

fn forget_session(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
        _ => Ok(()),
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let api = ApiClient::new(&cli.base_url)?;
    let session_file = cli.session_file;
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
    let auth = AuthService::new(
        api.clone(),
        Arc::new(HttpSessionProvider::new(api.clone())),
        Arc::new(TerminalNavigator),
        notifier.clone(),
    );

    match cli.command {
        Command::Login { email, password } => {
            auth.login(&Credentials::new(email, password)).await?;
            save_session(&api, &session_file).map_err(|err| io_error(&err))
        }
        Command::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            let data = RegisterData {
                name,
                email,
                confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                password,
            };
            auth.register(&data).await?;
            save_session(&api, &session_file).map_err(|err| io_error(&err))
        }
        Command::Logout => {
            if !restore_session(&api, &session_file).map_err(|err| io_error(&err))? {
                warn!(path = %session_file.display(), "no saved session; logging out locally");
            }
            auth.logout().await?;
            forget_session(&session_file).map_err(|err| io_error(&err))
        }
        Command::Documents { email, password } => {
            auth.login(&Credentials::new(email, password)).await?;
            save_session(&api, &session_file).map_err(|err| io_error(&err))?;
            list_documents(api, notifier).await
        }
    }
}

async fn list_documents(api: ApiClient, notifier: Arc<dyn Notifier>) -> Result<(), ClientError> {
    let view = DocumentListView::new(api, notifier);
    let token = CancellationToken::new();
    let on_interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    view.load(&token).await?;
    print_screen(&view.render()).map_err(|err| io_error(&err))
}

fn print_screen(screen: &ListScreen) -> io::Result<()> {
    let mut out = io::stdout().lock();
    match screen {
        ListScreen::Loading { text } => writeln!(out, "{text}"),
        ListScreen::Error { message, .. } => writeln!(out, "{message}"),
        ListScreen::Table { rows } if rows.is_empty() => writeln!(out, "(no documents)"),
        ListScreen::Table { rows } => {
            writeln!(out, "{:<36}  {:<32}  {:>10}  STATUS", "ID", "NAME", "SIZE")?;
            for row in rows {
                writeln!(
                    out,
                    "{:<36}  {:<32}  {:>10}  {}",
                    row.id, row.name, row.size_text, row.status.label
                )?;
            }
            Ok(())
        }
    }
}
