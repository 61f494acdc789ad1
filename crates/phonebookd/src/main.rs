// # phonebookd - Contact Directory Daemon
//
// Thin integration layer over `phonebook-core`:
// 1. Reads configuration from environment variables
// 2. Initializes logging and the runtime
// 3. Seeds the repository and serves the HTTP surface
//
// All directory logic lives in phonebook-core; this binary owns only
// wiring, configuration, and shutdown.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// - `PHONEBOOK_BIND`: Address to bind (default 127.0.0.1)
// - `PHONEBOOK_PORT`: Port to listen on (default 3001)
// - `PHONEBOOK_LOG_LEVEL`: trace | debug | info | warn | error (default info)
// - `PHONEBOOK_SEED_FILE`: Optional path to a JSON array of contacts used
//   as the initial collection; when unset a built-in demo seed is used
//
// ## Example
//
// ```bash
// export PHONEBOOK_PORT=3001
// export PHONEBOOK_LOG_LEVEL=debug
// phonebookd
// ```

mod server;

use std::env;
use std::net::IpAddr;
use std::process::ExitCode;

use anyhow::Result;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use phonebook_core::model::Contact;
use phonebook_core::store::MemoryDirectory;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DaemonExitCode {
    CleanShutdown = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<DaemonExitCode> for ExitCode {
    fn from(code: DaemonExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    bind: String,
    port: u16,
    log_level: String,
    seed_file: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            bind: env::var("PHONEBOOK_BIND").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PHONEBOOK_PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("PHONEBOOK_PORT is not a valid port: {e}"))?,
            log_level: env::var("PHONEBOOK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            seed_file: env::var("PHONEBOOK_SEED_FILE").ok(),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.bind
            .parse::<IpAddr>()
            .map_err(|_| anyhow::anyhow!("PHONEBOOK_BIND is not a valid IP address: {}", self.bind))?;

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => anyhow::bail!(
                "PHONEBOOK_LOG_LEVEL '{other}' is not valid. \
                Valid levels: trace, debug, info, warn, error"
            ),
        }

        if let Some(ref path) = self.seed_file
            && !std::path::Path::new(path).exists()
        {
            anyhow::bail!("PHONEBOOK_SEED_FILE does not exist: {path}");
        }

        Ok(())
    }

    /// Load the initial collection
    ///
    /// A configured seed file must be a JSON array of contacts; without
    /// one, the built-in demo seed is used.
    fn load_seed(&self) -> Result<Vec<Contact>> {
        match self.seed_file {
            Some(ref path) => {
                let raw = std::fs::read_to_string(path)?;
                let contacts: Vec<Contact> = serde_json::from_str(&raw)?;
                Ok(contacts)
            }
            None => Ok(default_seed()),
        }
    }
}

/// The built-in demo collection
fn default_seed() -> Vec<Contact> {
    vec![
        Contact::new("1", "Arto Hellas", "040-123456"),
        Contact::new("2", "Ada Lovelace", "39-44-5323523"),
        Contact::new("3", "Dan Abramov", "12-43-234345"),
        Contact::new("4", "Mary Poppendieck", "39-23-6423122"),
    ]
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return DaemonExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {e}");
        return DaemonExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return DaemonExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {e}");
            return DaemonExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        if let Err(e) = run_daemon(config).await {
            error!("Daemon error: {e}");
            DaemonExitCode::RuntimeError
        } else {
            DaemonExitCode::CleanShutdown
        }
    })
    .into()
}

/// Run the daemon until a shutdown signal arrives
async fn run_daemon(config: Config) -> Result<()> {
    let seed = config.load_seed()?;
    info!("Seeding directory with {} contact(s)", seed.len());

    let directory = MemoryDirectory::seeded(seed)
        .map_err(|e| anyhow::anyhow!("invalid seed collection: {e}"))?;

    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("phonebookd listening on {}", listener.local_addr()?);

    axum::serve(listener, server::app(directory))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

/// Resolve when SIGTERM or SIGINT arrives
#[cfg(unix)]
async fn shutdown_signal() {
    let mut sigterm = signal(SignalKind::terminate()).expect("install SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("install SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => info!("Received SIGTERM"),
        _ = sigint.recv() => info!("Received SIGINT"),
    }
}

/// Resolve on ctrl-c (non-Unix platforms)
#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to wait for ctrl-c: {e}");
    }
}
