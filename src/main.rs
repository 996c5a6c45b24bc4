use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use snake_app::auth::{InitOptions, Keycloak, OnLoad};
use snake_app::config::{self, AppConfig};
use snake_app::lifecycle::{StartupOutcome, StartupSequencer};
use snake_app::observability::logging;
use snake_app::shell::TcpMount;

#[derive(Parser)]
#[command(name = "snake-app")]
#[command(about = "Log in against Keycloak and serve the application shell", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only restore an existing session instead of requiring a login.
    #[arg(long)]
    check_sso: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => config::load_config(path),
        None => config::load_from_env(),
    };
    let app_config: AppConfig = match loaded {
        Ok(c) => c,
        Err(e) => {
            // Logging is not up yet.
            eprintln!("snake-app: {}", e);
            return ExitCode::from(2);
        }
    };

    if let Err(e) = logging::init(&app_config.observability) {
        eprintln!("snake-app: failed to initialize logging: {}", e);
    }

    tracing::info!("snake-app v{} starting", env!("CARGO_PKG_VERSION"));

    let mut options = InitOptions::from(&app_config.init);
    if cli.check_sso {
        options.on_load = OnLoad::CheckSso;
    }

    let keycloak = Arc::new(Keycloak::new(app_config.auth.clone()));
    let mut mount = TcpMount::from(&app_config.shell);
    let sequencer = StartupSequencer::new(keycloak, options, app_config.shell.clone());

    match sequencer.run(&mut mount).await {
        Ok(StartupOutcome::Mounted(shell)) => {
            if let Err(e) = shell.serve().await {
                tracing::error!(error = %e, "Shell server failed");
                return ExitCode::FAILURE;
            }
        }
        // Already reported; nothing is mounted and the session simply ends.
        Ok(StartupOutcome::Declined) | Ok(StartupOutcome::Failed(_)) => {}
        Err(e) => {
            tracing::error!(error = %e, "Failed to mount shell");
            return ExitCode::FAILURE;
        }
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
