mod api;
mod backend;
mod config;
mod credentials;
mod error;
mod host;
mod orchestrator;
mod path;
mod source;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use config::{Args, Config};
use credentials::XmlCredentialStore;
use host::{CommandRefresher, ConsoleNotifier, Notifier};
use orchestrator::{Orchestrator, RefreshRequest};

fn main() -> ExitCode {
    // Optional .env next to the working directory
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("OpenList refresh starting...");

    let config = Config::from_args(Args::parse());
    log::debug!("Configuration: {:?}", config);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let ui = CommandRefresher::new(config.refresh_command.clone());
    let store = config.passwords_file.clone().map(XmlCredentialStore::new);

    let orchestrator = Orchestrator::new(notifier, &ui, &store, config.routing_table());
    let request = RefreshRequest {
        folder: config.folder.clone(),
        recursive: config.recursive,
    };

    let report = runtime.block_on(orchestrator.run(&request));
    log::info!("Refresh finished: {:?}", report);

    if report.refreshed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
