use anyhow::Result;
use peacock_core::config::Config;
use peacock_library::LoftyTagAccessor;
use peacock_server::{AppState, Library, PeacockServer};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

pub async fn run(bind_address: String, config: Config, config_path: PathBuf) -> Result<()> {
    let root = config.require_root()?.canonicalize_utf8()?;

    let state = AppState::new(config, Library::default(), Arc::new(LoftyTagAccessor))
        .with_config_path(config_path);

    // Initial scan before accepting requests
    let report = state.scan(root.clone()).await?;
    info!(
        "Loaded {} audio file(s), skipped {}",
        report.records.len(),
        report.skipped.len()
    );
    state.library.write().await.replace(root, report.into_records());

    let server = PeacockServer::with_state(bind_address, state);
    server.run_until(shutdown_signal()).await
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT, shutting down..."),
        Err(err) => {
            error!("Unable to listen for shutdown signal: {}", err);
            std::future::pending::<()>().await;
        }
    }
}
