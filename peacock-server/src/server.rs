use anyhow::Result;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

use crate::build_router;
use crate::state::AppState;

pub struct PeacockServer {
    bind_address: String,
    state: AppState,
}

impl PeacockServer {
    pub fn with_state(bind_address: String, state: AppState) -> Self {
        Self {
            bind_address,
            state,
        }
    }

    /// Serve until `shutdown` resolves, then let in-flight requests finish.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(&self.bind_address).await?;
        info!("Peacock server listening on http://{}", listener.local_addr()?);

        let app = build_router(self.state);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server stopped");
        Ok(())
    }
}
