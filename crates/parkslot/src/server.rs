//! HTTP server lifecycle.

use std::future::Future;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::{self, AppState};
use crate::config::Config;
use crate::error::Result;
use crate::service::SlotService;

/// Bind the configured address and serve until Ctrl-C or SIGTERM.
///
/// The service is closed once the server has drained.
///
/// # Errors
///
/// Returns an error if the address cannot be bound, the server fails, or the
/// store cannot be closed cleanly.
pub async fn serve(config: &Config, service: SlotService) -> Result<()> {
    let addr = config.listen_addr()?;
    let listener = TcpListener::bind(addr).await?;
    serve_with_shutdown(listener, service, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the server fails or the store cannot be closed.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    service: SlotService,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "parkslot listening");

    let app = api::router(AppState::new(service.clone()));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    service.close()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
