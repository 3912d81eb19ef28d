use crate::config::AppConfig;
use crate::state::AppState;
use flights_core::db::{open_db, open_db_in_memory, DbError};
use log::{error, info};
use rusqlite::Connection;
use std::io;
use tokio::net::TcpListener;
use tokio::signal;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("database bootstrap failed: {0}")]
    Db(#[from] DbError),
    #[error("IO error: {message}: {cause}")]
    Io { message: String, cause: io::Error },
}

/// Configured server: database opened, router ready to bind.
pub struct Server {
    config: AppConfig,
    state: AppState,
}

impl Server {
    /// Opens the configured database and prepares shared state.
    pub fn new(config: AppConfig) -> Result<Self, ServerError> {
        let conn = match &config.database.path {
            Some(path) => open_db(path)?,
            None => open_db_in_memory()?,
        };
        Ok(Self::with_connection(config, conn))
    }

    /// Uses an already-open connection instead of the configured path.
    pub fn with_connection(config: AppConfig, conn: Connection) -> Self {
        Self {
            config,
            state: AppState::new(conn),
        }
    }

    pub fn router(&self) -> axum::Router {
        crate::router(self.state.clone(), self.config.server.request_timeout())
    }

    /// Serves until Ctrl+C or SIGTERM, then drains in-flight requests.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.server.socket_addr();
        let listener = TcpListener::bind(addr).await.map_err(|cause| ServerError::Io {
            message: format!("failed to listen on {addr}"),
            cause,
        })?;

        info!("event=server_start module=web status=ok address=http://{addr}");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|cause| ServerError::Io {
                message: "server loop failed".to_owned(),
                cause,
            })?;

        info!("event=server_stop module=web status=ok");
        Ok(())
    }
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("event=shutdown_signal module=web status=error source=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("event=shutdown_signal module=web status=error source=sigterm error={err}");
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

    info!("event=shutdown_signal module=web status=ok");
}
