// Demo HTTP server built from the current properties

use anyhow::{Context, Result};
use axum::{extract::State, routing::get, Json, Router};
use cloudcfg::{CloudClient, Snapshot};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

const PORT_KEY: &str = "ui.search.port";
const SERVDIR_KEY: &str = "ui.search.servdir";

/// A running server that can be shut down gracefully
pub struct DemoServer {
    addr: String,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<std::io::Result<()>>,
}

async fn index() -> &'static str {
    "Hello"
}

async fn config(State(client): State<Arc<CloudClient>>) -> Json<Snapshot> {
    Json(client.properties())
}

/// Start a server using the port and directory found in the current properties
pub async fn start(client: Arc<CloudClient>) -> Result<DemoServer> {
    // Missing port binds an ephemeral one, missing directory serves the working directory
    let port = client.get(PORT_KEY).unwrap_or_else(|| "0".to_string());
    let servdir = client.get(SERVDIR_KEY).unwrap_or_else(|| ".".to_string());
    info!(servdir = %servdir, "serving search");

    let app = Router::new()
        .route("/", get(index))
        .route("/config", get(config))
        .nest_service("/search", ServeDir::new(servdir))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(client);

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let addr = listener.local_addr()?.to_string();
    info!(addr = %addr, "starting server");

    let (shutdown, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = rx.await;
            })
            .await
    });

    Ok(DemoServer {
        addr,
        shutdown,
        handle,
    })
}

impl DemoServer {
    /// Stop accepting connections and wait for in-flight requests
    pub async fn shutdown(self) -> Result<()> {
        let _ = self.shutdown.send(());
        self.handle
            .await
            .context("Server task panicked")?
            .with_context(|| format!("Server {} failed", self.addr))?;
        info!(addr = %self.addr, "server stopped");
        Ok(())
    }
}
