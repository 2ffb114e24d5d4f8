mod email;
mod error;
mod model;
mod prompt;
mod request_tracing;
mod routes;
mod server_config;
mod state;
#[cfg(test)]
mod testing;

use std::{env, net::SocketAddr};

use axum::extract::FromRef;
use email::EmailClassifier;
use mimalloc::MiMalloc;
use routes::AppRouter;
use server_config::cfg;
use state::BatchCache;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

pub type HttpClient = reqwest::Client;

#[derive(Clone, FromRef)]
struct ServerState {
    classifier: EmailClassifier,
    batch_cache: BatchCache,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::Layer::default().with_ansi(false))
        .init();

    tracing::info!("{}", *cfg);

    let http_client = reqwest::ClientBuilder::new()
        .use_rustls_tls()
        .timeout(cfg.api.timeout())
        .build()?;

    let state = ServerState {
        classifier: EmailClassifier::from_config(http_client, &cfg)?,
        batch_cache: BatchCache::new(),
    };

    let router = AppRouter::create(state);

    let port = env::var("PORT").unwrap_or("5006".to_string());
    let addr = SocketAddr::from(([0, 0, 0, 0], port.parse::<u16>()?));
    tracing::info!("Email tagger running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down, exiting");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {:?}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {:?}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use wiremock::MockServer;

    use crate::testing::common::{mount_reply, state_for};

    struct TestServer {
        addr: SocketAddr,
        shutdown_tx: tokio::sync::oneshot::Sender<()>,
    }

    impl TestServer {
        fn url(&self) -> String {
            format!("http://{}", self.addr)
        }

        async fn shutdown(self) {
            let _ = self.shutdown_tx.send(());
        }
    }

    async fn setup(state: ServerState) -> anyhow::Result<TestServer> {
        let router = AppRouter::create(state);

        // Bind to port 0 to get a random available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        Ok(TestServer { addr, shutdown_tx })
    }

    #[tokio::test]
    async fn test_server_classifies_over_http() {
        let remote = MockServer::start().await;
        mount_reply(&remote, r#"{"tags": ["Technical Support"]}"#).await;

        let server = setup(state_for(&remote))
            .await
            .expect("Failed to setup test server");

        let response = HttpClient::new()
            .post(format!("{}/classify", server.url()))
            .json(&serde_json::json!({"content": "How do I reset my password?"}))
            .send()
            .await
            .expect("request succeeds");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.expect("valid json");
        assert_eq!(body["email"], "How do I reset my password?");
        assert_eq!(body["tags"], serde_json::json!(["Technical Support"]));

        server.shutdown().await;
    }
}
