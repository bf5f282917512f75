//! Geologis - HTTP service for countries, continents and cities.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `SERVER_PORT` | HTTP server port | 8080 |
//! | `DATA_DIR` | Directory with `countries.json` / `continents.json` | embedded tables |
//! | `CITIES_UPSTREAM_URL` | City-lookup provider endpoint | `https://api.maersk.com/locations/` |
//! | `CITIES_DEFAULT_AMOUNT` | Records requested upstream by default | 20 |
//! | `CITIES_MAX_AMOUNT` | Largest accepted `queryamount` | 100 |
//! | `API_BEARER_TOKEN` | Bearer token for `/v1` routes | auth disabled |
//! | `API_PUBLIC_KEY` | `publickey` query value bypassing the bearer token | None |
//! | `SUPPORT_CONTACT` | Support line attached to unexpected errors | support e-mail |
//! | `RUST_LOG` | Log level | `geologis=info,tower_http=info` |

use anyhow::Context;
use clap::Parser;
use geologis::{
    api,
    cli::Args,
    config::Config,
    initialization::{init_tracing, load_dataset},
    AppState,
};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    config.apply_args(&args);

    let dataset = load_dataset(&config).context("Failed to load dataset")?;

    let port = config.server_port;
    info!(
        port,
        upstream = %config.cities_upstream_url,
        auth = config.auth_enabled(),
        "Starting Geologis"
    );

    let app = api::router(AppState::new(config, dataset));

    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    info!("Server listening on http://0.0.0.0:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Signal received, starting graceful shutdown");
}
