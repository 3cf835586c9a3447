use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use gatekeeper_backend_lib::{config::Settings, router, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Registration, login and a gated download over HTTP
#[derive(Parser, Debug)]
#[command(name = "gatekeeper", version)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(long)]
    port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    settings.validate()?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if args.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let addr = settings.bind_addr()?;
    let download = settings.download_path();
    if !download.is_file() {
        tracing::warn!(path = %download.display(), "download file is missing; /download will return 404");
    }

    let state = Arc::new(AppState::open(settings)?);
    let app = router::create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
