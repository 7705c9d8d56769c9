//! # WebCalc server
//!
//! Serves the calculator page and the JSON calculation endpoint.
//!
//! Configuration comes from the environment (`DECIMAL_PRECISION`,
//! `DECIMAL_ROUNDING`, `LOG_LEVEL`, `LOG_FILE`, `HOST`, `PORT`).
//! `RUST_LOG`, when set, takes precedence over `LOG_LEVEL`.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use webcalc::api::{router, AppState};
use webcalc::config::Settings;
use webcalc::engine::create_from_settings;
use webcalc::interfaces::LoggingEventHandler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let settings = Settings::load()?;

    // Keep the guard alive so buffered file output is flushed on exit
    let _guard = init_tracing(&settings)?;

    let calculator = create_from_settings(&settings, Arc::new(LoggingEventHandler))?;
    let context = calculator.context();
    info!(
        precision = context.precision(),
        rounding = %context.rounding(),
        "Decimal context configured"
    );

    let app = router(AppState::new(calculator));

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Starting WebCalc server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(settings: &Settings) -> Result<Option<WorkerGuard>, Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter()));

    let (file_layer, guard) = match &settings.log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path.file_name().ok_or("LOG_FILE must name a file")?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
