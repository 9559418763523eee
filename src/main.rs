use attendance_tracker::{router, AppConfig, AppState, AttendanceStore};
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(
        user = %config.user_name,
        start = %config.period.start(),
        end = %config.period.end(),
        "attendance period configured"
    );
    if let Some(date) = config.allow_repeat_checkin_on {
        info!("repeat check-ins allowed on {date} (testing mode)");
    }

    let app = router(AppState::new(config, AttendanceStore::new()));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped; attendance records discarded");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
