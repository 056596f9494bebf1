use crate::booking::LogNotifier;
use crate::cli::ServeArgs;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::infra::AppState;
use crate::routes::api_routes;
use crate::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let state = AppState::new(
        prometheus_handle,
        Arc::new(LogNotifier),
        config.booking.counsellor_email.clone(),
    );
    let readiness = state.readiness.clone();

    let app = api_routes::<LogNotifier>()
        .layer(prometheus_layer)
        .layer(Extension(state));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness.store(true, Ordering::Release);

    info!(?config.environment, %addr, "wellness dashboard service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
