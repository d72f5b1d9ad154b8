use crate::cli::ServeArgs;
use crate::infra::{build_summarizer, AppState};
use crate::routes::router;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use story_eval::config::AppConfig;
use story_eval::error::AppError;
use story_eval::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(static_dir) = args.static_dir.take() {
        config.server.static_dir = static_dir;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        summarizer: build_summarizer(&config.enrichment),
        static_dir: Arc::new(config.server.static_dir.clone()),
    };

    let app = router(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        static_dir = %config.server.static_dir.display(),
        "story evaluator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
