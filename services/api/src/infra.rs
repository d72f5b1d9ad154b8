use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use story_eval::config::EnrichmentConfig;
use story_eval::enrichment::{Summarizer, WatsonxClient};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) summarizer: Option<Arc<dyn Summarizer>>,
    pub(crate) static_dir: Arc<PathBuf>,
}

/// Wire up the summary collaborator when enrichment is switched on and its
/// settings are complete. Anything less disables enrichment.
pub(crate) fn build_summarizer(config: &EnrichmentConfig) -> Option<Arc<dyn Summarizer>> {
    if !config.enabled {
        info!("story summaries disabled (USE_GRANITE is not 1)");
        return None;
    }

    match WatsonxClient::from_settings(config) {
        Ok(client) => {
            info!(model = client.model_id(), "story summaries enabled");
            Some(Arc::new(client))
        }
        Err(err) => {
            warn!(error = %err, "story summaries disabled, using heuristic evaluation only");
            None
        }
    }
}

#[cfg(test)]
pub(crate) fn detached_metrics() -> Arc<PrometheusHandle> {
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    Arc::new(recorder.handle())
}
