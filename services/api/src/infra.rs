use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use leadscout::pipeline::LeadScoutService;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) service: Arc<LeadScoutService>,
}
