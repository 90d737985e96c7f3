use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use apptrack::tracking::{
    AutomationRunner, InMemoryTrackingStore, TrackingState, TransitionAuthority,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wire an in-memory store into the authority/runner pair the router needs.
pub(crate) fn tracking_state() -> TrackingState<InMemoryTrackingStore> {
    let store = Arc::new(InMemoryTrackingStore::new());
    let authority = Arc::new(TransitionAuthority::new(store));
    let runner = Arc::new(AutomationRunner::new(Arc::clone(&authority)));
    TrackingState { authority, runner }
}
