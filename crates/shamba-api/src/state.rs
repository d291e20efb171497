use shamba_core::TraceConfig;
use std::sync::Arc;

use crate::metrics::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub trace: Arc<TraceConfig>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(trace: TraceConfig) -> Result<Self, prometheus::Error> {
        Ok(Self {
            trace: Arc::new(trace),
            metrics: Arc::new(Metrics::new()?),
        })
    }
}
