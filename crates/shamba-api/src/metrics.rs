//! Prometheus counters served on `/v1/metrics`.
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    payloads: IntCounterVec,
    verifications: IntCounterVec,
    batch_failures: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let payloads = IntCounterVec::new(
            Opts::new("shamba_qr_payloads_total", "QR payloads built, by kind"),
            &["kind"],
        )?;
        let verifications = IntCounterVec::new(
            Opts::new("shamba_verifications_total", "Traceability id checks, by outcome"),
            &["outcome"],
        )?;
        let batch_failures = IntCounter::new(
            "shamba_batch_failures_total",
            "Batch items that could not be built",
        )?;

        registry.register(Box::new(payloads.clone()))?;
        registry.register(Box::new(verifications.clone()))?;
        registry.register(Box::new(batch_failures.clone()))?;

        Ok(Self {
            registry,
            payloads,
            verifications,
            batch_failures,
        })
    }

    pub fn payload_built(&self, kind: &str) {
        self.payloads.with_label_values(&[kind]).inc();
    }

    pub fn payloads_built(&self, kind: &str, count: u64) {
        self.payloads.with_label_values(&[kind]).inc_by(count);
    }

    /// `outcome` is `"verified"` or the rejection code
    pub fn verification(&self, outcome: &str) {
        self.verifications.with_label_values(&[outcome]).inc();
    }

    pub fn batch_failed(&self, count: u64) {
        self.batch_failures.inc_by(count);
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
