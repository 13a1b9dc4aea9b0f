use axum::{routing::get, Router};
use axum::extract::Request;
use axum::middleware::Next;
use prometheus::{Encoder, TextEncoder, IntCounterVec, Opts, Registry, HistogramVec, HistogramOpts};
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct MetricsPlugin {
    registry: Arc<Registry>,
    pub request_counter: Arc<IntCounterVec>,
    pub request_duration: Arc<HistogramVec>,
}

impl MetricsPlugin {
    pub fn new() -> Self {
        let registry = Registry::new();
        let ctr_opts = Opts::new("requests_total", "Total HTTP requests");
        let counter = IntCounterVec::new(ctr_opts, &["method", "plugin", "status"]).expect("counter");
        registry.register(Box::new(counter.clone())).ok();

        let hist_opts = HistogramOpts::new("request_duration_seconds", "HTTP request latencies in seconds");
        let histogram = HistogramVec::new(hist_opts, &["method", "plugin"]).expect("histogram");
        registry.register(Box::new(histogram.clone())).ok();

        MetricsPlugin {
            registry: Arc::new(registry),
            request_counter: Arc::new(counter),
            request_duration: Arc::new(histogram),
        }
    }

    /// Wraps a plugin router so every request through it is counted and timed
    /// under the plugin's name.
    pub fn instrument(&self, router: Router, plugin: &'static str) -> Router {
        let counter = self.request_counter.clone();
        let duration = self.request_duration.clone();
        router.layer(axum::middleware::from_fn(move |req: Request, next: Next| {
            let counter = counter.clone();
            let duration = duration.clone();
            async move {
                let method = req.method().to_string();
                let start = Instant::now();
                let resp = next.run(req).await;
                let status = resp.status().as_u16().to_string();
                counter.with_label_values(&[&method, plugin, &status]).inc();
                duration
                    .with_label_values(&[&method, plugin])
                    .observe(start.elapsed().as_secs_f64());
                resp
            }
        }))
    }

    pub fn router(&self) -> Router {
        let reg = self.registry.clone();
        Router::new().route("/", get(move || {
            let encoder = TextEncoder::new();
            let metric_families = reg.gather();
            let mut buffer = Vec::new();
            encoder.encode(&metric_families, &mut buffer).unwrap();
            let body = String::from_utf8(buffer).unwrap();
            async move { (axum::http::StatusCode::OK, body) }
        }))
    }
}

impl Default for MetricsPlugin {
    fn default() -> Self {
        Self::new()
    }
}
