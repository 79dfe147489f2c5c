//! Tracing initialization, following `knhk-test-cache`'s bin-level setup:
//! an `EnvFilter` seeded from `RUST_LOG`, plain `fmt` layer, no OTEL
//! pipeline (this driver is a local demo, not a deployed service).

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
