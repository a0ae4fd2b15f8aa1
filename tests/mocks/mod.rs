//! In-memory doubles for the client's transport and cache seams.

pub mod mock_cache;
pub mod mock_transport;

#[allow(unused_imports)]
pub use mock_cache::MockCacheStore;
#[allow(unused_imports)]
pub use mock_transport::MockTransport;

/// Route `tracing` output to the test harness. Set `RUST_LOG` to see it.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
