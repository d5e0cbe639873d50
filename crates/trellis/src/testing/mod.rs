/// Harness for driving a core in tests.
pub mod harness;

pub use harness::{Harness, HarnessBuilder};

/// Route `tracing` output to the test writer. Safe to call repeatedly.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}
