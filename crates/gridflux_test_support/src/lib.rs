pub mod fake_host;
pub mod fixtures;
pub mod recording;

pub use fake_host::{FakeHost, FakeHostStats};
pub use recording::RecordingListener;

/// Route `log` output through the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
