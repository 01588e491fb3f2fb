mod api;
mod properties;

/// Route `log` output (with the `logging` feature) to the test harness.
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
