use tracing::Level;

// Initialize tracing for tests so the `tracing::debug!`/`warn!` calls this
// core emits at decision points (append, add_branch, is_rebuilt, ...) are
// actually observable when running with `--nocapture`.
#[ctor::ctor]
fn init_tracing() {
    tracing_subscriber::fmt().with_max_level(Level::TRACE).with_test_writer().init();
}
