//! Console logging.

/// Routes `log` records (and, through tracing's `log` feature, tracing
/// events) to the browser console. Safe to call more than once.
pub fn init() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
}
