/// Initialize the `env_logger` backend. Safe to call more than once per
/// process (later calls are no-ops); each binary calls this first thing
/// in `main`.
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
