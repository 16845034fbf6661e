use env_logger::Env;

/// Initializes logging from `RUST_LOG`, showing warnings and errors by default.
pub fn init_logger() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
}
