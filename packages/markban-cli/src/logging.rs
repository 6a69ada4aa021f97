use env_logger::{Env, Target};

/// Route `log` records to stderr. `RUST_LOG` wins over `--verbose`.
pub fn init(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter));
    builder.target(Target::Stderr);
    if let Err(e) = builder.try_init() {
        eprintln!("failed to initialize logger: {}", e);
    }
}
