use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Map a configured level name onto a tracing level, falling back to WARN
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Build the filter for `level`, keeping HTTP internals at WARN unless tracing
pub fn build_filter(level: Level) -> EnvFilter {
    let mut filter = EnvFilter::new(format!("{}", level));

    if level < Level::TRACE {
        for directive in ["hyper=warn", "hyper_util=warn", "reqwest=warn"] {
            match directive.parse() {
                Ok(directive) => filter = filter.add_directive(directive),
                Err(e) => tracing::warn!("Failed to set log filter '{}': {}", directive, e),
            }
        }
    }

    filter
}

/// Install the global subscriber. Logs go to stderr; stdout is for output.
pub fn init(level: &str) -> anyhow::Result<()> {
    let filter = build_filter(parse_level(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
