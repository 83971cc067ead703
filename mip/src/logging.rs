use std::io::{self, IsTerminal as _};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

const ENV_NAME: &str = "MIP_LOG";

fn istty() -> bool {
    io::stdout().is_terminal() && io::stderr().is_terminal()
}

fn env_filter() -> EnvFilter {
    let directives = std::env::var(ENV_NAME).unwrap_or_default();
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

/// Install the global subscriber. Called once, first thing in `main`.
pub fn init() {
    let format = fmt::format()
        .with_level(true)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact()
        .with_timer(fmt::time::SystemTime::default());
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(istty())
        .event_format(format)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}
