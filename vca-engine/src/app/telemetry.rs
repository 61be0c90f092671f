use color_eyre::eyre::eyre;
use std::path::Path;
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// A subscriber printing human readable events to the terminal, and json events to `log.log` in
/// `results`
///
/// `RUST_LOG` takes precedence over the level passed on the command line.
pub(crate) fn get_subscriber(
    level: super::LogLevel,
    results: &Path,
) -> (
    impl Subscriber + Send + Sync,
    tracing_appender::non_blocking::WorkerGuard,
) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let fmt_layer = tracing_subscriber::fmt::Layer::new()
        .with_writer(console::Term::stderr)
        .with_target(false)
        .without_time();

    let appender = tracing_appender::rolling::never(results, "log.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    (
        Registry::default().with(env_filter).with(fmt_layer).with(
            tracing_subscriber::fmt::Layer::new()
                .with_writer(non_blocking)
                .json(),
        ),
        guard,
    )
}

/// Route `log` records into tracing and install `subscriber` for the whole process
pub(crate) fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> color_eyre::Result<()> {
    LogTracer::init().map_err(|e| eyre!("Failed to initialise logger: {}", e))?;
    set_global_default(subscriber).map_err(|e| eyre!("Failed to set a subscriber: {}", e))?;
    Ok(())
}
