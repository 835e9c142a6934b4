use tracing::{Level, level_filters::LevelFilter};
use tracing_subscriber::{
    filter::Targets, fmt::writer::MakeWriterExt, layer::SubscriberExt, util::SubscriberInitExt,
};

pub fn init(verbose: bool) -> Result<(), String> {
    let (log_level, max_level) = if verbose {
        (LevelFilter::DEBUG, Level::DEBUG)
    } else {
        (LevelFilter::INFO, Level::INFO)
    };

    let stdout_log_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_ansi(true)
        .with_target(true)
        .with_writer(std::io::stdout.with_max_level(max_level));

    let target = Targets::new().with_target("xrpl_models", log_level);

    tracing_subscriber::Registry::default()
        .with(target)
        .with(stdout_log_layer)
        .try_init()
        .map_err(|e| format!("Failed to install tracing subscriber: {e}"))
}
