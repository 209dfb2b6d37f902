use std::fs::File;
use std::path::PathBuf;
use anyhow::anyhow;
use clap_verbosity_flag::{LogLevel, Verbosity};
use tracing_subscriber::fmt::Subscriber as FmtSubscriber;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_log::AsTrace;

const SUBSCRIBER_FAILED_MESSAGE: &str = "setting default subscriber failed";

/// Log to `path` when given, including timestamps and targets; otherwise log bare messages to stdout.
pub fn configure_tracing<IL: LogLevel>(path: Option<PathBuf>, verbosity: Verbosity<IL>) -> anyhow::Result<()> {
    let max_level = verbosity.log_level_filter().as_trace();

    match path {
        Some(path) => {
            let trace_file: File = File::create(&path)
                .map_err(|e| anyhow!("Unable to create trace file. file: {}, error: {}", path.display(), e))?;

            let file_subscriber = FmtSubscriber::builder()
                .with_writer(trace_file)
                .with_ansi(false)
                .with_max_level(max_level)
                .finish();

            tracing::subscriber::set_global_default(file_subscriber)
                .map_err(|e| anyhow!("{}. error: {}", SUBSCRIBER_FAILED_MESSAGE, e))?;
        },
        None => {
            let stdout_subscriber = FmtSubscriber::builder()
                .with_level(false)
                .with_target(false)
                .with_line_number(false)
                .with_span_events(FmtSpan::NONE)
                .without_time()
                .with_max_level(max_level)
                .finish();

            tracing::subscriber::set_global_default(stdout_subscriber)
                .map_err(|e| anyhow!("{}. error: {}", SUBSCRIBER_FAILED_MESSAGE, e))?;
        }
    };

    Ok(())
}
