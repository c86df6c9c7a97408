//! Tracing subscriber setup.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use keyward_core::config::{LogFormat, LoggingConfig};
use keyward_core::env::vars;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter directive used when `KEYWARD_LOG` is not set.
pub fn default_directive(verbose: u8, logging: &LoggingConfig) -> String {
    let level = match verbose {
        0 => logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    format!("keyward={level}")
}

/// Install the global subscriber. Logs go to stderr unless a log file is
/// configured, so secrets printed on stdout stay clean.
pub fn init(verbose: u8, logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(vars::KEYWARD_LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, logging)));

    let writer = match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let (json, pretty) = match logging.format {
        LogFormat::Json => (
            Some(tracing_subscriber::fmt::layer().json().with_writer(writer)),
            None,
        ),
        LogFormat::Pretty => (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(writer)),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(())
}
