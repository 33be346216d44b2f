use crate::defines::*;
use crate::types::StatusCode;

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::filter::threshold::ThresholdFilter;
use std::path::{Path, PathBuf};

pub fn log_file_path<Tz>(log_dir: &Path, now: &chrono::DateTime<Tz>) -> PathBuf
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    log_dir.join(format!("{}{}.log", LOG_FILE_PREFIX, now.format("%Y%m%d_%H%M%S")))
}

fn config(log_file: &Path, level: LevelFilter) -> Result<Config, StatusCode> {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_LOG_PATTERN)))
        .build(log_file)
        .map_err(|e| StatusCode::InternalErrorLogging(e.to_string()))?;
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_LOG_PATTERN)))
        .build();

    Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("file", Box::new(file)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Info)))
                .build("console", Box::new(console)),
        )
        .build(Root::builder().appender("file").appender("console").build(level))
        .map_err(|e| StatusCode::InternalErrorLogging(e.to_string()))
}

/// Log to a fresh timestamped file under `log_dir` and to stderr.
/// `verbose` lowers the file threshold to DEBUG; the console stays at INFO.
pub fn setup_logging(log_dir: &str, verbose: bool) -> Result<PathBuf, StatusCode> {
    let log_dir = Path::new(log_dir);
    std::fs::create_dir_all(log_dir).map_err(|e| StatusCode::InternalErrorLogging(e.to_string()))?;

    let log_file = log_file_path(log_dir, &chrono::Local::now());
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    log4rs::init_config(config(&log_file, level)?)
        .map_err(|e| StatusCode::InternalErrorLogging(e.to_string()))?;

    let rule = crate::util::rule();
    log::info!("{}", rule);
    log::info!("Trading Bot Started");
    log::info!("Log file: {}", log_file.display());
    log::info!("{}", rule);

    Ok(log_file)
}
