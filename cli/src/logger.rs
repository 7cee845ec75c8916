use std::fs::OpenOptions;

use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

use crate::config::LoggingConfig;

/// Parse a configured level name. Unknown names fall back to `Info`.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Level after the `-v` / `-q` flags are applied on top of the settings.
pub fn effective_level(config: &LoggingConfig, verbose: bool, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug.max(parse_level(config.level()))
    } else {
        parse_level(config.level())
    }
}

pub fn setup_logger(config: &LoggingConfig, level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let colors = ColoredLevelConfig::new()
        .trace(Color::BrightBlack)
        .debug(Color::BrightBlue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    let stderr_config = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                colors.color(record.level()),
                message
            ))
        })
        .chain(std::io::stderr());

    let mut base_config = fern::Dispatch::new().level(level).chain(stderr_config);

    if let Some(file_path) = config.file() {
        match OpenOptions::new().create(true).append(true).open(file_path) {
            Ok(file) => {
                let file_config = fern::Dispatch::new()
                    .format(|out, message, record| {
                        out.finish(format_args!(
                            "[{} {} {}] {}",
                            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                            record.level(),
                            record.target(),
                            message
                        ))
                    })
                    .chain(file);
                base_config = base_config.chain(file_config);
            }
            Err(e) => {
                eprintln!("Warning: Failed to open log file '{file_path}': {e}");
                eprintln!("Continuing without file logging.");
            }
        }
    }

    base_config.apply()?;

    log::debug!("Logger initialized with level: {level}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("TRACE"), LevelFilter::Trace);
        assert_eq!(parse_level("warn"), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("whatever"), LevelFilter::Info);
    }

    #[test]
    fn test_flags_override_settings() {
        let config = LoggingConfig::default();
        assert_eq!(effective_level(&config, false, false), LevelFilter::Info);
        assert_eq!(effective_level(&config, true, false), LevelFilter::Debug);
        assert_eq!(effective_level(&config, true, true), LevelFilter::Error);

        let trace: LoggingConfig = toml::from_str("level = \"trace\"").unwrap();
        assert_eq!(effective_level(&trace, true, false), LevelFilter::Trace);
    }
}
