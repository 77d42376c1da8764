use chrono::Utc;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;
use sha1::{Digest, Sha1};
use crate::common::structs::custom_error::CustomError;
use crate::config::structs::configuration::Configuration;

pub fn parse_log_level(level: &str) -> Result<log::LevelFilter, CustomError> {
    match level {
        "off" => Ok(log::LevelFilter::Off),
        "trace" => Ok(log::LevelFilter::Trace),
        "debug" => Ok(log::LevelFilter::Debug),
        "info" => Ok(log::LevelFilter::Info),
        "warn" => Ok(log::LevelFilter::Warn),
        "error" => Ok(log::LevelFilter::Error),
        _ => Err(CustomError::new(&format!("Unknown log level encountered: '{}'", level))),
    }
}

pub fn setup_logging(config: &Configuration) -> Result<(), CustomError>
{
    let level = parse_log_level(config.log_level.as_str())?;

    let colors = ColoredLevelConfig::new()
        .trace(Color::Cyan)
        .debug(Color::Magenta)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    if let Err(err) = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{:width$}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.9f"),
                colors.color(record.level()),
                record.target(),
                message,
                width = 5
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
    {
        return Err(CustomError::new(&format!("Failed to initialize logging: {}", err)));
    }
    info!("logging initialized.");
    Ok(())
}

/// Current unix time in whole seconds.
pub fn current_timestamp() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

pub fn sha1_hex(input: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize().as_slice())
}

/// Short hash scoping keys of one cache of one application in shared key/value stores.
pub fn namespace_hash(application_identifier: &str, cache_identifier: &str) -> String {
    let mut digest = sha1_hex(&format!("{}{}", application_identifier, cache_identifier));
    digest.truncate(12);
    digest
}

/// Resolves an optional lifetime into an absolute expiry timestamp, `0` meaning "never".
///
/// `None` never expires, `Some(0)` falls back to `default_lifetime` (where `0` is unlimited
/// as well) and any other value counts seconds from `now`.
pub fn resolve_expiry(lifetime: Option<u32>, default_lifetime: u32, now: u64) -> u64 {
    match lifetime {
        None => 0,
        Some(0) if default_lifetime == 0 => 0,
        Some(0) => now + default_lifetime as u64,
        Some(seconds) => now + seconds as u64,
    }
}

pub fn is_expired(expiry: u64, now: u64) -> bool {
    expiry != 0 && expiry < now
}
