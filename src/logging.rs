// src/logging.rs
//
// Terminal logger for the binary. Library code only uses the `log` facade.

use std::fmt::Display;
use std::str::FromStr;

use colored::Colorize;
use log::{Level, LevelFilter};

pub const LOG_LEVEL_VAR: &str = "MOVIELIB_LOG";

/// External crates only need to log warnings and errors
const ALLOWED_EXTERNAL_LEVELS: [Level; 2] = [Level::Warn, Level::Error];

/// Installs the global logger. Local records at or above `MOVIELIB_LOG`
/// (default info) are printed; external crates only warn and error.
pub fn init_logger() {
    let local_threshold = std::env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|value| LevelFilter::from_str(&value).ok())
        .unwrap_or(LevelFilter::Info);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let target = Target::from_str(record.target());
            let now = chrono::Local::now();

            out.finish(format_args!(
                "{:^5} {} {:^8} {}",
                level_to_string(&record.level()),
                now.format("%H:%M:%S").to_string().bright_black(),
                target,
                message
            ))
        })
        .level(LevelFilter::Trace)
        .filter(move |meta| {
            let target = Target::from_str(meta.target());

            let is_allowed = meta.level() <= local_threshold;
            let is_severe = ALLOWED_EXTERNAL_LEVELS.contains(&meta.level());

            target.is_local() && is_allowed || is_severe
        })
        .chain(std::io::stderr())
        .apply()
        .expect("logging is initialized")
}

enum Target {
    External(String),
    Store,
    Service,
    App,
    Core,
}

impl Target {
    fn from_str(str: &str) -> Self {
        let mut split = str.split("::");
        let krate = split.next().unwrap_or_default();
        if krate != "movielib" {
            return Target::External(krate.to_string());
        }

        match split.next() {
            Some("repositories") => Self::Store,
            Some("services") => Self::Service,
            Some("application") => Self::App,
            _ => Self::Core,
        }
    }

    fn is_local(&self) -> bool {
        !matches!(self, Self::External(_))
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let result = match self {
            Target::External(x) => x.as_str().clear(),
            Target::Store => "STORE".bright_green(),
            Target::Service => "SERVICE".bright_purple(),
            Target::App => "APP".cyan(),
            Target::Core => "CORE".blue(),
        };

        Display::fmt(&result, f)
    }
}

fn level_to_string(level: &Level) -> String {
    match level {
        Level::Error => " ERR ".black().on_red().bold().to_string(),
        Level::Warn => " WRN ".black().on_yellow().bold().to_string(),
        Level::Info => " INF ".black().on_blue().bold().to_string(),
        Level::Debug => " DBG ".white().on_black().to_string(),
        Level::Trace => " TRC ".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets() {
        assert!(matches!(Target::from_str("movielib::services::catalog_service"), Target::Service));
        assert!(matches!(Target::from_str("movielib::repositories::json_file_store"), Target::Store));
        assert!(matches!(Target::from_str("movielib"), Target::Core));
        assert!(!Target::from_str("argon2").is_local());
    }
}
