use crate::types::Player;
use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

// Topics understood by --debug-filter
pub const TOPICS: [&str; 3] = ["flight", "collision", "turn"];

// Custom logger structure
#[derive(Debug)]
struct DuelLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl DuelLogger {
    fn topic_allowed(&self, metadata: &Metadata) -> bool {
        match &self.debug_filters {
            Some(filters) if metadata.level() >= log::Level::Debug => {
                filters.contains(metadata.target())
                    || filters.iter().any(|f| metadata.target().starts_with(f.as_str()))
            }
            _ => true,
        }
    }
}

impl log::Log for DuelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && self.topic_allowed(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let output = format_record(record, &Local::now().format("%H:%M:%S%.3f").to_string());

        // A closed stdout is not worth a panic inside the logger
        let mut stdout = io::stdout();
        let _ = writeln!(stdout, "{}", output);
        let _ = stdout.flush();
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

fn level_color(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "\x1B[31m", // Red
        log::Level::Warn => "\x1B[33m",  // Yellow
        log::Level::Info => "\x1B[32m",  // Green
        log::Level::Debug => "\x1B[36m", // Cyan
        log::Level::Trace => "\x1B[35m", // Magenta
    }
}

// Pulls "Player N" out of a message so every line about a side gets a [PN] tag.
// Numbers that name no player leave the line untagged.
fn player_tag(message: &str) -> Option<Player> {
    let idx = message.find("Player ")?;
    let digits: String = message[idx + 7..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    Player::from_id(digits.parse().ok()?)
}

fn format_record(record: &Record, timestamp: &str) -> String {
    let reset = "\x1B[0m";
    let message = record.args().to_string();

    let context = match player_tag(&message) {
        Some(player) => format!("[P{}] ", player.id()),
        None => String::new(),
    };

    let mut output = format!(
        "{timestamp} {color}{level:5}{reset} {context}{target}: {message}",
        color = level_color(record.level()),
        level = record.level(),
        target = record.target(),
    );

    if let Some(module_path) = record.module_path() {
        if module_path != record.target() {
            output.push_str(&format!(" [{}]", module_path));
        }
    }
    output
}

static LOGGER: OnceLock<DuelLogger> = OnceLock::new();

/// Parses a comma-separated topic list such as `"collision,turn"`.
pub fn parse_filters(filter_str: &str) -> HashSet<String> {
    filter_str
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Topics in a `--debug-filter` list that no log target uses.
pub fn unknown_topics(filter_str: &str) -> Vec<String> {
    let mut unknown: Vec<String> = parse_filters(filter_str)
        .into_iter()
        .filter(|f| !TOPICS.contains(&f.as_str()))
        .collect();
    unknown.sort();
    unknown
}

pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

// Initialize the logger with optional debug filters
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| DuelLogger {
        level,
        debug_filters: debug_filter.as_deref().map(parse_filters),
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

// Helper macros for specific debug topics
#[macro_export]
macro_rules! debug_flight {
    ($($arg:tt)*) => {
        log::debug!(target: "flight", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_collision {
    ($($arg:tt)*) => {
        log::debug!(target: "collision", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_turn {
    ($($arg:tt)*) => {
        log::debug!(target: "turn", "{}", format_args!($($arg)*))
    };
}
