/// Core logging implementation with automatic filtering
use super::config::{get_logger_config, LoggerConfig};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Check if a log message should be displayed under the global configuration
pub fn should_log(tag: LogTag, level: LogLevel) -> bool {
    passes_filter(&get_logger_config(), tag, level)
}

/// Filtering rules:
/// 1. Errors are always shown
/// 2. Check against minimum log level threshold
/// 3. Debug level requires debug mode for that tag
/// 4. Verbose level requires --verbose or --verbose-<tag>
/// 5. If enabled_tags is non-empty, tag must be in the set
pub(crate) fn passes_filter(config: &LoggerConfig, tag: LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    if level == LogLevel::Verbose {
        return config.min_level == LogLevel::Verbose || config.verbose_tags.contains(&tag);
    }

    if level > config.min_level {
        return false;
    }

    if level == LogLevel::Debug && !config.debug_tags.contains(&tag) {
        return false;
    }

    config.enabled_tags.is_empty() || config.enabled_tags.contains(&tag)
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(tag, level) {
        return;
    }

    super::format::format_and_log(tag, level, message);
}
