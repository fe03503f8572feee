/// Logger configuration and command-line flag parsing
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Highest level that may be displayed
    pub min_level: LogLevel,
    /// Tags with debug output enabled
    pub debug_tags: HashSet<LogTag>,
    /// Tags with verbose output enabled
    pub verbose_tags: HashSet<LogTag>,
    /// When non-empty, only these tags are displayed (errors excepted)
    pub enabled_tags: HashSet<LogTag>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Debug,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    match LOGGER_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn set_logger_config(config: LoggerConfig) {
    match LOGGER_CONFIG.write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Build a configuration from process arguments
///
/// Recognized flags: `--debug-<tag>`, `--debug-all`, `--verbose`,
/// `--verbose-<tag>`, `--quiet`. Unknown flags are ignored so binaries can
/// share argv with clap.
pub fn config_from_args<I, S>(args: I) -> LoggerConfig
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut config = LoggerConfig::default();

    for arg in args {
        let arg = arg.as_ref();
        if arg == "--quiet" {
            config.min_level = LogLevel::Warning;
        } else if arg == "--verbose" {
            config.min_level = LogLevel::Verbose;
        } else if arg == "--debug-all" {
            config.debug_tags.extend(LogTag::ALL);
        } else if let Some(key) = arg.strip_prefix("--debug-") {
            if let Some(tag) = LogTag::from_debug_key(key) {
                config.debug_tags.insert(tag);
            }
        } else if let Some(key) = arg.strip_prefix("--verbose-") {
            if let Some(tag) = LogTag::from_debug_key(key) {
                config.verbose_tags.insert(tag);
                config.debug_tags.insert(tag);
            }
        }
    }

    config
}

/// Parse flags and install the result as the global logger configuration
pub fn init_from_args<I, S>(args: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    set_logger_config(config_from_args(args));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_args() {
        let config = config_from_args([
            "tool_bridge_transfer",
            "--debug-rpc",
            "--verbose-executor",
            "--debug-unknown",
            "--amount",
            "1000000",
        ]);

        assert!(config.debug_tags.contains(&LogTag::Rpc));
        assert!(config.debug_tags.contains(&LogTag::Executor));
        assert!(config.verbose_tags.contains(&LogTag::Executor));
        assert!(!config.debug_tags.contains(&LogTag::Quotes));
        assert_eq!(config.min_level, LogLevel::Debug);
    }

    #[test]
    fn test_quiet_and_debug_all() {
        let config = config_from_args(["--quiet", "--debug-all"]);
        assert_eq!(config.min_level, LogLevel::Warning);
        assert_eq!(config.debug_tags.len(), LogTag::ALL.len());
    }
}
