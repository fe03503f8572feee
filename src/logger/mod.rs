//! Structured logging for the bridge client
//!
//! Tag-based logger with standard levels (Error/Warning/Info/Debug/Verbose),
//! per-tag debug control via `--debug-<tag>` flags and colored console output.
//!
//! ## Usage
//!
//! ```rust
//! use stargate_bridge::logger::{self, LogTag};
//!
//! logger::info(LogTag::Executor, "Executing step 1/2");
//! logger::warning(LogTag::Executor, "Gas estimation failed, using default");
//! logger::debug(LogTag::Rpc, "eth_gasPrice -> 0x4a817c800"); // Only with --debug-rpc
//! ```
//!
//! ## Initialization
//!
//! Binaries call [`init`] once at startup, which reads the process arguments.
//! Library users that never call it get the default configuration
//! (Info and above, no debug tags).

mod config;
mod core;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, init_from_args, set_logger_config, LoggerConfig};
pub use self::core::should_log;
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger from command-line arguments
pub fn init() {
    config::init_from_args(std::env::args());
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (shown unless --quiet raises nothing above errors)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level, only shown when debug is enabled for the tag
///
/// # Example
/// ```rust
/// use stargate_bridge::logger::{self, LogTag};
///
/// // Only shown with --debug-quotes
/// logger::debug(LogTag::Quotes, "GET /quotes srcChainKey=ethereum");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level, only shown with --verbose or --verbose-<tag>
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}
