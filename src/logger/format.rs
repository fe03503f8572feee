//! Log formatting and console output with ANSI colors
//!
//! Handles:
//! - Colorized tag and level formatting
//! - Multi-line messages aligned under the prefix
//! - Broken pipe handling for piped commands

use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stderr, stdout, ErrorKind, Write};

/// Log format widths for alignment
const TAG_WIDTH: usize = 10;
const LEVEL_WIDTH: usize = 8;

pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let time = Local::now().format("%H:%M:%S").to_string();
    let prefix = format!(
        "{} [{}] [{}] ",
        time.dimmed(),
        format_tag(tag),
        format_level(level)
    );
    let continuation = " ".repeat(time.len() + TAG_WIDTH + LEVEL_WIDTH + 7);

    let mut lines = message.lines();
    let first = lines.next().unwrap_or_default();
    let mut output = format!("{}{}", prefix, first);
    for line in lines {
        output.push('\n');
        output.push_str(&continuation);
        output.push_str(line);
    }

    if level <= LogLevel::Warning {
        print_safe(&mut stderr(), &output);
    } else {
        print_safe(&mut stdout(), &output);
    }
}

fn format_tag(tag: LogTag) -> ColoredString {
    let label = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => label.bright_yellow().bold(),
        LogTag::Config => label.bright_white().bold(),
        LogTag::Quotes => label.bright_cyan().bold(),
        LogTag::Executor => label.bright_green().bold(),
        LogTag::Rpc => label.bright_blue().bold(),
        LogTag::Signer => label.bright_magenta().bold(),
        LogTag::Transfer => label.green().bold(),
    }
}

fn format_level(level: LogLevel) -> ColoredString {
    let label = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);
    match level {
        LogLevel::Error => label.bright_red().bold(),
        LogLevel::Warning => label.yellow().bold(),
        LogLevel::Info => label.normal(),
        LogLevel::Debug => label.dimmed(),
        LogLevel::Verbose => label.dimmed().italic(),
    }
}

/// Write a line, silently stopping on a closed pipe (e.g. `| head`)
fn print_safe<W: Write>(out: &mut W, line: &str) {
    if let Err(e) = writeln!(out, "{}", line) {
        if e.kind() != ErrorKind::BrokenPipe {
            eprintln!("logger write failed: {}", e);
        }
    }
}
