//! Progress output.
//!
//! Status lines are for humans only. A sink that cannot be written to is
//! ignored, never reported as an error.

use std::io::Write;
use std::sync::Mutex;

/// Tag prefixed to verbose lines.
pub const VERBOSE_TAG: &str = "[devlink]";

pub trait Io {
    /// Write a line unconditionally.
    fn write(&self, message: &str);

    /// Write a line only in verbose mode.
    fn write_verbose(&self, message: &str);
}

/// Writes progress to stdout and verbose detail to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleIo {
    verbose: bool,
}

impl ConsoleIo {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Io for ConsoleIo {
    fn write(&self, message: &str) {
        let _ = writeln!(std::io::stdout(), "{}", message);
    }

    fn write_verbose(&self, message: &str) {
        if self.verbose {
            let _ = writeln!(std::io::stderr(), "  {} {}", VERBOSE_TAG, message);
        }
    }
}

/// Collects lines in memory, for hosts that render output themselves.
#[derive(Debug, Default)]
pub struct BufferIo {
    verbose: bool,
    lines: Mutex<Vec<String>>,
}

impl BufferIo {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

impl Io for BufferIo {
    fn write(&self, message: &str) {
        self.push(message.to_string());
    }

    fn write_verbose(&self, message: &str) {
        if self.verbose {
            self.push(format!("  {} {}", VERBOSE_TAG, message));
        }
    }
}
