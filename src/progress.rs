/*!
 * Verbose progress reporting.
 *
 * A `ProgressReporter` is built once from the run configuration and handed to
 * the loader and exporter. When verbose mode is off it only forwards messages
 * to the `log` facade at debug level.
 */

use std::cell::RefCell;
use std::io::{self, Write};

use chrono::Local;
use log::debug;

/// Timestamped stage reporter
pub struct ProgressReporter {
    verbose: bool,
    sink: RefCell<Box<dyn Write>>,
}

impl ProgressReporter {
    /// Reporter writing to stdout when `verbose` is set
    pub fn new(verbose: bool) -> Self {
        Self::with_sink(verbose, Box::new(io::stdout()))
    }

    /// Reporter that never prints
    pub fn silent() -> Self {
        Self::with_sink(false, Box::new(io::sink()))
    }

    /// Reporter writing to an arbitrary sink
    pub fn with_sink(verbose: bool, sink: Box<dyn Write>) -> Self {
        Self {
            verbose,
            sink: RefCell::new(sink),
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    // @emits: "HH:MM:SS:: message" when verbose
    pub fn update(&self, message: &str) {
        debug!("{}", message);
        if !self.verbose {
            return;
        }

        let now = Local::now().format("%H:%M:%S");
        let mut sink = self.sink.borrow_mut();
        // Progress output is diagnostic; a closed stdout must not fail the run
        let _ = writeln!(sink, "{}:: {}", now, message);
        let _ = sink.flush();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::silent()
    }
}
