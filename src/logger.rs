//! Stderr logger, kept out of the way of command output on stdout.

use std::io::Write;
use std::time::Instant;

use log::{Log, Metadata, Record};

struct StderrLogger {
    filter: log::LevelFilter,
    start: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.start.elapsed().as_secs_f64();
        eprintln!(
            "[{elapsed:.3}s] [{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Initialize the global logger. The level comes from `RUST_LOG` and
/// defaults to info. Must be called once before any logging.
///
/// # Panics
///
/// Panics if called more than once.
pub fn init() {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(log::LevelFilter::Info);

    let logger = StderrLogger {
        filter,
        start: Instant::now(),
    };

    log::set_boxed_logger(Box::new(logger)).expect("logger already initialized");
    log::set_max_level(filter);
}
