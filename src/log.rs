use ::log::{LevelFilter, Log, Metadata, Record};
use std::time::SystemTime;

/// A minimal stderr logger for applications embedding the crate.
///
/// The numeric operations themselves never emit records; this exists so
/// that host programs get timestamped diagnostics without pulling in a
/// heavier logging backend.
pub struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= ::log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let timestamp = SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);

            eprintln!(
                "[{timestamp}][{level}][{target}] {message}",
                timestamp = timestamp,
                level = record.level(),
                target = record.target(),
                message = record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Installs the logger with the given maximum level.
pub fn init(level: LevelFilter) -> Result<(), ::log::SetLoggerError> {
    static LOGGER: SimpleLogger = SimpleLogger;

    ::log::set_logger(&LOGGER).map(|()| ::log::set_max_level(level))
}
