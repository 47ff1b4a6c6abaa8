use crate::itm_fmt::ItmSink;
use core::fmt;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use uvisor_sync::OnceSlot;

pub struct DebugLogger {
    max_level: LevelFilter,
}

static LOGGER: OnceSlot<DebugLogger> = OnceSlot::new();
static DISABLED: DebugLogger = DebugLogger::new(LevelFilter::Off);

impl DebugLogger {
    #[must_use]
    pub const fn new(max_level: LevelFilter) -> Self {
        Self { max_level }
    }

    /// Call this once during early init.
    ///
    /// # Errors
    /// Fails if a logger has already been installed.
    pub fn init(self) -> Result<(), SetLoggerError> {
        let max_level = self.max_level;
        let logger: &'static Self = match LOGGER.set(self) {
            Ok(logger) => logger,
            // already installed; `set_logger` below reports it
            Err(_) => &DISABLED,
        };
        log::set_logger(logger)?;
        log::set_max_level(max_level);
        Ok(())
    }
}

/// Format one record as `"[LEVEL] target: message\n"`.
///
/// # Errors
/// Propagates errors of the underlying writer.
pub fn write_record<W: fmt::Write>(
    w: &mut W,
    level: Level,
    target: &str,
    args: &fmt::Arguments,
) -> fmt::Result {
    writeln!(w, "[{level}] {target}: {args}")
}

impl Log for DebugLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let _ = write_record(&mut ItmSink, record.level(), record.target(), record.args());
    }

    fn flush(&self) {}
}
