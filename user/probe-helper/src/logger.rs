use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Writes `[LEVEL] message` lines to stderr so stdout only carries the report.
struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }
    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            Level::Error => eprintln!("[ERROR] {}", record.args()),
            Level::Warn => eprintln!("[WARN] {}", record.args()),
            Level::Info => eprintln!("[INFO] {}", record.args()),
            Level::Debug => eprintln!("[DEBUG] {}", record.args()),
            Level::Trace => eprintln!("[TRACE] {}", record.args()),
        };
    }
    fn flush(&self) {}
}

pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&SimpleLogger)?;
    log::set_max_level(level);
    Ok(())
}
