use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::time::{SystemTime, UNIX_EPOCH};

/// Coloured, timestamped lines on stderr. Stdout stays free for the report.
pub struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let (color_code, reset_code) = get_color_codes(record.level());
            eprintln!("{}{} - {} - {}{}",
                      color_code,
                      get_formatted_time(),
                      record.level(),
                      record.args(),
                      reset_code);
        }
    }

    fn flush(&self) {}
}

static LOGGER: SimpleLogger = SimpleLogger;

pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)
        .map(|()| log::set_max_level(level))
}

/// Number of `-v` flags to a level filter, starting from warnings.
pub fn level_for_verbosity(verbose: u64) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn get_formatted_time() -> String {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let secs = duration.as_secs();

    format!("{:02}:{:02}:{:02}.{:03}",
            (secs % 86400) / 3600,
            (secs % 3600) / 60,
            secs % 60,
            duration.subsec_millis())
}

fn get_color_codes(level: Level) -> (&'static str, &'static str) {
    match level {
        Level::Error => ("\x1b[31m", "\x1b[0m"),   // Red
        Level::Warn => ("\x1b[33m", "\x1b[0m"),    // Yellow
        Level::Info => ("\x1b[32m", "\x1b[0m"),    // Green
        Level::Debug => ("\x1b[36m", "\x1b[0m"),   // Cyan
        Level::Trace => ("\x1b[35m", "\x1b[0m"),   // Magenta
    }
}
