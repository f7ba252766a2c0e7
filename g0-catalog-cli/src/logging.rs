//! Logger setup: plain messages on stderr, optionally teed to a file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use log::LevelFilter;

use crate::CliError;

/// Writes to the console and, with ANSI codes stripped, to a log file.
struct Tee {
    console: io::Stderr,
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.console.write_all(buf)?;
        self.file.write_all(&strip_ansi_escapes::strip(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.console.flush()?;
        self.file.flush()
    }
}

fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. `RUST_LOG` overrides the flag-derived level.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_for(quiet, verbose));
    builder.parse_default_env();

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    if let Some(path) = logfile {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(Tee {
            console: io::stderr(),
            file,
        })));
    }

    builder
        .try_init()
        .map_err(|e| CliError::logging(e.to_string()))
}

/// Log an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}
