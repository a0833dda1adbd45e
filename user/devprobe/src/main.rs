use std::{
    io::{self, Write},
    path::PathBuf,
    process::exit,
};

use clap::Parser;
use log::{warn, LevelFilter};
use probe_helper::{init_logger, DeviceError, DeviceProbe, USAGE};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(value_name = "DEVICE")]
    /// Path of the device node to probe
    ///
    /// The first 16 bytes are read and then overwritten with zero
    device: Option<PathBuf>,
    #[arg(hide = true)]
    /// Anything after the device path is ignored
    extra: Vec<PathBuf>,
    #[arg(long, env = "LOG", value_name = "LEVEL", default_value = "warn")]
    /// Log level for diagnostics on stderr
    /// [off|error|warn|info|debug|trace]
    log: LevelFilter,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = init_logger(cli.log) {
        eprintln!("logger init failed: {}", err);
    }
    let Some(device) = cli.device else {
        println!("{}", USAGE);
        return;
    };
    if !cli.extra.is_empty() {
        warn!("ignoring {} extra argument(s)", cli.extra.len());
    }
    let probe = DeviceProbe::new(device);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match probe.run(&mut out) {
        Ok(report) => {
            log::info!("probe of {} finished", report.path.display());
        }
        Err(err) => {
            drop(out);
            report_failure(&probe, &err);
            exit(err.exit_code());
        }
    }
}

/// Print the failure once. A report failure means stdout is unusable, so it
/// goes to stderr instead.
fn report_failure(probe: &DeviceProbe, err: &DeviceError) {
    log::error!("probe of {} failed", probe.path().display());
    let line = format!("{}: {}", err.kind_name(), err);
    let printed = match err {
        DeviceError::Report(_) => writeln!(io::stderr(), "{}", line),
        _ => writeln!(io::stdout(), "{}", line),
    };
    if printed.is_err() {
        let _ = writeln!(io::stderr(), "{}", line);
    }
}
