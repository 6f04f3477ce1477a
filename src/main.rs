#![forbid(unsafe_code)]
use std::io::Write;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use lsr::cli::Args;
use lsr::config::{Config, Environment};
use lsr::error::LsError;
use lsr::metadata::SystemMetadata;
use lsr::{listing, terminal};

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args.validated(),
        Err(e) => {
            // Help and version go to stdout and succeed; usage errors exit 1.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_tracing(args.verbose);

    if let Err(e) = run_app(&args) {
        // Error messages already carry their cause.
        eprintln!("lsr: {e}");
        std::process::exit(1);
    }
}

fn run_app(args: &Args) -> Result<()> {
    let env = Environment::from_process(
        terminal::stdout_is_interactive(),
        terminal::terminal_width(),
    );
    let config = Config::resolve(args, &env);
    debug!(?config, "resolved configuration");

    let source = SystemMetadata::new();
    let mut out = terminal::buffered_stdout();

    let listed = listing::run(&mut out, &args.paths, &config, &source);
    // Whatever was listed before a failure still reaches stdout.
    let flushed = out.flush();
    listed?;
    flushed.map_err(LsError::Output)?;
    Ok(())
}

/// Log to stderr; `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
