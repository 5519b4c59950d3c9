//! Riftbot -- a zone-control bot speaking the Platinum Rift referee protocol.
//!
//! Reads the setup and turn messages from stdin and writes two command lines
//! per turn to stdout. Logs go to stderr, filtered by `RUST_LOG`.

use std::io::{self, BufWriter};
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use riftbot::config::EngineConfig;
use riftbot::engine::{run, EngineError};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let result = EngineConfig::from_env()
        .map_err(EngineError::from)
        .and_then(|config| {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            run(stdin.lock(), &mut out, &config)
        });

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
