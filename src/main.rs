//! # promptline Entry Point
//!
//! Asks one question on the controlling terminal and prints the accepted
//! answer on stdout. The prompt itself is drawn on stderr so the command can be
//! used inside `$(...)`.
//!
//! Exit codes: 0 accepted, 130 interrupted, 2 invalid parameters, 1 terminal
//! failure.

use anyhow::{Context, Result};
use promptline::cmd_args::CommandLineArgs;
use promptline::config::LOG_LEVEL_ENV_VAR;
use promptline::{prompt_on, InputError, SessionResult};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

const EXIT_ACCEPTED: u8 = 0;
const EXIT_INTERRUPTED: u8 = 130;

fn main() -> ExitCode {
    let cmd_args = CommandLineArgs::parse();

    if let Err(e) = init_tracing_subscriber(cmd_args.log_file()) {
        eprintln!("promptline: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(&cmd_args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("promptline: {e}");
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

fn run(cmd_args: &CommandLineArgs) -> Result<u8, InputError> {
    let spec = cmd_args.input_spec()?;
    tracing::debug!("prompting with {:?}", spec);

    let result = prompt_on(io::stderr(), &spec, cmd_args.session_config())?;
    print_result(&mut io::stdout().lock(), &result, cmd_args.json())?;
    Ok(status_code(&result))
}

fn status_code(result: &SessionResult) -> u8 {
    match result {
        SessionResult::Accepted(_) => EXIT_ACCEPTED,
        SessionResult::Interrupted => EXIT_INTERRUPTED,
    }
}

/// Plain mode prints only an accepted value; JSON mode always prints
fn print_result<W: Write>(out: &mut W, result: &SessionResult, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, result)?;
        writeln!(out)?;
    } else if let SessionResult::Accepted(value) = result {
        writeln!(out, "{value}")?;
    }
    out.flush()?;
    Ok(())
}

fn init_tracing_subscriber(log_file: Option<&Path>) -> Result<()> {
    let filter = match (EnvFilter::try_from_env(LOG_LEVEL_ENV_VAR), log_file) {
        (Ok(filter), _) => filter,
        (Err(_), Some(_)) => EnvFilter::new("info"),
        // Nothing asked for logs; keep the terminal clean
        (Err(_), None) => return Ok(()),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::rfc_3339());

    match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}
