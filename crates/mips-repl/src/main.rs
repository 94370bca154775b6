//! CLI entry point for the interactive simulator.

use std::env;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use log::LevelFilter;
use mips_core::{Simulator, SimulatorConfig};
use mips_repl::{ReplError, Session, SessionEnd};
#[cfg(test)]
use rstest as _;
#[cfg(test)]
use tempfile as _;
use thiserror as _;

const LOG_ENV: &str = "MIPS_SIM_LOG";

const USAGE_TEXT: &str = "\
Usage: mips-sim [options] [script]

Reads one instruction per line from <script>, or from stdin when omitted.
Type HELP for the instruction list, DEBUG for the registers, EXIT to quit.

Options:
  -q, --quiet       Do not print prompts or the start-up register table
  -v, --verbose     Log every cycle to stderr
      --no-trace    Do not print EXECUTE lines
      --max-line N  Override the per-line character limit (default: 63)
  -h, --help        Show this help message

Environment:
  MIPS_SIM_LOG      Log filter (e.g. debug, mips_core=trace)
";

#[derive(Debug, PartialEq, Eq)]
struct RunArgs {
    script: Option<PathBuf>,
    quiet: bool,
    verbose: bool,
    trace: bool,
    max_line: Option<usize>,
}

#[derive(Debug, PartialEq, Eq)]
enum ParseResult {
    Run(RunArgs),
    Help,
}

#[allow(clippy::while_let_on_iterator)]
fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut run = RunArgs {
        script: None,
        quiet: false,
        verbose: false,
        trace: true,
        max_line: None,
    };

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(ParseResult::Help);
        }

        if arg == "--quiet" || arg == "-q" {
            run.quiet = true;
            continue;
        }

        if arg == "--verbose" || arg == "-v" {
            run.verbose = true;
            continue;
        }

        if arg == "--no-trace" {
            run.trace = false;
            continue;
        }

        if arg == "--max-line" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for --max-line".to_string())?;
            let value = value.to_string_lossy();
            let limit = value
                .parse::<usize>()
                .ok()
                .filter(|&limit| limit > 0)
                .ok_or_else(|| format!("invalid line limit: {value}"))?;
            run.max_line = Some(limit);
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if run.script.is_some() {
            return Err("multiple script paths provided".to_string());
        }
        run.script = Some(PathBuf::from(arg));
    }

    Ok(ParseResult::Run(run))
}

fn simulator_config(args: &RunArgs) -> SimulatorConfig {
    let defaults = SimulatorConfig::default();
    SimulatorConfig {
        max_line_chars: args.max_line.unwrap_or(defaults.max_line_chars),
        tracing_enabled: args.trace,
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_env(LOG_ENV)
        .target(env_logger::Target::Stderr)
        .init();
}

fn run_session(input: impl BufRead, args: &RunArgs) -> Result<SessionEnd, ReplError> {
    let simulator = Simulator::new(simulator_config(args));
    let stdout = io::stdout();
    let mut session = Session::new(simulator, input, stdout.lock(), args.quiet);
    session.run()
}

fn run(args: &RunArgs) -> Result<SessionEnd, ReplError> {
    match &args.script {
        Some(path) => {
            log::info!("running script {}", path.display());
            let file = File::open(path).map_err(|source| ReplError::Script {
                path: path.clone(),
                source,
            })?;
            run_session(BufReader::new(file), args)
        }
        None => run_session(io::stdin().lock(), args),
    }
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Run(args)) => {
            init_logging(args.verbose);
            match run(&args) {
                Ok(end) => {
                    log::debug!("session ended: {end:?}");
                    0
                }
                Err(error) => {
                    eprintln!("error: {error}");
                    1
                }
            }
        }
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            1
        }
    };

    std::process::exit(exit_code);
}
