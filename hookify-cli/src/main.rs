//! Hookify CLI.
//!
//! Commands:
//! - `hookify pre-tool-use`
//! - `hookify post-tool-use`
//! - `hookify stop`
//! - `hookify user-prompt-submit`
//!
//! Each reads a hook event as JSON from stdin and writes the decision as JSON
//! to stdout. The exit code is always 0: blocking is expressed in the JSON,
//! and internal errors produce a diagnostic message instead of a block.

use std::io::{self, Read, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hookify::{process_hook, Cli};
use hookify_common::{HookDecision, RuleSources};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("hookify=debug,hookify_common=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let decision = match read_stdin() {
        Ok(input) => process_hook(cli.command, &input, &RuleSources::from_env()),
        Err(e) => {
            tracing::error!("{}", e);
            HookDecision::error(e)
        }
    };

    if let Err(e) = write_decision(&decision) {
        tracing::error!("failed to write decision: {}", e);
    }
}

fn read_stdin() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

/// Write the decision with a trailing newline.
fn write_decision(decision: &HookDecision) -> hookify_common::Result<()> {
    let output_json = serde_json::to_string(decision)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(output_json.as_bytes())?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;
    Ok(())
}
