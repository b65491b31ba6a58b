//! # oc2conf CLI entry point
//!
//! Parses command-line arguments, selects the tree source from the shape of
//! the root locator, and runs every discovered test suite in order.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use oc2conf_cli::run::{run_suite, RunContext, SuiteOutcome};
use oc2conf_core::{find_suites, is_remote_location, RemoteClient, TreeSource};
use oc2conf_schema::SchemaFormat;

/// Environment variable holding the access token for remote test roots.
const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// OpenC2 conformance test runner
///
/// Walks a test tree (a local directory or a GitHub-style contents API
/// URL), finds profile test suites, and validates each suite's example
/// commands and responses against the profile's schema.
#[derive(Parser, Debug)]
#[command(name = "oc2conf", version, about, long_about = None)]
struct Cli {
    /// Root of the test tree: a local directory or a contents API URL.
    #[arg(value_name = "ROOT", default_value = "Test")]
    root: String,

    /// Schema format used to select and interpret schema files.
    #[arg(long, value_enum, default_value = "typed")]
    mode: Mode,

    /// Fail instead of skipping a suite whose schema is not valid JSON.
    #[arg(long)]
    strict_schemas: bool,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Named-definition schemas in *.schema.json files.
    Typed,
    /// Whole-message wrapper schemas in plain .json files.
    Wrapper,
}

impl Mode {
    fn format(self) -> SchemaFormat {
        match self {
            Mode::Typed => SchemaFormat::Typed,
            Mode::Wrapper => SchemaFormat::Wrapper,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let source = if is_remote_location(&cli.root) {
        let token = std::env::var(TOKEN_ENV).with_context(|| {
            format!("environment variable {TOKEN_ENV} is required for remote test roots")
        })?;
        println!("Test data: {}, access token: {}", cli.root, masked(&token));
        TreeSource::Remote(RemoteClient::new(&token)?)
    } else {
        println!("Test data: {}", cli.root);
        TreeSource::Local
    };

    let ctx = RunContext {
        source,
        format: cli.mode.format(),
        strict_schemas: cli.strict_schemas,
    };

    let suites = find_suites(&ctx.source, &cli.root).context("test suite discovery failed")?;
    tracing::info!(count = suites.len(), "discovered test suites");

    for suite in &suites {
        let outcome =
            run_suite(&ctx, suite).with_context(|| format!("test suite {suite} failed"))?;
        if let SuiteOutcome::Ran(tally) = outcome {
            tracing::debug!(suite = %suite, errors = tally.total_errors(), "suite complete");
        }
    }
    Ok(())
}

/// Masked rendering of a token: only the last four characters survive.
fn masked(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let start = chars.len().saturating_sub(4);
    let tail: String = chars[start..].iter().collect();
    format!("..{tail}")
}
