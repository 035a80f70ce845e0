//! # listgate CLI Entry Point
//!
//! Assembles subcommands, dispatches to handler modules, and owns the
//! process lifecycle: the validation core returns reports, only `main`
//! translates them into console output and an exit code.

use std::process::ExitCode;

use clap::Parser;

/// listgate — CI gate for a community-maintained token list.
///
/// Validates a candidate token-list document against the previously
/// accepted version and a fixed governance policy, then confirms every
/// token logo is reachable.
#[derive(Parser, Debug)]
#[command(name = "listgate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate a candidate token list.
    Check(listgate_cli::check::CheckArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => match listgate_cli::check::run(&args).await {
            Ok(report) if report.is_clean() => {
                println!("OK: {} passed validation", args.candidate.display());
                ExitCode::SUCCESS
            }
            Ok(report) => {
                eprintln!("{report}");
                eprintln!(
                    "FAILED: {} violation(s) in {}",
                    report.len(),
                    args.candidate.display()
                );
                ExitCode::FAILURE
            }
            Err(e) => {
                tracing::error!(error = format!("{e:#}"), "validation run aborted");
                eprintln!("error: {e:#}");
                ExitCode::FAILURE
            }
        },
    }
}
