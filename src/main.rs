//! bomr - Interactive upgrade assistant for Maven bills of materials
//!
//! For every project managed by a BOM, bomr lists the newer versions
//! available in Maven repositories, lets the operator pick one and rewrites
//! the governing version property. It also lists the artifacts a group
//! publishes, to help keep a BOM's dependency management complete.

use bomr::artifacts;
use bomr::cli::{ArtifactsArgs, ArtifactsDeltaArgs, CliArgs, Command, UpgradeArgs};
use bomr::logging;
use bomr::orchestrator::Orchestrator;
use bomr::output::{create_formatter, OutputConfig};
use bomr::registry::HttpClient;
use bomr::upgrade::ConsolePrompt;
use bomr::vcs::SystemGit;
use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let result = match args.command {
        Command::Upgrade(args) => upgrade(args).await,
        Command::Artifacts(args) => list_artifacts(args).await,
        Command::ArtifactsDelta(args) => artifacts_delta(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run an interactive upgrade session
async fn upgrade(args: UpgradeArgs) -> anyhow::Result<()> {
    logging::init(args.verbose, args.quiet);

    if args.verbose {
        eprintln!("bomr v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("BOM: {}", args.pom.display());
        if args.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    let color = !args.json && io::stdout().is_terminal();
    let orchestrator = Orchestrator::new(args.clone())?;
    let git = SystemGit::new();

    // JSON goes to stdout, so the prompt moves to stderr
    let report = if args.json {
        let mut prompt = ConsolePrompt::new(io::stdin().lock(), io::stderr(), false);
        orchestrator.run(&mut prompt, &git).await?
    } else {
        let mut prompt = ConsolePrompt::stdio(color);
        orchestrator.run(&mut prompt, &git).await?
    };

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet, args.dry_run)
        .with_color(color);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    if !args.json {
        writeln!(stdout)?;
    }
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    Ok(())
}

/// List the artifacts of a group at one version
async fn list_artifacts(args: ArtifactsArgs) -> anyhow::Result<()> {
    logging::init(args.verbose, false);

    let mut stdout = io::stdout().lock();
    artifacts::list(&args, HttpClient::new()?, &mut stdout).await?;
    stdout.flush()?;
    Ok(())
}

/// List the artifacts added and removed between two versions of a group
async fn artifacts_delta(args: ArtifactsDeltaArgs) -> anyhow::Result<()> {
    logging::init(args.verbose, false);

    let mut stdout = io::stdout().lock();
    artifacts::delta(&args, HttpClient::new()?, &mut stdout).await?;
    stdout.flush()?;
    Ok(())
}
