//! CLI entry point - the composition root.
//!
//! This is the ONLY place where the session is constructed via bootstrap.
//! Command dispatch routes to handlers which drive the `TriageSession`.

use std::time::Duration;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use photocull_cli::{Cli, CliConfig, Commands, bootstrap, exit_code, handlers};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig {
        server: cli.server,
        timeout: cli.timeout.map(Duration::from_secs),
        rollback: cli.rollback.into(),
    };
    let mut ctx = bootstrap(config)?;

    match command {
        Commands::List { view, json } => handlers::list::execute(&mut ctx, &view, json).await,
        Commands::Stats { view } => handlers::stats::execute(&mut ctx, &view).await,
        Commands::Rate { id, stars } => handlers::judge::rate(&mut ctx, id, stars).await,
        Commands::Label { id, label } => handlers::judge::label(&mut ctx, id, label).await,
        Commands::Keys { id, keys } => handlers::keys::execute(&mut ctx, id, &keys).await,
        Commands::Batch { action, view } => {
            handlers::batch::execute(&mut ctx, action, &view).await
        }
        Commands::Upload { files } => handlers::upload::execute(&mut ctx, &files).await,
        Commands::Export { kind } => handlers::export::execute(&mut ctx, kind).await,
        Commands::Sample { view } => handlers::sample::execute(&mut ctx, &view),
    }
}

#[tokio::main]
async fn main() {
    // Load .env before parsing so PHOTOCULL_SERVER can come from it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_code(&err));
    }
}
