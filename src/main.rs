// CLI binary entry point for tagtext

use std::process;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

use cli::{commands, Cli, Commands, OutputFormatter};

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "tagtext=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<usize> {
    let config = commands::load_config(cli.config.as_deref(), cli.parser.as_deref())?;
    let formatter = OutputFormatter::new(cli.format, cli.quiet);

    match &cli.command {
        Commands::Parse { files, meta, output } => {
            commands::command_parse(files, meta, output.as_deref(), &config, &formatter)
        }
        Commands::Batch { directory, pattern } => {
            commands::command_batch(directory, pattern, &config, &formatter, cli.quiet)
        }
        Commands::Detect { files } => commands::command_detect(files, &config, &formatter),
        Commands::Extensions => commands::command_extensions(&config),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(0) => {}
        Ok(failures) => {
            tracing::debug!("{} input(s) failed", failures);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}
