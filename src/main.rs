use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod parsing;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("samcore=debug,info")
    } else {
        EnvFilter::new("samcore=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Header(args) => {
            cli::header::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Cigar(args) => {
            cli::cigar::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
