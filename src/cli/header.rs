use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::header::Header;
use crate::parsing;

#[derive(Args)]
pub struct HeaderArgs {
    /// Input file (SAM, BAM or CRAM)
    /// Use '-' for stdin (expects header text)
    #[arg(required = true)]
    pub input: PathBuf,
}

/// Execute header subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read or its header fails to register.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: HeaderArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let header = parse_input(&args)?;

    if verbose {
        eprintln!(
            "Registered {} references, {} read groups, {} programs",
            header.references().len(),
            header.read_groups().len(),
            header.programs().len(),
        );
    }

    match format {
        OutputFormat::Text => print_text(&header),
        OutputFormat::Json => print_json(&header)?,
    }

    Ok(())
}

fn parse_input(args: &HeaderArgs) -> anyhow::Result<Header> {
    use std::io::{self, Read};

    // Handle stdin
    if args.input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(parsing::sam::parse_header_text(&buffer)?);
    }

    Ok(parsing::sam::parse_file(&args.input)?)
}

fn print_text(header: &Header) {
    let text = header.to_string();
    if text.ends_with('\n') || text.is_empty() {
        print!("{text}");
    } else {
        println!("{text}");
    }

    for rg in header.read_groups() {
        println!("# read group {}", rg.name());
    }
    for program in header.programs() {
        println!("# program {}", program.name());
    }
}

fn print_json(header: &Header) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(header)?);
    Ok(())
}
