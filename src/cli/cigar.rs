use clap::Args;

use crate::cli::OutputFormat;
use crate::core::cigar::Cigar;

#[derive(Args)]
pub struct CigarArgs {
    /// CIGAR string, e.g. 8M2I4M1D3M ('*' for none)
    #[arg(required = true, allow_hyphen_values = true)]
    pub cigar: String,

    /// 0-based alignment start on the reference
    #[arg(short, long, default_value = "0")]
    pub start: usize,

    /// Stored sequence length to validate against (defaults to the CIGAR's own)
    #[arg(short = 'l', long)]
    pub query_length: Option<usize>,
}

/// Execute cigar subcommand
///
/// # Errors
///
/// Returns an error if the CIGAR cannot be parsed or fails validation.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CigarArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let cigar: Cigar = args.cigar.parse()?;
    let query_length = args.query_length.unwrap_or_else(|| cigar.query_length());
    let validation = cigar.validate(query_length);

    if verbose {
        eprintln!("Parsed {} CIGAR operations", cigar.len());
    }

    match format {
        OutputFormat::Text => {
            println!("cigar\t{cigar}");
            println!("reference_end\t{}", cigar.reference_end(args.start));
            println!("query_length\t{}", cigar.query_length());
            match &validation {
                Ok(()) => println!("valid\ttrue"),
                Err(reason) => println!("valid\tfalse\t{reason}"),
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "cigar": cigar.to_string(),
                "operations": &cigar,
                "start": args.start,
                "reference_end": cigar.reference_end(args.start),
                "query_length": cigar.query_length(),
                "valid": validation.is_ok(),
                "reason": validation.as_ref().err().map(ToString::to_string),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    validation.map_err(|reason| anyhow::anyhow!("CIGAR {cigar} is invalid: {reason}"))
}
