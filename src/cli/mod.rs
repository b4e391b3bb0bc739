//! Command-line interface for samcore.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **header**: Load a SAM/BAM/CRAM header into the registry and print it
//! - **cigar**: Evaluate a CIGAR string against a start position and read length
//!
//! ## Usage
//!
//! ```text
//! # Show the registered references of a BAM file
//! samcore header sample.bam
//!
//! # Pipe from samtools
//! samtools view -H sample.bam | samcore header -
//!
//! # Check a CIGAR for a 40 base read
//! samcore cigar 20M5B20M --start 100 --query-length 40
//! ```

use clap::{Parser, Subcommand};

pub mod cigar;
pub mod header;

#[derive(Parser)]
#[command(name = "samcore")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Inspect SAM/BAM headers and CIGAR strings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a header and print its registry
    Header(header::HeaderArgs),

    /// Evaluate a CIGAR string
    Cigar(cigar::CigarArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
