//! Front-ends that feed SAM headers into the registry.
//!
//! - **Header text**: `@HD`, `@SQ`, `@RG`, `@PG` and `@CO` lines (stdin or pasted)
//! - **SAM/BAM/CRAM files**: headers decoded with noodles
//!
//! Every entity goes through the guarded `Header::add_*` insertions, so a
//! conflicting re-declaration fails the whole parse.
//!
//! ## Example
//!
//! ```rust,no_run
//! use samcore::parsing::sam::{parse_file, parse_header_text};
//! use std::path::Path;
//!
//! // Parse from a BAM file
//! let header = parse_file(Path::new("sample.bam")).unwrap();
//!
//! // Or parse from raw header text
//! let header = parse_header_text("@SQ\tSN:chr1\tLN:248956422\n").unwrap();
//! ```
//!
//! ## Supported Tags
//!
//! | Record | Tags |
//! |--------|------|
//! | `@HD`  | VN, SO |
//! | `@SQ`  | SN (required), LN (required), M5, AS, UR, SP, AN |
//! | `@RG`  | ID (required), CN, DS, DT, FO, KS, LB, PG, PI, PL, PM, PU, SM |
//! | `@PG`  | ID (required), PN, CL, PP, DS, VN |

pub mod sam;
