//! # samcore
//!
//! Header registry and CIGAR algebra for SAM/BAM alignment data.
//!
//! Two independent pieces carry the invariants that keep alignment data
//! consistent:
//!
//! - The **header registry** ([`Header`]) assigns stable ids to references,
//!   read groups and programs, deduplicates them by name, and tells harmless
//!   re-declarations apart from genuine conflicts.
//! - The **CIGAR engine** ([`Cigar`]) computes where an alignment ends on the
//!   reference and checks that a CIGAR is consistent with its read length.
//!
//! ## Example
//!
//! ```rust
//! use samcore::{Cigar, Header, Reference};
//!
//! let mut header = Header::new(
//!     Some("@HD\tVN:1.6\tSO:coordinate\n@SQ\tSN:chr1\tLN:248956422\n"),
//!     Vec::new(),
//! )
//! .unwrap();
//! let id = header.add_reference(Reference::new("chr2", 242_193_529).unwrap()).unwrap();
//! assert_eq!(id, 1);
//!
//! let cigar: Cigar = "5S6M".parse().unwrap();
//! assert_eq!(cigar.reference_end(8), 14);
//! assert!(cigar.is_valid(11));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Header registry entities and the CIGAR engine
//! - [`parsing`]: SAM header text and SAM/BAM/CRAM file front-ends
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::cigar::{Cigar, CigarOp, CigarOpKind, CigarViolation};
pub use core::header::{Header, HeaderError};
pub use core::program::Program;
pub use core::read_group::ReadGroup;
pub use core::reference::Reference;
pub use core::types::SortOrder;
pub use parsing::sam::ParseError;
