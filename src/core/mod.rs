//! Core data types for SAM/BAM alignment data.
//!
//! This module provides the header registry and the CIGAR engine:
//!
//! - [`Header`](header::Header): References, read groups and programs keyed by name
//! - [`Reference`](reference::Reference): A reference sequence (`@SQ`)
//! - [`ReadGroup`](read_group::ReadGroup): A read group (`@RG`)
//! - [`Program`](program::Program): A processing program (`@PG`)
//! - [`SortOrder`](types::SortOrder): Declared record order
//! - [`Cigar`](cigar::Cigar): Alignment operations and their algebra
//!
//! ## Identifiers
//!
//! Every entity starts unregistered. Inserting it into a header assigns its
//! position in that header's list as its id:
//!
//! | Entity    | Lookup key | Duplicate name                        |
//! |-----------|------------|---------------------------------------|
//! | Reference | SN         | no-op, enrichment, or conflict error  |
//! | ReadGroup | ID         | error                                 |
//! | Program   | ID         | error                                 |
//!
//! Records refer to references by id only; `-1` means unmapped.

pub mod cigar;
pub mod header;
pub mod program;
pub mod read_group;
pub mod reference;
pub mod types;
