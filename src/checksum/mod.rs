// src/checksum/mod.rs

//! Change-set checksums.
//!
//! - [`hash`] holds the BLAKE3 helpers used to digest a change set and the
//!   external files it references.
//! - [`batch`] runs many independent checksum computations on a bounded
//!   worker pool.

pub mod batch;
pub mod hash;

pub use batch::{ChecksumGenerator, ChecksumItem};
pub use hash::{ChecksumBuilder, compute_file_hash};
