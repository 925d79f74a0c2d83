//! Shared utilities.
//!
//! Content hashing and POSIX tree-path arithmetic.

pub mod hash;
pub mod posix;
