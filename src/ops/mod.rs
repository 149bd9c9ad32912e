//! High-level operations.
//!
//! This module contains the implementation of denv commands.

pub mod describe;
pub mod fingerprint;
pub mod tree;
pub mod verify;

pub use describe::{describe, OutputFormat, OutputFormatParseError};
pub use fingerprint::fingerprint;
pub use tree::tree;
pub use verify::{verify, VerifyReport};
