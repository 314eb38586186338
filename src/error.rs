//! Error taxonomy for the audit pipeline.
//!
//! Most stages degrade to a partial result instead of erroring; parse
//! failures travel as `ParseFailure` values in the report itself. These
//! variants exist only for the sandbox supervisor's internal plumbing,
//! where an error object (not a degraded outcome) is the right shape.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    /// The sandbox worker could not be supervised (spawn/pipe/protocol
    /// failure). Converted to a `Fail` outcome by the executor.
    #[error("sandbox failure: {0}")]
    Sandbox(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
