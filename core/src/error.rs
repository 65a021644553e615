//! Failure modes of running and expanding programs.

use semu_types::Label;
use thiserror::Error;

/// Fatal error for the current run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// A taken jump named a label that no instruction carries.
    #[error("unknown label {label} (jump at instruction #{number})", number = .index + 1)]
    UnknownLabel { label: Label, index: usize },
}

/// The instruction set is acyclic under expansion, so this signals a broken
/// invariant rather than bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpansionError {
    #[error("expansion did not reach a basic program within {ceiling} rounds")]
    IterationCeilingExceeded { ceiling: u32 },
}
