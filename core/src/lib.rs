//! Execution and expansion engine for semu.
//!
//! This crate drives the pure machine model from `semu-types`: the
//! degree-bounded expander that rewrites programs into primitives, and the
//! interpreter that runs them against a mutable execution state.

mod error;
pub mod expander;
mod interpreter;
mod state;

pub use error::{ExpansionError, RunError};
pub use expander::{
    DEFAULT_MAX_ROUNDS, ExpansionRow, ExpansionTrace, Expander, TracedInstruction,
    expand_to_degree, max_expansion_degree,
};
pub use interpreter::{Interpreter, RunOutcome, run_program};
pub use state::{ExecutionState, RunPhase};
