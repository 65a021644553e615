//! Core domain types for semu.
//!
//! This crate contains the pure machine model with no IO and minimal
//! dependencies: the variable/label namespace, the instruction set and its
//! rewrite rules, fresh-name allocation, and immutable programs.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod context;
mod expansion;
mod instruction;
mod names;
mod program;

pub use context::ExpansionContext;
pub use instruction::{Instruction, InstructionKind};
pub use names::{Label, NameError, Variable};
pub use program::Program;
