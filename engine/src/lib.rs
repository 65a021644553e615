//! Engine facade for semu.
//!
//! Bundles a loaded [`Program`] with the expander and interpreter and exposes
//! the operations presentation and automation layers call: summaries,
//! expansion previews, maximum degree and runs. Results come back as plain
//! serializable DTOs.

mod dto;
mod engine;
pub mod loader;

pub use dto::{
    ExpansionPreview, ExpansionRow, InstructionLine, NameValue, ProgramSummary, RunResult,
};
pub use engine::{Engine, EngineError};
pub use loader::{LoadError, load_program, parse_program};

// Re-export from crates for public API
pub use semu_config::{EngineSettings, SemuConfig};
pub use semu_core::{ExpansionError, RunError};
pub use semu_types::{Instruction, InstructionKind, Label, Program, Variable};
