//! Program documents.
//!
//! The loader's job is to hand the engine a well-formed [`Program`]. Programs
//! arrive as JSON:
//!
//! ```json
//! {
//!   "name": "double",
//!   "instructions": [
//!     { "label": "L1", "op": "decrease", "variable": "x1" },
//!     { "op": "jump_not_zero", "variable": "x1", "target": "L1" }
//!   ]
//! }
//! ```
//!
//! Variable and label names are validated during deserialization.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use semu_types::{Instruction, Program};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read program {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed program document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("program name must not be empty")]
    EmptyName,
}

#[derive(Deserialize)]
struct ProgramDocument {
    name: String,
    #[serde(default)]
    instructions: Vec<Instruction>,
}

pub fn parse_program(document: &str) -> Result<Program, LoadError> {
    let raw: ProgramDocument = serde_json::from_str(document)?;
    let name = raw.name.trim();
    if name.is_empty() {
        return Err(LoadError::EmptyName);
    }
    Ok(Program::new(name, raw.instructions))
}

pub fn load_program(path: &Path) -> Result<Program, LoadError> {
    let document = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let program = parse_program(&document)?;
    tracing::info!(
        path = %path.display(),
        program = program.name(),
        instructions = program.len(),
        "Program loaded"
    );
    Ok(program)
}
