//! Presentation-facing views of programs, previews and runs.
//!
//! Plain data with `Serialize`, so front-ends can print them or emit JSON.

use std::fmt;

use serde::Serialize;

use semu_types::{Instruction, Label, Variable};

/// One numbered listing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionLine {
    /// 1-based position in the listing.
    pub number: usize,
    pub basic: bool,
    pub label: Option<Label>,
    pub display: String,
    pub cycles: u64,
}

impl InstructionLine {
    #[must_use]
    pub fn new(number: usize, instruction: &Instruction) -> Self {
        Self {
            number,
            basic: instruction.is_basic(),
            label: instruction.label(),
            display: instruction.to_string(),
            cycles: instruction.cost(),
        }
    }
}

impl fmt::Display for InstructionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.basic { 'B' } else { 'S' };
        let label = self.label.map(|label| label.to_string()).unwrap_or_default();
        write!(
            f,
            "#{} ({kind}) [{label:^5}] {} ({})",
            self.number, self.display, self.cycles
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramSummary {
    pub program_name: String,
    pub inputs_used: Vec<Variable>,
    pub labels_used: Vec<Label>,
    pub instructions: Vec<InstructionLine>,
}

/// An original line and the lines it expanded into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpansionRow {
    pub origin: InstructionLine,
    pub tail: Vec<InstructionLine>,
}

impl fmt::Display for ExpansionRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origin)?;
        for line in &self.tail {
            write!(f, "  >>>  {line}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpansionPreview {
    pub degree: u32,
    pub rows: Vec<ExpansionRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameValue {
    pub name: Variable,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub program_name: String,
    pub degree: u32,
    pub y: u64,
    pub cycles: u64,
    /// Ordered `y`, `x*` ascending, `z*` ascending.
    pub variables: Vec<NameValue>,
}

impl RunResult {
    #[must_use]
    pub fn value_of(&self, variable: Variable) -> Option<u64> {
        self.variables
            .iter()
            .find(|entry| entry.name == variable)
            .map(|entry| entry.value)
    }
}
