use std::collections::BTreeMap;

use thiserror::Error;

use semu_config::EngineSettings;
use semu_core::{ExecutionState, ExpansionError, Expander, Interpreter, RunError};
use semu_types::{Program, Variable};

use crate::dto::{
    ExpansionPreview, ExpansionRow, InstructionLine, NameValue, ProgramSummary, RunResult,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Run(#[from] RunError),
    #[error(transparent)]
    Expansion(#[from] ExpansionError),
}

/// A loaded program plus the operations presentation layers need.
///
/// The engine never mutates its program: each request expands a copy.
#[derive(Debug, Clone)]
pub struct Engine {
    program: Program,
    expander: Expander,
}

impl Engine {
    #[must_use]
    pub fn new(program: Program) -> Self {
        Self::with_settings(program, &EngineSettings::default())
    }

    #[must_use]
    pub fn with_settings(program: Program, settings: &EngineSettings) -> Self {
        Self {
            program,
            expander: Expander::new(settings.max_rounds()),
        }
    }

    #[must_use]
    pub fn program(&self) -> &Program {
        &self.program
    }

    #[must_use]
    pub fn program_name(&self) -> &str {
        self.program.name()
    }

    pub fn max_degree(&self) -> Result<u32, EngineError> {
        Ok(self.expander.max_expansion_degree(&self.program)?)
    }

    #[must_use]
    pub fn expanded(&self, degree: u32) -> Program {
        self.expander.expand_to_degree(&self.program, degree)
    }

    /// Listing of the program expanded to `degree`.
    #[must_use]
    pub fn summary(&self, degree: u32) -> ProgramSummary {
        let program = self.expanded(degree);
        ProgramSummary {
            program_name: self.program.name().to_string(),
            inputs_used: program.inputs_used(),
            labels_used: program.labels_used(),
            instructions: program
                .instructions()
                .iter()
                .enumerate()
                .map(|(index, instruction)| InstructionLine::new(index + 1, instruction))
                .collect(),
        }
    }

    #[must_use]
    pub fn inputs_used(&self, degree: u32) -> Vec<Variable> {
        self.expanded(degree).inputs_used()
    }

    /// One row per original instruction, each with the lines it became.
    #[must_use]
    pub fn preview(&self, degree: u32) -> ExpansionPreview {
        let trace = self.expander.trace(&self.program, degree);
        let rows = trace
            .rows()
            .into_iter()
            .map(|row| ExpansionRow {
                origin: InstructionLine::new(row.origin + 1, &row.instruction),
                tail: row
                    .tail
                    .iter()
                    .map(|(position, instruction)| InstructionLine::new(position + 1, instruction))
                    .collect(),
            })
            .collect();
        ExpansionPreview { degree, rows }
    }

    /// Expand to `degree` and run from `inputs` (negative values clamp to 0).
    pub fn run(
        &self,
        degree: u32,
        inputs: &BTreeMap<Variable, i64>,
    ) -> Result<RunResult, EngineError> {
        let program = self.expanded(degree);
        let mut state = ExecutionState::with_inputs(inputs);
        let cycles = Interpreter::new(&program).run(&mut state)?;
        let variables = state
            .snapshot()
            .into_iter()
            .map(|(name, value)| NameValue { name, value })
            .collect();
        let result = RunResult {
            program_name: self.program.name().to_string(),
            degree,
            y: state.get(Variable::Y),
            cycles,
            variables,
        };
        tracing::info!(
            program = self.program.name(),
            degree,
            y = result.y,
            cycles,
            "Run complete"
        );
        Ok(result)
    }
}
