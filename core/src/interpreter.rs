//! The fetch/execute loop.
//!
//! ```text
//! Running --(jump to EXIT | pc leaves [0, len))--> Halted
//! ```
//!
//! There is no step limit: a program that loops forever runs forever.

use std::collections::BTreeMap;

use semu_types::{Instruction, InstructionKind, Label, Program, Variable};

use crate::error::RunError;
use crate::state::ExecutionState;

/// Executes one program against caller-owned [`ExecutionState`]s.
///
/// Borrows the program read-only, so several interpreters may share it.
#[derive(Debug, Clone, Copy)]
pub struct Interpreter<'a> {
    program: &'a Program,
}

impl<'a> Interpreter<'a> {
    #[must_use]
    pub const fn new(program: &'a Program) -> Self {
        Self { program }
    }

    #[must_use]
    pub const fn program(&self) -> &'a Program {
        self.program
    }

    /// Execute the instruction at `pc`, charging its cost.
    ///
    /// Halts the state when `pc` is outside the program. A halted state is
    /// left untouched.
    pub fn step(&self, state: &mut ExecutionState) -> Result<(), RunError> {
        if !state.is_running() {
            return Ok(());
        }
        let Some(instruction) = self.program.get(state.pc()) else {
            state.halt();
            return Ok(());
        };
        state.add_cycles(instruction.cost());
        self.execute(instruction, state)
    }

    /// Run until halted; returns the total cycle count.
    pub fn run(&self, state: &mut ExecutionState) -> Result<u64, RunError> {
        while state.is_running() {
            self.step(state)?;
        }
        tracing::debug!(
            program = self.program.name(),
            cycles = state.cycles(),
            "run finished"
        );
        Ok(state.cycles())
    }

    fn execute(&self, instruction: &Instruction, state: &mut ExecutionState) -> Result<(), RunError> {
        let index = state.pc();
        match *instruction.kind() {
            InstructionKind::Increase { variable } => {
                state.increment(variable);
                state.advance();
            }
            InstructionKind::Decrease { variable } => {
                state.decrement(variable);
                state.advance();
            }
            InstructionKind::Neutral { .. } => state.advance(),
            InstructionKind::JumpNotZero { variable, target } => {
                let taken = state.get(variable) != 0;
                self.branch(state, taken, target, index)?;
            }
            InstructionKind::ZeroVariable { variable } => {
                state.set(variable, 0);
                state.advance();
            }
            InstructionKind::GotoLabel { target } => self.jump(state, target, index)?,
            InstructionKind::Assignment {
                destination,
                source,
            } => {
                let value = state.get(source);
                state.set(destination, value);
                state.advance();
            }
            InstructionKind::ConstantAssignment { variable, constant } => {
                state.set(variable, constant);
                state.advance();
            }
            InstructionKind::JumpZero { variable, target } => {
                let taken = state.get(variable) == 0;
                self.branch(state, taken, target, index)?;
            }
            InstructionKind::JumpEqualConstant {
                variable,
                constant,
                target,
            } => {
                let taken = state.get(variable) == constant;
                self.branch(state, taken, target, index)?;
            }
            InstructionKind::JumpEqualVariable {
                variable,
                other,
                target,
            } => {
                let taken = state.get(variable) == state.get(other);
                self.branch(state, taken, target, index)?;
            }
        }
        Ok(())
    }

    fn branch(
        &self,
        state: &mut ExecutionState,
        taken: bool,
        target: Label,
        index: usize,
    ) -> Result<(), RunError> {
        if taken {
            self.jump(state, target, index)
        } else {
            state.advance();
            Ok(())
        }
    }

    fn jump(&self, state: &mut ExecutionState, target: Label, index: usize) -> Result<(), RunError> {
        if target.is_exit() {
            state.halt();
            return Ok(());
        }
        let destination = self
            .program
            .lookup_label(target)
            .ok_or(RunError::UnknownLabel {
                label: target,
                index,
            })?;
        state.jump_to(destination);
        Ok(())
    }
}

/// Result of [`run_program`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub y: u64,
    pub cycles: u64,
    /// Ordered `y`, `x*` ascending, `z*` ascending.
    pub variables: BTreeMap<Variable, u64>,
}

/// Run `program` from a fresh state seeded with `inputs`.
pub fn run_program(
    program: &Program,
    inputs: &BTreeMap<Variable, i64>,
) -> Result<RunOutcome, RunError> {
    let mut state = ExecutionState::with_inputs(inputs);
    let cycles = Interpreter::new(program).run(&mut state)?;
    Ok(RunOutcome {
        y: state.get(Variable::Y),
        cycles,
        variables: state.snapshot(),
    })
}
