//! Mutable machine state for a single run.

use std::collections::BTreeMap;

use semu_types::Variable;

/// Running/halted phase of a run. `Halted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Running,
    Halted,
}

/// Variable store, program counter, phase and cycle counter.
///
/// Every variable reads as 0 until written. `y` is materialized up front so
/// it always shows up in snapshots. Values are natural numbers: decrements
/// floor at 0 and increments saturate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionState {
    variables: BTreeMap<Variable, u64>,
    pc: usize,
    phase: RunPhase,
    cycles: u64,
}

impl Default for ExecutionState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            variables: BTreeMap::from([(Variable::Y, 0)]),
            pc: 0,
            phase: RunPhase::Running,
            cycles: 0,
        }
    }

    /// Fresh state pre-seeded with caller inputs (negative values clamp to 0).
    #[must_use]
    pub fn with_inputs<'a>(inputs: impl IntoIterator<Item = (&'a Variable, &'a i64)>) -> Self {
        let mut state = Self::new();
        for (&variable, &value) in inputs {
            state.set_input(variable, value);
        }
        state
    }

    pub fn set_input(&mut self, variable: Variable, value: i64) {
        self.set(variable, u64::try_from(value).unwrap_or(0));
    }

    #[must_use]
    pub fn get(&self, variable: Variable) -> u64 {
        self.variables.get(&variable).copied().unwrap_or(0)
    }

    pub fn set(&mut self, variable: Variable, value: u64) {
        self.variables.insert(variable, value);
    }

    pub fn increment(&mut self, variable: Variable) {
        let value = self.get(variable).saturating_add(1);
        self.set(variable, value);
    }

    pub fn decrement(&mut self, variable: Variable) {
        let value = self.get(variable).saturating_sub(1);
        self.set(variable, value);
    }

    #[must_use]
    pub const fn pc(&self) -> usize {
        self.pc
    }

    pub fn advance(&mut self) {
        self.pc += 1;
    }

    pub fn jump_to(&mut self, index: usize) {
        self.pc = index;
    }

    pub fn halt(&mut self) {
        self.phase = RunPhase::Halted;
    }

    #[must_use]
    pub const fn phase(&self) -> RunPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.phase, RunPhase::Running)
    }

    pub fn add_cycles(&mut self, cycles: u64) {
        self.cycles = self.cycles.saturating_add(cycles);
    }

    #[must_use]
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// All touched variables ordered `y`, `x*` ascending, `z*` ascending.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<Variable, u64> {
        self.variables.clone()
    }
}
