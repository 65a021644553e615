//! Fresh-name allocation for expansion temporaries.

use std::num::NonZeroU32;

use crate::instruction::Instruction;
use crate::names::{Label, Variable};
use crate::program::Program;

/// Allocator for `z` variables and `L` labels that are unused in a program.
///
/// Seed it once per top-level expansion request from the original program and
/// thread the same value through every rewrite round. Counters only grow, so an
/// issued name never repeats and never collides with a scanned one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionContext {
    max_x: u32,
    max_z: u32,
    max_label: u32,
}

impl ExpansionContext {
    #[must_use]
    pub const fn new(max_x: u32, max_z: u32, max_label: u32) -> Self {
        Self {
            max_x,
            max_z,
            max_label,
        }
    }

    /// Seed the counters from the highest `x`, `z` and `L` suffixes referenced
    /// anywhere in `instructions`: variables, attached labels and jump targets.
    #[must_use]
    pub fn from_instructions(instructions: &[Instruction]) -> Self {
        let mut ctx = Self::default();
        for instruction in instructions {
            for variable in instruction.variables() {
                match variable {
                    Variable::Y => {}
                    Variable::X(n) => ctx.max_x = ctx.max_x.max(n.get()),
                    Variable::Z(n) => ctx.max_z = ctx.max_z.max(n.get()),
                }
            }
            let labels = instruction.label().into_iter().chain(instruction.jump_target());
            for number in labels.filter_map(Label::number) {
                ctx.max_label = ctx.max_label.max(number);
            }
        }
        ctx
    }

    #[must_use]
    pub fn from_program(program: &Program) -> Self {
        Self::from_instructions(program.instructions())
    }

    /// Next unused work variable.
    pub fn fresh_z(&mut self) -> Variable {
        let next = NonZeroU32::MIN.saturating_add(self.max_z);
        self.max_z = next.get();
        Variable::Z(next)
    }

    /// Next unused numbered label.
    pub fn fresh_label(&mut self) -> Label {
        let next = NonZeroU32::MIN.saturating_add(self.max_label);
        self.max_label = next.get();
        Label::Numbered(next)
    }

    #[must_use]
    pub const fn max_x(&self) -> u32 {
        self.max_x
    }

    #[must_use]
    pub const fn max_z(&self) -> u32 {
        self.max_z
    }

    #[must_use]
    pub const fn max_label(&self) -> u32 {
        self.max_label
    }
}
