//! One-step rewrite rules for synthetic instructions.
//!
//! Every rule emits a sequence that, entered from the top and left by falling
//! off the bottom, behaves like one execution of the synthetic instruction on
//! every variable except its fresh temporaries. Internal jumps only target
//! labels issued by the [`ExpansionContext`]; the original attached label is
//! moved onto the first emitted instruction and nowhere else, because label
//! text may be reused later in the program and resolution is first-wins.

use std::iter;

use crate::context::ExpansionContext;
use crate::instruction::{Instruction, InstructionKind};
use crate::names::{Label, Variable};

impl Instruction {
    /// Rewrite this instruction one level.
    ///
    /// Basic instructions return themselves unchanged. Synthetic ones return a
    /// fresh sequence whose children may themselves be synthetic.
    #[must_use]
    pub fn expand(&self, ctx: &mut ExpansionContext) -> Vec<Instruction> {
        let mut body = match *self.kind() {
            InstructionKind::Increase { .. }
            | InstructionKind::Decrease { .. }
            | InstructionKind::Neutral { .. }
            | InstructionKind::JumpNotZero { .. } => return vec![*self],
            InstructionKind::ZeroVariable { variable } => zero_variable(variable, ctx),
            InstructionKind::GotoLabel { target } => goto_label(target, ctx),
            InstructionKind::Assignment {
                destination,
                source,
            } => assignment(destination, source, ctx),
            InstructionKind::ConstantAssignment { variable, constant } => {
                constant_assignment(variable, constant)
            }
            InstructionKind::JumpZero { variable, target } => jump_zero(variable, target, ctx),
            InstructionKind::JumpEqualConstant {
                variable,
                constant,
                target,
            } => jump_equal_constant(variable, constant, target, ctx),
            InstructionKind::JumpEqualVariable {
                variable,
                other,
                target,
            } => jump_equal_variable(variable, other, target, ctx),
        };
        if let Some(first) = body.first_mut() {
            *first = first.with_label(self.label());
        }
        body
    }

    /// Longest expansion chain below this instruction: 0 for basic ones.
    #[must_use]
    pub fn degree(&self) -> u32 {
        if self.is_basic() {
            return 0;
        }
        let children = self.expand(&mut ExpansionContext::default());
        1 + children.iter().map(Instruction::degree).max().unwrap_or(0)
    }
}

// v <- v ; A: v <- v - 1 ; IF v != 0 GOTO A
fn zero_variable(variable: Variable, ctx: &mut ExpansionContext) -> Vec<Instruction> {
    let repeat = ctx.fresh_label();
    vec![
        Instruction::neutral(variable),
        Instruction::decrease(variable).labeled(repeat),
        Instruction::jump_not_zero(variable, repeat),
    ]
}

// A fresh temporary is never decremented, so after one increment it is a
// guaranteed-nonzero condition.
fn goto_label(target: Label, ctx: &mut ExpansionContext) -> Vec<Instruction> {
    let always = ctx.fresh_z();
    vec![
        Instruction::increase(always),
        Instruction::jump_not_zero(always, target),
    ]
}

// Drains `source` into a temporary, then pours the temporary back into both
// `source` and `destination`. The temporary ends at zero.
fn assignment(
    destination: Variable,
    source: Variable,
    ctx: &mut ExpansionContext,
) -> Vec<Instruction> {
    if destination == source {
        return vec![Instruction::neutral(destination)];
    }
    let drain = ctx.fresh_label();
    let refill = ctx.fresh_label();
    let done = ctx.fresh_label();
    let temp = ctx.fresh_z();
    vec![
        Instruction::zero_variable(destination),
        Instruction::jump_not_zero(source, drain),
        Instruction::goto_label(done),
        Instruction::decrease(source).labeled(drain),
        Instruction::increase(temp),
        Instruction::jump_not_zero(source, drain),
        Instruction::decrease(temp).labeled(refill),
        Instruction::increase(destination),
        Instruction::increase(source),
        Instruction::jump_not_zero(temp, refill),
        Instruction::neutral(destination).labeled(done),
    ]
}

fn constant_assignment(variable: Variable, constant: u64) -> Vec<Instruction> {
    iter::once(Instruction::zero_variable(variable))
        .chain((0..constant).map(|_| Instruction::increase(variable)))
        .collect()
}

fn jump_zero(variable: Variable, target: Label, ctx: &mut ExpansionContext) -> Vec<Instruction> {
    let skip = ctx.fresh_label();
    vec![
        Instruction::jump_not_zero(variable, skip),
        Instruction::goto_label(target),
        Instruction::neutral(variable).labeled(skip),
    ]
}

// Copy into a temporary and count it down `constant` times. Hitting zero early,
// or anything left over afterwards, means "not equal".
fn jump_equal_constant(
    variable: Variable,
    constant: u64,
    target: Label,
    ctx: &mut ExpansionContext,
) -> Vec<Instruction> {
    let temp = ctx.fresh_z();
    let not_equal = ctx.fresh_label();
    let mut body = vec![Instruction::assignment(temp, variable)];
    for _ in 0..constant {
        body.push(Instruction::jump_zero(temp, not_equal));
        body.push(Instruction::decrease(temp));
    }
    body.extend([
        Instruction::jump_not_zero(temp, not_equal),
        Instruction::goto_label(target),
        Instruction::neutral(variable).labeled(not_equal),
    ]);
    body
}

// Count both copies down in lockstep; equal iff they reach zero together.
fn jump_equal_variable(
    variable: Variable,
    other: Variable,
    target: Label,
    ctx: &mut ExpansionContext,
) -> Vec<Instruction> {
    let left = ctx.fresh_z();
    let right = ctx.fresh_z();
    let step = ctx.fresh_label();
    let left_empty = ctx.fresh_label();
    let not_equal = ctx.fresh_label();
    vec![
        Instruction::assignment(left, variable),
        Instruction::assignment(right, other),
        Instruction::jump_zero(left, left_empty).labeled(step),
        Instruction::jump_zero(right, not_equal),
        Instruction::decrease(left),
        Instruction::decrease(right),
        Instruction::goto_label(step),
        Instruction::jump_zero(right, target).labeled(left_empty),
        Instruction::neutral(variable).labeled(not_equal),
    ]
}
