//! Expansion equivalence: a synthetic instruction and its expansion agree on
//! every non-temporary variable and on whether the jump was taken.
//!
//! Each instruction runs inside a small harness. Falling through bumps `x8`
//! and exits; a taken jump to `L9` bumps `x9`; a taken jump to `EXIT` bumps
//! neither.

use std::collections::BTreeMap;

use semu_core::{expand_to_degree, run_program};
use semu_types::{ExpansionContext, Instruction, Label, Program, Variable};

use crate::common::{input_grid, l, x};

fn harness(body: Vec<Instruction>) -> Program {
    let mut code = body;
    code.extend([
        Instruction::increase(x(8)),
        Instruction::jump_not_zero(x(8), Label::Exit),
        Instruction::increase(x(9)).labeled(l(9)),
    ]);
    Program::new("harness", code)
}

fn observe(program: &Program, inputs: &BTreeMap<Variable, i64>) -> BTreeMap<Variable, u64> {
    run_program(program, inputs)
        .unwrap_or_else(|err| panic!("{} failed: {err}", program.name()))
        .variables
        .into_iter()
        .filter(|(variable, _)| !variable.is_work())
        .collect()
}

fn samples() -> Vec<Instruction> {
    vec![
        Instruction::zero_variable(x(1)),
        Instruction::goto_label(l(9)),
        Instruction::goto_label(Label::Exit),
        Instruction::assignment(Variable::Y, x(1)),
        Instruction::assignment(x(1), x(2)),
        Instruction::assignment(x(1), x(1)),
        Instruction::constant_assignment(x(1), 0),
        Instruction::constant_assignment(Variable::Y, 3),
        Instruction::jump_zero(x(1), l(9)),
        Instruction::jump_zero(x(1), Label::Exit),
        Instruction::jump_equal_constant(x(1), 0, l(9)),
        Instruction::jump_equal_constant(x(1), 2, l(9)),
        Instruction::jump_equal_constant(x(1), 0, Label::Exit),
        Instruction::jump_equal_variable(x(1), x(2), l(9)),
        Instruction::jump_equal_variable(x(1), x(1), l(9)),
        Instruction::jump_equal_variable(Variable::Y, x(2), Label::Exit),
    ]
}

#[test]
fn one_step_expansion_matches_direct_execution() {
    for instruction in samples() {
        let direct = harness(vec![instruction]);
        let mut ctx = ExpansionContext::from_program(&direct);
        let expanded = harness(instruction.expand(&mut ctx));
        for inputs in input_grid(3) {
            assert_eq!(
                observe(&direct, &inputs),
                observe(&expanded, &inputs),
                "{instruction} diverged for {inputs:?}"
            );
        }
    }
}

#[test]
fn full_expansion_matches_direct_execution() {
    for instruction in samples() {
        let direct = harness(vec![instruction]);
        let basic = expand_to_degree(&direct, instruction.degree());
        assert!(basic.is_fully_basic(), "{instruction} not basic at its degree");
        for inputs in input_grid(3) {
            assert_eq!(
                observe(&direct, &inputs),
                observe(&basic, &inputs),
                "{instruction} diverged for {inputs:?}"
            );
        }
    }
}

#[test]
fn temporaries_are_reset_for_reentry() {
    // Each synthetic instruction runs three times in a loop over the same
    // temporaries; x3 counts iterations down.
    for instruction in samples() {
        let loop_back = l(20);
        let wrapped = |body: Vec<Instruction>| {
            let mut code = vec![Instruction::neutral(x(3)).labeled(loop_back)];
            code.extend(body);
            code.extend([
                Instruction::decrease(x(3)).labeled(l(9)),
                Instruction::jump_not_zero(x(3), loop_back),
            ]);
            Program::new("reentry", code)
        };
        let direct = wrapped(vec![instruction]);
        let basic = expand_to_degree(&direct, instruction.degree());
        for inputs in input_grid(2) {
            let mut inputs = inputs;
            inputs.insert(x(3), 3);
            let expected = observe(&direct, &inputs);
            assert_eq!(expected, observe(&basic, &inputs), "{instruction} for {inputs:?}");
        }
    }
}
