//! End-to-end behavior of expansion plus execution on small programs.

use semu_core::{Expander, expand_to_degree, max_expansion_degree, run_program};
use semu_types::{Instruction, Label, Program, Variable};

use crate::common::{inputs, l, x, z};

#[test]
fn counter_loop_copies_x1_into_y() {
    let program = Program::new(
        "copy",
        vec![
            Instruction::increase(z(1)),
            Instruction::jump_not_zero(x(1), l(3)).labeled(l(1)),
            Instruction::jump_not_zero(z(1), Label::Exit).labeled(l(2)),
            Instruction::decrease(x(1)).labeled(l(3)),
            Instruction::increase(Variable::Y),
            Instruction::jump_not_zero(z(1), l(1)),
        ],
    );
    let outcome = run_program(&program, &inputs(&[(x(1), 4)])).unwrap();
    assert_eq!(outcome.y, 4);
    assert_eq!(outcome.variables[&x(1)], 0);
    assert_eq!(outcome.variables[&z(1)], 1);
}

#[test]
fn expanded_assignment_preserves_its_source() {
    let program = Program::new("assign", vec![Instruction::assignment(Variable::Y, x(1))]);
    let expanded = expand_to_degree(&program, 1);
    assert_eq!(expanded.len(), 11);
    let outcome = run_program(&expanded, &inputs(&[(x(1), 3)])).unwrap();
    assert_eq!(outcome.y, 3);
    assert_eq!(outcome.variables[&x(1)], 3);
}

#[test]
fn jump_equal_constant_zero_exits_or_falls_through() {
    let program = Program::new(
        "jec",
        vec![
            Instruction::jump_equal_constant(x(1), 0, Label::Exit),
            Instruction::increase(Variable::Y),
        ],
    );
    for degree in 0..=3 {
        let expanded = expand_to_degree(&program, degree);
        let halted = run_program(&expanded, &inputs(&[(x(1), 0)])).unwrap();
        assert_eq!(halted.y, 0, "degree {degree}");
        let fell_through = run_program(&expanded, &inputs(&[(x(1), 1)])).unwrap();
        assert_eq!(fell_through.y, 1, "degree {degree}");
    }
}

#[test]
fn jumps_into_labeled_synthetic_instructions_survive_expansion() {
    // L1: IF x1 = 0 GOTO EXIT ; x1 <- x1 - 1 ; y <- y + 1 ; GOTO L1
    let program = Program::new(
        "drain",
        vec![
            Instruction::jump_zero(x(1), Label::Exit).labeled(l(1)),
            Instruction::decrease(x(1)),
            Instruction::increase(Variable::Y),
            Instruction::goto_label(l(1)),
        ],
    );
    let max = max_expansion_degree(&program).unwrap();
    assert_eq!(max, 2);
    for degree in 0..=max + 1 {
        let outcome = run_program(&expand_to_degree(&program, degree), &inputs(&[(x(1), 5)])).unwrap();
        assert_eq!((outcome.y, outcome.variables[&x(1)]), (5, 0), "degree {degree}");
    }
}

#[test]
fn duplicate_labels_bind_to_the_first_definition_after_expansion() {
    // Both `L1` slots are synthetic; only the first may receive jumps.
    let program = Program::new(
        "dup",
        vec![
            Instruction::goto_label(l(2)),
            Instruction::constant_assignment(Variable::Y, 7).labeled(l(1)),
            Instruction::goto_label(Label::Exit),
            Instruction::constant_assignment(Variable::Y, 1).labeled(l(1)),
            Instruction::goto_label(Label::Exit),
            Instruction::goto_label(l(1)).labeled(l(2)),
        ],
    );
    for degree in 0..=2 {
        let expanded = expand_to_degree(&program, degree);
        assert_eq!(expanded.lookup_label(l(1)), Some(first_position_of_l1(&expanded)));
        let outcome = run_program(&expanded, &inputs(&[])).unwrap();
        assert_eq!(outcome.y, 7, "degree {degree}");
    }
}

// Position of the first instruction carrying L1 in an expanded listing.
fn first_position_of_l1(program: &Program) -> usize {
    program
        .instructions()
        .iter()
        .position(|instruction| instruction.label() == Some(l(1)))
        .expect("L1 must survive expansion")
}

#[test]
fn degree_fixed_point_matches_behavior() {
    let program = Program::new(
        "mix",
        vec![
            Instruction::assignment(z(1), x(1)),
            Instruction::jump_equal_variable(z(1), x(2), l(1)),
            Instruction::constant_assignment(Variable::Y, 2),
            Instruction::goto_label(Label::Exit),
            Instruction::constant_assignment(Variable::Y, 1).labeled(l(1)),
        ],
    );
    let max = max_expansion_degree(&program).unwrap();
    let at_max = expand_to_degree(&program, max);
    assert!(at_max.is_fully_basic());
    assert_eq!(expand_to_degree(&program, max + 5), at_max);
    for (a, b, expected) in [(2, 2, 1), (2, 3, 2), (0, 0, 1)] {
        let seeded = inputs(&[(x(1), a), (x(2), b)]);
        let direct = run_program(&program, &seeded).unwrap();
        let basic = run_program(&at_max, &seeded).unwrap();
        assert_eq!(direct.y, expected);
        assert_eq!(basic.y, expected);
    }
}

#[test]
fn fresh_temporaries_do_not_clobber_existing_work_variables() {
    // z3 is live across the synthetic instruction; expansion must allocate z4+.
    let program = Program::new(
        "live",
        vec![
            Instruction::increase(z(3)),
            Instruction::goto_label(l(1)),
            Instruction::increase(Variable::Y).labeled(l(1)),
            Instruction::assignment(x(2), z(3)),
        ],
    );
    let expanded = Expander::default().expand_to_degree(&program, 2);
    let outcome = run_program(&expanded, &inputs(&[])).unwrap();
    assert_eq!(outcome.variables[&z(3)], 1);
    assert_eq!(outcome.variables[&x(2)], 1);
    assert_eq!(outcome.y, 1);
}

#[test]
fn natural_number_floor_holds_after_expansion() {
    let program = Program::new(
        "floor",
        vec![
            Instruction::decrease(x(1)),
            Instruction::decrease(x(1)),
            Instruction::zero_variable(x(2)),
            Instruction::constant_assignment(Variable::Y, 0),
        ],
    );
    let outcome = run_program(
        &expand_to_degree(&program, 2),
        &inputs(&[(x(1), 1), (x(2), -4), (Variable::Y, 9)]),
    )
    .unwrap();
    assert_eq!(outcome.variables[&x(1)], 0);
    assert_eq!(outcome.variables[&x(2)], 0);
    assert_eq!(outcome.y, 0);
}
