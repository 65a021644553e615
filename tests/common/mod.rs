//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use semu_types::{Label, Variable};

pub fn x(n: u32) -> Variable {
    Variable::x(n).expect("x suffix must be positive")
}

pub fn z(n: u32) -> Variable {
    Variable::z(n).expect("z suffix must be positive")
}

pub fn l(n: u32) -> Label {
    Label::numbered(n).expect("label number must be positive")
}

pub fn inputs(pairs: &[(Variable, i64)]) -> BTreeMap<Variable, i64> {
    pairs.iter().copied().collect()
}

/// Every assignment of `0..=max` to `y`, `x1` and `x2`.
pub fn input_grid(max: i64) -> Vec<BTreeMap<Variable, i64>> {
    let mut grid = Vec::new();
    for y in 0..=max {
        for a in 0..=max {
            for b in 0..=max {
                grid.push(inputs(&[(Variable::Y, y), (x(1), a), (x(2), b)]));
            }
        }
    }
    grid
}
