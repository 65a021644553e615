//! Variable and label namespace.
//!
//! Both are small `Copy` value types. Ordering is load-bearing: variable
//! listings and fresh-name allocation both rely on `y < x1 < x2 < .. < z1 < ..`
//! and `L1 < L2 < .. < EXIT`.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("invalid variable name {0:?} (expected y, x<n> or z<n> with n >= 1)")]
    InvalidVariable(String),
    #[error("invalid label {0:?} (expected L<n> with n >= 1, or EXIT)")]
    InvalidLabel(String),
}

fn parse_suffix(digits: &str) -> Option<NonZeroU32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().and_then(NonZeroU32::new)
}

// ── Variables ────────────────────────────────────────────────

/// A machine variable.
///
/// `Y` is the single output variable, `X(n)` are inputs and `Z(n)` are work
/// variables. Declaration order of the variants gives the required ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Variable {
    Y,
    X(NonZeroU32),
    Z(NonZeroU32),
}

impl Variable {
    /// Input variable `x<n>`. Returns `None` for `n == 0`.
    #[must_use]
    pub fn x(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Variable::X)
    }

    /// Work variable `z<n>`. Returns `None` for `n == 0`.
    #[must_use]
    pub fn z(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Variable::Z)
    }

    /// Numeric suffix, `None` for `y`.
    #[must_use]
    pub const fn suffix(self) -> Option<u32> {
        match self {
            Variable::Y => None,
            Variable::X(n) | Variable::Z(n) => Some(n.get()),
        }
    }

    #[must_use]
    pub const fn is_input(self) -> bool {
        matches!(self, Variable::X(_))
    }

    #[must_use]
    pub const fn is_work(self) -> bool {
        matches!(self, Variable::Z(_))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Y => f.write_str("y"),
            Variable::X(n) => write!(f, "x{n}"),
            Variable::Z(n) => write!(f, "z{n}"),
        }
    }
}

impl FromStr for Variable {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || NameError::InvalidVariable(s.to_string());
        if trimmed.eq_ignore_ascii_case("y") {
            return Ok(Variable::Y);
        }
        let mut chars = trimmed.chars();
        let kind = chars.next().ok_or_else(invalid)?;
        let suffix = parse_suffix(chars.as_str()).ok_or_else(invalid)?;
        match kind.to_ascii_lowercase() {
            'x' => Ok(Variable::X(suffix)),
            'z' => Ok(Variable::Z(suffix)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Variable {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for Variable {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Variable> for String {
    fn from(value: Variable) -> Self {
        value.to_string()
    }
}

// ── Labels ───────────────────────────────────────────────────

/// A jump target.
///
/// `Exit` is the reserved halt sentinel and never resolves to an instruction
/// index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Label {
    Numbered(NonZeroU32),
    Exit,
}

impl Label {
    pub const EXIT_TEXT: &'static str = "EXIT";

    /// Numbered label `L<n>`. Returns `None` for `n == 0`.
    #[must_use]
    pub fn numbered(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Label::Numbered)
    }

    #[must_use]
    pub const fn is_exit(self) -> bool {
        matches!(self, Label::Exit)
    }

    #[must_use]
    pub const fn number(self) -> Option<u32> {
        match self {
            Label::Numbered(n) => Some(n.get()),
            Label::Exit => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Numbered(n) => write!(f, "L{n}"),
            Label::Exit => f.write_str(Self::EXIT_TEXT),
        }
    }
}

impl FromStr for Label {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(Self::EXIT_TEXT) {
            return Ok(Label::Exit);
        }
        trimmed
            .strip_prefix(['L', 'l'])
            .and_then(parse_suffix)
            .map(Label::Numbered)
            .ok_or_else(|| NameError::InvalidLabel(s.to_string()))
    }
}

impl TryFrom<String> for Label {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for Label {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Label> for String {
    fn from(value: Label) -> Self {
        value.to_string()
    }
}
