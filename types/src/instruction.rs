//! The instruction set.
//!
//! A closed enum of eleven operations. Four are basic and run directly on the
//! machine; the other seven are synthetic and are defined by their rewrite into
//! other instructions (see `expansion.rs`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::names::{Label, Variable};

/// Operation and operands of one instruction slot.
///
/// Serialized internally tagged under `"op"`, which is the shape the program
/// loader consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum InstructionKind {
    Increase {
        variable: Variable,
    },
    Decrease {
        variable: Variable,
    },
    Neutral {
        variable: Variable,
    },
    JumpNotZero {
        variable: Variable,
        target: Label,
    },
    ZeroVariable {
        variable: Variable,
    },
    GotoLabel {
        target: Label,
    },
    Assignment {
        destination: Variable,
        source: Variable,
    },
    ConstantAssignment {
        variable: Variable,
        constant: u64,
    },
    JumpZero {
        variable: Variable,
        target: Label,
    },
    JumpEqualConstant {
        variable: Variable,
        constant: u64,
        target: Label,
    },
    JumpEqualVariable {
        variable: Variable,
        other: Variable,
        target: Label,
    },
}

impl InstructionKind {
    /// Upper-case mnemonic, as used in program listings and logs.
    #[must_use]
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            InstructionKind::Increase { .. } => "INCREASE",
            InstructionKind::Decrease { .. } => "DECREASE",
            InstructionKind::Neutral { .. } => "NEUTRAL",
            InstructionKind::JumpNotZero { .. } => "JUMP_NOT_ZERO",
            InstructionKind::ZeroVariable { .. } => "ZERO_VARIABLE",
            InstructionKind::GotoLabel { .. } => "GOTO_LABEL",
            InstructionKind::Assignment { .. } => "ASSIGNMENT",
            InstructionKind::ConstantAssignment { .. } => "CONSTANT_ASSIGNMENT",
            InstructionKind::JumpZero { .. } => "JUMP_ZERO",
            InstructionKind::JumpEqualConstant { .. } => "JUMP_EQUAL_CONSTANT",
            InstructionKind::JumpEqualVariable { .. } => "JUMP_EQUAL_VARIABLE",
        }
    }

    #[must_use]
    pub const fn is_basic(&self) -> bool {
        matches!(
            self,
            InstructionKind::Increase { .. }
                | InstructionKind::Decrease { .. }
                | InstructionKind::Neutral { .. }
                | InstructionKind::JumpNotZero { .. }
        )
    }

    /// Fixed cycle cost of one execution.
    #[must_use]
    pub const fn cost(&self) -> u64 {
        match self {
            InstructionKind::Increase { .. }
            | InstructionKind::Decrease { .. }
            | InstructionKind::Neutral { .. }
            | InstructionKind::ZeroVariable { .. }
            | InstructionKind::GotoLabel { .. } => 1,
            InstructionKind::JumpNotZero { .. }
            | InstructionKind::ConstantAssignment { .. }
            | InstructionKind::JumpZero { .. }
            | InstructionKind::JumpEqualConstant { .. }
            | InstructionKind::JumpEqualVariable { .. } => 2,
            InstructionKind::Assignment { .. } => 4,
        }
    }

    /// Every variable the operation reads or writes, in operand order.
    #[must_use]
    pub fn variables(&self) -> Vec<Variable> {
        match *self {
            InstructionKind::Increase { variable }
            | InstructionKind::Decrease { variable }
            | InstructionKind::Neutral { variable }
            | InstructionKind::JumpNotZero { variable, .. }
            | InstructionKind::ZeroVariable { variable }
            | InstructionKind::ConstantAssignment { variable, .. }
            | InstructionKind::JumpZero { variable, .. }
            | InstructionKind::JumpEqualConstant { variable, .. } => vec![variable],
            InstructionKind::GotoLabel { .. } => Vec::new(),
            InstructionKind::Assignment {
                destination,
                source,
            } => vec![destination, source],
            InstructionKind::JumpEqualVariable {
                variable, other, ..
            } => vec![variable, other],
        }
    }

    /// The label this operation may transfer control to.
    #[must_use]
    pub const fn jump_target(&self) -> Option<Label> {
        match *self {
            InstructionKind::JumpNotZero { target, .. }
            | InstructionKind::GotoLabel { target }
            | InstructionKind::JumpZero { target, .. }
            | InstructionKind::JumpEqualConstant { target, .. }
            | InstructionKind::JumpEqualVariable { target, .. } => Some(target),
            InstructionKind::Increase { .. }
            | InstructionKind::Decrease { .. }
            | InstructionKind::Neutral { .. }
            | InstructionKind::ZeroVariable { .. }
            | InstructionKind::Assignment { .. }
            | InstructionKind::ConstantAssignment { .. } => None,
        }
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstructionKind::Increase { variable } => write!(f, "{variable} <- {variable} + 1"),
            InstructionKind::Decrease { variable } => write!(f, "{variable} <- {variable} - 1"),
            InstructionKind::Neutral { variable } => write!(f, "{variable} <- {variable}"),
            InstructionKind::JumpNotZero { variable, target } => {
                write!(f, "IF {variable} != 0 GOTO {target}")
            }
            InstructionKind::ZeroVariable { variable } => write!(f, "{variable} <- 0"),
            InstructionKind::GotoLabel { target } => write!(f, "GOTO {target}"),
            InstructionKind::Assignment {
                destination,
                source,
            } => write!(f, "{destination} <- {source}"),
            InstructionKind::ConstantAssignment { variable, constant } => {
                write!(f, "{variable} <- {constant}")
            }
            InstructionKind::JumpZero { variable, target } => {
                write!(f, "IF {variable} = 0 GOTO {target}")
            }
            InstructionKind::JumpEqualConstant {
                variable,
                constant,
                target,
            } => write!(f, "IF {variable} = {constant} GOTO {target}"),
            InstructionKind::JumpEqualVariable {
                variable,
                other,
                target,
            } => write!(f, "IF {variable} = {other} GOTO {target}"),
        }
    }
}

/// One program slot: an operation plus the label attached to the slot itself.
///
/// The attached label is the address other instructions jump to. It is
/// independent of any label the operation references as a jump target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<Label>,
    #[serde(flatten)]
    kind: InstructionKind,
}

impl Instruction {
    #[must_use]
    pub const fn new(kind: InstructionKind) -> Self {
        Self { label: None, kind }
    }

    #[must_use]
    pub const fn labeled(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    #[must_use]
    pub const fn with_label(mut self, label: Option<Label>) -> Self {
        self.label = label;
        self
    }

    #[must_use]
    pub const fn increase(variable: Variable) -> Self {
        Self::new(InstructionKind::Increase { variable })
    }

    #[must_use]
    pub const fn decrease(variable: Variable) -> Self {
        Self::new(InstructionKind::Decrease { variable })
    }

    #[must_use]
    pub const fn neutral(variable: Variable) -> Self {
        Self::new(InstructionKind::Neutral { variable })
    }

    #[must_use]
    pub const fn jump_not_zero(variable: Variable, target: Label) -> Self {
        Self::new(InstructionKind::JumpNotZero { variable, target })
    }

    #[must_use]
    pub const fn zero_variable(variable: Variable) -> Self {
        Self::new(InstructionKind::ZeroVariable { variable })
    }

    #[must_use]
    pub const fn goto_label(target: Label) -> Self {
        Self::new(InstructionKind::GotoLabel { target })
    }

    #[must_use]
    pub const fn assignment(destination: Variable, source: Variable) -> Self {
        Self::new(InstructionKind::Assignment {
            destination,
            source,
        })
    }

    #[must_use]
    pub const fn constant_assignment(variable: Variable, constant: u64) -> Self {
        Self::new(InstructionKind::ConstantAssignment { variable, constant })
    }

    #[must_use]
    pub const fn jump_zero(variable: Variable, target: Label) -> Self {
        Self::new(InstructionKind::JumpZero { variable, target })
    }

    #[must_use]
    pub const fn jump_equal_constant(variable: Variable, constant: u64, target: Label) -> Self {
        Self::new(InstructionKind::JumpEqualConstant {
            variable,
            constant,
            target,
        })
    }

    #[must_use]
    pub const fn jump_equal_variable(variable: Variable, other: Variable, target: Label) -> Self {
        Self::new(InstructionKind::JumpEqualVariable {
            variable,
            other,
            target,
        })
    }

    #[must_use]
    pub const fn label(&self) -> Option<Label> {
        self.label
    }

    #[must_use]
    pub const fn kind(&self) -> &InstructionKind {
        &self.kind
    }

    #[must_use]
    pub const fn cost(&self) -> u64 {
        self.kind.cost()
    }

    #[must_use]
    pub const fn is_basic(&self) -> bool {
        self.kind.is_basic()
    }

    #[must_use]
    pub fn variables(&self) -> Vec<Variable> {
        self.kind.variables()
    }

    #[must_use]
    pub const fn jump_target(&self) -> Option<Label> {
        self.kind.jump_target()
    }
}

impl From<InstructionKind> for Instruction {
    fn from(kind: InstructionKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}
