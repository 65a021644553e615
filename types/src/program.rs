//! Immutable programs with first-definition-wins label resolution.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::instruction::Instruction;
use crate::names::{Label, Variable};

/// An ordered, immutable instruction sequence.
///
/// The label table is derived once at construction: each attached label maps
/// to the index of the *first* instruction carrying it. Later instructions may
/// reuse the same label text, but jumps never resolve to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    name: String,
    instructions: Vec<Instruction>,
    #[serde(skip)]
    labels: HashMap<Label, usize>,
}

impl Program {
    #[must_use]
    pub fn new(name: impl Into<String>, instructions: Vec<Instruction>) -> Self {
        let labels = first_label_index(&instructions);
        Self {
            name: name.into(),
            instructions,
            labels,
        }
    }

    /// A program with the same name and a new instruction sequence.
    #[must_use]
    pub fn with_instructions(&self, instructions: Vec<Instruction>) -> Self {
        Self::new(self.name.clone(), instructions)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Index of the first instruction carrying `label`.
    ///
    /// `EXIT` is never attached to an instruction address and always resolves
    /// to `None`; callers treat it as a halt before looking it up.
    #[must_use]
    pub fn lookup_label(&self, label: Label) -> Option<usize> {
        self.labels.get(&label).copied()
    }

    #[must_use]
    pub fn is_fully_basic(&self) -> bool {
        self.instructions.iter().all(Instruction::is_basic)
    }

    /// Input variables referenced anywhere, ascending by suffix.
    #[must_use]
    pub fn inputs_used(&self) -> Vec<Variable> {
        self.instructions
            .iter()
            .flat_map(Instruction::variables)
            .filter(|variable| variable.is_input())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Attached labels ascending, with `EXIT` appended when some instruction
    /// jumps to it.
    #[must_use]
    pub fn labels_used(&self) -> Vec<Label> {
        let mut labels: BTreeSet<Label> = self
            .instructions
            .iter()
            .filter_map(Instruction::label)
            .filter(|label| !label.is_exit())
            .collect();
        if self
            .instructions
            .iter()
            .any(|instruction| instruction.jump_target() == Some(Label::Exit))
        {
            labels.insert(Label::Exit);
        }
        labels.into_iter().collect()
    }

    /// Highest instruction degree, computed per instruction.
    #[must_use]
    pub fn degree(&self) -> u32 {
        self.instructions
            .iter()
            .map(Instruction::degree)
            .max()
            .unwrap_or(0)
    }
}

fn first_label_index(instructions: &[Instruction]) -> HashMap<Label, usize> {
    let mut labels = HashMap::new();
    for (index, instruction) in instructions.iter().enumerate() {
        if let Some(label) = instruction.label()
            && !label.is_exit()
        {
            labels.entry(label).or_insert(index);
        }
    }
    labels
}
