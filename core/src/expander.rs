//! Degree-bounded expansion of whole programs.
//!
//! One round rewrites every synthetic instruction one level and passes basic
//! instructions through. A single [`ExpansionContext`] seeded from the original
//! program is threaded through all rounds, so temporaries stay unique across
//! the whole multi-round expansion and not just within one round.

use semu_types::{ExpansionContext, Instruction, Program};

use crate::error::ExpansionError;

/// Default safety ceiling for [`Expander::max_expansion_degree`].
pub const DEFAULT_MAX_ROUNDS: u32 = 64;

/// An instruction in an expanded listing, tagged with the index of the
/// degree-0 instruction it descends from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracedInstruction {
    pub origin: usize,
    pub instruction: Instruction,
    /// `false` while this is still the untouched original instruction.
    pub rewritten: bool,
}

/// One original instruction and what it expanded into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionRow {
    pub origin: usize,
    pub instruction: Instruction,
    /// `(position in the flat listing, instruction)`. Empty when the origin
    /// passed through unchanged.
    pub tail: Vec<(usize, Instruction)>,
}

/// Flat expanded listing with origin bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionTrace {
    original: Program,
    rounds: u32,
    nodes: Vec<TracedInstruction>,
}

impl ExpansionTrace {
    /// Rounds that actually changed something (at most the requested degree).
    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    #[must_use]
    pub fn nodes(&self) -> &[TracedInstruction] {
        &self.nodes
    }

    #[must_use]
    pub fn original(&self) -> &Program {
        &self.original
    }

    /// Group the flat listing back by original instruction.
    ///
    /// An origin's tail is shown only if it produced more than one
    /// instruction, or exactly one that is not the original passed through.
    #[must_use]
    pub fn rows(&self) -> Vec<ExpansionRow> {
        let mut tails: Vec<Vec<(usize, TracedInstruction)>> = vec![Vec::new(); self.original.len()];
        for (position, node) in self.nodes.iter().enumerate() {
            tails[node.origin].push((position, *node));
        }
        self.original
            .instructions()
            .iter()
            .zip(tails)
            .enumerate()
            .map(|(origin, (&instruction, children))| {
                let shown = match children.as_slice() {
                    [] => false,
                    [(_, only)] => only.rewritten,
                    _ => true,
                };
                let tail = if shown {
                    children
                        .into_iter()
                        .map(|(position, node)| (position, node.instruction))
                        .collect()
                } else {
                    Vec::new()
                };
                ExpansionRow {
                    origin,
                    instruction,
                    tail,
                }
            })
            .collect()
    }

    /// The flat expanded program (same name as the original).
    #[must_use]
    pub fn into_program(self) -> Program {
        let instructions = self.nodes.iter().map(|node| node.instruction).collect();
        self.original.with_instructions(instructions)
    }
}

/// Expansion driver carrying the iteration ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expander {
    max_rounds: u32,
}

impl Default for Expander {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROUNDS)
    }
}

impl Expander {
    /// `max_rounds` is clamped to at least 1.
    #[must_use]
    pub fn new(max_rounds: u32) -> Self {
        Self {
            max_rounds: max_rounds.max(1),
        }
    }

    #[must_use]
    pub const fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Expand up to `degree` rounds, stopping early once nothing changes.
    /// `degree == 0` returns the program unchanged.
    #[must_use]
    pub fn expand_to_degree(&self, program: &Program, degree: u32) -> Program {
        if degree == 0 {
            return program.clone();
        }
        self.trace(program, degree).into_program()
    }

    /// Like [`Self::expand_to_degree`], keeping origin indices for previews.
    #[must_use]
    pub fn trace(&self, program: &Program, degree: u32) -> ExpansionTrace {
        let mut nodes: Vec<TracedInstruction> = program
            .instructions()
            .iter()
            .enumerate()
            .map(|(origin, &instruction)| TracedInstruction {
                origin,
                instruction,
                rewritten: false,
            })
            .collect();
        let mut ctx = ExpansionContext::from_program(program);
        let mut rounds = 0;
        while rounds < degree {
            let Some(next) = expand_round(&nodes, &mut ctx) else {
                break;
            };
            nodes = next;
            rounds += 1;
            tracing::debug!(
                program = program.name(),
                round = rounds,
                len = nodes.len(),
                "expansion round"
            );
        }
        ExpansionTrace {
            original: program.clone(),
            rounds,
            nodes,
        }
    }

    /// Number of rounds needed to reach an all-basic program.
    pub fn max_expansion_degree(&self, program: &Program) -> Result<u32, ExpansionError> {
        let mut instructions = program.instructions().to_vec();
        let mut ctx = ExpansionContext::from_program(program);
        let mut rounds = 0;
        while !instructions.iter().all(Instruction::is_basic) {
            if rounds >= self.max_rounds {
                tracing::error!(
                    program = program.name(),
                    ceiling = self.max_rounds,
                    "expansion exceeded iteration ceiling"
                );
                return Err(ExpansionError::IterationCeilingExceeded {
                    ceiling: self.max_rounds,
                });
            }
            instructions = instructions
                .iter()
                .flat_map(|instruction| instruction.expand(&mut ctx))
                .collect();
            rounds += 1;
        }
        Ok(rounds)
    }
}

/// One rewrite round, or `None` when every instruction is already basic.
fn expand_round(
    nodes: &[TracedInstruction],
    ctx: &mut ExpansionContext,
) -> Option<Vec<TracedInstruction>> {
    if nodes.iter().all(|node| node.instruction.is_basic()) {
        return None;
    }
    let mut next = Vec::with_capacity(nodes.len());
    for node in nodes {
        if node.instruction.is_basic() {
            next.push(*node);
            continue;
        }
        next.extend(
            node.instruction
                .expand(ctx)
                .into_iter()
                .map(|instruction| TracedInstruction {
                    origin: node.origin,
                    instruction,
                    rewritten: true,
                }),
        );
    }
    Some(next)
}

/// [`Expander::expand_to_degree`] with the default ceiling.
#[must_use]
pub fn expand_to_degree(program: &Program, degree: u32) -> Program {
    Expander::default().expand_to_degree(program, degree)
}

/// [`Expander::max_expansion_degree`] with the default ceiling.
pub fn max_expansion_degree(program: &Program) -> Result<u32, ExpansionError> {
    Expander::default().max_expansion_degree(program)
}
