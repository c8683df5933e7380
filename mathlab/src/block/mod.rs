pub mod kind;

use std::fmt;

use crate::constants::{self, ArityError};

pub use kind::BlockKind;

/// Largest arity of any built-in kind.
pub const MAX_ARITY: usize = 2;

/// A single arithmetic transform over one number.
///
/// Only the first `kind.arity()` slots of `constants` are meaningful; the
/// constructors guarantee they are all set, so a block with a partial
/// constant list cannot exist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    kind: BlockKind,
    constants: [f64; MAX_ARITY],
}

impl Block {
    /// Build a block from a slice that must hold exactly `kind.arity()` values.
    pub fn new(kind: BlockKind, values: &[f64]) -> Result<Block, ArityError> {
        if values.len() != kind.arity() {
            return Err(ArityError::Missing {
                expected: kind.arity(),
                found: values.len(),
            });
        }
        let mut constants = [0.0; MAX_ARITY];
        constants[..values.len()].copy_from_slice(values);
        Ok(Block { kind, constants })
    }

    /// Build a block from whitespace-split tokens.
    /// The first `kind.arity()` tokens must parse as numbers; the rest are ignored.
    pub fn from_tokens(kind: BlockKind, tokens: &[&str]) -> Result<Block, ArityError> {
        let mut constants = [0.0; MAX_ARITY];
        constants::parse_constants(tokens, &mut constants[..kind.arity()])?;
        Ok(Block { kind, constants })
    }

    pub fn identity() -> Block {
        Block::fixed(BlockKind::Identity, [0.0; MAX_ARITY])
    }

    pub fn addition(constant: f64) -> Block {
        Block::fixed(BlockKind::Addition, [constant, 0.0])
    }

    pub fn multiplication(constant: f64) -> Block {
        Block::fixed(BlockKind::Multiplication, [constant, 0.0])
    }

    pub fn power(exponent: f64) -> Block {
        Block::fixed(BlockKind::Power, [exponent, 0.0])
    }

    pub fn condition(threshold: f64) -> Block {
        Block::fixed(BlockKind::Condition, [threshold, 0.0])
    }

    /// Bounds are not checked; see `eval` for what inverted bounds produce.
    pub fn limit(lower: f64, upper: f64) -> Block {
        Block::fixed(BlockKind::Limit, [lower, upper])
    }

    fn fixed(kind: BlockKind, constants: [f64; MAX_ARITY]) -> Block {
        Block { kind, constants }
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn constants(&self) -> &[f64] {
        &self.constants[..self.kind.arity()]
    }

    pub fn eval(&self, input: f64) -> f64 {
        let c = &self.constants;
        match self.kind {
            BlockKind::Identity => input,
            BlockKind::Addition => input + c[0],
            BlockKind::Multiplication => input * c[0],
            BlockKind::Power => input.powf(c[0]),
            BlockKind::Condition => {
                if input < c[0] {
                    -1.0
                } else if input == c[0] {
                    0.0
                } else {
                    1.0
                }
            }
            // Not f64::clamp: that panics when lower > upper.
            BlockKind::Limit => {
                if input < c[0] {
                    c[0]
                } else if input > c[1] {
                    c[1]
                } else {
                    input
                }
            }
        }
    }

    /// Write the constants, each followed by one space. The type name is
    /// written by the sequence, not here.
    pub fn dump(&self, to: &mut impl fmt::Write) -> fmt::Result {
        constants::write_constants(to, self.constants())
    }
}
