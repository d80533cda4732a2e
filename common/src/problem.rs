use std::{fmt, ops::RangeInclusive};

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Op {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
}

impl Op {
    pub const ALL: [Op; 3] = [Op::Add, Op::Sub, Op::Mul];

    pub fn apply(self, left: i32, right: i32) -> i32 {
        match self {
            Op::Add => left + right,
            Op::Sub => left - right,
            Op::Mul => left * right,
        }
    }
}

/// One arithmetic question with its answer precomputed at generation
/// time. The answer never leaves the server; clients only see the
/// rendered text.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Problem {
    pub left: i32,
    pub right: i32,
    pub op: Op,
    pub answer: i32,
}

impl Problem {
    /// Draws both operands uniformly from `operands` and an operator
    /// uniformly from [`Op::ALL`]. The random source is passed in so
    /// tests can use a seeded generator.
    pub fn generate(rng: &mut dyn RngCore, operands: RangeInclusive<i32>) -> Self {
        let left = rng.random_range(operands.clone());
        let right = rng.random_range(operands);
        let op = Op::ALL[rng.random_range(0..Op::ALL.len())];

        Self {
            left,
            right,
            op,
            answer: op.apply(left, right),
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}
