//! Arithmetic problem generation
//!
//! Operands are small (1..=12) so every problem can be solved mentally.
//! Division problems are built backwards from the quotient so they always
//! divide evenly.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Operand range for +, -, × and the divisor of ÷
pub const OPERAND_MIN: i32 = 1;
pub const OPERAND_MAX: i32 = 12;
/// Quotient range for ÷
pub const QUOTIENT_MAX: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '×',
            Operator::Div => '÷',
        }
    }
}

/// A single arithmetic problem with its exact integer answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub lhs: i32,
    pub op: Operator,
    pub rhs: i32,
    pub answer: i32,
}

impl Problem {
    /// Build a problem, computing its answer. Division must be exact.
    pub fn new(lhs: i32, op: Operator, rhs: i32) -> Self {
        let answer = match op {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
            Operator::Div => {
                debug_assert!(rhs != 0 && lhs % rhs == 0, "inexact division {lhs} / {rhs}");
                lhs / rhs
            }
        };
        Self {
            lhs,
            op,
            rhs,
            answer,
        }
    }

    /// Text shown on the tile, e.g. `"12 ÷ 4"`
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op.symbol(), self.rhs)
    }
}

/// Generate a random problem with a uniformly chosen operator
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Problem {
    let op = Operator::ALL[rng.random_range(0..Operator::ALL.len())];
    match op {
        Operator::Div => {
            let divisor = rng.random_range(OPERAND_MIN..=OPERAND_MAX);
            let quotient = rng.random_range(1..=QUOTIENT_MAX);
            Problem::new(divisor * quotient, op, divisor)
        }
        _ => {
            let lhs = rng.random_range(OPERAND_MIN..=OPERAND_MAX);
            let rhs = rng.random_range(OPERAND_MIN..=OPERAND_MAX);
            Problem::new(lhs, op, rhs)
        }
    }
}
