use std::fmt;

use crate::functions::{Aggregate, Function};

/// Variable index of the constant π.
pub const PI_INDEX: isize = -2;
/// Variable index of Euler's number e.
pub const E_INDEX: isize = -3;
/// Variable index of the constant τ = 2π.
pub const TAU_INDEX: isize = -4;

/// Value of a built-in constant index, `None` for caller variable slots.
pub(crate) fn constant_value(index: isize) -> Option<f64> {
    match index {
        PI_INDEX => Some(std::f64::consts::PI),
        E_INDEX => Some(std::f64::consts::E),
        TAU_INDEX => Some(std::f64::consts::TAU),
        _ => None,
    }
}

/// Binary operators in the order their passes run (tightest first).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    /// `^`
    Pow,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `:`, a synonym of `/` kept apart so the tree prints as typed.
    Colon,
    /// `-`
    Sub,
    /// `+`
    Add,
}

impl BinOp {
    pub(crate) fn from_symbol(c: char) -> Option<BinOp> {
        match c {
            '^' => Some(BinOp::Pow),
            '*' => Some(BinOp::Mul),
            '/' => Some(BinOp::Div),
            ':' => Some(BinOp::Colon),
            '-' => Some(BinOp::Sub),
            '+' => Some(BinOp::Add),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            BinOp::Pow => '^',
            BinOp::Mul => '*',
            BinOp::Div => '/',
            BinOp::Colon => ':',
            BinOp::Sub => '-',
            BinOp::Add => '+',
        }
    }
}

/// Operators written after their single operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Postfix {
    /// `%`: operand × 0.01
    Percent,
    /// `²`
    Square,
    /// `³`
    Cube,
    /// `!`: sign-preserving factorial
    Factorial,
    /// `°`: degrees to radians
    Degrees,
}

impl Postfix {
    pub(crate) fn from_symbol(c: char) -> Option<Postfix> {
        match c {
            '%' => Some(Postfix::Percent),
            '²' => Some(Postfix::Square),
            '³' => Some(Postfix::Cube),
            '!' => Some(Postfix::Factorial),
            '°' => Some(Postfix::Degrees),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Postfix::Percent => '%',
            Postfix::Square => '²',
            Postfix::Cube => '³',
            Postfix::Factorial => '!',
            Postfix::Degrees => '°',
        }
    }
}

/// A node of a built formula tree.
///
/// Trees are immutable once built; evaluating never changes them, so one tree
/// can serve many threads with different value arrays.
#[derive(Clone, Debug, PartialEq)]
pub enum AstNode {
    /// Number literal, or the result of constant folding.
    Number(f64),
    /// `index >= 0` is a slot of the caller's value array. Negative indices
    /// name built-in constants ([`PI_INDEX`], [`E_INDEX`], [`TAU_INDEX`]).
    Variable(isize),
    UnaryOp(Postfix, Box<AstNode>),
    BinaryOp(BinOp, Box<AstNode>, Box<AstNode>),
    Call(Function, Box<AstNode>),
    /// Function over a `;`-separated argument list; never empty when built
    /// from text.
    Aggregate(Aggregate, Vec<AstNode>),
}

impl AstNode {
    pub fn is_number(&self) -> bool {
        matches!(self, AstNode::Number(_))
    }

    /// The literal value if this node is a [`AstNode::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AstNode::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::Number(v) => write!(f, "{}", v),
            AstNode::Variable(PI_INDEX) => f.write_str("pi"),
            AstNode::Variable(E_INDEX) => f.write_str("e"),
            AstNode::Variable(TAU_INDEX) => f.write_str("tau"),
            AstNode::Variable(i) => write!(f, "${}", i),
            AstNode::UnaryOp(op, x) => write!(f, "({}){}", x, op.symbol()),
            AstNode::BinaryOp(op, a, b) => write!(f, "({}{}{})", a, op.symbol(), b),
            AstNode::Call(func, x) if matches!(**x, AstNode::BinaryOp(..)) => {
                write!(f, "{}{}", func.name(), x)
            }
            AstNode::Call(func, x) => write!(f, "{}({})", func.name(), x),
            AstNode::Aggregate(a, args) => {
                write!(f, "{}(", a.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(";")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}
