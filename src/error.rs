use thiserror::Error;

use crate::ast::AstNode;

/// Failure while splitting formula text into tokens.
///
/// Positions are 0-based character offsets into the original text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("malformed number at position {position}")]
    MalformedNumber { position: usize },
    #[error("bracket opened at position {position} is never closed")]
    UnclosedBracket { position: usize },
    #[error("closing bracket at position {position} has no matching opening bracket")]
    UnmatchedBracket { position: usize },
    #[error("brackets nested deeper than {limit} levels at position {position}")]
    TooDeep { position: usize, limit: usize },
}

/// Failure while turning a token stream into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("empty expression")]
    Empty,
    #[error("unknown identifier: {0}")]
    UnknownIdentifier(String),
    #[error("'{0}' is missing an operand")]
    MissingOperand(String),
    #[error("';' outside of a function argument list")]
    MisplacedSeparator,
    #[error("{0} takes a single argument")]
    TooManyArguments(String),
    #[error("expression does not reduce to a single value ({0} parts remain)")]
    NotCollapsed(usize),
    #[error("expression nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// Failure while evaluating a built tree.
///
/// The tree stays usable; another call with different values may succeed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("division by zero in {node}")]
    DivisionByZero { node: AstNode },
    #[error("negative exponent in {node}")]
    InvalidExponent { node: AstNode },
    #[error("{function}: argument out of domain in {node}")]
    DomainError {
        function: &'static str,
        node: AstNode,
    },
    #[error("variable index {index} out of range: {len} values supplied")]
    IndexError { index: isize, len: usize },
}

/// Any failure of the text-to-tree pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("tokenize error: {0}")]
    Tokenize(#[from] TokenizeError),
    #[error("build error: {0}")]
    Build(#[from] BuildError),
}
