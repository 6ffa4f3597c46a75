//! A small formula language for simulation parameters.
//!
//! Text such as `"2x + sqrt(y)"` is split into tokens, assembled into a tree
//! of [`AstNode`]s with names bound to positions of a value array, optionally
//! constant folded, and evaluated as often as needed:
//!
//! ```
//! use simformula::{FormulaParser, EvalError};
//! let parser = FormulaParser::with_variables(["x"]);
//! let f = parser.parse("3pi + 1/x").unwrap();
//! assert!((f.eval(&[2.0]).unwrap() - (3.0 * std::f64::consts::PI + 0.5)).abs() < 1e-12);
//! assert!(matches!(f.eval(&[0.0]), Err(EvalError::DivisionByZero { .. })));
//! ```
mod ast;
mod collect;
mod engine;
mod error;
mod eval;
mod functions;
mod implicit;
mod lexer;
mod number;
mod optimizer;
mod parser;
mod resolver;

pub use ast::{AstNode, BinOp, Postfix, E_INDEX, PI_INDEX, TAU_INDEX};
pub use engine::{calc_simple, Formula, FormulaParser};
pub use error::{BuildError, EvalError, ParseError, TokenizeError};
pub use eval::evaluate;
pub use functions::{Aggregate, Function};
pub use implicit::insert_implicit_multiplication;
pub use lexer::{tokenize, Lexer, Token, DEFAULT_MAX_DEPTH};
pub use number::{factorial, gamma, parse_plain_number, zeta, NumberParser};
pub use optimizer::simplify;
pub use parser::{build, TreeBuilder};
pub use resolver::{NoVariables, VarResolver, VariableNames};
