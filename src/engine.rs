use std::fmt;

use log::debug;

use crate::ast::AstNode;
use crate::collect::collect_vars;
use crate::error::{EvalError, ParseError};
use crate::eval::evaluate;
use crate::lexer::{Lexer, DEFAULT_MAX_DEPTH};
use crate::number::{parse_plain_number, NumberParser};
use crate::optimizer::simplify;
use crate::parser::TreeBuilder;
use crate::resolver::VariableNames;

/// Turns formula text into [`Formula`]s for a fixed list of variable names.
///
/// ```
/// use simformula::FormulaParser;
/// let parser = FormulaParser::with_variables(["x", "y"]);
/// let f = parser.parse("x+y").unwrap();
/// assert_eq!(f.eval(&[2.0, 3.0]).unwrap(), 5.0);
/// assert_eq!(f.eval(&[10.0, -1.0]).unwrap(), 9.0);
/// ```
#[derive(Clone)]
pub struct FormulaParser {
    variables: VariableNames,
    simplify: bool,
    number_parser: NumberParser,
    max_depth: usize,
}

impl fmt::Debug for FormulaParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormulaParser")
            .field("variables", &self.variables.names())
            .field("simplify", &self.simplify)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

impl Default for FormulaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FormulaParser {
    /// A parser without variables; only constants and functions are known.
    pub fn new() -> Self {
        Self::with_variables(std::iter::empty::<String>())
    }

    /// A parser resolving the given names, case-insensitively, to value slots
    /// `0..names.len()`.
    pub fn with_variables<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variables: VariableNames::new(names),
            simplify: cfg!(feature = "simplify"),
            number_parser: parse_plain_number,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Whether parsed trees are constant folded.
    pub fn simplify(mut self, simplify: bool) -> Self {
        self.simplify = simplify;
        self
    }

    pub fn number_parser(mut self, number_parser: NumberParser) -> Self {
        self.number_parser = number_parser;
        self
    }

    /// Limits bracket nesting and the height of built trees, protecting the
    /// recursive tokenizer, builder, folder and evaluator.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn variables(&self) -> &[String] {
        self.variables.names()
    }

    pub fn parse(&self, text: &str) -> Result<Formula, ParseError> {
        let tokens = Lexer::new(text)
            .with_variables(self.variables.names())
            .with_number_parser(self.number_parser)
            .with_max_depth(self.max_depth)
            .tokenize()?;
        debug!("tokenized {:?} into {} tokens", text, tokens.len());

        let root = TreeBuilder::new(&self.variables)
            .with_max_depth(self.max_depth)
            .build(&tokens)?;
        debug!("built tree {}", root);

        let root = if self.simplify {
            let root = simplify(root);
            if let Some(v) = root.as_number() {
                debug!("{:?} is constant: {}", text, v);
            }
            root
        } else {
            root
        };
        Ok(Formula { root })
    }
}

/// A built formula, ready to be evaluated any number of times.
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    root: AstNode,
}

impl Formula {
    pub fn ast(&self) -> &AstNode {
        &self.root
    }

    pub fn into_ast(self) -> AstNode {
        self.root
    }

    /// The value if the whole formula reduced to a single number.
    pub fn const_value(&self) -> Option<f64> {
        self.root.as_number()
    }

    pub fn is_const(&self) -> bool {
        self.root.is_number()
    }

    /// Value slots the formula reads, in order of first use.
    pub fn referenced_vars(&self) -> Vec<usize> {
        collect_vars(&self.root)
    }

    pub fn eval(&self, values: &[f64]) -> Result<f64, EvalError> {
        evaluate(&self.root, values)
    }

    /// Evaluates, falling back to `default` on any evaluation error.
    pub fn eval_or(&self, values: &[f64], default: f64) -> f64 {
        self.eval(values).unwrap_or(default)
    }
}

impl From<AstNode> for Formula {
    fn from(root: AstNode) -> Self {
        Self { root }
    }
}

/// Parses `text` without variables and evaluates it; `None` on any failure.
pub fn calc_simple(text: &str) -> Option<f64> {
    if text.trim().is_empty() {
        return None;
    }
    FormulaParser::new().parse(text).ok()?.eval(&[]).ok()
}
