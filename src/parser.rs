use crate::ast::{AstNode, BinOp, Postfix, E_INDEX, PI_INDEX, TAU_INDEX};
use crate::error::BuildError;
use crate::functions::{Aggregate, Function};
use crate::implicit::insert_implicit_multiplication;
use crate::lexer::{Token, DEFAULT_MAX_DEPTH};
use crate::resolver::{VarResolver, VariableNames};

/// One pass per operator symbol, tightest first. Each pass collapses right to left.
const BINARY_PASSES: [BinOp; 6] = [
    BinOp::Pow,
    BinOp::Colon,
    BinOp::Div,
    BinOp::Mul,
    BinOp::Sub,
    BinOp::Add,
];

/// What an identifier token stands for.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Symbol {
    /// Variable slot or built-in constant.
    Operand(AstNode),
    Function(Function),
    Aggregate(Aggregate),
    Binary(BinOp),
    Postfix(Postfix),
}

pub(crate) fn classify(ident: &str, resolver: &dyn VarResolver) -> Option<Symbol> {
    let mut chars = ident.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(op) = BinOp::from_symbol(c) {
            return Some(Symbol::Binary(op));
        }
        if let Some(op) = Postfix::from_symbol(c) {
            return Some(Symbol::Postfix(op));
        }
    }
    if let Some(slot) = resolver.resolve(ident) {
        return Some(Symbol::Operand(AstNode::Variable(slot as isize)));
    }
    let constant = match ident.to_lowercase().as_str() {
        "pi" => Some(PI_INDEX),
        "e" => Some(E_INDEX),
        "tau" => Some(TAU_INDEX),
        _ => None,
    };
    if let Some(index) = constant {
        return Some(Symbol::Operand(AstNode::Variable(index)));
    }
    if let Some(f) = Function::from_name(ident) {
        return Some(Symbol::Function(f));
    }
    Aggregate::from_name(ident).map(Symbol::Aggregate)
}

fn is_separator(token: &Token) -> bool {
    matches!(token, Token::Identifier(s) if s == ";")
}

/// Partially built list entry.
#[derive(Debug)]
enum Item {
    /// Finished subtree and its height.
    Node(AstNode, usize),
    /// Built arguments of a `;`-separated group and the tallest one's height.
    Args(Vec<AstNode>, usize),
    Binary(BinOp),
    Postfix(Postfix),
    Function(Function),
    Aggregate(Aggregate),
}

impl Item {
    fn symbol(&self) -> String {
        match self {
            Item::Node(n, _) => n.to_string(),
            Item::Args(..) => ";".to_string(),
            Item::Binary(op) => op.symbol().to_string(),
            Item::Postfix(op) => op.symbol().to_string(),
            Item::Function(f) => f.name().to_string(),
            Item::Aggregate(a) => a.name().to_string(),
        }
    }
}

/// Turns token streams into [`AstNode`] trees.
pub struct TreeBuilder<'r> {
    resolver: &'r dyn VarResolver,
    max_depth: usize,
}

impl<'r> TreeBuilder<'r> {
    pub fn new(resolver: &'r dyn VarResolver) -> Self {
        Self {
            resolver,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limits how deep groups may nest and how tall the built tree may grow.
    ///
    /// Evaluation, folding and dropping a tree all recurse, so a formula like
    /// `1+1+...+1` is refused here instead of overflowing the stack later.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(&self, tokens: &[Token]) -> Result<AstNode, BuildError> {
        self.build_level(tokens, 0).map(|(root, _)| root)
    }

    fn build_level(&self, tokens: &[Token], depth: usize) -> Result<(AstNode, usize), BuildError> {
        if depth > self.max_depth {
            return Err(self.too_deep());
        }
        let tokens = insert_implicit_multiplication(tokens, self.resolver);
        let items = self.resolve(&tokens, depth)?;
        let items = self.postfix_pass(items)?;
        let items = self.function_pass(items)?;
        let mut items = self.sign_pass(items)?;
        for op in BINARY_PASSES {
            items = self.binary_pass(items, op)?;
        }
        collapse(items)
    }

    fn resolve(&self, tokens: &[Token], depth: usize) -> Result<Vec<Item>, BuildError> {
        tokens
            .iter()
            .map(|token| match token {
                Token::Number(v) => Ok(Item::Node(AstNode::Number(*v), 1)),
                Token::Group(inner) => self.group(inner, depth + 1),
                Token::Identifier(s) => match classify(s, self.resolver) {
                    Some(Symbol::Operand(node)) => Ok(Item::Node(node, 1)),
                    Some(Symbol::Function(f)) => Ok(Item::Function(f)),
                    Some(Symbol::Aggregate(a)) => Ok(Item::Aggregate(a)),
                    Some(Symbol::Binary(op)) => Ok(Item::Binary(op)),
                    Some(Symbol::Postfix(op)) => Ok(Item::Postfix(op)),
                    None if is_separator(token) => Err(BuildError::MisplacedSeparator),
                    None => Err(BuildError::UnknownIdentifier(s.clone())),
                },
            })
            .collect()
    }

    /// A bracket group is one node, or an argument list when it holds `;`.
    fn group(&self, inner: &[Token], depth: usize) -> Result<Item, BuildError> {
        if !inner.iter().any(is_separator) {
            let (node, height) = self.build_level(inner, depth)?;
            return Ok(Item::Node(node, height));
        }
        let mut args = Vec::new();
        let mut height = 0;
        for part in inner.split(is_separator) {
            let (node, h) = self.build_level(part, depth)?;
            args.push(node);
            height = height.max(h);
        }
        Ok(Item::Args(args, height))
    }

    fn too_deep(&self) -> BuildError {
        BuildError::TooDeep {
            limit: self.max_depth,
        }
    }

    fn node(&self, node: AstNode, height: usize) -> Result<Item, BuildError> {
        if height > self.max_depth {
            return Err(self.too_deep());
        }
        Ok(Item::Node(node, height))
    }

    /// Each postfix operator takes the node on its left, scanning left to right.
    fn postfix_pass(&self, items: Vec<Item>) -> Result<Vec<Item>, BuildError> {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Item::Postfix(op) => match out.pop() {
                    Some(Item::Node(x, h)) => {
                        out.push(self.node(AstNode::UnaryOp(op, Box::new(x)), h + 1)?)
                    }
                    _ => return Err(BuildError::MissingOperand(op.symbol().to_string())),
                },
                other => out.push(other),
            }
        }
        Ok(out)
    }

    /// Each function takes the node on its right. The scan runs right to left
    /// over all functions at once, so `sin sqrt x` nests as `sin(sqrt(x))`;
    /// a separate left-to-right scan per name would reject that input. The
    /// nesting is intended.
    ///
    /// Aggregates also take a `;` argument list. Argument lists left over
    /// afterwards were not written after an aggregate.
    fn function_pass(&self, items: Vec<Item>) -> Result<Vec<Item>, BuildError> {
        let mut out = Vec::with_capacity(items.len());
        for item in items.into_iter().rev() {
            match item {
                Item::Function(f) => match out.pop() {
                    Some(Item::Node(x, h)) => {
                        out.push(self.node(AstNode::Call(f, Box::new(x)), h + 1)?)
                    }
                    Some(Item::Args(..)) => {
                        return Err(BuildError::TooManyArguments(f.name().to_string()))
                    }
                    _ => return Err(BuildError::MissingOperand(f.name().to_string())),
                },
                Item::Aggregate(a) => match out.pop() {
                    Some(Item::Node(x, h)) => {
                        out.push(self.node(AstNode::Aggregate(a, vec![x]), h + 1)?)
                    }
                    Some(Item::Args(args, h)) => {
                        out.push(self.node(AstNode::Aggregate(a, args), h + 1)?)
                    }
                    _ => return Err(BuildError::MissingOperand(a.name().to_string())),
                },
                other => out.push(other),
            }
        }
        if out.iter().any(|item| matches!(item, Item::Args(..))) {
            return Err(BuildError::MisplacedSeparator);
        }
        out.reverse();
        Ok(out)
    }

    /// `-`/`+` without a left operand become `0 - x`/`0 + x`.
    fn sign_pass(&self, items: Vec<Item>) -> Result<Vec<Item>, BuildError> {
        let mut out = Vec::with_capacity(items.len());
        let mut rest = items.into_iter().rev().peekable();
        while let Some(item) = rest.next() {
            match item {
                Item::Binary(op @ (BinOp::Sub | BinOp::Add))
                    if !matches!(rest.peek(), Some(Item::Node(..))) =>
                {
                    match out.pop() {
                        Some(Item::Node(x, h)) => out.push(self.node(
                            AstNode::BinaryOp(op, Box::new(AstNode::Number(0.0)), Box::new(x)),
                            h + 1,
                        )?),
                        _ => return Err(BuildError::MissingOperand(op.symbol().to_string())),
                    }
                }
                other => out.push(other),
            }
        }
        out.reverse();
        Ok(out)
    }

    /// Collapses every occurrence of `op`, right to left, into a `BinaryOp`.
    fn binary_pass(&self, items: Vec<Item>, op: BinOp) -> Result<Vec<Item>, BuildError> {
        let mut out = Vec::with_capacity(items.len());
        let mut rest = items.into_iter().rev();
        while let Some(item) = rest.next() {
            match item {
                Item::Binary(found) if found == op => {
                    let (right, hr) = match out.pop() {
                        Some(Item::Node(x, h)) => (x, h),
                        _ => return Err(BuildError::MissingOperand(op.symbol().to_string())),
                    };
                    let (left, hl) = match rest.next() {
                        Some(Item::Node(x, h)) => (x, h),
                        _ => return Err(BuildError::MissingOperand(op.symbol().to_string())),
                    };
                    out.push(self.node(
                        AstNode::BinaryOp(op, Box::new(left), Box::new(right)),
                        hl.max(hr) + 1,
                    )?);
                }
                other => out.push(other),
            }
        }
        out.reverse();
        Ok(out)
    }
}

/// Builds a tree from `tokens`, resolving names against `variables` (case-insensitive).
pub fn build(tokens: &[Token], variables: &[String]) -> Result<AstNode, BuildError> {
    let names = VariableNames::new(variables.iter().cloned());
    TreeBuilder::new(&names).build(tokens)
}

fn collapse(mut items: Vec<Item>) -> Result<(AstNode, usize), BuildError> {
    match items.len() {
        0 => Err(BuildError::Empty),
        1 => match items.pop() {
            Some(Item::Node(root, height)) => Ok((root, height)),
            Some(other) => Err(BuildError::MissingOperand(other.symbol())),
            None => Err(BuildError::Empty),
        },
        n => Err(BuildError::NotCollapsed(n)),
    }
}
