use crate::ast::{constant_value, AstNode, BinOp, Postfix};
use crate::error::EvalError;
use crate::number::factorial;

/// Evaluates `node` against `variables`, indexed by the slots fixed at build time.
///
/// The first failure anywhere in the tree aborts the whole evaluation and
/// carries the sub-expression it happened in.
pub fn evaluate(node: &AstNode, variables: &[f64]) -> Result<f64, EvalError> {
    match node {
        AstNode::Number(v) => Ok(*v),
        AstNode::Variable(i) => variable(*i, variables),
        AstNode::UnaryOp(op, x) => {
            let v = evaluate(x, variables)?;
            match op {
                Postfix::Percent => Ok(v * 0.01),
                Postfix::Square => Ok(v * v),
                Postfix::Cube => Ok(v * v * v),
                Postfix::Factorial => factorial(v).ok_or_else(|| EvalError::DomainError {
                    function: "factorial",
                    node: node.clone(),
                }),
                Postfix::Degrees => Ok(v.to_radians()),
            }
        }
        AstNode::BinaryOp(op, a, b) => {
            let l = evaluate(a, variables)?;
            let r = evaluate(b, variables)?;
            match op {
                BinOp::Add => Ok(l + r),
                BinOp::Sub => Ok(l - r),
                BinOp::Mul => Ok(l * r),
                BinOp::Div | BinOp::Colon => {
                    if r == 0.0 {
                        return Err(EvalError::DivisionByZero { node: node.clone() });
                    }
                    Ok(l / r)
                }
                BinOp::Pow => {
                    if r < 0.0 {
                        return Err(EvalError::InvalidExponent { node: node.clone() });
                    }
                    Ok(l.powf(r))
                }
            }
        }
        AstNode::Call(f, x) => {
            let v = evaluate(x, variables)?;
            f.apply(v).ok_or_else(|| EvalError::DomainError {
                function: f.name(),
                node: node.clone(),
            })
        }
        AstNode::Aggregate(a, args) => {
            let values = args
                .iter()
                .map(|arg| evaluate(arg, variables))
                .collect::<Result<Vec<_>, _>>()?;
            a.apply(&values).ok_or_else(|| EvalError::DomainError {
                function: a.name(),
                node: node.clone(),
            })
        }
    }
}

fn variable(index: isize, variables: &[f64]) -> Result<f64, EvalError> {
    let value = if index >= 0 {
        variables.get(index as usize).copied()
    } else {
        constant_value(index)
    };
    value.ok_or(EvalError::IndexError {
        index,
        len: variables.len(),
    })
}

impl AstNode {
    /// Shorthand for [`evaluate`].
    pub fn eval(&self, variables: &[f64]) -> Result<f64, EvalError> {
        evaluate(self, variables)
    }
}
