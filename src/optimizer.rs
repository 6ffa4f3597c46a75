use log::trace;

use crate::ast::{constant_value, AstNode};
use crate::eval::evaluate;

/// Constant folding, bottom-up.
///
/// A node whose children are all numbers is evaluated without variables and
/// replaced by its value. If that evaluation fails the node is kept as is, so
/// the error surfaces when (and if) the branch is evaluated. Built-in
/// constants fold to their value. The result is a new tree and a fixed point:
/// simplifying it again changes nothing.
pub fn simplify(node: AstNode) -> AstNode {
    let node = match node {
        AstNode::Number(_) => return node,
        AstNode::Variable(i) => {
            return match constant_value(i) {
                Some(v) => AstNode::Number(v),
                None => node,
            }
        }
        AstNode::UnaryOp(op, x) => AstNode::UnaryOp(op, Box::new(simplify(*x))),
        AstNode::BinaryOp(op, a, b) => {
            AstNode::BinaryOp(op, Box::new(simplify(*a)), Box::new(simplify(*b)))
        }
        AstNode::Call(f, x) => AstNode::Call(f, Box::new(simplify(*x))),
        AstNode::Aggregate(a, args) => {
            AstNode::Aggregate(a, args.into_iter().map(simplify).collect())
        }
    };
    if !children_are_numbers(&node) {
        return node;
    }
    match evaluate(&node, &[]) {
        Ok(v) => AstNode::Number(v),
        Err(err) => {
            trace!("leaving {} unfolded: {}", node, err);
            node
        }
    }
}

fn children_are_numbers(node: &AstNode) -> bool {
    match node {
        AstNode::Number(_) | AstNode::Variable(_) => false,
        AstNode::UnaryOp(_, x) | AstNode::Call(_, x) => x.is_number(),
        AstNode::BinaryOp(_, a, b) => a.is_number() && b.is_number(),
        AstNode::Aggregate(_, args) => args.iter().all(AstNode::is_number),
    }
}
