use foldhash::{HashSet, HashSetExt};

use crate::ast::AstNode;

/// Distinct variable slots referenced by `ast`, in left-to-right order of first use.
/// Built-in constants are not included.
pub(crate) fn collect_vars(ast: &AstNode) -> Vec<usize> {
    fn walk(node: &AstNode, seen: &mut HashSet<usize>, out: &mut Vec<usize>) {
        match node {
            AstNode::Number(_) => {}
            AstNode::Variable(i) => {
                if let Ok(slot) = usize::try_from(*i) {
                    if seen.insert(slot) {
                        out.push(slot);
                    }
                }
            }
            AstNode::UnaryOp(_, x) | AstNode::Call(_, x) => walk(x, seen, out),
            AstNode::BinaryOp(_, a, b) => {
                walk(a, seen, out);
                walk(b, seen, out);
            }
            AstNode::Aggregate(_, args) => {
                for a in args {
                    walk(a, seen, out);
                }
            }
        }
    }
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    walk(ast, &mut seen, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinOp, PI_INDEX};
    use crate::functions::Aggregate;

    #[test]
    fn first_use_order_without_duplicates_or_constants() {
        let tree = AstNode::Aggregate(
            Aggregate::Max,
            vec![
                AstNode::Variable(2),
                AstNode::BinaryOp(
                    BinOp::Mul,
                    Box::new(AstNode::Variable(PI_INDEX)),
                    Box::new(AstNode::Variable(0)),
                ),
                AstNode::Variable(2),
            ],
        );
        assert_eq!(collect_vars(&tree), vec![2, 0]);
    }
}
