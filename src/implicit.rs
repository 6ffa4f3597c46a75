use crate::lexer::Token;
use crate::parser::{classify, Symbol};
use crate::resolver::VarResolver;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Number,
    Group,
    Variable,
    Function,
    Postfix,
    Other,
}

impl Kind {
    fn of(token: &Token, resolver: &dyn VarResolver) -> Kind {
        match token {
            Token::Number(_) => Kind::Number,
            Token::Group(_) => Kind::Group,
            Token::Identifier(s) => match classify(s, resolver) {
                Some(Symbol::Operand(_)) => Kind::Variable,
                Some(Symbol::Function(_) | Symbol::Aggregate(_)) => Kind::Function,
                Some(Symbol::Postfix(_)) => Kind::Postfix,
                Some(Symbol::Binary(_)) | None => Kind::Other,
            },
        }
    }

    fn is_operand(self) -> bool {
        matches!(self, Kind::Number | Kind::Group | Kind::Variable)
    }
}

fn needs_multiply(prev: Kind, next: Kind) -> bool {
    (prev.is_operand() && next.is_operand())
        || (matches!(prev, Kind::Number | Kind::Variable) && next == Kind::Function)
        || (prev == Kind::Postfix && next.is_operand())
}

/// Makes juxtaposition explicit: `3pi` becomes `3 * pi`, `2sqrt(4)` becomes
/// `2 * sqrt (4)` and `3²x` becomes `3² * x`.
///
/// Only immediate neighbours of one token list are inspected; nested groups
/// are handled when the builder descends into them.
pub fn insert_implicit_multiplication(tokens: &[Token], resolver: &dyn VarResolver) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len() * 2);
    let mut prev: Option<Kind> = None;
    for token in tokens {
        let kind = Kind::of(token, resolver);
        if prev.is_some_and(|p| needs_multiply(p, kind)) {
            out.push(Token::ident("*"));
        }
        out.push(token.clone());
        prev = Some(kind);
    }
    out
}
