use crate::error::TokenizeError;
use crate::number::{parse_plain_number, NumberParser};

/// Default nesting limit: brackets and bars in the lexer, tree height in the builder.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Lexical unit of a formula.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    /// Operator symbol (`+`, `²`, ...) or a function/variable name.
    Identifier(String),
    /// Contents of one matched bracket pair, tokenized on their own.
    Group(Vec<Token>),
}

impl Token {
    pub(crate) fn ident(s: &str) -> Token {
        Token::Identifier(s.to_string())
    }
}

/// Character classes driving the scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Number,
    Operator,
    Identifier,
    Bracket,
    Whitespace,
    End,
}

fn mode_of(c: Option<char>) -> Mode {
    match c {
        None => Mode::End,
        Some(c) if c.is_ascii_digit() || c == '.' || c == ',' => Mode::Number,
        Some(c) if is_operator(c) => Mode::Operator,
        Some(c) if is_opening(c) || is_closing(c) || c == '|' => Mode::Bracket,
        Some(c) if c.is_whitespace() => Mode::Whitespace,
        Some(_) => Mode::Identifier,
    }
}

fn is_operator(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '/' | ':' | '^' | '%' | '!' | '²' | '³' | '°'
    )
}

fn is_opening(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

fn is_closing(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

/// Digits end a name: `sin2` is `sin 2`.
fn is_ident_char(c: char) -> bool {
    ((c.is_alphanumeric() && !c.is_ascii_digit()) || c == '_') && !is_operator(c)
}

fn starts_with_ignore_case(text: &[char], name: &str) -> Option<usize> {
    let mut len = 0;
    for n in name.chars() {
        let c = text.get(len)?;
        if !c.to_lowercase().eq(n.to_lowercase()) {
            return None;
        }
        len += 1;
    }
    Some(len)
}

/// Splits formula text into [`Token`]s.
pub struct Lexer<'a> {
    text: &'a str,
    variables: &'a [String],
    number_parser: NumberParser,
    max_depth: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            variables: &[],
            number_parser: parse_plain_number,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Declared names that may contain digits (`Station1`). Where one of them
    /// starts at an identifier it is taken whole, longest match first.
    pub fn with_variables(mut self, variables: &'a [String]) -> Self {
        self.variables = variables;
        self
    }

    /// Replaces the parser used for number literals.
    pub fn with_number_parser(mut self, number_parser: NumberParser) -> Self {
        self.number_parser = number_parser;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn tokenize(&self) -> Result<Vec<Token>, TokenizeError> {
        let src: Vec<char> = self.text.chars().collect();
        let scanner = Scanner {
            src: &src,
            variables: self.variables,
            number_parser: self.number_parser,
            max_depth: self.max_depth,
        };
        scanner.scan(0, src.len(), 0)
    }
}

/// Tokenizes `text` with the default number parser and depth limit.
pub fn tokenize(text: &str) -> Result<Vec<Token>, TokenizeError> {
    Lexer::new(text).tokenize()
}

struct Scanner<'s> {
    src: &'s [char],
    variables: &'s [String],
    number_parser: NumberParser,
    max_depth: usize,
}

impl<'s> Scanner<'s> {
    fn peek(&self, i: usize, end: usize) -> Option<char> {
        if i < end {
            self.src.get(i).copied()
        } else {
            None
        }
    }

    /// Tokenizes `src[start..end]`. Groups recurse with `depth + 1`.
    fn scan(&self, start: usize, end: usize, depth: usize) -> Result<Vec<Token>, TokenizeError> {
        let mut out = Vec::new();
        let mut i = start;
        loop {
            let c = self.peek(i, end);
            match mode_of(c) {
                Mode::End => break,
                Mode::Whitespace => i += 1,
                Mode::Number => i = self.lex_number(i, end, &mut out)?,
                Mode::Operator => {
                    let c = self.src[i];
                    // leading unary minus becomes `0 - ...`
                    if c == '-' && out.is_empty() {
                        out.push(Token::Number(0.0));
                    }
                    out.push(Token::Identifier(c.to_string()));
                    i += 1;
                }
                Mode::Identifier => i = self.lex_ident(i, end, &mut out),
                Mode::Bracket => i = self.lex_bracket(i, end, depth, &mut out)?,
            }
        }
        Ok(out)
    }

    fn lex_number(&self, start: usize, end: usize, out: &mut Vec<Token>) -> Result<usize, TokenizeError> {
        let mut literal = String::new();
        let mut seen_separator = false;
        let mut i = start;
        while let Some(c) = self.peek(i, end) {
            if c.is_ascii_digit() {
                literal.push(c);
            } else if c == '.' || c == ',' {
                if seen_separator {
                    return Err(TokenizeError::MalformedNumber { position: i });
                }
                seen_separator = true;
                literal.push(c);
            } else {
                break;
            }
            i += 1;
        }
        let v = (self.number_parser)(&literal)
            .ok_or(TokenizeError::MalformedNumber { position: start })?;
        out.push(Token::Number(v));
        Ok(i)
    }

    fn lex_ident(&self, start: usize, end: usize, out: &mut Vec<Token>) -> usize {
        let first = self.src[start];
        let mut i = start + 1;
        if is_ident_char(first) {
            while let Some(c) = self.peek(i, end) {
                if is_ident_char(c) {
                    i += 1;
                } else {
                    break;
                }
            }
        }
        let rest = &self.src[start..end];
        let declared = self
            .variables
            .iter()
            .filter_map(|name| starts_with_ignore_case(rest, name))
            .max()
            .unwrap_or(0);
        if start + declared > i {
            i = start + declared;
        }
        out.push(Token::Identifier(self.src[start..i].iter().collect()));
        i
    }

    fn lex_bracket(
        &self,
        start: usize,
        end: usize,
        depth: usize,
        out: &mut Vec<Token>,
    ) -> Result<usize, TokenizeError> {
        let c = self.src[start];
        if is_closing(c) {
            // A stray closer is tolerated only as trailing noise.
            if self.src[start + 1..].iter().all(|c| c.is_whitespace()) {
                return Ok(end);
            }
            return Err(TokenizeError::UnmatchedBracket { position: start });
        }

        if depth + 1 > self.max_depth {
            return Err(TokenizeError::TooDeep {
                position: start,
                limit: self.max_depth,
            });
        }

        if c == '|' {
            // an unclosed bar runs to the end of the enclosing group
            let close = self.find_bar(start + 1, end);
            let inner = self.scan(start + 1, close.unwrap_or(end), depth + 1)?;
            out.push(Token::ident("abs"));
            out.push(Token::Group(inner));
            return Ok(close.map_or(end, |i| i + 1));
        }

        let close = self
            .find_closing(start + 1, end)
            .ok_or(TokenizeError::UnclosedBracket { position: start })?;
        let inner = self.scan(start + 1, close, depth + 1)?;
        out.push(Token::Group(inner));
        Ok(close + 1)
    }

    /// Index of the bracket closing the one just before `from`, any bracket kind.
    fn find_closing(&self, from: usize, end: usize) -> Option<usize> {
        let mut level = 1usize;
        for i in from..end {
            let c = self.src[i];
            if is_opening(c) {
                level += 1;
            } else if is_closing(c) {
                level -= 1;
                if level == 0 {
                    return Some(i);
                }
            }
        }
        None
    }

    /// Index of the next `|` outside of any bracket group.
    fn find_bar(&self, from: usize, end: usize) -> Option<usize> {
        let mut level = 0usize;
        for i in from..end {
            match self.src[i] {
                c if is_opening(c) => level += 1,
                c if is_closing(c) => {
                    if level == 0 {
                        return None;
                    }
                    level -= 1;
                }
                '|' if level == 0 => return Some(i),
                _ => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Token {
        Token::ident(s)
    }

    #[test]
    fn modes() {
        assert_eq!(mode_of(Some('7')), Mode::Number);
        assert_eq!(mode_of(Some(',')), Mode::Number);
        assert_eq!(mode_of(Some('²')), Mode::Operator);
        assert_eq!(mode_of(Some(']')), Mode::Bracket);
        assert_eq!(mode_of(Some('|')), Mode::Bracket);
        assert_eq!(mode_of(Some('\t')), Mode::Whitespace);
        assert_eq!(mode_of(Some('ä')), Mode::Identifier);
        assert_eq!(mode_of(Some('\\')), Mode::Identifier);
        assert_eq!(mode_of(None), Mode::End);
    }

    #[test]
    fn identifier_stops_at_operator_glyphs() {
        let toks = tokenize("x²+ab_c").unwrap();
        assert_eq!(toks, vec![id("x"), id("²"), id("+"), id("ab_c")]);
    }

    #[test]
    fn digits_end_identifiers() {
        let toks = tokenize("sin2x3").unwrap();
        assert_eq!(
            toks,
            vec![id("sin"), Token::Number(2.0), id("x"), Token::Number(3.0)]
        );
    }

    #[test]
    fn declared_names_with_digits_are_taken_whole() {
        let names = vec!["Station1".to_string(), "Station12".to_string()];
        let toks = Lexer::new("station12+STATION1 2")
            .with_variables(&names)
            .tokenize()
            .unwrap();
        assert_eq!(
            toks,
            vec![id("station12"), id("+"), id("STATION1"), Token::Number(2.0)]
        );
        let toks = Lexer::new("station3").with_variables(&names).tokenize().unwrap();
        assert_eq!(toks, vec![id("station"), Token::Number(3.0)]);
    }

    #[test]
    fn other_characters_are_single_identifiers() {
        let toks = tokenize("\\25").unwrap();
        assert_eq!(toks, vec![id("\\"), Token::Number(25.0)]);
    }

    #[test]
    fn bar_wraps_abs() {
        let toks = tokenize("|-7|").unwrap();
        assert_eq!(
            toks,
            vec![
                id("abs"),
                Token::Group(vec![Token::Number(0.0), id("-"), Token::Number(7.0)])
            ]
        );
    }

    #[test]
    fn unclosed_bar_runs_to_the_end() {
        assert_eq!(
            tokenize("2+|x").unwrap(),
            vec![
                Token::Number(2.0),
                id("+"),
                id("abs"),
                Token::Group(vec![id("x")])
            ]
        );
        assert_eq!(
            tokenize("(|-7)").unwrap(),
            vec![Token::Group(vec![
                id("abs"),
                Token::Group(vec![Token::Number(0.0), id("-"), Token::Number(7.0)])
            ])]
        );
    }

    #[test]
    fn depth_guard() {
        let text = format!("{}1{}", "(".repeat(5), ")".repeat(5));
        assert!(Lexer::new(&text).with_max_depth(5).tokenize().is_ok());
        assert_eq!(
            Lexer::new(&text).with_max_depth(4).tokenize().unwrap_err(),
            TokenizeError::TooDeep { position: 4, limit: 4 }
        );
    }
}
