use simformula::{parse_plain_number, tokenize, FormulaParser, Lexer, ParseError, Token, TokenizeError};

fn calc(text: &str) -> f64 {
    FormulaParser::new().parse(text).unwrap().eval(&[]).unwrap()
}

#[test]
fn comma_and_dot_separators() {
    assert_eq!(calc("5,25"), 5.25);
    assert_eq!(calc("5.75"), 5.75);
    assert_eq!(calc("1,5+1.5"), 3.0);
}

#[test]
fn bare_separator_means_leading_zero() {
    assert_eq!(calc(".5"), 0.5);
    assert_eq!(calc(",25*4"), 1.0);
    assert_eq!(calc("2."), 2.0);
}

#[test]
fn second_separator_is_an_error() {
    assert_eq!(
        tokenize("3,5,1").unwrap_err(),
        TokenizeError::MalformedNumber { position: 3 }
    );
    assert_eq!(
        tokenize("1+2.5.").unwrap_err(),
        TokenizeError::MalformedNumber { position: 5 }
    );
}

#[test]
fn tokens_of_simple_formula() {
    assert_eq!(
        tokenize("3pi + x").unwrap(),
        vec![
            Token::Number(3.0),
            Token::Identifier("pi".into()),
            Token::Identifier("+".into()),
            Token::Identifier("x".into()),
        ]
    );
}

#[test]
fn leading_minus_gets_zero() {
    assert_eq!(
        tokenize("-x").unwrap(),
        vec![
            Token::Number(0.0),
            Token::Identifier("-".into()),
            Token::Identifier("x".into()),
        ]
    );
    assert_eq!(
        tokenize("2*(-1)").unwrap(),
        vec![
            Token::Number(2.0),
            Token::Identifier("*".into()),
            Token::Group(vec![
                Token::Number(0.0),
                Token::Identifier("-".into()),
                Token::Number(1.0),
            ]),
        ]
    );
}

#[test]
fn nested_groups() {
    assert_eq!(
        tokenize("((1))").unwrap(),
        vec![Token::Group(vec![Token::Group(vec![Token::Number(1.0)])])]
    );
}

#[test]
fn whitespace_is_discarded() {
    assert_eq!(tokenize(" 1 \t+\n2 ").unwrap(), tokenize("1+2").unwrap());
}

fn dot_only(text: &str) -> Option<f64> {
    if text.contains(',') {
        None
    } else {
        parse_plain_number(text)
    }
}

#[test]
fn custom_number_parser() {
    assert_eq!(
        Lexer::new("1,5").with_number_parser(dot_only).tokenize().unwrap_err(),
        TokenizeError::MalformedNumber { position: 0 }
    );
    let parser = FormulaParser::new().number_parser(dot_only);
    assert_eq!(parser.parse("1.5*2").unwrap().eval(&[]).unwrap(), 3.0);
    assert!(matches!(
        parser.parse("1,5"),
        Err(ParseError::Tokenize(TokenizeError::MalformedNumber { .. }))
    ));
}

#[test]
fn nesting_limit() {
    let text = format!("{}1{}", "(".repeat(20), ")".repeat(20));
    assert_eq!(calc(&text), 1.0);
    let err = FormulaParser::new().max_depth(10).parse(&text).unwrap_err();
    assert_eq!(
        err,
        ParseError::Tokenize(TokenizeError::TooDeep {
            position: 10,
            limit: 10
        })
    );
}
