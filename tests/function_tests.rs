use simformula::{EvalError, FormulaParser};

fn calc(text: &str) -> f64 {
    FormulaParser::new().parse(text).unwrap().eval(&[]).unwrap()
}

fn approx(text: &str, expected: f64) {
    let v = calc(text);
    assert!(
        (v - expected).abs() < 1e-9,
        "{} = {}, expected {}",
        text,
        v,
        expected
    );
}

fn domain_error(text: &str) -> &'static str {
    let f = FormulaParser::new().parse(text).unwrap();
    match f.eval(&[]).unwrap_err() {
        EvalError::DomainError { function, .. } => function,
        other => panic!("{}: expected DomainError, got {:?}", text, other),
    }
}

#[test]
fn square_root_and_synonyms() {
    assert_eq!(calc("sqrt(25)"), 5.0);
    assert_eq!(calc("Wurzel(16)"), 4.0);
    assert_eq!(calc("quadratwurzel(9)"), 3.0);
    assert_eq!(calc("\\25"), 5.0);
    assert_eq!(calc("sqrt(0)"), 0.0);
    assert_eq!(domain_error("sqrt(-1)"), "sqrt");
}

#[test]
fn trigonometry() {
    approx("sin(pi/6)", 0.5);
    approx("cos(0)", 1.0);
    approx("tan(pi/4)", 1.0);
    approx("cot(pi/4)", 1.0);
    assert_eq!(domain_error("tan(pi/2)"), "tan");
    assert_eq!(domain_error("cot(0)"), "cot");
    approx("arcsin(1)", std::f64::consts::FRAC_PI_2);
    approx("acos(1)", 0.0);
    approx("atan(1)", std::f64::consts::FRAC_PI_4);
    assert_eq!(domain_error("arcsin(2)"), "arcsin");
    approx("sinh(0)+cosh(0)+tanh(0)", 1.0);
}

#[test]
fn exponentials_and_logarithms() {
    approx("exp(1)", std::f64::consts::E);
    approx("log(e)", 1.0);
    approx("ln(e^2)", 2.0);
    approx("lg(1000)", 3.0);
    approx("ld(8)", 3.0);
    assert_eq!(domain_error("log(0)"), "ln");
    assert_eq!(domain_error("lg(-10)"), "lg");
    assert_eq!(domain_error("ld(0)"), "ld");
}

#[test]
fn absolute_value() {
    assert_eq!(calc("abs(-3)"), 3.0);
    assert_eq!(calc("Betrag(-3)"), 3.0);
    assert_eq!(calc("absolutbetrag(3)"), 3.0);
    assert_eq!(calc("|-7|"), 7.0);
    assert_eq!(calc("2|1-4|"), 6.0);
}

#[test]
fn rounding_family() {
    assert_eq!(calc("frac(3.75)"), 0.75);
    assert_eq!(calc("frac(-3.75)"), -0.75);
    assert_eq!(calc("int(-3.7)"), -3.0);
    assert_eq!(calc("int(3.7)"), 3.0);
    assert_eq!(calc("round(2.4)"), 2.0);
    assert_eq!(calc("rnd(2.6)"), 3.0);
    assert_eq!(calc("runden(-2.6)"), -3.0);
    assert_eq!(calc("floor(-1.5)"), -2.0);
    assert_eq!(calc("abrunden(1.5)"), 1.0);
    assert_eq!(calc("ceil(1.2)"), 2.0);
    assert_eq!(calc("aufrunden(-1.2)"), -1.0);
}

#[test]
fn factorial_function_preserves_sign() {
    assert_eq!(calc("factorial(5)"), 120.0);
    assert_eq!(calc("Fakultät(4)"), 24.0);
    assert_eq!(calc("factorial(-5)"), -120.0);
    assert_eq!(calc("factorial(0)"), 1.0);
}

#[test]
fn sign_family() {
    assert_eq!(calc("sign(-4)"), -1.0);
    assert_eq!(calc("signum(3)"), 1.0);
    assert_eq!(calc("sgn(0)"), 0.0);
}

#[test]
fn other_functions() {
    assert_eq!(calc("sqr(7)"), 49.0);
    approx("cbrt(27)", 3.0);
    assert_eq!(calc("inverse(4)"), 0.25);
    assert_eq!(domain_error("inverse(0)"), "inverse");
}

#[test]
fn function_names_ignore_case() {
    assert_eq!(calc("SQRT(4)"), 2.0);
    assert_eq!(calc("Abs(-1)"), 1.0);
}

#[test]
fn functions_nest_without_brackets() {
    approx("sin sqrt 0", 0.0);
    assert_eq!(calc("sqrt sqrt 16"), 2.0);
}

#[test]
fn hyperbolic_and_inverse_families() {
    approx("coth(1)", 1.0 / 1f64.tanh());
    assert_eq!(domain_error("coth(0)"), "coth");
    approx("arccot(1)", std::f64::consts::FRAC_PI_4);
    approx("acot(0)", std::f64::consts::FRAC_PI_2);
    approx("arcsinh(sinh(2))", 2.0);
    approx("arccosh(1)", 0.0);
    approx("artanh(0.5)", 0.5f64.atanh());
    approx("arccoth(2)", 0.5 * 3f64.ln());
    assert_eq!(domain_error("arccosh(0.5)"), "arccosh");
    assert_eq!(domain_error("arctanh(1)"), "arctanh");
    assert_eq!(domain_error("arccoth(1)"), "arccoth");
}

#[test]
fn gamma_and_zeta() {
    approx("gamma(5)", 24.0);
    approx("gamma(0.5)^2", std::f64::consts::PI);
    assert_eq!(domain_error("gamma(0)"), "gamma");
    assert_eq!(domain_error("gamma(-2)"), "gamma");
    approx("zeta(2)", std::f64::consts::PI * std::f64::consts::PI / 6.0);
    assert_eq!(domain_error("zeta(1)"), "zeta");
}

#[test]
fn truncate_is_int() {
    assert_eq!(calc("truncate(-3.7)"), -3.0);
    assert_eq!(calc("trunc(3.7)"), 3.0);
}

#[test]
fn aggregates_over_argument_lists() {
    assert_eq!(calc("min(2;3;4)"), 2.0);
    assert_eq!(calc("max(2;-3;4)"), 4.0);
    assert_eq!(calc("range(1;5;3)"), 4.0);
    assert_eq!(calc("sum(1;2;3)+1"), 7.0);
    assert_eq!(calc("mean(1;2;3;6)"), 3.0);
    assert_eq!(calc("2max(1;sqrt(9))"), 6.0);
    assert_eq!(calc("min 5"), 5.0);
}

#[test]
fn aggregates_with_variables() {
    let f = FormulaParser::with_variables(["a", "b"])
        .parse("max(a;b;0)")
        .unwrap();
    assert_eq!(f.eval(&[-1.0, -2.0]).unwrap(), 0.0);
    assert_eq!(f.eval(&[3.0, 7.0]).unwrap(), 7.0);
    assert_eq!(f.ast().to_string(), "max($0;$1;0)");
}

#[test]
fn unclosed_bar_reaches_the_end() {
    assert_eq!(calc("|-7"), 7.0);
    assert_eq!(calc("2*|1-4"), 6.0);
    assert_eq!(calc("(|-2)+1"), 3.0);
}
