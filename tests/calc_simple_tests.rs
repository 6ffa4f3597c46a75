use simformula::calc_simple;

#[test]
fn empty_and_blank_input() {
    assert_eq!(calc_simple(""), None);
    assert_eq!(calc_simple(" "), None);
}

#[test]
fn plain_values() {
    assert_eq!(calc_simple("5"), Some(5.0));
    assert_eq!(calc_simple("5,25"), Some(5.25));
    assert_eq!(calc_simple("5.75"), Some(5.75));
}

#[test]
fn expressions() {
    assert_eq!(calc_simple("1+ 2 "), Some(3.0));
    assert_eq!(calc_simple("1+3*4"), Some(13.0));
    assert_eq!(calc_simple("(1+3)*4"), Some(16.0));
    assert_eq!(calc_simple("sqrt(25)"), Some(5.0));
}

#[test]
fn failures_are_none() {
    assert_eq!(calc_simple("sqrt(-25)"), None);
    assert_eq!(calc_simple("1+a"), None);
    assert_eq!(calc_simple("(1"), None);
}
