//! Plain numeric helpers shared by the tokenizer and the evaluator.
//!
//! Nothing in here calls back into the formula pipeline, so the tokenizer can
//! use [`parse_plain_number`] for its literals without re-entering itself.

/// Signature of a numeric literal parser plugged into the [`Lexer`](crate::Lexer).
pub type NumberParser = fn(&str) -> Option<f64>;

/// Largest `n` for which `n!` is still finite in an `f64`.
const MAX_FINITE_FACTORIAL: u64 = 170;

/// Lanczos approximation, g = 7, nine coefficients.
const LANCZOS_G: f64 = 7.0;
const LANCZOS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Terms of the alternating series used by [`zeta`].
const ZETA_TERMS: usize = 24;

/// Parses a plain decimal literal such as `12`, `3.5`, `3,5`, `.5` or `5.`.
///
/// Both `,` and `.` are accepted as the decimal separator, at most once. An
/// optional leading `-` is allowed. Anything else (exponents, grouping
/// characters, surrounding whitespace) is rejected.
pub fn parse_plain_number(text: &str) -> Option<f64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.is_empty() {
        return None;
    }

    let mut normalized = String::with_capacity(digits.len() + 2);
    let mut seen_separator = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => normalized.push(c),
            ',' | '.' => {
                if seen_separator {
                    return None;
                }
                seen_separator = true;
                if normalized.is_empty() {
                    normalized.push('0');
                }
                normalized.push('.');
            }
            _ => return None,
        }
    }
    if normalized.ends_with('.') {
        normalized.push('0');
    }

    let v: f64 = normalized.parse().ok()?;
    Some(if negative { -v } else { v })
}

/// Sign-preserving factorial of `round(|x|)`.
///
/// Returns `None` when `|x|` cannot be used as a count (not finite, or too
/// large to iterate over). Results beyond `170!` saturate to infinity.
pub fn factorial(x: f64) -> Option<f64> {
    if !x.is_finite() {
        return None;
    }
    let n = x.abs().round();
    if n > u32::MAX as f64 {
        return None;
    }
    let n = n as u64;

    let magnitude = if n > MAX_FINITE_FACTORIAL {
        f64::INFINITY
    } else {
        (2..=n).fold(1.0, |acc, k| acc * k as f64)
    };
    Some(if x < 0.0 { -magnitude } else { magnitude })
}

/// The gamma function. `None` at the poles `0, -1, -2, ...`.
pub fn gamma(x: f64) -> Option<f64> {
    if x.is_nan() || (x <= 0.0 && x.fract() == 0.0) {
        return None;
    }
    if x < 0.5 {
        // reflection: Γ(x) Γ(1 - x) = π / sin(πx)
        let pi = std::f64::consts::PI;
        return Some(pi / ((pi * x).sin() * gamma(1.0 - x)?));
    }
    let x = x - 1.0;
    let t = x + LANCZOS_G + 0.5;
    let series = LANCZOS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS[0], |acc, (i, c)| acc + c / (x + i as f64));
    // t^(x + 1/2) is split in two halves so large arguments do not overflow early
    let half = t.powf((x + 0.5) / 2.0);
    Some((2.0 * std::f64::consts::PI).sqrt() * half * (-t).exp() * half * series)
}

/// The Riemann zeta function for real `s > 0`, `s != 1`.
///
/// Uses Borwein's acceleration of the alternating (Dirichlet eta) series.
pub fn zeta(s: f64) -> Option<f64> {
    if s.is_nan() || s <= 0.0 || s == 1.0 {
        return None;
    }
    let n = ZETA_TERMS as f64;
    let mut d = [0.0; ZETA_TERMS + 1];
    let mut term = 1.0 / n;
    let mut sum = term;
    d[0] = n * sum;
    for (i, slot) in d.iter_mut().enumerate().skip(1) {
        let k = i as f64;
        term *= 4.0 * (n + k - 1.0) * (n - k + 1.0) / ((2.0 * k) * (2.0 * k - 1.0));
        sum += term;
        *slot = n * sum;
    }
    let dn = d[ZETA_TERMS];
    let acc = (0..ZETA_TERMS).fold(0.0, |acc, k| {
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        acc + sign * (d[k] - dn) / ((k + 1) as f64).powf(s)
    });
    let eta = -acc / dn;
    Some(eta / (1.0 - 2f64.powf(1.0 - s)))
}
