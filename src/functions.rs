//! Built-in functions: single-argument [`Function`]s and the `;`-separated
//! [`Aggregate`]s.

use crate::number::{factorial, gamma, zeta};

/// `tan`/`cot` are treated as undefined when the denominator is this close to zero.
const SINGULARITY_EPS: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    Sqrt,
    Sqr,
    Cbrt,
    Sin,
    Cos,
    Tan,
    Cot,
    Sinh,
    Cosh,
    Tanh,
    Coth,
    Arcsin,
    Arccos,
    Arctan,
    Arccot,
    Arsinh,
    Arcosh,
    Artanh,
    Arcoth,
    Exp,
    Ln,
    Lg,
    Ld,
    Abs,
    Frac,
    Int,
    Round,
    Floor,
    Ceil,
    Factorial,
    Sign,
    Inverse,
    Gamma,
    Zeta,
}

impl Function {
    /// Looks up a function by any of its names, ignoring case.
    pub fn from_name(name: &str) -> Option<Function> {
        let lower = name.to_lowercase();
        let f = match lower.as_str() {
            "sqrt" | "wurzel" | "quadratwurzel" | "\\" => Function::Sqrt,
            "sqr" => Function::Sqr,
            "cbrt" => Function::Cbrt,
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "cot" => Function::Cot,
            "sinh" => Function::Sinh,
            "cosh" => Function::Cosh,
            "tanh" => Function::Tanh,
            "coth" => Function::Coth,
            "arcsin" | "asin" => Function::Arcsin,
            "arccos" | "acos" => Function::Arccos,
            "arctan" | "atan" => Function::Arctan,
            "arccot" | "acot" => Function::Arccot,
            "arcsinh" | "arsinh" | "asinh" => Function::Arsinh,
            "arccosh" | "arcosh" | "acosh" => Function::Arcosh,
            "arctanh" | "artanh" | "atanh" => Function::Artanh,
            "arccoth" | "arcoth" | "acoth" => Function::Arcoth,
            "exp" => Function::Exp,
            "log" | "ln" => Function::Ln,
            "lg" => Function::Lg,
            "ld" => Function::Ld,
            "abs" | "betrag" | "absolutbetrag" => Function::Abs,
            "frac" => Function::Frac,
            "int" | "truncate" | "trunc" => Function::Int,
            "round" | "rnd" | "runden" => Function::Round,
            "floor" | "abrunden" => Function::Floor,
            "ceil" | "aufrunden" => Function::Ceil,
            "factorial" | "fakultät" => Function::Factorial,
            "sign" | "signum" | "sgn" => Function::Sign,
            "inverse" => Function::Inverse,
            "gamma" => Function::Gamma,
            "zeta" => Function::Zeta,
            _ => return None,
        };
        Some(f)
    }

    /// Canonical name, used when printing trees and in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Function::Sqrt => "sqrt",
            Function::Sqr => "sqr",
            Function::Cbrt => "cbrt",
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Cot => "cot",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Coth => "coth",
            Function::Arcsin => "arcsin",
            Function::Arccos => "arccos",
            Function::Arctan => "arctan",
            Function::Arccot => "arccot",
            Function::Arsinh => "arcsinh",
            Function::Arcosh => "arccosh",
            Function::Artanh => "arctanh",
            Function::Arcoth => "arccoth",
            Function::Exp => "exp",
            Function::Ln => "ln",
            Function::Lg => "lg",
            Function::Ld => "ld",
            Function::Abs => "abs",
            Function::Frac => "frac",
            Function::Int => "int",
            Function::Round => "round",
            Function::Floor => "floor",
            Function::Ceil => "ceil",
            Function::Factorial => "factorial",
            Function::Sign => "sign",
            Function::Inverse => "inverse",
            Function::Gamma => "gamma",
            Function::Zeta => "zeta",
        }
    }

    /// Applies the function, returning `None` when `x` is outside its domain.
    pub fn apply(self, x: f64) -> Option<f64> {
        let v = match self {
            Function::Sqrt => {
                if x < 0.0 {
                    return None;
                }
                x.sqrt()
            }
            Function::Sqr => x * x,
            Function::Cbrt => x.cbrt(),
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Tan => {
                if x.cos().abs() < SINGULARITY_EPS {
                    return None;
                }
                x.tan()
            }
            Function::Cot => {
                let t = x.tan();
                if t.abs() < SINGULARITY_EPS {
                    return None;
                }
                1.0 / t
            }
            Function::Sinh => x.sinh(),
            Function::Cosh => x.cosh(),
            Function::Tanh => x.tanh(),
            Function::Coth => {
                if x == 0.0 {
                    return None;
                }
                1.0 / x.tanh()
            }
            Function::Arcsin => {
                if x.abs() > 1.0 {
                    return None;
                }
                x.asin()
            }
            Function::Arccos => {
                if x.abs() > 1.0 {
                    return None;
                }
                x.acos()
            }
            Function::Arctan => x.atan(),
            Function::Arccot => std::f64::consts::FRAC_PI_2 - x.atan(),
            Function::Arsinh => x.asinh(),
            Function::Arcosh => {
                if x < 1.0 {
                    return None;
                }
                x.acosh()
            }
            Function::Artanh => {
                if x.abs() >= 1.0 {
                    return None;
                }
                x.atanh()
            }
            Function::Arcoth => {
                if x.abs() <= 1.0 {
                    return None;
                }
                0.5 * ((x + 1.0) / (x - 1.0)).ln()
            }
            Function::Exp => x.exp(),
            Function::Ln => positive(x)?.ln(),
            Function::Lg => positive(x)?.log10(),
            Function::Ld => positive(x)?.log2(),
            Function::Abs => x.abs(),
            Function::Frac => x.fract(),
            Function::Int => x.trunc(),
            Function::Round => x.round(),
            Function::Floor => x.floor(),
            Function::Ceil => x.ceil(),
            Function::Factorial => factorial(x)?,
            Function::Sign => {
                if x > 0.0 {
                    1.0
                } else if x < 0.0 {
                    -1.0
                } else {
                    0.0
                }
            }
            Function::Inverse => {
                if x == 0.0 {
                    return None;
                }
                1.0 / x
            }
            Function::Gamma => gamma(x)?,
            Function::Zeta => zeta(x)?,
        };
        Some(v)
    }
}

/// Functions over a `;`-separated argument list, as in `min(2; x; 4)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aggregate {
    Min,
    Max,
    /// Largest minus smallest argument.
    Range,
    Sum,
    /// Arithmetic mean.
    Mean,
}

impl Aggregate {
    pub fn from_name(name: &str) -> Option<Aggregate> {
        let a = match name.to_lowercase().as_str() {
            "min" | "minimum" => Aggregate::Min,
            "max" | "maximum" => Aggregate::Max,
            "range" => Aggregate::Range,
            "sum" | "summe" => Aggregate::Sum,
            "mean" | "mittelwert" => Aggregate::Mean,
            _ => return None,
        };
        Some(a)
    }

    pub fn name(self) -> &'static str {
        match self {
            Aggregate::Min => "min",
            Aggregate::Max => "max",
            Aggregate::Range => "range",
            Aggregate::Sum => "sum",
            Aggregate::Mean => "mean",
        }
    }

    /// `None` for an empty argument list.
    pub fn apply(self, args: &[f64]) -> Option<f64> {
        if args.is_empty() {
            return None;
        }
        let min = || args.iter().copied().fold(f64::INFINITY, f64::min);
        let max = || args.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let sum = || args.iter().sum::<f64>();
        let v = match self {
            Aggregate::Min => min(),
            Aggregate::Max => max(),
            Aggregate::Range => max() - min(),
            Aggregate::Sum => sum(),
            Aggregate::Mean => sum() / args.len() as f64,
        };
        Some(v)
    }
}

fn positive(x: f64) -> Option<f64> {
    (x > 0.0).then_some(x)
}
