//! Symbolic expression trees over the fixed IS-LM symbol set.
//!
//! This is deliberately not a general computer-algebra system: the only
//! operations are the four arithmetic ones plus negation, which is all the
//! linear model equations need. Expressions are immutable values; every
//! transformation returns a fresh tree.

use crate::symbol::Symbol;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Const(f64),
    Var(Symbol),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
}

/// Shorthand constructor for a numeric literal.
pub fn num(value: f64) -> Expr {
    Expr::Const(value)
}

/// Shorthand constructor for a symbol reference.
pub fn var(symbol: Symbol) -> Expr {
    Expr::Var(symbol)
}

impl Expr {
    fn boxed(self) -> Box<Expr> {
        Box::new(self)
    }

    /// True if `symbol` occurs anywhere in the tree.
    pub fn contains(&self, symbol: Symbol) -> bool {
        match self {
            Expr::Const(_) => false,
            Expr::Var(s) => *s == symbol,
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) => {
                a.contains(symbol) || b.contains(symbol)
            }
            Expr::Neg(a) => a.contains(symbol),
        }
    }

    /// The numeric value if the expression is a bare constant.
    pub fn as_const(&self) -> Option<f64> {
        match self {
            Expr::Const(v) => Some(*v),
            _ => None,
        }
    }

    /// Replaces every occurrence of `symbol` with `replacement`.
    pub fn subs(&self, symbol: Symbol, replacement: &Expr) -> Expr {
        match self {
            Expr::Const(v) => Expr::Const(*v),
            Expr::Var(s) => {
                if *s == symbol {
                    replacement.clone()
                } else {
                    Expr::Var(*s)
                }
            }
            Expr::Add(a, b) => Expr::Add(
                a.subs(symbol, replacement).boxed(),
                b.subs(symbol, replacement).boxed(),
            ),
            Expr::Sub(a, b) => Expr::Sub(
                a.subs(symbol, replacement).boxed(),
                b.subs(symbol, replacement).boxed(),
            ),
            Expr::Mul(a, b) => Expr::Mul(
                a.subs(symbol, replacement).boxed(),
                b.subs(symbol, replacement).boxed(),
            ),
            Expr::Div(a, b) => Expr::Div(
                a.subs(symbol, replacement).boxed(),
                b.subs(symbol, replacement).boxed(),
            ),
            Expr::Neg(a) => Expr::Neg(a.subs(symbol, replacement).boxed()),
        }
    }

    /// Bottom-up structural simplification: constant folding plus the handful
    /// of identities (x + 0, x * 1, 0 / x, double negation, ...) needed to keep
    /// solved equations readable. Division by a literal zero is left intact so
    /// a degenerate derivation surfaces as written instead of folding to an
    /// infinity.
    pub fn simplify(&self) -> Expr {
        let node = match self {
            Expr::Const(v) => Expr::Const(*v),
            Expr::Var(s) => Expr::Var(*s),
            Expr::Add(a, b) => Expr::Add(a.simplify().boxed(), b.simplify().boxed()),
            Expr::Sub(a, b) => Expr::Sub(a.simplify().boxed(), b.simplify().boxed()),
            Expr::Mul(a, b) => Expr::Mul(a.simplify().boxed(), b.simplify().boxed()),
            Expr::Div(a, b) => Expr::Div(a.simplify().boxed(), b.simplify().boxed()),
            Expr::Neg(a) => Expr::Neg(a.simplify().boxed()),
        };
        // Rules can cascade (e.g. Div by -1 becomes Neg, which flips a Sub),
        // so rewrite until a fixpoint. Trees here are tiny. The fixpoint test
        // must be bitwise on constants: with IEEE `==`, a NaN constant never
        // equals itself and the loop would not terminate.
        let mut current = node;
        loop {
            let next = rewrite(&current);
            if identical(&next, &current) {
                return current;
            }
            current = next;
        }
    }

    /// `simplify` followed by rounding every remaining constant to
    /// `digits` significant digits. Unresolved symbols stay symbolic. The
    /// operation is idempotent: rounding already-rounded constants is a no-op.
    pub fn evalf(&self, digits: u32) -> Expr {
        fn round_consts(expr: &Expr, digits: u32) -> Expr {
            match expr {
                Expr::Const(v) => Expr::Const(round_sig(*v, digits)),
                Expr::Var(s) => Expr::Var(*s),
                Expr::Add(a, b) => Expr::Add(
                    round_consts(a, digits).boxed(),
                    round_consts(b, digits).boxed(),
                ),
                Expr::Sub(a, b) => Expr::Sub(
                    round_consts(a, digits).boxed(),
                    round_consts(b, digits).boxed(),
                ),
                Expr::Mul(a, b) => Expr::Mul(
                    round_consts(a, digits).boxed(),
                    round_consts(b, digits).boxed(),
                ),
                Expr::Div(a, b) => Expr::Div(
                    round_consts(a, digits).boxed(),
                    round_consts(b, digits).boxed(),
                ),
                Expr::Neg(a) => Expr::Neg(round_consts(a, digits).boxed()),
            }
        }
        round_consts(&self.simplify(), digits)
    }

    /// Decomposes the expression as `intercept + slope * symbol`, provided it
    /// is linear in `symbol`. Returns `None` when the symbol appears
    /// nonlinearly (product of two occurrences, or in a denominator). The
    /// returned parts are not simplified.
    pub fn linear_in(&self, symbol: Symbol) -> Option<(Expr, Expr)> {
        match self {
            Expr::Const(v) => Some((Expr::Const(*v), Expr::Const(0.0))),
            Expr::Var(s) => {
                if *s == symbol {
                    Some((Expr::Const(0.0), Expr::Const(1.0)))
                } else {
                    Some((Expr::Var(*s), Expr::Const(0.0)))
                }
            }
            Expr::Add(a, b) => {
                let (ia, sa) = a.linear_in(symbol)?;
                let (ib, sb) = b.linear_in(symbol)?;
                Some((ia + ib, sa + sb))
            }
            Expr::Sub(a, b) => {
                let (ia, sa) = a.linear_in(symbol)?;
                let (ib, sb) = b.linear_in(symbol)?;
                Some((ia - ib, sa - sb))
            }
            Expr::Mul(a, b) => {
                let in_a = a.contains(symbol);
                let in_b = b.contains(symbol);
                match (in_a, in_b) {
                    (false, false) => Some((self.clone(), Expr::Const(0.0))),
                    (true, true) => None,
                    (true, false) => {
                        let (ia, sa) = a.linear_in(symbol)?;
                        Some((ia * (**b).clone(), sa * (**b).clone()))
                    }
                    (false, true) => {
                        let (ib, sb) = b.linear_in(symbol)?;
                        Some(((**a).clone() * ib, (**a).clone() * sb))
                    }
                }
            }
            Expr::Div(a, b) => {
                if b.contains(symbol) {
                    return None;
                }
                let (ia, sa) = a.linear_in(symbol)?;
                Some((ia / (**b).clone(), sa / (**b).clone()))
            }
            Expr::Neg(a) => {
                let (ia, sa) = a.linear_in(symbol)?;
                Some((-ia, -sa))
            }
        }
    }

    /// Deterministic LaTeX rendering. Identical trees always produce identical
    /// strings; there is no canonical term reordering.
    pub fn latex(&self) -> String {
        render(self)
    }
}

/// Operator precedence for parenthesization. Fractions render as `\frac` and
/// never need parentheses around their arguments.
fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Add(_, _) | Expr::Sub(_, _) => 1,
        Expr::Neg(_) => 2,
        Expr::Mul(_, _) => 3,
        Expr::Const(_) | Expr::Var(_) | Expr::Div(_, _) => 4,
    }
}

fn render_wrapped(expr: &Expr, min_prec: u8) -> String {
    let body = render(expr);
    if precedence(expr) < min_prec {
        format!("\\left({}\\right)", body)
    } else {
        body
    }
}

fn render(expr: &Expr) -> String {
    match expr {
        Expr::Const(v) => fmt_num(*v),
        Expr::Var(s) => s.latex().to_string(),
        // `x + -2 i` reads as `x - 2 i`, and `x - -2 i` as `x + 2 i`.
        Expr::Add(a, b) => match negated_term(b) {
            Some(positive) => format!("{} - {}", render(a), render_wrapped(&positive, 2)),
            None => format!("{} + {}", render(a), render(b)),
        },
        Expr::Sub(a, b) => match negated_term(b) {
            Some(positive) => format!("{} + {}", render(a), render_wrapped(&positive, 2)),
            None => format!("{} - {}", render(a), render_wrapped(b, 2)),
        },
        Expr::Mul(a, b) => format!(
            "{} {}",
            render_wrapped(a, 3),
            render_wrapped(b, 3)
        ),
        Expr::Div(a, b) => format!("\\frac{{{}}}{{{}}}", render(a), render(b)),
        Expr::Neg(a) => format!("-{}", render_wrapped(a, 3)),
    }
}

/// Formats a float the way the derivation display expects: integral values
/// without a trailing `.0`, everything else via the shortest round-trip form.
fn fmt_num(v: f64) -> String {
    format!("{}", v)
}

/// If `expr` is a term with a negative sign out front (a negative constant, a
/// negation, or a product led by a negative constant), returns the term with
/// the sign stripped so the caller can render it behind `-` instead of `+`.
fn negated_term(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::Const(v) if *v < 0.0 => Some(Expr::Const(-v)),
        Expr::Neg(inner) => Some((**inner).clone()),
        Expr::Mul(a, b) => match &**a {
            Expr::Const(v) if *v == -1.0 => Some((**b).clone()),
            Expr::Const(v) if *v < 0.0 => {
                Some(Expr::Mul(Box::new(Expr::Const(-v)), b.clone()))
            }
            _ => None,
        },
        _ => None,
    }
}

/// Rounds to `digits` significant digits. Zero and non-finite values pass
/// through unchanged.
pub fn round_sig(v: f64, digits: u32) -> f64 {
    if v == 0.0 || !v.is_finite() {
        return v;
    }
    let magnitude = v.abs().log10().floor() as i32;
    let factor = 10f64.powi(digits as i32 - 1 - magnitude);
    (v * factor).round() / factor
}

/// Structural equality with bitwise comparison of constants, so NaN nodes
/// compare equal to themselves. Used for the rewrite fixpoint test, where the
/// derived `PartialEq` (IEEE semantics) would loop forever on a NaN.
fn identical(a: &Expr, b: &Expr) -> bool {
    match (a, b) {
        (Expr::Const(x), Expr::Const(y)) => x.to_bits() == y.to_bits(),
        (Expr::Var(x), Expr::Var(y)) => x == y,
        (Expr::Add(a1, b1), Expr::Add(a2, b2))
        | (Expr::Sub(a1, b1), Expr::Sub(a2, b2))
        | (Expr::Mul(a1, b1), Expr::Mul(a2, b2))
        | (Expr::Div(a1, b1), Expr::Div(a2, b2)) => identical(a1, a2) && identical(b1, b2),
        (Expr::Neg(x), Expr::Neg(y)) => identical(x, y),
        _ => false,
    }
}

fn rewrite(expr: &Expr) -> Expr {
    match expr {
        Expr::Add(a, b) => match (&**a, &**b) {
            (Expr::Const(x), Expr::Const(y)) => Expr::Const(x + y),
            (Expr::Const(z), _) if *z == 0.0 => (**b).clone(),
            (_, Expr::Const(z)) if *z == 0.0 => (**a).clone(),
            (_, Expr::Neg(inner)) => Expr::Sub(a.clone(), inner.clone()),
            _ => expr.clone(),
        },
        Expr::Sub(a, b) => match (&**a, &**b) {
            (Expr::Const(x), Expr::Const(y)) => Expr::Const(x - y),
            (_, Expr::Const(z)) if *z == 0.0 => (**a).clone(),
            (Expr::Const(z), _) if *z == 0.0 => Expr::Neg(b.clone()),
            (_, Expr::Neg(inner)) => Expr::Add(a.clone(), inner.clone()),
            _ if a == b => Expr::Const(0.0),
            _ => expr.clone(),
        },
        Expr::Mul(a, b) => match (&**a, &**b) {
            (Expr::Const(x), Expr::Const(y)) => Expr::Const(x * y),
            (Expr::Const(z), _) if *z == 0.0 => Expr::Const(0.0),
            (_, Expr::Const(z)) if *z == 0.0 => Expr::Const(0.0),
            (Expr::Const(o), _) if *o == 1.0 => (**b).clone(),
            (_, Expr::Const(o)) if *o == 1.0 => (**a).clone(),
            (Expr::Const(m), _) if *m == -1.0 => Expr::Neg(b.clone()),
            (_, Expr::Const(m)) if *m == -1.0 => Expr::Neg(a.clone()),
            _ => expr.clone(),
        },
        Expr::Div(a, b) => match (&**a, &**b) {
            // Keep a written division by zero visible rather than folding
            // it into an infinity.
            (_, Expr::Const(z)) if *z == 0.0 => expr.clone(),
            (Expr::Const(x), Expr::Const(y)) => Expr::Const(x / y),
            (Expr::Const(z), _) if *z == 0.0 => Expr::Const(0.0),
            (_, Expr::Const(o)) if *o == 1.0 => (**a).clone(),
            (_, Expr::Const(m)) if *m == -1.0 => Expr::Neg(a.clone()),
            _ => expr.clone(),
        },
        Expr::Neg(a) => match &**a {
            Expr::Const(v) => Expr::Const(-v),
            Expr::Neg(inner) => (**inner).clone(),
            Expr::Sub(x, y) => Expr::Sub(y.clone(), x.clone()),
            _ => expr.clone(),
        },
        _ => expr.clone(),
    }
}

impl std::ops::Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Expr;
    fn div(self, rhs: Expr) -> Expr {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::Neg(self.boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::{num, round_sig, var, Expr};
    use crate::symbol::Symbol;

    #[test]
    fn constant_folding_collapses_numeric_subtrees() {
        let e = (num(2.0) + num(3.0)) * var(Symbol::Output);
        assert_eq!(e.simplify(), num(5.0) * var(Symbol::Output));
    }

    #[test]
    fn identities_prune_trivial_nodes() {
        let y = var(Symbol::Output);
        assert_eq!((y.clone() + num(0.0)).simplify(), y.clone());
        assert_eq!((num(1.0) * y.clone()).simplify(), y.clone());
        assert_eq!((y.clone() / num(1.0)).simplify(), y.clone());
        assert_eq!((y.clone() * num(0.0)).simplify(), num(0.0));
        assert_eq!((-(-y.clone())).simplify(), y.clone());
        assert_eq!((y.clone() - y).simplify(), num(0.0));
    }

    #[test]
    fn division_by_negative_one_flips_sign_and_reads_cleanly() {
        // (-i - 400) / -1 should come out as 400 + i, the way a reader
        // would write the solved LM relation.
        let i = var(Symbol::InterestRate);
        let e = (-i.clone() - num(400.0)) / num(-1.0);
        assert_eq!(e.simplify(), num(400.0) + i);
    }

    #[test]
    fn simplify_terminates_on_nan_constants() {
        // IEEE equality never holds for NaN, so the fixpoint test must not
        // rely on it; these calls would previously spin forever.
        let e = num(f64::NAN) * var(Symbol::Output) + num(400.0);
        let simplified = e.simplify();
        assert!(simplified.latex().contains("NaN"));
        let folded = (num(f64::NAN) - num(1.0)).simplify();
        assert!(folded.as_const().unwrap().is_nan());
    }

    #[test]
    fn division_by_literal_zero_is_preserved() {
        let e = var(Symbol::Output) / num(0.0);
        assert_eq!(e.simplify(), var(Symbol::Output) / num(0.0));
    }

    #[test]
    fn substitution_replaces_every_occurrence() {
        let e = var(Symbol::Output) + var(Symbol::Output) * var(Symbol::Mpc);
        let r = e.subs(Symbol::Output, &num(10.0)).simplify();
        assert_eq!(r, num(10.0) + num(10.0) * var(Symbol::Mpc));
    }

    #[test]
    fn round_sig_matches_three_digit_display() {
        assert_eq!(round_sig(629.4117, 3), 629.0);
        assert_eq!(round_sig(1029.41, 3), 1030.0);
        assert_eq!(round_sig(0.36, 3), 0.36);
        assert_eq!(round_sig(0.0, 3), 0.0);
        assert_eq!(round_sig(-2.7777, 3), -2.78);
    }

    #[test]
    fn evalf_is_idempotent() {
        let e = (num(1000.0) - var(Symbol::InterestRate)) / num(0.36);
        let once = e.evalf(3);
        let twice = once.evalf(3);
        assert_eq!(once.latex(), twice.latex());
    }

    #[test]
    fn linear_decomposition_of_money_demand() {
        // k*Y - h*i, linear in Y with slope k.
        let e = var(Symbol::IncomeSensitivity) * var(Symbol::Output)
            - var(Symbol::InterestSensitivity) * var(Symbol::InterestRate);
        let (intercept, slope) = e.linear_in(Symbol::Output).unwrap();
        assert_eq!(
            slope.simplify(),
            var(Symbol::IncomeSensitivity)
        );
        assert_eq!(
            intercept.simplify(),
            -(var(Symbol::InterestSensitivity) * var(Symbol::InterestRate))
        );
    }

    #[test]
    fn quadratic_terms_are_rejected() {
        let y = var(Symbol::Output);
        assert!((y.clone() * y.clone()).linear_in(Symbol::Output).is_none());
        let denom = num(1.0) / var(Symbol::Output);
        assert!(denom.linear_in(Symbol::Output).is_none());
    }

    #[test]
    fn latex_rendering_is_deterministic_and_parenthesized() {
        let e = (var(Symbol::AutonomousSpending)
            - var(Symbol::InvestmentSensitivity) * var(Symbol::InterestRate))
            / (num(1.0) - var(Symbol::Mpc) * (num(1.0) - var(Symbol::TaxRate)));
        let first = e.latex();
        assert_eq!(first, e.latex());
        assert_eq!(first, "\\frac{A - b i}{1 - c \\left(1 - t\\right)}");
    }

    #[test]
    fn integral_constants_render_without_decimal_point() {
        assert_eq!(num(400.0).latex(), "400");
        assert_eq!(num(0.36).latex(), "0.36");
    }

    #[test]
    fn negative_leading_coefficients_render_as_signed_terms() {
        // A shifted parameter can flip a coefficient's sign; the term then
        // renders behind the opposite operator instead of `+ -2 i`.
        let i = var(Symbol::InterestRate);
        assert_eq!(
            (num(400.0) + num(-2.0) * i.clone()).latex(),
            "400 - 2 i"
        );
        assert_eq!(
            (var(Symbol::Output) - num(-2.0) * i.clone()).latex(),
            "Y + 2 i"
        );
        assert_eq!((num(400.0) + num(-1.0) * i.clone()).latex(), "400 - i");
        assert_eq!((num(400.0) + num(-2.0)).latex(), "400 - 2");
        assert_eq!((num(400.0) - -i).latex(), "400 + i");
    }
}
