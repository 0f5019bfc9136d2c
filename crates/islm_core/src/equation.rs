//! The equation abstraction: an immutable `lhs = rhs` pair with substitution,
//! numeric evaluation, and linear solving for a chosen unknown.

use crate::expr::Expr;
use crate::symbol::Symbol;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SolveError {
    /// The target symbol is absent from the equation, or its coefficient
    /// cancels to zero, so no unique closed form exists.
    #[error("equation has no solution for {0}: the symbol is absent or its coefficient vanishes")]
    NoSolution(Symbol),
    /// The equation is nonlinear in the target symbol, so a single solution
    /// cannot be selected.
    #[error("equation is not linear in {0}: cannot select a unique solution")]
    AmbiguousSolution(Symbol),
}

/// One equality over the model's symbol set. Never mutated in place: every
/// operation returns a fresh `Equation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equation {
    pub lhs: Expr,
    pub rhs: Expr,
}

impl Equation {
    pub fn new(lhs: Expr, rhs: Expr) -> Self {
        Self { lhs, rhs }
    }

    /// Solves `lhs = rhs` for `target`, which must appear linearly, and
    /// returns `result = <closed form>`. Writing both sides as
    /// `a + b*target`, the solution is `(a_lhs - a_rhs) / (b_rhs - b_lhs)`.
    pub fn solve_for(&self, target: Symbol, result: Symbol) -> Result<Equation, SolveError> {
        let (lhs_intercept, lhs_slope) = self
            .lhs
            .linear_in(target)
            .ok_or(SolveError::AmbiguousSolution(target))?;
        let (rhs_intercept, rhs_slope) = self
            .rhs
            .linear_in(target)
            .ok_or(SolveError::AmbiguousSolution(target))?;

        let slope = (rhs_slope - lhs_slope).simplify();
        if slope.as_const() == Some(0.0) {
            return Err(SolveError::NoSolution(target));
        }

        let solution = ((lhs_intercept - rhs_intercept) / slope).simplify();
        Ok(Equation::new(Expr::Var(result), solution))
    }

    /// Replaces `symbol` with `replacement` on both sides.
    pub fn subs(&self, symbol: Symbol, replacement: &Expr) -> Equation {
        Equation::new(
            self.lhs.subs(symbol, replacement),
            self.rhs.subs(symbol, replacement),
        )
    }

    /// Replaces `symbol` with the right-hand side of `source` on both sides.
    pub fn subs_eq(&self, symbol: Symbol, source: &Equation) -> Equation {
        self.subs(symbol, &source.rhs)
    }

    /// Simplifies both sides and rounds every numeric subexpression to
    /// `digits` significant digits; remaining symbols stay symbolic.
    pub fn evalf(&self, digits: u32) -> Equation {
        Equation::new(self.lhs.evalf(digits), self.rhs.evalf(digits))
    }

    /// Typeset `lhs = rhs`. Deterministic for a fixed tree.
    pub fn latex(&self) -> String {
        format!("{} = {}", self.lhs.latex(), self.rhs.latex())
    }
}
