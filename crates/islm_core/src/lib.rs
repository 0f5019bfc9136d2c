//! The `islm_core` crate is the computational engine for IS-LM equilibrium
//! analysis. It derives the goods-market (IS) and money-market (LM) relations
//! symbolically, solves them for the equilibrium output and interest rate, and
//! independently cross-checks the result numerically for plotting.
//!
//! Key components:
//! - **Symbols & Expressions**: a closed, compile-time symbol set and a small
//!   immutable expression tree with substitution, simplification, and
//!   deterministic LaTeX rendering.
//! - **Equations**: the `lhs = rhs` abstraction with linear solving for a
//!   chosen unknown.
//! - **Model builder**: the fixed 8-step (symbolic) and 9-step (numeric)
//!   derivation chains, plus comparative statics over perturbed parameters.
//! - **Plot data**: the nalgebra-backed 2x2 equilibrium solve and the three
//!   diagnostic chart datasets.
pub mod comparative;
pub mod equation;
pub mod export;
pub mod expr;
pub mod model;
pub mod params;
pub mod plot;
pub mod symbol;

pub use equation::{Equation, SolveError};
pub use expr::Expr;
pub use model::DerivationChain;
pub use params::{validate, Deltas, Parameters, Validation};
pub use plot::{EquilibriumPoint, EquilibriumSummary, PlotData, SingularMatrixError};
pub use symbol::Symbol;
