//! Comparative statics: the same derivation re-run under perturbed
//! parameters. The baseline and shifted chains are built independently, so
//! computing a shift can never disturb the original.

use crate::equation::SolveError;
use crate::model::{exercise, DerivationChain};
use crate::params::{Deltas, Parameters};
use serde::{Deserialize, Serialize};

/// A baseline derivation together with its post-perturbation counterpart.
/// The two chains are structurally identical; only the numeric inputs differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub baseline: DerivationChain,
    pub shifted: DerivationChain,
}

/// Derives the chain for `params + deltas`.
pub fn shifted_chain(params: &Parameters, deltas: &Deltas) -> Result<DerivationChain, SolveError> {
    exercise(&params.shifted(deltas))
}

/// Runs the builder twice, once per parameter vector.
pub fn run(params: &Parameters, deltas: &Deltas) -> Result<Scenario, SolveError> {
    Ok(Scenario {
        baseline: exercise(params)?,
        shifted: shifted_chain(params, deltas)?,
    })
}
