//! The model equation builder: assembles the IS and LM relations and derives
//! the closed-form equilibrium, keeping every intermediate step for display.

use crate::equation::{Equation, SolveError};
use crate::expr::{num, var, Expr};
use crate::params::Parameters;
use crate::symbol::Symbol::*;
use serde::{Deserialize, Serialize};

/// Significant digits applied to each displayed step of a numeric exercise,
/// matching the three-digit convention of the reference derivations.
pub const EXERCISE_DIGITS: u32 = 3;

/// The ordered sequence of equations produced by one full solve. Later steps
/// are built by substituting earlier ones, so the order is part of the
/// contract: the solved interest rate is always the second-to-last entry and
/// the solved output the last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivationChain {
    steps: Vec<Equation>,
}

impl DerivationChain {
    fn new(steps: Vec<Equation>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Equation] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The equilibrium interest rate equation, `i = <closed form>`.
    pub fn solved_interest_rate(&self) -> &Equation {
        &self.steps[self.steps.len() - 2]
    }

    /// The equilibrium output equation, `Y = <closed form>`.
    pub fn solved_output(&self) -> &Equation {
        &self.steps[self.steps.len() - 1]
    }

    /// One typeset string per step, in derivation order.
    pub fn latex_lines(&self) -> Vec<String> {
        self.steps.iter().map(Equation::latex).collect()
    }
}

/// Builds the fully symbolic 8-step derivation: money demand, real money
/// supply, the LM reduced form, autonomous spending, the IS reduced form, the
/// IS-LM equality, and the solved interest rate and output.
pub fn general_procedure() -> Result<DerivationChain, SolveError> {
    let money_demand = Equation::new(
        var(MoneyDemand),
        var(IncomeSensitivity) * var(Output) - var(InterestSensitivity) * var(InterestRate),
    );
    let money_supply = Equation::new(var(MoneyDemand), var(MoneySupply) / var(PriceLevel));
    let lm = Equation::new(money_supply.rhs.clone(), money_demand.rhs.clone())
        .solve_for(Output, Output)?;

    let autonomous = Equation::new(
        var(AutonomousSpending),
        var(AutonomousConsumption)
            + var(AutonomousInvestment)
            + var(Spending)
            + var(NetExports)
            + var(Mpc) * (var(Transfers) - var(AutonomousTax)),
    );
    let is = Equation::new(
        var(Output),
        (autonomous.lhs.clone() - var(InvestmentSensitivity) * var(InterestRate))
            / (num(1.0) - var(Mpc) * (num(1.0) - var(TaxRate))),
    );

    let cross = Equation::new(lm.rhs.clone(), is.rhs.clone());
    let interest = cross.solve_for(InterestRate, InterestRate)?;
    let output = Equation::new(var(Output), is.subs(InterestRate, &interest.rhs).rhs);

    Ok(DerivationChain::new(vec![
        money_demand,
        money_supply,
        lm,
        autonomous,
        is,
        cross,
        interest,
        output,
    ]))
}

/// Builds the 9-step numeric derivation for one concrete parameter vector.
/// Identical to [`general_procedure`] except that coefficients are numbers,
/// each displayed step is rounded to [`EXERCISE_DIGITS`] significant digits,
/// and the chain keeps the intermediate money-market equality before the LM
/// reduced form.
pub fn exercise(params: &Parameters) -> Result<DerivationChain, SolveError> {
    let money_demand = Equation::new(
        var(MoneyDemand),
        num(params.k) * var(Output) - num(params.h) * var(InterestRate),
    )
    .evalf(EXERCISE_DIGITS);
    let money_supply = Equation::new(
        var(MoneySupply) / var(PriceLevel),
        num(params.m / params.p),
    )
    .evalf(EXERCISE_DIGITS);
    let money_market = Equation::new(money_demand.rhs.clone(), money_supply.rhs.clone())
        .evalf(EXERCISE_DIGITS);
    let lm = Equation::new(money_supply.rhs.clone(), money_demand.rhs.clone())
        .solve_for(Output, Output)?
        .evalf(EXERCISE_DIGITS);

    let autonomous = Equation::new(
        var(AutonomousSpending),
        num(params.ca)
            + num(params.ia)
            + num(params.g)
            + num(params.nx)
            + num(params.c) * (num(params.tr) - num(params.ta)),
    )
    .evalf(EXERCISE_DIGITS);
    let is = Equation::new(
        var(Output),
        (autonomous.rhs.clone() - num(params.b) * var(InterestRate))
            / (num(1.0) - num(params.c) * (num(1.0) - num(params.t))),
    )
    .evalf(EXERCISE_DIGITS);

    let cross = Equation::new(lm.rhs.clone(), is.rhs.clone());
    let interest = cross
        .solve_for(InterestRate, InterestRate)?
        .evalf(EXERCISE_DIGITS);
    let output = Equation::new(var(Output), is.subs(InterestRate, &interest.rhs).rhs)
        .evalf(EXERCISE_DIGITS);

    Ok(DerivationChain::new(vec![
        money_demand,
        money_supply,
        money_market,
        lm,
        autonomous,
        is,
        cross,
        interest,
        output,
    ]))
}

/// The definitional equations of the model for one parameter vector: money
/// demand, the pinned policy parameters, the tax function, disposable income,
/// consumption, and investment. Display-only; nothing downstream consumes
/// these.
pub fn describe(params: &Parameters) -> Vec<Equation> {
    let eq = |lhs: Expr, rhs: Expr| Equation::new(lhs, rhs.simplify());

    let taxes = num(params.ta) + num(params.t) * var(Output);
    let disposable = var(Output) - taxes.clone() + num(params.tr);

    vec![
        eq(
            var(MoneyDemand),
            num(params.k) * var(Output) - num(params.h) * var(InterestRate),
        ),
        eq(var(MoneySupply), num(params.m)),
        eq(var(PriceLevel), num(params.p)),
        eq(var(Transfers), num(params.tr)),
        eq(var(Spending), num(params.g)),
        eq(var(NetExports), num(params.nx)),
        eq(var(Taxes), taxes.clone()),
        eq(var(DisposableIncome), disposable.clone()),
        eq(
            var(Consumption),
            num(params.ca) + num(params.c) * disposable,
        ),
        eq(
            var(Investment),
            num(params.ia) - num(params.b) * var(InterestRate),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{describe, exercise, general_procedure};
    use crate::params::Parameters;

    #[test]
    fn general_procedure_has_exactly_eight_steps() {
        let chain = general_procedure().unwrap();
        assert_eq!(chain.len(), 8);
        assert_eq!(chain.latex_lines().len(), 8);
    }

    #[test]
    fn general_lm_reduced_form_solves_for_output() {
        let chain = general_procedure().unwrap();
        assert_eq!(chain.steps()[0].latex(), "L = k Y - h i");
        assert_eq!(chain.steps()[1].latex(), "L = \\frac{M}{P}");
        assert_eq!(chain.steps()[2].latex(), "Y = \\frac{\\frac{M}{P} + h i}{k}");
        assert_eq!(
            chain.steps()[4].latex(),
            "Y = \\frac{A - b i}{1 - c \\left(1 - t\\right)}"
        );
    }

    #[test]
    fn general_procedure_is_deterministic() {
        let first = general_procedure().unwrap().latex_lines();
        let second = general_procedure().unwrap().latex_lines();
        assert_eq!(first, second);
    }

    #[test]
    fn exercise_has_exactly_nine_steps() {
        let chain = exercise(&Parameters::default()).unwrap();
        assert_eq!(chain.len(), 9);
    }

    #[test]
    fn baseline_exercise_reproduces_the_textbook_derivation() {
        let chain = exercise(&Parameters::default()).unwrap();
        let lines = chain.latex_lines();
        assert_eq!(lines[0], "L = Y - i");
        assert_eq!(lines[1], "\\frac{M}{P} = 400");
        assert_eq!(lines[2], "Y - i = 400");
        assert_eq!(lines[3], "Y = 400 + i");
        assert_eq!(lines[4], "A = 1000");
        assert_eq!(lines[5], "Y = \\frac{1000 - i}{0.36}");
        assert_eq!(lines[7], "i = 629");
        assert_eq!(lines[8], "Y = 1030");
    }

    #[test]
    fn solved_accessors_point_at_the_last_two_steps() {
        let chain = exercise(&Parameters::default()).unwrap();
        assert_eq!(chain.solved_interest_rate().latex(), "i = 629");
        assert_eq!(chain.solved_output().latex(), "Y = 1030");
    }

    #[test]
    fn vertical_lm_does_not_divide_by_zero() {
        // h = 0 makes the LM curve vertical; the reduced form is Y = (M/P)/k,
        // a constant, and the solve must still succeed.
        let params = Parameters {
            h: 0.0,
            ..Parameters::default()
        };
        let chain = exercise(&params).unwrap();
        assert_eq!(chain.steps()[3].latex(), "Y = 400");
    }

    #[test]
    fn near_singular_denominator_is_surfaced_as_written() {
        // c = 1, t = 0: the IS denominator is exactly zero. The builder still
        // produces the chain; the division is displayed, not folded away.
        let params = Parameters {
            c: 1.0,
            t: 0.0,
            ..Parameters::default()
        };
        let chain = exercise(&params).unwrap();
        assert_eq!(chain.steps()[5].latex(), "Y = \\frac{1000 - i}{0}");
    }

    #[test]
    fn nan_parameter_still_terminates() {
        // A NaN coefficient cannot derail the derivation into an endless
        // simplification loop; it propagates through the chain as a NaN
        // constant and the validator is what rejects it.
        let params = Parameters {
            k: f64::NAN,
            ..Parameters::default()
        };
        let chain = exercise(&params).unwrap();
        assert_eq!(chain.len(), 9);
        assert!(chain.solved_output().latex().contains("NaN"));
    }

    #[test]
    fn description_lists_the_ten_definitional_equations() {
        let eqs = describe(&Parameters::default());
        assert_eq!(eqs.len(), 10);
        assert_eq!(eqs[0].latex(), "L = Y - i");
        assert_eq!(eqs[6].latex(), "T = 0.2 Y");
        assert_eq!(eqs[9].latex(), "I = -i");
    }
}
