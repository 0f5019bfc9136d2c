//! Structural parameters of the model, their comparative-statics
//! perturbations, and the range validator.

use serde::{Deserialize, Serialize};

/// The 13 structural coefficients of the IS-LM model, in textbook notation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// M, nominal money supply.
    pub m: f64,
    /// P, price level.
    pub p: f64,
    /// k, income sensitivity of money demand.
    pub k: f64,
    /// h, interest sensitivity of money demand.
    pub h: f64,
    /// c, marginal propensity to consume.
    pub c: f64,
    /// t, proportional tax rate.
    pub t: f64,
    /// b, interest sensitivity of investment.
    pub b: f64,
    /// Ca, autonomous consumption.
    pub ca: f64,
    /// Ta, autonomous taxes.
    pub ta: f64,
    /// Ia, autonomous investment.
    pub ia: f64,
    /// Tr, government transfers.
    pub tr: f64,
    /// G, government spending.
    pub g: f64,
    /// NX, net exports.
    pub nx: f64,
}

/// Additive perturbations, one per parameter. All zero by default.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Deltas {
    pub m: f64,
    pub p: f64,
    pub k: f64,
    pub h: f64,
    pub c: f64,
    pub t: f64,
    pub b: f64,
    pub ca: f64,
    pub ta: f64,
    pub ia: f64,
    pub tr: f64,
    pub g: f64,
    pub nx: f64,
}

impl Default for Parameters {
    /// The textbook baseline scenario: M = 400, G = 1000, c = 0.8, t = 0.2,
    /// unit sensitivities, everything else zero.
    fn default() -> Self {
        Self {
            m: 400.0,
            p: 1.0,
            k: 1.0,
            h: 1.0,
            c: 0.8,
            t: 0.2,
            b: 1.0,
            ca: 0.0,
            ta: 0.0,
            ia: 0.0,
            tr: 0.0,
            g: 1000.0,
            nx: 0.0,
        }
    }
}

impl Parameters {
    /// The parameter vector with `deltas` applied additively. The receiver is
    /// untouched; baseline and shifted scenarios are always independent.
    pub fn shifted(&self, deltas: &Deltas) -> Parameters {
        Parameters {
            m: self.m + deltas.m,
            p: self.p + deltas.p,
            k: self.k + deltas.k,
            h: self.h + deltas.h,
            c: self.c + deltas.c,
            t: self.t + deltas.t,
            b: self.b + deltas.b,
            ca: self.ca + deltas.ca,
            ta: self.ta + deltas.ta,
            ia: self.ia + deltas.ia,
            tr: self.tr + deltas.tr,
            g: self.g + deltas.g,
            nx: self.nx + deltas.nx,
        }
    }

    /// Real money supply M/P.
    pub fn real_money_supply(&self) -> f64 {
        self.m / self.p
    }

    /// Autonomous spending A = Ca + Ia + G + NX + c*(Tr - Ta).
    pub fn autonomous_spending(&self) -> f64 {
        self.ca + self.ia + self.g + self.nx + self.c * (self.tr - self.ta)
    }

    /// The IS denominator 1 - c*(1 - t), the reciprocal of the fiscal
    /// multiplier.
    pub fn multiplier_denominator(&self) -> f64 {
        1.0 - self.c * (1.0 - self.t)
    }
}

impl Deltas {
    /// True when every perturbation is exactly zero.
    pub fn is_zero(&self) -> bool {
        self == &Deltas::default()
    }

    /// True when any goods-market (IS-side) coefficient is perturbed.
    pub fn shifts_is(&self) -> bool {
        [
            self.c, self.t, self.b, self.ca, self.ta, self.ia, self.tr, self.g, self.nx,
        ]
        .iter()
        .any(|d| *d != 0.0)
    }

    /// True when any money-market (LM-side) coefficient is perturbed.
    pub fn shifts_lm(&self) -> bool {
        [self.m, self.p, self.k, self.h].iter().any(|d| *d != 0.0)
    }
}

/// Outcome of parameter validation. Errors flag inputs the derivation cannot
/// handle meaningfully; warnings flag economically degenerate but computable
/// regimes. Validation never blocks computation: callers inspect the report
/// and decide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Threshold under which the fiscal multiplier is reported as near-infinite.
const MULTIPLIER_DENOMINATOR_EPS: f64 = 0.001;

/// Checks the parameter vector against the model's admissible ranges.
pub fn validate(params: &Parameters) -> Validation {
    let mut report = Validation::default();

    let all = [
        params.m, params.p, params.k, params.h, params.c, params.t, params.b, params.ca,
        params.ta, params.ia, params.tr, params.g, params.nx,
    ];
    if all.iter().any(|v| !v.is_finite()) {
        report
            .errors
            .push("All parameters must be finite numbers.".to_string());
    }

    if params.p == 0.0 {
        report
            .errors
            .push("The price level (P) must not be zero.".to_string());
    }
    if params.k == 0.0 {
        report
            .errors
            .push("The income sensitivity of money demand (k) must not be zero.".to_string());
    }
    if params.h == 0.0 {
        report.warnings.push(
            "Interest sensitivity (h) = 0: the LM curve is vertical (classical liquidity trap)."
                .to_string(),
        );
    }

    if !(0.0..=1.0).contains(&params.c) {
        report.errors.push(format!(
            "The marginal propensity to consume (c = {}) must lie between 0 and 1.",
            params.c
        ));
    }
    if !(0.0..=1.0).contains(&params.t) {
        report.errors.push(format!(
            "The tax rate (t = {}) must lie between 0 and 1.",
            params.t
        ));
    }

    if params.multiplier_denominator().abs() < MULTIPLIER_DENOMINATOR_EPS {
        report.warnings.push(
            "The fiscal multiplier is near-infinite: |1 - c(1 - t)| < 0.001.".to_string(),
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::{validate, Deltas, Parameters};

    #[test]
    fn shifted_applies_every_delta_and_preserves_the_original() {
        let base = Parameters::default();
        let deltas = Deltas {
            m: 100.0,
            g: -200.0,
            c: 0.05,
            ..Deltas::default()
        };
        let shifted = base.shifted(&deltas);
        assert_eq!(shifted.m, 500.0);
        assert_eq!(shifted.g, 800.0);
        assert_eq!(shifted.c, 0.85);
        assert_eq!(shifted.t, base.t);
        assert_eq!(base, Parameters::default());
    }

    #[test]
    fn derived_quantities_match_the_baseline_scenario() {
        let p = Parameters::default();
        assert_eq!(p.real_money_supply(), 400.0);
        assert_eq!(p.autonomous_spending(), 1000.0);
        assert!((p.multiplier_denominator() - 0.36).abs() < 1e-12);
    }

    #[test]
    fn zero_price_level_is_exactly_one_error() {
        let params = Parameters {
            p: 0.0,
            ..Parameters::default()
        };
        let report = validate(&params);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("price level"));
        assert!(!report.is_ok());
    }

    #[test]
    fn vertical_lm_is_a_warning_not_an_error() {
        let params = Parameters {
            h: 0.0,
            ..Parameters::default()
        };
        let report = validate(&params);
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("liquidity trap"));
        assert!(report.is_ok());
    }

    #[test]
    fn out_of_range_propensities_are_errors() {
        let params = Parameters {
            c: 1.5,
            t: -0.1,
            ..Parameters::default()
        };
        let report = validate(&params);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].contains("propensity to consume"));
        assert!(report.errors[1].contains("tax rate"));
    }

    #[test]
    fn near_singular_multiplier_is_warned() {
        // c = 1, t = 0 gives a denominator of exactly zero.
        let params = Parameters {
            c: 1.0,
            t: 0.0,
            ..Parameters::default()
        };
        let report = validate(&params);
        assert!(report.errors.is_empty());
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("fiscal multiplier")));
    }

    #[test]
    fn non_finite_parameters_are_errors() {
        let params = Parameters {
            k: f64::NAN,
            ..Parameters::default()
        };
        let report = validate(&params);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("finite"));

        let params = Parameters {
            m: f64::INFINITY,
            ..Parameters::default()
        };
        assert!(!validate(&params).is_ok());
    }

    #[test]
    fn delta_side_classification() {
        assert!(Deltas::default().is_zero());
        let fiscal = Deltas {
            g: 50.0,
            ..Deltas::default()
        };
        assert!(fiscal.shifts_is() && !fiscal.shifts_lm());
        let monetary = Deltas {
            m: 50.0,
            ..Deltas::default()
        };
        assert!(monetary.shifts_lm() && !monetary.shifts_is());
    }
}
