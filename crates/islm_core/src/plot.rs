//! Numeric equilibrium solver and chart-data generation.
//!
//! This is the non-symbolic path: the equilibrium is found by inverting the
//! 2x2 coefficient matrix of the LM and IS relations, and the three diagnostic
//! charts (IS-LM joint plot, goods-market 45-degree diagram, money-market
//! diagram) are sampled directly from the parameter vector. It must agree with
//! the symbolic chain up to floating-point tolerance, but never depends on it.

use crate::params::{Deltas, Parameters};
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The LM/IS coefficient matrix has no inverse: the two curves are parallel
/// (or one is degenerate) and no equilibrium exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("the IS-LM coefficient matrix is singular: no equilibrium exists")]
pub struct SingularMatrixError;

/// Number of samples per plotted curve.
const SAMPLES: usize = 50;

/// Upper end of the interest-rate sampling range for the joint IS-LM plot.
const INTEREST_RANGE_MAX: f64 = 10_000.0;

/// An equilibrium (Y*, i*).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumPoint {
    pub output: f64,
    pub interest_rate: f64,
}

/// The shifted equilibrium, with an explicit flag recording whether the
/// shifted system was singular and the baseline equilibrium was reused.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftedEquilibrium {
    pub point: EquilibriumPoint,
    pub fell_back: bool,
}

/// One sampled curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// A labelled point of interest (an equilibrium) on a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub series: Vec<Series>,
    pub markers: Vec<Marker>,
}

/// The three diagnostic charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    pub is_lm: Chart,
    pub goods_market: Chart,
    pub money_market: Chart,
}

/// Post-shift equilibrium values and their distances from the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftSummary {
    pub output: f64,
    pub interest_rate: f64,
    pub delta_output: f64,
    pub delta_interest_rate: f64,
    /// True when the shifted system was singular and these values are the
    /// baseline equilibrium reported in degraded mode.
    pub fell_back: bool,
}

/// Headline equilibrium record: baseline Y*, i*, autonomous spending, real
/// money supply, and the shifted values when any delta is non-zero. Values are
/// rounded for reporting (output and spending to 2 decimals, rates to 4).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumSummary {
    pub output: f64,
    pub interest_rate: f64,
    pub autonomous_spending: f64,
    pub real_money_supply: f64,
    pub shifted: Option<ShiftSummary>,
}

/// Everything the plotting front end needs for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    pub charts: ChartSet,
    pub summary: EquilibriumSummary,
}

/// Solves the 2x2 system
/// `[[k, -h], [1 - c(1-t), b]] * [Y, i]^T = [M/P, A]^T`
/// for the baseline equilibrium.
pub fn solve_equilibrium(params: &Parameters) -> Result<EquilibriumPoint, SingularMatrixError> {
    let coefficients = Matrix2::new(
        params.k,
        -params.h,
        params.multiplier_denominator(),
        params.b,
    );
    let rhs = Vector2::new(params.real_money_supply(), params.autonomous_spending());
    let solution = coefficients.lu().solve(&rhs).ok_or(SingularMatrixError)?;
    Ok(EquilibriumPoint {
        output: solution[0],
        interest_rate: solution[1],
    })
}

/// Solves the shifted system. A singular baseline is fatal; a singular shifted
/// system degrades to the baseline equilibrium with `fell_back` set, so the
/// caller can always tell the fallback apart from a genuine solution.
pub fn shifted_equilibrium(
    params: &Parameters,
    deltas: &Deltas,
) -> Result<ShiftedEquilibrium, SingularMatrixError> {
    let baseline = solve_equilibrium(params)?;
    Ok(shift_from(baseline, params, deltas))
}

fn shift_from(baseline: EquilibriumPoint, params: &Parameters, deltas: &Deltas) -> ShiftedEquilibrium {
    match solve_equilibrium(&params.shifted(deltas)) {
        Ok(point) => ShiftedEquilibrium {
            point,
            fell_back: false,
        },
        Err(SingularMatrixError) => ShiftedEquilibrium {
            point: baseline,
            fell_back: true,
        },
    }
}

/// Builds the three chart datasets and the equilibrium summary for one
/// scenario. Fails only if the baseline system is singular.
pub fn generate(params: &Parameters, deltas: &Deltas) -> Result<PlotData, SingularMatrixError> {
    let baseline = solve_equilibrium(params)?;
    let shifted = if deltas.is_zero() {
        None
    } else {
        Some(shift_from(baseline, params, deltas))
    };

    let charts = ChartSet {
        is_lm: is_lm_chart(params, deltas, baseline, shifted.as_ref()),
        goods_market: goods_market_chart(params, baseline),
        money_market: money_market_chart(params, baseline),
    };

    let summary = EquilibriumSummary {
        output: round2(baseline.output),
        interest_rate: round4(baseline.interest_rate),
        autonomous_spending: round2(params.autonomous_spending()),
        real_money_supply: round2(params.real_money_supply()),
        shifted: shifted.map(|s| ShiftSummary {
            output: round2(s.point.output),
            interest_rate: round4(s.point.interest_rate),
            delta_output: round2(s.point.output - baseline.output),
            delta_interest_rate: round4(s.point.interest_rate - baseline.interest_rate),
            fell_back: s.fell_back,
        }),
    };

    Ok(PlotData { charts, summary })
}

fn is_lm_chart(
    params: &Parameters,
    deltas: &Deltas,
    baseline: EquilibriumPoint,
    shifted: Option<&ShiftedEquilibrium>,
) -> Chart {
    let rates = linspace(0.0, INTEREST_RANGE_MAX, SAMPLES);
    let lm: Vec<f64> = rates.iter().map(|&i| lm_output(params, i)).collect();
    let is: Vec<f64> = rates.iter().map(|&i| is_output(params, i)).collect();

    let mut series = vec![
        Series {
            label: "LM".to_string(),
            x: rates.clone(),
            y: lm.clone(),
        },
        Series {
            label: "IS".to_string(),
            x: rates.clone(),
            y: is.clone(),
        },
    ];
    let mut markers = vec![Marker {
        label: "E1".to_string(),
        x: baseline.interest_rate,
        y: baseline.output,
    }];

    if let Some(shift) = shifted {
        let next = params.shifted(deltas);
        if deltas.shifts_is() {
            // A zero post-shift denominator leaves the shifted IS curve at
            // its baseline trace rather than plotting infinities.
            let y = if next.multiplier_denominator() != 0.0 {
                rates.iter().map(|&i| is_output(&next, i)).collect()
            } else {
                is.clone()
            };
            series.push(Series {
                label: "IS (shifted)".to_string(),
                x: rates.clone(),
                y,
            });
        }
        if deltas.shifts_lm() {
            let y = if next.k != 0.0 && next.p != 0.0 {
                rates.iter().map(|&i| lm_output(&next, i)).collect()
            } else {
                lm.clone()
            };
            series.push(Series {
                label: "LM (shifted)".to_string(),
                x: rates.clone(),
                y,
            });
        }
        markers.push(Marker {
            label: "E2".to_string(),
            x: shift.point.interest_rate,
            y: shift.point.output,
        });
    }

    Chart {
        title: "IS-LM equilibrium".to_string(),
        series,
        markers,
    }
}

fn goods_market_chart(params: &Parameters, baseline: EquilibriumPoint) -> Chart {
    let outputs = linspace(0.0, baseline.output * 1.3, SAMPLES);
    let autonomous = params.autonomous_spending();
    let induced = params.c * (1.0 - params.t);
    let demand: Vec<f64> = outputs
        .iter()
        .map(|&y| autonomous + induced * y - params.b * baseline.interest_rate)
        .collect();

    Chart {
        title: "Goods market (IS construction)".to_string(),
        series: vec![
            Series {
                label: "Aggregate demand".to_string(),
                x: outputs.clone(),
                y: demand,
            },
            Series {
                label: "45-degree line".to_string(),
                x: outputs.clone(),
                y: outputs,
            },
        ],
        markers: vec![Marker {
            label: "Y*".to_string(),
            x: baseline.output,
            y: baseline.output,
        }],
    }
}

fn money_market_chart(params: &Parameters, baseline: EquilibriumPoint) -> Chart {
    let money_supply = params.real_money_supply();
    // With h = 0 money demand is vertical in this diagram; sample a short
    // default range instead of dividing by zero.
    let rate_max = if params.h != 0.0 {
        baseline.output * params.k / params.h + 100.0
    } else {
        100.0
    };
    let rates = linspace(0.0, rate_max, SAMPLES);
    let demand: Vec<f64> = rates
        .iter()
        .map(|&i| params.k * baseline.output - params.h * i)
        .collect();
    let supply = vec![money_supply; SAMPLES];

    Chart {
        title: "Money market (LM construction)".to_string(),
        series: vec![
            Series {
                label: "Money demand".to_string(),
                x: demand,
                y: rates.clone(),
            },
            Series {
                label: "Real money supply".to_string(),
                x: supply,
                y: rates,
            },
        ],
        markers: vec![Marker {
            label: "i*".to_string(),
            x: money_supply,
            y: baseline.interest_rate,
        }],
    }
}

/// LM curve: Y as a function of the interest rate.
fn lm_output(params: &Parameters, rate: f64) -> f64 {
    params.real_money_supply() / params.k + params.h * rate / params.k
}

/// IS curve: Y as a function of the interest rate.
fn is_output(params: &Parameters, rate: f64) -> f64 {
    (params.autonomous_spending() - params.b * rate) / params.multiplier_denominator()
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|idx| start + step * idx as f64).collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}
