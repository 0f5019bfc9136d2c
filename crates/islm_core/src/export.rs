//! Tabular export of a scenario: single-row CSV records with a fixed column
//! order, consumable by spreadsheet tooling or test fixtures.

use crate::params::Parameters;
use crate::plot::EquilibriumSummary;

/// Column order of the parameter vector. Fixed by contract; consumers key on
/// position as well as name.
pub const PARAMETER_COLUMNS: [&str; 13] = [
    "Money Supply",
    "Price Level",
    "Income Sensitivity",
    "Interest Sensitivity",
    "MPC",
    "Tax Rate",
    "Investment Sensitivity",
    "Autonomous Consumption",
    "Autonomous Tax",
    "Autonomous Investment",
    "Transfers",
    "Government Spending",
    "Net Exports",
];

fn parameter_values(params: &Parameters) -> [f64; 13] {
    [
        params.m, params.p, params.k, params.h, params.c, params.t, params.b, params.ca,
        params.ta, params.ia, params.tr, params.g, params.nx,
    ]
}

fn csv_line<S: AsRef<str>>(fields: impl IntoIterator<Item = S>) -> String {
    fields
        .into_iter()
        .map(|f| f.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// One header line and one value line for the 13 parameters.
pub fn parameters_csv(params: &Parameters) -> String {
    let header = csv_line(PARAMETER_COLUMNS);
    let values = csv_line(parameter_values(params).iter().map(|v| v.to_string()));
    format!("{}\n{}\n", header, values)
}

/// Equilibrium record merged with the parameter vector, equilibrium columns
/// first. Shifted-equilibrium columns appear only when the summary carries a
/// shift.
pub fn results_csv(summary: &EquilibriumSummary, params: &Parameters) -> String {
    let mut header: Vec<String> = vec![
        "Y_equilibrium".to_string(),
        "i_equilibrium".to_string(),
        "A_autonomous".to_string(),
        "M_P_real".to_string(),
    ];
    let mut values: Vec<String> = vec![
        summary.output.to_string(),
        summary.interest_rate.to_string(),
        summary.autonomous_spending.to_string(),
        summary.real_money_supply.to_string(),
    ];

    if let Some(shift) = &summary.shifted {
        header.extend(
            ["Y_equilibrium_new", "i_equilibrium_new", "Delta_Y", "Delta_i"]
                .map(String::from),
        );
        values.push(shift.output.to_string());
        values.push(shift.interest_rate.to_string());
        values.push(shift.delta_output.to_string());
        values.push(shift.delta_interest_rate.to_string());
    }

    header.extend(PARAMETER_COLUMNS.map(String::from));
    values.extend(parameter_values(params).iter().map(|v| v.to_string()));

    format!("{}\n{}\n", csv_line(header), csv_line(values))
}

#[cfg(test)]
mod tests {
    use super::{parameters_csv, results_csv, PARAMETER_COLUMNS};
    use crate::params::{Deltas, Parameters};
    use crate::plot::generate;

    #[test]
    fn parameter_row_keeps_the_fixed_column_order() {
        let csv = parameters_csv(&Parameters::default());
        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        let values = lines.next().unwrap();
        assert_eq!(header, PARAMETER_COLUMNS.join(","));
        assert_eq!(values, "400,1,1,1,0.8,0.2,1,0,0,0,0,1000,0");
        assert!(lines.next().is_none());
    }

    #[test]
    fn results_row_without_deltas_has_seventeen_columns() {
        let data = generate(&Parameters::default(), &Deltas::default()).unwrap();
        let csv = results_csv(&data.summary, &Parameters::default());
        let header = csv.lines().next().unwrap();
        assert_eq!(header.split(',').count(), 17);
        assert!(header.starts_with("Y_equilibrium,i_equilibrium"));
    }

    #[test]
    fn results_row_with_deltas_adds_the_shift_columns() {
        let deltas = Deltas {
            g: 360.0,
            ..Deltas::default()
        };
        let data = generate(&Parameters::default(), &deltas).unwrap();
        let csv = results_csv(&data.summary, &Parameters::default());
        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        let values = lines.next().unwrap();
        assert_eq!(header.split(',').count(), 21);
        assert!(header.contains("Delta_Y,Delta_i"));
        assert_eq!(values.split(',').count(), 21);
    }
}
