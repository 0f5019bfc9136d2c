//! IS-LM command-line interface.
//!
//! Batch counterpart of an interactive front end: reads the parameter and
//! delta vectors from flags, prints the derivation chain, the equilibrium
//! summary, and optionally the CSV export, and can write the general symbolic
//! derivation to a fixture file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use islm_core::{comparative, export, model, plot, validate, Deltas, Parameters};

#[derive(Parser)]
#[command(name = "islm")]
#[command(about = "Symbolic and numeric IS-LM equilibrium analysis", long_about = None)]
#[command(version)]
struct Cli {
    /// Write the 8 general symbolic equations (LaTeX, one per line) to FILE
    /// and exit.
    #[arg(long, value_name = "FILE")]
    general_out: Option<PathBuf>,

    /// Nominal money supply (M)
    #[arg(long, default_value_t = 400.0)]
    money_supply: f64,
    /// Price level (P)
    #[arg(long, default_value_t = 1.0)]
    price_level: f64,
    /// Income sensitivity of money demand (k)
    #[arg(long, default_value_t = 1.0)]
    income_sensitivity: f64,
    /// Interest sensitivity of money demand (h)
    #[arg(long, default_value_t = 1.0)]
    interest_sensitivity: f64,
    /// Marginal propensity to consume (c)
    #[arg(long, default_value_t = 0.8)]
    mpc: f64,
    /// Proportional tax rate (t)
    #[arg(long, default_value_t = 0.2)]
    tax_rate: f64,
    /// Interest sensitivity of investment (b)
    #[arg(long, default_value_t = 1.0)]
    investment_sensitivity: f64,
    /// Autonomous consumption (Ca)
    #[arg(long, default_value_t = 0.0)]
    autonomous_consumption: f64,
    /// Autonomous taxes (Ta)
    #[arg(long, default_value_t = 0.0)]
    autonomous_tax: f64,
    /// Autonomous investment (Ia)
    #[arg(long, default_value_t = 0.0)]
    autonomous_investment: f64,
    /// Government transfers (Tr)
    #[arg(long, default_value_t = 0.0)]
    transfers: f64,
    /// Government spending (G)
    #[arg(long, default_value_t = 1000.0)]
    spending: f64,
    /// Net exports (NX)
    #[arg(long, default_value_t = 0.0)]
    net_exports: f64,

    /// Additive perturbation of the money supply
    #[arg(long, default_value_t = 0.0)]
    delta_money_supply: f64,
    /// Additive perturbation of the price level
    #[arg(long, default_value_t = 0.0)]
    delta_price_level: f64,
    /// Additive perturbation of k
    #[arg(long, default_value_t = 0.0)]
    delta_income_sensitivity: f64,
    /// Additive perturbation of h
    #[arg(long, default_value_t = 0.0)]
    delta_interest_sensitivity: f64,
    /// Additive perturbation of c
    #[arg(long, default_value_t = 0.0)]
    delta_mpc: f64,
    /// Additive perturbation of t
    #[arg(long, default_value_t = 0.0)]
    delta_tax_rate: f64,
    /// Additive perturbation of b
    #[arg(long, default_value_t = 0.0)]
    delta_investment_sensitivity: f64,
    /// Additive perturbation of Ca
    #[arg(long, default_value_t = 0.0)]
    delta_autonomous_consumption: f64,
    /// Additive perturbation of Ta
    #[arg(long, default_value_t = 0.0)]
    delta_autonomous_tax: f64,
    /// Additive perturbation of Ia
    #[arg(long, default_value_t = 0.0)]
    delta_autonomous_investment: f64,
    /// Additive perturbation of Tr
    #[arg(long, default_value_t = 0.0)]
    delta_transfers: f64,
    /// Additive perturbation of G
    #[arg(long, default_value_t = 0.0)]
    delta_spending: f64,
    /// Additive perturbation of NX
    #[arg(long, default_value_t = 0.0)]
    delta_net_exports: f64,

    /// Print the equilibrium-plus-parameters CSV row
    #[arg(long)]
    csv: bool,
}

impl Cli {
    fn parameters(&self) -> Parameters {
        Parameters {
            m: self.money_supply,
            p: self.price_level,
            k: self.income_sensitivity,
            h: self.interest_sensitivity,
            c: self.mpc,
            t: self.tax_rate,
            b: self.investment_sensitivity,
            ca: self.autonomous_consumption,
            ta: self.autonomous_tax,
            ia: self.autonomous_investment,
            tr: self.transfers,
            g: self.spending,
            nx: self.net_exports,
        }
    }

    fn deltas(&self) -> Deltas {
        Deltas {
            m: self.delta_money_supply,
            p: self.delta_price_level,
            k: self.delta_income_sensitivity,
            h: self.delta_interest_sensitivity,
            c: self.delta_mpc,
            t: self.delta_tax_rate,
            b: self.delta_investment_sensitivity,
            ca: self.delta_autonomous_consumption,
            ta: self.delta_autonomous_tax,
            ia: self.delta_autonomous_investment,
            tr: self.delta_transfers,
            g: self.delta_spending,
            nx: self.delta_net_exports,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.general_out {
        let chain = model::general_procedure()
            .context("Failed to derive the general symbolic procedure.")?;
        let body = chain.latex_lines().join("\n") + "\n";
        fs::write(path, body)
            .with_context(|| format!("Failed to write equations to {}", path.display()))?;
        println!("Wrote {} equations to {}", chain.len(), path.display());
        return Ok(());
    }

    let params = cli.parameters();
    let deltas = cli.deltas();

    let report = validate(&params);
    for warning in &report.warnings {
        eprintln!("warning: {}", warning);
    }
    if !report.is_ok() {
        for error in &report.errors {
            eprintln!("error: {}", error);
        }
        anyhow::bail!("Invalid parameters; refusing to derive.");
    }

    let chain = model::exercise(&params).context("Failed to derive the exercise chain.")?;
    println!("Derivation:");
    for line in chain.latex_lines() {
        println!("  {}", line);
    }

    if !deltas.is_zero() {
        let scenario =
            comparative::run(&params, &deltas).context("Failed to derive the shifted chain.")?;
        println!("Shifted derivation:");
        for line in scenario.shifted.latex_lines() {
            println!("  {}", line);
        }
    }

    let data = plot::generate(&params, &deltas)
        .context("No equilibrium exists for these parameters.")?;
    let summary = &data.summary;
    println!("Equilibrium: Y* = {}, i* = {}", summary.output, summary.interest_rate);
    println!(
        "Autonomous spending A = {}, real money supply M/P = {}",
        summary.autonomous_spending, summary.real_money_supply
    );
    if let Some(shift) = &summary.shifted {
        if shift.fell_back {
            eprintln!("warning: shifted system is singular; reporting the baseline equilibrium");
        }
        println!(
            "Shifted equilibrium: Y* = {}, i* = {} (dY = {}, di = {})",
            shift.output, shift.interest_rate, shift.delta_output, shift.delta_interest_rate
        );
    }

    if cli.csv {
        print!("{}", export::results_csv(summary, &params));
    }

    Ok(())
}
