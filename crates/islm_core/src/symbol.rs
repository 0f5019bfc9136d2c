use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed symbol set of the IS-LM model.
///
/// Every algebraic unknown and structural parameter the model can mention is a
/// variant here, so a typo in an equation is a compile error rather than a
/// mystery symbol floating through a derivation. The set is closed: the model
/// never introduces symbols at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// M, nominal money supply.
    MoneySupply,
    /// P, price level.
    PriceLevel,
    /// k, income sensitivity of money demand.
    IncomeSensitivity,
    /// h, interest sensitivity of money demand.
    InterestSensitivity,
    /// c, marginal propensity to consume.
    Mpc,
    /// t, proportional tax rate.
    TaxRate,
    /// b, interest sensitivity of investment.
    InvestmentSensitivity,
    /// Ca, autonomous consumption.
    AutonomousConsumption,
    /// Ta, autonomous (lump-sum) taxes.
    AutonomousTax,
    /// Ia, autonomous investment.
    AutonomousInvestment,
    /// Tr, government transfers.
    Transfers,
    /// G, government spending.
    Spending,
    /// NX, net exports.
    NetExports,
    /// L, real money demand.
    MoneyDemand,
    /// Y, aggregate output.
    Output,
    /// DA, aggregate demand.
    AggregateDemand,
    /// I, investment.
    Investment,
    /// T, total taxes.
    Taxes,
    /// C, consumption.
    Consumption,
    /// A, autonomous spending.
    AutonomousSpending,
    /// i, interest rate.
    InterestRate,
    /// Yd, disposable income.
    DisposableIncome,
}

impl Symbol {
    /// Conventional one-or-two letter name used in textbook notation.
    pub fn name(self) -> &'static str {
        match self {
            Symbol::MoneySupply => "M",
            Symbol::PriceLevel => "P",
            Symbol::IncomeSensitivity => "k",
            Symbol::InterestSensitivity => "h",
            Symbol::Mpc => "c",
            Symbol::TaxRate => "t",
            Symbol::InvestmentSensitivity => "b",
            Symbol::AutonomousConsumption => "Ca",
            Symbol::AutonomousTax => "Ta",
            Symbol::AutonomousInvestment => "Ia",
            Symbol::Transfers => "Tr",
            Symbol::Spending => "G",
            Symbol::NetExports => "NX",
            Symbol::MoneyDemand => "L",
            Symbol::Output => "Y",
            Symbol::AggregateDemand => "DA",
            Symbol::Investment => "I",
            Symbol::Taxes => "T",
            Symbol::Consumption => "C",
            Symbol::AutonomousSpending => "A",
            Symbol::InterestRate => "i",
            Symbol::DisposableIncome => "Yd",
        }
    }

    /// LaTeX rendering of the symbol. The textbook names are already valid
    /// LaTeX, so this is the plain name today; kept separate from `name` so
    /// display markup can diverge without touching equation construction.
    pub fn latex(self) -> &'static str {
        self.name()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
