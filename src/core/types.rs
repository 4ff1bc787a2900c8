use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub name: String,
    pub amount_uf: f64,
    pub pct_financing: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesScenario {
    pub month_offset: i32,
    pub pct_sale: f64,
}

/// One development project as submitted by the caller.
///
/// Financing ratios are fractions while sales allocations are whole
/// percentages; both units are part of the wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,

    pub land_value_uf: f64,
    pub pct_fin_land: f64,

    pub construction_value_uf: f64,
    pub pct_fin_construction: f64,
    pub duration_months: i32,
    pub reception_month: i32,

    pub expenses: Vec<ExpenseItem>,

    pub rate_annual_uf: f64,
    pub rate_annual_clp: f64,
    pub inflation_annual: f64,
    pub pct_mix_uf: f64,

    pub total_sales_value_uf: f64,
    pub sales_scenario: Vec<SalesScenario>,
}

impl ProjectConfig {
    pub fn land_debt_principal(&self) -> f64 {
        self.land_value_uf * self.pct_fin_land
    }

    pub fn land_equity(&self) -> f64 {
        self.land_value_uf * (1.0 - self.pct_fin_land)
    }

    pub fn other_debt_principal(&self) -> f64 {
        self.expenses
            .iter()
            .map(|e| e.amount_uf * e.pct_financing)
            .sum()
    }

    pub fn other_equity(&self) -> f64 {
        self.expenses
            .iter()
            .map(|e| e.amount_uf * (1.0 - e.pct_financing))
            .sum()
    }

    pub fn sale_month(&self, sale: &SalesScenario) -> i64 {
        i64::from(self.reception_month) + i64::from(sale.month_offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub month: u32,
    pub eepp_amount: f64,
    pub debt_land: f64,
    pub debt_construction: f64,
    pub debt_others: f64,
    pub total_debt: f64,
    pub sales_income: f64,
    pub cash_surplus: f64,
    pub interest_payment: f64,
    pub equity_contribution: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub net_profit: f64,
    pub cash_surplus: f64,
    pub financial_cost: f64,
    pub peak_debt: f64,
    pub total_equity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateWarning {
    InflationFallback,
}

impl RateWarning {
    pub fn message(self) -> &'static str {
        match self {
            RateWarning::InflationFallback => {
                "inflation_annual of -100% gives a zero real-rate denominator; nominal CLP rate used"
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Calculation {
    pub flow: Vec<MonthlyRecord>,
    pub kpis: Kpis,
    pub warnings: Vec<RateWarning>,
}
