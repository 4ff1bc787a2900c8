mod engine;
mod error;
mod kpi;
mod rates;
mod types;
mod validation;

pub use engine::{
    DebtBalances, MonthStep, SimulationPlan, amortize, calculate, horizon_month, run_flow,
    simulate, step_month,
};
pub use error::CalcError;
pub use kpi::compute_kpis;
pub use rates::{CurvePhase, MonthlyRates, annual_to_monthly, construction_curve};
pub use types::{
    Calculation, ExpenseItem, Kpis, MonthlyRecord, ProjectConfig, RateWarning, SalesScenario,
};
pub use validation::{MAX_MONTHS, validate_config};
