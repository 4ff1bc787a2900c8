use super::types::{Kpis, MonthlyRecord, ProjectConfig};

/// Reduces a monthly flow to the summary metrics. Upfront land and expense
/// equity count once on top of the monthly construction equity.
pub fn compute_kpis(config: &ProjectConfig, flow: &[MonthlyRecord]) -> Kpis {
    let monthly_equity: f64 = flow.iter().map(|r| r.equity_contribution).sum();
    let total_equity = monthly_equity + config.land_equity() + config.other_equity();
    let cash_surplus: f64 = flow.iter().map(|r| r.cash_surplus).sum();
    let financial_cost: f64 = flow.iter().map(|r| r.interest_payment).sum();
    let peak_debt = flow.iter().map(|r| r.total_debt).fold(0.0, f64::max);

    Kpis {
        net_profit: cash_surplus - total_equity,
        cash_surplus,
        financial_cost,
        peak_debt,
        total_equity,
    }
}
