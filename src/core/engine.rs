use tracing::{debug, warn};

use super::error::CalcError;
use super::kpi::compute_kpis;
use super::rates::{MonthlyRates, construction_curve};
use super::types::{Calculation, MonthlyRecord, ProjectConfig};
use super::validation::validate_config;

const TAIL_MONTHS: i64 = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DebtBalances {
    pub land: f64,
    pub construction: f64,
    pub other: f64,
}

impl DebtBalances {
    pub fn total(self) -> f64 {
        self.land + self.construction + self.other
    }
}

#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub rates: MonthlyRates,
    pub curve: Vec<f64>,
    pub land_principal: f64,
    pub other_principal: f64,
    pub construction_value: f64,
    pub pct_fin_construction: f64,
    pub total_sales_value: f64,
    // (absolute sale month, whole percent)
    pub sales: Vec<(i64, f64)>,
    pub horizon: u32,
}

impl SimulationPlan {
    pub fn build(config: &ProjectConfig) -> Result<Self, CalcError> {
        validate_config(config)?;
        let curve = construction_curve(config.duration_months)?;
        let horizon = horizon_month(config)?;
        let rates = MonthlyRates::derive(config);

        Ok(Self {
            rates,
            curve,
            land_principal: config.land_debt_principal(),
            other_principal: config.other_debt_principal(),
            construction_value: config.construction_value_uf,
            pct_fin_construction: config.pct_fin_construction,
            total_sales_value: config.total_sales_value_uf,
            sales: config
                .sales_scenario
                .iter()
                .map(|sale| (config.sale_month(sale), sale.pct_sale))
                .collect(),
            horizon,
        })
    }

    fn progress_pct(&self, month: u32) -> Option<f64> {
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        self.curve.get(index).copied()
    }

    fn sales_income(&self, month: u32) -> f64 {
        self.sales
            .iter()
            .filter(|(sale_month, _)| *sale_month == i64::from(month))
            .map(|(_, pct)| self.total_sales_value * (pct / 100.0))
            .sum()
    }
}

pub fn horizon_month(config: &ProjectConfig) -> Result<u32, CalcError> {
    let reception = i64::from(config.reception_month);
    let last_sale = config
        .sales_scenario
        .iter()
        .map(|sale| config.sale_month(sale))
        .max()
        .unwrap_or(reception);
    let horizon = reception.max(last_sale) + TAIL_MONTHS;
    u32::try_from(horizon)
        .map_err(|_| CalcError::invalid(format!("horizon month {horizon} is out of range")))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthStep {
    pub balances: DebtBalances,
    pub record: MonthlyRecord,
    pub disbursed: DebtBalances,
    pub paid: DebtBalances,
}

/// Pays down debt with `cash` in priority order construction, other, land.
/// Returns the new balances, what was paid on each, and leftover cash.
pub fn amortize(balances: DebtBalances, cash: f64) -> (DebtBalances, DebtBalances, f64) {
    let mut remaining = cash;
    let mut pay = |balance: f64| {
        let payment = balance.min(remaining);
        remaining -= payment;
        payment
    };

    let paid = DebtBalances {
        construction: pay(balances.construction),
        other: pay(balances.other),
        land: pay(balances.land),
    };
    let after = DebtBalances {
        land: balances.land - paid.land,
        construction: balances.construction - paid.construction,
        other: balances.other - paid.other,
    };
    (after, paid, remaining)
}

/// Advances one month. The order of disbursement, draw, interest, sales and
/// amortization is fixed.
pub fn step_month(plan: &SimulationPlan, prior: DebtBalances, month: u32) -> MonthStep {
    let mut balances = prior;
    let mut disbursed = DebtBalances::default();

    if month == 1 {
        disbursed.land = plan.land_principal;
        disbursed.other = plan.other_principal;
        balances.land += disbursed.land;
        balances.other += disbursed.other;
    }

    let (eepp_amount, equity_contribution) = match plan.progress_pct(month) {
        Some(pct) => {
            let eepp = (pct / 100.0) * plan.construction_value;
            disbursed.construction = eepp * plan.pct_fin_construction;
            (eepp, eepp * (1.0 - plan.pct_fin_construction))
        }
        None => (0.0, 0.0),
    };
    balances.construction += disbursed.construction;

    let rate = plan.rates.blended;
    let interest = DebtBalances {
        land: balances.land * rate,
        construction: balances.construction * rate,
        other: balances.other * rate,
    };
    balances.land += interest.land;
    balances.construction += interest.construction;
    balances.other += interest.other;

    let sales_income = plan.sales_income(month);
    let (balances, paid, cash_surplus) = amortize(balances, sales_income);

    MonthStep {
        balances,
        record: MonthlyRecord {
            month,
            eepp_amount,
            debt_land: balances.land,
            debt_construction: balances.construction,
            debt_others: balances.other,
            total_debt: balances.total(),
            sales_income,
            cash_surplus,
            interest_payment: interest.total(),
            equity_contribution,
        },
        disbursed,
        paid,
    }
}

pub fn simulate(plan: &SimulationPlan) -> Vec<MonthlyRecord> {
    let mut balances = DebtBalances::default();
    let mut flow = Vec::with_capacity(plan.horizon as usize);
    for month in 1..=plan.horizon {
        let step = step_month(plan, balances, month);
        balances = step.balances;
        flow.push(step.record);
    }
    flow
}

pub fn run_flow(config: &ProjectConfig) -> Result<Vec<MonthlyRecord>, CalcError> {
    let plan = SimulationPlan::build(config)?;
    Ok(simulate(&plan))
}

pub fn calculate(config: &ProjectConfig) -> Result<Calculation, CalcError> {
    let plan = SimulationPlan::build(config)?;

    let mut warnings = Vec::new();
    if let Some(warning) = plan.rates.warning {
        warn!(
            project = %config.name,
            inflation_annual = config.inflation_annual,
            "{}",
            warning.message()
        );
        warnings.push(warning);
    }

    let flow = simulate(&plan);
    let kpis = compute_kpis(config, &flow);
    debug!(
        project = %config.name,
        months = flow.len(),
        blended_rate = plan.rates.blended,
        net_profit = kpis.net_profit,
        peak_debt = kpis.peak_debt,
        "calculated project flow"
    );

    Ok(Calculation {
        flow,
        kpis,
        warnings,
    })
}
