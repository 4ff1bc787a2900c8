use super::error::CalcError;
use super::types::ProjectConfig;

/// Upper bound on any month the simulation can reach (construction length,
/// reception or a sale). Keeps the monthly loop small and bounded.
pub const MAX_MONTHS: i32 = 1_200;

/// Rejects configurations the engine cannot simulate. Returns the first
/// violation found.
pub fn validate_config(config: &ProjectConfig) -> Result<(), CalcError> {
    for (name, value) in [
        ("land_value_uf", config.land_value_uf),
        ("pct_fin_land", config.pct_fin_land),
        ("construction_value_uf", config.construction_value_uf),
        ("pct_fin_construction", config.pct_fin_construction),
        ("rate_annual_uf", config.rate_annual_uf),
        ("rate_annual_clp", config.rate_annual_clp),
        ("inflation_annual", config.inflation_annual),
        ("pct_mix_uf", config.pct_mix_uf),
        ("total_sales_value_uf", config.total_sales_value_uf),
    ] {
        if !value.is_finite() {
            return Err(CalcError::invalid(format!("{name} must be a finite number")));
        }
    }

    if config.duration_months <= 0 {
        return Err(CalcError::invalid("duration_months must be > 0"));
    }

    if config.duration_months > MAX_MONTHS {
        return Err(CalcError::invalid(format!(
            "duration_months must be <= {MAX_MONTHS}"
        )));
    }

    if config.reception_month < 0 {
        return Err(CalcError::invalid("reception_month must be >= 0"));
    }

    if config.reception_month > MAX_MONTHS {
        return Err(CalcError::invalid(format!(
            "reception_month must be <= {MAX_MONTHS}"
        )));
    }

    for (name, value) in [
        ("land_value_uf", config.land_value_uf),
        ("construction_value_uf", config.construction_value_uf),
        ("total_sales_value_uf", config.total_sales_value_uf),
    ] {
        if value < 0.0 {
            return Err(CalcError::invalid(format!("{name} must be >= 0")));
        }
    }

    for (name, value) in [
        ("pct_fin_land", config.pct_fin_land),
        ("pct_fin_construction", config.pct_fin_construction),
        ("pct_mix_uf", config.pct_mix_uf),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(CalcError::invalid(format!("{name} must be between 0 and 1")));
        }
    }

    for (name, value) in [
        ("rate_annual_uf", config.rate_annual_uf),
        ("rate_annual_clp", config.rate_annual_clp),
        ("inflation_annual", config.inflation_annual),
    ] {
        if value < -100.0 {
            return Err(CalcError::invalid(format!("{name} must be >= -100")));
        }
    }

    for (idx, expense) in config.expenses.iter().enumerate() {
        if !expense.amount_uf.is_finite() || expense.amount_uf < 0.0 {
            return Err(CalcError::invalid(format!(
                "expenses[{idx}] ({}) amount_uf must be a finite number >= 0",
                expense.name
            )));
        }
        if !(0.0..=1.0).contains(&expense.pct_financing) {
            return Err(CalcError::invalid(format!(
                "expenses[{idx}] ({}) pct_financing must be between 0 and 1",
                expense.name
            )));
        }
    }

    for (idx, sale) in config.sales_scenario.iter().enumerate() {
        if !(0.0..=100.0).contains(&sale.pct_sale) {
            return Err(CalcError::invalid(format!(
                "sales_scenario[{idx}] pct_sale must be between 0 and 100"
            )));
        }
        if config.sale_month(sale) < 1 {
            return Err(CalcError::invalid(format!(
                "sales_scenario[{idx}] lands in month {}; reception_month + month_offset must be >= 1",
                config.sale_month(sale)
            )));
        }
        if config.sale_month(sale) > i64::from(MAX_MONTHS) {
            return Err(CalcError::invalid(format!(
                "sales_scenario[{idx}] lands in month {}; reception_month + month_offset must be <= {MAX_MONTHS}",
                config.sale_month(sale)
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ExpenseItem, SalesScenario};

    fn sample_config() -> ProjectConfig {
        ProjectConfig {
            name: "Test Project".to_string(),
            land_value_uf: 30_000.0,
            pct_fin_land: 0.6,
            construction_value_uf: 70_000.0,
            pct_fin_construction: 0.8,
            duration_months: 18,
            reception_month: 22,
            expenses: vec![ExpenseItem {
                name: "Arch".to_string(),
                amount_uf: 2_000.0,
                pct_financing: 0.5,
            }],
            rate_annual_uf: 6.5,
            rate_annual_clp: 11.0,
            inflation_annual: 3.0,
            pct_mix_uf: 1.0,
            total_sales_value_uf: 140_000.0,
            sales_scenario: vec![SalesScenario {
                month_offset: 1,
                pct_sale: 20.0,
            }],
        }
    }

    fn assert_rejected(config: &ProjectConfig, needle: &str) {
        let err = validate_config(config).expect_err("must reject config");
        let CalcError::InvalidConfiguration(msg) = err;
        assert!(msg.contains(needle), "expected `{needle}` in `{msg}`");
    }

    #[test]
    fn accepts_sample_config() {
        assert!(validate_config(&sample_config()).is_ok());
    }

    #[test]
    fn rejects_non_positive_duration() {
        let mut config = sample_config();
        config.duration_months = 0;
        assert_rejected(&config, "duration_months");

        config.duration_months = -3;
        assert_rejected(&config, "duration_months");
    }

    #[test]
    fn rejects_negative_monetary_values() {
        let mut config = sample_config();
        config.land_value_uf = -1.0;
        assert_rejected(&config, "land_value_uf");

        let mut config = sample_config();
        config.expenses[0].amount_uf = -10.0;
        assert_rejected(&config, "expenses[0] (Arch) amount_uf");
    }

    #[test]
    fn rejects_financing_fraction_outside_unit_interval() {
        let mut config = sample_config();
        config.pct_fin_construction = 1.2;
        assert_rejected(&config, "pct_fin_construction");

        let mut config = sample_config();
        config.expenses[0].pct_financing = -0.1;
        assert_rejected(&config, "pct_financing");

        let mut config = sample_config();
        config.pct_mix_uf = 1.5;
        assert_rejected(&config, "pct_mix_uf");
    }

    #[test]
    fn rejects_sale_percentage_outside_whole_percent_range() {
        let mut config = sample_config();
        config.sales_scenario[0].pct_sale = 120.0;
        assert_rejected(&config, "pct_sale");
    }

    #[test]
    fn sale_percentage_is_whole_percent_not_fraction() {
        let mut config = sample_config();
        config.sales_scenario[0].pct_sale = 100.0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_sale_before_first_month() {
        let mut config = sample_config();
        config.sales_scenario[0].month_offset = -22;
        assert_rejected(&config, "month 0");
    }

    #[test]
    fn allows_sale_before_reception_when_still_in_range() {
        let mut config = sample_config();
        config.sales_scenario[0].month_offset = -5;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_months_beyond_limit() {
        let mut config = sample_config();
        config.reception_month = 2_000_000_000;
        config.sales_scenario.clear();
        assert_rejected(&config, "reception_month");

        let mut config = sample_config();
        config.duration_months = i32::MAX;
        assert_rejected(&config, "duration_months");

        let mut config = sample_config();
        config.sales_scenario[0].month_offset = i32::MAX;
        assert_rejected(&config, "month_offset must be <=");
    }

    #[test]
    fn accepts_months_at_limit() {
        let mut config = sample_config();
        config.duration_months = MAX_MONTHS;
        config.reception_month = MAX_MONTHS - 1;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_non_finite_and_sub_minus_hundred_rates() {
        let mut config = sample_config();
        config.rate_annual_clp = f64::NAN;
        assert_rejected(&config, "rate_annual_clp");

        let mut config = sample_config();
        config.inflation_annual = -100.5;
        assert_rejected(&config, "inflation_annual");
    }

    #[test]
    fn accepts_minus_hundred_inflation_edge() {
        let mut config = sample_config();
        config.inflation_annual = -100.0;
        assert!(validate_config(&config).is_ok());
    }
}
