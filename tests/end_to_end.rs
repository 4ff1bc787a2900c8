use obra_flow::core::{
    CalcError, ExpenseItem, ProjectConfig, SalesScenario, calculate, construction_curve, run_flow,
};

fn repository_scenario() -> ProjectConfig {
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

#[test]
fn repository_scenario_runs_past_reception_with_defined_profit() {
    let calc = calculate(&repository_scenario()).expect("valid config");
    assert!(calc.flow.len() > 22);
    assert!(!calc.kpis.net_profit.is_nan());
    assert!(calc.warnings.is_empty());

    let months: Vec<u32> = calc.flow.iter().map(|r| r.month).collect();
    let expected: Vec<u32> = (1..=29).collect();
    assert_eq!(months, expected);

    let peak = calc
        .flow
        .iter()
        .map(|r| r.total_debt)
        .fold(f64::MIN, f64::max);
    assert_eq!(calc.kpis.peak_debt, peak);
    assert!(calc.kpis.financial_cost > 0.0);
}

#[test]
fn demo_project_file_matches_repository_scenario() {
    let raw = include_str!("fixtures/torre_norte.json");
    let project: ProjectConfig = serde_json::from_str(raw).expect("demo should parse");
    let from_file = run_flow(&project).expect("valid config");
    let from_code = run_flow(&repository_scenario()).expect("valid config");
    assert_eq!(from_file, from_code);
}

#[test]
fn sale_income_is_fully_absorbed_by_construction_debt() {
    let calc = calculate(&repository_scenario()).expect("valid config");
    let sale_month = &calc.flow[22];
    assert_eq!(sale_month.month, 23);
    assert!((sale_month.sales_income - 28_000.0).abs() < 1e-6);
    assert_eq!(sale_month.cash_surplus, 0.0);
    assert!(calc.flow.iter().all(|r| r.cash_surplus == 0.0));
    assert!(calc.kpis.net_profit < 0.0);
}

#[test]
fn one_month_duration_curve_is_complete() {
    assert_eq!(construction_curve(1).expect("valid duration"), vec![100.0]);
}

#[test]
fn invalid_configuration_produces_no_flow() {
    let mut config = repository_scenario();
    config.pct_fin_land = 1.5;
    match calculate(&config) {
        Err(CalcError::InvalidConfiguration(msg)) => assert!(msg.contains("pct_fin_land")),
        Ok(_) => panic!("expected invalid configuration"),
    }
}
