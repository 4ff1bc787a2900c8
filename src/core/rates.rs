use super::error::CalcError;
use super::types::{ProjectConfig, RateWarning};
use super::validation::MAX_MONTHS;

const INITIAL_ADVANCE_PCT: f64 = 19.0;
const LINEAR_STEP_PCT: f64 = 3.0;
const FULL_PCT: f64 = 100.0;

/// Converts an annual rate in percent to the equivalent compound monthly rate
/// expressed as a fraction.
pub fn annual_to_monthly(annual_pct: f64) -> f64 {
    (1.0 + annual_pct / 100.0).powf(1.0 / 12.0) - 1.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyRates {
    pub uf: f64,
    pub clp: f64,
    pub inflation: f64,
    pub clp_real: f64,
    pub blended: f64,
    pub warning: Option<RateWarning>,
}

impl MonthlyRates {
    pub fn derive(config: &ProjectConfig) -> Self {
        let uf = annual_to_monthly(config.rate_annual_uf);
        let clp = annual_to_monthly(config.rate_annual_clp);
        let inflation = annual_to_monthly(config.inflation_annual);

        // A -100% annual inflation collapses the denominator to exactly zero.
        // The nominal rate stands in and the caller is told about it.
        let (clp_real, warning) = if 1.0 + inflation != 0.0 {
            ((1.0 + clp) / (1.0 + inflation) - 1.0, None)
        } else {
            (clp, Some(RateWarning::InflationFallback))
        };

        let mix = config.pct_mix_uf;
        let blended = mix * uf + (1.0 - mix) * clp_real;

        Self {
            uf,
            clp,
            inflation,
            clp_real,
            blended,
            warning,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurvePhase {
    InitialAdvance,
    LinearProgress,
    FinalRemainder,
}

impl CurvePhase {
    /// The last month wins over the first, so a one-month build collapses
    /// to a single 100% entry.
    pub fn for_index(index: usize, duration: usize) -> Self {
        if index + 1 == duration {
            CurvePhase::FinalRemainder
        } else if index == 0 {
            CurvePhase::InitialAdvance
        } else {
            CurvePhase::LinearProgress
        }
    }

    fn percent(self, cumulative: f64) -> f64 {
        let headroom = (FULL_PCT - cumulative).max(0.0);
        match self {
            CurvePhase::InitialAdvance => INITIAL_ADVANCE_PCT.min(headroom),
            CurvePhase::LinearProgress => LINEAR_STEP_PCT.min(headroom),
            CurvePhase::FinalRemainder => headroom,
        }
    }
}

/// Monthly construction progress in whole percent, indexed from month 1 at
/// position 0. Always sums to 100.
pub fn construction_curve(duration_months: i32) -> Result<Vec<f64>, CalcError> {
    if duration_months <= 0 {
        return Err(CalcError::invalid("duration_months must be > 0"));
    }
    if duration_months > MAX_MONTHS {
        return Err(CalcError::invalid(format!(
            "duration_months must be <= {MAX_MONTHS}"
        )));
    }
    let duration = duration_months as usize;

    let mut curve = Vec::with_capacity(duration);
    let mut cumulative = 0.0;
    for index in 0..duration {
        let pct = CurvePhase::for_index(index, duration).percent(cumulative);
        curve.push(pct);
        cumulative += pct;
    }
    Ok(curve)
}
