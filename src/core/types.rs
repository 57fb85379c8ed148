use serde::Serialize;

pub const REFERENCE_UNIT_VALUE: f64 = 795.68;
pub const REFERENCE_UNIT_COUNT: u32 = 7;
pub const MAX_FISCAL_PERCENT: f64 = 0.12;
pub const SALARIES_PER_YEAR: f64 = 14.0;
pub const MAX_CONTRIBUTIONS_PER_YEAR: u32 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanConstants {
    pub reference_unit_value: f64,
    pub reference_unit_count: u32,
    pub max_fiscal_percent: f64,
}

impl Default for PlanConstants {
    fn default() -> Self {
        Self {
            reference_unit_value: REFERENCE_UNIT_VALUE,
            reference_unit_count: REFERENCE_UNIT_COUNT,
            max_fiscal_percent: MAX_FISCAL_PERCENT,
        }
    }
}

impl PlanConstants {
    pub fn reference_unit_total(&self) -> f64 {
        f64::from(self.reference_unit_count) * self.reference_unit_value
    }

    pub fn sporadic_min(&self) -> f64 {
        3.0 * self.reference_unit_value
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inputs {
    pub monthly_salary: f64,
    pub basic_rate_a: f64,
    pub basic_rate_b: f64,
    pub voluntary_rate: f64,
    pub contributions_made: u32,
    pub custom_sporadic_amount: f64,
    pub plan: PlanConstants,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SporadicAdvice {
    TargetMet,
    BelowMinimum,
    AboveMaximum,
    WithinRange,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FiscalLimitStatus {
    Within,
    Exceeded,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionResult {
    pub annual_salary: f64,
    pub reference_unit_total: f64,
    pub excess_over_reference: f64,
    pub basic_contribution_a: f64,
    pub basic_contribution_b: f64,
    pub basic_monthly_total: f64,
    pub voluntary_monthly: f64,
    pub total_monthly: f64,
    pub annual_total: f64,
    pub current_fiscal_fraction: f64,
    pub sporadic_min: f64,
    pub sporadic_max: f64,
    pub suggested_sporadic: f64,
    pub final_total: f64,
    pub final_fiscal_fraction: f64,
    pub progress_ratio: f64,
    pub sporadic_advice: SporadicAdvice,
    pub fiscal_limit_status: FiscalLimitStatus,
}
