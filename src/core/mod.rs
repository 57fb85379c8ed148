mod engine;
mod types;

pub use engine::{custom_sporadic_bounds, run_calculation};
pub use types::{
    ContributionResult, FiscalLimitStatus, Inputs, MAX_CONTRIBUTIONS_PER_YEAR, MAX_FISCAL_PERCENT,
    PlanConstants, REFERENCE_UNIT_COUNT, REFERENCE_UNIT_VALUE, SALARIES_PER_YEAR, SporadicAdvice,
};
