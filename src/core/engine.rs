use super::types::{
    ContributionResult, FiscalLimitStatus, Inputs, PlanConstants, SALARIES_PER_YEAR,
    SporadicAdvice,
};

const CUSTOM_SPORADIC_HEADROOM: f64 = 1.1;
const SPORADIC_MAX_SALARIES: f64 = 5.0;

pub fn run_calculation(inputs: &Inputs) -> ContributionResult {
    let plan = &inputs.plan;
    let salary = inputs.monthly_salary;

    let annual_salary = salary * SALARIES_PER_YEAR;
    let reference_unit_total = plan.reference_unit_total();
    let excess_over_reference = (salary - reference_unit_total).max(0.0);

    let basic_contribution_a = salary * inputs.basic_rate_a;
    let basic_contribution_b = excess_over_reference * inputs.basic_rate_b;
    let basic_monthly_total = basic_contribution_a + basic_contribution_b;
    let voluntary_monthly = salary * inputs.voluntary_rate;
    let total_monthly = basic_monthly_total + voluntary_monthly;

    let annual_total = total_monthly * f64::from(inputs.contributions_made);
    let current_fiscal_fraction = ratio_or_zero(annual_total, annual_salary);

    let sporadic_min = plan.sporadic_min();
    let sporadic_max = salary * SPORADIC_MAX_SALARIES;
    let suggested_sporadic = (plan.max_fiscal_percent - current_fiscal_fraction) * annual_salary;

    let final_total = annual_total + inputs.custom_sporadic_amount;
    let final_fiscal_fraction = ratio_or_zero(final_total, annual_salary);
    let progress_ratio =
        ratio_or_zero(final_fiscal_fraction, plan.max_fiscal_percent).clamp(0.0, 1.0);

    ContributionResult {
        annual_salary,
        reference_unit_total,
        excess_over_reference,
        basic_contribution_a,
        basic_contribution_b,
        basic_monthly_total,
        voluntary_monthly,
        total_monthly,
        annual_total,
        current_fiscal_fraction,
        sporadic_min,
        sporadic_max,
        suggested_sporadic,
        final_total,
        final_fiscal_fraction,
        progress_ratio,
        sporadic_advice: classify_suggestion(suggested_sporadic, sporadic_min, sporadic_max),
        fiscal_limit_status: if final_fiscal_fraction <= plan.max_fiscal_percent {
            FiscalLimitStatus::Within
        } else {
            FiscalLimitStatus::Exceeded
        },
    }
}

// Upper bound never drops below the minimum.
pub fn custom_sporadic_bounds(monthly_salary: f64, plan: &PlanConstants) -> (f64, f64) {
    let min = plan.sporadic_min();
    let max = monthly_salary * SPORADIC_MAX_SALARIES * CUSTOM_SPORADIC_HEADROOM;
    (min, max.max(min))
}

fn classify_suggestion(suggested: f64, min: f64, max: f64) -> SporadicAdvice {
    if suggested <= 0.0 {
        SporadicAdvice::TargetMet
    } else if suggested < min {
        SporadicAdvice::BelowMinimum
    } else if suggested > max {
        SporadicAdvice::AboveMaximum
    } else {
        SporadicAdvice::WithinRange
    }
}

fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_inputs() -> Inputs {
        Inputs {
            monthly_salary: 10_000.0,
            basic_rate_a: 0.02,
            basic_rate_b: 0.10,
            voluntary_rate: 0.0,
            contributions_made: 13,
            custom_sporadic_amount: 5_000.0,
            plan: PlanConstants::default(),
        }
    }

    #[test]
    fn basic_contribution_splits_salary_around_reference_units() {
        let result = run_calculation(&sample_inputs());

        assert_approx(result.reference_unit_total, 5_569.76);
        assert_approx(result.excess_over_reference, 4_430.24);
        assert_approx(result.basic_contribution_a, 200.0);
        assert_approx(result.basic_contribution_b, 443.024);
        assert_approx(result.basic_monthly_total, 643.024);
    }

    #[test]
    fn default_scenario_yields_expected_annual_figures() {
        let result = run_calculation(&sample_inputs());

        assert_approx(result.annual_salary, 140_000.0);
        assert_approx(result.total_monthly, 643.024);
        assert_approx(result.annual_total, 8_359.312);
        assert_approx(result.current_fiscal_fraction, 8_359.312 / 140_000.0);
        assert_approx(result.sporadic_min, 2_387.04);
        assert_approx(result.sporadic_max, 50_000.0);
        assert_approx(result.suggested_sporadic, 8_440.688);
        assert_approx(result.final_total, 13_359.312);
        assert_approx(result.final_fiscal_fraction, 13_359.312 / 140_000.0);
        assert_approx(result.progress_ratio, 13_359.312 / 140_000.0 / 0.12);
        assert_eq!(result.sporadic_advice, SporadicAdvice::WithinRange);
        assert_eq!(result.fiscal_limit_status, FiscalLimitStatus::Within);
    }

    #[test]
    fn salary_below_reference_total_has_no_excess_contribution() {
        let mut inputs = sample_inputs();
        inputs.monthly_salary = 4_000.0;

        let result = run_calculation(&inputs);
        assert_approx(result.excess_over_reference, 0.0);
        assert_approx(result.basic_contribution_b, 0.0);
        assert_approx(result.basic_monthly_total, 80.0);
    }

    #[test]
    fn voluntary_rate_adds_to_monthly_total() {
        let mut inputs = sample_inputs();
        inputs.voluntary_rate = 0.05;

        let result = run_calculation(&inputs);
        assert_approx(result.voluntary_monthly, 500.0);
        assert_approx(result.total_monthly, 1_143.024);
        assert_approx(result.annual_total, 14_859.312);
    }

    #[test]
    fn zero_salary_does_not_divide_by_zero() {
        let mut inputs = sample_inputs();
        inputs.monthly_salary = 0.0;

        let result = run_calculation(&inputs);
        assert_approx(result.annual_salary, 0.0);
        assert_approx(result.current_fiscal_fraction, 0.0);
        assert_approx(result.final_fiscal_fraction, 0.0);
        assert_approx(result.progress_ratio, 0.0);
        assert_eq!(result.sporadic_advice, SporadicAdvice::TargetMet);
    }

    #[test]
    fn fiscal_target_already_met_reports_target_met() {
        let mut inputs = sample_inputs();
        inputs.basic_rate_a = 1.0;

        let result = run_calculation(&inputs);
        assert!(result.current_fiscal_fraction >= inputs.plan.max_fiscal_percent);
        assert!(result.suggested_sporadic <= 0.0);
        assert_eq!(result.sporadic_advice, SporadicAdvice::TargetMet);
        assert_eq!(result.fiscal_limit_status, FiscalLimitStatus::Exceeded);
        assert_approx(result.progress_ratio, 1.0);
    }

    #[test]
    fn small_suggestion_is_flagged_below_minimum_without_clamping() {
        let mut inputs = sample_inputs();
        inputs.voluntary_rate = 0.05;

        let result = run_calculation(&inputs);
        assert_approx(result.suggested_sporadic, 1_940.688);
        assert_eq!(result.sporadic_advice, SporadicAdvice::BelowMinimum);
    }

    #[test]
    fn large_suggestion_is_flagged_above_maximum_without_clamping() {
        let mut inputs = sample_inputs();
        inputs.contributions_made = 0;
        inputs.plan.max_fiscal_percent = 0.5;

        let result = run_calculation(&inputs);
        assert_approx(result.suggested_sporadic, 70_000.0);
        assert_eq!(result.sporadic_advice, SporadicAdvice::AboveMaximum);
    }

    #[test]
    fn sporadic_minimum_follows_reference_unit_value() {
        let mut inputs = sample_inputs();
        inputs.plan.reference_unit_value = 1_000.0;

        let result = run_calculation(&inputs);
        assert_approx(result.sporadic_min, 3_000.0);
        assert_approx(result.reference_unit_total, 7_000.0);
    }

    #[test]
    fn custom_bounds_scale_with_salary_and_never_invert() {
        let plan = PlanConstants::default();

        let (min, max) = custom_sporadic_bounds(10_000.0, &plan);
        assert_approx(min, 2_387.04);
        assert_approx(max, 55_000.0);

        let (min, max) = custom_sporadic_bounds(100.0, &plan);
        assert_approx(min, 2_387.04);
        assert_approx(max, min);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_annual_salary_is_fourteen_monthly_salaries(
            salary_cents in 0u32..100_000_000,
        ) {
            let mut inputs = sample_inputs();
            inputs.monthly_salary = f64::from(salary_cents) / 100.0;

            let result = run_calculation(&inputs);
            prop_assert!((result.annual_salary - 14.0 * inputs.monthly_salary).abs() <= EPS);
        }

        #[test]
        fn prop_progress_ratio_stays_in_unit_interval(
            salary in 0u32..500_000,
            rate_a_tenths in 0u32..1001,
            rate_b_halves in 9u32..21,
            voluntary in 0u32..11,
            contributions in 0u32..14,
            sporadic in 2_388u32..3_000_000,
        ) {
            let inputs = Inputs {
                monthly_salary: f64::from(salary),
                basic_rate_a: f64::from(rate_a_tenths) / 1000.0,
                basic_rate_b: f64::from(rate_b_halves) / 200.0,
                voluntary_rate: f64::from(voluntary) / 100.0,
                contributions_made: contributions,
                custom_sporadic_amount: f64::from(sporadic),
                plan: PlanConstants::default(),
            };

            let result = run_calculation(&inputs);
            prop_assert!((0.0..=1.0).contains(&result.progress_ratio));
            prop_assert!(result.excess_over_reference >= 0.0);
            prop_assert!(result.basic_contribution_b >= 0.0);
            if result.suggested_sporadic <= 0.0 {
                prop_assert_eq!(result.sporadic_advice, SporadicAdvice::TargetMet);
            }
            if result.current_fiscal_fraction >= inputs.plan.max_fiscal_percent {
                prop_assert!(result.suggested_sporadic <= EPS);
            }
        }
    }
}
