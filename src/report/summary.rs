use serde::Serialize;

use super::format::{
    format_currency, format_decimal, format_fraction_percent, format_rate_percent,
};
use crate::core::{ContributionResult, FiscalLimitStatus, Inputs, SporadicAdvice};

pub const TARGET_MET_MARKER: &str = "R$ 0,00 (target met)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
}

impl SummaryRow {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

pub fn build_summary(inputs: &Inputs, result: &ContributionResult) -> Vec<SummaryRow> {
    let plan = &inputs.plan;
    vec![
        SummaryRow::new("Monthly salary", format_currency(inputs.monthly_salary)),
        SummaryRow::new(
            "Estimated annual salary (14x)",
            format_currency(result.annual_salary),
        ),
        SummaryRow::new(
            "Basic contribution A (%)",
            format_rate_percent(inputs.basic_rate_a * 100.0),
        ),
        SummaryRow::new(
            "Basic contribution B (%)",
            format_rate_percent(inputs.basic_rate_b * 100.0),
        ),
        SummaryRow::new(
            "Voluntary contribution (%)",
            format_rate_percent(inputs.voluntary_rate * 100.0),
        ),
        SummaryRow::new(
            "Voluntary contribution",
            format_currency(result.voluntary_monthly),
        ),
        SummaryRow::new(
            "Reference units (fixed)",
            plan.reference_unit_count.to_string(),
        ),
        SummaryRow::new(
            "Reference unit value (fixed)",
            format_currency(plan.reference_unit_value),
        ),
        SummaryRow::new(
            "Reference units total",
            format_currency(result.reference_unit_total),
        ),
        SummaryRow::new(
            "Basic monthly contribution",
            format_currency(result.basic_monthly_total),
        ),
        SummaryRow::new(
            "Total monthly contribution",
            format_currency(result.total_monthly),
        ),
        SummaryRow::new(
            "Contributions in the year",
            inputs.contributions_made.to_string(),
        ),
        SummaryRow::new(
            "Total contributed in the year",
            format_currency(result.annual_total),
        ),
        SummaryRow::new(
            "Current percentage",
            format_fraction_percent(result.current_fiscal_fraction),
        ),
        SummaryRow::new(
            "Suggested sporadic contribution",
            suggested_sporadic_value(result),
        ),
        SummaryRow::new(
            "Custom sporadic contribution",
            format_currency(inputs.custom_sporadic_amount),
        ),
        SummaryRow::new("Final annual total", format_currency(result.final_total)),
        SummaryRow::new(
            "Final percentage",
            format_fraction_percent(result.final_fiscal_fraction),
        ),
    ]
}

fn suggested_sporadic_value(result: &ContributionResult) -> String {
    match result.sporadic_advice {
        SporadicAdvice::TargetMet => TARGET_MET_MARKER.to_string(),
        _ => format_currency(result.suggested_sporadic),
    }
}

pub fn advice_message(inputs: &Inputs, result: &ContributionResult) -> String {
    let limit = format_fraction_percent(inputs.plan.max_fiscal_percent);
    let suggestion = format!(
        "Suggested sporadic contribution: {}. Contributing this amount uses the full {limit} fiscal benefit.",
        format_currency(result.suggested_sporadic)
    );
    match result.sporadic_advice {
        SporadicAdvice::TargetMet => format!(
            "Target met: annual contributions already reach the {limit} fiscal limit. No sporadic contribution is needed."
        ),
        SporadicAdvice::WithinRange => suggestion,
        SporadicAdvice::BelowMinimum => format!(
            "{suggestion} Warning: the suggested amount is below the minimum allowed of {}.",
            format_currency(result.sporadic_min)
        ),
        SporadicAdvice::AboveMaximum => format!(
            "{suggestion} Warning: the suggested amount is above the maximum allowed of {}.",
            format_currency(result.sporadic_max)
        ),
    }
}

pub fn fiscal_limit_message(inputs: &Inputs, result: &ContributionResult) -> String {
    let limit = format_fraction_percent(inputs.plan.max_fiscal_percent);
    let final_pct = format_fraction_percent(result.final_fiscal_fraction);
    match result.fiscal_limit_status {
        FiscalLimitStatus::Within => format!(
            "Within limit: your final percentage of {final_pct} is within the {limit} fiscal limit."
        ),
        FiscalLimitStatus::Exceeded => format!(
            "Over limit: your final percentage of {final_pct} exceeds the {limit} fiscal limit."
        ),
    }
}

pub fn render_table(rows: &[SummaryRow]) -> String {
    const LABEL_HEADER: &str = "Description";
    const VALUE_HEADER: &str = "Value";

    let width = rows
        .iter()
        .map(|row| row.label.len())
        .chain(std::iter::once(LABEL_HEADER.len()))
        .max()
        .unwrap_or(0);

    let mut out = format!("{LABEL_HEADER:<width$}  {VALUE_HEADER}\n");
    out.push_str(&"-".repeat(width + 2 + VALUE_HEADER.len().max(16)));
    out.push('\n');
    for row in rows {
        out.push_str(&format!("{:<width$}  {}\n", row.label, row.value));
    }
    out
}

/// Progress bar text for `progress_ratio`, e.g. `[#####-----] 50%`.
pub fn render_progress(ratio: f64, cells: usize) -> String {
    let ratio = ratio.clamp(0.0, 1.0);
    let filled = (ratio * cells as f64).round() as usize;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(cells - filled),
        format_decimal(ratio * 100.0, 0)
    )
}
