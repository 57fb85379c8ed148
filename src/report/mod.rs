mod format;
mod summary;

pub use format::{format_currency, format_decimal, format_fraction_percent, format_rate_percent};
pub use summary::{
    SummaryRow, TARGET_MET_MARKER, advice_message, build_summary, fiscal_limit_message,
    render_progress, render_table,
};
