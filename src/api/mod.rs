mod error;

use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, error::ErrorKind};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

pub use error::InputError;
use error::{ensure_above, ensure_in_range};

use crate::core::{
    ContributionResult, FiscalLimitStatus, Inputs, MAX_CONTRIBUTIONS_PER_YEAR, PlanConstants,
    SporadicAdvice, custom_sporadic_bounds, run_calculation,
};
use crate::report::{
    SummaryRow, advice_message, build_summary, fiscal_limit_message, render_progress, render_table,
};

const DEFAULT_CUSTOM_SPORADIC: f64 = 5_000.0;
const MAX_MONTHLY_SALARY: f64 = 1_000_000_000.0;
const PROGRESS_CELLS: usize = 30;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    monthly_salary: Option<f64>,
    basic_rate_a: Option<f64>,
    basic_rate_b: Option<f64>,
    voluntary_rate: Option<f64>,
    contributions_made: Option<u32>,
    custom_sporadic: Option<f64>,

    reference_unit_value: Option<f64>,
    reference_unit_count: Option<u32>,
    max_fiscal_percent: Option<f64>,
}

#[derive(Parser, Debug)]
#[command(
    name = "sporadic",
    version,
    about = "Pension contribution simulator (basic A/B + voluntary + sporadic contribution for the fiscal limit)"
)]
struct Cli {
    #[arg(long, default_value_t = 10_000.0, help = "Gross monthly salary")]
    monthly_salary: f64,
    #[arg(
        long,
        default_value_t = 2.0,
        help = "Basic contribution A in percent of the full salary (0-100)"
    )]
    basic_rate_a: f64,
    #[arg(
        long,
        default_value_t = 10.0,
        help = "Basic contribution B in percent of the salary above the reference units (4.5-10)"
    )]
    basic_rate_b: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Voluntary contribution in percent of salary (0-10)"
    )]
    voluntary_rate: f64,
    #[arg(
        long,
        default_value_t = 13,
        help = "Contributions made in the year (0-13)"
    )]
    contributions_made: u32,
    #[arg(
        long,
        help = "Custom sporadic contribution; defaults to 5000 clamped into the allowed range"
    )]
    custom_sporadic: Option<f64>,
    #[arg(long, help = "Reference unit (UR) value; defaults to 795.68")]
    reference_unit_value: Option<f64>,
    #[arg(
        long,
        help = "Reference units deducted before contribution B applies; defaults to 7"
    )]
    reference_unit_count: Option<u32>,
    #[arg(
        long,
        help = "Fiscal deduction limit in percent of annual salary; defaults to 12"
    )]
    max_fiscal_percent: Option<f64>,
    #[arg(long, help = "Print the full JSON response instead of the summary table")]
    json: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct Bounds {
    min: f64,
    max: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateResponse {
    inputs: Inputs,
    result: ContributionResult,
    advice: SporadicAdvice,
    advice_message: String,
    fiscal_limit: FiscalLimitStatus,
    fiscal_limit_message: String,
    custom_sporadic_bounds: Bounds,
    summary: Vec<SummaryRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DefaultsResponse {
    inputs: Inputs,
    custom_sporadic_bounds: Bounds,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(cli: &Cli) -> Result<Inputs, InputError> {
    let mut plan = PlanConstants::default();
    if let Some(v) = cli.reference_unit_value {
        let value = ensure_above("--reference-unit-value", v, 0.0)?;
        plan.reference_unit_value =
            ensure_in_range("--reference-unit-value", value, 0.0, MAX_MONTHLY_SALARY)?;
    }
    if let Some(v) = cli.reference_unit_count {
        if v == 0 {
            return Err(InputError::NotAbove {
                name: "--reference-unit-count",
                min: 0.0,
                value: 0.0,
            });
        }
        plan.reference_unit_count = v;
    }
    if let Some(v) = cli.max_fiscal_percent {
        let percent = ensure_above("--max-fiscal-percent", v, 0.0)?;
        plan.max_fiscal_percent =
            ensure_in_range("--max-fiscal-percent", percent, 0.0, 100.0)? / 100.0;
    }

    let monthly_salary =
        ensure_in_range("--monthly-salary", cli.monthly_salary, 0.0, MAX_MONTHLY_SALARY)?;
    let basic_rate_a = ensure_in_range("--basic-rate-a", cli.basic_rate_a, 0.0, 100.0)?;
    let basic_rate_b = ensure_in_range("--basic-rate-b", cli.basic_rate_b, 4.5, 10.0)?;
    let voluntary_rate = ensure_in_range("--voluntary-rate", cli.voluntary_rate, 0.0, 10.0)?;
    if cli.contributions_made > MAX_CONTRIBUTIONS_PER_YEAR {
        return Err(InputError::OutOfRange {
            name: "--contributions-made",
            min: 0.0,
            max: f64::from(MAX_CONTRIBUTIONS_PER_YEAR),
            value: f64::from(cli.contributions_made),
        });
    }

    let (sporadic_min, sporadic_max) = custom_sporadic_bounds(monthly_salary, &plan);
    let custom_sporadic_amount = match cli.custom_sporadic {
        Some(v) => ensure_in_range("--custom-sporadic", v, sporadic_min, sporadic_max)?,
        None => DEFAULT_CUSTOM_SPORADIC.clamp(sporadic_min, sporadic_max),
    };

    Ok(Inputs {
        monthly_salary,
        basic_rate_a: basic_rate_a / 100.0,
        basic_rate_b: basic_rate_b / 100.0,
        voluntary_rate: voluntary_rate / 100.0,
        contributions_made: cli.contributions_made,
        custom_sporadic_amount,
        plan,
    })
}

pub fn run_cli<I, T>(args: I) -> anyhow::Result<String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return Ok(err.render().to_string());
        }
        Err(err) => return Err(err.into()),
    };
    let inputs = build_inputs(&cli)?;
    let response = build_simulate_response(inputs);

    if cli.json {
        let mut json = serde_json::to_string_pretty(&response)?;
        json.push('\n');
        return Ok(json);
    }

    let mut out = render_table(&response.summary);
    out.push('\n');
    out.push_str(&format!(
        "Fiscal benefit progress: {}\n",
        render_progress(response.result.progress_ratio, PROGRESS_CELLS)
    ));
    out.push_str(&response.advice_message);
    out.push('\n');
    out.push_str(&response.fiscal_limit_message);
    out.push('\n');
    Ok(out)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "contribution simulator API listening");
    info!("local access: http://127.0.0.1:{port}/api/simulate");

    axum::serve(listener, app()).await
}

fn app() -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/api/defaults", get(defaults_handler))
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .fallback(not_found_handler)
}

async fn health_handler() -> impl IntoResponse {
    with_cache_control("ok")
}

async fn defaults_handler() -> Response {
    let cli = default_cli_for_api();
    match build_inputs(&cli) {
        Ok(inputs) => {
            let (min, max) = custom_sporadic_bounds(inputs.monthly_salary, &inputs.plan);
            json_response(
                StatusCode::OK,
                DefaultsResponse {
                    inputs,
                    custom_sporadic_bounds: Bounds { min, max },
                },
            )
        }
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()),
    }
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn simulate_get_handler(
    payload: Result<Query<SimulatePayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => simulate_handler_impl(payload).await,
        Err(rejection) => {
            warn!(error = %rejection, "rejected simulation query");
            error_response(rejection.status(), &rejection.body_text())
        }
    }
}

async fn simulate_post_handler(
    payload: Result<Json<SimulatePayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => simulate_handler_impl(payload).await,
        Err(rejection) => {
            warn!(error = %rejection, "rejected simulation body");
            error_response(rejection.status(), &rejection.body_text())
        }
    }
}

async fn simulate_handler_impl(payload: SimulatePayload) -> Response {
    let inputs = match inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(err) => {
            warn!(field = err.name(), error = %err, "rejected simulation input");
            return error_response(StatusCode::BAD_REQUEST, &err.to_string());
        }
    };

    debug!(
        monthly_salary = inputs.monthly_salary,
        contributions_made = inputs.contributions_made,
        custom_sporadic = inputs.custom_sporadic_amount,
        "evaluating contribution simulation"
    );
    json_response(StatusCode::OK, build_simulate_response(inputs))
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn inputs_from_json(json: &str) -> Result<Inputs, String> {
    let payload = serde_json::from_str::<SimulatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    inputs_from_payload(payload).map_err(|e| e.to_string())
}

fn inputs_from_payload(payload: SimulatePayload) -> Result<Inputs, InputError> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.monthly_salary {
        cli.monthly_salary = v;
    }
    if let Some(v) = payload.basic_rate_a {
        cli.basic_rate_a = v;
    }
    if let Some(v) = payload.basic_rate_b {
        cli.basic_rate_b = v;
    }
    if let Some(v) = payload.voluntary_rate {
        cli.voluntary_rate = v;
    }
    if let Some(v) = payload.contributions_made {
        cli.contributions_made = v;
    }
    if let Some(v) = payload.custom_sporadic {
        cli.custom_sporadic = Some(v);
    }

    if payload.reference_unit_value.is_some() {
        cli.reference_unit_value = payload.reference_unit_value;
    }
    if payload.reference_unit_count.is_some() {
        cli.reference_unit_count = payload.reference_unit_count;
    }
    if payload.max_fiscal_percent.is_some() {
        cli.max_fiscal_percent = payload.max_fiscal_percent;
    }

    build_inputs(&cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        monthly_salary: 10_000.0,
        basic_rate_a: 2.0,
        basic_rate_b: 10.0,
        voluntary_rate: 0.0,
        contributions_made: MAX_CONTRIBUTIONS_PER_YEAR,
        custom_sporadic: None,
        reference_unit_value: None,
        reference_unit_count: None,
        max_fiscal_percent: None,
        json: false,
    }
}

fn build_simulate_response(inputs: Inputs) -> SimulateResponse {
    let result = run_calculation(&inputs);
    let (min, max) = custom_sporadic_bounds(inputs.monthly_salary, &inputs.plan);
    SimulateResponse {
        advice: result.sporadic_advice,
        advice_message: advice_message(&inputs, &result),
        fiscal_limit: result.fiscal_limit_status,
        fiscal_limit_message: fiscal_limit_message(&inputs, &result),
        custom_sporadic_bounds: Bounds { min, max },
        summary: build_summary(&inputs, &result),
        inputs,
        result,
    }
}
