use axum::{
    Router,
    extract::Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::core::{
    CoreError, DEFAULT_DEADLINE_LIMIT, Deadline, FinanceSummary, Investment, RecurringGroup,
    ReminderBook, TaxEstimate, Transaction, UpcomingBill, annual_tax, detect_recurring,
    estimate_from_transactions, monthly_tax, project, sars_calendar, summarize, upcoming_bills,
    upcoming_deadlines,
};

const DEFAULT_PROJECTION_MONTHS: u32 = 24;
const MAX_PROJECTION_MONTHS: u32 = 600;

#[derive(Debug, Deserialize)]
struct TaxPayload {
    income: f64,
}

#[derive(Debug, Serialize)]
struct TaxResponse {
    tax: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TransactionsPayload {
    transactions: Vec<Transaction>,
    today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecurringResponse {
    groups: Vec<RecurringGroup>,
    upcoming_bills: Vec<UpcomingBill>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionPayload {
    investment: Investment,
    months: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ProjectionResponse {
    series: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewReminder {
    label: String,
    date: NaiveDate,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DeadlinesPayload {
    reminders: Vec<Deadline>,
    add: Option<NewReminder>,
    now: Option<NaiveDate>,
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeadlinesResponse {
    deadlines: Vec<Deadline>,
    reminders: Vec<Deadline>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/api/tax/annual", post(annual_tax_handler))
        .route("/api/tax/monthly", post(monthly_tax_handler))
        .route("/api/tax/estimate", post(tax_estimate_handler))
        .route("/api/recurring", post(recurring_handler))
        .route("/api/projection", post(projection_handler))
        .route("/api/deadlines", post(deadlines_handler))
        .route("/api/summary", post(summary_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    info!("fintrack API listening on http://{addr}");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    "fintrack API: POST /api/tax/{annual,monthly,estimate}, /api/recurring, \
     /api/projection, /api/deadlines, /api/summary"
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn annual_tax_handler(Json(payload): Json<TaxPayload>) -> Response {
    match annual_tax(payload.income) {
        Ok(tax) => json_response(StatusCode::OK, TaxResponse { tax }),
        Err(err) => core_error_response(err),
    }
}

async fn monthly_tax_handler(Json(payload): Json<TaxPayload>) -> Response {
    match monthly_tax(payload.income) {
        Ok(tax) => json_response(StatusCode::OK, TaxResponse { tax }),
        Err(err) => core_error_response(err),
    }
}

async fn tax_estimate_handler(Json(payload): Json<TransactionsPayload>) -> Response {
    match build_tax_estimate(payload) {
        Ok(estimate) => json_response(StatusCode::OK, estimate),
        Err(err) => core_error_response(err),
    }
}

async fn recurring_handler(Json(payload): Json<TransactionsPayload>) -> Response {
    json_response(StatusCode::OK, build_recurring_response(payload))
}

async fn projection_handler(Json(payload): Json<ProjectionPayload>) -> Response {
    match build_projection_response(payload) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(err) => core_error_response(err),
    }
}

async fn deadlines_handler(Json(payload): Json<DeadlinesPayload>) -> Response {
    match build_deadlines_response(payload) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(err) => core_error_response(err),
    }
}

async fn summary_handler(Json(payload): Json<TransactionsPayload>) -> Response {
    json_response(StatusCode::OK, build_summary(payload))
}

fn build_tax_estimate(payload: TransactionsPayload) -> Result<TaxEstimate, CoreError> {
    estimate_from_transactions(&payload.transactions)
}

fn build_recurring_response(payload: TransactionsPayload) -> RecurringResponse {
    let today = resolve_today(payload.today);
    let groups = detect_recurring(&payload.transactions);
    let upcoming_bills = upcoming_bills(&groups, today);
    RecurringResponse {
        groups,
        upcoming_bills,
    }
}

fn build_projection_response(payload: ProjectionPayload) -> Result<ProjectionResponse, CoreError> {
    let months = payload.months.unwrap_or(DEFAULT_PROJECTION_MONTHS);
    if months > MAX_PROJECTION_MONTHS {
        return Err(CoreError::InvalidInput(format!(
            "months must be at most {MAX_PROJECTION_MONTHS}, got {months}"
        )));
    }
    let series = project(&payload.investment, months)?;
    Ok(ProjectionResponse { series })
}

fn build_deadlines_response(payload: DeadlinesPayload) -> Result<DeadlinesResponse, CoreError> {
    let statics = sars_calendar();
    let mut book = ReminderBook::from_entries(payload.reminders);
    if let Some(reminder) = payload.add {
        book.add(
            &statics,
            &reminder.label,
            reminder.date,
            &reminder.description,
        )?;
    }

    let now = resolve_today(payload.now);
    let limit = payload.limit.unwrap_or(DEFAULT_DEADLINE_LIMIT);
    let deadlines = upcoming_deadlines(&statics, &book, now, limit);
    Ok(DeadlinesResponse {
        deadlines,
        reminders: book.entries().to_vec(),
    })
}

fn build_summary(payload: TransactionsPayload) -> FinanceSummary {
    let today = resolve_today(payload.today);
    summarize(&payload.transactions, today)
}

fn resolve_today(requested: Option<NaiveDate>) -> NaiveDate {
    requested.unwrap_or_else(|| Local::now().date_naive())
}

fn core_error_response(err: CoreError) -> Response {
    let status = match &err {
        CoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        CoreError::DuplicateReminder { .. } => StatusCode::CONFLICT,
    };
    warn!("request rejected: {err}");
    error_response(status, &err.to_string())
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
