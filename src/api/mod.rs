use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    AnnuityFactorChoice, FeeSchedule, Gender, MIN_ANNUITY_FACTOR, ProjectionParameters,
    ScenarioSet, monthly_all, project_all, resolve_annuity_factor,
};
use crate::format::format_currency;
use crate::i18n::{self, Language, MessageId, TextDirection};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

const MAX_TOTAL_YEARS: u32 = 70;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliGender {
    Male,
    Female,
}

impl From<CliGender> for Gender {
    fn from(value: CliGender) -> Self {
        match value {
            CliGender::Male => Gender::Male,
            CliGender::Female => Gender::Female,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliLanguage {
    En,
    He,
}

impl From<CliLanguage> for Language {
    fn from(value: CliLanguage) -> Self {
        match value {
            CliLanguage::En => Language::English,
            CliLanguage::He => Language::Hebrew,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiGender {
    #[serde(alias = "m", alias = "Male")]
    Male,
    #[serde(alias = "f", alias = "Female")]
    Female,
}

impl From<ApiGender> for CliGender {
    fn from(value: ApiGender) -> Self {
        match value {
            ApiGender::Male => CliGender::Male,
            ApiGender::Female => CliGender::Female,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiLanguage {
    #[serde(alias = "english")]
    En,
    #[serde(alias = "hebrew")]
    He,
}

impl From<ApiLanguage> for CliLanguage {
    fn from(value: ApiLanguage) -> Self {
        match value {
            ApiLanguage::En => CliLanguage::En,
            ApiLanguage::He => CliLanguage::He,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    total_years: Option<u32>,
    contributing_years: Option<u32>,
    current_balance: Option<f64>,
    gross_monthly_salary: Option<f64>,
    gender: Option<ApiGender>,
    annuity_factor: Option<f64>,
    monthly: Option<bool>,
    #[serde(alias = "language")]
    lang: Option<ApiLanguage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MessagesQuery {
    #[serde(alias = "language")]
    lang: Option<String>,
}

#[derive(Parser, Debug)]
#[command(
    name = "pension",
    about = "Pension balance and monthly annuity estimator under fixed return scenarios",
    after_help = "Run `pension serve [port]` to start the web UI instead."
)]
struct Cli {
    #[arg(long, default_value_t = 41, help = "Years until retirement")]
    total_years: u32,
    #[arg(
        long,
        default_value_t = 39,
        help = "How many of those years you will be contributing (the last ones)"
    )]
    contributing_years: u32,
    #[arg(long, default_value_t = 27_500.0, help = "Current pension balance")]
    current_balance: f64,
    #[arg(long, default_value_t = 18_000.0, help = "Expected gross monthly salary")]
    gross_monthly_salary: f64,
    #[arg(long, value_enum, default_value_t = CliGender::Male, help = "Selects the default annuity factor")]
    gender: CliGender,
    #[arg(long, help = "Custom annuity factor; overrides the gender default")]
    annuity_factor: Option<f64>,
    #[arg(long, help = "Also show the estimated monthly pension")]
    monthly: bool,
    #[arg(long, value_enum, default_value_t = CliLanguage::En)]
    language: CliLanguage,
}

#[derive(Debug, Clone)]
struct ProjectionRequest {
    params: ProjectionParameters,
    fees: FeeSchedule,
    scenarios: ScenarioSet,
    annuity_factor: f64,
    monthly: bool,
    language: Language,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioResponse {
    key: String,
    label: String,
    rate: f64,
    final_balance: f64,
    final_balance_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    monthly_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    monthly_amount_display: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse {
    language: &'static str,
    direction: TextDirection,
    total_years: u32,
    contributing_years: u32,
    start_delay: u32,
    fees: FeeSchedule,
    annuity_factor: f64,
    results_title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    monthly_title: Option<String>,
    scenarios: Vec<ScenarioResponse>,
}

#[derive(Debug, Serialize)]
struct ScenarioLabel {
    key: String,
    label: String,
}

#[derive(Debug, Serialize)]
struct MessagesResponse {
    language: &'static str,
    direction: TextDirection,
    messages: serde_json::Map<String, serde_json::Value>,
    scenarios: Vec<ScenarioLabel>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_request(cli: Cli) -> Result<ProjectionRequest, String> {
    if cli.total_years == 0 || cli.total_years > MAX_TOTAL_YEARS {
        return Err(format!(
            "--total-years must be between 1 and {MAX_TOTAL_YEARS}"
        ));
    }

    if cli.contributing_years > cli.total_years {
        return Err("--contributing-years must be <= --total-years".to_string());
    }

    if !cli.current_balance.is_finite() || cli.current_balance < 0.0 {
        return Err("--current-balance must be >= 0".to_string());
    }

    if !cli.gross_monthly_salary.is_finite() || cli.gross_monthly_salary < 0.0 {
        return Err("--gross-monthly-salary must be >= 0".to_string());
    }

    let choice = match cli.annuity_factor {
        Some(factor) => {
            if !factor.is_finite() || factor < MIN_ANNUITY_FACTOR {
                return Err(format!("--annuity-factor must be >= {MIN_ANNUITY_FACTOR}"));
            }
            AnnuityFactorChoice::Override(factor)
        }
        None => AnnuityFactorChoice::Category(cli.gender.into()),
    };
    let annuity_factor = resolve_annuity_factor(choice).map_err(|e| e.to_string())?;

    let params = ProjectionParameters::new(
        cli.total_years,
        cli.contributing_years,
        cli.current_balance,
        cli.gross_monthly_salary,
    )
    .map_err(|e| e.to_string())?;

    Ok(ProjectionRequest {
        params,
        fees: FeeSchedule::default(),
        scenarios: ScenarioSet::standard(),
        annuity_factor,
        monthly: cli.monthly,
        language: cli.language.into(),
    })
}

fn run_projection(request: &ProjectionRequest) -> Result<ProjectionResponse, String> {
    let language = request.language;
    let currency = i18n::text(language, MessageId::Currency);
    let result = project_all(&request.params, &request.scenarios, request.fees);
    let monthly = if request.monthly {
        Some(monthly_all(&result, request.annuity_factor).map_err(|e| e.to_string())?)
    } else {
        None
    };

    let scenarios = result
        .iter()
        .map(|outcome| {
            let monthly_amount = monthly.as_ref().and_then(|m| m.get(&outcome.key));
            ScenarioResponse {
                key: outcome.key.clone(),
                label: i18n::scenario_label(language, &outcome.key)
                    .map(str::to_string)
                    .unwrap_or_else(|| outcome.key.clone()),
                rate: outcome.rate,
                final_balance: outcome.final_balance,
                final_balance_display: format_currency(outcome.final_balance, currency),
                monthly_amount,
                monthly_amount_display: monthly_amount
                    .map(|amount| format_currency(amount, currency)),
            }
        })
        .collect();

    Ok(ProjectionResponse {
        language: language.code(),
        direction: language.direction(),
        total_years: request.params.total_years,
        contributing_years: request.params.contributing_years,
        start_delay: request.params.start_delay(),
        fees: request.fees,
        annuity_factor: request.annuity_factor,
        results_title: i18n::text(language, MessageId::ResultsTitle),
        monthly_title: request
            .monthly
            .then(|| i18n::monthly_title(language, request.annuity_factor)),
        scenarios,
    })
}

fn render_report(response: &ProjectionResponse, language: Language) -> String {
    let mut out = String::new();
    out.push_str(response.results_title);
    out.push('\n');
    for scenario in &response.scenarios {
        out.push_str(&format!(
            "{}: {}\n",
            scenario.label, scenario.final_balance_display
        ));
    }

    if let Some(title) = &response.monthly_title {
        let per_month = i18n::text(language, MessageId::PerMonth);
        out.push('\n');
        out.push_str(title);
        out.push('\n');
        for scenario in &response.scenarios {
            if let Some(display) = &scenario.monthly_amount_display {
                out.push_str(&format!("{}: {display} {per_month}\n", scenario.label));
            }
        }
    }
    out
}

pub fn run_cli() -> Result<String, String> {
    let cli = Cli::parse();
    let request = build_request(cli)?;
    let response = run_projection(&request)?;
    Ok(render_report(&response, request.language))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route("/api/messages", get(messages_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    info!("pension HTTP API listening on http://{addr}");
    info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => {
            warn!("rejected projection request: {msg}");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    info!(
        "projecting {} scenarios over {} years ({} contributing)",
        request.scenarios.len(),
        request.params.total_years,
        request.params.contributing_years
    );
    match run_projection(&request) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(msg) => {
            warn!("projection failed: {msg}");
            error_response(StatusCode::BAD_REQUEST, &msg)
        }
    }
}

async fn messages_handler(Query(query): Query<MessagesQuery>) -> Response {
    match messages_language(&query) {
        Ok(language) => json_response(StatusCode::OK, build_messages_response(language)),
        Err(msg) => {
            warn!("rejected messages request: {msg}");
            error_response(StatusCode::BAD_REQUEST, &msg)
        }
    }
}

fn messages_language(query: &MessagesQuery) -> Result<Language, String> {
    match query.lang.as_deref() {
        None => Ok(Language::English),
        Some(code) => {
            Language::from_code(code).ok_or_else(|| format!("unsupported language: {code}"))
        }
    }
}

fn build_messages_response(language: Language) -> MessagesResponse {
    let messages = i18n::catalog(language)
        .into_iter()
        .map(|(key, text)| (key.to_string(), serde_json::Value::from(text)))
        .collect();
    let scenarios = ScenarioSet::standard()
        .iter()
        .map(|scenario| ScenarioLabel {
            key: scenario.key.clone(),
            label: i18n::scenario_label(language, &scenario.key)
                .unwrap_or(scenario.key.as_str())
                .to_string(),
        })
        .collect();

    MessagesResponse {
        language: language.code(),
        direction: language.direction(),
        messages,
        scenarios,
    }
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
fn api_request_from_json(json: &str) -> Result<ProjectionRequest, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: ProjectPayload) -> Result<ProjectionRequest, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.total_years {
        cli.total_years = v;
    }
    if let Some(v) = payload.contributing_years {
        cli.contributing_years = v;
    }
    if let Some(v) = payload.current_balance {
        cli.current_balance = v;
    }
    if let Some(v) = payload.gross_monthly_salary {
        cli.gross_monthly_salary = v;
    }
    if let Some(v) = payload.gender {
        cli.gender = v.into();
    }
    if payload.annuity_factor.is_some() {
        cli.annuity_factor = payload.annuity_factor;
    }
    if let Some(v) = payload.monthly {
        cli.monthly = v;
    }
    if let Some(v) = payload.lang {
        cli.language = v.into();
    }

    build_request(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        total_years: 41,
        contributing_years: 39,
        current_balance: 27_500.0,
        gross_monthly_salary: 18_000.0,
        gender: CliGender::Male,
        annuity_factor: None,
        monthly: false,
        language: CliLanguage::En,
    }
}
