//! The `-s/--server` HTTP front-end (§6).
//!
//! A small `axum` router that exposes the same pipeline the CLI drives,
//! one request at a time. Every request builds its own graph from its own
//! request body — the server holds no session state across requests, so
//! concurrent requests never contend over a shared graph (§5).
//!
//! There is no precedent for this in the teacher workspace's own web
//! crate, which targets Dioxus/WASM rather than a synchronous local HTTP
//! server; this module is grounded instead in the `beagle-server` example
//! crate's `axum` + `tokio` + `tower-http` + `tracing` stack.

use std::net::SocketAddr;

use axum::extract::{Json, Query as QueryParams, State};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::{Deserialize, Serialize};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use expert_proof::WorldAssumption;

use crate::pipeline::solve_program;

/// A megabyte is generously more than any program this system is meant to
/// reason over (§5: "tens to a few hundreds of propositions") will ever
/// need; this just keeps a single request from burning unbounded memory.
const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
struct AppState;

/// Starts the HTTP front-end on `port` and blocks until it is shut down
/// (Ctrl-C). Builds its own Tokio runtime since [`crate::cli::run_cli`]
/// is otherwise synchronous end to end.
pub fn run(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(port))
}

async fn serve(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = Router::new()
        .route("/", get(index))
        .route("/evaluate", get(evaluate_form).post(evaluate_form_post))
        .route("/api/evaluate", axum::routing::post(evaluate_json))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(AppState);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("expert-cli server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("expert_cli=info,tower_http=info"));

    fmt().with_env_filter(env_filter).init();
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}

async fn healthz() -> &'static str {
    "ok"
}

async fn index(State(_state): State<AppState>) -> Html<String> {
    let mut usage = Vec::new();
    crate::cli::print_help(&mut usage).expect("writing to a Vec<u8> never fails");
    let usage = html_escape(&String::from_utf8_lossy(&usage));

    Html(page(format!(
        "<pre>{}</pre>\n\
         <form action=\"/evaluate\" method=\"get\">\n\
           <textarea name=\"source\" rows=\"10\" cols=\"60\" \
             placeholder=\"A=>B\n=A\n?B\"></textarea><br>\n\
           <label><input type=\"checkbox\" name=\"explain\" value=\"true\"> explain</label>\n\
           <label><input type=\"checkbox\" name=\"owa\" value=\"true\"> open world</label><br>\n\
           <button type=\"submit\">Solve</button>\n\
         </form>",
        usage
    )))
}

fn page(body: String) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"UTF-8\">\n\
         <title>Expert System</title></head><body>\n<h1>Expert System</h1>\n{}\n</body></html>",
        body
    )
}

/// Request shape accepted at `/evaluate` (form-encoded) and
/// `/api/evaluate` (JSON), both routed to the same pipeline call.
#[derive(Deserialize)]
struct EvaluateRequest {
    source: String,
    #[serde(default)]
    explain: bool,
    #[serde(default)]
    owa: bool,
}

#[derive(Serialize)]
struct EvaluateResponse {
    conclusion: String,
    explanation: String,
    dot: String,
    had_error: bool,
}

/// `GET /evaluate?source=...&explain=true&owa=true` — the HTML form's
/// submission target, mirroring the source tool's single-page form.
async fn evaluate_form(
    State(state): State<AppState>,
    QueryParams(request): QueryParams<EvaluateRequest>,
) -> Response {
    render_html(evaluate_request(state, request))
}

/// `POST /evaluate` with a form-encoded body — an alternative to the
/// `GET` route for larger programs that would overflow a query string.
async fn evaluate_form_post(State(state): State<AppState>, Form(request): Form<EvaluateRequest>) -> Response {
    render_html(evaluate_request(state, request))
}

/// `POST /api/evaluate` with a JSON body — the machine-readable
/// counterpart of the HTML form, returning `EvaluateResponse` as JSON.
async fn evaluate_json(State(state): State<AppState>, Json(request): Json<EvaluateRequest>) -> Response {
    Json(evaluate_request(state, request)).into_response()
}

fn evaluate_request(_state: AppState, request: EvaluateRequest) -> EvaluateResponse {
    let world = if request.owa {
        WorldAssumption::Open
    } else {
        WorldAssumption::Closed
    };

    match solve_program(&request.source, world, request.explain) {
        Ok(solved) => {
            let conclusion = solved
                .result
                .outcomes
                .iter()
                .map(|outcome| format!("{}\n", outcome))
                .collect();
            EvaluateResponse {
                conclusion,
                explanation: solved.result.explanation.clone(),
                dot: solved.graph.to_dot(),
                had_error: solved.result.has_error,
            }
        }
        Err(e) => EvaluateResponse {
            conclusion: format!("Error: {}\n", e),
            explanation: String::new(),
            dot: String::new(),
            had_error: true,
        },
    }
}

fn render_html(response: EvaluateResponse) -> Response {
    Html(page(format!(
        "<h2>Conclusion</h2>\n<pre>{}</pre>\n<a href=\"/\">Back</a>",
        html_escape(&response.conclusion)
    )))
    .into_response()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
