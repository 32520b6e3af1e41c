//! HTTP routes

use crate::archive::{archive_name, zip_documents};
use crate::config::Settings;
use crate::error::ServerError;
use crate::generate::{generate_forms, GeneratedPdf};
use applicant::FormData;
use axum::extract::State;
use axum::http::{header, HeaderValue};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use std::sync::Arc;
use tracing::info;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Form field naming the form for `/generate-pdf`
pub const FORM_ID_KEY: &str = "form_id";

type AppState = Arc<Settings>;

/// Build the application router
pub fn router(settings: Settings) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/generate-pdf", post(generate_pdf))
        .route("/generate-pdfs", post(generate_pdfs))
        .with_state(Arc::new(settings))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> &'static str {
    "ok"
}

async fn generate_pdf(
    State(settings): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, ServerError> {
    let data = FormData::from_pairs(pairs);
    let form_id = data
        .get(FORM_ID_KEY)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(ServerError::NoFormSelected)?
        .to_string();

    info!(form = %form_id, "generate-pdf");
    let mut documents = run_generation(settings, vec![form_id], data).await?;
    match documents.pop() {
        Some(doc) => Ok(pdf_response(doc)),
        None => Err(ServerError::NoFormSelected),
    }
}

async fn generate_pdfs(
    State(settings): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, ServerError> {
    let data = FormData::from_pairs(pairs);
    let form_ids = requested_forms(&settings, &data);
    info!(forms = ?form_ids, "generate-pdfs");

    let last_name = data.last_name().map(str::to_string);
    let mut documents = run_generation(settings, form_ids, data).await?;

    if documents.len() == 1 {
        if let Some(doc) = documents.pop() {
            return Ok(pdf_response(doc));
        }
    }

    let archive = zip_documents(&documents)?;
    Ok(attachment(
        "application/zip",
        &archive_name(last_name.as_deref()),
        archive,
    ))
}

/// Selected form ids without repeats, or every form when none was selected
fn requested_forms(settings: &Settings, data: &FormData) -> Vec<String> {
    if data.selected_forms().is_empty() {
        return settings.forms.ids().map(str::to_string).collect();
    }

    let mut ids: Vec<String> = Vec::new();
    for id in data.selected_forms() {
        if !ids.contains(id) {
            ids.push(id.clone());
        }
    }
    ids
}

async fn run_generation(
    settings: AppState,
    form_ids: Vec<String>,
    data: FormData,
) -> Result<Vec<GeneratedPdf>, ServerError> {
    let today = applicant::today();
    tokio::task::spawn_blocking(move || generate_forms(&settings, &form_ids, &data, today)).await?
}

fn pdf_response(doc: GeneratedPdf) -> Response {
    attachment("application/pdf", &doc.file_name, doc.bytes)
}

fn attachment(content_type: &'static str, file_name: &str, body: Vec<u8>) -> Response {
    let disposition = HeaderValue::from_bytes(
        format!("attachment; filename=\"{file_name}\"").as_bytes(),
    )
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}
