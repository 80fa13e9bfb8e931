//! HTTP handlers for the surf report

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::error::AppResult;
use crate::AppState;

/// Render the cached report as plain text
pub async fn weather_report(State(state): State<AppState>) -> AppResult<String> {
    state.reports.view().await
}

/// Refresh the snapshot and render a status page.
///
/// Always answers with a page; the status code tells success from failure.
pub async fn update_weather_report(State(state): State<AppState>) -> Response {
    match state.reports.refresh().await {
        Ok(outcome) => (StatusCode::OK, status_page(&outcome.status_message())).into_response(),
        Err(e) => {
            let status = e.status();
            let detail = e.detail();
            tracing::error!(code = detail.code, "Refresh failed: {}", e);
            let message = format!("Something broke: {}", detail.message);
            (status, status_page(&message)).into_response()
        }
    }
}

fn status_page(status: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Surf report update</title></head>\n<body>\n<p>{}</p>\n<p><a href=\"/\">Back to the report</a></p>\n</body>\n</html>\n",
        escape_html(status)
    ))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
