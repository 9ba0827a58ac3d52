use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use tera::Context;
use tracing::error;

use crate::state::AppState;

/// Errors a handler can bubble up to the user as a full error page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("page not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Marker attached to error responses; [`render_error_pages`] swaps the body
/// for the matching template.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::NotFound => self.to_string(),
            AppError::Internal(e) => {
                error!(error = ?e, "internal error");
                "internal server error".to_string()
            }
        };
        let mut res = (status, message.clone()).into_response();
        res.extensions_mut().insert(ErrorPage { status, message });
        res
    }
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

pub async fn render_error_pages(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let Some(page) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };

    let template = match page.status {
        StatusCode::NOT_FOUND => "404.html",
        _ => "500.html",
    };
    let mut ctx = Context::new();
    ctx.insert("error", &page.message);
    ctx.insert("flashes", &Vec::<String>::new());

    match state.templates.render(template, &ctx) {
        Ok(body) => (page.status, Html(body)).into_response(),
        Err(e) => {
            error!(error = %e, template, "error page render failed");
            response
        }
    }
}
