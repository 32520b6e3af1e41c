//! Request errors and their HTTP responses

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

/// Errors that end a generation request
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown form: {0}")]
    UnknownForm(String),

    #[error("No form selected")]
    NoFormSelected,

    #[error("Error generating {form_id}: {source}")]
    Generation {
        form_id: String,
        #[source]
        source: template::TemplateError,
    },

    #[error("Failed to write {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Generation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ServerError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnknownForm(_) | ServerError::NoFormSelected => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServerError::UnknownForm("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ServerError::NoFormSelected.status(), StatusCode::BAD_REQUEST);

        let generation = ServerError::Generation {
            form_id: "ex15_alzira".to_string(),
            source: template::TemplateError::InvalidGeometry("bad box".to_string()),
        };
        assert_eq!(generation.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            generation.to_string(),
            "Error generating ex15_alzira: Invalid geometry: bad box"
        );
    }

    #[test]
    fn test_response_is_plain_text() {
        let response = ServerError::UnknownForm("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }
}
