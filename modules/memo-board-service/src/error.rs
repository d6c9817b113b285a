use axum::http::StatusCode;
use axum::Json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A record with the same unique name already exists.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// A required field is missing, blank, or out of range.
    #[error("{0}")]
    Validation(String),

    /// The request could not be parsed at all (bad JSON, bad path segment).
    #[error("{0}")]
    BadRequest(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Pool(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Conflict(_) | Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// True when the storage layer rejected a write because of a UNIQUE index.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(rusqlite::Error::SqliteFailure(err, msg)) => {
                err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || msg.as_deref().is_some_and(|m| m.contains("UNIQUE constraint"))
            }
            _ => false,
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        // Storage details stay in the log.
        let message = match &self {
            Self::Database(_) | Self::Pool(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let body = Json(serde_json::json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": message,
        }));
        (status, body).into_response()
    }
}
