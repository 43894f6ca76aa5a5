use axum::http::StatusCode;

/// Error returned by handlers. Store read failures never get here; they
/// degrade to defaults inside `storage`.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn invalid_date(raw: &str) -> Self {
        Self::bad_request(format!("invalid date {raw:?}: expected YYYY-MM-DD"))
    }

    pub fn future_date(date: impl std::fmt::Display) -> Self {
        Self::bad_request(format!("cannot mark {date}: it is after today"))
    }

    pub fn unknown_habit(id: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("no habit with id {id}"),
        }
    }

    pub fn store(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("failed to save habits: {err}"),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::store(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::store(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
