use crate::store::CheckInError;
use axum::http::StatusCode;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl From<CheckInError> for AppError {
    fn from(err: CheckInError) -> Self {
        let status = match err {
            CheckInError::OutOfPeriod { .. } => StatusCode::FORBIDDEN,
            CheckInError::AlreadyCheckedIn { .. } => StatusCode::CONFLICT,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
