use crate::selection::SelectionError;
use crate::session::SessionError;
use axum::http::StatusCode;
use std::fmt;

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

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }
}

impl From<SelectionError> for AppError {
    fn from(err: SelectionError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        Self::bad_gateway(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    Schools,
    SchoolInfo,
    Calculation,
}

impl FetchTarget {
    fn subject(self) -> &'static str {
        match self {
            FetchTarget::Schools => "list of schools",
            FetchTarget::SchoolInfo => "school info",
            FetchTarget::Calculation => "calculation",
        }
    }
}

/// A backend collaborator failed. Never retried; the text goes to the user
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub target: FetchTarget,
    pub detail: String,
}

impl FetchError {
    pub fn new(target: FetchTarget, detail: impl fmt::Display) -> Self {
        Self {
            target,
            detail: detail.to_string(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to load {}. Please report this error: {}",
            self.target.subject(),
            self.detail
        )
    }
}

impl std::error::Error for FetchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_reads_like_a_user_notice() {
        let err = FetchError::new(FetchTarget::SchoolInfo, "502 Bad Gateway");
        assert_eq!(
            err.to_string(),
            "Failed to load school info. Please report this error: 502 Bad Gateway"
        );
        let app: AppError = err.into();
        assert_eq!(app.status, StatusCode::BAD_GATEWAY);
    }
}
