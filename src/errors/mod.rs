use std::{fmt, io};
use axum::{http::StatusCode, response::{IntoResponse, Response}};

/// Custom error types for the wiki application
#[derive(Debug)]
pub enum WikiError {
    /// Title failed validation; carries the rejected candidate
    InvalidTitle(String),
    NotFound,
    /// I/O failure while reading or writing page content
    Storage(io::Error),
    Render(String),
    Io(io::Error),
    InvalidConfig(String),
}

impl fmt::Display for WikiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WikiError::InvalidTitle(t) => write!(f, "Invalid page title: {:?}", t),
            WikiError::NotFound => write!(f, "Not found"),
            WikiError::Storage(e) => write!(f, "Storage error: {}", e),
            WikiError::Render(e) => write!(f, "Render error: {}", e),
            WikiError::Io(e) => write!(f, "I/O error: {}", e),
            WikiError::InvalidConfig(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for WikiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WikiError::Storage(e) | WikiError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for WikiError {
    fn from(err: io::Error) -> Self {
        WikiError::Io(err)
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            WikiError::InvalidTitle(title) => {
                log::warn!("Rejected invalid page title: {:?}", title);
                (StatusCode::NOT_FOUND, "404 page not found").into_response()
            }
            WikiError::NotFound => (StatusCode::NOT_FOUND, "404 page not found").into_response(),
            other => {
                log::error!("Request failed: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()).into_response()
            }
        }
    }
}
