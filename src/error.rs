use crate::feed::{FeedFormatError, FetchError, XmlError};
use crate::routes::MessageResponse;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Failures of one import, in the order the stages run.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] XmlError),
    #[error("Invalid feed format: {0}")]
    InvalidFeedFormat(#[from] FeedFormatError),
    #[error("Failed to persist import: {0:#}")]
    Persistence(anyhow::Error),
}

impl ImportError {
    /// The message returned to the caller. Details only go to the log.
    pub fn message(&self) -> &'static str {
        match self {
            ImportError::Fetch(_) => "Error retrieving RSS feed.",
            ImportError::Parse(_) => "Error parsing XML.",
            ImportError::InvalidFeedFormat(_) => "Invalid XML format: missing required elements.",
            ImportError::Persistence(_) => "Error saving imported articles.",
        }
    }
}

impl ResponseError for ImportError {
    fn status_code(&self) -> StatusCode {
        match self {
            ImportError::InvalidFeedFormat(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(MessageResponse::new(self.message()))
    }
}
