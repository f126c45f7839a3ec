use crate::store::StoreError;
use crate::views;
use axum::{
    extract::rejection::FormRejection,
    response::{IntoResponse, Response},
};
use hyper::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Form is rejected")]
    FormRejection(#[from] FormRejection),

    #[error("Parameter is missing or the value is empty: {0}")]
    MissingParameter(&'static str),

    #[error("Entry not found")]
    EntryNotFound,

    #[error("Store error")]
    StoreError(#[source] StoreError),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => Self::EntryNotFound,
            e => Self::StoreError(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let trace_message = match &self {
            Self::FormRejection(rejection) => format!("{}: {}", self, rejection),
            Self::StoreError(e) => format!("{}: {}", self, e),
            _ => self.to_string(),
        };

        match &self {
            Self::EntryNotFound => {
                tracing::info!("{}", trace_message);
                (StatusCode::NOT_FOUND, views::not_found()).into_response()
            }
            Self::FormRejection(_) | Self::MissingParameter(_) => {
                tracing::error!("{}", trace_message);
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            Self::StoreError(_) => {
                tracing::error!("{}", trace_message);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
