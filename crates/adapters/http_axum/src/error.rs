//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;

use folio_domain::submission::{FailureReason, SubmissionStatus};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    #[serde(flatten)]
    status: SubmissionStatus,
    error: &'static str,
}

/// A contact submission that did not go through, as seen by the JSON API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Validation or delivery failure.
    #[error("{0}")]
    Rejected(FailureReason),

    /// Another submission from the same session is still in flight.
    #[error("a submission is already in flight")]
    InFlight,

    /// The submission task panicked or was cancelled.
    #[error("submission task failed")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, body) = match &self {
            Self::Rejected(reason) => {
                let code = if reason.is_validation() {
                    StatusCode::UNPROCESSABLE_ENTITY
                } else {
                    StatusCode::BAD_GATEWAY
                };
                (
                    code,
                    ErrorBody {
                        status: SubmissionStatus::Failed(*reason),
                        error: reason.user_message(),
                    },
                )
            }
            Self::InFlight => (
                StatusCode::CONFLICT,
                ErrorBody {
                    status: SubmissionStatus::Sending,
                    error: "a submission is already in flight",
                },
            ),
            Self::Task(err) => {
                tracing::error!(error = %err, "contact submission task failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        status: SubmissionStatus::Failed(FailureReason::DeliveryFailed),
                        error: FailureReason::DeliveryFailed.user_message(),
                    },
                )
            }
        };

        (code, Json(body)).into_response()
    }
}

/// Failures while serving HTML pages.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("template rendering failed")]
    Render(#[from] askama::Error),

    #[error("submission task failed")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!(error = &self as &(dyn std::error::Error + 'static), "page request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Something went wrong</h1><p>Please try again later.</p>"),
        )
            .into_response()
    }
}
