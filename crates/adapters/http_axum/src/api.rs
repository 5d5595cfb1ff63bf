//! JSON API for the contact form.
//!
//! - `GET  /api/contact` — the visitor's current form and status
//! - `POST /api/contact` — submit; `200` on delivery, `422` on validation
//!   failure, `502` when the relay fails, `409` while a submission is in flight

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::CookieJar;

use folio_app::ports::MessageRelay;
use folio_domain::contact::FormState;
use folio_domain::submission::{FormSnapshot, SubmissionStatus, SubmitOutcome};

use crate::contact::{session_cookie, session_id, submit};
use crate::error::ApiError;
use crate::state::AppState;

/// Build the API sub-router, nested under `/api`.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: MessageRelay + Send + Sync + 'static,
{
    Router::new().route("/contact", get(snapshot::<R>).post(create::<R>))
}

/// `GET /api/contact`
pub async fn snapshot<R>(State(state): State<AppState<R>>, jar: CookieJar) -> Json<FormSnapshot>
where
    R: MessageRelay + Send + Sync + 'static,
{
    Json(state.sessions.snapshot(session_id(&jar)))
}

/// `POST /api/contact`
pub async fn create<R>(
    State(state): State<AppState<R>>,
    jar: CookieJar,
    Json(form): Json<FormState>,
) -> (CookieJar, Result<Json<SubmissionStatus>, ApiError>)
where
    R: MessageRelay + Send + Sync + 'static,
{
    let (id, controller) = state.sessions.get_or_create(session_id(&jar));
    let result = match submit(controller, form).await {
        Ok(SubmitOutcome::Rejected(reason)) => Err(ApiError::Rejected(reason)),
        Ok(outcome) => outcome.status().map(Json).ok_or(ApiError::InFlight),
        Err(err) => Err(ApiError::from(err)),
    };
    (jar.add(session_cookie(id)), result)
}
