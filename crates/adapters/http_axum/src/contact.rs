//! Contact form submission over plain HTML forms (PRG).

use axum::extract::{Form, State};
use axum::response::Redirect;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use tokio::task::JoinError;

use folio_app::ports::MessageRelay;
use folio_domain::contact::FormState;
use folio_domain::id::SessionId;
use folio_domain::submission::SubmitOutcome;

use crate::error::PageError;
use crate::sessions::{SESSION_COOKIE, SharedController};
use crate::state::AppState;

/// Session id carried by the request, if any and well-formed.
pub(crate) fn session_id(jar: &CookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| cookie.value().parse().ok())
}

pub(crate) fn session_cookie(id: SessionId) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Submit the posted values. They are discarded when a delivery is already
/// in flight.
///
/// The submission runs on its own task so the relay call completes even if
/// the client goes away before the response.
pub(crate) async fn submit<R>(
    controller: SharedController<R>,
    form: FormState,
) -> Result<SubmitOutcome, JoinError>
where
    R: MessageRelay + Send + Sync + 'static,
{
    tokio::spawn(async move { controller.submit_form(form).await }).await
}

/// `POST /contact` — submit the form, then redirect back to the contact
/// section where the outcome is rendered.
pub async fn post<R>(
    State(state): State<AppState<R>>,
    jar: CookieJar,
    Form(form): Form<FormState>,
) -> Result<(CookieJar, Redirect), PageError>
where
    R: MessageRelay + Send + Sync + 'static,
{
    let (id, controller) = state.sessions.get_or_create(session_id(&jar));
    let outcome = submit(controller, form).await?;
    tracing::debug!(session = %id, ?outcome, "contact form posted");
    Ok((jar.add(session_cookie(id)), Redirect::to("/#contact")))
}
