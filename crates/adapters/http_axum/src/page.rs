//! Server-side rendered portfolio page (no JavaScript).
//!
//! The contact block is rendered from the visitor's controller snapshot.
//! While a submission is in flight or a success message is showing, the page
//! carries a `<meta http-equiv="refresh">` so it follows the state machine
//! without client script.

use std::time::Duration;

use askama::Template;
use axum::Router;
use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::Deserialize;

use folio_app::ports::MessageRelay;
use folio_domain::contact::FormState;
use folio_domain::page::{MenuState, Section, Theme, Typewriter};
use folio_domain::profile::{EducationSummary, Profile};
use folio_domain::submission::{FormSnapshot, SubmissionStatus};
use folio_domain::time::current_year;

use crate::contact::{self, session_id};
use crate::error::PageError;
use crate::state::AppState;

/// Name of the cookie storing the colour theme.
pub const THEME_COOKIE: &str = "folio_theme";

/// Build the page sub-router.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: MessageRelay + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index::<R>))
        .route("/contact", post(contact::post::<R>))
        .route("/theme", post(toggle_theme))
}

/// Query string of `GET /`.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    menu: Option<String>,
}

/// Hero headline revealed with a CSS `steps()` animation.
#[derive(Debug)]
struct HeadlineView {
    text: String,
    steps: usize,
    delay_ms: u128,
    reveal_ms: u128,
}

impl From<&Typewriter> for HeadlineView {
    fn from(typewriter: &Typewriter) -> Self {
        Self {
            text: typewriter.text().to_string(),
            steps: typewriter.steps(),
            delay_ms: typewriter.delay().as_millis(),
            reveal_ms: typewriter.reveal_duration().as_millis(),
        }
    }
}

/// What the contact block shows for one snapshot.
#[derive(Debug)]
struct ContactView<'a> {
    form: &'a FormState,
    sending: bool,
    succeeded: bool,
    error: Option<&'static str>,
    /// Seconds until the page should reload itself, if it should.
    refresh_secs: Option<u64>,
}

impl<'a> ContactView<'a> {
    fn new(snapshot: &'a FormSnapshot, success_display: Duration) -> Self {
        let refresh_secs = match snapshot.status {
            SubmissionStatus::Sending => Some(1),
            SubmissionStatus::Succeeded => Some(whole_seconds(success_display)),
            SubmissionStatus::Idle | SubmissionStatus::Failed(_) => None,
        };
        Self {
            form: &snapshot.form,
            sending: snapshot.status.is_sending(),
            succeeded: snapshot.status.is_succeeded(),
            error: snapshot.status.failure().map(|reason| reason.user_message()),
            refresh_secs,
        }
    }
}

/// Rounds up, never below one second.
fn whole_seconds(duration: Duration) -> u64 {
    let secs = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
    secs.max(1)
}

/// The whole single-page portfolio.
#[derive(Template)]
#[template(path = "portfolio.html")]
pub struct PortfolioTemplate<'a> {
    profile: &'a Profile,
    theme: Theme,
    menu: MenuState,
    navbar: &'static [Section],
    footer_quick: &'static [Section],
    footer_more: &'static [Section],
    initials: String,
    headline: HeadlineView,
    education: EducationSummary,
    average_grade: Option<String>,
    phone_href: Option<String>,
    contact: ContactView<'a>,
    year: i32,
}

impl<'a> PortfolioTemplate<'a> {
    #[must_use]
    pub fn new(
        profile: &'a Profile,
        theme: Theme,
        menu: MenuState,
        snapshot: &'a FormSnapshot,
        success_display: Duration,
    ) -> Self {
        let education = profile.education_summary();
        Self {
            profile,
            theme,
            menu,
            navbar: &Section::NAVBAR,
            footer_quick: &Section::FOOTER_QUICK,
            footer_more: &Section::FOOTER_MORE,
            initials: profile.initials(),
            headline: HeadlineView::from(&Typewriter::new(profile.owner.headline.as_str())),
            average_grade: education.average_label(),
            education,
            phone_href: profile.contact.phone_href(),
            contact: ContactView::new(snapshot, success_display),
            year: current_year(),
        }
    }
}

fn stored_theme(jar: &CookieJar) -> Theme {
    Theme::from_stored(jar.get(THEME_COOKIE).map(|cookie| cookie.value()))
}

/// `GET /` — the portfolio page.
pub async fn index<R>(
    State(state): State<AppState<R>>,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, PageError>
where
    R: MessageRelay + Send + Sync + 'static,
{
    let snapshot = state.sessions.snapshot(session_id(&jar));
    let template = PortfolioTemplate::new(
        &state.profile,
        stored_theme(&jar),
        MenuState::from_query(query.menu.as_deref()),
        &snapshot,
        state.sessions.success_display(),
    );
    Ok(Html(template.render()?))
}

/// `POST /theme` — flip between light and dark, then reload.
pub async fn toggle_theme(jar: CookieJar) -> (CookieJar, Redirect) {
    let next = stored_theme(&jar).toggled();
    tracing::debug!(theme = %next, "theme toggled");
    let cookie = Cookie::build((THEME_COOKIE, next.as_str()))
        .path("/")
        .same_site(SameSite::Lax)
        .permanent()
        .build();
    (jar.add(cookie), Redirect::to("/"))
}
