//! Shared application state for axum handlers.

use std::sync::Arc;

use folio_app::ports::MessageRelay;
use folio_domain::profile::Profile;

use crate::sessions::ContactSessions;

/// Application state shared across all axum handlers.
///
/// Generic over the relay to avoid dynamic dispatch. `Clone` is implemented
/// manually so the relay itself does not need to be `Clone`; only the `Arc`
/// wrappers are cloned.
pub struct AppState<R> {
    /// Portfolio content rendered on the page.
    pub profile: Arc<Profile>,
    /// Contact form controllers, one per visitor.
    pub sessions: Arc<ContactSessions<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            profile: Arc::clone(&self.profile),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<R> AppState<R>
where
    R: MessageRelay + Send + Sync + 'static,
{
    /// Create a new application state.
    pub fn new(profile: Profile, sessions: ContactSessions<R>) -> Self {
        Self {
            profile: Arc::new(profile),
            sessions: Arc::new(sessions),
        }
    }

    /// Create a new application state from a pre-wrapped registry.
    ///
    /// Use this when the registry is shared with a background sweeper.
    pub fn from_arcs(profile: Arc<Profile>, sessions: Arc<ContactSessions<R>>) -> Self {
        Self { profile, sessions }
    }
}
