//! Per-visitor contact form controllers, keyed by the session cookie.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use folio_app::ports::MessageRelay;
use folio_app::services::contact_form::{ContactConfig, ContactFormController};
use folio_domain::id::SessionId;
use folio_domain::submission::FormSnapshot;
use tokio::time::Instant;

/// Name of the cookie carrying the [`SessionId`].
pub const SESSION_COOKIE: &str = "folio_session";

/// A controller shared between the registry and in-flight requests.
pub type SharedController<R> = Arc<ContactFormController<Arc<R>>>;

/// Limits of the session registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Idle time after which a session is torn down.
    pub ttl: Duration,
    /// Maximum number of live sessions. The least recently used one is
    /// evicted to make room.
    pub capacity: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30 * 60),
            capacity: 10_000,
        }
    }
}

struct Entry<R> {
    controller: SharedController<R>,
    last_seen: Instant,
}

/// Registry of live contact form controllers.
pub struct ContactSessions<R> {
    relay: Arc<R>,
    contact: ContactConfig,
    limits: SessionLimits,
    entries: Mutex<HashMap<SessionId, Entry<R>>>,
}

impl<R: MessageRelay + Send + Sync> ContactSessions<R> {
    /// Create an empty registry. Every controller shares `relay`.
    pub fn new(relay: R, contact: ContactConfig, limits: SessionLimits) -> Self {
        Self {
            relay: Arc::new(relay),
            contact,
            limits,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// How long a success message stays on screen.
    #[must_use]
    pub fn success_display(&self) -> Duration {
        self.contact.success_display
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Entry<R>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a live session without creating one.
    pub fn get(&self, id: SessionId) -> Option<SharedController<R>> {
        let now = Instant::now();
        let mut entries = self.lock();
        let entry = entries.get_mut(&id)?;
        if now.duration_since(entry.last_seen) > self.limits.ttl {
            if let Some(expired) = entries.remove(&id) {
                expired.controller.shutdown();
            }
            return None;
        }
        entry.last_seen = now;
        Some(Arc::clone(&entry.controller))
    }

    /// Snapshot of a session, or an idle empty form when there is none.
    pub fn snapshot(&self, id: Option<SessionId>) -> FormSnapshot {
        id.and_then(|id| self.get(id))
            .map(|controller| controller.snapshot())
            .unwrap_or_default()
    }

    /// Return the controller for `id`, creating a fresh session when `id` is
    /// missing, unknown or expired.
    pub fn get_or_create(&self, id: Option<SessionId>) -> (SessionId, SharedController<R>) {
        if let Some(id) = id
            && let Some(controller) = self.get(id)
        {
            return (id, controller);
        }

        self.evict_expired();

        let now = Instant::now();
        let mut entries = self.lock();
        // Linear scan per eviction, bounded by the capacity.
        while entries.len() >= self.limits.capacity.max(1) {
            let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id)
            else {
                break;
            };
            if let Some(evicted) = entries.remove(&oldest) {
                tracing::debug!(session = %oldest, "evicting least recently used contact session");
                evicted.controller.shutdown();
            }
        }

        let id = SessionId::new();
        let controller = Arc::new(ContactFormController::new(
            Arc::clone(&self.relay),
            self.contact.clone(),
        ));
        entries.insert(
            id,
            Entry {
                controller: Arc::clone(&controller),
                last_seen: now,
            },
        );
        tracing::debug!(session = %id, live = entries.len(), "contact session created");
        (id, controller)
    }

    /// Tear down every session idle for longer than the TTL. Returns how
    /// many were removed.
    pub fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let ttl = self.limits.ttl;
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| {
            let alive = now.duration_since(entry.last_seen) <= ttl;
            if !alive {
                entry.controller.shutdown();
            }
            alive
        });
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(removed, "expired contact sessions evicted");
        }
        removed
    }

    /// Number of live sessions, expired ones included until the next sweep.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Cancel every pending timer and drop all sessions.
    pub fn shutdown(&self) {
        let mut entries = self.lock();
        for entry in entries.values() {
            entry.controller.shutdown();
        }
        entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;

    use folio_app::ports::RelayCredentials;
    use folio_domain::contact::{ContactMessage, Field};
    use folio_domain::error::DeliveryError;
    use folio_domain::submission::SubmissionStatus;

    use super::*;

    struct AcceptingRelay;

    impl MessageRelay for AcceptingRelay {
        fn deliver(
            &self,
            _credentials: &RelayCredentials,
            _message: &ContactMessage,
        ) -> impl Future<Output = Result<(), DeliveryError>> + Send {
            async { Ok(()) }
        }
    }

    fn sessions(limits: SessionLimits) -> ContactSessions<AcceptingRelay> {
        ContactSessions::new(AcceptingRelay, ContactConfig::default(), limits)
    }

    #[tokio::test]
    async fn should_return_same_controller_for_known_session() {
        let sessions = sessions(SessionLimits::default());
        let (id, first) = sessions.get_or_create(None);
        first.update_field(Field::Name, "Jane");

        let (again, second) = sessions.get_or_create(Some(id));

        assert_eq!(again, id);
        assert_eq!(second.form().name, "Jane");
        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn should_create_new_session_for_unknown_id() {
        let sessions = sessions(SessionLimits::default());
        let unknown = SessionId::new();

        let (id, _) = sessions.get_or_create(Some(unknown));

        assert_ne!(id, unknown);
        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn should_render_idle_snapshot_without_session() {
        let sessions = sessions(SessionLimits::default());
        let snapshot = sessions.snapshot(None);
        assert_eq!(snapshot.status, SubmissionStatus::Idle);
        assert!(snapshot.form.is_empty());
        assert!(sessions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_expire_idle_sessions() {
        let sessions = sessions(SessionLimits {
            ttl: Duration::from_secs(60),
            capacity: 10,
        });
        let (stale, _) = sessions.get_or_create(None);
        tokio::time::advance(Duration::from_secs(45)).await;
        let (fresh, _) = sessions.get_or_create(None);
        tokio::time::advance(Duration::from_secs(30)).await;

        assert_eq!(sessions.evict_expired(), 1);
        assert!(sessions.get(stale).is_none());
        assert!(sessions.get(fresh).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn should_refresh_last_seen_on_access() {
        let sessions = sessions(SessionLimits {
            ttl: Duration::from_secs(60),
            capacity: 10,
        });
        let (id, _) = sessions.get_or_create(None);
        tokio::time::advance(Duration::from_secs(50)).await;
        assert!(sessions.get(id).is_some());
        tokio::time::advance(Duration::from_secs(50)).await;

        assert!(sessions.get(id).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn should_evict_least_recently_used_when_full() {
        let sessions = sessions(SessionLimits {
            ttl: Duration::from_secs(600),
            capacity: 2,
        });
        let (first, _) = sessions.get_or_create(None);
        tokio::time::advance(Duration::from_secs(1)).await;
        let (second, _) = sessions.get_or_create(None);
        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(sessions.get(first).is_some());
        tokio::time::advance(Duration::from_secs(1)).await;

        let (third, _) = sessions.get_or_create(None);

        assert_eq!(sessions.len(), 2);
        assert!(sessions.get(second).is_none());
        assert!(sessions.get(first).is_some());
        assert!(sessions.get(third).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn should_cancel_success_reset_when_session_is_evicted() {
        let sessions = sessions(SessionLimits {
            ttl: Duration::from_secs(600),
            capacity: 1,
        });
        let (_, controller) = sessions.get_or_create(None);
        controller.update_field(Field::Name, "Jane");
        controller.update_field(Field::Email, "jane@example.com");
        controller.update_field(Field::Message, "Hello");
        controller.submit().await;

        let _ = sessions.get_or_create(None);
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(controller.status(), SubmissionStatus::Succeeded);
    }
}
