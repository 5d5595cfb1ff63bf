//! Contact form controller — owns one visitor's form, validates it, hands it
//! to the relay and resets the success state after a display window.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use folio_domain::contact::{ContactMessage, Field, FormState};
use folio_domain::error::{ContactError, DeliveryError};
use folio_domain::submission::{FailureReason, FormSnapshot, SubmissionStatus, SubmitOutcome};
use tokio::task::JoinHandle;

use crate::ports::{MessageRelay, RelayCredentials};

/// How long the success state stays visible before the form returns to idle.
pub const DEFAULT_SUCCESS_DISPLAY: Duration = Duration::from_secs(5);

/// Settings shared by every controller of a deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactConfig {
    pub credentials: RelayCredentials,
    pub success_display: Duration,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            credentials: RelayCredentials::default(),
            success_display: DEFAULT_SUCCESS_DISPLAY,
        }
    }
}

/// Pending success reset. Aborts the task when dropped.
#[derive(Debug)]
struct RevertTimer(JoinHandle<()>);

impl Drop for RevertTimer {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[derive(Debug, Default)]
struct Inner {
    form: FormState,
    status: SubmissionStatus,
    /// Bumped on every submission that gets past the in-flight guard.
    attempt: u64,
    revert: Option<RevertTimer>,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Puts the form back to idle if a submission future is dropped while the
/// relay call is still pending.
struct PendingDelivery<'a> {
    inner: &'a Mutex<Inner>,
    attempt: u64,
}

impl Drop for PendingDelivery<'_> {
    fn drop(&mut self) {
        let mut inner = lock(self.inner);
        if inner.attempt == self.attempt && inner.status.is_sending() {
            tracing::warn!(attempt = self.attempt, "contact submission abandoned mid-flight");
            inner.status = SubmissionStatus::Idle;
        }
    }
}

/// Application service driving a single contact form.
///
/// Every method is safe to call concurrently. At most one relay call is in
/// flight at any time.
///
/// Must be used from within a Tokio runtime: a successful submission spawns
/// the reset timer.
pub struct ContactFormController<R> {
    relay: R,
    config: ContactConfig,
    inner: Arc<Mutex<Inner>>,
}

impl<R: MessageRelay> ContactFormController<R> {
    /// Create an idle controller with an empty form.
    pub fn new(relay: R, config: ContactConfig) -> Self {
        Self {
            relay,
            config,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// Replace one field value.
    ///
    /// Returns `false` and changes nothing when the value is unchanged. A real
    /// change clears a previous failure so the message disappears while the
    /// visitor corrects the form.
    pub fn update_field(&self, field: Field, value: impl Into<String>) -> bool {
        let mut inner = lock(&self.inner);
        let changed = inner.form.set(field, value);
        if changed && inner.status.failure().is_some() {
            inner.status = SubmissionStatus::Idle;
        }
        changed
    }

    /// Validate the form and hand it to the relay.
    ///
    /// Returns [`SubmitOutcome::InFlight`] without side effects when another
    /// submission is still waiting on the relay. Otherwise any pending success
    /// reset is cancelled first, then validation runs, and only a valid form
    /// reaches the relay, exactly once.
    #[tracing::instrument(skip(self))]
    pub async fn submit(&self) -> SubmitOutcome {
        self.run(None).await
    }

    /// Replace every field with `form`, then submit as [`Self::submit`] does.
    ///
    /// The fields are written under the same lock as the in-flight check, so
    /// a form posted while another delivery is pending is dropped untouched.
    #[tracing::instrument(skip_all)]
    pub async fn submit_form(&self, form: FormState) -> SubmitOutcome {
        self.run(Some(form)).await
    }

    async fn run(&self, form: Option<FormState>) -> SubmitOutcome {
        let (attempt, message) = match self.begin(form) {
            Ok(started) => started,
            Err(outcome) => return outcome,
        };

        let pending = PendingDelivery {
            inner: &self.inner,
            attempt,
        };
        let result = self
            .relay
            .deliver(&self.config.credentials, &message)
            .await;
        let outcome = self.settle(result);
        drop(pending);
        outcome
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> SubmissionStatus {
        lock(&self.inner).status
    }

    /// Copy of the current field values.
    #[must_use]
    pub fn form(&self) -> FormState {
        lock(&self.inner).form.clone()
    }

    /// Fields and status read under one lock.
    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        let inner = lock(&self.inner);
        FormSnapshot {
            form: inner.form.clone(),
            status: inner.status,
        }
    }

    /// Cancel any pending success reset. The status stays where it is.
    pub fn shutdown(&self) {
        if lock(&self.inner).revert.take().is_some() {
            tracing::debug!("contact form reset timer cancelled");
        }
    }

    /// Synchronous part of a submission: guard, apply, cancel, validate, mark sending.
    fn begin(&self, form: Option<FormState>) -> Result<(u64, ContactMessage), SubmitOutcome> {
        let mut inner = lock(&self.inner);
        if inner.status.is_sending() {
            tracing::debug!("submission ignored, a delivery is already in flight");
            return Err(SubmitOutcome::InFlight);
        }
        if let Some(form) = form {
            inner.form = form;
        }

        inner.revert = None;
        inner.attempt = inner.attempt.wrapping_add(1);

        match inner.form.validate() {
            Ok(message) => {
                inner.status = SubmissionStatus::Sending;
                Ok((inner.attempt, message))
            }
            Err(err) => {
                let reason = ContactError::from(err).reason();
                tracing::debug!(%reason, "contact form rejected");
                inner.status = SubmissionStatus::Failed(reason);
                Err(SubmitOutcome::Rejected(reason))
            }
        }
    }

    fn settle(&self, result: Result<(), DeliveryError>) -> SubmitOutcome {
        let mut inner = lock(&self.inner);
        match result {
            Ok(()) => {
                inner.status = SubmissionStatus::Succeeded;
                inner.form.clear();
                inner.revert = Some(self.schedule_revert(inner.attempt));
                tracing::info!("contact message delivered");
                SubmitOutcome::Delivered
            }
            Err(err) => {
                tracing::error!(
                    error = &err as &(dyn std::error::Error + 'static),
                    "contact message delivery failed"
                );
                inner.status = SubmissionStatus::Failed(FailureReason::DeliveryFailed);
                SubmitOutcome::Rejected(FailureReason::DeliveryFailed)
            }
        }
    }

    fn schedule_revert(&self, attempt: u64) -> RevertTimer {
        let weak: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        let window = self.config.success_display;
        RevertTimer(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut inner = lock(&inner);
            if inner.attempt == attempt && inner.status.is_succeeded() {
                inner.status = SubmissionStatus::Idle;
                tracing::debug!("contact form reset after success");
            }
        }))
    }
}
