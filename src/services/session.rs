use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{Booking, BookingDraft, BookingStatus};
use crate::services::quote::compute_total;
use crate::services::submission::Submitter;
use crate::services::validation::{validate_booking, ValidationContext};

pub const RETRY_MESSAGE: &str =
    "Sorry, something went wrong. Please try again or call us directly.";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FormState {
    Editing,
    Submitting,
    Submitted { booking: Booking },
    Failed { message: String },
}

impl FormState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormState::Editing => "editing",
            FormState::Submitting => "submitting",
            FormState::Submitted { .. } => "submitted",
            FormState::Failed { .. } => "failed",
        }
    }
}

struct SessionInner {
    draft: BookingDraft,
    state: FormState,
    last_activity: DateTime<Utc>,
}

/// One customer's booking form: the draft and the single state that says what
/// may happen to it next.
pub struct BookingSession {
    id: String,
    initial_service: Option<String>,
    inner: Mutex<SessionInner>,
}

impl BookingSession {
    pub fn new(initial_service: Option<String>) -> Self {
        let draft = initial_service
            .as_deref()
            .map(BookingDraft::with_service)
            .unwrap_or_default();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            initial_service,
            inner: Mutex::new(SessionInner {
                draft,
                state: FormState::Editing,
                last_activity: Utc::now(),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn draft(&self) -> BookingDraft {
        self.lock().draft.clone()
    }

    pub fn state(&self) -> FormState {
        self.lock().state.clone()
    }

    /// Whether the session has been idle for longer than `ttl`. A session with
    /// a submission in flight is never stale.
    pub fn is_stale(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> bool {
        let inner = self.lock();
        inner.state != FormState::Submitting && now - inner.last_activity > ttl
    }

    /// Replaces the form contents. Only allowed while the form is editable;
    /// editing after a failure returns the form to `Editing`.
    pub fn update(&self, mut draft: BookingDraft) -> Result<(), AppError> {
        let mut inner = self.lock();
        match inner.state {
            FormState::Submitting => return Err(AppError::AlreadySubmitting),
            FormState::Submitted { .. } => return Err(AppError::DraftLocked),
            FormState::Editing | FormState::Failed { .. } => {}
        }
        draft.dedup_add_ons();
        draft.customer_email = draft.customer_email.trim().to_string();
        inner.draft = draft;
        inner.state = FormState::Editing;
        inner.last_activity = Utc::now();
        Ok(())
    }

    /// Starts over with a blank form.
    pub fn reset(&self) -> Result<(), AppError> {
        let mut inner = self.lock();
        if inner.state == FormState::Submitting {
            return Err(AppError::AlreadySubmitting);
        }
        inner.draft = self
            .initial_service
            .as_deref()
            .map(BookingDraft::with_service)
            .unwrap_or_default();
        inner.state = FormState::Editing;
        inner.last_activity = Utc::now();
        Ok(())
    }

    /// Validates the draft, turns it into a pending booking and hands it to
    /// `submitter`. At most one submission runs at a time; a second call while
    /// one is in flight fails with `AlreadySubmitting` without reaching the
    /// submitter.
    pub async fn submit(
        &self,
        ctx: &ValidationContext<'_>,
        submitter: &dyn Submitter,
        timeout: Duration,
    ) -> Result<Booking, AppError> {
        let booking = {
            let mut inner = self.lock();
            match inner.state {
                FormState::Submitting => return Err(AppError::AlreadySubmitting),
                FormState::Submitted { .. } => return Err(AppError::DraftLocked),
                FormState::Editing | FormState::Failed { .. } => {}
            }

            validate_booking(&inner.draft, ctx)?;
            let quote = compute_total(ctx.catalog, &inner.draft.service_id, &inner.draft.add_on_ids)?;

            let now = Utc::now();
            let booking = Booking {
                id: uuid::Uuid::new_v4().to_string(),
                details: inner.draft.clone(),
                total_price_cents: quote.price_cents,
                duration_minutes: quote.duration_minutes,
                status: BookingStatus::Pending,
                created_at: now,
                updated_at: now,
            };
            inner.state = FormState::Submitting;
            inner.last_activity = now;
            booking
        };

        let mut in_flight = InFlight {
            session: self,
            armed: true,
        };

        let outcome = match tokio::time::timeout(timeout, submitter.submit_booking(&booking)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(format!("{e:#}")),
            Err(_) => Err(format!("no response within {}ms", timeout.as_millis())),
        };
        in_flight.armed = false;

        let mut inner = self.lock();
        inner.last_activity = Utc::now();
        match outcome {
            Ok(()) => {
                tracing::info!(session = %self.id, booking_id = %booking.id, "booking submitted");
                inner.state = FormState::Submitted {
                    booking: booking.clone(),
                };
                Ok(booking)
            }
            Err(reason) => {
                tracing::error!(session = %self.id, error = %reason, "booking submission failed");
                inner.state = FormState::Failed {
                    message: RETRY_MESSAGE.to_string(),
                };
                Err(AppError::Submission(RETRY_MESSAGE.to_string()))
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Unlocks the form if a submit future is dropped before the submitter answers.
struct InFlight<'a> {
    session: &'a BookingSession,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::warn!(session = %self.session.id, "submission abandoned before completion");
        let mut inner = self.session.lock();
        inner.state = FormState::Failed {
            message: RETRY_MESSAGE.to_string(),
        };
    }
}
