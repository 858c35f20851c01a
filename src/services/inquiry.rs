use std::time::Duration;

use chrono::Utc;

use crate::errors::AppError;
use crate::models::{Inquiry, InquiryDraft, InquiryStatus};
use crate::services::session::RETRY_MESSAGE;
use crate::services::submission::Submitter;
use crate::services::validation::validate_inquiry;

/// Validates a contact-form message and passes it on as a new inquiry.
pub async fn submit_inquiry(
    draft: InquiryDraft,
    submitter: &dyn Submitter,
    timeout: Duration,
) -> Result<Inquiry, AppError> {
    validate_inquiry(&draft)?;

    let now = Utc::now();
    let inquiry = Inquiry {
        id: uuid::Uuid::new_v4().to_string(),
        details: draft,
        status: InquiryStatus::New,
        created_at: now,
        updated_at: now,
    };

    match tokio::time::timeout(timeout, submitter.submit_inquiry(&inquiry)).await {
        Ok(Ok(())) => {
            tracing::info!(inquiry_id = %inquiry.id, "inquiry accepted");
            Ok(inquiry)
        }
        Ok(Err(e)) => {
            tracing::error!(error = %format!("{e:#}"), "inquiry submission failed");
            Err(AppError::Submission(RETRY_MESSAGE.to_string()))
        }
        Err(_) => {
            tracing::error!(timeout_ms = timeout.as_millis() as u64, "inquiry submission timed out");
            Err(AppError::Submission(RETRY_MESSAGE.to_string()))
        }
    }
}
