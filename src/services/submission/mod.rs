pub mod log;
pub mod webhook;

use async_trait::async_trait;

use crate::models::{Booking, Inquiry};

/// Hands finished bookings and inquiries to whatever backend the business
/// uses. Called once per submission; retries are the customer's decision.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit_booking(&self, booking: &Booking) -> anyhow::Result<()>;
    async fn submit_inquiry(&self, inquiry: &Inquiry) -> anyhow::Result<()>;
}
