use std::time::Duration;

use async_trait::async_trait;

use super::Submitter;
use crate::models::inquiry::format_file_size;
use crate::models::quote::format_price;
use crate::models::{Booking, Inquiry};

/// Accepts everything after a short pause and writes it to the log.
pub struct LogSubmitter {
    booking_latency: Duration,
    inquiry_latency: Duration,
}

impl LogSubmitter {
    pub fn new(booking_latency: Duration) -> Self {
        Self {
            booking_latency,
            // inquiries pause a third longer than bookings
            inquiry_latency: booking_latency + booking_latency / 3,
        }
    }
}

#[async_trait]
impl Submitter for LogSubmitter {
    async fn submit_booking(&self, booking: &Booking) -> anyhow::Result<()> {
        tokio::time::sleep(self.booking_latency).await;

        let details = &booking.details;
        tracing::info!(
            booking_id = %booking.id,
            status = booking.status.as_str(),
            customer = %format!("{} ({})", details.customer_name, details.customer_email),
            service = %details.service_id,
            add_ons = ?details.add_on_ids,
            vehicle = %details.vehicle_summary(),
            date = ?details.date,
            time = %details.time,
            total = %format_price(booking.total_price_cents),
            special_requests = details.special_requests.as_deref().unwrap_or("None"),
            "new booking received"
        );
        Ok(())
    }

    async fn submit_inquiry(&self, inquiry: &Inquiry) -> anyhow::Result<()> {
        tokio::time::sleep(self.inquiry_latency).await;

        let attachment_bytes: u64 = inquiry.details.attachments.iter().map(|a| a.size_bytes).sum();
        tracing::info!(
            inquiry_id = %inquiry.id,
            status = inquiry.status.as_str(),
            name = %inquiry.details.name,
            email = %inquiry.details.email,
            attachments = inquiry.details.attachments.len(),
            attachment_size = %format_file_size(attachment_bytes),
            "inquiry submitted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::{Attachment, BookingDraft, BookingStatus, InquiryDraft, InquiryStatus};

    #[tokio::test]
    async fn test_log_submitter_always_succeeds() {
        let submitter = LogSubmitter::new(Duration::from_millis(1));
        let booking = Booking {
            id: "b-1".into(),
            details: BookingDraft::with_service("basic"),
            total_price_cents: 3500,
            duration_minutes: 60,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(submitter.submit_booking(&booking).await.is_ok());
    }

    #[tokio::test]
    async fn test_log_submitter_accepts_inquiry_with_attachments() {
        let submitter = LogSubmitter::new(Duration::from_millis(1));
        let inquiry = Inquiry {
            id: "i-1".into(),
            details: InquiryDraft {
                name: "Sam".into(),
                email: "sam@example.com".into(),
                phone: None,
                message: "Can you fix swirl marks?".into(),
                attachments: vec![Attachment {
                    filename: "hood.jpg".into(),
                    mime_type: "image/jpeg".into(),
                    size_bytes: 1536,
                }],
            },
            status: InquiryStatus::New,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(submitter.submit_inquiry(&inquiry).await.is_ok());
    }

    #[test]
    fn test_inquiry_latency_longer() {
        let submitter = LogSubmitter::new(Duration::from_millis(1500));
        assert_eq!(submitter.inquiry_latency, Duration::from_millis(2000));
    }
}
