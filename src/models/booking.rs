use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// In-progress booking form contents. Everything is optional or empty until the
/// customer fills it in; validation decides whether it can be submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingDraft {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub service_id: String,
    pub add_on_ids: Vec<String>,
    pub date: Option<NaiveDate>,
    pub time: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: String,
    pub vehicle_color: String,
    pub special_requests: Option<String>,
}

impl BookingDraft {
    pub fn with_service(service_id: &str) -> Self {
        Self {
            service_id: service_id.to_string(),
            ..Self::default()
        }
    }

    /// Collapses repeated add-on ids, keeping the order they were first picked in.
    pub fn dedup_add_ons(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.add_on_ids.retain(|id| seen.insert(id.clone()));
    }

    pub fn vehicle_summary(&self) -> String {
        format!(
            "{} {} {}",
            self.vehicle_year.trim(),
            self.vehicle_make.trim(),
            self.vehicle_model.trim()
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[serde(flatten)]
    pub details: BookingDraft,
    pub total_price_cents: i64,
    pub duration_minutes: i32,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}
