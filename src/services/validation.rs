use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, Weekday};
use regex::Regex;

use crate::errors::{AppError, FieldError};
use crate::models::inquiry::MAX_ATTACHMENT_BYTES;
use crate::models::schedule::is_open;
use crate::models::{BookingDraft, Catalog, InquiryDraft, TimeSlot};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is valid")
});

const EARLIEST_VEHICLE_YEAR: i32 = 1900;

/// Everything a booking draft is checked against besides its own fields.
pub struct ValidationContext<'a> {
    pub catalog: &'a Catalog,
    pub slots: &'a [TimeSlot],
    pub closed_weekday: Weekday,
    pub today: NaiveDate,
}

pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s.trim())
}

/// Checks every rule and reports all failing fields at once.
pub fn validate_booking(draft: &BookingDraft, ctx: &ValidationContext<'_>) -> Result<(), AppError> {
    let mut errors = Vec::new();

    if draft.customer_name.trim().chars().count() < 2 {
        errors.push(FieldError::new(
            "customerName",
            "Name must be at least 2 characters",
        ));
    }

    if !is_valid_email(&draft.customer_email) {
        errors.push(FieldError::new("customerEmail", "Invalid email address"));
    }

    if draft.service_id.trim().is_empty() {
        errors.push(FieldError::new("serviceId", "Please select a service"));
    } else if ctx.catalog.get_service(&draft.service_id).is_err() {
        tracing::warn!(
            service_id = %draft.service_id,
            "draft references a service that is not in the catalog"
        );
        errors.push(FieldError::new(
            "serviceId",
            "Selected service is no longer offered",
        ));
    }

    for id in &draft.add_on_ids {
        if ctx.catalog.get_add_on(id).is_err() {
            tracing::warn!(add_on_id = %id, "draft references an add-on that is not in the catalog");
            errors.push(FieldError::new(
                "addOnIds",
                "Selected add-on is no longer offered",
            ));
            break;
        }
    }

    let valid_date = match draft.date {
        None => {
            errors.push(FieldError::new("date", "Please select a date"));
            None
        }
        Some(date) if date <= ctx.today => {
            errors.push(FieldError::new("date", "Please choose a future date"));
            None
        }
        Some(date) if date.weekday() == ctx.closed_weekday => {
            errors.push(FieldError::new("date", "We're closed on that day"));
            None
        }
        Some(date) => Some(date),
    };

    if draft.time.trim().is_empty() {
        errors.push(FieldError::new("time", "Please select a time"));
    } else if let Some(date) = valid_date {
        if !is_open(ctx.slots, date, &draft.time) {
            errors.push(FieldError::new("time", "That time is no longer available"));
        }
    }

    for (field, value, message) in [
        ("vehicleMake", &draft.vehicle_make, "Vehicle make is required"),
        ("vehicleModel", &draft.vehicle_model, "Vehicle model is required"),
        ("vehicleColor", &draft.vehicle_color, "Vehicle color is required"),
    ] {
        if value.trim().is_empty() {
            errors.push(FieldError::new(field, message));
        }
    }

    if !is_plausible_year(&draft.vehicle_year, ctx.today.year() + 1) {
        errors.push(FieldError::new("vehicleYear", "Please enter a valid year"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

fn is_plausible_year(s: &str, latest: i32) -> bool {
    let s = s.trim();
    if s.len() < 4 || !s.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    s.parse::<i32>()
        .map(|year| (EARLIEST_VEHICLE_YEAR..=latest).contains(&year))
        .unwrap_or(false)
}

pub fn validate_inquiry(draft: &InquiryDraft) -> Result<(), AppError> {
    let mut errors = Vec::new();

    if draft.name.trim().chars().count() < 2 {
        errors.push(FieldError::new("name", "Name must be at least 2 characters"));
    }
    if !is_valid_email(&draft.email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    if draft.message.trim().chars().count() < 10 {
        errors.push(FieldError::new(
            "message",
            "Message must be at least 10 characters",
        ));
    }
    for file in &draft.attachments {
        if !file.mime_type.starts_with("image/") {
            errors.push(FieldError::new(
                "attachments",
                format!("{} is not an image file", file.filename),
            ));
        } else if file.size_bytes > MAX_ATTACHMENT_BYTES {
            errors.push(FieldError::new(
                "attachments",
                format!("{} is too large (max 10MB)", file.filename),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}
