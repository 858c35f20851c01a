use std::env;
use std::time::Duration;

use chrono::Weekday;

use crate::errors::AppError;
use crate::models::SchedulePolicy;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub schedule: SchedulePolicy,
    /// Fixed seed for the availability calendar; `None` draws one at start.
    pub availability_seed: Option<u64>,
    pub submit_timeout: Duration,
    pub simulated_latency: Duration,
    pub submission_webhook_url: Option<String>,
    pub catalog_path: Option<String>,
    pub draft_ttl_minutes: i64,
    pub testimonial_rotation_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            schedule: SchedulePolicy::default(),
            availability_seed: None,
            submit_timeout: Duration::from_secs(10),
            simulated_latency: Duration::from_millis(1500),
            submission_webhook_url: None,
            catalog_path: None,
            draft_ttl_minutes: 60,
            testimonial_rotation_secs: 5,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any name -> value source. Unset names fall back
    /// to the defaults; set but unparseable values are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let business_hours = match lookup("BUSINESS_HOURS") {
            Some(v) => SchedulePolicy::parse_hours(&v).map_err(config_err)?,
            None => defaults.schedule.business_hours,
        };
        let schedule = SchedulePolicy {
            business_hours,
            closed_weekday: parse_var::<Weekday>(&lookup, "CLOSED_WEEKDAY")?
                .unwrap_or(defaults.schedule.closed_weekday),
            horizon_days: parse_var(&lookup, "BOOKING_HORIZON_DAYS")?
                .unwrap_or(defaults.schedule.horizon_days),
            availability_probability: parse_var(&lookup, "AVAILABILITY_PROBABILITY")?
                .unwrap_or(defaults.schedule.availability_probability),
        };
        schedule.validate().map_err(config_err)?;

        let config = Self {
            port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.port),
            schedule,
            availability_seed: parse_var(&lookup, "AVAILABILITY_SEED")?,
            submit_timeout: parse_var(&lookup, "SUBMIT_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.submit_timeout),
            simulated_latency: parse_var(&lookup, "SIMULATED_LATENCY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.simulated_latency),
            submission_webhook_url: lookup("SUBMISSION_WEBHOOK_URL")
                .filter(|v| !v.trim().is_empty()),
            catalog_path: lookup("CATALOG_PATH").filter(|v| !v.trim().is_empty()),
            draft_ttl_minutes: parse_var(&lookup, "DRAFT_TTL_MINUTES")?
                .unwrap_or(defaults.draft_ttl_minutes),
            testimonial_rotation_secs: parse_var(&lookup, "TESTIMONIAL_ROTATION_SECS")?
                .unwrap_or(defaults.testimonial_rotation_secs),
        };

        if config.testimonial_rotation_secs == 0 {
            return Err(AppError::Config(
                "TESTIMONIAL_ROTATION_SECS must be positive".to_string(),
            ));
        }

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<Option<T>, AppError> {
    match lookup(name) {
        Some(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::Config(format!("invalid value for {name}: {v}"))),
        None => Ok(None),
    }
}

fn config_err(e: anyhow::Error) -> AppError {
    AppError::Config(e.to_string())
}
