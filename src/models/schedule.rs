use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub time: String,
    pub available: bool,
}

/// Longest booking window the calendar will generate.
pub const MAX_HORIZON_DAYS: u32 = 366;

/// Business policy that shapes the bookable calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulePolicy {
    pub business_hours: Vec<String>,
    pub closed_weekday: Weekday,
    pub horizon_days: u32,
    pub availability_probability: f64,
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        Self {
            business_hours: ["08:00", "10:00", "12:00", "14:00", "16:00", "18:00"]
                .iter()
                .map(|h| h.to_string())
                .collect(),
            closed_weekday: Weekday::Sun,
            horizon_days: 30,
            availability_probability: 0.7,
        }
    }
}

impl SchedulePolicy {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.business_hours.is_empty(), "business hours list is empty");
        for hour in &self.business_hours {
            parse_time(hour)?;
        }
        let mut sorted = self.business_hours.clone();
        sorted.sort();
        sorted.dedup();
        anyhow::ensure!(
            sorted.len() == self.business_hours.len(),
            "business hours contain duplicates"
        );
        anyhow::ensure!(self.horizon_days > 0, "booking horizon must be at least one day");
        anyhow::ensure!(
            self.horizon_days <= MAX_HORIZON_DAYS,
            "booking horizon must be at most {MAX_HORIZON_DAYS} days, got {}",
            self.horizon_days
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.availability_probability),
            "availability probability must be within 0..=1, got {}",
            self.availability_probability
        );
        Ok(())
    }

    pub fn parse_hours(s: &str) -> anyhow::Result<Vec<String>> {
        s.split(',')
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(|h| -> anyhow::Result<String> {
                parse_time(h)?;
                Ok(h.to_string())
            })
            .collect()
    }
}

/// Whether `slots` offers an open slot at exactly `date` and `time`.
pub fn is_open(slots: &[TimeSlot], date: NaiveDate, time: &str) -> bool {
    slots
        .iter()
        .any(|s| s.date == date && s.time == time && s.available)
}

fn parse_time(s: &str) -> anyhow::Result<()> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 || parts[0].len() != 2 || parts[1].len() != 2 {
        return Err(anyhow::anyhow!("invalid time format: {s}"));
    }
    let hour: u32 = parts[0]
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid hour in: {s}"))?;
    let minute: u32 = parts[1]
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid minute in: {s}"))?;
    if hour > 23 || minute > 59 {
        return Err(anyhow::anyhow!("time out of range: {s}"));
    }
    Ok(())
}
