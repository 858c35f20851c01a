use chrono::{Datelike, Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{SchedulePolicy, TimeSlot};

/// Builds the bookable calendar for the days after `today`.
///
/// Each of the next `horizon_days` dates gets one slot per business hour,
/// except the closed weekday, which gets none. Every slot is independently
/// marked available with `availability_probability`, drawn from `rng`, so a
/// seeded generator always yields the same calendar.
pub fn generate<R: Rng>(today: NaiveDate, policy: &SchedulePolicy, rng: &mut R) -> Vec<TimeSlot> {
    let mut slots = Vec::with_capacity(policy.horizon_days as usize * policy.business_hours.len());

    for offset in 1..=u64::from(policy.horizon_days) {
        let Some(date) = today.checked_add_days(Days::new(offset)) else {
            break;
        };
        if date.weekday() == policy.closed_weekday {
            continue;
        }
        for time in &policy.business_hours {
            slots.push(TimeSlot {
                date,
                time: time.clone(),
                available: rng.gen_bool(policy.availability_probability),
            });
        }
    }

    slots
}

/// The calendar currently offered to customers. Regenerated once per day so
/// every request on the same day sees the same availability.
#[derive(Debug, Clone)]
pub struct Schedule {
    policy: SchedulePolicy,
    base_seed: u64,
    day: NaiveDate,
    slots: Vec<TimeSlot>,
}

impl Schedule {
    pub fn new(policy: SchedulePolicy, base_seed: u64, today: NaiveDate) -> Self {
        let mut rng = StdRng::seed_from_u64(day_seed(base_seed, today));
        let slots = generate(today, &policy, &mut rng);
        Self {
            policy,
            base_seed,
            day: today,
            slots,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn policy(&self) -> &SchedulePolicy {
        &self.policy
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Regenerates the calendar if `today` has moved on. Returns whether it did.
    pub fn refresh(&mut self, today: NaiveDate) -> bool {
        if today == self.day {
            return false;
        }
        *self = Self::new(self.policy.clone(), self.base_seed, today);
        tracing::info!(day = %today, slots = self.slots.len(), "regenerated availability calendar");
        true
    }
}

fn day_seed(base_seed: u64, day: NaiveDate) -> u64 {
    base_seed ^ (day.num_days_from_ce() as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::is_open;
    use chrono::Weekday;
    use std::collections::HashSet;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_same_seed_same_calendar() {
        let policy = SchedulePolicy::default();
        let today = date("2025-06-16");
        let a = generate(today, &policy, &mut StdRng::seed_from_u64(42));
        let b = generate(today, &policy, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_never_generates_closed_weekday() {
        let policy = SchedulePolicy::default();
        for seed in 0..5 {
            let slots = generate(date("2025-06-16"), &policy, &mut StdRng::seed_from_u64(seed));
            assert!(slots.iter().all(|s| s.date.weekday() != Weekday::Sun));
        }

        let tuesday_closed = SchedulePolicy {
            closed_weekday: Weekday::Tue,
            ..SchedulePolicy::default()
        };
        let slots = generate(date("2025-06-16"), &tuesday_closed, &mut StdRng::seed_from_u64(1));
        assert!(slots.iter().all(|s| s.date.weekday() != Weekday::Tue));
        assert!(slots.iter().any(|s| s.date.weekday() == Weekday::Sun));
    }

    #[test]
    fn test_horizon_starts_tomorrow() {
        let policy = SchedulePolicy::default();
        // 2025-06-16 is a Monday; June 17 through July 16 holds four Sundays
        let slots = generate(date("2025-06-16"), &policy, &mut StdRng::seed_from_u64(7));
        let days: HashSet<NaiveDate> = slots.iter().map(|s| s.date).collect();
        assert!(!days.contains(&date("2025-06-16")));
        assert!(days.contains(&date("2025-06-17")));
        assert!(days.contains(&date("2025-07-16")));
        assert!(!days.contains(&date("2025-07-17")));
        assert_eq!(days.len(), 30 - 4);
        assert_eq!(slots.len(), days.len() * 6);
    }

    #[test]
    fn test_slot_keys_unique() {
        let slots = generate(
            date("2025-06-16"),
            &SchedulePolicy::default(),
            &mut StdRng::seed_from_u64(3),
        );
        let keys: HashSet<(NaiveDate, &str)> =
            slots.iter().map(|s| (s.date, s.time.as_str())).collect();
        assert_eq!(keys.len(), slots.len());
    }

    #[test]
    fn test_probability_extremes() {
        let all_open = SchedulePolicy {
            availability_probability: 1.0,
            ..SchedulePolicy::default()
        };
        let slots = generate(date("2025-06-16"), &all_open, &mut StdRng::seed_from_u64(9));
        assert!(slots.iter().all(|s| s.available));

        let all_closed = SchedulePolicy {
            availability_probability: 0.0,
            ..SchedulePolicy::default()
        };
        let slots = generate(date("2025-06-16"), &all_closed, &mut StdRng::seed_from_u64(9));
        assert!(slots.iter().all(|s| !s.available));
    }

    #[test]
    fn test_roughly_seventy_percent_available() {
        let policy = SchedulePolicy {
            horizon_days: 365,
            ..SchedulePolicy::default()
        };
        let slots = generate(date("2025-01-01"), &policy, &mut StdRng::seed_from_u64(11));
        let open = slots.iter().filter(|s| s.available).count() as f64;
        let ratio = open / slots.len() as f64;
        assert!((0.6..0.8).contains(&ratio), "ratio was {ratio}");
    }

    #[test]
    fn test_schedule_refresh_only_on_new_day() {
        let mut schedule = Schedule::new(SchedulePolicy::default(), 5, date("2025-06-16"));
        let before = schedule.slots().to_vec();
        assert!(!schedule.refresh(date("2025-06-16")));
        assert_eq!(schedule.slots(), before.as_slice());

        assert!(schedule.refresh(date("2025-06-17")));
        assert_eq!(schedule.day(), date("2025-06-17"));
        assert!(schedule.slots().iter().all(|s| s.date > date("2025-06-17")));
    }

    #[test]
    fn test_schedule_slots_open_when_always_available() {
        let policy = SchedulePolicy {
            availability_probability: 1.0,
            ..SchedulePolicy::default()
        };
        let schedule = Schedule::new(policy, 1, date("2025-06-16"));
        assert!(is_open(schedule.slots(), date("2025-06-17"), "10:00"));
        assert!(!is_open(schedule.slots(), date("2025-06-17"), "11:00"));
        // Sunday
        assert!(!is_open(schedule.slots(), date("2025-06-22"), "10:00"));
        let wednesday = schedule
            .slots()
            .iter()
            .filter(|s| s.date == date("2025-06-18"))
            .count();
        assert_eq!(wednesday, 6);
    }
}
