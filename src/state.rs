use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

use chrono::{Local, NaiveDate, Utc, Weekday};

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::{Catalog, TimeSlot};
use crate::services::availability::Schedule;
use crate::services::session::BookingSession;
use crate::services::submission::Submitter;

pub struct AppState {
    pub config: AppConfig,
    pub catalog: Catalog,
    pub schedule: RwLock<Schedule>,
    pub submitter: Box<dyn Submitter>,
    pub drafts: Mutex<HashMap<String, Arc<BookingSession>>>,
    pub started_at: Instant,
}

/// The calendar as of one particular day, detached from the lock.
pub struct CalendarView {
    pub today: NaiveDate,
    pub closed_weekday: Weekday,
    pub slots: Vec<TimeSlot>,
}

impl AppState {
    pub fn new(config: AppConfig, catalog: Catalog, submitter: Box<dyn Submitter>, seed: u64) -> Self {
        let schedule = Schedule::new(config.schedule.clone(), seed, today());
        Self {
            config,
            catalog,
            schedule: RwLock::new(schedule),
            submitter,
            drafts: Mutex::new(HashMap::new()),
            started_at: Instant::now(),
        }
    }

    /// Current slots, regenerating the calendar first if the day has turned over.
    pub fn calendar(&self) -> CalendarView {
        let today = today();
        {
            let schedule = self.schedule.read().unwrap_or_else(PoisonError::into_inner);
            if schedule.day() == today {
                return view(&schedule);
            }
        }
        let mut schedule = self.schedule.write().unwrap_or_else(PoisonError::into_inner);
        schedule.refresh(today);
        view(&schedule)
    }

    pub fn create_session(&self, initial_service: Option<String>) -> Arc<BookingSession> {
        let session = Arc::new(BookingSession::new(initial_service));
        let ttl = chrono::Duration::minutes(self.config.draft_ttl_minutes);
        let now = Utc::now();

        let mut drafts = self.drafts.lock().unwrap_or_else(PoisonError::into_inner);
        let before = drafts.len();
        drafts.retain(|_, s| !s.is_stale(now, ttl));
        if drafts.len() < before {
            tracing::debug!(pruned = before - drafts.len(), "dropped idle drafts");
        }
        drafts.insert(session.id().to_string(), Arc::clone(&session));
        session
    }

    pub fn session(&self, id: &str) -> Result<Arc<BookingSession>, AppError> {
        self.drafts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("draft {id}")))
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn view(schedule: &Schedule) -> CalendarView {
    CalendarView {
        today: schedule.day(),
        closed_weekday: schedule.policy().closed_weekday,
        slots: schedule.slots().to_vec(),
    }
}
