//! In-memory doubles shared by the integration tests.
//!
//! `MemoryDb` mirrors the database constraints the services rely on:
//! unique emails, one registration per (student, event), cascade on
//! event deletion.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use campus_events::api::{create_router, AppState, CookiePolicy};
use campus_events::domain::{
    sort_chronologically, Event, EventChanges, EventFilter, NewEvent, NewUser, Password,
    Registrant, Registration, SessionUser, User, UserRole,
};
use campus_events::errors::{AppError, AppResult};
use campus_events::infra::{
    EventRepository, RegistrationRepository, SessionStore, UnitOfWork, UserRepository,
};
use campus_events::jobs::{EmailJob, Mailer};
use campus_events::services::{ServiceContainer, Services};

pub const PASSWORD: &str = "password123";

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    events: Vec<Event>,
    registrations: Vec<Registration>,
}

/// Shared in-memory tables implementing every repository trait.
#[derive(Default)]
pub struct MemoryDb {
    tables: Mutex<Tables>,
}

impl MemoryDb {
    pub fn registration_count(&self, student_id: Uuid, event_id: Uuid) -> usize {
        self.tables
            .lock()
            .unwrap()
            .registrations
            .iter()
            .filter(|r| r.student_id == student_id && r.event_id == event_id)
            .count()
    }

    pub fn registrations_for(&self, event_id: Uuid) -> usize {
        self.tables
            .lock()
            .unwrap()
            .registrations
            .iter()
            .filter(|r| r.event_id == event_id)
            .count()
    }

    /// Insert an event directly, bypassing validation (for past dates).
    pub fn insert_event(&self, event: Event) {
        self.tables.lock().unwrap().events.push(event);
    }
}

#[async_trait]
impl UserRepository for MemoryDb {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::conflict("Email"));
        }
        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            phone: user.phone,
            department: user.department,
            role: user.role,
            club_name: user.club_name,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl EventRepository for MemoryDb {
    async fn create(&self, event: NewEvent) -> AppResult<Event> {
        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            title: event.title,
            description: event.description,
            date: event.date,
            time: event.time,
            location: event.location,
            poster: event.poster,
            club_name: event.club_name,
            event_type: event.event_type,
            created_by: event.created_by,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().events.push(event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.events.iter().find(|e| e.id == id).cloned())
    }

    async fn update(&self, id: Uuid, changes: EventChanges) -> AppResult<Event> {
        let mut tables = self.tables.lock().unwrap();
        let event = tables
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(AppError::NotFound)?;
        changes.apply_to(event);
        event.updated_at = Utc::now();
        Ok(event.clone())
    }

    async fn delete_with_registrations(&self, id: Uuid) -> AppResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.events.len();
        tables.events.retain(|e| e.id != id);
        if tables.events.len() == before {
            return Err(AppError::NotFound);
        }
        tables.registrations.retain(|r| r.event_id != id);
        Ok(())
    }

    async fn list_all(&self) -> AppResult<Vec<Event>> {
        self.list_filtered(EventFilter::default()).await
    }

    async fn list_by_creator(&self, creator_id: Uuid) -> AppResult<Vec<Event>> {
        let mut events: Vec<Event> = {
            let tables = self.tables.lock().unwrap();
            tables
                .events
                .iter()
                .filter(|e| e.created_by == creator_id)
                .cloned()
                .collect()
        };
        sort_chronologically(&mut events);
        Ok(events)
    }

    async fn list_filtered(&self, filter: EventFilter) -> AppResult<Vec<Event>> {
        let mut events: Vec<Event> = {
            let tables = self.tables.lock().unwrap();
            tables
                .events
                .iter()
                .filter(|e| filter.matches(e))
                .cloned()
                .collect()
        };
        sort_chronologically(&mut events);
        Ok(events)
    }

    async fn list_on_date(&self, date: NaiveDate) -> AppResult<Vec<Event>> {
        let mut events: Vec<Event> = {
            let tables = self.tables.lock().unwrap();
            tables.events.iter().filter(|e| e.date == date).cloned().collect()
        };
        sort_chronologically(&mut events);
        Ok(events)
    }
}

#[async_trait]
impl RegistrationRepository for MemoryDb {
    async fn exists(&self, student_id: Uuid, event_id: Uuid) -> AppResult<bool> {
        Ok(self.registration_count(student_id, event_id) > 0)
    }

    async fn create(&self, student_id: Uuid, event_id: Uuid) -> AppResult<Registration> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.events.iter().any(|e| e.id == event_id) {
            return Err(AppError::NotFound);
        }
        if tables
            .registrations
            .iter()
            .any(|r| r.student_id == student_id && r.event_id == event_id)
        {
            return Err(AppError::AlreadyRegistered);
        }
        let registration = Registration {
            id: Uuid::new_v4(),
            student_id,
            event_id,
            created_at: Utc::now(),
        };
        tables.registrations.push(registration.clone());
        Ok(registration)
    }

    async fn events_for_student(&self, student_id: Uuid) -> AppResult<Vec<Event>> {
        let mut events: Vec<Event> = {
            let tables = self.tables.lock().unwrap();
            let ids: HashSet<Uuid> = tables
                .registrations
                .iter()
                .filter(|r| r.student_id == student_id)
                .map(|r| r.event_id)
                .collect();
            tables
                .events
                .iter()
                .filter(|e| ids.contains(&e.id))
                .cloned()
                .collect()
        };
        sort_chronologically(&mut events);
        Ok(events)
    }

    async fn registrants_for_event(&self, event_id: Uuid) -> AppResult<Vec<Registrant>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .registrations
            .iter()
            .filter(|r| r.event_id == event_id)
            .filter_map(|r| tables.users.iter().find(|u| u.id == r.student_id))
            .map(|u| Registrant {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
            })
            .collect())
    }
}

/// Unit of Work over one `MemoryDb`.
pub struct MemoryUow {
    pub db: Arc<MemoryDb>,
}

impl UnitOfWork for MemoryUow {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.db.clone()
    }

    fn events(&self) -> Arc<dyn EventRepository> {
        self.db.clone()
    }

    fn registrations(&self) -> Arc<dyn RegistrationRepository> {
        self.db.clone()
    }
}

/// Session store in a HashMap; expiry is not modelled.
#[derive(Default)]
pub struct MemorySessions {
    sessions: Mutex<HashMap<String, SessionUser>>,
    refreshed: Mutex<Vec<(String, u64)>>,
}

impl MemorySessions {
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn refreshes(&self) -> Vec<(String, u64)> {
        self.refreshed.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionStore for MemorySessions {
    async fn save(&self, session_id: &str, user: &SessionUser, _ttl_seconds: u64) -> AppResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session_id.to_string(), user.clone());
        Ok(())
    }

    async fn load_and_refresh(
        &self,
        session_id: &str,
        ttl_seconds: u64,
    ) -> AppResult<Option<SessionUser>> {
        let user = self.sessions.lock().unwrap().get(session_id).cloned();
        if user.is_some() {
            self.refreshed
                .lock()
                .unwrap()
                .push((session_id.to_string(), ttl_seconds));
        }
        Ok(user)
    }

    async fn delete(&self, session_id: &str) -> AppResult<()> {
        self.sessions.lock().unwrap().remove(session_id);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Records every email; addresses in `failing` are rejected.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailJob>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingMailer {
    pub fn fail_for(&self, address: &str) {
        self.failing.lock().unwrap().insert(address.to_string());
    }

    pub fn sent(&self) -> Vec<EmailJob> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, address: &str) -> Vec<EmailJob> {
        self.sent()
            .into_iter()
            .filter(|job| job.to == address)
            .collect()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, job: EmailJob) -> AppResult<()> {
        if self.failing.lock().unwrap().contains(&job.to) {
            return Err(AppError::dependency(format!("mailbox {} unavailable", job.to)));
        }
        self.sent.lock().unwrap().push(job);
        Ok(())
    }
}

pub const SESSION_TTL_SECONDS: u64 = 24 * 3600;

/// Fully wired services over in-memory infrastructure.
pub struct TestApp {
    pub db: Arc<MemoryDb>,
    pub sessions: Arc<MemorySessions>,
    pub mailer: Arc<RecordingMailer>,
    pub services: Services,
}

impl TestApp {
    pub fn new() -> Self {
        let db = Arc::new(MemoryDb::default());
        let sessions = Arc::new(MemorySessions::default());
        let mailer = Arc::new(RecordingMailer::default());
        let services = Services::new(
            Arc::new(MemoryUow { db: db.clone() }),
            sessions.clone(),
            mailer.clone(),
            SESSION_TTL_SECONDS,
        );

        Self {
            db,
            sessions,
            mailer,
            services,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(
            self.services.auth(),
            self.services.events(),
            self.services.registrations(),
            self.sessions.clone(),
            CookiePolicy::default(),
        )
    }

    pub fn router(&self) -> axum::Router {
        create_router(self.state())
    }

    /// Insert a user with `PASSWORD` and return its session identity.
    pub async fn seed_user(&self, name: &str, role: UserRole, club: Option<&str>) -> SessionUser {
        let email = format!("{}@campus.edu", name.to_lowercase());
        let user = UserRepository::create(
            self.db.as_ref(),
            NewUser {
                name: name.to_string(),
                email,
                password_hash: Password::new(PASSWORD).unwrap().into_string(),
                phone: "555-0100".to_string(),
                department: "Engineering".to_string(),
                role,
                club_name: club.map(str::to_string),
            },
        )
        .await
        .unwrap();

        SessionUser::from(&user)
    }

    pub async fn admin(&self, name: &str, club: &str) -> SessionUser {
        self.seed_user(name, UserRole::ClubAdmin, Some(club)).await
    }

    pub async fn student(&self, name: &str) -> SessionUser {
        self.seed_user(name, UserRole::Student, None).await
    }

    /// Create an event through the service, `days_ahead` days from today.
    pub async fn event_in(
        &self,
        owner: &SessionUser,
        title: &str,
        days_ahead: i64,
        event_type: &str,
    ) -> Event {
        let date = Utc::now().date_naive() + Duration::days(days_ahead);
        self.services
            .events()
            .create(owner, draft(title, date, "18:00", event_type))
            .await
            .unwrap()
    }
}

pub fn draft(
    title: &str,
    date: NaiveDate,
    time: &str,
    event_type: &str,
) -> campus_events::domain::EventDraft {
    campus_events::domain::EventDraft {
        title: title.to_string(),
        description: format!("{} description", title),
        date: date.format("%Y-%m-%d").to_string(),
        time: time.to_string(),
        location: "Main Hall".to_string(),
        event_type: event_type.to_string(),
        poster: None,
    }
}

/// An event owned by `owner` that started `days_ago` days back.
pub fn past_event(owner: &SessionUser, days_ago: i64) -> Event {
    let now = Utc::now();
    Event {
        id: Uuid::new_v4(),
        title: "Yesterday's Talk".to_string(),
        description: "Already happened".to_string(),
        date: now.date_naive() - Duration::days(days_ago),
        time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        location: "Main Hall".to_string(),
        poster: None,
        club_name: owner.club_name.clone().unwrap_or_default(),
        event_type: "talk".to_string(),
        created_by: owner.id,
        created_at: now,
        updated_at: now,
    }
}
