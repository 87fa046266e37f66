//! Event domain entity, inputs and validation.
//!
//! Dates and times are UTC calendar values throughout.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::config::{EVENT_DATE_FORMAT, EVENT_TIME_FORMATS};
use crate::errors::{AppError, AppResult};

/// Event domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    #[schema(example = "7d0f7a6e-4c1b-4f57-9a4e-2b1c8f0e1d23")]
    pub id: Uuid,
    #[schema(example = "Rust Workshop")]
    pub title: String,
    #[schema(example = "Hands-on intro to ownership and borrowing")]
    pub description: String,
    #[schema(value_type = String, format = Date, example = "2026-10-20")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "18:30:00")]
    pub time: NaiveTime,
    #[schema(example = "Engineering Hall 101")]
    pub location: String,
    #[schema(example = "https://cdn.campus.edu/posters/rust.png")]
    pub poster: Option<String>,
    #[schema(example = "Tech")]
    pub club_name: String,
    #[schema(example = "workshop")]
    pub event_type: String,
    /// Owning club admin; fixed at creation
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Start instant (UTC).
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.date.and_time(self.time).and_utc()
    }

    /// Registration closes once the event has started.
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        now >= self.starts_at()
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.created_by == user_id
    }
}

/// Event creation request. `club_name` and the creator come from the session.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct EventDraft {
    #[validate(length(max = 255, message = "title is too long"))]
    #[schema(example = "Rust Workshop")]
    pub title: String,
    #[validate(length(max = 5000, message = "description is too long"))]
    #[schema(example = "Hands-on intro to ownership and borrowing")]
    pub description: String,
    /// `YYYY-MM-DD`
    #[schema(example = "2026-10-20")]
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`
    #[schema(example = "18:30")]
    pub time: String,
    #[validate(length(max = 255, message = "location is too long"))]
    #[schema(example = "Engineering Hall 101")]
    pub location: String,
    #[validate(length(max = 255, message = "event_type is too long"))]
    #[schema(example = "workshop")]
    pub event_type: String,
    #[validate(length(max = 2048, message = "poster is too long"))]
    #[schema(example = "https://cdn.campus.edu/posters/rust.png")]
    #[serde(default)]
    pub poster: Option<String>,
}

/// Validated event ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub poster: Option<String>,
    pub club_name: String,
    pub event_type: String,
    pub created_by: Uuid,
}

impl EventDraft {
    /// Check required fields and parse date/time, binding ownership to
    /// `creator_id` and `club_name`.
    pub fn into_new_event(self, creator_id: Uuid, club_name: &str) -> AppResult<NewEvent> {
        let missing: Vec<&str> = [
            ("title", &self.title),
            ("description", &self.description),
            ("date", &self.date),
            ("time", &self.time),
            ("location", &self.location),
            ("event_type", &self.event_type),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(AppError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        if club_name.trim().is_empty() {
            return Err(AppError::validation("club_name is required"));
        }

        Ok(NewEvent {
            date: parse_date(&self.date)?,
            time: parse_time(&self.time)?,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            location: self.location.trim().to_string(),
            poster: non_blank(self.poster),
            club_name: club_name.trim().to_string(),
            event_type: self.event_type.trim().to_string(),
            created_by: creator_id,
        })
    }
}

/// Partial event update. Absent or blank fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct EventPatch {
    #[validate(length(max = 255, message = "title is too long"))]
    pub title: Option<String>,
    #[validate(length(max = 5000, message = "description is too long"))]
    pub description: Option<String>,
    #[schema(example = "2026-10-21")]
    pub date: Option<String>,
    #[schema(example = "19:00")]
    pub time: Option<String>,
    #[validate(length(max = 255, message = "location is too long"))]
    pub location: Option<String>,
    #[validate(length(max = 255, message = "event_type is too long"))]
    pub event_type: Option<String>,
    #[validate(length(max = 2048, message = "poster is too long"))]
    pub poster: Option<String>,
}

/// Typed, non-empty set of field changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub location: Option<String>,
    pub event_type: Option<String>,
    pub poster: Option<String>,
}

impl EventChanges {
    pub fn is_empty(&self) -> bool {
        *self == EventChanges::default()
    }

    /// Apply these changes to an in-memory event.
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(description) = &self.description {
            event.description = description.clone();
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(time) = self.time {
            event.time = time;
        }
        if let Some(location) = &self.location {
            event.location = location.clone();
        }
        if let Some(event_type) = &self.event_type {
            event.event_type = event_type.clone();
        }
        if let Some(poster) = &self.poster {
            event.poster = Some(poster.clone());
        }
    }
}

impl EventPatch {
    /// Keep present, non-blank fields and parse date/time.
    ///
    /// # Errors
    /// `Validation` when nothing remains to apply or a date/time is malformed.
    pub fn into_changes(self) -> AppResult<EventChanges> {
        let changes = EventChanges {
            title: non_blank(self.title),
            description: non_blank(self.description),
            date: non_blank(self.date).map(|d| parse_date(&d)).transpose()?,
            time: non_blank(self.time).map(|t| parse_time(&t)).transpose()?,
            location: non_blank(self.location),
            event_type: non_blank(self.event_type),
            poster: non_blank(self.poster),
        };

        if changes.is_empty() {
            return Err(AppError::validation("No fields provided for update"));
        }
        Ok(changes)
    }
}

/// Conjunctive list filter; absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventFilter {
    /// Only events of this club
    pub club_name: Option<String>,
    /// Only events of this type
    pub event_type: Option<String>,
}

impl EventFilter {
    /// Treat blank query values as absent.
    pub fn normalized(self) -> Self {
        Self {
            club_name: non_blank(self.club_name),
            event_type: non_blank(self.event_type),
        }
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.club_name
            .as_deref()
            .map_or(true, |club| event.club_name == club)
            && self
                .event_type
                .as_deref()
                .map_or(true, |kind| event.event_type == kind)
    }
}

/// Parse a `YYYY-MM-DD` event date.
pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), EVENT_DATE_FORMAT)
        .map_err(|_| AppError::validation("date must be a valid YYYY-MM-DD date"))
}

/// Parse an `HH:MM[:SS]` event time.
pub fn parse_time(raw: &str) -> AppResult<NaiveTime> {
    let raw = raw.trim();
    EVENT_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| AppError::validation("time must be a valid HH:MM time"))
}

/// Ascending by date, then start time.
pub fn sort_chronologically(events: &mut [Event]) {
    events.sort_by(|a, b| (a.date, a.time).cmp(&(b.date, b.time)));
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
