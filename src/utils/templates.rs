//! Email templates.
//!
//! Plain-text subjects and bodies for the messages the application sends.

use crate::domain::Event;

/// Rendered message ready to become an `EmailJob`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
}

/// Next-day reminder for one registrant.
pub fn event_reminder(recipient_name: &str, event: &Event) -> RenderedEmail {
    RenderedEmail {
        subject: format!("Reminder: {} is tomorrow", event.title),
        body: format!(
            "Hi {name},\n\n\
             This is a reminder that you are registered for \"{title}\".\n\n\
             Date: {date}\n\
             Time: {time} UTC\n\
             Location: {location}\n\
             Hosted by: {club}\n\n\
             See you there!\n",
            name = recipient_name,
            title = event.title,
            date = event.date.format("%A, %B %-d, %Y"),
            time = event.time.format("%H:%M"),
            location = event.location,
            club = event.club_name,
        ),
    }
}

/// Sent right after a successful registration.
pub fn registration_confirmation(recipient_name: &str, event: &Event) -> RenderedEmail {
    RenderedEmail {
        subject: format!("You're registered for {}", event.title),
        body: format!(
            "Hi {name},\n\n\
             Your registration for \"{title}\" is confirmed.\n\n\
             Date: {date}\n\
             Time: {time} UTC\n\
             Location: {location}\n\n\
             We'll send you a reminder the day before.\n",
            name = recipient_name,
            title = event.title,
            date = event.date.format("%Y-%m-%d"),
            time = event.time.format("%H:%M"),
            location = event.location,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use uuid::Uuid;

    fn event() -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
            title: "Robotics Demo".to_string(),
            description: "Robots".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            time: NaiveTime::from_hms_opt(17, 45, 0).unwrap(),
            location: "Workshop B".to_string(),
            poster: None,
            club_name: "Robotics".to_string(),
            event_type: "demo".to_string(),
            created_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_reminder_mentions_title_and_date() {
        let email = event_reminder("Bob", &event());

        assert_eq!(email.subject, "Reminder: Robotics Demo is tomorrow");
        assert!(email.body.starts_with("Hi Bob,"));
        assert!(email.body.contains("Tuesday, October 20, 2026"));
        assert!(email.body.contains("17:45 UTC"));
    }

    #[test]
    fn test_confirmation_body() {
        let email = registration_confirmation("Bob", &event());
        assert!(email.subject.contains("Robotics Demo"));
        assert!(email.body.contains("2026-10-20"));
        assert!(email.body.contains("Workshop B"));
    }
}
