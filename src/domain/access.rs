//! Role and ownership rules shared by every mutating operation.

use super::{Event, SessionUser, UserRole};
use crate::errors::{AppError, AppResult};

/// Require the acting user to hold `role`.
pub fn require_role(actor: &SessionUser, role: UserRole) -> AppResult<()> {
    if actor.role == role {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Require a club admin who created `event`.
///
/// Every update, delete and roster read goes through here.
pub fn authorize_event_owner(actor: &SessionUser, event: &Event) -> AppResult<()> {
    require_role(actor, UserRole::ClubAdmin)?;
    if event.is_owned_by(actor.id) {
        Ok(())
    } else {
        tracing::warn!(
            user_id = %actor.id,
            event_id = %event.id,
            "Rejected access to event owned by another user"
        );
        Err(AppError::Forbidden)
    }
}

/// The club a club admin acts for.
pub fn acting_club(actor: &SessionUser) -> AppResult<&str> {
    require_role(actor, UserRole::ClubAdmin)?;
    actor
        .club_name
        .as_deref()
        .filter(|club| !club.trim().is_empty())
        .ok_or(AppError::Forbidden)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use uuid::Uuid;

    fn actor(role: UserRole, club: Option<&str>) -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            name: "Someone".to_string(),
            email: "someone@campus.edu".to_string(),
            role,
            club_name: club.map(str::to_string),
        }
    }

    fn event_owned_by(owner: Uuid) -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
            title: "Hack Night".to_string(),
            description: "Build things".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            location: "Lab".to_string(),
            poster: None,
            club_name: "Tech".to_string(),
            event_type: "hackathon".to_string(),
            created_by: owner,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_owner_is_authorized() {
        let admin = actor(UserRole::ClubAdmin, Some("Tech"));
        assert!(authorize_event_owner(&admin, &event_owned_by(admin.id)).is_ok());
    }

    #[test]
    fn test_other_admin_is_forbidden() {
        let admin = actor(UserRole::ClubAdmin, Some("Tech"));
        let result = authorize_event_owner(&admin, &event_owned_by(Uuid::new_v4()));
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[test]
    fn test_student_with_same_id_is_forbidden() {
        let student = actor(UserRole::Student, None);
        let result = authorize_event_owner(&student, &event_owned_by(student.id));
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[test]
    fn test_acting_club() {
        assert_eq!(
            acting_club(&actor(UserRole::ClubAdmin, Some("Tech"))).unwrap(),
            "Tech"
        );
        assert!(acting_club(&actor(UserRole::ClubAdmin, None)).is_err());
        assert!(acting_club(&actor(UserRole::Student, Some("Tech"))).is_err());
    }
}
