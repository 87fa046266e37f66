//! Registration service - students sign up for events, owners read rosters.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    authorize_event_owner, require_role, Event, Registrant, Registration, SessionUser, UserRole,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::jobs::{EmailJob, Mailer};
use crate::utils::templates;

#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Register a student for an event that has not started yet.
    async fn register(&self, actor: &SessionUser, event_id: Uuid) -> AppResult<Registration>;

    /// Events the acting student registered for.
    async fn list_for_student(&self, actor: &SessionUser) -> AppResult<Vec<Event>>;

    /// Roster of an event, visible to its creator only.
    async fn list_for_event(&self, actor: &SessionUser, event_id: Uuid)
        -> AppResult<Vec<Registrant>>;
}

pub struct RegistrationDesk<U: UnitOfWork> {
    uow: Arc<U>,
    mailer: Arc<dyn Mailer>,
}

impl<U: UnitOfWork> RegistrationDesk<U> {
    pub fn new(uow: Arc<U>, mailer: Arc<dyn Mailer>) -> Self {
        Self { uow, mailer }
    }

    /// Best effort; the registration stands even if mail fails.
    async fn send_confirmation(&self, actor: &SessionUser, event: &Event) {
        let email = templates::registration_confirmation(&actor.name, event);
        if let Err(e) = self
            .mailer
            .send(EmailJob::rendered(actor.email.clone(), email))
            .await
        {
            tracing::warn!(
                user_id = %actor.id,
                event_id = %event.id,
                error = %e,
                "Registration confirmation not sent"
            );
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> RegistrationService for RegistrationDesk<U> {
    async fn register(&self, actor: &SessionUser, event_id: Uuid) -> AppResult<Registration> {
        require_role(actor, UserRole::Student)?;

        let event = self.uow.events().find_by_id(event_id).await?.ok_or_not_found()?;
        if event.has_started(Utc::now()) {
            return Err(AppError::PastDeadline);
        }

        let registrations = self.uow.registrations();
        if registrations.exists(actor.id, event_id).await? {
            return Err(AppError::AlreadyRegistered);
        }
        let registration = registrations.create(actor.id, event_id).await?;

        tracing::info!(user_id = %actor.id, event_id = %event_id, "Student registered");
        self.send_confirmation(actor, &event).await;

        Ok(registration)
    }

    async fn list_for_student(&self, actor: &SessionUser) -> AppResult<Vec<Event>> {
        require_role(actor, UserRole::Student)?;
        self.uow.registrations().events_for_student(actor.id).await
    }

    async fn list_for_event(
        &self,
        actor: &SessionUser,
        event_id: Uuid,
    ) -> AppResult<Vec<Registrant>> {
        let event = self.uow.events().find_by_id(event_id).await?.ok_or_not_found()?;
        authorize_event_owner(actor, &event)?;
        self.uow.registrations().registrants_for_event(event_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        EventRepository, MockEventRepository, MockRegistrationRepository, RegistrationRepository,
        UserRepository,
    };
    use crate::jobs::MockMailer;
    use chrono::{Duration, NaiveTime};

    struct EventsAndRegistrations {
        events: Arc<MockEventRepository>,
        registrations: Arc<MockRegistrationRepository>,
    }

    impl UnitOfWork for EventsAndRegistrations {
        fn users(&self) -> Arc<dyn UserRepository> {
            unreachable!("registration desk never touches users")
        }

        fn events(&self) -> Arc<dyn EventRepository> {
            self.events.clone()
        }

        fn registrations(&self) -> Arc<dyn RegistrationRepository> {
            self.registrations.clone()
        }
    }

    fn desk(
        events: MockEventRepository,
        registrations: MockRegistrationRepository,
        mailer: MockMailer,
    ) -> RegistrationDesk<EventsAndRegistrations> {
        RegistrationDesk::new(
            Arc::new(EventsAndRegistrations {
                events: Arc::new(events),
                registrations: Arc::new(registrations),
            }),
            Arc::new(mailer),
        )
    }

    fn student() -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            name: "Bob".to_string(),
            email: "bob@campus.edu".to_string(),
            role: UserRole::Student,
            club_name: None,
        }
    }

    fn upcoming_event(id: Uuid) -> Event {
        let now = Utc::now();
        Event {
            id,
            title: "Hackathon".to_string(),
            description: "All night".to_string(),
            date: (now + Duration::days(30)).date_naive(),
            time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            location: "Main Hall".to_string(),
            poster: None,
            club_name: "Tech".to_string(),
            event_type: "competition".to_string(),
            created_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    fn known_event() -> MockEventRepository {
        let mut events = MockEventRepository::new();
        events
            .expect_find_by_id()
            .returning(|id| Ok(Some(upcoming_event(id))));
        events
    }

    #[tokio::test]
    async fn test_insert_losing_to_unique_index_is_already_registered() {
        let event_id = Uuid::new_v4();
        let mut registrations = MockRegistrationRepository::new();
        registrations.expect_exists().returning(|_, _| Ok(false));
        registrations
            .expect_create()
            .times(1)
            .returning(|_, _| Err(AppError::AlreadyRegistered));
        let mut mailer = MockMailer::new();
        mailer.expect_send().never();

        let result = desk(known_event(), registrations, mailer)
            .register(&student(), event_id)
            .await;

        assert!(matches!(result, Err(AppError::AlreadyRegistered)));
    }

    #[tokio::test]
    async fn test_register_sends_one_confirmation() {
        let event_id = Uuid::new_v4();
        let actor = student();
        let actor_id = actor.id;
        let mut registrations = MockRegistrationRepository::new();
        registrations.expect_exists().returning(|_, _| Ok(false));
        registrations.expect_create().returning(|student_id, event_id| {
            Ok(Registration {
                id: Uuid::new_v4(),
                student_id,
                event_id,
                created_at: Utc::now(),
            })
        });
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|job| job.to == "bob@campus.edu")
            .times(1)
            .returning(|_| Ok(()));

        let registration = desk(known_event(), registrations, mailer)
            .register(&actor, event_id)
            .await
            .unwrap();

        assert_eq!(registration.student_id, actor_id);
        assert_eq!(registration.event_id, event_id);
    }

    #[tokio::test]
    async fn test_existing_pair_skips_insert() {
        let event_id = Uuid::new_v4();
        let mut registrations = MockRegistrationRepository::new();
        registrations.expect_exists().returning(|_, _| Ok(true));
        registrations.expect_create().never();
        let mut mailer = MockMailer::new();
        mailer.expect_send().never();

        let result = desk(known_event(), registrations, mailer)
            .register(&student(), event_id)
            .await;

        assert!(matches!(result, Err(AppError::AlreadyRegistered)));
    }
}
