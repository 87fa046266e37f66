//! Service Container - wires every service over one Unit of Work.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, EventCatalog, EventService, RegistrationDesk, RegistrationService,
    ReminderDispatcher, ReminderService,
};
use crate::infra::{SessionStore, UnitOfWork};
use crate::jobs::Mailer;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn events(&self) -> Arc<dyn EventService>;

    fn registrations(&self) -> Arc<dyn RegistrationService>;

    fn reminders(&self) -> Arc<dyn ReminderService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    event_service: Arc<dyn EventService>,
    registration_service: Arc<dyn RegistrationService>,
    reminder_service: Arc<dyn ReminderService>,
}

impl Services {
    /// Build all services sharing `uow`, the session store and the mailer.
    pub fn new<U: UnitOfWork + 'static>(
        uow: Arc<U>,
        sessions: Arc<dyn SessionStore>,
        mailer: Arc<dyn Mailer>,
        session_ttl_seconds: u64,
    ) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(
                uow.clone(),
                sessions,
                session_ttl_seconds,
            )),
            event_service: Arc::new(EventCatalog::new(uow.clone())),
            registration_service: Arc::new(RegistrationDesk::new(uow.clone(), mailer.clone())),
            reminder_service: Arc::new(ReminderDispatcher::new(uow, mailer)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn events(&self) -> Arc<dyn EventService> {
        self.event_service.clone()
    }

    fn registrations(&self) -> Arc<dyn RegistrationService> {
        self.registration_service.clone()
    }

    fn reminders(&self) -> Arc<dyn ReminderService> {
        self.reminder_service.clone()
    }
}
