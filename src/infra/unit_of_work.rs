//! Unit of Work pattern implementation.
//!
//! Centralizes repository access so services depend on one seam instead of
//! three. Multi-step writes that must be atomic (event deletion) run inside
//! the owning repository.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    EventRepository, EventStore, RegistrationRepository, RegistrationStore, UserRepository,
    UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn events(&self) -> Arc<dyn EventRepository>;

    fn registrations(&self) -> Arc<dyn RegistrationRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    user_repo: Arc<UserStore>,
    event_repo: Arc<EventStore>,
    registration_repo: Arc<RegistrationStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            event_repo: Arc::new(EventStore::new(db.clone())),
            registration_repo: Arc::new(RegistrationStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn events(&self) -> Arc<dyn EventRepository> {
        self.event_repo.clone()
    }

    fn registrations(&self) -> Arc<dyn RegistrationRepository> {
        self.registration_repo.clone()
    }
}
