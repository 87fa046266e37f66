//! Application state - Dependency injection container.

use std::sync::Arc;

use super::cookies::CookiePolicy;
use crate::config::Config;
use crate::infra::{Database, SessionStore};
use crate::services::{
    AuthService, EventService, RegistrationService, ServiceContainer, Services,
};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub event_service: Arc<dyn EventService>,
    pub registration_service: Arc<dyn RegistrationService>,
    /// Session store, pinged by the health check
    pub sessions: Arc<dyn SessionStore>,
    /// Absent when the state is assembled without a database (tests)
    pub database: Option<Arc<Database>>,
    pub cookies: CookiePolicy,
}

impl AppState {
    /// Production wiring from a built service container.
    pub fn from_config(
        services: &Services,
        database: Arc<Database>,
        sessions: Arc<dyn SessionStore>,
        config: &Config,
    ) -> Self {
        Self {
            auth_service: services.auth(),
            event_service: services.events(),
            registration_service: services.registrations(),
            sessions,
            database: Some(database),
            cookies: CookiePolicy::from_config(config),
        }
    }

    /// Assemble state from individual services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        event_service: Arc<dyn EventService>,
        registration_service: Arc<dyn RegistrationService>,
        sessions: Arc<dyn SessionStore>,
        cookies: CookiePolicy,
    ) -> Self {
        Self {
            auth_service,
            event_service,
            registration_service,
            sessions,
            database: None,
            cookies,
        }
    }
}
