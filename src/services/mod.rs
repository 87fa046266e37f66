//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain rules and infrastructure. They depend on
//! traits (`UnitOfWork`, `SessionStore`, `Mailer`) so every use case can
//! run against in-memory doubles.

mod auth_service;
pub mod container;
mod event_service;
mod registration_service;
mod reminder_service;

pub use container::{ServiceContainer, Services};

pub use auth_service::{AuthService, Authenticator};
pub use event_service::{EventCatalog, EventService};
pub use registration_service::{RegistrationDesk, RegistrationService};
pub use reminder_service::{ReminderDispatcher, ReminderReport, ReminderService};
