//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - Redis-backed session storage
//! - Unit of Work for repository access

pub mod cache;
pub mod db;
pub mod repositories;
pub mod session_store;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{
    EventRepository, EventStore, RegistrationRepository, RegistrationStore, UserRepository,
    UserStore,
};
pub use session_store::{RedisSessionStore, SessionStore};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockEventRepository, MockRegistrationRepository, MockUserRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use session_store::MockSessionStore;
