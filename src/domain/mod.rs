//! Domain layer - Core business entities and rules
//!
//! Users and their credentials, events, the registration ledger, and the
//! access rules that gate every mutation. No infrastructure dependencies.

pub mod access;
pub mod event;
pub mod password;
pub mod registration;
pub mod session;
pub mod user;

pub use access::{acting_club, authorize_event_owner, require_role};
pub use event::{
    sort_chronologically, Event, EventChanges, EventDraft, EventFilter, EventPatch, NewEvent,
};
pub use password::Password;
pub use registration::{Registrant, Registration};
pub use session::{Session, SessionUser};
pub use user::{normalize_email, NewUser, Signup, User, UserResponse, UserRole};
