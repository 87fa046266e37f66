//! Authenticated session identity.

use std::fmt::Write;

use argon2::password_hash::rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{User, UserRole};

/// The identity stored server-side for a session and handed to every
/// service call that acts on behalf of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Alice Smith")]
    pub name: String,
    #[schema(example = "alice@campus.edu")]
    pub email: String,
    pub role: UserRole,
    #[schema(example = "Tech")]
    pub club_name: Option<String>,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            club_name: user.club_name.clone(),
        }
    }
}

const SESSION_ID_BYTES: usize = 32;

/// A freshly issued session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque value carried by the session cookie
    pub id: String,
    pub user: SessionUser,
}

impl Session {
    /// Issue a session for `user` with a new 256-bit random id.
    pub fn issue(user: SessionUser) -> Self {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        OsRng.fill_bytes(&mut bytes);

        let id = bytes
            .iter()
            .fold(String::with_capacity(SESSION_ID_BYTES * 2), |mut hex, byte| {
                let _ = write!(hex, "{:02x}", byte);
                hex
            });
        Self { id, user }
    }
}
