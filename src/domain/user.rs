//! User domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_CLUB_ADMIN, ROLE_STUDENT, ROLE_SUPER_ADMIN};
use crate::errors::AppError;

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    ClubAdmin,
    /// Declared but grants nothing beyond a regular account
    SuperAdmin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => ROLE_STUDENT,
            UserRole::ClubAdmin => ROLE_CLUB_ADMIN,
            UserRole::SuperAdmin => ROLE_SUPER_ADMIN,
        }
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_STUDENT => Ok(UserRole::Student),
            ROLE_CLUB_ADMIN => Ok(UserRole::ClubAdmin),
            ROLE_SUPER_ADMIN => Ok(UserRole::SuperAdmin),
            other => Err(AppError::validation(format!("Unknown role '{}'", other))),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: String,
    pub department: String,
    pub role: UserRole,
    /// Present only for club admins
    pub club_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Account data accepted at signup, before hashing.
#[derive(Debug, Clone)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub department: String,
    pub role: UserRole,
    pub club_name: Option<String>,
}

impl Signup {
    /// Enforce the role rules and normalize fields.
    ///
    /// Club admins must name their club; students never keep one;
    /// super admin cannot be self-assigned.
    pub fn normalize(mut self) -> Result<Self, AppError> {
        self.name = self.name.trim().to_string();
        self.email = normalize_email(&self.email);
        self.phone = self.phone.trim().to_string();
        self.department = self.department.trim().to_string();
        self.club_name = self
            .club_name
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        match self.role {
            UserRole::SuperAdmin => {
                return Err(AppError::validation(
                    "The super_admin role cannot be assigned at signup",
                ))
            }
            UserRole::ClubAdmin if self.club_name.is_none() => {
                return Err(AppError::validation("club_name is required for club admins"))
            }
            UserRole::Student => self.club_name = None,
            UserRole::ClubAdmin => {}
        }

        Ok(self)
    }
}

/// A user row ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub department: String,
    pub role: UserRole,
    pub club_name: Option<String>,
}

/// Lower-cased, trimmed email used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Alice Smith")]
    pub name: String,
    #[schema(example = "alice@campus.edu")]
    pub email: String,
    #[schema(example = "555-0100")]
    pub phone: String,
    #[schema(example = "Computer Science")]
    pub department: String,
    pub role: UserRole,
    #[schema(example = "Tech")]
    pub club_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            department: user.department,
            role: user.role,
            club_name: user.club_name,
            created_at: user.created_at,
        }
    }
}
