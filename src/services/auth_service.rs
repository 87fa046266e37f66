//! Authentication service - signup, login and cookie sessions.
//!
//! Credentials are hashed with the domain `Password` value object; the
//! session store keeps the authenticated identity server-side.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{normalize_email, NewUser, Password, Session, SessionUser, Signup, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{SessionStore, UnitOfWork};

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account. A taken email yields `Conflict`.
    async fn signup(&self, signup: Signup) -> AppResult<User>;

    /// Check credentials and open a session.
    async fn login(&self, email: &str, password: &str) -> AppResult<Session>;

    /// Drop a session. Unknown ids are ignored.
    async fn logout(&self, session_id: &str) -> AppResult<()>;

    /// Resolve a session id to its user, extending the session.
    async fn authenticate(&self, session_id: &str) -> AppResult<SessionUser>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    sessions: Arc<dyn SessionStore>,
    session_ttl_seconds: u64,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, sessions: Arc<dyn SessionStore>, session_ttl_seconds: u64) -> Self {
        Self {
            uow,
            sessions,
            session_ttl_seconds,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn signup(&self, signup: Signup) -> AppResult<User> {
        let signup = signup.normalize()?;
        let password = Password::new(&signup.password)?;

        // Fast path; the unique index still decides concurrent signups
        if self.uow.users().find_by_email(&signup.email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        let user = self
            .uow
            .users()
            .create(NewUser {
                name: signup.name,
                email: signup.email,
                password_hash: password.into_string(),
                phone: signup.phone,
                department: signup.department,
                role: signup.role,
                club_name: signup.club_name,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User signed up");
        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        let user = self.uow.users().find_by_email(&normalize_email(email)).await?;

        let stored_hash = user.as_ref().map(|u| u.password_hash.as_str());
        if !Password::verify_stored(stored_hash, password) {
            tracing::debug!("Login rejected");
            return Err(AppError::InvalidCredentials);
        }
        let user = user.ok_or(AppError::InvalidCredentials)?;

        let session = Session::issue(SessionUser::from(&user));
        self.sessions
            .save(&session.id, &session.user, self.session_ttl_seconds)
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(session)
    }

    async fn logout(&self, session_id: &str) -> AppResult<()> {
        if session_id.is_empty() {
            return Ok(());
        }
        self.sessions.delete(session_id).await
    }

    async fn authenticate(&self, session_id: &str) -> AppResult<SessionUser> {
        if session_id.is_empty() {
            return Err(AppError::Unauthorized);
        }
        self.sessions
            .load_and_refresh(session_id, self.session_ttl_seconds)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}
