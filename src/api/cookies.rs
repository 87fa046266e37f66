//! Session cookie attributes.

use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config::{Config, CookieSameSite, SESSION_COOKIE_NAME};

/// How the session cookie is issued and cleared.
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    secure: bool,
    same_site: CookieSameSite,
}

impl CookiePolicy {
    pub fn new(secure: bool, same_site: CookieSameSite) -> Self {
        // Browsers drop SameSite=None cookies that are not Secure
        let secure = secure || same_site == CookieSameSite::None;
        Self { secure, same_site }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cookie_requires_secure(), config.cookie_same_site)
    }

    /// Session cookie without Max-Age; expiry lives server-side.
    pub fn session_cookie(&self, session_id: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, session_id))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site())
            .build()
    }

    /// Cookie used to tell the browser to forget the session.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE_NAME)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site())
            .build()
    }

    fn same_site(&self) -> SameSite {
        match self.same_site {
            CookieSameSite::Strict => SameSite::Strict,
            CookieSameSite::Lax => SameSite::Lax,
            CookieSameSite::None => SameSite::None,
        }
    }
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self::new(false, CookieSameSite::Lax)
    }
}
