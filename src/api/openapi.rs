//! OpenAPI documentation configuration.
//!
//! Served as JSON at `/api-docs/openapi.json` and browsable at `/swagger-ui`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, event_handler, student_handler};
use crate::config::SESSION_COOKIE_NAME;
use crate::domain::{
    Event, EventDraft, EventPatch, Registrant, Registration, SessionUser, UserResponse, UserRole,
};
use crate::types::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Events API",
        version = "0.1.0",
        description = "Club events, student registrations and next-day reminders",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        auth_handler::signup,
        auth_handler::login,
        auth_handler::logout,
        auth_handler::whoami,
        event_handler::create_event,
        event_handler::update_event,
        event_handler::delete_event,
        event_handler::get_event,
        event_handler::list_all_events,
        event_handler::filter_events,
        event_handler::list_my_events,
        event_handler::list_event_registrations,
        student_handler::register_for_event,
        student_handler::list_registered_events,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            SessionUser,
            Event,
            EventDraft,
            EventPatch,
            Registration,
            Registrant,
            MessageResponse,
            auth_handler::SignupRequest,
            auth_handler::LoginRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Accounts and cookie sessions"),
        (name = "Events", description = "Browse and manage club events"),
        (name = "Registrations", description = "Student event registrations")
    )
)]
pub struct ApiDoc;

/// Declares the session cookie as the API's security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    SESSION_COOKIE_NAME,
                    "Session id set by /auth/login",
                ))),
            );
        }
    }
}
