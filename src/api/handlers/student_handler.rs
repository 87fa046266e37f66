//! Student registration handlers.

use axum::{
    extract::{Path, State},
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use uuid::Uuid;

use crate::api::middleware::auth_middleware;
use crate::api::AppState;
use crate::domain::{Event, Registration, SessionUser};
use crate::errors::AppResult;

pub fn student_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/register/:event_id", post(register_for_event))
        .route("/registered", get(list_registered_events))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}

/// Register the caller for an event
#[utoipa::path(
    post,
    path = "/student/register/{event_id}",
    tag = "Registrations",
    params(("event_id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Registered", body = Registration),
        (status = 400, description = "Already registered, or the event has started"),
        (status = 401, description = "No valid session"),
        (status = 403, description = "Caller is not a student"),
        (status = 404, description = "Event not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn register_for_event(
    State(state): State<AppState>,
    Extension(actor): Extension<SessionUser>,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<Registration>> {
    let registration = state.registration_service.register(&actor, event_id).await?;
    Ok(Json(registration))
}

/// Events the caller registered for
#[utoipa::path(
    get,
    path = "/student/registered",
    tag = "Registrations",
    responses(
        (status = 200, description = "Registered events, by date", body = [Event]),
        (status = 401, description = "No valid session"),
        (status = 403, description = "Caller is not a student")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_registered_events(
    State(state): State<AppState>,
    Extension(actor): Extension<SessionUser>,
) -> AppResult<Json<Vec<Event>>> {
    let events = state.registration_service.list_for_student(&actor).await?;
    Ok(Json(events))
}
