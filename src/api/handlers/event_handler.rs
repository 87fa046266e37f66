//! Event handlers.
//!
//! Reads are public; writes, "my events" and rosters need a session.

use axum::{
    extract::{Path, Query, State},
    middleware,
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::auth_middleware;
use crate::api::AppState;
use crate::domain::{Event, EventDraft, EventFilter, EventPatch, Registrant, SessionUser};
use crate::errors::AppResult;
use crate::types::MessageResponse;

pub fn event_routes(state: &AppState) -> Router<AppState> {
    let require_session = middleware::from_fn_with_state(state.clone(), auth_middleware);

    Router::new()
        .route("/all", get(list_all_events))
        .route("/filter", get(filter_events))
        .route(
            "/",
            post(create_event).route_layer(require_session.clone()),
        )
        .route("/mine", get(list_my_events).route_layer(require_session.clone()))
        .route(
            "/:id",
            get(get_event).merge(
                put(update_event)
                    .delete(delete_event)
                    .route_layer(require_session.clone()),
            ),
        )
        .route(
            "/:id/registrations",
            get(list_event_registrations).route_layer(require_session),
        )
}

/// Create an event for the caller's club
#[utoipa::path(
    post,
    path = "/events",
    tag = "Events",
    request_body = EventDraft,
    responses(
        (status = 200, description = "Event created", body = Event),
        (status = 400, description = "Missing or malformed fields"),
        (status = 401, description = "No valid session"),
        (status = 403, description = "Caller is not a club admin")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_event(
    State(state): State<AppState>,
    Extension(actor): Extension<SessionUser>,
    ValidatedJson(draft): ValidatedJson<EventDraft>,
) -> AppResult<Json<Event>> {
    let event = state.event_service.create(&actor, draft).await?;
    Ok(Json(event))
}

/// Update fields of an owned event
#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = "Events",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = EventPatch,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Nothing to update or malformed fields"),
        (status = 403, description = "Caller does not own the event"),
        (status = 404, description = "Event not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_event(
    State(state): State<AppState>,
    Extension(actor): Extension<SessionUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(patch): ValidatedJson<EventPatch>,
) -> AppResult<Json<Event>> {
    let event = state.event_service.update(&actor, id, patch).await?;
    Ok(Json(event))
}

/// Delete an owned event and its registrations
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "Events",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 403, description = "Caller does not own the event"),
        (status = 404, description = "Event not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(actor): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.event_service.delete(&actor, id).await?;
    Ok(Json(MessageResponse::new("Event deleted")))
}

/// Fetch one event
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "Events",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Event>> {
    let event = state.event_service.get(id).await?;
    Ok(Json(event))
}

/// Every event, by date then time
#[utoipa::path(
    get,
    path = "/events/all",
    tag = "Events",
    responses((status = 200, description = "All events", body = [Event]))
)]
pub async fn list_all_events(State(state): State<AppState>) -> AppResult<Json<Vec<Event>>> {
    let events = state.event_service.list_all().await?;
    Ok(Json(events))
}

/// Events matching every given filter
#[utoipa::path(
    get,
    path = "/events/filter",
    tag = "Events",
    params(EventFilter),
    responses((status = 200, description = "Matching events", body = [Event]))
)]
pub async fn filter_events(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> AppResult<Json<Vec<Event>>> {
    let events = state.event_service.list_filtered(filter).await?;
    Ok(Json(events))
}

/// Events created by the caller
#[utoipa::path(
    get,
    path = "/events/mine",
    tag = "Events",
    responses(
        (status = 200, description = "Caller's events", body = [Event]),
        (status = 403, description = "Caller is not a club admin")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_my_events(
    State(state): State<AppState>,
    Extension(actor): Extension<SessionUser>,
) -> AppResult<Json<Vec<Event>>> {
    let events = state.event_service.list_by_creator(&actor).await?;
    Ok(Json(events))
}

/// Roster of an owned event
#[utoipa::path(
    get,
    path = "/events/{id}/registrations",
    tag = "Events",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Registered students", body = [Registrant]),
        (status = 403, description = "Caller does not own the event"),
        (status = 404, description = "Event not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_event_registrations(
    State(state): State<AppState>,
    Extension(actor): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<Registrant>>> {
    let registrants = state.registration_service.list_for_event(&actor, id).await?;
    Ok(Json(registrants))
}
