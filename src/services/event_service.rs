//! Event catalog service.
//!
//! Anyone may read; only the owning club admin may change or remove an
//! event.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    acting_club, authorize_event_owner, require_role, Event, EventDraft, EventFilter, EventPatch,
    SessionUser, UserRole,
};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait EventService: Send + Sync {
    /// Create an event owned by `actor` under the actor's club.
    async fn create(&self, actor: &SessionUser, draft: EventDraft) -> AppResult<Event>;

    async fn update(&self, actor: &SessionUser, event_id: Uuid, patch: EventPatch)
        -> AppResult<Event>;

    /// Delete the event together with its registrations.
    async fn delete(&self, actor: &SessionUser, event_id: Uuid) -> AppResult<()>;

    async fn get(&self, event_id: Uuid) -> AppResult<Event>;

    async fn list_all(&self) -> AppResult<Vec<Event>>;

    async fn list_by_creator(&self, actor: &SessionUser) -> AppResult<Vec<Event>>;

    async fn list_filtered(&self, filter: EventFilter) -> AppResult<Vec<Event>>;
}

pub struct EventCatalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> EventCatalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn owned_event(&self, actor: &SessionUser, event_id: Uuid) -> AppResult<Event> {
        let event = self.uow.events().find_by_id(event_id).await?.ok_or_not_found()?;
        authorize_event_owner(actor, &event)?;
        Ok(event)
    }
}

#[async_trait]
impl<U: UnitOfWork> EventService for EventCatalog<U> {
    async fn create(&self, actor: &SessionUser, draft: EventDraft) -> AppResult<Event> {
        let club = acting_club(actor)?;
        let new_event = draft.into_new_event(actor.id, club)?;
        let event = self.uow.events().create(new_event).await?;

        tracing::info!(event_id = %event.id, user_id = %actor.id, "Event created");
        Ok(event)
    }

    async fn update(
        &self,
        actor: &SessionUser,
        event_id: Uuid,
        patch: EventPatch,
    ) -> AppResult<Event> {
        self.owned_event(actor, event_id).await?;
        let changes = patch.into_changes()?;
        let event = self.uow.events().update(event_id, changes).await?;

        tracing::info!(event_id = %event_id, user_id = %actor.id, "Event updated");
        Ok(event)
    }

    async fn delete(&self, actor: &SessionUser, event_id: Uuid) -> AppResult<()> {
        self.owned_event(actor, event_id).await?;
        self.uow.events().delete_with_registrations(event_id).await?;

        tracing::info!(event_id = %event_id, user_id = %actor.id, "Event deleted");
        Ok(())
    }

    async fn get(&self, event_id: Uuid) -> AppResult<Event> {
        self.uow.events().find_by_id(event_id).await?.ok_or_not_found()
    }

    async fn list_all(&self) -> AppResult<Vec<Event>> {
        self.uow.events().list_all().await
    }

    async fn list_by_creator(&self, actor: &SessionUser) -> AppResult<Vec<Event>> {
        require_role(actor, UserRole::ClubAdmin)?;
        self.uow.events().list_by_creator(actor.id).await
    }

    async fn list_filtered(&self, filter: EventFilter) -> AppResult<Vec<Event>> {
        let filter = filter.normalized();
        if filter == EventFilter::default() {
            return self.list_all().await;
        }
        self.uow.events().list_filtered(filter).await
    }
}
