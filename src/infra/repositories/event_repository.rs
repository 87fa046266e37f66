//! Event repository implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Select, Set, TransactionTrait,
};
use uuid::Uuid;

use super::entities::event::{self, ActiveModel, Entity as EventEntity};
use super::entities::registration::{self, Entity as RegistrationEntity};
use super::map_constraint_error;
use crate::domain::{Event, EventChanges, EventFilter, NewEvent};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Event repository trait. Every list is ordered by date, then time.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: NewEvent) -> AppResult<Event>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>>;

    /// Apply non-empty changes and bump `updated_at`.
    async fn update(&self, id: Uuid, changes: EventChanges) -> AppResult<Event>;

    /// Remove the event and all of its registrations atomically.
    async fn delete_with_registrations(&self, id: Uuid) -> AppResult<()>;

    async fn list_all(&self) -> AppResult<Vec<Event>>;

    async fn list_by_creator(&self, creator_id: Uuid) -> AppResult<Vec<Event>>;

    async fn list_filtered(&self, filter: EventFilter) -> AppResult<Vec<Event>>;

    /// Events whose calendar date is `date`.
    async fn list_on_date(&self, date: NaiveDate) -> AppResult<Vec<Event>>;
}

/// Concrete implementation of EventRepository
pub struct EventStore {
    db: DatabaseConnection,
}

impl EventStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch(&self, query: Select<EventEntity>) -> AppResult<Vec<Event>> {
        let models = query
            .order_by_asc(event::Column::Date)
            .order_by_asc(event::Column::Time)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Event::from).collect())
    }
}

#[async_trait]
impl EventRepository for EventStore {
    async fn create(&self, new_event: NewEvent) -> AppResult<Event> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new_event.title),
            description: Set(new_event.description),
            date: Set(new_event.date),
            time: Set(new_event.time),
            location: Set(new_event.location),
            poster: Set(new_event.poster),
            club_name: Set(new_event.club_name),
            event_type: Set(new_event.event_type),
            created_by: Set(new_event.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            map_constraint_error(
                e,
                || AppError::internal("Duplicate event id"),
                || AppError::Unauthorized,
            )
        })?;

        Ok(Event::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        let model = EventEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Event::from))
    }

    async fn update(&self, id: Uuid, changes: EventChanges) -> AppResult<Event> {
        let model = EventEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();

        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(date) = changes.date {
            active.date = Set(date);
        }
        if let Some(time) = changes.time {
            active.time = Set(time);
        }
        if let Some(location) = changes.location {
            active.location = Set(location);
        }
        if let Some(event_type) = changes.event_type {
            active.event_type = Set(event_type);
        }
        if let Some(poster) = changes.poster {
            active.poster = Set(Some(poster));
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Event::from(model))
    }

    async fn delete_with_registrations(&self, id: Uuid) -> AppResult<()> {
        // Dropped without commit on any early return, which rolls back
        let txn = self.db.begin().await?;

        let removed = RegistrationEntity::delete_many()
            .filter(registration::Column::EventId.eq(id))
            .exec(&txn)
            .await?;

        let result = EventEntity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        txn.commit().await?;

        tracing::debug!(
            event_id = %id,
            registrations = removed.rows_affected,
            "Event deleted with registrations"
        );
        Ok(())
    }

    async fn list_all(&self) -> AppResult<Vec<Event>> {
        self.fetch(EventEntity::find()).await
    }

    async fn list_by_creator(&self, creator_id: Uuid) -> AppResult<Vec<Event>> {
        self.fetch(EventEntity::find().filter(event::Column::CreatedBy.eq(creator_id)))
            .await
    }

    async fn list_filtered(&self, filter: EventFilter) -> AppResult<Vec<Event>> {
        let mut query = EventEntity::find();
        if let Some(club_name) = filter.club_name {
            query = query.filter(event::Column::ClubName.eq(club_name));
        }
        if let Some(event_type) = filter.event_type {
            query = query.filter(event::Column::EventType.eq(event_type));
        }
        self.fetch(query).await
    }

    async fn list_on_date(&self, date: NaiveDate) -> AppResult<Vec<Event>> {
        self.fetch(EventEntity::find().filter(event::Column::Date.eq(date)))
            .await
    }
}
