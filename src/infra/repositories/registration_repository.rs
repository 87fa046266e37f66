//! Registration repository implementation.
//!
//! The unique index on (student_id, event_id) is the source of truth for
//! "at most one registration per pair"; concurrent duplicates lose at the
//! database and surface as `AlreadyRegistered`.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::{event, registration, user};
use super::map_constraint_error;
use crate::domain::{Event, Registrant, Registration};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn exists(&self, student_id: Uuid, event_id: Uuid) -> AppResult<bool>;

    /// Insert a registration. Duplicate pairs yield `AlreadyRegistered`,
    /// a vanished event yields `NotFound`.
    async fn create(&self, student_id: Uuid, event_id: Uuid) -> AppResult<Registration>;

    /// Events the student registered for, by date then time.
    async fn events_for_student(&self, student_id: Uuid) -> AppResult<Vec<Event>>;

    /// Students registered for an event, in registration order.
    async fn registrants_for_event(&self, event_id: Uuid) -> AppResult<Vec<Registrant>>;
}

/// Concrete implementation of RegistrationRepository
pub struct RegistrationStore {
    db: DatabaseConnection,
}

impl RegistrationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RegistrationRepository for RegistrationStore {
    async fn exists(&self, student_id: Uuid, event_id: Uuid) -> AppResult<bool> {
        let count = registration::Entity::find()
            .filter(registration::Column::StudentId.eq(student_id))
            .filter(registration::Column::EventId.eq(event_id))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn create(&self, student_id: Uuid, event_id: Uuid) -> AppResult<Registration> {
        let active_model = registration::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(student_id),
            event_id: Set(event_id),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            map_constraint_error(e, || AppError::AlreadyRegistered, || AppError::NotFound)
        })?;

        Ok(Registration::from(model))
    }

    async fn events_for_student(&self, student_id: Uuid) -> AppResult<Vec<Event>> {
        let models = event::Entity::find()
            .inner_join(registration::Entity)
            .filter(registration::Column::StudentId.eq(student_id))
            .order_by_asc(event::Column::Date)
            .order_by_asc(event::Column::Time)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Event::from).collect())
    }

    async fn registrants_for_event(&self, event_id: Uuid) -> AppResult<Vec<Registrant>> {
        let rows = user::Entity::find()
            .select_only()
            .column(user::Column::Id)
            .column(user::Column::Name)
            .column(user::Column::Email)
            .inner_join(registration::Entity)
            .filter(registration::Column::EventId.eq(event_id))
            .order_by_asc(registration::Column::CreatedAt)
            .into_tuple::<(Uuid, String, String)>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, email)| Registrant { id, name, email })
            .collect())
    }
}
