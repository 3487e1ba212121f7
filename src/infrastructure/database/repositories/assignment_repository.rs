//! SeaORM implementation of AssignmentRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::db_err;
use crate::domain::{Assignment, AssignmentRepository, DomainResult, NewAssignment};
use crate::infrastructure::database::entities::assignment;

pub struct SeaOrmAssignmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmAssignmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn model_to_domain(m: assignment::Model) -> Assignment {
    Assignment {
        id: m.id,
        shift_id: m.shift_id,
        user_id: m.user_id,
        assigned_at: m.assigned_at,
    }
}

#[async_trait]
impl AssignmentRepository for SeaOrmAssignmentRepository {
    async fn create(&self, new: NewAssignment) -> DomainResult<Assignment> {
        let saved = assignment::ActiveModel {
            shift_id: Set(new.shift_id),
            user_id: Set(new.user_id),
            assigned_at: Set(new.assigned_at),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        debug!(assignment_id = saved.id, shift_id = saved.shift_id, "Assignment created");
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Assignment>> {
        let model = assignment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(&self) -> DomainResult<Vec<Assignment>> {
        let models = assignment::Entity::find()
            .order_by_asc(assignment::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn list_for_shifts(&self, shift_ids: &[i32]) -> DomainResult<Vec<Assignment>> {
        if shift_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = assignment::Entity::find()
            .filter(assignment::Column::ShiftId.is_in(shift_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn reassign(
        &self,
        id: i32,
        user_id: i32,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<Assignment>> {
        let Some(existing) = assignment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active: assignment::ActiveModel = existing.into();
        active.user_id = Set(user_id);
        active.assigned_at = Set(at);
        let updated = active.update(&self.db).await.map_err(db_err)?;

        debug!(assignment_id = id, user_id, "Assignment re-pointed");
        Ok(Some(model_to_domain(updated)))
    }
}
