//! SeaORM implementation of ShiftRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use super::db_err;
use crate::domain::{DomainResult, Shift, ShiftDeletion, ShiftDraft, ShiftPatch, ShiftRepository};
use crate::infrastructure::database::entities::{assignment, shift, shift_request};

pub struct SeaOrmShiftRepository {
    db: DatabaseConnection,
}

impl SeaOrmShiftRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn model_to_domain(m: shift::Model) -> Shift {
    Shift {
        id: m.id,
        date: m.date,
        start_time: m.start_time,
        end_time: m.end_time,
        role: m.role,
        location: m.location,
        created_at: m.created_at,
    }
}

fn apply_draft(active: &mut shift::ActiveModel, draft: ShiftDraft) {
    active.date = Set(draft.date);
    active.start_time = Set(draft.start_time);
    active.end_time = Set(draft.end_time);
    active.role = Set(draft.role);
    active.location = Set(draft.location);
}

#[async_trait]
impl ShiftRepository for SeaOrmShiftRepository {
    async fn create(&self, draft: ShiftDraft) -> DomainResult<Shift> {
        let mut model = shift::ActiveModel {
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        apply_draft(&mut model, draft);

        let saved = model.insert(&self.db).await.map_err(db_err)?;
        debug!(shift_id = saved.id, "Shift created");
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Shift>> {
        let model = shift::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Shift>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = shift::Entity::find()
            .filter(shift::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn list(&self) -> DomainResult<Vec<Shift>> {
        let models = shift::Entity::find()
            .order_by_desc(shift::Column::Date)
            .order_by_asc(shift::Column::StartTime)
            .order_by_asc(shift::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, id: i32, patch: ShiftPatch) -> DomainResult<Option<Shift>> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let Some(existing) = shift::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        // Dropping `txn` on the error path rolls back.
        let draft = patch.apply_to(&model_to_domain(existing.clone()))?;

        let mut active: shift::ActiveModel = existing.into();
        apply_draft(&mut active, draft);
        active.update(&txn).await.map_err(db_err)?;

        let updated = shift::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        debug!(shift_id = id, "Shift updated");
        Ok(updated.map(model_to_domain))
    }

    async fn delete(&self, id: i32) -> DomainResult<ShiftDeletion> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let exists = shift::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Ok(ShiftDeletion::NotFound);
        }

        let assignments = assignment::Entity::find()
            .filter(assignment::Column::ShiftId.eq(id))
            .count(&txn)
            .await
            .map_err(db_err)?;
        let requests = shift_request::Entity::find()
            .filter(shift_request::Column::ShiftId.eq(id))
            .count(&txn)
            .await
            .map_err(db_err)?;
        if assignments > 0 || requests > 0 {
            return Ok(ShiftDeletion::Referenced {
                assignments,
                requests,
            });
        }

        shift::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        debug!(shift_id = id, "Shift deleted");
        Ok(ShiftDeletion::Deleted)
    }
}
