//! SeaORM implementation of ShiftRequestRepository
//!
//! Decisions are status-guarded (`WHERE id = ? AND status IN (sources)`,
//! sources taken from `ShiftRequestStatus::sources_of`) so concurrent
//! approvals of one request cannot both succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use super::assignment_repository::model_to_domain as assignment_to_domain;
use super::db_err;
use crate::domain::{
    Approval, DomainResult, NewShiftRequest, ShiftRequest, ShiftRequestFilter,
    ShiftRequestRepository, ShiftRequestStatus, Transition,
};
use crate::infrastructure::database::entities::shift_request::{self, RequestStatus};
use crate::infrastructure::database::entities::assignment;

pub struct SeaOrmShiftRequestRepository {
    db: DatabaseConnection,
}

impl SeaOrmShiftRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_domain(status: RequestStatus) -> ShiftRequestStatus {
    match status {
        RequestStatus::Pending => ShiftRequestStatus::Pending,
        RequestStatus::Approved => ShiftRequestStatus::Approved,
        RequestStatus::Rejected => ShiftRequestStatus::Rejected,
    }
}

fn status_to_entity(status: ShiftRequestStatus) -> RequestStatus {
    match status {
        ShiftRequestStatus::Pending => RequestStatus::Pending,
        ShiftRequestStatus::Approved => RequestStatus::Approved,
        ShiftRequestStatus::Rejected => RequestStatus::Rejected,
    }
}

fn model_to_domain(m: shift_request::Model) -> ShiftRequest {
    ShiftRequest {
        id: m.id,
        user_id: m.user_id,
        shift_id: m.shift_id,
        status: status_to_domain(m.status),
        requested_at: m.requested_at,
        approved_at: m.approved_at,
    }
}

/// Guarded `source -> next` update, where the sources are the statuses the
/// domain state machine allows `next` to be entered from. Returns the
/// refreshed row on success, otherwise why nothing changed.
async fn decide<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    next: ShiftRequestStatus,
    approved_at: Option<DateTime<Utc>>,
) -> DomainResult<Transition<shift_request::Model>> {
    let sources: Vec<RequestStatus> = ShiftRequestStatus::sources_of(next)
        .into_iter()
        .map(status_to_entity)
        .collect();

    let mut update = shift_request::Entity::update_many().col_expr(
        shift_request::Column::Status,
        Expr::value(status_to_entity(next).to_value()),
    );
    if let Some(at) = approved_at {
        update = update.col_expr(shift_request::Column::ApprovedAt, Expr::value(at));
    }

    let result = update
        .filter(shift_request::Column::Id.eq(id))
        .filter(shift_request::Column::Status.is_in(sources))
        .exec(conn)
        .await
        .map_err(db_err)?;

    let current = shift_request::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(db_err)?;

    Ok(match current {
        None => Transition::NotFound,
        Some(row) if result.rows_affected == 0 => {
            let current = status_to_domain(row.status);
            debug_assert!(!current.can_transition_to(next));
            Transition::AlreadyDecided(current)
        }
        Some(row) => Transition::Applied(row),
    })
}

// ── ShiftRequestRepository impl ─────────────────────────────────

#[async_trait]
impl ShiftRequestRepository for SeaOrmShiftRequestRepository {
    async fn create(&self, request: NewShiftRequest) -> DomainResult<ShiftRequest> {
        let model = shift_request::ActiveModel {
            user_id: Set(request.user_id),
            shift_id: Set(request.shift_id),
            status: Set(RequestStatus::Pending),
            requested_at: Set(request.requested_at),
            approved_at: Set(None),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        debug!(request_id = saved.id, "Shift request stored");
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ShiftRequest>> {
        let model = shift_request::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(&self, filter: &ShiftRequestFilter) -> DomainResult<Vec<ShiftRequest>> {
        let mut query = shift_request::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(shift_request::Column::Status.eq(status_to_entity(status)));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(shift_request::Column::UserId.eq(user_id));
        }
        if let Some(shift_id) = filter.shift_id {
            query = query.filter(shift_request::Column::ShiftId.eq(shift_id));
        }

        let models = query
            .order_by_desc(shift_request::Column::RequestedAt)
            .order_by_desc(shift_request::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn has_pending(&self, user_id: i32, shift_id: i32) -> DomainResult<bool> {
        let count = shift_request::Entity::find()
            .filter(shift_request::Column::UserId.eq(user_id))
            .filter(shift_request::Column::ShiftId.eq(shift_id))
            .filter(shift_request::Column::Status.eq(RequestStatus::Pending))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn approve(&self, id: i32, at: DateTime<Utc>) -> DomainResult<Transition<Approval>> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let row = match decide(&txn, id, ShiftRequestStatus::Approved, Some(at)).await? {
            Transition::Applied(row) => row,
            Transition::NotFound => {
                txn.rollback().await.map_err(db_err)?;
                return Ok(Transition::NotFound);
            }
            Transition::AlreadyDecided(status) => {
                txn.rollback().await.map_err(db_err)?;
                return Ok(Transition::AlreadyDecided(status));
            }
        };

        // An insert failure drops `txn`, which rolls the status change back.
        let assignment = assignment::ActiveModel {
            shift_id: Set(row.shift_id),
            user_id: Set(row.user_id),
            assigned_at: Set(at),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        debug!(request_id = id, assignment_id = assignment.id, "Shift request approved");

        Ok(Transition::Applied(Approval {
            request: model_to_domain(row),
            assignment: assignment_to_domain(assignment),
        }))
    }

    async fn reject(&self, id: i32) -> DomainResult<Transition<ShiftRequest>> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let outcome = decide(&txn, id, ShiftRequestStatus::Rejected, None).await?;
        txn.commit().await.map_err(db_err)?;

        Ok(match outcome {
            Transition::Applied(row) => Transition::Applied(model_to_domain(row)),
            Transition::NotFound => Transition::NotFound,
            Transition::AlreadyDecided(status) => Transition::AlreadyDecided(status),
        })
    }
}
