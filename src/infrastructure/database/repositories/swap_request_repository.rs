//! SeaORM implementation of SwapRequestRepository
//!
//! Status changes and deletes are conditional on `status = 'pending'`, so a
//! request that was decided concurrently is never overwritten. Every write
//! is the first statement of its transaction.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use super::{db_err, unique_or_db_err};
use crate::domain::swap_request::{
    SwapParticipants, SwapRequest, SwapRequestId, SwapRequestRepository, SwapRequestSummary,
    SwapRequestsForUser, SwapStatus,
};
use crate::domain::user::UserId;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::swap_request::{self, SwapRequestStatus};
use crate::infrastructure::database::entities::user;

const DUPLICATE_PENDING: &str = "Swap request already pending";

pub struct SeaOrmSwapRequestRepository {
    db: DatabaseConnection,
}

impl SeaOrmSwapRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_entity(status: SwapStatus) -> SwapRequestStatus {
    match status {
        SwapStatus::Pending => SwapRequestStatus::Pending,
        SwapStatus::Accepted => SwapRequestStatus::Accepted,
        SwapStatus::Rejected => SwapRequestStatus::Rejected,
    }
}

fn status_to_domain(status: SwapRequestStatus) -> SwapStatus {
    match status {
        SwapRequestStatus::Pending => SwapStatus::Pending,
        SwapRequestStatus::Accepted => SwapStatus::Accepted,
        SwapRequestStatus::Rejected => SwapStatus::Rejected,
    }
}

pub(crate) fn model_to_domain(model: swap_request::Model) -> SwapRequest {
    SwapRequest {
        id: model.id,
        requester_id: model.requester_id,
        receiver_id: model.receiver_id,
        status: status_to_domain(model.status),
        created_at: model.created_at,
    }
}

pub(crate) async fn find_by_id_in<C: ConnectionTrait>(
    conn: &C,
    id: SwapRequestId,
) -> DomainResult<Option<SwapRequest>> {
    let found = swap_request::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(db_err)?;
    Ok(found.map(model_to_domain))
}

/// Explain why a conditional write on `id` touched no rows.
async fn not_pending_error<C: ConnectionTrait>(
    conn: &C,
    id: SwapRequestId,
    conflict: &str,
) -> DomainError {
    match find_by_id_in(conn, id).await {
        Ok(None) => DomainError::not_found("Swap request", "id", id),
        Ok(Some(_)) => DomainError::Conflict(conflict.to_string()),
        Err(e) => e,
    }
}

// ── SwapRequestRepository impl ──────────────────────────────────

#[async_trait]
impl SwapRequestRepository for SeaOrmSwapRequestRepository {
    async fn create_pending(&self, participants: SwapParticipants) -> DomainResult<SwapRequest> {
        // A single INSERT: the partial unique index on pending pairs decides
        // duplicates, and writing first lets SQLite's busy timeout queue
        // concurrent callers instead of failing a read-to-write upgrade.
        let created = swap_request::ActiveModel {
            requester_id: Set(participants.requester_id),
            receiver_id: Set(participants.receiver_id),
            status: Set(SwapRequestStatus::Pending),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| unique_or_db_err(e, DUPLICATE_PENDING))?;

        debug!(
            "Swap request {} created: {} -> {}",
            created.id, created.requester_id, created.receiver_id
        );
        Ok(model_to_domain(created))
    }

    async fn find_by_id(&self, id: SwapRequestId) -> DomainResult<Option<SwapRequest>> {
        find_by_id_in(&self.db, id).await
    }

    async fn transition(&self, id: SwapRequestId, to: SwapStatus) -> DomainResult<SwapRequest> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let result = swap_request::Entity::update_many()
            .col_expr(swap_request::Column::Status, Expr::value(status_to_entity(to)))
            .filter(swap_request::Column::Id.eq(id))
            .filter(swap_request::Column::Status.eq(SwapRequestStatus::Pending))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(not_pending_error(&txn, id, "Swap request already processed").await);
        }

        let updated = find_by_id_in(&txn, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Swap request", "id", id))?;

        txn.commit().await.map_err(db_err)?;
        Ok(updated)
    }

    async fn delete_pending(&self, id: SwapRequestId) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let result = swap_request::Entity::delete_many()
            .filter(swap_request::Column::Id.eq(id))
            .filter(swap_request::Column::Status.eq(SwapRequestStatus::Pending))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(
                not_pending_error(&txn, id, "Cannot delete processed swap requests").await,
            );
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: UserId) -> DomainResult<SwapRequestsForUser> {
        let sent = swap_request::Entity::find()
            .filter(swap_request::Column::RequesterId.eq(user_id))
            .order_by_asc(swap_request::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let received = swap_request::Entity::find()
            .filter(swap_request::Column::ReceiverId.eq(user_id))
            .order_by_asc(swap_request::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let counterpart_ids: HashSet<i32> = sent
            .iter()
            .map(|r| r.receiver_id)
            .chain(received.iter().map(|r| r.requester_id))
            .collect();

        let names: HashMap<i32, String> = if counterpart_ids.is_empty() {
            HashMap::new()
        } else {
            user::Entity::find()
                .filter(user::Column::Id.is_in(counterpart_ids))
                .all(&self.db)
                .await
                .map_err(db_err)?
                .into_iter()
                .map(|u| (u.id, u.name))
                .collect()
        };

        let summarize = |model: swap_request::Model, counterpart_id: i32| SwapRequestSummary {
            id: model.id,
            counterpart_id,
            counterpart_name: names.get(&counterpart_id).cloned(),
            status: status_to_domain(model.status),
            created_at: model.created_at,
        };

        Ok(SwapRequestsForUser {
            sent: sent
                .into_iter()
                .map(|m| {
                    let counterpart = m.receiver_id;
                    summarize(m, counterpart)
                })
                .collect(),
            received: received
                .into_iter()
                .map(|m| {
                    let counterpart = m.requester_id;
                    summarize(m, counterpart)
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::testing::{file_database, memory_database};
    use std::sync::Arc;

    fn pair(requester: i32, receiver: i32) -> SwapParticipants {
        SwapParticipants::new(Some(requester), Some(receiver)).unwrap()
    }

    #[tokio::test]
    async fn duplicate_pending_is_a_conflict() {
        let repo = SeaOrmSwapRequestRepository::new(memory_database().await);

        repo.create_pending(pair(1, 2)).await.unwrap();
        let err = repo.create_pending(pair(1, 2)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Opposite direction is a different pair
        repo.create_pending(pair(2, 1)).await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_duplicates_on_shared_file_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(SeaOrmSwapRequestRepository::new(
            file_database(dir.path()).await,
        ));

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create_pending(pair(1, 2)).await })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => created += 1,
                Err(DomainError::Conflict(msg)) => assert_eq!(msg, DUPLICATE_PENDING),
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn partial_index_rejects_raw_duplicate_insert() {
        let db = memory_database().await;
        let repo = SeaOrmSwapRequestRepository::new(db.clone());
        repo.create_pending(pair(3, 4)).await.unwrap();

        let err = swap_request::ActiveModel {
            requester_id: Set(3),
            receiver_id: Set(4),
            status: Set(SwapRequestStatus::Pending),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap_err();

        assert!(matches!(
            unique_or_db_err(err, DUPLICATE_PENDING),
            DomainError::Conflict(_)
        ));
    }

    #[tokio::test]
    async fn transition_only_from_pending() {
        let repo = SeaOrmSwapRequestRepository::new(memory_database().await);
        let created = repo.create_pending(pair(1, 2)).await.unwrap();

        let accepted = repo.transition(created.id, SwapStatus::Accepted).await.unwrap();
        assert_eq!(accepted.status, SwapStatus::Accepted);

        let err = repo
            .transition(created.id, SwapStatus::Rejected)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.status, SwapStatus::Accepted);
    }

    #[tokio::test]
    async fn transition_unknown_id_is_not_found() {
        let repo = SeaOrmSwapRequestRepository::new(memory_database().await);
        let err = repo.transition(99, SwapStatus::Accepted).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_pending_only() {
        let repo = SeaOrmSwapRequestRepository::new(memory_database().await);
        let pending = repo.create_pending(pair(1, 2)).await.unwrap();
        let decided = repo.create_pending(pair(1, 3)).await.unwrap();
        repo.transition(decided.id, SwapStatus::Rejected).await.unwrap();

        repo.delete_pending(pending.id).await.unwrap();
        assert!(repo.find_by_id(pending.id).await.unwrap().is_none());

        let err = repo.delete_pending(decided.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let err = repo.delete_pending(pending.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_splits_sent_and_received() {
        let repo = SeaOrmSwapRequestRepository::new(memory_database().await);
        let sent = repo.create_pending(pair(1, 2)).await.unwrap();
        let received = repo.create_pending(pair(3, 1)).await.unwrap();
        repo.create_pending(pair(2, 3)).await.unwrap();

        let listing = repo.list_for_user(1).await.unwrap();

        assert_eq!(listing.sent.len(), 1);
        assert_eq!(listing.sent[0].id, sent.id);
        assert_eq!(listing.sent[0].counterpart_id, 2);
        // No user rows exist in this test
        assert_eq!(listing.sent[0].counterpart_name, None);

        assert_eq!(listing.received.len(), 1);
        assert_eq!(listing.received[0].id, received.id);
        assert_eq!(listing.received[0].counterpart_id, 3);
    }
}
