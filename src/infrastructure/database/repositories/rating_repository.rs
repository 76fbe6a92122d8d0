//! SeaORM implementation of RatingRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
    TransactionTrait,
};
use tracing::debug;

use super::swap_request_repository::find_by_id_in;
use super::db_err;
use crate::domain::rating::{NewRating, Rating, RatingRepository};
use crate::domain::swap_request::SwapRequestId;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::rating;

const DUPLICATE_RATING: &str = "Rating already exists";

pub struct SeaOrmRatingRepository {
    db: DatabaseConnection,
}

impl SeaOrmRatingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(model: rating::Model) -> Rating {
    Rating {
        id: model.id,
        swap_request_id: model.swap_request_id,
        score: model.score,
        feedback: model.feedback,
    }
}

#[async_trait]
impl RatingRepository for SeaOrmRatingRepository {
    async fn create(&self, new_rating: NewRating) -> DomainResult<Rating> {
        let swap_id = new_rating.swap_request_id;
        let txn = self.db.begin().await.map_err(db_err)?;

        // Insert first so the transaction holds the write lock before it reads
        let inserted = rating::ActiveModel {
            swap_request_id: Set(swap_id),
            score: Set(new_rating.score),
            feedback: Set(new_rating.feedback),
            ..Default::default()
        }
        .insert(&txn)
        .await;

        let created = match inserted {
            Ok(created) => created,
            Err(e) => {
                if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
                    return Err(DomainError::Conflict(DUPLICATE_RATING.to_string()));
                }
                return Err(match find_by_id_in(&txn, swap_id).await {
                    Ok(None) => DomainError::not_found("Swap request", "id", swap_id),
                    Ok(Some(_)) => db_err(e),
                    Err(lookup) => lookup,
                });
            }
        };

        // Dropping the transaction on error rolls the insert back
        let swap = find_by_id_in(&txn, swap_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Swap request", "id", swap_id))?;
        swap.ensure_rateable()?;

        txn.commit().await.map_err(db_err)?;

        debug!("Rating {} added to swap {}", created.id, swap.id);
        Ok(model_to_domain(created))
    }

    async fn find_for_swap(&self, swap_request_id: SwapRequestId) -> DomainResult<Option<Rating>> {
        let found = rating::Entity::find()
            .filter(rating::Column::SwapRequestId.eq(swap_request_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(model_to_domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::swap_request::{SwapParticipants, SwapRequestRepository, SwapStatus};
    use crate::infrastructure::database::repositories::swap_request_repository::SeaOrmSwapRequestRepository;
    use crate::infrastructure::database::testing::{file_database, memory_database};
    use std::sync::Arc;

    async fn swap_in_status(
        swaps: &SeaOrmSwapRequestRepository,
        status: SwapStatus,
    ) -> SwapRequestId {
        let created = swaps
            .create_pending(SwapParticipants::new(Some(1), Some(2)).unwrap())
            .await
            .unwrap();
        if status != SwapStatus::Pending {
            swaps.transition(created.id, status).await.unwrap();
        }
        created.id
    }

    #[tokio::test]
    async fn rates_accepted_swap_once() {
        let db = memory_database().await;
        let swaps = SeaOrmSwapRequestRepository::new(db.clone());
        let ratings = SeaOrmRatingRepository::new(db);
        let swap_id = swap_in_status(&swaps, SwapStatus::Accepted).await;

        let rating = ratings
            .create(NewRating::new(swap_id, Some(4), None).unwrap())
            .await
            .unwrap();
        assert_eq!(rating.score, 4);
        assert_eq!(rating.feedback, "");

        let err = ratings
            .create(NewRating::new(swap_id, Some(5), Some("again".into())).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let stored = ratings.find_for_swap(swap_id).await.unwrap().unwrap();
        assert_eq!(stored.id, rating.id);
    }

    #[tokio::test]
    async fn pending_swap_cannot_be_rated() {
        let db = memory_database().await;
        let swaps = SeaOrmSwapRequestRepository::new(db.clone());
        let ratings = SeaOrmRatingRepository::new(db);
        let swap_id = swap_in_status(&swaps, SwapStatus::Pending).await;

        let err = ratings
            .create(NewRating::new(swap_id, Some(3), None).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert!(ratings.find_for_swap(swap_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_swap_is_not_found() {
        let ratings = SeaOrmRatingRepository::new(memory_database().await);
        let err = ratings
            .create(NewRating::new(404, Some(3), None).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_ratings_on_shared_file_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_database(dir.path()).await;
        let swaps = SeaOrmSwapRequestRepository::new(db.clone());
        let ratings = Arc::new(SeaOrmRatingRepository::new(db));
        let swap_id = swap_in_status(&swaps, SwapStatus::Accepted).await;

        let tasks: Vec<_> = (1..=8)
            .map(|i| {
                let ratings = ratings.clone();
                let score = i % 5 + 1;
                tokio::spawn(async move {
                    ratings
                        .create(NewRating::new(swap_id, Some(score), None).unwrap())
                        .await
                })
            })
            .collect();

        let mut added = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => added += 1,
                Err(DomainError::Conflict(msg)) => assert_eq!(msg, DUPLICATE_RATING),
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(added, 1);
        assert!(ratings.find_for_swap(swap_id).await.unwrap().is_some());
    }
}
