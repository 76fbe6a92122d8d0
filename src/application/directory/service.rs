//! Directory business logic service

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::DirectoryConfig;
use crate::domain::rating::NewRating;
use crate::domain::skill::{normalize_skill_name, Skill, SkillId};
use crate::domain::swap_request::{
    SwapAction, SwapParticipants, SwapRequest, SwapRequestId, SwapRequestsForUser, SwapStatus,
};
use crate::domain::user::{CreateUserDto, NewUser, UserId, UserProfile};
use crate::domain::{DomainError, DomainResult, RatingId, RepositoryProvider};

/// Knobs that tighten the default directory rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryPolicy {
    /// Reject swap requests naming users that do not exist
    pub verify_swap_participants: bool,
}

impl From<&DirectoryConfig> for DirectoryPolicy {
    fn from(config: &DirectoryConfig) -> Self {
        Self {
            verify_swap_participants: config.verify_swap_participants,
        }
    }
}

/// Service for directory operations.
///
/// Operations on an existing swap request look it up first, then check its
/// lifecycle state, then validate the rest of the input. The repositories
/// re-check lifecycle rules inside their transactions.
pub struct DirectoryService {
    repos: Arc<dyn RepositoryProvider>,
    policy: DirectoryPolicy,
}

impl DirectoryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self::with_policy(repos, DirectoryPolicy::default())
    }

    pub fn with_policy(repos: Arc<dyn RepositoryProvider>, policy: DirectoryPolicy) -> Self {
        Self { repos, policy }
    }

    // ── Skills ─────────────────────────────────────────────────

    /// Get-or-create a skill by name, case-insensitively
    pub async fn resolve_skill(&self, name: &str) -> DomainResult<SkillId> {
        let name = normalize_skill_name(name)?;
        let skill = self.repos.skills().resolve(&name).await?;
        Ok(skill.id)
    }

    pub async fn list_skills(&self) -> DomainResult<Vec<Skill>> {
        self.repos.skills().list().await
    }

    // ── Users ──────────────────────────────────────────────────

    pub async fn create_user(&self, dto: CreateUserDto) -> DomainResult<UserId> {
        let new_user = NewUser::try_from(dto)?;
        let offered = new_user.skills_offered.len();
        let wanted = new_user.skills_wanted.len();

        let user_id = self.repos.users().create(new_user).await?;

        metrics::counter!("skillswap_users_created_total").increment(1);
        info!(user_id, offered, wanted, "User created");
        Ok(user_id)
    }

    /// Public profile of a user. Private profiles are refused for every caller.
    pub async fn get_user(&self, id: UserId) -> DomainResult<UserProfile> {
        let profile = self
            .repos
            .users()
            .find_profile(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", id))?;

        profile.user.ensure_visible()?;
        debug!(user_id = id, "Profile served");
        Ok(profile)
    }

    /// Public users offering the named skill, ascending by id. An unknown
    /// skill yields an empty list.
    pub async fn search_by_skill(&self, skill: Option<&str>) -> DomainResult<Vec<UserProfile>> {
        let raw = skill
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| DomainError::Validation("Skill query param required".into()))?;
        let name = normalize_skill_name(raw)?;

        let Some(skill) = self.repos.skills().find_by_name(&name).await? else {
            debug!(skill = %name, "Search for unknown skill");
            return Ok(Vec::new());
        };

        let results = self.repos.users().find_public_offerers(skill.id).await?;
        debug!(skill = %name, results = results.len(), "Search completed");
        Ok(results)
    }

    // ── Swap requests ──────────────────────────────────────────

    pub async fn create_swap_request(
        &self,
        requester_id: Option<UserId>,
        receiver_id: Option<UserId>,
    ) -> DomainResult<SwapRequestId> {
        let participants = SwapParticipants::new(requester_id, receiver_id)?;

        if self.policy.verify_swap_participants {
            for id in [participants.requester_id, participants.receiver_id] {
                if self.repos.users().find_by_id(id).await?.is_none() {
                    return Err(DomainError::not_found("User", "id", id));
                }
            }
        }

        let swap = match self.repos.swap_requests().create_pending(participants).await {
            Ok(swap) => swap,
            Err(e) => {
                if let DomainError::Conflict(_) = e {
                    warn!(
                        requester_id = participants.requester_id,
                        receiver_id = participants.receiver_id,
                        "Duplicate pending swap request refused"
                    );
                }
                return Err(e);
            }
        };

        metrics::counter!("skillswap_swap_requests_total", "status" => SwapStatus::Pending.as_str())
            .increment(1);
        info!(
            swap_id = swap.id,
            requester_id = swap.requester_id,
            receiver_id = swap.receiver_id,
            "Swap request sent"
        );
        Ok(swap.id)
    }

    /// Accept or reject a pending request. Terminal states never change.
    pub async fn decide_swap_request(
        &self,
        id: SwapRequestId,
        action: Option<&str>,
    ) -> DomainResult<SwapStatus> {
        let current = self.find_swap_request(id).await?;
        let action = SwapAction::parse(action)?;

        let target = match current.decide(action) {
            Ok(target) => target,
            Err(e) => {
                warn!(swap_id = id, status = %current.status, "Decision on processed swap request refused");
                return Err(e);
            }
        };

        // Another caller may have decided it since the read above
        let updated = self.repos.swap_requests().transition(id, target).await?;

        metrics::counter!("skillswap_swap_requests_total", "status" => updated.status.as_str())
            .increment(1);
        info!(swap_id = id, status = %updated.status, "Swap request decided");
        Ok(updated.status)
    }

    pub async fn delete_swap_request(&self, id: SwapRequestId) -> DomainResult<()> {
        let current = self.find_swap_request(id).await?;

        if let Err(e) = current.ensure_deletable() {
            warn!(swap_id = id, status = %current.status, "Delete of processed swap request refused");
            return Err(e);
        }

        self.repos.swap_requests().delete_pending(id).await?;
        info!(swap_id = id, "Swap request deleted");
        Ok(())
    }

    pub async fn list_for_user(&self, user_id: UserId) -> DomainResult<SwapRequestsForUser> {
        if self.repos.users().find_by_id(user_id).await?.is_none() {
            return Err(DomainError::not_found("User", "id", user_id));
        }

        let listing = self.repos.swap_requests().list_for_user(user_id).await?;
        debug!(
            user_id,
            sent = listing.sent.len(),
            received = listing.received.len(),
            "Swap requests listed"
        );
        Ok(listing)
    }

    // ── Ratings ────────────────────────────────────────────────

    pub async fn add_rating(
        &self,
        swap_request_id: SwapRequestId,
        score: Option<i64>,
        feedback: Option<String>,
    ) -> DomainResult<RatingId> {
        let swap = self.find_swap_request(swap_request_id).await?;
        if let Err(e) = swap.ensure_rateable() {
            warn!(swap_id = swap.id, status = %swap.status, "Rating of unaccepted swap refused");
            return Err(e);
        }
        if self.repos.ratings().find_for_swap(swap.id).await?.is_some() {
            return Err(DomainError::Conflict("Rating already exists".into()));
        }

        let new_rating = NewRating::new(swap.id, score, feedback)?;

        let rating = self.repos.ratings().create(new_rating).await?;

        metrics::counter!("skillswap_ratings_total").increment(1);
        info!(
            rating_id = rating.id,
            swap_id = swap_request_id,
            score = rating.score,
            "Rating added"
        );
        Ok(rating.id)
    }

    async fn find_swap_request(&self, id: SwapRequestId) -> DomainResult<SwapRequest> {
        self.repos
            .swap_requests()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Swap request", "id", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::testing::memory_database;
    use crate::infrastructure::SeaOrmRepositoryProvider;

    async fn service() -> DirectoryService {
        let db = memory_database().await;
        DirectoryService::new(Arc::new(SeaOrmRepositoryProvider::new(db)))
    }

    fn user(name: &str, is_public: bool, offered: &[&str], wanted: &[&str]) -> CreateUserDto {
        CreateUserDto {
            name: Some(name.to_string()),
            is_public: Some(is_public),
            skills_offered: offered.iter().map(|s| s.to_string()).collect(),
            skills_wanted: wanted.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    async fn accepted_swap(svc: &DirectoryService) -> SwapRequestId {
        let a = svc.create_user(user("Ana", true, &[], &[])).await.unwrap();
        let b = svc.create_user(user("Ben", true, &[], &[])).await.unwrap();
        let swap = svc.create_swap_request(Some(a), Some(b)).await.unwrap();
        svc.decide_swap_request(swap, Some("accept")).await.unwrap();
        swap
    }

    #[tokio::test]
    async fn resolve_skill_ignores_case() {
        let svc = service().await;
        let lower = svc.resolve_skill("cooking").await.unwrap();
        let upper = svc.resolve_skill("COOKING").await.unwrap();
        let padded = svc.resolve_skill("  Cooking ").await.unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower, padded);
        assert_eq!(svc.list_skills().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_skill_name_is_rejected() {
        let svc = service().await;
        let err = svc.resolve_skill("   ").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_skills_collapse_to_one_association() {
        let svc = service().await;
        let id = svc
            .create_user(user("Ana", true, &["Cooking", "cooking"], &[]))
            .await
            .unwrap();

        let profile = svc.get_user(id).await.unwrap();
        assert_eq!(profile.skills_offered, vec!["cooking"]);
    }

    #[tokio::test]
    async fn create_user_requires_name() {
        let svc = service().await;
        let err = svc.create_user(CreateUserDto::default()).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = svc.create_user(user("  ", true, &[], &[])).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn private_profile_is_forbidden() {
        let svc = service().await;
        let id = svc.create_user(user("Ana", false, &[], &[])).await.unwrap();

        let err = svc.get_user(id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let svc = service().await;
        assert!(matches!(
            svc.get_user(77).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
        assert!(matches!(
            svc.list_for_user(77).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn search_returns_public_offerers_in_id_order() {
        let svc = service().await;
        let first = svc.create_user(user("Ana", true, &["Python"], &[])).await.unwrap();
        svc.create_user(user("Ben", false, &["python"], &[])).await.unwrap();
        svc.create_user(user("Cy", true, &[], &["python"])).await.unwrap();
        let last = svc.create_user(user("Di", true, &["python"], &[])).await.unwrap();

        let results = svc.search_by_skill(Some("PYTHON")).await.unwrap();
        let ids: Vec<UserId> = results.iter().map(|p| p.user.id).collect();
        assert_eq!(ids, vec![first, last]);
    }

    #[tokio::test]
    async fn search_edge_cases() {
        let svc = service().await;
        assert!(svc.search_by_skill(Some("knitting")).await.unwrap().is_empty());
        assert!(matches!(
            svc.search_by_skill(None).await.unwrap_err(),
            DomainError::Validation(_)
        ));
        assert!(matches!(
            svc.search_by_skill(Some("")).await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn swap_request_input_validation() {
        let svc = service().await;
        for (requester, receiver) in [(None, Some(2)), (Some(1), None), (Some(3), Some(3))] {
            let err = svc.create_swap_request(requester, receiver).await.unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn duplicate_pending_then_retry_after_reject() {
        let svc = service().await;
        let first = svc.create_swap_request(Some(1), Some(2)).await.unwrap();

        let err = svc.create_swap_request(Some(1), Some(2)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        svc.decide_swap_request(first, Some("reject")).await.unwrap();
        let second = svc.create_swap_request(Some(1), Some(2)).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn second_decision_always_conflicts() {
        let svc = service().await;
        for first_action in ["accept", "reject"] {
            for second_action in ["accept", "reject"] {
                let swap = svc.create_swap_request(Some(1), Some(2)).await.unwrap();
                let status = svc.decide_swap_request(swap, Some(first_action)).await.unwrap();
                assert!(status.is_terminal());

                let err = svc
                    .decide_swap_request(swap, Some(second_action))
                    .await
                    .unwrap_err();
                assert!(matches!(err, DomainError::Conflict(_)));
            }
        }
    }

    #[tokio::test]
    async fn decide_reports_unknown_swap_before_bad_action() {
        let svc = service().await;
        for action in [Some("maybe"), None, Some("accept")] {
            let err = svc.decide_swap_request(999, action).await.unwrap_err();
            assert!(matches!(err, DomainError::NotFound { .. }), "action {:?}", action);
        }

        let swap = svc.create_swap_request(Some(1), Some(2)).await.unwrap();
        let err = svc.decide_swap_request(swap, Some("maybe")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn bad_action_on_processed_swap_is_a_validation_error() {
        let svc = service().await;
        let swap = svc.create_swap_request(Some(1), Some(2)).await.unwrap();
        svc.decide_swap_request(swap, Some("reject")).await.unwrap();

        let err = svc.decide_swap_request(swap, Some("maybe")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn rating_checks_swap_state_before_score() {
        let svc = service().await;
        for score in [None, Some(0), Some(6)] {
            let err = svc.add_rating(999, score, None).await.unwrap_err();
            assert!(matches!(err, DomainError::NotFound { .. }), "score {:?}", score);
        }

        let pending = svc.create_swap_request(Some(7), Some(8)).await.unwrap();
        let err = svc.add_rating(pending, Some(0), None).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let swap = accepted_swap(&svc).await;
        svc.add_rating(swap, Some(5), None).await.unwrap();
        let err = svc.add_rating(swap, None, None).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_only_pending_and_listing_omits_it() {
        let svc = service().await;
        let a = svc.create_user(user("Ana", true, &[], &[])).await.unwrap();
        let b = svc.create_user(user("Ben", true, &[], &[])).await.unwrap();
        let c = svc.create_user(user("Cy", true, &[], &[])).await.unwrap();

        let pending = svc.create_swap_request(Some(a), Some(b)).await.unwrap();
        let accepted = svc.create_swap_request(Some(a), Some(c)).await.unwrap();
        svc.decide_swap_request(accepted, Some("accept")).await.unwrap();
        let rejected = svc.create_swap_request(Some(c), Some(a)).await.unwrap();
        svc.decide_swap_request(rejected, Some("reject")).await.unwrap();

        for id in [accepted, rejected] {
            let err = svc.delete_swap_request(id).await.unwrap_err();
            assert!(matches!(err, DomainError::Conflict(_)));
        }

        svc.delete_swap_request(pending).await.unwrap();
        let listing = svc.list_for_user(a).await.unwrap();
        let sent: Vec<SwapRequestId> = listing.sent.iter().map(|s| s.id).collect();
        assert_eq!(sent, vec![accepted]);
        assert_eq!(listing.received.len(), 1);
        assert_eq!(listing.received[0].counterpart_name.as_deref(), Some("Cy"));
        assert_eq!(listing.received[0].status, SwapStatus::Rejected);

        let err = svc.delete_swap_request(pending).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn rating_succeeds_once_per_swap() {
        let svc = service().await;
        let swap = accepted_swap(&svc).await;

        svc.add_rating(swap, Some(4), None).await.unwrap();

        let err = svc
            .add_rating(swap, Some(5), Some("great".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn rating_score_bounds() {
        let svc = service().await;
        let swap = accepted_swap(&svc).await;

        for score in [None, Some(0), Some(6), Some(-1)] {
            let err = svc.add_rating(swap, score, None).await.unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "score {:?}", score);
        }

        svc.add_rating(swap, Some(1), Some("ok".into())).await.unwrap();
    }

    #[tokio::test]
    async fn rating_requires_accepted_existing_swap() {
        let svc = service().await;
        let pending = svc.create_swap_request(Some(1), Some(2)).await.unwrap();

        let err = svc.add_rating(pending, Some(3), None).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let err = svc.add_rating(4242, Some(3), None).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn unknown_participants_allowed_by_default() {
        let svc = service().await;
        let swap = svc.create_swap_request(Some(10), Some(20)).await.unwrap();
        assert!(swap > 0);
    }

    #[tokio::test]
    async fn strict_policy_verifies_participants() {
        let db = memory_database().await;
        let svc = DirectoryService::with_policy(
            Arc::new(SeaOrmRepositoryProvider::new(db)),
            DirectoryPolicy {
                verify_swap_participants: true,
            },
        );

        let a = svc.create_user(user("Ana", true, &[], &[])).await.unwrap();
        let err = svc.create_swap_request(Some(a), Some(a + 100)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let b = svc.create_user(user("Ben", false, &[], &[])).await.unwrap();
        svc.create_swap_request(Some(a), Some(b)).await.unwrap();
    }
}
