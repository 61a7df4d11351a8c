use std::sync::Arc;

use salesline_core::AppResult;
use salesline_domain::{TeamRoster, User, UserId};

use crate::UserRepository;

/// Resolves manager → agent teams from current user records.
///
/// Membership is read fresh on every call, so a manager reassignment takes
/// effect on the very next decision.
#[derive(Clone)]
pub struct TeamResolver {
    user_repository: Arc<dyn UserRepository>,
}

impl TeamResolver {
    /// Creates a resolver over the user repository.
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Returns the users reporting to `manager_id`, excluding the manager.
    pub async fn get_team_members(&self, manager_id: &UserId) -> AppResult<Vec<User>> {
        let members = self.user_repository.list_team_members(manager_id).await?;

        Ok(members
            .into_iter()
            .filter(|member| member.id() != manager_id && member.reports_to(manager_id))
            .collect())
    }

    /// Returns whether `user_id` currently reports to `manager_id`.
    pub async fn is_team_member(&self, manager_id: &UserId, user_id: &UserId) -> AppResult<bool> {
        Ok(self
            .get_team_members(manager_id)
            .await?
            .iter()
            .any(|member| member.id() == user_id))
    }

    /// Resolves the roster used by scope decisions for `manager_id`.
    pub async fn roster(&self, manager_id: &UserId) -> AppResult<TeamRoster> {
        let members = self.get_team_members(manager_id).await?;
        Ok(TeamRoster::for_manager(manager_id, &members))
    }
}
