//! Admin dashboard model: the approval queue and its row actions.

use crate::admin::AdminApi;
use crate::types::User;

#[derive(Clone, Debug, Default)]
pub struct ApprovalBoard {
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ApprovalBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload the queue from the server
    pub async fn refresh<A: AdminApi>(&mut self, api: &A) -> bool {
        self.error = None;

        self.loading = true;
        let result = api.unverified_users().await;
        self.loading = false;

        match result {
            Ok(users) => {
                self.users = users;
                true
            }
            Err(err) => {
                self.error = Some(err.message_or("Failed to fetch users"));
                false
            }
        }
    }

    /// Approve one row; on success the row leaves the board
    pub async fn approve<A: AdminApi>(&mut self, api: &A, user_id: &str) -> bool {
        self.error = None;

        match api.verify_user(user_id).await {
            Ok(_) => {
                self.users.retain(|user| user.id != user_id);
                true
            }
            Err(err) => {
                self.error = Some(err.message_or("Failed to approve user"));
                false
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClientError;
    use crate::mock::{MockApi, sample_user};

    #[tokio::test]
    async fn test_refresh_and_approve() {
        let api = MockApi::with_queue(vec![sample_user("u1"), sample_user("u2")]);
        let mut board = ApprovalBoard::new();

        assert!(board.refresh(&api).await);
        assert_eq!(board.users.len(), 2);

        assert!(board.approve(&api, "u1").await);
        let ids: Vec<_> = board.users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u2"]);
    }

    #[tokio::test]
    async fn test_failed_approval_keeps_row() {
        let api = MockApi::with_queue(vec![sample_user("u1")]);
        let mut board = ApprovalBoard::new();
        board.refresh(&api).await;

        api.fail_next(ClientError::Http {
            status: 404,
            message: "User not found".to_string(),
        });
        assert!(!board.approve(&api, "u1").await);
        assert_eq!(board.users.len(), 1);
        assert_eq!(board.error.as_deref(), Some("User not found"));
    }

    #[tokio::test]
    async fn test_refresh_failure_uses_fallback_message() {
        let api = MockApi::new();
        let mut board = ApprovalBoard::new();
        api.fail_next(ClientError::Timeout("slow".to_string()));

        assert!(!board.refresh(&api).await);
        assert_eq!(board.error.as_deref(), Some("Failed to fetch users"));
        assert!(board.is_empty());
    }
}
