//! The authenticated requester for a single request

use super::entity::UserId;

/// Resolved identity of the current requester.
///
/// Produced by the authentication gate and dropped with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    user_id: UserId,
}

impl Principal {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Whether this principal is the owner of the given account
    pub fn is(&self, id: UserId) -> bool {
        self.user_id == id
    }
}
