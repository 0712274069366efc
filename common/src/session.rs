use serde::{Deserialize, Serialize};

/// Session key holding the logged-in user's id.
pub const USER_ID_KEY: &str = "user_id";

/// Identity of the logged-in user, inserted into request extensions by the auth middleware.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: i64,
}
