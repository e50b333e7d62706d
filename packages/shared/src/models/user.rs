use serde::{Deserialize, Serialize};

/// Read-only projection of a user record owned by the surrounding
/// application; only the fields the leaderboard needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub avatar: Option<String>,
}
