use serde::{Deserialize, Serialize};

/// Liveness payload for `/health`, with a few store counters attached.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Health {
    pub status: String,
    pub users: usize,
    pub complaints: usize,
    pub resolved: usize,
}

impl Health {
    pub fn ok(users: usize, complaints: usize, resolved: usize) -> Self {
        Self { status: "ok".into(), users, complaints, resolved }
    }
}
