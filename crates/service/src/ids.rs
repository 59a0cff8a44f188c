//! ID and secret generation.
//!
//! The store never invents identifiers itself; it asks an [`IdGenerator`]
//! and rejects whatever collides with a record it already holds.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use uuid::Uuid;

const SECRET_LEN: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    User,
    Complaint,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::User => "user",
            RecordKind::Complaint => "complaint",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of record identifiers and login secrets.
///
/// Implementations must never repeat a value for the lifetime of the
/// process. Secrets are bearer credentials and must not be predictable
/// outside of tests.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self, kind: RecordKind) -> String;
    fn next_secret(&self) -> String;
}

/// Production generator: v4 UUIDs for ids, OS-random alphanumerics for secrets.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self, _kind: RecordKind) -> String {
        Uuid::new_v4().to_string()
    }

    fn next_secret(&self) -> String {
        OsRng
            .sample_iter(&Alphanumeric)
            .take(SECRET_LEN)
            .map(char::from)
            .collect()
    }
}

/// Counter-based generator: `u1`, `c1`, `s1`, ...
///
/// Deterministic, so only fit for tests and local demos.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    users: AtomicU64,
    complaints: AtomicU64,
    secrets: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self, kind: RecordKind) -> String {
        let (prefix, counter) = match kind {
            RecordKind::User => ("u", &self.users),
            RecordKind::Complaint => ("c", &self.complaints),
        };
        format!("{prefix}{}", counter.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn next_secret(&self) -> String {
        format!("s{}", self.secrets.fetch_add(1, Ordering::Relaxed) + 1)
    }
}
