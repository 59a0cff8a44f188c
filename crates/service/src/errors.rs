use thiserror::Error;

use crate::ids::RecordKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(String),
    /// The generator handed out a secret that is already bound to a user.
    #[error("generated secret collides with an existing user")]
    DuplicateSecret,
    #[error("generated {kind} id collides with an existing record: {id}")]
    DuplicateId { kind: RecordKind, id: String },
    #[error("store lock poisoned")]
    Poisoned,
}

impl ServiceError {
    pub fn user_not_found() -> Self { Self::NotFound("user".into()) }

    pub fn complaint_not_found() -> Self { Self::NotFound("complaint".into()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 1003,
            ServiceError::DuplicateSecret => 1201,
            ServiceError::DuplicateId { .. } => 1202,
            ServiceError::Poisoned => 1300,
        }
    }

    /// Caller-facing miss, as opposed to an internal invariant failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }
}
