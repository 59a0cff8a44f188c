//! Complaint-tracking core.
//! - `store`: the concurrent user/complaint tables and every operation on them.
//! - `ids`: pluggable id and secret generation.
//! - `errors`: the error taxonomy callers map to responses.

pub mod errors;
pub mod ids;
pub mod store;

pub use errors::ServiceError;
pub use ids::{IdGenerator, RandomIdGenerator, RecordKind, SequentialIdGenerator};
pub use store::{Store, StoreStats};
