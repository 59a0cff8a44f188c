//! Record types shared by the store and the HTTP layer.
//!
//! Everything here is a plain value: the store hands out copies, never
//! references into its tables.

pub mod complaint;
pub mod user;

pub use complaint::{Complaint, ComplaintInput, ComplaintStatus};
pub use user::{RegisterInput, User};
