use serde::{Deserialize, Serialize};

use crate::complaint::Complaint;

/// A registered user together with the current state of every complaint
/// they filed, in submission order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub secret_code: String,
    pub name: String,
    pub email: String,
    pub complaints: Vec<Complaint>,
}

/// Registration payload. Any `id` / `secret_code` a client sends is ignored;
/// both are always assigned by the store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
}
