use serde::{Deserialize, Serialize};

/// A complaint as stored in the global table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub severity: i32,
    pub resolved: bool,
}

/// Lifecycle of a complaint. `Resolved` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Open,
    Resolved,
}

impl Complaint {
    /// New complaints always start `Open`.
    pub fn open(id: String, input: ComplaintInput) -> Self {
        Self {
            id,
            title: input.title,
            summary: input.summary,
            severity: input.severity,
            resolved: false,
        }
    }

    pub fn status(&self) -> ComplaintStatus {
        if self.resolved { ComplaintStatus::Resolved } else { ComplaintStatus::Open }
    }

    /// `Open -> Resolved`. Returns whether the state actually changed.
    pub fn resolve(&mut self) -> bool {
        let changed = !self.resolved;
        self.resolved = true;
        changed
    }
}

/// Submission payload; missing fields decode to empty / zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplaintInput {
    pub title: String,
    pub summary: String,
    pub severity: i32,
}
