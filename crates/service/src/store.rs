//! Concurrent in-memory store for users and complaints.
//!
//! The global complaint table is the only place complaint state lives. Each
//! user row keeps the ordered ids of the complaints it filed, and the
//! `complaints` list a caller sees on a [`User`] is rebuilt from the global
//! table on every read, so a resolution is visible through both paths as
//! soon as `resolve_complaint` returns.
//!
//! All tables sit behind one `RwLock`. Reads share it, writes hold it
//! exclusively, and nothing awaits while holding it.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use models::{Complaint, ComplaintInput, RegisterInput, User};
use tracing::{debug, info, instrument, warn};

use crate::errors::ServiceError;
use crate::ids::{IdGenerator, RandomIdGenerator, RecordKind, SequentialIdGenerator};

/// A registered user without the complaint payloads.
#[derive(Debug, Clone)]
struct UserRow {
    id: String,
    secret_code: String,
    name: String,
    email: String,
    /// Submission order; values are keys of `Tables::complaints`.
    complaint_ids: Vec<String>,
}

#[derive(Debug, Default)]
struct Tables {
    /// Keyed by secret code.
    users: HashMap<String, UserRow>,
    user_ids: HashSet<String>,
    /// Authoritative complaint records. Ordered so listings are stable.
    complaints: BTreeMap<String, Complaint>,
}

impl Tables {
    fn user(&self, secret_code: &str) -> Result<&UserRow, ServiceError> {
        self.users.get(secret_code).ok_or_else(ServiceError::user_not_found)
    }

    /// Materialize a user's complaints from the global table.
    fn project(&self, row: &UserRow) -> Vec<Complaint> {
        row.complaint_ids
            .iter()
            .filter_map(|id| self.complaints.get(id).cloned())
            .collect()
    }

    fn to_user(&self, row: &UserRow) -> User {
        User {
            id: row.id.clone(),
            secret_code: row.secret_code.clone(),
            name: row.name.clone(),
            email: row.email.clone(),
            complaints: self.project(row),
        }
    }
}

/// Counters for health checks and metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub users: usize,
    pub complaints: usize,
    pub resolved: usize,
}

impl StoreStats {
    pub fn open(&self) -> usize {
        self.complaints - self.resolved
    }
}

/// Thread-safe custodian of all users and complaints.
///
/// Construct one per process and share it behind an `Arc`.
///
/// # Examples
/// ```
/// use models::{ComplaintInput, RegisterInput};
/// use service::store::Store;
///
/// let store = Store::sequential();
/// let user = store.register(RegisterInput { name: "Ann".into(), email: "a@x.com".into() }).unwrap();
/// let c = store
///     .submit_complaint(&user.secret_code, ComplaintInput { title: "Late".into(), summary: "3 days".into(), severity: 2 })
///     .unwrap();
/// store.resolve_complaint(&c.id).unwrap();
/// assert!(store.list_complaints_for_user(&user.secret_code).unwrap()[0].resolved);
/// ```
pub struct Store {
    tables: RwLock<Tables>,
    ids: Arc<dyn IdGenerator>,
}

impl Store {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { tables: RwLock::new(Tables::default()), ids }
    }

    pub fn with_generator<G: IdGenerator + 'static>(ids: G) -> Self {
        Self::new(Arc::new(ids))
    }

    /// Store with `u1` / `c1` / `s1` style identifiers.
    pub fn sequential() -> Self {
        Self::with_generator(SequentialIdGenerator::new())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, ServiceError> {
        self.tables.read().map_err(|_| ServiceError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, ServiceError> {
        self.tables.write().map_err(|_| ServiceError::Poisoned)
    }

    /// Create a user with a fresh id and secret and an empty complaint list.
    #[instrument(skip_all, fields(name = %input.name))]
    pub fn register(&self, input: RegisterInput) -> Result<User, ServiceError> {
        let id = self.ids.next_id(RecordKind::User);
        let secret_code = self.ids.next_secret();

        let mut tables = self.write()?;
        if tables.users.contains_key(&secret_code) {
            warn!(user_id = %id, "generator returned a secret already in use");
            return Err(ServiceError::DuplicateSecret);
        }
        if tables.user_ids.contains(&id) {
            warn!(user_id = %id, "generator returned a user id already in use");
            return Err(ServiceError::DuplicateId { kind: RecordKind::User, id });
        }

        let row = UserRow {
            id: id.clone(),
            secret_code: secret_code.clone(),
            name: input.name,
            email: input.email,
            complaint_ids: Vec::new(),
        };
        let user = tables.to_user(&row);
        tables.user_ids.insert(id);
        tables.users.insert(secret_code, row);
        drop(tables);

        info!(user_id = %user.id, "user_registered");
        Ok(user)
    }

    /// Look a user up by secret. Read-only.
    #[instrument(skip_all)]
    pub fn authenticate(&self, secret_code: &str) -> Result<User, ServiceError> {
        let tables = self.read()?;
        let row = tables.user(secret_code)?;
        debug!(user_id = %row.id, "user_authenticated");
        Ok(tables.to_user(row))
    }

    /// File a new `Open` complaint on behalf of the user owning `secret_code`.
    #[instrument(skip_all, fields(severity = input.severity))]
    pub fn submit_complaint(&self, secret_code: &str, input: ComplaintInput) -> Result<Complaint, ServiceError> {
        let id = self.ids.next_id(RecordKind::Complaint);

        let mut tables = self.write()?;
        let Tables { users, complaints, .. } = &mut *tables;
        // both checks happen before either table is touched
        let row = users.get_mut(secret_code).ok_or_else(ServiceError::user_not_found)?;
        if complaints.contains_key(&id) {
            warn!(complaint_id = %id, "generator returned a complaint id already in use");
            return Err(ServiceError::DuplicateId { kind: RecordKind::Complaint, id });
        }

        let complaint = Complaint::open(id.clone(), input);
        complaints.insert(id.clone(), complaint.clone());
        row.complaint_ids.push(id);
        let user_id = row.id.clone();
        drop(tables);

        info!(complaint_id = %complaint.id, %user_id, "complaint_submitted");
        Ok(complaint)
    }

    /// Current state of every complaint the user filed, in submission order.
    #[instrument(skip_all)]
    pub fn list_complaints_for_user(&self, secret_code: &str) -> Result<Vec<Complaint>, ServiceError> {
        let tables = self.read()?;
        let row = tables.user(secret_code)?;
        Ok(tables.project(row))
    }

    /// Every complaint, ordered by id.
    pub fn list_all_complaints(&self) -> Result<Vec<Complaint>, ServiceError> {
        let tables = self.read()?;
        Ok(tables.complaints.values().cloned().collect())
    }

    pub fn view_complaint(&self, complaint_id: &str) -> Result<Complaint, ServiceError> {
        let tables = self.read()?;
        tables
            .complaints
            .get(complaint_id)
            .cloned()
            .ok_or_else(ServiceError::complaint_not_found)
    }

    /// Mark a complaint resolved and return it. Resolving twice is not an
    /// error; the second call returns the same record unchanged.
    #[instrument(skip(self))]
    pub fn resolve_complaint(&self, complaint_id: &str) -> Result<Complaint, ServiceError> {
        let mut tables = self.write()?;
        let complaint = tables
            .complaints
            .get_mut(complaint_id)
            .ok_or_else(ServiceError::complaint_not_found)?;
        let changed = complaint.resolve();
        let resolved = complaint.clone();
        drop(tables);

        if changed {
            info!(complaint_id = %resolved.id, "complaint_resolved");
        } else {
            debug!(complaint_id = %resolved.id, "complaint already resolved");
        }
        Ok(resolved)
    }

    pub fn stats(&self) -> Result<StoreStats, ServiceError> {
        let tables = self.read()?;
        Ok(StoreStats {
            users: tables.users.len(),
            complaints: tables.complaints.len(),
            resolved: tables.complaints.values().filter(|c| c.resolved).count(),
        })
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::with_generator(RandomIdGenerator)
    }
}
