//! Read contract the analytics service gathers its inputs through.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::{self, DatabaseError};
use crate::models::{FamilyMember, GenomicSummary, HealthSample, UserProfile};

/// Source of per-user analytics inputs.
///
/// Implementations are called from the blocking pool, possibly from several
/// threads at once.
pub trait HealthDataSource: Send + Sync {
    /// Demographics and lifestyle; `None` for an unknown user.
    fn user_profile(&self, user_id: &Uuid) -> Result<Option<UserProfile>, DatabaseError>;

    /// Genomic percentiles; `None` when the user was never genotyped.
    fn genomic_summary(&self, user_id: &Uuid) -> Result<Option<GenomicSummary>, DatabaseError>;

    /// Recorded relatives; empty when none.
    fn family_history(&self, user_id: &Uuid) -> Result<Vec<FamilyMember>, DatabaseError>;

    /// Samples ordered by date ascending, optionally within an inclusive range.
    fn health_samples(
        &self,
        user_id: &Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<HealthSample>, DatabaseError>;
}

// ═══════════════════════════════════════════════════════════
// SQLite implementation
// ═══════════════════════════════════════════════════════════

/// `HealthDataSource` over a single SQLite connection.
pub struct SqliteHealthSource {
    conn: Mutex<Connection>,
}

impl SqliteHealthSource {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Open (and migrate) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        Ok(Self::new(db::open_database(path)?))
    }

    /// Migrated in-memory database.
    pub fn in_memory() -> Result<Self, DatabaseError> {
        Ok(Self::new(db::open_memory_database()?))
    }

    /// Exclusive access to the connection, e.g. for writes.
    pub fn connection(&self) -> Result<MutexGuard<'_, Connection>, DatabaseError> {
        self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)
    }
}

impl HealthDataSource for SqliteHealthSource {
    fn user_profile(&self, user_id: &Uuid) -> Result<Option<UserProfile>, DatabaseError> {
        db::get_user_profile(&*self.connection()?, user_id)
    }

    fn genomic_summary(&self, user_id: &Uuid) -> Result<Option<GenomicSummary>, DatabaseError> {
        db::get_genomic_summary(&*self.connection()?, user_id)
    }

    fn family_history(&self, user_id: &Uuid) -> Result<Vec<FamilyMember>, DatabaseError> {
        db::get_family_history(&*self.connection()?, user_id)
    }

    fn health_samples(
        &self,
        user_id: &Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<HealthSample>, DatabaseError> {
        db::get_health_samples(&*self.connection()?, user_id, range)
    }
}
