//! Team repository trait

use async_trait::async_trait;

use super::entity::{NewTeam, Team, TeamPatch};
use super::query::TeamQuery;
use crate::domain::DomainError;

/// Persistent store for team records.
///
/// Implementations own the rows exclusively; the service layer re-reads or
/// writes through this trait on every request and never caches across requests.
/// The `(name, city)` pair is unique; `insert` and `update` signal a collision
/// with [`DomainError::Conflict`] and must not leave a partial write behind.
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// Get a team by id
    async fn get(&self, id: i64) -> Result<Option<Team>, DomainError>;

    /// Insert a new team, assigning id and timestamps
    async fn insert(&self, team: NewTeam) -> Result<Team, DomainError>;

    /// Apply a partial update to an existing team
    async fn update(&self, id: i64, patch: TeamPatch) -> Result<Team, DomainError>;

    /// Delete a team by id; returns false when no row matched
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    /// List teams matching the query, ordered and windowed by it
    async fn list(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError>;

    /// Count teams matching the query's filters, ignoring its page window
    async fn count(&self, query: &TeamQuery) -> Result<u64, DomainError>;

    /// Trivial round-trip used by the health check
    async fn ping(&self) -> Result<(), DomainError>;
}
