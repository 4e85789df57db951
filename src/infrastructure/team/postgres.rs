//! PostgreSQL team repository with connection pooling

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{QueryBuilder, Row};

use crate::domain::team::{SortDir, SortField, TeamOrder};
use crate::domain::{DomainError, NewTeam, Team, TeamPatch, TeamQuery, TeamRepository};

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/team_registry".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

const COLUMNS: &str = "id, name, city, logo_url, created_at, updated_at";

/// SQL-backed implementation of [`TeamRepository`].
///
/// The `(name, city)` uniqueness invariant is enforced by the table's unique
/// constraint; a violating insert or update surfaces as Postgres error 23505
/// and is translated to [`DomainError::Conflict`].
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a new pool from configuration
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(std::time::Duration::from_secs(config.idle_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {e}")))?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ensures the teams table exists
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS teams (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(120) NOT NULL,
                city VARCHAR(120),
                logo_url VARCHAR(255),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                UNIQUE (name, city)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create teams table: {e}")))?;

        Ok(())
    }

    fn from_row(row: &PgRow) -> Team {
        Team {
            id: row.get("id"),
            name: row.get("name"),
            city: row.get("city"),
            logo_url: row.get("logo_url"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    /// The `(name, city)` pair a conflicting partial update actually collides
    /// on: patched fields where supplied, stored values otherwise
    fn conflict_pair(current: Team, patch: &TeamPatch) -> (String, Option<String>) {
        (
            patch.name.clone().unwrap_or(current.name),
            patch.city.clone().or(current.city),
        )
    }

    fn map_write_error(e: sqlx::Error, name: &str, city: Option<&str>) -> DomainError {
        if let sqlx::Error::Database(db) = &e {
            // Postgres unique_violation
            if db.code().as_deref() == Some("23505") {
                return DomainError::conflict(format!(
                    "Team already exists for name '{}' and city '{}'",
                    name,
                    city.unwrap_or("")
                ));
            }
        }
        DomainError::storage(format!("Database error: {e}"))
    }

    fn push_filters(builder: &mut QueryBuilder<'_, sqlx::Postgres>, query: &TeamQuery) {
        let mut prefix = " WHERE ";

        if let Some(search) = &query.search {
            let pattern = format!("%{search}%");
            builder.push(prefix).push("(name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR city ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
            prefix = " AND ";
        }

        if let Some(city) = &query.city {
            builder.push(prefix).push("city ILIKE ");
            builder.push_bind(format!("%{city}%"));
        }
    }

    fn push_order(builder: &mut QueryBuilder<'_, sqlx::Postgres>, order: TeamOrder) {
        match order {
            TeamOrder::IdDesc => {
                builder.push(" ORDER BY id DESC");
            }
            TeamOrder::Field(field, dir) => {
                let column = match field {
                    SortField::Name => "name",
                    SortField::City => "city",
                };
                let direction = match dir {
                    SortDir::Asc => "ASC",
                    SortDir::Desc => "DESC",
                };
                builder.push(format!(" ORDER BY {column} {direction}"));
            }
        }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn get(&self, id: i64) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM teams WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get team: {e}")))?;

        Ok(row.as_ref().map(Self::from_row))
    }

    async fn insert(&self, team: NewTeam) -> Result<Team, DomainError> {
        let row = sqlx::query(&format!(
            "INSERT INTO teams (name, city, logo_url) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(&team.name)
        .bind(&team.city)
        .bind(&team.logo_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &team.name, team.city.as_deref()))?;

        Ok(Self::from_row(&row))
    }

    async fn update(&self, id: i64, patch: TeamPatch) -> Result<Team, DomainError> {
        let current = self
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{id}' not found")))?;
        let (merged_name, merged_city) = Self::conflict_pair(current, &patch);

        // COALESCE keeps stored values for fields the patch leaves absent
        let row = sqlx::query(&format!(
            r#"
            UPDATE teams
            SET name = COALESCE($2, name),
                city = COALESCE($3, city),
                logo_url = COALESCE($4, logo_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.city)
        .bind(&patch.logo_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &merged_name, merged_city.as_deref()))?;

        row.as_ref()
            .map(Self::from_row)
            .ok_or_else(|| DomainError::not_found(format!("Team '{id}' not found")))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete team: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError> {
        let mut builder = QueryBuilder::new(format!("SELECT {COLUMNS} FROM teams"));
        Self::push_filters(&mut builder, query);
        Self::push_order(&mut builder, query.order);

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(limit);
        }
        if let Some(offset) = query.offset {
            builder.push(" OFFSET ").push_bind(offset);
        }

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list teams: {e}")))?;

        Ok(rows.iter().map(Self::from_row).collect())
    }

    async fn count(&self, query: &TeamQuery) -> Result<u64, DomainError> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) AS total FROM teams");
        Self::push_filters(&mut builder, query);

        let row = builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count teams: {e}")))?;

        let total: i64 = row.get("total");
        Ok(total as u64)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Database ping failed: {e}")))?;

        Ok(())
    }
}
