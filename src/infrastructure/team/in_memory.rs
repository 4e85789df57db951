//! In-memory team repository

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::team::{SortDir, SortField, TeamOrder};
use crate::domain::{DomainError, NewTeam, Team, TeamPatch, TeamQuery, TeamRepository};

/// Map-backed repository used by the memory storage backend and in tests.
///
/// Mirrors the Postgres behavior, including the `(name, city)` uniqueness
/// constraint; unlike SQL NULL semantics, two absent cities compare equal.
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    teams: RwLock<BTreeMap<i64, Team>>,
    next_id: AtomicI64,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self {
            teams: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn pair_conflict(
        teams: &BTreeMap<i64, Team>,
        name: &str,
        city: Option<&str>,
        exclude_id: Option<i64>,
    ) -> bool {
        teams.values().any(|team| {
            Some(team.id) != exclude_id && team.name == name && team.city.as_deref() == city
        })
    }

    fn conflict_error(name: &str, city: Option<&str>) -> DomainError {
        DomainError::conflict(format!(
            "Team already exists for name '{}' and city '{}'",
            name,
            city.unwrap_or("")
        ))
    }

    fn matches(team: &Team, query: &TeamQuery) -> bool {
        if let Some(search) = &query.search {
            let needle = search.to_lowercase();
            let name_hit = team.name.to_lowercase().contains(&needle);
            let city_hit = team
                .city
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle));
            if !name_hit && !city_hit {
                return false;
            }
        }

        if let Some(city) = &query.city {
            let needle = city.to_lowercase();
            if !team
                .city
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        true
    }

    fn sort(teams: &mut [Team], order: TeamOrder) {
        match order {
            TeamOrder::IdDesc => teams.sort_by(|a, b| b.id.cmp(&a.id)),
            TeamOrder::Field(field, dir) => {
                teams.sort_by(|a, b| {
                    let ordering = match field {
                        SortField::Name => a.name.cmp(&b.name),
                        SortField::City => a.city.cmp(&b.city),
                    };
                    match dir {
                        SortDir::Asc => ordering,
                        SortDir::Desc => ordering.reverse(),
                    }
                });
            }
        }
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn get(&self, id: i64) -> Result<Option<Team>, DomainError> {
        Ok(self.teams.read().unwrap().get(&id).cloned())
    }

    async fn insert(&self, team: NewTeam) -> Result<Team, DomainError> {
        let mut teams = self.teams.write().unwrap();

        if Self::pair_conflict(&teams, &team.name, team.city.as_deref(), None) {
            return Err(Self::conflict_error(&team.name, team.city.as_deref()));
        }

        let now = Utc::now();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let team = Team {
            id,
            name: team.name,
            city: team.city,
            logo_url: team.logo_url,
            created_at: now,
            updated_at: now,
        };

        teams.insert(id, team.clone());
        Ok(team)
    }

    async fn update(&self, id: i64, patch: TeamPatch) -> Result<Team, DomainError> {
        let mut teams = self.teams.write().unwrap();

        let current = teams
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("Team '{id}' not found")))?
            .clone();

        let name = patch.name.unwrap_or(current.name);
        let city = patch.city.or(current.city);
        let logo_url = patch.logo_url.or(current.logo_url);

        if Self::pair_conflict(&teams, &name, city.as_deref(), Some(id)) {
            return Err(Self::conflict_error(&name, city.as_deref()));
        }

        let team = Team {
            id,
            name,
            city,
            logo_url,
            created_at: current.created_at,
            updated_at: Utc::now(),
        };

        teams.insert(id, team.clone());
        Ok(team)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.teams.write().unwrap().remove(&id).is_some())
    }

    async fn list(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError> {
        let teams = self.teams.read().unwrap();
        let mut result: Vec<Team> = teams
            .values()
            .filter(|team| Self::matches(team, query))
            .cloned()
            .collect();

        Self::sort(&mut result, query.order);

        let offset = usize::try_from(query.offset.unwrap_or(0)).unwrap_or(0);
        let mut result: Vec<Team> = result.into_iter().skip(offset).collect();

        if let Some(limit) = query.limit {
            result.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }

        Ok(result)
    }

    async fn count(&self, query: &TeamQuery) -> Result<u64, DomainError> {
        let teams = self.teams.read().unwrap();
        Ok(teams
            .values()
            .filter(|team| Self::matches(team, query))
            .count() as u64)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
