//! Team service orchestrating validation and the record store

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::team::{
    validate_new_team, validate_team_patch, TeamOrder, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};
use crate::domain::{DomainError, NewTeam, Team, TeamPatch, TeamQuery, TeamRepository};

/// Canonical create input, produced by the request normalizer
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub logo_url: Option<String>,
}

/// Canonical update input; absent fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub logo_url: Option<String>,
}

/// Filter and paging parameters for the paged listing
#[derive(Debug, Clone, Default)]
pub struct ListTeamsParams {
    pub search: Option<String>,
    pub city: Option<String>,
    pub order: TeamOrder,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// One page of teams plus the pre-pagination match count
#[derive(Debug, Clone)]
pub struct TeamPage {
    pub items: Vec<Team>,
    pub total_items: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Stateless orchestrator over the record store; every operation reads or
/// writes through the repository, nothing is cached across requests
#[derive(Debug)]
pub struct TeamService<R: TeamRepository> {
    repository: Arc<R>,
}

impl<R: TeamRepository> TeamService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Paged listing; `total_items` counts all matches before the window
    pub async fn list_paged(&self, params: ListTeamsParams) -> Result<TeamPage, DomainError> {
        let page = params.page.unwrap_or(DEFAULT_PAGE).max(1);
        let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

        let mut query = TeamQuery {
            search: params.search,
            city: params.city,
            order: params.order,
            ..Default::default()
        };

        let total_items = self.repository.count(&query).await?;

        query = query.with_page(page, page_size);
        let items = self.repository.list(&query).await?;

        Ok(TeamPage {
            items,
            total_items,
            page,
            page_size,
        })
    }

    /// Unpaged listing, fixed id-descending order
    pub async fn list_all(
        &self,
        search: Option<String>,
        city: Option<String>,
    ) -> Result<Vec<Team>, DomainError> {
        let query = TeamQuery {
            search,
            city,
            order: TeamOrder::IdDesc,
            ..Default::default()
        };

        self.repository.list(&query).await
    }

    pub async fn get(&self, id: i64) -> Result<Team, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{id}' not found")))
    }

    pub async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        validate_new_team(request.name.as_deref(), request.city.as_deref())?;

        let name = request
            .name
            .ok_or_else(|| DomainError::validation_field("name", "name is required"))?;

        info!(name = %name, city = ?request.city, "Creating team");

        self.repository
            .insert(NewTeam {
                name,
                city: request.city,
                logo_url: request.logo_url,
            })
            .await
    }

    /// Partial update; only supplied fields are validated and applied
    pub async fn update(&self, id: i64, request: UpdateTeamRequest) -> Result<Team, DomainError> {
        // Fail with NotFound before touching any field
        self.get(id).await?;

        validate_team_patch(request.name.as_deref(), request.city.as_deref())?;

        info!(id = %id, "Updating team");

        self.repository
            .update(
                id,
                TeamPatch {
                    name: request.name,
                    city: request.city,
                    logo_url: request.logo_url,
                },
            )
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        info!(id = %id, "Deleting team");

        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found(format!("Team '{id}' not found")));
        }

        Ok(())
    }

    /// Round-trips the record store; returns the failure as a message so the
    /// health endpoint can report it without failing the request
    pub async fn ping_store(&self) -> Result<(), String> {
        match self.repository.ping().await {
            Ok(()) => Ok(()),
            Err(e) => {
                debug!("Record store ping failed: {e}");
                Err(e.to_string())
            }
        }
    }
}
