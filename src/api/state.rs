//! Application state for shared services

use std::sync::Arc;

use crate::domain::{DomainError, Team, TeamRepository};
use crate::infrastructure::logo::LogoResolver;
use crate::infrastructure::team::{
    CreateTeamRequest, ListTeamsParams, TeamPage, TeamService, UpdateTeamRequest,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub team_service: Arc<dyn TeamServiceTrait>,
    pub logo_resolver: LogoResolver,
}

impl AppState {
    pub fn new(team_service: Arc<dyn TeamServiceTrait>, logo_resolver: LogoResolver) -> Self {
        Self {
            team_service,
            logo_resolver,
        }
    }
}

/// Trait for team service operations
#[async_trait::async_trait]
pub trait TeamServiceTrait: Send + Sync {
    async fn list_paged(&self, params: ListTeamsParams) -> Result<TeamPage, DomainError>;
    async fn list_all(
        &self,
        search: Option<String>,
        city: Option<String>,
    ) -> Result<Vec<Team>, DomainError>;
    async fn get(&self, id: i64) -> Result<Team, DomainError>;
    async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError>;
    async fn update(&self, id: i64, request: UpdateTeamRequest) -> Result<Team, DomainError>;
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
    async fn ping_store(&self) -> Result<(), String>;
}

#[async_trait::async_trait]
impl<R: TeamRepository + 'static> TeamServiceTrait for TeamService<R> {
    async fn list_paged(&self, params: ListTeamsParams) -> Result<TeamPage, DomainError> {
        TeamService::list_paged(self, params).await
    }

    async fn list_all(
        &self,
        search: Option<String>,
        city: Option<String>,
    ) -> Result<Vec<Team>, DomainError> {
        TeamService::list_all(self, search, city).await
    }

    async fn get(&self, id: i64) -> Result<Team, DomainError> {
        TeamService::get(self, id).await
    }

    async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        TeamService::create(self, request).await
    }

    async fn update(&self, id: i64, request: UpdateTeamRequest) -> Result<Team, DomainError> {
        TeamService::update(self, id, request).await
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        TeamService::delete(self, id).await
    }

    async fn ping_store(&self) -> Result<(), String> {
        TeamService::ping_store(self).await
    }
}
