//! Team repositories and service

mod in_memory;
mod postgres;
mod service;

pub use in_memory::InMemoryTeamRepository;
pub use postgres::{PostgresConfig, PostgresTeamRepository};
pub use service::{
    CreateTeamRequest, ListTeamsParams, TeamPage, TeamService, UpdateTeamRequest,
};
