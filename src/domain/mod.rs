//! Domain layer: entities, traits, and input normalization types

pub mod blob;
pub mod error;
pub mod input;
pub mod team;

pub use blob::BlobStore;
pub use error::DomainError;
pub use team::{NewTeam, Team, TeamPatch, TeamQuery, TeamRepository};
