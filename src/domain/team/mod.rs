//! Team domain module
//!
//! The team record is the sole entity of this service. Requests reach it
//! through the alias-aware input normalizer in [`crate::domain::input`].

mod entity;
mod query;
mod repository;
mod validation;

pub use entity::{is_public_logo_url, NewTeam, Team, TeamPatch, PUBLIC_LOGO_PREFIXES};
pub use query::{
    resolve_sort_dir, resolve_sort_field, SortDir, SortField, TeamOrder, TeamQuery,
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};
pub use repository::TeamRepository;
pub use validation::{
    validate_city, validate_name, validate_new_team, validate_team_patch, TeamValidationError,
    MAX_CITY_LENGTH, MAX_NAME_LENGTH,
};
