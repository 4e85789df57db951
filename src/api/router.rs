use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::teams;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route("/teams-paged", get(teams::list_teams_paged))
        .route(
            "/teams/{id}",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
