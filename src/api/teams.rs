//! Team endpoints

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::extract::resolve_body;
use super::state::AppState;
use super::types::{ApiError, TeamDto};
use crate::domain::team::{
    resolve_sort_dir, resolve_sort_field, validate_new_team, validate_team_patch, TeamOrder,
};
use crate::infrastructure::team::{CreateTeamRequest, ListTeamsParams, UpdateTeamRequest};

/// Query parameters shared by both listing endpoints.
///
/// Every filter accepts an English and a Spanish spelling; `sortBy`/`sortDir`
/// take precedence over the combined `sort=field,dir` form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub page: Option<u32>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub q: Option<String>,
    pub city: Option<String>,
    pub ciudad: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortDir")]
    pub sort_dir: Option<String>,
    pub sort: Option<String>,
}

impl ListQuery {
    fn non_blank(value: Option<&String>) -> Option<String> {
        value
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn search(&self) -> Option<String> {
        Self::non_blank(self.search.as_ref()).or_else(|| Self::non_blank(self.q.as_ref()))
    }

    pub fn city_filter(&self) -> Option<String> {
        Self::non_blank(self.city.as_ref()).or_else(|| Self::non_blank(self.ciudad.as_ref()))
    }

    pub fn order(&self) -> TeamOrder {
        let combined = self
            .sort
            .as_deref()
            .map(|s| match s.split_once(',') {
                Some((field, dir)) => (field.trim().to_string(), Some(dir.trim().to_string())),
                None => (s.trim().to_string(), None),
            });

        let requested_field = self
            .sort_by
            .clone()
            .or_else(|| combined.as_ref().map(|(field, _)| field.clone()));
        let requested_dir = self
            .sort_dir
            .clone()
            .or_else(|| combined.and_then(|(_, dir)| dir));

        let requested_field = requested_field.map(|s| s.to_ascii_lowercase());
        match requested_field.as_deref().and_then(resolve_sort_field) {
            Some(field) => TeamOrder::Field(field, resolve_sort_dir(requested_dir.as_deref())),
            None => TeamOrder::IdDesc,
        }
    }
}

/// Paged listing envelope
#[derive(Debug, Serialize)]
pub struct PagedTeamsResponse {
    pub items: Vec<TeamDto>,
    #[serde(rename = "totalItems")]
    pub total_items: u64,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
}

/// GET /teams
pub async fn list_teams(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<TeamDto>>, ApiError> {
    let teams = state
        .team_service
        .list_all(query.search(), query.city_filter())
        .await?;

    Ok(Json(teams.iter().map(TeamDto::from).collect()))
}

/// GET /teams-paged
pub async fn list_teams_paged(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PagedTeamsResponse>, ApiError> {
    let page = state
        .team_service
        .list_paged(ListTeamsParams {
            search: query.search(),
            city: query.city_filter(),
            order: query.order(),
            page: query.page,
            page_size: query.page_size,
        })
        .await?;

    Ok(Json(PagedTeamsResponse {
        items: page.items.iter().map(TeamDto::from).collect(),
        total_items: page.total_items,
        page: page.page,
        page_size: page.page_size,
    }))
}

/// GET /teams/{id}
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TeamDto>, ApiError> {
    let team = state.team_service.get(id).await?;
    Ok(Json(TeamDto::from(&team)))
}

/// POST /teams
pub async fn create_team(
    State(state): State<AppState>,
    req: Request,
) -> Result<(StatusCode, Json<TeamDto>), ApiError> {
    let body = resolve_body(req).await?;

    // Reject invalid fields before the resolver stores any blob
    validate_new_team(body.name(), body.city())?;
    let logo_url = state.logo_resolver.resolve(&body).await?;

    debug!(name = ?body.name(), city = ?body.city(), "Creating team");

    let team = state
        .team_service
        .create(CreateTeamRequest {
            name: body.name().map(String::from),
            city: body.city().map(String::from),
            logo_url,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TeamDto::from(&team))))
}

/// PUT /teams/{id}
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    req: Request,
) -> Result<Json<TeamDto>, ApiError> {
    let body = resolve_body(req).await?;

    // Confirm the record exists and the fields are valid before the
    // resolver stores any blob
    state.team_service.get(id).await?;
    validate_team_patch(body.name(), body.city())?;

    // Only a resolved logo overwrites the stored one
    let logo_url = state.logo_resolver.resolve(&body).await?;

    debug!(id = %id, "Updating team");

    let team = state
        .team_service
        .update(
            id,
            UpdateTeamRequest {
                name: body.name().map(String::from),
                city: body.city().map(String::from),
                logo_url,
            },
        )
        .await?;

    Ok(Json(TeamDto::from(&team)))
}

/// DELETE /teams/{id}
pub async fn delete_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.team_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Router-level tests against the in-memory backend live here so the whole
// normalize/resolve/persist/map pipeline is exercised end to end.
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, Request as HttpRequest, StatusCode};
    use axum::Router;
    use base64::Engine;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::api::router::create_router_with_state;
    use crate::infrastructure::blob::InMemoryBlobStore;
    use crate::infrastructure::logo::LogoResolver;
    use crate::infrastructure::team::{InMemoryTeamRepository, TeamService};

    fn app_with_blobs() -> (Router, Arc<InMemoryBlobStore>) {
        let repository = Arc::new(InMemoryTeamRepository::new());
        let team_service = Arc::new(TeamService::new(repository));
        let blobs = Arc::new(InMemoryBlobStore::new());
        let logo_resolver = LogoResolver::new(blobs.clone());
        let router = create_router_with_state(AppState::new(team_service, logo_resolver));
        (router, blobs)
    }

    fn app() -> Router {
        app_with_blobs().0
    }

    async fn send(app: &Router, request: HttpRequest<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn post_json(uri: &str, body: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_then_show() {
        let app = app();

        let (status, created) =
            send(&app, post_json("/teams", r#"{"name":"Lions","city":"Metro"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "Lions");
        assert_eq!(created["nombre"], "Lions");
        assert!(created.get("logoUrl").is_none());

        let id = created["id"].as_i64().unwrap();
        let (status, shown) = send(&app, get(&format!("/teams/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(shown["city"], "Metro");
        assert_eq!(shown["ciudad"], "Metro");
    }

    #[tokio::test]
    async fn test_duplicate_create_conflicts() {
        let app = app();
        let body = r#"{"name":"Lions","city":"Metro"}"#;

        let (first, _) = send(&app, post_json("/teams", body)).await;
        let (second, error) = send(&app, post_json("/teams", body)).await;

        assert_eq!(first, StatusCode::CREATED);
        assert_eq!(second, StatusCode::CONFLICT);
        let message = error["message"].as_str().unwrap();
        assert!(message.contains("Lions") && message.contains("Metro"));
    }

    #[tokio::test]
    async fn test_create_without_name_unprocessable() {
        let app = app();
        let (status, error) = send(&app, post_json("/teams", r#"{"city":"Metro"}"#)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error["field"], "name");
    }

    #[tokio::test]
    async fn test_create_accepts_spanish_aliases() {
        let app = app();
        let (status, created) =
            send(&app, post_json("/teams", r#"{"nombre":"Leones","ciudad":"Metro"}"#)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "Leones");
        assert_eq!(created["city"], "Metro");
    }

    #[tokio::test]
    async fn test_create_urlencoded() {
        let app = app();
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/teams")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=Lions&city=Metro"))
            .unwrap();

        let (status, created) = send(&app, request).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "Lions");
    }

    #[tokio::test]
    async fn test_create_multipart_with_logo_file() {
        let app = app();
        let boundary = "xyz-boundary";
        let payload = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"nombre\"\r\n\r\n\
             Lions\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"imagen\"; filename=\"crest.png\"\r\n\
             Content-Type: image/png\r\n\r\n\
             png-bytes\r\n\
             --{boundary}--\r\n"
        );
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/teams")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(payload))
            .unwrap();

        let (status, created) = send(&app, request).await;
        assert_eq!(status, StatusCode::CREATED);

        let logo_url = created["logoUrl"].as_str().unwrap();
        assert!(logo_url.starts_with("/storage/logos/"));
        assert!(logo_url.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_create_with_data_uri_logo() {
        let app = app();
        let payload = base64::engine::general_purpose::STANDARD.encode(b"jpeg-bytes");
        let body = format!(r#"{{"name":"Lions","logo":"data:image/jpeg;base64,{payload}"}}"#);

        let (status, created) = send(&app, post_json("/teams", &body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(created["logoUrl"].as_str().unwrap().ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_invalid_data_uri_logo_is_ignored() {
        let app = app();
        let body = r#"{"name":"Lions","logo":"data:image/png;base64,@@broken@@"}"#;

        let (status, created) = send(&app, post_json("/teams", body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(created.get("logoUrl").is_none());
    }

    #[tokio::test]
    async fn test_invalid_create_stores_no_blob() {
        let (app, blobs) = app_with_blobs();
        let payload = base64::engine::general_purpose::STANDARD.encode(b"png");
        let body = format!(r#"{{"city":"Metro","logo":"data:image/png;base64,{payload}"}}"#);

        let (status, _) = send(&app, post_json("/teams", &body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(blobs.is_empty());
    }

    #[tokio::test]
    async fn test_update_of_missing_team_stores_no_blob() {
        let (app, blobs) = app_with_blobs();
        let payload = base64::engine::general_purpose::STANDARD.encode(b"png");
        let request = HttpRequest::builder()
            .method("PUT")
            .uri("/teams/123")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(format!(
                r#"{{"name":"Ghost","logo":"data:image/png;base64,{payload}"}}"#
            )))
            .unwrap();

        let (status, _) = send(&app, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(blobs.is_empty());
    }

    #[tokio::test]
    async fn test_show_missing_404() {
        let app = app();
        let (status, error) = send(&app, get("/teams/999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(error["message"].as_str().unwrap().contains("999"));
    }

    #[tokio::test]
    async fn test_paged_listing_second_page() {
        let app = app();
        for name in ["A", "B", "C"] {
            let (status, _) =
                send(&app, post_json("/teams", &format!(r#"{{"name":"{name}"}}"#))).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, page) = send(&app, get("/teams-paged?page=2&pageSize=1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["totalItems"], 3);
        assert_eq!(page["page"], 2);
        assert_eq!(page["pageSize"], 1);

        let items = page["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        // id desc puts the middle record on page 2
        assert_eq!(items[0]["name"], "B");
    }

    #[tokio::test]
    async fn test_paged_sort_by_spanish_alias() {
        let app = app();
        for name in ["Gamma", "Alpha", "Beta"] {
            send(&app, post_json("/teams", &format!(r#"{{"name":"{name}"}}"#))).await;
        }

        let (_, page) = send(&app, get("/teams-paged?sortBy=nombre&sortDir=asc")).await;
        let names: Vec<&str> = page["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[tokio::test]
    async fn test_paged_combined_sort_param() {
        let app = app();
        for name in ["Alpha", "Beta"] {
            send(&app, post_json("/teams", &format!(r#"{{"name":"{name}"}}"#))).await;
        }

        let (_, page) = send(&app, get("/teams-paged?sort=name,desc")).await;
        let names: Vec<&str> = page["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Beta", "Alpha"]);
    }

    #[tokio::test]
    async fn test_unpaged_matches_paged_total() {
        let app = app();
        for i in 0..4 {
            send(
                &app,
                post_json("/teams", &format!(r#"{{"name":"Team {i}","city":"Metro"}}"#)),
            )
            .await;
        }
        send(&app, post_json("/teams", r#"{"name":"Elsewhere","city":"Harbor"}"#)).await;

        let (_, all) = send(&app, get("/teams?city=metro")).await;
        let (_, page) = send(&app, get("/teams-paged?ciudad=metro&pageSize=2")).await;

        assert_eq!(all.as_array().unwrap().len() as u64, page["totalItems"].as_u64().unwrap());
    }

    #[tokio::test]
    async fn test_partial_update_keeps_name_and_logo() {
        let app = app();
        let payload = base64::engine::general_purpose::STANDARD.encode(b"png");
        let body = format!(r#"{{"name":"Lions","city":"Metro","logo":"data:image/png;base64,{payload}"}}"#);
        let (_, created) = send(&app, post_json("/teams", &body)).await;
        let id = created["id"].as_i64().unwrap();
        let original_logo = created["logoUrl"].as_str().unwrap().to_string();

        let request = HttpRequest::builder()
            .method("PUT")
            .uri(format!("/teams/{id}"))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"city":"Harbor"}"#.to_string()))
            .unwrap();
        let (status, updated) = send(&app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Lions");
        assert_eq!(updated["city"], "Harbor");
        assert_eq!(updated["logoUrl"], original_logo.as_str());
    }

    #[tokio::test]
    async fn test_update_missing_404() {
        let app = app();
        let request = HttpRequest::builder()
            .method("PUT")
            .uri("/teams/77")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Ghost"}"#.to_string()))
            .unwrap();

        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_into_duplicate_conflicts() {
        let app = app();
        send(&app, post_json("/teams", r#"{"name":"Lions","city":"Metro"}"#)).await;
        let (_, other) =
            send(&app, post_json("/teams", r#"{"name":"Tigers","city":"Metro"}"#)).await;
        let id = other["id"].as_i64().unwrap();

        let request = HttpRequest::builder()
            .method("PUT")
            .uri(format!("/teams/{id}"))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Lions"}"#.to_string()))
            .unwrap();

        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_delete_then_404() {
        let app = app();
        let (_, created) = send(&app, post_json("/teams", r#"{"name":"Lions"}"#)).await;
        let id = created["id"].as_i64().unwrap();

        let request = HttpRequest::builder()
            .method("DELETE")
            .uri(format!("/teams/{id}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, serde_json::Value::Null);

        let request = HttpRequest::builder()
            .method("DELETE")
            .uri(format!("/teams/{id}"))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        assert_eq!(body["db"], "ok");
    }
}
