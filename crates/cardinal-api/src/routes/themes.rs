//! Theme routes — list, save, clone, and delete themes.
//!
//! GET    /themes            — List own themes (?public=true for the marketplace)
//! GET    /themes/active     — Fetch the caller's active theme
//! POST   /themes            — Create or re-save a theme
//! PUT    /themes            — Clone (import) a theme under a new name
//! DELETE /themes/{id}       — Delete an owned theme

use axum::{
    extract::{Extension, Path, Query, State},
    middleware,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use cardinal_common::error::{CardinalError, CardinalResult};
use cardinal_common::models::{CloneThemeRequest, CreateThemeRequest, Theme};
use cardinal_common::validation::validate_request;
use cardinal_db::repository::themes;

use crate::{middleware::AuthContext, service, AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/themes",
            get(list_themes).post(create_theme).put(clone_theme),
        )
        .route("/themes/active", get(active_theme))
        .route("/themes/{theme_id}", axum::routing::delete(delete_theme))
        .route_layer(middleware::from_fn(crate::middleware::auth_middleware))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    /// `?public=true` selects the marketplace instead of the caller's themes.
    #[serde(default)]
    public: bool,
}

// ============================================================
// GET /themes
// ============================================================

async fn list_themes(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> CardinalResult<Json<Vec<Theme>>> {
    let list = if query.public {
        themes::list_public(&state.db.pool).await?
    } else {
        themes::list_for_owner(&state.db.pool, auth.user_id).await?
    };
    Ok(Json(list))
}

// ============================================================
// GET /themes/active
// ============================================================

async fn active_theme(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
) -> CardinalResult<Json<Theme>> {
    let theme = themes::find_active_for_owner(&state.db.pool, auth.user_id)
        .await?
        .ok_or(CardinalError::NotFound {
            resource: "Theme".into(),
        })?;
    Ok(Json(theme))
}

// ============================================================
// POST /themes
// ============================================================

async fn create_theme(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateThemeRequest>,
) -> CardinalResult<Json<Theme>> {
    let theme = service::create_theme(&state.db.pool, auth.user_id, body).await?;
    Ok(Json(theme))
}

// ============================================================
// PUT /themes — marketplace import
// ============================================================

async fn clone_theme(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<CloneThemeRequest>,
) -> CardinalResult<Json<Theme>> {
    validate_request(&body)?;

    let cloned = service::clone_theme(
        &state.db.pool,
        &body.original_theme_id,
        auth.user_id,
        &body.new_name,
    )
    .await?;
    Ok(Json(cloned))
}

// ============================================================
// DELETE /themes/{theme_id}
// ============================================================

async fn delete_theme(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(theme_id): Path<Uuid>,
) -> CardinalResult<Json<serde_json::Value>> {
    themes::delete(&state.db.pool, theme_id, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth, build_router};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use cardinal_db::Database;
    use tower::ServiceExt;

    const TEST_SECRET: &str = "cardinal-test-secret";

    fn test_config() -> &'static cardinal_common::config::AppConfig {
        std::env::set_var("CARDINAL__AUTH__JWT_SECRET", TEST_SECRET);
        cardinal_common::config::init().expect("init config")
    }

    async fn test_app() -> (axum::Router, Database) {
        test_config();
        let db = Database::connect_with("sqlite::memory:", 1, 1)
            .await
            .expect("connect in-memory sqlite");
        db.init_schema().await.expect("init schema");
        let router = build_router(crate::AppState { db: db.clone() });
        (router, db)
    }

    fn bearer(user_id: Uuid) -> String {
        let token = auth::issue_session_token(user_id, TEST_SECRET, 3600).unwrap();
        format!("Bearer {token}")
    }

    fn request(method: Method, uri: &str, auth: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn midnight_body() -> serde_json::Value {
        serde_json::json!({
            "name": "Midnight",
            "colors": {
                "primary": "#1e293b",
                "secondary": "#334155",
                "accent": "#38bdf8",
                "background": "#0f172a",
                "foreground": "#e2e8f0",
                "border": "#1e293b",
                "text": "#f8fafc",
                "textSecondary": "#94a3b8",
                "textOnPrimary": "#f8fafc",
                "textOnAccent": "#0f172a"
            },
            "fonts": { "primary": "Inter", "secondary": "Inter" },
            "spacing": { "small": "0.5rem", "medium": "1rem", "large": "1.5rem" },
            "shadows": {
                "sm": "0 1px 2px 0 rgb(0 0 0 / 0.4)",
                "md": "0 4px 6px -1px rgb(0 0 0 / 0.4)",
                "lg": "0 10px 15px -3px rgb(0 0 0 / 0.4)"
            }
        })
    }

    #[tokio::test]
    async fn unauthenticated_requests_are_rejected_without_writes() {
        let (app, db) = test_app().await;

        let attempts = [
            (Method::GET, "/api/v1/themes", None),
            (Method::GET, "/api/v1/themes/active", None),
            (Method::POST, "/api/v1/themes", Some(midnight_body())),
            (
                Method::PUT,
                "/api/v1/themes",
                Some(serde_json::json!({
                    "originalThemeId": Uuid::new_v4().to_string(),
                    "newName": "Copy"
                })),
            ),
        ];

        for (method, uri, body) in attempts {
            let response = app
                .clone()
                .oneshot(request(method.clone(), uri, None, body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
        }

        let delete_uri = format!("/api/v1/themes/{}", Uuid::new_v4());
        let response = app
            .clone()
            .oneshot(request(Method::DELETE, &delete_uri, None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        assert!(themes::list_public(&db.pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn post_applies_radii_default_and_preview_projection() {
        let (app, _db) = test_app().await;
        let user = Uuid::new_v4();

        let response = app
            .oneshot(request(
                Method::POST,
                "/api/v1/themes",
                Some(&bearer(user)),
                Some(midnight_body()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let theme = json_body(response).await;
        assert_eq!(theme["name"], "Midnight");
        assert_eq!(theme["ownerId"], user.to_string());
        assert_eq!(
            theme["radii"],
            serde_json::json!({ "small": "0.25rem", "medium": "0.5rem", "large": "0.75rem" })
        );
        // Preview is the 7-key projection of colors
        for key in [
            "primary",
            "secondary",
            "background",
            "border",
            "accent",
            "text",
            "textOnAccent",
        ] {
            assert_eq!(theme["preview"][key], theme["colors"][key], "{key}");
        }
    }

    #[tokio::test]
    async fn post_without_required_structure_is_400() {
        let (app, db) = test_app().await;
        let user = Uuid::new_v4();

        let mut body = midnight_body();
        body.as_object_mut().unwrap().remove("shadows");

        let response = app
            .oneshot(request(
                Method::POST,
                "/api/v1/themes",
                Some(&bearer(user)),
                Some(body),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error = json_body(response).await;
        assert_eq!(error["error"], "VALIDATION_ERROR");
        assert!(themes::list_for_owner(&db.pool, user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn put_clones_a_foreign_public_theme() {
        let (app, db) = test_app().await;
        let author = Uuid::new_v4();
        let importer = Uuid::new_v4();

        // Seed: another user's public theme
        let mut source = cardinal_common::models::Theme::built_in_default();
        source.id = Uuid::new_v4();
        source.owner_id = Some(author);
        source.name = "Midnight".into();
        source.is_public = true;
        let source = themes::upsert(&db.pool, &source).await.unwrap();

        let response = app
            .oneshot(request(
                Method::PUT,
                "/api/v1/themes",
                Some(&bearer(importer)),
                Some(serde_json::json!({
                    "originalThemeId": source.id.to_string(),
                    "newName": "My Copy"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let clone = json_body(response).await;
        assert_ne!(clone["id"], source.id.to_string());
        assert_eq!(clone["name"], "My Copy");
        assert_eq!(clone["isPublic"], false);
        assert_eq!(clone["ownerId"], importer.to_string());
        assert_eq!(clone["colors"], serde_json::to_value(&source.colors).unwrap());
    }

    #[tokio::test]
    async fn put_with_missing_fields_is_400_and_missing_source_is_404() {
        let (app, _db) = test_app().await;
        let user = Uuid::new_v4();

        let response = app
            .clone()
            .oneshot(request(
                Method::PUT,
                "/api/v1/themes",
                Some(&bearer(user)),
                Some(serde_json::json!({ "originalThemeId": "", "newName": "" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(request(
                Method::PUT,
                "/api/v1/themes",
                Some(&bearer(user)),
                Some(serde_json::json!({
                    "originalThemeId": Uuid::new_v4().to_string(),
                    "newName": "Copy"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_separates_marketplace_from_own_themes() {
        let (app, db) = test_app().await;
        let user = Uuid::new_v4();

        let mut own_public = cardinal_common::models::Theme::built_in_default();
        own_public.id = Uuid::new_v4();
        own_public.owner_id = Some(user);
        own_public.name = "Mine, shared".into();
        own_public.is_public = true;
        themes::upsert(&db.pool, &own_public).await.unwrap();

        let mut foreign_private = cardinal_common::models::Theme::built_in_default();
        foreign_private.id = Uuid::new_v4();
        foreign_private.owner_id = Some(Uuid::new_v4());
        foreign_private.name = "Someone else's".into();
        foreign_private.is_public = false;
        themes::upsert(&db.pool, &foreign_private).await.unwrap();

        // Own list includes own public themes
        let response = app
            .clone()
            .oneshot(request(Method::GET, "/api/v1/themes", Some(&bearer(user)), None))
            .await
            .unwrap();
        let mine = json_body(response).await;
        assert_eq!(mine.as_array().unwrap().len(), 1);
        assert_eq!(mine[0]["name"], "Mine, shared");

        // Marketplace shows public themes from everyone
        let response = app
            .oneshot(request(
                Method::GET,
                "/api/v1/themes?public=true",
                Some(&bearer(Uuid::new_v4())),
                None,
            ))
            .await
            .unwrap();
        let marketplace = json_body(response).await;
        assert_eq!(marketplace.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn active_theme_fetch_and_delete_round_trip() {
        let (app, db) = test_app().await;
        let user = Uuid::new_v4();

        // No theme yet
        let response = app
            .clone()
            .oneshot(request(
                Method::GET,
                "/api/v1/themes/active",
                Some(&bearer(user)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/v1/themes",
                Some(&bearer(user)),
                Some(midnight_body()),
            ))
            .await
            .unwrap();
        let created = json_body(response).await;

        let response = app
            .clone()
            .oneshot(request(
                Method::GET,
                "/api/v1/themes/active",
                Some(&bearer(user)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let active = json_body(response).await;
        assert_eq!(active["id"], created["id"]);

        let uri = format!("/api/v1/themes/{}", created["id"].as_str().unwrap());
        let response = app
            .clone()
            .oneshot(request(Method::DELETE, &uri, Some(&bearer(user)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(themes::list_for_owner(&db.pool, user).await.unwrap().is_empty());

        // Idempotent
        let response = app
            .oneshot(request(Method::DELETE, &uri, Some(&bearer(user)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
