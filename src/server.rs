//! HTTP JSON API.
//!
//! Exposes the outfit engine and the wardrobe catalogue over HTTP. The
//! caller's identity arrives already authenticated in the `x-user-id`
//! header; every route is scoped to that owner.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `POST` | `/outfits/suggest` | Suggest an outfit for `{occasion, season?}` |
//! | `POST` | `/outfits/suggest-tone` | Suggest a single-tone outfit for `{occasion, season?, tone}` |
//! | `GET`  | `/outfits/recent` | Recently worn outfits (`?limit=`, default 7, max 20) |
//! | `POST` | `/items` | Add a clothing item |
//! | `GET`  | `/items` | List active items (`?type=`) |
//! | `GET`  | `/items/deleted` | List soft-deleted items |
//! | `GET`  | `/items/{id}` | Fetch one active item |
//! | `DELETE` | `/items/{id}` | Soft delete an item |
//! | `PATCH` | `/items/{id}/restore` | Restore a soft-deleted item |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "No color-compatible outfit found" } }
//! ```
//!
//! Error codes: `bad_request` (400), `unauthorized` (401), `not_found` (404),
//! `internal` (500).

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequestParts, Path, Query, State,
    },
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use wearsuggest_core::history::{self, RecentOutfit};
use wearsuggest_core::models::{ClothingItem, ItemType, Occasion, Season};
use wearsuggest_core::store::Store;
use wearsuggest_core::wardrobe::{self, NewClothingItem};
use wearsuggest_core::{OutfitAssembler, OutfitRequest, OutfitSuggestion, WardrobeError};

use crate::config::Config;
use crate::db;
use crate::migrate;
use crate::sqlite_store::SqliteStore;

/// Header carrying the authenticated user id.
pub const OWNER_HEADER: &str = "x-user-id";

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub assembler: Arc<OutfitAssembler>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, assembler: OutfitAssembler) -> Self {
        Self {
            store,
            assembler: Arc::new(assembler),
        }
    }
}

/// Starts the HTTP server on `[server].bind`.
///
/// Opens the database, applies migrations, and serves until the process
/// is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let pool = db::connect(config).await?;
    migrate::migrate_pool(&pool).await?;

    let assembler = OutfitAssembler::new(config.color_table()?, config.engine.policy()?);
    let state = AppState::new(Arc::new(SqliteStore::new(pool)), assembler);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!(bind = %config.server.bind, "server listening");
    serve(listener, state).await
}

/// Serves the API on an already-bound listener.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> anyhow::Result<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/outfits/suggest", post(handle_suggest))
        .route("/outfits/suggest-tone", post(handle_suggest_tone))
        .route("/outfits/recent", get(handle_recent))
        .route("/items", post(handle_add_item).get(handle_list_items))
        .route("/items/deleted", get(handle_deleted_items))
        .route("/items/{id}", get(handle_get_item).delete(handle_delete_item))
        .route("/items/{id}/restore", patch(handle_restore_item))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request",
        message: message.into(),
    }
}

fn unauthorized(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::UNAUTHORIZED,
        code: "unauthorized",
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found",
        message: message.into(),
    }
}

impl From<WardrobeError> for AppError {
    fn from(err: WardrobeError) -> Self {
        match err {
            WardrobeError::ItemNotFound(_) => not_found(err.to_string()),
            e if e.is_user_error() => bad_request(e.to_string()),
            e => {
                error!(error = %e, "store failure");
                AppError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: "internal",
                    message: "internal server error".to_string(),
                }
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

// ============ Identity ============

/// The authenticated owner, read from the `x-user-id` header.
pub struct Owner(pub String);

impl<S: Send + Sync> FromRequestParts<S> for Owner {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| Owner(v.to_string()))
            .ok_or_else(|| unauthorized(format!("missing {} header", OWNER_HEADER)))
    }
}

// ============ Success envelope ============

#[derive(Serialize)]
struct ApiResponse<T> {
    data: T,
    message: &'static str,
}

fn respond<T: Serialize>(data: T, message: &'static str) -> Json<ApiResponse<T>> {
    Json(ApiResponse { data, message })
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ Outfits ============

#[derive(Deserialize)]
struct SuggestBody {
    occasion: Occasion,
    #[serde(default)]
    season: Option<Season>,
}

#[derive(Deserialize)]
struct SuggestToneBody {
    occasion: Occasion,
    #[serde(default)]
    season: Option<Season>,
    tone: String,
}

async fn handle_suggest(
    State(state): State<AppState>,
    Owner(owner): Owner,
    body: Result<Json<SuggestBody>, JsonRejection>,
) -> Result<Json<ApiResponse<OutfitSuggestion>>, AppError> {
    let Json(body) = body?;
    let req = OutfitRequest {
        owner_id: owner,
        occasion: body.occasion,
        season: body.season,
    };
    let mut rng = StdRng::from_os_rng();
    let outfit = state
        .assembler
        .generate(state.store.as_ref(), &mut rng, &req, Utc::now())
        .await?;
    Ok(respond(outfit, "Outfit suggested successfully"))
}

async fn handle_suggest_tone(
    State(state): State<AppState>,
    Owner(owner): Owner,
    body: Result<Json<SuggestToneBody>, JsonRejection>,
) -> Result<Json<ApiResponse<OutfitSuggestion>>, AppError> {
    let Json(body) = body?;
    let req = OutfitRequest {
        owner_id: owner,
        occasion: body.occasion,
        season: body.season,
    };
    let mut rng = StdRng::from_os_rng();
    let outfit = state
        .assembler
        .generate_tone_based(state.store.as_ref(), &mut rng, &req, &body.tone, Utc::now())
        .await?;
    Ok(respond(outfit, "Tone-based outfit suggested successfully"))
}

#[derive(Deserialize)]
struct RecentQuery {
    limit: Option<usize>,
}

async fn handle_recent(
    State(state): State<AppState>,
    Owner(owner): Owner,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<RecentOutfit>>>, AppError> {
    let Query(query) = query?;
    let outfits = history::recent_outfits(state.store.as_ref(), &owner, query.limit).await?;
    Ok(respond(outfits, "Recent outfits fetched successfully"))
}

// ============ Items ============

async fn handle_add_item(
    State(state): State<AppState>,
    Owner(owner): Owner,
    body: Result<Json<NewClothingItem>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ClothingItem>>), AppError> {
    let Json(input) = body?;
    let item = wardrobe::create_item(
        state.store.as_ref(),
        state.assembler.palette(),
        &owner,
        input,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        respond(item, "Clothing item added successfully"),
    ))
}

#[derive(Deserialize)]
struct ListQuery {
    #[serde(rename = "type")]
    item_type: Option<ItemType>,
}

async fn handle_list_items(
    State(state): State<AppState>,
    Owner(owner): Owner,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<ClothingItem>>>, AppError> {
    let Query(query) = query?;
    let items = wardrobe::list_items(state.store.as_ref(), &owner, query.item_type).await?;
    Ok(respond(items, "Clothing items fetched successfully"))
}

async fn handle_deleted_items(
    State(state): State<AppState>,
    Owner(owner): Owner,
) -> Result<Json<ApiResponse<Vec<ClothingItem>>>, AppError> {
    let items = wardrobe::list_deleted_items(state.store.as_ref(), &owner).await?;
    Ok(respond(items, "Deleted clothing items fetched successfully"))
}

async fn handle_get_item(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ClothingItem>>, AppError> {
    let item = wardrobe::get_item(state.store.as_ref(), &owner, &id).await?;
    Ok(respond(item, "Clothing item fetched successfully"))
}

async fn handle_delete_item(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    wardrobe::remove_item(state.store.as_ref(), &owner, &id).await?;
    Ok(respond(
        serde_json::json!({}),
        "Clothing item deleted successfully",
    ))
}

async fn handle_restore_item(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ClothingItem>>, AppError> {
    let item = wardrobe::restore_item(state.store.as_ref(), &owner, &id).await?;
    Ok(respond(item, "Clothing item restored successfully"))
}
