// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{FromRef, Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use fm_league_api::{
    ApiError, LEAGUE_CHANNEL, LeagueStore, SaveErrorResponse, SaveResponse, StoreConfig, WriteMode,
};
use fm_league_domain::{LeagueState, ManagerId, ManagerSummary, StandingsRow};
use fm_league_persistence::Persistence;
use live::{LiveEventBroadcaster, live_events_handler};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// FM League Server - shared league document and live updates
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Broadcast channel league updates are published on
    #[arg(short, long, default_value = LEAGUE_CHANNEL)]
    channel: String,

    /// How a posted document is combined with the stored one (replace or merge)
    #[arg(short, long, default_value_t = WriteMode::Replace)]
    write_mode: WriteMode,
}

/// The store as shared between handlers.
type SharedStore = Arc<Mutex<LeagueStore<Persistence, Arc<LiveEventBroadcaster>>>>;

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The league document store.
    store: SharedStore,
    /// The live event broadcaster, also held by the store as its publisher.
    broadcaster: Arc<LiveEventBroadcaster>,
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.broadcaster)
    }
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<SaveErrorResponse> = Json(SaveErrorResponse::new(self.message));
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Persistence(e) => {
                error!(error = %e, "Persistence error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: String::from("Failed to save"),
                }
            }
            ApiError::InvalidDocument(_) => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::NotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Command(_) => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
        }
    }
}

/// Handler for GET /data endpoint.
///
/// Returns the current league document.
async fn handle_get_data(AxumState(app_state): AxumState<AppState>) -> Json<LeagueState> {
    let store = app_state.store.lock().await;
    let state: LeagueState = store.load();
    drop(store);

    info!(version = state.version, "Handling get_data request");

    Json(state)
}

/// Handler for POST /data endpoint.
///
/// Saves the posted document and broadcasts it.
async fn handle_post_data(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<SaveResponse>, HttpError> {
    info!(
        based_on = body.get("version").and_then(serde_json::Value::as_u64),
        "Handling post_data request"
    );

    let mut store = app_state.store.lock().await;
    let response: SaveResponse = store.save(&body)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST /data/reset endpoint.
///
/// Replaces the league with the seed document and broadcasts it.
async fn handle_reset_data(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<SaveResponse>, HttpError> {
    info!("Handling reset_data request");

    let mut store = app_state.store.lock().await;
    let response: SaveResponse = store.reset()?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET /standings endpoint.
///
/// Returns the league table for the current document.
async fn handle_get_standings(
    AxumState(app_state): AxumState<AppState>,
) -> Json<Vec<StandingsRow>> {
    info!("Handling get_standings request");

    let store = app_state.store.lock().await;
    let rows: Vec<StandingsRow> = store.standings();
    drop(store);

    Json(rows)
}

/// Handler for GET `/managers/{manager_id}` endpoint.
///
/// Returns one manager's record and match history.
async fn handle_get_manager(
    AxumState(app_state): AxumState<AppState>,
    Path(manager_id): Path<String>,
) -> Result<Json<ManagerSummary>, HttpError> {
    info!(manager_id = %manager_id, "Handling get_manager request");

    let store = app_state.store.lock().await;
    let summary: ManagerSummary = store.manager_summary(&ManagerId::new(&manager_id))?;
    drop(store);

    Ok(Json(summary))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/data", get(handle_get_data))
        .route("/data", post(handle_post_data))
        .route("/data/reset", post(handle_reset_data))
        .route("/standings", get(handle_get_standings))
        .route("/managers/{manager_id}", get(handle_get_manager))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

/// Wires the store to the broadcaster.
fn create_app_state(persistence: Persistence, config: StoreConfig) -> AppState {
    let broadcaster: Arc<LiveEventBroadcaster> =
        Arc::new(LiveEventBroadcaster::new(config.channel.clone()));
    let store: LeagueStore<Persistence, Arc<LiveEventBroadcaster>> =
        LeagueStore::open(persistence, Arc::clone(&broadcaster), config);

    AppState {
        store: Arc::new(Mutex::new(store)),
        broadcaster,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing FM League Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let config: StoreConfig = StoreConfig {
        channel: args.channel,
        mode: args.write_mode,
    };
    info!(
        channel = %config.channel,
        write_mode = %config.mode,
        "Store configured"
    );

    let app_state: AppState = create_app_state(persistence, config);

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use fm_league_api::LiveEvent;
    use serde_json::json;
    use tokio::sync::broadcast;
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        create_app_state(persistence, StoreConfig::default())
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    fn document_with_match() -> Value {
        let mut state: Value = serde_json::to_value(LeagueState::default()).unwrap();
        state["matches"] = json!([{
            "id": 1, "managerId": "m3", "opponent": "Arsenal FC", "type": "AI",
            "date": "2026-01-09", "competition": "Liga", "ha": "A", "gf": 3, "ga": 0, "use": true
        }]);
        state["matchCounter"] = json!(2);
        state
    }

    #[tokio::test]
    async fn test_get_data_returns_default_document() {
        let app: Router = build_router(create_test_app_state());

        let response = app.oneshot(get("/data")).await.unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let state: LeagueState = read_json(response).await;
        assert_eq!(state, LeagueState::default());
    }

    #[tokio::test]
    async fn test_post_then_get_round_trips() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .clone()
            .oneshot(post_json("/data", &document_with_match()))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let saved: SaveResponse = read_json(response).await;
        assert!(saved.ok);
        assert_eq!(saved.version, 1);
        assert!(!saved.conflict);

        let response = app.oneshot(get("/data")).await.unwrap();
        let state: LeagueState = read_json(response).await;
        assert_eq!(state.matches.len(), 1);
        assert_eq!(state.version, 1);
        assert!(!state.timestamp.is_empty());
    }

    #[tokio::test]
    async fn test_post_data_broadcasts_update() {
        let app_state: AppState = create_test_app_state();
        let mut rx: broadcast::Receiver<LiveEvent> = app_state.broadcaster.subscribe();
        let app: Router = build_router(app_state);

        app.oneshot(post_json("/data", &document_with_match()))
            .await
            .unwrap();

        match rx.try_recv() {
            Ok(LiveEvent::DataUpdated { channel, state }) => {
                assert_eq!(channel, LEAGUE_CHANNEL);
                assert_eq!(state.matches.len(), 1);
            }
            other => panic!("Expected DataUpdated, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_post_stale_document_is_flagged() {
        let app: Router = build_router(create_test_app_state());
        app.clone()
            .oneshot(post_json("/data", &document_with_match()))
            .await
            .unwrap();

        let mut stale: Value = document_with_match();
        stale["version"] = json!(0);
        let response = app
            .clone()
            .oneshot(post_json("/data", &stale))
            .await
            .unwrap();

        let saved: SaveResponse = read_json(response).await;
        assert!(saved.conflict);
        assert_eq!(saved.version, 2);
    }

    #[tokio::test]
    async fn test_post_non_object_is_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(post_json("/data", &json!("league")))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
        let error: SaveErrorResponse = read_json(response).await;
        assert!(!error.ok);
    }

    #[tokio::test]
    async fn test_post_malformed_json_is_rejected() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/data")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reset_restores_seed_document() {
        let app: Router = build_router(create_test_app_state());
        app.clone()
            .oneshot(post_json("/data", &document_with_match()))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/data/reset")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = app.oneshot(get("/data")).await.unwrap();
        let state: LeagueState = read_json(response).await;
        assert!(state.matches.is_empty());
        assert_eq!(state.version, 2);
    }

    #[tokio::test]
    async fn test_get_standings() {
        let app: Router = build_router(create_test_app_state());
        app.clone()
            .oneshot(post_json("/data", &document_with_match()))
            .await
            .unwrap();

        let response = app.oneshot(get("/standings")).await.unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let rows: Vec<StandingsRow> = read_json(response).await;
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].manager_id, ManagerId::new("m3"));
        assert_eq!(rows[0].record.points, 3);
    }

    #[tokio::test]
    async fn test_get_manager_summary() {
        let app: Router = build_router(create_test_app_state());
        app.clone()
            .oneshot(post_json("/data", &document_with_match()))
            .await
            .unwrap();

        let response = app.oneshot(get("/managers/m3")).await.unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let summary: ManagerSummary = read_json(response).await;
        assert_eq!(summary.manager.name, "ALDO");
        assert_eq!(summary.record.won, 1);
    }

    #[tokio::test]
    async fn test_get_unknown_manager_is_not_found() {
        let app: Router = build_router(create_test_app_state());

        let response = app.oneshot(get("/managers/m9")).await.unwrap();

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[test]
    fn test_persistence_error_maps_to_failed_to_save() {
        let err: HttpError = ApiError::Persistence(
            fm_league_persistence::PersistenceError::DatabaseError(String::from("locked")),
        )
        .into();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to save");
    }
}
