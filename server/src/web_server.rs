use axum::{
    Json, Router,
    extract::{State, WebSocketUpgrade},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use common::leaderboard::LeaderboardEntry;
use common::log;

use crate::broadcaster::Broadcaster;
use crate::leaderboard_service::LeaderboardService;
use crate::server_config::ServerConfig;
use crate::ws_handler::handle_websocket;

#[derive(Clone)]
pub struct WebServerState {
    pub leaderboard: LeaderboardService,
    pub broadcaster: Broadcaster,
}

pub async fn run_web_server(
    config: ServerConfig,
    leaderboard: LeaderboardService,
    broadcaster: Broadcaster,
) {
    let state = WebServerState {
        leaderboard,
        broadcaster,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/ws", get(ws_upgrade_handler))
        .route("/leaderboard", get(get_leaderboard).post(post_score))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(cors)
        .with_state(state);

    log!("Web server listening on {}", config.listen_addr);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("Failed to bind web server address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Web server error");

    log!("Server shut down gracefully");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");
    log!("Shutdown signal received");
}

async fn ws_upgrade_handler(
    ws: WebSocketUpgrade,
    State(state): State<WebServerState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

async fn get_leaderboard(State(state): State<WebServerState>) -> impl IntoResponse {
    match state.leaderboard.top10().await {
        Ok(entries) => (StatusCode::OK, Json(json!(entries))),
        Err(e) => {
            log!("GET /leaderboard failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": e })))
        }
    }
}

/// HTTP fallback for clients without a socket. Mirrors the `newScore`
/// event, but failures travel back in the response body here.
async fn post_score(
    State(state): State<WebServerState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let entry = match serde_json::from_value::<LeaderboardEntry>(body) {
        Ok(entry) => entry,
        Err(e) => {
            log!("POST /leaderboard rejected: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Invalid score payload: {}", e) })),
            );
        }
    };

    match state.leaderboard.submit(entry).await {
        Ok(leaderboard) => (
            StatusCode::OK,
            Json(json!({ "success": true, "leaderboard": leaderboard })),
        ),
        Err(e) => {
            log!("POST /leaderboard failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": e })))
        }
    }
}
