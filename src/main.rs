mod event;
mod game;
mod player;
mod room;
mod shared;
mod websockets;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use event::EventBus;
use game::{GameService, KeywordPool};
use player::{InMemoryPlayerDirectory, PlayerDirectory};
use room::repository::{InMemoryRoomRepository, RoomRepository};
use room::service::RoomService;
use serde_json::json;
use shared::AppState;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use websockets::{
    websocket_handler, ConnectionManager, InMemoryConnectionManager, RoomSubscriptions,
    WebSocketRoomSubscriber,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gamehub=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting gamehub lobby server");

    // Create shared application state with dependency injection
    let room_repository: Arc<dyn RoomRepository + Send + Sync> =
        Arc::new(InMemoryRoomRepository::new());
    let keyword_pool = Arc::new(KeywordPool::from_env());
    let connection_manager: Arc<dyn ConnectionManager> = Arc::new(InMemoryConnectionManager::new());
    let player_directory: Arc<dyn PlayerDirectory> = Arc::new(InMemoryPlayerDirectory::new());
    let event_bus = EventBus::new();

    let room_service = Arc::new(RoomService::new(
        Arc::clone(&room_repository),
        Arc::clone(&keyword_pool),
    ));
    let game_service = Arc::new(GameService::new(
        Arc::clone(&room_repository),
        Arc::clone(&keyword_pool),
    ));

    let subscriber = Arc::new(WebSocketRoomSubscriber::new(
        Arc::clone(&room_service),
        Arc::clone(&connection_manager),
        event_bus.clone(),
    ));
    let subscriptions = Arc::new(RoomSubscriptions::new(subscriber, event_bus.clone()));

    let app_state = AppState::new(
        room_service,
        game_service,
        player_directory,
        connection_manager,
        event_bus,
        subscriptions,
    );

    // Browser clients: the local dev origin plus the deployed client
    let mut origins: Vec<HeaderValue> = vec!["http://localhost:3000".parse().unwrap()];
    if let Ok(url) = std::env::var("CLIENT_URL") {
        match url.parse() {
            Ok(origin) => origins.push(origin),
            Err(_) => warn!(client_url = %url, "Ignoring invalid CLIENT_URL"),
        }
    }

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true);

    let app = Router::new()
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .route("/rooms", get(room::handlers::list_rooms))
        .route("/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3001);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .unwrap();
    info!("Server running on http://localhost:{}", port);
    axum::serve(listener, app).await.unwrap();
}
