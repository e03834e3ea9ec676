use std::sync::Arc;

use gamehub::{
    event::EventBus,
    game::{GameService, KeywordPool},
    player::{InMemoryPlayerDirectory, PlayerDirectory},
    room::repository::{InMemoryRoomRepository, RoomRepository},
    room::service::RoomService,
    shared::AppState,
    websockets::{
        ConnectionManager, MessageType, RoomSubscriptions, WebSocketMessage,
        WebSocketRoomSubscriber, WebsocketReceiveHandler,
    },
};

use super::mocks::MockConnectionManager;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

/// In tests, connection ids double as usernames for readability
pub struct TestSetup {
    pub event_bus: EventBus,
    pub mock_conn_manager: Arc<MockConnectionManager>,
    pub input_handler: WebsocketReceiveHandler,
    pub room_service: Arc<RoomService>,
    pub players: Vec<String>,
    pub room_id: String,
}

pub struct TestSetupBuilder {
    players: Vec<String>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self { players: vec![] }
    }

    pub fn with_players(mut self, players: Vec<&str>) -> Self {
        self.players = players.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_two_players(self) -> Self {
        self.with_players(vec!["alice", "bob"])
    }

    pub fn with_three_players(self) -> Self {
        self.with_players(vec!["alice", "bob", "charlie"])
    }

    /// Builds the full command/broadcast pipeline over a mock connection
    /// manager; when players are given, the first creates a room over the
    /// real command path and the rest join it
    pub async fn build(self) -> TestSetup {
        let event_bus = EventBus::new();
        let room_repository: Arc<dyn RoomRepository + Send + Sync> =
            Arc::new(InMemoryRoomRepository::new());
        let keyword_pool = Arc::new(KeywordPool::new(vec![
            "laugh".to_string(),
            "sing".to_string(),
            "dance".to_string(),
        ]));
        let mock_conn_manager = Arc::new(MockConnectionManager::new());
        let connection_manager: Arc<dyn ConnectionManager> = mock_conn_manager.clone();
        let player_directory: Arc<dyn PlayerDirectory> = Arc::new(InMemoryPlayerDirectory::new());

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
            Arc::clone(&room_service),
            game_service,
            player_directory,
            connection_manager,
            event_bus.clone(),
            subscriptions,
        );
        let input_handler = WebsocketReceiveHandler::new(app_state);

        let mut setup = TestSetup {
            event_bus,
            mock_conn_manager,
            input_handler,
            room_service,
            players: self.players.clone(),
            room_id: String::new(),
        };

        if let Some((host, rest)) = self.players.split_first() {
            setup.send_create_room(host).await;
            setup.room_id = setup.consume_room_created(host).await;

            let room_id = setup.room_id.clone();
            for player in rest {
                setup.send_join_room(player, &room_id).await;
            }
            setup.clear_messages().await;
        }

        setup
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSetup {
    /// Pops the ROOM_CREATED ack for a player and returns the room id
    pub async fn consume_room_created(&self, player: &str) -> String {
        let raw = self
            .mock_conn_manager
            .consume_message_for(player)
            .await
            .unwrap_or_else(|| panic!("{} should have received ROOM_CREATED", player));
        let message: WebSocketMessage = serde_json::from_str(&raw).unwrap();
        assert!(
            matches!(message.message_type, MessageType::RoomCreated),
            "expected ROOM_CREATED, got {:?}",
            message.message_type
        );
        message.payload["roomId"].as_str().unwrap().to_string()
    }
}
