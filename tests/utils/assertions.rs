//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use gamehub::websockets::{MessageType, WebSocketMessage};

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct MessageAssertion<'a> {
    setup: &'a TestSetup,
    players: Vec<&'a str>, // connection ids
}

impl<'a> MessageAssertion<'a> {
    /// Create an assertion for all players in the setup
    pub fn for_all_players(setup: &'a TestSetup) -> Self {
        let players = setup.players.iter().map(|s| s.as_str()).collect();
        Self { setup, players }
    }

    /// Create an assertion for specific players
    pub fn for_players(setup: &'a TestSetup, players: Vec<&'a str>) -> Self {
        Self { setup, players }
    }

    /// Assert that players received a specific message type (consumes the message from queue)
    pub async fn received_message_type(self, expected_type: MessageType) -> MessageContent {
        let mut messages = vec![];

        for player in &self.players {
            let message = self
                .setup
                .mock_conn_manager
                .consume_message_for(player)
                .await;
            assert!(
                message.is_some(),
                "{} should have received a message",
                player
            );

            let msg: WebSocketMessage = serde_json::from_str(&message.unwrap()).unwrap();
            assert_eq!(
                msg.message_type, expected_type,
                "{} received wrong message type",
                player
            );
            messages.push(msg);
        }

        // Broadcast payloads are full room snapshots, so every player should
        // see the same thing
        if messages.len() > 1 {
            let first_payload = &messages[0].payload;
            for (i, msg) in messages.iter().enumerate().skip(1) {
                assert_eq!(
                    &msg.payload, first_payload,
                    "Player {} payload differs from player {}",
                    self.players[i], self.players[0]
                );
            }
        }

        MessageContent {
            payload: messages[0].payload.clone(),
        }
    }

    /// Assert that players received no messages
    pub async fn received_no_messages(self) {
        for player in &self.players {
            let messages = self.setup.mock_conn_manager.get_messages_for(player).await;
            assert!(
                messages.is_empty(),
                "{} should not have received any messages, got {:?}",
                player,
                messages
            );
        }
    }

    /// Count how many messages of a specific type a player received (non-consuming)
    pub async fn count_message_type(&self, player: &str, msg_type: MessageType) -> usize {
        let messages = self.setup.mock_conn_manager.get_messages_for(player).await;
        messages
            .iter()
            .filter_map(|msg_str| serde_json::from_str::<WebSocketMessage>(msg_str).ok())
            .filter(|msg| msg.message_type == msg_type)
            .count()
    }
}

// ============================================================================
// Message Content Assertions
// ============================================================================

pub struct MessageContent {
    payload: serde_json::Value,
}

impl MessageContent {
    /// Assert the snapshot is for a specific room
    pub fn with_room_id(self, expected_room_id: &str) -> Self {
        assert_eq!(self.payload["roomId"], expected_room_id);
        self
    }

    /// Assert the room status in the snapshot
    pub fn with_status(self, expected_status: &str) -> Self {
        assert_eq!(self.payload["status"], expected_status);
        self
    }

    /// Assert the winner field (None asserts a null winner)
    pub fn with_winner(self, expected_winner: Option<&str>) -> Self {
        match expected_winner {
            Some(winner) => assert_eq!(self.payload["winner"], winner),
            None => assert!(
                self.payload["winner"].is_null(),
                "expected null winner, got {}",
                self.payload["winner"]
            ),
        }
        self
    }

    /// Assert the number of players in the snapshot
    pub fn with_player_count(self, expected_count: usize) -> Self {
        let players = self.payload["players"]
            .as_array()
            .expect("payload should contain players array");
        assert_eq!(players.len(), expected_count);
        self
    }

    /// Assert an error payload's message
    pub fn with_error_message(self, expected_message: &str) -> Self {
        assert_eq!(self.payload["message"], expected_message);
        self
    }

    /// Assert the acknowledged action of an ACK payload
    pub fn with_action(self, expected_action: &str) -> Self {
        assert_eq!(self.payload["action"], expected_action);
        self
    }

    fn find_player(&self, player_id: &str) -> serde_json::Value {
        self.payload["players"]
            .as_array()
            .expect("payload should contain players array")
            .iter()
            .find(|p| p["playerId"] == player_id)
            .unwrap_or_else(|| panic!("player {} not in snapshot", player_id))
            .clone()
    }

    /// Assert which player holds the host flag
    pub fn with_host(self, player_id: &str) -> Self {
        let player = self.find_player(player_id);
        assert_eq!(player["isHost"], true, "{} should be host", player_id);
        self
    }

    /// Assert a player's alive/eliminated status
    pub fn with_player_status(self, player_id: &str, expected_status: &str) -> Self {
        let player = self.find_player(player_id);
        assert_eq!(player["status"], expected_status);
        self
    }

    /// Assert that every player in the snapshot carries a keyword
    pub fn with_keywords_assigned(self) -> Self {
        let players = self.payload["players"]
            .as_array()
            .expect("payload should contain players array");
        for player in players {
            assert!(
                player["keyword"].is_string(),
                "{} should have a keyword",
                player["playerId"]
            );
        }
        self
    }

    /// Assert that a player's keyword is one of the expected pool words
    pub fn with_keyword_from_pool(self, player_id: &str, pool: &[&str]) -> Self {
        let player = self.find_player(player_id);
        let keyword = player["keyword"].as_str().expect("keyword should be set");
        assert!(
            pool.contains(&keyword),
            "keyword {} not drawn from pool",
            keyword
        );
        self
    }
}
