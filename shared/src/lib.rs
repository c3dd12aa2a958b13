use serde::{Deserialize, Serialize};
use std::fmt;

pub const GRID_SIZE: usize = 25;
pub const RED_CARDS: u32 = 9;
pub const BLUE_CARDS: u32 = 8;
pub const NEUTRAL_CARDS: u32 = 7;
pub const ASSASSIN_CARDS: u32 = 1;
pub const MAX_CLUE_NUMBER: i64 = 9;
pub const DEFAULT_GAME_ID: &str = "main";

/// One of the two playing teams. Red always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Red => write!(f, "red"),
            Team::Blue => write!(f, "blue"),
        }
    }
}

/// The hidden assignment of a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    Red,
    Blue,
    Neutral,
    Assassin,
}

impl CardColor {
    /// The team that owns cards of this color, if any.
    pub fn team(self) -> Option<Team> {
        match self {
            CardColor::Red => Some(Team::Red),
            CardColor::Blue => Some(Team::Blue),
            CardColor::Neutral | CardColor::Assassin => None,
        }
    }
}

impl fmt::Display for CardColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardColor::Red => write!(f, "red"),
            CardColor::Blue => write!(f, "blue"),
            CardColor::Neutral => write!(f, "neutral"),
            CardColor::Assassin => write!(f, "assassin"),
        }
    }
}

/// One cell of the 25-card grid. Word and color are fixed at creation;
/// `revealed` flips exactly once, false to true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub word: String,
    pub team: CardColor,
    pub revealed: bool,
}

/// The scalar portion of a session's state, shared by the full `game_state`
/// snapshot and the per-reveal `game_state_update` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub current_turn: Team,
    pub current_clue: Option<String>,
    pub clue_number: u32,
    pub guesses_made: u32,
    pub guesses_allowed: u32,
    pub red_remaining: u32,
    pub blue_remaining: u32,
    pub game_over: bool,
    pub winner: Option<Team>,
}

fn default_game_id() -> String {
    DEFAULT_GAME_ID.to_string()
}

/// Actions a client may send over the socket. The JSON envelope carries a
/// snake_case `type` tag and camelCase payload keys; `gameId` falls back to
/// [`DEFAULT_GAME_ID`] when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    RequestGameState {
        #[serde(rename = "gameId", default = "default_game_id")]
        game_id: String,
    },
    RevealCard {
        #[serde(rename = "gameId", default = "default_game_id")]
        game_id: String,
        #[serde(rename = "cardIndex")]
        card_index: i64,
    },
    GiveClue {
        #[serde(rename = "gameId", default = "default_game_id")]
        game_id: String,
        #[serde(default)]
        clue: String,
        #[serde(default)]
        number: i64,
    },
    EndTurn {
        #[serde(rename = "gameId", default = "default_game_id")]
        game_id: String,
    },
    CursorPosition {
        #[serde(rename = "gameId", default = "default_game_id")]
        game_id: String,
        #[serde(rename = "playerId")]
        player_id: String,
        x: f64,
        y: f64,
    },
    CursorMove {
        #[serde(rename = "playerId")]
        player_id: String,
        #[serde(rename = "cardIndex")]
        card_index: i64,
        word: String,
    },
}

/// Frames the server pushes to clients. Replies and broadcasts share the
/// same envelope shape as [`ClientMessage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    ConnectionResponse {
        status: String,
    },
    GameState {
        grid: Vec<Card>,
        #[serde(flatten)]
        summary: GameSummary,
    },
    GameStateUpdate {
        #[serde(rename = "cardIndex")]
        card_index: usize,
        team: CardColor,
        #[serde(flatten)]
        summary: GameSummary,
    },
    ClueGiven {
        clue: String,
        number: u32,
        team: Team,
        guesses_allowed: u32,
    },
    TurnEnded {
        current_turn: Team,
    },
    PlayerCursor {
        #[serde(rename = "playerId")]
        player_id: String,
        x: f64,
        y: f64,
    },
    GameReset {
        #[serde(rename = "gameId")]
        game_id: String,
    },
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn summary() -> GameSummary {
        GameSummary {
            current_turn: Team::Red,
            current_clue: Some("ocean".to_string()),
            clue_number: 2,
            guesses_made: 1,
            guesses_allowed: 3,
            red_remaining: 8,
            blue_remaining: 8,
            game_over: false,
            winner: None,
        }
    }

    #[test]
    fn test_team_opponent() {
        assert_eq!(Team::Red.opponent(), Team::Blue);
        assert_eq!(Team::Blue.opponent(), Team::Red);
    }

    #[test]
    fn test_card_color_team() {
        assert_eq!(CardColor::Red.team(), Some(Team::Red));
        assert_eq!(CardColor::Blue.team(), Some(Team::Blue));
        assert_eq!(CardColor::Neutral.team(), None);
        assert_eq!(CardColor::Assassin.team(), None);
    }

    #[test]
    fn test_team_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Team::Red).unwrap(), json!("red"));
        assert_eq!(
            serde_json::to_value(CardColor::Assassin).unwrap(),
            json!("assassin")
        );
    }

    #[test]
    fn test_client_message_default_game_id() {
        let message: ClientMessage =
            serde_json::from_str(r#"{"type": "request_game_state"}"#).unwrap();
        match message {
            ClientMessage::RequestGameState { game_id } => assert_eq!(game_id, "main"),
            _ => panic!("Wrong message type"),
        }
    }

    #[test]
    fn test_client_message_reveal_card_keys() {
        let message: ClientMessage =
            serde_json::from_str(r#"{"type": "reveal_card", "gameId": "lobby", "cardIndex": 7}"#)
                .unwrap();
        match message {
            ClientMessage::RevealCard {
                game_id,
                card_index,
            } => {
                assert_eq!(game_id, "lobby");
                assert_eq!(card_index, 7);
            }
            _ => panic!("Wrong message type"),
        }
    }

    #[test]
    fn test_client_message_give_clue_defaults() {
        // Clue and number fall back to empty/zero like the wire protocol expects
        let message: ClientMessage =
            serde_json::from_str(r#"{"type": "give_clue"}"#).unwrap();
        match message {
            ClientMessage::GiveClue {
                game_id,
                clue,
                number,
            } => {
                assert_eq!(game_id, "main");
                assert_eq!(clue, "");
                assert_eq!(number, 0);
            }
            _ => panic!("Wrong message type"),
        }
    }

    #[test]
    fn test_client_message_negative_card_index_parses() {
        let message: ClientMessage =
            serde_json::from_str(r#"{"type": "reveal_card", "cardIndex": -1}"#).unwrap();
        match message {
            ClientMessage::RevealCard { card_index, .. } => assert_eq!(card_index, -1),
            _ => panic!("Wrong message type"),
        }
    }

    #[test]
    fn test_game_state_update_wire_shape() {
        let message = ServerMessage::GameStateUpdate {
            card_index: 3,
            team: CardColor::Neutral,
            summary: summary(),
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["type"], "game_state_update");
        assert_eq!(value["cardIndex"], 3);
        assert_eq!(value["team"], "neutral");
        // Summary fields are flattened into the envelope, snake_case
        assert_eq!(value["current_turn"], "red");
        assert_eq!(value["current_clue"], "ocean");
        assert_eq!(value["guesses_allowed"], 3);
        assert_eq!(value["red_remaining"], 8);
        assert_eq!(value["winner"], Value::Null);
    }

    #[test]
    fn test_game_state_wire_shape() {
        let message = ServerMessage::GameState {
            grid: vec![Card {
                word: "anchor".to_string(),
                team: CardColor::Blue,
                revealed: false,
            }],
            summary: summary(),
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["type"], "game_state");
        assert_eq!(value["grid"][0]["word"], "anchor");
        assert_eq!(value["grid"][0]["team"], "blue");
        assert_eq!(value["grid"][0]["revealed"], false);
        assert_eq!(value["game_over"], false);
    }

    #[test]
    fn test_player_cursor_wire_shape() {
        let message = ServerMessage::PlayerCursor {
            player_id: "p1".to_string(),
            x: 10.5,
            y: 20.0,
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["type"], "player_cursor");
        assert_eq!(value["playerId"], "p1");
        assert_eq!(value["x"], 10.5);
    }

    #[test]
    fn test_game_reset_wire_shape() {
        let message = ServerMessage::GameReset {
            game_id: "main".to_string(),
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["type"], "game_reset");
        assert_eq!(value["gameId"], "main");
    }

    #[test]
    fn test_server_message_roundtrip() {
        let original = ServerMessage::ClueGiven {
            clue: "ocean".to_string(),
            number: 2,
            team: Team::Blue,
            guesses_allowed: 3,
        };

        let text = serde_json::to_string(&original).unwrap();
        let parsed: ServerMessage = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, original);
    }
}
