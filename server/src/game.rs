//! Authoritative per-session game state and its transition rules.
//!
//! Every mutating operation is applied while the caller holds the session
//! store's exclusive guard, so each transition is atomic with respect to
//! every other transition and snapshot read. A finished game is terminal:
//! all mutating operations become no-ops once `game_over` is set.

use log::info;
use shared::{
    Card, CardColor, GameSummary, ServerMessage, Team, BLUE_CARDS, MAX_CLUE_NUMBER, RED_CARDS,
};
use std::collections::HashMap;

use crate::error::GameError;

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Vec<Card>,
    pub current_turn: Team,
    pub current_clue: Option<String>,
    pub clue_number: u32,
    pub guesses_made: u32,
    pub guesses_allowed: u32,
    pub red_remaining: u32,
    pub blue_remaining: u32,
    pub game_over: bool,
    pub winner: Option<Team>,
    /// Last-known pointer positions by player id. Presentational only,
    /// never part of snapshots or win conditions.
    pub cursors: HashMap<String, (f64, f64)>,
}

impl GameState {
    pub fn new(grid: Vec<Card>) -> Self {
        Self {
            grid,
            current_turn: Team::Red,
            current_clue: None,
            clue_number: 0,
            guesses_made: 0,
            guesses_allowed: 0,
            red_remaining: RED_CARDS,
            blue_remaining: BLUE_CARDS,
            game_over: false,
            winner: None,
            cursors: HashMap::new(),
        }
    }

    /// Flips one card face up and resolves the consequences.
    ///
    /// A finished game, an out-of-range index or an already-revealed card is
    /// ignored without an error reply; `None` tells the caller nothing
    /// changed and nothing should be broadcast. Otherwise returns the
    /// revealed card's color for the update payload.
    pub fn reveal_card(&mut self, session: &str, card_index: i64) -> Option<CardColor> {
        if self.game_over {
            return None;
        }
        let index = usize::try_from(card_index)
            .ok()
            .filter(|i| *i < self.grid.len())?;
        if self.grid[index].revealed {
            return None;
        }

        self.grid[index].revealed = true;
        self.guesses_made += 1;
        let color = self.grid[index].team;
        info!(
            "[{}] Card {} ({}) revealed: {}",
            session, index, self.grid[index].word, color
        );

        let turn_ends = match color {
            CardColor::Assassin => {
                // Instant loss for the team currently on turn
                self.game_over = true;
                self.winner = Some(self.current_turn.opponent());
                true
            }
            CardColor::Red => self.score_team_card(Team::Red),
            CardColor::Blue => self.score_team_card(Team::Blue),
            CardColor::Neutral => true,
        };

        if let Some(winner) = self.winner {
            info!("[{}] Game over, {} team wins", session, winner);
        }
        if turn_ends && !self.game_over {
            self.pass_turn(session);
        }
        Some(color)
    }

    /// Decrements `team`'s remaining counter and decides whether the turn
    /// ends. Finding the team's last card wins the game outright. Revealing
    /// the opponent's card always costs the turn; an own-color reveal only
    /// ends it once the guess budget is exhausted.
    fn score_team_card(&mut self, team: Team) -> bool {
        let remaining = match team {
            Team::Red => &mut self.red_remaining,
            Team::Blue => &mut self.blue_remaining,
        };
        *remaining -= 1;

        if *remaining == 0 {
            self.game_over = true;
            self.winner = Some(team);
            false
        } else if self.current_turn != team {
            true
        } else {
            // Strictly greater: a clue for N permits N + 1 own-color
            // reveals before the turn auto-ends
            self.guesses_made > self.guesses_allowed
        }
    }

    /// Installs a clue for the team on turn.
    ///
    /// Returns `Ok(false)` without touching state when the game is already
    /// over, `Err` when the trimmed clue is empty or the number is outside
    /// 0..=9. The operation does not check which team the caller belongs
    /// to; the fixed current turn already implies whose clue it is.
    pub fn give_clue(&mut self, session: &str, clue: &str, number: i64) -> Result<bool, GameError> {
        if self.game_over {
            return Ok(false);
        }

        let clue = clue.trim();
        if clue.is_empty() || !(0..=MAX_CLUE_NUMBER).contains(&number) {
            return Err(GameError::InvalidClue);
        }

        self.current_clue = Some(clue.to_string());
        self.clue_number = number as u32;
        self.guesses_allowed = self.clue_number + 1;
        self.guesses_made = 0;
        info!(
            "[{}] {} spymaster gave clue '{}' for {}",
            session, self.current_turn, clue, number
        );
        Ok(true)
    }

    /// Manual pass. Returns false (no-op) once the game is over.
    pub fn end_turn(&mut self, session: &str) -> bool {
        if self.game_over {
            return false;
        }
        self.pass_turn(session);
        true
    }

    /// Records a player's last-known pointer position.
    pub fn set_cursor(&mut self, player_id: &str, x: f64, y: f64) {
        self.cursors.insert(player_id.to_string(), (x, y));
    }

    fn pass_turn(&mut self, session: &str) {
        self.current_turn = self.current_turn.opponent();
        self.current_clue = None;
        self.clue_number = 0;
        self.guesses_made = 0;
        self.guesses_allowed = 0;
        info!(
            "[{}] Turn ended, now {} team's turn",
            session, self.current_turn
        );
    }

    /// The scalar state shared by snapshots and reveal updates.
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            current_turn: self.current_turn,
            current_clue: self.current_clue.clone(),
            clue_number: self.clue_number,
            guesses_made: self.guesses_made,
            guesses_allowed: self.guesses_allowed,
            red_remaining: self.red_remaining,
            blue_remaining: self.blue_remaining,
            game_over: self.game_over,
            winner: self.winner,
        }
    }

    /// Full snapshot for `request_game_state` replies. Exposes `team` for
    /// every card including unrevealed ones; role-aware filtering is a
    /// display-layer concern.
    pub fn snapshot(&self) -> ServerMessage {
        ServerMessage::GameState {
            grid: self.grid.clone(),
            summary: self.summary(),
        }
    }
}
