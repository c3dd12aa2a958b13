//! Page layer: the collaborator boundary handed a session id and a role.
//!
//! Visiting a page is what creates a session on first reference; the markup
//! itself is deliberately minimal. A real front-end bundle (board grid,
//! cursor overlay, socket wiring) replaces these shells without touching
//! the game core.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Player,
    Spymaster,
}

impl Role {
    pub fn title(self) -> &'static str {
        match self {
            Role::Player => "Operative",
            Role::Spymaster => "Spymaster",
        }
    }

    fn path_segment(self) -> &'static str {
        match self {
            Role::Player => "player",
            Role::Spymaster => "spymaster",
        }
    }
}

pub fn index() -> String {
    "<!DOCTYPE html>\n<html>\n<head><title>Codenames</title></head>\n<body>\n\
     <h1>Codenames</h1>\n\
     <p>Open /player/&lt;game id&gt; or /spymaster/&lt;game id&gt; to join a game. \
     Games are created automatically.</p>\n\
     </body>\n</html>\n"
        .to_string()
}

pub fn render(game_id: &str, role: Role) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Codenames - {title}</title></head>\n<body \
         data-game-id=\"{game_id}\" data-role=\"{role}\">\n\
         <h1>{title} view: {game_id}</h1>\n\
         <p>Connect a client to <code>/ws</code> and send \
         <code>request_game_state</code> with this game id.</p>\n\
         </body>\n</html>\n",
        title = role.title(),
        game_id = game_id,
        role = role.path_segment(),
    )
}
