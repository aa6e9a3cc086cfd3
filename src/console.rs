//! Line-based command console.
//!
//! Drives a [`GameSession`] from text commands, one per line, so the engine can
//! be scripted or wrapped by an external front end. The format follows the
//! usual engine text protocols: an optional numeric id, a command, arguments.
//! Replies start with `=` on success or `?` on failure, followed by the id and
//! a message, and end with a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `list_commands`, `known_command <cmd>`, `quit`
//! - `configure <rows> <cols> <color>...` - new board and players (use `_` for
//!   spaces inside a color, e.g. `green_1`)
//! - `place <col,row>` - play for the active player and run any chain reaction
//! - `click <x> <y>` - play at a canvas pointer position
//! - `tick <ms>` - advance one frame
//! - `settle` - run frames until the board is idle
//! - `undo` - undo the last move
//! - `new_game` - restart with the same players
//! - `board` - show the board
//! - `turn` - show the active player

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use log::debug;

use crate::autoplay::{FRAME_MS, MAX_SETTLE_FRAMES};
use crate::config::GameConfig;
use crate::coord::parse_coord;
use crate::session::{FrameResult, GameSession};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "board",
    "click",
    "configure",
    "known_command",
    "list_commands",
    "name",
    "new_game",
    "place",
    "quit",
    "settle",
    "tick",
    "turn",
    "undo",
    "version",
];

/// Console state.
pub struct Console {
    session: GameSession,
}

impl Console {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            session: GameSession::new(config, seed),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Read commands from stdin and answer on stdout until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Command loop over arbitrary reader and writer.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("reading command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = match self.execute(&command, args) {
                Ok(msg) => (true, msg),
                Err(e) => (false, e.to_string()),
            };
            debug!("{command} -> {success} {message}");

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute one command, returning the reply message.
    fn execute(&mut self, command: &str, args: &[&str]) -> Result<String> {
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    bail!("missing argument");
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "configure" => {
                if args.len() < 4 {
                    bail!("usage: configure <rows> <cols> <color> <color>...");
                }
                let rows: usize = args[0].parse().context("invalid rows")?;
                let cols: usize = args[1].parse().context("invalid columns")?;
                let players: Vec<String> = args[2..].iter().map(|p| p.replace('_', " ")).collect();
                self.session.configure(rows, cols, &players)?;
                Ok(String::new())
            }

            "place" => {
                let Some(arg) = args.first() else {
                    bail!("missing argument");
                };
                let coord = parse_coord(arg).context("invalid coordinate")?;
                self.session.place(coord)?;
                Ok(self.settle_report())
            }

            "click" => {
                if args.len() < 2 {
                    bail!("missing arguments");
                }
                let x: f64 = args[0].parse().context("invalid x")?;
                let y: f64 = args[1].parse().context("invalid y")?;
                if !self.session.on_pointer_input(x, y) {
                    bail!("input rejected");
                }
                Ok(self.settle_report())
            }

            "tick" => {
                let ms: u64 = match args.first() {
                    Some(a) => a.parse().context("invalid milliseconds")?,
                    None => FRAME_MS,
                };
                let result = self.session.on_frame_tick(ms);
                Ok(self.report(&result))
            }

            "settle" => Ok(self.settle_report()),

            "undo" => {
                self.session.try_undo()?;
                Ok(String::new())
            }

            "new_game" => {
                self.session.request_new_game();
                // takes effect on the next idle frame
                let result = self.session.on_frame_tick(0);
                Ok(self.report(&result))
            }

            "board" => Ok(format!("\n{}", self.session.board())),

            "turn" => {
                let p = self.session.current_player();
                Ok(format!("{} {}", p + 1, self.session.config().label(p)))
            }

            _ => bail!("unknown command: {command}"),
        }
    }

    fn settle_report(&mut self) -> String {
        let result = self.session.settle(FRAME_MS, MAX_SETTLE_FRAMES);
        self.report(&result)
    }

    fn report(&self, result: &FrameResult) -> String {
        match &result.winner {
            Some(w) => format!("Player {} ({}) won! Game Over!", w.index + 1, w.label),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coord;

    fn console() -> Console {
        Console::new(GameConfig::new(6, 6, &["red", "blue"]).unwrap(), 1)
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = Console::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = Console::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut c = console();
        assert_eq!(c.execute("name", &[]).unwrap(), "chain-reaction");
    }

    #[test]
    fn test_known_command() {
        let mut c = console();
        assert_eq!(c.execute("known_command", &["place"]).unwrap(), "true");
        assert_eq!(c.execute("known_command", &["explode"]).unwrap(), "false");
        assert!(c.execute("known_command", &[]).is_err());
    }

    #[test]
    fn test_configure() {
        let mut c = console();
        assert!(c.execute("configure", &["7", "9", "Green_1", "grey"]).is_ok());
        assert_eq!(c.session().config().players(), ["green 1", "grey"]);
        assert!(c.execute("configure", &["7", "9", "red", "Red"]).is_err());
        assert!(c.execute("configure", &["5", "9", "red", "blue"]).is_err());
    }

    #[test]
    fn test_place_and_undo() {
        let mut c = console();
        assert!(c.execute("place", &["0,0"]).is_ok());
        assert!(c.execute("place", &["0,0"]).is_err(), "blue may not play on red");
        assert_eq!(c.execute("turn", &[]).unwrap(), "2 blue");
        assert!(c.execute("undo", &[]).is_ok());
        assert!(c.session().board().is_empty());
        assert!(c.execute("place", &["nowhere"]).is_err());
        assert!(c.execute("place", &["6,0"]).is_err());
    }

    #[test]
    fn test_place_runs_cascade_to_completion() {
        let mut c = console();
        c.execute("place", &["0,0"]).unwrap();
        c.execute("place", &["5,5"]).unwrap();
        c.execute("place", &["0,0"]).unwrap();
        let s = c.session();
        assert!(s.cascade().is_idle());
        assert!(s.board().get(Coord::new(0, 0)).is_none());
        assert_eq!(s.board().get(Coord::new(1, 0)).unwrap().owner, 0);
    }

    #[test]
    fn test_serve_loop() {
        let mut c = console();
        let input = b"1 name\n# comment\n\nplace 2,2\n7 bogus\nquit\nname\n";
        let mut out = Vec::new();
        c.serve(&input[..], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("=1 chain-reaction"));
        assert!(text.contains("?7 unknown command: bogus"));
        // nothing after quit
        assert_eq!(text.matches("chain-reaction").count(), 1);
    }

    #[test]
    fn test_new_game() {
        let mut c = console();
        c.execute("place", &["3,3"]).unwrap();
        c.execute("new_game", &[]).unwrap();
        assert!(c.session().board().is_empty());
        assert_eq!(c.execute("turn", &[]).unwrap(), "1 red");
    }
}
