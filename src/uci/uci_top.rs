//! UCI protocol front-end and command loop.
//!
//! Parses UCI commands, maintains the current position, routes `go` requests
//! to the selected engine, and reports malformed FEN or move text back to the
//! GUI as `info string` lines instead of failing.

use std::io::{self, BufRead, Write};

use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::engines::engine_weighted::{WeightedMinimaxEngine, MAX_DEPTH};
use crate::errors::ChessResult;
use crate::game_state::game_state::{move_to_uci, GameState};

/// Skill level 1 plays uniform random moves, 2 the weighted minimax engine.
pub const MIN_SKILL_LEVEL: u8 = 1;
pub const MAX_SKILL_LEVEL: u8 = 2;

/// Start-up settings, usually taken from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UciSettings {
    pub skill_level: u8,
    pub depth: u8,
    pub seed: Option<u64>,
}

impl Default for UciSettings {
    fn default() -> Self {
        Self {
            skill_level: 2,
            depth: 2,
            seed: None,
        }
    }
}

impl UciSettings {
    /// Settings pulled into the ranges the `uci` handshake advertises.
    pub fn clamped(self) -> Self {
        Self {
            skill_level: self.skill_level.clamp(MIN_SKILL_LEVEL, MAX_SKILL_LEVEL),
            depth: self.depth.clamp(1, MAX_DEPTH),
            seed: self.seed,
        }
    }
}

pub fn run_stdio_loop(settings: UciSettings) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut uci = UciState::new(settings);

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = uci.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

struct UciState {
    game_state: GameState,
    engine: Box<dyn Engine>,
    settings: UciSettings,
    debug_mode: bool,
}

impl UciState {
    fn new(settings: UciSettings) -> Self {
        let settings = settings.clamped();
        Self {
            game_state: GameState::new_game(),
            engine: build_engine(&settings),
            settings,
            debug_mode: false,
        }
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        log::debug!("uci <- {}", trimmed);

        match cmd {
            "uci" => {
                writeln!(out, "id name {}", self.engine.name())?;
                writeln!(out, "id author {}", self.engine.author())?;
                writeln!(
                    out,
                    "option name Skill Level type spin default {} min {} max {}",
                    self.settings.skill_level, MIN_SKILL_LEVEL, MAX_SKILL_LEVEL
                )?;
                writeln!(
                    out,
                    "option name Depth type spin default {} min 1 max {}",
                    self.settings.depth, MAX_DEPTH
                )?;
                writeln!(
                    out,
                    "option name Seed type spin default {} min 0 max {}",
                    self.settings.seed.unwrap_or(0),
                    u64::MAX
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
            }
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    writeln!(out, "info string setoption error: {}", err)?;
                }
            }
            "ucinewgame" => {
                self.game_state = GameState::new_game();
                self.engine.new_game();
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    log::warn!("rejected position command: {}", err);
                    writeln!(out, "info string position error: {}", err)?;
                }
            }
            "go" => {
                if let Err(err) = self.handle_go(trimmed, out) {
                    writeln!(out, "info string go error: {}", err)?;
                    writeln!(out, "bestmove 0000")?;
                }
            }
            "stop" => {
                // Search is synchronous; nothing is running between commands.
            }
            "debug" => {
                let mode = parts.next().unwrap_or_default();
                self.debug_mode = mode.eq_ignore_ascii_case("on");
            }
            "d" => {
                writeln!(out, "info string fen {}", self.game_state.get_fen())?;
            }
            "quit" => {
                return Ok(true);
            }
            _ => {
                // Unknown commands are ignored for UCI compatibility.
            }
        }

        Ok(false)
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), String> {
        let (name, value) = parse_setoption(line);

        if name.eq_ignore_ascii_case("Skill Level") {
            let parsed = value
                .parse::<u8>()
                .map_err(|_| format!("invalid Skill Level value '{}'", value))?;
            if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&parsed) {
                return Err(format!(
                    "Skill Level {} outside {}..={}",
                    parsed, MIN_SKILL_LEVEL, MAX_SKILL_LEVEL
                ));
            }
            self.settings.skill_level = parsed;
            self.engine = build_engine(&self.settings);
        } else if name.eq_ignore_ascii_case("Depth") {
            let parsed = value
                .parse::<u8>()
                .map_err(|_| format!("invalid Depth value '{}'", value))?;
            self.settings.depth = parsed.clamp(1, MAX_DEPTH);
            self.engine.set_option("Depth", &self.settings.depth.to_string())?;
        } else if name.eq_ignore_ascii_case("Seed") {
            let parsed = value
                .parse::<u64>()
                .map_err(|_| format!("invalid Seed value '{}'", value))?;
            self.settings.seed = if parsed == 0 { None } else { Some(parsed) };
            self.engine.set_option("Seed", &parsed.to_string())?;
        } else {
            self.engine.set_option(&name, &value)?;
        }

        Ok(())
    }

    /// Replaces the current position only when the whole command is valid.
    fn handle_position(&mut self, line: &str) -> ChessResult<()> {
        self.game_state = parse_position(line)?;
        log::info!("position set to {}", self.game_state.get_fen());
        Ok(())
    }

    fn handle_go(&mut self, line: &str, out: &mut impl Write) -> Result<(), String> {
        let params = parse_go_params(line);
        let result = self.engine.choose_move(&mut self.game_state, &params)?;

        for info in &result.info_lines {
            writeln!(out, "{}", info).map_err(|e| e.to_string())?;
        }

        let Some(best_move) = result.best_move else {
            let reason = self
                .game_state
                .game_over_reason()
                .map_or("unknown", |reason| reason.as_str());
            writeln!(
                out,
                "info string status game_over result {} reason {}",
                self.game_state.result(),
                reason
            )
            .map_err(|e| e.to_string())?;
            writeln!(out, "bestmove 0000").map_err(|e| e.to_string())?;
            return Ok(());
        };

        // Report the position after the reply without committing to it; the
        // GUI sends the next `position` command.
        self.game_state.make_move(&best_move);
        let status = match self.game_state.game_over_reason() {
            Some(reason) => format!(
                "game_over result {} reason {}",
                self.game_state.result(),
                reason
            ),
            None => "ok".to_owned(),
        };
        let fen_after = self.game_state.get_fen();
        self.game_state.unmake_move();

        if self.debug_mode {
            writeln!(out, "info string fen {}", fen_after).map_err(|e| e.to_string())?;
        }
        writeln!(out, "info string status {}", status).map_err(|e| e.to_string())?;
        writeln!(out, "bestmove {}", move_to_uci(&best_move)).map_err(|e| e.to_string())?;
        Ok(())
    }
}

fn parse_setoption(line: &str) -> (String, String) {
    let mut name_tokens = Vec::<&str>::new();
    let mut value_tokens = Vec::<&str>::new();
    let mut mode = "";

    for tok in line.split_whitespace().skip(1) {
        match tok {
            "name" => mode = "name",
            "value" => mode = "value",
            _ if mode == "name" => name_tokens.push(tok),
            _ if mode == "value" => value_tokens.push(tok),
            _ => {}
        }
    }

    (name_tokens.join(" "), value_tokens.join(" "))
}

fn parse_position(line: &str) -> ChessResult<GameState> {
    use crate::errors::ChessError;

    let mut tokens = line.split_whitespace().peekable();
    let _ = tokens.next(); // "position"

    let mut game_state = match tokens.next() {
        Some("startpos") => GameState::new_game(),
        Some("fen") => {
            let mut fen_parts = Vec::<&str>::new();
            while let Some(&next) = tokens.peek() {
                if next == "moves" {
                    break;
                }
                fen_parts.push(next);
                tokens.next();
            }
            if fen_parts.is_empty() {
                return Err(ChessError::InvalidPosition(
                    "missing FEN after 'position fen'".to_owned(),
                ));
            }
            GameState::from_fen(&fen_parts.join(" "))?
        }
        Some(other) => {
            return Err(ChessError::InvalidPosition(format!(
                "unsupported position token '{}'",
                other
            )))
        }
        None => {
            return Err(ChessError::InvalidPosition(
                "incomplete position command".to_owned(),
            ))
        }
    };

    if tokens.peek().copied() == Some("moves") {
        let _ = tokens.next();
        for lan in tokens {
            game_state.play_uci(lan)?;
        }
    }

    Ok(game_state)
}

fn parse_go_params(line: &str) -> GoParams {
    let mut params = GoParams::default();
    let mut tokens = line.split_whitespace();
    while let Some(tok) = tokens.next() {
        if tok == "depth" {
            params.depth = tokens.next().and_then(|x| x.parse::<u8>().ok());
        }
    }
    params
}

fn build_engine(settings: &UciSettings) -> Box<dyn Engine> {
    match (settings.skill_level, settings.seed) {
        (MIN_SKILL_LEVEL, Some(seed)) => Box::new(RandomEngine::seeded(seed)),
        (MIN_SKILL_LEVEL, None) => Box::new(RandomEngine::new()),
        (_, Some(seed)) => Box::new(WeightedMinimaxEngine::seeded(settings.depth, seed)),
        (_, None) => Box::new(WeightedMinimaxEngine::new(settings.depth)),
    }
}
