//! A game session: the single object the presentation layer talks to.
//!
//! The session owns the board, the cascade stepper, turn bookkeeping, the undo
//! slot, the random generator and the camera. Everything runs on the caller's
//! thread, driven by [`GameSession::on_frame_tick`]. Inputs that arrive while a
//! chain reaction is animating are dropped; new-game and back-to-menu requests
//! are remembered and carried out on the next frame that finds the board idle.

use glam::Vec3;
use log::{debug, info};

use crate::board::Board;
use crate::camera::Camera;
use crate::cascade::{BlastPhase, BlastTick, Cascade};
use crate::config::{GameConfig, PlayerId};
use crate::constants::ROTATION_SPEED;
use crate::coord::Coord;
use crate::error::{ConfigError, RejectedInput};
use crate::turn::{TurnManager, TurnUpdate};
use crate::undo::UndoSlot;

/// Receives game notifications. Every method defaults to a no-op.
pub trait GameObserver {
    /// The active player changed (or should be redisplayed, e.g. after undo).
    fn on_turn_changed(&mut self, _player: PlayerId) {}
    /// Fired once when a single player is left.
    fn on_game_ended(&mut self, _winner: PlayerId, _label: &str) {}
    /// A cascade step started; play the blast sound.
    fn on_blast(&mut self) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl GameObserver for NullObserver {}

/// Drawing capability supplied by the presentation layer.
pub trait Renderer {
    /// Grid lines, tinted with the active player's color.
    fn draw_grid(&mut self, rows: usize, cols: usize, color: &str);
    /// `level` orbs centred at `center`, spun by `angle` degrees about `axis`.
    fn draw_orb(&mut self, center: Vec3, axis: Vec3, angle: f64, level: u32, color: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Winner {
    pub index: PlayerId,
    pub label: String,
}

/// Outcome of one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameResult {
    pub game_ended: bool,
    pub winner: Option<Winner>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Pending {
    new_game: bool,
    main_menu: bool,
}

pub struct GameSession<O: GameObserver = NullObserver> {
    config: GameConfig,
    board: Board,
    cascade: Cascade,
    turns: TurnManager,
    undo: UndoSlot,
    rng: fastrand::Rng,
    camera: Camera,
    observer: O,
    angle: f64,
    started: bool,
    game_over: bool,
    pending: Pending,
}

impl GameSession<NullObserver> {
    /// A session with no observer. `seed` drives the orb rotation axes.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_observer(config, seed, NullObserver)
    }
}

impl<O: GameObserver> GameSession<O> {
    pub fn with_observer(config: GameConfig, seed: u64, observer: O) -> Self {
        let (rows, cols) = (config.rows(), config.cols());
        info!(
            "new game: {rows}x{cols} board, players {}",
            config.players().join(", ")
        );
        Self {
            config,
            board: Board::new(rows, cols),
            cascade: Cascade::default(),
            turns: TurnManager::new(),
            undo: UndoSlot::new(),
            rng: fastrand::Rng::with_seed(seed),
            camera: Camera::new(rows, cols),
            observer,
            angle: 0.0,
            started: true,
            game_over: false,
            pending: Pending::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turns(&self) -> &TurnManager {
        &self.turns
    }

    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    pub fn phase(&self) -> BlastPhase {
        self.cascade.phase()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn current_player(&self) -> PlayerId {
        self.turns.current_player(self.config.player_count())
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn has_pending_request(&self) -> bool {
        self.pending.new_game || self.pending.main_menu
    }

    // -------------------------------------------------------------------------
    // Setup
    // -------------------------------------------------------------------------

    /// Set board size and players, then start a fresh game.
    ///
    /// # Errors
    /// Any [`ConfigError`] from validation, or [`ConfigError::CascadeInProgress`]
    /// while a chain reaction is animating. The session is unchanged on error.
    pub fn configure<S: AsRef<str>>(
        &mut self,
        rows: usize,
        cols: usize,
        players: &[S],
    ) -> Result<(), ConfigError> {
        if !self.cascade.is_idle() {
            return Err(ConfigError::CascadeInProgress);
        }
        self.config = GameConfig::new(rows, cols, players)?;
        self.board = Board::new(rows, cols);
        self.camera.setup(rows, cols);
        self.reset_state();
        self.started = true;
        self.pending = Pending::default();
        info!(
            "configured {rows}x{cols} board, players {}",
            self.config.players().join(", ")
        );
        self.observer.on_turn_changed(self.current_player());
        Ok(())
    }

    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.camera.set_canvas_size(width, height);
    }

    /// Clear the board, undo slot, eliminations and turn counter.
    ///
    /// Returns `false` (and does nothing) while a chain reaction is animating.
    pub fn reset_game_variables(&mut self) -> bool {
        if !self.cascade.is_idle() {
            return false;
        }
        self.reset_state();
        true
    }

    fn reset_state(&mut self) {
        self.board.clear();
        self.undo.clear();
        self.turns.reset();
        self.cascade.clear();
        self.angle = 0.0;
        self.game_over = false;
    }

    /// Ask for a new game with the same configuration.
    ///
    /// Ignored while no game is started (e.g. back at the menu).
    pub fn request_new_game(&mut self) {
        if !self.started {
            debug!("new game request ignored: no game started");
            return;
        }
        self.pending.new_game = true;
    }

    /// Ask to abandon the game and go back to the menu.
    pub fn request_main_menu(&mut self) {
        self.pending.main_menu = true;
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Translate a canvas pointer position into a placement.
    ///
    /// Returns whether the input was accepted.
    pub fn on_pointer_input(&mut self, x: f64, y: f64) -> bool {
        if !self.started {
            return false;
        }
        let result = self
            .camera
            .coordinate_from_pointer(x, y)
            .ok_or(RejectedInput::OutOfBounds)
            .and_then(|coord| self.place(coord));
        if let Err(e) = &result {
            debug!("pointer input ({x:.1}, {y:.1}) ignored: {e}");
        }
        result.is_ok()
    }

    /// Put one orb of the active player on `coord`.
    ///
    /// # Errors
    /// - [`RejectedInput::GameOver`] after the game has ended
    /// - [`RejectedInput::CascadeInProgress`] while a chain reaction animates
    /// - [`RejectedInput::OutOfBounds`] for a coordinate off the board
    /// - [`RejectedInput::OpponentCell`] if another player owns the cell
    ///
    /// A rejected placement leaves the session untouched.
    pub fn place(&mut self, coord: Coord) -> Result<(), RejectedInput> {
        if self.game_over || !self.started {
            return Err(RejectedInput::GameOver);
        }
        if !self.cascade.is_idle() {
            return Err(RejectedInput::CascadeInProgress);
        }
        if !self.board.in_bounds(coord) {
            return Err(RejectedInput::OutOfBounds);
        }
        let player = self.current_player();
        if let Some(cell) = self.board.get(coord) {
            if cell.owner != player {
                return Err(RejectedInput::OpponentCell(coord));
            }
        }

        self.undo.capture(&self.board, &self.turns);
        self.board.add_orbs(coord, player, 1, &mut self.rng);
        debug!(
            "player {player} placed at {coord} (turn {}, level {})",
            self.turns.turn,
            self.board.get(coord).map_or(0, |c| c.level)
        );

        if self.cascade.arm(&self.board) {
            debug!("chain reaction started at {coord}");
        } else {
            let update = self.turns.advance(&self.board, self.config.player_count(), true);
            self.apply_turn_update(update);
        }
        Ok(())
    }

    /// Undo the last move. See [`GameSession::try_undo`].
    pub fn undo(&mut self) -> bool {
        match self.try_undo() {
            Ok(()) => true,
            Err(e) => {
                debug!("undo ignored: {e}");
                false
            }
        }
    }

    /// Restore the state captured before the last accepted move.
    ///
    /// Observers are told whose turn it is afterwards. Only one level of undo
    /// exists; undoing again restores the same state.
    ///
    /// # Errors
    /// - [`RejectedInput::CascadeInProgress`] while a chain reaction animates
    /// - [`RejectedInput::GameOver`] after the game has ended
    /// - [`RejectedInput::NothingToUndo`] before the first move
    pub fn try_undo(&mut self) -> Result<(), RejectedInput> {
        if !self.cascade.is_idle() {
            return Err(RejectedInput::CascadeInProgress);
        }
        if self.game_over {
            return Err(RejectedInput::GameOver);
        }
        if !self.undo.has_snapshot() {
            return Err(RejectedInput::NothingToUndo);
        }
        self.undo.restore(&mut self.board, &mut self.turns);
        debug!("undo to turn {}", self.turns.turn);
        self.observer.on_turn_changed(self.current_player());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Frame loop
    // -------------------------------------------------------------------------

    /// Advance the session by one frame of `delta_ms` milliseconds.
    ///
    /// While a chain reaction runs this moves it forward by exactly one
    /// animation tick, resolving the step once travel completes. When the
    /// board is idle, pending new-game / menu requests are carried out.
    pub fn on_frame_tick(&mut self, delta_ms: u64) -> FrameResult {
        let dt = delta_ms as f64 / 1000.0;

        if self.cascade.is_idle() {
            self.apply_pending();
            if !self.board.is_empty() {
                self.angle += ROTATION_SPEED * dt;
            }
            return FrameResult::default();
        }

        self.angle += ROTATION_SPEED * dt;
        match self.cascade.tick(dt) {
            BlastTick::Idle => FrameResult::default(),
            BlastTick::Animating { blast_started, .. } => {
                if blast_started {
                    self.observer.on_blast();
                }
                FrameResult::default()
            }
            BlastTick::Completed { blast_started } => {
                if blast_started {
                    self.observer.on_blast();
                }
                self.finish_step()
            }
        }
    }

    /// Tick with `frame_ms` frames until the board is idle or `max_frames` pass.
    pub fn settle(&mut self, frame_ms: u64, max_frames: usize) -> FrameResult {
        let mut result = FrameResult::default();
        for _ in 0..max_frames {
            if self.cascade.is_idle() {
                break;
            }
            result = self.on_frame_tick(frame_ms);
            if result.game_ended {
                break;
            }
        }
        result
    }

    fn finish_step(&mut self) -> FrameResult {
        self.cascade.resolve(&mut self.board, &mut self.rng);

        let n = self.config.player_count();
        let settled = self.cascade.is_idle();
        let update = self.turns.advance(&self.board, n, settled);

        if let Some(index) = self.turns.winner(n) {
            // a single color left can keep exploding forever; stop here
            self.cascade.clear();
            self.game_over = true;
            let label = self.config.label(index).to_string();
            info!("player {} ({label}) won at turn {}", index + 1, self.turns.turn);
            self.observer.on_game_ended(index, &label);
            return FrameResult {
                game_ended: true,
                winner: Some(Winner { index, label }),
            };
        }

        self.apply_turn_update(update);
        FrameResult::default()
    }

    fn apply_turn_update(&mut self, update: TurnUpdate) {
        for p in &update.eliminated {
            info!("player {} ({}) eliminated", p + 1, self.config.label(*p));
        }
        if let Some(next) = update.next {
            self.observer.on_turn_changed(next);
        }
    }

    fn apply_pending(&mut self) {
        if self.pending.new_game {
            self.pending.new_game = false;
            self.reset_state();
            self.started = true;
            info!("new game started");
            self.observer.on_turn_changed(self.current_player());
        }
        if self.pending.main_menu {
            self.pending.main_menu = false;
            self.reset_state();
            self.started = false;
            info!("returned to main menu");
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Draw the current frame.
    ///
    /// While a step animates, each exploding cell is drawn as single orbs
    /// pushed toward the neighbors that will receive them.
    pub fn render<R: Renderer>(&self, renderer: &mut R) {
        let active = self.config.label(self.current_player());
        renderer.draw_grid(self.board.rows(), self.board.cols(), active);

        let angle = self.angle.rem_euclid(360.0);
        let displacement = self.cascade.displacement() as f32;
        for cell in self.board.cells() {
            let center = self.camera.cell_center(cell.coord);
            let color = self.config.label(cell.owner);
            if self.cascade.is_explosive(cell.coord) {
                for dir in self.cascade.directions(cell.coord) {
                    renderer.draw_orb(center + dir * displacement, cell.axis, angle, 1, color);
                }
            } else {
                renderer.draw_orb(center, cell.axis, angle, cell.level, color);
            }
        }
    }
}
