//! The chain-reaction stepper.
//!
//! A cascade runs in steps. Each step first animates: the orbs of every critical
//! cell slide one cell width toward their receiving neighbors, driven by frame
//! time. When the slide completes, the step resolves: all critical cells are
//! cleared at once and their orbs are handed to the neighbors. If that produces
//! new critical cells the next step starts immediately, otherwise the cascade
//! goes idle.
//!
//! ```text
//!        arm (criticals found)
//!   Idle ---------------------> Animating(0)
//!    ^                             |  tick: displacement += width/blast_time * dt
//!    |                             v
//!    +--- no criticals ------ Resolving --- new criticals ---> Animating(0)
//! ```

use std::collections::BTreeMap;

use glam::Vec3;
use log::{debug, trace};

use crate::board::{Board, Cell};
use crate::config::PlayerId;
use crate::constants::{BLAST_TIME, CELL_WIDTH};
use crate::coord::Coord;
use crate::explosion::{detect_critical, neighbor_contributions};

/// Where the stepper is within a cascade.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BlastPhase {
    /// No explosion pending; input is accepted.
    Idle,
    /// Exploding orbs are travelling; `displacement` is in world units.
    Animating { displacement: f64 },
    /// Travel finished; the board update is due.
    Resolving,
}

/// Result of advancing the animation by one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BlastTick {
    /// Nothing to animate.
    Idle,
    /// Still travelling. `blast_started` is set on the first frame of a step.
    Animating { displacement: f64, blast_started: bool },
    /// Travel complete; call [`Cascade::resolve`].
    Completed { blast_started: bool },
}

#[derive(Clone, Debug)]
pub struct Cascade {
    phase: BlastPhase,
    critical: Vec<Cell>,
    contributions: BTreeMap<Coord, u32>,
    cell_width: f64,
    blast_time: f64,
    steps: usize,
    /// Set once the current step has reported `blast_started`.
    blast_announced: bool,
}

impl Default for Cascade {
    fn default() -> Self {
        Self::new(CELL_WIDTH, BLAST_TIME)
    }
}

impl Cascade {
    /// A stepper whose orbs cover `cell_width` in `blast_time` seconds.
    pub fn new(cell_width: f64, blast_time: f64) -> Self {
        Self {
            phase: BlastPhase::Idle,
            critical: Vec::new(),
            contributions: BTreeMap::new(),
            cell_width,
            blast_time,
            steps: 0,
            blast_announced: false,
        }
    }

    pub fn phase(&self) -> BlastPhase {
        self.phase
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.phase == BlastPhase::Idle
    }

    /// Current travel distance of exploding orbs (0 when not animating).
    pub fn displacement(&self) -> f64 {
        match self.phase {
            BlastPhase::Animating { displacement } => displacement,
            _ => 0.0,
        }
    }

    /// Critical cells of the current step, sorted by coordinate.
    pub fn critical(&self) -> &[Cell] {
        &self.critical
    }

    pub fn contributions(&self) -> &BTreeMap<Coord, u32> {
        &self.contributions
    }

    /// Steps resolved since the cascade was armed.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Whether `coord` explodes in the current step.
    pub fn is_explosive(&self, coord: Coord) -> bool {
        self.critical.iter().any(|c| c.coord == coord)
    }

    /// Look for critical cells and start animating if there are any.
    ///
    /// Returns `true` if a cascade has started.
    pub fn arm(&mut self, board: &Board) -> bool {
        self.steps = 0;
        self.load(board)
    }

    /// Drop any pending explosion and go idle.
    pub fn clear(&mut self) {
        self.phase = BlastPhase::Idle;
        self.critical.clear();
        self.contributions.clear();
        self.steps = 0;
        self.blast_announced = false;
    }

    /// Advance the animation by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> BlastTick {
        let BlastPhase::Animating { displacement } = self.phase else {
            return match self.phase {
                BlastPhase::Resolving => BlastTick::Completed { blast_started: false },
                _ => BlastTick::Idle,
            };
        };
        let blast_started = !self.blast_announced;
        self.blast_announced = true;
        let displacement = displacement + (self.cell_width / self.blast_time) * dt;
        trace!("blast displacement {displacement:.3}");
        if displacement < self.cell_width {
            self.phase = BlastPhase::Animating { displacement };
            BlastTick::Animating { displacement, blast_started }
        } else {
            self.phase = BlastPhase::Resolving;
            BlastTick::Completed { blast_started }
        }
    }

    /// Apply the completed step to `board`.
    ///
    /// Critical cells are removed together, then every receiving cell gains its
    /// contribution and is taken over by the exploding player. New cells get a
    /// fresh rotation axis from `rng`. Returns the exploding player, or `None`
    /// if no step was due.
    ///
    /// Afterwards the stepper is `Animating` again if the update left new
    /// critical cells, `Idle` otherwise.
    pub fn resolve(&mut self, board: &mut Board, rng: &mut fastrand::Rng) -> Option<PlayerId> {
        if self.phase != BlastPhase::Resolving {
            return None;
        }
        // Every critical cell of a step belongs to the player who set the chain off.
        let owner = self.critical.first()?.owner;

        for cell in &self.critical {
            board.remove(cell.coord);
        }
        for (&coord, &count) in &self.contributions {
            board.add_orbs(coord, owner, count, rng);
        }
        self.steps += 1;
        debug!(
            "blast step {}: {} cells exploded for player {owner}",
            self.steps,
            self.critical.len()
        );

        self.load(board);
        Some(owner)
    }

    /// Unit directions in which an exploding cell's orbs travel.
    ///
    /// Only directions with a receiving neighbor are returned, in east, west,
    /// north, south order. Empty for cells that are not exploding.
    pub fn directions(&self, coord: Coord) -> Vec<Vec3> {
        if !self.is_explosive(coord) {
            return Vec::new();
        }
        let Coord { col, row } = coord;
        let mut v = Vec::with_capacity(4);
        if self.contributions.contains_key(&Coord::new(col + 1, row)) {
            v.push(Vec3::X);
        }
        if col > 0 && self.contributions.contains_key(&Coord::new(col - 1, row)) {
            v.push(Vec3::NEG_X);
        }
        if self.contributions.contains_key(&Coord::new(col, row + 1)) {
            v.push(Vec3::Y);
        }
        if row > 0 && self.contributions.contains_key(&Coord::new(col, row - 1)) {
            v.push(Vec3::NEG_Y);
        }
        v
    }

    fn load(&mut self, board: &Board) -> bool {
        self.critical = detect_critical(board);
        self.contributions = neighbor_contributions(board, &self.critical);
        if self.critical.is_empty() {
            self.phase = BlastPhase::Idle;
            false
        } else {
            self.phase = BlastPhase::Animating { displacement: 0.0 };
            self.blast_announced = false;
            true
        }
    }
}
