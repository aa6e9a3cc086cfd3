//! Constants for board limits, the player palette, animation timing, and camera setup.
//!
//! Board dimensions are chosen at runtime (see [`crate::config::GameConfig`]),
//! but every dimension must fall inside `MIN_DIM..=MAX_DIM`.

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest allowed number of rows or columns.
pub const MIN_DIM: usize = 6;

/// Largest allowed number of rows or columns.
pub const MAX_DIM: usize = 10;

/// Rows used when no configuration is given.
pub const DEFAULT_ROWS: usize = 8;

/// Columns used when no configuration is given.
pub const DEFAULT_COLS: usize = 6;

/// Width of one board cell in world units.
pub const CELL_WIDTH: f64 = 20.0;

// =============================================================================
// Players
// =============================================================================

/// Minimum number of players in a game.
pub const MIN_PLAYERS: usize = 2;

/// Maximum number of players in a game.
pub const MAX_PLAYERS: usize = 8;

/// Selectable player colors, lowercase.
pub const PALETTE: [&str; 14] = [
    "red", "blue", "green", "yellow", "cyan", "purple", "violet", "pink", "orange", "green 1",
    "brown", "maroon", "green 2", "grey",
];

/// Players used when no configuration is given.
pub const DEFAULT_PLAYERS: [&str; 2] = ["red", "blue"];

// =============================================================================
// Animation Timing
// =============================================================================

/// Seconds needed for exploding orbs to travel one cell width.
pub const BLAST_TIME: f64 = 0.22;

/// Idle spin of every orb, in degrees per second.
pub const ROTATION_SPEED: f64 = 2.0;

/// Sampling ranges `[lo, hi)` for the x, y and z components of an orb's rotation axis.
pub const AXIS_RANGES: [(f32, f32); 3] = [(-1.0, 1.0), (-3.0, 3.0), (-4.0, 4.0)];

// =============================================================================
// Camera
// =============================================================================

/// Camera eye position in world space.
pub const CAMERA_POSITION: [f32; 3] = [0.0, 0.0, 300.0];

/// Point the camera looks at.
pub const CAMERA_TARGET: [f32; 3] = [0.0, 0.0, 0.0];

/// Camera up vector.
pub const CAMERA_UP: [f32; 3] = [0.0, 1.0, 0.0];

/// Canvas size (width, height) in pixels before the presentation layer reports one.
pub const DEFAULT_CANVAS: (u32, u32) = (510, 680);
