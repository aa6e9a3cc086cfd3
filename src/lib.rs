//! Chain Reaction: the board engine behind a turn-based orb placement game.
//!
//! Players take turns dropping orbs on a grid. A cell that holds as many orbs
//! as it has neighbors explodes, sending one orb to each neighbor and taking
//! those cells over; explosions can set off further explosions. A player left
//! without cells is out, and the last player standing wins.
//!
//! This crate holds the game rules and their frame-driven animation state. A
//! presentation layer supplies frame times, pointer positions, and a
//! [`session::Renderer`], and listens through [`session::GameObserver`].
//!
//! ## Modules
//!
//! - [`constants`] - Board limits, palette, timing
//! - [`coord`] - Board coordinates and the Cantor-pairing key codec
//! - [`config`] - Validated board size and players
//! - [`board`] - Sparse cell store
//! - [`explosion`] - Critical-cell detection and fan-out
//! - [`turn`] - Turn order and elimination
//! - [`cascade`] - Chain-reaction stepper
//! - [`undo`] - Single-level undo
//! - [`camera`] - Camera matrices and pointer picking
//! - [`session`] - The game session used by front ends
//! - [`autoplay`] - Random playouts
//! - [`console`] - Text command interface
//!
//! ## Example
//!
//! ```
//! use chain_reaction::config::GameConfig;
//! use chain_reaction::coord::Coord;
//! use chain_reaction::session::GameSession;
//!
//! let config = GameConfig::new(6, 6, &["red", "blue"]).unwrap();
//! let mut game = GameSession::new(config, 42);
//!
//! game.place(Coord::new(0, 0)).unwrap(); // red
//! game.place(Coord::new(5, 5)).unwrap(); // blue
//! game.place(Coord::new(0, 0)).unwrap(); // red: the corner is now critical
//!
//! // Drive frames until the explosion has played out.
//! while !game.cascade().is_idle() {
//!     game.on_frame_tick(16);
//! }
//! assert!(game.board().get(Coord::new(0, 0)).is_none());
//! assert_eq!(game.board().get(Coord::new(1, 0)).unwrap().owner, 0);
//! ```

pub mod autoplay;
pub mod board;
pub mod camera;
pub mod cascade;
pub mod config;
pub mod console;
pub mod constants;
pub mod coord;
pub mod error;
pub mod explosion;
pub mod session;
pub mod turn;
pub mod undo;
