//! # Warren
//!
//! The procedural-generation and pursuit-AI core of a grid-based maze escape
//! game.
//!
//! ## Architecture Overview
//!
//! Warren is the algorithmic heart of the game; rendering, audio, and input
//! are external collaborators that consume its outputs. The core revolves
//! around four pieces:
//!
//! - **Grid Model**: wall-bounded cells addressable by coordinate, with wall
//!   pairs kept consistent by construction
//! - **Maze Generation**: randomized depth-first carving plus difficulty-scaled
//!   loops and dead-end branches, with guaranteed solvability
//! - **Pathfinding**: breadth-first shortest paths over open-wall adjacency
//! - **Pursuit**: an adversary advanced step-by-step along a periodically
//!   refreshed shortest path toward a moving target
//!
//! All generation randomness flows through an injected, seedable RNG so levels
//! can be replayed deterministically.

pub mod generation;
pub mod grid;
pub mod pathfinding;
pub mod pursuit;

pub use crate::generation::{generate_maze, GenerationConfig, Generator, MazeGenerator};
pub use crate::grid::{Cell, Direction, Maze, Position};
pub use crate::pathfinding::{corners_connected, find_path};
pub use crate::pursuit::{PursuitConfig, PursuitController, PursuitPhase, PursuitUpdate};

/// Core error type for the Warren engine.
#[derive(thiserror::Error, Debug)]
pub enum WarrenError {
    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Maze generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// A coordinate outside the maze was used where a valid cell is required
    #[error("Position ({0}, {1}) is out of bounds")]
    OutOfBounds(i32, i32),
}

/// Result type used throughout the Warren codebase.
pub type WarrenResult<T> = Result<T, WarrenError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default maze width in cells
    pub const DEFAULT_MAZE_WIDTH: u32 = 20;

    /// Default maze height in cells
    pub const DEFAULT_MAZE_HEIGHT: u32 = 20;

    /// Largest maze dimension the game ever requests
    pub const MAX_MAZE_DIMENSION: u32 = 40;

    /// Adversary step interval at level 1, in milliseconds
    pub const BASE_STEP_INTERVAL_MS: f64 = 400.0;

    /// Per-level multiplier applied to the step interval
    pub const SPEEDUP_PER_LEVEL: f64 = 0.8;

    /// Floor on the step interval so pursuit stays resolvable per tick
    pub const MIN_STEP_INTERVAL_MS: f64 = 50.0;

    /// Warm-up window before pursuit begins each level, in milliseconds
    pub const ARMED_DELAY_MS: f64 = 5000.0;
}
