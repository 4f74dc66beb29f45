//! # Generation Module
//!
//! Procedural maze generation with guaranteed solvability and
//! difficulty-scaled structural complexity.
//!
//! Generation is split into a carve pass that produces a perfect maze
//! (spanning tree, exactly one route between any two cells) and two
//! difficulty-scaled passes that make the maze busier: loop injection breaks
//! the tree with alternate routes, dead-end branching adds exploratory
//! spurs. A final connectivity check guards the solvability contract.

pub mod maze;

pub use maze::MazeGenerator;

use crate::{Maze, WarrenResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural maze generation.
///
/// Difficulty makes the maze *busier*, never bigger: dimensions come from the
/// surrounding level progression, while loop and dead-end counts grow with
/// `difficulty` up to their caps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Maze width in cells
    pub width: u32,
    /// Maze height in cells
    pub height: u32,
    /// Difficulty level (1-based)
    pub difficulty: u32,
    /// Loop count at difficulty 1
    pub base_loops: u32,
    /// Extra loops per difficulty level above 1
    pub loops_per_level: u32,
    /// Hard cap on injected loops
    pub max_loops: u32,
    /// Dead-end branch count at difficulty 1
    pub base_dead_ends: u32,
    /// Extra dead-end branches per difficulty level above 1
    pub dead_ends_per_level: u32,
    /// Hard cap on dead-end branches
    pub max_dead_ends: u32,
    /// Minimum openings for a cell to sprout a dead-end branch
    pub branch_min_openings: u32,
    /// Maximum openings for a cell to sprout a dead-end branch
    pub branch_max_openings: u32,
}

impl GenerationConfig {
    /// Creates a configuration for the given dimensions and difficulty.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(42, 10, 10, 3);
    /// assert_eq!(config.width, 10);
    /// assert!(config.loop_target() >= config.base_loops);
    /// assert!(config.loop_target() <= config.max_loops);
    /// ```
    pub fn new(seed: u64, width: u32, height: u32, difficulty: u32) -> Self {
        Self {
            seed,
            width,
            height,
            difficulty,
            base_loops: 10,
            loops_per_level: 2,
            max_loops: 30,
            base_dead_ends: 5,
            dead_ends_per_level: 1,
            max_dead_ends: 15,
            branch_min_openings: 2,
            branch_max_openings: 3,
        }
    }

    /// Creates a configuration for testing with a small, simple maze.
    pub fn for_testing(seed: u64) -> Self {
        Self::new(seed, 10, 10, 1)
    }

    /// Number of loops to inject, scaled by difficulty and capped.
    pub fn loop_target(&self) -> u32 {
        (self.base_loops + self.loops_per_level * self.difficulty.saturating_sub(1))
            .min(self.max_loops)
    }

    /// Number of dead-end branches to add, scaled by difficulty and capped.
    pub fn dead_end_target(&self) -> u32 {
        (self.base_dead_ends + self.dead_ends_per_level * self.difficulty.saturating_sub(1))
            .min(self.max_dead_ends)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(
            42,
            crate::config::DEFAULT_MAZE_WIDTH,
            crate::config::DEFAULT_MAZE_HEIGHT,
            1,
        )
    }
}

/// Trait for procedural generators.
///
/// All generation in Warren flows through this interface: content comes out
/// of `generate`, and `validate` re-checks an already-built artifact without
/// side effects.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> WarrenResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> WarrenResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Creates a seeded random number generator from the config.
pub fn create_rng(config: &GenerationConfig) -> StdRng {
    StdRng::seed_from_u64(config.seed)
}

/// One-call maze generation: the interface the surrounding game loop uses
/// once per level.
///
/// Solvability is guaranteed on return; structural randomness is fully
/// determined by `seed`.
///
/// # Examples
///
/// ```
/// use warren::{corners_connected, generate_maze};
///
/// let maze = generate_maze(10, 10, 1, 7).unwrap();
/// assert_eq!(maze.width, 10);
/// assert!(corners_connected(&maze));
/// ```
pub fn generate_maze(width: u32, height: u32, difficulty: u32, seed: u64) -> WarrenResult<Maze> {
    let config = GenerationConfig::new(seed, width, height, difficulty);
    let mut rng = create_rng(&config);
    MazeGenerator::new().generate(&config, &mut rng)
}
