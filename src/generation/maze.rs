//! # Maze Generation
//!
//! Randomized depth-first maze carving with difficulty-scaled loop and
//! dead-end passes.
//!
//! The carve pass is the classic recursive backtracker expressed with an
//! explicit frame stack: each frame remembers its own shuffled direction
//! order and how far it has worked through it, so carve order matches the
//! recursive formulation without growing the call stack on large mazes.

use crate::generation::{GenerationConfig, Generator};
use crate::grid::{Direction, Maze, Position};
use crate::pathfinding::corners_connected;
use crate::{WarrenError, WarrenResult};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Attempt budget multiplier for the randomized loop/dead-end passes. Both
/// passes sample cells blindly, so on small or degenerate mazes they can run
/// out of usable candidates before hitting their target count.
const PLACEMENT_ATTEMPT_FACTOR: u32 = 20;

/// Primary maze generator.
///
/// Generates mazes by:
/// 1. Carving a perfect maze (spanning tree) with a randomized depth-first
///    traversal from the origin
/// 2. Injecting difficulty-scaled loops to create alternate routes
/// 3. Adding difficulty-scaled dead-end branches
/// 4. Verifying all four corners are pairwise reachable, regenerating from
///    scratch on failure
///
/// # Examples
///
/// ```
/// use warren::{GenerationConfig, Generator, MazeGenerator};
/// use warren::generation::create_rng;
///
/// let config = GenerationConfig::for_testing(7);
/// let mut rng = create_rng(&config);
/// let maze = MazeGenerator::new().generate(&config, &mut rng).unwrap();
/// assert_eq!(maze.width, 10);
/// ```
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    /// Maximum full regeneration attempts before giving up
    pub max_generation_attempts: u32,
}

/// One in-progress cell of the iterative carve: the cell, its shuffled
/// direction order, and the next direction to try.
struct CarveFrame {
    pos: Position,
    dirs: [Direction; 4],
    next: usize,
}

impl MazeGenerator {
    /// Creates a maze generator with default settings.
    pub fn new() -> Self {
        Self {
            max_generation_attempts: 8,
        }
    }

    /// Carves a perfect maze with an iterative randomized depth-first
    /// traversal starting at the origin.
    ///
    /// Every cell is visited exactly once and connected by exactly one route,
    /// so the maze is fully connected when this returns.
    fn carve(&self, maze: &mut Maze, rng: &mut StdRng) -> WarrenResult<()> {
        let start = Position::origin();
        maze.visit(start);
        let mut stack = vec![CarveFrame {
            pos: start,
            dirs: shuffled_directions(rng),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            if frame.next >= frame.dirs.len() {
                stack.pop();
                continue;
            }
            let pos = frame.pos;
            let dir = frame.dirs[frame.next];
            frame.next += 1;

            let neighbor = pos.step(dir);
            if maze.in_bounds(neighbor) && !maze.is_visited(neighbor) {
                maze.open_wall_between(pos, dir)?;
                maze.visit(neighbor);
                stack.push(CarveFrame {
                    pos: neighbor,
                    dirs: shuffled_directions(rng),
                    next: 0,
                });
            }
        }

        Ok(())
    }

    /// Opens extra wall pairs between already-connected cells, breaking the
    /// spanning-tree property and creating alternate routes.
    fn add_loops(
        &self,
        maze: &mut Maze,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> WarrenResult<()> {
        let target = config.loop_target();
        let mut added = 0;
        let mut attempts = 0;
        while added < target && attempts < target * PLACEMENT_ATTEMPT_FACTOR {
            attempts += 1;
            let pos = random_cell(maze, rng);
            let dir = random_direction(rng);
            let neighbor = pos.step(dir);
            if maze.in_bounds(neighbor) && !maze.is_open(pos, dir) {
                maze.open_wall_between(pos, dir)?;
                added += 1;
            }
        }
        debug!("injected {}/{} loops", added, target);
        Ok(())
    }

    /// Grows dead-end branches off "through" cells.
    ///
    /// A candidate cell must have between `branch_min_openings` and
    /// `branch_max_openings` open walls (a corridor or mild junction, not
    /// already a dead end or a 4-way), and the wall opens toward a neighbor
    /// with exactly one opening so the branch stays a spur instead of merging
    /// into the main flow.
    fn add_dead_ends(
        &self,
        maze: &mut Maze,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> WarrenResult<()> {
        let target = config.dead_end_target();
        let mut added = 0;
        let mut attempts = 0;
        while added < target && attempts < target * PLACEMENT_ATTEMPT_FACTOR {
            attempts += 1;
            let pos = random_cell(maze, rng);
            let openings = maze.opening_count(pos) as u32;
            if openings < config.branch_min_openings || openings > config.branch_max_openings {
                continue;
            }
            for dir in shuffled_directions(rng) {
                let neighbor = pos.step(dir);
                if maze.in_bounds(neighbor)
                    && !maze.is_open(pos, dir)
                    && maze.opening_count(neighbor) == 1
                {
                    maze.open_wall_between(pos, dir)?;
                    added += 1;
                    break;
                }
            }
        }
        debug!("added {}/{} dead-end branches", added, target);
        Ok(())
    }
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<Maze> for MazeGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> WarrenResult<Maze> {
        if config.width == 0 || config.height == 0 {
            return Err(WarrenError::InvalidState(format!(
                "maze dimensions must be nonzero, got {}x{}",
                config.width, config.height
            )));
        }

        for attempt in 1..=self.max_generation_attempts {
            let mut maze = Maze::new(config.width, config.height);
            self.carve(&mut maze, rng)?;
            self.add_loops(&mut maze, config, rng)?;
            self.add_dead_ends(&mut maze, config, rng)?;

            match self.validate(&maze, config) {
                Ok(()) => {
                    maze.clear_visited();
                    debug!(
                        "generated {}x{} maze at difficulty {} (attempt {})",
                        config.width, config.height, config.difficulty, attempt
                    );
                    return Ok(maze);
                }
                // The carve pass connects everything by construction, so this
                // branch only fires if the loop/dead-end passes corrupted the
                // grid. Regenerate rather than ship a broken maze.
                Err(err) => warn!("discarding maze from attempt {}: {}", attempt, err),
            }
        }

        Err(WarrenError::GenerationFailed(format!(
            "no solvable maze after {} attempts",
            self.max_generation_attempts
        )))
    }

    fn validate(&self, content: &Maze, _config: &GenerationConfig) -> WarrenResult<()> {
        if corners_connected(content) {
            Ok(())
        } else {
            Err(WarrenError::InvalidState(
                "maze corners are not pairwise reachable".to_string(),
            ))
        }
    }

    fn generator_type(&self) -> &'static str {
        "maze"
    }
}

fn shuffled_directions(rng: &mut StdRng) -> [Direction; 4] {
    let mut dirs = Direction::ALL;
    dirs.shuffle(rng);
    dirs
}

fn random_direction(rng: &mut StdRng) -> Direction {
    Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
}

fn random_cell(maze: &Maze, rng: &mut StdRng) -> Position {
    Position::new(
        rng.gen_range(0..maze.width as i32),
        rng.gen_range(0..maze.height as i32),
    )
}
