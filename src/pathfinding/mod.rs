//! # Pathfinding Module
//!
//! Breadth-first shortest paths over open-wall adjacency.
//!
//! Used for two things: solvability verification after generation, and
//! adversary routing during pursuit. Neighbor expansion follows the fixed
//! [`Direction::ALL`](crate::grid::Direction::ALL) order, so results are
//! deterministic for a given maze.

use crate::grid::{Maze, Position};
use ::pathfinding::prelude::bfs;

/// Finds the shortest open-wall path from `start` to `end`, inclusive of
/// both endpoints.
///
/// Returns an empty vector when no path exists or when either endpoint lies
/// outside the grid; callers treat an empty path as "do not move", never as a
/// fatal condition. `start == end` yields the single-element path.
///
/// # Examples
///
/// ```
/// use warren::{find_path, Direction, Maze, Position};
///
/// let mut maze = Maze::new(2, 1);
/// maze.open_wall_between(Position::origin(), Direction::East).unwrap();
///
/// let path = find_path(&maze, Position::origin(), Position::new(1, 0));
/// assert_eq!(path, vec![Position::new(0, 0), Position::new(1, 0)]);
/// assert_eq!(
///     find_path(&maze, Position::origin(), Position::origin()),
///     vec![Position::origin()]
/// );
/// ```
pub fn find_path(maze: &Maze, start: Position, end: Position) -> Vec<Position> {
    if !maze.in_bounds(start) || !maze.in_bounds(end) {
        return Vec::new();
    }
    if start == end {
        return vec![start];
    }
    bfs(&start, |pos| maze.open_neighbors(*pos), |pos| *pos == end).unwrap_or_default()
}

/// Checks that every pair of the maze's four corners is connected.
///
/// This is the post-generation solvability verifier. It is read-only and
/// idempotent: running it twice on the same maze yields the same answer.
pub fn corners_connected(maze: &Maze) -> bool {
    let corners = maze.corners();
    for (i, from) in corners.iter().enumerate() {
        for to in corners.iter().skip(i + 1) {
            if find_path(maze, *from, *to).is_empty() {
                return false;
            }
        }
    }
    true
}
