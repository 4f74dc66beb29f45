//! # Grid Module
//!
//! The shared addressable space of wall-bounded cells that maze generation,
//! pathfinding, and pursuit all operate on.
//!
//! A [`Maze`] is a fixed-size rectangular collection of [`Cell`]s, one per
//! coordinate. Each cell tracks four wall flags, but walls are logically
//! shared between neighbors: the only way to open one is
//! [`Maze::open_wall_between`], which updates both sides in a single
//! operation so the two flags can never disagree.

use crate::{WarrenError, WarrenResult};
use serde::{Deserialize, Serialize};

/// Represents a 2D grid coordinate.
///
/// # Examples
///
/// ```
/// use warren::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// assert_eq!(pos.cardinal_adjacent_positions().len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    /// Returns the position one cell away in the given direction.
    pub fn step(self, direction: Direction) -> Position {
        self + direction.to_delta()
    }

    /// Returns the 4 cardinal adjacent positions.
    pub fn cardinal_adjacent_positions(self) -> Vec<Position> {
        Direction::ALL.iter().map(|dir| self.step(*dir)).collect()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Compass directions across the 4-connected maze grid.
///
/// `ALL` fixes the neighbor expansion order used everywhere in the crate, so
/// pathfinding and pursuit are deterministic for a given maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four directions in fixed expansion order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::{Direction, Position};
    ///
    /// assert_eq!(Direction::North.to_delta(), Position::new(0, -1));
    /// assert_eq!(Direction::East.to_delta(), Position::new(1, 0));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::East => Position::new(1, 0),
            Direction::South => Position::new(0, 1),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Returns the opposing direction.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    fn wall_index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }
}

/// A single maze cell: four wall flags plus a transient visited marker used
/// only during carving.
///
/// Wall flags are read-only from outside the grid module; mutation goes
/// through [`Maze::open_wall_between`] so paired flags stay consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    walls: [bool; 4],
    visited: bool,
}

impl Cell {
    fn closed() -> Self {
        Self {
            walls: [true; 4],
            visited: false,
        }
    }

    /// Whether the wall in the given direction is open (carved away).
    pub fn is_open(&self, direction: Direction) -> bool {
        !self.walls[direction.wall_index()]
    }

    /// Number of open walls on this cell.
    pub fn opening_count(&self) -> usize {
        self.walls.iter().filter(|closed| !**closed).count()
    }

    /// Whether the carve pass has visited this cell.
    pub fn is_visited(&self) -> bool {
        self.visited
    }
}

/// A fixed-size rectangular maze, addressable in O(1) by coordinate.
///
/// Allocated fresh per level and fully rebuilt on regeneration; post
/// generation the maze is fully connected (see
/// [`corners_connected`](crate::pathfinding::corners_connected)).
///
/// # Examples
///
/// ```
/// use warren::{Direction, Maze, Position};
///
/// let mut maze = Maze::new(3, 3);
/// let a = Position::origin();
/// let b = maze.open_wall_between(a, Direction::East).unwrap();
/// assert_eq!(b, Position::new(1, 0));
/// assert!(maze.is_open(a, Direction::East));
/// assert!(maze.is_open(b, Direction::West));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    /// Width in cells
    pub width: u32,
    /// Height in cells
    pub height: u32,
    cells: Vec<Cell>,
}

impl Maze {
    /// Creates a maze with every wall closed and every cell unvisited.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::closed(); (width * height) as usize],
        }
    }

    /// Checks whether a position lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: Position) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Gets the cell at a position, or `None` when out of bounds.
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.cells.get(idx)
        } else {
            None
        }
    }

    /// Opens the wall pair between a cell and its neighbor in `direction`.
    ///
    /// Both wall flags are updated inside this single operation, which is what
    /// upholds the symmetry invariant: there is no way to open one side only.
    /// Returns the neighbor's position, or an error when either side falls
    /// outside the grid (boundary walls can never be opened).
    pub fn open_wall_between(
        &mut self,
        pos: Position,
        direction: Direction,
    ) -> WarrenResult<Position> {
        if !self.in_bounds(pos) {
            return Err(WarrenError::OutOfBounds(pos.x, pos.y));
        }
        let neighbor = pos.step(direction);
        if !self.in_bounds(neighbor) {
            return Err(WarrenError::OutOfBounds(neighbor.x, neighbor.y));
        }

        let here = self.index(pos);
        let there = self.index(neighbor);
        self.cells[here].walls[direction.wall_index()] = false;
        self.cells[there].walls[direction.opposite().wall_index()] = false;
        Ok(neighbor)
    }

    /// Whether the wall from `pos` toward `direction` is open.
    ///
    /// Out-of-bounds positions report `false` rather than erroring, since a
    /// nonexistent cell has no openings.
    pub fn is_open(&self, pos: Position, direction: Direction) -> bool {
        self.cell(pos).map_or(false, |cell| cell.is_open(direction))
    }

    /// Number of open walls on the cell at `pos` (0 when out of bounds).
    pub fn opening_count(&self, pos: Position) -> usize {
        self.cell(pos).map_or(0, Cell::opening_count)
    }

    /// All neighbors reachable from `pos` through an open wall, in the fixed
    /// [`Direction::ALL`] order.
    pub fn open_neighbors(&self, pos: Position) -> Vec<Position> {
        Direction::ALL
            .iter()
            .filter(|dir| self.is_open(pos, **dir))
            .map(|dir| pos.step(*dir))
            .filter(|neighbor| self.in_bounds(*neighbor))
            .collect()
    }

    /// The four corner positions of the grid.
    pub fn corners(&self) -> [Position; 4] {
        let right = self.width as i32 - 1;
        let bottom = self.height as i32 - 1;
        [
            Position::new(0, 0),
            Position::new(right, 0),
            Position::new(0, bottom),
            Position::new(right, bottom),
        ]
    }

    pub(crate) fn visit(&mut self, pos: Position) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.cells[idx].visited = true;
        }
    }

    /// Whether the carve pass has visited `pos`.
    pub fn is_visited(&self, pos: Position) -> bool {
        self.cell(pos).map_or(false, Cell::is_visited)
    }

    /// Resets every transient visited flag. Called once generation finishes so
    /// the flag never leaks into gameplay state.
    pub fn clear_visited(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
        }
    }

    /// Renders the maze as an ASCII diagram for logs and test failures.
    ///
    /// Walls draw as `-` and `|`; open walls leave gaps. This is a diagnostic
    /// dump, not game rendering.
    pub fn render_ascii(&self) -> String {
        let mut out = String::new();
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                out.push('+');
                if self.is_open(Position::new(x, y), Direction::North) {
                    out.push_str("  ");
                } else {
                    out.push_str("--");
                }
            }
            out.push_str("+\n");
            for x in 0..self.width as i32 {
                if self.is_open(Position::new(x, y), Direction::West) {
                    out.push(' ');
                } else {
                    out.push('|');
                }
                out.push_str("  ");
            }
            out.push_str("|\n");
        }
        for _ in 0..self.width {
            out.push_str("+--");
        }
        out.push_str("+\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
        assert_eq!(pos1 - pos2, Position::new(2, 8));
    }

    #[test]
    fn test_position_step() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.step(Direction::North), Position::new(5, 4));
        assert_eq!(pos.step(Direction::East), Position::new(6, 5));
        assert_eq!(pos.step(Direction::South), Position::new(5, 6));
        assert_eq!(pos.step(Direction::West), Position::new(4, 5));
    }

    #[test]
    fn test_direction_opposites() {
        for dir in Direction::ALL {
            assert_ne!(dir, dir.opposite());
            assert_eq!(dir, dir.opposite().opposite());
            assert_eq!(
                Position::origin(),
                dir.to_delta() + dir.opposite().to_delta()
            );
        }
    }

    #[test]
    fn test_new_maze_fully_closed() {
        let maze = Maze::new(4, 3);
        for y in 0..3 {
            for x in 0..4 {
                let pos = Position::new(x, y);
                assert_eq!(maze.opening_count(pos), 0);
                assert!(maze.open_neighbors(pos).is_empty());
                assert!(!maze.is_visited(pos));
            }
        }
    }

    #[test]
    fn test_open_wall_updates_both_sides() {
        let mut maze = Maze::new(3, 3);
        let a = Position::new(1, 1);
        let b = maze.open_wall_between(a, Direction::South).unwrap();

        assert_eq!(b, Position::new(1, 2));
        assert!(maze.is_open(a, Direction::South));
        assert!(maze.is_open(b, Direction::North));
        assert_eq!(maze.opening_count(a), 1);
        assert_eq!(maze.opening_count(b), 1);
        assert_eq!(maze.open_neighbors(a), vec![b]);
    }

    #[test]
    fn test_open_wall_rejects_boundary() {
        let mut maze = Maze::new(2, 2);
        let corner = Position::origin();
        assert!(maze.open_wall_between(corner, Direction::North).is_err());
        assert!(maze.open_wall_between(corner, Direction::West).is_err());
        assert!(maze
            .open_wall_between(Position::new(5, 5), Direction::East)
            .is_err());
        // Failed opens must not leave a dangling half-open wall.
        assert_eq!(maze.opening_count(corner), 0);
    }

    #[test]
    fn test_out_of_bounds_queries_are_empty() {
        let maze = Maze::new(2, 2);
        let outside = Position::new(-1, 7);
        assert!(maze.cell(outside).is_none());
        assert!(!maze.is_open(outside, Direction::North));
        assert_eq!(maze.opening_count(outside), 0);
        assert!(maze.open_neighbors(outside).is_empty());
    }

    #[test]
    fn test_corners() {
        let maze = Maze::new(10, 6);
        assert_eq!(
            maze.corners(),
            [
                Position::new(0, 0),
                Position::new(9, 0),
                Position::new(0, 5),
                Position::new(9, 5),
            ]
        );
    }

    #[test]
    fn test_clear_visited() {
        let mut maze = Maze::new(2, 2);
        maze.visit(Position::origin());
        assert!(maze.is_visited(Position::origin()));
        maze.clear_visited();
        assert!(!maze.is_visited(Position::origin()));
    }

    #[test]
    fn test_maze_serde_roundtrip() {
        let mut maze = Maze::new(3, 2);
        maze.open_wall_between(Position::origin(), Direction::East)
            .unwrap();
        let json = serde_json::to_string(&maze).unwrap();
        let restored: Maze = serde_json::from_str(&json).unwrap();
        assert_eq!(maze, restored);
    }

    #[test]
    fn test_render_ascii_shape() {
        let maze = Maze::new(3, 2);
        let art = maze.render_ascii();
        // 2 lines per row plus the closing border line.
        assert_eq!(art.lines().count(), 5);
        assert!(art.lines().all(|line| line.len() == 3 * 3 + 1));
    }
}
