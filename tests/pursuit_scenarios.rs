//! Scenario tests for the pursuit controller: armed-delay timing, freeze
//! semantics, capture policy, and run-to-run determinism.

use warren::{
    find_path, generate_maze, Maze, Position, PursuitConfig, PursuitController, PursuitPhase,
};

fn level_maze(seed: u64) -> Maze {
    generate_maze(10, 10, 1, seed).unwrap()
}

#[test]
fn armed_delay_boundary() {
    let maze = level_maze(11);
    let spawn = Position::origin();
    let target = Position::new(9, 9);
    let mut pursuit = PursuitController::new(PursuitConfig::new(), 1, spawn);
    pursuit.arm(5000.0);

    // One millisecond before the delay expires: nothing has happened.
    let update = pursuit.advance(&maze, 4999.0, target, false);
    assert_eq!(update.position, spawn);
    assert_eq!(pursuit.phase(), PursuitPhase::Armed);
    assert!(pursuit.current_path().is_empty());

    // Two more milliseconds: pursuit is live with a computed route.
    let update = pursuit.advance(&maze, 2.0, target, false);
    assert_eq!(update.position, spawn);
    assert_eq!(pursuit.phase(), PursuitPhase::Active);
    assert!(!pursuit.current_path().is_empty());
}

#[test]
fn freeze_preserves_step_accumulator() {
    let maze = level_maze(12);
    let target = Position::new(9, 9);
    let mut pursuit = PursuitController::new(PursuitConfig::new(), 1, Position::origin());
    pursuit.arm(0.0);
    pursuit.advance(&maze, 0.0, target, false);
    assert_eq!(pursuit.phase(), PursuitPhase::Active);

    // Build up 300ms toward the 400ms step, then freeze for 5000ms.
    pursuit.advance(&maze, 300.0, target, false);
    assert_eq!(pursuit.accumulated_ms(), 300.0);
    pursuit.freeze(5000.0);

    // Exactly 5000ms of external time elapses; none of it accumulates.
    let position_before = pursuit.position();
    pursuit.advance(&maze, 2500.0, target, false);
    assert!(pursuit.is_frozen());
    let update = pursuit.advance(&maze, 2500.0, target, false);
    assert!(!pursuit.is_frozen());
    assert_eq!(pursuit.accumulated_ms(), 300.0);
    assert_eq!(update.position, position_before);

    // Thawed: the accumulator picks up where it left off.
    let update = pursuit.advance(&maze, 100.0, target, false);
    assert_ne!(update.position, position_before);
}

#[test]
fn freeze_expiry_leftover_flows_into_stepping() {
    let maze = level_maze(13);
    let target = Position::new(9, 9);
    let mut pursuit = PursuitController::new(PursuitConfig::new(), 1, Position::origin());
    pursuit.arm(0.0);
    pursuit.advance(&maze, 0.0, target, false);

    pursuit.freeze(1000.0);
    // One oversized tick covers the whole freeze plus a full step interval.
    let update = pursuit.advance(&maze, 1400.0, target, false);
    assert!(!pursuit.is_frozen());
    assert_ne!(update.position, Position::origin());
}

#[test]
fn cancel_during_freeze_never_resumes() {
    let maze = level_maze(14);
    let target = Position::new(9, 9);
    let mut pursuit = PursuitController::new(PursuitConfig::new(), 1, Position::origin());
    pursuit.arm(0.0);
    pursuit.advance(&maze, 0.0, target, false);
    pursuit.freeze(5000.0);

    pursuit.cancel();
    assert_eq!(pursuit.phase(), PursuitPhase::Terminal);

    // Long after the freeze would have expired, nothing moves.
    for _ in 0..10 {
        let update = pursuit.advance(&maze, 10_000.0, target, false);
        assert_eq!(update.position, Position::origin());
        assert!(!update.captured_target);
    }
}

#[test]
fn stationary_target_is_eventually_captured_once() {
    let maze = level_maze(15);
    let target = Position::new(9, 9);
    let mut pursuit = PursuitController::new(PursuitConfig::new(), 1, Position::origin());
    pursuit.arm(0.0);

    let mut captures = 0;
    for _ in 0..200 {
        let update = pursuit.advance(&maze, 400.0, target, false);
        if update.captured_target {
            captures += 1;
            assert_eq!(update.position, target);
        }
    }
    assert_eq!(captures, 1);
    assert_eq!(pursuit.position(), target);
}

#[test]
fn pursuit_runs_are_deterministic() {
    let maze = level_maze(16);

    // The target walks a fixed route, one cell every third tick.
    let route = find_path(&maze, Position::new(9, 9), Position::new(0, 9));
    assert!(!route.is_empty());
    let target_at = |tick: usize| route[(tick / 3).min(route.len() - 1)];

    let run = |maze: &Maze| -> Vec<Position> {
        let mut pursuit = PursuitController::new(PursuitConfig::new(), 2, Position::new(9, 9));
        pursuit.arm(1000.0);
        (0..150)
            .map(|tick| pursuit.advance(maze, 120.0, target_at(tick), false).position)
            .collect()
    };

    assert_eq!(run(&maze), run(&maze));
}

#[test]
fn adversary_only_crosses_open_walls() {
    let maze = level_maze(17);
    let target = Position::new(9, 0);
    let mut pursuit = PursuitController::new(PursuitConfig::new(), 3, Position::new(0, 9));
    pursuit.arm(0.0);

    let mut previous = pursuit.position();
    for _ in 0..300 {
        let update = pursuit.advance(&maze, 90.0, target, false);
        if update.position != previous {
            assert!(
                maze.open_neighbors(previous).contains(&update.position),
                "adversary crossed a wall from {:?} to {:?}",
                previous,
                update.position
            );
            previous = update.position;
        }
    }
}
