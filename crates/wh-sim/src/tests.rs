//! Integration tests for wh-sim.

use wh_core::{Cell, Coord, Direction, Grid, RobotId, SimRng, WarehouseConfig, WhError};

use crate::{Action, Layout, Robot, Sim, SimBuilder, SimError, SimObserver, SnapshotRecorder, StepSummary};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn cfg(width: u32, height: u32, total_boxes: u32, num_robots: u32, seed: u64) -> WarehouseConfig {
    WarehouseConfig { width, height, total_boxes, num_robots, seed }
}

fn scripted(width: u32, height: u32, layout: Layout) -> Sim {
    SimBuilder::new(cfg(width, height, 0, 0, 7))
        .layout(layout)
        .build()
        .unwrap()
}

/// Every in-bounds neighbour of some rack is a loose box.  A robot carrying
/// a different box can then never reach that rack.
fn rack_walled_in(sim: &Sim) -> bool {
    let grid = sim.grid();
    grid.iter().filter(|&(_, c)| c.is_rack()).any(|(at, _)| {
        Direction::SCAN_ORDER
            .into_iter()
            .filter_map(|d| grid.neighbour(at, d))
            .all(|n| grid.get(n) == Cell::Box)
    })
}

/// A floor with a robot marker at `at`, for driving `Robot::act` directly.
fn floor_with_robot(width: u32, height: u32, at: Coord) -> Grid {
    let mut grid = Grid::new(width, height);
    grid.set(at, Cell::Robot);
    grid
}

// ── Robot decision procedure ──────────────────────────────────────────────────

#[cfg(test)]
mod robot_tests {
    use super::*;

    #[test]
    fn idle_robot_prefers_east_box() {
        let here = Coord::new(2, 2);
        let mut grid = floor_with_robot(5, 5, here);
        for dir in Direction::SCAN_ORDER {
            grid.set(here.step(dir).unwrap(), Cell::Box);
        }
        let mut robot = Robot::new(RobotId(0), here);

        let action = robot.act(&mut grid, &mut SimRng::new(1));

        assert_eq!(action, Action::PickedUp { from: Coord::new(3, 2) });
        assert!(robot.carrying());
        assert_eq!(robot.position(), here, "pickup consumes the turn");
        assert_eq!(grid.get(Coord::new(3, 2)), Cell::Empty);
        assert_eq!(grid.count(|c| c == Cell::Box), 3);
    }

    #[test]
    fn idle_robot_scans_west_before_north() {
        let here = Coord::new(2, 2);
        let mut grid = floor_with_robot(5, 5, here);
        grid.set(Coord::new(2, 3), Cell::Box); // north
        grid.set(Coord::new(1, 2), Cell::Box); // west
        let mut robot = Robot::new(RobotId(0), here);

        let action = robot.act(&mut grid, &mut SimRng::new(1));

        assert_eq!(action, Action::PickedUp { from: Coord::new(1, 2) });
        assert_eq!(grid.get(Coord::new(2, 3)), Cell::Box);
    }

    #[test]
    fn idle_robot_scans_north_before_south() {
        let here = Coord::new(2, 2);
        let mut grid = floor_with_robot(5, 5, here);
        grid.set(Coord::new(2, 1), Cell::Box); // south
        grid.set(Coord::new(2, 3), Cell::Box); // north
        let mut robot = Robot::new(RobotId(0), here);

        assert_eq!(
            robot.act(&mut grid, &mut SimRng::new(1)),
            Action::PickedUp { from: Coord::new(2, 3) }
        );
    }

    #[test]
    fn carrying_robot_drops_on_first_rack_with_room() {
        let here = Coord::new(2, 2);
        let mut grid = floor_with_robot(5, 5, here);
        grid.set(Coord::new(3, 2), Cell::Rack { stored: 4 }); // east, full
        grid.set(Coord::new(1, 2), Cell::Rack { stored: 2 }); // west
        grid.set(Coord::new(2, 3), Cell::EMPTY_RACK);         // north
        let mut robot = Robot::new(RobotId(0), here).loaded();

        let action = robot.act(&mut grid, &mut SimRng::new(1));

        let stored = Cell::Rack { stored: 3 };
        assert_eq!(action, Action::Dropped { at: Coord::new(1, 2), rack: stored });
        assert_eq!(grid.get(Coord::new(1, 2)).code(), 4);
        assert_eq!(grid.get(Coord::new(3, 2)).code(), 5);
        assert_eq!(grid.get(Coord::new(2, 3)).code(), -1);
        assert!(!robot.carrying());
        assert_eq!(robot.position(), here);
    }

    #[test]
    fn empty_rack_becomes_two() {
        let here = Coord::new(0, 0);
        let mut grid = floor_with_robot(2, 1, here);
        grid.set(Coord::new(1, 0), Cell::EMPTY_RACK);
        let mut robot = Robot::new(RobotId(0), here).loaded();

        robot.act(&mut grid, &mut SimRng::new(1));

        assert_eq!(grid.get(Coord::new(1, 0)).code(), 2);
    }

    #[test]
    fn partial_rack_ahead_in_scan_order_beats_empty_rack() {
        let here = Coord::new(2, 2);
        let mut grid = floor_with_robot(5, 5, here);
        grid.set(Coord::new(3, 2), Cell::Rack { stored: 1 }); // east, code 2
        grid.set(Coord::new(1, 2), Cell::EMPTY_RACK);         // west
        let mut robot = Robot::new(RobotId(0), here).loaded();

        let action = robot.act(&mut grid, &mut SimRng::new(1));

        assert_eq!(
            action,
            Action::Dropped { at: Coord::new(3, 2), rack: Cell::Rack { stored: 2 } }
        );
        assert_eq!(grid.get(Coord::new(3, 2)).code(), 3);
        assert_eq!(grid.get(Coord::new(1, 2)).code(), -1);
    }

    #[test]
    fn carrying_robot_ignores_loose_boxes() {
        // 2x1 corridor: the only neighbour is a box, every move is blocked.
        let here = Coord::new(0, 0);
        let mut grid = floor_with_robot(2, 1, here);
        grid.set(Coord::new(1, 0), Cell::Box);
        let mut robot = Robot::new(RobotId(0), here).loaded();
        let mut rng = SimRng::new(3);

        for _ in 0..20 {
            assert!(matches!(robot.act(&mut grid, &mut rng), Action::Blocked { .. }));
        }
        assert!(robot.carrying());
        assert_eq!(grid.get(Coord::new(1, 0)), Cell::Box);
    }

    #[test]
    fn idle_robot_ignores_racks() {
        let here = Coord::new(0, 0);
        let mut grid = floor_with_robot(2, 1, here);
        grid.set(Coord::new(1, 0), Cell::EMPTY_RACK);
        let mut robot = Robot::new(RobotId(0), here);
        let mut rng = SimRng::new(3);

        for _ in 0..20 {
            assert!(matches!(robot.act(&mut grid, &mut rng), Action::Blocked { .. }));
        }
        assert!(!robot.carrying());
        assert_eq!(grid.get(Coord::new(1, 0)), Cell::EMPTY_RACK);
    }

    #[test]
    fn blocked_move_leaves_everything_in_place() {
        // Loaded robot boxed in by other robots: no pickup, no drop, no move.
        let here = Coord::new(1, 1);
        let mut grid = floor_with_robot(3, 3, here);
        for dir in Direction::SCAN_ORDER {
            grid.set(here.step(dir).unwrap(), Cell::Robot);
        }
        let before = grid.clone();
        let mut robot = Robot::new(RobotId(0), here).loaded();
        let mut rng = SimRng::new(9);

        for _ in 0..50 {
            assert!(matches!(robot.act(&mut grid, &mut rng), Action::Blocked { .. }));
            assert_eq!(robot.position(), here);
        }
        assert_eq!(grid, before);
    }

    #[test]
    fn move_clears_old_cell_and_marks_new_one() {
        let here = Coord::new(0, 0);
        let mut grid = floor_with_robot(2, 1, here);
        let mut robot = Robot::new(RobotId(0), here);
        let mut rng = SimRng::new(5);

        let moved = (0..1_000)
            .map(|_| robot.act(&mut grid, &mut rng))
            .find(|a| matches!(a, Action::Moved { .. }));

        assert_eq!(moved, Some(Action::Moved { from: here, to: Coord::new(1, 0) }));
        assert_eq!(robot.position(), Coord::new(1, 0));
        assert_eq!(grid.get(here), Cell::Empty);
        assert_eq!(grid.get(Coord::new(1, 0)), Cell::Robot);
    }
}

// ── Scene initialisation ──────────────────────────────────────────────────────

#[cfg(test)]
mod scene_tests {
    use super::*;

    #[test]
    fn random_scene_has_expected_counts() {
        let sim = Sim::new(cfg(10, 10, 23, 6, 3)).unwrap();
        let grid = sim.grid();

        assert_eq!(sim.racks_needed(), 5);
        assert_eq!(sim.boxes_remaining(), 18);
        assert_eq!(sim.total_boxes(), 23);
        assert_eq!(grid.count(|c| c == Cell::EMPTY_RACK), 5);
        assert_eq!(grid.count(|c| c == Cell::Box), 18);
        assert_eq!(grid.count(|c| c == Cell::Robot), 6);
        assert_eq!(sim.moves_made(), 0);
        sim.check_invariants().unwrap();
    }

    #[test]
    fn robot_ids_follow_placement_order() {
        let sim = Sim::new(cfg(8, 8, 10, 5, 21)).unwrap();
        for (i, robot) in sim.robots().iter().enumerate() {
            assert_eq!(robot.id(), RobotId(i as u32));
            assert!(!robot.carrying());
            assert_eq!(sim.grid().get(robot.position()), Cell::Robot);
            assert_eq!(sim.robot(robot.id()), Some(robot));
        }
        assert_eq!(sim.robot(RobotId(5)), None);
    }

    #[test]
    fn exactly_full_floor_terminates() {
        // 1 rack + 4 boxes + 4 robots on 9 cells.
        let sim = Sim::new(cfg(3, 3, 5, 4, 0)).unwrap();
        assert_eq!(sim.grid().count(Cell::is_empty), 0);
        sim.check_invariants().unwrap();
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            Sim::new(cfg(0, 4, 1, 1, 0)),
            Err(SimError::Core(WhError::InvalidConfiguration(_)))
        ));
    }

    #[test]
    fn overfull_scene_rejected() {
        // 1 rack + 3 boxes + 1 robot = 5 cells on a 2x2 floor.
        assert!(matches!(
            Sim::new(cfg(2, 2, 4, 1, 0)),
            Err(SimError::Core(WhError::InvalidConfiguration(_)))
        ));
    }

    #[test]
    fn layout_places_exactly_what_it_lists() {
        let sim = scripted(
            4,
            4,
            Layout::new()
                .rack((0, 0))
                .rack((3, 3))
                .loose_box((1, 1))
                .robot((2, 2))
                .robot((0, 3)),
        );
        let grid = sim.grid();
        assert_eq!(grid.get(Coord::new(0, 0)), Cell::EMPTY_RACK);
        assert_eq!(grid.get(Coord::new(3, 3)), Cell::EMPTY_RACK);
        assert_eq!(grid.get(Coord::new(1, 1)), Cell::Box);
        assert_eq!(sim.robots()[0].position(), Coord::new(2, 2));
        assert_eq!(sim.robots()[1].position(), Coord::new(0, 3));
        assert_eq!(sim.racks_needed(), 2);
        assert_eq!(sim.boxes_remaining(), 1);
        assert_eq!(sim.total_boxes(), 3);
        sim.check_invariants().unwrap();
    }

    #[test]
    fn layout_out_of_bounds_rejected() {
        let result = SimBuilder::new(cfg(3, 3, 0, 0, 0))
            .layout(Layout::new().robot((3, 0)))
            .build();
        assert!(matches!(result, Err(SimError::Core(WhError::InvalidLayout(_)))));
    }

    #[test]
    fn layout_overlap_rejected() {
        let result = SimBuilder::new(cfg(3, 3, 0, 0, 0))
            .layout(Layout::new().rack((1, 1)).robot((1, 1)))
            .build();
        assert!(matches!(result, Err(SimError::Core(WhError::InvalidLayout(_)))));
    }

    #[test]
    fn layout_on_empty_floor_rejected() {
        let result = SimBuilder::new(cfg(0, 3, 0, 0, 0)).layout(Layout::new()).build();
        assert!(matches!(
            result,
            Err(SimError::Core(WhError::InvalidConfiguration(_)))
        ));
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn scenario_a_single_robot_racks_three_boxes() {
        let mut checked = 0;
        for seed in 0..20 {
            let mut sim = Sim::new(cfg(5, 5, 4, 1, seed)).unwrap();
            assert_eq!(sim.racks_needed(), 1);
            assert_eq!(sim.boxes_remaining(), 3);
            if rack_walled_in(&sim) {
                continue;
            }
            checked += 1;

            while !sim.is_complete() && sim.steps_taken() < 200_000 {
                sim.step();
            }

            assert!(sim.is_complete(), "seed {seed}: {} boxes left", sim.boxes_remaining());
            let racks: Vec<Cell> = sim.grid().iter().map(|(_, c)| c).filter(|c| c.is_rack()).collect();
            assert_eq!(racks, [Cell::Rack { stored: 3 }], "seed {seed}");
            assert_eq!(racks[0].code(), 4);
            sim.check_invariants().unwrap();
        }
        assert!(checked > 0);
    }

    #[test]
    fn scenario_b_no_boxes_is_complete_immediately() {
        let mut sim = Sim::new(cfg(5, 5, 0, 2, 1)).unwrap();
        assert_eq!(sim.racks_needed(), 0);
        assert_eq!(sim.boxes_remaining(), 0);
        assert!(sim.is_complete());

        for _ in 0..200 {
            let s = sim.step();
            assert_eq!(s.pickups, 0);
            assert_eq!(s.drop_offs, 0);
        }
        assert!(sim.is_complete());
        assert!(sim.robots().iter().all(|r| !r.carrying()));
    }

    #[test]
    fn scenario_c_no_robots_never_changes() {
        let mut sim = Sim::new(cfg(5, 5, 4, 0, 1)).unwrap();
        assert!(sim.robots().is_empty());
        let before = sim.snapshot();

        for _ in 0..100 {
            assert_eq!(
                sim.step(),
                StepSummary {
                    step: sim.steps_taken() - 1,
                    boxes_remaining: 3,
                    ..StepSummary::default()
                }
            );
        }
        assert_eq!(sim.snapshot(), before);
        assert_eq!(sim.boxes_remaining(), 3);
        assert_eq!(sim.moves_made(), 0);
        assert_eq!(sim.steps_taken(), 100);
    }

    #[test]
    fn scenario_d_pickup_takes_priority_and_drop_waits() {
        // Box to the east, empty rack to the west.
        let mut sim = scripted(
            5,
            5,
            Layout::new().loose_box((3, 2)).rack((1, 2)).robot((2, 2)),
        );

        let first = sim.step();
        assert_eq!((first.pickups, first.drop_offs, first.moves), (1, 0, 0));
        assert!(sim.robots()[0].carrying());
        assert_eq!(sim.grid().get(Coord::new(3, 2)), Cell::Empty);
        assert_eq!(sim.grid().get(Coord::new(1, 2)).code(), -1);
        assert_eq!(sim.boxes_remaining(), 1);

        let second = sim.step();
        assert_eq!((second.pickups, second.drop_offs, second.moves), (0, 1, 0));
        assert!(!sim.robots()[0].carrying());
        assert_eq!(sim.grid().get(Coord::new(1, 2)).code(), 2);
        assert_eq!(sim.boxes_remaining(), 0);
        assert!(sim.is_complete());
        assert_eq!(sim.moves_made(), 0);
        assert_eq!(sim.robots()[0].position(), Coord::new(2, 2));
    }

    #[test]
    fn rack_stops_at_four_boxes() {
        let mut sim = scripted(
            6,
            6,
            Layout::new()
                .rack((3, 3))
                .loose_box((0, 0))
                .loose_box((5, 0))
                .loose_box((0, 5))
                .loose_box((5, 5))
                .loose_box((0, 2))
                .robot((1, 1)),
        );
        assert_eq!(sim.boxes_remaining(), 5);

        while sim.boxes_racked() < 4 && sim.steps_taken() < 500_000 {
            sim.step();
        }
        assert_eq!(sim.boxes_racked(), 4);
        assert_eq!(sim.grid().get(Coord::new(3, 3)).code(), 5);

        sim.run_steps(2_000, &mut crate::NoopObserver);
        assert_eq!(sim.boxes_racked(), 4, "a full rack takes no fifth box");
        assert_eq!(sim.boxes_remaining(), 1);
        assert!(!sim.is_complete());
        assert_eq!(sim.grid().get(Coord::new(3, 3)).code(), 5);
        sim.check_invariants().unwrap();
    }

    #[test]
    fn invariants_hold_every_step() {
        let mut sim = Sim::new(cfg(12, 9, 30, 8, 11)).unwrap();
        let robots = sim.robots().len() as u32;
        let mut last_remaining = sim.boxes_remaining();
        let mut last_moves = sim.moves_made();

        for _ in 0..2_000 {
            let s = sim.step();
            sim.check_invariants().unwrap();

            assert!(s.boxes_remaining <= last_remaining, "boxes_remaining went up");
            assert_eq!(s.moves_made - last_moves, s.moves as u64);
            assert_eq!(last_remaining - s.boxes_remaining, s.drop_offs);
            assert_eq!(s.moves + s.pickups + s.drop_offs + s.blocked, robots);
            assert!(
                sim.snapshot()
                    .codes
                    .iter()
                    .all(|c| matches!(c, -1..=5 | 7)),
                "unexpected cell code"
            );
            last_remaining = s.boxes_remaining;
            last_moves = s.moves_made;
        }
        assert_eq!(sim.boxes_remaining() + sim.boxes_racked(), 24);
    }

    #[test]
    fn same_seed_same_trace() {
        let run = |seed| {
            let mut sim = Sim::new(cfg(9, 7, 17, 4, seed)).unwrap();
            let mut rec = SnapshotRecorder::new();
            sim.run_steps(300, &mut rec);
            sim.finish(&mut rec);
            (rec.into_frames(), sim.moves_made(), sim.boxes_remaining())
        };
        let a = run(5);
        let b = run(5);
        assert_eq!(a.0.len(), 301);
        assert_eq!(a, b);
    }

    #[test]
    fn earlier_robots_writes_are_visible_to_later_robots() {
        // Both robots are adjacent to the same box; robot 0 acts first.
        let mut sim = scripted(3, 1, Layout::new().robot((0, 0)).loose_box((1, 0)).robot((2, 0)));

        let s = sim.step();

        assert_eq!(s.pickups, 1);
        assert!(sim.robots()[0].carrying());
        assert!(!sim.robots()[1].carrying());
        sim.check_invariants().unwrap();
    }

    #[test]
    fn roster_order_decides_who_gets_the_box() {
        let mut sim = scripted(3, 1, Layout::new().robot((2, 0)).loose_box((1, 0)).robot((0, 0)));

        sim.step();

        assert_eq!(sim.robots()[0].position(), Coord::new(2, 0));
        assert!(sim.robots()[0].carrying());
        assert!(!sim.robots()[1].carrying());
    }

    #[test]
    fn lone_robot_on_one_cell_never_moves() {
        let mut sim = scripted(1, 1, Layout::new().robot((0, 0)));
        for _ in 0..25 {
            let s = sim.step();
            assert_eq!(s.blocked, 1);
        }
        assert_eq!(sim.moves_made(), 0);
        assert_eq!(sim.robots()[0].position(), Coord::new(0, 0));
    }
}

// ── Observers ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    struct Counter {
        snapshots: u64,
        ends:      u64,
        finished:  Option<u64>,
    }

    impl SimObserver for Counter {
        fn on_snapshot(&mut self, step: u64, _grid: &Grid) {
            assert_eq!(step, self.snapshots);
            self.snapshots += 1;
        }
        fn on_step_end(&mut self, s: &StepSummary) {
            assert_eq!(s.step, self.ends);
            self.ends += 1;
        }
        fn on_sim_end(&mut self, steps: u64, _grid: &Grid) {
            self.finished = Some(steps);
        }
    }

    #[test]
    fn hooks_fire_once_per_step() {
        let mut sim = Sim::new(cfg(6, 6, 6, 2, 4)).unwrap();
        let mut obs = Counter { snapshots: 0, ends: 0, finished: None };
        sim.run_steps(7, &mut obs);
        sim.finish(&mut obs);
        assert_eq!(obs.snapshots, 7);
        assert_eq!(obs.ends, 7);
        assert_eq!(obs.finished, Some(7));
    }

    #[test]
    fn recorder_keeps_pre_step_frames_and_final_floor() {
        let mut sim = Sim::new(cfg(6, 6, 6, 2, 4)).unwrap();
        let initial = sim.snapshot();
        let mut rec = SnapshotRecorder::new();

        sim.run_steps(10, &mut rec);
        sim.finish(&mut rec);

        assert_eq!(rec.frames().len(), 11);
        assert_eq!(rec.frames()[0], initial);
        assert_eq!(rec.frames()[10], sim.snapshot());
    }

    #[test]
    fn recorder_interval() {
        let mut sim = Sim::new(cfg(6, 6, 6, 2, 4)).unwrap();
        let mut rec = SnapshotRecorder::every(5);
        sim.run_steps(10, &mut rec);
        sim.finish(&mut rec);
        // Steps 0 and 5, then the final floor.
        assert_eq!(rec.frames().len(), 3);
    }
}
