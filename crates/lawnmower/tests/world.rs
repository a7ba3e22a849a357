use lawnmower::{
    Action, Cell, Config, Direction, DoneReason, Env, GridWorld, LawnError, Position, Rewards,
};

fn seeded(width: usize, height: usize, obstacles: usize, max_steps: usize, seed: u64) -> GridWorld {
    let config = Config::new(width, height, obstacles, max_steps);
    GridWorld::with_seed(config, seed).unwrap()
}

/// Turns right until the mower faces `dir`, asserting nothing terminates.
fn face(world: &mut GridWorld, dir: Direction) {
    while world.mower().unwrap().heading != dir {
        let t = world.step_action(Action::TurnRight).unwrap();
        assert!(!t.done);
    }
}

fn direction_towards(from: Position, to: Position) -> Direction {
    Direction::ALL
        .into_iter()
        .find(|&d| from.step(d) == Some(to))
        .expect("positions are not adjacent")
}

#[test]
fn construction_validates_configuration() {
    for (width, height, obstacles) in [(2, 5, 0), (5, 1, 0), (4, 4, 4)] {
        let result = GridWorld::new(width, height, obstacles, 10);
        assert!(matches!(result, Err(LawnError::Configuration(_))));
    }
    assert!(GridWorld::new(4, 4, 3, 10).is_ok());
    assert!(GridWorld::new(3, 3, 0, 10).is_ok());
}

#[test]
fn oversized_grid_is_a_configuration_error() {
    let huge = 1usize << (usize::BITS / 2 + 1);
    let result = GridWorld::new(huge, huge, 0, 10);
    assert!(matches!(result, Err(LawnError::Configuration(_))));
    let result = GridWorld::new(usize::MAX, 3, 0, 10);
    assert!(matches!(result, Err(LawnError::Configuration(_))));
}

#[test]
fn operations_before_reset_fail() {
    let mut world = seeded(5, 5, 0, 50, 1);
    assert!(!world.is_reset());
    assert_eq!(world.step_action(Action::Forward), Err(LawnError::NotReset));
    assert_eq!(world.observe(), Err(LawnError::NotReset));
    assert_eq!(world.render_text(), Err(LawnError::NotReset));
    assert_eq!(world.mower(), Err(LawnError::NotReset));
}

#[test]
fn collision_with_border() {
    // 3x3 leaves a single interior cell, so every forward move hits the border.
    let mut world = seeded(3, 3, 0, 10, 5);
    world.reset();
    let before = world.mower().unwrap();
    assert_eq!(before.position, Position::new(1, 1));

    let t = world.step_action(Action::Forward).unwrap();
    assert_eq!(t.reward, -100.0);
    assert!(t.done);
    assert_eq!(t.info.done_reason, Some(DoneReason::Collision));
    let reason = t.info.done_reason.unwrap().to_string();
    assert_eq!(reason, "Collision with obstacle");
    assert_eq!(world.mower().unwrap(), before);
    assert_eq!(t.observation.mower(), Some(Position::new(1, 1)));
}

#[test]
fn termination_is_absorbing_until_reset() {
    let mut world = seeded(3, 3, 0, 10, 9);
    world.reset();
    let last = world.step_action(Action::Forward).unwrap();
    assert!(last.done);
    assert!(world.is_terminated());
    assert_eq!(world.step_action(Action::TurnLeft), Err(LawnError::NotReset));
    assert_eq!(Env::step(&mut world, 0), Err(LawnError::NotReset));
    // the finished episode is still readable
    assert_eq!(world.observe(), Ok(last.observation.clone()));
    assert_eq!(world.render_text(), Ok(last.observation.to_string()));

    world.reset();
    assert!(!world.is_terminated());
    assert_eq!(world.current_step(), 0);
    assert!(world.step_action(Action::TurnLeft).is_ok());
}

#[test]
fn turn_penalty_escalates_after_three_turns() {
    let mut world = seeded(5, 5, 0, 50, 3);
    world.reset();
    let rewards: Vec<f32> = (0..4)
        .map(|_| {
            let t = world.step_action(Action::TurnLeft).unwrap();
            assert!(!t.done);
            t.reward
        })
        .collect();
    let p = Rewards::default().turn_in_place;
    assert_eq!(rewards, vec![p, p, p, -10.0]);
    assert_eq!(world.turn_count(), 4);

    let t = world.step_action(Action::TurnRight).unwrap();
    assert_eq!(t.reward, -10.0);
    assert!(!t.done);
}

#[test]
fn turning_repaints_the_mower_cell() {
    let mut world = seeded(5, 5, 0, 50, 11);
    world.reset();
    let start = world.mower().unwrap();
    let t = world.step_action(Action::TurnRight).unwrap();
    let expected = start.heading.turned_right();
    assert_eq!(world.mower().unwrap().heading, expected);
    assert_eq!(world.mower().unwrap().position, start.position);
    assert_eq!(
        t.observation.get(start.position.x, start.position.y),
        Some(Cell::Mower(expected))
    );
}

#[test]
fn configured_turn_penalty_is_used() {
    let rewards = Rewards {
        turn_in_place: -3.0,
        ..Rewards::default()
    };
    let config = Config::new(5, 5, 0, 50).with_rewards(rewards);
    let mut world = GridWorld::with_seed(config, 0).unwrap();
    world.reset();
    assert_eq!(world.step_action(Action::TurnLeft).unwrap().reward, -3.0);
}

#[test]
fn mowing_grass_then_revisiting() {
    let mut world = seeded(7, 7, 0, 100, 21);
    world.reset();
    let start = world.mower().unwrap().position;

    // Turn towards the roomiest horizontal side and drive there and back.
    let dir = if start.x <= 3 {
        Direction::Right
    } else {
        Direction::Left
    };
    face(&mut world, dir);
    let t = world.step_action(Action::Forward).unwrap();
    assert_eq!(t.reward, 10.0);
    assert!(!t.done);
    assert_eq!(t.observation.get(start.x, start.y), Some(Cell::Mowed));
    assert_eq!(world.turn_count(), 0);

    face(&mut world, dir.turned_right().turned_right());
    let t = world.step_action(Action::Forward).unwrap();
    assert_eq!(t.reward, -1.0);
    assert!(!t.done);
    assert_eq!(world.mower().unwrap().position, start);
}

#[test]
fn max_steps_ends_episode_before_applying_action() {
    const N: usize = 4;
    let mut world = seeded(12, 12, 0, N, 0);
    // Find a seed whose spawn has at least N free cells straight ahead.
    let found = (0..1000).any(|seed| {
        world.seed(seed);
        world.reset();
        let mower = world.mower().unwrap();
        let mut pos = mower.position;
        (0..N).all(|_| match pos.step(mower.heading) {
            Some(next) if (1..=10).contains(&next.x) && (1..=10).contains(&next.y) => {
                pos = next;
                true
            }
            _ => false,
        })
    });
    assert!(found);

    for _ in 0..N - 1 {
        let t = world.step_action(Action::Forward).unwrap();
        assert_eq!(t.reward, 10.0);
        assert!(!t.done);
    }
    let before = world.mower().unwrap();
    let t = world.step_action(Action::Forward).unwrap();
    assert!(t.done);
    assert_eq!(t.reward, -100.0);
    assert_eq!(t.info.done_reason, Some(DoneReason::StepsExceeded));
    assert_eq!(t.info.done_reason.unwrap().as_str(), "Steps exceeded");
    assert_eq!(world.mower().unwrap(), before);
    assert_eq!(world.current_step(), N);
}

#[test]
fn full_coverage_of_two_cell_lawn() {
    // 4x3 has exactly two interior cells: (1, 1) and (2, 1).
    let mut world = seeded(4, 3, 0, 50, 8);
    world.reset();
    let start = world.mower().unwrap().position;
    let other = if start.x == 1 {
        Position::new(2, 1)
    } else {
        Position::new(1, 1)
    };
    face(&mut world, direction_towards(start, other));
    let t = world.step_action(Action::Forward).unwrap();
    assert_eq!(t.reward, 100.0);
    assert!(t.done);
    assert_eq!(t.info.done_reason, Some(DoneReason::AllMowed));
    assert_eq!(t.info.done_reason.unwrap().to_string(), "All mowed");
    assert_eq!(t.observation.count(Cell::Grass), 0);
}

#[test]
fn full_coverage_of_four_by_four_lawn() {
    let tour = [
        Position::new(1, 1),
        Position::new(2, 1),
        Position::new(2, 2),
        Position::new(1, 2),
    ];
    for seed in 0..8 {
        let mut world = seeded(4, 4, 0, 50, seed);
        world.reset();
        let start = world.mower().unwrap().position;
        let offset = tour.iter().position(|&p| p == start).unwrap();

        for i in 1..tour.len() {
            let from = tour[(offset + i - 1) % tour.len()];
            let to = tour[(offset + i) % tour.len()];
            face(&mut world, direction_towards(from, to));
            let t = world.step_action(Action::Forward).unwrap();
            if i + 1 == tour.len() {
                assert_eq!(t.reward, 100.0, "seed {seed}");
                assert!(t.done);
                assert_eq!(t.info.done_reason, Some(DoneReason::AllMowed));
            } else {
                assert_eq!(t.reward, 10.0, "seed {seed}");
                assert!(!t.done);
                assert_eq!(t.info.done_reason, None);
            }
        }
    }
}

#[test]
fn render_text_shows_one_glyph_per_cell() {
    let mut world = seeded(3, 3, 0, 10, 2);
    world.reset();
    let glyph = Cell::Mower(world.mower().unwrap().heading).glyph();
    let text = world.render_text().unwrap();
    assert_eq!(text, format!("X X X \nX {glyph} X \nX X X \n"));
    assert_eq!(world.observe().unwrap().to_string(), text);
}

#[test]
fn observation_does_not_track_later_steps() {
    let mut world = seeded(5, 5, 0, 50, 4);
    let initial = world.reset();
    world.step_action(Action::TurnLeft).unwrap();
    assert_ne!(initial, world.observe().unwrap());
    assert_eq!(initial.shape(), (5, 5));
}

#[test]
fn env_trait_surface() {
    let mut world = seeded(9, 6, 4, 150, 0);
    assert_eq!(world.obs_shape(), (9, 6));
    assert_eq!(world.action_size(), 3);
    let obs = Env::reset(&mut world);
    assert_eq!(obs.to_indices().len(), 54);
    assert!(obs.to_indices().iter().all(|&v| v <= 6));
    assert_eq!(Env::step(&mut world, 3), Err(LawnError::InvalidAction(3)));
    assert_eq!(world.current_step(), 0);
    assert!(Env::step(&mut world, 2).is_ok());
    assert_eq!(world.current_step(), 1);
}

#[test]
fn describe_lists_parameters() {
    let world = seeded(9, 9, 4, 150, 0);
    let text = world.describe();
    assert!(text.contains("Grid size: 9, 9"));
    assert!(text.contains("Obstacles: 4"));
    assert!(text.contains("Max-steps: 150"));
}
