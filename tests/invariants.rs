//! Property tests for the simulation invariants

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use flow_steer::sim::{Agent, FlowField, SimState, StepContext, TickInput, World, tick};
use flow_steer::{BehaviorMode, SimConfig};

const EPS: f32 = 1e-4;

fn mode_strategy() -> impl Strategy<Value = BehaviorMode> {
    prop_oneof![
        Just(BehaviorMode::Wander),
        Just(BehaviorMode::Arrive),
        Just(BehaviorMode::Follow),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn speed_and_position_stay_bounded(
        seed in any::<u64>(),
        mode in mode_strategy(),
        target in (0.0f32..800.0, 0.0f32..600.0),
    ) {
        let config = SimConfig {
            world_height: 600.0,
            agent_count: 10,
            mode,
            seed,
            ..Default::default()
        };
        let mut state = SimState::new(&config).unwrap();
        let input = TickInput {
            target: Some(Vec2::new(target.0, target.1)),
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &input);
            for agent in &state.agents {
                prop_assert!(agent.velocity.length() <= agent.max_speed + EPS);
                prop_assert!(agent.position.x >= 0.0 && agent.position.x < 800.0);
                prop_assert!(agent.position.y >= 0.0 && agent.position.y < 600.0);
            }
        }
    }

    #[test]
    fn field_stays_unit_length(seed in any::<u64>(), resolution in 10.0f32..200.0) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut field = FlowField::new(World::new(800.0, 800.0), resolution, &mut rng).unwrap();
        for _ in 0..100 {
            if field.advance(&mut rng) {
                for (_, _, v) in field.cells() {
                    prop_assert!((v.length() - 1.0).abs() < EPS);
                }
                prop_assert!((field.drift().length() - 1.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn lookup_index_in_range(x in -2000.0f32..2000.0, y in -2000.0f32..2000.0) {
        let mut rng = Pcg32::seed_from_u64(0);
        let field = FlowField::new(World::new(800.0, 800.0), 50.0, &mut rng).unwrap();
        let (row, col) = field.cell_index(Vec2::new(x, y));
        prop_assert!(row < field.rows() && col < field.cols());
        if (0.0..800.0).contains(&x) && (0.0..800.0).contains(&y) {
            prop_assert_eq!(col, (x / 50.0).floor() as usize);
            prop_assert_eq!(row, (y / 50.0).floor() as usize);
        }
        prop_assert_eq!(field.lookup(Vec2::new(x, y)), field.cell(row, col));
    }

    #[test]
    fn arrive_desired_speed(
        offset in (-500.0f32..500.0, -500.0f32..500.0),
        max_speed in 1.0f32..8.0,
    ) {
        let start = Vec2::new(400.0, 400.0);
        let target = start + Vec2::new(offset.0, offset.1);
        let distance = target.distance(start);
        let mut agent = Agent::new(start, max_speed, 0.1, BehaviorMode::Arrive);
        agent.arrive(target);
        if distance >= 100.0 {
            prop_assert!((agent.desired.length() - max_speed).abs() < EPS);
        } else {
            prop_assert!(agent.desired.length() <= max_speed * distance / 100.0 + EPS);
        }
        prop_assert!(agent.steer.length() <= 0.1 + EPS);
    }
}

#[test]
fn wander_trajectories_are_reproducible() {
    let run = || {
        let mut rng = Pcg32::seed_from_u64(1234);
        let world = World::new(800.0, 800.0);
        let field = FlowField::new(world, 50.0, &mut rng).unwrap();
        let ctx = StepContext {
            field: &field,
            world,
            target: None,
        };
        let mut agent = Agent::new(Vec2::new(300.0, 500.0), 4.0, 0.1, BehaviorMode::Wander);
        (0..1_000)
            .map(|_| {
                agent.step(&ctx, &mut rng);
                agent.position
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn end_to_end_follow_scenario() {
    let config = SimConfig {
        world_width: 800.0,
        world_height: 800.0,
        resolution: 50.0,
        agent_count: 1,
        mode: BehaviorMode::Follow,
        seed: 8,
        ..Default::default()
    };
    let mut state = SimState::new(&config).unwrap();
    assert_eq!((state.field.cols(), state.field.rows()), (16, 16));

    let start = Vec2::new(400.0, 400.0);
    state.agents[0] = Agent::new(start, 5.0, 0.1, BehaviorMode::Follow);
    let expected = start + (state.field.lookup(start) * 5.0).clamp_length_max(0.1);

    tick(&mut state, &TickInput::default());
    assert!((state.agents[0].position - expected).length() < 1e-6);
}
