//! Whole-session tests: frames presented through a recording canvas, and
//! autopilot runs the simulator relies on.

use dino_dash::autopilot::Autopilot;
use dino_dash::render::{
    run_frame, FrameRecorder, Tint, GAME_OVER_TITLE, JUMP_HINT, RESTART_PROMPT, START_PROMPT,
};
use dino_dash::world::{
    tick, HeldKeys, Key, ObstacleKind, Phase, ScrollEntity, Sprite, TickEvent, WorldState,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_prompts_follow_the_session() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut world = WorldState::new();
    let mut canvas = FrameRecorder::new();

    run_frame(&mut world, &HeldKeys::none(), &mut rng, &mut canvas).unwrap();
    assert_eq!(canvas.texts(), vec![START_PROMPT, "Score: 0"]);

    run_frame(&mut world, &HeldKeys::none().with(Key::S), &mut rng, &mut canvas).unwrap();
    assert_eq!(canvas.texts(), vec![JUMP_HINT, "Score: 0"]);

    // The hint goes away once the score passes 20 (81 running ticks)
    let pilot = Autopilot::default();
    for _ in 0..80 {
        let keys = pilot.keys(&world);
        run_frame(&mut world, &keys, &mut rng, &mut canvas).unwrap();
    }
    assert_eq!(world.score, 20.25);
    assert_eq!(canvas.texts(), vec!["Score: 20"]);

    // Drop a cactus on the dino
    world.obstacles.members.push(ScrollEntity::new(
        Sprite::Obstacle(ObstacleKind::BigPair),
        60.0,
        390.0,
    ));
    let events = run_frame(&mut world, &HeldKeys::none(), &mut rng, &mut canvas).unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, TickEvent::Crashed { .. })));
    assert_eq!(
        canvas.texts(),
        vec![GAME_OVER_TITLE, RESTART_PROMPT, "Score: 20"]
    );
    assert_eq!(canvas.background, Some(Tint::NavajoWhite));

    run_frame(&mut world, &HeldKeys::none().with(Key::R), &mut rng, &mut canvas).unwrap();
    assert_eq!(world.phase, Phase::Running);
    assert_eq!(canvas.texts(), vec![JUMP_HINT, "Score: 0"]);
    assert_eq!(canvas.frames_presented, 84);
}

#[test]
fn test_every_live_entity_is_drawn() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut world = WorldState::new();
    let mut canvas = FrameRecorder::new();
    let pilot = Autopilot::default();

    for _ in 0..600 {
        let keys = pilot.keys(&world);
        run_frame(&mut world, &keys, &mut rng, &mut canvas).unwrap();
        let live = world.clouds.len() + world.grounds.len() + world.obstacles.len();
        assert_eq!(canvas.sprite_count(), live + 1);
    }
}

#[test]
fn test_autopilot_runs_are_crash_free() {
    let pilot = Autopilot::default();
    for seed in 100..110 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut world = WorldState::new();
        let mut jumps = 0;
        for _ in 0..3_000 {
            let keys = pilot.keys(&world);
            for event in tick(&mut world, &keys, &mut rng) {
                match event {
                    TickEvent::Jumped => jumps += 1,
                    TickEvent::Crashed { obstacle, score } => {
                        panic!("seed {seed}: hit {} at score {score}", obstacle.name())
                    }
                    _ => {}
                }
            }
        }
        assert!(jumps > 0);
        assert_eq!(world.display_score(), 750);
    }
}

#[test]
fn test_early_lead_window_crashes() {
    // Jumping far too early lands right on the first cactus
    let pilot = Autopilot::new(300.0..=320.0);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut world = WorldState::new();
    let mut crashed = false;
    for _ in 0..500 {
        let keys = pilot.keys(&world);
        crashed |= tick(&mut world, &keys, &mut rng)
            .iter()
            .any(|e| matches!(e, TickEvent::Crashed { .. }));
        if crashed {
            break;
        }
    }
    assert!(crashed);
}
