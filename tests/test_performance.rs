//! Performance tests for generation and the frame step

use dungeon_heroes::{
    utils, DungeonGenerator, DungeonResult, DungeonTemplate, GameConfig, GameState,
    GenerationConfig, Generator, InputState,
};
use std::time::Instant;

#[test]
fn test_generation_performance() -> DungeonResult<()> {
    let start = Instant::now();
    let iterations = 200;

    for seed in 0..iterations {
        let config = GenerationConfig::new(seed)
            .with_template(DungeonTemplate::Full)
            .with_grid_size((5, 5));
        let mut rng = utils::create_rng(&config);
        DungeonGenerator::new().generate_validated(&config, &mut rng)?;
    }

    let elapsed = start.elapsed();
    let avg = elapsed / iterations as u32;
    println!("Dungeon generation: {:?} avg over {} runs", avg, iterations);

    // Should take well under 10ms per 5x5 dungeon
    assert!(avg.as_millis() < 10, "Generation too slow: {:?}", avg);
    Ok(())
}

#[test]
fn test_step_performance() -> DungeonResult<()> {
    let mut config = GameConfig::default();
    config.seed = 777;
    let mut state = GameState::new(config);
    state.select_hero("archer")?;

    let inputs = [
        InputState {
            move_right: true,
            attack: true,
            ..InputState::idle()
        },
        InputState {
            move_left: true,
            jump: true,
            ..InputState::idle()
        },
        InputState::idle(),
    ];

    let frames = 3600;
    let start = Instant::now();
    for frame in 0..frames {
        state.step(1.0 / 60.0, &inputs[(frame / 20) % inputs.len()]);
    }
    let elapsed = start.elapsed();
    println!("{} frames simulated in {:?}", frames, elapsed);

    // A minute of play must simulate far faster than real time
    assert!(elapsed.as_secs() < 5, "Simulation too slow: {:?}", elapsed);
    Ok(())
}
