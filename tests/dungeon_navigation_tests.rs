//! Integration tests for moving between rooms through doors.

use dungeon_heroes::{
    config, Direction, DungeonResult, DungeonTemplate, GameConfig, GameEvent, GameState,
    GridCoord, InputState, TransitionKind,
};

const FRAME: f32 = 1.0 / 60.0;

fn cross_run(transition: TransitionKind) -> DungeonResult<GameState> {
    let mut config = GameConfig::for_testing(7);
    config.template = DungeonTemplate::Cross;
    config.transition_kind = transition;
    let mut state = GameState::new(config);
    state.select_hero("knight")?;
    Ok(state)
}

fn walk(left: bool) -> InputState {
    InputState {
        move_left: left,
        move_right: !left,
        ..InputState::idle()
    }
}

/// Steps with `input` until a room is entered, up to `limit` frames.
fn step_until_room_change(
    state: &mut GameState,
    input: InputState,
    limit: usize,
) -> Option<(GridCoord, bool)> {
    for _ in 0..limit {
        for event in state.step(FRAME, &input) {
            if let GameEvent::RoomEntered { room, first_visit } = event {
                return Some((room, first_visit));
            }
        }
    }
    None
}

#[test]
fn test_walk_left_and_back() -> DungeonResult<()> {
    let mut state = cross_run(TransitionKind::Instant)?;

    let (room, first_visit) = step_until_room_change(&mut state, walk(true), 600).unwrap();
    assert_eq!(room, GridCoord::new(0, 1));
    assert!(first_visit);
    assert!(!state.enemies().is_empty());

    let (room, first_visit) = step_until_room_change(&mut state, walk(false), 600).unwrap();
    assert_eq!(room, GridCoord::new(1, 1));
    assert!(!first_visit);

    // Back through the LEFT wall: spawned to the right of that door
    let door = state
        .current_room()
        .unwrap()
        .door(Direction::Left)
        .unwrap()
        .rect;
    let (x, _) = state.hero().unwrap().position();
    assert_eq!(x, door.right() + config::DOOR_SPAWN_OFFSET);
    assert!(state.enemies().is_empty());
    Ok(())
}

#[test]
fn test_up_door_needs_interact() -> DungeonResult<()> {
    let mut state = cross_run(TransitionKind::Instant)?;

    // Walk left until the feet are over the UP door
    let up = state.current_room().unwrap().door(Direction::Up).unwrap().rect;
    for _ in 0..600 {
        let feet = state.hero().unwrap().position().0 + 16.0;
        if feet < up.right() - 8.0 {
            break;
        }
        state.step(FRAME, &walk(true));
    }
    assert!(state.interaction_prompt().is_some());
    assert_eq!(state.dungeon().unwrap().current(), GridCoord::new(1, 1));

    let interact = InputState {
        interact: true,
        ..InputState::idle()
    };
    let (room, _) = step_until_room_change(&mut state, interact, 2).unwrap();
    assert_eq!(room, GridCoord::new(1, 0));

    // Vertical entries are centered on the matching door
    let down = state.current_room().unwrap().door(Direction::Down).unwrap().rect;
    let hero = state.hero().unwrap().position();
    assert_eq!(hero.0 + 32.0, down.center_x());
    Ok(())
}

#[test]
fn test_boss_room_stays_locked() -> DungeonResult<()> {
    let mut state = cross_run(TransitionKind::Instant)?;

    let mut notices = 0;
    for _ in 0..600 {
        for event in state.step(FRAME, &walk(false)) {
            match event {
                GameEvent::DoorLocked { message } => {
                    assert_eq!(message, config::BOSS_DOOR_MESSAGE);
                    notices += 1;
                }
                GameEvent::RoomEntered { .. } => panic!("entered a locked room"),
                _ => {}
            }
        }
    }
    assert_eq!(notices, 1);
    assert_eq!(state.dungeon().unwrap().current(), GridCoord::new(1, 1));
    Ok(())
}

#[test]
fn test_fade_blocks_input_until_done() -> DungeonResult<()> {
    let mut state = cross_run(TransitionKind::Fade)?;

    let mut started = false;
    for _ in 0..600 {
        let events = state.step(FRAME, &walk(true));
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::TransitionStarted { .. }))
        {
            started = true;
            break;
        }
    }
    assert!(started);
    assert!(state.is_transitioning());

    // Input is ignored mid-transition
    let before = state.hero().unwrap().position();
    state.step(FRAME, &walk(true));
    assert_eq!(state.hero().unwrap().position(), before);

    let mut entered = 0;
    for _ in 0..60 {
        entered += state
            .step(FRAME, &InputState::idle())
            .iter()
            .filter(|e| matches!(e, GameEvent::RoomEntered { .. }))
            .count();
    }
    assert_eq!(entered, 1);
    assert!(!state.is_transitioning());
    assert_eq!(state.dungeon().unwrap().current(), GridCoord::new(0, 1));
    Ok(())
}
