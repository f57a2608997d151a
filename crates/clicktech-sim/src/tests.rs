//! Tests for the scheduler, scene flow, every scene simulator and high-score persistence.

use glam::{IVec2, Vec2};
use hecs::Entity;

use crate::core::commands::{InputEvent, Key};
use crate::core::components::{DefenseUnit, ShapeId};
use crate::core::enums::*;
use crate::core::events::GameEvent;
use crate::core::types::Aabb;
use crate::engine::{ArcadeEngine, EngineConfig};
use crate::highscores::{HighScores, JsonFileStore, MemoryStore, ScoreMap, ScoreStore};
use crate::keyframe::ShapeSnapshot;
use crate::scenes::{Game, Simulator};
use crate::scheduler::Scheduler;
use crate::session::Session;

fn engine_with_store(seed: u64) -> (ArcadeEngine, MemoryStore) {
    let store = MemoryStore::new();
    let engine = ArcadeEngine::with_store(seed, Box::new(store.clone()));
    (engine, store)
}

fn key(key: Key) -> InputEvent {
    InputEvent::KeyDown { key }
}

fn at_menu(seed: u64) -> (ArcadeEngine, MemoryStore) {
    let (mut engine, store) = engine_with_store(seed);
    engine.advance(3000);
    assert_eq!(engine.scene_tag(), SceneTag::Menu);
    (engine, store)
}

fn world_mut(engine: &mut ArcadeEngine) -> &mut crate::world::World {
    engine
        .game_mut()
        .expect("a game should be running")
        .sim_mut()
        .world_mut()
}

// ---- Scheduler ----

#[test]
fn test_scheduler_fires_in_due_order() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(30, false, "once");
    scheduler.schedule(10, false, "early");
    scheduler.schedule(20, true, "tick");

    let mut fired = Vec::new();
    while let Some(f) = scheduler.pop_due(60) {
        fired.push((f.due, f.task));
    }
    assert_eq!(
        fired,
        vec![
            (10, "early"),
            (20, "tick"),
            (30, "once"),
            (40, "tick"),
            (60, "tick")
        ]
    );
    assert_eq!(scheduler.now(), 60);
}

#[test]
fn test_scheduler_same_due_fifo() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(10, false, 'a');
    scheduler.schedule(10, false, 'b');
    scheduler.schedule(10, false, 'c');
    let order: Vec<char> = std::iter::from_fn(|| scheduler.pop_due(10))
        .map(|f| f.task)
        .collect();
    assert_eq!(order, vec!['a', 'b', 'c']);
}

#[test]
fn test_scheduler_cancel_inside_drain() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(10, false, "first");
    let doomed = scheduler.schedule(20, false, "second");

    let first = scheduler.pop_due(100).expect("first is due");
    assert_eq!(first.task, "first");
    assert!(scheduler.cancel(doomed));
    assert!(scheduler.pop_due(100).is_none());
    assert!(!scheduler.cancel(doomed), "second cancel is a no-op");
}

#[test]
fn test_scheduler_repeating_handle_is_stable() {
    let mut scheduler = Scheduler::new();
    let handle = scheduler.schedule(5, true, ());
    for _ in 0..4 {
        let fired = scheduler.pop_due(1000).expect("repeats forever");
        assert_eq!(fired.handle, handle);
    }
    assert!(scheduler.is_live(handle));
    assert!(scheduler.cancel(handle));
    assert!(scheduler.pop_due(1000).is_none());
}

#[test]
fn test_scheduler_cancel_where() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(10, true, 1);
    scheduler.schedule(10, true, 2);
    scheduler.schedule(10, true, 3);
    assert_eq!(scheduler.cancel_where(|n| n % 2 == 1), 2);
    assert_eq!(scheduler.live_count(), 1);
    let fired = scheduler.pop_due(10).expect("survivor fires");
    assert_eq!(fired.task, 2);
}

// ---- Session ----

#[test]
fn test_session_outcome_recorded_once() {
    let mut session = Session::default();
    assert!(session.finish(Outcome::BallsLost));
    assert!(!session.finish(Outcome::LevelCleared));
    assert_eq!(session.take_pending(), Some(Outcome::BallsLost));
    assert_eq!(session.take_pending(), None);
    assert_eq!(session.outcome, Some(Outcome::BallsLost));
}

// ---- Shell navigation ----

#[test]
fn test_welcome_hands_over_to_menu() {
    let (mut engine, _) = engine_with_store(1);
    assert_eq!(engine.scene_tag(), SceneTag::Welcome);

    engine.advance(2999);
    assert_eq!(engine.scene_tag(), SceneTag::Welcome);

    engine.advance(1);
    assert_eq!(engine.scene_tag(), SceneTag::Menu);
    let snap = engine.snapshot();
    let menu = snap.menu.expect("menu overlay");
    assert_eq!(menu.title, "Click Tech Tutorial Prototype");
    assert_eq!(menu.entries.len(), 9);
    assert_eq!(menu.lines.len(), 7);
    assert_eq!(menu.selected, 0);
}

#[test]
fn test_welcome_shown_only_once() {
    let (mut engine, _) = at_menu(1);
    engine.start_game(GameKind::Snake);
    engine.handle_input(key(Key::Escape));
    assert_eq!(engine.scene_tag(), SceneTag::Menu);
    engine.show_menu();
    assert_eq!(engine.scene_tag(), SceneTag::Menu);
}

#[test]
fn test_menu_selection_wraps() {
    let (mut engine, _) = at_menu(2);
    engine.handle_input(key(Key::Up));
    assert_eq!(engine.snapshot().menu.map(|m| m.selected), Some(8));
    engine.handle_input(key(Key::Down));
    assert_eq!(engine.snapshot().menu.map(|m| m.selected), Some(0));
    engine.handle_input(key(Key::Enter));
    assert_eq!(
        engine.scene_tag(),
        SceneTag::Playing(GameKind::DefenseGame)
    );
}

#[test]
fn test_menu_pointer_activates_entry() {
    let (mut engine, _) = at_menu(2);
    // Second entry is centered at y = 234.
    engine.handle_input(InputEvent::PointerDown { x: 300.0, y: 234.0 });
    assert_eq!(engine.scene_tag(), SceneTag::Playing(GameKind::Flight));
}

#[test]
fn test_clicker_select_flow() {
    let (mut engine, _) = at_menu(3);
    engine.handle_input(key(Key::Down));
    engine.handle_input(key(Key::Down));
    engine.handle_input(key(Key::Enter));
    assert_eq!(engine.scene_tag(), SceneTag::ClickerSelect);

    engine.handle_input(key(Key::Escape));
    assert_eq!(engine.scene_tag(), SceneTag::Menu);

    engine.show_clicker_select();
    engine.handle_input(key(Key::Down));
    engine.handle_input(key(Key::Enter));
    assert_eq!(engine.scene_tag(), SceneTag::Playing(GameKind::Clicker));
    match engine.game() {
        Some(Game::Clicker(clicker)) => assert_eq!(clicker.remaining(), 30),
        _ => panic!("clicker should be running"),
    }
    assert_eq!(engine.session().timer, Some(30));
}

#[test]
fn test_quit_entry_sets_flag() {
    let (mut engine, _) = at_menu(4);
    assert!(!engine.is_quit_requested());
    engine.handle_input(key(Key::Up));
    engine.handle_input(key(Key::Enter));
    assert!(engine.is_quit_requested());
}

#[test]
fn test_scene_change_cancels_every_old_timer() {
    let (mut engine, _) = at_menu(5);
    let old = engine.live_timers();
    assert!(!old.is_empty());

    engine.start_game(GameKind::DefenseGame);
    let new = engine.live_timers();
    assert_eq!(new.len(), 4, "spawn, update, clouds, particles");
    let newest_old = old.iter().max().copied();
    assert!(new.iter().all(|h| Some(*h) > newest_old));

    engine.start_game(GameKind::Snake);
    assert_eq!(engine.live_timers().len(), 1);
    assert!(new.iter().all(|h| !engine.live_timers().contains(h)));
    engine.advance(1000);
    assert_eq!(engine.scene_tag(), SceneTag::Playing(GameKind::Snake));
}

#[test]
fn test_scene_entered_event_emitted() {
    let (mut engine, _) = at_menu(5);
    let _ = engine.snapshot();
    engine.start_game(GameKind::Breakout);
    let events = engine.snapshot().events;
    assert!(events.contains(&GameEvent::SceneEntered {
        scene: SceneTag::Playing(GameKind::Breakout)
    }));
}

// ---- Breakout ----

#[test]
fn test_breakout_ball_breaks_brick_and_rebounds() {
    let (mut engine, _) = engine_with_store(6);
    engine.start_game(GameKind::Breakout);
    world_mut(&mut engine).despawn_kind(EntityKind::Ball);

    let ball = match engine.game_mut() {
        Some(Game::Breakout(breakout)) => {
            assert_eq!(breakout.brick_count(), 48);
            breakout.launch_ball(
                Aabb::new(266.0, 130.0, 282.0, 146.0),
                Vec2::new(5.0, -5.0),
            )
        }
        _ => panic!("breakout should be running"),
    };

    engine.advance(30);

    match engine.game() {
        Some(Game::Breakout(breakout)) => {
            assert_eq!(breakout.brick_count(), 47);
            assert_eq!(breakout.ball_velocity(ball), Some(Vec2::new(5.0, 5.0)));
        }
        _ => panic!("breakout should be running"),
    }
    assert_eq!(engine.session().points, 10);
}

#[test]
fn test_breakout_last_ball_lost() {
    let (mut engine, store) = engine_with_store(6);
    engine.start_game(GameKind::Breakout);
    world_mut(&mut engine).despawn_kind(EntityKind::Ball);
    if let Some(Game::Breakout(breakout)) = engine.game_mut() {
        breakout.launch_ball(
            Aabb::new(10.0, 492.0, 26.0, 508.0),
            Vec2::new(0.0, 10.0),
        );
    }
    engine.add_score(5);
    engine.advance(30);
    assert_eq!(engine.session().outcome, Some(Outcome::BallsLost));
    assert_eq!(store.contents().and_then(|s| s.get("breakout").copied()), Some(5));
    assert_eq!(engine.snapshot().message.as_deref(), Some("GAME OVER"));
}

#[test]
fn test_breakout_cleared_level() {
    let (mut engine, _) = engine_with_store(6);
    engine.start_game(GameKind::Breakout);
    world_mut(&mut engine).despawn_kind(EntityKind::Brick);
    engine.advance(30);
    assert_eq!(engine.session().outcome, Some(Outcome::LevelCleared));
}

/// Replace the opening ball with one of the given extents and velocity,
/// advance one update, and return the ball's new velocity.
fn breakout_ball_after_tick(bounds: Aabb, velocity: Vec2) -> Option<Vec2> {
    let (mut engine, _) = engine_with_store(6);
    engine.start_game(GameKind::Breakout);
    world_mut(&mut engine).despawn_kind(EntityKind::Ball);
    let ball = match engine.game_mut() {
        Some(Game::Breakout(breakout)) => breakout.launch_ball(bounds, velocity),
        _ => panic!("breakout should be running"),
    };
    engine.advance(30);
    match engine.game() {
        Some(Game::Breakout(breakout)) => breakout.ball_velocity(ball),
        _ => panic!("breakout should be running"),
    }
}

#[test]
fn test_breakout_paddle_remaps_dx_from_offset() {
    // Paddle spans x 260..340; after the move the ball center is at x 329.
    let velocity = breakout_ball_after_tick(
        Aabb::new(316.0, 455.0, 332.0, 471.0),
        Vec2::new(5.0, 5.0),
    )
    .expect("ball still in play");
    assert!((velocity.x - 2.9).abs() < 1e-5, "dx = {}", velocity.x);
    assert_eq!(velocity.y, -5.0);

    // Left of center sends the ball left.
    let velocity = breakout_ball_after_tick(
        Aabb::new(256.0, 455.0, 272.0, 471.0),
        Vec2::new(5.0, 5.0),
    )
    .expect("ball still in play");
    assert!((velocity.x + 3.1).abs() < 1e-5, "dx = {}", velocity.x);
    assert_eq!(velocity.y, -5.0);
}

#[test]
fn test_breakout_rising_ball_passes_paddle() {
    let velocity = breakout_ball_after_tick(
        Aabb::new(316.0, 465.0, 332.0, 481.0),
        Vec2::new(5.0, -5.0),
    );
    assert_eq!(velocity, Some(Vec2::new(5.0, -5.0)));
}

// ---- Defense ----

#[test]
fn test_defense_ship_destroyed_saves_high_score() {
    let (mut engine, store) = engine_with_store(7);
    engine.start_game(GameKind::DefenseGame);
    world_mut(&mut engine).despawn_kind(EntityKind::DefenseUnit);
    if let Some(Game::Defense(defense)) = engine.game_mut() {
        defense.spawn_asteroid(285.0, 300.0, 30.0);
    }
    engine.add_score(30);
    let _ = engine.snapshot();

    engine.advance(400);

    assert_eq!(engine.session().outcome, Some(Outcome::ShipDestroyed));
    assert_eq!(engine.high_scores().get(GameKind::DefenseGame), 30);
    assert_eq!(
        store.contents().and_then(|s| s.get("earthprotector").copied()),
        Some(30)
    );

    let snap = engine.snapshot();
    assert_eq!(snap.message.as_deref(), Some("Ship Destroyed!"));
    assert!(snap.events.contains(&GameEvent::HighScoreSaved {
        game: GameKind::DefenseGame,
        score: 30
    }));
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::GameOver {
            outcome: Outcome::ShipDestroyed,
            ..
        }
    )));
    match engine.game() {
        Some(Game::Defense(defense)) => assert!(defense.ship().is_none()),
        _ => panic!("defense scene stays up after game over"),
    }
    // Effects keep animating over the frozen scene.
    assert_eq!(engine.live_timers().len(), 2);
}

#[test]
fn test_defense_keeps_higher_stored_score() {
    let mut scores = ScoreMap::new();
    scores.insert("earthprotector".to_string(), 100);
    let store = MemoryStore::with_scores(scores);
    let mut engine = ArcadeEngine::with_store(7, Box::new(store.clone()));

    engine.start_game(GameKind::DefenseGame);
    world_mut(&mut engine).despawn_kind(EntityKind::DefenseUnit);
    if let Some(Game::Defense(defense)) = engine.game_mut() {
        defense.spawn_asteroid(285.0, 300.0, 30.0);
    }
    engine.add_score(30);
    engine.advance(400);

    assert_eq!(engine.session().outcome, Some(Outcome::ShipDestroyed));
    assert_eq!(engine.high_scores().get(GameKind::DefenseGame), 100);
    assert_eq!(
        store.contents().and_then(|s| s.get("earthprotector").copied()),
        Some(100)
    );
    assert!(!engine
        .snapshot()
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::HighScoreSaved { .. })));
}

#[test]
fn test_defense_ship_moves_with_label() {
    let (mut engine, _) = engine_with_store(8);
    engine.start_game(GameKind::DefenseGame);
    let (ship, label) = match engine.game() {
        Some(Game::Defense(defense)) => {
            let ship = defense.ship().expect("ship spawned");
            let label = defense.world().companion(ship).expect("ship has a label");
            (ship, label)
        }
        _ => panic!("defense should be running"),
    };
    engine.handle_input(key(Key::Left));
    let world = world_mut(&mut engine);
    assert_eq!(world.origin(ship), Some(Vec2::new(280.0, 410.0)));
    assert_eq!(world.origin(label), Some(Vec2::new(280.0, 400.0)));
}

fn defense(engine: &mut ArcadeEngine) -> &mut crate::scenes::DefenseGame {
    match engine.game_mut() {
        Some(Game::Defense(defense)) => defense,
        _ => panic!("defense should be running"),
    }
}

/// Guard entity and its pursuit state, looked up by label.
fn guard(engine: &ArcadeEngine, name: &str) -> Option<(Entity, DefenseUnit)> {
    let Some(Game::Defense(defense)) = engine.game() else {
        return None;
    };
    defense.units().iter().find_map(|unit| {
        let state = defense.world().ecs().get::<&DefenseUnit>(*unit).ok()?;
        (state.name == name).then(|| (*unit, (*state).clone()))
    })
}

#[test]
fn test_defense_asteroid_reaching_ground_ends_scene() {
    let (mut engine, _) = engine_with_store(14);
    engine.start_game(GameKind::DefenseGame);
    world_mut(&mut engine).despawn_kind(EntityKind::DefenseUnit);
    defense(&mut engine).spawn_asteroid(20.0, 400.0, 20.0);

    engine.advance(150);
    assert!(engine.session().outcome.is_none());

    engine.advance(150);
    assert_eq!(engine.session().outcome, Some(Outcome::EarthDestroyed));
    assert_eq!(
        engine.snapshot().message.as_deref(),
        Some("Earth Destroyed!")
    );
    let defense = defense(&mut engine);
    assert!(defense.ship().is_none());
    assert_eq!(defense.world().count(EntityKind::Asteroid), 0);
}

#[test]
fn test_defense_unit_lost_with_its_label() {
    let (mut engine, _) = engine_with_store(15);
    engine.start_game(GameKind::DefenseGame);
    let (guard_l, _) = guard(&engine, "Guard L").expect("left guard");
    let label = defense(&mut engine)
        .world()
        .companion(guard_l)
        .expect("guard has a label");
    assert_eq!(defense(&mut engine).world().count(EntityKind::Label), 3);

    // Directly above Guard L, inside its dead zone.
    defense(&mut engine).spawn_asteroid(140.0, 380.0, 20.0);
    engine.advance(90);

    let world = defense(&mut engine).world();
    assert!(!world.contains(guard_l));
    assert!(!world.contains(label));
    assert_eq!(world.count(EntityKind::DefenseUnit), 1);
    assert_eq!(world.count(EntityKind::Label), 2);
    assert_eq!(world.count(EntityKind::Asteroid), 0);
    assert!(world.count(EntityKind::Particle) > 0);
    assert!(guard(&engine, "Guard R").is_some());
    assert_eq!(engine.session().points, 50);
    assert!(engine.session().outcome.is_none());
}

#[test]
fn test_defense_shots_score_per_hazard() {
    let (mut engine, _) = engine_with_store(16);
    engine.start_game(GameKind::DefenseGame);
    world_mut(&mut engine).despawn_kind(EntityKind::DefenseUnit);
    defense(&mut engine).spawn_asteroid(290.0, 250.0, 20.0);
    engine.handle_input(key(Key::Space));

    engine.advance(150);
    assert_eq!(engine.session().points, 10);
    assert_eq!(defense(&mut engine).world().count(EntityKind::Asteroid), 0);
    assert_eq!(defense(&mut engine).world().count(EntityKind::Projectile), 0);

    let (mut engine, _) = engine_with_store(16);
    engine.start_game(GameKind::DefenseGame);
    defense(&mut engine).spawn_hostile(285.0, 300.0);
    engine.handle_input(key(Key::Space));

    engine.advance(200);
    assert_eq!(engine.session().points, 20);
    assert_eq!(defense(&mut engine).world().count(EntityKind::HostileCraft), 0);
    assert!(engine.session().outcome.is_none());
}

#[test]
fn test_defense_guards_hold_pursuit_step() {
    let (mut engine, _) = engine_with_store(17);
    engine.start_game(GameKind::DefenseGame);
    // Centered between the guards, well above them.
    defense(&mut engine).spawn_asteroid(290.0, 100.0, 20.0);

    engine.advance(30);

    let (left, left_state) = guard(&engine, "Guard L").expect("left guard");
    let (right, right_state) = guard(&engine, "Guard R").expect("right guard");
    assert_eq!(left_state.held_step, 5.0);
    assert_eq!(right_state.held_step, -5.0);
    assert_eq!(left_state.last_target_x, Some(300.0));
    assert_eq!(right_state.last_target_x, Some(300.0));

    let world = defense(&mut engine).world();
    assert_eq!(world.origin(left), Some(Vec2::new(155.0, 410.0)));
    assert_eq!(world.origin(right), Some(Vec2::new(445.0, 410.0)));
}

#[test]
fn test_defense_guard_clamped_at_edge_turns_back() {
    let (mut engine, _) = engine_with_store(18);
    engine.start_game(GameKind::DefenseGame);
    let (left, _) = guard(&engine, "Guard L").expect("left guard");
    // Left edge of the guard at x = 2.
    world_mut(&mut engine).translate(left, Vec2::new(-132.0, 0.0));
    // Target past the left edge of the field.
    defense(&mut engine).spawn_asteroid(-30.0, 300.0, 20.0);

    engine.advance(30);

    let (_, state) = guard(&engine, "Guard L").expect("left guard");
    assert_eq!(state.held_step, 5.0);
    let bounds = defense(&mut engine)
        .world()
        .bbox(left)
        .expect("guard still alive");
    assert_eq!(bounds.min_x, 0.0);
}

// ---- Clicker ----

#[test]
fn test_clicker_counts_until_time_up() {
    let (mut engine, store) = engine_with_store(9);
    engine.start_clicker(10);
    engine.handle_input(InputEvent::PointerDown { x: 300.0, y: 255.0 });
    engine.handle_input(InputEvent::PointerDown { x: 5.0, y: 5.0 });
    assert_eq!(engine.session().points, 1);

    engine.advance(9_999);
    assert_eq!(engine.session().timer, Some(1));
    assert!(engine.session().outcome.is_none());

    engine.advance(1);
    assert_eq!(
        engine.session().outcome,
        Some(Outcome::TimeUp { clicks: 1 })
    );
    assert_eq!(store.contents().and_then(|s| s.get("clicker").copied()), Some(1));

    let snap = engine.snapshot();
    assert_eq!(snap.message.as_deref(), Some("Time's Up! Final Clicks: 1"));
    let hud = snap.hud.expect("clicker shows a hud");
    assert_eq!(hud.timer, Some(0));

    // Frozen: clicks no longer count.
    engine.handle_input(InputEvent::PointerDown { x: 300.0, y: 255.0 });
    assert_eq!(engine.session().points, 1);
}

// ---- Snake ----

fn snake(engine: &mut ArcadeEngine) -> &mut crate::scenes::SnakeGame {
    match engine.game_mut() {
        Some(Game::Snake(snake)) => snake,
        _ => panic!("snake should be running"),
    }
}

#[test]
fn test_snake_rejects_reversal() {
    let (mut engine, _) = engine_with_store(10);
    engine.start_game(GameKind::Snake);
    let snake = snake(&mut engine);
    assert_eq!(snake.len(), 3);
    assert_eq!(snake.head(), Some(IVec2::new(300, 240)));
    assert!(!snake.set_direction(IVec2::NEG_X));
    assert!(snake.set_direction(IVec2::Y));
    // Still moving right until the next step: left would fold back.
    assert!(!snake.set_direction(IVec2::NEG_X));
}

#[test]
fn test_snake_grows_by_food() {
    let (mut engine, _) = engine_with_store(10);
    engine.start_game(GameKind::Snake);

    for eaten in 1..=5u32 {
        let game = snake(&mut engine);
        let ahead = game.head().expect("snake has a head") + IVec2::new(20, 0);
        assert!(game.place_food(ahead));

        engine.advance(150);

        let game = snake(&mut engine);
        assert_eq!(game.food_eaten(), eaten);
        assert_eq!(game.len(), 3 + game.food_eaten() as usize);
        assert_eq!(game.head(), Some(ahead));
        let food = game.food().expect("food respawned");
        assert!(game.cells().all(|cell| cell != food));
    }
    assert_eq!(engine.session().points, 50);

    // A plain step keeps the length.
    assert!(snake(&mut engine).place_food(IVec2::ZERO));
    engine.advance(150);
    let game = snake(&mut engine);
    assert_eq!(game.len(), 8);
    assert_eq!(game.len(), 3 + game.food_eaten() as usize);
    assert_eq!(game.head(), Some(IVec2::new(420, 240)));
}

#[test]
fn test_snake_may_chase_its_tail() {
    let (mut engine, _) = engine_with_store(11);
    engine.start_game(GameKind::Snake);
    snake(&mut engine).place_food(IVec2::new(320, 240));
    engine.advance(150);
    snake(&mut engine).place_food(IVec2::ZERO);

    for turn in [Key::Down, Key::Left, Key::Up] {
        engine.handle_input(key(turn));
        engine.advance(150);
    }

    assert!(engine.session().outcome.is_none());
    let snake = snake(&mut engine);
    assert_eq!(snake.len(), 4);
    assert_eq!(snake.head(), Some(IVec2::new(300, 240)));
}

#[test]
fn test_snake_hits_wall() {
    let (mut engine, _) = engine_with_store(12);
    engine.start_game(GameKind::Snake);
    snake(&mut engine).place_food(IVec2::ZERO);

    engine.advance(150 * 14);
    assert!(engine.session().outcome.is_none());
    engine.advance(150);
    assert_eq!(
        engine.session().outcome,
        Some(Outcome::SnakeCollided { length: 3 })
    );
    assert_eq!(snake(&mut engine).head(), Some(IVec2::new(580, 240)));
}

// ---- Flight ----

#[test]
fn test_flight_building_collision() {
    let (mut engine, _) = engine_with_store(13);
    engine.start_game(GameKind::Flight);
    if let Some(Game::Flight(flight)) = engine.game_mut() {
        flight.spawn_building(190.0, 40.0, 300.0);
    }
    engine.advance(50);
    assert_eq!(engine.session().outcome, Some(Outcome::Crashed));
    assert_eq!(engine.snapshot().message.as_deref(), Some("Crashed"));
}

#[test]
fn test_flight_cockpit_toggle() {
    let (mut engine, _) = engine_with_store(14);
    engine.start_game(GameKind::Flight);
    engine.handle_input(key(Key::Char('c')));
    let plane = match engine.game() {
        Some(Game::Flight(flight)) => {
            assert!(flight.is_cockpit());
            assert!(flight.world().count(EntityKind::Cockpit) > 0);
            flight.plane().expect("plane spawned")
        }
        _ => panic!("flight should be running"),
    };
    let snap = engine.snapshot();
    let plane_id = plane.to_bits().get();
    assert!(snap.items.iter().all(|item| item.id != plane_id));

    engine.handle_input(key(Key::Char('c')));
    match engine.game() {
        Some(Game::Flight(flight)) => {
            assert!(!flight.is_cockpit());
            assert_eq!(flight.world().count(EntityKind::Cockpit), 0);
        }
        _ => panic!("flight should be running"),
    }
}

// ---- Studios ----

#[test]
fn test_drawing_strokes_and_palette() {
    let (mut engine, _) = engine_with_store(15);
    engine.start_game(GameKind::Drawing);
    engine.handle_input(InputEvent::PointerDown { x: 100.0, y: 100.0 });
    engine.handle_input(InputEvent::PointerDrag { x: 120.0, y: 100.0 });
    engine.handle_input(InputEvent::PointerDrag { x: 140.0, y: 110.0 });
    engine.handle_input(InputEvent::PointerUp { x: 140.0, y: 110.0 });
    // Red swatch.
    engine.handle_input(InputEvent::PointerDown { x: 40.0, y: 480.0 });

    match engine.game() {
        Some(Game::Drawing(studio)) => {
            assert_eq!(studio.stroke_count(), 2);
            assert_eq!(studio.color(), crate::core::types::Color::RED);
        }
        _ => panic!("drawing should be running"),
    }

    // Clear button.
    engine.handle_input(InputEvent::PointerDown { x: 550.0, y: 480.0 });
    match engine.game() {
        Some(Game::Drawing(studio)) => assert_eq!(studio.stroke_count(), 0),
        _ => panic!("drawing should be running"),
    }
    assert!(engine.snapshot().hud.is_none());
}

#[test]
fn test_animation_record_and_navigate() {
    let (mut engine, _) = engine_with_store(16);
    engine.start_game(GameKind::Animation);

    // Drag the purple circle by (10, 10) and record.
    engine.handle_input(InputEvent::PointerDown { x: 300.0, y: 250.0 });
    engine.handle_input(InputEvent::PointerDrag { x: 310.0, y: 260.0 });
    engine.handle_input(InputEvent::PointerUp { x: 310.0, y: 260.0 });
    engine.handle_input(key(Key::Char('r')));

    let (first, second) = match engine.game() {
        Some(Game::Animation(studio)) => {
            assert_eq!(studio.frames().len(), 2);
            assert_eq!(studio.frames().cursor(), 1);
            let second = studio.capture();
            assert_eq!(
                second.get(&ShapeId(1)),
                Some(&ShapeSnapshot::Oval {
                    bounds: Aabb::new(290.0, 240.0, 330.0, 280.0),
                    fill: crate::core::types::Color::PURPLE,
                })
            );
            (studio.frames().get(0).cloned(), second)
        }
        _ => panic!("animation should be running"),
    };

    engine.handle_input(key(Key::Left));
    match engine.game() {
        Some(Game::Animation(studio)) => {
            assert_eq!(Some(studio.capture()), first);
        }
        _ => panic!("animation should be running"),
    }

    engine.handle_input(key(Key::Right));
    match engine.game() {
        Some(Game::Animation(studio)) => assert_eq!(studio.capture(), second),
        _ => panic!("animation should be running"),
    }
    assert!(engine
        .snapshot()
        .events
        .contains(&GameEvent::FrameShown { index: 2, total: 2 }));
}

#[test]
fn test_animation_playback_locks_editing() {
    let (mut engine, _) = engine_with_store(17);
    engine.start_game(GameKind::Animation);
    engine.handle_input(key(Key::Char('r')));
    engine.handle_input(key(Key::Space));

    let before = match engine.game_mut() {
        Some(Game::Animation(studio)) => {
            assert!(studio.is_playing());
            let shape = studio.shapes()[0];
            assert!(!studio.move_shape(shape, Vec2::new(5.0, 5.0)));
            studio.capture()
        }
        _ => panic!("animation should be running"),
    };
    engine.handle_input(InputEvent::PointerDown { x: 300.0, y: 250.0 });
    engine.handle_input(InputEvent::PointerDrag { x: 340.0, y: 250.0 });

    engine.advance(100);
    match engine.game() {
        Some(Game::Animation(studio)) => {
            assert_eq!(studio.frames().cursor(), 0, "playback wraps");
            assert_eq!(studio.capture(), before);
        }
        _ => panic!("animation should be running"),
    }

    engine.handle_input(key(Key::Space));
    match engine.game() {
        Some(Game::Animation(studio)) => assert!(!studio.is_playing()),
        _ => panic!("animation should be running"),
    }
}

#[test]
fn test_animation_clear_all_restarts_sequence() {
    let (mut engine, _) = engine_with_store(18);
    engine.start_game(GameKind::Animation);
    engine.handle_input(key(Key::Char('r')));
    engine.handle_input(key(Key::Char('r')));
    engine.handle_input(key(Key::Char('x')));
    match engine.game() {
        Some(Game::Animation(studio)) => {
            assert_eq!(studio.frames().len(), 1);
            assert_eq!(studio.shapes().len(), 2);
        }
        _ => panic!("animation should be running"),
    }
}

// ---- High scores ----

#[test]
fn test_leaving_game_saves_score() {
    let (mut engine, store) = at_menu(19);
    engine.start_game(GameKind::Breakout);
    engine.add_score(40);
    engine.handle_input(key(Key::Escape));

    assert_eq!(engine.scene_tag(), SceneTag::Menu);
    assert_eq!(engine.high_scores().get(GameKind::Breakout), 40);
    assert_eq!(store.contents().and_then(|s| s.get("breakout").copied()), Some(40));
    let menu = engine.snapshot().menu.expect("menu overlay");
    assert!(menu.lines.contains(&"Breakout High Score: 40".to_string()));
}

#[test]
fn test_menu_button_leaves_scored_game() {
    let (mut engine, _) = at_menu(20);
    engine.start_game(GameKind::Snake);
    engine.handle_input(InputEvent::PointerDown { x: 560.0, y: 45.0 });
    assert_eq!(engine.scene_tag(), SceneTag::Menu);
}

#[test]
fn test_reset_high_scores_from_menu() {
    let (mut engine, store) = at_menu(21);
    engine.start_game(GameKind::Snake);
    engine.add_score(70);
    engine.return_to_menu();
    assert_eq!(engine.high_scores().get(GameKind::Snake), 70);

    engine.handle_input(key(Key::Up));
    engine.handle_input(key(Key::Up));
    engine.handle_input(key(Key::Enter));

    assert_eq!(engine.scene_tag(), SceneTag::Menu);
    assert_eq!(engine.high_scores().get(GameKind::Snake), 0);
    let stored = store.contents().expect("reset persists");
    assert!(stored.values().all(|v| *v == 0));
    assert_eq!(stored.len(), GameKind::ALL.len());
}

#[test]
fn test_save_high_score_only_when_better() {
    let (mut engine, _) = engine_with_store(22);
    engine.start_game(GameKind::Flight);
    engine.add_score(12);
    assert!(engine.save_high_score(GameKind::Flight));
    assert!(!engine.save_high_score(GameKind::Flight));
    assert!(!engine.save_high_score(GameKind::Drawing));
}

#[test]
fn test_file_store_missing_and_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("highscores.json");

    let store = JsonFileStore::new(&path);
    assert!(store.load().unwrap().is_none());
    let scores = HighScores::load(Box::new(store));
    assert!(GameKind::ALL.iter().all(|k| scores.get(*k) == 0));

    std::fs::write(&path, "{ not json").unwrap();
    let store = JsonFileStore::new(&path);
    assert!(store.load().is_err());
    let scores = HighScores::load(Box::new(store));
    assert_eq!(scores.get(GameKind::Snake), 0);
}

#[test]
fn test_file_store_round_trip_keeps_unknown_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("highscores.json");
    std::fs::write(&path, r#"{"snake": 40, "pinball": 9}"#).unwrap();

    let mut scores = HighScores::load(Box::new(JsonFileStore::new(&path)));
    assert_eq!(scores.get(GameKind::Snake), 40);
    assert!(scores.record(GameKind::Breakout, 15));

    let stored = JsonFileStore::new(&path).load().unwrap().unwrap();
    assert_eq!(stored.get("breakout"), Some(&15));
    assert_eq!(stored.get("snake"), Some(&40));
    assert_eq!(stored.get("pinball"), Some(&9));
    assert_eq!(stored.get("earthprotector"), Some(&0));
}

#[test]
fn test_engine_persists_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig {
        seed: 23,
        high_score_path: Some(dir.path().join("scores.json")),
    };

    let mut engine = ArcadeEngine::new(config.clone());
    engine.start_game(GameKind::Breakout);
    engine.add_score(25);
    engine.return_to_menu();
    drop(engine);

    let engine = ArcadeEngine::new(config);
    assert_eq!(engine.high_scores().get(GameKind::Breakout), 25);
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let (mut engine_a, _) = engine_with_store(12345);
    let (mut engine_b, _) = engine_with_store(12345);
    engine_a.start_game(GameKind::DefenseGame);
    engine_b.start_game(GameKind::DefenseGame);

    for _ in 0..200 {
        let snap_a = engine_a.frame(30);
        let snap_b = engine_b.frame(30);
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let (mut engine_a, _) = engine_with_store(111);
    let (mut engine_b, _) = engine_with_store(222);
    let json_a = serde_json::to_string(&engine_a.frame(0)).unwrap();
    let json_b = serde_json::to_string(&engine_b.frame(0)).unwrap();
    assert_ne!(json_a, json_b, "cloud layout comes from the seed");
}

#[test]
fn test_queued_input_applies_on_frame() {
    let (mut engine, _) = at_menu(24);
    engine.queue_input(key(Key::Enter));
    assert_eq!(engine.scene_tag(), SceneTag::Menu);
    let snap = engine.frame(30);
    assert_eq!(snap.scene, SceneTag::Playing(GameKind::DefenseGame));
    assert!(snap.hud.is_some());
}
