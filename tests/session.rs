use cannon_arena::Settings;
use cannon_arena::platform::{FixedStepClock, InputEvent, Key, PointerButton, TickInput};
use cannon_arena::sim::{GameEvent, Lifecycle, Motion, SimulationManager, Target};
use glam::Vec2;

fn start(settings: Settings) -> SimulationManager<FixedStepClock> {
    let clock = FixedStepClock::new(settings.ms_per_tick());
    let mut manager = SimulationManager::new(settings, clock).unwrap();
    manager.start();
    manager
}

fn seeded(seed: u64) -> Settings {
    Settings {
        seed,
        ..Default::default()
    }
}

fn count_missions(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::MissionStarted { .. }))
        .count()
}

// ── Mission lifecycle ─────────────────────────────────────────────────────────

#[test]
fn start_spawns_first_mission() {
    let mut m = start(seeded(1));
    let world = m.world();
    assert_eq!(world.targets.len(), 2 * world.settings.n_targets);
    assert_eq!(world.bombs.len(), world.targets.len());
    assert_eq!(count_missions(&m.drain_events()), 1);
}

#[test]
fn clearing_a_mission_spawns_exactly_one_more() {
    let mut m = start(seeded(2));
    {
        let world = m.world_mut();
        world.targets.clear();
        world.bombs.clear();
        world
            .targets
            .push(Target::new(Vec2::new(60.0, 300.0), 30.0, Motion::Stationary));
    }
    m.drain_events();

    // Aim straight right and fire at minimum charge
    assert!(!m.process(&TickInput::click(Vec2::new(400.0, 300.0))));
    let score = m.score();
    assert_eq!(score.destroyed, 1);
    assert_eq!(score.used, 1);
    assert_eq!(score.score(), 0);
    // Target gone, but the shell is still flying
    assert!(m.world().targets.is_empty());
    assert!(!m.world().shells.is_empty());

    let mut events = m.drain_events();
    for _ in 0..3000 {
        if !m.world().targets.is_empty() {
            break;
        }
        m.process(&TickInput::default());
        events.extend(m.drain_events());
    }
    assert_eq!(count_missions(&events), 1);
    assert_eq!(m.world().missions, 2);
    assert_eq!(m.world().targets.len(), 2 * m.world().settings.n_targets);
}

#[test]
fn two_shells_on_one_target_count_once() {
    let mut m = start(seeded(3));
    {
        let world = m.world_mut();
        world.targets.clear();
        world.bombs.clear();
        world
            .targets
            .push(Target::new(Vec2::new(60.0, 300.0), 30.0, Motion::Stationary));
        world
            .targets
            .push(Target::new(Vec2::new(700.0, 100.0), 10.0, Motion::Stationary));
    }
    let up = InputEvent::PointerUp {
        button: PointerButton::Primary,
    };
    let down = InputEvent::PointerDown {
        pos: Vec2::new(400.0, 300.0),
        button: PointerButton::Primary,
    };
    let input = TickInput::new(vec![down, up, down, up], Some(Vec2::new(400.0, 300.0)));
    m.process(&input);
    assert_eq!(m.score().used, 2);
    assert_eq!(m.score().destroyed, 1);
    assert_eq!(m.world().targets.len(), 1);
}

// ── Lifecycle and input ───────────────────────────────────────────────────────

#[test]
fn escape_stops_the_session() {
    let mut m = start(seeded(4));
    assert!(!m.process(&TickInput::default()));
    assert!(m.process(&TickInput::new(vec![InputEvent::KeyDown(Key::Escape)], None)));
    assert_eq!(m.lifecycle(), Lifecycle::Stopped);
    let ticks = m.world().time_ticks;
    assert!(m.process(&TickInput::click(Vec2::new(100.0, 100.0))));
    assert_eq!(m.world().time_ticks, ticks);
    assert_eq!(m.score().used, 0);
}

#[test]
fn player_cannon_stays_inside_margin() {
    let mut m = start(seeded(5));
    let up = TickInput::new(vec![InputEvent::KeyDown(Key::Up); 10], None);
    let left = TickInput::new(vec![InputEvent::KeyDown(Key::Left); 10], None);
    for _ in 0..20 {
        m.process(&up);
        m.process(&left);
    }
    assert_eq!(m.world().player.state.pos, Vec2::new(30.0, 30.0));
    let enemy = m.world().enemy.cannon.state.pos;
    assert!((30.0..=770.0).contains(&enemy.x));
    assert!((30.0..=570.0).contains(&enemy.y));
}

// ── Whole sessions ────────────────────────────────────────────────────────────

fn scripted(t: u64) -> TickInput {
    let aim = Vec2::new(200.0 + (t % 7) as f32 * 80.0, 150.0 + (t % 5) as f32 * 60.0);
    match t % 15 {
        0 => TickInput::new(
            vec![InputEvent::PointerDown {
                pos: aim,
                button: PointerButton::Primary,
            }],
            Some(aim),
        ),
        10 => TickInput::new(
            vec![InputEvent::PointerUp {
                button: PointerButton::Primary,
            }],
            Some(aim),
        ),
        12 => TickInput::new(vec![InputEvent::KeyDown(Key::Down)], Some(aim)),
        _ => TickInput::new(Vec::new(), Some(aim)),
    }
}

#[test]
fn same_seed_same_session() {
    let mut a = start(seeded(99));
    let mut b = start(seeded(99));
    for t in 0..600 {
        a.process(&scripted(t));
        b.process(&scripted(t));
    }
    assert_eq!(a.score(), b.score());
    assert_eq!(a.frame(), b.frame());
    assert_eq!(a.drain_events(), b.drain_events());
}

#[test]
fn shells_stay_inside_configured_arena() {
    let settings = Settings::from_json_str(
        r#"{ "width": 1024, "height": 768, "n_targets": 2, "seed": 17, "enemy_auto_fire": true }"#,
    )
    .unwrap();
    let mut m = start(settings);
    assert_eq!(m.world().enemy.cannon.state.pos, Vec2::new(994.0, 384.0));
    for t in 0..900 {
        m.process(&scripted(t));
        let world = m.world();
        for shell in world.shells.iter().chain(&world.enemy_shells) {
            assert!(shell.pos.x >= shell.radius && shell.pos.x <= 1024.0 - shell.radius);
            assert!(shell.pos.y >= shell.radius && shell.pos.y <= 768.0 - shell.radius);
        }
        for bomb in &world.bombs {
            assert!(bomb.pos.y <= 768.0);
        }
    }
    assert_eq!(m.score().used, 60);
}

#[test]
fn frame_reports_score_text() {
    let mut m = start(seeded(6));
    m.process(&TickInput::click(Vec2::new(400.0, 50.0)));
    let frame = m.frame();
    let text: Vec<&str> = frame.score_lines.iter().map(|l| l.text.as_str()).collect();
    let score = m.score();
    assert_eq!(text[0], format!("Destroyed: {}", score.destroyed));
    assert_eq!(text[1], "Balls used: 1");
    assert_eq!(text[2], format!("Total: {}", score.score()));
}
