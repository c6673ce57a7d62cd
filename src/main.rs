//! Headless host for Cannon Arena
//!
//! Drives the engine with a scripted gunner instead of a window: aim at the
//! nearest target, charge for a while, release, repeat. Useful for watching
//! the simulation through the log and for balance experiments.
//!
//! Usage: `cannon-arena [settings.json] [ticks]`

use cannon_arena::platform::{FixedStepClock, InputEvent, Key, PointerButton, TickInput};
use cannon_arena::sim::{GameEvent, SimulationManager, World};
use cannon_arena::{ConfigError, Settings};
use glam::Vec2;

/// Ticks spent charging before each release
const CHARGE_TICKS: u64 = 12;
/// Ticks between the end of one shot and the next press
const COOLDOWN_TICKS: u64 = 8;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ConfigError> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let max_ticks = tick_limit(args.next(), u64::from(settings.ticks_per_second) * 120)?;

    log::info!("Cannon Arena (headless) starting...");
    let clock = FixedStepClock::new(settings.ms_per_tick());
    let mut manager = SimulationManager::new(settings, clock)?;
    manager.start();

    let mut destroyed = 0usize;
    let mut hits = 0usize;
    for t in 0..max_ticks {
        let input = scripted_input(manager.world(), t);
        let done = manager.process(&input);
        for event in manager.drain_events() {
            match event {
                GameEvent::TargetDestroyed { .. } => destroyed += 1,
                GameEvent::CannonHit { .. } => hits += 1,
                GameEvent::MissionStarted { index, targets } => {
                    log::info!("Mission {} underway with {} targets", index, targets)
                }
                _ => {}
            }
        }
        if done {
            break;
        }
    }
    // Press escape like a player would
    manager.process(&TickInput::new(vec![InputEvent::KeyDown(Key::Escape)], None));

    let score = manager.score();
    log::info!(
        "Session over: destroyed {} ({} events), used {}, bomb hits {} ({} events), total {}",
        score.destroyed,
        destroyed,
        score.used,
        score.hits_taken,
        hits,
        score.score()
    );
    let frame = manager.frame();
    for line in &frame.score_lines {
        println!("{}", line.text);
    }
    Ok(())
}

/// Session length from the command line, `default` when absent
fn tick_limit(arg: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match arg {
        None => Ok(default),
        Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
            field: "ticks",
            reason: format!("`{raw}` is not a tick count: {e}"),
        }),
    }
}

/// One tick of the scripted gunner
fn scripted_input(world: &World, t: u64) -> TickInput {
    let cannon = world.player.state.pos;
    let aim = world
        .targets
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance_squared(cannon)
                .total_cmp(&b.pos.distance_squared(cannon))
        })
        .map(|target| target.pos)
        .unwrap_or(Vec2::new(world.settings.width / 2.0, 0.0));

    let phase = t % (CHARGE_TICKS + COOLDOWN_TICKS);
    let mut events = Vec::new();
    if phase == 0 {
        events.push(InputEvent::PointerDown {
            pos: aim,
            button: PointerButton::Primary,
        });
    } else if phase == CHARGE_TICKS {
        events.push(InputEvent::PointerUp {
            button: PointerButton::Primary,
        });
    }
    // Dodge bombs that are about to land on the cannon
    let threatened = world
        .bombs
        .iter()
        .any(|b| (b.pos.x - cannon.x).abs() < 30.0 && b.pos.y < cannon.y);
    if threatened {
        events.push(InputEvent::KeyDown(Key::Down));
    }
    TickInput::new(events, Some(aim))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_limit_defaults_when_absent() {
        assert_eq!(tick_limit(None, 1800).unwrap(), 1800);
        assert_eq!(tick_limit(Some("250".into()), 1800).unwrap(), 250);
    }

    #[test]
    fn test_tick_limit_rejects_garbage() {
        for raw in ["ten", "-5", "1.5", ""] {
            let err = tick_limit(Some(raw.into()), 1800).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { field: "ticks", .. }));
        }
    }
}
