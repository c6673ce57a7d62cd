//! Per-tick simulation procedure
//!
//! One call to [`tick`] runs the whole update in a fixed order: input,
//! aim, movement, collisions, cleanup, then mission regeneration.

use glam::Vec2;
use rand::Rng;

use super::body::Body;
use super::bomb::Bomb;
use super::collision::{struck_targets, sweep};
use super::state::{GameEvent, World};
use super::target::{Drift, Motion, Target};
use crate::platform::input::{InputEvent, Key, PointerButton, TickInput};

/// Advance the world by one tick. Returns true when the host should quit.
pub fn tick(world: &mut World, input: &TickInput, now_ms: u64) -> bool {
    world.time_ticks += 1;

    let done = handle_events(world, &input.events, now_ms);

    if let Some(pointer) = input.pointer.filter(|p| world.contains(*p)) {
        world.player.set_angle(pointer);
    }
    world.enemy.aim_at_user(world.player.state.pos);

    if world.settings.enemy_auto_fire {
        let last_player_shot = world.player.state.last_fired_ms.unwrap_or(0);
        if let Some(shell) = world.enemy.shoot(last_player_shot, now_ms, &mut world.rng) {
            log::debug!("Enemy auto-fire at {} ms", now_ms);
            world.events.push(GameEvent::EnemyShotFired {
                vel: shell.vel,
                auto: true,
            });
            world.enemy_shells.push(shell);
        }
    }

    advance(world);
    resolve_target_hits(world);
    resolve_bombs(world);
    remove_dead_shells(world);

    if world.mission_cleared() {
        new_mission(world);
    }

    log::trace!(
        "Tick {}: {} shells, {} enemy shells, {} targets, {} bombs",
        world.time_ticks,
        world.shells.len(),
        world.enemy_shells.len(),
        world.targets.len(),
        world.bombs.len()
    );

    done
}

/// Dispatch this tick's input events in arrival order
fn handle_events(world: &mut World, events: &[InputEvent], now_ms: u64) -> bool {
    let mut done = false;
    let step = world.settings.move_step;
    for event in events {
        match *event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => done = true,
            InputEvent::KeyDown(key) => {
                move_player(world, key, step);
                // The enemy repositions every time the player does
                world.enemy.cannon_movement(&mut world.rng);
            }
            InputEvent::PointerDown { pos, button } => {
                world.aim_point = Some(pos);
                if world.contains(pos) {
                    world.player.set_angle(pos);
                }
                if button == PointerButton::Primary {
                    world.player.activate();
                    world.enemy.activate();
                }
            }
            InputEvent::PointerUp {
                button: PointerButton::Primary,
            } => fire_volley(world, now_ms),
            InputEvent::PointerUp { .. } => {}
        }
    }
    done
}

fn move_player(world: &mut World, key: Key, step: f32) {
    match key {
        Key::Up => world.player.vertical_move(-step),
        Key::Down => world.player.vertical_move(step),
        Key::Left => world.player.horizontal_move(-step),
        Key::Right => world.player.horizontal_move(step),
        Key::Escape => {}
    }
}

/// Player fires, and the enemy answers with a shot of its own
fn fire_volley(world: &mut World, now_ms: u64) {
    let shell = world.player.strike(now_ms, &mut world.rng);
    log::debug!("Player fired at {:?} with velocity {:?}", shell.pos, shell.vel);
    world.events.push(GameEvent::ShotFired { vel: shell.vel });
    world.shells.push(shell);

    world.enemy.aim_at_user(world.player.state.pos);
    let reply = world.enemy.strike(now_ms, &mut world.rng);
    world.events.push(GameEvent::EnemyShotFired {
        vel: reply.vel,
        auto: false,
    });
    world.enemy_shells.push(reply);

    world.score.used += 1;
}

/// Move every body one step and charge the player cannon
fn advance(world: &mut World) {
    let ballistics = world.ballistics;
    for shell in world.shells.iter_mut().chain(world.enemy_shells.iter_mut()) {
        shell.advance(&ballistics);
    }
    for target in &mut world.targets {
        target.advance(&mut world.rng);
    }
    for bomb in &mut world.bombs {
        bomb.advance();
    }
    world.player.gain(world.settings.charge_step);
}

/// Remove every target touched by a live player shell
///
/// A target hit by several shells in the same tick counts once. Removal goes
/// from the highest index down so the remaining indices stay valid.
fn resolve_target_hits(world: &mut World) {
    let hits = sweep(&world.shells, &world.targets, |s| s.alive);
    if hits.is_empty() {
        return;
    }
    for j in struck_targets(&hits).into_iter().rev() {
        let target = world.targets.remove(j);
        world.score.destroyed += 1;
        log::debug!(
            "Target destroyed at {:?} (radius {})",
            target.pos,
            target.radius
        );
        world.events.push(GameEvent::TargetDestroyed {
            pos: target.pos,
            radius: target.radius,
        });
    }
}

/// Bombs that reach the player cannon are spent on it; bombs below the
/// floor are dropped
fn resolve_bombs(world: &mut World) {
    let height = world.bounds().y;
    for bomb in &mut world.bombs {
        if bomb.collides_with(&world.player) {
            bomb.alive = false;
            world.score.hits_taken += 1;
            log::debug!("Bomb hit the player cannon at {:?}", bomb.pos);
            world.events.push(GameEvent::CannonHit { pos: bomb.pos });
        } else if bomb.below(height) {
            bomb.alive = false;
        }
    }
    world.bombs.retain(|b| b.alive);
}

/// Drop dead shells from both lists by shared index
///
/// Player and enemy shells are fired in pairs, so a dead shell at index i
/// in either list removes index i from both.
fn remove_dead_shells(world: &mut World) {
    let mut dead: Vec<usize> = world
        .shells
        .iter()
        .enumerate()
        .chain(world.enemy_shells.iter().enumerate())
        .filter(|(_, s)| !s.alive)
        .map(|(i, _)| i)
        .collect();
    dead.sort_unstable();
    dead.dedup();
    for &i in dead.iter().rev() {
        if i < world.shells.len() {
            world.shells.remove(i);
        }
        if i < world.enemy_shells.len() {
            world.enemy_shells.remove(i);
        }
    }
}

/// Inclusive target radius range for a given score
///
/// Both ends shrink as the (non-negative) score grows and never drop
/// below 1.
pub fn radius_bounds(max_radius: i32, progress: u32) -> (i32, i32) {
    let max_radius = i64::from(max_radius.max(1));
    let progress = i64::from(progress);
    let lo = (max_radius - 2 * progress).max(1);
    let hi = (max_radius - progress).max(lo);
    (lo as i32, hi as i32)
}

/// Spawn a wave: `n_targets` drifting and `n_targets` static targets, plus
/// one bomb per new target at its spawn point
pub fn new_mission(world: &mut World) {
    let (lo, hi) = radius_bounds(world.settings.max_target_radius, world.score.progress());
    let bounds = world.bounds();
    let (bomb_speed, bomb_radius) = (world.settings.bomb_speed, world.settings.bomb_radius);

    let first = world.targets.len();
    for _ in 0..world.settings.n_targets {
        let radius = world.rng.random_range(lo..=hi);
        let drift = Drift::random(&mut world.rng);
        let moving = Target::spawn(&mut world.rng, bounds, radius, Motion::Drifting(drift));
        world.targets.push(moving);

        let radius = world.rng.random_range(lo..=hi);
        let fixed = Target::spawn(&mut world.rng, bounds, radius, Motion::Stationary);
        world.targets.push(fixed);
    }

    let spawn_points: Vec<Vec2> = world.targets[first..].iter().map(|t| t.pos).collect();
    world.bombs.extend(
        spawn_points
            .into_iter()
            .map(|pos| Bomb::falling(pos, bomb_speed, bomb_radius)),
    );

    world.missions += 1;
    let spawned = world.targets.len() - first;
    log::info!(
        "Mission {}: {} targets, radius {}..={}, score {}",
        world.missions,
        spawned,
        lo,
        hi,
        world.score.score()
    );
    world.events.push(GameEvent::MissionStarted {
        index: world.missions,
        targets: spawned,
    });
}
