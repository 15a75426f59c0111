//! Per-frame collision resolution
//!
//! Runs once per frame after every stream has advanced. Policy, in order:
//! attack hits destroy enemies (never the run), obstacles either drain the
//! shield or end the run, coins and pickups are collected. Entities are
//! marked during iteration and removed in a single compaction pass so the
//! lists are never mutated mid-scan.

use super::player::Player;
use super::powerup::{HitResult, PowerupRuntime};
use super::session::GameEvent;
use super::stream::{EntityKind, EntityStream, ObstacleKind};
use crate::consts::ENEMY_KILL_BONUS;

/// Destroy enemies overlapping the live attack hitbox, awarding the kill
/// bonus. An enemy removed here can no longer collide with the player.
pub fn resolve_attacks(
    player: &mut Player,
    obstacles: &mut EntityStream,
    events: &mut Vec<GameEvent>,
) {
    let Some(attack_box) = player.attack_hitbox() else {
        return;
    };

    let mut killed: Vec<usize> = Vec::new();
    for (i, entity) in obstacles.entities.iter().enumerate() {
        if entity.kind == EntityKind::Obstacle(ObstacleKind::Enemy)
            && attack_box.intersects(&entity.rect)
        {
            killed.push(i);
        }
    }

    for &i in killed.iter().rev() {
        obstacles.entities.remove(i);
        player.score += ENEMY_KILL_BONUS;
        events.push(GameEvent::EnemyDefeated);
    }
}

/// Test the player's collision box against every obstacle. While the shield
/// is up a hit removes the obstacle and drains a charge; otherwise the first
/// hit ends the run and resolution stops there.
pub fn resolve_obstacles(
    player: &Player,
    obstacles: &mut EntityStream,
    shield: &mut PowerupRuntime,
    events: &mut Vec<GameEvent>,
) -> bool {
    let hitbox = player.collision_box();

    let mut absorbed: Vec<usize> = Vec::new();
    let mut run_ended = false;
    for (i, entity) in obstacles.entities.iter().enumerate() {
        if !hitbox.intersects(&entity.rect) {
            continue;
        }
        if shield.is_active() {
            absorbed.push(i);
            if shield.register_hit() == Some(HitResult::Consumed) {
                events.push(GameEvent::ShieldBroken);
            }
        } else {
            run_ended = true;
            break;
        }
    }

    for &i in absorbed.iter().rev() {
        obstacles.entities.remove(i);
    }
    run_ended
}

/// Collect coins overlapping the player
pub fn resolve_coins(player: &mut Player, coins: &mut EntityStream, events: &mut Vec<GameEvent>) {
    let hitbox = player.collision_box();

    let mut collected: Vec<usize> = Vec::new();
    for (i, entity) in coins.entities.iter().enumerate() {
        if hitbox.intersects(&entity.rect) {
            collected.push(i);
        }
    }

    for &i in collected.iter().rev() {
        coins.entities.remove(i);
        player.coins += 1;
        events.push(GameEvent::CollectibleAcquired);
    }
}

/// Collect a pickup of one powerup kind. Activation clears every other
/// instance of the kind, so a pickup never coexists with its active effect.
pub fn resolve_pickups(
    player: &Player,
    pickups: &mut EntityStream,
    state: &mut PowerupRuntime,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
) {
    let hitbox = player.collision_box();

    let touched = pickups
        .entities
        .iter()
        .any(|entity| hitbox.intersects(&entity.rect));
    if touched {
        pickups.entities.clear();
        state.on_pickup(now_ms);
        events.push(GameEvent::CollectibleAcquired);
    }
}
