//! Strider entry point
//!
//! Headless shell: runs one scripted demo run to completion and persists
//! the result. Stands in for a windowed frontend; the autopilot exercises
//! the same semantic input surface a real input handler would.

use std::path::Path;

use strider::consts::*;
use strider::sim::{EntityKind, GameEvent, GamePhase, GameSession, ObstacleKind};
use strider::{SaveData, Settings};

const SAVE_FILE: &str = "save_data.json";
const SETTINGS_FILE: &str = "settings.json";

/// Simple pilot: roll under arrows, attack enemies, jump everything else
fn drive(session: &mut GameSession) {
    let player_right = session.player().rect.right();

    let next_obstacle = session
        .entities()
        .filter(|e| matches!(e.kind, EntityKind::Obstacle(_)))
        .filter(|e| e.rect.right() > player_right - 40.0)
        .min_by(|a, b| a.rect.min.x.total_cmp(&b.rect.min.x))
        .map(|e| (e.kind, e.rect.min.x - player_right));

    let Some((kind, gap)) = next_obstacle else {
        return;
    };
    if gap > 120.0 {
        return;
    }

    match kind {
        EntityKind::Obstacle(ObstacleKind::Arrow) => session.start_roll(),
        EntityKind::Obstacle(ObstacleKind::Enemy) => {
            session.attack();
            if gap < 40.0 {
                session.jump();
            }
        }
        EntityKind::Obstacle(ObstacleKind::Normal) => {
            if gap < 90.0 {
                session.jump();
            }
        }
        _ => {}
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(rand::random);

    let mut save = SaveData::load(Path::new(SAVE_FILE));
    let settings = Settings::load(Path::new(SETTINGS_FILE));
    log::info!(
        "high score {}, coin bank {}",
        save.high_score,
        save.total_coins
    );

    let mut session = GameSession::new(seed, &save.upgrades);
    if settings.hitbox_visible {
        session.toggle_hitbox_debug();
    }

    // Fixed-step frames, capped run length so the demo always terminates
    let dt = 1000 / FRAME_RATE;
    let max_frames = FRAME_RATE * 60 * 5;
    let mut frames = 0;
    while session.phase() == GamePhase::Running && frames < max_frames {
        drive(&mut session);
        session.update(dt);

        for event in session.drain_events() {
            match event {
                GameEvent::CollectibleAcquired if settings.sound_effects_enabled => {
                    log::debug!("collectible chime");
                }
                GameEvent::EnemyDefeated if settings.sound_effects_enabled => {
                    log::debug!("enemy down");
                }
                GameEvent::ShieldBroken if settings.sound_effects_enabled => {
                    log::debug!("shield shatter");
                }
                GameEvent::MusicContextChanged(context) if settings.music_enabled => {
                    log::debug!("music context: {context:?}");
                }
                GameEvent::RunEnded => log::debug!("run ended"),
                _ => {}
            }
        }
        frames += 1;
    }

    match session.summary() {
        Some(summary) => {
            log::info!(
                "run over after {frames} frames: score {}, coins {}",
                summary.final_score,
                summary.final_coins
            );
            save.record_run(&summary);
            if let Err(e) = save.save(Path::new(SAVE_FILE)) {
                log::error!("failed to write save: {e}");
            }
        }
        None => log::info!(
            "demo cap reached at score {} with {} coins; nothing persisted",
            session.score(),
            session.coins()
        ),
    }
}
