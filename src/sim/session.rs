//! Frame orchestration for one run
//!
//! `GameSession` owns every piece of per-run state and advances it in a
//! fixed order each frame: player kinematics, entity streams, powerup
//! expiry, collision resolution, score accrual, terminal check. The whole
//! step is a pure function of (state, dt, accumulated time); the only
//! randomness is the session-owned seeded generator, so identical seeds and
//! inputs replay identically.
//!
//! A session covers exactly one run. After the terminal transition it
//! freezes; the host reads the summary, persists it, and builds a fresh
//! session for the next run.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision;
use super::player::Player;
use super::powerup::{PowerupKind, PowerupRuntime};
use super::stream::{Entity, EntityStream, FrameContext, StreamKind};
use crate::consts::*;
use crate::progression::ProgressionStore;

/// Current run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    /// Terminal; the session no longer advances
    GameOver,
}

/// Which music the host should be playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicContext {
    Menu,
    Gameplay,
}

/// Discrete notifications for the audio/UI host, drained each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Coin or powerup collected
    CollectibleAcquired,
    /// Enemy destroyed by an attack
    EnemyDefeated,
    /// Shield absorbed its final hit
    ShieldBroken,
    RunEnded,
    MusicContextChanged(MusicContext),
}

/// Final tallies surfaced to the persistence collaborator at run end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub final_score: u64,
    pub final_coins: u64,
}

/// One powerup kind's world pickups and activation state, wired together
#[derive(Debug, Clone)]
pub struct PowerupSlot {
    pub stream: EntityStream,
    pub state: PowerupRuntime,
}

impl PowerupSlot {
    fn new(stream: EntityStream, state: PowerupRuntime) -> Self {
        Self { stream, state }
    }
}

/// A single run of the game
#[derive(Debug, Clone)]
pub struct GameSession {
    seed: u64,
    /// Accumulated simulation time (ms); the only clock the sim sees
    now_ms: u64,
    phase: GamePhase,
    player: Player,
    obstacles: EntityStream,
    coins: EntityStream,
    double_jump: PowerupSlot,
    shield: PowerupSlot,
    multiplier: PowerupSlot,
    rng: Pcg32,
    events: Vec<GameEvent>,
    hitbox_debug: bool,
}

impl GameSession {
    /// Start a run. Spawn cadences and powerup magnitudes come from the
    /// upgrade ledger, fixed for the whole run.
    pub fn new(seed: u64, store: &ProgressionStore) -> Self {
        let params = store.derive();
        log::info!("run started (seed {seed})");

        let mut session = Self {
            seed,
            now_ms: 0,
            phase: GamePhase::Running,
            player: Player::new(),
            obstacles: EntityStream::new(StreamKind::Obstacles, OBSTACLE_INTERVAL_MS),
            coins: EntityStream::new(StreamKind::Coins, COIN_INTERVAL_MS),
            double_jump: PowerupSlot::new(
                EntityStream::new(
                    StreamKind::Pickups(PowerupKind::DoubleJump),
                    params.double_jump_spawn_interval_ms,
                ),
                PowerupRuntime::double_jump(params.double_jump_duration_ms),
            ),
            shield: PowerupSlot::new(
                EntityStream::new(
                    StreamKind::Pickups(PowerupKind::Shield),
                    params.shield_spawn_interval_ms,
                ),
                PowerupRuntime::shield(params.max_shield_hits),
            ),
            multiplier: PowerupSlot::new(
                EntityStream::new(
                    StreamKind::Pickups(PowerupKind::Multiplier),
                    params.multiplier_spawn_interval_ms,
                ),
                PowerupRuntime::multiplier(MULTIPLIER_DURATION_MS, params.multiplier_magnitude),
            ),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            hitbox_debug: false,
        };
        session
            .events
            .push(GameEvent::MusicContextChanged(MusicContext::Gameplay));
        session
    }

    /// Advance one frame. `dt_ms` is wall-clock time since the previous
    /// frame, already capped by the host's frame-rate limiter. A no-op once
    /// the run has ended.
    pub fn update(&mut self, dt_ms: u32) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.now_ms += dt_ms as u64;
        let now = self.now_ms;

        self.player.advance(dt_ms, now);

        let ctx = FrameContext::default();
        self.obstacles.advance(dt_ms, true, &ctx, &mut self.rng);
        self.coins.advance(dt_ms, true, &ctx, &mut self.rng);
        for slot in [
            &mut self.double_jump,
            &mut self.shield,
            &mut self.multiplier,
        ] {
            // No new pickups while the effect is in force
            let spawn_allowed = !slot.state.is_active();
            slot.stream.advance(dt_ms, spawn_allowed, &ctx, &mut self.rng);
        }
        for slot in [
            &mut self.double_jump,
            &mut self.shield,
            &mut self.multiplier,
        ] {
            slot.state.tick(now);
        }

        collision::resolve_attacks(&mut self.player, &mut self.obstacles, &mut self.events);
        let run_ended = collision::resolve_obstacles(
            &self.player,
            &mut self.obstacles,
            &mut self.shield.state,
            &mut self.events,
        );
        collision::resolve_coins(&mut self.player, &mut self.coins, &mut self.events);
        for slot in [
            &mut self.double_jump,
            &mut self.shield,
            &mut self.multiplier,
        ] {
            collision::resolve_pickups(
                &self.player,
                &mut slot.stream,
                &mut slot.state,
                now,
                &mut self.events,
            );
        }

        self.player
            .accrue_score(dt_ms, self.multiplier.state.multiplier_value());

        if run_ended {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::RunEnded);
            self.events
                .push(GameEvent::MusicContextChanged(MusicContext::Menu));
            log::info!(
                "run over: score {}, coins {}",
                self.player.score as u64,
                self.player.coins
            );
        }
    }

    // --- Semantic input (already translated by the host) ---

    pub fn jump(&mut self) {
        if self.phase == GamePhase::Running {
            self.player.jump(self.double_jump.state.is_active());
        }
    }

    pub fn start_roll(&mut self) {
        if self.phase == GamePhase::Running {
            self.player.start_roll(self.now_ms);
        }
    }

    pub fn attack(&mut self) {
        if self.phase == GamePhase::Running {
            self.player.attack(self.now_ms);
        }
    }

    pub fn toggle_hitbox_debug(&mut self) {
        self.hitbox_debug = !self.hitbox_debug;
    }

    // --- Read-only snapshot for the renderer/UI host ---

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// All live entities across every stream
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.obstacles
            .iter()
            .chain(self.coins.iter())
            .chain(self.double_jump.stream.iter())
            .chain(self.shield.stream.iter())
            .chain(self.multiplier.stream.iter())
    }

    pub fn powerup(&self, kind: PowerupKind) -> &PowerupRuntime {
        match kind {
            PowerupKind::DoubleJump => &self.double_jump.state,
            PowerupKind::Shield => &self.shield.state,
            PowerupKind::Multiplier => &self.multiplier.state,
        }
    }

    pub fn score(&self) -> u64 {
        self.player.score as u64
    }

    pub fn coins(&self) -> u64 {
        self.player.coins
    }

    pub fn hitbox_debug(&self) -> bool {
        self.hitbox_debug
    }

    /// Final tallies, available once the run has ended
    pub fn summary(&self) -> Option<RunSummary> {
        match self.phase {
            GamePhase::GameOver => Some(RunSummary {
                final_score: self.player.score as u64,
                final_coins: self.player.coins,
            }),
            GamePhase::Running => None,
        }
    }

    /// Take this frame's pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
