//! Strider - a side-scrolling endless runner simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, entity streams, powerups, collisions)
//! - `progression`: Upgrade ledger and derived gameplay parameters
//! - `persistence`: Save record (high score, coin bank, upgrades)
//! - `settings`: User preferences
//!
//! Rendering, audio playback and raw input handling are host concerns: the
//! simulation exposes read-only snapshots and discrete events, and consumes
//! semantic input calls (`jump`, `start_roll`, `attack`).

pub mod persistence;
pub mod progression;
pub mod settings;
pub mod sim;

pub use persistence::SaveData;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// World dimensions (pixels)
    pub const WORLD_WIDTH: f32 = 620.0;
    pub const WORLD_HEIGHT: f32 = 360.0;
    /// Ground line the player and ground obstacles stand on
    pub const GROUND_LEVEL: f32 = WORLD_HEIGHT - 50.0;

    /// Shared horizontal drift applied to every entity stream (pixels/frame)
    pub const WORLD_SPEED: f32 = 4.0;
    /// Simulation frame target; `dt` passed to update is wall-clock ms capped by this
    pub const FRAME_RATE: u32 = 60;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 96.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;
    /// Hitbox height while rolling
    pub const ROLL_HEIGHT: f32 = 32.0;
    /// Downward acceleration (pixels/frame²)
    pub const GRAVITY: f32 = 0.5;
    /// Jump impulse (pixels/frame, negative is up)
    pub const JUMP_VELOCITY: f32 = -10.0;
    pub const ROLL_DURATION_MS: u64 = 1000;
    /// Attack animation: 8 frames at 80 ms each
    pub const ATTACK_FRAME_MS: u64 = 80;
    pub const ATTACK_FRAME_COUNT: u64 = 8;
    pub const ATTACK_DURATION_MS: u64 = ATTACK_FRAME_MS * ATTACK_FRAME_COUNT;
    /// Minimum gap between attack starts
    pub const ATTACK_COOLDOWN_MS: u64 = 500;
    /// Forward attack hitbox, relative to the player rect
    pub const ATTACK_REACH: f32 = 60.0;
    pub const ATTACK_INSET_X: f32 = 20.0;
    pub const ATTACK_INSET_Y: f32 = 20.0;

    /// Collision box inset: the visual rect is shrunk by this much in total
    /// (pixel-perfect collision feels unfair at this sprite scale)
    pub const HITBOX_INSET_X: f32 = 80.0;
    pub const HITBOX_INSET_Y: f32 = 30.0;

    /// Score ticks every interval, incremented by the multiplier value
    pub const SCORE_INTERVAL_MS: u32 = 100;
    /// Flat score bonus for destroying an enemy with an attack
    pub const ENEMY_KILL_BONUS: f64 = 50.0;

    /// Obstacle stream: interval decays per spawn down to a floor
    pub const OBSTACLE_INTERVAL_MS: u32 = 1500;
    pub const OBSTACLE_INTERVAL_DECAY_MS: u32 = 10;
    pub const OBSTACLE_INTERVAL_FLOOR_MS: u32 = 800;
    pub const COIN_INTERVAL_MS: u32 = 1500;

    /// Spawn x jitter past the right world edge
    pub const SPAWN_OFFSET_MAX: u32 = 100;
    /// Elevated-band placement for coins and pickups: ground minus [40, 80]
    pub const FLOAT_HEIGHT_MIN: u32 = 40;
    pub const FLOAT_HEIGHT_MAX: u32 = 80;
    /// Arrow obstacles hang at one of these heights above ground
    pub const ARROW_HEIGHTS: [f32; 2] = [60.0, 80.0];

    /// Entity sizes (width, height)
    pub const OBSTACLE_SIZE: (f32, f32) = (32.0, 48.0);
    pub const ARROW_SIZE: (f32, f32) = (48.0, 16.0);
    pub const ENEMY_SIZE: (f32, f32) = (33.0, 64.0);
    pub const COIN_SIZE: (f32, f32) = (16.0, 16.0);
    pub const PICKUP_SIZE: (f32, f32) = (32.0, 32.0);

    /// Obstacle variant bands for a single uniform [0,1) draw
    pub const OBSTACLE_NORMAL_BAND: f32 = 0.5;
    pub const OBSTACLE_ARROW_BAND: f32 = 0.8;

    /// Multiplier powerup effect duration
    pub const MULTIPLIER_DURATION_MS: u64 = 10_000;
}
