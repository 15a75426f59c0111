//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time is an explicit millisecond accumulator, never the wall clock
//! - Seeded RNG only, owned by the session
//! - One synchronous `update` per frame; external readers only ever see a
//!   fully-updated snapshot
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod player;
pub mod powerup;
pub mod rect;
pub mod session;
pub mod stream;

pub use player::{Player, Stance};
pub use powerup::{ExpiryRule, HitResult, PowerupKind, PowerupRuntime};
pub use rect::Rect;
pub use session::{
    GameEvent, GamePhase, GameSession, MusicContext, PowerupSlot, RunSummary,
};
pub use stream::{Entity, EntityKind, EntityStream, FrameContext, ObstacleKind, SpawnTimer, StreamKind};
