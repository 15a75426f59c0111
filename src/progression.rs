//! Upgrade ledger and derived gameplay parameters
//!
//! Between runs the player spends banked coins on three upgrade tracks, one
//! per powerup kind. The ledger is the persisted source of truth; every
//! live gameplay number (spawn cadences, shield capacity, effect durations,
//! the multiplier's magnitude) is a pure derivation from it, computed once
//! at session start.

use serde::{Deserialize, Serialize};

use crate::sim::PowerupKind;

/// One upgrade track: persisted level and the price of the next level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeRecord {
    pub level: u32,
    pub price: u64,
    pub max_level: u32,
}

impl UpgradeRecord {
    /// Factory state for a track
    pub fn base(kind: PowerupKind) -> Self {
        match kind {
            PowerupKind::Shield => Self {
                level: 1,
                price: 100,
                max_level: 5,
            },
            PowerupKind::DoubleJump => Self {
                level: 1,
                price: 150,
                max_level: 3,
            },
            PowerupKind::Multiplier => Self {
                level: 1,
                price: 200,
                max_level: 3,
            },
        }
    }
}

fn base_shield() -> UpgradeRecord {
    UpgradeRecord::base(PowerupKind::Shield)
}

fn base_double_jump() -> UpgradeRecord {
    UpgradeRecord::base(PowerupKind::DoubleJump)
}

fn base_multiplier() -> UpgradeRecord {
    UpgradeRecord::base(PowerupKind::Multiplier)
}

/// Gameplay numbers a session reads at run start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedParams {
    pub max_shield_hits: u32,
    pub double_jump_duration_ms: u64,
    pub multiplier_magnitude: f64,
    pub shield_spawn_interval_ms: u32,
    pub double_jump_spawn_interval_ms: u32,
    pub multiplier_spawn_interval_ms: u32,
}

/// The upgrade ledger. Levels only ever grow, bounded by each track's cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionStore {
    #[serde(default = "base_shield")]
    pub shield: UpgradeRecord,
    #[serde(default = "base_double_jump")]
    pub double_jump: UpgradeRecord,
    #[serde(default = "base_multiplier")]
    pub multiplier: UpgradeRecord,
}

impl Default for ProgressionStore {
    fn default() -> Self {
        Self {
            shield: base_shield(),
            double_jump: base_double_jump(),
            multiplier: base_multiplier(),
        }
    }
}

impl ProgressionStore {
    pub fn record(&self, kind: PowerupKind) -> &UpgradeRecord {
        match kind {
            PowerupKind::Shield => &self.shield,
            PowerupKind::DoubleJump => &self.double_jump,
            PowerupKind::Multiplier => &self.multiplier,
        }
    }

    fn record_mut(&mut self, kind: PowerupKind) -> &mut UpgradeRecord {
        match kind {
            PowerupKind::Shield => &mut self.shield,
            PowerupKind::DoubleJump => &mut self.double_jump,
            PowerupKind::Multiplier => &mut self.multiplier,
        }
    }

    /// Buy the next level of a track from the coin bank.
    ///
    /// Insufficient funds and a maxed-out track are both silent no-ops, not
    /// errors; the return value only tells the shop UI whether anything
    /// happened. On success the price grows by half, truncated.
    pub fn purchase(&mut self, kind: PowerupKind, coins: &mut u64) -> bool {
        let record = self.record_mut(kind);
        if record.level >= record.max_level {
            return false;
        }
        if *coins < record.price {
            return false;
        }

        *coins -= record.price;
        record.level += 1;
        record.price = (record.price as f64 * 1.5) as u64;
        log::info!(
            "upgraded {} to level {} (next price {})",
            kind.as_str(),
            record.level,
            record.price
        );
        true
    }

    /// Derive the live gameplay parameters. Spawn intervals shrink with
    /// level down to per-track floors.
    pub fn derive(&self) -> DerivedParams {
        DerivedParams {
            max_shield_hits: 1 + self.shield.level,
            double_jump_duration_ms: 20_000 + self.double_jump.level as u64 * 10_000,
            multiplier_magnitude: 1.0 + 0.5 * self.multiplier.level as f64,
            shield_spawn_interval_ms: 10_000u32
                .saturating_sub(self.shield.level * 1_500)
                .max(3_000),
            double_jump_spawn_interval_ms: 15_000u32
                .saturating_sub(self.double_jump.level * 3_000)
                .max(5_000),
            multiplier_spawn_interval_ms: 15_000u32
                .saturating_sub(self.multiplier.level * 2_000)
                .max(8_000),
        }
    }
}
