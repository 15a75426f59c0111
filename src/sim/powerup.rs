//! Powerup state machines
//!
//! One runtime per powerup kind. A kind is either Idle (no effect in force)
//! or Active; pickup instances in the world belong to the kind's entity
//! stream, and spawning is suppressed entirely while the kind is Active.
//! Deactivation is rule-driven: the shield expires after absorbing a fixed
//! number of hits, the other kinds expire on a timer.

use serde::{Deserialize, Serialize};

/// The closed set of powerup kinds. Doubles as the upgrade kind in the
/// progression ledger, which scales each kind's magnitude and spawn rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    DoubleJump,
    Shield,
    Multiplier,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [
        PowerupKind::DoubleJump,
        PowerupKind::Shield,
        PowerupKind::Multiplier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::DoubleJump => "double jump",
            PowerupKind::Shield => "shield",
            PowerupKind::Multiplier => "multiplier",
        }
    }
}

/// How an Active powerup returns to Idle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpiryRule {
    /// Effect lasts a fixed time from activation
    AfterDuration { duration_ms: u64 },
    /// Effect absorbs a fixed number of hits (shield)
    AfterHits { max_hits: u32 },
}

/// Outcome of a shielded hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    /// Hit soaked, shield still up
    Absorbed,
    /// Final hit, shield expired
    Consumed,
}

/// Per-kind activation state and expiry bookkeeping
#[derive(Debug, Clone)]
pub struct PowerupRuntime {
    kind: PowerupKind,
    rule: ExpiryRule,
    /// Score factor while active (1.0 for kinds without one)
    magnitude: f64,
    active: bool,
    activated_at_ms: u64,
    hits_taken: u32,
}

impl PowerupRuntime {
    pub fn new(kind: PowerupKind, rule: ExpiryRule, magnitude: f64) -> Self {
        Self {
            kind,
            rule,
            magnitude,
            active: false,
            activated_at_ms: 0,
            hits_taken: 0,
        }
    }

    pub fn double_jump(duration_ms: u64) -> Self {
        Self::new(
            PowerupKind::DoubleJump,
            ExpiryRule::AfterDuration { duration_ms },
            1.0,
        )
    }

    pub fn shield(max_hits: u32) -> Self {
        Self::new(PowerupKind::Shield, ExpiryRule::AfterHits { max_hits }, 1.0)
    }

    pub fn multiplier(duration_ms: u64, magnitude: f64) -> Self {
        Self::new(
            PowerupKind::Multiplier,
            ExpiryRule::AfterDuration { duration_ms },
            magnitude,
        )
    }

    pub fn kind(&self) -> PowerupKind {
        self.kind
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Collected a pickup instance: the effect comes into force now
    pub fn on_pickup(&mut self, now_ms: u64) {
        self.active = true;
        self.activated_at_ms = now_ms;
        self.hits_taken = 0;
        log::debug!("{} activated", self.kind.as_str());
    }

    /// Timer expiry check. Hit-based kinds never expire here.
    pub fn tick(&mut self, now_ms: u64) {
        if !self.active {
            return;
        }
        if let ExpiryRule::AfterDuration { duration_ms } = self.rule {
            if now_ms - self.activated_at_ms >= duration_ms {
                self.active = false;
                log::debug!("{} expired", self.kind.as_str());
            }
        }
    }

    /// Absorb one obstacle hit (shield). Returns None when called while
    /// Idle or on a timer-based kind; both indicate a caller bug and leave
    /// the state untouched.
    pub fn register_hit(&mut self) -> Option<HitResult> {
        if !self.active {
            log::warn!("register_hit on idle {}", self.kind.as_str());
            return None;
        }
        let ExpiryRule::AfterHits { max_hits } = self.rule else {
            log::warn!("register_hit on timer-based {}", self.kind.as_str());
            return None;
        };

        self.hits_taken += 1;
        if self.hits_taken >= max_hits {
            self.active = false;
            Some(HitResult::Consumed)
        } else {
            Some(HitResult::Absorbed)
        }
    }

    /// Score factor contributed by this kind (1.0 unless an active multiplier)
    pub fn multiplier_value(&self) -> f64 {
        if self.active { self.magnitude } else { 1.0 }
    }

    /// Remaining effect time, for the HUD. None when idle or hit-based.
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        if !self.active {
            return None;
        }
        match self.rule {
            ExpiryRule::AfterDuration { duration_ms } => {
                Some(duration_ms.saturating_sub(now_ms - self.activated_at_ms))
            }
            ExpiryRule::AfterHits { .. } => None,
        }
    }

    /// Remaining hits the shield can absorb. None when idle or timer-based.
    pub fn remaining_hits(&self) -> Option<u32> {
        if !self.active {
            return None;
        }
        match self.rule {
            ExpiryRule::AfterHits { max_hits } => Some(max_hits - self.hits_taken),
            ExpiryRule::AfterDuration { .. } => None,
        }
    }
}
