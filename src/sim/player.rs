//! Player state and vertical kinematics
//!
//! The runner never moves horizontally; the world drifts past instead.
//! Vertical motion is simple per-frame constant-acceleration integration
//! with a hard ground clamp, matching the fixed 60 Hz frame target.

use super::rect::Rect;
use crate::consts::*;

/// Mutually exclusive behavior mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Standing,
    Rolling,
    Attacking,
}

/// The runner: physics, stance, hitboxes and the run's tallies
#[derive(Debug, Clone)]
pub struct Player {
    /// Visual rect; the collision box is this deflated by the hitbox inset
    pub rect: Rect,
    /// Vertical velocity (pixels/frame, positive is down)
    pub vel_y: f32,
    stance: Stance,
    roll_started_ms: u64,
    attack_started_ms: u64,
    last_attack_ms: Option<u64>,
    /// Airborne extra jump already spent this airborne period
    extra_jump_used: bool,
    pub score: f64,
    pub coins: u64,
    score_accum_ms: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            rect: Rect::anchored_bottom(PLAYER_START_X, GROUND_LEVEL, PLAYER_WIDTH, PLAYER_HEIGHT),
            vel_y: 0.0,
            stance: Stance::Standing,
            roll_started_ms: 0,
            attack_started_ms: 0,
            last_attack_ms: None,
            extra_jump_used: false,
            score: 0.0,
            coins: 0,
            score_accum_ms: 0,
        }
    }

    pub fn stance(&self) -> Stance {
        self.stance
    }

    pub fn grounded(&self) -> bool {
        self.rect.bottom() >= GROUND_LEVEL
    }

    /// One frame of kinematics and stance timers
    pub fn advance(&mut self, _dt_ms: u32, now_ms: u64) {
        self.vel_y += GRAVITY;
        self.rect.min.y += self.vel_y;

        if self.rect.bottom() >= GROUND_LEVEL {
            self.rect.set_bottom(GROUND_LEVEL);
            self.vel_y = 0.0;
            self.extra_jump_used = false;
        }

        if self.stance == Stance::Rolling && now_ms - self.roll_started_ms >= ROLL_DURATION_MS {
            self.end_roll();
        }

        if self.stance == Stance::Attacking && now_ms - self.attack_started_ms >= ATTACK_DURATION_MS
        {
            self.stance = Stance::Standing;
        }
    }

    /// Jump when grounded; airborne, a single extra jump is available while
    /// the double-jump powerup is in force.
    pub fn jump(&mut self, double_jump_active: bool) {
        if self.grounded() {
            self.vel_y = JUMP_VELOCITY;
            self.extra_jump_used = false;
        } else if double_jump_active && !self.extra_jump_used {
            self.vel_y = JUMP_VELOCITY;
            self.extra_jump_used = true;
        }
    }

    /// Enter a roll. Only available from Standing; the hitbox halves in
    /// height, keeping the bottom edge anchored.
    pub fn start_roll(&mut self, now_ms: u64) {
        if self.stance != Stance::Standing {
            return;
        }
        self.stance = Stance::Rolling;
        self.roll_started_ms = now_ms;
        let bottom = self.rect.bottom();
        self.rect.size.y = ROLL_HEIGHT;
        self.rect.set_bottom(bottom);
    }

    fn end_roll(&mut self) {
        self.stance = Stance::Standing;
        // Height grows back downward from the kept top edge; re-clamp if the
        // restored box now penetrates the floor
        self.rect.size.y = PLAYER_HEIGHT;
        if self.rect.bottom() > GROUND_LEVEL {
            self.rect.set_bottom(GROUND_LEVEL);
            self.vel_y = 0.0;
        }
    }

    /// Start an attack. Allowed from Standing or Rolling (which it cancels),
    /// rate-limited by a cooldown from the previous attack start.
    pub fn attack(&mut self, now_ms: u64) {
        if let Some(last) = self.last_attack_ms {
            if now_ms - last < ATTACK_COOLDOWN_MS {
                return;
            }
        }
        if self.stance == Stance::Attacking {
            return;
        }
        if self.stance == Stance::Rolling {
            self.end_roll();
        }
        self.stance = Stance::Attacking;
        self.attack_started_ms = now_ms;
        self.last_attack_ms = Some(now_ms);
    }

    /// Forward attack hitbox, live for the whole attack animation
    pub fn attack_hitbox(&self) -> Option<Rect> {
        if self.stance != Stance::Attacking {
            return None;
        }
        Some(Rect::new(
            self.rect.right() - ATTACK_INSET_X,
            self.rect.top() + ATTACK_INSET_Y,
            ATTACK_REACH,
            self.rect.size.y - 2.0 * ATTACK_INSET_Y,
        ))
    }

    /// Current attack animation frame for the renderer, None outside attacks
    pub fn attack_frame(&self, now_ms: u64) -> Option<u64> {
        if self.stance != Stance::Attacking {
            return None;
        }
        let frame = (now_ms - self.attack_started_ms) / ATTACK_FRAME_MS;
        Some(frame.min(ATTACK_FRAME_COUNT - 1))
    }

    /// Collision box used against obstacles, coins and pickups
    pub fn collision_box(&self) -> Rect {
        self.rect.deflate(HITBOX_INSET_X, HITBOX_INSET_Y)
    }

    /// Passive score accrual: every full interval adds the current
    /// multiplier value. The accumulator truncates to zero on firing.
    pub fn accrue_score(&mut self, dt_ms: u32, multiplier: f64) {
        self.score_accum_ms += dt_ms;
        if self.score_accum_ms >= SCORE_INTERVAL_MS {
            self.score_accum_ms = 0;
            self.score += multiplier;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_grounded() {
        let player = Player::new();
        assert_eq!(player.rect.bottom(), GROUND_LEVEL);
        assert!(player.grounded());
        assert_eq!(player.stance(), Stance::Standing);
    }

    #[test]
    fn test_gravity_clamps_to_ground() {
        let mut player = Player::new();
        for _ in 0..10 {
            player.advance(16, 0);
        }
        assert_eq!(player.rect.bottom(), GROUND_LEVEL);
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_jump_and_land() {
        let mut player = Player::new();
        player.jump(false);
        assert_eq!(player.vel_y, JUMP_VELOCITY);

        player.advance(16, 0);
        assert!(!player.grounded());

        // Constant acceleration brings it back down eventually
        for _ in 0..100 {
            player.advance(16, 0);
        }
        assert!(player.grounded());
    }

    #[test]
    fn test_airborne_jump_needs_double_jump() {
        let mut player = Player::new();
        player.jump(false);
        player.advance(16, 0);
        let vel = player.vel_y;

        player.jump(false);
        assert_eq!(player.vel_y, vel);
    }

    #[test]
    fn test_double_jump_once_per_airborne_period() {
        let mut player = Player::new();
        player.jump(true);
        player.advance(16, 0);

        player.jump(true);
        assert_eq!(player.vel_y, JUMP_VELOCITY);

        // Second extra jump in the same airborne period is spent
        player.advance(16, 0);
        let vel = player.vel_y;
        player.jump(true);
        assert_eq!(player.vel_y, vel);

        // Landing re-arms it
        for _ in 0..200 {
            player.advance(16, 0);
        }
        assert!(player.grounded());
        player.jump(true);
        player.advance(16, 0);
        player.jump(true);
        assert_eq!(player.vel_y, JUMP_VELOCITY);
    }

    #[test]
    fn test_roll_halves_hitbox_and_restores() {
        let mut player = Player::new();
        player.start_roll(0);
        assert_eq!(player.stance(), Stance::Rolling);
        assert_eq!(player.rect.size.y, ROLL_HEIGHT);
        assert_eq!(player.rect.bottom(), GROUND_LEVEL);

        // Still rolling just before the duration elapses
        player.advance(16, ROLL_DURATION_MS - 1);
        assert_eq!(player.stance(), Stance::Rolling);

        player.advance(16, ROLL_DURATION_MS);
        assert_eq!(player.stance(), Stance::Standing);
        assert_eq!(player.rect.size.y, PLAYER_HEIGHT);
        assert_eq!(player.rect.bottom(), GROUND_LEVEL);
    }

    #[test]
    fn test_roll_only_from_standing() {
        let mut player = Player::new();
        player.attack(0);
        player.start_roll(10);
        assert_eq!(player.stance(), Stance::Attacking);
    }

    #[test]
    fn test_attack_cancels_roll() {
        let mut player = Player::new();
        player.start_roll(0);
        player.attack(100);
        assert_eq!(player.stance(), Stance::Attacking);
        assert_eq!(player.rect.size.y, PLAYER_HEIGHT);
    }

    #[test]
    fn test_attack_cooldown() {
        let mut player = Player::new();
        player.attack(0);
        assert_eq!(player.stance(), Stance::Attacking);

        // Attack runs its full animation
        player.advance(16, ATTACK_DURATION_MS - 1);
        assert_eq!(player.stance(), Stance::Attacking);
        player.advance(16, ATTACK_DURATION_MS);
        assert_eq!(player.stance(), Stance::Standing);

        // The animation outlasts the cooldown, so a fresh attack is legal
        // as soon as the previous one finishes
        player.attack(ATTACK_DURATION_MS);
        assert_eq!(player.stance(), Stance::Attacking);
    }

    #[test]
    fn test_attack_reentry_is_noop() {
        let mut player = Player::new();
        player.attack(0);
        player.advance(16, 100);

        // Inside the cooldown window: no restart
        player.attack(100);
        assert_eq!(player.attack_frame(100), Some(1));
    }

    #[test]
    fn test_attack_hitbox_geometry() {
        let mut player = Player::new();
        assert!(player.attack_hitbox().is_none());

        player.attack(0);
        let hb = player.attack_hitbox().unwrap();
        assert_eq!(hb.left(), player.rect.right() - ATTACK_INSET_X);
        assert_eq!(hb.top(), player.rect.top() + ATTACK_INSET_Y);
        assert_eq!(hb.size.x, ATTACK_REACH);
        assert_eq!(hb.size.y, PLAYER_HEIGHT - 2.0 * ATTACK_INSET_Y);
    }

    #[test]
    fn test_score_accrual() {
        let mut player = Player::new();
        player.accrue_score(50, 1.0);
        assert_eq!(player.score, 0.0);

        player.accrue_score(50, 1.0);
        assert_eq!(player.score, 1.0);

        // Multiplier feeds straight into the increment
        player.accrue_score(100, 2.5);
        assert_eq!(player.score, 3.5);
    }
}
