//! Timer-driven entity streams
//!
//! One stream per entity family (obstacles, coins, one per powerup kind).
//! A stream owns its entities exclusively: it spawns them on a millisecond
//! timer, drifts them left at the shared world speed, and culls them once
//! they leave the left edge. Collision resolution is the only other place
//! an entity is ever removed.

use rand::Rng;
use rand_pcg::Pcg32;

use super::powerup::PowerupKind;
use super::rect::Rect;
use crate::consts::*;

/// Obstacle variants, selected by a single partitioned uniform draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Ground block, jump or roll past it
    Normal,
    /// Hangs above the ground, roll under it
    Arrow,
    /// Stands on the ground, can be destroyed by an attack
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Obstacle(ObstacleKind),
    Coin,
    Pickup(PowerupKind),
}

/// A world entity, owned by exactly one stream
#[derive(Debug, Clone)]
pub struct Entity {
    pub rect: Rect,
    pub kind: EntityKind,
}

/// Millisecond spawn timer. Overshoot past the interval is not carried
/// forward, the timer resets to zero on every spawn.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    elapsed_ms: u32,
    interval_ms: u32,
}

impl SpawnTimer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            elapsed_ms: 0,
            interval_ms,
        }
    }

    /// Accumulate `dt`; returns true exactly on the call that reaches the
    /// interval, resetting the accumulator.
    pub fn advance(&mut self, dt_ms: u32) -> bool {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms = 0;
            true
        } else {
            false
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms;
    }

    fn reset(&mut self, interval_ms: u32) {
        self.elapsed_ms = 0;
        self.interval_ms = interval_ms;
    }
}

/// The closed set of stream families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Obstacles,
    Coins,
    Pickups(PowerupKind),
}

/// Read-only per-frame inputs a stream needs, passed in explicitly so the
/// step stays a pure function of its arguments.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    /// Horizontal drift applied to every entity this frame (pixels)
    pub world_speed: f32,
    /// Ground line entities anchor to
    pub ground_level: f32,
    /// Right world edge new entities spawn past
    pub world_right: f32,
}

impl Default for FrameContext {
    fn default() -> Self {
        Self {
            world_speed: WORLD_SPEED,
            ground_level: GROUND_LEVEL,
            world_right: WORLD_WIDTH,
        }
    }
}

/// Timer-driven spawn/move/cull collection for one entity family
#[derive(Debug, Clone)]
pub struct EntityStream {
    kind: StreamKind,
    timer: SpawnTimer,
    initial_interval_ms: u32,
    pub entities: Vec<Entity>,
}

impl EntityStream {
    pub fn new(kind: StreamKind, interval_ms: u32) -> Self {
        Self {
            kind,
            timer: SpawnTimer::new(interval_ms),
            initial_interval_ms: interval_ms,
            entities: Vec::new(),
        }
    }

    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    pub fn interval_ms(&self) -> u32 {
        self.timer.interval_ms()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop all entities and restore the configured spawn cadence
    pub fn clear(&mut self) {
        self.entities.clear();
        self.timer.reset(self.initial_interval_ms);
    }

    /// One frame: spawn-or-tick, drift, cull.
    ///
    /// While `spawn_allowed` is false the timer is frozen entirely, not just
    /// gated, so a suppressed stream does not burst-spawn when re-enabled.
    pub fn advance(&mut self, dt_ms: u32, spawn_allowed: bool, ctx: &FrameContext, rng: &mut Pcg32) {
        if spawn_allowed && self.timer.advance(dt_ms) {
            self.spawn(ctx, rng);
        }

        for entity in &mut self.entities {
            entity.rect.min.x -= ctx.world_speed;
        }
        self.entities.retain(|e| e.rect.right() >= 0.0);
    }

    fn spawn(&mut self, ctx: &FrameContext, rng: &mut Pcg32) {
        let entity = match self.kind {
            StreamKind::Obstacles => {
                // One uniform draw partitioned into variant bands. Independent
                // per-variant draws would skew the distribution.
                let draw: f32 = rng.random();
                let x = ctx.world_right + rng.random_range(0..=SPAWN_OFFSET_MAX) as f32;

                if draw < OBSTACLE_NORMAL_BAND {
                    let (w, h) = OBSTACLE_SIZE;
                    Entity {
                        rect: Rect::anchored_bottom(x, ctx.ground_level, w, h),
                        kind: EntityKind::Obstacle(ObstacleKind::Normal),
                    }
                } else if draw < OBSTACLE_ARROW_BAND {
                    let height = ARROW_HEIGHTS[rng.random_range(0..ARROW_HEIGHTS.len())];
                    let (w, h) = ARROW_SIZE;
                    Entity {
                        rect: Rect::new(x, ctx.ground_level - height, w, h),
                        kind: EntityKind::Obstacle(ObstacleKind::Arrow),
                    }
                } else {
                    let (w, h) = ENEMY_SIZE;
                    Entity {
                        rect: Rect::anchored_bottom(x, ctx.ground_level, w, h),
                        kind: EntityKind::Obstacle(ObstacleKind::Enemy),
                    }
                }
            }
            StreamKind::Coins => {
                let (w, h) = COIN_SIZE;
                Entity {
                    rect: self.float_band_rect(ctx, rng, w, h),
                    kind: EntityKind::Coin,
                }
            }
            StreamKind::Pickups(kind) => {
                let (w, h) = PICKUP_SIZE;
                Entity {
                    rect: self.float_band_rect(ctx, rng, w, h),
                    kind: EntityKind::Pickup(kind),
                }
            }
        };
        self.entities.push(entity);

        // Obstacles come faster as the run goes on, down to a floor
        if self.kind == StreamKind::Obstacles {
            let next = self
                .timer
                .interval_ms()
                .saturating_sub(OBSTACLE_INTERVAL_DECAY_MS)
                .max(OBSTACLE_INTERVAL_FLOOR_MS);
            self.timer.set_interval(next);
        }
    }

    /// Coins and pickups float in a band above the ground
    fn float_band_rect(&self, ctx: &FrameContext, rng: &mut Pcg32, w: f32, h: f32) -> Rect {
        let x = ctx.world_right + rng.random_range(0..=SPAWN_OFFSET_MAX) as f32;
        let lift = rng.random_range(FLOAT_HEIGHT_MIN..=FLOAT_HEIGHT_MAX) as f32;
        Rect::new(x, ctx.ground_level - lift, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_spawn_on_exact_interval() {
        let mut stream = EntityStream::new(StreamKind::Obstacles, 1500);
        let ctx = FrameContext::default();
        let mut rng = rng();

        for _ in 0..14 {
            stream.advance(100, true, &ctx, &mut rng);
        }
        assert!(stream.is_empty());

        // 15th call reaches the interval: exactly one spawn, timer reset,
        // and the obstacle cadence decays by one step
        stream.advance(100, true, &ctx, &mut rng);
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.interval_ms(), 1490);

        // Timer restarted from zero
        for _ in 0..5 {
            stream.advance(100, true, &ctx, &mut rng);
        }
        assert_eq!(stream.len(), 1);
    }

    #[test]
    fn test_interval_floor() {
        let mut stream = EntityStream::new(StreamKind::Obstacles, 1500);
        let ctx = FrameContext::default();
        let mut rng = rng();

        // One spawn per call with a dt past the interval
        for _ in 0..200 {
            stream.advance(2000, true, &ctx, &mut rng);
            assert!(stream.interval_ms() >= 800);
        }
        assert_eq!(stream.interval_ms(), 800);
    }

    #[test]
    fn test_coin_interval_fixed() {
        let mut stream = EntityStream::new(StreamKind::Coins, 1500);
        let ctx = FrameContext::default();
        let mut rng = rng();

        stream.advance(1500, true, &ctx, &mut rng);
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.interval_ms(), 1500);
    }

    #[test]
    fn test_entities_drift_left_and_cull() {
        let mut stream = EntityStream::new(StreamKind::Coins, 1500);
        let ctx = FrameContext::default();
        let mut rng = rng();

        stream.advance(1500, true, &ctx, &mut rng);
        // Spawned past the right edge, then drifted once this same frame
        let x0 = stream.entities[0].rect.min.x;
        assert!(x0 >= ctx.world_right - ctx.world_speed);

        stream.advance(10, true, &ctx, &mut rng);
        assert_eq!(stream.entities[0].rect.min.x, x0 - ctx.world_speed);

        // Drag it past the left edge; it must be culled exactly once
        stream.entities[0].rect.min.x = -COIN_SIZE.0 - 1.0;
        stream.advance(0, true, &ctx, &mut rng);
        assert!(stream.is_empty());
    }

    #[test]
    fn test_suppression_freezes_timer() {
        let mut stream = EntityStream::new(StreamKind::Pickups(PowerupKind::Shield), 1000);
        let ctx = FrameContext::default();
        let mut rng = rng();

        // Plenty of suppressed time must not accrue
        for _ in 0..10 {
            stream.advance(1000, false, &ctx, &mut rng);
        }
        assert!(stream.is_empty());

        stream.advance(999, true, &ctx, &mut rng);
        assert!(stream.is_empty());
        stream.advance(1, true, &ctx, &mut rng);
        assert_eq!(stream.len(), 1);
    }

    #[test]
    fn test_obstacle_variants_from_one_draw() {
        let mut stream = EntityStream::new(StreamKind::Obstacles, 1500);
        let ctx = FrameContext::default();
        let mut rng = rng();

        let mut normals = 0;
        let mut arrows = 0;
        let mut enemies = 0;
        for _ in 0..200 {
            stream.advance(2000, true, &ctx, &mut rng);
            match stream.entities.last().unwrap().kind {
                EntityKind::Obstacle(ObstacleKind::Normal) => normals += 1,
                EntityKind::Obstacle(ObstacleKind::Arrow) => arrows += 1,
                EntityKind::Obstacle(ObstacleKind::Enemy) => enemies += 1,
                other => panic!("unexpected entity in obstacle stream: {other:?}"),
            }
            stream.entities.clear();
        }
        assert!(normals > 0 && arrows > 0 && enemies > 0);
        // Band widths are 0.5/0.3/0.2
        assert!(normals > enemies);
    }

    #[test]
    fn test_spawn_placement() {
        let ctx = FrameContext::default();
        let mut rng = rng();

        let mut stream = EntityStream::new(StreamKind::Obstacles, 1500);
        for _ in 0..100 {
            stream.advance(2000, true, &ctx, &mut rng);
        }
        for entity in stream.iter() {
            match entity.kind {
                EntityKind::Obstacle(ObstacleKind::Normal)
                | EntityKind::Obstacle(ObstacleKind::Enemy) => {
                    assert_eq!(entity.rect.bottom(), ctx.ground_level);
                }
                EntityKind::Obstacle(ObstacleKind::Arrow) => {
                    let height = ctx.ground_level - entity.rect.top();
                    assert!(ARROW_HEIGHTS.contains(&height));
                }
                _ => unreachable!(),
            }
        }

        let mut coins = EntityStream::new(StreamKind::Coins, 100);
        for _ in 0..100 {
            coins.advance(100, true, &ctx, &mut rng);
        }
        for coin in coins.iter() {
            let lift = ctx.ground_level - coin.rect.top();
            assert!((FLOAT_HEIGHT_MIN as f32..=FLOAT_HEIGHT_MAX as f32).contains(&lift));
        }
    }

    #[test]
    fn test_clear_restores_initial_cadence() {
        let mut stream = EntityStream::new(StreamKind::Obstacles, 1500);
        let ctx = FrameContext::default();
        let mut rng = rng();

        for _ in 0..10 {
            stream.advance(2000, true, &ctx, &mut rng);
        }
        assert_eq!(stream.interval_ms(), 1400);
        assert!(!stream.is_empty());

        stream.clear();
        assert!(stream.is_empty());
        assert_eq!(stream.interval_ms(), 1500);
    }
}
