//! Path: native/game_simulation/src/weapons/flamethrower.rs
//! Summary: 火炎放射（向いている方向への円錐・固定ティック・燃焼 DoT・進化で炎の跡）

use game_core::weapon::{WeaponKind, WeaponLevel, WeaponStats};
use rustc_hash::FxHashMap;

use super::{HitEffect, Weapon, WeaponContext, WeaponHit};

/// 円錐の半角（rad）
const CONE_HALF_ANGLE:         f32 = 0.5;
const EVOLVED_CONE_HALF_ANGLE: f32 = 0.7;
const BURN_DURATION:           f32 = 2.0;
const BURN_TICK:               f32 = 0.5;
/// 燃焼 1 ティックは火炎ダメージのこの割合
const BURN_FRACTION:           f32 = 0.5;
const TRAIL_INTERVAL:          f32 = 0.4;
const TRAIL_RADIUS:            f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Burn {
    remaining:  f32,
    tick_timer: f32,
    damage:     f32,
}

/// 進化後に落とす炎の跡（ハザード側で生成する）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireTrailDrop {
    pub x:      f32,
    pub y:      f32,
    pub radius: f32,
    pub damage: f32,
}

#[derive(Default)]
pub struct Flamethrower {
    level:          WeaponLevel,
    tick_timer:     f32,
    trail_timer:    f32,
    /// 敵 ID → 燃焼状態（円錐から出ても続く）
    burns:          FxHashMap<u32, Burn>,
    pending_trails: Vec<FireTrailDrop>,
}

impl Flamethrower {
    pub fn burning_count(&self) -> usize {
        self.burns.len()
    }

    pub fn take_trails(&mut self) -> Vec<FireTrailDrop> {
        std::mem::take(&mut self.pending_trails)
    }

    fn tick_burns(&mut self, ctx: &WeaponContext<'_>, on_hit: &mut dyn FnMut(WeaponHit)) {
        let enemies = ctx.enemies;
        self.burns.retain(|&id, burn| {
            let Some(i) = enemies.index_of(id) else {
                return false;
            };
            burn.remaining -= ctx.dt;
            burn.tick_timer -= ctx.dt;
            // 位相中はティックを見送るが燃焼自体は残す
            if burn.tick_timer <= 0.0 && ctx.can_hit(i) {
                burn.tick_timer += BURN_TICK;
                on_hit(WeaponHit {
                    weapon: WeaponKind::Flamethrower,
                    enemy_id: id,
                    damage: burn.damage,
                    effect: HitEffect::None,
                });
            }
            burn.remaining > 0.0
        });
    }
}

impl Weapon for Flamethrower {
    fn kind(&self) -> WeaponKind {
        WeaponKind::Flamethrower
    }

    fn level(&self) -> WeaponLevel {
        self.level
    }

    fn level_mut(&mut self) -> &mut WeaponLevel {
        &mut self.level
    }

    fn update(&mut self, ctx: &WeaponContext<'_>, stats: WeaponStats, on_hit: &mut dyn FnMut(WeaponHit)) {
        self.tick_burns(ctx, on_hit);

        if self.level.evolved {
            self.trail_timer -= ctx.dt;
            if self.trail_timer <= 0.0 {
                self.trail_timer = TRAIL_INTERVAL;
                self.pending_trails.push(FireTrailDrop {
                    x: ctx.player_x + ctx.facing_x * stats.range * 0.6,
                    y: ctx.player_y + ctx.facing_y * stats.range * 0.6,
                    radius: TRAIL_RADIUS,
                    damage: stats.damage,
                });
            }
        }

        self.tick_timer -= ctx.dt;
        if self.tick_timer > 0.0 {
            return;
        }
        self.tick_timer = stats.cooldown;

        let half_angle = if self.level.evolved { EVOLVED_CONE_HALF_ANGLE } else { CONE_HALF_ANGLE };
        let min_cos = half_angle.cos();
        let enemies = ctx.enemies;
        for i in enemies.alive_indices() {
            if !ctx.can_hit(i) {
                continue;
            }
            let dx = enemies.positions_x[i] - ctx.player_x;
            let dy = enemies.positions_y[i] - ctx.player_y;
            let d = (dx * dx + dy * dy).sqrt();
            if d > stats.range {
                continue;
            }
            // 密着している敵は向きに関係なく焼く
            if d > 0.001 && (dx * ctx.facing_x + dy * ctx.facing_y) / d < min_cos {
                continue;
            }
            let id = enemies.ids[i];
            on_hit(WeaponHit {
                weapon: WeaponKind::Flamethrower,
                enemy_id: id,
                damage: stats.damage,
                effect: HitEffect::None,
            });
            let burn_damage = stats.damage * BURN_FRACTION;
            self.burns
                .entry(id)
                .and_modify(|b| {
                    b.remaining = BURN_DURATION;
                    b.damage = b.damage.max(burn_damage);
                })
                .or_insert(Burn { remaining: BURN_DURATION, tick_timer: BURN_TICK, damage: burn_damage });
        }
    }

    fn clear_transient(&mut self) {
        self.tick_timer = 0.0;
        self.trail_timer = 0.0;
        self.burns.clear();
        self.pending_trails.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapons::test_support::{arena, ctx, rebuild};

    #[test]
    fn cone_hits_then_burn_persists_outside() {
        let (mut enemies, _, tables) = arena(&[(3.0, 0.0), (0.0, 3.0)]);
        let spatial = rebuild(&enemies);
        let stats = tables.weapon(WeaponKind::Flamethrower).stats(1, false);
        let mut flame = Flamethrower::default();
        flame.level_mut().level = 1;

        let mut hits = Vec::new();
        flame.update(&ctx(0.0, 0.016, &enemies, &spatial, &tables), stats, &mut |h| hits.push(h));
        // 真横の敵は円錐の外
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].enemy_id, enemies.ids[0]);
        assert_eq!(flame.burning_count(), 1);

        // 円錐の外へ移動しても燃え続ける
        enemies.positions_x[0] = -3.0;
        let spatial = rebuild(&enemies);
        hits.clear();
        for step in 1..=8 {
            flame.update(&ctx(step as f32 * 0.25, 0.25, &enemies, &spatial, &tables), stats, &mut |h| {
                hits.push(h)
            });
        }
        assert_eq!(hits.len(), 4);
        assert!(hits.iter().all(|h| (h.damage - stats.damage * BURN_FRACTION).abs() < 0.001));
        assert_eq!(flame.burning_count(), 0);
    }

    #[test]
    fn evolved_flame_drops_trails() {
        let (enemies, spatial, tables) = arena(&[]);
        let stats = tables.weapon(WeaponKind::Flamethrower).stats(5, true);
        let mut flame = Flamethrower::default();
        *flame.level_mut() = WeaponLevel { level: 5, evolved: true };
        for _ in 0..10 {
            flame.update(&ctx(0.0, 0.1, &enemies, &spatial, &tables), stats, &mut |_| {});
        }
        let trails = flame.take_trails();
        assert!(trails.len() >= 2);
        assert!(trails[0].x > 0.0);
        assert!(flame.take_trails().is_empty());
    }

    #[test]
    fn phased_enemy_skips_cone_and_burn_ticks() {
        let (mut enemies, spatial, tables) = arena(&[(3.0, 0.0)]);
        enemies.states[0].phased = true;
        let stats = tables.weapon(WeaponKind::Flamethrower).stats(1, false);
        let mut flame = Flamethrower::default();
        flame.level_mut().level = 1;

        let mut hits = Vec::new();
        flame.update(&ctx(0.0, 0.016, &enemies, &spatial, &tables), stats, &mut |h| hits.push(h));
        assert!(hits.is_empty());
        assert_eq!(flame.burning_count(), 0);

        // 着火後に位相へ入った敵はティックを受けないが燃焼は続く
        enemies.states[0].phased = false;
        flame.update(&ctx(0.0, stats.cooldown, &enemies, &spatial, &tables), stats, &mut |h| hits.push(h));
        assert_eq!(hits.len(), 1);
        assert_eq!(flame.burning_count(), 1);

        enemies.positions_x[0] = -3.0;
        enemies.states[0].phased = true;
        let spatial = rebuild(&enemies);
        hits.clear();
        for step in 1..=3 {
            flame.update(&ctx(step as f32 * 0.25, 0.25, &enemies, &spatial, &tables), stats, &mut |h| {
                hits.push(h)
            });
        }
        assert!(hits.is_empty());
        assert_eq!(flame.burning_count(), 1);

        enemies.states[0].phased = false;
        flame.update(&ctx(1.0, 0.25, &enemies, &spatial, &tables), stats, &mut |h| hits.push(h));
        assert_eq!(hits.len(), 1);
        assert!((hits[0].damage - stats.damage * BURN_FRACTION).abs() < 0.001);
    }
}
