//! Path: native/game_simulation/src/weapons/orbit.rs
//! Summary: 周回シールド（プレイヤー周りを回る本体・本体ごとの敵別ヒット間隔）

use game_core::util::{dist_sq, wrap_angle};
use game_core::weapon::{WeaponKind, WeaponLevel, WeaponStats};
use rustc_hash::FxHashMap;

use super::{HitEffect, Weapon, WeaponContext, WeaponHit};

/// 基本角速度（rad/s）。レベルごとに 10% 速くなる
const BASE_ANGULAR_SPEED: f32 = 2.5;
const BODY_RADIUS:        f32 = 0.8;
/// 記録がこれを超えたら古いものを捨てる
const PRUNE_THRESHOLD:    usize = 64;
const PRUNE_AGE:          f32 = 5.0;

#[derive(Default)]
pub struct OrbitingShields {
    level:     WeaponLevel,
    pub angle: f32,
    /// 本体ごとの「敵 ID → 最終ヒット時刻」
    last_hit:  Vec<FxHashMap<u32, f32>>,
    buf:       Vec<usize>,
}

impl OrbitingShields {
    /// 本体の現在位置（描画用）
    pub fn body_positions(&self, px: f32, py: f32, stats: &WeaponStats) -> Vec<(f32, f32)> {
        let n = stats.count.max(1);
        (0..n)
            .map(|b| {
                let a = self.angle + b as f32 * std::f32::consts::TAU / n as f32;
                (px + a.cos() * stats.range, py + a.sin() * stats.range)
            })
            .collect()
    }
}

impl Weapon for OrbitingShields {
    fn kind(&self) -> WeaponKind {
        WeaponKind::OrbitingShields
    }

    fn level(&self) -> WeaponLevel {
        self.level
    }

    fn level_mut(&mut self) -> &mut WeaponLevel {
        &mut self.level
    }

    fn update(&mut self, ctx: &WeaponContext<'_>, stats: WeaponStats, on_hit: &mut dyn FnMut(WeaponHit)) {
        let speed = BASE_ANGULAR_SPEED * (1.0 + 0.1 * self.level.level as f32);
        self.angle = wrap_angle(self.angle + speed * ctx.dt);

        let bodies = self.body_positions(ctx.player_x, ctx.player_y, &stats);
        self.last_hit.resize_with(bodies.len(), FxHashMap::default);

        let enemies = ctx.enemies;
        for (b, &(bx, by)) in bodies.iter().enumerate() {
            ctx.spatial.query_nearby_into(bx, by, BODY_RADIUS + 2.0, &mut self.buf);
            let hits = &mut self.last_hit[b];
            for &i in &self.buf {
                if !ctx.can_hit(i) {
                    continue;
                }
                let reach = BODY_RADIUS + if ctx.is_boss(i) { 1.5 } else { 0.5 };
                if dist_sq(enemies.positions_x[i], enemies.positions_y[i], bx, by) > reach * reach {
                    continue;
                }
                let id = enemies.ids[i];
                if hits.get(&id).is_some_and(|&t| ctx.now - t < stats.cooldown) {
                    continue;
                }
                hits.insert(id, ctx.now);
                on_hit(WeaponHit {
                    weapon: WeaponKind::OrbitingShields,
                    enemy_id: id,
                    damage: stats.damage,
                    effect: HitEffect::None,
                });
            }
            if hits.len() > PRUNE_THRESHOLD {
                hits.retain(|_, t| ctx.now - *t < PRUNE_AGE);
            }
        }
    }

    fn clear_transient(&mut self) {
        self.angle = 0.0;
        self.last_hit.clear();
    }
}
