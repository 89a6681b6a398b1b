//! Path: native/game_simulation/src/weapons/laser.rs
//! Summary: 軌道レーザー（等間隔ビームの回転・光線との垂直距離で判定・ビームごとのティック間隔）

use game_core::util::{distance_along_ray, wrap_angle};
use game_core::weapon::{WeaponKind, WeaponLevel, WeaponStats};
use rustc_hash::FxHashMap;

use super::{HitEffect, Weapon, WeaponContext, WeaponHit};

const ANGULAR_SPEED:    f32 = 1.2;
const BEAM_HALF_WIDTH:  f32 = 0.8;
const BOSS_WIDTH_BONUS: f32 = 0.7;
/// 進化後は命中した敵をこの距離だけプレイヤー側へ引く
const EVOLVED_PULL:     f32 = 0.3;
const PRUNE_THRESHOLD:  usize = 64;

#[derive(Default)]
pub struct OrbitalLaser {
    level:     WeaponLevel,
    pub angle: f32,
    /// ビームごとの「敵 ID → 最終ヒット時刻」
    last_hit:  Vec<FxHashMap<u32, f32>>,
    buf:       Vec<usize>,
}

impl OrbitalLaser {
    /// ビームの向き（単位ベクトル）
    pub fn beam_directions(&self, count: u32) -> Vec<(f32, f32)> {
        let n = count.max(1);
        (0..n)
            .map(|b| {
                let a = self.angle + b as f32 * std::f32::consts::TAU / n as f32;
                (a.cos(), a.sin())
            })
            .collect()
    }
}

impl Weapon for OrbitalLaser {
    fn kind(&self) -> WeaponKind {
        WeaponKind::OrbitalLaser
    }

    fn level(&self) -> WeaponLevel {
        self.level
    }

    fn level_mut(&mut self) -> &mut WeaponLevel {
        &mut self.level
    }

    fn update(&mut self, ctx: &WeaponContext<'_>, stats: WeaponStats, on_hit: &mut dyn FnMut(WeaponHit)) {
        self.angle = wrap_angle(self.angle + ANGULAR_SPEED * ctx.dt);
        let beams = self.beam_directions(stats.count);
        self.last_hit.resize_with(beams.len(), FxHashMap::default);

        let effect = if self.level.evolved {
            HitEffect::Pull(EVOLVED_PULL)
        } else {
            HitEffect::None
        };
        let (px, py) = (ctx.player_x, ctx.player_y);
        let enemies = ctx.enemies;
        ctx.spatial
            .query_nearby_into(px, py, stats.range + BEAM_HALF_WIDTH + BOSS_WIDTH_BONUS, &mut self.buf);

        for (b, &(dx, dy)) in beams.iter().enumerate() {
            let hits = &mut self.last_hit[b];
            for &i in &self.buf {
                if !ctx.can_hit(i) {
                    continue;
                }
                let Some(off) = distance_along_ray(
                    px,
                    py,
                    dx,
                    dy,
                    stats.range,
                    enemies.positions_x[i],
                    enemies.positions_y[i],
                ) else {
                    continue;
                };
                let width = BEAM_HALF_WIDTH + if ctx.is_boss(i) { BOSS_WIDTH_BONUS } else { 0.0 };
                if off > width {
                    continue;
                }
                let id = enemies.ids[i];
                if hits.get(&id).is_some_and(|&t| ctx.now - t < stats.cooldown) {
                    continue;
                }
                hits.insert(id, ctx.now);
                on_hit(WeaponHit { weapon: WeaponKind::OrbitalLaser, enemy_id: id, damage: stats.damage, effect });
            }
            if hits.len() > PRUNE_THRESHOLD {
                hits.retain(|_, t| ctx.now - *t < stats.cooldown);
            }
        }
    }

    fn clear_transient(&mut self) {
        self.angle = 0.0;
        self.last_hit.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapons::test_support::{arena, ctx};

    #[test]
    fn beams_hit_along_ray_with_tick_gate() {
        let (enemies, spatial, tables) = arena(&[(4.0, 0.3), (-4.0, 0.0), (0.0, 4.0)]);
        let stats = tables.weapon(WeaponKind::OrbitalLaser).stats(1, false);
        assert_eq!(stats.count, 2);
        let mut laser = OrbitalLaser::default();
        laser.level_mut().level = 1;

        let mut hits = Vec::new();
        laser.update(&ctx(0.0, 0.0, &enemies, &spatial, &tables), stats, &mut |h| hits.push(h.enemy_id));
        hits.sort_unstable();
        assert_eq!(hits, vec![enemies.ids[0], enemies.ids[1]]);

        hits.clear();
        laser.update(&ctx(0.0, 0.0, &enemies, &spatial, &tables), stats, &mut |h| hits.push(h.enemy_id));
        assert!(hits.is_empty());
    }

    #[test]
    fn evolved_beam_pulls() {
        let (enemies, spatial, tables) = arena(&[(3.0, 0.0)]);
        let stats = tables.weapon(WeaponKind::OrbitalLaser).stats(5, true);
        let mut laser = OrbitalLaser::default();
        *laser.level_mut() = WeaponLevel { level: 5, evolved: true };
        let mut effects = Vec::new();
        laser.update(&ctx(0.0, 0.0, &enemies, &spatial, &tables), stats, &mut |h| effects.push(h.effect));
        assert_eq!(effects, vec![HitEffect::Pull(EVOLVED_PULL)]);
    }

    #[test]
    fn beam_ignores_phased_enemy() {
        let (mut enemies, spatial, tables) = arena(&[(4.0, 0.3), (-4.0, 0.0)]);
        enemies.states[0].phased = true;
        let stats = tables.weapon(WeaponKind::OrbitalLaser).stats(1, false);
        let mut laser = OrbitalLaser::default();
        laser.level_mut().level = 1;

        let mut hits = Vec::new();
        laser.update(&ctx(0.0, 0.0, &enemies, &spatial, &tables), stats, &mut |h| hits.push(h.enemy_id));
        assert_eq!(hits, vec![enemies.ids[1]]);
    }
}
