//! Path: native/game_simulation/src/weapons/boomerang.rs
//! Summary: ブーメラン（往路 → 復路の 2 区間・区間ごとのヒットセット・復路で宝石回収）

use game_core::util::{dist, dist_sq, normalize};
use game_core::weapon::{WeaponKind, WeaponLevel, WeaponStats};
use rustc_hash::FxHashSet;

use super::{HitEffect, Weapon, WeaponContext, WeaponHit};
use crate::game_logic::find_nearest_enemy_spatial;

const FLIGHT_SPEED:        f32 = 16.0;
const HIT_RADIUS:          f32 = 1.2;
const BOSS_HIT_BONUS:      f32 = 1.0;
/// プレイヤーからこの距離で回収
const CATCH_RADIUS:        f32 = 1.0;
/// 戻れなくなったときの保険（秒）
const MAX_FLIGHT_TIME:     f32 = 6.0;
/// 複数投擲時の角度間隔（rad）
const SPREAD:              f32 = 0.35;
/// 狙う敵の探索範囲は射程のこの倍率
const AIM_RANGE_FACTOR:    f32 = 1.5;
const SWEEP_RADIUS:        f32 = 1.5;
const EVOLVED_SWEEP_RADIUS: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoomerangLeg {
    Outbound,
    Returning,
}

#[derive(Clone, Debug)]
pub struct BoomerangProjectile {
    pub x:            f32,
    pub y:            f32,
    pub dir_x:        f32,
    pub dir_y:        f32,
    pub traveled:     f32,
    pub max_distance: f32,
    pub leg:          BoomerangLeg,
    pub age:          f32,
    pub damage:       f32,
    /// この区間ですでに当てた敵 ID（折り返しでクリア）
    hit_set:          FxHashSet<u32>,
}

impl BoomerangProjectile {
    fn new(x: f32, y: f32, dir_x: f32, dir_y: f32, max_distance: f32, damage: f32) -> Self {
        Self {
            x,
            y,
            dir_x,
            dir_y,
            traveled: 0.0,
            max_distance,
            leg: BoomerangLeg::Outbound,
            age: 0.0,
            damage,
            hit_set: FxHashSet::default(),
        }
    }

    /// 1 ステップ進める。回収されたら true
    fn fly(&mut self, dt: f32, px: f32, py: f32) -> bool {
        let step = FLIGHT_SPEED * dt;
        match self.leg {
            BoomerangLeg::Outbound => {
                self.x += self.dir_x * step;
                self.y += self.dir_y * step;
                self.traveled += step;
                if self.traveled >= self.max_distance {
                    self.leg = BoomerangLeg::Returning;
                    self.hit_set.clear();
                }
                false
            }
            BoomerangLeg::Returning => {
                let d = dist(self.x, self.y, px, py);
                if d <= CATCH_RADIUS {
                    return true;
                }
                if let Some((nx, ny)) = normalize(px - self.x, py - self.y) {
                    self.dir_x = nx;
                    self.dir_y = ny;
                }
                let mv = step.min(d);
                self.x += self.dir_x * mv;
                self.y += self.dir_y * mv;
                dist(self.x, self.y, px, py) <= CATCH_RADIUS
            }
        }
    }
}

#[derive(Default)]
pub struct Boomerang {
    level:           WeaponLevel,
    cooldown_timer:  f32,
    pub projectiles: Vec<BoomerangProjectile>,
    buf:             Vec<usize>,
}

impl Boomerang {
    /// 復路にある投擲物の宝石回収円 (x, y, r)
    pub fn sweep_circles(&self) -> impl Iterator<Item = (f32, f32, f32)> + '_ {
        let r = if self.level.evolved { EVOLVED_SWEEP_RADIUS } else { SWEEP_RADIUS };
        self.projectiles
            .iter()
            .filter(|p| p.leg == BoomerangLeg::Returning)
            .map(move |p| (p.x, p.y, r))
    }

    fn throw(&mut self, ctx: &WeaponContext<'_>, stats: WeaponStats) {
        let (px, py) = (ctx.player_x, ctx.player_y);
        let aim = find_nearest_enemy_spatial(
            ctx.spatial,
            &mut self.buf,
            ctx.enemies,
            px,
            py,
            stats.range * AIM_RANGE_FACTOR,
            &[],
        )
        .and_then(|i| normalize(ctx.enemies.positions_x[i] - px, ctx.enemies.positions_y[i] - py))
        .unwrap_or((ctx.facing_x, ctx.facing_y));

        let base = aim.1.atan2(aim.0);
        let n = stats.count.max(1);
        for k in 0..n {
            let a = base + (k as f32 - (n - 1) as f32 / 2.0) * SPREAD;
            self.projectiles
                .push(BoomerangProjectile::new(px, py, a.cos(), a.sin(), stats.range, stats.damage));
        }
    }
}

impl Weapon for Boomerang {
    fn kind(&self) -> WeaponKind {
        WeaponKind::Boomerang
    }

    fn level(&self) -> WeaponLevel {
        self.level
    }

    fn level_mut(&mut self) -> &mut WeaponLevel {
        &mut self.level
    }

    fn update(&mut self, ctx: &WeaponContext<'_>, stats: WeaponStats, on_hit: &mut dyn FnMut(WeaponHit)) {
        self.cooldown_timer -= ctx.dt;
        if self.cooldown_timer <= 0.0 {
            self.cooldown_timer = stats.cooldown;
            self.throw(ctx, stats);
        }

        let enemies = ctx.enemies;
        let buf = &mut self.buf;
        self.projectiles.retain_mut(|p| {
            p.age += ctx.dt;
            let caught = p.fly(ctx.dt, ctx.player_x, ctx.player_y);

            ctx.spatial.query_nearby_into(p.x, p.y, HIT_RADIUS + BOSS_HIT_BONUS, buf);
            for &i in buf.iter() {
                if !ctx.can_hit(i) {
                    continue;
                }
                let r = HIT_RADIUS + if ctx.is_boss(i) { BOSS_HIT_BONUS } else { 0.0 };
                if dist_sq(enemies.positions_x[i], enemies.positions_y[i], p.x, p.y) > r * r {
                    continue;
                }
                let id = enemies.ids[i];
                if !p.hit_set.insert(id) {
                    continue;
                }
                on_hit(WeaponHit {
                    weapon: WeaponKind::Boomerang,
                    enemy_id: id,
                    damage: p.damage,
                    effect: HitEffect::None,
                });
            }
            !caught && p.age < MAX_FLIGHT_TIME
        });
    }

    fn clear_transient(&mut self) {
        self.cooldown_timer = 0.0;
        self.projectiles.clear();
    }
}
