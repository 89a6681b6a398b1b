//! Path: native/game_simulation/src/weapons/lightning.rs
//! Summary: チェインライトニング（最近接から未命中の敵へ貪欲に連鎖・ホップごとに減衰）

use game_core::weapon::{WeaponKind, WeaponLevel, WeaponStats};

use super::{HitEffect, Weapon, WeaponContext, WeaponHit};
use crate::game_logic::find_nearest_enemy_spatial;

/// 連鎖の届く距離は射程のこの割合
const CHAIN_RANGE_FACTOR: f32 = 0.75;
/// 1 ホップごとのダメージ倍率
const HOP_DECAY:          f32 = 0.8;
const BOLT_LIFETIME:      f32 = 0.15;

/// 描画用の稲妻（一定時間で消える）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bolt {
    pub from_x:    f32,
    pub from_y:    f32,
    pub to_x:      f32,
    pub to_y:      f32,
    pub remaining: f32,
}

#[derive(Default)]
pub struct ChainLightning {
    level:          WeaponLevel,
    cooldown_timer: f32,
    pub bolts:      Vec<Bolt>,
    hit_ids:        Vec<u32>,
    buf:            Vec<usize>,
}

impl Weapon for ChainLightning {
    fn kind(&self) -> WeaponKind {
        WeaponKind::ChainLightning
    }

    fn level(&self) -> WeaponLevel {
        self.level
    }

    fn level_mut(&mut self) -> &mut WeaponLevel {
        &mut self.level
    }

    fn update(&mut self, ctx: &WeaponContext<'_>, stats: WeaponStats, on_hit: &mut dyn FnMut(WeaponHit)) {
        for bolt in &mut self.bolts {
            bolt.remaining -= ctx.dt;
        }
        self.bolts.retain(|b| b.remaining > 0.0);

        self.cooldown_timer = (self.cooldown_timer - ctx.dt).max(0.0);
        if self.cooldown_timer > 0.0 {
            return;
        }

        let enemies = ctx.enemies;
        // 射程内に敵がいなければクールダウンを消費しない
        let Some(first) = find_nearest_enemy_spatial(
            ctx.spatial,
            &mut self.buf,
            enemies,
            ctx.player_x,
            ctx.player_y,
            stats.range,
            &[],
        ) else {
            return;
        };
        self.cooldown_timer = stats.cooldown;

        let chains = if self.level.evolved { stats.count * 2 } else { stats.count };
        let chain_range = stats.range * CHAIN_RANGE_FACTOR;
        self.hit_ids.clear();

        let (mut from_x, mut from_y) = (ctx.player_x, ctx.player_y);
        let mut target = Some(first);
        let mut damage = stats.damage;
        for _ in 0..chains {
            let Some(i) = target else { break };
            let (tx, ty) = (enemies.positions_x[i], enemies.positions_y[i]);
            let id = enemies.ids[i];
            self.hit_ids.push(id);
            on_hit(WeaponHit {
                weapon: WeaponKind::ChainLightning,
                enemy_id: id,
                damage,
                effect: HitEffect::None,
            });
            self.bolts.push(Bolt { from_x, from_y, to_x: tx, to_y: ty, remaining: BOLT_LIFETIME });

            from_x = tx;
            from_y = ty;
            damage *= HOP_DECAY;
            target = find_nearest_enemy_spatial(
                ctx.spatial,
                &mut self.buf,
                enemies,
                tx,
                ty,
                chain_range,
                &self.hit_ids,
            );
        }
    }

    fn clear_transient(&mut self) {
        self.cooldown_timer = 0.0;
        self.bolts.clear();
        self.hit_ids.clear();
    }
}
