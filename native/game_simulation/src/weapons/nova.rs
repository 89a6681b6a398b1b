//! Path: native/game_simulation/src/weapons/nova.rs
//! Summary: ノヴァ（クールダウンごとの全方位爆発・距離減衰・進化で凍結）

use game_core::damage::linear_falloff;
use game_core::util::dist;
use game_core::weapon::{WeaponKind, WeaponLevel, WeaponStats};

use super::{HitEffect, Weapon, WeaponContext, WeaponHit};

/// 縁でのダメージは中心の半分
const FALLOFF_STRENGTH: f32 = 0.5;
const EVOLVED_FREEZE: f32 = 1.5;

#[derive(Default)]
pub struct Nova {
    level:          WeaponLevel,
    cooldown_timer: f32,
    /// 直近の爆発（描画用: x, y, 半径）
    pub last_burst: Option<(f32, f32, f32)>,
}

impl Weapon for Nova {
    fn kind(&self) -> WeaponKind {
        WeaponKind::Nova
    }

    fn level(&self) -> WeaponLevel {
        self.level
    }

    fn level_mut(&mut self) -> &mut WeaponLevel {
        &mut self.level
    }

    fn update(&mut self, ctx: &WeaponContext<'_>, stats: WeaponStats, on_hit: &mut dyn FnMut(WeaponHit)) {
        self.cooldown_timer -= ctx.dt;
        if self.cooldown_timer > 0.0 {
            return;
        }
        self.cooldown_timer = stats.cooldown;
        self.last_burst = Some((ctx.player_x, ctx.player_y, stats.range));

        let effect = if self.level.evolved {
            HitEffect::Freeze(EVOLVED_FREEZE)
        } else {
            HitEffect::None
        };
        let enemies = ctx.enemies;
        for i in enemies.alive_indices() {
            if !ctx.can_hit(i) {
                continue;
            }
            let d = dist(enemies.positions_x[i], enemies.positions_y[i], ctx.player_x, ctx.player_y);
            if d > stats.range {
                continue;
            }
            on_hit(WeaponHit {
                weapon: WeaponKind::Nova,
                enemy_id: enemies.ids[i],
                damage: stats.damage * linear_falloff(d, stats.range, FALLOFF_STRENGTH),
                effect,
            });
        }
    }

    fn clear_transient(&mut self) {
        self.cooldown_timer = 0.0;
        self.last_burst = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapons::test_support::{arena, ctx};

    #[test]
    fn burst_falls_off_and_waits_for_cooldown() {
        let (enemies, spatial, tables) = arena(&[(0.0, 0.0), (7.5, 0.0), (20.0, 0.0)]);
        let mut nova = Nova::default();
        nova.level_mut().level = 1;
        let stats = tables.weapon(WeaponKind::Nova).stats(1, false);

        let mut hits = Vec::new();
        nova.update(&ctx(0.0, 0.016, &enemies, &spatial, &tables), stats, &mut |h| hits.push(h));
        assert_eq!(hits.len(), 2);
        assert!((hits[0].damage - stats.damage).abs() < 0.001);
        assert!((hits[1].damage - stats.damage * 0.5).abs() < 0.001);

        hits.clear();
        nova.update(&ctx(1.0, 1.0, &enemies, &spatial, &tables), stats, &mut |h| hits.push(h));
        assert!(hits.is_empty());
    }

    #[test]
    fn evolved_burst_freezes() {
        let (enemies, spatial, tables) = arena(&[(1.0, 0.0)]);
        let mut nova = Nova::default();
        *nova.level_mut() = WeaponLevel { level: 5, evolved: true };
        let stats = tables.weapon(WeaponKind::Nova).stats(5, true);
        let mut hits = Vec::new();
        nova.update(&ctx(0.0, 0.016, &enemies, &spatial, &tables), stats, &mut |h| hits.push(h));
        assert_eq!(hits[0].effect, HitEffect::Freeze(EVOLVED_FREEZE));
    }

    #[test]
    fn burst_passes_through_phased_enemy() {
        let (mut enemies, spatial, tables) = arena(&[(0.5, 0.0), (1.0, 0.0)]);
        enemies.states[1].phased = true;
        let mut nova = Nova::default();
        nova.level_mut().level = 1;
        let stats = tables.weapon(WeaponKind::Nova).stats(1, false);

        let mut hits = Vec::new();
        nova.update(&ctx(0.0, 0.016, &enemies, &spatial, &tables), stats, &mut |h| hits.push(h.enemy_id));
        assert_eq!(hits, vec![enemies.ids[0]]);
    }
}
