//! Path: native/game_simulation/src/weapons/mod.rs
//! Summary: 武器の共通インターフェース（Weapon トレイト）と 6 種を束ねる WeaponSet
//!
//! 武器はワールドを直接書き換えない。命中は `on_hit` コールバックで返し、
//! 死亡・ドロップ処理は戦闘解決側がまとめて行う。

mod boomerang;
mod flamethrower;
mod laser;
mod lightning;
mod nova;
mod orbit;

pub use boomerang::{Boomerang, BoomerangLeg, BoomerangProjectile};
pub use flamethrower::{FireTrailDrop, Flamethrower};
pub use laser::OrbitalLaser;
pub use lightning::{Bolt, ChainLightning};
pub use nova::Nova;
pub use orbit::OrbitingShields;

use game_core::config::GameTables;
use game_core::physics::spatial_hash::SpatialHash;
use game_core::weapon::{UpgradeOutcome, WeaponKind, WeaponLevel, WeaponStats};

use crate::world::EnemyWorld;

/// 命中に付随する追加効果（進化で解放）
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HitEffect {
    None,
    /// 指定秒数その場で凍結
    Freeze(f32),
    /// プレイヤーへ向けて指定距離だけ引き寄せる
    Pull(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponHit {
    pub weapon:   WeaponKind,
    pub enemy_id: u32,
    pub damage:   f32,
    pub effect:   HitEffect,
}

/// 武器更新に渡す読み取り専用のワールド断面
pub struct WeaponContext<'a> {
    pub dt:       f32,
    pub now:      f32,
    pub player_x: f32,
    pub player_y: f32,
    pub facing_x: f32,
    pub facing_y: f32,
    pub enemies:  &'a EnemyWorld,
    pub spatial:  &'a SpatialHash,
    pub tables:   &'a GameTables,
}

impl WeaponContext<'_> {
    pub fn is_boss(&self, i: usize) -> bool {
        self.tables
            .enemy(self.enemies.kind_ids[i])
            .is_some_and(|p| p.is_boss())
    }

    /// 生存中かつ実体化している敵だけが命中対象（位相中は無敵）
    pub fn can_hit(&self, i: usize) -> bool {
        self.enemies.alive[i] && !self.enemies.states[i].phased
    }
}

pub trait Weapon {
    fn kind(&self) -> WeaponKind;
    fn level(&self) -> WeaponLevel;
    fn level_mut(&mut self) -> &mut WeaponLevel;
    /// 内部クールダウンを管理し、命中ごとに `on_hit` を呼ぶ
    fn update(&mut self, ctx: &WeaponContext<'_>, stats: WeaponStats, on_hit: &mut dyn FnMut(WeaponHit));
    /// 飛翔体・命中記録などの一時状態を捨てる（レベルは別）
    fn clear_transient(&mut self);
}

/// 1 ラン分の武器一式（種類ごとに 1 インスタンス）
#[derive(Default)]
pub struct WeaponSet {
    pub shields:      OrbitingShields,
    pub nova:         Nova,
    pub lightning:    ChainLightning,
    pub flamethrower: Flamethrower,
    pub boomerang:    Boomerang,
    pub laser:        OrbitalLaser,
}

impl WeaponSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: WeaponKind) -> &dyn Weapon {
        match kind {
            WeaponKind::OrbitingShields => &self.shields,
            WeaponKind::Nova            => &self.nova,
            WeaponKind::ChainLightning  => &self.lightning,
            WeaponKind::Flamethrower    => &self.flamethrower,
            WeaponKind::Boomerang       => &self.boomerang,
            WeaponKind::OrbitalLaser    => &self.laser,
        }
    }

    pub fn get_mut(&mut self, kind: WeaponKind) -> &mut dyn Weapon {
        match kind {
            WeaponKind::OrbitingShields => &mut self.shields,
            WeaponKind::Nova            => &mut self.nova,
            WeaponKind::ChainLightning  => &mut self.lightning,
            WeaponKind::Flamethrower    => &mut self.flamethrower,
            WeaponKind::Boomerang       => &mut self.boomerang,
            WeaponKind::OrbitalLaser    => &mut self.laser,
        }
    }

    pub fn level(&self, kind: WeaponKind) -> WeaponLevel {
        self.get(kind).level()
    }

    pub fn upgrade(&mut self, kind: WeaponKind, max_level: u32, paired_passive_maxed: bool) -> UpgradeOutcome {
        self.get_mut(kind).level_mut().upgrade(max_level, paired_passive_maxed)
    }

    pub fn active_count(&self) -> usize {
        WeaponKind::ALL.iter().filter(|&&k| self.level(k).is_active()).count()
    }

    /// 習得済みの武器を種類順に更新する
    pub fn update_all(&mut self, ctx: &WeaponContext<'_>, on_hit: &mut dyn FnMut(WeaponHit)) {
        for kind in WeaponKind::ALL {
            let weapon = self.get_mut(kind);
            let level = weapon.level();
            if !level.is_active() {
                continue;
            }
            let stats = ctx.tables.weapon(kind).stats(level.level, level.evolved);
            weapon.update(ctx, stats, on_hit);
        }
    }

    /// 帰り道のブーメランが宝石を巻き込む円 (x, y, r)
    pub fn gem_sweeps(&self) -> Vec<(f32, f32, f32)> {
        self.boomerang.sweep_circles().collect()
    }

    pub fn take_fire_trails(&mut self) -> Vec<FireTrailDrop> {
        self.flamethrower.take_trails()
    }

    /// ラン開始時: レベル・進化・一時状態をすべて初期化
    pub fn reset(&mut self) {
        for kind in WeaponKind::ALL {
            let weapon = self.get_mut(kind);
            *weapon.level_mut() = WeaponLevel::default();
            weapon.clear_transient();
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dormant_weapons_never_fire() {
        let (enemies, spatial, tables) = test_support::arena(&[(1.0, 0.0), (2.0, 0.0)]);
        let mut set = WeaponSet::new();
        let mut hits = 0;
        let c = test_support::ctx(0.0, 0.1, &enemies, &spatial, &tables);
        set.update_all(&c, &mut |_| hits += 1);
        assert_eq!(hits, 0);

        set.upgrade(WeaponKind::Nova, 5, false);
        set.update_all(&c, &mut |_| hits += 1);
        assert_eq!(hits, 2);
        assert_eq!(set.active_count(), 1);
    }

    #[test]
    fn reset_clears_levels_and_evolution() {
        let mut set = WeaponSet::new();
        for _ in 0..6 {
            set.upgrade(WeaponKind::Boomerang, 5, true);
        }
        assert!(set.level(WeaponKind::Boomerang).evolved);
        set.reset();
        assert_eq!(set.level(WeaponKind::Boomerang), WeaponLevel::default());
        assert_eq!(set.active_count(), 0);
    }
}
