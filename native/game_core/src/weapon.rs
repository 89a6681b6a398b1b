//! Path: native/game_core/src/weapon.rs
//! Summary: 武器種類・レベル別ステータス（純関数）・進化判定の共通定義

use serde::{Deserialize, Serialize};

use crate::passive::PassiveKind;

/// クールダウン式が壊れていても 0 以下にならないための下限
pub const MIN_WEAPON_COOLDOWN: f32 = 0.05;

// ─── WeaponKind ───────────────────────────────────────────────
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum WeaponKind {
    /// プレイヤーの周囲を回る盾
    OrbitingShields = 0,
    /// 周囲への円形爆発（距離減衰）
    Nova            = 1,
    /// 最近接から連鎖する電撃
    ChainLightning  = 2,
    /// 向いている方向への扇状放射 + 燃焼 DoT
    Flamethrower    = 3,
    /// 往復する投擲物
    Boomerang       = 4,
    /// 周囲を回転するビーム
    OrbitalLaser    = 5,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 6] = [
        Self::OrbitingShields,
        Self::Nova,
        Self::ChainLightning,
        Self::Flamethrower,
        Self::Boomerang,
        Self::OrbitalLaser,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::OrbitingShields => "orbiting_shields",
            Self::Nova            => "nova",
            Self::ChainLightning  => "chain_lightning",
            Self::Flamethrower    => "flamethrower",
            Self::Boomerang       => "boomerang",
            Self::OrbitalLaser    => "orbital_laser",
        }
    }
}

// ─── WeaponParams ─────────────────────────────────────────────

/// レベルスケーリング係数。各ステータスは `base + per_level × level`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeaponParams {
    pub kind:                WeaponKind,
    pub name:                String,
    pub max_level:           u32,
    pub unlock_level:        u32,
    /// 進化に必要な対のパッシブ
    pub paired_passive:      PassiveKind,
    pub damage_base:         f32,
    pub damage_per_level:    f32,
    pub range_base:          f32,
    pub range_per_level:     f32,
    pub cooldown_base:       f32,
    pub cooldown_per_level:  f32,
    pub cooldown_floor:      f32,
    pub count_base:          u32,
    /// count は `level / count_level_divisor` ずつ増える（0 なら固定）
    pub count_level_divisor: u32,
    pub evolved_damage_mult: f32,
    pub evolved_bonus_count: u32,
}

/// ある時点での派生ステータス
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponStats {
    pub damage:   f32,
    pub range:    f32,
    pub cooldown: f32,
    pub count:    u32,
}

impl WeaponParams {
    pub fn stats(&self, level: u32, evolved: bool) -> WeaponStats {
        let lv = level as f32;
        let mut damage = self.damage_base + self.damage_per_level * lv;
        let mut count = self.count_base;
        if self.count_level_divisor > 0 {
            count += level / self.count_level_divisor;
        }
        if evolved {
            damage *= self.evolved_damage_mult;
            count += self.evolved_bonus_count;
        }
        let cooldown = (self.cooldown_base - self.cooldown_per_level * lv)
            .max(self.cooldown_floor)
            .max(MIN_WEAPON_COOLDOWN);
        WeaponStats {
            damage,
            range: self.range_base + self.range_per_level * lv,
            cooldown,
            count,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn weapon(
    kind: WeaponKind,
    unlock_level: u32,
    paired_passive: PassiveKind,
    damage: (f32, f32),
    range: (f32, f32),
    cooldown: (f32, f32, f32),
    count: (u32, u32),
    evolved_bonus_count: u32,
) -> WeaponParams {
    WeaponParams {
        kind,
        name: kind.name().to_string(),
        max_level: 5,
        unlock_level,
        paired_passive,
        damage_base: damage.0,
        damage_per_level: damage.1,
        range_base: range.0,
        range_per_level: range.1,
        cooldown_base: cooldown.0,
        cooldown_per_level: cooldown.1,
        cooldown_floor: cooldown.2,
        count_base: count.0,
        count_level_divisor: count.1,
        evolved_damage_mult: 2.0,
        evolved_bonus_count,
    }
}

/// 出荷時の武器テーブル（`WeaponKind` の添字順）
///
/// cooldown の意味は武器ごとに異なる: 盾とレーザーは同一敵への再ヒット間隔、
/// 火炎放射はティック間隔、それ以外は発動間隔。
pub fn default_weapons() -> Vec<WeaponParams> {
    use PassiveKind::*;
    use WeaponKind::*;
    vec![
        weapon(OrbitingShields, 1, Armor,      (15.0, 8.0),  (2.5, 0.3), (0.3, 0.0, 0.3),   (2, 2), 2),
        weapon(Nova,            2, Thorns,     (40.0, 20.0), (6.0, 1.5), (4.0, 0.4, 1.5),   (1, 0), 0),
        weapon(ChainLightning,  3, CritChance, (20.0, 10.0), (8.0, 1.0), (1.5, 0.15, 0.5),  (3, 2), 0),
        weapon(Flamethrower,    2, LifeSteal,  (6.0, 3.0),   (5.0, 0.5), (0.1, 0.0, 0.1),   (1, 0), 0),
        weapon(Boomerang,       3, Magnet,     (20.0, 8.0),  (8.0, 1.0), (2.5, 0.25, 0.8),  (1, 3), 1),
        weapon(OrbitalLaser,    4, ExpBonus,   (8.0, 4.0),   (6.0, 1.5), (0.25, 0.0, 0.25), (2, 0), 0),
    ]
}

// ─── WeaponLevel ──────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UpgradeOutcome {
    Leveled(u32),
    Evolved,
    Unchanged,
}

/// レベル（0 = 未習得）と進化フラグ
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct WeaponLevel {
    pub level:   u32,
    pub evolved: bool,
}

impl WeaponLevel {
    pub fn is_active(&self) -> bool {
        self.level > 0
    }

    pub fn can_evolve(&self, max_level: u32, paired_passive_maxed: bool) -> bool {
        !self.evolved && self.level >= max_level && paired_passive_maxed
    }

    /// 上限まではレベルを上げ、上限到達後は対のパッシブも最大なら進化する。
    /// 進化後の呼び出しは何も変えない。
    pub fn upgrade(&mut self, max_level: u32, paired_passive_maxed: bool) -> UpgradeOutcome {
        if self.level < max_level {
            self.level += 1;
            return UpgradeOutcome::Leveled(self.level);
        }
        if self.can_evolve(max_level, paired_passive_maxed) {
            self.evolved = true;
            return UpgradeOutcome::Evolved;
        }
        UpgradeOutcome::Unchanged
    }
}
