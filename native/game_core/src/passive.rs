//! Path: native/game_core/src/passive.rs
//! Summary: パッシブ 6 種のテーブルと、戦闘解決が参照する狭いインターフェース
//!
//! パッシブ同士は相互作用しない。戦闘側はレベルを直接読まず、
//! `reduce_damage` / `thorns_damage` / `magnet_multiplier` / `roll_crit` /
//! `exp_multiplier` / `life_steal_heal` だけを使う。

use serde::{Deserialize, Serialize};

use crate::physics::rng::SimpleRng;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PassiveKind {
    LifeSteal  = 0,
    Thorns     = 1,
    Magnet     = 2,
    Armor      = 3,
    CritChance = 4,
    ExpBonus   = 5,
}

impl PassiveKind {
    pub const ALL: [PassiveKind; 6] = [
        Self::LifeSteal,
        Self::Thorns,
        Self::Magnet,
        Self::Armor,
        Self::CritChance,
        Self::ExpBonus,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// 効果量 = base（Lv1）+ per_level × (Lv - 1)。thorns のみ固定値 flat_* も持つ
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PassiveParams {
    pub kind:           PassiveKind,
    pub name:           String,
    pub max_level:      u32,
    /// プレイヤーレベルがこれ以上で選択肢に出る
    pub unlock_level:   u32,
    pub base:           f32,
    pub per_level:      f32,
    #[serde(default)]
    pub flat_base:      f32,
    #[serde(default)]
    pub flat_per_level: f32,
}

impl PassiveParams {
    pub fn value(&self, level: u32) -> f32 {
        if level == 0 {
            return 0.0;
        }
        self.base + self.per_level * (level - 1) as f32
    }

    pub fn flat(&self, level: u32) -> f32 {
        if level == 0 {
            return 0.0;
        }
        self.flat_base + self.flat_per_level * (level - 1) as f32
    }
}

fn passive(kind: PassiveKind, name: &str, unlock_level: u32, base: f32, per_level: f32) -> PassiveParams {
    PassiveParams {
        kind,
        name: name.to_string(),
        max_level: 5,
        unlock_level,
        base,
        per_level,
        flat_base: 0.0,
        flat_per_level: 0.0,
    }
}

pub fn default_passives() -> Vec<PassiveParams> {
    let mut thorns = passive(PassiveKind::Thorns, "Thorns", 1, 0.2, 0.1);
    thorns.flat_base = 5.0;
    thorns.flat_per_level = 5.0;
    vec![
        passive(PassiveKind::LifeSteal,  "Life Steal",  1, 0.03, 0.02),
        thorns,
        passive(PassiveKind::Magnet,     "Magnet",      1, 1.5,  0.4),
        passive(PassiveKind::Armor,      "Armor",       3, 0.1,  0.05),
        passive(PassiveKind::CritChance, "Critical",    2, 0.1,  0.05),
        passive(PassiveKind::ExpBonus,   "Wisdom",      2, 0.15, 0.1),
    ]
}

// ─── Passives ─────────────────────────────────────────────────

/// ラン単位のパッシブ所持状況
#[derive(Clone, Debug)]
pub struct Passives {
    levels: [u32; 6],
    table:  Vec<PassiveParams>,
}

impl Passives {
    /// `table` は `PassiveKind` の添字順に並んでいること（設定検証で保証）
    pub fn new(table: &[PassiveParams]) -> Self {
        Self { levels: [0; 6], table: table.to_vec() }
    }

    pub fn reset(&mut self) {
        self.levels = [0; 6];
    }

    pub fn level(&self, kind: PassiveKind) -> u32 {
        self.levels[kind.index()]
    }

    pub fn params(&self, kind: PassiveKind) -> &PassiveParams {
        &self.table[kind.index()]
    }

    pub fn is_maxed(&self, kind: PassiveKind) -> bool {
        self.level(kind) >= self.params(kind).max_level
    }

    /// 最大レベル未満なら 1 上げて true
    pub fn upgrade(&mut self, kind: PassiveKind) -> bool {
        if self.is_maxed(kind) {
            return false;
        }
        self.levels[kind.index()] += 1;
        true
    }

    pub fn active_count(&self) -> usize {
        self.levels.iter().filter(|&&l| l > 0).count()
    }

    fn value(&self, kind: PassiveKind) -> f32 {
        self.params(kind).value(self.level(kind))
    }

    /// アーマー: 被ダメージを割合で軽減
    pub fn reduce_damage(&self, damage: f32) -> f32 {
        let reduction = self.value(PassiveKind::Armor).clamp(0.0, 0.95);
        damage * (1.0 - reduction)
    }

    /// ソーン: 実際に受けたダメージから反射量を算出（未習得なら 0）
    pub fn thorns_damage(&self, taken: f32) -> f32 {
        let level = self.level(PassiveKind::Thorns);
        if level == 0 {
            return 0.0;
        }
        let params = self.params(PassiveKind::Thorns);
        taken * params.value(level) + params.flat(level)
    }

    /// マグネット: 吸引半径の倍率（未習得なら 1）
    pub fn magnet_multiplier(&self) -> f32 {
        if self.level(PassiveKind::Magnet) == 0 {
            1.0
        } else {
            self.value(PassiveKind::Magnet)
        }
    }

    pub fn crit_chance(&self) -> f32 {
        self.value(PassiveKind::CritChance)
    }

    /// `bonus_chance` はメタショップ由来の加算分
    pub fn roll_crit(&self, bonus_chance: f32, rng: &mut SimpleRng) -> bool {
        let chance = self.crit_chance() + bonus_chance;
        chance > 0.0 && rng.next_f32() < chance
    }

    pub fn exp_multiplier(&self) -> f32 {
        1.0 + self.value(PassiveKind::ExpBonus)
    }

    /// ライフスティール: 与ダメージに対する回復量
    pub fn life_steal_heal(&self, dealt: f32) -> f32 {
        dealt * self.value(PassiveKind::LifeSteal)
    }
}
