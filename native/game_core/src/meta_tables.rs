//! Path: native/game_core/src/meta_tables.rs
//! Summary: メタ進行の定義（ソウルショップ・キャラクター・実績）と条件述語

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::constants::{
    PLAYER_BASE_ATTACK_SPEED, PLAYER_BASE_DAMAGE, PLAYER_BASE_HEALTH, PLAYER_BASE_SPEED,
};
use crate::passive::PassiveKind;

// ─── 条件述語 ─────────────────────────────────────────────────

/// 実績・キャラ解放判定に渡す集計値（ラン + 生涯）
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressSnapshot {
    pub run_time:              f32,
    pub run_level:             u32,
    pub run_kills:             u32,
    pub run_boss_kills:        u32,
    pub run_max_combo:         u32,
    pub run_gems:              u32,
    /// 生存中に記録した最低体力割合（致死ダメージは含まない）
    pub run_lowest_health:     f32,
    /// 無傷のまま到達した最高レベル
    pub run_untouched_level:   u32,
    pub run_weapons_active:    u32,
    pub run_passives_active:   u32,
    pub total_kills:           u32,
    pub total_boss_kills:      u32,
    pub total_gems:            u32,
    pub best_time:             f32,
    pub best_level:            u32,
    pub best_kills:            u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Condition {
    RunKills(u32),
    TotalKills(u32),
    SurviveSeconds(f32),
    ReachLevel(u32),
    RunBossKills(u32),
    TotalBossKills(u32),
    MaxCombo(u32),
    /// 最低体力割合がこの値以下まで落ちて生き延びた
    CloseCall(f32),
    /// 一度も被弾せずにこのレベルへ到達
    Untouchable(u32),
    RunGems(u32),
    TotalGems(u32),
    WeaponsActive(u32),
    PassivesActive(u32),
    BestTime(f32),
    BestKills(u32),
    BestLevel(u32),
}

impl Condition {
    pub fn is_met(&self, s: &ProgressSnapshot) -> bool {
        match *self {
            Self::RunKills(n)       => s.run_kills >= n,
            Self::TotalKills(n)     => s.total_kills >= n,
            Self::SurviveSeconds(t) => s.run_time >= t,
            Self::ReachLevel(n)     => s.run_level >= n,
            Self::RunBossKills(n)   => s.run_boss_kills >= n,
            Self::TotalBossKills(n) => s.total_boss_kills >= n,
            Self::MaxCombo(n)       => s.run_max_combo >= n,
            Self::CloseCall(f)      => s.run_lowest_health > 0.0 && s.run_lowest_health <= f,
            Self::Untouchable(n)    => s.run_untouched_level >= n,
            Self::RunGems(n)        => s.run_gems >= n,
            Self::TotalGems(n)      => s.total_gems >= n,
            Self::WeaponsActive(n)  => s.run_weapons_active >= n,
            Self::PassivesActive(n) => s.run_passives_active >= n,
            Self::BestTime(t)       => s.best_time >= t,
            Self::BestKills(n)      => s.best_kills >= n,
            Self::BestLevel(n)      => s.best_level >= n,
        }
    }
}

// ─── 実績 ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AchievementDef {
    pub id:          String,
    pub name:        String,
    pub description: String,
    pub condition:   Condition,
}

pub fn default_achievements() -> Vec<AchievementDef> {
    use Condition::*;
    let a = |id: &str, name: &str, description: &str, condition| AchievementDef {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        condition,
    };
    vec![
        a("first_blood",    "First Blood",    "Kill your first enemy",             TotalKills(1)),
        a("centurion",      "Centurion",      "Kill 100 enemies in one run",       RunKills(100)),
        a("genocide",       "Genocide",       "Kill 500 enemies in one run",       RunKills(500)),
        a("slayer",         "Slayer",         "Kill 1000 enemies in total",        TotalKills(1000)),
        a("survivor",       "Survivor",       "Survive for 1 minute",              SurviveSeconds(60.0)),
        a("endurance",      "Endurance",      "Survive for 5 minutes",             SurviveSeconds(300.0)),
        a("marathon",       "Marathon",       "Survive for 10 minutes",            SurviveSeconds(600.0)),
        a("immortal",       "Immortal",       "Survive for 15 minutes",            SurviveSeconds(900.0)),
        a("apprentice",     "Apprentice",     "Reach level 5",                     ReachLevel(5)),
        a("adept",          "Adept",          "Reach level 10",                    ReachLevel(10)),
        a("master",         "Master",         "Reach level 20",                    ReachLevel(20)),
        a("legend",         "Legend",         "Reach level 30",                    ReachLevel(30)),
        a("boss_slayer",    "Boss Slayer",    "Defeat a boss",                     RunBossKills(1)),
        a("boss_hunter",    "Boss Hunter",    "Defeat 5 bosses in total",          TotalBossKills(5)),
        a("combo_10",       "Combo Starter",  "Reach a 10 kill combo",             MaxCombo(10)),
        a("combo_25",       "Combo Master",   "Reach a 25 kill combo",             MaxCombo(25)),
        a("combo_50",       "Combo Legend",   "Reach a 50 kill combo",             MaxCombo(50)),
        a("close_call",     "Close Call",     "Survive with 10% health or less",   CloseCall(0.1)),
        a("untouchable",    "Untouchable",    "Reach level 5 without damage",      Untouchable(5)),
        a("collector",      "Collector",      "Collect 500 gems in one run",       RunGems(500)),
        a("hoarder",        "Hoarder",        "Collect 2000 gems in total",        TotalGems(2000)),
        a("full_arsenal",   "Full Arsenal",   "Have all six weapons active",       WeaponsActive(6)),
        a("passive_master", "Passive Master", "Have all six passives active",      PassivesActive(6)),
    ]
}

// ─── キャラクター ─────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharacterDef {
    pub id:                String,
    pub name:              String,
    pub health:            f32,
    pub speed:             f32,
    pub damage:            f32,
    pub attack_speed:      f32,
    #[serde(default)]
    pub starting_passives: Vec<PassiveKind>,
    /// None なら最初から使える
    #[serde(default)]
    pub unlock:            Option<Condition>,
}

pub fn default_characters() -> Vec<CharacterDef> {
    let c = |id: &str, name: &str, health, speed, damage, attack_speed, unlock| CharacterDef {
        id: id.to_string(),
        name: name.to_string(),
        health,
        speed,
        damage,
        attack_speed,
        starting_passives: Vec::new(),
        unlock,
    };
    let mut vampire = c("vampire", "Vampire", 80.0, 9.0, 22.0, 1.1, Some(Condition::TotalBossKills(3)));
    vampire.starting_passives.push(PassiveKind::LifeSteal);
    vec![
        c(
            "default",
            "Survivor",
            PLAYER_BASE_HEALTH,
            PLAYER_BASE_SPEED,
            PLAYER_BASE_DAMAGE,
            PLAYER_BASE_ATTACK_SPEED,
            None,
        ),
        c("tank",         "Tank",         200.0, 5.0,  20.0, 0.8, Some(Condition::BestTime(300.0))),
        c("speedster",    "Speedster",    60.0,  12.0, 20.0, 1.5, Some(Condition::BestKills(200))),
        c("glass_cannon", "Glass Cannon", 40.0,  8.0,  50.0, 1.3, Some(Condition::BestLevel(15))),
        vampire,
    ]
}

// ─── ソウルショップ ───────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaEffect {
    StartingHealth,
    StartingDamage,
    StartingSpeed,
    ExpMultiplier,
    PickupRange,
    CritChance,
    DamageReduction,
    Revival,
    Rerolls,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetaUpgradeDef {
    pub id:          String,
    pub name:        String,
    pub effect:      MetaEffect,
    pub max_level:   u32,
    pub base_cost:   u32,
    /// レベルごとの価格倍率（1 以上で単調増加）
    pub cost_growth: f32,
    /// 1 レベルあたりの効果量（割合 or 回数）
    pub per_level:   f32,
}

impl MetaUpgradeDef {
    /// 現在レベル `level` から 1 上げる価格
    pub fn cost(&self, level: u32) -> u32 {
        (self.base_cost as f32 * self.cost_growth.powi(level as i32)).floor() as u32
    }
}

pub fn default_meta_upgrades() -> Vec<MetaUpgradeDef> {
    use MetaEffect::*;
    let m = |id: &str, name: &str, effect, max_level, base_cost, cost_growth, per_level| MetaUpgradeDef {
        id: id.to_string(),
        name: name.to_string(),
        effect,
        max_level,
        base_cost,
        cost_growth,
        per_level,
    };
    vec![
        m("vitality",  "Vitality",  StartingHealth,  5, 50,  1.5, 0.10),
        m("might",     "Might",     StartingDamage,  5, 60,  1.5, 0.05),
        m("swiftness", "Swiftness", StartingSpeed,   5, 40,  1.5, 0.05),
        m("wisdom",    "Wisdom",    ExpMultiplier,   5, 50,  1.5, 0.10),
        m("magnetism", "Magnetism", PickupRange,     3, 40,  1.6, 0.15),
        m("precision", "Precision", CritChance,      5, 75,  1.5, 0.02),
        m("fortitude", "Fortitude", DamageReduction, 5, 80,  1.5, 0.03),
        m("revival",   "Revival",   Revival,         1, 300, 1.0, 1.0),
        m("reroll",    "Reroll",    Rerolls,         3, 100, 2.0, 1.0),
    ]
}

/// ラン開始時に一度だけ適用されるメタ強化の合計
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetaBonuses {
    pub health_mult:      f32,
    pub damage_mult:      f32,
    pub speed_mult:       f32,
    pub exp_mult:         f32,
    pub pickup_mult:      f32,
    pub crit_chance:      f32,
    pub damage_reduction: f32,
    pub revivals:         u32,
    pub rerolls:          u32,
}

impl Default for MetaBonuses {
    fn default() -> Self {
        Self {
            health_mult:      1.0,
            damage_mult:      1.0,
            speed_mult:       1.0,
            exp_mult:         1.0,
            pickup_mult:      1.0,
            crit_chance:      0.0,
            damage_reduction: 0.0,
            revivals:         0,
            rerolls:          0,
        }
    }
}

impl MetaBonuses {
    pub fn from_levels(defs: &[MetaUpgradeDef], levels: &FxHashMap<String, u32>) -> Self {
        let mut b = Self::default();
        for def in defs {
            let level = levels.get(&def.id).copied().unwrap_or(0).min(def.max_level);
            if level == 0 {
                continue;
            }
            let amount = def.per_level * level as f32;
            match def.effect {
                MetaEffect::StartingHealth  => b.health_mult += amount,
                MetaEffect::StartingDamage  => b.damage_mult += amount,
                MetaEffect::StartingSpeed   => b.speed_mult += amount,
                MetaEffect::ExpMultiplier   => b.exp_mult += amount,
                MetaEffect::PickupRange     => b.pickup_mult += amount,
                MetaEffect::CritChance      => b.crit_chance += amount,
                MetaEffect::DamageReduction => b.damage_reduction += amount,
                MetaEffect::Revival         => b.revivals += amount.round() as u32,
                MetaEffect::Rerolls         => b.rerolls += amount.round() as u32,
            }
        }
        b.damage_reduction = b.damage_reduction.clamp(0.0, 0.9);
        b
    }
}
