//! Path: native/game_core/src/progression.rs
//! Summary: コンボボーナス表・経験値曲線・基本ステータス強化・ソウル/スコア計算

use serde::{Deserialize, Serialize};

use crate::constants::EXP_GROWTH_FACTOR;

// ─── コンボ ───────────────────────────────────────────────────

/// コンボ数がしきい値以上のときに適用される累積倍率
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComboTier {
    pub threshold:   u32,
    pub name:        String,
    pub damage_mult: f32,
    pub speed_mult:  f32,
    pub gem_mult:    f32,
    /// このティアに初めて到達したときの回復量
    pub heal:        f32,
}

pub fn default_combo_tiers() -> Vec<ComboTier> {
    let tier = |threshold, name: &str, damage_mult, speed_mult, gem_mult, heal| ComboTier {
        threshold,
        name: name.to_string(),
        damage_mult,
        speed_mult,
        gem_mult,
        heal,
    };
    vec![
        tier(5,   "NICE",        1.1,  1.0,  1.0,  0.0),
        tier(10,  "GREAT",       1.2,  1.05, 1.1,  5.0),
        tier(25,  "AMAZING",     1.35, 1.1,  1.25, 10.0),
        tier(50,  "UNSTOPPABLE", 1.5,  1.15, 1.5,  20.0),
        tier(100, "GODLIKE",     1.75, 1.2,  2.0,  30.0),
    ]
}

/// しきい値を高い方から評価し、最初に満たしたティアの添字を返す
pub fn combo_tier_index(tiers: &[ComboTier], count: u32) -> Option<usize> {
    tiers
        .iter()
        .enumerate()
        .rev()
        .find(|(_, t)| count >= t.threshold)
        .map(|(i, _)| i)
}

// ─── レベル ───────────────────────────────────────────────────

/// 次のレベルアップに必要な経験値（前回しきい値 × 成長率、切り捨て）
pub fn next_exp_threshold(current: u32) -> u32 {
    ((current as f32 * EXP_GROWTH_FACTOR).floor() as u32).max(current + 1)
}

/// レベルアップ時に選べる基本ステータス強化
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatUpgrade {
    MaxHealth,
    Speed,
    Damage,
    AttackSpeed,
    Range,
    MultiShot,
    Heal,
    ProjectileSpeed,
}

impl StatUpgrade {
    pub const ALL: [StatUpgrade; 8] = [
        Self::MaxHealth,
        Self::Speed,
        Self::Damage,
        Self::AttackSpeed,
        Self::Range,
        Self::MultiShot,
        Self::Heal,
        Self::ProjectileSpeed,
    ];
}

// ─── ラン結果の換算 ───────────────────────────────────────────

/// ラン終了時に得るソウル
pub fn souls_for_run(time: f32, level: u32, kills: u32, boss_kills: u32) -> u32 {
    (time.max(0.0) / 10.0).floor() as u32 + level * 2 + kills / 10 + boss_kills * 25
}

/// ハイスコア用の合成スコア
pub fn composite_score(time: f32, level: u32, kills: u32) -> u32 {
    (time.max(0.0) * 10.0 + level as f32 * 100.0 + kills as f32 * 5.0).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_tier_wins() {
        let tiers = default_combo_tiers();
        assert_eq!(combo_tier_index(&tiers, 0), None);
        assert_eq!(combo_tier_index(&tiers, 4), None);
        assert_eq!(combo_tier_index(&tiers, 5), Some(0));
        assert_eq!(combo_tier_index(&tiers, 24), Some(1));
        assert_eq!(combo_tier_index(&tiers, 500), Some(4));
    }

    #[test]
    fn threshold_grows_by_factor() {
        assert_eq!(next_exp_threshold(10), 15);
        assert_eq!(next_exp_threshold(15), 22);
        assert_eq!(next_exp_threshold(1), 2);
    }

    #[test]
    fn souls_formula() {
        // 125s → 12, Lv7 → 14, 83 kills → 8, 2 boss → 50
        assert_eq!(souls_for_run(125.0, 7, 83, 2), 84);
        assert_eq!(souls_for_run(-5.0, 0, 0, 0), 0);
    }

    #[test]
    fn composite_score_formula() {
        assert_eq!(composite_score(61.25, 4, 30), 612 + 400 + 150);
    }
}
