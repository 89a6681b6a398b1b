//! Path: native/game_simulation/src/progression/stats.rs
//! Summary: 1 ラン分の集計（撃破数・与被ダメージ・最低体力など）

use game_core::entity_params::Rarity;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub character:       String,
    pub time_survived:   f32,
    pub level:           u32,
    pub kills_normal:    u32,
    pub kills_elite:     u32,
    pub kills_boss:      u32,
    pub damage_dealt:    f32,
    pub damage_taken:    f32,
    pub damage_healed:   f32,
    pub gems_collected:  u32,
    pub max_combo:       u32,
    /// 生存中の最低体力割合（致死ダメージは含まない）
    pub lowest_health:   f32,
    /// 無傷のまま到達した最高レベル
    pub untouched_level: u32,
    pub revives_used:    u32,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            character:       String::new(),
            time_survived:   0.0,
            level:           1,
            kills_normal:    0,
            kills_elite:     0,
            kills_boss:      0,
            damage_dealt:    0.0,
            damage_taken:    0.0,
            damage_healed:   0.0,
            gems_collected:  0,
            max_combo:       0,
            lowest_health:   1.0,
            untouched_level: 1,
            revives_used:    0,
        }
    }
}

impl RunStats {
    pub fn for_character(id: &str) -> Self {
        Self { character: id.to_string(), ..Default::default() }
    }

    pub fn total_kills(&self) -> u32 {
        self.kills_normal + self.kills_elite + self.kills_boss
    }

    pub fn record_kill(&mut self, rarity: Rarity) {
        match rarity {
            Rarity::Normal => self.kills_normal += 1,
            Rarity::Elite  => self.kills_elite += 1,
            Rarity::Boss   => self.kills_boss += 1,
        }
    }

    pub fn record_health(&mut self, fraction: f32) {
        if fraction > 0.0 {
            self.lowest_health = self.lowest_health.min(fraction);
        }
    }

    pub fn record_level(&mut self, level: u32) {
        self.level = level;
        if self.damage_taken <= 0.0 {
            self.untouched_level = level;
        }
    }
}
