//! Path: native/game_core/src/difficulty.rs
//! Summary: 難易度ティア・スポーン曲線・剰余ベースのスケジュール・重み付き抽選
//!
//! すべて経過時間の純関数。状態はシミュレーション側のスポーンディレクターが持つ。

use serde::{Deserialize, Serialize};

/// 設定ファイル上のティア（敵は名前で列挙）
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierDef {
    /// このティアが有効になる経過秒
    pub time:    f32,
    pub name:    String,
    pub enemies: Vec<String>,
}

/// 名前解決済みのティア
#[derive(Clone, Debug, PartialEq)]
pub struct DifficultyTier {
    pub time:     f32,
    pub name:     String,
    pub kind_ids: Vec<u8>,
}

/// 経過時間 `t` で有効なティアの添字（`time` 昇順前提）
pub fn tier_index_at(tiers: &[DifficultyTier], t: f32) -> usize {
    tiers
        .iter()
        .rposition(|tier| t >= tier.time)
        .unwrap_or(0)
}

// ─── スポーン曲線 ─────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpawnTuning {
    pub base_interval:             f32,
    pub interval_decay_per_minute: f32,
    pub min_interval:              f32,
    /// 1 分あたりの敵体力倍率の増分（線形）
    pub health_scaling_per_minute: f32,
    /// この秒数ごとにバーストの同時スポーン数が 1 増える
    pub burst_growth_seconds:      f32,
    pub max_burst:                 u32,
    pub spawn_min_distance:        f32,
    pub spawn_max_distance:        f32,
    pub max_enemies:               usize,
    pub boss_schedule:             ModuloSchedule,
    pub boss_distance:             f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            base_interval:             2.0,
            interval_decay_per_minute: 0.3,
            min_interval:              0.3,
            health_scaling_per_minute: 0.3,
            burst_growth_seconds:      30.0,
            max_burst:                 8,
            spawn_min_distance:        30.0,
            spawn_max_distance:        40.0,
            max_enemies:               crate::constants::MAX_ENEMIES,
            boss_schedule:             ModuloSchedule { first: 60.0, interval: 60.0 },
            boss_distance:             35.0,
        }
    }
}

impl SpawnTuning {
    /// 経過時間とともに縮むスポーン間隔（下限でクランプ）
    pub fn spawn_interval(&self, t: f32) -> f32 {
        (self.base_interval - (t / 60.0) * self.interval_decay_per_minute).max(self.min_interval)
    }

    /// 敵の体力倍率（経過分に比例）
    pub fn health_multiplier(&self, t: f32) -> f32 {
        1.0 + (t / 60.0) * self.health_scaling_per_minute
    }

    /// 1 回のバーストで出す体数（1..=max_burst）
    pub fn burst_size(&self, t: f32) -> u32 {
        let growth = (t / self.burst_growth_seconds.max(f32::EPSILON)).floor() as u32;
        (1 + growth).min(self.max_burst.max(1))
    }
}

// ─── 剰余スケジュール ─────────────────────────────────────────

/// `first` 秒に初回、以降 `interval` 秒ごとに発火する。
///
/// カウントダウンではなく経過時間から周期番号を計算するため、
/// 一時停止から復帰しても同じ周期で二重発火しない。
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuloSchedule {
    pub first:    f32,
    pub interval: f32,
}

impl ModuloSchedule {
    /// `t` が属する周期番号。`first` 前は None
    pub fn period_index(&self, t: f32) -> Option<u64> {
        if t < self.first {
            return None;
        }
        Some(((t - self.first) / self.interval.max(f32::EPSILON)).floor() as u64)
    }

    /// 前回チェック時刻 `prev` から `now` の間に新しい周期へ入ったか
    pub fn fires_between(&self, prev: f32, now: f32) -> bool {
        match (self.period_index(prev), self.period_index(now)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(a), Some(b)) => b > a,
        }
    }
}

/// 設定ファイル上の中ボス定義
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MiniBossDef {
    pub enemy:    String,
    pub schedule: ModuloSchedule,
}

/// 名前解決済みの中ボス
#[derive(Clone, Debug, PartialEq)]
pub struct MiniBoss {
    pub kind_id:  u8,
    pub schedule: ModuloSchedule,
}

// ─── 重み付き抽選 ─────────────────────────────────────────────

/// ルーレット選択。`draw` は [0, 1) の一様乱数。
///
/// 合計重みに draw を掛け、先頭から重みを引いていき 0 以下になった最初の要素を返す。
/// 重み 0 の要素は選ばれない。すべて 0 なら先頭。
pub fn pick_weighted(weights: &[u32], draw: f32) -> usize {
    let total: u32 = weights.iter().sum();
    if total == 0 {
        return 0;
    }
    let mut remaining = draw * total as f32;
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w == 0 {
            continue;
        }
        last_positive = i;
        remaining -= w as f32;
        if remaining <= 0.0 {
            return i;
        }
    }
    // 浮動小数の丸めで末尾を超えた場合
    last_positive
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::rng::SimpleRng;

    #[test]
    fn weighted_selection_matches_weights() {
        let weights = [40, 25, 15, 20];
        let mut rng = SimpleRng::new(20240601);
        let mut counts = [0usize; 4];
        let n = 200_000;
        for _ in 0..n {
            counts[pick_weighted(&weights, rng.next_f32())] += 1;
        }
        for (i, &w) in weights.iter().enumerate() {
            let observed = counts[i] as f32 / n as f32;
            let expected = w as f32 / 100.0;
            assert!((observed - expected).abs() < 0.01, "type {i}: {observed} vs {expected}");
        }
    }

    #[test]
    fn weighted_tie_break_is_first_meeting_draw() {
        // draw * total = 40 ちょうど → 最初の要素の累積 40 が満たす
        assert_eq!(pick_weighted(&[40, 60], 0.4), 0);
        assert_eq!(pick_weighted(&[40, 60], 0.41), 1);
        assert_eq!(pick_weighted(&[0, 5], 0.0), 1);
        assert_eq!(pick_weighted(&[0, 0], 0.5), 0);
    }

    #[test]
    fn mini_boss_schedule_is_modulo_based() {
        let s = ModuloSchedule { first: 45.0, interval: 120.0 };
        let checks = [44.0, 45.0, 165.0, 200.0];
        let mut prev = 0.0;
        let mut fired = Vec::new();
        for &t in &checks {
            fired.push(s.fires_between(prev, t));
            prev = t;
        }
        assert_eq!(fired, vec![false, true, true, false]);
    }

    #[test]
    fn schedule_fires_once_per_period_across_long_gap() {
        let s = ModuloSchedule { first: 60.0, interval: 60.0 };
        assert!(s.fires_between(50.0, 300.0));
        assert!(!s.fires_between(300.0, 300.0));
        assert!(!s.fires_between(121.0, 179.9));
    }

    #[test]
    fn spawn_curves_clamp() {
        let tuning = SpawnTuning::default();
        assert!((tuning.spawn_interval(0.0) - 2.0).abs() < 0.001);
        assert!((tuning.spawn_interval(6000.0) - 0.3).abs() < 0.001);
        assert!((tuning.health_multiplier(120.0) - 1.6).abs() < 0.001);
        assert_eq!(tuning.burst_size(0.0), 1);
        assert_eq!(tuning.burst_size(65.0), 3);
        assert_eq!(tuning.burst_size(10_000.0), 8);
    }

    #[test]
    fn tier_index_picks_latest_reached() {
        let tier = |time: f32| DifficultyTier { time, name: String::new(), kind_ids: vec![] };
        let tiers = vec![tier(0.0), tier(30.0), tier(60.0)];
        assert_eq!(tier_index_at(&tiers, 0.0), 0);
        assert_eq!(tier_index_at(&tiers, 29.9), 0);
        assert_eq!(tier_index_at(&tiers, 30.0), 1);
        assert_eq!(tier_index_at(&tiers, 999.0), 2);
    }
}
