//! Path: native/game_simulation/src/progression/combo.rs
//! Summary: キルストリーク（コンボ）の計数・減衰・ティア到達判定

use game_core::constants::COMBO_TIMEOUT;
use game_core::progression::{combo_tier_index, ComboTier};

/// 現在のコンボで効いている倍率
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComboBonus {
    pub damage_mult: f32,
    pub speed_mult:  f32,
    pub gem_mult:    f32,
}

impl Default for ComboBonus {
    fn default() -> Self {
        Self { damage_mult: 1.0, speed_mult: 1.0, gem_mult: 1.0 }
    }
}

/// キルで伸びたときの結果。`new_tier` はこのストリークで初めて到達したティア
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComboKill {
    pub count:    u32,
    pub new_tier: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Combo {
    count:           u32,
    since_last_kill: f32,
    best:            u32,
    /// このストリークで到達済みの最高ティア
    tier_reached:    Option<usize>,
}

impl Combo {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// 時間を進める。最後のキルからの経過がタイムアウトを「超えた」ら途切れ、
    /// 途切れたストリーク数を返す。ちょうど境界ならまだ続いている。
    pub fn update(&mut self, dt: f32) -> Option<u32> {
        if self.count == 0 {
            return None;
        }
        self.since_last_kill += dt;
        if self.since_last_kill > COMBO_TIMEOUT {
            Some(self.break_streak())
        } else {
            None
        }
    }

    pub fn on_kill(&mut self, tiers: &[ComboTier]) -> ComboKill {
        self.count += 1;
        self.since_last_kill = 0.0;
        self.best = self.best.max(self.count);
        let idx = combo_tier_index(tiers, self.count);
        let new_tier = match (idx, self.tier_reached) {
            (Some(i), Some(prev)) if i > prev => Some(i),
            (Some(i), None) => Some(i),
            _ => None,
        };
        if new_tier.is_some() {
            self.tier_reached = new_tier;
        }
        ComboKill { count: self.count, new_tier }
    }

    /// 被弾でストリークは即リセット。続いていたなら数を返す
    pub fn on_player_damaged(&mut self) -> Option<u32> {
        if self.count == 0 {
            None
        } else {
            Some(self.break_streak())
        }
    }

    pub fn bonus(&self, tiers: &[ComboTier]) -> ComboBonus {
        match combo_tier_index(tiers, self.count) {
            Some(i) => ComboBonus {
                damage_mult: tiers[i].damage_mult,
                speed_mult:  tiers[i].speed_mult,
                gem_mult:    tiers[i].gem_mult,
            },
            None => ComboBonus::default(),
        }
    }

    pub fn tier_name<'a>(&self, tiers: &'a [ComboTier]) -> Option<&'a str> {
        combo_tier_index(tiers, self.count).map(|i| tiers[i].name.as_str())
    }

    fn break_streak(&mut self) -> u32 {
        let ended = self.count;
        self.count = 0;
        self.since_last_kill = 0.0;
        self.tier_reached = None;
        ended
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::progression::default_combo_tiers;

    #[test]
    fn kill_exactly_at_timeout_extends_streak() {
        let tiers = default_combo_tiers();
        let mut c = Combo::default();
        c.on_kill(&tiers);
        for _ in 0..4 {
            assert_eq!(c.update(0.5), None);
        }
        assert_eq!(c.on_kill(&tiers).count, 2);
    }

    #[test]
    fn decays_once_after_timeout() {
        let tiers = default_combo_tiers();
        let mut c = Combo::default();
        c.on_kill(&tiers);
        c.on_kill(&tiers);
        assert_eq!(c.update(2.0), None);
        assert_eq!(c.update(0.01), Some(2));
        assert_eq!(c.update(5.0), None);
        assert_eq!(c.count(), 0);
        assert_eq!(c.best(), 2);
    }

    #[test]
    fn tier_crossing_reported_once_per_streak() {
        let tiers = default_combo_tiers();
        let mut c = Combo::default();
        let mut crossings = Vec::new();
        for _ in 0..12 {
            if let Some(t) = c.on_kill(&tiers).new_tier {
                crossings.push((c.count(), t));
            }
        }
        assert_eq!(crossings, vec![(5, 0), (10, 1)]);
        assert!((c.bonus(&tiers).damage_mult - 1.2).abs() < 0.001);

        assert_eq!(c.on_player_damaged(), Some(12));
        assert_eq!(c.bonus(&tiers), ComboBonus::default());
        for _ in 0..5 {
            c.on_kill(&tiers);
        }
        assert_eq!(c.tier_name(&tiers), Some("NICE"));
    }
}
