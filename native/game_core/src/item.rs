//! Path: native/game_core/src/item.rs
//! Summary: ドロップアイテム種類（ジェム・パワーアップ）と ItemWorld プール

use serde::{Deserialize, Serialize};

/// 一時強化の種類
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PowerupKind {
    Invincibility = 0,
    DamageBoost   = 1,
    SpeedBoost    = 2,
    MagnetPulse   = 3,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 4] = [
        Self::Invincibility,
        Self::DamageBoost,
        Self::SpeedBoost,
        Self::MagnetPulse,
    ];

    pub fn duration(self) -> f32 {
        match self {
            Self::Invincibility => 5.0,
            Self::DamageBoost   => 8.0,
            Self::SpeedBoost    => 6.0,
            Self::MagnetPulse   => 10.0,
        }
    }

    /// 効果中の倍率（無敵は倍率なし）
    pub fn multiplier(self) -> f32 {
        match self {
            Self::Invincibility => 1.0,
            Self::DamageBoost   => 2.0,
            Self::SpeedBoost    => 1.5,
            Self::MagnetPulse   => 3.0,
        }
    }
}

/// アイテムの種類
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ItemKind {
    /// 経験値宝石（TTL なし）
    #[default]
    Gem,
    /// パワーアップ（地面に一定時間だけ残る）
    Powerup(PowerupKind),
}

/// アイテム SoA（Structure of Arrays）
///
/// フリーリストにより kill されたスロットを O(1) で再利用する。
pub struct ItemWorld {
    pub positions_x: Vec<f32>,
    pub positions_y: Vec<f32>,
    pub kinds:       Vec<ItemKind>,
    /// Gem: EXP 量 / Powerup: 未使用
    pub value:       Vec<u32>,
    /// 生成時刻（ジェムの上下揺れアニメーション用）
    pub spawn_time:  Vec<f32>,
    /// 残り寿命（秒）。ジェムは無限
    pub ttl:         Vec<f32>,
    pub alive:       Vec<bool>,
    pub count:       usize,
    /// kill 時にインデックスを積み、spawn 時に pop して再利用する
    free_list:       Vec<usize>,
}

impl Default for ItemWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemWorld {
    pub fn new() -> Self {
        Self {
            positions_x: Vec::new(),
            positions_y: Vec::new(),
            kinds:       Vec::new(),
            value:       Vec::new(),
            spawn_time:  Vec::new(),
            ttl:         Vec::new(),
            alive:       Vec::new(),
            count:       0,
            free_list:   Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn spawn_gem(&mut self, x: f32, y: f32, value: u32, now: f32) -> usize {
        self.spawn(x, y, ItemKind::Gem, value, now, f32::INFINITY)
    }

    pub fn spawn_powerup(&mut self, x: f32, y: f32, kind: PowerupKind, now: f32, lifetime: f32) -> usize {
        self.spawn(x, y, ItemKind::Powerup(kind), 0, now, lifetime)
    }

    /// アイテムをスポーンする。空きスロットがあれば O(1) で再利用する。
    fn spawn(&mut self, x: f32, y: f32, kind: ItemKind, value: u32, now: f32, ttl: f32) -> usize {
        let i = if let Some(i) = self.free_list.pop() {
            self.positions_x[i] = x;
            self.positions_y[i] = y;
            self.kinds[i]       = kind;
            self.value[i]       = value;
            self.spawn_time[i]  = now;
            self.ttl[i]         = ttl;
            self.alive[i]       = true;
            i
        } else {
            self.positions_x.push(x);
            self.positions_y.push(y);
            self.kinds.push(kind);
            self.value.push(value);
            self.spawn_time.push(now);
            self.ttl.push(ttl);
            self.alive.push(true);
            self.positions_x.len() - 1
        };
        self.count += 1;
        i
    }

    /// アイテムを消去し、スロットをフリーリストに返却する。
    pub fn kill(&mut self, i: usize) {
        if self.alive[i] {
            self.alive[i] = false;
            self.count = self.count.saturating_sub(1);
            self.free_list.push(i);
        }
    }

    /// 全スロットをプールへ返す（容量は保持）
    pub fn reset(&mut self) {
        self.free_list.clear();
        for i in (0..self.len()).rev() {
            self.alive[i] = false;
            self.free_list.push(i);
        }
        self.count = 0;
    }

    pub fn gem_count(&self) -> usize {
        (0..self.len())
            .filter(|&i| self.alive[i] && self.kinds[i] == ItemKind::Gem)
            .count()
    }
}
