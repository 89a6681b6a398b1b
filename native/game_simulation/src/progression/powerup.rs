//! Path: native/game_simulation/src/progression/powerup.rs
//! Summary: 取得済みパワーアップの効果時間管理

use game_core::item::PowerupKind;

/// 種類ごとの効果終了時刻。再取得は延長（長い方を採用）
#[derive(Clone, Debug, PartialEq)]
pub struct ActivePowerups {
    until:  [f32; 4],
    active: [bool; 4],
}

impl Default for ActivePowerups {
    fn default() -> Self {
        Self { until: [f32::NEG_INFINITY; 4], active: [false; 4] }
    }
}

impl ActivePowerups {
    pub fn activate(&mut self, kind: PowerupKind, now: f32) {
        let i = kind as usize;
        self.until[i] = self.until[i].max(now + kind.duration());
        self.active[i] = true;
    }

    pub fn is_active(&self, kind: PowerupKind, now: f32) -> bool {
        now < self.until[kind as usize]
    }

    pub fn remaining(&self, kind: PowerupKind, now: f32) -> f32 {
        (self.until[kind as usize] - now).max(0.0)
    }

    fn multiplier(&self, kind: PowerupKind, now: f32) -> f32 {
        if self.is_active(kind, now) {
            kind.multiplier()
        } else {
            1.0
        }
    }

    pub fn damage_multiplier(&self, now: f32) -> f32 {
        self.multiplier(PowerupKind::DamageBoost, now)
    }

    pub fn speed_multiplier(&self, now: f32) -> f32 {
        self.multiplier(PowerupKind::SpeedBoost, now)
    }

    pub fn magnet_multiplier(&self, now: f32) -> f32 {
        self.multiplier(PowerupKind::MagnetPulse, now)
    }

    pub fn invincible(&self, now: f32) -> bool {
        self.is_active(PowerupKind::Invincibility, now)
    }

    /// 今回切れた種類を返す（各効果につき 1 回だけ）
    pub fn take_expired(&mut self, now: f32) -> Vec<PowerupKind> {
        let mut expired = Vec::new();
        for kind in PowerupKind::ALL {
            let i = kind as usize;
            if self.active[i] && !self.is_active(kind, now) {
                self.active[i] = false;
                expired.push(kind);
            }
        }
        expired
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
