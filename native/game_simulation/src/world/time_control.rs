//! Path: native/game_simulation/src/world/time_control.rs
//! Summary: ヒットストップ（完全停止）とスローモーションの時間スケール制御

/// スケールが目標へ寄る速さ（1 秒あたり）
const EASE_RATE: f32 = 10.0;

/// シミュレーション時間の伸縮。
/// 停止・スローの残り時間は実時間で減るため、停止中も描画ループは回り続けられる。
#[derive(Clone, Debug, PartialEq)]
pub struct TimeController {
    scale:            f32,
    freeze_remaining: f32,
    slow_remaining:   f32,
    slow_scale:       f32,
}

impl Default for TimeController {
    fn default() -> Self {
        Self { scale: 1.0, freeze_remaining: 0.0, slow_remaining: 0.0, slow_scale: 1.0 }
    }
}

impl TimeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// `duration` 秒シミュレーションを止める（重なったら長い方）
    pub fn freeze(&mut self, duration: f32) {
        self.freeze_remaining = self.freeze_remaining.max(duration);
    }

    pub fn slow_motion(&mut self, duration: f32, scale: f32) {
        self.slow_remaining = self.slow_remaining.max(duration);
        self.slow_scale = scale.clamp(0.05, 1.0);
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze_remaining > 0.0
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// 実時間 `raw_dt` を消費し、シミュレーションに渡す dt を返す
    pub fn advance(&mut self, raw_dt: f32) -> f32 {
        if self.freeze_remaining > 0.0 {
            self.freeze_remaining = (self.freeze_remaining - raw_dt).max(0.0);
            return 0.0;
        }
        let target = if self.slow_remaining > 0.0 {
            self.slow_remaining = (self.slow_remaining - raw_dt).max(0.0);
            self.slow_scale
        } else {
            1.0
        };
        self.scale += (target - self.scale) * (raw_dt * EASE_RATE).min(1.0);
        raw_dt * self.scale
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freeze_halts_then_resumes() {
        let mut t = TimeController::new();
        t.freeze(0.2);
        assert_eq!(t.advance(0.1), 0.0);
        assert_eq!(t.advance(0.1), 0.0);
        assert!(!t.is_frozen());
        assert!((t.advance(0.1) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn slow_motion_eases_back_to_normal() {
        let mut t = TimeController::new();
        t.slow_motion(0.5, 0.3);
        let first = t.advance(0.05);
        assert!(first < 0.05);
        for _ in 0..40 {
            t.advance(0.05);
        }
        assert!((t.scale() - 1.0).abs() < 0.01);
    }
}
