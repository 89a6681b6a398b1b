//! Path: native/game_core/src/physics/rng.rs
//! Summary: シード指定可能な LCG 乱数ジェネレータ（スポーン・ドロップ・クリティカル判定用）

use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Debug)]
pub struct SimpleRng(u64);

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// 壁時計からシードする（本番ラン用。テストは `new` で固定シードを使う）
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9E37_79B9_7F4A_7C15);
        Self(nanos ^ 0x2545_F491_4F6C_DD1D)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self.0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        // 上位 32bit のみ使う（LCG の下位ビットは周期が短い）
        (self.0 >> 32) as u32
    }

    /// [0, 1) の一様乱数
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// [min, max) の一様乱数
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// [min, max] の整数（min > max のときは min）
    pub fn range_u32(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        min + self.next_u32() % (max - min + 1)
    }

    /// 確率 `p` で true
    pub fn chance(&mut self, p: f32) -> bool {
        p > 0.0 && self.next_f32() < p
    }
}
