//! Path: native/game_core/src/damage.rs
//! Summary: 与ダメージ計算パイプラインと距離減衰の純関数
//!
//! 与ダメージ: base × パワーアップ倍率 × コンボ倍率 → クリティカル → シールド吸収 → 体力。
//! 派生効果（ライフスティール等）は実際に着弾した量から計算する。

/// 1 ヒットの内訳
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitBreakdown {
    /// 倍率・クリティカル適用後の総ダメージ
    pub total:         f32,
    /// シールドが吸収した量
    pub absorbed:      f32,
    /// 体力から引く量
    pub health_damage: f32,
    pub crit:          bool,
}

/// 与ダメージを計算する。`shield` は対象の残りシールド
pub fn resolve_hit(
    base: f32,
    powerup_mult: f32,
    combo_mult: f32,
    crit: Option<f32>,
    shield: f32,
) -> HitBreakdown {
    let mut total = (base * powerup_mult * combo_mult).max(0.0);
    if let Some(mult) = crit {
        total *= mult;
    }
    let absorbed = total.min(shield.max(0.0));
    HitBreakdown {
        total,
        absorbed,
        health_damage: (total - absorbed).max(0.0),
        crit: crit.is_some(),
    }
}

/// 中心からの距離で線形に減衰する倍率。`strength` = 1 なら縁で 0
pub fn linear_falloff(dist: f32, radius: f32, strength: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    (1.0 - (dist / radius).clamp(0.0, 1.0) * strength).max(0.0)
}
