//! Path: native/game_simulation/src/hazard/shape.rs
//! Summary: 個々のハザード（警告 → 有効 → 消滅の状態機械・形状ごとの当たり判定）

use game_core::damage::linear_falloff;
use game_core::util::{dist, distance_along_ray};
use rustc_hash::FxHashMap;

/// 描画・イベント用の種類
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HazardKind {
    LaserGrid,
    DangerZone,
    PulsingOrb,
    LavaPool,
    SweepingBeam,
    FireTrail,
}

impl HazardKind {
    /// ディレクターが抽選する環境ハザード
    pub const ENVIRONMENT: [HazardKind; 5] = [
        Self::LaserGrid,
        Self::DangerZone,
        Self::PulsingOrb,
        Self::LavaPool,
        Self::SweepingBeam,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HazardPhase {
    Warning,
    Active,
    Expired,
}

/// 誰が置いたか。自陣営には当たらない
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HazardOwner {
    Environment,
    Enemy,
    Player,
}

impl HazardOwner {
    pub fn hurts_player(self) -> bool {
        self != Self::Player
    }

    pub fn hurts_enemies(self) -> bool {
        self != Self::Enemy
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HazardTarget {
    Player,
    Enemy(u32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HazardShape {
    Square { half_size: f32 },
    /// `falloff` > 0 なら中心から縁へ向けて減衰
    Circle { radius: f32, falloff: f32 },
    Pulsing { radius: f32 },
    /// 寿命の `grow_until` 割合まで `growth`/s で広がる
    Growing { radius: f32, max_radius: f32, growth: f32, grow_until: f32 },
    /// 中心から伸びる片側ビーム
    Beam { length: f32, angle: f32, angular_speed: f32, player_width: f32, enemy_width: f32 },
}

#[derive(Clone, Debug)]
pub struct Hazard {
    pub kind:          HazardKind,
    pub owner:         HazardOwner,
    pub x:             f32,
    pub y:             f32,
    pub shape:         HazardShape,
    /// 生成からの経過（ハザード自身の時計）
    pub age:           f32,
    pub warning:       f32,
    /// 警告を含む総寿命
    pub lifetime:      f32,
    pub damage:        f32,
    /// 同じ対象への再ヒット間隔。INFINITY なら一度きり
    pub tick_interval: f32,
    last_hit:          FxHashMap<HazardTarget, f32>,
}

impl Hazard {
    #[allow(clippy::too_many_arguments)]
    fn new(
        kind: HazardKind,
        owner: HazardOwner,
        x: f32,
        y: f32,
        shape: HazardShape,
        warning: f32,
        lifetime: f32,
        damage: f32,
        tick_interval: f32,
    ) -> Self {
        Self {
            kind,
            owner,
            x,
            y,
            shape,
            age: 0.0,
            warning,
            lifetime,
            damage,
            tick_interval,
            last_hit: FxHashMap::default(),
        }
    }

    pub fn laser_grid(x: f32, y: f32) -> Self {
        Self::new(
            HazardKind::LaserGrid,
            HazardOwner::Environment,
            x,
            y,
            HazardShape::Square { half_size: 8.0 },
            2.0,
            6.0,
            15.0,
            0.5,
        )
    }

    pub fn danger_zone(x: f32, y: f32) -> Self {
        Self::new(
            HazardKind::DangerZone,
            HazardOwner::Environment,
            x,
            y,
            HazardShape::Circle { radius: 5.0, falloff: 0.5 },
            1.5,
            5.0,
            25.0,
            f32::INFINITY,
        )
    }

    pub fn pulsing_orb(x: f32, y: f32) -> Self {
        Self::new(
            HazardKind::PulsingOrb,
            HazardOwner::Environment,
            x,
            y,
            HazardShape::Pulsing { radius: 3.0 },
            1.0,
            8.0,
            10.0,
            0.3,
        )
    }

    pub fn lava_pool(x: f32, y: f32, owner: HazardOwner) -> Self {
        Self::new(
            HazardKind::LavaPool,
            owner,
            x,
            y,
            HazardShape::Growing { radius: 2.0, max_radius: 6.0, growth: 0.5, grow_until: 0.7 },
            1.0,
            12.0,
            8.0,
            0.4,
        )
    }

    pub fn sweeping_beam(x: f32, y: f32, angle: f32) -> Self {
        Self::new(
            HazardKind::SweepingBeam,
            HazardOwner::Environment,
            x,
            y,
            HazardShape::Beam {
                length: 12.0,
                angle,
                angular_speed: 1.5,
                player_width: 1.0,
                enemy_width: 1.5,
            },
            1.5,
            10.0,
            20.0,
            0.3,
        )
    }

    pub fn fire_trail(x: f32, y: f32, radius: f32, damage: f32, owner: HazardOwner) -> Self {
        Self::new(
            HazardKind::FireTrail,
            owner,
            x,
            y,
            HazardShape::Circle { radius, falloff: 0.0 },
            0.0,
            3.0,
            damage,
            0.5,
        )
    }

    pub fn phase(&self) -> HazardPhase {
        if self.age < self.warning {
            HazardPhase::Warning
        } else if self.age < self.lifetime {
            HazardPhase::Active
        } else {
            HazardPhase::Expired
        }
    }

    /// 時計を進め、有効中のサブライフサイクル（拡大・回転）を回す
    pub fn advance(&mut self, dt: f32) {
        self.age += dt;
        if self.phase() != HazardPhase::Active {
            return;
        }
        // 警告から切り替わったフレームは有効になってからの分だけ進める
        let active_dt = (self.age - self.warning).clamp(0.0, dt);
        match &mut self.shape {
            HazardShape::Growing { radius, max_radius, growth, grow_until } => {
                if self.age < self.lifetime * *grow_until {
                    *radius = (*radius + *growth * active_dt).min(*max_radius);
                }
            }
            HazardShape::Beam { angle, angular_speed, .. } => {
                *angle += *angular_speed * active_dt;
            }
            _ => {}
        }
    }

    /// 点 (px, py) が範囲内ならダメージ倍率を返す
    fn coverage(&self, px: f32, py: f32, target: HazardTarget) -> Option<f32> {
        match self.shape {
            HazardShape::Square { half_size } => {
                ((px - self.x).abs() <= half_size && (py - self.y).abs() <= half_size).then_some(1.0)
            }
            HazardShape::Circle { radius, falloff } => {
                let d = dist(px, py, self.x, self.y);
                (d <= radius).then(|| if falloff > 0.0 { linear_falloff(d, radius, falloff) } else { 1.0 })
            }
            HazardShape::Pulsing { radius } => {
                let r = radius * (1.0 + 0.25 * (self.age * 4.0).sin());
                (dist(px, py, self.x, self.y) <= r).then_some(1.0)
            }
            HazardShape::Growing { radius, .. } => {
                (dist(px, py, self.x, self.y) <= radius).then_some(1.0)
            }
            HazardShape::Beam { length, angle, player_width, enemy_width, .. } => {
                let width = match target {
                    HazardTarget::Player => player_width,
                    HazardTarget::Enemy(_) => enemy_width,
                };
                let d = distance_along_ray(self.x, self.y, angle.cos(), angle.sin(), length, px, py)?;
                (d <= width).then_some(1.0)
            }
        }
    }

    /// 有効中かつ範囲内で、対象ごとの間隔が空いていればダメージを返して記録する
    pub fn try_hit(&mut self, target: HazardTarget, px: f32, py: f32) -> Option<f32> {
        if self.phase() != HazardPhase::Active {
            return None;
        }
        let scale = self.coverage(px, py, target)?;
        if let Some(&last) = self.last_hit.get(&target) {
            if self.age - last < self.tick_interval {
                return None;
            }
        }
        self.last_hit.insert(target, self.age);
        Some(self.damage * scale)
    }

    /// 消えた敵の記録を落とす
    pub fn forget_enemy(&mut self, id: u32) {
        self.last_hit.remove(&HazardTarget::Enemy(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_then_throttled_ticks() {
        let mut h = Hazard::laser_grid(0.0, 0.0);
        let mut hits = 0;
        for step in 1..=16 {
            h.advance(0.25);
            if let Some(d) = h.try_hit(HazardTarget::Player, 1.0, 1.0) {
                assert!(step >= 8, "hit during warning at step {step}");
                assert!((d - 15.0).abs() < 0.001);
                hits += 1;
            }
        }
        // 2.0, 2.5, 3.0, 3.5, 4.0
        assert_eq!(hits, 5);
    }

    #[test]
    fn danger_zone_bursts_once_with_falloff() {
        let mut h = Hazard::danger_zone(0.0, 0.0);
        h.advance(1.5);
        let edge = h.try_hit(HazardTarget::Enemy(7), 5.0, 0.0).unwrap();
        assert!((edge - 12.5).abs() < 0.001);
        let centre = h.try_hit(HazardTarget::Player, 0.0, 0.0).unwrap();
        assert!((centre - 25.0).abs() < 0.001);
        h.advance(1.0);
        assert!(h.try_hit(HazardTarget::Player, 0.0, 0.0).is_none());
    }

    #[test]
    fn lava_grows_only_early_and_caps() {
        let mut h = Hazard::lava_pool(0.0, 0.0, HazardOwner::Enemy);
        for _ in 0..130 {
            h.advance(0.1);
        }
        match h.shape {
            HazardShape::Growing { radius, .. } => {
                // 有効化 1 秒後から 8.4 秒まで 0.5/s → 2 + 3.7 付近
                assert!(radius > 5.0 && radius <= 6.0, "{radius}");
            }
            _ => unreachable!(),
        }
        assert_eq!(h.phase(), HazardPhase::Expired);
        assert!(!HazardOwner::Enemy.hurts_enemies());
        assert!(HazardOwner::Enemy.hurts_player());
    }

    #[test]
    fn beam_is_one_sided_and_rotates() {
        let mut h = Hazard::sweeping_beam(0.0, 0.0, 0.0);
        h.advance(1.5);
        assert!(h.try_hit(HazardTarget::Player, 6.0, 0.5).is_some());
        assert!(h.try_hit(HazardTarget::Enemy(1), -6.0, 0.0).is_none());
        let before = match h.shape {
            HazardShape::Beam { angle, .. } => angle,
            _ => unreachable!(),
        };
        h.advance(1.0);
        let after = match h.shape {
            HazardShape::Beam { angle, .. } => angle,
            _ => unreachable!(),
        };
        assert!((after - before - 1.5).abs() < 0.001);
    }
}
