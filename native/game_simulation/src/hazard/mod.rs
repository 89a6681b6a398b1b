//! Path: native/game_simulation/src/hazard/mod.rs
//! Summary: ハザード群の更新・当たり判定・出現ディレクターと直接配置 API

mod shape;

pub use shape::{Hazard, HazardKind, HazardOwner, HazardPhase, HazardShape, HazardTarget};

use game_core::constants::{
    HAZARD_BASE_INTERVAL, HAZARD_MAX_OFFSET, HAZARD_MIN_OFFSET, HAZARD_START_TIME,
};
use game_core::physics::rng::SimpleRng;
use game_core::util::spawn_position_around_player;

use crate::world::EnemyWorld;

/// ハザード 1 回分の命中
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HazardHit {
    pub kind:   HazardKind,
    pub target: HazardTarget,
    pub damage: f32,
}

#[derive(Clone, Debug, Default)]
pub struct HazardField {
    pub hazards:      Vec<Hazard>,
    /// 次の環境ハザードまでの残り時間
    spawn_cooldown:   f32,
}

impl HazardField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }

    pub fn spawn(&mut self, hazard: Hazard) {
        self.hazards.push(hazard);
    }

    /// 敵の特殊攻撃・進化武器が置く炎の跡
    pub fn spawn_fire_trail(&mut self, x: f32, y: f32, radius: f32, damage: f32, owner: HazardOwner) {
        self.spawn(Hazard::fire_trail(x, y, radius, damage, owner));
    }

    /// ボス（インフェルノ）が置く溶岩溜まり
    pub fn spawn_lava_pool(&mut self, x: f32, y: f32, owner: HazardOwner) {
        self.spawn(Hazard::lava_pool(x, y, owner));
    }

    /// 経過時間に応じた環境ハザードの出現。出したら (種類, x, y) を返す
    pub fn update_director(
        &mut self,
        elapsed: f32,
        dt: f32,
        player_x: f32,
        player_y: f32,
        rng: &mut SimpleRng,
    ) -> Option<(HazardKind, f32, f32)> {
        if elapsed < HAZARD_START_TIME {
            return None;
        }
        self.spawn_cooldown -= dt;
        if self.spawn_cooldown > 0.0 {
            return None;
        }
        let minutes = elapsed / 60.0;
        self.spawn_cooldown = HAZARD_BASE_INTERVAL - minutes.min(5.0);

        let (x, y) = spawn_position_around_player(
            rng,
            player_x,
            player_y,
            HAZARD_MIN_OFFSET,
            HAZARD_MAX_OFFSET,
        );
        let kinds = HazardKind::ENVIRONMENT;
        let kind = kinds[rng.range_u32(0, kinds.len() as u32 - 1) as usize];
        let hazard = match kind {
            HazardKind::LaserGrid    => Hazard::laser_grid(x, y),
            HazardKind::DangerZone   => Hazard::danger_zone(x, y),
            HazardKind::PulsingOrb   => Hazard::pulsing_orb(x, y),
            HazardKind::LavaPool     => Hazard::lava_pool(x, y, HazardOwner::Environment),
            HazardKind::SweepingBeam => {
                Hazard::sweeping_beam(x, y, rng.next_f32() * std::f32::consts::TAU)
            }
            HazardKind::FireTrail    => return None,
        };
        log::debug!("hazard spawned: {:?} at ({:.1}, {:.1})", kind, x, y);
        self.spawn(hazard);
        Some((kind, x, y))
    }

    /// 全ハザードを進め、命中を `on_hit` に渡し、消滅したものを取り除く
    pub fn update(
        &mut self,
        dt: f32,
        player_x: f32,
        player_y: f32,
        enemies: &EnemyWorld,
        on_hit: &mut dyn FnMut(HazardHit),
    ) {
        for h in &mut self.hazards {
            h.advance(dt);
            if h.phase() != HazardPhase::Active {
                continue;
            }
            if h.owner.hurts_player() {
                if let Some(damage) = h.try_hit(HazardTarget::Player, player_x, player_y) {
                    on_hit(HazardHit { kind: h.kind, target: HazardTarget::Player, damage });
                }
            }
            if h.owner.hurts_enemies() {
                for i in enemies.alive_indices() {
                    let target = HazardTarget::Enemy(enemies.ids[i]);
                    if let Some(damage) = h.try_hit(target, enemies.positions_x[i], enemies.positions_y[i]) {
                        on_hit(HazardHit { kind: h.kind, target, damage });
                    }
                }
            }
        }
        self.hazards.retain(|h| h.phase() != HazardPhase::Expired);
    }

    /// 死んだ敵の命中記録を全ハザードから消す
    pub fn forget_enemy(&mut self, id: u32) {
        for h in &mut self.hazards {
            h.forget_enemy(id);
        }
    }

    pub fn reset(&mut self) {
        self.hazards.clear();
        self.spawn_cooldown = 0.0;
    }
}
