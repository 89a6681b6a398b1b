//! Path: native/game_simulation/src/world/player.rs
//! Summary: プレイヤー状態（座標・ステータス・ダッシュ・無敵/凍結タイマー）

use game_core::constants::{
    DASH_MAX_CHARGES, PLAYER_BASE_ATTACK_RANGE, PLAYER_BASE_EXP_TO_LEVEL,
    PLAYER_BASE_PROJECTILE_COUNT, PLAYER_BASE_PROJECTILE_SPEED,
};
use game_core::meta_tables::{CharacterDef, MetaBonuses};

/// レベルアップで伸びるステータス
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerStats {
    pub health:           f32,
    pub max_health:       f32,
    pub speed:            f32,
    pub damage:           f32,
    /// 1 秒あたりの自動攻撃回数
    pub attack_speed:     f32,
    pub attack_range:     f32,
    pub projectile_speed: f32,
    pub projectile_count: u32,
    pub level:            u32,
    pub exp:              u32,
    pub exp_to_level:     u32,
    pub kill_count:       u32,
}

impl PlayerStats {
    /// キャラクター基礎値にメタ強化を一度だけ掛ける
    pub fn new(character: &CharacterDef, bonuses: &MetaBonuses) -> Self {
        let max_health = character.health * bonuses.health_mult;
        Self {
            health:           max_health,
            max_health,
            speed:            character.speed * bonuses.speed_mult,
            damage:           character.damage * bonuses.damage_mult,
            attack_speed:     character.attack_speed,
            attack_range:     PLAYER_BASE_ATTACK_RANGE,
            projectile_speed: PLAYER_BASE_PROJECTILE_SPEED,
            projectile_count: PLAYER_BASE_PROJECTILE_COUNT,
            level:            1,
            exp:              0,
            exp_to_level:     PLAYER_BASE_EXP_TO_LEVEL,
            kill_count:       0,
        }
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            (self.health / self.max_health).clamp(0.0, 1.0)
        }
    }
}

/// プレイヤー状態
#[derive(Clone, Debug)]
pub struct PlayerState {
    pub x:                  f32,
    pub y:                  f32,
    /// 最後に動いた向き（単位ベクトル）。火炎放射の向きに使う
    pub facing_x:           f32,
    pub facing_y:           f32,
    pub stats:              PlayerStats,
    /// 自動攻撃の蓄積時間
    pub attack_timer:       f32,
    /// ダッシュ・復活による無敵の解除時刻
    pub invulnerable_until: f32,
    /// フロストによる移動不能の解除時刻
    pub frozen_until:       f32,
    pub dash_charges:       u32,
    pub dash_recharge:      f32,
    /// このフレームに受けた引き寄せ（ヴォイド）の合計
    pub pull_x:             f32,
    pub pull_y:             f32,
}

impl PlayerState {
    pub fn new(character: &CharacterDef, bonuses: &MetaBonuses) -> Self {
        Self {
            x:                  0.0,
            y:                  0.0,
            facing_x:           1.0,
            facing_y:           0.0,
            stats:              PlayerStats::new(character, bonuses),
            attack_timer:       0.0,
            invulnerable_until: f32::NEG_INFINITY,
            frozen_until:       f32::NEG_INFINITY,
            dash_charges:       DASH_MAX_CHARGES,
            dash_recharge:      0.0,
            pull_x:             0.0,
            pull_y:             0.0,
        }
    }

    pub fn is_frozen(&self, now: f32) -> bool {
        now < self.frozen_until
    }
}
