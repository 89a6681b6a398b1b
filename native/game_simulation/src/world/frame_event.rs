//! Path: native/game_simulation/src/world/frame_event.rs
//! Summary: フレーム内で発生したゲームイベント（HUD・音・演出側が毎フレーム drain する）

use game_core::entity_params::Rarity;
use game_core::item::PowerupKind;
use game_core::passive::PassiveKind;
use game_core::weapon::WeaponKind;

use crate::hazard::HazardKind;
use crate::meta::RunReport;
use crate::progression::RunStats;

/// プレイヤーが受けたダメージの出どころ
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DamageSource {
    Contact { kind_id: u8 },
    EnemyProjectile,
    Explosion,
    Hazard(HazardKind),
}

/// 効果音のきっかけ（再生は呼び出し側）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    Shoot,
    EnemyShoot,
    Hit,
    Crit,
    Explosion,
    Hurt,
    Pickup,
    Powerup,
    LevelUp,
    Teleport,
    Freeze,
    Warning,
    BossWarning,
    BossDefeated,
    Death,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    EnemySpawned        { id: u32, kind_id: u8, x: f32, y: f32 },
    DamageDealt         { enemy_id: u32, amount: f32, x: f32, y: f32, crit: bool },
    EnemyKilled         { id: u32, kind_id: u8, rarity: Rarity, x: f32, y: f32 },
    EnemyEnraged        { id: u32 },
    BossSpecial         { id: u32, kind_id: u8 },
    BossDefeated        { kind_id: u8 },
    ProjectileReflected { x: f32, y: f32 },
    PlayerDamaged       { amount: f32, source: DamageSource },
    PlayerHealed        { amount: f32 },
    PlayerFrozen        { duration: f32 },
    PlayerDashed        { x: f32, y: f32 },
    PlayerRevived,
    ComboMilestone      { count: u32, tier: String },
    ComboEnded          { count: u32 },
    LevelUp             { new_level: u32 },
    WeaponUpgraded      { weapon: WeaponKind, level: u32 },
    WeaponEvolved       { weapon: WeaponKind },
    PassiveUpgraded     { passive: PassiveKind, level: u32 },
    GemCollected        { value: u32 },
    PowerupCollected    { kind: PowerupKind },
    PowerupExpired      { kind: PowerupKind },
    HazardSpawned       { kind: HazardKind, x: f32, y: f32 },
    WaveWarning         { message: String },
    AchievementUnlocked { id: String, name: String },
    CharacterUnlocked   { id: String, name: String },
    Audio(AudioCue),
    GameOver            { stats: RunStats, report: RunReport },
}
