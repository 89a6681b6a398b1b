//! Path: native/game_core/src/constants.rs
//! Summary: アリーナサイズ・プレイヤー初期値・戦闘定数などの定数定義
//!
//! 単位はワールド座標（1.0 = プレイヤー 1 体分）と秒。

// Arena
/// プレイヤーが移動できる正方形アリーナの半径（中心 0,0）
pub const ARENA_HALF_EXTENT: f32 = 45.0;
/// プレイヤー弾がこの距離（原点から）を超えたら消滅
pub const PLAYFIELD_RADIUS: f32 = 55.0;
/// ボス以外の敵はプレイヤーからこの距離を超えたらデスポーン（報酬なし）
pub const DESPAWN_RADIUS: f32 = 60.0;

// Frame
/// 1 フレームで進める最大 delta（タブ復帰時などの大ジャンプ防止）
pub const MAX_FRAME_DELTA: f32 = 0.1;
pub const FRAME_BUDGET_MS: f64 = 1000.0 / 60.0;

// Player defaults（default キャラクターの初期値）
pub const PLAYER_BASE_HEALTH:           f32 = 100.0;
pub const PLAYER_BASE_SPEED:            f32 = 8.0;
pub const PLAYER_BASE_DAMAGE:           f32 = 30.0;
pub const PLAYER_BASE_ATTACK_SPEED:     f32 = 1.0;
pub const PLAYER_BASE_ATTACK_RANGE:     f32 = 15.0;
pub const PLAYER_BASE_PROJECTILE_SPEED: f32 = 20.0;
pub const PLAYER_BASE_PROJECTILE_COUNT: u32 = 1;
pub const PLAYER_BASE_EXP_TO_LEVEL:     u32 = 10;

// Dash
pub const DASH_MAX_CHARGES:       u32 = 2;
pub const DASH_RECHARGE_TIME:     f32 = 3.0;
pub const DASH_DISTANCE:          f32 = 5.0;
pub const DASH_INVULNERABLE_TIME: f32 = 0.25;

// Leveling
/// レベルアップごとに必要経験値へ掛ける倍率（floor して整数化）
pub const EXP_GROWTH_FACTOR: f32 = 1.5;
/// レベルアップ時に提示する選択肢の最大数
pub const LEVEL_UP_CHOICES: usize = 4;

// Player projectiles
pub const PLAYER_PROJECTILE_LIFETIME: f32 = 2.0;
/// マルチショット時の横方向オフセット間隔
pub const MULTISHOT_SPACING:          f32 = 0.5;
pub const PROJECTILE_HIT_RADIUS:      f32 = 1.0;
pub const BOSS_PROJECTILE_HIT_RADIUS: f32 = 2.0;

// Enemy projectiles
pub const ENEMY_PROJECTILE_SPEED:      f32 = 12.0;
pub const ENEMY_PROJECTILE_LIFETIME:   f32 = 3.0;
pub const ENEMY_PROJECTILE_HIT_RADIUS: f32 = 1.0;

// Contact damage
pub const CONTACT_RADIUS:          f32 = 1.5;
pub const BOSS_CONTACT_RADIUS:     f32 = 3.0;
pub const CONTACT_DAMAGE_COOLDOWN: f32 = 0.5;

// Combat
pub const CRIT_MULTIPLIER: f32 = 2.0;
/// 反射された弾のダメージ倍率
pub const REFLECT_DAMAGE_FACTOR: f32 = 0.5;
/// 復活時に回復する最大 HP の割合
pub const REVIVE_HEALTH_FRACTION: f32 = 0.5;
pub const REVIVE_INVULNERABLE_TIME: f32 = 2.0;

// Loot
pub const GEM_PICKUP_RADIUS:     f32 = 1.0;
pub const GEM_SCATTER:           f32 = 1.5;
pub const BASE_MAGNET_RANGE:     f32 = 5.0;
pub const MAGNET_PULL_BASE:      f32 = 5.0;
pub const MAGNET_PULL_SCALE:     f32 = 10.0;
pub const POWERUP_PICKUP_RADIUS: f32 = 1.5;
pub const POWERUP_LIFETIME:      f32 = 15.0;

// Hit-stop（撃破時の時間停止）
pub const BOSS_DEATH_FREEZE:  f32 = 0.2;
pub const ELITE_DEATH_FREEZE: f32 = 0.05;

// Combo
/// 最後のキルからこの秒数を「超えて」キルがなければコンボ終了
pub const COMBO_TIMEOUT: f32 = 2.0;

// Split
pub const SPLIT_RING_RADIUS: f32 = 1.5;

// Spatial hash cell size
pub const CELL_SIZE: f32 = 4.0;

/// 同時生存できる敵の上限
pub const MAX_ENEMIES: usize = 300;

// Hazard director
pub const HAZARD_START_TIME:   f32 = 60.0;
pub const HAZARD_BASE_INTERVAL: f32 = 15.0;
pub const HAZARD_MIN_OFFSET:   f32 = 10.0;
pub const HAZARD_MAX_OFFSET:   f32 = 30.0;
