//! Path: native/game_simulation/src/world/mod.rs
//! Summary: ワールド型（PlayerState, EnemyWorld, ProjectileWorld, TimeController, RunState）

mod enemy;
mod frame_event;
mod player;
mod projectile;
mod run_state;
mod time_control;

pub use enemy::{ChargeState, EnemyState, EnemyWorld};
pub use frame_event::{AudioCue, DamageSource, FrameEvent};
pub use player::{PlayerState, PlayerStats};
pub use projectile::{
    ProjectileWorld, PROJECTILE_KIND_ENEMY, PROJECTILE_KIND_PLAYER, PROJECTILE_KIND_REFLECTED,
};
pub use run_state::{PendingSpawn, RunState, SpawnDirector};
pub use time_control::TimeController;
