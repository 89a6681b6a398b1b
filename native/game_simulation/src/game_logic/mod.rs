//! Path: native/game_simulation/src/game_logic/mod.rs
//! Summary: 物理ステップ・各システム・最近接探索・イベント drain

mod events;
mod physics_step;
pub(crate) mod systems;
mod targeting;

pub use systems::leveling::UpgradeChoice;
pub use targeting::{find_nearest_enemy, find_nearest_enemy_spatial};

pub(crate) use events::drain_frame_events;
pub(crate) use physics_step::physics_step;
