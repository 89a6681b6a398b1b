//! Path: native/game_simulation/src/progression/mod.rs
//! Summary: ラン内進行（コンボ・パワーアップ・集計）

mod combo;
mod powerup;
mod stats;

pub use combo::{Combo, ComboBonus, ComboKill};
pub use powerup::ActivePowerups;
pub use stats::RunStats;
