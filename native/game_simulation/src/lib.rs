//! Path: native/game_simulation/src/lib.rs
//! Summary: モジュール宣言と公開 API（ホストは `Game` 経由で操作する）

mod game;
mod game_logic;
pub mod hazard;
mod input;
pub mod meta;
pub mod progression;
pub mod weapons;
pub mod world;

pub use game::{Game, GameError, GamePhase, HudSnapshot};
pub use game_logic::{find_nearest_enemy, find_nearest_enemy_spatial, UpgradeChoice};
pub use input::InputState;
pub use meta::{FileStore, KvStore, MemoryStore, MetaProgression, RunReport};
pub use world::{AudioCue, DamageSource, FrameEvent, RunState};

pub use game_core::config::{ConfigError, GameTables};
pub use game_core::physics::rng::SimpleRng;
