//! Path: native/game_simulation/src/game_logic/systems/mod.rs
//! Summary: 1 ティック内で順に呼ばれる各システム

pub(crate) mod behavior;
pub(crate) mod combat;
pub(crate) mod hazards;
pub(crate) mod items;
pub(crate) mod leveling;
pub(crate) mod player;
pub(crate) mod projectiles;
pub(crate) mod spawn;
pub(crate) mod weapons;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use game_core::config::GameTables;
    use game_core::meta_tables::MetaBonuses;
    use game_core::physics::rng::SimpleRng;

    use crate::world::RunState;

    /// 既定テーブル・既定キャラクター・固定シードのラン
    pub fn run_with_seed(seed: u64) -> RunState {
        run_with_tables(GameTables::default(), seed)
    }

    /// 確率や能力を差し替えたテーブルでのラン
    pub fn run_with_tables(tables: GameTables, seed: u64) -> RunState {
        let tables = Arc::new(tables);
        let character = tables.characters[0].clone();
        RunState::new(tables, &character, MetaBonuses::default(), SimpleRng::new(seed))
    }
}
