//! Path: native/game_simulation/src/meta/mod.rs
//! Summary: ラン間の永続進行（ハイスコア・実績・キャラ解放・生涯集計・ソウルとショップ）
//!
//! 永続化は `KvStore` 越しに名前付きの記録 6 つを読み書きする。
//! 読み込みは決して失敗させず、壊れた記録は既定値に置き換える。

mod high_score;
mod shop;
mod store;

pub use high_score::{HighScoreEntry, HighScores, MAX_HIGH_SCORES, NEW_HIGH_SCORE_RANK};
pub use shop::ShopError;
pub use store::{load_or_default, save, FileStore, KvStore, MemoryStore, StoreError};

use std::collections::BTreeSet;

use game_core::config::GameTables;
use game_core::meta_tables::{CharacterDef, MetaBonuses, ProgressSnapshot};
use game_core::progression::{composite_score, souls_for_run};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::progression::RunStats;

pub const KEY_HIGH_SCORES:   &str = "survivor_highscores";
pub const KEY_ACHIEVEMENTS:  &str = "survivor_achievements";
pub const KEY_UNLOCKS:       &str = "survivor_unlocks";
pub const KEY_STATISTICS:    &str = "survivor_statistics";
pub const KEY_META_UPGRADES: &str = "survivor_meta_upgrades";
pub const KEY_SOULS:         &str = "survivor_souls";

/// 全ランを通した集計
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifetimeStats {
    pub total_runs:       u32,
    pub total_kills:      u32,
    pub total_boss_kills: u32,
    pub total_gems:       u32,
    pub total_time:       f32,
    pub best_time:        f32,
    pub best_level:       u32,
    pub best_kills:       u32,
    pub best_combo:       u32,
}

/// ラン終了時の精算結果
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub souls_earned:     u32,
    pub score:            u32,
    /// ハイスコア表での 1 始まりの順位（圏外なら None）
    pub rank:             Option<usize>,
    pub new_high_score:   bool,
    pub new_achievements: Vec<String>,
    pub new_unlocks:      Vec<String>,
}

/// 新たに達成・解放したものの (id, 表示名)
pub type Unlocked = Vec<(String, String)>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetaProgression {
    pub high_scores:  HighScores,
    pub achievements: BTreeSet<String>,
    /// 条件付きキャラクターのうち解放済みの id
    pub unlocks:      BTreeSet<String>,
    pub lifetime:     LifetimeStats,
    pub upgrades:     FxHashMap<String, u32>,
    pub souls:        u32,
}

impl MetaProgression {
    pub fn load(store: &dyn KvStore) -> Self {
        Self {
            high_scores:  load_or_default(store, KEY_HIGH_SCORES),
            achievements: load_or_default(store, KEY_ACHIEVEMENTS),
            unlocks:      load_or_default(store, KEY_UNLOCKS),
            lifetime:     load_or_default(store, KEY_STATISTICS),
            upgrades:     load_or_default(store, KEY_META_UPGRADES),
            souls:        load_or_default(store, KEY_SOULS),
        }
    }

    pub fn save_all(&self, store: &mut dyn KvStore) -> Result<(), StoreError> {
        save(store, KEY_HIGH_SCORES, &self.high_scores)?;
        save(store, KEY_ACHIEVEMENTS, &self.achievements)?;
        save(store, KEY_UNLOCKS, &self.unlocks)?;
        save(store, KEY_STATISTICS, &self.lifetime)?;
        save(store, KEY_META_UPGRADES, &self.upgrades)?;
        save(store, KEY_SOULS, &self.souls)
    }

    pub fn bonuses(&self, tables: &GameTables) -> MetaBonuses {
        MetaBonuses::from_levels(&tables.meta_upgrades, &self.upgrades)
    }

    pub fn upgrade_level(&self, id: &str) -> u32 {
        self.upgrades.get(id).copied().unwrap_or(0)
    }

    pub fn is_unlocked(&self, character: &CharacterDef) -> bool {
        character.unlock.is_none() || self.unlocks.contains(&character.id)
    }

    /// ソウルでメタ強化を 1 レベル買う。支払った価格を返す
    pub fn purchase(&mut self, tables: &GameTables, id: &str) -> Result<u32, ShopError> {
        let cost = shop::purchase(&tables.meta_upgrades, &mut self.upgrades, &mut self.souls, id)?;
        log::info!("meta upgrade `{}` -> level {} for {} souls", id, self.upgrade_level(id), cost);
        Ok(cost)
    }

    /// 進行中のランと生涯集計を合わせた判定用スナップショット
    pub fn snapshot(&self, run: &RunStats, weapons_active: u32, passives_active: u32) -> ProgressSnapshot {
        let l = &self.lifetime;
        let kills = run.total_kills();
        ProgressSnapshot {
            run_time:            run.time_survived,
            run_level:           run.level,
            run_kills:           kills,
            run_boss_kills:      run.kills_boss,
            run_max_combo:       run.max_combo,
            run_gems:            run.gems_collected,
            run_lowest_health:   run.lowest_health,
            run_untouched_level: run.untouched_level,
            run_weapons_active:  weapons_active,
            run_passives_active: passives_active,
            total_kills:         l.total_kills + kills,
            total_boss_kills:    l.total_boss_kills + run.kills_boss,
            total_gems:          l.total_gems + run.gems_collected,
            best_time:           l.best_time.max(run.time_survived),
            best_level:          l.best_level.max(run.level),
            best_kills:          l.best_kills.max(kills),
        }
    }

    /// 未達成の実績を判定し、新たに達成したものを記録して返す
    pub fn check_achievements(&mut self, tables: &GameTables, snapshot: &ProgressSnapshot) -> Unlocked {
        let mut fresh = Vec::new();
        for def in &tables.achievements {
            if self.achievements.contains(&def.id) || !def.condition.is_met(snapshot) {
                continue;
            }
            self.achievements.insert(def.id.clone());
            log::info!("achievement unlocked: {}", def.id);
            fresh.push((def.id.clone(), def.name.clone()));
        }
        fresh
    }

    /// 解放条件を満たしたキャラクターを記録して返す
    pub fn check_unlocks(&mut self, tables: &GameTables, snapshot: &ProgressSnapshot) -> Unlocked {
        let mut fresh = Vec::new();
        for c in &tables.characters {
            let Some(cond) = &c.unlock else {
                continue;
            };
            if self.unlocks.contains(&c.id) || !cond.is_met(snapshot) {
                continue;
            }
            self.unlocks.insert(c.id.clone());
            log::info!("character unlocked: {}", c.id);
            fresh.push((c.id.clone(), c.name.clone()));
        }
        fresh
    }

    /// ラン結果を畳み込む: 実績・解放判定 → 生涯集計 → ソウル → ハイスコア
    pub fn finish_run(
        &mut self,
        tables: &GameTables,
        run: &RunStats,
        weapons_active: u32,
        passives_active: u32,
    ) -> (RunReport, Unlocked, Unlocked) {
        let snapshot = self.snapshot(run, weapons_active, passives_active);
        let achievements = self.check_achievements(tables, &snapshot);
        let unlocks = self.check_unlocks(tables, &snapshot);

        let kills = run.total_kills();
        let l = &mut self.lifetime;
        l.total_runs += 1;
        l.total_kills += kills;
        l.total_boss_kills += run.kills_boss;
        l.total_gems += run.gems_collected;
        l.total_time += run.time_survived;
        l.best_time = l.best_time.max(run.time_survived);
        l.best_level = l.best_level.max(run.level);
        l.best_kills = l.best_kills.max(kills);
        l.best_combo = l.best_combo.max(run.max_combo);

        let souls_earned = souls_for_run(run.time_survived, run.level, kills, run.kills_boss);
        self.souls += souls_earned;

        let score = composite_score(run.time_survived, run.level, kills);
        let rank = self.high_scores.insert(HighScoreEntry {
            score,
            time: run.time_survived,
            level: run.level,
            kills,
            character: run.character.clone(),
        });
        let new_high_score = rank.is_some_and(|r| r <= NEW_HIGH_SCORE_RANK);

        log::info!(
            "run finished: {:.1}s level {} kills {} -> score {} rank {:?}, +{} souls",
            run.time_survived,
            run.level,
            kills,
            score,
            rank,
            souls_earned
        );

        let report = RunReport {
            souls_earned,
            score,
            rank,
            new_high_score,
            new_achievements: achievements.iter().map(|(id, _)| id.clone()).collect(),
            new_unlocks: unlocks.iter().map(|(id, _)| id.clone()).collect(),
        };
        (report, achievements, unlocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(time: f32, level: u32, kills: u32, bosses: u32) -> RunStats {
        RunStats {
            time_survived: time,
            level,
            kills_normal: kills - bosses,
            kills_boss: bosses,
            ..RunStats::for_character("default")
        }
    }

    #[test]
    fn invalid_high_score_record_loads_empty_and_saves_again() {
        let mut store = MemoryStore::new();
        store.set(KEY_HIGH_SCORES, "[{\"score\":").unwrap();
        store.set(KEY_SOULS, "17").unwrap();
        let mut meta = MetaProgression::load(&store);
        assert!(meta.high_scores.entries().is_empty());
        assert_eq!(meta.souls, 17);

        let tables = GameTables::default();
        meta.finish_run(&tables, &run(30.0, 2, 5, 0), 0, 0);
        meta.save_all(&mut store).unwrap();
        let reloaded = MetaProgression::load(&store);
        assert_eq!(reloaded.high_scores.entries().len(), 1);
        assert_eq!(reloaded, meta);
    }

    #[test]
    fn finish_run_pays_souls_and_ranks() {
        let tables = GameTables::default();
        let mut meta = MetaProgression::default();
        let (report, achievements, _) = meta.finish_run(&tables, &run(125.0, 6, 120, 1), 1, 0);
        // floor(125/10) + 6*2 + 120/10 + 25
        assert_eq!(report.souls_earned, 12 + 12 + 12 + 25);
        assert_eq!(meta.souls, report.souls_earned);
        assert_eq!(report.score, 1250 + 600 + 600);
        assert_eq!(report.rank, Some(1));
        assert!(report.new_high_score);
        assert!(report.new_achievements.contains(&"first_blood".to_string()));
        assert_eq!(achievements.len(), report.new_achievements.len());
        assert_eq!(meta.lifetime.total_runs, 1);
        assert_eq!(meta.lifetime.best_kills, 120);

        // 同じ実績は二度出ない
        let (again, _, _) = meta.finish_run(&tables, &run(10.0, 1, 1, 0), 0, 0);
        assert!(!again.new_achievements.contains(&"first_blood".to_string()));
        assert_eq!(again.rank, Some(2));
    }

    #[test]
    fn characters_unlock_from_lifetime_bests() {
        let tables = GameTables::default();
        let mut meta = MetaProgression::default();
        let tank = tables.character("tank").unwrap().clone();
        assert!(!meta.is_unlocked(&tank));
        let (report, _, unlocks) = meta.finish_run(&tables, &run(301.0, 3, 10, 0), 0, 0);
        assert!(report.new_unlocks.contains(&"tank".to_string()));
        assert!(unlocks.iter().any(|(id, name)| id == "tank" && name == "Tank"));
        assert!(meta.is_unlocked(&tank));
        assert!(meta.is_unlocked(&tables.characters[0]));
    }

    #[test]
    fn purchases_feed_run_bonuses() {
        let tables = GameTables::default();
        let mut meta = MetaProgression { souls: 500, ..Default::default() };
        meta.purchase(&tables, "vitality").unwrap();
        meta.purchase(&tables, "revival").unwrap();
        let b = meta.bonuses(&tables);
        assert!((b.health_mult - 1.1).abs() < 1e-5);
        assert_eq!(b.revivals, 1);
        assert_eq!(meta.souls, 500 - 50 - 300);
        assert!(matches!(
            meta.purchase(&tables, "revival"),
            Err(ShopError::MaxLevel(_))
        ));
    }
}
