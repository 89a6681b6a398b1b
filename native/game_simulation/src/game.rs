//! Path: native/game_simulation/src/game.rs
//! Summary: ホスト向けの窓口（フェーズ遷移・1 フレーム更新・レベルアップ選択・メタ精算と保存）
//!
//! レベルアップ選択中と一時停止中はシミュレーションを一切進めない。
//! ヒットストップ・スローは `TimeController` のスケールで表現し、描画側は止めない。

use std::sync::Arc;

use game_core::config::GameTables;
use game_core::constants::MAX_FRAME_DELTA;
use game_core::item::PowerupKind;
use game_core::physics::rng::SimpleRng;
use serde::Serialize;

use crate::game_logic::systems::leveling::{apply_upgrade, roll_upgrade_choices};
use crate::game_logic::{drain_frame_events, physics_step, UpgradeChoice};
use crate::input::InputState;
use crate::meta::{KvStore, MetaProgression, RunReport, ShopError};
use crate::world::{FrameEvent, RunState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Menu,
    Playing,
    Paused,
    LevelUp,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("unknown character `{0}`")]
    UnknownCharacter(String),
    #[error("character `{0}` is locked")]
    LockedCharacter(String),
    #[error("cannot {action} while {phase:?}")]
    WrongPhase { action: &'static str, phase: GamePhase },
    #[error("no upgrade choice #{0}")]
    InvalidChoice(usize),
    #[error("no rerolls left")]
    NoRerolls,
    #[error(transparent)]
    Shop(#[from] ShopError),
}

/// 毎ティック後に描画側へ渡す読み取り専用の HUD 状態
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub phase:         GamePhase,
    pub health:        f32,
    pub max_health:    f32,
    pub level:         u32,
    pub exp:           u32,
    pub exp_to_level:  u32,
    pub kills:         u32,
    pub time:          f32,
    pub combo:         u32,
    pub combo_tier:    Option<String>,
    pub dash_charges:  u32,
    /// 効果中のパワーアップと残り秒数
    pub powerups:      Vec<(PowerupKind, f32)>,
    pub enemies:       usize,
    /// 生存中のボスがいればその体力割合
    pub boss_health:   Option<f32>,
    pub revivals_left: u32,
    pub souls:         u32,
}

pub struct Game {
    tables:          Arc<GameTables>,
    store:           Box<dyn KvStore>,
    meta:            MetaProgression,
    run:             RunState,
    phase:           GamePhase,
    choices:         Vec<UpgradeChoice>,
    rerolls_left:    u32,
    /// ラン中に達成した実績（精算レポートにまとめる）
    run_achievements: Vec<String>,
    last_report:     Option<RunReport>,
}

impl Game {
    pub fn new(tables: Arc<GameTables>, store: Box<dyn KvStore>, rng: SimpleRng) -> Self {
        let meta = MetaProgression::load(store.as_ref());
        // 検証済みテーブルはキャラクターを 1 体以上持つ
        let character = tables.characters[0].clone();
        let run = RunState::new(Arc::clone(&tables), &character, meta.bonuses(&tables), rng);
        Self {
            tables,
            store,
            meta,
            run,
            phase: GamePhase::Menu,
            choices: Vec::new(),
            rerolls_left: 0,
            run_achievements: Vec::new(),
            last_report: None,
        }
    }

    pub fn tables(&self) -> &GameTables {
        &self.tables
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn meta(&self) -> &MetaProgression {
        &self.meta
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn run_mut(&mut self) -> &mut RunState {
        &mut self.run
    }

    pub fn choices(&self) -> &[UpgradeChoice] {
        &self.choices
    }

    pub fn rerolls_left(&self) -> u32 {
        self.rerolls_left
    }

    pub fn last_report(&self) -> Option<&RunReport> {
        self.last_report.as_ref()
    }

    fn expect_phase(&self, action: &'static str, allowed: &[GamePhase]) -> Result<(), GameError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(GameError::WrongPhase { action, phase: self.phase })
        }
    }

    /// メニュー・ゲームオーバーから新しいランを始める。前のランの状態はここで全て破棄する
    pub fn start_run(&mut self, character_id: &str) -> Result<(), GameError> {
        self.expect_phase("start a run", &[GamePhase::Menu, GamePhase::GameOver])?;
        let character = self
            .tables
            .character(character_id)
            .cloned()
            .ok_or_else(|| GameError::UnknownCharacter(character_id.to_string()))?;
        if !self.meta.is_unlocked(&character) {
            return Err(GameError::LockedCharacter(character_id.to_string()));
        }
        let bonuses = self.meta.bonuses(&self.tables);
        self.run.reset(&character, bonuses);
        self.rerolls_left = bonuses.rerolls;
        self.choices.clear();
        self.run_achievements.clear();
        self.last_report = None;
        self.phase = GamePhase::Playing;
        log::info!("run started as {} ({:?})", character.id, bonuses);
        Ok(())
    }

    /// 1 フレーム分。プレイ中以外はシミュレーションを進めない
    pub fn update(&mut self, frame_dt: f32, input: &InputState) -> Vec<FrameEvent> {
        match self.phase {
            GamePhase::Playing => {}
            GamePhase::Paused => {
                if input.pause {
                    self.phase = GamePhase::Playing;
                }
                return Vec::new();
            }
            _ => return Vec::new(),
        }
        if input.pause {
            self.phase = GamePhase::Paused;
            return Vec::new();
        }

        let raw = if frame_dt.is_finite() { frame_dt.clamp(0.0, MAX_FRAME_DELTA) } else { 0.0 };
        let dt = self.run.time.advance(raw);
        if dt > 0.0 {
            physics_step(&mut self.run, input, dt);
        }

        // ラン中に満たした実績はその場で通知する
        let snapshot = self.meta.snapshot(
            &self.run.stats,
            self.run.weapons.active_count() as u32,
            self.run.passives.active_count() as u32,
        );
        for (id, name) in self.meta.check_achievements(&self.tables, &snapshot) {
            self.run_achievements.push(id.clone());
            self.run.frame_events.push(FrameEvent::AchievementUnlocked { id, name });
        }

        if self.run.player_dead {
            self.finish_run();
        } else if self.run.pending_level_ups > 0 {
            self.choices = roll_upgrade_choices(&mut self.run);
            self.phase = GamePhase::LevelUp;
        }
        drain_frame_events(&mut self.run)
    }

    fn finish_run(&mut self) {
        let (mut report, achievements, unlocks) = self.meta.finish_run(
            &self.tables,
            &self.run.stats,
            self.run.weapons.active_count() as u32,
            self.run.passives.active_count() as u32,
        );
        for (id, name) in achievements {
            self.run.frame_events.push(FrameEvent::AchievementUnlocked { id, name });
        }
        for (id, name) in unlocks {
            self.run.frame_events.push(FrameEvent::CharacterUnlocked { id, name });
        }
        let mut all = std::mem::take(&mut self.run_achievements);
        all.append(&mut report.new_achievements);
        report.new_achievements = all;

        self.persist();
        self.run.frame_events.push(FrameEvent::GameOver {
            stats:  self.run.stats.clone(),
            report: report.clone(),
        });
        self.last_report = Some(report);
        self.choices.clear();
        self.phase = GamePhase::GameOver;
    }

    fn persist(&mut self) {
        if let Err(e) = self.meta.save_all(self.store.as_mut()) {
            log::warn!("failed to save meta progression: {}", e);
        }
    }

    /// 提示中の候補を選ぶ。保留中のレベルアップが残っていれば次の候補を出す
    pub fn choose_upgrade(&mut self, index: usize) -> Result<UpgradeChoice, GameError> {
        self.expect_phase("choose an upgrade", &[GamePhase::LevelUp])?;
        let choice = *self.choices.get(index).ok_or(GameError::InvalidChoice(index))?;
        apply_upgrade(&mut self.run, choice);
        self.run.pending_level_ups = self.run.pending_level_ups.saturating_sub(1);
        if self.run.pending_level_ups > 0 {
            self.choices = roll_upgrade_choices(&mut self.run);
        } else {
            self.choices.clear();
            self.phase = GamePhase::Playing;
        }
        Ok(choice)
    }

    pub fn reroll(&mut self) -> Result<&[UpgradeChoice], GameError> {
        self.expect_phase("reroll", &[GamePhase::LevelUp])?;
        if self.rerolls_left == 0 {
            return Err(GameError::NoRerolls);
        }
        self.rerolls_left -= 1;
        self.choices = roll_upgrade_choices(&mut self.run);
        Ok(&self.choices)
    }

    pub fn toggle_pause(&mut self) -> Result<GamePhase, GameError> {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            phase => return Err(GameError::WrongPhase { action: "pause", phase }),
        };
        Ok(self.phase)
    }

    /// ランを放棄してメニューへ。結果は記録せず、全プール・一時状態をその場で破棄する
    pub fn return_to_menu(&mut self) {
        if self.phase != GamePhase::Menu {
            let character = self
                .tables
                .character(&self.run.stats.character)
                .unwrap_or(&self.tables.characters[0])
                .clone();
            let bonuses = self.meta.bonuses(&self.tables);
            self.run.reset(&character, bonuses);
            self.choices.clear();
            self.run_achievements.clear();
        }
        self.phase = GamePhase::Menu;
    }

    /// ラン外でのみ購入できる。成功したら即保存
    pub fn purchase(&mut self, upgrade_id: &str) -> Result<u32, GameError> {
        self.expect_phase("shop", &[GamePhase::Menu, GamePhase::GameOver])?;
        let cost = self.meta.purchase(&self.tables, upgrade_id)?;
        self.persist();
        Ok(cost)
    }

    pub fn hud(&self) -> HudSnapshot {
        let r = &self.run;
        let now = r.elapsed;
        let boss_health = r
            .enemies
            .alive_indices()
            .find(|&i| r.is_boss(i))
            .map(|i| r.enemies.health_fraction(i));
        HudSnapshot {
            phase:         self.phase,
            health:        r.player.stats.health,
            max_health:    r.player.stats.max_health,
            level:         r.player.stats.level,
            exp:           r.player.stats.exp,
            exp_to_level:  r.player.stats.exp_to_level,
            kills:         r.player.stats.kill_count,
            time:          now,
            combo:         r.combo.count(),
            combo_tier:    r.combo.tier_name(&self.tables.combo_tiers).map(str::to_string),
            dash_charges:  r.player.dash_charges,
            powerups:      PowerupKind::ALL
                .iter()
                .filter(|&&k| r.powerups.is_active(k, now))
                .map(|&k| (k, r.powerups.remaining(k, now)))
                .collect(),
            enemies:       r.enemies.count,
            boss_health,
            revivals_left: r.revivals_left,
            souls:         self.meta.souls,
        }
    }
}
