//! Path: native/game_simulation/src/world/run_state.rs
//! Summary: 1 ラン分のワールド状態（RunState）と遅延スポーンキュー

use std::sync::Arc;

use game_core::config::GameTables;
use game_core::constants::CELL_SIZE;
use game_core::item::ItemWorld;
use game_core::meta_tables::{CharacterDef, MetaBonuses};
use game_core::passive::Passives;
use game_core::physics::rng::SimpleRng;
use game_core::physics::spatial_hash::SpatialHash;

use super::{EnemyState, EnemyWorld, FrameEvent, PlayerState, ProjectileWorld, TimeController};
use crate::hazard::HazardField;
use crate::progression::{ActivePowerups, Combo, RunStats};
use crate::weapons::{WeaponHit, WeaponSet};

/// フレーム中に決まったスポーン。敵ループ中にスロットを動かさないよう
/// フレーム末尾でまとめて生成する
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingSpawn {
    pub kind_id: u8,
    pub x:       f32,
    pub y:       f32,
    pub hp_mult: f32,
}

/// スポーンディレクターのラン内状態
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnDirector {
    pub spawn_timer: f32,
    pub tier_index:  usize,
    /// 前フレームのチェック時刻（周期スケジュールの境界判定用）
    pub last_time:   f32,
    /// これまでに出したボス数（ロスターの巡回に使う）
    pub boss_count:  usize,
}

/// 1 ラン分の状態。`Game` が所有し、ラン開始ごとに `reset` で作り直す
pub struct RunState {
    pub tables:             Arc<GameTables>,
    pub frame_id:           u32,
    /// シミュレーション時間（秒）。ヒットストップ中は進まない
    pub elapsed:            f32,
    pub player:             PlayerState,
    pub enemies:            EnemyWorld,
    /// プレイヤー弾
    pub projectiles:        ProjectileWorld,
    /// 敵弾（ミラーの反射弾を含む）
    pub enemy_projectiles:  ProjectileWorld,
    pub items:              ItemWorld,
    pub hazards:            HazardField,
    pub weapons:            WeaponSet,
    pub passives:           Passives,
    pub combo:              Combo,
    pub powerups:           ActivePowerups,
    pub stats:              RunStats,
    pub director:           SpawnDirector,
    pub bonuses:            MetaBonuses,
    pub revivals_left:      u32,
    pub rng:                SimpleRng,
    pub spatial:            SpatialHash,
    /// 近傍クエリ用バッファ（毎フレーム再利用）
    pub query_buf:          Vec<usize>,
    pub weapon_hits:        Vec<WeaponHit>,
    pub pending_spawns:     Vec<PendingSpawn>,
    /// 未消化のレベルアップ数（1 つずつ選択させる）
    pub pending_level_ups:  u32,
    pub time:               TimeController,
    /// このフレームで発生したイベント（毎フレーム drain される）
    pub frame_events:       Vec<FrameEvent>,
    pub player_dead:        bool,
    /// false なら時間経過のスポーンを止める（テスト・ベンチ用）
    pub auto_spawn:         bool,
    /// 直近フレームの物理ステップ処理時間（ミリ秒）
    pub last_frame_time_ms: f64,
}

impl RunState {
    pub fn new(tables: Arc<GameTables>, character: &CharacterDef, bonuses: MetaBonuses, rng: SimpleRng) -> Self {
        let passives = Passives::new(&tables.passives);
        let mut run = Self {
            frame_id:           0,
            elapsed:            0.0,
            player:             PlayerState::new(character, &bonuses),
            enemies:            EnemyWorld::new(),
            projectiles:        ProjectileWorld::new(),
            enemy_projectiles:  ProjectileWorld::new(),
            items:              ItemWorld::new(),
            hazards:            HazardField::new(),
            weapons:            WeaponSet::new(),
            passives,
            combo:              Combo::default(),
            powerups:           ActivePowerups::default(),
            stats:              RunStats::for_character(&character.id),
            director:           SpawnDirector::default(),
            revivals_left:      bonuses.revivals,
            bonuses,
            rng,
            spatial:            SpatialHash::new(CELL_SIZE),
            query_buf:          Vec::new(),
            weapon_hits:        Vec::new(),
            pending_spawns:     Vec::new(),
            pending_level_ups:  0,
            time:               TimeController::new(),
            frame_events:       Vec::new(),
            player_dead:        false,
            auto_spawn:         true,
            last_frame_time_ms: 0.0,
            tables,
        };
        run.grant_starting_passives(character);
        run
    }

    /// 新しいランのために全サブシステムを初期化する（プールの容量は保持）
    pub fn reset(&mut self, character: &CharacterDef, bonuses: MetaBonuses) {
        self.frame_id = 0;
        self.elapsed = 0.0;
        self.player = PlayerState::new(character, &bonuses);
        self.enemies.reset();
        self.projectiles.reset();
        self.enemy_projectiles.reset();
        self.items.reset();
        self.hazards.reset();
        self.weapons.reset();
        self.passives.reset();
        self.combo.reset();
        self.powerups.reset();
        self.stats = RunStats::for_character(&character.id);
        self.director = SpawnDirector::default();
        self.revivals_left = bonuses.revivals;
        self.bonuses = bonuses;
        self.spatial.clear();
        self.weapon_hits.clear();
        self.pending_spawns.clear();
        self.pending_level_ups = 0;
        self.time.reset();
        self.frame_events.clear();
        self.player_dead = false;
        self.last_frame_time_ms = 0.0;
        self.grant_starting_passives(character);
    }

    fn grant_starting_passives(&mut self, character: &CharacterDef) {
        for &kind in &character.starting_passives {
            self.passives.upgrade(kind);
        }
    }

    /// ボス・中ボスは生存上限に数えない
    pub fn bypasses_cap(&self, kind_id: u8) -> bool {
        self.tables.enemy(kind_id).is_some_and(|p| p.is_boss())
            || self.tables.mini_bosses.iter().any(|m| m.kind_id == kind_id)
    }

    /// 上限に空きがあるか（キュー済みも数える）
    pub fn spawn_headroom(&self) -> usize {
        self.tables
            .spawn
            .max_enemies
            .saturating_sub(self.enemies.count + self.pending_spawns.len())
    }

    /// フレーム末尾でのスポーンを予約する。上限で弾かれたら false
    pub fn queue_spawn(&mut self, kind_id: u8, x: f32, y: f32, hp_mult: f32) -> bool {
        if self.tables.enemy(kind_id).is_none() {
            return false;
        }
        if !self.bypasses_cap(kind_id) && self.spawn_headroom() == 0 {
            return false;
        }
        self.pending_spawns.push(PendingSpawn { kind_id, x, y, hp_mult });
        true
    }

    /// 即座に 1 体生成して安定 ID を返す
    pub fn spawn_enemy(&mut self, kind_id: u8, x: f32, y: f32, hp_mult: f32) -> Option<u32> {
        let tables = Arc::clone(&self.tables);
        let params = tables.enemy(kind_id)?;
        let wobble = self.rng.next_f32() * std::f32::consts::TAU;
        let state = EnemyState::new(params, self.elapsed, wobble);
        let (_, id) = self.enemies.spawn(kind_id, params, x, y, hp_mult, state);
        self.frame_events.push(FrameEvent::EnemySpawned { id, kind_id, x, y });
        Some(id)
    }

    pub fn flush_pending_spawns(&mut self) {
        let pending = std::mem::take(&mut self.pending_spawns);
        for s in &pending {
            self.spawn_enemy(s.kind_id, s.x, s.y, s.hp_mult);
        }
        // 容量を使い回す
        self.pending_spawns = pending;
        self.pending_spawns.clear();
    }

    /// 衝突判定用の Spatial Hash を再構築する
    pub fn rebuild_spatial(&mut self) {
        self.spatial.clear();
        for i in 0..self.enemies.len() {
            if self.enemies.alive[i] {
                self.spatial.insert(i, self.enemies.positions_x[i], self.enemies.positions_y[i]);
            }
        }
    }

    pub fn is_boss(&self, i: usize) -> bool {
        self.tables
            .enemy(self.enemies.kind_ids[i])
            .is_some_and(|p| p.is_boss())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run() -> RunState {
        let tables = Arc::new(GameTables::default());
        let character = tables.characters[0].clone();
        RunState::new(tables, &character, MetaBonuses::default(), SimpleRng::new(7))
    }

    #[test]
    fn pending_spawns_respect_cap_but_not_for_bosses() {
        let mut w = run();
        let mut tables = GameTables::default();
        tables.spawn.max_enemies = 2;
        w.tables = Arc::new(tables);
        let basic = w.tables.enemy_id("basic").unwrap();
        let boss = w.tables.bosses[0];

        assert!(w.queue_spawn(basic, 1.0, 0.0, 1.0));
        assert!(w.queue_spawn(basic, 2.0, 0.0, 1.0));
        assert!(!w.queue_spawn(basic, 3.0, 0.0, 1.0));
        assert!(w.queue_spawn(boss, 4.0, 0.0, 1.0));
        w.flush_pending_spawns();
        assert_eq!(w.enemies.count, 3);
        assert!(w.pending_spawns.is_empty());
        let spawned = w
            .frame_events
            .iter()
            .filter(|e| matches!(e, FrameEvent::EnemySpawned { .. }))
            .count();
        assert_eq!(spawned, 3);
    }

    #[test]
    fn reset_tears_down_everything() {
        let mut w = run();
        let basic = w.tables.enemy_id("basic").unwrap();
        w.spawn_enemy(basic, 3.0, 0.0, 1.0);
        w.items.spawn_gem(1.0, 1.0, 1, 0.0);
        w.elapsed = 42.0;
        w.player_dead = true;
        w.pending_level_ups = 2;
        w.weapons.upgrade(game_core::weapon::WeaponKind::Nova, 5, false);

        let character = w.tables.characters[0].clone();
        w.reset(&character, MetaBonuses::default());
        assert_eq!(w.enemies.count, 0);
        assert!(w.items.is_empty());
        assert_eq!(w.elapsed, 0.0);
        assert!(!w.player_dead);
        assert_eq!(w.pending_level_ups, 0);
        assert_eq!(w.weapons.active_count(), 0);
        assert!(w.frame_events.is_empty());
    }
}
