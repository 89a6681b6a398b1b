//! Path: native/game_simulation/src/game_logic/physics_step.rs
//! Summary: 1 ティックのシミュレーション（固定順でシステムを呼ぶ）

use super::systems::behavior::update_enemies;
use super::systems::hazards::update_hazards;
use super::systems::items::update_items;
use super::systems::player::{apply_pull, update_player};
use super::systems::projectiles::{
    update_auto_attack, update_enemy_projectiles, update_player_projectiles,
};
use super::systems::spawn::update_spawning;
use super::systems::weapons::update_weapons;
use crate::input::InputState;
use crate::world::{FrameEvent, RunState};
use game_core::constants::FRAME_BUDGET_MS;

/// スケール済みの `dt` で 1 ティック進める。
/// 順序: 出現 → 敵行動 → 攻撃解決 → 回収。途中の出現は末尾でまとめて反映する
pub(crate) fn physics_step(w: &mut RunState, input: &InputState, dt: f32) {
    // trace にしておき、RUST_LOG=trace のときだけ毎フレーム出力
    log::trace!("physics_step: dt={:.4}s frame_id={}", dt, w.frame_id);
    let t_start = std::time::Instant::now();

    w.frame_id += 1;
    w.elapsed += dt;
    w.stats.time_survived = w.elapsed;
    let now = w.elapsed;

    // ── コンボ減衰・パワーアップ切れ（キル処理より先）──────────
    if let Some(count) = w.combo.update(dt) {
        w.frame_events.push(FrameEvent::ComboEnded { count });
    }
    for kind in w.powerups.take_expired(now) {
        w.frame_events.push(FrameEvent::PowerupExpired { kind });
    }

    // ── プレイヤー ────────────────────────────────────────────
    update_player(w, input, dt);

    // ── 出現 → 敵行動 ─────────────────────────────────────────
    update_spawning(w, dt);
    update_enemies(w, dt);
    apply_pull(w);

    // 以降の当たり判定は移動後の位置で引く
    w.rebuild_spatial();

    // ── 攻撃解決 ──────────────────────────────────────────────
    update_auto_attack(w, dt);
    update_player_projectiles(w, dt);
    update_enemy_projectiles(w, dt);
    update_weapons(w, dt);
    update_hazards(w, dt);

    // ── 回収 ──────────────────────────────────────────────────
    update_items(w, dt);

    w.flush_pending_spawns();

    // ── フレーム時間計測 ──────────────────────────────────────
    let elapsed_ms = t_start.elapsed().as_secs_f64() * 1000.0;
    w.last_frame_time_ms = elapsed_ms;
    if elapsed_ms > FRAME_BUDGET_MS {
        log::warn!(
            "frame budget exceeded: {:.2}ms (enemies: {}, projectiles: {})",
            elapsed_ms,
            w.enemies.count,
            w.projectiles.count + w.enemy_projectiles.count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::systems::test_support::run_with_seed;

    #[test]
    fn auto_attack_kills_a_basic_enemy_in_front() {
        let mut w = run_with_seed(12);
        w.auto_spawn = false;
        let kind = w.tables.enemy_id("basic").unwrap();
        let id = w.spawn_enemy(kind, 5.0, 0.0, 1.0).unwrap();
        let idle = InputState::default();
        for _ in 0..90 {
            physics_step(&mut w, &idle, 1.0 / 60.0);
            if w.enemies.index_of(id).is_none() {
                break;
            }
        }
        assert!(w.enemies.index_of(id).is_none());
        assert_eq!(w.player.stats.kill_count, 1);
        let gems = w.items.gem_count() as u32 + w.stats.gems_collected;
        assert!((1..=2).contains(&gems));
    }

    #[test]
    fn combo_decay_is_reported() {
        let mut w = run_with_seed(12);
        w.auto_spawn = false;
        w.combo.on_kill(&w.tables.combo_tiers);
        let idle = InputState::default();
        let mut ended = 0;
        for _ in 0..30 {
            physics_step(&mut w, &idle, 0.1);
            ended += w
                .frame_events
                .drain(..)
                .filter(|e| matches!(e, FrameEvent::ComboEnded { count: 1 }))
                .count();
        }
        assert_eq!(ended, 1);
        assert_eq!(w.combo.count(), 0);
    }

    #[test]
    fn spatial_hash_tracks_moved_enemies() {
        let mut w = run_with_seed(12);
        w.auto_spawn = false;
        let kind = w.tables.enemy_id("tank").unwrap();
        w.spawn_enemy(kind, 10.0, 0.0, 1.0);
        physics_step(&mut w, &InputState::default(), 0.5);
        let x = w.enemies.positions_x[0];
        assert!(x < 10.0);
        let near = w.spatial.query_nearby(x, 0.0, 0.5);
        assert!(near.contains(&0));
    }
}
