//! Path: native/game_simulation/src/game_logic/systems/spawn.rs
//! Summary: スポーンディレクター（ティア切替・定期バースト・ボス / 中ボスの周期出現）

use std::sync::Arc;

use game_core::config::GameTables;
use game_core::difficulty::{pick_weighted, tier_index_at};
use game_core::util::spawn_position_around_player;

use crate::world::{AudioCue, FrameEvent, RunState};

pub(crate) fn update_spawning(w: &mut RunState, dt: f32) {
    if !w.auto_spawn {
        return;
    }
    let tables = Arc::clone(&w.tables);
    let now = w.elapsed;
    let prev = w.director.last_time;
    w.director.last_time = now;

    // ── ティア切替 ────────────────────────────────────────────
    let tier = tier_index_at(&tables.tiers, now);
    if tier > w.director.tier_index {
        w.director.tier_index = tier;
        let name = &tables.tiers[tier].name;
        log::debug!("difficulty tier {} ({}) at t={:.1}", tier, name, now);
        warn(w, format!("DIFFICULTY {name}"), AudioCue::Warning);
    }

    // ── 定期バースト ──────────────────────────────────────────
    let interval = tables.spawn.spawn_interval(now);
    w.director.spawn_timer += dt;
    if w.director.spawn_timer >= interval {
        w.director.spawn_timer = (w.director.spawn_timer - interval).min(interval);
        spawn_burst(w, &tables, tier, now);
    }

    // ── ボス ──────────────────────────────────────────────────
    if !tables.bosses.is_empty() && tables.spawn.boss_schedule.fires_between(prev, now) {
        let kind_id = tables.bosses[w.director.boss_count % tables.bosses.len()];
        w.director.boss_count += 1;
        let d = tables.spawn.boss_distance;
        let (x, y) = spawn_position_around_player(&mut w.rng, w.player.x, w.player.y, d, d);
        if w.queue_spawn(kind_id, x, y, tables.spawn.health_multiplier(now)) {
            log::debug!("boss #{} (kind {}) at t={:.1}", w.director.boss_count, kind_id, now);
            warn(w, "BOSS INCOMING!".to_string(), AudioCue::BossWarning);
        }
    }

    // ── 中ボス ────────────────────────────────────────────────
    for mini in &tables.mini_bosses {
        if !mini.schedule.fires_between(prev, now) {
            continue;
        }
        let Some(params) = tables.enemy(mini.kind_id) else {
            continue;
        };
        let (x, y) = spawn_position_around_player(
            &mut w.rng,
            w.player.x,
            w.player.y,
            tables.spawn.spawn_min_distance,
            tables.spawn.spawn_max_distance,
        );
        if w.queue_spawn(mini.kind_id, x, y, tables.spawn.health_multiplier(now)) {
            log::debug!("mini-boss {} at t={:.1}", params.name, now);
            warn(w, format!("{} APPROACHES!", params.name.to_uppercase()), AudioCue::Warning);
        }
    }
}

/// 現ティアの敵を重み付きで抽選し、上限の空きぶんだけ出す
fn spawn_burst(w: &mut RunState, tables: &GameTables, tier: usize, now: f32) {
    let Some(tier) = tables.tiers.get(tier) else {
        return;
    };
    if tier.kind_ids.is_empty() {
        return;
    }
    let weights: Vec<u32> = tier
        .kind_ids
        .iter()
        .map(|&k| tables.enemy(k).map_or(0, |p| p.weight))
        .collect();
    let count = (tables.spawn.burst_size(now) as usize).min(w.spawn_headroom());
    let hp_mult = tables.spawn.health_multiplier(now);
    for _ in 0..count {
        let kind_id = tier.kind_ids[pick_weighted(&weights, w.rng.next_f32())];
        let (x, y) = spawn_position_around_player(
            &mut w.rng,
            w.player.x,
            w.player.y,
            tables.spawn.spawn_min_distance,
            tables.spawn.spawn_max_distance,
        );
        w.queue_spawn(kind_id, x, y, hp_mult);
    }
}

fn warn(w: &mut RunState, message: String, cue: AudioCue) {
    w.frame_events.push(FrameEvent::WaveWarning { message });
    w.frame_events.push(FrameEvent::Audio(cue));
}
