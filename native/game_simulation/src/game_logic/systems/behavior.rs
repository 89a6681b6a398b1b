//! Path: native/game_simulation/src/game_logic/systems/behavior.rs
//! Summary: 敵の行動エンジン（能力の固定優先順評価 → 追尾移動 → 接触ダメージ）

use std::sync::Arc;

use game_core::config::GameTables;
use game_core::constants::{
    BOSS_CONTACT_RADIUS, CONTACT_DAMAGE_COOLDOWN, CONTACT_RADIUS, DESPAWN_RADIUS,
    ENEMY_PROJECTILE_LIFETIME, ENEMY_PROJECTILE_SPEED,
};
use game_core::entity_params::{Ability, BossAttack, EnemyParams};
use game_core::util::{dist, normalize, ring_positions, spawn_position_around_player};

use super::combat::{apply_raw_damage, damage_player};
use crate::hazard::{HazardKind, HazardOwner};
use crate::world::{
    AudioCue, ChargeState, DamageSource, EnemyState, FrameEvent, RunState, PROJECTILE_KIND_ENEMY,
};

/// 引き寄せはこれより近いと働かない（重なり時の振動防止）
const PULL_DEAD_ZONE: f32 = 0.5;
/// トリクルの手下を置く散らばり
const TRICKLE_SCATTER: f32 = 1.0;

/// 能力評価のあとに決まる移動方針
#[derive(Clone, Copy, Debug, PartialEq)]
enum Steer {
    /// プレイヤーへ直進
    Seek,
    /// プレイヤーから離れる
    Kite,
    /// その場に留まる
    Hold,
}

pub(crate) fn update_enemies(w: &mut RunState, dt: f32) {
    let tables = Arc::clone(&w.tables);
    for i in 0..w.enemies.len() {
        if !w.enemies.alive[i] {
            continue;
        }
        let Some(params) = tables.enemy(w.enemies.kind_ids[i]) else {
            continue;
        };
        let hp_mult = tables.spawn.health_multiplier(w.elapsed);
        update_one(w, i, params, &tables, hp_mult, dt);
    }
}

fn update_one(
    w: &mut RunState,
    i: usize,
    params: &EnemyParams,
    tables: &GameTables,
    hp_mult: f32,
    dt: f32,
) {
    let now = w.elapsed;
    let id = w.enemies.ids[i];
    let kind_id = w.enemies.kind_ids[i];
    let (px, py) = (w.player.x, w.player.y);
    let (mut x, mut y) = (w.enemies.positions_x[i], w.enemies.positions_y[i]);
    let d = dist(x, y, px, py);

    // 遠すぎる雑魚は報酬なしで片付ける（死亡ではない）
    if !params.is_boss() && d > DESPAWN_RADIUS {
        w.enemies.kill(i);
        w.hazards.forget_enemy(id);
        return;
    }

    let mut s: EnemyState = w.enemies.states[i];
    let health = w.enemies.health_fraction(i);

    // ── 常時効果 ──────────────────────────────────────────────
    if let Some((_, regen)) = params.shield() {
        s.shield = (s.shield + regen * dt).min(s.max_shield);
    }
    for ability in &params.abilities {
        if let Ability::Enrage { threshold, speed_mult, damage_mult } = ability {
            if !s.enraged && health < *threshold {
                s.enraged = true;
                s.speed_mult *= speed_mult;
                s.damage_mult *= damage_mult;
                w.frame_events.push(FrameEvent::EnemyEnraged { id });
            }
        }
    }
    if let Some(special) = &params.boss {
        if health < special.threshold && now - s.last_special >= special.cooldown {
            s.last_special = now;
            w.frame_events.push(FrameEvent::BossSpecial { id, kind_id });
            w.frame_events.push(FrameEvent::Audio(AudioCue::BossWarning));
            boss_attack(w, tables, &special.attack, x, y, hp_mult);
        }
    }

    // 武器で凍結中は何もしない（接触もしない）
    if now < s.frozen_until {
        w.enemies.states[i] = s;
        return;
    }

    // ── 優先順に能力を評価 ────────────────────────────────────
    let mut steer = Steer::Seek;
    let mut moved = false;
    let mut lateral = 0.0_f32;
    for ability in &params.abilities {
        match ability {
            Ability::Phase { interval } => {
                if now - s.last_phase >= *interval {
                    s.last_phase = now;
                    s.phased = !s.phased;
                }
            }
            Ability::Teleport { trigger_range, range, cooldown } => {
                if d <= *trigger_range && now - s.last_teleport >= *cooldown {
                    s.last_teleport = now;
                    let (tx, ty) = spawn_position_around_player(&mut w.rng, px, py, range * 0.5, *range);
                    x = tx;
                    y = ty;
                    moved = true;
                    w.frame_events.push(FrameEvent::Audio(AudioCue::Teleport));
                }
            }
            Ability::Charge { trigger_range, windup, speed, distance, cooldown, trail } => {
                match s.charge {
                    ChargeState::Idle => {
                        if d <= *trigger_range && now - s.last_charge >= *cooldown {
                            let (dir_x, dir_y) = normalize(px - x, py - y).unwrap_or((1.0, 0.0));
                            s.charge = ChargeState::Windup { remaining: *windup, dir_x, dir_y };
                            steer = Steer::Hold;
                        }
                    }
                    ChargeState::Windup { remaining, dir_x, dir_y } => {
                        let remaining = remaining - dt;
                        s.charge = if remaining <= 0.0 {
                            ChargeState::Dashing { remaining: *distance, dir_x, dir_y, trail_accum: 0.0 }
                        } else {
                            ChargeState::Windup { remaining, dir_x, dir_y }
                        };
                        steer = Steer::Hold;
                    }
                    ChargeState::Dashing { remaining, dir_x, dir_y, mut trail_accum } => {
                        let step = (speed * dt).min(remaining);
                        x += dir_x * step;
                        y += dir_y * step;
                        moved = true;
                        trail_accum += step;
                        if let Some(t) = trail {
                            while trail_accum >= t.spacing && t.spacing > 0.0 {
                                trail_accum -= t.spacing;
                                w.hazards.spawn_fire_trail(x, y, t.radius, t.damage, HazardOwner::Enemy);
                            }
                        }
                        let remaining = remaining - step;
                        s.charge = if remaining <= 0.0 {
                            s.last_charge = now;
                            ChargeState::Idle
                        } else {
                            ChargeState::Dashing { remaining, dir_x, dir_y, trail_accum }
                        };
                    }
                }
            }
            Ability::Freeze { range, duration, cooldown } => {
                if d <= *range && now - s.last_freeze >= *cooldown && !w.player.is_frozen(now) {
                    s.last_freeze = now;
                    w.player.frozen_until = now + duration;
                    w.frame_events.push(FrameEvent::PlayerFrozen { duration: *duration });
                    w.frame_events.push(FrameEvent::Audio(AudioCue::Freeze));
                }
            }
            Ability::Summon { cooldown, count, minion, radius } => {
                if now - s.last_summon >= *cooldown {
                    s.last_summon = now;
                    if let Some(minion_id) = tables.enemy_id(minion) {
                        for (sx, sy) in ring_positions(x, y, *radius, *count) {
                            w.queue_spawn(minion_id, sx, sy, hp_mult);
                        }
                    }
                }
            }
            Ability::Shoot { range, cooldown, damage, kite_range, min_range } => {
                if d <= *range && d > *min_range && now - s.last_shoot >= *cooldown {
                    s.last_shoot = now;
                    if let Some((dx, dy)) = normalize(px - x, py - y) {
                        w.enemy_projectiles.spawn(
                            x,
                            y,
                            dx * ENEMY_PROJECTILE_SPEED,
                            dy * ENEMY_PROJECTILE_SPEED,
                            damage * s.damage_mult,
                            ENEMY_PROJECTILE_LIFETIME,
                            PROJECTILE_KIND_ENEMY,
                        );
                        w.frame_events.push(FrameEvent::Audio(AudioCue::EnemyShoot));
                    }
                }
                if steer == Steer::Seek {
                    if d < *kite_range {
                        steer = Steer::Kite;
                    } else if *kite_range > 0.0 && d <= *range {
                        steer = Steer::Hold;
                    }
                }
            }
            Ability::Zigzag { amplitude, frequency } => {
                let t = now - s.spawn_time;
                lateral = (t * frequency + s.wobble_phase).sin() * amplitude;
            }
            Ability::Pull { range, strength } => {
                if d <= *range && d > PULL_DEAD_ZONE {
                    w.player.pull_x += (x - px) / d * strength * dt;
                    w.player.pull_y += (y - py) / d * strength * dt;
                }
            }
            Ability::Trickle { interval, minion } => {
                if now - s.last_trickle >= *interval {
                    s.last_trickle = now;
                    if let Some(minion_id) = tables.enemy_id(minion) {
                        let sx = x + w.rng.range_f32(-TRICKLE_SCATTER, TRICKLE_SCATTER);
                        let sy = y + w.rng.range_f32(-TRICKLE_SCATTER, TRICKLE_SCATTER);
                        w.queue_spawn(minion_id, sx, sy, hp_mult);
                    }
                }
            }
            // 死亡時・被弾時・接触時に効く能力
            Ability::Explode { .. }
            | Ability::Split { .. }
            | Ability::Shield { .. }
            | Ability::LifeSteal { .. }
            | Ability::Enrage { .. }
            | Ability::Reflect { .. } => {}
        }
    }

    // ── 追尾移動 ──────────────────────────────────────────────
    if !moved {
        if let Some((dx, dy)) = normalize(px - x, py - y) {
            let speed = params.speed * s.speed_mult;
            let (mut vx, mut vy) = match steer {
                Steer::Seek => (dx * speed, dy * speed),
                Steer::Kite => (-dx * speed, -dy * speed),
                Steer::Hold => (0.0, 0.0),
            };
            if steer == Steer::Seek && lateral != 0.0 {
                // 進行方向に垂直な揺れ
                vx += -dy * lateral * speed;
                vy += dx * lateral * speed;
            }
            x += vx * dt;
            y += vy * dt;
        }
    }

    w.enemies.positions_x[i] = x;
    w.enemies.positions_y[i] = y;
    w.enemies.states[i] = s;

    // ── 接触ダメージ ──────────────────────────────────────────
    if s.phased {
        return;
    }
    let reach = if params.is_boss() { BOSS_CONTACT_RADIUS } else { CONTACT_RADIUS };
    if dist(x, y, px, py) > reach || now - s.last_contact < CONTACT_DAMAGE_COOLDOWN {
        return;
    }
    w.enemies.states[i].last_contact = now;
    let applied = damage_player(w, params.damage * s.damage_mult, DamageSource::Contact { kind_id });
    if applied <= 0.0 {
        return;
    }
    if let Some(fraction) = params.life_steal() {
        w.enemies.hp[i] = (w.enemies.hp[i] + applied * fraction).min(w.enemies.max_hp[i]);
    }
    let thorns = w.passives.thorns_damage(applied);
    if thorns > 0.0 {
        apply_raw_damage(w, i, thorns);
    }
}

fn boss_attack(
    w: &mut RunState,
    tables: &GameTables,
    attack: &BossAttack,
    x: f32,
    y: f32,
    hp_mult: f32,
) {
    match attack {
        BossAttack::MassSpawn { minion, count, radius } => {
            if let Some(minion_id) = tables.enemy_id(minion) {
                for (sx, sy) in ring_positions(x, y, *radius, *count) {
                    w.queue_spawn(minion_id, sx, sy, hp_mult);
                }
            }
        }
        BossAttack::Reinforcements { minion, count } => {
            if let Some(minion_id) = tables.enemy_id(minion) {
                for _ in 0..*count {
                    let (sx, sy) = spawn_position_around_player(
                        &mut w.rng,
                        w.player.x,
                        w.player.y,
                        tables.spawn.spawn_min_distance,
                        tables.spawn.spawn_max_distance,
                    );
                    w.queue_spawn(minion_id, sx, sy, hp_mult);
                }
            }
        }
        BossAttack::LavaPool => {
            let (lx, ly) = (w.player.x, w.player.y);
            w.hazards.spawn_lava_pool(lx, ly, HazardOwner::Enemy);
            w.frame_events.push(FrameEvent::HazardSpawned { kind: HazardKind::LavaPool, x: lx, y: ly });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::systems::test_support::{run_with_seed, run_with_tables};
    use game_core::config::TablesFile;

    fn spawn(w: &mut RunState, name: &str, x: f32, y: f32) -> usize {
        let kind = w.tables.enemy_id(name).unwrap();
        let id = w.spawn_enemy(kind, x, y, 1.0).unwrap();
        w.enemies.index_of(id).unwrap()
    }

    fn step(w: &mut RunState, dt: f32) {
        w.elapsed += dt;
        update_enemies(w, dt);
    }

    #[test]
    fn basic_seeks_and_hits_on_cooldown() {
        let mut w = run_with_seed(5);
        let i = spawn(&mut w, "basic", 1.0, 0.0);
        step(&mut w, 0.01);
        assert!(w.enemies.positions_x[i] < 1.0);
        let hp = w.player.stats.health;
        assert!((hp - 90.0).abs() < 0.001);
        // クールダウン中は再ヒットしない
        step(&mut w, 0.1);
        assert_eq!(w.player.stats.health, hp);
        for _ in 0..5 {
            step(&mut w, 0.1);
        }
        assert!(w.player.stats.health < hp);
    }

    #[test]
    fn far_enemies_despawn_without_reward() {
        let mut w = run_with_seed(5);
        spawn(&mut w, "basic", DESPAWN_RADIUS + 5.0, 0.0);
        step(&mut w, 0.016);
        assert_eq!(w.enemies.count, 0);
        assert_eq!(w.stats.total_kills(), 0);
        assert!(w.items.is_empty());
    }

    #[test]
    fn bosses_never_despawn() {
        let mut w = run_with_seed(5);
        let boss = w.tables.enemy(w.tables.bosses[0]).unwrap().name.clone();
        spawn(&mut w, &boss, DESPAWN_RADIUS + 5.0, 0.0);
        step(&mut w, 0.016);
        assert_eq!(w.enemies.count, 1);
    }

    #[test]
    fn ghost_toggles_phase_on_interval() {
        let mut w = run_with_seed(5);
        let i = spawn(&mut w, "ghost", 20.0, 0.0);
        step(&mut w, 1.0);
        assert!(!w.enemies.states[i].phased);
        step(&mut w, 0.6);
        assert!(w.enemies.states[i].phased);
    }

    #[test]
    fn shooter_fires_and_kites() {
        let mut w = run_with_seed(5);
        let i = spawn(&mut w, "shooter", 5.0, 0.0);
        step(&mut w, 2.0);
        assert_eq!(w.enemy_projectiles.count, 1);
        // 近すぎるので離れる
        assert!(w.enemies.positions_x[i] > 5.0);
    }

    #[test]
    fn berserker_enrages_once() {
        let mut w = run_with_seed(5);
        let i = spawn(&mut w, "berserker", 20.0, 0.0);
        w.enemies.hp[i] = w.enemies.max_hp[i] * 0.4;
        step(&mut w, 0.016);
        step(&mut w, 0.016);
        let enraged = w
            .frame_events
            .iter()
            .filter(|e| matches!(e, FrameEvent::EnemyEnraged { .. }))
            .count();
        assert_eq!(enraged, 1);
        assert!(w.enemies.states[i].speed_mult > 1.0);
    }

    #[test]
    fn charger_winds_up_then_dashes_leaving_fire() {
        let mut w = run_with_seed(5);
        let i = spawn(&mut w, "charger", 10.0, 0.0);
        step(&mut w, 4.0);
        assert!(matches!(w.enemies.states[i].charge, ChargeState::Windup { .. }));
        let before = w.enemies.positions_x[i];
        for _ in 0..10 {
            step(&mut w, 0.1);
        }
        assert!(w.enemies.positions_x[i] < before);
        assert!(!w.hazards.is_empty());
        assert!(w.hazards.hazards.iter().all(|h| h.owner == HazardOwner::Enemy));
    }

    #[test]
    fn void_pulls_player() {
        let mut w = run_with_seed(5);
        spawn(&mut w, "void", 5.0, 0.0);
        step(&mut w, 0.1);
        assert!(w.player.pull_x > 0.0);
    }

    #[test]
    fn frost_freezes_player() {
        let mut w = run_with_seed(5);
        spawn(&mut w, "frost", 4.0, 0.0);
        step(&mut w, 5.0);
        assert!(w.player.is_frozen(w.elapsed));
        assert!(w.frame_events.iter().any(|e| matches!(e, FrameEvent::PlayerFrozen { .. })));
    }

    #[test]
    fn summoner_queues_minions() {
        let mut w = run_with_seed(5);
        spawn(&mut w, "summoner", 20.0, 0.0);
        step(&mut w, 6.0);
        assert_eq!(w.pending_spawns.len(), 3);
    }

    #[test]
    fn leech_heals_from_contact_and_thorns_strike_back() {
        let mut w = run_with_seed(5);
        w.passives.upgrade(game_core::passive::PassiveKind::Thorns);
        let i = spawn(&mut w, "leech", 0.5, 0.0);
        w.enemies.hp[i] = 20.0;
        step(&mut w, 0.001);
        // 接触 12 で leech は +6、ソーン 12×0.2+5 = 7.4 で −7.4
        assert!((w.enemies.hp[i] - (20.0 + 6.0 - 7.4)).abs() < 0.01);
    }

    #[test]
    fn weapon_frozen_enemy_stands_still() {
        let mut w = run_with_seed(5);
        let i = spawn(&mut w, "basic", 10.0, 0.0);
        w.enemies.states[i].frozen_until = 1.0;
        step(&mut w, 0.5);
        assert_eq!(w.enemies.positions_x[i], 10.0);
    }

    fn specials(w: &RunState) -> usize {
        w.frame_events.iter().filter(|e| matches!(e, FrameEvent::BossSpecial { .. })).count()
    }

    #[test]
    fn boss_special_waits_for_threshold_then_repeats_on_cooldown() {
        let mut w = run_with_seed(5);
        let i = spawn(&mut w, "warlord", 20.0, 0.0);
        step(&mut w, 0.016);
        assert_eq!(specials(&w), 0);

        // 閾値 0.4 を割ると即発動し、周囲 4.0 の円周に 8 体
        w.enemies.hp[i] = w.enemies.max_hp[i] * 0.3;
        let (bx, by) = (w.enemies.positions_x[i], w.enemies.positions_y[i]);
        step(&mut w, 0.016);
        assert_eq!(specials(&w), 1);
        assert!(w.frame_events.contains(&FrameEvent::Audio(AudioCue::BossWarning)));
        let basic = w.tables.enemy_id("basic").unwrap();
        assert_eq!(w.pending_spawns.len(), 8);
        for s in &w.pending_spawns {
            assert_eq!(s.kind_id, basic);
            assert!((dist(s.x, s.y, bx, by) - 4.0).abs() < 0.001);
        }

        // クールダウン 8 秒の間は撃たない
        step(&mut w, 4.0);
        assert_eq!(specials(&w), 1);
        step(&mut w, 4.5);
        assert_eq!(specials(&w), 2);
        assert_eq!(w.pending_spawns.len(), 16);
    }

    #[test]
    fn reinforcements_arrive_on_the_spawn_ring() {
        let mut w = run_with_seed(5);
        let i = spawn(&mut w, "overlord", 20.0, 0.0);
        w.enemies.hp[i] = w.enemies.max_hp[i] * 0.2;
        step(&mut w, 0.016);
        let elite_fast = w.tables.enemy_id("elite_fast").unwrap();
        let (min, max) = (w.tables.spawn.spawn_min_distance, w.tables.spawn.spawn_max_distance);
        assert_eq!(w.pending_spawns.len(), 3);
        for s in &w.pending_spawns {
            assert_eq!(s.kind_id, elite_fast);
            let d = dist(s.x, s.y, w.player.x, w.player.y);
            assert!(d >= min - 0.001 && d <= max + 0.001, "{d}");
        }
    }

    #[test]
    fn lava_pool_lands_under_the_player() {
        let mut w = run_with_seed(5);
        w.player.x = 3.0;
        w.player.y = -2.0;
        let i = spawn(&mut w, "inferno", 40.0, 0.0);
        w.enemies.hp[i] = w.enemies.max_hp[i] * 0.2;
        step(&mut w, 0.016);
        assert_eq!(w.hazards.len(), 1);
        let pool = &w.hazards.hazards[0];
        assert_eq!(pool.kind, HazardKind::LavaPool);
        assert_eq!(pool.owner, HazardOwner::Enemy);
        assert_eq!((pool.x, pool.y), (3.0, -2.0));
        assert!(w
            .frame_events
            .iter()
            .any(|e| matches!(e, FrameEvent::HazardSpawned { kind: HazardKind::LavaPool, .. })));

        step(&mut w, 1.0);
        assert_eq!(specials(&w), 1);
    }

    #[test]
    fn teleporter_blinks_near_player_on_cooldown() {
        let mut w = run_with_seed(5);
        let i = spawn(&mut w, "teleporter", 15.0, 0.0);
        step(&mut w, 1.0);
        // 発動前は普通に歩く
        assert!((w.enemies.positions_x[i] - 12.0).abs() < 0.001);

        step(&mut w, 2.0);
        let (x, y) = (w.enemies.positions_x[i], w.enemies.positions_y[i]);
        let d = dist(x, y, 0.0, 0.0);
        assert!((4.0 - 0.001..=8.0 + 0.001).contains(&d), "{d}");
        assert!(w.frame_events.contains(&FrameEvent::Audio(AudioCue::Teleport)));
        assert!((w.enemies.states[i].last_teleport - 3.0).abs() < 0.001);

        // クールダウン中は追尾だけ
        step(&mut w, 0.5);
        let moved = dist(w.enemies.positions_x[i], w.enemies.positions_y[i], x, y);
        assert!((moved - 1.5).abs() < 0.01, "{moved}");
    }

    #[test]
    fn serpent_weaves_across_its_heading() {
        let mut w = run_with_seed(5);
        let i = spawn(&mut w, "serpent", 20.0, 0.0);
        let phase = w.enemies.states[i].wobble_phase;
        step(&mut w, 0.1);
        // 真っ直ぐ −x へ進みつつ、横揺れ分だけ y がずれる
        let lateral = (0.1_f32 * 4.0 + phase).sin() * 0.8;
        assert!((w.enemies.positions_x[i] - (20.0 - 0.5)).abs() < 0.001);
        assert!((w.enemies.positions_y[i] - (-lateral * 5.0 * 0.1)).abs() < 0.001);

        let basic = spawn(&mut w, "basic", 20.0, 0.0);
        step(&mut w, 0.1);
        assert_eq!(w.enemies.positions_y[basic], 0.0);
    }

    #[test]
    fn hive_trickles_one_minion_per_interval() {
        let mut w = run_with_seed(5);
        let i = spawn(&mut w, "hive", 20.0, 0.0);
        step(&mut w, 2.0);
        assert!(w.pending_spawns.is_empty());
        let (hx, hy) = (w.enemies.positions_x[i], w.enemies.positions_y[i]);
        step(&mut w, 1.0);
        assert_eq!(w.pending_spawns.len(), 1);
        let fast = w.tables.enemy_id("fast").unwrap();
        let s = &w.pending_spawns[0];
        assert_eq!(s.kind_id, fast);
        assert!((s.x - hx).abs() <= TRICKLE_SCATTER + 0.001);
        assert!((s.y - hy).abs() <= TRICKLE_SCATTER + 0.001);

        step(&mut w, 2.0);
        assert_eq!(w.pending_spawns.len(), 1);
        step(&mut w, 1.0);
        assert_eq!(w.pending_spawns.len(), 2);
    }

    /// 射撃と瞬間移動を表の中で逆順に並べた 2 種
    fn blinker_tables() -> GameTables {
        let mut file = TablesFile::default();
        let shooter = file.enemies.iter().find(|e| e.name == "shooter").unwrap().clone();
        let shoot = Ability::Shoot { range: 30.0, cooldown: 1.0, damage: 5.0, kite_range: 0.0, min_range: 0.0 };
        let teleport = Ability::Teleport { trigger_range: 30.0, range: 8.0, cooldown: 1.0 };
        for (name, abilities) in [
            ("blinker_a", vec![shoot.clone(), teleport.clone()]),
            ("blinker_b", vec![teleport, shoot]),
        ] {
            let mut e = shooter.clone();
            e.name = name.to_string();
            e.abilities = abilities;
            file.enemies.push(e);
        }
        GameTables::from_file(file).unwrap()
    }

    #[test]
    fn ability_order_in_table_does_not_change_behavior() {
        let mut outcomes = Vec::new();
        for name in ["blinker_a", "blinker_b"] {
            let mut w = run_with_tables(blinker_tables(), 9);
            let i = spawn(&mut w, name, 15.0, 0.0);
            step(&mut w, 1.0);
            // 瞬間移動が先なので弾は移動先から出る
            assert_eq!(w.enemy_projectiles.count, 1);
            let (x, y) = (w.enemies.positions_x[i], w.enemies.positions_y[i]);
            assert_eq!((w.enemy_projectiles.positions_x[0], w.enemy_projectiles.positions_y[0]), (x, y));
            outcomes.push((x, y, w.enemy_projectiles.velocities_x[0], w.enemy_projectiles.velocities_y[0]));
        }
        assert_eq!(outcomes[0], outcomes[1]);
    }
}
