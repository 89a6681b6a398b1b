//! Path: native/game_simulation/src/game_logic/systems/combat.rs
//! Summary: ダメージ解決（与ダメ・被ダメ・回復）と撃破処理（分裂・爆発・ドロップ・ヒットストップ）

use std::sync::Arc;

use game_core::constants::{
    BOSS_DEATH_FREEZE, CRIT_MULTIPLIER, ELITE_DEATH_FREEZE, GEM_SCATTER, POWERUP_LIFETIME,
    REVIVE_HEALTH_FRACTION, REVIVE_INVULNERABLE_TIME, SPLIT_RING_RADIUS,
};
use game_core::damage::{linear_falloff, resolve_hit};
use game_core::entity_params::{Ability, Rarity};
use game_core::item::PowerupKind;
use game_core::util::{dist, ring_positions};

use crate::world::{AudioCue, DamageSource, FrameEvent, RunState};

/// メタ強化の被ダメージ軽減の上限
const MAX_META_REDUCTION: f32 = 0.9;
/// ボス撃破後のスローモーション
const BOSS_SLOW_DURATION: f32 = 1.0;
const BOSS_SLOW_SCALE:    f32 = 0.3;
/// 復活演出のスローモーション
const REVIVE_SLOW_DURATION: f32 = 0.5;
const REVIVE_SLOW_SCALE:    f32 = 0.3;

/// プレイヤー由来の 1 ヒット（弾・武器）。
/// パワーアップ・コンボ倍率 → クリティカル → シールド → 体力の順で解決し、撃破したら true
pub(crate) fn apply_player_hit(w: &mut RunState, i: usize, base: f32) -> bool {
    if i >= w.enemies.len() || !w.enemies.alive[i] {
        return false;
    }
    let now = w.elapsed;
    let crit = w
        .passives
        .roll_crit(w.bonuses.crit_chance, &mut w.rng)
        .then_some(CRIT_MULTIPLIER);
    let combo = w.combo.bonus(&w.tables.combo_tiers);
    let hit = resolve_hit(
        base,
        w.powerups.damage_multiplier(now),
        combo.damage_mult,
        crit,
        w.enemies.states[i].shield,
    );
    w.enemies.states[i].shield -= hit.absorbed;
    w.enemies.hp[i] -= hit.health_damage;
    w.stats.damage_dealt += hit.total;
    w.frame_events.push(FrameEvent::DamageDealt {
        enemy_id: w.enemies.ids[i],
        amount:   hit.total,
        x:        w.enemies.positions_x[i],
        y:        w.enemies.positions_y[i],
        crit:     hit.crit,
    });
    if hit.crit {
        w.frame_events.push(FrameEvent::Audio(AudioCue::Crit));
    }

    // ライフスティールはシールドに吸われた分も含めた着弾量から
    let heal = w.passives.life_steal_heal(hit.total);
    if heal > 0.0 {
        heal_player(w, heal);
    }

    if w.enemies.hp[i] <= 0.0 {
        handle_enemy_death(w, i);
        true
    } else {
        false
    }
}

/// 倍率・クリティカルなしのダメージ（ソーン・ハザード）。シールドは効く
pub(crate) fn apply_raw_damage(w: &mut RunState, i: usize, amount: f32) -> bool {
    if i >= w.enemies.len() || !w.enemies.alive[i] || amount <= 0.0 {
        return false;
    }
    let state = &mut w.enemies.states[i];
    let absorbed = amount.min(state.shield.max(0.0));
    state.shield -= absorbed;
    w.enemies.hp[i] -= amount - absorbed;
    w.stats.damage_dealt += amount;
    w.frame_events.push(FrameEvent::DamageDealt {
        enemy_id: w.enemies.ids[i],
        amount,
        x:        w.enemies.positions_x[i],
        y:        w.enemies.positions_y[i],
        crit:     false,
    });
    if w.enemies.hp[i] <= 0.0 {
        handle_enemy_death(w, i);
        true
    } else {
        false
    }
}

/// 撃破処理。スロットを消した最初の 1 回だけ報酬・死亡時効果が走る
pub(crate) fn handle_enemy_death(w: &mut RunState, i: usize) {
    let id = w.enemies.ids[i];
    let kind_id = w.enemies.kind_ids[i];
    let (x, y) = (w.enemies.positions_x[i], w.enemies.positions_y[i]);
    if !w.enemies.kill(i) {
        return;
    }
    w.hazards.forget_enemy(id);

    let tables = Arc::clone(&w.tables);
    let Some(params) = tables.enemy(kind_id) else {
        return;
    };
    let now = w.elapsed;

    // ── コンボ ────────────────────────────────────────────────
    let kill = w.combo.on_kill(&tables.combo_tiers);
    w.stats.max_combo = w.stats.max_combo.max(kill.count);
    if let Some(t) = kill.new_tier {
        let tier = &tables.combo_tiers[t];
        w.frame_events.push(FrameEvent::ComboMilestone { count: kill.count, tier: tier.name.clone() });
        if tier.heal > 0.0 {
            heal_player(w, tier.heal);
        }
    }

    w.stats.record_kill(params.rarity);
    w.player.stats.kill_count += 1;
    w.frame_events.push(FrameEvent::EnemyKilled { id, kind_id, rarity: params.rarity, x, y });

    // ── 死亡時能力 ────────────────────────────────────────────
    for ability in &params.abilities {
        match ability {
            Ability::Explode { radius, damage } => {
                w.frame_events.push(FrameEvent::Audio(AudioCue::Explosion));
                let d = dist(x, y, w.player.x, w.player.y);
                if d <= *radius {
                    damage_player(w, damage * linear_falloff(d, *radius, 1.0), DamageSource::Explosion);
                }
            }
            Ability::Split { count, child } => {
                if let Some(child_id) = tables.enemy_id(child) {
                    let hp_mult = tables.spawn.health_multiplier(now);
                    for (cx, cy) in ring_positions(x, y, SPLIT_RING_RADIUS, *count) {
                        w.queue_spawn(child_id, cx, cy, hp_mult);
                    }
                }
            }
            _ => {}
        }
    }

    // ── ドロップ ──────────────────────────────────────────────
    let gems = w.rng.range_u32(params.gems.min, params.gems.max);
    let value = params.rarity.gem_value();
    for _ in 0..gems {
        let gx = x + w.rng.range_f32(-GEM_SCATTER, GEM_SCATTER);
        let gy = y + w.rng.range_f32(-GEM_SCATTER, GEM_SCATTER);
        w.items.spawn_gem(gx, gy, value, now);
    }
    if w.rng.chance(params.rarity.powerup_drop_chance()) {
        let kinds = PowerupKind::ALL;
        let kind = kinds[w.rng.range_u32(0, kinds.len() as u32 - 1) as usize];
        w.items.spawn_powerup(x, y, kind, now, POWERUP_LIFETIME);
    }

    // ── ヒットストップ ────────────────────────────────────────
    match params.rarity {
        Rarity::Boss => {
            w.time.freeze(BOSS_DEATH_FREEZE);
            w.time.slow_motion(BOSS_SLOW_DURATION, BOSS_SLOW_SCALE);
            w.frame_events.push(FrameEvent::BossDefeated { kind_id });
            w.frame_events.push(FrameEvent::Audio(AudioCue::BossDefeated));
            log::debug!("boss defeated: {} at t={:.1}", params.name, now);
        }
        Rarity::Elite => w.time.freeze(ELITE_DEATH_FREEZE),
        Rarity::Normal => {}
    }
}

/// プレイヤーへの被ダメージ。無敵判定 → アーマー → メタ軽減の順で実際に受けた量を返す。
/// 致死なら復活を消費し、残っていなければ死亡フラグを立てる
pub(crate) fn damage_player(w: &mut RunState, raw: f32, source: DamageSource) -> f32 {
    if w.player_dead || raw <= 0.0 {
        return 0.0;
    }
    let now = w.elapsed;
    if now < w.player.invulnerable_until || w.powerups.invincible(now) {
        return 0.0;
    }
    let armored = w.passives.reduce_damage(raw);
    let applied = armored * (1.0 - w.bonuses.damage_reduction.clamp(0.0, MAX_META_REDUCTION));
    if applied <= 0.0 {
        return 0.0;
    }

    w.player.stats.health -= applied;
    w.stats.damage_taken += applied;
    w.frame_events.push(FrameEvent::PlayerDamaged { amount: applied, source });
    w.frame_events.push(FrameEvent::Audio(AudioCue::Hurt));
    if let Some(count) = w.combo.on_player_damaged() {
        w.frame_events.push(FrameEvent::ComboEnded { count });
    }

    if w.player.stats.health > 0.0 {
        w.stats.record_health(w.player.stats.health_fraction());
    } else if w.revivals_left > 0 {
        w.revivals_left -= 1;
        w.stats.revives_used += 1;
        w.player.stats.health = w.player.stats.max_health * REVIVE_HEALTH_FRACTION;
        w.player.invulnerable_until = now + REVIVE_INVULNERABLE_TIME;
        w.time.slow_motion(REVIVE_SLOW_DURATION, REVIVE_SLOW_SCALE);
        w.frame_events.push(FrameEvent::PlayerRevived);
        log::info!("player revived ({} left)", w.revivals_left);
    } else {
        w.player.stats.health = 0.0;
        w.player_dead = true;
        w.frame_events.push(FrameEvent::Audio(AudioCue::Death));
    }
    applied
}

/// 最大体力を超えない範囲で回復し、実際の回復量を返す
pub(crate) fn heal_player(w: &mut RunState, amount: f32) -> f32 {
    if w.player_dead || amount <= 0.0 {
        return 0.0;
    }
    let stats = &mut w.player.stats;
    let before = stats.health;
    stats.health = (stats.health + amount).min(stats.max_health);
    let healed = stats.health - before;
    if healed > 0.0 {
        w.stats.damage_healed += healed;
        w.frame_events.push(FrameEvent::PlayerHealed { amount: healed });
    }
    healed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::systems::test_support::run_with_seed;
    use game_core::meta_tables::MetaBonuses;
    use game_core::passive::PassiveKind;

    #[test]
    fn death_runs_once_and_drops_gems() {
        let mut w = run_with_seed(3);
        let basic = w.tables.enemy_id("basic").unwrap();
        w.spawn_enemy(basic, 5.0, 0.0, 1.0);
        let i = w.enemies.index_of(1).unwrap();

        assert!(apply_player_hit(&mut w, i, 1000.0));
        assert!(!apply_player_hit(&mut w, i, 1000.0));
        handle_enemy_death(&mut w, i);
        assert_eq!(w.stats.total_kills(), 1);
        assert_eq!(w.combo.count(), 1);
        assert!(w.items.gem_count() >= 1);
        let kills = w
            .frame_events
            .iter()
            .filter(|e| matches!(e, FrameEvent::EnemyKilled { .. }))
            .count();
        assert_eq!(kills, 1);
    }

    #[test]
    fn shield_absorbs_before_health() {
        let mut w = run_with_seed(3);
        let guardian = w.tables.enemy_id("guardian").unwrap();
        w.spawn_enemy(guardian, 5.0, 0.0, 1.0);
        let i = w.enemies.index_of(1).unwrap();
        let hp = w.enemies.hp[i];
        apply_raw_damage(&mut w, i, 30.0);
        assert_eq!(w.enemies.hp[i], hp);
        assert!((w.enemies.states[i].shield - 10.0).abs() < 0.001);
        apply_raw_damage(&mut w, i, 15.0);
        assert!((w.enemies.hp[i] - (hp - 5.0)).abs() < 0.001);
    }

    #[test]
    fn splitter_queues_children_in_a_ring() {
        let mut w = run_with_seed(3);
        let splitter = w.tables.enemy_id("splitter").unwrap();
        w.spawn_enemy(splitter, 10.0, 0.0, 1.0);
        let i = w.enemies.index_of(1).unwrap();
        handle_enemy_death(&mut w, i);
        assert_eq!(w.pending_spawns.len(), 3);
        let child = w.tables.enemy_id("splitter_child").unwrap();
        for s in &w.pending_spawns {
            assert_eq!(s.kind_id, child);
            assert!((dist(s.x, s.y, 10.0, 0.0) - SPLIT_RING_RADIUS).abs() < 0.001);
        }
    }

    #[test]
    fn armor_then_meta_reduction() {
        let mut w = run_with_seed(3);
        w.bonuses = MetaBonuses { damage_reduction: 0.5, ..Default::default() };
        w.passives.upgrade(PassiveKind::Armor);
        let expected = w.passives.reduce_damage(20.0) * 0.5;
        let applied = damage_player(&mut w, 20.0, DamageSource::Explosion);
        assert!((applied - expected).abs() < 0.001);
        assert!((w.player.stats.health - (100.0 - expected)).abs() < 0.001);
    }

    #[test]
    fn lethal_hit_consumes_revival() {
        let mut w = run_with_seed(3);
        w.revivals_left = 1;
        damage_player(&mut w, 500.0, DamageSource::Explosion);
        assert!(!w.player_dead);
        assert!((w.player.stats.health - 50.0).abs() < 0.001);
        assert!(w.frame_events.contains(&FrameEvent::PlayerRevived));

        // 復活直後は無敵
        assert_eq!(damage_player(&mut w, 500.0, DamageSource::Explosion), 0.0);
        w.elapsed += REVIVE_INVULNERABLE_TIME + 0.1;
        damage_player(&mut w, 500.0, DamageSource::Explosion);
        assert!(w.player_dead);
        assert_eq!(w.player.stats.health, 0.0);
    }

    #[test]
    fn heal_is_capped() {
        let mut w = run_with_seed(3);
        w.player.stats.health = 90.0;
        assert!((heal_player(&mut w, 50.0) - 10.0).abs() < 0.001);
        assert_eq!(heal_player(&mut w, 5.0), 0.0);
    }

    fn dealt(w: &RunState) -> Vec<(f32, bool)> {
        w.frame_events
            .iter()
            .filter_map(|e| match e {
                FrameEvent::DamageDealt { amount, crit, .. } => Some((*amount, *crit)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn guaranteed_crit_doubles_the_hit() {
        let mut w = run_with_seed(3);
        let tank = w.tables.enemy_id("tank").unwrap();
        w.spawn_enemy(tank, 5.0, 0.0, 1.0);
        let i = w.enemies.index_of(1).unwrap();
        let hp = w.enemies.hp[i];

        apply_player_hit(&mut w, i, 10.0);
        w.bonuses.crit_chance = 1.0;
        apply_player_hit(&mut w, i, 10.0);

        let hits = dealt(&w);
        assert_eq!(hits.len(), 2);
        assert!(!hits[0].1);
        assert!(hits[1].1);
        assert!((hits[1].0 - hits[0].0 * CRIT_MULTIPLIER).abs() < 0.001);
        assert!((w.enemies.hp[i] - (hp - hits[0].0 - hits[1].0)).abs() < 0.001);
        assert!(w.frame_events.contains(&FrameEvent::Audio(AudioCue::Crit)));
    }

    #[test]
    fn life_steal_heals_from_player_hits() {
        let mut w = run_with_seed(3);
        w.passives.upgrade(PassiveKind::LifeSteal);
        w.player.stats.health = 50.0;
        let tank = w.tables.enemy_id("tank").unwrap();
        w.spawn_enemy(tank, 5.0, 0.0, 1.0);
        let i = w.enemies.index_of(1).unwrap();

        apply_player_hit(&mut w, i, 20.0);
        let amount = dealt(&w)[0].0;
        let heal = w.passives.life_steal_heal(amount);
        assert!(heal > 0.0);
        assert!((w.player.stats.health - (50.0 + heal)).abs() < 0.001);
        assert!(w.frame_events.iter().any(|e| matches!(e, FrameEvent::PlayerHealed { .. })));
    }

    #[test]
    fn exploder_blast_falls_off_with_distance() {
        let mut w = run_with_seed(3);
        let exploder = w.tables.enemy_id("exploder").unwrap();

        // 半径 4.0 の外なら無傷
        let far = w.spawn_enemy(exploder, 5.0, 0.0, 1.0).unwrap();
        let idx = w.enemies.index_of(far).unwrap();
        handle_enemy_death(&mut w, idx);
        assert_eq!(w.player.stats.health, 100.0);
        assert!(w.frame_events.contains(&FrameEvent::Audio(AudioCue::Explosion)));

        // 距離 2.0 で 30 × (1 − 2/4)
        let near = w.spawn_enemy(exploder, 2.0, 0.0, 1.0).unwrap();
        let idx = w.enemies.index_of(near).unwrap();
        handle_enemy_death(&mut w, idx);
        assert!((w.player.stats.health - 85.0).abs() < 0.001);
        assert!(w.frame_events.iter().any(|e| matches!(
            e,
            FrameEvent::PlayerDamaged { amount, source: DamageSource::Explosion } if (amount - 15.0).abs() < 0.001
        )));
    }
}
