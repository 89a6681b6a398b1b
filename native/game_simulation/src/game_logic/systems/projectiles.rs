//! Path: native/game_simulation/src/game_logic/systems/projectiles.rs
//! Summary: 自動攻撃（マルチショット）・プレイヤー弾 vs 敵（反射判定が先）・敵弾 vs プレイヤー

use game_core::constants::{
    BOSS_PROJECTILE_HIT_RADIUS, DESPAWN_RADIUS, ENEMY_PROJECTILE_HIT_RADIUS,
    ENEMY_PROJECTILE_LIFETIME, MULTISHOT_SPACING, PLAYER_PROJECTILE_LIFETIME, PLAYFIELD_RADIUS,
    PROJECTILE_HIT_RADIUS, REFLECT_DAMAGE_FACTOR,
};
use game_core::util::{dist_sq, normalize};

use super::combat::{apply_player_hit, damage_player};
use crate::game_logic::find_nearest_enemy_spatial;
use crate::world::{
    AudioCue, DamageSource, FrameEvent, RunState, PROJECTILE_KIND_PLAYER, PROJECTILE_KIND_REFLECTED,
};

/// `1 / attack_speed` 秒ごとに射程内の最近接（実体化中）の敵へ撃つ。
/// 標的がいない間は発射可能な状態で待つ
pub(crate) fn update_auto_attack(w: &mut RunState, dt: f32) {
    let stats = &w.player.stats;
    if stats.attack_speed <= 0.0 || w.player_dead {
        return;
    }
    let interval = 1.0 / stats.attack_speed;
    let (range, speed, count, damage) =
        (stats.attack_range, stats.projectile_speed, stats.projectile_count, stats.damage);
    let (px, py) = (w.player.x, w.player.y);

    w.player.attack_timer += dt;
    if w.player.attack_timer < interval {
        return;
    }
    let Some(target) =
        find_nearest_enemy_spatial(&w.spatial, &mut w.query_buf, &w.enemies, px, py, range, &[])
    else {
        w.player.attack_timer = interval;
        return;
    };
    w.player.attack_timer = (w.player.attack_timer - interval).min(interval);

    let (dx, dy) = normalize(w.enemies.positions_x[target] - px, w.enemies.positions_y[target] - py)
        .unwrap_or((w.player.facing_x, w.player.facing_y));
    // 照準に垂直な方向へ等間隔にずらす
    let (nx, ny) = (-dy, dx);
    let n = count.max(1);
    for k in 0..n {
        let offset = (k as f32 - (n - 1) as f32 / 2.0) * MULTISHOT_SPACING;
        w.projectiles.spawn(
            px + nx * offset,
            py + ny * offset,
            dx * speed,
            dy * speed,
            damage,
            PLAYER_PROJECTILE_LIFETIME,
            PROJECTILE_KIND_PLAYER,
        );
    }
    w.frame_events.push(FrameEvent::Audio(AudioCue::Shoot));
}

/// プレイヤー弾の移動と命中。1 発 1 体（貫通なし）
pub(crate) fn update_player_projectiles(w: &mut RunState, dt: f32) {
    w.projectiles.advance(dt, 0.0, 0.0, PLAYFIELD_RADIUS);

    for p in 0..w.projectiles.len() {
        if !w.projectiles.alive[p] {
            continue;
        }
        let (x, y) = (w.projectiles.positions_x[p], w.projectiles.positions_y[p]);
        w.spatial.query_nearby_into(x, y, BOSS_PROJECTILE_HIT_RADIUS, &mut w.query_buf);
        let enemies = &w.enemies;
        let tables = &w.tables;
        let hit = w.query_buf.iter().copied().find(|&i| {
            if !enemies.alive[i] || enemies.states[i].phased {
                return false;
            }
            let boss = tables.enemy(enemies.kind_ids[i]).is_some_and(|e| e.is_boss());
            let r = if boss { BOSS_PROJECTILE_HIT_RADIUS } else { PROJECTILE_HIT_RADIUS };
            dist_sq(enemies.positions_x[i], enemies.positions_y[i], x, y) <= r * r
        });
        let Some(i) = hit else {
            continue;
        };

        let damage = w.projectiles.damage[p];
        w.projectiles.kill(p);

        // ミラーは被弾前に確率で弾を送り返す
        let reflect = w.tables.enemy(w.enemies.kind_ids[i]).and_then(|e| e.reflect_chance());
        if let Some(chance) = reflect {
            if w.rng.chance(chance) {
                w.enemy_projectiles.spawn(
                    x,
                    y,
                    -w.projectiles.velocities_x[p],
                    -w.projectiles.velocities_y[p],
                    damage * REFLECT_DAMAGE_FACTOR,
                    ENEMY_PROJECTILE_LIFETIME,
                    PROJECTILE_KIND_REFLECTED,
                );
                w.frame_events.push(FrameEvent::ProjectileReflected { x, y });
                continue;
            }
        }
        apply_player_hit(w, i, damage);
    }
}

/// 敵弾（反射弾を含む）の移動とプレイヤーへの命中。クリティカル・吸収なし
pub(crate) fn update_enemy_projectiles(w: &mut RunState, dt: f32) {
    let (px, py) = (w.player.x, w.player.y);
    w.enemy_projectiles.advance(dt, px, py, DESPAWN_RADIUS);
    let r2 = ENEMY_PROJECTILE_HIT_RADIUS * ENEMY_PROJECTILE_HIT_RADIUS;
    for p in 0..w.enemy_projectiles.len() {
        if !w.enemy_projectiles.alive[p] {
            continue;
        }
        if dist_sq(w.enemy_projectiles.positions_x[p], w.enemy_projectiles.positions_y[p], px, py) > r2 {
            continue;
        }
        let damage = w.enemy_projectiles.damage[p];
        w.enemy_projectiles.kill(p);
        damage_player(w, damage, DamageSource::EnemyProjectile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::systems::test_support::{run_with_seed, run_with_tables};
    use crate::world::PROJECTILE_KIND_ENEMY;
    use game_core::config::GameTables;
    use game_core::entity_params::Ability;

    fn spawn(w: &mut RunState, name: &str, x: f32, y: f32) -> u32 {
        let kind = w.tables.enemy_id(name).unwrap();
        w.spawn_enemy(kind, x, y, 1.0).unwrap()
    }

    #[test]
    fn first_shot_waits_one_interval() {
        let mut w = run_with_seed(2);
        spawn(&mut w, "tank", 5.0, 0.0);
        w.rebuild_spatial();
        update_auto_attack(&mut w, 0.5);
        assert_eq!(w.projectiles.count, 0);
        update_auto_attack(&mut w, 0.5);
        assert_eq!(w.projectiles.count, 1);
        assert!(w.projectiles.velocities_x[0] > 0.0);
    }

    #[test]
    fn multishot_spreads_perpendicular() {
        let mut w = run_with_seed(2);
        w.player.stats.projectile_count = 3;
        spawn(&mut w, "tank", 5.0, 0.0);
        w.rebuild_spatial();
        update_auto_attack(&mut w, 1.0);
        let mut ys: Vec<f32> = (0..3).map(|p| w.projectiles.positions_y[p]).collect();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((ys[0] + MULTISHOT_SPACING).abs() < 0.001);
        assert!(ys[1].abs() < 0.001);
        assert!((ys[2] - MULTISHOT_SPACING).abs() < 0.001);
    }

    #[test]
    fn phased_targets_are_ignored() {
        let mut w = run_with_seed(2);
        let id = spawn(&mut w, "ghost", 5.0, 0.0);
        let i = w.enemies.index_of(id).unwrap();
        w.enemies.states[i].phased = true;
        w.rebuild_spatial();
        update_auto_attack(&mut w, 1.0);
        assert_eq!(w.projectiles.count, 0);

        // 実体化中の弾もすり抜ける
        w.projectiles.spawn(5.0, 0.0, 0.0, 0.0, 30.0, 1.0, PROJECTILE_KIND_PLAYER);
        update_player_projectiles(&mut w, 0.01);
        assert_eq!(w.enemies.hp[i], w.enemies.max_hp[i]);
    }

    #[test]
    fn projectile_hits_one_enemy_and_is_consumed() {
        let mut w = run_with_seed(2);
        let a = spawn(&mut w, "tank", 5.0, 0.0);
        let b = spawn(&mut w, "tank", 5.2, 0.0);
        w.rebuild_spatial();
        w.projectiles.spawn(5.1, 0.0, 0.0, 0.0, 30.0, 1.0, PROJECTILE_KIND_PLAYER);
        update_player_projectiles(&mut w, 0.01);
        let damaged = [a, b]
            .iter()
            .filter(|&&id| {
                let i = w.enemies.index_of(id).unwrap();
                w.enemies.hp[i] < w.enemies.max_hp[i]
            })
            .count();
        assert_eq!(damaged, 1);
        assert_eq!(w.projectiles.count, 0);
    }

    #[test]
    fn enemy_shot_hits_player() {
        let mut w = run_with_seed(2);
        w.enemy_projectiles.spawn(0.5, 0.0, -1.0, 0.0, 15.0, 3.0, PROJECTILE_KIND_ENEMY);
        update_enemy_projectiles(&mut w, 0.01);
        assert!((w.player.stats.health - 85.0).abs() < 0.001);
        assert!(w.enemy_projectiles.is_empty());
    }

    #[test]
    fn mirror_sends_the_shot_back_at_half_damage() {
        let mut tables = GameTables::default();
        let mirror = tables.enemy_id("mirror").unwrap();
        tables.enemies[mirror as usize].abilities = vec![Ability::Reflect { chance: 1.0 }];
        let mut w = run_with_tables(tables, 2);
        let id = spawn(&mut w, "mirror", 5.0, 0.0);
        let i = w.enemies.index_of(id).unwrap();
        w.rebuild_spatial();

        w.projectiles.spawn(4.9, 0.0, 10.0, 0.0, 30.0, 1.0, PROJECTILE_KIND_PLAYER);
        update_player_projectiles(&mut w, 0.01);

        assert_eq!(w.projectiles.count, 0);
        assert_eq!(w.enemies.hp[i], w.enemies.max_hp[i]);
        assert_eq!(w.enemy_projectiles.count, 1);
        assert_eq!(w.enemy_projectiles.velocities_x[0], -10.0);
        assert_eq!(w.enemy_projectiles.velocities_y[0], 0.0);
        assert!((w.enemy_projectiles.damage[0] - 30.0 * REFLECT_DAMAGE_FACTOR).abs() < 0.001);
        assert_eq!(w.enemy_projectiles.render_kind[0], PROJECTILE_KIND_REFLECTED);
        assert!(w.frame_events.iter().any(|e| matches!(e, FrameEvent::ProjectileReflected { .. })));
        assert!(!w.frame_events.iter().any(|e| matches!(e, FrameEvent::DamageDealt { .. })));
    }
}
