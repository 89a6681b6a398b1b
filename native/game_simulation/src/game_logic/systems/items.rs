//! Path: native/game_simulation/src/game_logic/systems/items.rs
//! Summary: 宝石の吸引・回収（ブーメラン巻き込み含む）とパワーアップの取得・消滅

use game_core::constants::{
    BASE_MAGNET_RANGE, GEM_PICKUP_RADIUS, MAGNET_PULL_BASE, MAGNET_PULL_SCALE, POWERUP_PICKUP_RADIUS,
};
use game_core::item::ItemKind;
use game_core::util::dist;

use super::leveling::gain_exp;
use crate::world::{AudioCue, FrameEvent, RunState};

/// 現在の吸引半径（基礎 × マグネット × パワーアップ × メタ）
pub(crate) fn magnet_range(w: &RunState) -> f32 {
    BASE_MAGNET_RANGE
        * w.passives.magnet_multiplier()
        * w.powerups.magnet_multiplier(w.elapsed)
        * w.bonuses.pickup_mult
}

pub(crate) fn update_items(w: &mut RunState, dt: f32) {
    let now = w.elapsed;
    let (px, py) = (w.player.x, w.player.y);
    let magnet = magnet_range(w);
    let sweeps = w.weapons.gem_sweeps();

    for i in 0..w.items.len() {
        if !w.items.alive[i] {
            continue;
        }
        let (x, y) = (w.items.positions_x[i], w.items.positions_y[i]);
        let d = dist(x, y, px, py);
        match w.items.kinds[i] {
            ItemKind::Gem => {
                let swept = sweeps.iter().any(|&(sx, sy, r)| dist(x, y, sx, sy) <= r);
                if d <= GEM_PICKUP_RADIUS || swept {
                    let value = w.items.value[i];
                    w.items.kill(i);
                    w.stats.gems_collected += 1;
                    w.frame_events.push(FrameEvent::GemCollected { value });
                    w.frame_events.push(FrameEvent::Audio(AudioCue::Pickup));
                    gain_exp(w, value);
                } else if d <= magnet {
                    // 近いほど速く吸い寄せる。プレイヤーを通り越さない
                    let speed = MAGNET_PULL_BASE + MAGNET_PULL_SCALE * (1.0 - d / magnet);
                    let step = (speed * dt).min(d);
                    w.items.positions_x[i] += (px - x) / d * step;
                    w.items.positions_y[i] += (py - y) / d * step;
                }
            }
            ItemKind::Powerup(kind) => {
                if d <= POWERUP_PICKUP_RADIUS {
                    w.items.kill(i);
                    w.powerups.activate(kind, now);
                    w.frame_events.push(FrameEvent::PowerupCollected { kind });
                    w.frame_events.push(FrameEvent::Audio(AudioCue::Powerup));
                    continue;
                }
                w.items.ttl[i] -= dt;
                if w.items.ttl[i] <= 0.0 {
                    w.items.kill(i);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::systems::test_support::run_with_seed;
    use game_core::item::PowerupKind;
    use game_core::weapon::WeaponKind;

    #[test]
    fn gems_are_pulled_then_collected() {
        let mut w = run_with_seed(9);
        let g = w.items.spawn_gem(4.0, 0.0, 3, 0.0);
        update_items(&mut w, 0.1);
        assert!(w.items.positions_x[g] < 4.0);
        for _ in 0..20 {
            update_items(&mut w, 0.1);
        }
        assert!(w.items.is_empty());
        assert_eq!(w.player.stats.exp, 3);
        assert_eq!(w.stats.gems_collected, 1);
    }

    #[test]
    fn gems_outside_magnet_stay_put() {
        let mut w = run_with_seed(9);
        let g = w.items.spawn_gem(8.0, 0.0, 1, 0.0);
        update_items(&mut w, 0.1);
        assert_eq!(w.items.positions_x[g], 8.0);

        w.powerups.activate(PowerupKind::MagnetPulse, 0.0);
        update_items(&mut w, 0.1);
        assert!(w.items.positions_x[g] < 8.0);
    }

    #[test]
    fn returning_boomerang_sweeps_distant_gems() {
        let mut w = run_with_seed(9);
        w.items.spawn_gem(20.0, 0.0, 2, 0.0);
        w.weapons.upgrade(WeaponKind::Boomerang, 5, false);
        // 敵がいなければ向き (+x) へ投げる
        w.rebuild_spatial();
        let mut t = 0.0;
        while t < 3.0 && !w.items.is_empty() {
            super::super::weapons::update_weapons(&mut w, 0.05);
            update_items(&mut w, 0.05);
            t += 0.05;
        }
        // 射程 9 では届かない
        assert!(!w.items.is_empty());

        let mut w = run_with_seed(9);
        w.items.spawn_gem(6.0, 0.0, 2, 0.0);
        w.weapons.upgrade(WeaponKind::Boomerang, 5, false);
        w.rebuild_spatial();
        let mut t = 0.0;
        while t < 3.0 && !w.items.is_empty() {
            super::super::weapons::update_weapons(&mut w, 0.05);
            update_items(&mut w, 0.05);
            t += 0.05;
        }
        assert!(w.items.is_empty());
        assert_eq!(w.player.stats.exp, 2);
    }

    #[test]
    fn powerups_activate_on_pickup_and_expire_on_the_ground() {
        let mut w = run_with_seed(9);
        w.items.spawn_powerup(1.0, 0.0, PowerupKind::DamageBoost, 0.0, 15.0);
        w.items.spawn_powerup(10.0, 0.0, PowerupKind::SpeedBoost, 0.0, 0.5);
        update_items(&mut w, 0.1);
        assert!(w.powerups.is_active(PowerupKind::DamageBoost, 0.0));
        assert_eq!(w.items.count, 1);
        for _ in 0..5 {
            update_items(&mut w, 0.1);
        }
        assert!(w.items.is_empty());
        assert!(!w.powerups.is_active(PowerupKind::SpeedBoost, 0.0));
    }
}
