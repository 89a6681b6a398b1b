//! Path: native/game_simulation/src/game_logic/systems/weapons.rs
//! Summary: 習得武器の更新と命中の適用（凍結・引き寄せ・炎の跡）

use game_core::util::{dist, normalize};

use super::combat::apply_player_hit;
use crate::hazard::HazardOwner;
use crate::weapons::{HitEffect, WeaponContext};
use crate::world::RunState;

pub(crate) fn update_weapons(w: &mut RunState, dt: f32) {
    let mut hits = std::mem::take(&mut w.weapon_hits);
    hits.clear();
    {
        let ctx = WeaponContext {
            dt,
            now:      w.elapsed,
            player_x: w.player.x,
            player_y: w.player.y,
            facing_x: w.player.facing_x,
            facing_y: w.player.facing_y,
            enemies:  &w.enemies,
            spatial:  &w.spatial,
            tables:   &w.tables,
        };
        w.weapons.update_all(&ctx, &mut |hit| hits.push(hit));
    }

    let now = w.elapsed;
    let (px, py) = (w.player.x, w.player.y);
    for hit in &hits {
        // 同じフレームで先に倒れた敵は id で引けない
        let Some(i) = w.enemies.index_of(hit.enemy_id) else {
            continue;
        };
        match hit.effect {
            HitEffect::None => {}
            HitEffect::Freeze(duration) => {
                let state = &mut w.enemies.states[i];
                state.frozen_until = state.frozen_until.max(now + duration);
            }
            HitEffect::Pull(distance) => {
                let (ex, ey) = (w.enemies.positions_x[i], w.enemies.positions_y[i]);
                if let Some((dx, dy)) = normalize(px - ex, py - ey) {
                    // プレイヤーを通り越さない
                    let step = distance.min(dist(ex, ey, px, py));
                    w.enemies.positions_x[i] += dx * step;
                    w.enemies.positions_y[i] += dy * step;
                }
            }
        }
        apply_player_hit(w, i, hit.damage);
    }
    w.weapon_hits = hits;

    for trail in w.weapons.take_fire_trails() {
        w.hazards.spawn_fire_trail(trail.x, trail.y, trail.radius, trail.damage, HazardOwner::Player);
    }
}
