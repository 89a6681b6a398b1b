//! Path: native/game_simulation/src/game_logic/systems/player.rs
//! Summary: プレイヤー移動・ダッシュ・引き寄せの適用とアリーナ内クランプ

use game_core::constants::{
    ARENA_HALF_EXTENT, DASH_DISTANCE, DASH_INVULNERABLE_TIME, DASH_MAX_CHARGES, DASH_RECHARGE_TIME,
};
use game_core::util::normalize;

use crate::input::InputState;
use crate::world::{FrameEvent, RunState};

pub(crate) fn update_player(w: &mut RunState, input: &InputState, dt: f32) {
    let now = w.elapsed;

    // ダッシュのチャージ回復（1 回分ずつ）
    if w.player.dash_charges < DASH_MAX_CHARGES {
        w.player.dash_recharge += dt;
        if w.player.dash_recharge >= DASH_RECHARGE_TIME {
            w.player.dash_recharge -= DASH_RECHARGE_TIME;
            w.player.dash_charges += 1;
        }
    } else {
        w.player.dash_recharge = 0.0;
    }

    if w.player.is_frozen(now) {
        return;
    }

    let intent = normalize(input.move_x, input.move_y);
    if let Some((dx, dy)) = intent {
        let combo = w.combo.bonus(&w.tables.combo_tiers);
        let speed = w.player.stats.speed * w.powerups.speed_multiplier(now) * combo.speed_mult;
        w.player.x += dx * speed * dt;
        w.player.y += dy * speed * dt;
        w.player.facing_x = dx;
        w.player.facing_y = dy;
    }

    if input.dash && w.player.dash_charges > 0 {
        let (dx, dy) = intent.unwrap_or((w.player.facing_x, w.player.facing_y));
        w.player.x += dx * DASH_DISTANCE;
        w.player.y += dy * DASH_DISTANCE;
        w.player.dash_charges -= 1;
        w.player.invulnerable_until = w.player.invulnerable_until.max(now + DASH_INVULNERABLE_TIME);
        clamp_to_arena(w);
        w.frame_events.push(FrameEvent::PlayerDashed { x: w.player.x, y: w.player.y });
    }

    clamp_to_arena(w);
}

/// ヴォイドが溜めた引き寄せを反映する（凍結中も引かれる）
pub(crate) fn apply_pull(w: &mut RunState) {
    w.player.x += w.player.pull_x;
    w.player.y += w.player.pull_y;
    w.player.pull_x = 0.0;
    w.player.pull_y = 0.0;
    clamp_to_arena(w);
}

fn clamp_to_arena(w: &mut RunState) {
    w.player.x = w.player.x.clamp(-ARENA_HALF_EXTENT, ARENA_HALF_EXTENT);
    w.player.y = w.player.y.clamp(-ARENA_HALF_EXTENT, ARENA_HALF_EXTENT);
}
