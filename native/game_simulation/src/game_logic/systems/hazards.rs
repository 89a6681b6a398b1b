//! Path: native/game_simulation/src/game_logic/systems/hazards.rs
//! Summary: 環境ハザードの出現と、全ハザードの命中適用

use super::combat::{apply_raw_damage, damage_player};
use crate::hazard::{HazardHit, HazardTarget};
use crate::world::{AudioCue, DamageSource, FrameEvent, RunState};

pub(crate) fn update_hazards(w: &mut RunState, dt: f32) {
    if w.auto_spawn {
        let spawned = w.hazards.update_director(w.elapsed, dt, w.player.x, w.player.y, &mut w.rng);
        if let Some((kind, x, y)) = spawned {
            w.frame_events.push(FrameEvent::HazardSpawned { kind, x, y });
            w.frame_events.push(FrameEvent::Audio(AudioCue::Warning));
        }
    }

    let mut hits: Vec<HazardHit> = Vec::new();
    w.hazards.update(dt, w.player.x, w.player.y, &w.enemies, &mut |h| hits.push(h));

    for hit in hits {
        match hit.target {
            HazardTarget::Player => {
                damage_player(w, hit.damage, DamageSource::Hazard(hit.kind));
            }
            HazardTarget::Enemy(id) => {
                if let Some(i) = w.enemies.index_of(id) {
                    apply_raw_damage(w, i, hit.damage);
                }
            }
        }
    }
}
