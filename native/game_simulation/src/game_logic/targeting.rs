//! Path: native/game_simulation/src/game_logic/targeting.rs
//! Summary: 最近接の敵探索（全探索版・Spatial Hash 版）

use game_core::physics::spatial_hash::SpatialHash;
use game_core::util::dist_sq;

use crate::world::EnemyWorld;

/// 狙える敵か（生存中かつ実体化中）
#[inline]
fn targetable(enemies: &EnemyWorld, i: usize, exclude: &[u32]) -> bool {
    i < enemies.len()
        && enemies.alive[i]
        && !enemies.states[i].phased
        && !exclude.contains(&enemies.ids[i])
}

/// `max_range` 以内で最も近い敵のスロット（全探索）
pub fn find_nearest_enemy(
    enemies: &EnemyWorld,
    px: f32,
    py: f32,
    max_range: f32,
    exclude: &[u32],
) -> Option<usize> {
    let max_sq = max_range * max_range;
    let mut min_dist = f32::MAX;
    let mut nearest  = None;
    for i in 0..enemies.len() {
        if !targetable(enemies, i, exclude) {
            continue;
        }
        let d = dist_sq(enemies.positions_x[i], enemies.positions_y[i], px, py);
        if d <= max_sq && d < min_dist {
            min_dist = d;
            nearest  = Some(i);
        }
    }
    nearest
}

/// Spatial Hash を使った最近接探索。ハッシュは同じフレームで再構築済みであること
pub fn find_nearest_enemy_spatial(
    spatial: &SpatialHash,
    buf: &mut Vec<usize>,
    enemies: &EnemyWorld,
    px: f32,
    py: f32,
    max_range: f32,
    exclude: &[u32],
) -> Option<usize> {
    spatial.query_nearby_into(px, py, max_range, buf);
    let max_sq = max_range * max_range;
    buf.iter()
        .copied()
        .filter(|&i| targetable(enemies, i, exclude))
        .map(|i| (i, dist_sq(enemies.positions_x[i], enemies.positions_y[i], px, py)))
        .filter(|&(_, d)| d <= max_sq)
        .min_by(|(_, da), (_, db)| da.partial_cmp(db).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
}
