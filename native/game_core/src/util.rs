//! Path: native/game_core/src/util.rs
//! Summary: 距離・角度・線分距離・スポーン位置などの共通ユーティリティ

use crate::physics::rng::SimpleRng;

/// 二乗距離（sqrt を避けて高速化）
#[inline]
pub fn dist_sq(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    dx * dx + dy * dy
}

#[inline]
pub fn dist(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    dist_sq(x1, y1, x2, y2).sqrt()
}

/// 単位ベクトル化。ゼロ長なら None
#[inline]
pub fn normalize(x: f32, y: f32) -> Option<(f32, f32)> {
    let len = (x * x + y * y).sqrt();
    if len > 0.0001 {
        Some((x / len, y / len))
    } else {
        None
    }
}

/// 角度差を [-π, π] に正規化
pub fn wrap_angle(mut a: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while a > PI {
        a -= TAU;
    }
    while a < -PI {
        a += TAU;
    }
    a
}

/// 点 (px, py) から原点 (ox, oy)・方向 (dx, dy)（単位ベクトル）・長さ len の線分までの距離。
/// 線分の後ろ側・先端より先は None（ビームの当たり判定用）
pub fn distance_along_ray(ox: f32, oy: f32, dx: f32, dy: f32, len: f32, px: f32, py: f32) -> Option<f32> {
    let rx = px - ox;
    let ry = py - oy;
    let along = rx * dx + ry * dy;
    if along < 0.0 || along > len {
        return None;
    }
    Some((rx * dy - ry * dx).abs())
}

/// プレイヤー周囲のリング上のランダム位置（min_dist〜max_dist）
pub fn spawn_position_around_player(
    rng: &mut SimpleRng,
    player_x: f32,
    player_y: f32,
    min_dist: f32,
    max_dist: f32,
) -> (f32, f32) {
    let angle = rng.next_f32() * std::f32::consts::TAU;
    let dist = min_dist + rng.next_f32() * (max_dist - min_dist);
    (
        player_x + angle.cos() * dist,
        player_y + angle.sin() * dist,
    )
}

/// 中心の周りに等間隔で `count` 点（分裂・召喚の配置用）
pub fn ring_positions(cx: f32, cy: f32, radius: f32, count: u32) -> Vec<(f32, f32)> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count.max(1) as f32 * std::f32::consts::TAU;
            (cx + angle.cos() * radius, cy + angle.sin() * radius)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_distance_is_perpendicular() {
        let d = distance_along_ray(0.0, 0.0, 1.0, 0.0, 10.0, 5.0, 0.7);
        assert!((d.unwrap() - 0.7).abs() < 0.001);
        assert!(distance_along_ray(0.0, 0.0, 1.0, 0.0, 10.0, -1.0, 0.0).is_none());
        assert!(distance_along_ray(0.0, 0.0, 1.0, 0.0, 10.0, 11.0, 0.0).is_none());
    }

    #[test]
    fn wrap_angle_range() {
        let a = wrap_angle(3.0 * std::f32::consts::PI);
        assert!((a.abs() - std::f32::consts::PI).abs() < 0.001);
        assert!((wrap_angle(-0.5) + 0.5).abs() < 0.001);
    }

    #[test]
    fn ring_positions_are_on_circle() {
        for (x, y) in ring_positions(2.0, -1.0, 1.5, 3) {
            assert!((dist(x, y, 2.0, -1.0) - 1.5).abs() < 0.001);
        }
        assert_eq!(ring_positions(0.0, 0.0, 1.0, 0).len(), 0);
    }

    #[test]
    fn spawn_position_within_ring() {
        let mut rng = SimpleRng::new(42);
        for _ in 0..100 {
            let (x, y) = spawn_position_around_player(&mut rng, 3.0, 4.0, 30.0, 40.0);
            let d = dist(x, y, 3.0, 4.0);
            assert!((29.99..=40.01).contains(&d));
        }
    }

    #[test]
    fn normalize_rejects_zero() {
        assert!(normalize(0.0, 0.0).is_none());
        let (x, y) = normalize(3.0, 4.0).unwrap();
        assert!((x - 0.6).abs() < 0.001 && (y - 0.8).abs() < 0.001);
    }
}
