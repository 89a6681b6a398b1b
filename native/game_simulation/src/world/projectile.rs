//! Path: native/game_simulation/src/world/projectile.rs
//! Summary: 弾 SoA（ProjectileWorld）と描画種別定数

/// 弾の描画種別（描画側に渡す kind 値）
pub const PROJECTILE_KIND_PLAYER:    u8 = 0;
pub const PROJECTILE_KIND_ENEMY:     u8 = 1;
/// ミラーが跳ね返した弾
pub const PROJECTILE_KIND_REFLECTED: u8 = 2;

/// 弾 SoA（Structure of Arrays）。プレイヤー弾・敵弾で別インスタンスを持つ
#[derive(Clone, Default)]
pub struct ProjectileWorld {
    pub positions_x:  Vec<f32>,
    pub positions_y:  Vec<f32>,
    pub velocities_x: Vec<f32>,
    pub velocities_y: Vec<f32>,
    pub damage:       Vec<f32>,
    pub lifetime:     Vec<f32>,
    pub alive:        Vec<bool>,
    /// 描画種別（PROJECTILE_KIND_* 定数）
    pub render_kind:  Vec<u8>,
    pub count:        usize,
    /// 空きスロットのスタック（O(1) で取得・返却）
    free_list:        Vec<usize>,
}

impl ProjectileWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[allow(clippy::too_many_arguments)]
    pub fn spawn(
        &mut self,
        x: f32,
        y: f32,
        vx: f32,
        vy: f32,
        damage: f32,
        lifetime: f32,
        render_kind: u8,
    ) -> usize {
        let i = if let Some(i) = self.free_list.pop() {
            self.positions_x[i]  = x;
            self.positions_y[i]  = y;
            self.velocities_x[i] = vx;
            self.velocities_y[i] = vy;
            self.damage[i]       = damage;
            self.lifetime[i]     = lifetime;
            self.alive[i]        = true;
            self.render_kind[i]  = render_kind;
            i
        } else {
            // フリーリストが空なら末尾に追加
            self.positions_x.push(x);
            self.positions_y.push(y);
            self.velocities_x.push(vx);
            self.velocities_y.push(vy);
            self.damage.push(damage);
            self.lifetime.push(lifetime);
            self.alive.push(true);
            self.render_kind.push(render_kind);
            self.positions_x.len() - 1
        };
        self.count += 1;
        i
    }

    pub fn kill(&mut self, i: usize) {
        if self.alive[i] {
            self.alive[i] = false;
            self.count = self.count.saturating_sub(1);
            self.free_list.push(i);
        }
    }

    /// 移動と寿命減算。寿命切れ・プレイフィールド外（`center` から `radius` 超）は消す
    pub fn advance(&mut self, dt: f32, center_x: f32, center_y: f32, radius: f32) {
        let r2 = radius * radius;
        for i in 0..self.len() {
            if !self.alive[i] {
                continue;
            }
            self.positions_x[i] += self.velocities_x[i] * dt;
            self.positions_y[i] += self.velocities_y[i] * dt;
            self.lifetime[i] -= dt;
            let dx = self.positions_x[i] - center_x;
            let dy = self.positions_y[i] - center_y;
            if self.lifetime[i] <= 0.0 || dx * dx + dy * dy > r2 {
                self.kill(i);
            }
        }
    }

    pub fn reset(&mut self) {
        self.free_list.clear();
        for i in (0..self.len()).rev() {
            self.alive[i] = false;
            self.free_list.push(i);
        }
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_by_lifetime_and_distance() {
        let mut p = ProjectileWorld::new();
        let slow = p.spawn(0.0, 0.0, 1.0, 0.0, 5.0, 0.5, PROJECTILE_KIND_PLAYER);
        let fast = p.spawn(0.0, 0.0, 100.0, 0.0, 5.0, 10.0, PROJECTILE_KIND_PLAYER);
        p.advance(0.4, 0.0, 0.0, 20.0);
        assert!(p.alive[slow]);
        assert!(!p.alive[fast]);
        p.advance(0.2, 0.0, 0.0, 20.0);
        assert!(!p.alive[slow]);
        assert!(p.is_empty());
    }
}
