//! Path: native/game_simulation/src/input.rs
//! Summary: 1 フレーム分のプレイヤー入力

/// ホストが毎フレーム渡す入力。移動は正規化前の意図ベクトル
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub move_x: f32,
    pub move_y: f32,
    /// このフレームでダッシュを押したか
    pub dash:   bool,
    /// このフレームで一時停止を押したか
    pub pause:  bool,
}

impl InputState {
    pub fn moving(move_x: f32, move_y: f32) -> Self {
        Self { move_x, move_y, ..Default::default() }
    }
}
