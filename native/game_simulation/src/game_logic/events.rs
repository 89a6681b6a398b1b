//! Path: native/game_simulation/src/game_logic/events.rs
//! Summary: フレームイベントの drain（HUD・音・演出側が毎フレーム取り出す）

use crate::world::{FrameEvent, RunState};

/// このフレームで積まれたイベントを発生順に取り出す
pub(crate) fn drain_frame_events(w: &mut RunState) -> Vec<FrameEvent> {
    w.frame_events.drain(..).collect()
}
