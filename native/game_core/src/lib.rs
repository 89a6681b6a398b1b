//! Path: native/game_core/src/lib.rs
//! Summary: ゲームコア共通ロジック（定数・データテーブル・ダメージ計算・物理プリミティブ）
//!
//! ラン状態を持たない純粋なデータと計算だけを置く。状態を持つシミュレーションは game_simulation 側。

pub mod config;
pub mod constants;
pub mod damage;
pub mod difficulty;
pub mod entity_params;
pub mod item;
pub mod meta_tables;
pub mod passive;
pub mod physics;
pub mod progression;
pub mod util;
pub mod weapon;
