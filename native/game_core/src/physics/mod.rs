//! Path: native/game_core/src/physics/mod.rs
//! Summary: 物理プリミティブ（シード付き RNG・空間ハッシュ）

pub mod rng;
pub mod spatial_hash;
