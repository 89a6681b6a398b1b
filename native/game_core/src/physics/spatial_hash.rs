//! Path: native/game_core/src/physics/spatial_hash.rs
//! Summary: 空間ハッシュによる敵の近傍クエリ（弾・武器・ハザード判定の候補絞り込み）

use rustc_hash::FxHashMap;

/// 空セルを保持しておく上限
const MAX_RETAINED_CELLS: usize = 4096;

pub struct SpatialHash {
    pub cell_size: f32,
    cells: FxHashMap<(i32, i32), Vec<usize>>,
}

impl SpatialHash {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: FxHashMap::default(),
        }
    }

    /// セルの Vec は残したまま中身だけ空にする（毎フレーム再構築でも再確保しない）。
    /// プレイヤーが移動し続けると通過したセルが溜まるので、上限を超えたら
    /// 直前フレームで空だったセルを捨てる
    pub fn clear(&mut self) {
        if self.cells.len() > MAX_RETAINED_CELLS {
            self.cells.retain(|_, ids| !ids.is_empty());
        }
        for ids in self.cells.values_mut() {
            ids.clear();
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn insert(&mut self, id: usize, x: f32, y: f32) {
        let key = self.cell_key(x, y);
        self.cells.entry(key).or_default().push(id);
    }

    fn cell_key(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    /// 指定円を覆うセルに登録された ID を `buf` に書き込む（アロケーションなし）。
    /// セル単位の粗い判定なので、呼び出し側で距離判定を行うこと。
    pub fn query_nearby_into(&self, x: f32, y: f32, radius: f32, buf: &mut Vec<usize>) {
        buf.clear();
        let r = (radius / self.cell_size).ceil() as i32;
        let cx = (x / self.cell_size).floor() as i32;
        let cy = (y / self.cell_size).floor() as i32;
        for ix in (cx - r)..=(cx + r) {
            for iy in (cy - r)..=(cy + r) {
                if let Some(ids) = self.cells.get(&(ix, iy)) {
                    buf.extend_from_slice(ids);
                }
            }
        }
    }

    pub fn query_nearby(&self, x: f32, y: f32, radius: f32) -> Vec<usize> {
        let mut buf = Vec::new();
        self.query_nearby_into(x, y, radius, &mut buf);
        buf
    }
}
