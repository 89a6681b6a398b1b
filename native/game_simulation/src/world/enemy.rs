//! Path: native/game_simulation/src/world/enemy.rs
//! Summary: 敵 SoA（EnemyWorld）と個体ごとの能力ステート

use game_core::entity_params::EnemyParams;
use rustc_hash::FxHashMap;

/// 突進の状態機械: 待機 → 溜め → 直線突進 → 待機
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChargeState {
    Idle,
    Windup { remaining: f32, dir_x: f32, dir_y: f32 },
    Dashing { remaining: f32, dir_x: f32, dir_y: f32, trail_accum: f32 },
}

/// 個体ごとの能力タイマーとフラグ。
/// タイマーはすべて「最後に発動した時刻」で持ち、スポーン時刻で初期化する。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyState {
    pub shield:        f32,
    pub max_shield:    f32,
    pub phased:        bool,
    pub enraged:       bool,
    pub speed_mult:    f32,
    pub damage_mult:   f32,
    pub charge:        ChargeState,
    pub last_contact:  f32,
    pub last_shoot:    f32,
    pub last_teleport: f32,
    pub last_phase:    f32,
    pub last_charge:   f32,
    pub last_summon:   f32,
    pub last_trickle:  f32,
    pub last_freeze:   f32,
    pub last_special:  f32,
    /// 武器（進化ノヴァ）による凍結の解除時刻
    pub frozen_until:  f32,
    /// ジグザグの位相ずらし（群れが同期しないように）
    pub wobble_phase:  f32,
    pub spawn_time:    f32,
}

impl EnemyState {
    pub fn new(params: &EnemyParams, now: f32, wobble_phase: f32) -> Self {
        let (shield, _) = params.shield().unwrap_or((0.0, 0.0));
        Self {
            shield,
            max_shield:    shield,
            phased:        false,
            enraged:       false,
            speed_mult:    1.0,
            damage_mult:   1.0,
            charge:        ChargeState::Idle,
            last_contact:  f32::NEG_INFINITY,
            last_shoot:    now,
            last_teleport: now,
            last_phase:    now,
            last_charge:   now,
            last_summon:   now,
            last_trickle:  now,
            last_freeze:   now,
            last_special:  f32::NEG_INFINITY,
            frozen_until:  f32::NEG_INFINITY,
            wobble_phase,
            spawn_time:    now,
        }
    }
}

/// 敵 SoA（Structure of Arrays）
///
/// スロット添字はフレーム内の高速アクセス用、`ids` はフレームをまたいで
/// 個体を指すための安定 ID（スロット再利用後も別個体と取り違えない）。
#[derive(Clone, Default)]
pub struct EnemyWorld {
    pub positions_x: Vec<f32>,
    pub positions_y: Vec<f32>,
    pub hp:          Vec<f32>,
    pub max_hp:      Vec<f32>,
    pub kind_ids:    Vec<u8>,
    pub ids:         Vec<u32>,
    pub alive:       Vec<bool>,
    pub states:      Vec<EnemyState>,
    pub count:       usize,
    /// 空きスロットのスタック（O(1) で取得・返却）
    free_list:       Vec<usize>,
    id_index:        FxHashMap<u32, usize>,
    next_id:         u32,
}

impl EnemyWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// 1 体スポーンし、安定 ID を返す。体力は `hp_mult` 倍される
    pub fn spawn(
        &mut self,
        kind_id: u8,
        params: &EnemyParams,
        x: f32,
        y: f32,
        hp_mult: f32,
        state: EnemyState,
    ) -> (usize, u32) {
        self.next_id = self.next_id.wrapping_add(1);
        let id = self.next_id;
        let max_hp = params.max_hp * hp_mult.max(0.0);

        let i = if let Some(i) = self.free_list.pop() {
            // O(1): フリーリストから再利用
            self.positions_x[i] = x;
            self.positions_y[i] = y;
            self.hp[i]          = max_hp;
            self.max_hp[i]      = max_hp;
            self.kind_ids[i]    = kind_id;
            self.ids[i]         = id;
            self.alive[i]       = true;
            self.states[i]      = state;
            i
        } else {
            self.positions_x.push(x);
            self.positions_y.push(y);
            self.hp.push(max_hp);
            self.max_hp.push(max_hp);
            self.kind_ids.push(kind_id);
            self.ids.push(id);
            self.alive.push(true);
            self.states.push(state);
            self.positions_x.len() - 1
        };
        self.id_index.insert(id, i);
        self.count += 1;
        (i, id)
    }

    /// 生存中なら消去して true。二重 kill は false（死亡処理は 1 回だけ走る）
    pub fn kill(&mut self, i: usize) -> bool {
        if i >= self.len() || !self.alive[i] {
            return false;
        }
        self.alive[i] = false;
        self.count = self.count.saturating_sub(1);
        self.id_index.remove(&self.ids[i]);
        self.free_list.push(i);
        true
    }

    /// 安定 ID から現在のスロットを引く（死亡済みなら None）
    pub fn index_of(&self, id: u32) -> Option<usize> {
        self.id_index.get(&id).copied()
    }

    pub fn health_fraction(&self, i: usize) -> f32 {
        if self.max_hp[i] <= 0.0 {
            0.0
        } else {
            (self.hp[i] / self.max_hp[i]).clamp(0.0, 1.0)
        }
    }

    pub fn alive_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(move |&i| self.alive[i])
    }

    /// 全スロットをプールへ返す（容量と ID カウンタは保持）
    pub fn reset(&mut self) {
        self.free_list.clear();
        for i in (0..self.len()).rev() {
            self.alive[i] = false;
            self.free_list.push(i);
        }
        self.id_index.clear();
        self.count = 0;
    }
}
