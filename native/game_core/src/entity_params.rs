//! Path: native/game_core/src/entity_params.rs
//! Summary: 敵タイプのパラメータテーブル（能力はタグ付き enum の疎なリスト）
//!
//! 敵の種類は名前ではなく `kind_id`（テーブルの添字）で参照する。
//! 特殊能力は `Ability` の列として持ち、行動エンジンは名前ではなく能力でマッチする。

use serde::{Deserialize, Serialize};

/// レア度。ジェム価値・パワーアップ抽選率・撃破時ヒットストップを決める
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Rarity {
    #[default]
    Normal = 0,
    Elite  = 1,
    Boss   = 2,
}

impl Rarity {
    /// ジェム 1 個あたりの経験値
    pub fn gem_value(self) -> u32 {
        match self {
            Self::Normal => 1,
            Self::Elite  => 2,
            Self::Boss   => 3,
        }
    }

    pub fn powerup_drop_chance(self) -> f32 {
        match self {
            Self::Normal => 0.005,
            Self::Elite  => 0.15,
            Self::Boss   => 0.8,
        }
    }
}

/// 撃破時のジェム個数（min..=max の一様乱数）
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GemDrop {
    pub min: u32,
    pub max: u32,
}

/// 突進中に残す炎の軌跡
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrailParams {
    pub radius:  f32,
    pub damage:  f32,
    /// この距離を進むごとに 1 つ置く
    pub spacing: f32,
}

/// 特殊能力。各バリアントは必要なフィールドだけを持つ
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Ability {
    /// 死亡時に半径内のプレイヤーへ距離減衰ダメージ
    Explode { radius: f32, damage: f32 },
    /// 死亡時に子を円周上に生成
    Split { count: u32, child: String },
    /// 射程内かつ近接距離より外なら直進弾を撃つ。近すぎると後退する
    Shoot { range: f32, cooldown: f32, damage: f32, kite_range: f32, min_range: f32 },
    /// プレイヤーが trigger_range 以内ならプレイヤー近くへ瞬間移動
    Teleport { trigger_range: f32, range: f32, cooldown: f32 },
    /// 一定間隔で実体化/非実体化を切り替える（非実体中は弾が当たらない）
    Phase { interval: f32 },
    /// 溜め → 固定距離を高速突進
    Charge {
        trigger_range: f32,
        windup:        f32,
        speed:         f32,
        distance:      f32,
        cooldown:      f32,
        #[serde(default)]
        trail:         Option<TrailParams>,
    },
    /// 一定間隔で count 体の手下を周囲に召喚
    Summon { cooldown: f32, count: u32, minion: String, radius: f32 },
    /// 体力の前に削られる第 2 の体力。毎秒 regen 回復
    Shield { health: f32, regen: f32 },
    /// 接触ダメージの fraction 分だけ自分を回復
    LifeSteal { fraction: f32 },
    /// 体力割合が threshold を下回ると一度だけ強化
    Enrage { threshold: f32, speed_mult: f32, damage_mult: f32 },
    /// 範囲内のプレイヤーを duration 秒移動不能にする
    Freeze { range: f32, duration: f32, cooldown: f32 },
    /// 被弾前に chance の確率で弾を反射
    Reflect { chance: f32 },
    /// 追尾ベクトルに正弦波の横揺れを加える
    Zigzag { amplitude: f32, frequency: f32 },
    /// 近距離のプレイヤーを自分へ引き寄せる
    Pull { range: f32, strength: f32 },
    /// interval ごとに手下を 1 体ずつ生み出す
    Trickle { interval: f32, minion: String },
}

impl Ability {
    /// 毎フレームの評価順（小さいほど先）。読み込み時にこの順へ並べ替える
    pub fn priority(&self) -> u8 {
        match self {
            Ability::Phase { .. }    => 0,
            Ability::Teleport { .. } => 1,
            Ability::Charge { .. }   => 2,
            Ability::Summon { .. }   => 3,
            Ability::Freeze { .. }   => 4,
            Ability::Shoot { .. }    => 5,
            Ability::Zigzag { .. }   => 6,
            Ability::Pull { .. }     => 7,
            Ability::Trickle { .. }  => 8,
            // 常時・死亡時・被弾時・接触時に効くものは行動評価に関わらない
            Ability::Enrage { .. }
            | Ability::Shield { .. }
            | Ability::LifeSteal { .. }
            | Ability::Reflect { .. }
            | Ability::Explode { .. }
            | Ability::Split { .. } => 9,
        }
    }
}

/// ボス・中ボスの必殺技
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BossAttack {
    /// 自分の周囲に雑魚を円形に大量発生
    MassSpawn { minion: String, count: u32, radius: f32 },
    /// プレイヤーを囲むスポーンリングに増援
    Reinforcements { minion: String, count: u32 },
    /// プレイヤーの足元に溶岩プールを設置
    LavaPool,
}

/// 体力割合が threshold を下回っている間、cooldown ごとに attack を発動
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BossSpecial {
    pub threshold: f32,
    pub cooldown:  f32,
    pub attack:    BossAttack,
}

/// 敵タイプ記述子（不変）。`kind_id` はテーブル内の添字
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnemyParams {
    pub name:      String,
    pub max_hp:    f32,
    pub speed:     f32,
    /// 接触ダメージ
    pub damage:    f32,
    /// 描画スケール兼当たり判定のヒント
    pub scale:     f32,
    /// ティア内の重み付き抽選の重み（0 は通常スポーンしない）
    pub weight:    u32,
    pub rarity:    Rarity,
    pub gems:      GemDrop,
    #[serde(default)]
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub boss:      Option<BossSpecial>,
}

impl EnemyParams {
    pub fn is_boss(&self) -> bool {
        self.rarity == Rarity::Boss
    }

    pub fn shield(&self) -> Option<(f32, f32)> {
        self.abilities.iter().find_map(|a| match a {
            Ability::Shield { health, regen } => Some((*health, *regen)),
            _ => None,
        })
    }

    pub fn reflect_chance(&self) -> Option<f32> {
        self.abilities.iter().find_map(|a| match a {
            Ability::Reflect { chance } => Some(*chance),
            _ => None,
        })
    }

    pub fn life_steal(&self) -> Option<f32> {
        self.abilities.iter().find_map(|a| match a {
            Ability::LifeSteal { fraction } => Some(*fraction),
            _ => None,
        })
    }

    /// 他の敵タイプ名への参照（設定検証用）
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .abilities
            .iter()
            .filter_map(|a| match a {
                Ability::Split { child, .. }     => Some(child.as_str()),
                Ability::Summon { minion, .. }   => Some(minion.as_str()),
                Ability::Trickle { minion, .. }  => Some(minion.as_str()),
                _ => None,
            })
            .collect();
        if let Some(special) = &self.boss {
            match &special.attack {
                BossAttack::MassSpawn { minion, .. } | BossAttack::Reinforcements { minion, .. } => {
                    names.push(minion.as_str())
                }
                BossAttack::LavaPool => {}
            }
        }
        names
    }
}

// ─── 既定テーブル ─────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn enemy(
    name: &str,
    max_hp: f32,
    speed: f32,
    damage: f32,
    scale: f32,
    weight: u32,
    rarity: Rarity,
    gems: (u32, u32),
    abilities: Vec<Ability>,
) -> EnemyParams {
    EnemyParams {
        name: name.to_string(),
        max_hp,
        speed,
        damage,
        scale,
        weight,
        rarity,
        gems: GemDrop { min: gems.0, max: gems.1 },
        abilities,
        boss: None,
    }
}

fn boss_enrage() -> Ability {
    Ability::Enrage { threshold: 0.75, speed_mult: 1.5, damage_mult: 1.25 }
}

/// 出荷時の敵テーブル
pub fn default_enemies() -> Vec<EnemyParams> {
    use Rarity::*;
    let mut table = vec![
        enemy("basic",          30.0,  3.0, 10.0, 1.0, 40, Normal, (1, 2), vec![]),
        enemy("fast",           15.0,  7.0,  5.0, 0.8, 25, Normal, (1, 1), vec![]),
        enemy("tank",          100.0,  1.5, 25.0, 1.5, 15, Normal, (3, 5), vec![]),
        enemy("exploder",       25.0,  4.0,  8.0, 1.0, 20, Normal, (1, 2), vec![
            Ability::Explode { radius: 4.0, damage: 30.0 },
        ]),
        enemy("splitter",       40.0,  2.5, 12.0, 1.2, 15, Normal, (1, 1), vec![
            Ability::Split { count: 3, child: "splitter_child".to_string() },
        ]),
        enemy("splitter_child", 15.0,  5.0,  5.0, 0.6,  0, Normal, (1, 1), vec![]),
        enemy("shooter",        35.0,  2.0,  5.0, 1.0, 15, Normal, (2, 3), vec![
            Ability::Shoot { range: 15.0, cooldown: 2.0, damage: 15.0, kite_range: 8.0, min_range: 3.0 },
        ]),
        enemy("ghost",          20.0,  4.0, 15.0, 1.0, 10, Normal, (1, 2), vec![
            Ability::Phase { interval: 1.5 },
        ]),
        enemy("teleporter",     30.0,  3.0, 20.0, 1.0, 10, Normal, (1, 3), vec![
            Ability::Teleport { trigger_range: 20.0, range: 8.0, cooldown: 3.0 },
        ]),
        enemy("charger",        45.0,  2.5, 18.0, 1.1, 12, Normal, (1, 3), vec![
            Ability::Charge {
                trigger_range: 12.0,
                windup:        0.6,
                speed:         18.0,
                distance:      10.0,
                cooldown:      4.0,
                trail:         Some(TrailParams { radius: 1.2, damage: 8.0, spacing: 1.5 }),
            },
        ]),
        enemy("summoner",       60.0,  1.8,  8.0, 1.2,  8, Normal, (2, 4), vec![
            Ability::Summon { cooldown: 6.0, count: 3, minion: "fast".to_string(), radius: 2.5 },
        ]),
        enemy("guardian",       40.0,  2.2, 12.0, 1.2, 10, Normal, (2, 3), vec![
            Ability::Shield { health: 40.0, regen: 5.0 },
        ]),
        enemy("leech",          35.0,  3.5, 12.0, 1.0,  8, Normal, (1, 3), vec![
            Ability::LifeSteal { fraction: 0.5 },
        ]),
        enemy("berserker",      70.0,  3.0, 15.0, 1.2, 10, Normal, (2, 4), vec![
            Ability::Enrage { threshold: 0.5, speed_mult: 1.8, damage_mult: 1.5 },
        ]),
        enemy("frost",          30.0,  2.5,  6.0, 1.0,  8, Normal, (1, 3), vec![
            Ability::Freeze { range: 6.0, duration: 1.0, cooldown: 5.0 },
        ]),
        enemy("mirror",         35.0,  2.8, 10.0, 1.0,  8, Normal, (1, 3), vec![
            Ability::Reflect { chance: 0.3 },
        ]),
        enemy("serpent",        20.0,  5.0,  8.0, 0.9, 15, Normal, (1, 2), vec![
            Ability::Zigzag { amplitude: 0.8, frequency: 4.0 },
        ]),
        enemy("void",           50.0,  1.5, 10.0, 1.3,  6, Normal, (2, 3), vec![
            Ability::Pull { range: 10.0, strength: 3.0 },
        ]),
        enemy("hive",           80.0,  1.2, 10.0, 1.4,  6, Normal, (3, 4), vec![
            Ability::Trickle { interval: 3.0, minion: "fast".to_string() },
        ]),
        enemy("elite_basic",   150.0,  4.0, 20.0, 1.3, 20, Elite,  (3, 5), vec![]),
        enemy("elite_fast",     50.0, 10.0, 12.0, 1.0, 15, Elite,  (2, 3), vec![]),
        // 中ボス
        enemy("brute",         600.0,  2.5, 30.0, 2.0,  0, Elite,  (8, 12), vec![
            Ability::Charge {
                trigger_range: 15.0,
                windup:        0.8,
                speed:         16.0,
                distance:      12.0,
                cooldown:      5.0,
                trail:         None,
            },
            Ability::Enrage { threshold: 0.5, speed_mult: 1.4, damage_mult: 1.3 },
        ]),
        enemy("necromancer",   450.0,  1.8, 20.0, 1.8,  0, Elite,  (8, 12), vec![
            Ability::Summon { cooldown: 5.0, count: 4, minion: "basic".to_string(), radius: 3.0 },
            Ability::Shield { health: 150.0, regen: 10.0 },
        ]),
    ];

    let mut warlord = enemy("warlord", 500.0, 2.0, 40.0, 2.5, 0, Boss, (10, 19), vec![boss_enrage()]);
    warlord.boss = Some(BossSpecial {
        threshold: 0.4,
        cooldown:  8.0,
        attack:    BossAttack::MassSpawn { minion: "basic".to_string(), count: 8, radius: 4.0 },
    });
    let mut overlord = enemy("overlord", 900.0, 1.8, 45.0, 2.8, 0, Boss, (12, 20), vec![boss_enrage()]);
    overlord.boss = Some(BossSpecial {
        threshold: 0.5,
        cooldown:  10.0,
        attack:    BossAttack::Reinforcements { minion: "elite_fast".to_string(), count: 3 },
    });
    let mut inferno = enemy("inferno", 1200.0, 1.6, 50.0, 3.0, 0, Boss, (15, 24), vec![
        boss_enrage(),
        Ability::Shoot { range: 18.0, cooldown: 2.5, damage: 20.0, kite_range: 0.0, min_range: 4.0 },
    ]);
    inferno.boss = Some(BossSpecial {
        threshold: 0.5,
        cooldown:  6.0,
        attack:    BossAttack::LavaPool,
    });
    table.extend([warlord, overlord, inferno]);
    table
}
