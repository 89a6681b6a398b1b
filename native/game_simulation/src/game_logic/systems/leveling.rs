//! Path: native/game_simulation/src/game_logic/systems/leveling.rs
//! Summary: 経験値加算・レベルアップ判定・強化候補の抽選と適用

use game_core::constants::LEVEL_UP_CHOICES;
use game_core::passive::PassiveKind;
use game_core::progression::{next_exp_threshold, StatUpgrade};
use game_core::weapon::{UpgradeOutcome, WeaponKind};
use serde::Serialize;

use super::combat::heal_player;
use crate::world::{AudioCue, FrameEvent, RunState};

const MAX_HEALTH_STEP:      f32 = 20.0;
const SPEED_FACTOR:         f32 = 1.15;
const DAMAGE_STEP:          f32 = 10.0;
const ATTACK_SPEED_FACTOR:  f32 = 1.2;
const RANGE_STEP:           f32 = 3.0;
const HEAL_AMOUNT:          f32 = 50.0;
const PROJ_SPEED_FACTOR:    f32 = 1.25;

/// レベルアップ画面の 1 候補
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum UpgradeChoice {
    Stat(StatUpgrade),
    Weapon(WeaponKind),
    Passive(PassiveKind),
    /// 武器とその対パッシブが両方最大のときだけ出る
    Evolve(WeaponKind),
}

/// 宝石の経験値を倍率込みで加算し、上がったレベル数を返す。
/// しきい値を超えた分は次のレベルへ持ち越す
pub(crate) fn gain_exp(w: &mut RunState, value: u32) -> u32 {
    let combo = w.combo.bonus(&w.tables.combo_tiers);
    let mult = w.passives.exp_multiplier() * w.bonuses.exp_mult * combo.gem_mult;
    let amount = (value as f32 * mult).floor().max(0.0) as u32;

    let stats = &mut w.player.stats;
    stats.exp += amount;
    let mut gained = 0;
    while stats.exp >= stats.exp_to_level {
        stats.exp -= stats.exp_to_level;
        stats.exp_to_level = next_exp_threshold(stats.exp_to_level);
        stats.level += 1;
        gained += 1;
        w.frame_events.push(FrameEvent::LevelUp { new_level: stats.level });
    }
    if gained > 0 {
        let level = w.player.stats.level;
        w.pending_level_ups += gained;
        w.stats.record_level(level);
        w.frame_events.push(FrameEvent::Audio(AudioCue::LevelUp));
        log::debug!("level up -> {} ({} pending)", level, w.pending_level_ups);
    }
    gained
}

/// 候補を最大 `LEVEL_UP_CHOICES` 個抽選する。進化可能な武器は必ず先頭に並ぶ
pub(crate) fn roll_upgrade_choices(w: &mut RunState) -> Vec<UpgradeChoice> {
    let level = w.player.stats.level;
    let mut choices: Vec<UpgradeChoice> = Vec::with_capacity(LEVEL_UP_CHOICES);

    for kind in WeaponKind::ALL {
        let params = w.tables.weapon(kind);
        let paired_maxed = w.passives.is_maxed(params.paired_passive);
        if w.weapons.level(kind).can_evolve(params.max_level, paired_maxed) {
            choices.push(UpgradeChoice::Evolve(kind));
        }
    }
    choices.truncate(LEVEL_UP_CHOICES);

    let mut pool: Vec<UpgradeChoice> = StatUpgrade::ALL.iter().map(|&s| UpgradeChoice::Stat(s)).collect();
    for kind in WeaponKind::ALL {
        let params = w.tables.weapon(kind);
        if params.unlock_level <= level && w.weapons.level(kind).level < params.max_level {
            pool.push(UpgradeChoice::Weapon(kind));
        }
    }
    for kind in PassiveKind::ALL {
        if w.passives.params(kind).unlock_level <= level && !w.passives.is_maxed(kind) {
            pool.push(UpgradeChoice::Passive(kind));
        }
    }

    // Fisher-Yates
    for i in (1..pool.len()).rev() {
        let j = w.rng.range_u32(0, i as u32) as usize;
        pool.swap(i, j);
    }
    let room = LEVEL_UP_CHOICES - choices.len();
    choices.extend(pool.into_iter().take(room));
    choices
}

/// 選んだ強化を反映する。効果がなかった（最大済みなど）ときは false
pub(crate) fn apply_upgrade(w: &mut RunState, choice: UpgradeChoice) -> bool {
    match choice {
        UpgradeChoice::Stat(stat) => {
            apply_stat(w, stat);
            true
        }
        UpgradeChoice::Weapon(kind) | UpgradeChoice::Evolve(kind) => {
            let params = w.tables.weapon(kind);
            let (max_level, paired) = (params.max_level, params.paired_passive);
            let paired_maxed = w.passives.is_maxed(paired);
            match w.weapons.upgrade(kind, max_level, paired_maxed) {
                UpgradeOutcome::Leveled(level) => {
                    w.frame_events.push(FrameEvent::WeaponUpgraded { weapon: kind, level });
                    true
                }
                UpgradeOutcome::Evolved => {
                    log::debug!("weapon evolved: {}", kind.name());
                    w.frame_events.push(FrameEvent::WeaponEvolved { weapon: kind });
                    true
                }
                UpgradeOutcome::Unchanged => false,
            }
        }
        UpgradeChoice::Passive(kind) => {
            if !w.passives.upgrade(kind) {
                return false;
            }
            let level = w.passives.level(kind);
            w.frame_events.push(FrameEvent::PassiveUpgraded { passive: kind, level });
            true
        }
    }
}

fn apply_stat(w: &mut RunState, stat: StatUpgrade) {
    let s = &mut w.player.stats;
    match stat {
        StatUpgrade::MaxHealth => {
            s.max_health += MAX_HEALTH_STEP;
            heal_player(w, MAX_HEALTH_STEP);
        }
        StatUpgrade::Speed           => s.speed *= SPEED_FACTOR,
        StatUpgrade::Damage          => s.damage += DAMAGE_STEP,
        StatUpgrade::AttackSpeed     => s.attack_speed *= ATTACK_SPEED_FACTOR,
        StatUpgrade::Range           => s.attack_range += RANGE_STEP,
        StatUpgrade::MultiShot       => s.projectile_count += 1,
        StatUpgrade::Heal            => {
            heal_player(w, HEAL_AMOUNT);
        }
        StatUpgrade::ProjectileSpeed => s.projectile_speed *= PROJ_SPEED_FACTOR,
    }
}
