//! Path: native/game_core/src/config.rs
//! Summary: データテーブルの JSON 読み込み・名前解決・起動時検証（ConfigError）
//!
//! 設定ミスはバランス崩れにしかならず、黙って既定値で埋めると気付けないため
//! 読み込み時点で失敗させる。

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::difficulty::{DifficultyTier, MiniBoss, MiniBossDef, SpawnTuning, TierDef};
use crate::entity_params::{default_enemies, Ability, EnemyParams};
use crate::meta_tables::{
    default_achievements, default_characters, default_meta_upgrades, AchievementDef,
    CharacterDef, MetaUpgradeDef,
};
use crate::passive::{default_passives, PassiveKind, PassiveParams};
use crate::progression::{default_combo_tiers, ComboTier};
use crate::weapon::{default_weapons, WeaponKind, WeaponParams};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse table file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{context} references unknown enemy type `{name}`")]
    UnknownEnemy { context: String, name: String },
    #[error("duplicate {table} entry `{name}`")]
    Duplicate { table: &'static str, name: String },
    #[error("{field} must be {expected} (got {value})")]
    InvalidValue { field: String, expected: &'static str, value: f32 },
    #[error("tier `{tier}` is not a superset of the previous tier (missing `{missing}`)")]
    TierNotSuperset { tier: String, missing: String },
    #[error("tiers must be sorted by time (`{tier}` at {time}s)")]
    TierOrder { tier: String, time: f32 },
    #[error("{0} table is empty")]
    Empty(&'static str),
    #[error("weapon table must list {0:?} exactly once, in kind order")]
    WeaponOrder(WeaponKind),
    #[error("passive table must list {0:?} exactly once, in kind order")]
    PassiveOrder(PassiveKind),
    #[error("too many enemy types ({0}); kind ids are u8")]
    TooManyEnemies(usize),
}

/// 編集可能なテーブルファイルの形（敵は名前で参照）
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TablesFile {
    pub enemies:       Vec<EnemyParams>,
    pub tiers:         Vec<TierDef>,
    /// ボスの出現順（周回する）
    pub bosses:        Vec<String>,
    pub mini_bosses:   Vec<MiniBossDef>,
    pub spawn:         SpawnTuning,
    pub weapons:       Vec<WeaponParams>,
    pub passives:      Vec<PassiveParams>,
    pub combo_tiers:   Vec<ComboTier>,
    pub meta_upgrades: Vec<MetaUpgradeDef>,
    pub characters:    Vec<CharacterDef>,
    pub achievements:  Vec<AchievementDef>,
}

fn tier(time: f32, name: &str, enemies: &[&str]) -> TierDef {
    TierDef {
        time,
        name: name.to_string(),
        enemies: enemies.iter().map(|s| s.to_string()).collect(),
    }
}

impl Default for TablesFile {
    fn default() -> Self {
        const I: &[&str] = &["basic", "fast"];
        const II: &[&str] = &["basic", "fast", "tank"];
        const III: &[&str] = &["basic", "fast", "tank", "exploder"];
        const IV: &[&str] = &["basic", "fast", "tank", "exploder", "splitter", "serpent"];
        const V: &[&str] = &["basic", "fast", "tank", "exploder", "splitter", "serpent", "shooter", "charger"];
        const VI: &[&str] = &[
            "basic", "fast", "tank", "exploder", "splitter", "serpent", "shooter", "charger",
            "ghost", "guardian", "frost",
        ];
        const VII: &[&str] = &[
            "basic", "fast", "tank", "exploder", "splitter", "serpent", "shooter", "charger",
            "ghost", "guardian", "frost", "teleporter", "summoner", "mirror", "leech",
        ];
        const VIII: &[&str] = &[
            "basic", "fast", "tank", "exploder", "splitter", "serpent", "shooter", "charger",
            "ghost", "guardian", "frost", "teleporter", "summoner", "mirror", "leech",
            "elite_basic", "elite_fast", "berserker", "void", "hive",
        ];
        Self {
            enemies: default_enemies(),
            tiers: vec![
                tier(0.0,   "I",    I),
                tier(30.0,  "II",   II),
                tier(60.0,  "III",  III),
                tier(90.0,  "IV",   IV),
                tier(120.0, "V",    V),
                tier(180.0, "VI",   VI),
                tier(240.0, "VII",  VII),
                tier(300.0, "VIII", VIII),
            ],
            bosses: vec!["warlord".to_string(), "overlord".to_string(), "inferno".to_string()],
            mini_bosses: vec![
                MiniBossDef {
                    enemy: "brute".to_string(),
                    schedule: crate::difficulty::ModuloSchedule { first: 45.0, interval: 120.0 },
                },
                MiniBossDef {
                    enemy: "necromancer".to_string(),
                    schedule: crate::difficulty::ModuloSchedule { first: 150.0, interval: 180.0 },
                },
            ],
            spawn: SpawnTuning::default(),
            weapons: default_weapons(),
            passives: default_passives(),
            combo_tiers: default_combo_tiers(),
            meta_upgrades: default_meta_upgrades(),
            characters: default_characters(),
            achievements: default_achievements(),
        }
    }
}

impl TablesFile {
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// 検証・名前解決済みのテーブル一式
#[derive(Clone, Debug)]
pub struct GameTables {
    /// 添字 = kind_id
    pub enemies:       Vec<EnemyParams>,
    pub tiers:         Vec<DifficultyTier>,
    pub bosses:        Vec<u8>,
    pub mini_bosses:   Vec<MiniBoss>,
    pub spawn:         SpawnTuning,
    /// 添字 = WeaponKind::index()
    pub weapons:       Vec<WeaponParams>,
    /// 添字 = PassiveKind::index()
    pub passives:      Vec<PassiveParams>,
    pub combo_tiers:   Vec<ComboTier>,
    pub meta_upgrades: Vec<MetaUpgradeDef>,
    pub characters:    Vec<CharacterDef>,
    pub achievements:  Vec<AchievementDef>,
    name_index:        FxHashMap<String, u8>,
}

impl Default for GameTables {
    fn default() -> Self {
        Self::from_file(TablesFile::default()).expect("built-in tables must validate")
    }
}

impl GameTables {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: TablesFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    pub fn from_file(mut file: TablesFile) -> Result<Self, ConfigError> {
        if file.enemies.is_empty() {
            return Err(ConfigError::Empty("enemies"));
        }
        if file.enemies.len() > u8::MAX as usize + 1 {
            return Err(ConfigError::TooManyEnemies(file.enemies.len()));
        }

        let mut name_index = FxHashMap::default();
        for (i, e) in file.enemies.iter().enumerate() {
            if name_index.insert(e.name.clone(), i as u8).is_some() {
                return Err(ConfigError::Duplicate { table: "enemies", name: e.name.clone() });
            }
        }
        let resolve = |context: &str, name: &str| -> Result<u8, ConfigError> {
            name_index.get(name).copied().ok_or_else(|| ConfigError::UnknownEnemy {
                context: context.to_string(),
                name: name.to_string(),
            })
        };

        // 表の記述順に関係なく固定の優先順で評価する
        for e in &mut file.enemies {
            e.abilities.sort_by_key(Ability::priority);
        }
        for e in &file.enemies {
            validate_enemy(e)?;
            for name in e.referenced_names() {
                resolve(&format!("enemy `{}`", e.name), name)?;
            }
        }

        if file.tiers.is_empty() {
            return Err(ConfigError::Empty("tiers"));
        }
        let mut tiers: Vec<DifficultyTier> = Vec::with_capacity(file.tiers.len());
        for def in &file.tiers {
            let context = format!("tier `{}`", def.name);
            let kind_ids = def
                .enemies
                .iter()
                .map(|n| resolve(&context, n))
                .collect::<Result<Vec<u8>, _>>()?;
            if !kind_ids.iter().any(|&k| file.enemies[k as usize].weight > 0) {
                return Err(ConfigError::InvalidValue {
                    field: format!("{context} total weight"),
                    expected: "positive",
                    value: 0.0,
                });
            }
            if let Some(prev) = tiers.last() {
                if def.time < prev.time {
                    return Err(ConfigError::TierOrder { tier: def.name.clone(), time: def.time });
                }
                if let Some(&missing) = prev.kind_ids.iter().find(|k| !kind_ids.contains(k)) {
                    return Err(ConfigError::TierNotSuperset {
                        tier: def.name.clone(),
                        missing: file.enemies[missing as usize].name.clone(),
                    });
                }
            }
            tiers.push(DifficultyTier { time: def.time, name: def.name.clone(), kind_ids });
        }

        let bosses = file
            .bosses
            .iter()
            .map(|n| resolve("boss roster", n))
            .collect::<Result<Vec<u8>, _>>()?;
        let mini_bosses = file
            .mini_bosses
            .iter()
            .map(|m| -> Result<MiniBoss, ConfigError> {
                positive("mini boss interval", m.schedule.interval)?;
                Ok(MiniBoss { kind_id: resolve("mini boss schedule", &m.enemy)?, schedule: m.schedule })
            })
            .collect::<Result<Vec<MiniBoss>, _>>()?;

        validate_spawn(&file.spawn)?;

        for (i, kind) in WeaponKind::ALL.iter().enumerate() {
            match file.weapons.get(i) {
                Some(w) if w.kind == *kind => validate_weapon(w)?,
                _ => return Err(ConfigError::WeaponOrder(*kind)),
            }
        }
        if file.weapons.len() != WeaponKind::ALL.len() {
            return Err(ConfigError::WeaponOrder(WeaponKind::OrbitalLaser));
        }
        for (i, kind) in PassiveKind::ALL.iter().enumerate() {
            match file.passives.get(i) {
                Some(p) if p.kind == *kind => {
                    if p.max_level == 0 {
                        return Err(ConfigError::InvalidValue {
                            field: format!("passive `{}` max_level", p.name),
                            expected: "at least 1",
                            value: 0.0,
                        });
                    }
                }
                _ => return Err(ConfigError::PassiveOrder(*kind)),
            }
        }
        if file.passives.len() != PassiveKind::ALL.len() {
            return Err(ConfigError::PassiveOrder(PassiveKind::ExpBonus));
        }

        for m in &file.meta_upgrades {
            if m.base_cost == 0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("meta upgrade `{}` base_cost", m.id),
                    expected: "positive",
                    value: 0.0,
                });
            }
            if !(m.cost_growth >= 1.0) {
                return Err(ConfigError::InvalidValue {
                    field: format!("meta upgrade `{}` cost_growth", m.id),
                    expected: "at least 1.0",
                    value: m.cost_growth,
                });
            }
        }
        unique("meta_upgrades", file.meta_upgrades.iter().map(|m| m.id.as_str()))?;
        unique("characters", file.characters.iter().map(|c| c.id.as_str()))?;
        unique("achievements", file.achievements.iter().map(|a| a.id.as_str()))?;
        if file.characters.is_empty() {
            return Err(ConfigError::Empty("characters"));
        }
        for c in &file.characters {
            positive(&format!("character `{}` health", c.id), c.health)?;
            positive(&format!("character `{}` attack_speed", c.id), c.attack_speed)?;
        }

        Ok(Self {
            enemies: file.enemies,
            tiers,
            bosses,
            mini_bosses,
            spawn: file.spawn,
            weapons: file.weapons,
            passives: file.passives,
            combo_tiers: file.combo_tiers,
            meta_upgrades: file.meta_upgrades,
            characters: file.characters,
            achievements: file.achievements,
            name_index,
        })
    }

    pub fn enemy(&self, kind_id: u8) -> Option<&EnemyParams> {
        self.enemies.get(kind_id as usize)
    }

    pub fn enemy_id(&self, name: &str) -> Option<u8> {
        self.name_index.get(name).copied()
    }

    pub fn weapon(&self, kind: WeaponKind) -> &WeaponParams {
        &self.weapons[kind.index()]
    }

    pub fn character(&self, id: &str) -> Option<&CharacterDef> {
        self.characters.iter().find(|c| c.id == id)
    }
}

fn positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field: field.to_string(), expected: "positive", value })
    }
}

fn non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field: field.to_string(), expected: "non-negative", value })
    }
}

fn unique<'a>(table: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<(), ConfigError> {
    let mut seen = rustc_hash::FxHashSet::default();
    for id in ids {
        if !seen.insert(id) {
            return Err(ConfigError::Duplicate { table, name: id.to_string() });
        }
    }
    Ok(())
}

fn validate_enemy(e: &EnemyParams) -> Result<(), ConfigError> {
    let field = |f: &str| format!("enemy `{}` {f}", e.name);
    positive(&field("max_hp"), e.max_hp)?;
    non_negative(&field("speed"), e.speed)?;
    non_negative(&field("damage"), e.damage)?;
    positive(&field("scale"), e.scale)?;
    if e.gems.min > e.gems.max {
        return Err(ConfigError::InvalidValue {
            field: field("gems.min"),
            expected: "at most gems.max",
            value: e.gems.min as f32,
        });
    }
    if let Some(special) = &e.boss {
        positive(&field("boss.cooldown"), special.cooldown)?;
        positive(&field("boss.threshold"), special.threshold)?;
    }
    Ok(())
}

fn validate_spawn(s: &SpawnTuning) -> Result<(), ConfigError> {
    positive("spawn.base_interval", s.base_interval)?;
    positive("spawn.min_interval", s.min_interval)?;
    non_negative("spawn.interval_decay_per_minute", s.interval_decay_per_minute)?;
    non_negative("spawn.health_scaling_per_minute", s.health_scaling_per_minute)?;
    positive("spawn.burst_growth_seconds", s.burst_growth_seconds)?;
    positive("spawn.boss_schedule.interval", s.boss_schedule.interval)?;
    positive("spawn.spawn_max_distance", s.spawn_max_distance)?;
    if s.spawn_min_distance > s.spawn_max_distance {
        return Err(ConfigError::InvalidValue {
            field: "spawn.spawn_min_distance".to_string(),
            expected: "at most spawn_max_distance",
            value: s.spawn_min_distance,
        });
    }
    Ok(())
}

fn validate_weapon(w: &WeaponParams) -> Result<(), ConfigError> {
    let field = |f: &str| format!("weapon `{}` {f}", w.name);
    if w.max_level == 0 {
        return Err(ConfigError::InvalidValue { field: field("max_level"), expected: "at least 1", value: 0.0 });
    }
    positive(&field("cooldown_floor"), w.cooldown_floor)?;
    positive(&field("evolved_damage_mult"), w.evolved_damage_mult)?;
    non_negative(&field("damage_base"), w.damage_base)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_validate() {
        let tables = GameTables::default();
        assert_eq!(tables.tiers.len(), 8);
        assert_eq!(tables.bosses.len(), 3);
        assert_eq!(tables.enemy_id("basic"), Some(0));
        assert!(tables.enemy_id("nope").is_none());
        let last = tables.tiers.last().unwrap();
        assert!(last.kind_ids.contains(&tables.enemy_id("elite_basic").unwrap()));
    }

    #[test]
    fn exported_json_loads_back() {
        let json = TablesFile::default().to_json_pretty().unwrap();
        let tables = GameTables::from_json(&json).unwrap();
        assert_eq!(tables.enemies.len(), GameTables::default().enemies.len());
    }

    #[test]
    fn missing_required_field_fails_fast() {
        let mut value = serde_json::to_value(TablesFile::default()).unwrap();
        value["enemies"][0].as_object_mut().unwrap().remove("max_hp");
        let err = GameTables::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err}");
    }

    #[test]
    fn unknown_split_child_is_rejected() {
        let mut file = TablesFile::default();
        let splitter = file.enemies.iter_mut().find(|e| e.name == "splitter").unwrap();
        splitter.abilities = vec![crate::entity_params::Ability::Split {
            count: 2,
            child: "ghost_child".to_string(),
        }];
        let err = GameTables::from_file(file).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnemy { ref name, .. } if name == "ghost_child"));
    }

    #[test]
    fn tier_must_be_superset() {
        let mut file = TablesFile::default();
        file.tiers[1].enemies.retain(|n| n != "fast");
        let err = GameTables::from_file(file).unwrap_err();
        assert!(matches!(err, ConfigError::TierNotSuperset { ref missing, .. } if missing == "fast"));
    }

    #[test]
    fn negative_health_is_rejected() {
        let mut file = TablesFile::default();
        file.enemies[0].max_hp = -5.0;
        assert!(matches!(
            GameTables::from_file(file),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn weapon_table_order_is_enforced() {
        let mut file = TablesFile::default();
        file.weapons.swap(0, 1);
        assert!(matches!(
            GameTables::from_file(file),
            Err(ConfigError::WeaponOrder(WeaponKind::OrbitingShields))
        ));
    }

    #[test]
    fn abilities_are_sorted_into_evaluation_order() {
        let mut file = TablesFile::default();
        let shooter = file.enemies.iter_mut().find(|e| e.name == "shooter").unwrap();
        shooter.abilities = vec![
            Ability::Trickle { interval: 3.0, minion: "fast".to_string() },
            Ability::Shoot { range: 15.0, cooldown: 2.0, damage: 15.0, kite_range: 8.0, min_range: 3.0 },
            Ability::Reflect { chance: 0.3 },
            Ability::Charge {
                trigger_range: 12.0,
                windup:        0.6,
                speed:         18.0,
                distance:      10.0,
                cooldown:      4.0,
                trail:         None,
            },
            Ability::Phase { interval: 1.5 },
        ];
        let tables = GameTables::from_file(file).unwrap();
        let shooter = tables.enemy(tables.enemy_id("shooter").unwrap()).unwrap();
        let order: Vec<u8> = shooter.abilities.iter().map(Ability::priority).collect();
        assert_eq!(order, vec![0, 2, 5, 8, 9]);
        assert!(matches!(shooter.abilities[0], Ability::Phase { .. }));
    }
}
