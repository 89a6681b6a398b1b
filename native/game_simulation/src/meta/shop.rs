//! Path: native/game_simulation/src/meta/shop.rs
//! Summary: ソウルショップ（メタ強化の購入判定）

use game_core::meta_tables::MetaUpgradeDef;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShopError {
    #[error("unknown meta upgrade `{0}`")]
    UnknownUpgrade(String),
    #[error("`{0}` is already at max level")]
    MaxLevel(String),
    #[error("not enough souls (need {cost}, have {souls})")]
    InsufficientSouls { cost: u32, souls: u32 },
}

/// 1 レベル購入する。成功したら支払った価格を返す
pub fn purchase(
    defs: &[MetaUpgradeDef],
    levels: &mut FxHashMap<String, u32>,
    souls: &mut u32,
    id: &str,
) -> Result<u32, ShopError> {
    let def = defs
        .iter()
        .find(|d| d.id == id)
        .ok_or_else(|| ShopError::UnknownUpgrade(id.to_string()))?;
    let level = levels.get(id).copied().unwrap_or(0);
    if level >= def.max_level {
        return Err(ShopError::MaxLevel(id.to_string()));
    }
    let cost = def.cost(level);
    if *souls < cost {
        return Err(ShopError::InsufficientSouls { cost, souls: *souls });
    }
    *souls -= cost;
    levels.insert(id.to_string(), level + 1);
    Ok(cost)
}
