//! Data layer: populates the registries at game startup.
//!
//! Runs in OnEnter(GameState::Loading), fills the ItemRegistry and the
//! merchant's ShopCatalog from the hard-coded design data in submodules,
//! then transitions the game into GameState::Playing.

mod items;
mod shops;

use bevy::prelude::*;
use crate::shared::*;

pub use items::populate_items;
pub use shops::populate_shop;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

fn load_all_data(
    mut item_registry: ResMut<ItemRegistry>,
    mut catalog: ResMut<ShopCatalog>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("[Data] Populating registries");

    populate_items(&mut item_registry);
    info!("[Data] Items loaded: {}", item_registry.items.len());

    populate_shop(&mut catalog);
    let missing: Vec<&ItemId> = catalog
        .items
        .iter()
        .filter(|id| item_registry.get(id).is_none())
        .collect();
    if !missing.is_empty() {
        warn!("[Data] Shop lists unknown items: {:?}", missing);
    }
    info!(
        "[Data] {} stocks {} items",
        catalog.shop_name,
        catalog.items.len()
    );

    next_state.set(GameState::Playing);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shop_item_is_registered() {
        let mut registry = ItemRegistry::default();
        let mut catalog = ShopCatalog::default();
        populate_items(&mut registry);
        populate_shop(&mut catalog);
        for id in &catalog.items {
            let def = registry.get(id).expect("shop item missing from registry");
            assert!(def.can_buy, "{} is stocked but not buyable", id);
        }
    }

    #[test]
    fn test_seed_chain_is_consistent() {
        let mut registry = ItemRegistry::default();
        populate_items(&mut registry);
        for def in registry.items.values().filter(|d| d.is_seed()) {
            let harvest = def.harvest_item.as_deref().expect("seed without harvest");
            assert!(registry.get(harvest).is_some());
            let seed = def.seed_item.as_deref().expect("seed without replant item");
            assert!(registry.get(seed).is_some());
        }
    }

    #[test]
    fn test_ids_match_keys() {
        let mut registry = ItemRegistry::default();
        populate_items(&mut registry);
        for (key, def) in &registry.items {
            assert_eq!(key, &def.id);
            assert!(def.max_stack >= 1);
        }
    }
}
