use bevy::prelude::*;

use crate::config::GameBalance;
use crate::shared::*;

const KEEPER_COLOR: Color = Color::srgb(0.55, 0.3, 0.65);

// ─────────────────────────────────────────────────────────────────────────────
// Components & resources
// ─────────────────────────────────────────────────────────────────────────────

/// The merchant standing on the farm.
#[derive(Component, Debug, Clone)]
pub struct ShopKeeper {
    pub name: String,
    pub items_for_sale: Vec<ItemId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShopTab {
    #[default]
    Buy,
    Sell,
}

impl ShopTab {
    pub fn toggled(self) -> Self {
        match self {
            ShopTab::Buy => ShopTab::Sell,
            ShopTab::Sell => ShopTab::Buy,
        }
    }
}

/// The shop the player is currently trading with.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveShop {
    pub keeper_name: String,
    pub stock: Vec<ItemId>,
    pub tab: ShopTab,
    pub cursor: usize,
}

/// A single row on the current tab, enriched with item info for the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopListing {
    pub item_id: ItemId,
    pub name: String,
    pub price: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Events (internal: used to drive transactions from UI input)
// ─────────────────────────────────────────────────────────────────────────────

/// Fired by the UI when the player confirms a purchase of one item.
#[derive(Event, Debug, Clone)]
pub struct BuyRequestEvent {
    pub item_id: ItemId,
}

/// Fired by the UI when the player confirms selling one item.
#[derive(Event, Debug, Clone)]
pub struct SellRequestEvent {
    pub item_id: ItemId,
}

// ─────────────────────────────────────────────────────────────────────────────
// Rules
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuyOutcome {
    Bought { price: u32 },
    UnknownItem,
    NotForSale,
    CannotAfford,
    InventoryFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellOutcome {
    Sold { price: u32 },
    UnknownItem,
    NotSellable,
    NotOwned,
}

/// Items the merchant will sell, at their buy price.
pub fn buy_listings(stock: &[ItemId], registry: &ItemRegistry) -> Vec<ShopListing> {
    stock
        .iter()
        .filter_map(|id| registry.get(id))
        .filter(|def| def.can_buy)
        .map(|def| ShopListing {
            item_id: def.id.clone(),
            name: def.name.clone(),
            price: def.buy_price,
        })
        .collect()
}

/// One row per distinct sellable item the player carries.
pub fn sell_listings(inventory: &Inventory, registry: &ItemRegistry) -> Vec<ShopListing> {
    inventory
        .distinct_items()
        .iter()
        .filter_map(|id| registry.get(id))
        .filter(|def| def.can_sell)
        .map(|def| ShopListing {
            item_id: def.id.clone(),
            name: def.name.clone(),
            price: def.sell_price,
        })
        .collect()
}

pub fn check_buy(
    wallet: &Wallet,
    inventory: &Inventory,
    registry: &ItemRegistry,
    stock: &[ItemId],
    item_id: &str,
) -> BuyOutcome {
    let Some(def) = registry.get(item_id) else {
        return BuyOutcome::UnknownItem;
    };
    if !def.can_buy || !stock.iter().any(|id| id == item_id) {
        return BuyOutcome::NotForSale;
    }
    if !wallet.can_afford(def.buy_price) {
        return BuyOutcome::CannotAfford;
    }
    // Dry run on a copy so a full bag never costs money.
    let mut probe = inventory.clone();
    if probe.add_item(item_id, 1, def.max_stack) > 0 {
        return BuyOutcome::InventoryFull;
    }
    BuyOutcome::Bought {
        price: def.buy_price,
    }
}

pub fn check_sell(inventory: &Inventory, registry: &ItemRegistry, item_id: &str) -> SellOutcome {
    let Some(def) = registry.get(item_id) else {
        return SellOutcome::UnknownItem;
    };
    if !def.can_sell {
        return SellOutcome::NotSellable;
    }
    if !inventory.has(item_id, 1) {
        return SellOutcome::NotOwned;
    }
    SellOutcome::Sold {
        price: def.sell_price,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

pub fn spawn_shopkeeper(
    mut commands: Commands,
    mut events: EventReader<WorldBuiltEvent>,
    balance: Res<GameBalance>,
    catalog: Res<ShopCatalog>,
) {
    for _ in events.read() {
        let pos = Vec2::from(balance.world.shop_position);
        commands.spawn((
            ShopKeeper {
                name: catalog.shop_name.clone(),
                items_for_sale: catalog.items.clone(),
            },
            Interactable::new(InteractionKind::ShopKeeper),
            GameplayEntity,
            Sprite::from_color(KEEPER_COLOR, Vec2::new(0.8, 1.0)),
            Transform::from_xyz(pos.x, pos.y, Z_ACTOR),
        ));
        info!("[Economy] {} set up shop at {:?}", catalog.shop_name, pos);
    }
}

pub fn update_shopkeeper_prompts(mut keepers: Query<(&ShopKeeper, &mut Interactable)>) {
    for (keeper, mut interactable) in &mut keepers {
        let prompt = format!("Press E to trade with {}", keeper.name);
        if interactable.prompt != prompt || !interactable.available {
            interactable.set(prompt, true);
        }
    }
}

pub fn open_shop_on_interact(
    mut events: EventReader<InteractEvent>,
    keepers: Query<&ShopKeeper>,
    mut active_shop: ResMut<ActiveShop>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in events.read() {
        if event.kind != InteractionKind::ShopKeeper {
            continue;
        }
        let Ok(keeper) = keepers.get(event.target) else {
            continue;
        };
        *active_shop = ActiveShop {
            keeper_name: keeper.name.clone(),
            stock: keeper.items_for_sale.clone(),
            tab: ShopTab::Buy,
            cursor: 0,
        };
        next_state.set(GameState::Shop);
        info!("[Economy] Trading with {}", keeper.name);
    }
}

/// Processes BuyRequestEvents: the core purchase flow.
pub fn handle_buy(
    mut buy_events: EventReader<BuyRequestEvent>,
    wallet: Res<Wallet>,
    mut inventory: ResMut<Inventory>,
    registry: Res<ItemRegistry>,
    active_shop: Res<ActiveShop>,
    mut gold_writer: EventWriter<GoldChangeEvent>,
    mut pickup_writer: EventWriter<ItemPickupEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    // The wallet only changes once apply_gold_changes runs, so purchases in
    // the same frame are checked against what is left after the earlier ones.
    let mut budget = wallet.clone();
    for ev in buy_events.read() {
        let outcome = check_buy(&budget, &inventory, &registry, &active_shop.stock, &ev.item_id);
        let name = registry.name_of(&ev.item_id);
        match outcome {
            BuyOutcome::Bought { price } => {
                if let Err(e) = budget.remove(price as i64) {
                    warn!("[Economy] {}", e);
                    continue;
                }
                gold_writer.send(GoldChangeEvent {
                    amount: -(price as i32),
                    reason: format!("Bought {}", name),
                });
                inventory.add_item(&ev.item_id, 1, registry.max_stack(&ev.item_id));
                pickup_writer.send(ItemPickupEvent {
                    item_id: ev.item_id.clone(),
                    quantity: 1,
                });
            }
            BuyOutcome::CannotAfford => {
                toast_writer.send(ToastEvent {
                    message: "Not enough money".into(),
                    duration_secs: 2.0,
                });
            }
            BuyOutcome::InventoryFull => {
                toast_writer.send(ToastEvent {
                    message: "Inventory full".into(),
                    duration_secs: 2.0,
                });
            }
            BuyOutcome::NotForSale | BuyOutcome::UnknownItem => {
                warn!("[Economy] Buy failed for '{}': {:?}", ev.item_id, outcome);
            }
        }
    }
}

pub fn handle_sell(
    mut sell_events: EventReader<SellRequestEvent>,
    mut inventory: ResMut<Inventory>,
    registry: Res<ItemRegistry>,
    mut gold_writer: EventWriter<GoldChangeEvent>,
    mut removed_writer: EventWriter<ItemRemovedEvent>,
) {
    for ev in sell_events.read() {
        match check_sell(&inventory, &registry, &ev.item_id) {
            SellOutcome::Sold { price } => {
                if !inventory.remove_item(&ev.item_id, 1) {
                    continue;
                }
                removed_writer.send(ItemRemovedEvent {
                    item_id: ev.item_id.clone(),
                    quantity: 1,
                });
                gold_writer.send(GoldChangeEvent {
                    amount: price as i32,
                    reason: format!("Sold {}", registry.name_of(&ev.item_id)),
                });
            }
            other => warn!("[Economy] Sell failed for '{}': {:?}", ev.item_id, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ItemRegistry {
        let mut r = ItemRegistry::default();
        crate::data::populate_items(&mut r);
        r
    }

    fn stock() -> Vec<ItemId> {
        vec!["corn_seeds".into(), "sword".into(), "hoe".into()]
    }

    #[test]
    fn test_buy_listings_skip_unbuyable() {
        let listings = buy_listings(&stock(), &registry());
        let ids: Vec<&str> = listings.iter().map(|l| l.item_id.as_str()).collect();
        assert_eq!(ids, vec!["corn_seeds", "sword"]);
        assert_eq!(listings[0].price, 10);
    }

    #[test]
    fn test_sell_listings_are_distinct_and_sellable() {
        let mut inv = Inventory::default();
        inv.add_item("hoe", 1, 1);
        inv.add_item("corn", 3, 99);
        inv.slots[7] = Some(InventorySlot {
            item_id: "corn".into(),
            quantity: 2,
        });
        let listings = sell_listings(&inv, &registry());
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].item_id, "corn");
        assert_eq!(listings[0].price, 15);
    }

    #[test]
    fn test_check_buy() {
        let reg = registry();
        let inv = Inventory::default();
        let rich = Wallet { money: 500 };
        let poor = Wallet { money: 5 };
        assert_eq!(check_buy(&rich, &inv, &reg, &stock(), "sword"), BuyOutcome::Bought { price: 120 });
        assert_eq!(check_buy(&poor, &inv, &reg, &stock(), "sword"), BuyOutcome::CannotAfford);
        assert_eq!(check_buy(&rich, &inv, &reg, &stock(), "hoe"), BuyOutcome::NotForSale);
        assert_eq!(check_buy(&rich, &inv, &reg, &stock(), "milk"), BuyOutcome::NotForSale);
        assert_eq!(check_buy(&rich, &inv, &reg, &stock(), "dragon"), BuyOutcome::UnknownItem);
    }

    #[test]
    fn test_check_buy_full_bag() {
        let reg = registry();
        let mut inv = Inventory::default();
        for i in 0..inv.slots.len() {
            inv.slots[i] = Some(InventorySlot {
                item_id: "hoe".into(),
                quantity: 1,
            });
        }
        let wallet = Wallet { money: 500 };
        assert_eq!(check_buy(&wallet, &inv, &reg, &stock(), "corn_seeds"), BuyOutcome::InventoryFull);
    }

    #[test]
    fn test_check_sell() {
        let reg = registry();
        let mut inv = Inventory::default();
        inv.add_item("milk", 1, 99);
        inv.add_item("hoe", 1, 1);
        assert_eq!(check_sell(&inv, &reg, "milk"), SellOutcome::Sold { price: 25 });
        assert_eq!(check_sell(&inv, &reg, "hoe"), SellOutcome::NotSellable);
        assert_eq!(check_sell(&inv, &reg, "meat"), SellOutcome::NotOwned);
    }

    #[test]
    fn test_tab_toggle() {
        assert_eq!(ShopTab::Buy.toggled(), ShopTab::Sell);
        assert_eq!(ShopTab::Sell.toggled(), ShopTab::Buy);
    }
}
