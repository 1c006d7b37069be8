use bevy::prelude::*;
use crate::economy::gold::format_money;
use crate::economy::shop::{
    buy_listings, sell_listings, ActiveShop, BuyRequestEvent, SellRequestEvent, ShopListing,
    ShopTab,
};
use crate::shared::*;

use super::menu_input::MenuAction;

/// Rows spawned for the item list; longer lists scroll under them.
const VISIBLE_ROWS: usize = 10;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct ShopScreenRoot;

#[derive(Component)]
pub struct ShopTitle;

#[derive(Component)]
pub struct ShopMoneyDisplay;

#[derive(Component)]
pub struct ShopModeText;

#[derive(Component)]
pub struct ShopListItem {
    pub index: usize,
}

#[derive(Component)]
pub struct ShopItemName {
    pub index: usize,
}

#[derive(Component)]
pub struct ShopItemPrice {
    pub index: usize,
}

// ═══════════════════════════════════════════════════════════════════════
// RULES
// ═══════════════════════════════════════════════════════════════════════

/// Rows on the active tab.
pub fn current_listings(
    shop: &ActiveShop,
    inventory: &Inventory,
    registry: &ItemRegistry,
) -> Vec<ShopListing> {
    match shop.tab {
        ShopTab::Buy => buy_listings(&shop.stock, registry),
        ShopTab::Sell => sell_listings(inventory, registry),
    }
}

pub fn tab_label(tab: ShopTab) -> &'static str {
    match tab {
        ShopTab::Buy => "[Tab] Mode: BUY",
        ShopTab::Sell => "[Tab] Mode: SELL",
    }
}

/// Keep the cursor inside a list of `len` rows.
pub fn clamp_cursor(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

/// First listing shown when `rows` rows are on screen, scrolled just far
/// enough that the cursor stays visible.
pub fn scroll_offset(cursor: usize, len: usize, rows: usize) -> usize {
    if rows == 0 {
        return 0;
    }
    let max_start = len.saturating_sub(rows);
    (cursor + 1).saturating_sub(rows).min(max_start)
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_shop_screen(mut commands: Commands, shop: Res<ActiveShop>, wallet: Res<Wallet>) {
    commands
        .spawn((
            ShopScreenRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
            GlobalZIndex(20),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(500.0),
                        height: Val::Px(420.0),
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::all(Val::Px(16.0)),
                        row_gap: Val::Px(8.0),
                        border: UiRect::all(Val::Px(3.0)),
                        overflow: Overflow::clip(),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.12, 0.1, 0.08, 0.95)),
                    BorderColor(Color::srgb(0.5, 0.4, 0.25)),
                ))
                .with_children(|panel| {
                    panel
                        .spawn(Node {
                            width: Val::Percent(100.0),
                            flex_direction: FlexDirection::Row,
                            justify_content: JustifyContent::SpaceBetween,
                            align_items: AlignItems::Center,
                            ..default()
                        })
                        .with_children(|title_row| {
                            title_row.spawn((
                                ShopTitle,
                                Text::new(shop.keeper_name.to_uppercase()),
                                TextFont {
                                    font_size: 22.0,
                                    ..default()
                                },
                                TextColor(Color::srgb(1.0, 0.9, 0.6)),
                            ));
                            title_row.spawn((
                                ShopMoneyDisplay,
                                Text::new(format_money(wallet.money)),
                                TextFont {
                                    font_size: 18.0,
                                    ..default()
                                },
                                TextColor(Color::srgb(1.0, 0.84, 0.0)),
                            ));
                        });

                    panel.spawn((
                        ShopModeText,
                        Text::new(tab_label(shop.tab)),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.7, 0.7, 0.7)),
                    ));

                    panel
                        .spawn(Node {
                            width: Val::Percent(100.0),
                            flex_direction: FlexDirection::Column,
                            flex_grow: 1.0,
                            row_gap: Val::Px(2.0),
                            overflow: Overflow::clip(),
                            ..default()
                        })
                        .with_children(|list| {
                            for i in 0..VISIBLE_ROWS {
                                list.spawn((
                                    ShopListItem { index: i },
                                    Node {
                                        width: Val::Percent(100.0),
                                        height: Val::Px(28.0),
                                        flex_direction: FlexDirection::Row,
                                        justify_content: JustifyContent::SpaceBetween,
                                        align_items: AlignItems::Center,
                                        padding: UiRect::horizontal(Val::Px(8.0)),
                                        ..default()
                                    },
                                    BackgroundColor(Color::srgba(0.2, 0.17, 0.14, 0.6)),
                                ))
                                .with_children(|row| {
                                    row.spawn((
                                        ShopItemName { index: i },
                                        Text::new(""),
                                        TextFont {
                                            font_size: 14.0,
                                            ..default()
                                        },
                                        TextColor(Color::WHITE),
                                    ));
                                    row.spawn((
                                        ShopItemPrice { index: i },
                                        Text::new(""),
                                        TextFont {
                                            font_size: 14.0,
                                            ..default()
                                        },
                                        TextColor(Color::srgb(1.0, 0.84, 0.0)),
                                    ));
                                });
                            }
                        });

                    panel.spawn((
                        Text::new("Up/Down: Select | Enter: Confirm | Tab: Buy/Sell | Esc: Close"),
                        TextFont {
                            font_size: 11.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.5, 0.5, 0.5)),
                    ));
                });
        });
}

pub fn despawn_shop_screen(mut commands: Commands, query: Query<Entity, With<ShopScreenRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn update_shop_display(
    shop: Res<ActiveShop>,
    wallet: Res<Wallet>,
    inventory: Res<Inventory>,
    item_registry: Res<ItemRegistry>,
    mut money_query: Query<&mut Text, With<ShopMoneyDisplay>>,
    mut mode_query: Query<
        &mut Text,
        (With<ShopModeText>, Without<ShopMoneyDisplay>, Without<ShopItemName>, Without<ShopItemPrice>),
    >,
    mut name_query: Query<
        (&ShopItemName, &mut Text),
        (Without<ShopMoneyDisplay>, Without<ShopModeText>, Without<ShopItemPrice>),
    >,
    mut price_query: Query<
        (&ShopItemPrice, &mut Text, &mut TextColor),
        (Without<ShopMoneyDisplay>, Without<ShopModeText>, Without<ShopItemName>),
    >,
    mut row_query: Query<(&ShopListItem, &mut BackgroundColor)>,
) {
    let listings = current_listings(&shop, &inventory, &item_registry);
    let start = scroll_offset(shop.cursor, listings.len(), VISIBLE_ROWS);

    for mut text in &mut money_query {
        **text = format_money(wallet.money);
    }
    for mut text in &mut mode_query {
        **text = tab_label(shop.tab).to_string();
    }

    for (name, mut text) in &mut name_query {
        **text = match listings.get(start + name.index) {
            Some(listing) if shop.tab == ShopTab::Sell => {
                format!("{} (x{})", listing.name, inventory.count(&listing.item_id))
            }
            Some(listing) => listing.name.clone(),
            None => String::new(),
        };
    }
    for (price, mut text, mut color) in &mut price_query {
        let Some(listing) = listings.get(start + price.index) else {
            **text = String::new();
            continue;
        };
        **text = format_money(listing.price);
        *color = match shop.tab {
            ShopTab::Buy if !wallet.can_afford(listing.price) => TextColor(Color::srgb(0.8, 0.3, 0.3)),
            ShopTab::Buy => TextColor(Color::srgb(1.0, 0.84, 0.0)),
            ShopTab::Sell => TextColor(Color::srgb(0.5, 0.9, 0.5)),
        };
    }

    for (item, mut bg) in &mut row_query {
        let index = start + item.index;
        *bg = if index == shop.cursor && index < listings.len() {
            BackgroundColor(Color::srgba(0.35, 0.3, 0.2, 0.9))
        } else {
            BackgroundColor(Color::srgba(0.2, 0.17, 0.14, 0.6))
        };
    }
}

pub fn shop_navigation(
    action: Res<MenuAction>,
    mut shop: ResMut<ActiveShop>,
    inventory: Res<Inventory>,
    item_registry: Res<ItemRegistry>,
    mut buy_events: EventWriter<BuyRequestEvent>,
    mut sell_events: EventWriter<SellRequestEvent>,
) {
    if action.switch_tab {
        shop.tab = shop.tab.toggled();
        shop.cursor = 0;
        return;
    }

    let listings = current_listings(&shop, &inventory, &item_registry);
    let len = listings.len();
    if action.move_down && shop.cursor + 1 < len {
        shop.cursor += 1;
    }
    if action.move_up && shop.cursor > 0 {
        shop.cursor -= 1;
    }
    shop.cursor = clamp_cursor(shop.cursor, len);

    if !action.activate {
        return;
    }
    let Some(listing) = listings.get(shop.cursor) else {
        return;
    };
    match shop.tab {
        ShopTab::Buy => {
            buy_events.send(BuyRequestEvent {
                item_id: listing.item_id.clone(),
            });
        }
        ShopTab::Sell => {
            sell_events.send(SellRequestEvent {
                item_id: listing.item_id.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_cursor() {
        assert_eq!(clamp_cursor(5, 3), 2);
        assert_eq!(clamp_cursor(1, 3), 1);
        assert_eq!(clamp_cursor(4, 0), 0);
    }

    #[test]
    fn test_scroll_keeps_cursor_on_screen() {
        assert_eq!(scroll_offset(0, 14, 10), 0);
        assert_eq!(scroll_offset(9, 14, 10), 0);
        assert_eq!(scroll_offset(10, 14, 10), 1);
        assert_eq!(scroll_offset(13, 14, 10), 4);
        // Short lists never scroll.
        assert_eq!(scroll_offset(3, 4, 10), 0);
        assert_eq!(scroll_offset(20, 14, 10), 4);

        // Every row past the first screen is reachable and visible.
        let len = 14;
        let mut cursor = 0;
        for _ in 0..len + 3 {
            cursor = clamp_cursor(cursor + 1, len);
            let start = scroll_offset(cursor, len, VISIBLE_ROWS);
            assert!(cursor >= start && cursor < start + VISIBLE_ROWS);
        }
        assert_eq!(cursor, len - 1);
    }

    #[test]
    fn test_tabs_list_different_rows() {
        let mut registry = ItemRegistry::default();
        crate::data::populate_items(&mut registry);
        let mut inventory = Inventory::default();
        inventory.add_item("milk", 2, 99);
        let mut shop = ActiveShop {
            stock: vec!["corn_seeds".into()],
            ..default()
        };
        let buy = current_listings(&shop, &inventory, &registry);
        assert_eq!(buy.len(), 1);
        assert_eq!(buy[0].item_id, "corn_seeds");

        shop.tab = ShopTab::Sell;
        let sell = current_listings(&shop, &inventory, &registry);
        assert_eq!(sell.len(), 1);
        assert_eq!(sell[0].item_id, "milk");
        assert_eq!(tab_label(shop.tab), "[Tab] Mode: SELL");
    }
}
