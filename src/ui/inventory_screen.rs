use bevy::prelude::*;
use crate::shared::*;

use super::menu_input::MenuAction;

const COLS: usize = HOTBAR_SLOTS;
const ROWS: usize = INVENTORY_SLOTS / HOTBAR_SLOTS;

const SLOT_BG: Color = Color::srgba(0.2, 0.17, 0.14, 0.9);
const SLOT_BORDER: Color = Color::srgba(0.4, 0.35, 0.3, 0.7);
const CURSOR_BG: Color = Color::srgba(0.35, 0.3, 0.2, 0.95);
const CURSOR_BORDER: Color = Color::srgb(1.0, 0.84, 0.0);
const PICKED_BORDER: Color = Color::srgb(0.4, 0.8, 1.0);

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct InventoryScreenRoot;

#[derive(Component)]
pub struct InventorySlotBg {
    pub index: usize,
}

#[derive(Component)]
pub struct InventorySlotIcon {
    pub index: usize,
}

#[derive(Component)]
pub struct InventorySlotQuantity {
    pub index: usize,
}

#[derive(Component)]
pub struct InventoryDetailName;

#[derive(Component)]
pub struct InventoryDetailDescription;

/// Cursor position, plus the slot picked up for a swap.
#[derive(Resource, Default)]
pub struct InventoryUiState {
    pub cursor_slot: usize,
    pub picked: Option<usize>,
}

// ═══════════════════════════════════════════════════════════════════════
// RULES
// ═══════════════════════════════════════════════════════════════════════

/// Grid cursor movement; stops at the edges.
pub fn move_cursor(cur: usize, action: &MenuAction) -> usize {
    let (mut col, mut row) = (cur % COLS, cur / COLS);
    if action.move_right && col + 1 < COLS {
        col += 1;
    }
    if action.move_left && col > 0 {
        col -= 1;
    }
    if action.move_down && row + 1 < ROWS {
        row += 1;
    }
    if action.move_up && row > 0 {
        row -= 1;
    }
    row * COLS + col
}

/// First confirm picks a slot up, the second drops it onto the cursor by
/// swapping. Confirming on the picked slot puts it back.
pub fn confirm_slot(ui: &mut InventoryUiState, inventory: &mut Inventory) {
    match ui.picked.take() {
        None => ui.picked = Some(ui.cursor_slot),
        Some(from) if from != ui.cursor_slot => inventory.swap_slots(from, ui.cursor_slot),
        Some(_) => {}
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_inventory_screen(mut commands: Commands, inventory: Res<Inventory>) {
    commands.insert_resource(InventoryUiState {
        cursor_slot: inventory.selected_slot,
        picked: None,
    });

    commands
        .spawn((
            InventoryScreenRoot,
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
                        width: Val::Px(420.0),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(16.0)),
                        row_gap: Val::Px(8.0),
                        border: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.12, 0.1, 0.08, 0.95)),
                    BorderColor(Color::srgb(0.5, 0.4, 0.25)),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new("INVENTORY"),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.9, 0.6)),
                    ));
                    panel.spawn((
                        Text::new("WASD/Arrows: Move | Enter: Pick up / Swap | Tab/Esc: Close"),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.6, 0.6, 0.6)),
                    ));

                    for row in 0..ROWS {
                        panel
                            .spawn(Node {
                                flex_direction: FlexDirection::Row,
                                column_gap: Val::Px(4.0),
                                ..default()
                            })
                            .with_children(|row_node| {
                                for col in 0..COLS {
                                    let index = row * COLS + col;
                                    row_node
                                        .spawn((
                                            InventorySlotBg { index },
                                            Node {
                                                width: Val::Px(52.0),
                                                height: Val::Px(52.0),
                                                justify_content: JustifyContent::Center,
                                                align_items: AlignItems::Center,
                                                border: UiRect::all(Val::Px(2.0)),
                                                ..default()
                                            },
                                            BackgroundColor(SLOT_BG),
                                            BorderColor(SLOT_BORDER),
                                        ))
                                        .with_children(|slot| {
                                            slot.spawn((
                                                InventorySlotIcon { index },
                                                Node {
                                                    width: Val::Px(28.0),
                                                    height: Val::Px(28.0),
                                                    ..default()
                                                },
                                                BackgroundColor(Color::NONE),
                                            ));
                                            slot.spawn((
                                                InventorySlotQuantity { index },
                                                Text::new(""),
                                                TextFont {
                                                    font_size: 11.0,
                                                    ..default()
                                                },
                                                TextColor(Color::WHITE),
                                                Node {
                                                    position_type: PositionType::Absolute,
                                                    right: Val::Px(2.0),
                                                    bottom: Val::Px(0.0),
                                                    ..default()
                                                },
                                            ));
                                        });
                                }
                            });
                    }

                    panel.spawn((
                        InventoryDetailName,
                        Text::new(""),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.9, 0.6)),
                    ));
                    panel.spawn((
                        InventoryDetailDescription,
                        Text::new(""),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.8, 0.8, 0.8)),
                    ));
                });
        });
}

pub fn despawn_inventory_screen(
    mut commands: Commands,
    query: Query<Entity, With<InventoryScreenRoot>>,
) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<InventoryUiState>();
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn update_inventory_slots(
    inventory: Res<Inventory>,
    item_registry: Res<ItemRegistry>,
    mut icons: Query<(&InventorySlotIcon, &mut BackgroundColor)>,
    mut quantities: Query<(&InventorySlotQuantity, &mut Text)>,
) {
    for (icon, mut bg) in &mut icons {
        bg.0 = inventory
            .slots
            .get(icon.index)
            .and_then(|s| s.as_ref())
            .and_then(|s| item_registry.get(&s.item_id))
            .map(|def| def.icon_color())
            .unwrap_or(Color::NONE);
    }
    for (qty, mut text) in &mut quantities {
        **text = match inventory.slots.get(qty.index).and_then(|s| s.as_ref()) {
            Some(s) if s.quantity > 0 => format!("x{}", s.quantity),
            _ => String::new(),
        };
    }
}

#[allow(clippy::type_complexity)]
pub fn update_inventory_cursor(
    ui_state: Option<Res<InventoryUiState>>,
    inventory: Res<Inventory>,
    item_registry: Res<ItemRegistry>,
    mut slot_query: Query<(&InventorySlotBg, &mut BackgroundColor, &mut BorderColor)>,
    mut name_query: Query<&mut Text, With<InventoryDetailName>>,
    mut desc_query: Query<&mut Text, (With<InventoryDetailDescription>, Without<InventoryDetailName>)>,
) {
    let Some(ui_state) = ui_state else { return };
    for (slot, mut bg, mut border) in &mut slot_query {
        let (b, c) = if slot.index == ui_state.cursor_slot {
            (CURSOR_BG, CURSOR_BORDER)
        } else if Some(slot.index) == ui_state.picked {
            (SLOT_BG, PICKED_BORDER)
        } else {
            (SLOT_BG, SLOT_BORDER)
        };
        *bg = BackgroundColor(b);
        *border = BorderColor(c);
    }

    let def = inventory
        .slots
        .get(ui_state.cursor_slot)
        .and_then(|s| s.as_ref())
        .and_then(|s| item_registry.get(&s.item_id));
    for mut text in &mut name_query {
        **text = def.map(|d| d.name.clone()).unwrap_or_default();
    }
    for mut text in &mut desc_query {
        **text = def.map(|d| d.description.clone()).unwrap_or_default();
    }
}

pub fn inventory_navigation(
    action: Res<MenuAction>,
    mut ui_state: Option<ResMut<InventoryUiState>>,
    mut inventory: ResMut<Inventory>,
) {
    let Some(ref mut ui_state) = ui_state else { return };
    ui_state.cursor_slot = move_cursor(ui_state.cursor_slot, &action);
    if action.activate {
        confirm_slot(ui_state, &mut inventory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_stays_on_grid() {
        let right = MenuAction {
            move_right: true,
            ..default()
        };
        let down = MenuAction {
            move_down: true,
            ..default()
        };
        assert_eq!(move_cursor(0, &right), 1);
        assert_eq!(move_cursor(COLS - 1, &right), COLS - 1);
        assert_eq!(move_cursor(0, &down), COLS);
        let last = INVENTORY_SLOTS - 1;
        assert_eq!(move_cursor(last, &down), last);
    }

    #[test]
    fn test_confirm_twice_swaps_slots() {
        let mut inventory = Inventory::default();
        inventory.add_item("hoe", 1, 1);
        let mut ui = InventoryUiState::default();
        confirm_slot(&mut ui, &mut inventory);
        assert_eq!(ui.picked, Some(0));
        ui.cursor_slot = 7;
        confirm_slot(&mut ui, &mut inventory);
        assert_eq!(ui.picked, None);
        assert!(inventory.slots[0].is_none());
        assert_eq!(inventory.slots[7].as_ref().map(|s| s.item_id.as_str()), Some("hoe"));
    }
}
