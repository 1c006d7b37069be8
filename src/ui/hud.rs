use bevy::prelude::*;

use crate::config::{GameBalance, HudSettings};
use crate::economy::gold::format_money;
use crate::shared::*;

/// Heart nodes spawned up front; only `heart_count` of them are shown.
const MAX_HEARTS: usize = 10;

const HEART_FULL: Color = Color::srgb(0.9, 0.15, 0.2);
const HEART_EMPTY: Color = Color::srgba(0.3, 0.3, 0.3, 0.6);
const TIME_FROZEN: Color = Color::srgb(1.0, 0.92, 0.2);
const SLOT_BG: Color = Color::srgba(0.2, 0.17, 0.14, 0.85);
const SLOT_BORDER: Color = Color::srgba(0.4, 0.35, 0.3, 0.7);
const SLOT_SELECTED_BORDER: Color = Color::srgb(1.0, 0.84, 0.0);

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HudTimeText;

#[derive(Component)]
pub struct HudDayText;

#[derive(Component)]
pub struct HudNightsText;

#[derive(Component)]
pub struct HudMoneyText;

#[derive(Component)]
pub struct HudCoyoteText;

#[derive(Component)]
pub struct HudHeartRow;

#[derive(Component)]
pub struct HudHeart {
    pub index: usize,
}

#[derive(Component)]
pub struct HudHealthBar;

#[derive(Component)]
pub struct HudHealthFill;

#[derive(Component)]
pub struct HudHealthText;

#[derive(Component)]
pub struct HotbarSlot {
    pub index: usize,
}

#[derive(Component)]
pub struct HotbarItemIcon {
    pub index: usize,
}

#[derive(Component)]
pub struct HotbarQuantityText {
    pub index: usize,
}

/// Marker for the "Press E ..." prompt above the hotbar.
#[derive(Component, Debug)]
pub struct HudInteractionPrompt;

// ═══════════════════════════════════════════════════════════════════════
// DISPLAY RULES
// ═══════════════════════════════════════════════════════════════════════

/// One heart per `per_heart` health, rounded up.
pub fn heart_count(max: f32, per_heart: f32) -> usize {
    if per_heart <= 0.0 || max <= 0.0 {
        return 0;
    }
    ((max / per_heart).ceil() as usize).min(MAX_HEARTS)
}

/// How full heart `index` is, from 0.0 to 1.0.
pub fn heart_fill(index: usize, current: f32, per_heart: f32) -> f32 {
    if per_heart <= 0.0 {
        return 0.0;
    }
    ((current - index as f32 * per_heart) / per_heart).clamp(0.0, 1.0)
}

pub fn health_label(current: f32, max: f32) -> String {
    format!("{} / {}", current.ceil() as i32, max.ceil() as i32)
}

/// Coyote counter text; hidden while none are alive.
pub fn coyote_label(alive: usize) -> Option<String> {
    (alive > 0).then(|| format!("Coyotes: {}", alive))
}

pub fn time_color(frozen: bool) -> Color {
    if frozen {
        TIME_FROZEN
    } else {
        Color::WHITE
    }
}

fn label(text: impl Into<String>, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN HUD
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_hud(mut commands: Commands, balance: Res<GameBalance>) {
    let hud = balance.hud.clone();
    commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            },
        ))
        .with_children(|parent| {
            // ─── TOP BAR ───
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        flex_direction: FlexDirection::Row,
                        justify_content: JustifyContent::SpaceBetween,
                        align_items: AlignItems::FlexStart,
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
                ))
                .with_children(|top_bar| {
                    top_bar
                        .spawn(Node {
                            flex_direction: FlexDirection::Column,
                            row_gap: Val::Px(2.0),
                            ..default()
                        })
                        .with_children(|left| {
                            left.spawn((HudTimeText, label("06:00 AM", 20.0, Color::WHITE)));
                            left.spawn((HudDayText, label("Day 1", 16.0, Color::WHITE)));
                            left.spawn((
                                HudNightsText,
                                label("Nights Survived: 0", 14.0, Color::srgb(0.8, 0.8, 0.9)),
                            ));
                        });

                    top_bar
                        .spawn(Node {
                            flex_direction: FlexDirection::Column,
                            align_items: AlignItems::FlexEnd,
                            row_gap: Val::Px(2.0),
                            ..default()
                        })
                        .with_children(|right| {
                            right.spawn((
                                HudMoneyText,
                                label("$0", 20.0, Color::srgb(1.0, 0.84, 0.0)),
                            ));
                            right.spawn((
                                HudCoyoteText,
                                label("", 16.0, Color::srgb(1.0, 0.45, 0.3)),
                                Visibility::Hidden,
                            ));
                        });
                });

            // ─── BOTTOM: health, prompt, hotbar ───
            parent
                .spawn(Node {
                    width: Val::Percent(100.0),
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(6.0),
                    padding: UiRect::bottom(Val::Px(10.0)),
                    ..default()
                })
                .with_children(|bottom| {
                    bottom.spawn((
                        HudInteractionPrompt,
                        label("", 16.0, Color::WHITE),
                        Visibility::Hidden,
                    ));
                    spawn_health(bottom, &hud);
                    spawn_hotbar(bottom);
                });
        });
}

fn spawn_health(parent: &mut ChildBuilder, hud: &HudSettings) {
    parent
        .spawn((
            HudHeartRow,
            Node {
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(4.0),
                display: if hud.show_hearts { Display::Flex } else { Display::None },
                ..default()
            },
        ))
        .with_children(|row| {
            for index in 0..MAX_HEARTS {
                row.spawn((
                    HudHeart { index },
                    Node {
                        width: Val::Px(16.0),
                        height: Val::Px(16.0),
                        ..default()
                    },
                    BackgroundColor(HEART_FULL),
                    Visibility::Hidden,
                ));
            }
        });

    parent
        .spawn((
            HudHealthBar,
            Node {
                width: Val::Px(200.0),
                height: Val::Px(16.0),
                border: UiRect::all(Val::Px(1.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                display: if hud.show_bar { Display::Flex } else { Display::None },
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.8)),
            BorderColor(Color::srgba(0.6, 0.6, 0.6, 0.8)),
        ))
        .with_children(|bar| {
            bar.spawn((
                HudHealthFill,
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(0.0),
                    top: Val::Px(0.0),
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.75, 0.15, 0.15)),
            ));
            bar.spawn((HudHealthText, label("100 / 100", 12.0, Color::WHITE)));
        });
}

fn spawn_hotbar(parent: &mut ChildBuilder) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            column_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|row| {
            for index in 0..HOTBAR_SLOTS {
                row.spawn((
                    HotbarSlot { index },
                    Node {
                        width: Val::Px(48.0),
                        height: Val::Px(48.0),
                        border: UiRect::all(Val::Px(2.0)),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(SLOT_BG),
                    BorderColor(SLOT_BORDER),
                ))
                .with_children(|slot| {
                    slot.spawn((
                        HotbarItemIcon { index },
                        Node {
                            width: Val::Px(28.0),
                            height: Val::Px(28.0),
                            ..default()
                        },
                        BackgroundColor(Color::NONE),
                    ));
                    slot.spawn((
                        HotbarQuantityText { index },
                        label("", 11.0, Color::WHITE),
                        Node {
                            position_type: PositionType::Absolute,
                            right: Val::Px(2.0),
                            bottom: Val::Px(0.0),
                            ..default()
                        },
                    ));
                    slot.spawn((
                        label(format!("{}", index + 1), 9.0, Color::srgb(0.6, 0.6, 0.6)),
                        Node {
                            position_type: PositionType::Absolute,
                            left: Val::Px(2.0),
                            top: Val::Px(0.0),
                            ..default()
                        },
                    ));
                });
            }
        });
}

pub fn despawn_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

#[allow(clippy::type_complexity)]
pub fn update_clock_display(
    clock: Res<DayNightClock>,
    mut time_query: Query<(&mut Text, &mut TextColor), With<HudTimeText>>,
    mut day_query: Query<&mut Text, (With<HudDayText>, Without<HudTimeText>)>,
    mut nights_query: Query<
        &mut Text,
        (With<HudNightsText>, Without<HudTimeText>, Without<HudDayText>),
    >,
) {
    for (mut text, mut color) in &mut time_query {
        **text = clock.formatted_time();
        color.0 = time_color(clock.time_frozen);
    }
    for mut text in &mut day_query {
        **text = format!("Day {}", clock.current_day);
    }
    for mut text in &mut nights_query {
        **text = format!("Nights Survived: {}", clock.nights_survived);
    }
}

pub fn update_money_display(wallet: Res<Wallet>, mut query: Query<&mut Text, With<HudMoneyText>>) {
    for mut text in &mut query {
        **text = format_money(wallet.money);
    }
}

pub fn update_coyote_counter(
    predators: Query<&Health, With<Predator>>,
    mut query: Query<(&mut Text, &mut Visibility), With<HudCoyoteText>>,
) {
    let alive = predators.iter().filter(|h| !h.is_dead()).count();
    for (mut text, mut visibility) in &mut query {
        match coyote_label(alive) {
            Some(label) => {
                **text = label;
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

#[allow(clippy::type_complexity)]
pub fn update_health_display(
    balance: Res<GameBalance>,
    players: Query<&Health, With<Player>>,
    mut hearts: Query<(&HudHeart, &mut BackgroundColor, &mut Visibility)>,
    mut fill: Query<&mut Node, With<HudHealthFill>>,
    mut text: Query<&mut Text, With<HudHealthText>>,
) {
    let Ok(health) = players.get_single() else {
        return;
    };
    let per_heart = balance.hud.health_per_heart;
    let count = heart_count(health.max, per_heart);
    for (heart, mut bg, mut visibility) in &mut hearts {
        if heart.index >= count {
            *visibility = Visibility::Hidden;
            continue;
        }
        *visibility = Visibility::Inherited;
        let f = heart_fill(heart.index, health.current, per_heart);
        bg.0 = HEART_EMPTY.mix(&HEART_FULL, f);
    }
    for mut node in &mut fill {
        node.width = Val::Percent(health.percent() * 100.0);
    }
    for mut t in &mut text {
        **t = health_label(health.current, health.max);
    }
}

#[allow(clippy::type_complexity)]
pub fn update_hotbar(
    inventory: Res<Inventory>,
    registry: Res<ItemRegistry>,
    mut slots: Query<(&HotbarSlot, &mut BorderColor)>,
    mut icons: Query<(&HotbarItemIcon, &mut BackgroundColor)>,
    mut quantities: Query<(&HotbarQuantityText, &mut Text)>,
) {
    for (slot, mut border) in &mut slots {
        border.0 = if slot.index == inventory.selected_slot {
            SLOT_SELECTED_BORDER
        } else {
            SLOT_BORDER
        };
    }
    for (icon, mut bg) in &mut icons {
        bg.0 = inventory
            .slots
            .get(icon.index)
            .and_then(|s| s.as_ref())
            .and_then(|s| registry.get(&s.item_id))
            .map(|def| def.icon_color())
            .unwrap_or(Color::NONE);
    }
    for (q, mut text) in &mut quantities {
        **text = match inventory.slots.get(q.index).and_then(|s| s.as_ref()) {
            Some(s) if s.quantity > 1 => s.quantity.to_string(),
            _ => String::new(),
        };
    }
}

pub fn update_interaction_prompt(
    target: Res<InteractionTarget>,
    mut query: Query<(&mut Text, &mut Visibility), With<HudInteractionPrompt>>,
) {
    for (mut text, mut visibility) in &mut query {
        if target.prompt.is_empty() {
            *visibility = Visibility::Hidden;
        } else {
            **text = target.prompt.clone();
            *visibility = Visibility::Inherited;
        }
    }
}
