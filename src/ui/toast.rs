//! Short-lived notices stacked under the top of the screen.

use bevy::prelude::*;
use crate::shared::*;

const MAX_TOASTS: usize = 3;
const FADE_SECS: f32 = 0.5;
const PANEL_ALPHA: f32 = 0.75;
const STACK_WIDTH: f32 = 320.0;

/// Column holding every live toast, newest at the bottom.
#[derive(Component)]
pub struct ToastStack;

/// One notice. `shown` runs first; once it finishes the toast fades for
/// `FADE_SECS` and then goes away.
#[derive(Component)]
pub struct Toast {
    pub shown: Timer,
    pub fading: Option<Timer>,
}

impl Toast {
    fn new(secs: f32) -> Self {
        Self {
            shown: Timer::from_seconds(secs.max(0.0), TimerMode::Once),
            fading: None,
        }
    }
}

pub fn pickup_message(name: &str, quantity: u32) -> String {
    format!("Got {} x{}", name, quantity)
}

pub fn gold_message(amount: i32) -> String {
    if amount >= 0 {
        format!("+${}", amount)
    } else {
        format!("-${}", amount.unsigned_abs())
    }
}

pub fn spawn_toast_container(mut commands: Commands) {
    commands.spawn((
        ToastStack,
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(60.0),
            left: Val::Percent(50.0),
            width: Val::Px(STACK_WIDTH),
            margin: UiRect::left(Val::Px(-STACK_WIDTH * 0.5)),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            row_gap: Val::Px(6.0),
            ..default()
        },
        GlobalZIndex(60),
    ));
}

/// Turn `ToastEvent`s into nodes, dropping the oldest past `MAX_TOASTS`.
pub fn handle_toast_events(
    mut commands: Commands,
    mut events: EventReader<ToastEvent>,
    stacks: Query<Entity, With<ToastStack>>,
    live: Query<Entity, With<Toast>>,
) {
    let Ok(stack) = stacks.get_single() else {
        return;
    };

    let mut shown: Vec<Entity> = live.iter().collect();
    for event in events.read() {
        while shown.len() >= MAX_TOASTS {
            let oldest = shown.remove(0);
            commands.entity(oldest).despawn_recursive();
        }

        let toast = commands
            .spawn((
                Toast::new(event.duration_secs),
                Node {
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(5.0)),
                    border: UiRect::all(Val::Px(1.0)),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, PANEL_ALPHA)),
                BorderColor(Color::srgba(0.6, 0.55, 0.4, 0.6)),
            ))
            .with_child((
                Text::new(event.message.clone()),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ))
            .id();
        commands.entity(stack).add_child(toast);
        shown.push(toast);
    }
}

pub fn update_toasts(
    mut commands: Commands,
    time: Res<Time>,
    mut toasts: Query<(Entity, &mut Toast, &mut BackgroundColor, &Children)>,
    mut labels: Query<&mut TextColor>,
) {
    for (entity, mut toast, mut background, children) in &mut toasts {
        let Toast { shown, fading } = &mut *toast;
        let Some(fade) = fading.as_mut() else {
            if shown.tick(time.delta()).just_finished() {
                *fading = Some(Timer::from_seconds(FADE_SECS, TimerMode::Once));
            }
            continue;
        };

        if fade.tick(time.delta()).finished() {
            commands.entity(entity).despawn_recursive();
            continue;
        }
        let alpha = fade.fraction_remaining();
        background.0 = background.0.with_alpha(PANEL_ALPHA * alpha);
        for &child in children.iter() {
            if let Ok(mut color) = labels.get_mut(child) {
                color.0 = color.0.with_alpha(alpha);
            }
        }
    }
}

pub fn wire_pickup_toasts(
    mut pickups: EventReader<ItemPickupEvent>,
    registry: Res<ItemRegistry>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for event in pickups.read() {
        toasts.send(ToastEvent {
            message: pickup_message(&registry.name_of(&event.item_id), event.quantity),
            duration_secs: 2.0,
        });
    }
}

pub fn wire_gold_toasts(mut gold: EventReader<GoldChangeEvent>, mut toasts: EventWriter<ToastEvent>) {
    for event in gold.read() {
        toasts.send(ToastEvent {
            message: gold_message(event.amount),
            duration_secs: 2.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_message() {
        assert_eq!(pickup_message("Milk", 1), "Got Milk x1");
    }

    #[test]
    fn test_gold_message_sign() {
        assert_eq!(gold_message(15), "+$15");
        assert_eq!(gold_message(-30), "-$30");
        assert_eq!(gold_message(0), "+$0");
    }
}
