use bevy::prelude::*;

use crate::game::GameOutcome;

#[derive(Component)]
pub struct GameOverRoot;

pub fn spawn_game_over_panel(mut commands: Commands, outcome: Res<GameOutcome>) {
    commands
        .spawn((
            GameOverRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            GlobalZIndex(120),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(460.0),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(24.0)),
                        row_gap: Val::Px(16.0),
                        border: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.12, 0.1, 0.08, 0.95)),
                    BorderColor(outcome.color()),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new(outcome.title()),
                        TextFont {
                            font_size: 36.0,
                            ..default()
                        },
                        TextColor(outcome.color()),
                    ));
                    panel.spawn((
                        Text::new(outcome.message()),
                        TextFont {
                            font_size: 18.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        TextLayout::new_with_justify(JustifyText::Center),
                    ));
                    panel.spawn((
                        Text::new("Press R or Enter to restart"),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.6, 0.6, 0.6)),
                    ));
                });
        });
}

pub fn despawn_game_over_panel(mut commands: Commands, query: Query<Entity, With<GameOverRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
