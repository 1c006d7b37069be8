use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PreUpdate,
            (manage_input_context, reset_and_read_input).chain(),
        );
    }
}

/// The single point where hardware input becomes game actions.
pub fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    bindings: Res<KeyBindings>,
    context: Res<InputContext>,
    mut input: ResMut<PlayerInput>,
    mut interaction_claimed: ResMut<InteractionClaimed>,
) {
    *input = PlayerInput::default();
    interaction_claimed.0 = false;

    input.any_key =
        keys.get_just_pressed().next().is_some() || mouse.get_just_pressed().next().is_some();

    match *context {
        InputContext::Disabled => {}

        InputContext::Gameplay => {
            let mut axis = Vec2::ZERO;
            if keys.pressed(bindings.move_up) || keys.pressed(KeyCode::ArrowUp) {
                axis.y += 1.0;
            }
            if keys.pressed(bindings.move_down) || keys.pressed(KeyCode::ArrowDown) {
                axis.y -= 1.0;
            }
            if keys.pressed(bindings.move_left) || keys.pressed(KeyCode::ArrowLeft) {
                axis.x -= 1.0;
            }
            if keys.pressed(bindings.move_right) || keys.pressed(KeyCode::ArrowRight) {
                axis.x += 1.0;
            }
            input.move_axis = axis.normalize_or_zero();
            input.sprint = keys.pressed(bindings.sprint);

            input.interact = keys.just_pressed(bindings.interact);
            input.attack =
                keys.just_pressed(bindings.attack) || mouse.just_pressed(MouseButton::Left);
            input.open_inventory = keys.just_pressed(bindings.open_inventory);

            for (i, key) in [
                KeyCode::Digit1,
                KeyCode::Digit2,
                KeyCode::Digit3,
                KeyCode::Digit4,
                KeyCode::Digit5,
                KeyCode::Digit6,
            ]
            .iter()
            .enumerate()
            {
                if keys.just_pressed(*key) {
                    input.hotbar_slot = Some(i as u8);
                    break;
                }
            }
        }

        InputContext::Menu => {
            input.ui_up =
                keys.just_pressed(bindings.move_up) || keys.just_pressed(KeyCode::ArrowUp);
            input.ui_down =
                keys.just_pressed(bindings.move_down) || keys.just_pressed(KeyCode::ArrowDown);
            input.ui_left =
                keys.just_pressed(bindings.move_left) || keys.just_pressed(KeyCode::ArrowLeft);
            input.ui_right =
                keys.just_pressed(bindings.move_right) || keys.just_pressed(KeyCode::ArrowRight);
            input.ui_confirm = keys.just_pressed(bindings.ui_confirm)
                || keys.just_pressed(bindings.interact)
                || keys.just_pressed(bindings.restart);
            input.ui_cancel = keys.just_pressed(bindings.ui_cancel);
            input.open_inventory = keys.just_pressed(bindings.open_inventory);
            input.tab_pressed = keys.just_pressed(KeyCode::Tab);
        }
    }
}

/// Derives InputContext from GameState.
pub fn manage_input_context(
    game_state: Res<State<GameState>>,
    mut context: ResMut<InputContext>,
) {
    *context = context_for_state(*game_state.get());
}

pub fn context_for_state(state: GameState) -> InputContext {
    match state {
        GameState::Loading => InputContext::Disabled,
        GameState::Playing => InputContext::Gameplay,
        GameState::Inventory | GameState::Shop | GameState::GameOver => InputContext::Menu,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_follows_state() {
        assert_eq!(context_for_state(GameState::Loading), InputContext::Disabled);
        assert_eq!(context_for_state(GameState::Playing), InputContext::Gameplay);
        assert_eq!(context_for_state(GameState::Shop), InputContext::Menu);
        assert_eq!(context_for_state(GameState::GameOver), InputContext::Menu);
    }
}
