use bevy::prelude::*;
use crate::shared::*;

/// Menu intents for the current frame, merged from keyboard input.
#[derive(Resource, Debug, Clone, Default)]
pub struct MenuAction {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub activate: bool,
    pub cancel: bool,
    pub switch_tab: bool,
    pub toggle_inventory: bool,
}

/// Reset MenuAction at frame start.
pub fn reset_menu_action(mut action: ResMut<MenuAction>) {
    *action = MenuAction::default();
}

pub fn merge_keyboard_to_menu_action(input: Res<PlayerInput>, mut action: ResMut<MenuAction>) {
    action.move_up |= input.ui_up;
    action.move_down |= input.ui_down;
    action.move_left |= input.ui_left;
    action.move_right |= input.ui_right;
    action.activate |= input.ui_confirm;
    action.cancel |= input.ui_cancel;
    action.switch_tab |= input.tab_pressed;
    action.toggle_inventory |= input.open_inventory;
}

/// Opening the bag from gameplay.
pub fn gameplay_state_transitions(
    input: Res<PlayerInput>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if *state.get() == GameState::Playing && input.open_inventory {
        next.set(GameState::Inventory);
    }
}

/// Where an overlay goes when the player backs out of it, if anywhere.
pub fn close_target(state: GameState, action: &MenuAction) -> Option<GameState> {
    match state {
        GameState::Inventory if action.cancel || action.toggle_inventory => Some(GameState::Playing),
        GameState::Shop if action.cancel => Some(GameState::Playing),
        _ => None,
    }
}

pub fn menu_cancel_transitions(
    action: Res<MenuAction>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if let Some(target) = close_target(*state.get(), &action) {
        next.set(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_closes_on_toggle_or_cancel() {
        let toggle = MenuAction {
            toggle_inventory: true,
            ..default()
        };
        let cancel = MenuAction {
            cancel: true,
            ..default()
        };
        assert_eq!(close_target(GameState::Inventory, &toggle), Some(GameState::Playing));
        assert_eq!(close_target(GameState::Inventory, &cancel), Some(GameState::Playing));
        assert_eq!(close_target(GameState::Inventory, &MenuAction::default()), None);
    }

    #[test]
    fn test_shop_ignores_inventory_key() {
        let toggle = MenuAction {
            toggle_inventory: true,
            switch_tab: true,
            ..default()
        };
        assert_eq!(close_target(GameState::Shop, &toggle), None);
        let cancel = MenuAction {
            cancel: true,
            ..default()
        };
        assert_eq!(close_target(GameState::Shop, &cancel), Some(GameState::Playing));
        assert_eq!(close_target(GameState::GameOver, &cancel), None);
    }
}
