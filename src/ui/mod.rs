mod day_popup;
mod game_over;
mod hud;
mod inventory_screen;
mod menu_input;
mod shop_screen;
mod toast;
mod transitions;

use bevy::prelude::*;
use crate::shared::*;

pub use day_popup::{popup_text, DayPopup, PopupPhase};
pub use hud::{coyote_label, heart_count, heart_fill, health_label};
pub use inventory_screen::{confirm_slot, move_cursor, InventoryUiState};
pub use menu_input::{close_target, MenuAction};
pub use shop_screen::{clamp_cursor, current_listings};
pub use transitions::flash_alpha;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MenuAction>()
            .init_resource::<DayPopup>();

        // ─── OVERLAYS: always present ───
        app.add_systems(
            Startup,
            (
                transitions::spawn_overlays,
                toast::spawn_toast_container,
                day_popup::spawn_day_popup,
            ),
        );
        app.add_systems(
            Update,
            (
                transitions::update_fade,
                transitions::update_attack_flash,
                (day_popup::show_day_popup, day_popup::animate_day_popup).chain(),
                (
                    toast::wire_pickup_toasts,
                    toast::wire_gold_toasts,
                    toast::handle_toast_events,
                    toast::update_toasts,
                )
                    .chain(),
            ),
        );

        // ─── MENU INPUT ───
        app.add_systems(
            Update,
            (
                menu_input::reset_menu_action,
                menu_input::merge_keyboard_to_menu_action,
                menu_input::gameplay_state_transitions,
                menu_input::menu_cancel_transitions,
            )
                .chain(),
        );

        // ─── HUD: visible during Playing ───
        app.add_systems(OnEnter(GameState::Playing), hud::spawn_hud);
        app.add_systems(OnExit(GameState::Playing), hud::despawn_hud);
        app.add_systems(
            Update,
            (
                hud::update_clock_display,
                hud::update_money_display,
                hud::update_coyote_counter,
                hud::update_health_display,
                hud::update_hotbar,
                hud::update_interaction_prompt,
            )
                .run_if(in_state(GameState::Playing)),
        );

        // ─── INVENTORY SCREEN ───
        app.add_systems(OnEnter(GameState::Inventory), inventory_screen::spawn_inventory_screen);
        app.add_systems(OnExit(GameState::Inventory), inventory_screen::despawn_inventory_screen);
        app.add_systems(
            Update,
            (
                inventory_screen::inventory_navigation,
                inventory_screen::update_inventory_slots,
                inventory_screen::update_inventory_cursor,
            )
                .chain()
                .after(menu_input::merge_keyboard_to_menu_action)
                .run_if(in_state(GameState::Inventory)),
        );

        // ─── SHOP SCREEN ───
        app.add_systems(OnEnter(GameState::Shop), shop_screen::spawn_shop_screen);
        app.add_systems(OnExit(GameState::Shop), shop_screen::despawn_shop_screen);
        app.add_systems(
            Update,
            (shop_screen::shop_navigation, shop_screen::update_shop_display)
                .chain()
                .after(menu_input::merge_keyboard_to_menu_action)
                .run_if(in_state(GameState::Shop)),
        );

        // ─── GAME OVER ───
        app.add_systems(OnEnter(GameState::GameOver), game_over::spawn_game_over_panel);
        app.add_systems(OnExit(GameState::GameOver), game_over::despawn_game_over_panel);
    }
}
