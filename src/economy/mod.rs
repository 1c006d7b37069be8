//! Economy domain: the wallet, gold changes, and the farm merchant.
//!
//! All cross-domain communication goes through `crate::shared::*` events and resources.
//! No other domain module is imported here.

use bevy::prelude::*;
use crate::shared::*;

pub mod gold;
pub mod shop;

use gold::{apply_gold_changes, reset_wallet_on_world_built};
use shop::{
    handle_buy, handle_sell, open_shop_on_interact, spawn_shopkeeper, update_shopkeeper_prompts,
    ActiveShop, BuyRequestEvent, SellRequestEvent,
};

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        // ── Resources ──────────────────────────────────────────────────────
        app.init_resource::<ActiveShop>();

        // ── Internal Events ────────────────────────────────────────────────
        app.add_event::<BuyRequestEvent>()
            .add_event::<SellRequestEvent>();

        // ── Systems: session setup ─────────────────────────────────────────
        app.add_systems(Update, (reset_wallet_on_world_built, spawn_shopkeeper));

        // ── Systems: Playing state ─────────────────────────────────────────
        app.add_systems(
            Update,
            (update_shopkeeper_prompts, open_shop_on_interact)
                .run_if(in_state(GameState::Playing)),
        );

        // ── Systems: Shop state ────────────────────────────────────────────
        app.add_systems(
            Update,
            (handle_buy, handle_sell)
                .chain()
                .before(apply_gold_changes)
                .run_if(in_state(GameState::Shop)),
        );

        // Gold change events can arrive from any domain at any time.
        app.add_systems(Update, apply_gold_changes);
    }
}
