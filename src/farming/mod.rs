//! Farming domain: soil tilling, planting, crop growth, harvest.
//!
//! Communicates with other domains exclusively through crate::shared events/resources.

use bevy::prelude::*;
use crate::shared::*;

mod crops;
mod render;
mod soil;

pub use crops::{growth_target, harvest_yields, plot_prompt};
pub use soil::{snap_to_grid, till_check, TillOutcome};

/// A patch of hoed soil in the field. Spawned by tilling, holds at most one crop.
#[derive(Component, Debug, Clone, Default)]
pub struct TilledPlot {
    pub planted: bool,
    /// Seed item the plot was sown with.
    pub crop: Option<ItemId>,
    pub growth_stage: u32,
    pub planted_at_hour: f32,
}

impl TilledPlot {
    pub fn is_mature(&self, max_stage: u32) -> bool {
        self.planted && self.growth_stage >= max_stage
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Child sprite drawing the crop on a plot.
#[derive(Component, Debug)]
pub struct CropSprite;

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                soil::handle_till_soil,
                crops::handle_plot_interaction,
                crops::grow_crops,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        )
        .add_systems(
            Update,
            (crops::update_plot_prompts, render::update_crop_sprites),
        );
    }
}
