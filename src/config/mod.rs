//! Tunable balance values.
//!
//! Every knob lives in one `GameBalance` resource. Defaults are compiled in;
//! `assets/balance.ron` may override any subset of them.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const BALANCE_PATH: &str = "assets/balance.ron";

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(load_balance_or_default());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SECTIONS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayNightSettings {
    /// Real seconds per in-game hour.
    pub seconds_per_hour: f32,
    pub night_start_hour: f32,
    pub day_start_hour: f32,
    /// From this hour until dawn the clock stalls while predators live.
    pub freeze_time_hour: f32,
    pub start_time: f32,
    pub health_scale_per_night: f32,
    pub damage_scale_per_night: f32,
}

impl Default for DayNightSettings {
    fn default() -> Self {
        Self {
            seconds_per_hour: 60.0,
            night_start_hour: 18.0,
            day_start_hour: 6.0,
            freeze_time_hour: 2.0,
            start_time: 6.0,
            health_scale_per_night: 1.15,
            damage_scale_per_night: 1.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepSettings {
    pub heal_on_sleep: bool,
    pub wake_up_hour: f32,
    pub night_only: bool,
    pub require_no_predators: bool,
    pub fade_duration: f32,
    /// Pause on a black screen either side of the time skip.
    pub settle_secs: f32,
    pub popup_duration: f32,
    pub popup_fade_speed: f32,
}

impl Default for SleepSettings {
    fn default() -> Self {
        Self {
            heal_on_sleep: true,
            wake_up_hour: 6.0,
            night_only: true,
            require_no_predators: true,
            fade_duration: 1.0,
            settle_secs: 0.5,
            popup_duration: 3.0,
            popup_fade_speed: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalSettings {
    pub days_to_survive: u32,
}

impl Default for GoalSettings {
    fn default() -> Self {
        Self { days_to_survive: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub max_health: f32,
    pub body_radius: f32,
    pub interaction_range: f32,
    /// Full cone (degrees) in front of the player that counts as "looking at".
    pub interaction_angle: f32,
    pub knockback_force: f32,
    pub flash_duration: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            sprint_speed: 8.0,
            max_health: 100.0,
            body_radius: 0.4,
            interaction_range: 3.0,
            interaction_angle: 90.0,
            knockback_force: 5.0,
            flash_duration: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatSettings {
    pub base_damage: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    /// Full swing arc in degrees.
    pub attack_angle: f32,
    pub flash_duration: f32,
}

impl Default for CombatSettings {
    fn default() -> Self {
        Self {
            base_damage: 20.0,
            attack_range: 2.0,
            attack_cooldown: 0.5,
            attack_angle: 60.0,
            flash_duration: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmingSettings {
    pub max_growth_stage: u32,
    pub hours_per_stage: f32,
    pub grid_snap: f32,
    /// How far in front of the player the hoe bites.
    pub till_distance: f32,
    /// Inclusive bounds of the tillable field: `[min_x, min_y, max_x, max_y]`.
    pub zone: [f32; 4],
}

impl Default for FarmingSettings {
    fn default() -> Self {
        Self {
            max_growth_stage: 3,
            hours_per_stage: 2.0,
            grid_snap: 1.0,
            till_distance: 1.5,
            zone: [-18.0, -6.0, -6.0, 6.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CowSettings {
    pub max_health: f32,
    pub days_to_grow_up: u32,
    pub breeding_cooldown_days: u32,
    pub mating_move_speed: f32,
    pub mating_distance: f32,
    pub breeding_duration: f32,
    pub separation_distance: f32,
    pub calf_offset: f32,
    pub milk_cooldown_days: u32,
    pub consume_bottle: bool,
    pub milk_item: String,
    pub meat_item: String,
    pub meat_drop_amount: u32,
    pub wander_speed: f32,
    pub turn_angle: f32,
    pub turn_cooldown: f32,
    /// Pen interior: `[min_x, min_y, max_x, max_y]`.
    pub pen: [f32; 4],
}

impl Default for CowSettings {
    fn default() -> Self {
        Self {
            max_health: 60.0,
            days_to_grow_up: 3,
            breeding_cooldown_days: 2,
            mating_move_speed: 2.0,
            mating_distance: 2.0,
            breeding_duration: 3.0,
            separation_distance: 3.0,
            calf_offset: 1.0,
            milk_cooldown_days: 1,
            consume_bottle: true,
            milk_item: "milk".into(),
            meat_item: "meat".into(),
            meat_drop_amount: 2,
            wander_speed: 1.0,
            turn_angle: 90.0,
            turn_cooldown: 1.0,
            pen: [5.0, -5.5, 15.5, 5.5],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredatorSettings {
    pub base_health: f32,
    pub detection_range: f32,
    pub move_speed: f32,
    pub attack_range: f32,
    pub attack_damage: f32,
    pub attack_cooldown: f32,
    pub prefer_cows: bool,
    pub aggro_duration: f32,
    pub loot_item: String,
    pub loot_amount: u32,
    pub despawn_delay: f32,
    pub body_radius: f32,
}

impl Default for PredatorSettings {
    fn default() -> Self {
        Self {
            base_health: 50.0,
            detection_range: 20.0,
            move_speed: 3.5,
            attack_range: 2.0,
            attack_damage: 10.0,
            attack_cooldown: 2.0,
            prefer_cows: true,
            aggro_duration: 10.0,
            loot_item: "coyote_pelt".into(),
            loot_amount: 1,
            despawn_delay: 0.5,
            body_radius: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerSettings {
    pub min_start: u32,
    pub max_start: u32,
    pub per_night: u32,
    pub max_difficulty_night: u32,
    pub spawn_delay: f32,
    pub spawn_jitter: f32,
    pub health_per_night: f32,
    pub damage_per_night: f32,
    pub spawn_points: Vec<[f32; 2]>,
}

impl Default for SpawnerSettings {
    fn default() -> Self {
        Self {
            min_start: 2,
            max_start: 3,
            per_night: 1,
            max_difficulty_night: 5,
            spawn_delay: 2.0,
            spawn_jitter: 2.0,
            health_per_night: 10.0,
            damage_per_night: 2.0,
            spawn_points: vec![[28.0, 18.0], [28.0, -18.0], [-28.0, -18.0], [-28.0, 18.0]],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FenceSettings {
    /// Percent chance (0-100) a predator squeezes through on contact.
    pub slip_chance: f32,
    pub slip_cooldown: f32,
    pub teleport_distance: f32,
    pub ignore_secs: f32,
}

impl Default for FenceSettings {
    fn default() -> Self {
        Self {
            slip_chance: 85.0,
            slip_cooldown: 2.0,
            teleport_distance: 2.5,
            ignore_secs: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudSettings {
    pub health_per_heart: f32,
    pub show_hearts: bool,
    pub show_bar: bool,
}

impl Default for HudSettings {
    fn default() -> Self {
        Self {
            health_per_heart: 20.0,
            show_hearts: true,
            show_bar: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Walkable area: `[min_x, min_y, max_x, max_y]`.
    pub bounds: [f32; 4],
    pub player_start: [f32; 2],
    pub bed_position: [f32; 2],
    pub shop_position: [f32; 2],
    pub gate_swing_secs: f32,
    pub item_float_amplitude: f32,
    pub item_float_frequency: f32,
    pub item_spin_degrees: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            bounds: [-30.0, -20.0, 30.0, 20.0],
            player_start: [0.0, 0.0],
            bed_position: [-3.0, 12.0],
            shop_position: [9.0, 13.0],
            gate_swing_secs: 1.0,
            item_float_amplitude: 0.3,
            item_float_frequency: 1.0,
            item_spin_degrees: 90.0,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ROOT
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameBalance {
    pub day_night: DayNightSettings,
    pub sleep: SleepSettings,
    pub goal: GoalSettings,
    pub player: PlayerSettings,
    pub combat: CombatSettings,
    pub farming: FarmingSettings,
    pub cows: CowSettings,
    pub predators: PredatorSettings,
    pub spawner: SpawnerSettings,
    pub fence: FenceSettings,
    pub hud: HudSettings,
    pub world: WorldSettings,
}

pub fn parse_balance(text: &str) -> Result<GameBalance, String> {
    ron::from_str(text).map_err(|e| format!("Balance parse failed: {}", e))
}

#[cfg(not(target_arch = "wasm32"))]
fn read_balance() -> Result<Option<GameBalance>, String> {
    let path = std::path::Path::new(BALANCE_PATH);
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Read failed for {}: {}", path.display(), e))?;
    parse_balance(&text).map(Some)
}

#[cfg(target_arch = "wasm32")]
fn read_balance() -> Result<Option<GameBalance>, String> {
    Ok(None)
}

pub fn load_balance_or_default() -> GameBalance {
    match read_balance() {
        Ok(Some(balance)) => {
            info!("[Config] Loaded balance overrides from {}", BALANCE_PATH);
            balance
        }
        Ok(None) => {
            info!("[Config] No {} found, using default balance", BALANCE_PATH);
            GameBalance::default()
        }
        Err(e) => {
            warn!("[Config] {}; falling back to defaults", e);
            GameBalance::default()
        }
    }
}
