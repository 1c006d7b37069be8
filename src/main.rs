mod animals;
mod config;
mod daynight;
mod data;
mod economy;
mod farming;
mod game;
mod health;
mod input;
mod inventory;
mod player;
mod predators;
mod shared;
mod ui;
mod world;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Nightfall Farm".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<Inventory>()
        .init_resource::<ItemRegistry>()
        .init_resource::<ShopCatalog>()
        .init_resource::<EquippedItem>()
        .init_resource::<Wallet>()
        .init_resource::<DayNightClock>()
        .init_resource::<ScreenFade>()
        .init_resource::<AttackFlash>()
        .init_resource::<InteractionTarget>()
        .init_resource::<InteractionClaimed>()
        .init_resource::<PlayerInput>()
        .init_resource::<KeyBindings>()
        .init_resource::<InputContext>()
        // Events
        .add_event::<NewDayEvent>()
        .add_event::<NightStartedEvent>()
        .add_event::<NightEndedEvent>()
        .add_event::<DamageEvent>()
        .add_event::<DamageTakenEvent>()
        .add_event::<HealthChangedEvent>()
        .add_event::<DeathEvent>()
        .add_event::<InteractEvent>()
        .add_event::<ItemPickupEvent>()
        .add_event::<ItemRemovedEvent>()
        .add_event::<DropItemEvent>()
        .add_event::<TillSoilEvent>()
        .add_event::<GoldChangeEvent>()
        .add_event::<ToastEvent>()
        .add_event::<DayPopupEvent>()
        .add_event::<RestartEvent>()
        .add_event::<WorldBuiltEvent>()
        // Balance first so every plugin can read it
        .add_plugins(config::ConfigPlugin)
        .add_plugins(input::InputPlugin)
        .add_plugins(daynight::DayNightPlugin)
        .add_plugins(health::HealthPlugin)
        .add_plugins(inventory::InventoryPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(farming::FarmingPlugin)
        .add_plugins(animals::AnimalPlugin)
        .add_plugins(predators::PredatorPlugin)
        .add_plugins(economy::EconomyPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(game::GamePlugin)
        .add_plugins(ui::UiPlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_scale(Vec3::splat(1.0 / UNIT_PX)),
    ));
}
