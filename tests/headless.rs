//! Headless integration tests for Nightfall Farm.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic plugins (skipping input and UI), and verify that the
//! core game loops work correctly.
//!
//! Run with: `cargo test --test headless`

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use nightfall_farm::animals::{AnimalPlugin, BreedingTimer};
use nightfall_farm::config::GameBalance;
use nightfall_farm::data::DataPlugin;
use nightfall_farm::daynight::sleep::Bed;
use nightfall_farm::daynight::{fresh_clock, DayNightPlugin, SleepSequence};
use nightfall_farm::economy::gold::apply_gold_changes;
use nightfall_farm::economy::shop::{ActiveShop, BuyRequestEvent, SellRequestEvent};
use nightfall_farm::economy::EconomyPlugin;
use nightfall_farm::farming::{FarmingPlugin, TilledPlot};
use nightfall_farm::game::{GameOutcome, GamePlugin};
use nightfall_farm::health::{DestroyOnDeath, HealthPlugin};
use nightfall_farm::inventory::InventoryPlugin;
use nightfall_farm::player::PlayerPlugin;
use nightfall_farm::predators::{spawn_count_range, PredatorPlugin, PredatorSpawner};
use nightfall_farm::shared::*;
use nightfall_farm::world::{zone_rect, SwingGate, WorldPlugin};

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with all shared resources and events registered
/// but NO rendering, windowing, or asset loading. Systems must be added
/// per-test depending on what's being exercised.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Balance: compiled defaults, no file read ─────────────────────────
    app.insert_resource(GameBalance::default());

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.init_resource::<Inventory>()
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
        .init_resource::<InputContext>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<NewDayEvent>()
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
        .add_event::<WorldBuiltEvent>();

    app
}

/// Every gameplay plugin except keyboard input and UI.
fn build_game_app() -> App {
    let mut app = build_test_app();
    app.add_plugins((
        DayNightPlugin,
        HealthPlugin,
        InventoryPlugin,
        PlayerPlugin,
        FarmingPlugin,
        AnimalPlugin,
        PredatorPlugin,
        EconomyPlugin,
        WorldPlugin,
        GamePlugin,
        DataPlugin,
    ));
    app
}

/// Loading -> Playing, then let the freshly built farm settle.
fn boot(app: &mut App) {
    for _ in 0..4 {
        app.update();
    }
    assert_eq!(current_state(app), GameState::Playing);
}

fn current_state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

fn set_state(app: &mut App, state: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(state);
    app.update();
}

fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<Entity, With<C>>()
        .iter(app.world())
        .count()
}

fn first<C: Component>(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<C>>()
        .iter(app.world())
        .next()
        .expect("entity should exist")
}

/// Fixed 200 ms frames so timers and the clock move predictably.
fn use_fixed_frames(app: &mut App) {
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(200)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot & world
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_headless_boot_builds_the_farm() {
    let mut app = build_game_app();
    boot(&mut app);

    let registry = app.world().resource::<ItemRegistry>();
    assert!(registry.get("hoe").is_some(), "registry should be populated");
    assert!(!app.world().resource::<ShopCatalog>().items.is_empty());

    assert_eq!(count::<Player>(&mut app), 1);
    assert_eq!(count::<Cow>(&mut app), 3, "starting herd");
    assert_eq!(count::<SwingGate>(&mut app), 1);
    assert!(count::<Fence>(&mut app) > 1, "pen fence plus closed gate");
    assert_eq!(count::<Predator>(&mut app), 0, "no coyotes by day");

    let inventory = app.world().resource::<Inventory>();
    assert_eq!(inventory.count("hoe"), 1);
    assert_eq!(inventory.count("corn_seeds"), 5);
    assert_eq!(app.world().resource::<Wallet>().money, STARTING_MONEY);

    let clock = app.world().resource::<DayNightClock>();
    assert_eq!(clock.current_day, 1);
    assert!(!clock.is_night);
}

#[test]
fn test_restart_sweeps_and_rebuilds_the_session() {
    let mut app = build_game_app();
    boot(&mut app);

    // Dirty the session: spend money, kill a cow, jump the clock.
    app.world_mut().resource_mut::<Wallet>().money = 3;
    app.world_mut().resource_mut::<DayNightClock>().current_day = 4;
    let cow = first::<Cow>(&mut app);
    app.world_mut().despawn(cow);
    assert_eq!(count::<Cow>(&mut app), 2);

    app.world_mut().send_event(RestartEvent);
    app.update();
    app.update();
    app.update();

    assert_eq!(current_state(&app), GameState::Playing);
    assert_eq!(count::<Player>(&mut app), 1, "old player swept, new one spawned");
    assert_eq!(count::<Cow>(&mut app), 3);
    assert_eq!(count::<SwingGate>(&mut app), 1);
    assert_eq!(app.world().resource::<Wallet>().money, STARTING_MONEY);
    assert_eq!(app.world().resource::<DayNightClock>().current_day, 1);
}

#[test]
fn test_gate_opens_and_closes() {
    let mut app = build_game_app();
    use_fixed_frames(&mut app);
    boot(&mut app);

    let gate = first::<SwingGate>(&mut app);
    assert!(app.world().get::<Fence>(gate).is_some());

    app.world_mut().send_event(InteractEvent {
        target: gate,
        kind: InteractionKind::Gate,
    });
    app.update();
    assert!(app.world().get::<Fence>(gate).is_none(), "opening drops the collider");
    assert!(app.world().get::<SwingGate>(gate).is_some_and(|g| g.open));

    // 1 s swing at 200 ms per frame
    for _ in 0..8 {
        app.update();
    }
    let swing = app.world().get::<SwingGate>(gate).cloned().expect("gate");
    assert!(!swing.swinging);
    assert_eq!(swing.progress, 1.0);

    app.world_mut().send_event(InteractEvent {
        target: gate,
        kind: InteractionKind::Gate,
    });
    app.update();
    assert!(
        app.world().get::<Fence>(gate).is_none(),
        "still passable while swinging shut"
    );
    for _ in 0..8 {
        app.update();
    }
    assert!(app.world().get::<Fence>(gate).is_some(), "closed gate blocks again");
}

// ─────────────────────────────────────────────────────────────────────────────
// Day / night
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_clock_runs_through_a_night() {
    let mut app = build_test_app();
    use_fixed_frames(&mut app);
    app.add_plugins(DayNightPlugin);
    {
        let mut balance = app.world_mut().resource_mut::<GameBalance>();
        balance.day_night.seconds_per_hour = 0.1;
    }
    let clock = fresh_clock(&app.world().resource::<GameBalance>().day_night);
    app.insert_resource(clock);
    set_state(&mut app, GameState::Playing);

    // 2 in-game hours per frame, 28 hours in total.
    for _ in 0..15 {
        app.update();
    }

    let clock = app.world().resource::<DayNightClock>();
    assert_eq!(clock.current_day, 2);
    assert_eq!(clock.nights_survived, 1);
    assert!(!clock.is_night);
}

#[test]
fn test_clock_freezes_while_coyotes_live() {
    let mut app = build_test_app();
    use_fixed_frames(&mut app);
    app.add_plugins(DayNightPlugin);
    set_state(&mut app, GameState::Playing);

    {
        let mut clock = app.world_mut().resource_mut::<DayNightClock>();
        clock.current_time = 2.5;
        clock.is_night = true;
    }
    let coyote = app
        .world_mut()
        .spawn((Predator::default(), Health::new(20.0)))
        .id();

    for _ in 0..5 {
        app.update();
    }
    let clock = app.world().resource::<DayNightClock>();
    assert!(clock.time_frozen);
    assert_eq!(clock.current_time, 2.5);

    app.world_mut().despawn(coyote);
    for _ in 0..5 {
        app.update();
    }
    let clock = app.world().resource::<DayNightClock>();
    assert!(!clock.time_frozen);
    assert!(clock.current_time > 2.5);
}

// ─────────────────────────────────────────────────────────────────────────────
// Health
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_lethal_damage_kills_and_despawns() {
    let mut app = build_test_app();
    app.add_plugins(HealthPlugin);

    let target = app
        .world_mut()
        .spawn((Health::new(20.0), DestroyOnDeath { delay: 0.0 }))
        .id();

    app.world_mut().send_event(DamageEvent {
        target,
        amount: 5.0,
        direction: Vec2::X,
        source: None,
    });
    app.update();
    let health = app.world().get::<Health>(target).expect("alive");
    assert_eq!(health.current, 15.0);

    app.world_mut().send_event(DamageEvent {
        target,
        amount: 50.0,
        direction: Vec2::X,
        source: None,
    });
    app.update();
    let deaths = app.world().resource::<Events<DeathEvent>>();
    assert!(deaths.iter_current_update_events().any(|d| d.entity == target));

    app.update();
    app.update();
    assert!(app.world().get_entity(target).is_err(), "dead entity despawned");
}

// ─────────────────────────────────────────────────────────────────────────────
// Victory & defeat
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_surviving_the_last_day_wins() {
    let mut app = build_game_app();
    boot(&mut app);

    let goal = app.world().resource::<GameBalance>().goal.days_to_survive;
    app.world_mut().resource_mut::<DayNightClock>().current_day = goal + 1;
    app.update();
    app.update();

    assert_eq!(current_state(&app), GameState::GameOver);
    let outcome = app.world().resource::<GameOutcome>().clone();
    assert!(outcome.ended && outcome.victory);
    assert_eq!(outcome.day, goal);

    // Play again from the panel.
    app.world_mut().send_event(RestartEvent);
    for _ in 0..3 {
        app.update();
    }
    assert_eq!(current_state(&app), GameState::Playing);
    assert_eq!(*app.world().resource::<GameOutcome>(), GameOutcome::default());
    assert_eq!(app.world().resource::<DayNightClock>().current_day, 1);
}

#[test]
fn test_player_death_loses() {
    let mut app = build_game_app();
    boot(&mut app);

    let player = first::<Player>(&mut app);
    app.world_mut().send_event(DamageEvent {
        target: player,
        amount: 10_000.0,
        direction: Vec2::ZERO,
        source: None,
    });
    app.update();
    app.update();

    assert_eq!(current_state(&app), GameState::GameOver);
    let outcome = app.world().resource::<GameOutcome>();
    assert!(outcome.ended);
    assert!(!outcome.victory);
    assert_eq!(outcome.day, 1);
}

#[test]
fn test_cow_death_is_not_defeat() {
    let mut app = build_game_app();
    boot(&mut app);

    let cow = first::<Cow>(&mut app);
    app.world_mut().send_event(DamageEvent {
        target: cow,
        amount: 10_000.0,
        direction: Vec2::ZERO,
        source: None,
    });
    app.update();
    app.update();

    assert_eq!(current_state(&app), GameState::Playing);
    assert!(!app.world().resource::<GameOutcome>().ended);
}

// ─────────────────────────────────────────────────────────────────────────────
// Economy
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_gold_changes_apply_and_overdrafts_are_rejected() {
    let mut app = build_test_app();
    app.add_systems(Update, apply_gold_changes);

    app.world_mut().send_event(GoldChangeEvent {
        amount: 25,
        reason: "test".into(),
    });
    app.update();
    assert_eq!(app.world().resource::<Wallet>().money, STARTING_MONEY + 25);

    app.world_mut().send_event(GoldChangeEvent {
        amount: -10_000,
        reason: "too much".into(),
    });
    app.update();
    assert_eq!(app.world().resource::<Wallet>().money, STARTING_MONEY + 25);
}

#[test]
fn test_shop_buy_and_sell_round() {
    let mut app = build_game_app();
    boot(&mut app);

    let stock = app.world().resource::<ShopCatalog>().items.clone();
    app.insert_resource(ActiveShop {
        keeper_name: "Merchant".into(),
        stock,
        ..Default::default()
    });
    set_state(&mut app, GameState::Shop);

    let (seed_price, corn_price) = {
        let registry = app.world().resource::<ItemRegistry>();
        (
            registry.get("corn_seeds").expect("seeds").buy_price,
            registry.get("corn").expect("corn").sell_price,
        )
    };

    app.world_mut().send_event(BuyRequestEvent {
        item_id: "corn_seeds".into(),
    });
    app.update();
    assert_eq!(app.world().resource::<Wallet>().money, STARTING_MONEY - seed_price);
    assert_eq!(app.world().resource::<Inventory>().count("corn_seeds"), 6);

    app.world_mut().send_event(SellRequestEvent {
        item_id: "corn".into(),
    });
    app.update();
    assert_eq!(
        app.world().resource::<Wallet>().money,
        STARTING_MONEY - seed_price + corn_price
    );
    assert_eq!(app.world().resource::<Inventory>().count("corn"), 1);
}

#[test]
fn test_shop_rejects_unaffordable_purchase() {
    let mut app = build_game_app();
    boot(&mut app);

    let stock = app.world().resource::<ShopCatalog>().items.clone();
    app.insert_resource(ActiveShop {
        stock,
        ..Default::default()
    });
    app.world_mut().resource_mut::<Wallet>().money = 0;
    set_state(&mut app, GameState::Shop);

    app.world_mut().send_event(BuyRequestEvent {
        item_id: "corn_seeds".into(),
    });
    app.update();
    assert_eq!(app.world().resource::<Wallet>().money, 0);
    assert_eq!(app.world().resource::<Inventory>().count("corn_seeds"), 5);
}

#[test]
fn test_two_purchases_in_one_frame_are_both_paid_for() {
    let mut app = build_game_app();
    boot(&mut app);

    let stock = app.world().resource::<ShopCatalog>().items.clone();
    app.insert_resource(ActiveShop {
        stock,
        ..Default::default()
    });
    app.world_mut().resource_mut::<Wallet>().money = 180;
    set_state(&mut app, GameState::Shop);

    let swords_before = app.world().resource::<Inventory>().count("sword");
    app.world_mut().send_event(BuyRequestEvent {
        item_id: "sword".into(),
    });
    app.world_mut().send_event(BuyRequestEvent {
        item_id: "sword".into(),
    });
    app.update();

    // 180 covers one 120 sword, not two.
    assert_eq!(app.world().resource::<Inventory>().count("sword"), swords_before + 1);
    assert_eq!(app.world().resource::<Wallet>().money, 60);
}

// ─────────────────────────────────────────────────────────────────────────────
// Farming & animals
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_till_then_plant() {
    let mut app = build_game_app();
    boot(&mut app);

    // Starter kit: hoe, sword, bottle, corn seeds, corn.
    app.world_mut().resource_mut::<Inventory>().selected_slot = 0;
    app.update();

    let zone = app.world().resource::<GameBalance>().farming.zone;
    let (center, _) = zone_rect(zone);
    app.world_mut().send_event(TillSoilEvent { position: center });
    app.update();
    app.update();
    assert_eq!(count::<TilledPlot>(&mut app), 1);

    // Tilling the same spot again does nothing.
    app.world_mut().send_event(TillSoilEvent { position: center });
    app.update();
    app.update();
    assert_eq!(count::<TilledPlot>(&mut app), 1);

    app.world_mut().resource_mut::<Inventory>().selected_slot = 3;
    app.update();
    let plot = first::<TilledPlot>(&mut app);
    app.world_mut().send_event(InteractEvent {
        target: plot,
        kind: InteractionKind::Plot,
    });
    app.update();

    let tilled = app.world().get::<TilledPlot>(plot).expect("plot");
    assert!(tilled.planted);
    assert_eq!(tilled.crop.as_deref(), Some("corn_seeds"));
    assert_eq!(app.world().resource::<Inventory>().count("corn_seeds"), 4);
}

#[test]
fn test_tilling_outside_the_field_is_refused() {
    let mut app = build_game_app();
    boot(&mut app);

    app.world_mut().resource_mut::<Inventory>().selected_slot = 0;
    app.update();
    app.world_mut().send_event(TillSoilEvent {
        position: Vec2::new(500.0, 500.0),
    });
    app.update();
    app.update();
    assert_eq!(count::<TilledPlot>(&mut app), 0);
}

#[test]
fn test_milking_an_adult_cow() {
    let mut app = build_game_app();
    boot(&mut app);

    app.world_mut().resource_mut::<Inventory>().selected_slot = 2;
    app.update();

    let adult = app
        .world_mut()
        .query::<(Entity, &Cow)>()
        .iter(app.world())
        .find(|(_, cow)| !cow.is_baby)
        .map(|(e, _)| e)
        .expect("an adult cow");
    app.world_mut().send_event(InteractEvent {
        target: adult,
        kind: InteractionKind::Cow,
    });
    app.update();

    let inventory = app.world().resource::<Inventory>();
    assert_eq!(inventory.count("milk"), 1);
    assert_eq!(inventory.count("bottle"), 0, "the only bottle was used up");
    let cow = app.world().get::<Cow>(adult).expect("cow");
    assert!(!cow.can_be_milked, "milk cooldown started");
}

#[test]
fn test_ground_items_can_be_picked_up() {
    let mut app = build_game_app();
    boot(&mut app);

    let item = first::<nightfall_farm::inventory::WorldItem>(&mut app);
    let before = app.world().resource::<Inventory>().clone();
    app.world_mut().send_event(InteractEvent {
        target: item,
        kind: InteractionKind::WorldItem,
    });
    app.update();
    app.update();

    assert!(app.world().get_entity(item).is_err(), "picked up items vanish");
    let after = app.world().resource::<Inventory>();
    let gained = ["corn_seeds", "bottle"]
        .iter()
        .any(|id| after.count(id) > before.count(id));
    assert!(gained);
}

fn adult_cows(app: &mut App) -> Vec<Entity> {
    app.world_mut()
        .query::<(Entity, &Cow)>()
        .iter(app.world())
        .filter(|(_, cow)| !cow.is_baby)
        .map(|(e, _)| e)
        .collect()
}

#[test]
fn test_fed_cows_pair_up_and_have_a_calf() {
    let mut app = build_game_app();
    use_fixed_frames(&mut app);
    boot(&mut app);

    // Slot 4 holds the starter corn.
    app.world_mut().resource_mut::<Inventory>().selected_slot = 4;
    app.update();

    let adults = adult_cows(&mut app);
    assert_eq!(adults.len(), 2);
    for &cow in &adults {
        app.world_mut().send_event(InteractEvent {
            target: cow,
            kind: InteractionKind::Cow,
        });
        app.update();
    }
    assert_eq!(app.world().resource::<Inventory>().count("corn"), 0, "one corn per cow");
    let (a, b) = (adults[0], adults[1]);
    assert_eq!(app.world().get::<Cow>(a).and_then(|c| c.mate), Some(b));
    assert_eq!(app.world().get::<Cow>(b).and_then(|c| c.mate), Some(a));

    // Walk together (~1 s) then breed for 3 s.
    for _ in 0..40 {
        app.update();
        if count::<Cow>(&mut app) == 4 {
            break;
        }
    }
    app.update();

    assert_eq!(count::<Cow>(&mut app), 4, "a calf was born");
    let calves = app
        .world_mut()
        .query::<&Cow>()
        .iter(app.world())
        .filter(|cow| cow.is_baby)
        .count();
    assert_eq!(calves, 2);

    let cooldown = app.world().resource::<GameBalance>().cows.breeding_cooldown_days;
    for parent in [a, b] {
        let cow = app.world().get::<Cow>(parent).expect("parent");
        assert!(!cow.in_love && !cow.breeding);
        assert_eq!(cow.mate, None);
        assert_eq!(cow.breeding_cooldown, cooldown);
        assert!(!cow.can_breed);
        assert!(app.world().get::<BreedingTimer>(parent).is_none());
    }
}

#[test]
fn test_new_day_ages_the_herd() {
    let mut app = build_game_app();
    boot(&mut app);

    let adults = adult_cows(&mut app);
    for &cow in &adults {
        let mut cow = app.world_mut().get_mut::<Cow>(cow).expect("cow");
        cow.breeding_cooldown = 1;
        cow.milk_cooldown = 1;
        cow.refresh_status();
    }
    let calf = app
        .world_mut()
        .query::<(Entity, &Cow)>()
        .iter(app.world())
        .find(|(_, cow)| cow.is_baby)
        .map(|(e, _)| e)
        .expect("starting calf");
    app.world_mut().get_mut::<Cow>(calf).expect("calf").age_days = 2;

    app.world_mut().send_event(NewDayEvent { day: 2 });
    app.update();

    let grown = app.world().get::<Cow>(calf).expect("calf");
    assert!(!grown.is_baby, "third birthday makes an adult");
    assert_eq!(grown.age_days, 3);
    for cow in adults {
        let cow = app.world().get::<Cow>(cow).expect("cow");
        assert!(cow.can_breed && cow.can_be_milked, "cooldowns ran out");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sleep
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_sleeping_heals_and_skips_to_morning() {
    let mut app = build_game_app();
    use_fixed_frames(&mut app);
    boot(&mut app);

    {
        let mut clock = app.world_mut().resource_mut::<DayNightClock>();
        clock.current_time = 22.0;
        clock.is_night = true;
    }
    let player = first::<Player>(&mut app);
    app.world_mut().get_mut::<Health>(player).expect("health").current = 40.0;

    let bed = first::<Bed>(&mut app);
    app.world_mut().send_event(InteractEvent {
        target: bed,
        kind: InteractionKind::Bed,
    });

    // Fade out 1 s, settle 0.5 s twice, fade in 1 s.
    let mut popup = None;
    for _ in 0..25 {
        app.update();
        let events = app.world().resource::<Events<DayPopupEvent>>();
        if let Some(ev) = events.iter_current_update_events().next() {
            popup = Some(ev.clone());
            break;
        }
    }

    let popup = popup.expect("morning popup");
    assert_eq!(popup.day, 2);
    assert_eq!(popup.total_days, app.world().resource::<GameBalance>().goal.days_to_survive);

    let health = app.world().get::<Health>(player).expect("health");
    assert_eq!(health.current, health.max);

    let clock = app.world().resource::<DayNightClock>();
    assert_eq!(clock.current_day, 2);
    assert!(!clock.is_night);
    assert!(
        (6.0..6.1).contains(&clock.current_time),
        "woke at {}",
        clock.current_time
    );
    assert!(!app.world().resource::<SleepSequence>().is_sleeping());
}

// ─────────────────────────────────────────────────────────────────────────────
// Predators
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_nightfall_sends_a_pack_of_coyotes() {
    let mut app = build_game_app();
    use_fixed_frames(&mut app);
    boot(&mut app);

    app.world_mut().send_event(NightStartedEvent { night: 1 });
    app.update();
    assert_eq!(count::<Predator>(&mut app), 1, "first coyote arrives at once");

    // 2 s between arrivals.
    for _ in 0..30 {
        app.update();
    }

    let balance = app.world().resource::<GameBalance>().clone();
    let (min, max) = spawn_count_range(1, &balance.spawner);
    let coyotes = count::<Predator>(&mut app) as u32;
    assert!((min..=max).contains(&coyotes), "{} coyotes", coyotes);

    let spawner = app.world().resource::<PredatorSpawner>();
    assert_eq!(spawner.pending, 0);
    assert_eq!(spawner.active_count() as u32, coyotes);

    let health = app
        .world_mut()
        .query_filtered::<&Health, With<Predator>>()
        .iter(app.world())
        .next()
        .map(|h| h.max);
    assert_eq!(health, Some(balance.predators.base_health));
}

#[test]
fn test_hurt_coyote_turns_on_the_player() {
    let mut app = build_game_app();
    use_fixed_frames(&mut app);
    boot(&mut app);

    app.world_mut().send_event(NightStartedEvent { night: 1 });
    app.update();
    let coyote = first::<Predator>(&mut app);
    let player = first::<Player>(&mut app);

    let beside = app.world().get::<Transform>(player).expect("player").translation + Vec3::X;
    app.world_mut().get_mut::<Transform>(coyote).expect("coyote").translation = beside;
    app.world_mut().send_event(DamageTakenEvent {
        entity: coyote,
        amount: 5.0,
        source: Some(player),
    });

    let bites_this_frame = |app: &App| {
        app.world()
            .resource::<Events<DamageEvent>>()
            .iter_current_update_events()
            .filter(|ev| ev.source == Some(coyote) && ev.target == player)
            .count()
    };

    app.update();
    let predator = app.world().get::<Predator>(coyote).expect("coyote");
    assert_eq!(predator.target, Some(player));
    assert!(predator.aggro_remaining > 0.0);
    assert_eq!(bites_this_frame(&app), 1, "bites right away when in reach");

    // Cooldown is 2 s; 1.8 s later it still has not bitten again.
    for _ in 0..9 {
        app.update();
        assert_eq!(bites_this_frame(&app), 0);
    }

    let mut bitten_again = false;
    for _ in 0..20 {
        app.update();
        if bites_this_frame(&app) > 0 {
            bitten_again = true;
            break;
        }
    }
    assert!(bitten_again, "bites again once the cooldown is over");
}
