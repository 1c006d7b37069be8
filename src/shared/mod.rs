//! Shared components, resources, events, and states for Nightfall Farm.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
    /// Inventory overlay is open. World time does not advance.
    Inventory,
    Shop,
    GameOver,
}

/// Red screen pulse after a sword swing.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct AttackFlash {
    pub remaining: f32,
    pub duration: f32,
}

// ═══════════════════════════════════════════════════════════════════════
// DAY / NIGHT CLOCK
// ═══════════════════════════════════════════════════════════════════════

/// The world clock. `current_time` is the hour of day in `[0, 24)`.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayNightClock {
    pub current_time: f32,
    pub current_day: u32,
    pub nights_survived: u32,
    pub is_night: bool,
    /// True while the clock is held in the small hours by living predators.
    pub time_frozen: bool,
}

impl Default for DayNightClock {
    fn default() -> Self {
        Self {
            current_time: 6.0,
            current_day: 1,
            nights_survived: 0,
            is_night: false,
            time_frozen: false,
        }
    }
}

impl DayNightClock {
    pub fn hour(&self) -> u32 {
        self.current_time.floor() as u32
    }

    pub fn minute(&self) -> u32 {
        ((self.current_time - self.current_time.floor()) * 60.0).floor() as u32
    }

    /// "hh:mm AM/PM" on a 12-hour dial. Hour 0 reads as 12 AM, hour 12 as 12 PM.
    pub fn formatted_time(&self) -> String {
        let hours = self.hour();
        let minutes = self.minute();
        let period = if hours >= 12 { "PM" } else { "AM" };
        let mut display = if hours > 12 { hours - 12 } else { hours };
        if display == 0 {
            display = 12;
        }
        format!("{:02}:{:02} {}", display, minutes, period)
    }

    /// Predator health scaling after `nights_survived` nights.
    pub fn health_multiplier(&self, per_night: f32) -> f32 {
        per_night.powi(self.nights_survived as i32)
    }

    /// Predator damage scaling after `nights_survived` nights.
    pub fn damage_multiplier(&self, per_night: f32) -> f32 {
        per_night.powi(self.nights_survived as i32)
    }
}

/// Full-screen black fade. Alpha moves linearly from `from` to `target`
/// over `duration` seconds.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ScreenFade {
    pub alpha: f32,
    pub from: f32,
    pub target: f32,
    pub duration: f32,
    pub elapsed: f32,
    pub active: bool,
}

impl Default for ScreenFade {
    fn default() -> Self {
        Self {
            alpha: 0.0,
            from: 0.0,
            target: 0.0,
            duration: 1.0,
            elapsed: 0.0,
            active: false,
        }
    }
}

impl ScreenFade {
    pub fn fade_out(&mut self, duration: f32) {
        self.start(1.0, duration);
    }

    pub fn fade_in(&mut self, duration: f32) {
        self.start(0.0, duration);
    }

    fn start(&mut self, target: f32, duration: f32) {
        self.from = self.alpha;
        self.target = target;
        self.duration = duration.max(0.0);
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Advance the fade. Returns true on the frame it completes.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed += dt;
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            self.alpha = self.target;
            self.active = false;
            return true;
        }
        let t = self.elapsed / self.duration;
        self.alpha = self.from + (self.target - self.from) * t;
        false
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS & INVENTORY
// ═══════════════════════════════════════════════════════════════════════

pub type ItemId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemKind {
    #[default]
    None,
    Sellable,
    Healing,
    Equipment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    None,
    Hoe,
    Sword,
    WaterCan,
    Bottle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SeedKind {
    #[default]
    None,
    Corn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
    pub tool: ToolKind,
    pub seed: SeedKind,
    pub max_stack: u32,
    /// Crop yielded when a plot sown with this seed is harvested.
    pub harvest_item: Option<ItemId>,
    /// Seed returned on harvest.
    pub seed_item: Option<ItemId>,
    pub harvest_yield: u32,
    pub seed_yield: u32,
    pub buy_price: u32,
    pub sell_price: u32,
    pub can_buy: bool,
    pub can_sell: bool,
    pub attack_damage: f32,
    pub heal_amount: f32,
    /// Flat colour used for the item's icon and world sprite.
    pub color: [f32; 3],
}

impl Default for ItemDef {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            kind: ItemKind::None,
            tool: ToolKind::None,
            seed: SeedKind::None,
            max_stack: 99,
            harvest_item: None,
            seed_item: None,
            harvest_yield: 1,
            seed_yield: 1,
            buy_price: 0,
            sell_price: 0,
            can_buy: false,
            can_sell: true,
            attack_damage: 0.0,
            heal_amount: 0.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

impl ItemDef {
    pub fn is_seed(&self) -> bool {
        self.seed != SeedKind::None
    }

    pub fn icon_color(&self) -> Color {
        Color::srgb(self.color[0], self.color[1], self.color[2])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySlot {
    pub item_id: ItemId,
    pub quantity: u32,
}

/// The player's bag. The first `HOTBAR_SLOTS` slots double as the hotbar.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub slots: Vec<Option<InventorySlot>>,
    pub selected_slot: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            slots: vec![None; INVENTORY_SLOTS],
            selected_slot: 0,
        }
    }
}

impl Inventory {
    /// Add `quantity` of an item. Tops up partial stacks of the same item
    /// first, then fills empty slots. Returns the quantity that did not fit.
    pub fn add_item(&mut self, item_id: &str, quantity: u32, max_stack: u32) -> u32 {
        let max_stack = max_stack.max(1);
        let mut remaining = quantity;

        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if let Some(ref mut s) = slot {
                if s.item_id == item_id && s.quantity > 0 && s.quantity < max_stack {
                    let add = remaining.min(max_stack - s.quantity);
                    s.quantity += add;
                    remaining -= add;
                }
            }
        }

        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_none() {
                let add = remaining.min(max_stack);
                *slot = Some(InventorySlot {
                    item_id: item_id.to_string(),
                    quantity: add,
                });
                remaining -= add;
            }
        }

        remaining
    }

    /// Remove `quantity` from the first slot holding the item. Only that one
    /// slot is touched; it empties if it drops to zero. Returns false when no
    /// slot holds the item.
    pub fn remove_item(&mut self, item_id: &str, quantity: u32) -> bool {
        for slot in self.slots.iter_mut() {
            let Some(s) = slot else {
                continue;
            };
            if s.item_id == item_id && s.quantity > 0 {
                if s.quantity <= quantity {
                    *slot = None;
                } else {
                    s.quantity -= quantity;
                }
                return true;
            }
        }
        false
    }

    pub fn swap_slots(&mut self, a: usize, b: usize) {
        if a < self.slots.len() && b < self.slots.len() {
            self.slots.swap(a, b);
        }
    }

    pub fn count(&self, item_id: &str) -> u32 {
        self.slots
            .iter()
            .filter_map(|s| s.as_ref())
            .filter(|s| s.item_id == item_id)
            .map(|s| s.quantity)
            .sum()
    }

    pub fn has(&self, item_id: &str, quantity: u32) -> bool {
        self.count(item_id) >= quantity
    }

    pub fn selected(&self) -> Option<&InventorySlot> {
        self.slots
            .get(self.selected_slot)
            .and_then(|s| s.as_ref())
            .filter(|s| s.quantity > 0)
    }

    /// Distinct item ids in slot order.
    pub fn distinct_items(&self) -> Vec<ItemId> {
        let mut seen: Vec<ItemId> = Vec::new();
        for slot in self.slots.iter().flatten() {
            if slot.quantity > 0 && !seen.contains(&slot.item_id) {
                seen.push(slot.item_id.clone());
            }
        }
        seen
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ITEM REGISTRY: loaded from data
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Default)]
pub struct ItemRegistry {
    pub items: HashMap<ItemId, ItemDef>,
}

impl ItemRegistry {
    pub fn get(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    pub fn name_of(&self, id: &str) -> String {
        self.get(id)
            .map(|def| def.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn max_stack(&self, id: &str) -> u32 {
        self.get(id).map(|def| def.max_stack).unwrap_or(99)
    }
}

/// What the farm's merchant stocks.
#[derive(Resource, Debug, Clone, Default)]
pub struct ShopCatalog {
    pub shop_name: String,
    pub items: Vec<ItemId>,
}

/// The item in the selected hotbar slot, refreshed every frame.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct EquippedItem(pub Option<ItemId>);

// ═══════════════════════════════════════════════════════════════════════
// WALLET
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub money: u32,
}

impl Default for Wallet {
    fn default() -> Self {
        Self {
            money: STARTING_MONEY,
        }
    }
}

impl Wallet {
    pub fn can_afford(&self, amount: u32) -> bool {
        self.money >= amount
    }

    pub fn add(&mut self, amount: i64) -> Result<(), String> {
        if amount < 0 {
            return Err(format!("Cannot add negative money: {}", amount));
        }
        let amount = u32::try_from(amount)
            .map_err(|_| format!("Amount {} is out of range", amount))?;
        self.money = self.money.saturating_add(amount);
        Ok(())
    }

    pub fn remove(&mut self, amount: i64) -> Result<(), String> {
        if amount < 0 {
            return Err(format!("Cannot remove negative money: {}", amount));
        }
        let amount = u32::try_from(amount)
            .map_err(|_| format!("Cannot afford {} (have {})", amount, self.money))?;
        if !self.can_afford(amount) {
            return Err(format!("Cannot afford {} (have {})", amount, self.money));
        }
        self.money -= amount;
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// HEALTH
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    pub max: f32,
    pub current: f32,
    pub dead: bool,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            max,
            current: max,
            dead: false,
        }
    }

    /// Apply damage. Returns `None` when already dead, otherwise whether
    /// this hit killed the owner.
    pub fn take_damage(&mut self, amount: f32) -> Option<bool> {
        if self.dead {
            return None;
        }
        self.current = (self.current - amount).max(0.0);
        if self.current <= 0.0 {
            self.dead = true;
            return Some(true);
        }
        Some(false)
    }

    /// Returns the amount actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if self.dead {
            return 0.0;
        }
        let before = self.current;
        self.current = (self.current + amount).min(self.max);
        self.current - before
    }

    /// Returns true if this call killed the owner.
    pub fn set(&mut self, value: f32) -> bool {
        self.current = value.clamp(0.0, self.max);
        if self.current <= 0.0 && !self.dead {
            self.dead = true;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.dead = false;
        self.current = self.max;
    }

    pub fn percent(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HEALTH)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Unit vector the player (or any actor) is looking along.
#[derive(Component, Debug, Clone, Copy)]
pub struct Facing(pub Vec2);

impl Default for Facing {
    fn default() -> Self {
        Self(Vec2::NEG_Y)
    }
}

/// Circle radius used for overlap tests against fences and other actors.
#[derive(Component, Debug, Clone, Copy)]
pub struct BodyRadius(pub f32);

/// Marks every entity that belongs to a running game session, so a restart
/// can sweep the world clean.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct GameplayEntity;

// ═══════════════════════════════════════════════════════════════════════
// ANIMALS & PREDATORS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component, Debug, Clone, Default)]
pub struct Cow {
    pub is_baby: bool,
    pub age_days: u32,
    pub breeding_cooldown: u32,
    pub milk_cooldown: u32,
    pub can_breed: bool,
    pub can_be_milked: bool,
    pub in_love: bool,
    pub mate: Option<Entity>,
    pub breeding: bool,
}

impl Cow {
    pub fn baby() -> Self {
        Self {
            is_baby: true,
            ..default()
        }
    }

    pub fn adult() -> Self {
        let mut cow = Self::default();
        cow.refresh_status();
        cow
    }

    pub fn refresh_status(&mut self) {
        self.can_breed = !self.is_baby && self.breeding_cooldown == 0;
        self.can_be_milked = !self.is_baby && self.milk_cooldown == 0;
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct Predator {
    pub attack_damage: f32,
    /// Seconds until the next bite is allowed.
    pub attack_cooldown_left: f32,
    /// Seconds of aggro left against the player.
    pub aggro_remaining: f32,
    /// The player, while aggro lasts.
    pub target: Option<Entity>,
}

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Fence {
    pub half_extents: Vec2,
}

/// Circle-vs-box overlap used for every fence and gate collision.
pub fn circle_overlaps_box(center: Vec2, radius: f32, box_center: Vec2, half_extents: Vec2) -> bool {
    let closest = center.clamp(box_center - half_extents, box_center + half_extents);
    center.distance_squared(closest) < radius * radius
}

/// Angle in degrees between two directions. Zero vectors count as aligned.
pub fn angle_between_deg(a: Vec2, b: Vec2) -> f32 {
    let (a, b) = (a.normalize_or_zero(), b.normalize_or_zero());
    if a == Vec2::ZERO || b == Vec2::ZERO {
        return 0.0;
    }
    a.dot(b).clamp(-1.0, 1.0).acos().to_degrees()
}

// ═══════════════════════════════════════════════════════════════════════
// INTERACTION
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Plot,
    Cow,
    ShopKeeper,
    Bed,
    Gate,
    WorldItem,
}

/// Anything the player can press interact on. The owning domain refreshes
/// `prompt` and `available` every frame from its own state.
#[derive(Component, Debug, Clone)]
pub struct Interactable {
    pub kind: InteractionKind,
    pub prompt: String,
    pub available: bool,
}

impl Interactable {
    pub fn new(kind: InteractionKind) -> Self {
        Self {
            kind,
            prompt: String::new(),
            available: false,
        }
    }

    pub fn set(&mut self, prompt: impl Into<String>, available: bool) {
        self.prompt = prompt.into();
        self.available = available;
    }
}

/// What the player is currently pointed at.
#[derive(Resource, Debug, Clone, Default)]
pub struct InteractionTarget {
    pub entity: Option<Entity>,
    pub prompt: String,
}

/// Set once a system has consumed this frame's interact press.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InteractionClaimed(pub bool);

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

/// Per-frame game actions, rebuilt from hardware input every PreUpdate.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub sprint: bool,
    pub interact: bool,
    pub attack: bool,
    pub open_inventory: bool,
    pub hotbar_slot: Option<u8>,
    pub ui_up: bool,
    pub ui_down: bool,
    pub ui_left: bool,
    pub ui_right: bool,
    pub ui_confirm: bool,
    pub ui_cancel: bool,
    pub tab_pressed: bool,
    pub any_key: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub sprint: KeyCode,
    pub interact: KeyCode,
    pub attack: KeyCode,
    pub open_inventory: KeyCode,
    pub ui_confirm: KeyCode,
    pub ui_cancel: KeyCode,
    pub restart: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::KeyW,
            move_down: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            sprint: KeyCode::ShiftLeft,
            interact: KeyCode::KeyE,
            attack: KeyCode::Space,
            open_inventory: KeyCode::Tab,
            ui_confirm: KeyCode::Enter,
            ui_cancel: KeyCode::Escape,
            restart: KeyCode::KeyR,
        }
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    #[default]
    Disabled,
    Gameplay,
    Menu,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// The clock rolled past midnight.
#[derive(Event, Debug, Clone)]
pub struct NewDayEvent {
    pub day: u32,
}

#[derive(Event, Debug, Clone)]
pub struct NightStartedEvent {
    /// 1-based number of the night that just began.
    pub night: u32,
}

#[derive(Event, Debug, Clone)]
pub struct NightEndedEvent {
    pub nights_survived: u32,
}

/// Request to hurt an entity. `direction` points from the attacker to the
/// target and drives knockback.
#[derive(Event, Debug, Clone)]
pub struct DamageEvent {
    pub target: Entity,
    pub amount: f32,
    pub direction: Vec2,
    pub source: Option<Entity>,
}

/// Emitted after damage actually landed.
#[derive(Event, Debug, Clone)]
pub struct DamageTakenEvent {
    pub entity: Entity,
    pub amount: f32,
    pub source: Option<Entity>,
}

#[derive(Event, Debug, Clone)]
pub struct HealthChangedEvent {
    pub entity: Entity,
    pub current: f32,
    pub max: f32,
}

#[derive(Event, Debug, Clone)]
pub struct DeathEvent {
    pub entity: Entity,
}

#[derive(Event, Debug, Clone)]
pub struct InteractEvent {
    pub target: Entity,
    pub kind: InteractionKind,
}

#[derive(Event, Debug, Clone)]
pub struct ItemPickupEvent {
    pub item_id: ItemId,
    pub quantity: u32,
}

#[derive(Event, Debug, Clone)]
pub struct ItemRemovedEvent {
    pub item_id: ItemId,
    pub quantity: u32,
}

/// Put an item on the ground as a floating pickup.
#[derive(Event, Debug, Clone)]
pub struct DropItemEvent {
    pub item_id: ItemId,
    pub quantity: u32,
    pub position: Vec2,
}

/// Hoe strike at a world position.
#[derive(Event, Debug, Clone)]
pub struct TillSoilEvent {
    pub position: Vec2,
}

/// Signed change to the wallet. Negative amounts are spends.
#[derive(Event, Debug, Clone)]
pub struct GoldChangeEvent {
    pub amount: i32,
    pub reason: String,
}

#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub duration_secs: f32,
}

/// Announce the morning after a night's sleep.
#[derive(Event, Debug, Clone)]
pub struct DayPopupEvent {
    pub day: u32,
    pub total_days: u32,
}

/// Tear down the session and build a fresh one.
#[derive(Event, Debug, Clone)]
pub struct RestartEvent;

/// The world was (re)built; domains spawn their session entities.
#[derive(Event, Debug, Clone)]
pub struct WorldBuiltEvent;

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const UNIT_PX: f32 = 32.0; // pixels per world unit
pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 720.0;

pub const HOTBAR_SLOTS: usize = 6;
pub const INVENTORY_SLOTS: usize = 18;

pub const STARTING_MONEY: u32 = 100;
pub const DEFAULT_MAX_HEALTH: f32 = 100.0;

pub const Z_GROUND: f32 = 0.0;
pub const Z_PLOT: f32 = 1.0;
pub const Z_ITEM: f32 = 3.0;
pub const Z_ACTOR: f32 = 5.0;
pub const Z_OVERLAY: f32 = 50.0;
