use crate::shared::*;

fn insert(registry: &mut ItemRegistry, def: ItemDef) {
    registry.items.insert(def.id.clone(), def);
}

pub fn populate_items(registry: &mut ItemRegistry) {
    // ── Tools ────────────────────────────────────────────────────────
    insert(
        registry,
        ItemDef {
            id: "hoe".into(),
            name: "Hoe".into(),
            description: "Turns grass into soil. Only works inside the field.".into(),
            kind: ItemKind::Equipment,
            tool: ToolKind::Hoe,
            max_stack: 1,
            sell_price: 10,
            can_sell: false,
            color: [0.55, 0.4, 0.25],
            ..Default::default()
        },
    );
    insert(
        registry,
        ItemDef {
            id: "sword".into(),
            name: "Sword".into(),
            description: "Keeps the coyotes honest.".into(),
            kind: ItemKind::Equipment,
            tool: ToolKind::Sword,
            max_stack: 1,
            buy_price: 120,
            sell_price: 40,
            can_buy: true,
            attack_damage: 15.0,
            color: [0.75, 0.78, 0.85],
            ..Default::default()
        },
    );
    insert(
        registry,
        ItemDef {
            id: "water_can".into(),
            name: "Watering Can".into(),
            description: "Holds water. The corn doesn't seem to need it.".into(),
            kind: ItemKind::Equipment,
            tool: ToolKind::WaterCan,
            max_stack: 1,
            buy_price: 30,
            sell_price: 10,
            can_buy: true,
            color: [0.3, 0.5, 0.85],
            ..Default::default()
        },
    );
    insert(
        registry,
        ItemDef {
            id: "bottle".into(),
            name: "Empty Bottle".into(),
            description: "Hold it up to a cow.".into(),
            kind: ItemKind::Equipment,
            tool: ToolKind::Bottle,
            max_stack: 20,
            buy_price: 5,
            sell_price: 1,
            can_buy: true,
            color: [0.8, 0.92, 0.95],
            ..Default::default()
        },
    );

    // ── Farming ──────────────────────────────────────────────────────
    insert(
        registry,
        ItemDef {
            id: "corn_seeds".into(),
            name: "Corn Seeds".into(),
            description: "Plant in tilled soil.".into(),
            kind: ItemKind::Sellable,
            seed: SeedKind::Corn,
            harvest_item: Some("corn".into()),
            seed_item: Some("corn_seeds".into()),
            harvest_yield: 2,
            seed_yield: 1,
            buy_price: 10,
            sell_price: 5,
            can_buy: true,
            color: [0.85, 0.75, 0.35],
            ..Default::default()
        },
    );
    insert(
        registry,
        ItemDef {
            id: "corn".into(),
            name: "Corn".into(),
            description: "Sweet. Cows love it.".into(),
            kind: ItemKind::Healing,
            buy_price: 20,
            sell_price: 15,
            can_buy: true,
            heal_amount: 10.0,
            color: [0.98, 0.85, 0.2],
            ..Default::default()
        },
    );

    // ── Animal products & loot ───────────────────────────────────────
    insert(
        registry,
        ItemDef {
            id: "milk".into(),
            name: "Milk".into(),
            description: "Fresh from the pen.".into(),
            kind: ItemKind::Healing,
            sell_price: 25,
            heal_amount: 15.0,
            color: [0.97, 0.97, 0.95],
            ..Default::default()
        },
    );
    insert(
        registry,
        ItemDef {
            id: "meat".into(),
            name: "Meat".into(),
            description: "Restores a good chunk of health.".into(),
            kind: ItemKind::Healing,
            sell_price: 40,
            heal_amount: 30.0,
            color: [0.7, 0.25, 0.25],
            ..Default::default()
        },
    );
    insert(
        registry,
        ItemDef {
            id: "coyote_pelt".into(),
            name: "Coyote Pelt".into(),
            description: "Proof of a long night.".into(),
            kind: ItemKind::Sellable,
            sell_price: 30,
            color: [0.6, 0.45, 0.3],
            ..Default::default()
        },
    );
}
