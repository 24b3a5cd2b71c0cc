//! Built-in starter equipment definitions.
//!
//! Real content ships from data files; this table covers tests, the
//! simulator, and a fresh character's first kit.

use crate::character::stats::StatKind;
use crate::items::types::{EquipSlot, EquipmentItem, ItemCategory, Rarity};

/// The starter catalog, keyed by item id via [`starter_item`].
pub fn starter_items() -> Vec<EquipmentItem> {
    vec![
        EquipmentItem::new(
            "worn-fang",
            "Worn Fang",
            EquipSlot::Weapon,
            ItemCategory::Weapon,
            Rarity::Common,
        )
        .with_bonus(StatKind::Strength, 3)
        .with_description("A chipped fang lashed to a stick. It has seen better prey."),
        EquipmentItem::new(
            "leather-cap",
            "Leather Cap",
            EquipSlot::Head,
            ItemCategory::Armor,
            Rarity::Common,
        )
        .with_bonus(StatKind::Vitality, 2),
        EquipmentItem::new(
            "padded-vest",
            "Padded Vest",
            EquipSlot::Body,
            ItemCategory::Armor,
            Rarity::Common,
        )
        .with_bonus(StatKind::Vitality, 3),
        EquipmentItem::new(
            "swift-paws",
            "Swiftpad Wraps",
            EquipSlot::Paws,
            ItemCategory::Armor,
            Rarity::Uncommon,
        )
        .with_bonus(StatKind::Dexterity, 4),
        EquipmentItem::new(
            "lucky-tailring",
            "Lucky Tailring",
            EquipSlot::Tail,
            ItemCategory::Accessory,
            Rarity::Uncommon,
        )
        .with_bonus(StatKind::Luck, 3)
        .with_multiplier(StatKind::Luck, 1.1),
        EquipmentItem::new(
            "ember-charm",
            "Ember Charm",
            EquipSlot::Accessory,
            ItemCategory::Accessory,
            Rarity::Rare,
        )
        .with_bonus(StatKind::Intelligence, 5)
        .with_level_requirement(3),
        EquipmentItem::new(
            "ironhide-plate",
            "Ironhide Plate",
            EquipSlot::Chest,
            ItemCategory::Armor,
            Rarity::Rare,
        )
        .with_bonus(StatKind::Vitality, 6)
        .with_stat_requirement(StatKind::Strength, 14),
    ]
}

pub fn starter_item(id: &str) -> Option<EquipmentItem> {
    starter_items().into_iter().find(|item| item.id == id)
}
