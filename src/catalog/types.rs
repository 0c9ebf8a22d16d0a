use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MONSTER_SCHEMA_VERSION: u8 = 1;
pub const ITEM_SCHEMA_VERSION: u8 = 1;
pub const SURVIVOR_SCHEMA_VERSION: u8 = 1;

/// The three catalog collections, in fixed import order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Monster,
    Item,
    Survivor,
}

impl EntityKind {
    pub const IMPORT_ORDER: [EntityKind; 3] =
        [EntityKind::Monster, EntityKind::Item, EntityKind::Survivor];

    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Monster => "monster",
            EntityKind::Item => "item",
            EntityKind::Survivor => "survivor",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Monster => "monsters",
            EntityKind::Item => "items",
            EntityKind::Survivor => "survivors",
        }
    }

    /// Capitalized name used in operator messages ("Created Monster: ...").
    pub fn title(self) -> &'static str {
        match self {
            EntityKind::Monster => "Monster",
            EntityKind::Item => "Item",
            EntityKind::Survivor => "Survivor",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    /// Accepts singular or plural names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monster" | "monsters" => Ok(EntityKind::Monster),
            "item" | "items" => Ok(EntityKind::Item),
            "survivor" | "survivors" => Ok(EntityKind::Survivor),
            other => Err(format!(
                "unknown collection '{}' (expected monsters, items or survivors)",
                other
            )),
        }
    }
}

/// Column descriptor: source header name, display label and advisory maximum length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub column: &'static str,
    pub label: &'static str,
    pub max_len: usize,
}

const fn spec(column: &'static str, label: &'static str, max_len: usize) -> FieldSpec {
    FieldSpec {
        column,
        label,
        max_len,
    }
}

/// Shared shape of the three catalog records: a flat set of text fields with one
/// natural key column.
pub trait CatalogEntity: Serialize + DeserializeOwned + Clone + fmt::Debug {
    const KIND: EntityKind;
    /// Version stamped on the stored envelope, not on the record itself.
    const SCHEMA_VERSION: u8;
    /// Header name of the key column.
    const KEY_COLUMN: &'static str;
    /// Every column in the source header, key included, in display order.
    const COLUMNS: &'static [FieldSpec];

    fn key(&self) -> &str;

    /// Column values paired with their descriptors, in [`Self::COLUMNS`] order.
    fn fields(&self) -> Vec<(&'static FieldSpec, &str)>;

    /// Value of a single column by header name.
    fn field(&self, column: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .find(|(spec, _)| spec.column == column)
            .map(|(_, value)| value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Monster {
    #[serde(rename = "MonsterImg")]
    pub image: String,
    #[serde(rename = "MonsterName")]
    pub name: String,
    #[serde(rename = "MonsterHealth")]
    pub health: String,
    #[serde(rename = "MonsterDamage")]
    pub damage: String,
    #[serde(rename = "MonsterHPRegen")]
    pub hp_regen: String,
    #[serde(rename = "MonsterArmour")]
    pub armour: String,
    #[serde(rename = "MonsterSpeed")]
    pub speed: String,
    #[serde(rename = "Class")]
    pub class: String,
    #[serde(rename = "MonsterType")]
    pub monster_type: String,
}

const MONSTER_COLUMNS: &[FieldSpec] = &[
    spec("MonsterImg", "Image", 500),
    spec("MonsterName", "Name", 74),
    spec("MonsterHealth", "Health", 74),
    spec("MonsterDamage", "Damage", 74),
    spec("MonsterHPRegen", "HP Regen", 74),
    spec("MonsterArmour", "Armour", 74),
    spec("MonsterSpeed", "Speed", 74),
    spec("Class", "Class", 74),
    spec("MonsterType", "Type", 74),
];

impl CatalogEntity for Monster {
    const KIND: EntityKind = EntityKind::Monster;
    const SCHEMA_VERSION: u8 = MONSTER_SCHEMA_VERSION;
    const KEY_COLUMN: &'static str = "MonsterName";
    const COLUMNS: &'static [FieldSpec] = MONSTER_COLUMNS;

    fn key(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> Vec<(&'static FieldSpec, &str)> {
        let values: [&str; 9] = [
            &self.image,
            &self.name,
            &self.health,
            &self.damage,
            &self.hp_regen,
            &self.armour,
            &self.speed,
            &self.class,
            &self.monster_type,
        ];
        MONSTER_COLUMNS.iter().zip(values).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    #[serde(rename = "ItemImg")]
    pub image: String,
    #[serde(rename = "ItemName")]
    pub name: String,
    #[serde(rename = "ItemDescription")]
    pub description: String,
    #[serde(rename = "ItemStackType")]
    pub stack_type: String,
    #[serde(rename = "ItemTier")]
    pub tier: String,
    /// "Active" or "Passive" as written in the source.
    #[serde(rename = "ItemActPass")]
    pub active_passive: String,
    #[serde(rename = "Cooldown")]
    pub cooldown: String,
}

const ITEM_COLUMNS: &[FieldSpec] = &[
    spec("ItemImg", "Image", 500),
    spec("ItemName", "Name", 124),
    spec("ItemDescription", "Description", 750),
    spec("ItemStackType", "Stack Type", 74),
    spec("ItemTier", "Tier", 74),
    spec("ItemActPass", "Active/Passive", 74),
    spec("Cooldown", "Cooldown", 74),
];

impl CatalogEntity for Item {
    const KIND: EntityKind = EntityKind::Item;
    const SCHEMA_VERSION: u8 = ITEM_SCHEMA_VERSION;
    const KEY_COLUMN: &'static str = "ItemName";
    const COLUMNS: &'static [FieldSpec] = ITEM_COLUMNS;

    fn key(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> Vec<(&'static FieldSpec, &str)> {
        let values: [&str; 7] = [
            &self.image,
            &self.name,
            &self.description,
            &self.stack_type,
            &self.tier,
            &self.active_passive,
            &self.cooldown,
        ];
        ITEM_COLUMNS.iter().zip(values).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Survivor {
    #[serde(rename = "SurvivorImg")]
    pub image: String,
    #[serde(rename = "SurvivorName")]
    pub name: String,
    #[serde(rename = "SurvivorHealth")]
    pub health: String,
    #[serde(rename = "SurvivorDamage")]
    pub damage: String,
    #[serde(rename = "SurvivorHPRegen")]
    pub hp_regen: String,
    #[serde(rename = "Class")]
    pub class: String,
    #[serde(rename = "SurvivorArmour")]
    pub armour: String,
    #[serde(rename = "SurvivorSpeed")]
    pub speed: String,
    #[serde(rename = "SurvivorMass")]
    pub mass: String,
    #[serde(rename = "SurvivorDescription")]
    pub description: String,
}

const SURVIVOR_COLUMNS: &[FieldSpec] = &[
    spec("SurvivorImg", "Image", 500),
    spec("SurvivorName", "Name", 74),
    spec("SurvivorHealth", "Health", 74),
    spec("SurvivorDamage", "Damage", 74),
    spec("SurvivorHPRegen", "HP Regen", 74),
    spec("Class", "Class", 74),
    spec("SurvivorArmour", "Armour", 74),
    spec("SurvivorSpeed", "Speed", 74),
    spec("SurvivorMass", "Mass", 100),
    spec("SurvivorDescription", "Description", 750),
];

impl CatalogEntity for Survivor {
    const KIND: EntityKind = EntityKind::Survivor;
    const SCHEMA_VERSION: u8 = SURVIVOR_SCHEMA_VERSION;
    const KEY_COLUMN: &'static str = "SurvivorName";
    const COLUMNS: &'static [FieldSpec] = SURVIVOR_COLUMNS;

    fn key(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> Vec<(&'static FieldSpec, &str)> {
        let values: [&str; 10] = [
            &self.image,
            &self.name,
            &self.health,
            &self.damage,
            &self.hp_regen,
            &self.class,
            &self.armour,
            &self.speed,
            &self.mass,
            &self.description,
        ];
        SURVIVOR_COLUMNS.iter().zip(values).collect()
    }
}
