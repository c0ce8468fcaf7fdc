//! # Snapshot Wire Record
//!
//! The key-value backend stores each date's sheet in a fixed-cardinality
//! record. Sections map onto it as follows:
//!
//! | Section        | Record field   | Slots |
//! |----------------|----------------|-------|
//! | Opening stock  | `inventory`    | 7     |
//! | Purchase       | `skills`       | 10    |
//! | Sales          | `abilities`    | 6     |
//! | Suspense       | `combat_stats` | 4     |
//!
//! Quantities cross the wire as scaled integers (value × 1000), in both
//! directions. Short sections are padded with placeholder rows of quantity 0;
//! rows beyond the slot count are dropped.

use serde::{Deserialize, Serialize};

use crate::number_format::QUANTITY_SCALE;
use crate::sheet::{Section, StockSheet, StockSheetRow};

pub const INVENTORY_SLOTS: usize = 7;
pub const SKILL_SLOTS: usize = 10;
pub const ABILITY_SLOTS: usize = 6;
pub const COMBAT_STAT_SLOTS: usize = 4;

const PURCHASE_CATEGORY: &str = "Purchase";
const DEFAULT_HIT_DICE: &str = "1d8";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySlot {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Quantity × 1000
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSlot {
    pub name: String,
    pub associated_ability: String,
    /// Carried for shape compatibility; never read
    pub is_proficient: bool,
    /// Quantity × 1000
    pub modifier: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: i64,
    pub dexterity: i64,
    pub constitution: i64,
    pub intelligence: i64,
    pub wisdom: i64,
    pub charisma: i64,
}

impl AbilityScores {
    fn from_slots(slots: [i64; ABILITY_SLOTS]) -> Self {
        let [strength, dexterity, constitution, intelligence, wisdom, charisma] = slots;
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        }
    }

    fn slots(&self) -> [i64; ABILITY_SLOTS] {
        [
            self.strength,
            self.dexterity,
            self.constitution,
            self.intelligence,
            self.wisdom,
            self.charisma,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    pub hit_points: i64,
    pub speed: i64,
    pub base_armor_class: i64,
    pub initiative: i64,
    pub hit_dice: String,
}

impl CombatStats {
    fn from_slots(slots: [i64; COMBAT_STAT_SLOTS]) -> Self {
        let [hit_points, speed, base_armor_class, initiative] = slots;
        Self {
            hit_points,
            speed,
            base_armor_class,
            initiative,
            hit_dice: DEFAULT_HIT_DICE.to_string(),
        }
    }

    fn slots(&self) -> [i64; COMBAT_STAT_SLOTS] {
        [self.hit_points, self.speed, self.base_armor_class, self.initiative]
    }
}

/// The backend's fixed-shape value for one date key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub inventory: Vec<InventorySlot>,
    pub skills: Vec<SkillSlot>,
    pub abilities: AbilityScores,
    pub combat_stats: CombatStats,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordShapeError {
    #[error("inventory must have exactly {expected} slots, got {actual}")]
    InventorySlots { expected: usize, actual: usize },
    #[error("skills must have exactly {expected} slots, got {actual}")]
    SkillSlots { expected: usize, actual: usize },
}

/// Convert a committed quantity into its wire form.
pub fn to_scaled(quantity: f64) -> i64 {
    let scaled = (quantity * QUANTITY_SCALE).round();
    if scaled.is_finite() {
        scaled as i64
    } else {
        0
    }
}

/// Convert a wire integer back into a quantity.
pub fn from_scaled(scaled: i64) -> f64 {
    scaled as f64 / QUANTITY_SCALE
}

/// Pad `rows` with placeholders up to `slots`, dropping anything past it.
fn fit_rows(rows: &[StockSheetRow], slots: usize, section: Section) -> Vec<StockSheetRow> {
    let mut fitted: Vec<StockSheetRow> = rows.iter().take(slots).cloned().collect();
    while fitted.len() < slots {
        fitted.push(StockSheetRow::new(section.placeholder_name(fitted.len()), 0.0));
    }
    fitted
}

fn scaled_slots<const N: usize>(rows: &[StockSheetRow], section: Section) -> [i64; N] {
    let mut slots = [0i64; N];
    for (slot, row) in slots.iter_mut().zip(fit_rows(rows, N, section)) {
        *slot = to_scaled(row.quantity);
    }
    slots
}

fn named_rows(section: Section, scaled: &[i64]) -> Vec<StockSheetRow> {
    scaled
        .iter()
        .enumerate()
        .map(|(i, value)| StockSheetRow::new(section.placeholder_name(i), from_scaled(*value)))
        .collect()
}

impl SnapshotRecord {
    /// Map editable rows into the fixed record shape.
    pub fn from_sheet(sheet: &StockSheet) -> Self {
        let inventory = fit_rows(&sheet.opening_stock, INVENTORY_SLOTS, Section::OpeningStock)
            .into_iter()
            .map(|row| InventorySlot {
                name: row.name,
                description: String::new(),
                weight: None,
                quantity: to_scaled(row.quantity),
            })
            .collect();

        let skills = fit_rows(&sheet.purchase, SKILL_SLOTS, Section::Purchase)
            .into_iter()
            .map(|row| SkillSlot {
                name: row.name,
                associated_ability: PURCHASE_CATEGORY.to_string(),
                is_proficient: false,
                modifier: to_scaled(row.quantity),
            })
            .collect();

        Self {
            inventory,
            skills,
            abilities: AbilityScores::from_slots(scaled_slots(&sheet.sales, Section::Sales)),
            combat_stats: CombatStats::from_slots(scaled_slots(&sheet.suspense, Section::Suspense)),
        }
    }

    /// Map the record back into editable rows.
    ///
    /// The ability and combat blocks carry no names, so those rows come back
    /// with placeholder party names.
    pub fn to_sheet(&self) -> StockSheet {
        StockSheet {
            opening_stock: self
                .inventory
                .iter()
                .take(INVENTORY_SLOTS)
                .map(|slot| StockSheetRow::new(slot.name.clone(), from_scaled(slot.quantity)))
                .collect(),
            purchase: self
                .skills
                .iter()
                .take(SKILL_SLOTS)
                .map(|slot| StockSheetRow::new(slot.name.clone(), from_scaled(slot.modifier)))
                .collect(),
            sales: named_rows(Section::Sales, &self.abilities.slots()),
            suspense: named_rows(Section::Suspense, &self.combat_stats.slots()),
        }
    }

    /// Check slot counts. The named blocks are fixed by their types.
    pub fn validate(&self) -> Result<(), RecordShapeError> {
        if self.inventory.len() != INVENTORY_SLOTS {
            return Err(RecordShapeError::InventorySlots {
                expected: INVENTORY_SLOTS,
                actual: self.inventory.len(),
            });
        }
        if self.skills.len() != SKILL_SLOTS {
            return Err(RecordShapeError::SkillSlots {
                expected: SKILL_SLOTS,
                actual: self.skills.len(),
            });
        }
        Ok(())
    }
}
