//! Room-by-room condition assessment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Five-point ordinal condition rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Terrible,
    Poor,
    #[default]
    Fair,
    Good,
    Excellent,
}

impl Condition {
    pub fn score(&self) -> u32 {
        match self {
            Condition::Excellent => 100,
            Condition::Good => 80,
            Condition::Fair => 60,
            Condition::Poor => 40,
            Condition::Terrible => 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentAction {
    Repair,
    Replace,
    Upgrade,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentAssessment {
    #[serde(default)]
    pub needs_work: bool,
    #[serde(default)]
    pub action: Option<ComponentAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAssessment {
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub components: BTreeMap<String, ComponentAssessment>,
    #[serde(default)]
    pub notes: String,
}

impl RoomAssessment {
    pub fn components_needing_work(&self) -> impl Iterator<Item = (&str, &ComponentAssessment)> {
        self.components
            .iter()
            .filter(|(_, c)| c.needs_work)
            .map(|(k, c)| (k.as_str(), c))
    }
}

/// A room that can be assessed, keyed by its stable room key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomDefinition {
    pub key: &'static str,
    pub name: &'static str,
}

pub const ROOMS: &[RoomDefinition] = &[
    RoomDefinition { key: "living", name: "Living Room" },
    RoomDefinition { key: "kitchen", name: "Kitchen" },
    RoomDefinition { key: "master_bed", name: "Master Bedroom" },
    RoomDefinition { key: "master_bath", name: "Master Bath" },
    RoomDefinition { key: "bedroom2", name: "Bedroom 2" },
    RoomDefinition { key: "bedroom3", name: "Bedroom 3" },
    RoomDefinition { key: "bathroom2", name: "Bathroom 2" },
    RoomDefinition { key: "basement", name: "Basement" },
    RoomDefinition { key: "garage", name: "Garage" },
    RoomDefinition { key: "exterior", name: "Exterior" },
];

const KITCHEN_COMPONENTS: &[&str] = &[
    "cabinets",
    "countertops",
    "appliances",
    "flooring",
    "backsplash",
    "plumbing",
    "lighting",
];
const BATHROOM_COMPONENTS: &[&str] = &[
    "vanity",
    "toilet",
    "tub_shower",
    "flooring",
    "plumbing",
    "lighting",
    "ventilation",
];
const BEDROOM_COMPONENTS: &[&str] = &["flooring", "walls", "ceiling", "closet", "windows", "lighting"];
const GENERAL_COMPONENTS: &[&str] = &[
    "flooring", "walls", "ceiling", "windows", "doors", "lighting", "trim",
];

pub fn is_known_room(key: &str) -> bool {
    ROOMS.iter().any(|room| room.key == key)
}

/// Component checklist for a room key.
pub fn components_for_room(room_key: &str) -> &'static [&'static str] {
    if room_key == "kitchen" {
        KITCHEN_COMPONENTS
    } else if room_key.contains("bath") {
        BATHROOM_COMPONENTS
    } else if room_key.contains("bed") {
        BEDROOM_COMPONENTS
    } else {
        GENERAL_COMPONENTS
    }
}

/// Mean condition score across assessed rooms, rounded; 0 when none.
pub fn overall_condition_score(assessments: &BTreeMap<String, RoomAssessment>) -> u32 {
    if assessments.is_empty() {
        return 0;
    }
    let total: u32 = assessments.values().map(|a| a.condition.score()).sum();
    (total as f64 / assessments.len() as f64).round() as u32
}
