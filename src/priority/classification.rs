/// Category classification for priority analysis
///
/// Scope items carry a free-text category label. The priority matrix works
/// on a closed set of classes instead; catalog entries declare their class
/// explicitly and free-text items fall back to keyword matching.
use serde::{Deserialize, Serialize};

/// Coarse classification of a renovation item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryClass {
    /// Life-safety and code compliance work
    Safety,
    /// Foundation, roof and load-bearing work
    Structural,
    /// Electrical, plumbing and HVAC
    Systems,
    /// Paint, flooring and finish work
    Cosmetic,
    /// Everything else
    Optional,
}

/// Keyword rules in precedence order. The first rule with a matching
/// keyword wins, so "plumbing safety" classifies as systems.
const KEYWORD_RULES: &[(CategoryClass, &[&str])] = &[
    (CategoryClass::Systems, &["electrical", "plumbing", "hvac"]),
    (CategoryClass::Structural, &["foundation", "roof", "structural"]),
    (CategoryClass::Safety, &["safety", "code"]),
    (CategoryClass::Cosmetic, &["paint", "flooring", "cosmetic"]),
];

impl CategoryClass {
    pub const ALL: [CategoryClass; 5] = [
        CategoryClass::Safety,
        CategoryClass::Structural,
        CategoryClass::Systems,
        CategoryClass::Cosmetic,
        CategoryClass::Optional,
    ];

    /// Classify a free-text category label (case-insensitive substring match).
    pub fn from_label(label: &str) -> Self {
        let lowered = label.to_lowercase();
        KEYWORD_RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(class, _)| *class)
            .unwrap_or(CategoryClass::Optional)
    }

    /// Additional urgency granted to the class.
    pub fn urgency_bonus(&self) -> i32 {
        match self {
            CategoryClass::Safety => 20,
            CategoryClass::Structural => 15,
            CategoryClass::Systems => 10,
            CategoryClass::Cosmetic | CategoryClass::Optional => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryClass::Safety => "safety",
            CategoryClass::Structural => "structural",
            CategoryClass::Systems => "systems",
            CategoryClass::Cosmetic => "cosmetic",
            CategoryClass::Optional => "optional",
        }
    }
}

impl std::fmt::Display for CategoryClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
