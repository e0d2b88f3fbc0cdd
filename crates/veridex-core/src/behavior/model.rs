use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed category vocabulary.
///
/// Declaration order is the order tokens are searched for in model
/// responses, so it must not be reshuffled casually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Camera,
    Social,
    Game,
    Productivity,
    Music,
    Video,
    Shopping,
    News,
    Weather,
    Finance,
    Health,
    Education,
    Travel,
    Communication,
    Utility,
    Other,
}

impl Category {
    /// Every vocabulary token, in declaration order.
    pub const ALL: &'static [Category] = &[
        Category::Camera,
        Category::Social,
        Category::Game,
        Category::Productivity,
        Category::Music,
        Category::Video,
        Category::Shopping,
        Category::News,
        Category::Weather,
        Category::Finance,
        Category::Health,
        Category::Education,
        Category::Travel,
        Category::Communication,
        Category::Utility,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Camera => "CAMERA",
            Category::Social => "SOCIAL",
            Category::Game => "GAME",
            Category::Productivity => "PRODUCTIVITY",
            Category::Music => "MUSIC",
            Category::Video => "VIDEO",
            Category::Shopping => "SHOPPING",
            Category::News => "NEWS",
            Category::Weather => "WEATHER",
            Category::Finance => "FINANCE",
            Category::Health => "HEALTH",
            Category::Education => "EDUCATION",
            Category::Travel => "TRAVEL",
            Category::Communication => "COMMUNICATION",
            Category::Utility => "UTILITY",
            Category::Other => "OTHER",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected behavior profile for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorTemplate {
    pub category: Category,

    pub expected_permissions: BTreeSet<String>,

    pub expected_apis: BTreeSet<String>,

    /// Permissions an honest member of this category cannot work without.
    /// Always a subset of `expected_permissions`, and only ever sourced
    /// from the static tables; the model never contributes core entries.
    pub core_permissions: BTreeSet<String>,
}
