use serde::{Deserialize, Serialize};

/// Food labels that carry meaning for evolution decisions.
///
/// The food history stores raw labels; anything not listed here is still
/// recorded and still counts toward the biotype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    Fish,
    Meat,
    Vegetal,
    Fruit,
}

impl FoodKind {
    pub const ALL: [FoodKind; 4] = [
        FoodKind::Fish,
        FoodKind::Meat,
        FoodKind::Vegetal,
        FoodKind::Fruit,
    ];

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Fish" => Some(Self::Fish),
            "Meat" => Some(Self::Meat),
            "Vegetal" => Some(Self::Vegetal),
            // Older clients send the Portuguese label.
            "Fruit" | "Fruta" => Some(Self::Fruit),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Fish => "Fish",
            Self::Meat => "Meat",
            Self::Vegetal => "Vegetal",
            Self::Fruit => "Fruit",
        }
    }
}
