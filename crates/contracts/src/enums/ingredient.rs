use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grams of ground beans per bag
pub const BEAN_BAG_GRAMS: f64 = 1000.0;

/// Grams allocated to each ingredient of one family.
/// Built through [`IngredientFamily::zeroed`] so every member key is present.
pub type Allocation = BTreeMap<Ingredient, f64>;

/// Dosed ingredient families.
///
/// A family owns its dispenser flow rate, its package size and its members,
/// so adding an ingredient is a change to [`IngredientFamily::members`] only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientFamily {
    Powder,
    Syrup,
}

impl IngredientFamily {
    pub const ALL: [IngredientFamily; 2] = [IngredientFamily::Powder, IngredientFamily::Syrup];

    /// Dispenser flow rate, grams per second of dose time
    pub fn grams_per_second(&self) -> f64 {
        match self {
            IngredientFamily::Powder => 6.4,
            IngredientFamily::Syrup => 3.4,
        }
    }

    /// Grams in one restocking package (bag of powder, container of syrup)
    pub fn package_grams(&self) -> f64 {
        match self {
            IngredientFamily::Powder => 1000.0,
            IngredientFamily::Syrup => 1300.0,
        }
    }

    /// Column suffix used for package counts in exported sheets
    pub fn package_label(&self) -> &'static str {
        match self {
            IngredientFamily::Powder => "봉 수",
            IngredientFamily::Syrup => "통 수",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            IngredientFamily::Powder => "파우더",
            IngredientFamily::Syrup => "시럽",
        }
    }

    pub fn members(&self) -> &'static [Ingredient] {
        match self {
            IngredientFamily::Powder => &[
                Ingredient::MilkPowder,
                Ingredient::VanillaPowder,
                Ingredient::ChocoPowder,
                Ingredient::ToffeeNutPowder,
                Ingredient::GreenTangerinePowder,
                Ingredient::GreenTeaPowder,
            ],
            IngredientFamily::Syrup => &[
                Ingredient::LemonSyrup,
                Ingredient::MelonSyrup,
                Ingredient::PeachSyrup,
                Ingredient::GreenGrapeSyrup,
                Ingredient::PassionFruitSyrup,
                Ingredient::EarlGreyLemonHighballSyrup,
            ],
        }
    }

    /// Allocation with every member set to 0.0
    pub fn zeroed(&self) -> Allocation {
        self.members().iter().map(|i| (*i, 0.0)).collect()
    }
}

/// Canonical dosed ingredients, serialized by their display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ingredient {
    #[serde(rename = "밀크 파우더")]
    MilkPowder,
    #[serde(rename = "바닐라 파우더")]
    VanillaPowder,
    #[serde(rename = "초코 파우더")]
    ChocoPowder,
    #[serde(rename = "토피넛 파우더")]
    ToffeeNutPowder,
    #[serde(rename = "청귤 파우더")]
    GreenTangerinePowder,
    #[serde(rename = "녹차 파우더")]
    GreenTeaPowder,
    #[serde(rename = "레몬 시럽")]
    LemonSyrup,
    #[serde(rename = "메론 시럽")]
    MelonSyrup,
    #[serde(rename = "복숭아 시럽")]
    PeachSyrup,
    #[serde(rename = "청포도 시럽")]
    GreenGrapeSyrup,
    #[serde(rename = "패션후르츠 시럽")]
    PassionFruitSyrup,
    #[serde(rename = "얼그레이레몬 하이볼 시럽")]
    EarlGreyLemonHighballSyrup,
}

impl Ingredient {
    /// Name as written in recipe tables and report headers
    pub fn display_name(&self) -> &'static str {
        match self {
            Ingredient::MilkPowder => "밀크 파우더",
            Ingredient::VanillaPowder => "바닐라 파우더",
            Ingredient::ChocoPowder => "초코 파우더",
            Ingredient::ToffeeNutPowder => "토피넛 파우더",
            Ingredient::GreenTangerinePowder => "청귤 파우더",
            Ingredient::GreenTeaPowder => "녹차 파우더",
            Ingredient::LemonSyrup => "레몬 시럽",
            Ingredient::MelonSyrup => "메론 시럽",
            Ingredient::PeachSyrup => "복숭아 시럽",
            Ingredient::GreenGrapeSyrup => "청포도 시럽",
            Ingredient::PassionFruitSyrup => "패션후르츠 시럽",
            Ingredient::EarlGreyLemonHighballSyrup => "얼그레이레몬 하이볼 시럽",
        }
    }

    pub fn family(&self) -> IngredientFamily {
        match self {
            Ingredient::MilkPowder
            | Ingredient::VanillaPowder
            | Ingredient::ChocoPowder
            | Ingredient::ToffeeNutPowder
            | Ingredient::GreenTangerinePowder
            | Ingredient::GreenTeaPowder => IngredientFamily::Powder,
            _ => IngredientFamily::Syrup,
        }
    }

    /// All ingredients, powders first
    pub fn all() -> Vec<Ingredient> {
        IngredientFamily::ALL
            .iter()
            .flat_map(|f| f.members().iter().copied())
            .collect()
    }
}

impl std::fmt::Display for Ingredient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
