use crate::shared::normalize::normalize_name;
use contracts::enums::ingredient::{Allocation, Ingredient, IngredientFamily};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Normalized display name of every known ingredient
static NORMALIZED_INGREDIENTS: Lazy<Vec<(Ingredient, String)>> = Lazy::new(|| {
    Ingredient::all()
        .into_iter()
        .map(|i| (i, normalize_name(i.display_name())))
        .collect()
});

/// Powder and syrup grams allocated to individual ingredients
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientSplit {
    pub powder: Allocation,
    pub syrup: Allocation,
}

impl IngredientSplit {
    /// Both families present with every member at 0.0
    pub fn zeroed() -> Self {
        Self {
            powder: IngredientFamily::Powder.zeroed(),
            syrup: IngredientFamily::Syrup.zeroed(),
        }
    }

    fn allocation_mut(&mut self, family: IngredientFamily) -> &mut Allocation {
        match family {
            IngredientFamily::Powder => &mut self.powder,
            IngredientFamily::Syrup => &mut self.syrup,
        }
    }
}

/// Splits an order line's powder and syrup mass across the ingredients named
/// in its comma-separated ingredient text.
///
/// Each family is handled on its own: the family total is shared equally by
/// the members the text names. Unknown names are ignored, and a family with
/// no named member or a non-positive total keeps all zeros.
pub fn split_usage(ingredients: Option<&str>, total_powder: f64, total_syrup: f64) -> IngredientSplit {
    let mut split = IngredientSplit::zeroed();

    let Some(text) = ingredients.filter(|t| !t.trim().is_empty()) else {
        return split;
    };

    let tokens: HashSet<String> = text.split(',').map(normalize_name).collect();

    for family in IngredientFamily::ALL {
        let total = match family {
            IngredientFamily::Powder => total_powder,
            IngredientFamily::Syrup => total_syrup,
        };
        if total.is_nan() || total <= 0.0 {
            continue;
        }

        let used: Vec<Ingredient> = NORMALIZED_INGREDIENTS
            .iter()
            .filter(|(i, normalized)| i.family() == family && tokens.contains(normalized))
            .map(|(i, _)| *i)
            .collect();
        if used.is_empty() {
            continue;
        }

        let share = total / used.len() as f64;
        let allocation = split.allocation_mut(family);
        for ingredient in used {
            allocation.insert(ingredient, share);
        }
    }

    split
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn all_zero(split: &IngredientSplit) -> bool {
        split.powder.values().chain(split.syrup.values()).all(|v| *v == 0.0)
    }

    #[test]
    fn test_absent_or_blank_text_is_zeroed() {
        for text in [None, Some(""), Some("   ")] {
            let split = split_usage(text, 100.0, 50.0);
            assert_eq!(split.powder.len(), 6);
            assert_eq!(split.syrup.len(), 6);
            assert!(all_zero(&split));
        }
    }

    #[test]
    fn test_single_powder_gets_everything() {
        let split = split_usage(Some("원두, 밀크 파우더, 물"), 192.0, 0.0);
        assert!(approx(split.powder[&Ingredient::MilkPowder], 192.0));
        assert!(approx(split.powder.values().sum::<f64>(), 192.0));
        assert!(split.syrup.values().all(|v| *v == 0.0));
    }

    #[test]
    fn test_blended_syrups_split_equally() {
        let split = split_usage(Some("레몬 시럽, 메론 시럽"), 0.0, 68.0);
        assert!(approx(split.syrup[&Ingredient::LemonSyrup], 34.0));
        assert!(approx(split.syrup[&Ingredient::MelonSyrup], 34.0));
        assert!(approx(split.syrup[&Ingredient::PeachSyrup], 0.0));
        assert!(split.powder.values().all(|v| *v == 0.0));
    }

    #[test]
    fn test_mass_conserved_for_k_powders() {
        let text = "밀크 파우더,바닐라 파우더,초코 파우더";
        let split = split_usage(Some(text), 100.0, 0.0);
        for i in [
            Ingredient::MilkPowder,
            Ingredient::VanillaPowder,
            Ingredient::ChocoPowder,
        ] {
            assert!(approx(split.powder[&i], 100.0 / 3.0));
        }
        assert!(approx(split.powder.values().sum::<f64>(), 100.0));
        assert_eq!(split.powder[&Ingredient::GreenTeaPowder], 0.0);
    }

    #[test]
    fn test_families_are_independent() {
        let split = split_usage(Some("녹차 파우더, 청포도 시럽"), 64.0, 34.0);
        assert!(approx(split.powder[&Ingredient::GreenTeaPowder], 64.0));
        assert!(approx(split.syrup[&Ingredient::GreenGrapeSyrup], 34.0));
    }

    #[test]
    fn test_names_match_after_normalization() {
        let split = split_usage(Some("  밀크파우더 ,얼그레이레몬-하이볼 시럽"), 10.0, 10.0);
        assert!(approx(split.powder[&Ingredient::MilkPowder], 10.0));
        assert!(approx(split.syrup[&Ingredient::EarlGreyLemonHighballSyrup], 10.0));
    }

    #[test]
    fn test_unknown_names_or_no_mass_give_zero() {
        assert!(all_zero(&split_usage(Some("원두, 물, 얼음"), 100.0, 100.0)));
        assert!(all_zero(&split_usage(Some("밀크 파우더, 레몬 시럽"), 0.0, 0.0)));
        assert!(all_zero(&split_usage(Some("밀크 파우더"), f64::NAN, 0.0)));
    }
}
