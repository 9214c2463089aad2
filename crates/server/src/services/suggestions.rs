//! Recipe suggestions ("what can I cook").
//!
//! Scores every recipe, selected or not, against current inventory. A line
//! counts as covered when the on-hand quantity meets the required quantity
//! in the same unit; coverage is quantity-aware, so half a recipe's flour
//! on hand is not a match but does shrink the missing amount.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::Serialize;

use larder_core::{IngredientId, RecipeId, format_quantity, normalize_unit};

use super::grocery::CrossUnitPolicy;
use super::parse_or_zero;
use crate::models::{InventoryItem, Recipe};

/// An ingredient line not fully covered by inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingIngredient {
    pub name: String,
    /// Shortfall after subtracting what is on hand, floored at zero and
    /// formatted back to a trimmed decimal string.
    pub missing_qty: String,
    /// Normalized unit; empty string for unitless lines.
    pub unit: String,
}

/// A recipe scored against current inventory.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeMatch {
    pub id: RecipeId,
    pub title: String,
    pub servings: i32,
    /// Share of ingredient lines fully covered, rounded to an integer
    /// percentage. A recipe with no ingredients matches vacuously at 100.
    pub match_percentage: u8,
    pub missing_ingredients: Vec<MissingIngredient>,
}

/// Score every recipe against inventory, most-cookable first.
///
/// Results sort descending by match percentage, then by title so equal
/// scores come out in a stable order.
#[must_use]
pub fn suggest_recipes(
    recipes: &[Recipe],
    inventory: &[InventoryItem],
    policy: CrossUnitPolicy,
) -> Vec<RecipeMatch> {
    // Inventory is catalog-keyed; index on-hand quantity per
    // (ingredient, unit) plus which units each ingredient is held in.
    let mut on_hand: HashMap<(IngredientId, String), Decimal> = HashMap::new();
    let mut owned_units: HashMap<IngredientId, HashSet<String>> = HashMap::new();
    for item in inventory {
        let quantity = parse_or_zero(&item.quantity, &item.ingredient_name);
        let unit = normalize_unit(item.unit.as_deref());
        if quantity > Decimal::ZERO {
            owned_units
                .entry(item.ingredient_id)
                .or_default()
                .insert(unit.clone());
        }
        *on_hand
            .entry((item.ingredient_id, unit))
            .or_insert(Decimal::ZERO) += quantity;
    }

    let mut results: Vec<RecipeMatch> = recipes
        .iter()
        .map(|recipe| score_recipe(recipe, &on_hand, &owned_units, policy))
        .collect();

    results.sort_by(|a, b| {
        b.match_percentage
            .cmp(&a.match_percentage)
            .then_with(|| a.title.cmp(&b.title))
    });

    results
}

fn score_recipe(
    recipe: &Recipe,
    on_hand: &HashMap<(IngredientId, String), Decimal>,
    owned_units: &HashMap<IngredientId, HashSet<String>>,
    policy: CrossUnitPolicy,
) -> RecipeMatch {
    let total = recipe.ingredients.len();
    if total == 0 {
        // Vacuous match: nothing required, nothing missing.
        return RecipeMatch {
            id: recipe.id,
            title: recipe.title.clone(),
            servings: recipe.servings,
            match_percentage: 100,
            missing_ingredients: Vec::new(),
        };
    }

    let mut covered = 0_usize;
    let mut missing_ingredients = Vec::new();

    for line in &recipe.ingredients {
        let required = parse_or_zero(&line.quantity, &line.name);
        let unit = normalize_unit(line.unit.as_deref());

        // Unresolved free-text lines are never covered: inventory is keyed
        // by catalog id, so there is nothing to compare against.
        let is_covered = line.ingredient_id.is_some_and(|id| {
            let available = on_hand
                .get(&(id, unit.clone()))
                .copied()
                .unwrap_or(Decimal::ZERO);
            if available >= required {
                return true;
            }
            policy == CrossUnitPolicy::FullOverlap
                && owned_units
                    .get(&id)
                    .is_some_and(|units| units.iter().any(|owned| owned != &unit))
        });

        if is_covered {
            covered += 1;
        } else {
            let available = line
                .ingredient_id
                .and_then(|id| on_hand.get(&(id, unit.clone())).copied())
                .unwrap_or(Decimal::ZERO);
            let shortfall = (required - available).max(Decimal::ZERO);
            missing_ingredients.push(MissingIngredient {
                name: line.name.clone(),
                missing_qty: format_quantity(shortfall),
                unit,
            });
        }
    }

    // Integer round-half-up; covered <= total keeps this in 0..=100.
    let match_percentage = u8::try_from((covered * 100 + total / 2) / total).unwrap_or(100);

    RecipeMatch {
        id: recipe.id,
        title: recipe.title.clone(),
        servings: recipe.servings,
        match_percentage,
        missing_ingredients,
    }
}

#[cfg(test)]
mod tests {
    use larder_core::RecipeIngredientId;

    use super::*;
    use crate::models::RecipeIngredient;

    fn recipe(title: &str, ingredients: Vec<RecipeIngredient>) -> Recipe {
        Recipe {
            id: RecipeId::generate(),
            title: title.to_owned(),
            servings: 2,
            instructions: None,
            is_selected: false,
            ingredients,
        }
    }

    fn line(
        ingredient_id: Option<IngredientId>,
        name: &str,
        quantity: &str,
        unit: Option<&str>,
    ) -> RecipeIngredient {
        RecipeIngredient {
            id: RecipeIngredientId::generate(),
            ingredient_id,
            name: name.to_owned(),
            quantity: quantity.to_owned(),
            unit: unit.map(str::to_owned),
            aisle: None,
        }
    }

    fn stock(
        ingredient_id: IngredientId,
        name: &str,
        quantity: &str,
        unit: Option<&str>,
    ) -> InventoryItem {
        InventoryItem {
            id: larder_core::InventoryItemId::generate(),
            ingredient_id,
            ingredient_name: name.to_owned(),
            quantity: quantity.to_owned(),
            unit: unit.map(str::to_owned),
        }
    }

    #[test]
    fn test_partial_flour_and_no_eggs() {
        // Needs flour 2 cups and eggs 3; pantry has 1 cup of flour.
        let flour = IngredientId::generate();
        let eggs = IngredientId::generate();
        let recipes = vec![recipe(
            "Pancakes",
            vec![
                line(Some(flour), "Flour", "2", Some("cups")),
                line(Some(eggs), "Eggs", "3", None),
            ],
        )];
        let inventory = vec![stock(flour, "Flour", "1", Some("cups"))];

        let results = suggest_recipes(&recipes, &inventory, CrossUnitPolicy::NoOverlap);
        let first = results.first().expect("one result");
        assert_eq!(first.match_percentage, 0);
        assert_eq!(
            first.missing_ingredients,
            vec![
                MissingIngredient {
                    name: "Flour".to_owned(),
                    missing_qty: "1".to_owned(),
                    unit: "cups".to_owned(),
                },
                MissingIngredient {
                    name: "Eggs".to_owned(),
                    missing_qty: "3".to_owned(),
                    unit: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_full_coverage_scores_100() {
        let rice = IngredientId::generate();
        let recipes = vec![recipe("Plain Rice", vec![line(Some(rice), "Rice", "1", Some("cups"))])];
        let inventory = vec![stock(rice, "Rice", "2", Some("cups"))];

        let results = suggest_recipes(&recipes, &inventory, CrossUnitPolicy::NoOverlap);
        let first = results.first().expect("one result");
        assert_eq!(first.match_percentage, 100);
        assert!(first.missing_ingredients.is_empty());
    }

    #[test]
    fn test_zero_ingredient_recipe_matches_vacuously() {
        let recipes = vec![recipe("Glass of Water", Vec::new())];

        let results = suggest_recipes(&recipes, &[], CrossUnitPolicy::NoOverlap);
        let first = results.first().expect("one result");
        assert_eq!(first.match_percentage, 100);
        assert!(first.missing_ingredients.is_empty());
    }

    #[test]
    fn test_match_is_monotone_in_inventory() {
        let flour = IngredientId::generate();
        let eggs = IngredientId::generate();
        let recipes = vec![recipe(
            "Pancakes",
            vec![
                line(Some(flour), "Flour", "2", Some("cups")),
                line(Some(eggs), "Eggs", "3", None),
            ],
        )];

        let mut last = 0;
        for flour_on_hand in ["0", "1", "2", "3"] {
            let inventory = vec![
                stock(flour, "Flour", flour_on_hand, Some("cups")),
                stock(eggs, "Eggs", "3", None),
            ];
            let results = suggest_recipes(&recipes, &inventory, CrossUnitPolicy::NoOverlap);
            let percentage = results.first().expect("one result").match_percentage;
            assert!(percentage >= last);
            last = percentage;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn test_rounding_of_partial_coverage() {
        // 1 of 3 lines covered → 33, 2 of 3 → 67.
        let a = IngredientId::generate();
        let b = IngredientId::generate();
        let c = IngredientId::generate();
        let recipes = vec![recipe(
            "Trio",
            vec![
                line(Some(a), "A", "1", None),
                line(Some(b), "B", "1", None),
                line(Some(c), "C", "1", None),
            ],
        )];

        let one = suggest_recipes(
            &recipes,
            &[stock(a, "A", "1", None)],
            CrossUnitPolicy::NoOverlap,
        );
        assert_eq!(one.first().expect("result").match_percentage, 33);

        let two = suggest_recipes(
            &recipes,
            &[stock(a, "A", "1", None), stock(b, "B", "1", None)],
            CrossUnitPolicy::NoOverlap,
        );
        assert_eq!(two.first().expect("result").match_percentage, 67);
    }

    #[test]
    fn test_sorted_descending_then_by_title() {
        let rice = IngredientId::generate();
        let tofu = IngredientId::generate();
        let recipes = vec![
            recipe("Tofu Bowl", vec![line(Some(tofu), "Tofu", "1", None)]),
            recipe("Rice Bowl", vec![line(Some(rice), "Rice", "1", Some("cups"))]),
            recipe("Beans", Vec::new()),
        ];
        let inventory = vec![stock(rice, "Rice", "2", Some("cups"))];

        let results = suggest_recipes(&recipes, &inventory, CrossUnitPolicy::NoOverlap);
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        // Both full matches first, tied at 100 and ordered by title.
        assert_eq!(titles, vec!["Beans", "Rice Bowl", "Tofu Bowl"]);
    }

    #[test]
    fn test_unresolved_free_text_is_never_covered() {
        let recipes = vec![recipe(
            "Mystery Dish",
            vec![line(None, "Grandma's Mix", "1", Some("jar"))],
        )];

        let results = suggest_recipes(&recipes, &[], CrossUnitPolicy::NoOverlap);
        let first = results.first().expect("one result");
        assert_eq!(first.match_percentage, 0);
        assert_eq!(
            first
                .missing_ingredients
                .first()
                .map(|m| m.name.as_str()),
            Some("Grandma's Mix")
        );
    }

    #[test]
    fn test_cross_unit_policy_controls_coverage() {
        // Needs flour in cups, pantry holds grams.
        let flour = IngredientId::generate();
        let recipes = vec![recipe(
            "Bread",
            vec![line(Some(flour), "Flour", "2", Some("cups"))],
        )];
        let inventory = vec![stock(flour, "Flour", "500", Some("g"))];

        let conservative = suggest_recipes(&recipes, &inventory, CrossUnitPolicy::NoOverlap);
        assert_eq!(conservative.first().expect("result").match_percentage, 0);

        let generous = suggest_recipes(&recipes, &inventory, CrossUnitPolicy::FullOverlap);
        assert_eq!(generous.first().expect("result").match_percentage, 100);
    }

    #[test]
    fn test_shortfall_never_negative() {
        // Unit mismatch leaves the line uncovered; the shortfall is still
        // the full requirement, never required minus the unrelated stock.
        let milk = IngredientId::generate();
        let recipes = vec![recipe(
            "Custard",
            vec![line(Some(milk), "Milk", "1", Some("cups"))],
        )];
        let inventory = vec![stock(milk, "Milk", "5", Some("l"))];

        let results = suggest_recipes(&recipes, &inventory, CrossUnitPolicy::NoOverlap);
        let missing = results
            .first()
            .expect("result")
            .missing_ingredients
            .first()
            .expect("missing line")
            .clone();
        assert_eq!(missing.missing_qty, "1");
        assert_eq!(missing.unit, "cups");
    }
}
