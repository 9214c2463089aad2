//! Grocery list aggregation.
//!
//! Computes, from the user's selected recipes and current inventory, what
//! still has to be bought, grouped by store aisle. The computation is pure
//! and runs fresh on every request; there is no cached list anywhere that a
//! mutation could leave stale.
//!
//! Requirements are keyed by `(ingredient, unit)`. Units are never
//! converted: a recipe needing flour in cups and another needing flour in
//! grams produce two separate lines. How inventory held in a *different*
//! unit counts against a requirement is the one genuinely open product
//! decision, so it is an explicit [`CrossUnitPolicy`] parameter rather than
//! a buried branch.

use std::collections::{BTreeMap, HashMap, HashSet};

use rust_decimal::Decimal;
use serde::Serialize;

use larder_core::{IngredientId, format_quantity, normalize_unit};

use super::parse_or_zero;
use crate::models::{InventoryItem, Recipe, RecipeIngredient};

/// Aisle bucket for lines that have no catalog aisle: unresolved free-text
/// ingredients, and catalog entries without an aisle assignment.
pub const OTHER_AISLE: &str = "Other";

/// How inventory held in a different unit counts against a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossUnitPolicy {
    /// A different unit is zero overlap; the full requirement is shown.
    /// Conservative default: worst case the user buys something they
    /// already had.
    #[default]
    NoOverlap,
    /// Owning the ingredient in any unit covers the requirement entirely.
    FullOverlap,
}

/// One line of the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroceryItem {
    pub name: String,
    /// Remaining needed quantity, formatted back to a trimmed decimal string.
    pub quantity: String,
    /// Normalized unit; empty string for unitless lines.
    pub unit: String,
}

/// The computed shopping list.
///
/// `has_selection` distinguishes "nothing to buy" from "no recipes
/// selected"; both render as an empty list but callers may care.
#[derive(Debug, Clone)]
pub struct GroceryList {
    pub has_selection: bool,
    /// Aisle name → items, each aisle sorted by ingredient name.
    pub aisles: BTreeMap<String, Vec<GroceryItem>>,
}

/// Canonical identity of an ingredient line: the catalog id when bound,
/// else the normalized free-text name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum LineKey {
    Catalog(IngredientId),
    FreeText(String),
}

fn line_key(line: &RecipeIngredient) -> LineKey {
    line.ingredient_id.map_or_else(
        || LineKey::FreeText(line.name.trim().to_lowercase()),
        LineKey::Catalog,
    )
}

/// An aggregated requirement for one `(ingredient, unit)` pair.
struct Requirement {
    name: String,
    aisle: Option<String>,
    quantity: Decimal,
}

/// Compute the shopping list: sum the selected recipes' requirements,
/// subtract same-unit inventory, drop what is covered, group by aisle.
#[must_use]
pub fn generate_grocery_list(
    selected: &[Recipe],
    inventory: &[InventoryItem],
    policy: CrossUnitPolicy,
) -> GroceryList {
    // 1. Sum requirements per (ingredient, unit) across all selected recipes.
    let mut needed: HashMap<(LineKey, String), Requirement> = HashMap::new();
    for recipe in selected {
        for line in &recipe.ingredients {
            let quantity = parse_or_zero(&line.quantity, &line.name);
            let key = (line_key(line), normalize_unit(line.unit.as_deref()));
            needed
                .entry(key)
                .and_modify(|req| req.quantity += quantity)
                .or_insert_with(|| Requirement {
                    name: line.name.clone(),
                    aisle: line.aisle.clone(),
                    quantity,
                });
        }
    }

    // 2. Index on-hand quantities the same way. Inventory is catalog-keyed,
    //    so free-text lines can never be covered by it.
    let mut on_hand: HashMap<(LineKey, String), Decimal> = HashMap::new();
    let mut owned_units: HashMap<LineKey, HashSet<String>> = HashMap::new();
    for item in inventory {
        let quantity = parse_or_zero(&item.quantity, &item.ingredient_name);
        let key = LineKey::Catalog(item.ingredient_id);
        let unit = normalize_unit(item.unit.as_deref());
        if quantity > Decimal::ZERO {
            owned_units.entry(key.clone()).or_default().insert(unit.clone());
        }
        *on_hand.entry((key, unit)).or_insert(Decimal::ZERO) += quantity;
    }

    // 3. Subtract, drop covered lines, group the rest by aisle.
    let mut aisles: BTreeMap<String, Vec<GroceryItem>> = BTreeMap::new();
    for ((key, unit), requirement) in needed {
        let available = on_hand
            .get(&(key.clone(), unit.clone()))
            .copied()
            .unwrap_or(Decimal::ZERO);
        let mut remaining = requirement.quantity - available;

        if policy == CrossUnitPolicy::FullOverlap
            && owned_units
                .get(&key)
                .is_some_and(|units| units.iter().any(|owned| owned != &unit))
        {
            remaining = Decimal::ZERO;
        }

        if remaining <= Decimal::ZERO {
            continue;
        }

        let aisle = requirement
            .aisle
            .unwrap_or_else(|| OTHER_AISLE.to_owned());
        aisles.entry(aisle).or_default().push(GroceryItem {
            name: requirement.name,
            quantity: format_quantity(remaining),
            unit,
        });
    }

    for items in aisles.values_mut() {
        items.sort_by(|a, b| a.name.cmp(&b.name));
    }

    GroceryList {
        has_selection: !selected.is_empty(),
        aisles,
    }
}

#[cfg(test)]
mod tests {
    use larder_core::{RecipeId, RecipeIngredientId};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    use super::*;

    fn recipe(title: &str, ingredients: Vec<RecipeIngredient>) -> Recipe {
        Recipe {
            id: RecipeId::generate(),
            title: title.to_owned(),
            servings: 4,
            instructions: None,
            is_selected: true,
            ingredients,
        }
    }

    fn line(
        ingredient_id: Option<IngredientId>,
        name: &str,
        quantity: &str,
        unit: Option<&str>,
        aisle: Option<&str>,
    ) -> RecipeIngredient {
        RecipeIngredient {
            id: RecipeIngredientId::generate(),
            ingredient_id,
            name: name.to_owned(),
            quantity: quantity.to_owned(),
            unit: unit.map(str::to_owned),
            aisle: aisle.map(str::to_owned),
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

    fn all_items(list: &GroceryList) -> Vec<&GroceryItem> {
        list.aisles.values().flatten().collect()
    }

    #[test]
    fn test_no_selection_yields_empty_list() {
        let list = generate_grocery_list(&[], &[], CrossUnitPolicy::NoOverlap);
        assert!(!list.has_selection);
        assert!(list.aisles.is_empty());
    }

    #[test]
    fn test_fully_stocked_selection_is_distinct_from_no_selection() {
        let flour = IngredientId::generate();
        let recipes = vec![recipe(
            "Bread",
            vec![line(Some(flour), "Flour", "2", Some("cups"), Some("Baking"))],
        )];
        let inventory = vec![stock(flour, "Flour", "3", Some("cups"))];

        let list = generate_grocery_list(&recipes, &inventory, CrossUnitPolicy::NoOverlap);
        assert!(list.has_selection);
        assert!(list.aisles.is_empty());
    }

    #[test]
    fn test_sums_requirements_across_recipes() {
        // Recipe A needs 1 cup of sugar, recipe B needs 2; pantry has 1.
        let sugar = IngredientId::generate();
        let recipes = vec![
            recipe(
                "Cookies",
                vec![line(Some(sugar), "Sugar", "1", Some("cups"), Some("Baking"))],
            ),
            recipe(
                "Cake",
                vec![line(Some(sugar), "Sugar", "2", Some("cups"), Some("Baking"))],
            ),
        ];
        let inventory = vec![stock(sugar, "Sugar", "1", Some("cups"))];

        let list = generate_grocery_list(&recipes, &inventory, CrossUnitPolicy::NoOverlap);
        let baking = list.aisles.get("Baking").expect("baking aisle");
        assert_eq!(
            baking,
            &vec![GroceryItem {
                name: "Sugar".to_owned(),
                quantity: "2".to_owned(),
                unit: "cups".to_owned(),
            }]
        );
    }

    #[test]
    fn test_no_entry_is_ever_zero_or_negative() {
        let flour = IngredientId::generate();
        let eggs = IngredientId::generate();
        let recipes = vec![recipe(
            "Pancakes",
            vec![
                line(Some(flour), "Flour", "2", Some("cups"), Some("Baking")),
                line(Some(eggs), "Eggs", "3", None, Some("Dairy")),
            ],
        )];
        // Flour exactly covered, eggs over-covered.
        let inventory = vec![
            stock(flour, "Flour", "2", Some("cups")),
            stock(eggs, "Eggs", "12", None),
        ];

        let list = generate_grocery_list(&recipes, &inventory, CrossUnitPolicy::NoOverlap);
        assert!(list.aisles.is_empty());
        for item in all_items(&list) {
            let quantity = Decimal::from_str(&item.quantity).expect("decimal quantity");
            assert!(quantity > Decimal::ZERO);
        }
    }

    #[test]
    fn test_groups_by_aisle_with_other_bucket() {
        let salt = IngredientId::generate();
        let recipes = vec![recipe(
            "Stew",
            vec![
                line(Some(salt), "Salt", "1", Some("tsp"), Some("Spices")),
                // Free-text line, never bound: no aisle
                line(None, "Secret Spice Mix", "1", Some("tbsp"), None),
            ],
        )];

        let list = generate_grocery_list(&recipes, &[], CrossUnitPolicy::NoOverlap);
        assert!(list.aisles.contains_key("Spices"));
        let other = list.aisles.get(OTHER_AISLE).expect("other bucket");
        assert_eq!(other.len(), 1);
        assert_eq!(other.first().map(|i| i.name.as_str()), Some("Secret Spice Mix"));
    }

    #[test]
    fn test_same_ingredient_different_units_stay_separate() {
        let flour = IngredientId::generate();
        let recipes = vec![
            recipe(
                "Bread",
                vec![line(Some(flour), "Flour", "2", Some("cups"), Some("Baking"))],
            ),
            recipe(
                "Pasta",
                vec![line(Some(flour), "Flour", "500", Some("g"), Some("Baking"))],
            ),
        ];

        let list = generate_grocery_list(&recipes, &[], CrossUnitPolicy::NoOverlap);
        let baking = list.aisles.get("Baking").expect("baking aisle");
        assert_eq!(baking.len(), 2);
        let units: Vec<&str> = baking.iter().map(|i| i.unit.as_str()).collect();
        assert!(units.contains(&"cups"));
        assert!(units.contains(&"g"));
    }

    #[test]
    fn test_cross_unit_inventory_policies() {
        // Need flour in cups, own flour in grams.
        let flour = IngredientId::generate();
        let recipes = vec![recipe(
            "Bread",
            vec![line(Some(flour), "Flour", "2", Some("cups"), Some("Baking"))],
        )];
        let inventory = vec![stock(flour, "Flour", "500", Some("g"))];

        // NoOverlap: the full requirement survives.
        let conservative =
            generate_grocery_list(&recipes, &inventory, CrossUnitPolicy::NoOverlap);
        let baking = conservative.aisles.get("Baking").expect("baking aisle");
        assert_eq!(baking.first().map(|i| i.quantity.as_str()), Some("2"));

        // FullOverlap: owning the ingredient in any unit covers it.
        let generous = generate_grocery_list(&recipes, &inventory, CrossUnitPolicy::FullOverlap);
        assert!(generous.aisles.is_empty());
    }

    #[test]
    fn test_unit_comparison_is_normalized() {
        let milk = IngredientId::generate();
        let recipes = vec![recipe(
            "Porridge",
            vec![line(Some(milk), "Milk", "2", Some(" Cups "), Some("Dairy"))],
        )];
        let inventory = vec![stock(milk, "Milk", "1", Some("cups"))];

        let list = generate_grocery_list(&recipes, &inventory, CrossUnitPolicy::NoOverlap);
        let dairy = list.aisles.get("Dairy").expect("dairy aisle");
        assert_eq!(dairy.first().map(|i| i.quantity.as_str()), Some("1"));
    }

    #[test]
    fn test_malformed_quantity_does_not_abort_aggregation() {
        let salt = IngredientId::generate();
        let rice = IngredientId::generate();
        let recipes = vec![recipe(
            "Dinner",
            vec![
                line(Some(salt), "Salt", "a pinch", Some("tsp"), Some("Spices")),
                line(Some(rice), "Rice", "2", Some("cups"), Some("Grains")),
            ],
        )];

        let list = generate_grocery_list(&recipes, &[], CrossUnitPolicy::NoOverlap);
        // The bad line parses as zero and drops out; the good line survives.
        assert!(!list.aisles.contains_key("Spices"));
        let grains = list.aisles.get("Grains").expect("grains aisle");
        assert_eq!(grains.first().map(|i| i.quantity.as_str()), Some("2"));
    }

    #[test]
    fn test_free_text_lines_merge_case_insensitively() {
        let recipes = vec![
            recipe("Pesto", vec![line(None, "Basil", "1", Some("bunch"), None)]),
            recipe("Salad", vec![line(None, "basil", "2", Some("bunch"), None)]),
        ];

        let list = generate_grocery_list(&recipes, &[], CrossUnitPolicy::NoOverlap);
        let other = list.aisles.get(OTHER_AISLE).expect("other bucket");
        assert_eq!(other.len(), 1);
        assert_eq!(other.first().map(|i| i.quantity.as_str()), Some("3"));
    }

    #[test]
    fn test_fractional_quantities_are_exact() {
        let butter = IngredientId::generate();
        let recipes = vec![
            recipe(
                "Scones",
                vec![line(Some(butter), "Butter", "1/2", Some("cups"), Some("Dairy"))],
            ),
            recipe(
                "Pie",
                vec![line(Some(butter), "Butter", "1/4", Some("cups"), Some("Dairy"))],
            ),
        ];
        let inventory = vec![stock(butter, "Butter", "0.75", Some("cups"))];

        // 1/2 + 1/4 − 0.75 is exactly zero; the line must vanish.
        let list = generate_grocery_list(&recipes, &inventory, CrossUnitPolicy::NoOverlap);
        assert!(list.aisles.is_empty());
    }

    #[test]
    fn test_wire_shape() {
        let item = GroceryItem {
            name: "Flour".to_owned(),
            quantity: "1.5".to_owned(),
            unit: "cups".to_owned(),
        };
        let value = serde_json::to_value(&item).expect("serializes");
        assert_eq!(
            value,
            serde_json::json!({"name": "Flour", "quantity": "1.5", "unit": "cups"})
        );
    }
}
