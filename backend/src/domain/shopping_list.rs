//! Shopping list aggregation over the recipes in a user's cart.

use std::collections::BTreeMap;

use super::recipe::Recipe;

/// One aggregated line: an ingredient name, its unit and the summed amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub total: u64,
}

/// Ingredients needed for every recipe in a cart.
///
/// Lines are grouped by (`name`, `measurement_unit`) and ordered by name,
/// then unit, so the same cart always renders the same list. Ingredients
/// sharing a name but not a unit stay separate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    /// Sum ingredient amounts across `recipes`.
    ///
    /// A recipe appearing twice in the input is counted twice; callers pass
    /// each cart entry once.
    pub fn aggregate<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) -> Self {
        let mut totals: BTreeMap<(&'a str, &'a str), u64> = BTreeMap::new();
        for line in recipes.into_iter().flat_map(|recipe| &recipe.ingredients) {
            let key = (
                line.ingredient.name.as_str(),
                line.ingredient.measurement_unit.as_str(),
            );
            let amount = u64::from(line.amount.get().unsigned_abs());
            *totals.entry(key).or_default() += amount;
        }
        let items = totals
            .into_iter()
            .map(|((name, unit), total)| ShoppingListItem {
                name: name.to_owned(),
                measurement_unit: unit.to_owned(),
                total,
            })
            .collect();
        Self { items }
    }

    /// Aggregated lines in display order.
    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<ShoppingListItem> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Amount, CookingTime, Ingredient, IngredientId, IngredientLine, RecipeId, RecipeImage,
        UserId,
    };
    use chrono::Utc;
    use rstest::rstest;

    fn recipe(id: i64, lines: &[(i64, &str, &str, i64)]) -> Recipe {
        Recipe {
            id: RecipeId::new(id),
            author: UserId::random(),
            name: format!("Recipe {id}"),
            image: RecipeImage::from_stored("recipes/images/plate.png".to_owned()),
            text: "Cook.".to_owned(),
            cooking_time: CookingTime::new(10).expect("valid time"),
            tags: Vec::new(),
            ingredients: lines
                .iter()
                .map(|(ingredient_id, name, unit, amount)| IngredientLine {
                    ingredient: Ingredient {
                        id: IngredientId::new(*ingredient_id),
                        name: (*name).to_owned(),
                        measurement_unit: (*unit).to_owned(),
                    },
                    amount: Amount::new(*ingredient_id, *amount).expect("valid amount"),
                })
                .collect(),
            created_at: Utc::now(),
        }
    }

    fn rows(list: &ShoppingList) -> Vec<(&str, &str, u64)> {
        list.items()
            .iter()
            .map(|item| {
                (
                    item.name.as_str(),
                    item.measurement_unit.as_str(),
                    item.total,
                )
            })
            .collect()
    }

    #[rstest]
    fn sums_amounts_for_matching_name_and_unit() {
        let pancakes = recipe(1, &[(1, "Flour", "g", 200), (2, "Milk", "ml", 300)]);
        let bread = recipe(2, &[(1, "Flour", "g", 500), (3, "Salt", "g", 5)]);

        let list = ShoppingList::aggregate([&pancakes, &bread]);

        assert_eq!(
            rows(&list),
            vec![("Flour", "g", 700), ("Milk", "ml", 300), ("Salt", "g", 5)]
        );
    }

    #[rstest]
    fn keeps_units_apart_and_orders_by_name_then_unit() {
        let first = recipe(1, &[(4, "Sugar", "tbsp", 2), (5, "Butter", "g", 50)]);
        let second = recipe(2, &[(6, "Sugar", "g", 100)]);

        let list = ShoppingList::aggregate([&second, &first]);

        assert_eq!(
            rows(&list),
            vec![("Butter", "g", 50), ("Sugar", "g", 100), ("Sugar", "tbsp", 2)]
        );
    }

    #[rstest]
    fn empty_cart_gives_empty_list() {
        let list = ShoppingList::aggregate(std::iter::empty());
        assert!(list.is_empty());
    }

    #[rstest]
    fn totals_do_not_overflow_small_integers() {
        let recipes: Vec<Recipe> = (0..3)
            .map(|id| recipe(id, &[(1, "Rice", "g", i64::from(i16::MAX))]))
            .collect();
        let list = ShoppingList::aggregate(&recipes);
        assert_eq!(list.items()[0].total, 3 * u64::from(i16::MAX.unsigned_abs()));
    }
}
