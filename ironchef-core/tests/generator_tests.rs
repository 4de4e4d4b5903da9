//! End-to-end checks on generated recipes.

use ironchef_core::{CookingMethod, CuisineProfile, RecipeGenerator};
use std::collections::HashSet;

fn item_names(recipe: &ironchef_core::Recipe) -> Vec<&str> {
    recipe.ingredients.iter().map(|i| i.item.as_str()).collect()
}

#[test]
fn test_grilled_lobster_tail() {
    let mut generator = RecipeGenerator::seeded(1);
    let recipe = generator.generate("Grilled Lobster Tail", "lobster, butter, lemon", "Japanese");

    assert_eq!(recipe.title, "Iron Chef Style Grilled Lobster Tail");
    assert_eq!(recipe.servings, 4);
    assert_eq!((recipe.prep_time, recipe.cook_time), (10, 8));

    assert_eq!(recipe.ingredients[0].item, "Lobster");
    assert_eq!(recipe.ingredients[0].amount, "1 lb");

    let items = item_names(&recipe);
    assert!(items.contains(&"Salt"));
    assert!(items.contains(&"White Pepper"));
    assert!(items.contains(&"High-quality Oil"));

    assert!(recipe
        .instructions
        .iter()
        .any(|step| step.starts_with("Preheat grill to high heat")));
}

#[test]
fn test_lobster_sashimi() {
    let mut generator = RecipeGenerator::seeded(2);
    let recipe = generator.generate("Lobster Sashimi", "lobster", "Japanese");

    assert_eq!((recipe.prep_time, recipe.cook_time), (20, 0));
    assert_eq!(item_names(&recipe), vec!["Lobster"]);
    assert_eq!(recipe.ingredients[0].amount, "8 oz");
    assert_eq!(recipe.ingredients[0].prep, "cleaned, shell removed");
    assert!(recipe.instructions[0].starts_with("Ensure the lobster is of the highest quality"));
    assert!(recipe.instructions.last().unwrap().starts_with("Serve immediately"));
}

#[test]
fn test_raw_keyword_wins_over_grill_keyword() {
    let mut generator = RecipeGenerator::seeded(3);
    let recipe = generator.generate("Grilled Sea Bream Sashimi", "sea bream", "Japanese");

    assert_eq!(
        ironchef_core::method_from_dish_name("Grilled Sea Bream Sashimi"),
        Some(CookingMethod::PrepareRaw)
    );
    assert_eq!(recipe.cook_time, 0);
    assert!(!item_names(&recipe).contains(&"Salt"));
}

#[test]
fn test_same_seed_same_recipe() {
    let inputs = [
        ("Buddha Jumps Over the Wall", "shark fin, abalone, sea cucumber", "Chinese"),
        ("Sea Bream in Paper", "sea bream, vegetables, white wine, herbs", "French"),
        ("Lobster Ravioli", "lobster, ricotta, pasta dough", "Italian"),
    ];
    for (dish, ingredients, cuisine) in inputs {
        let a = RecipeGenerator::seeded(99).generate(dish, ingredients, cuisine);
        let b = RecipeGenerator::seeded(99).generate(dish, ingredients, cuisine);
        assert_eq!(a, b);
    }
}

#[test]
fn test_empty_inputs_still_produce_a_recipe() {
    let mut generator = RecipeGenerator::seeded(4);
    let recipe = generator.generate("", "", "");

    assert_eq!(recipe.title, "Iron Chef Style ");
    assert!(!recipe.description.is_empty());
    assert!(!recipe.instructions.is_empty());
    assert!(recipe.instructions[0].contains("ingredient"));
    // Placeholder is not listed, seasoning and oil still are
    assert_eq!(item_names(&recipe), vec!["Salt", "White Pepper", "High-quality Oil"]);
    assert!(!recipe.wine_pairing.is_empty());
    assert_eq!(recipe.chef_tips.len(), 4);
}

#[test]
fn test_unknown_cuisine_falls_back_but_keeps_name() {
    let japanese = CuisineProfile::for_name("Japanese");
    for seed in 0..30 {
        let mut generator = RecipeGenerator::seeded(seed);
        let recipe = generator.generate("Mole Poblano", "chicken, chocolate", "Mexican");
        assert!(japanese.wine_options.contains(&recipe.wine_pairing.as_str()));
        if recipe.description.contains("cuisine") || recipe.description.contains("techniques") {
            assert!(recipe.description.contains("Mexican"), "{}", recipe.description);
        }
    }
}

#[test]
fn test_chef_tips_bound_and_distinct() {
    for seed in 0..30 {
        let mut generator = RecipeGenerator::seeded(seed);
        let recipe = generator.generate("Foie Gras Terrine", "foie gras, port wine", "French");
        assert_eq!(recipe.chef_tips.len(), 4);
        let unique: HashSet<&String> = recipe.chef_tips.iter().collect();
        assert_eq!(unique.len(), 4);
    }
}

#[test]
fn test_soup_timing_and_ingredients() {
    let mut generator = RecipeGenerator::seeded(5);
    let recipe = generator.generate("Lobster Miso Soup", "lobster shells, miso, tofu", "Japanese");
    assert_eq!((recipe.prep_time, recipe.cook_time), (20, 30));
    let items = item_names(&recipe);
    assert!(items.contains(&"Salt"));
    assert!(!items.contains(&"High-quality Oil"));
}

#[test]
fn test_bisque_simmers_without_soup_timing() {
    let mut generator = RecipeGenerator::seeded(6);
    let recipe = generator.generate("Lobster Bisque", "lobster shells, cream, cognac", "French");
    assert_eq!((recipe.prep_time, recipe.cook_time), (15, 15));
    // Bisques still get the soup-style simmer steps
    assert!(recipe.instructions[1].starts_with("In a heavy pot"));
}

#[test]
fn test_recipe_serializes_to_expected_json() {
    let mut generator = RecipeGenerator::seeded(7);
    let recipe = generator.generate("Lobster Risotto", "lobster, arborio rice, saffron", "Italian");
    let json = serde_json::to_value(&recipe).unwrap();
    assert_eq!(json["servings"], 4);
    assert_eq!(json["ingredients"][1]["item"], "Arborio Rice");
    assert_eq!(json["ingredients"][1]["amount"], "1 cup");
    assert_eq!(json["ingredients"][2]["amount"], "Pinch");
    assert_eq!(json["instructions"].as_array().unwrap().len(), 1 + 5 + 2);
}
