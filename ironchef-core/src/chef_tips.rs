use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::cuisine::CuisineProfile;
use crate::rules::{first_match, Rule};

/// Most tips returned for one recipe.
pub const MAX_TIPS: usize = 4;

const BASE_TIPS: &[&str] = &[
    "Taste and adjust seasonings throughout the cooking process.",
    "Visual presentation should reflect the dish's flavor profile.",
    "Mise en place is essential - prepare all ingredients before cooking.",
    "Sharp knives are safer and produce better results than dull ones.",
];

/// Extra tips keyed on the primary ingredient; only the first match applies.
pub const INGREDIENT_TIP_RULES: &[Rule<&[&str]>] = &[
    Rule::any(
        &["fish", "seafood", "lobster", "crab"],
        &[
            "Never overcook seafood - it becomes tough and loses its delicate flavor.",
            "Fresh seafood should smell like the ocean, not 'fishy'.",
        ],
    ),
    Rule::any(
        &["foie gras"],
        &[
            "Score foie gras before cooking to prevent excessive shrinkage.",
            "Cook foie gras quickly over high heat for crispy exterior, creamy interior.",
        ],
    ),
    Rule::any(
        &["vegetable", "bamboo"],
        &[
            "Cook vegetables until just tender to preserve color and nutrients.",
            "Blanch and shock green vegetables to maintain vibrant color.",
        ],
    ),
];

/// Every tip that could apply: five base tips, the cuisine's four, then any
/// ingredient-specific ones.
pub fn tip_pool(primary: &str, profile: &CuisineProfile) -> Vec<String> {
    let mut pool = Vec::with_capacity(BASE_TIPS.len() + profile.chef_tips.len() + 2);
    pool.push(format!(
        "Quality is paramount - source the freshest {primary} possible."
    ));
    pool.extend(BASE_TIPS.iter().map(|tip| tip.to_string()));
    pool.extend(profile.chef_tips.iter().map(|tip| tip.to_string()));
    if let Some(extra) = first_match(INGREDIENT_TIP_RULES, primary) {
        pool.extend(extra.iter().map(|tip| tip.to_string()));
    }
    pool
}

/// Sample up to [`MAX_TIPS`] distinct tips in random order.
pub fn generate_chef_tips<R: Rng + ?Sized>(
    rng: &mut R,
    primary: &str,
    profile: &CuisineProfile,
) -> Vec<String> {
    let pool = tip_pool(primary, profile);
    let mut tips: Vec<String> = pool
        .choose_multiple(rng, MAX_TIPS.min(pool.len()))
        .cloned()
        .collect();
    tips.shuffle(rng);
    tips
}
