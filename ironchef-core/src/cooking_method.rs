//! Dish name -> cooking method, and cooking method -> timing.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::cuisine::CuisineProfile;
use crate::rules::{first_match, mentions, Rule};
use crate::types::{CookingMethod, Timing};

/// Keyword cascade over the dish name, in priority order:
/// raw, liquid-based, high-heat, gentle, pasta/rice, baked, frozen.
///
/// "Lobster Soup, Grilled" is a simmer because liquid checks come before
/// high-heat ones; "Grilled Tuna Sashimi" is raw for the same reason.
pub const METHOD_RULES: &[Rule<CookingMethod>] = &[
    // Raw
    Rule::any(&["sashimi", "carpaccio"], CookingMethod::PrepareRaw),
    // Liquid-based
    Rule::any(&["soup", "bisque", "consommé"], CookingMethod::Simmer),
    Rule::any(&["shabu-shabu"], CookingMethod::HotPot),
    // High heat
    Rule::any(&["grilled", "grill", "barbecue", "bbq"], CookingMethod::Grill),
    Rule::any(&["pan-seared", "seared", "pan-fried"], CookingMethod::Sear),
    Rule::any(&["stir-fried", "stir-fry"], CookingMethod::StirFry),
    Rule::any(&["fried", "tempura", "deep-fried"], CookingMethod::DeepFry),
    // Gentle
    Rule::any(&["steamed"], CookingMethod::Steam),
    Rule::any(&["braised"], CookingMethod::Braise),
    Rule::any(&["poached"], CookingMethod::Poach),
    // Pasta and rice
    Rule::any(&["risotto"], CookingMethod::Risotto),
    Rule::any(&["ravioli", "pasta"], CookingMethod::Pasta),
    // Baked
    Rule::any(&["gratin", "baked", "roasted"], CookingMethod::Bake),
    Rule::any(&["terrine"], CookingMethod::Terrine),
    // Frozen
    Rule::any(&["ice cream"], CookingMethod::Freeze),
];

/// Method implied by the dish name alone, if any keyword matches.
pub fn method_from_dish_name(dish_name: &str) -> Option<CookingMethod> {
    first_match(METHOD_RULES, dish_name)
}

/// Pick a cooking method for a dish, drawing from the cuisine's pool when the
/// name carries no technique keyword.
pub fn select_cooking_method<R: Rng + ?Sized>(
    rng: &mut R,
    dish_name: &str,
    profile: &CuisineProfile,
) -> CookingMethod {
    method_from_dish_name(dish_name).unwrap_or_else(|| {
        profile
            .cooking_methods
            .choose(rng)
            .copied()
            .unwrap_or(CookingMethod::Saute)
    })
}

/// Prep/cook minutes for a method, before any dish-specific adjustment.
pub fn base_timing(method: CookingMethod) -> Timing {
    match method {
        CookingMethod::PrepareRaw => Timing::new(15, 0),
        CookingMethod::Sear | CookingMethod::StirFry => Timing::new(15, 5),
        CookingMethod::Grill => Timing::new(10, 8),
        CookingMethod::DeepFry => Timing::new(20, 5),
        CookingMethod::Steam | CookingMethod::Poach => Timing::new(15, 12),
        CookingMethod::Simmer => Timing::new(15, 15),
        CookingMethod::Braise => Timing::new(20, 45),
        CookingMethod::Bake => Timing::new(25, 35),
        CookingMethod::Risotto => Timing::new(15, 25),
        CookingMethod::Pasta => Timing::new(20, 15),
        CookingMethod::Terrine => Timing::new(45, 90),
        CookingMethod::HotPot => Timing::new(15, 10),
        CookingMethod::Freeze => Timing::new(30, 240),
        CookingMethod::Saute
        | CookingMethod::Blanch
        | CookingMethod::Marinate
        | CookingMethod::Roast
        | CookingMethod::Smoke
        | CookingMethod::Flambe
        | CookingMethod::Reduce => Timing::new(20, 25),
    }
}

/// Prep/cook minutes for a method applied to a particular dish.
///
/// Sashimi takes longer to prep than other raw dishes, and a soup simmers
/// longer than anything else cooked with that method.
pub fn estimate_times(dish_name: &str, method: CookingMethod) -> Timing {
    match method {
        CookingMethod::PrepareRaw if mentions(dish_name, "sashimi") => Timing::new(20, 0),
        CookingMethod::Simmer if mentions(dish_name, "soup") => Timing::new(20, 30),
        _ => base_timing(method),
    }
}
