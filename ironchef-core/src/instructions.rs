//! Step-by-step instructions: mise en place, method steps, plating.

use crate::rules::{mentions, mentions_any};
use crate::types::CookingMethod;

pub fn generate_instructions(dish_name: &str, primary: &str, method: CookingMethod) -> Vec<String> {
    let mut steps = Vec::with_capacity(8);
    steps.push(opening_step(primary, method));
    steps.extend(method_steps(dish_name, primary, method));
    steps.extend(closing_steps(method));
    steps
}

fn opening_step(primary: &str, method: CookingMethod) -> String {
    if method == CookingMethod::PrepareRaw {
        format!(
            "Ensure the {primary} is of the highest quality and freshness. Chill all plates and utensils."
        )
    } else {
        format!(
            "Begin by preparing all ingredients mise en place. Clean and prep the {primary} appropriately."
        )
    }
}

fn closing_steps(method: CookingMethod) -> Vec<String> {
    if method == CookingMethod::PrepareRaw {
        vec!["Serve immediately on chilled plates with accompanying sauces and garnishes.".to_string()]
    } else {
        vec![
            "Plate with attention to visual composition, balancing colors and heights.".to_string(),
            "Add final garnishes and serve at the optimal temperature.".to_string(),
        ]
    }
}

/// The technique-specific middle of the recipe.
pub fn method_steps(dish_name: &str, primary: &str, method: CookingMethod) -> Vec<String> {
    let p = primary;
    match method {
        CookingMethod::PrepareRaw if mentions(dish_name, "sashimi") => vec![
            format!("Using a very sharp sashimi knife, slice the {p} against the grain in clean, decisive cuts."),
            "Each slice should be about 1/4 inch thick for optimal texture and presentation.".to_string(),
            "Arrange on chilled plates immediately, leaving space between pieces.".to_string(),
        ],
        CookingMethod::PrepareRaw => vec![
            format!("Slice the {p} paper-thin using a sharp knife or mandoline."),
            "Arrange overlapping slices on chilled plates in an attractive pattern.".to_string(),
            "Drizzle with accompanying sauce just before serving.".to_string(),
        ],
        CookingMethod::Grill => vec![
            "Preheat grill to high heat and clean grates thoroughly.".to_string(),
            format!("Season the {p} with salt and pepper, let come to room temperature."),
            format!("Grill the {p} for 3-4 minutes per side, creating distinct grill marks."),
            "Use tongs to turn only once, avoid pressing down on the protein.".to_string(),
        ],
        CookingMethod::Sear => vec![
            "Heat a heavy-bottomed pan over high heat until smoking.".to_string(),
            format!("Season the {p} generously with salt and pepper."),
            format!("Sear the {p} for 2-3 minutes per side until golden brown."),
            "Do not move the protein until it releases naturally from the pan.".to_string(),
        ],
        CookingMethod::StirFry => vec![
            "Heat wok over highest heat until smoking. Add oil and swirl to coat.".to_string(),
            "Add aromatics (garlic, ginger) first, stir for 10 seconds until fragrant.".to_string(),
            format!("Add {p} and other ingredients in order of cooking time required."),
            "Keep ingredients moving constantly with wok hei technique for 2-3 minutes.".to_string(),
        ],
        CookingMethod::Steam => vec![
            "Set up a steamer basket over simmering water, ensuring water doesn't touch basket.".to_string(),
            format!("Arrange {p} in steamer, leaving space for steam circulation."),
            "Cover and steam for 8-12 minutes until just cooked through.".to_string(),
            "Check doneness by gently pressing - should be firm but yielding.".to_string(),
        ],
        CookingMethod::Simmer if mentions_any(dish_name, &["soup", "bisque"]) => vec![
            format!("In a heavy pot, sauté aromatics until fragrant, then add {p}."),
            "Add stock or broth gradually, bringing to a gentle simmer.".to_string(),
            "Simmer for 20-30 minutes, skimming impurities from surface regularly.".to_string(),
            "Strain if desired and adjust seasoning at the end.".to_string(),
        ],
        CookingMethod::Simmer => vec![
            format!("Place {p} in a wide, heavy pan with minimal liquid."),
            "Bring to a gentle simmer, cover, and cook until tender.".to_string(),
            "Turn once halfway through cooking time.".to_string(),
        ],
        CookingMethod::DeepFry => vec![
            "Heat oil to 350°F (175°C) in a deep fryer or heavy pot.".to_string(),
            format!("Coat {p} in batter or breading as desired."),
            format!("Fry {p} in small batches to avoid temperature drop."),
            "Remove when golden brown and drain on paper towels immediately.".to_string(),
        ],
        CookingMethod::Risotto => vec![
            "Warm stock in a separate pan and keep at a gentle simmer.".to_string(),
            "In a heavy-bottomed pan, sauté aromatics in butter until soft.".to_string(),
            "Add rice and stir to coat with fat, toasting for 1-2 minutes.".to_string(),
            "Add warm stock one ladle at a time, stirring constantly until absorbed.".to_string(),
            format!("Continue for 18-20 minutes until rice is creamy. Fold in {p} near the end."),
        ],
        CookingMethod::Pasta => vec![
            "Bring a large pot of salted water to rolling boil.".to_string(),
            "Cook pasta until al dente, reserving 1 cup pasta water before draining.".to_string(),
            format!("In a large pan, combine {p} with cooked pasta and a splash of pasta water."),
            "Toss vigorously to create a silky sauce that coats the pasta.".to_string(),
        ],
        CookingMethod::Bake => vec![
            "Preheat oven to 375°F (190°C).".to_string(),
            format!("Season {p} and place in an appropriate baking dish."),
            "Bake for 25-35 minutes until cooked through and golden.".to_string(),
            "Let rest for 5 minutes before serving.".to_string(),
        ],
        CookingMethod::Braise => vec![
            format!("Sear {p} in a heavy Dutch oven until browned on all sides."),
            "Add aromatics and cook until fragrant.".to_string(),
            "Add liquid to come halfway up the protein, bring to simmer.".to_string(),
            "Cover and cook in 325°F oven for 45 minutes to 1 hour until tender.".to_string(),
        ],
        CookingMethod::HotPot => vec![
            "Prepare a flavorful dashi or broth and keep hot in a tabletop setup.".to_string(),
            format!("Slice {p} into thin pieces for quick cooking."),
            "Cook ingredients briefly in the hot broth, 30 seconds to 2 minutes.".to_string(),
            "Serve immediately with dipping sauces.".to_string(),
        ],
        CookingMethod::Poach
        | CookingMethod::Terrine
        | CookingMethod::Freeze
        | CookingMethod::Saute
        | CookingMethod::Blanch
        | CookingMethod::Marinate
        | CookingMethod::Roast
        | CookingMethod::Smoke
        | CookingMethod::Flambe
        | CookingMethod::Reduce => vec![
            "Heat oil in a suitable pan over medium-high heat.".to_string(),
            format!("Cook the {p} using proper {method} technique until done."),
            "Monitor temperature and timing for optimal results.".to_string(),
        ],
    }
}
