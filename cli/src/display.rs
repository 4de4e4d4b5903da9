//! Console rendering of episodes, dishes and recipes.

use std::io::{self, Write};

use ironchef_core::Recipe;

use crate::models::{Dish, DishWithEpisode, EpisodeDetails, EpisodeSummary};

pub fn write_episode_line<W: Write>(out: &mut W, ep: &EpisodeSummary) -> io::Result<()> {
    writeln!(
        out,
        "Episode #{}: {} - {} vs {}",
        ep.episode.episode_number, ep.episode.theme, ep.iron_chef_name, ep.competitor_name
    )
}

pub fn write_dish_match<W: Write>(out: &mut W, found: &DishWithEpisode) -> io::Result<()> {
    writeln!(
        out,
        "- {} (Episode #{}: {})",
        found.dish.dish_name, found.episode_number, found.theme
    )
}

fn write_courses<W: Write>(out: &mut W, heading: &str, dishes: &[Dish]) -> io::Result<()> {
    writeln!(out, "\n{}", "-".repeat(30))?;
    writeln!(out, "{heading}:")?;
    for dish in dishes {
        writeln!(out, "  {}. {}", dish.dish_number, dish.dish_name)?;
        if let Some(ingredients) = dish.main_ingredients.as_deref().filter(|s| !s.is_empty()) {
            writeln!(out, "     Ingredients: {ingredients}")?;
        }
    }
    Ok(())
}

pub fn write_episode<W: Write>(out: &mut W, details: &EpisodeDetails) -> io::Result<()> {
    let summary = &details.summary;
    let rule = "=".repeat(60);
    writeln!(out, "\n{rule}")?;
    writeln!(
        out,
        "Episode #{}: {}",
        summary.episode.episode_number, summary.episode.theme
    )?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Episode ID: {}", summary.episode.id)?;
    writeln!(out, "Iron Chef: {}", summary.iron_chef_name)?;
    writeln!(out, "Challenger: {}", summary.competitor_name)?;
    writeln!(
        out,
        "Winner: {}",
        summary.episode.winner.as_deref().unwrap_or("Undecided")
    )?;
    write_courses(out, "IRON CHEF DISHES", &details.dishes.iron_chef)?;
    write_courses(out, "CHALLENGER DISHES", &details.dishes.competitor)
}

pub fn write_recipe<W: Write>(out: &mut W, recipe: &Recipe) -> io::Result<()> {
    let rule = "*".repeat(60);
    writeln!(out, "\n{rule}\n{}\n{rule}", recipe.title)?;
    writeln!(out, "\n{}", recipe.description)?;
    writeln!(
        out,
        "\nServings: {} | Prep: {} min | Cook: {} min",
        recipe.servings, recipe.prep_time, recipe.cook_time
    )?;

    writeln!(out, "\nINGREDIENTS:")?;
    for ing in &recipe.ingredients {
        if ing.prep.is_empty() {
            writeln!(out, "  • {} {}", ing.amount, ing.item)?;
        } else {
            writeln!(out, "  • {} {} ({})", ing.amount, ing.item, ing.prep)?;
        }
    }

    writeln!(out, "\nINSTRUCTIONS:")?;
    for (i, step) in recipe.instructions.iter().enumerate() {
        writeln!(out, "  {}. {step}", i + 1)?;
    }

    writeln!(out, "\nCHEF'S TIPS:")?;
    for tip in &recipe.chef_tips {
        writeln!(out, "  • {tip}")?;
    }

    writeln!(out, "\nWINE PAIRING: {}", recipe.wine_pairing)
}
