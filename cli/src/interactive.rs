//! Menu-driven session over stdin/stdout.

use std::io::{BufRead, Write};

use anyhow::Result;
use ironchef_core::RecipeGenerator;

use crate::db::Store;
use crate::display;

const MENU: &str = "\nOptions:
1. View all episodes
2. Search episodes by theme
3. View episode details
4. Generate recipe for a dish
5. Search dishes by ingredient
6. Exit";

enum Flow {
    Continue,
    Exit,
}

pub struct Session<'a, R, W> {
    store: &'a Store,
    generator: RecipeGenerator,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(store: &'a Store, generator: RecipeGenerator, input: R, out: W) -> Self {
        Session {
            store,
            generator,
            input,
            out,
        }
    }

    /// Print `message` and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.out, "{message}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn run(&mut self) -> Result<()> {
        writeln!(self.out, "\nIron Chef Database - Interactive Mode")?;
        writeln!(self.out, "{}", "=".repeat(50))?;

        loop {
            writeln!(self.out, "{MENU}")?;
            let Some(choice) = self.prompt("\nSelect option (1-6): ")? else {
                writeln!(self.out, "\n\nGoodbye!")?;
                return Ok(());
            };
            if choice.is_empty() {
                continue;
            }

            let flow = match choice.as_str() {
                "1" => self.list_episodes(),
                "2" => self.search_theme(),
                "3" => self.show_episode(),
                "4" => self.generate_for_dish(),
                "5" => self.search_ingredient(),
                "6" => {
                    writeln!(self.out, "Exiting...")?;
                    Ok(Flow::Exit)
                }
                _ => {
                    writeln!(self.out, "Invalid option. Please select 1-6.")?;
                    Ok(Flow::Continue)
                }
            };

            match flow {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(e) if e.downcast_ref::<std::io::Error>().is_some() => return Err(e),
                Err(e) => {
                    tracing::warn!(error = %e, "Interactive command failed");
                    writeln!(self.out, "Error: {e:#}")?;
                }
            }
        }
    }

    fn list_episodes(&mut self) -> Result<Flow> {
        let episodes = self.store.search_episodes_by_theme("")?;
        if episodes.is_empty() {
            writeln!(self.out, "No episodes found in database.")?;
        }
        for ep in &episodes {
            display::write_episode_line(&mut self.out, ep)?;
        }
        Ok(Flow::Continue)
    }

    fn search_theme(&mut self) -> Result<Flow> {
        let Some(theme) = self.prompt("Enter theme to search: ")? else {
            return Ok(Flow::Exit);
        };
        let episodes = self.store.search_episodes_by_theme(&theme)?;
        if episodes.is_empty() {
            writeln!(self.out, "No episodes found with theme containing '{theme}'.")?;
        }
        for ep in &episodes {
            display::write_episode_line(&mut self.out, ep)?;
        }
        Ok(Flow::Continue)
    }

    /// Read a number, reporting bad input instead of failing.
    fn prompt_number(&mut self, message: &str) -> Result<Option<Option<i32>>> {
        let Some(raw) = self.prompt(message)? else {
            return Ok(None);
        };
        match raw.parse::<i32>() {
            Ok(n) => Ok(Some(Some(n))),
            Err(_) => {
                writeln!(self.out, "Please enter a valid number.")?;
                Ok(Some(None))
            }
        }
    }

    fn show_episode(&mut self) -> Result<Flow> {
        let episode_id = match self.prompt_number("Enter episode ID: ")? {
            None => return Ok(Flow::Exit),
            Some(None) => return Ok(Flow::Continue),
            Some(Some(id)) => id,
        };
        match self.store.get_episode_details(episode_id)? {
            Some(details) => display::write_episode(&mut self.out, &details)?,
            None => writeln!(self.out, "Episode with ID {episode_id} not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn generate_for_dish(&mut self) -> Result<Flow> {
        let episode_id = match self.prompt_number("Enter episode ID: ")? {
            None => return Ok(Flow::Exit),
            Some(None) => return Ok(Flow::Continue),
            Some(Some(id)) => id,
        };
        let Some(details) = self.store.get_episode_details(episode_id)? else {
            writeln!(self.out, "Episode with ID {episode_id} not found.")?;
            return Ok(Flow::Continue);
        };
        display::write_episode(&mut self.out, &details)?;

        let Some(side) =
            self.prompt("\nGenerate recipe for (i)ron chef or (c)ompetitor dish? ")?
        else {
            return Ok(Flow::Exit);
        };
        let dishes = match side.to_lowercase().as_str() {
            "i" => &details.dishes.iron_chef,
            "c" => &details.dishes.competitor,
            _ => {
                writeln!(self.out, "Please enter 'i' for Iron Chef or 'c' for competitor.")?;
                return Ok(Flow::Continue);
            }
        };
        if dishes.is_empty() {
            writeln!(self.out, "No dishes found for this chef type.")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.out, "\nAvailable dishes:")?;
        for (i, dish) in dishes.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, dish.dish_name)?;
        }
        let choice = match self.prompt_number("Select dish number: ")? {
            None => return Ok(Flow::Exit),
            Some(None) => return Ok(Flow::Continue),
            Some(Some(n)) => n,
        };
        let picked = usize::try_from(choice)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| dishes.get(i));
        let Some(dish) = picked else {
            writeln!(self.out, "Invalid dish number selected.")?;
            return Ok(Flow::Continue);
        };

        let cuisine = dish.inferred_cuisine();
        tracing::info!(dish = %dish.dish_name, cuisine, "Generating recipe");
        let recipe = self
            .generator
            .generate(&dish.dish_name, dish.main_ingredients(), cuisine);
        display::write_recipe(&mut self.out, &recipe)?;

        let Some(save) = self.prompt("\nSave recipe to database? (y/n): ")? else {
            return Ok(Flow::Exit);
        };
        if save.eq_ignore_ascii_case("y") {
            let recipe_id = self.store.save_recipe(dish.id, &recipe)?;
            writeln!(self.out, "Recipe saved with ID: {recipe_id}")?;
        }
        Ok(Flow::Continue)
    }

    fn search_ingredient(&mut self) -> Result<Flow> {
        let Some(ingredient) = self.prompt("Enter ingredient to search: ")? else {
            return Ok(Flow::Exit);
        };
        if ingredient.is_empty() {
            writeln!(self.out, "Please enter an ingredient to search for.")?;
            return Ok(Flow::Continue);
        }
        let dishes = self.store.get_dishes_by_ingredient(&ingredient)?;
        if dishes.is_empty() {
            writeln!(self.out, "No dishes found containing '{ingredient}'.")?;
        } else {
            writeln!(self.out, "\nDishes containing '{ingredient}':")?;
            for found in &dishes {
                display::write_dish_match(&mut self.out, found)?;
            }
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_store;
    use crate::seed::load_sample_data;
    use std::io::Cursor;

    fn run_script(store: &Store, script: &str) -> String {
        let mut out = Vec::new();
        Session::new(store, RecipeGenerator::seeded(21), Cursor::new(script), &mut out)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_list_and_exit() {
        let (_dir, store) = temp_store();
        load_sample_data(&store).unwrap();
        let text = run_script(&store, "1\n6\n");
        assert!(text.contains("Episode #150: Lobster - Masaharu Morimoto vs Masahiko Kobe"));
        assert!(text.contains("Exiting..."));
    }

    #[test]
    fn test_end_of_input_says_goodbye() {
        let (_dir, store) = temp_store();
        let text = run_script(&store, "");
        assert!(text.contains("Goodbye!"));
    }

    #[test]
    fn test_bad_input_keeps_looping() {
        let (_dir, store) = temp_store();
        load_sample_data(&store).unwrap();
        let text = run_script(&store, "9\n3\nabc\n3\n999\n5\n\n6\n");
        assert!(text.contains("Invalid option. Please select 1-6."));
        assert!(text.contains("Please enter a valid number."));
        assert!(text.contains("Episode with ID 999 not found."));
        assert!(text.contains("Please enter an ingredient to search for."));
        assert!(text.contains("Exiting..."));
    }

    #[test]
    fn test_generate_and_save_competitor_risotto() {
        let (_dir, store) = temp_store();
        load_sample_data(&store).unwrap();
        let lobster = store.search_episodes_by_theme("Lobster").unwrap();
        let script = format!("4\n{}\nc\n1\ny\n6\n", lobster[0].episode.id);

        let text = run_script(&store, &script);
        assert!(text.contains("Iron Chef Style Lobster Risotto"));
        assert!(text.contains("Recipe saved with ID: 1"));

        let risotto = store
            .get_episode_details(lobster[0].episode.id)
            .unwrap()
            .unwrap()
            .dishes
            .competitor[0]
            .id;
        assert!(store.get_recipe_for_dish(risotto).unwrap().is_some());
    }

    #[test]
    fn test_ingredient_search() {
        let (_dir, store) = temp_store();
        load_sample_data(&store).unwrap();
        let text = run_script(&store, "5\nfoie gras\n6\n");
        assert!(text.contains("Dishes containing 'foie gras':"));
        assert!(text.contains("- Bamboo Shoot Terrine (Episode #200: Bamboo Shoots)"));
    }
}
