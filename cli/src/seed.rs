use anyhow::{Context, Result};
use ironchef_core::ChefType;

use crate::db::Store;
use crate::models::{NewCompetitor, NewDish, NewEpisode, NewIronChef};

struct SeedIronChef {
    key: &'static str,
    name: &'static str,
    title: &'static str,
    specialty: &'static str,
    active_years: &'static str,
}

struct SeedCompetitor {
    name: &'static str,
    restaurant: Option<&'static str>,
    specialty: Option<&'static str>,
    location: Option<&'static str>,
}

struct SeedEpisode {
    episode_number: i32,
    theme: &'static str,
    iron_chef: &'static str,
    competitor: SeedCompetitor,
    winner: &'static str,
    iron_chef_dishes: &'static [(&'static str, &'static str)], // (name, main ingredients)
    competitor_dishes: &'static [(&'static str, &'static str)],
}

const IRON_CHEFS: &[SeedIronChef] = &[
    SeedIronChef {
        key: "chen",
        name: "Chen Kenichi",
        title: "Iron Chef Chinese",
        specialty: "Szechuan Cuisine",
        active_years: "1993-1999",
    },
    SeedIronChef {
        key: "sakai",
        name: "Hiroyuki Sakai",
        title: "Iron Chef French",
        specialty: "French Cuisine",
        active_years: "1994-1999",
    },
    SeedIronChef {
        key: "morimoto",
        name: "Masaharu Morimoto",
        title: "Iron Chef Japanese",
        specialty: "Japanese Cuisine",
        active_years: "1998-1999",
    },
    SeedIronChef {
        key: "michiba",
        name: "Rokusaburo Michiba",
        title: "Iron Chef Japanese",
        specialty: "Traditional Japanese",
        active_years: "1993-1996",
    },
    SeedIronChef {
        key: "nakamura",
        name: "Koumei Nakamura",
        title: "Iron Chef Japanese",
        specialty: "Japanese Cuisine",
        active_years: "1996-1998",
    },
];

const SAMPLE_EPISODES: &[SeedEpisode] = &[
    SeedEpisode {
        episode_number: 1,
        theme: "Sea Bream",
        iron_chef: "michiba",
        competitor: SeedCompetitor {
            name: "Yukio Hattori",
            restaurant: Some("Hattori Nutrition College"),
            specialty: Some("Japanese"),
            location: None,
        },
        winner: "Iron Chef",
        iron_chef_dishes: &[
            ("Sea Bream Sashimi with Plum Sauce", "sea bream, plum, soy sauce, wasabi"),
            ("Grilled Sea Bream with Salt", "sea bream, sea salt, sudachi citrus"),
            ("Sea Bream Rice", "sea bream, rice, dashi, mitsuba"),
            ("Clear Sea Bream Soup", "sea bream bones, kombu, sake, salt"),
        ],
        competitor_dishes: &[
            ("Sea Bream Carpaccio", "sea bream, olive oil, lemon, capers"),
            ("Sea Bream Meunière", "sea bream, butter, flour, parsley"),
            ("Sea Bream in Paper", "sea bream, vegetables, white wine, herbs"),
        ],
    },
    SeedEpisode {
        episode_number: 42,
        theme: "Foie Gras",
        iron_chef: "sakai",
        competitor: SeedCompetitor {
            name: "Alain Passard",
            restaurant: Some("L'Arpège"),
            specialty: Some("French"),
            location: Some("Paris"),
        },
        winner: "Iron Chef",
        iron_chef_dishes: &[
            ("Foie Gras Terrine with Port Wine", "foie gras, port wine, cognac, truffle"),
            (
                "Pan-Seared Foie Gras with Caramelized Apples",
                "foie gras, apples, calvados, butter",
            ),
            (
                "Foie Gras Ravioli in Consommé",
                "foie gras, pasta dough, chicken consommé, chives",
            ),
            ("Foie Gras Ice Cream", "foie gras, cream, eggs, sauternes"),
        ],
        competitor_dishes: &[
            ("Foie Gras with Turnip Confit", "foie gras, baby turnips, honey, thyme"),
            ("Foie Gras and Lobster", "foie gras, lobster, vanilla, butter"),
            ("Foie Gras with Roasted Figs", "foie gras, figs, balsamic, arugula"),
        ],
    },
    SeedEpisode {
        episode_number: 75,
        theme: "Shark Fin",
        iron_chef: "chen",
        competitor: SeedCompetitor {
            name: "Kazunori Otowa",
            restaurant: Some("Otowa Restaurant"),
            specialty: Some("Japanese-French"),
            location: None,
        },
        winner: "Iron Chef",
        iron_chef_dishes: &[
            (
                "Buddha Jumps Over the Wall",
                "shark fin, abalone, sea cucumber, chinese ham",
            ),
            (
                "Shark Fin with Crab Meat Sauce",
                "shark fin, crab meat, egg white, superior stock",
            ),
            ("Shark Fin Dumpling Soup", "shark fin, shrimp, pork, wonton wrapper"),
            (
                "Braised Shark Fin in Brown Sauce",
                "shark fin, soy sauce, oyster sauce, scallions",
            ),
        ],
        competitor_dishes: &[
            ("Shark Fin Consommé", "shark fin, chicken, vegetables, egg white"),
            ("Shark Fin Gratin", "shark fin, bechamel, gruyere, truffle"),
            ("Shark Fin Tempura", "shark fin, tempura batter, ponzu sauce"),
        ],
    },
    SeedEpisode {
        episode_number: 150,
        theme: "Lobster",
        iron_chef: "morimoto",
        competitor: SeedCompetitor {
            name: "Masahiko Kobe",
            restaurant: Some("Ristorante Massa"),
            specialty: Some("Italian"),
            location: Some("Tokyo"),
        },
        winner: "Competitor",
        iron_chef_dishes: &[
            ("Lobster Sashimi", "lobster, soy sauce, wasabi, shiso"),
            ("Lobster Miso Soup", "lobster shells, miso, tofu, scallions"),
            ("Grilled Lobster with Uni", "lobster, sea urchin, butter, sake"),
            ("Lobster Shabu-Shabu", "lobster, kombu dashi, ponzu, vegetables"),
        ],
        competitor_dishes: &[
            ("Lobster Risotto", "lobster, arborio rice, saffron, parmesan"),
            ("Lobster Ravioli", "lobster, ricotta, pasta dough, tomato sauce"),
            ("Lobster Carpaccio", "lobster, olive oil, lemon, arugula"),
            ("Lobster Bisque", "lobster shells, cream, cognac, tomato paste"),
        ],
    },
    SeedEpisode {
        episode_number: 200,
        theme: "Bamboo Shoots",
        iron_chef: "chen",
        competitor: SeedCompetitor {
            name: "Yutaka Ishinabe",
            restaurant: Some("Queen Alice"),
            specialty: Some("French"),
            location: None,
        },
        winner: "Iron Chef",
        iron_chef_dishes: &[
            (
                "Stir-fried Bamboo Shoots with XO Sauce",
                "bamboo shoots, XO sauce, scallops, chili",
            ),
            (
                "Bamboo Shoot Spring Rolls",
                "bamboo shoots, shrimp, pork, spring roll wrapper",
            ),
            (
                "Bamboo Shoot and Pork Belly",
                "bamboo shoots, pork belly, soy sauce, star anise",
            ),
            ("Bamboo Shoot Soup", "bamboo shoots, chicken stock, ham, egg"),
        ],
        competitor_dishes: &[
            ("Bamboo Shoot Gratin", "bamboo shoots, cream, gruyere, nutmeg"),
            ("Bamboo Shoot Terrine", "bamboo shoots, foie gras, aspic, herbs"),
            ("Bamboo Shoot Velouté", "bamboo shoots, butter, cream, white wine"),
        ],
    },
];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub iron_chefs: usize,
    pub episodes: usize,
    pub dishes: usize,
    pub ingredients_linked: usize,
}

/// Load the sample Iron Chefs and battles. Does nothing when the catalog
/// already has episodes.
pub fn load_sample_data(store: &Store) -> Result<SeedSummary> {
    if store.episode_count()? > 0 {
        tracing::info!("Catalog already has episodes, skipping sample data");
        return Ok(SeedSummary::default());
    }

    let mut summary = SeedSummary::default();
    let mut chef_ids = Vec::with_capacity(IRON_CHEFS.len());
    for chef in IRON_CHEFS {
        let id = store
            .add_iron_chef(&NewIronChef {
                name: chef.name,
                title: Some(chef.title),
                specialty: Some(chef.specialty),
                active_years: Some(chef.active_years),
            })
            .with_context(|| format!("Failed to add Iron Chef {}", chef.name))?;
        chef_ids.push((chef.key, id));
        summary.iron_chefs += 1;
    }

    for episode in SAMPLE_EPISODES {
        let iron_chef_id = chef_ids
            .iter()
            .find(|(key, _)| *key == episode.iron_chef)
            .map(|(_, id)| *id)
            .with_context(|| format!("No Iron Chef with key {}", episode.iron_chef))?;

        let competitor = &episode.competitor;
        let competitor_id = store.add_competitor(&NewCompetitor {
            name: competitor.name,
            restaurant: competitor.restaurant,
            specialty: competitor.specialty,
            location: competitor.location,
        })?;

        let episode_id = store
            .add_episode(&NewEpisode {
                episode_number: episode.episode_number,
                theme: episode.theme,
                iron_chef_id,
                competitor_id,
                winner: Some(episode.winner),
                ..Default::default()
            })
            .with_context(|| format!("Failed to add episode #{}", episode.episode_number))?;
        summary.episodes += 1;

        let courses = [
            (ChefType::IronChef, episode.iron_chef_dishes),
            (ChefType::Competitor, episode.competitor_dishes),
        ];
        for (chef_type, dishes) in courses {
            for (number, &(name, ingredients)) in dishes.iter().enumerate() {
                let dish_id = store.add_dish(&NewDish {
                    episode_id,
                    chef_type: chef_type.as_str(),
                    dish_number: number as i32 + 1,
                    dish_name: name,
                    description: None,
                    main_ingredients: Some(ingredients),
                    cooking_techniques: None,
                })?;
                summary.dishes += 1;
                summary.ingredients_linked += link_ingredients(store, dish_id, ingredients)?;
            }
        }
    }

    tracing::info!(
        episodes = summary.episodes,
        dishes = summary.dishes,
        "Loaded sample data"
    );
    Ok(summary)
}

/// Add each comma-separated ingredient to the master list and link it.
fn link_ingredients(store: &Store, dish_id: i32, ingredients: &str) -> Result<usize> {
    let mut linked = 0;
    for name in ingredients.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let ingredient_id = store.add_ingredient(&name.to_lowercase())?;
        store.link_dish_ingredient(dish_id, ingredient_id, None, None)?;
        linked += 1;
    }
    Ok(linked)
}
