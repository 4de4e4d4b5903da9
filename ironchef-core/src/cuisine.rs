//! Static per-cuisine vocabularies: fallback cooking methods, flavor words,
//! wine list and cuisine-specific chef tips.

use serde::{Deserialize, Serialize};

use crate::types::CookingMethod;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CuisineStyle {
    #[default]
    Japanese,
    Chinese,
    French,
    Italian,
}

impl CuisineStyle {
    pub const ALL: &'static [CuisineStyle] = &[
        CuisineStyle::Japanese,
        CuisineStyle::Chinese,
        CuisineStyle::French,
        CuisineStyle::Italian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CuisineStyle::Japanese => "Japanese",
            CuisineStyle::Chinese => "Chinese",
            CuisineStyle::French => "French",
            CuisineStyle::Italian => "Italian",
        }
    }

    /// Case-insensitive lookup. Unknown names return `None`; the generator
    /// then uses [`CuisineProfile::for_name`]'s Japanese fallback.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        CuisineStyle::ALL
            .iter()
            .copied()
            .find(|style| style.as_str().eq_ignore_ascii_case(name))
    }

    pub fn profile(&self) -> &'static CuisineProfile {
        match self {
            CuisineStyle::Japanese => &JAPANESE,
            CuisineStyle::Chinese => &CHINESE,
            CuisineStyle::French => &FRENCH,
            CuisineStyle::Italian => &ITALIAN,
        }
    }
}

#[derive(Debug)]
pub struct CuisineProfile {
    pub style: CuisineStyle,
    /// Pool the method selector draws from when no dish keyword matches.
    pub cooking_methods: &'static [CookingMethod],
    pub flavor_descriptors: &'static [&'static str],
    pub wine_options: &'static [&'static str],
    pub chef_tips: &'static [&'static str],
}

impl CuisineProfile {
    /// Profile for a free-text cuisine name, falling back to Japanese.
    pub fn for_name(name: &str) -> &'static CuisineProfile {
        CuisineStyle::from_name(name)
            .unwrap_or_default()
            .profile()
    }
}

pub static JAPANESE: CuisineProfile = CuisineProfile {
    style: CuisineStyle::Japanese,
    cooking_methods: &[
        CookingMethod::Grill,
        CookingMethod::Steam,
        CookingMethod::Simmer,
        CookingMethod::DeepFry,
        CookingMethod::Saute,
        CookingMethod::Blanch,
        CookingMethod::Marinate,
    ],
    flavor_descriptors: &["umami", "delicate", "clean", "subtle", "balanced"],
    wine_options: &["Sake", "Junmai Daiginjo", "Light Riesling", "Grüner Veltliner"],
    chef_tips: &[
        "Respect the natural flavors - less is often more in Japanese cuisine.",
        "Temperature contrast adds interest - serve hot dishes on warmed plates.",
        "The knife work should be precise and deliberate for best results.",
        "Umami is the fifth taste - build layers of savory depth.",
    ],
};

pub static CHINESE: CuisineProfile = CuisineProfile {
    style: CuisineStyle::Chinese,
    cooking_methods: &[
        CookingMethod::StirFry,
        CookingMethod::DeepFry,
        CookingMethod::Steam,
        CookingMethod::Braise,
        CookingMethod::Roast,
        CookingMethod::Blanch,
        CookingMethod::Smoke,
    ],
    flavor_descriptors: &["savory", "spicy", "sweet and sour", "aromatic", "rich"],
    wine_options: &["Gewürztraminer", "Riesling", "Chenin Blanc", "Light Pinot Noir"],
    chef_tips: &[
        "High heat and constant motion are key to proper wok cooking.",
        "Velvet proteins for silky texture in stir-fried dishes.",
        "Balance the five flavors: sweet, sour, bitter, spicy, and salty.",
        "Cook ingredients in order of their required cooking times.",
    ],
};

pub static FRENCH: CuisineProfile = CuisineProfile {
    style: CuisineStyle::French,
    cooking_methods: &[
        CookingMethod::Saute,
        CookingMethod::Braise,
        CookingMethod::Poach,
        CookingMethod::Roast,
        CookingMethod::Grill,
        CookingMethod::Flambe,
        CookingMethod::Reduce,
    ],
    flavor_descriptors: &["rich", "buttery", "complex", "refined", "layered"],
    wine_options: &["Burgundy", "Bordeaux", "Champagne", "Sancerre"],
    chef_tips: &[
        "Master your knife skills - precise cuts ensure even cooking.",
        "Butter and cream should be added off heat to prevent breaking.",
        "Build flavors in layers using proper foundational techniques.",
        "Temperature control separates good from great French cooking.",
    ],
};

pub static ITALIAN: CuisineProfile = CuisineProfile {
    style: CuisineStyle::Italian,
    cooking_methods: &[
        CookingMethod::Saute,
        CookingMethod::Braise,
        CookingMethod::Grill,
        CookingMethod::Roast,
        CookingMethod::Simmer,
        CookingMethod::Bake,
        CookingMethod::Poach,
    ],
    flavor_descriptors: &["robust", "fresh", "herbaceous", "rustic", "vibrant"],
    wine_options: &["Chianti", "Barolo", "Pinot Grigio", "Prosecco"],
    chef_tips: &[
        "Use the best quality ingredients you can afford - simplicity shines.",
        "Salt your pasta water generously - it should taste like seawater.",
        "Finish pasta dishes with reserved pasta water for silky sauces.",
        "Let tomatoes and herbs speak for themselves with minimal interference.",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_lookup_is_case_insensitive() {
        assert_eq!(CuisineStyle::from_name("french"), Some(CuisineStyle::French));
        assert_eq!(CuisineStyle::from_name(" ITALIAN "), Some(CuisineStyle::Italian));
        assert_eq!(CuisineStyle::from_name("Mexican"), None);
    }

    #[test]
    fn test_unknown_style_uses_japanese_profile() {
        assert_eq!(CuisineProfile::for_name("Mexican").style, CuisineStyle::Japanese);
        assert_eq!(CuisineProfile::for_name("").style, CuisineStyle::Japanese);
        assert_eq!(CuisineProfile::for_name("Chinese").style, CuisineStyle::Chinese);
    }

    #[test]
    fn test_every_profile_is_complete() {
        for style in CuisineStyle::ALL {
            let profile = style.profile();
            assert_eq!(profile.style, *style);
            assert_eq!(profile.cooking_methods.len(), 7);
            assert_eq!(profile.flavor_descriptors.len(), 5);
            assert_eq!(profile.wine_options.len(), 4);
            assert_eq!(profile.chef_tips.len(), 4);
        }
    }
}
