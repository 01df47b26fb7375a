use serde::Serialize;
use std::collections::BTreeMap;

/// Emoji used for categories that have none configured.
pub const FALLBACK_EMOJI: &str = "⚙️";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub emoji: String,
}

impl Category {
    /// Category names are stored upper-case.
    pub fn new(name: &str, emoji: Option<&str>) -> Self {
        let name = name.trim().to_uppercase();
        let emoji = match emoji {
            Some(e) if !e.trim().is_empty() => e.trim().to_string(),
            _ => default_emoji(&name).to_string(),
        };
        Self { name, emoji }
    }
}

/// Built-in categories seeded on an empty database.
pub fn default_categories() -> Vec<Category> {
    [
        "CLIENTE",
        "LOJISTA",
        "IFOOD",
        "ACADEMIA",
        "MORADOR",
        "VISITANTE",
        "VIP",
        "ENTREGA",
    ]
    .iter()
    .map(|n| Category::new(n, None))
    .collect()
}

pub fn default_emoji(name: &str) -> &'static str {
    match name.to_uppercase().as_str() {
        "CLIENTE" => "👤",
        "LOJISTA" => "🏪",
        "IFOOD" => "🍽️",
        "ACADEMIA" => "💪",
        "MORADOR" => "🏠",
        "VISITANTE" => "🚶",
        "VIP" => "⭐",
        "ENTREGA" => "📦",
        _ => FALLBACK_EMOJI,
    }
}

/// name → emoji lookup.
pub fn as_map(categories: &[Category]) -> BTreeMap<String, String> {
    categories
        .iter()
        .map(|c| (c.name.clone(), c.emoji.clone()))
        .collect()
}
