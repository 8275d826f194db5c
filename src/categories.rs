// 🏷️ Category Registry - Categories as Data
// URL substring patterns, display metadata, and the host color palette
//
// A Category is a named rule bucket: an id that never changes, a display
// name for the group title, a hex color token, and an ordered list of
// lowercase URL substrings. The registry is built once at process start
// and is read-only afterwards.

use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::SortError;

// ============================================================================
// CATEGORY DEFINITION
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Stable key, referenced by the caller's selection
    pub id: String,

    /// Display name used in group titles and summary rows
    pub display_name: String,

    /// Hex color token (e.g. "#FF6B6B"), mapped onto the host palette
    pub color: String,

    /// Lowercase substrings matched against tab URLs
    pub patterns: Vec<String>,
}

impl Category {
    /// Check whether a tab URL belongs to this category.
    ///
    /// Case-insensitive substring containment: the lowercased URL must
    /// contain at least one pattern anywhere. No anchoring, no wildcards,
    /// no regex semantics. Pattern order within a category is irrelevant.
    pub fn matches_url(&self, url: &str) -> bool {
        let url_lower = url.to_lowercase();
        self.patterns
            .iter()
            .any(|pattern| url_lower.contains(&pattern.to_lowercase()))
    }
}

// ============================================================================
// GROUP COLOR (host palette)
// ============================================================================

/// The host's limited group color palette.
///
/// Hex tokens are mapped through a fixed lookup table; tokens with no exact
/// match fall back to grey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupColor {
    Grey,
    Blue,
    Red,
    Yellow,
    Green,
    Pink,
    Purple,
    Cyan,
    Orange,
}

impl GroupColor {
    /// Fixed mapping from hex color tokens to the host palette.
    pub fn from_hex(hex: &str) -> Self {
        match hex {
            "#FF6B6B" => GroupColor::Red,
            "#4ECDC4" => GroupColor::Cyan,
            "#45B7D1" => GroupColor::Blue,
            "#B06AB3" => GroupColor::Purple,
            _ => GroupColor::Grey,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupColor::Grey => "grey",
            GroupColor::Blue => "blue",
            GroupColor::Red => "red",
            GroupColor::Yellow => "yellow",
            GroupColor::Green => "green",
            GroupColor::Pink => "pink",
            GroupColor::Purple => "purple",
            GroupColor::Cyan => "cyan",
            GroupColor::Orange => "orange",
        }
    }
}

// ============================================================================
// CATEGORY REGISTRY
// ============================================================================

/// Immutable table of category definitions.
///
/// Construction order is definition order; `all_ids` preserves it. No
/// operation mutates a Category or its pattern list after construction.
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// Build a registry from a list of definitions.
    ///
    /// Duplicate ids keep the first definition; later ones are dropped.
    pub fn from_categories(categories: Vec<Category>) -> Self {
        let mut unique: Vec<Category> = Vec::with_capacity(categories.len());
        for category in categories {
            if !unique.iter().any(|c| c.id == category.id) {
                unique.push(category);
            }
        }
        CategoryRegistry { categories: unique }
    }

    /// Load category definitions from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read categories file: {:?}", path.as_ref()))?;

        let categories: Vec<Category> =
            serde_json::from_str(&content).context("Failed to parse categories JSON")?;

        Ok(CategoryRegistry::from_categories(categories))
    }

    /// Registry pre-loaded with the default categories.
    pub fn with_defaults() -> Self {
        CategoryRegistry::from_categories(default_categories())
    }

    /// Look up a category by id.
    pub fn get(&self, id: &str) -> std::result::Result<&Category, SortError> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| SortError::UnknownCategory(id.to_string()))
    }

    /// All category ids, in definition order.
    pub fn all_ids(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// DEFAULT CATEGORIES
// ============================================================================

fn category(id: &str, display_name: &str, color: &str, patterns: &[&str]) -> Category {
    Category {
        id: id.to_string(),
        display_name: display_name.to_string(),
        color: color.to_string(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
    }
}

/// The built-in category table.
pub fn default_categories() -> Vec<Category> {
    vec![
        category(
            "entertainment",
            "🎬 Entertainment",
            "#FF6B6B",
            &[
                "youtube.com",
                "netflix.com",
                "twitch.tv",
                "vk.com",
                "facebook.com",
                "instagram.com",
                "tiktok.com",
                "reddit.com",
                "twitter.com",
                "kinopoisk.ru",
                "ivi.ru",
                "music.youtube.com",
                "spotify.com",
                "soundcloud.com",
                "vimeo.com",
                "dzen.ru",
            ],
        ),
        category(
            "study",
            "📚 Study",
            "#4ECDC4",
            &[
                "github.com",
                "stackoverflow.com",
                "habr.com",
                "medium.com",
                "coursera.org",
                "stepik.org",
                "geekbrains.ru",
                "skillbox.ru",
                "wikipedia.org",
                "docs.google.com",
                "drive.google.com",
                "translate.google.com",
                "scholar.google.com",
                "arxiv.org",
                "leetcode.com",
                "codewars.com",
            ],
        ),
        category(
            "games",
            "🎮 Games",
            "#45B7D1",
            &[
                "steampowered.com",
                "store.steampowered.com",
                "epicgames.com",
                "origin.com",
                "battle.net",
                "xbox.com",
                "playstation.com",
                "nintendo.com",
                "twitch.tv/directory/game",
                "discord.com",
                "roblox.com",
                "minecraft.net",
                "ea.com",
                "ubisoft.com",
                "gog.com",
                "rockstargames.com",
            ],
        ),
        category(
            "shopping",
            "🛍️ Shopping",
            "#B06AB3",
            &[
                "amazon.co.uk",
                "aliexpress.com",
                "ebay.com",
                "wildberries.ru",
                "ozon.ru",
                "citilink.ru",
                "dns-shop.ru",
                "mvideo.ru",
                "eldorado.ru",
                "lamoda.ru",
                "asos.com",
                "shein.com",
                "yandex.ru/market",
                "beru.ru",
                "sbermegamarket.ru",
                "goods.ru",
                "emall.ru",
            ],
        ),
    ]
}

// ============================================================================
// TESTS
// ============================================================================
