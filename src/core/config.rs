//! Game configuration types.
//!
//! Sessions are configured before they exist:
//! - `Level`: How many pairs are dealt
//! - `ThemeId`: Which asset set supplies the pairing keys
//! - `ThemeCatalog`: Theme to asset-list lookup table (built-in or TOML)
//! - `GameSettings`: The level/theme pair chosen on the settings screen
//!
//! Configuration is immutable for the lifetime of a session.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::error::{ConfigError, Result};

/// How long a mismatched pair stays face-up before flipping back.
pub const MISMATCH_DELAY: Duration = Duration::from_millis(1200);

/// Image shown for a face-down card.
pub const CARD_BACK_IMAGE: &str = "./images/card-back.png";

/// Difficulty level. Only affects the number of pairs dealt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Beginner,
    Advanced,
}

impl Level {
    /// All supported levels, in settings-menu order.
    pub const ALL: [Level; 2] = [Level::Beginner, Level::Advanced];

    /// Number of pairs dealt at this level.
    #[must_use]
    pub const fn pair_count(self) -> usize {
        match self {
            Level::Beginner => 4,
            Level::Advanced => 8,
        }
    }

    /// Identifier used in configuration and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Advanced => "advanced",
        }
    }

    /// Human-readable label for a settings menu.
    #[must_use]
    pub fn label(self) -> String {
        let name = match self {
            Level::Beginner => "Beginner",
            Level::Advanced => "Advanced",
        };
        format!("{} ({} pairs)", name, self.pair_count())
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "advanced" => Ok(Level::Advanced),
            _ => Err(ConfigError::UnknownLevel(s.to_string())),
        }
    }
}

/// Theme identifier (e.g. `"animals"`, `"space"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeId(pub String);

impl ThemeId {
    /// Create a new theme ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ThemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ThemeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A named asset set. Each asset becomes the pairing key of one pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Unique identifier for this theme.
    pub id: ThemeId,

    /// Human-readable name (for settings menus).
    pub name: String,

    /// Asset identifiers in deal order. The first `pair_count` are used.
    pub assets: Vec<String>,
}

impl Theme {
    /// Create a new theme.
    pub fn new(id: impl Into<ThemeId>, name: impl Into<String>, assets: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            assets,
        }
    }

    fn validate(&self) -> Result<()> {
        check_unique(&self.id, &self.assets)
    }
}

/// Every asset must be distinct, or two pairs would share a pairing key.
fn check_unique(theme: &ThemeId, assets: &[String]) -> Result<()> {
    let mut seen = FxHashSet::default();
    for asset in assets {
        if !seen.insert(asset.as_str()) {
            return Err(ConfigError::DuplicateAsset {
                theme: theme.to_string(),
                asset: asset.clone(),
            });
        }
    }
    Ok(())
}

/// On-disk shape of a theme catalog.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    card_back: Option<String>,
    #[serde(default)]
    themes: Vec<Theme>,
}

/// Theme to asset-list lookup table.
///
/// Pure configuration data: the session asks it for the first `pair_count`
/// assets of a theme and nothing else.
#[derive(Clone, Debug)]
pub struct ThemeCatalog {
    themes: FxHashMap<ThemeId, Theme>,
    /// Theme IDs in the order they were declared.
    order: Vec<ThemeId>,
    card_back: String,
}

impl ThemeCatalog {
    /// Create an empty catalog with the default card back.
    #[must_use]
    pub fn new() -> Self {
        Self {
            themes: FxHashMap::default(),
            order: Vec::new(),
            card_back: CARD_BACK_IMAGE.to_string(),
        }
    }

    /// The catalog shipped with the game: `animals` and `space`, 8 assets each.
    #[must_use]
    pub fn builtin() -> Self {
        fn theme(id: &str, name: &str, files: &[&str]) -> Theme {
            let assets = files
                .iter()
                .map(|file| format!("./images/{}/{}.png", id, file))
                .collect();
            Theme::new(id, name, assets)
        }

        Self::new()
            .with_theme(theme(
                "animals",
                "Animals",
                &["elephant", "koala", "lion", "monkey", "octopus", "parrot", "turtle", "whale"],
            ))
            .with_theme(theme(
                "space",
                "Space",
                &[
                    "astronaut",
                    "meteor",
                    "planet",
                    "planet(1)",
                    "satelite",
                    "space-station",
                    "spaceship",
                    "ufo",
                ],
            ))
    }

    /// Parse a catalog from TOML.
    ///
    /// ```
    /// use memory_match::core::ThemeCatalog;
    ///
    /// let catalog = ThemeCatalog::from_toml_str(r#"
    ///     card_back = "back.png"
    ///
    ///     [[themes]]
    ///     id = "fruit"
    ///     name = "Fruit"
    ///     assets = ["apple.png", "pear.png", "plum.png", "fig.png"]
    /// "#).unwrap();
    ///
    /// assert_eq!(catalog.card_back(), "back.png");
    /// assert_eq!(catalog.assets_for(&"fruit".into(), 4).unwrap().len(), 4);
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(source)?;
        let mut catalog = Self::new();
        if let Some(card_back) = file.card_back {
            catalog = catalog.with_card_back(card_back);
        }
        for theme in file.themes {
            theme.validate()?;
            catalog.insert(theme);
        }
        Ok(catalog)
    }

    /// Read and parse a TOML catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Add a theme, replacing any theme with the same ID.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.insert(theme);
        self
    }

    /// Set the card back image.
    #[must_use]
    pub fn with_card_back(mut self, card_back: impl Into<String>) -> Self {
        self.card_back = card_back.into();
        self
    }

    fn insert(&mut self, theme: Theme) {
        if !self.themes.contains_key(&theme.id) {
            self.order.push(theme.id.clone());
        }
        self.themes.insert(theme.id.clone(), theme);
    }

    /// Get a theme by ID.
    #[must_use]
    pub fn get(&self, id: &ThemeId) -> Option<&Theme> {
        self.themes.get(id)
    }

    /// Iterate over themes in declaration order.
    pub fn themes(&self) -> impl Iterator<Item = &Theme> {
        self.order.iter().filter_map(|id| self.themes.get(id))
    }

    /// Image shown on face-down cards.
    #[must_use]
    pub fn card_back(&self) -> &str {
        &self.card_back
    }

    /// The first `pair_count` assets of a theme.
    ///
    /// Fails if the theme is unknown, has fewer than `pair_count` assets,
    /// or repeats an asset within them.
    pub fn assets_for(&self, id: &ThemeId, pair_count: usize) -> Result<&[String]> {
        let theme = self
            .get(id)
            .ok_or_else(|| ConfigError::UnknownTheme(id.to_string()))?;

        if theme.assets.len() < pair_count {
            return Err(ConfigError::InsufficientAssets {
                theme: id.to_string(),
                available: theme.assets.len(),
                required: pair_count,
            });
        }

        let assets = &theme.assets[..pair_count];
        check_unique(id, assets)?;
        Ok(assets)
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Level and theme chosen on the settings screen.
///
/// Survives session resets; only game progress is discarded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub level: Level,
    pub theme: ThemeId,
}

impl GameSettings {
    /// Create new settings.
    pub fn new(level: Level, theme: impl Into<ThemeId>) -> Self {
        Self {
            level,
            theme: theme.into(),
        }
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(Level::Beginner, "space")
    }
}
