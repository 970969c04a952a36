//! Character sheet loader.
//!
//! Loads saved characters from RON files. A sheet carries identity, the stored
//! condition and the stat snapshot; timed modifiers are not persisted.

use std::path::Path;

use charstats_core::{
    Character, ConditionKind, DiagnosticSink, StatKind, StatRecord, StatsConfig, TracingSink,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Persisted form of a [`Character`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub condition: ConditionKind,
    pub stats: Vec<(StatKind, StatRecord)>,
}

fn default_level() -> u32 {
    1
}

impl CharacterSheet {
    /// Capture a character's persistent state.
    pub fn capture<S: DiagnosticSink>(character: &Character<S>) -> Self {
        Self {
            name: character.name().to_owned(),
            level: character.level(),
            xp: character.xp(),
            condition: character.condition(),
            stats: character.snapshot(),
        }
    }

    /// Build a character from this sheet, reporting transitions to `sink`.
    ///
    /// The stored condition is reconciled with the restored HP, so a sheet
    /// saying `HEALTHY` with zero HP loads as `DEAD`.
    pub fn into_character<S: DiagnosticSink>(
        self,
        config: &StatsConfig,
        sink: S,
    ) -> LoadResult<Character<S>> {
        let mut character = Character::with_sink(self.name, config, sink);
        character.set_level(self.level);
        character.set_xp(self.xp);
        character
            .restore_saved(self.condition, self.stats)
            .map_err(|e| anyhow::anyhow!("Invalid stats for '{}': {}", character.name(), e))?;
        Ok(character)
    }

    pub fn to_ron(&self) -> LoadResult<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| anyhow::anyhow!("Failed to serialize character sheet: {}", e))
    }
}

/// Loader for character sheets from RON files.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load a character sheet from a RON file.
    pub fn load_sheet(path: &Path) -> LoadResult<CharacterSheet> {
        let content = read_file(path)?;
        Self::parse_sheet(&content)
    }

    /// Parse a character sheet from a RON string.
    pub fn parse_sheet(content: &str) -> LoadResult<CharacterSheet> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character sheet RON: {}", e))
    }

    /// Load a character that logs its transitions through `tracing`.
    pub fn load(path: &Path, config: &StatsConfig) -> LoadResult<Character> {
        let sheet = Self::load_sheet(path)?;
        tracing::debug!(path = %path.display(), name = %sheet.name, "loading character");
        sheet.into_character(config, TracingSink)
    }

    /// Write a character sheet to a RON file.
    pub fn save<S: DiagnosticSink>(path: &Path, character: &Character<S>) -> LoadResult<()> {
        let content = CharacterSheet::capture(character).to_ron()?;
        std::fs::write(path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
    }
}
