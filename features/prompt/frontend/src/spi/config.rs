use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use promptkit::{AbbrevStore, Expansion};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// User config file (`~/.config/oxsh/prompt.toml`).
///
/// `[abbrevs]` maps trigger words to literal expansions (the
/// `<edit>` cursor marker works here too); `[prompt]` overrides a few
/// toggles before the env registry is consulted. Computed
/// abbreviations can't live in a file; hosts register those through
/// the published store.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct PromptFileConfig {
    #[serde(default)]
    pub abbrevs: BTreeMap<String, String>,
    #[serde(default)]
    pub prompt: PromptToggles,
}

/// `[prompt]` section of the config.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct PromptToggles {
    pub vi_mode: Option<bool>,
    pub auto_suggest: Option<bool>,
    pub mouse_support: Option<bool>,
}

/// Default config file location, when a config directory exists.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("oxsh").join("prompt.toml"))
}

impl PromptFileConfig {
    /// Load the user config; a missing file yields the defaults.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path; a missing file yields the defaults,
    /// a malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no prompt config file");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    /// Register every `[abbrevs]` entry as a literal expansion.
    pub fn register_abbrevs(&self, store: &mut AbbrevStore) {
        for (trigger, text) in &self.abbrevs {
            store.register(trigger.clone(), Expansion::literal(text.clone()));
        }
    }
}
