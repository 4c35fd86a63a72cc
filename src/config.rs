//! Application configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use ultimate_tictactoe::{Player, RulesConfig};

/// Display name and picture for one side of the board.
///
/// Presentation-only: never written to the save file.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Name shown in the turn indicator and the winner announcement.
    name: String,

    /// Optional avatar image path.
    #[serde(default)]
    avatar: Option<PathBuf>,
}

impl PlayerProfile {
    /// Creates a profile, trimming surrounding whitespace from the name.
    #[instrument(skip(name))]
    pub fn new(name: impl Into<String>, avatar: Option<PathBuf>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            avatar,
        }
    }

    /// Name to display, falling back to the mark when blank.
    pub fn display_name(&self, mark: Player) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            format!("Player {}", mark)
        } else {
            name.to_string()
        }
    }
}

/// Profiles for both marks.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Players {
    /// Profile for X.
    #[serde(default = "default_player_x")]
    x: PlayerProfile,

    /// Profile for O.
    #[serde(default = "default_player_o")]
    o: PlayerProfile,
}

impl Players {
    /// Creates the pair of profiles.
    pub fn new(x: PlayerProfile, o: PlayerProfile) -> Self {
        Self { x, o }
    }

    /// Returns the profile playing `mark`.
    pub fn profile(&self, mark: Player) -> &PlayerProfile {
        match mark {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }

    fn profile_mut(&mut self, mark: Player) -> &mut PlayerProfile {
        match mark {
            Player::X => &mut self.x,
            Player::O => &mut self.o,
        }
    }

    /// Returns the display name of the player playing `mark`.
    pub fn name_of(&self, mark: Player) -> String {
        self.profile(mark).display_name(mark)
    }

    /// Renames the player playing `mark`. Surrounding whitespace is dropped.
    #[instrument(skip(self, name))]
    pub fn rename(&mut self, mark: Player, name: &str) {
        let profile = self.profile_mut(mark);
        profile.name = name.trim().to_string();
        debug!(name = %profile.name, "Player renamed");
    }

    /// Replaces the avatar of the player playing `mark`.
    #[instrument(skip(self))]
    pub fn set_avatar(&mut self, mark: Player, avatar: Option<PathBuf>) {
        self.profile_mut(mark).avatar = avatar;
    }

    /// One roster line: mark, display name and avatar if any,
    /// e.g. `X: Alice [alice.png]`.
    pub fn badge(&self, mark: Player) -> String {
        let name = self.name_of(mark);
        match self.profile(mark).avatar() {
            Some(avatar) => format!("{}: {} [{}]", mark, name, avatar.display()),
            None => format!("{}: {}", mark, name),
        }
    }
}

impl Default for Players {
    fn default() -> Self {
        Self::new(default_player_x(), default_player_o())
    }
}

fn default_player_x() -> PlayerProfile {
    PlayerProfile::new("Player X", None)
}

fn default_player_o() -> PlayerProfile {
    PlayerProfile::new("Player O", None)
}

fn default_save_path() -> PathBuf {
    PathBuf::from("save.txt")
}

/// Top-level configuration, read from TOML.
///
/// ```toml
/// save_path = "save.txt"
///
/// [players.x]
/// name = "Alice"
/// avatar = "alice.png"
///
/// [players.o]
/// name = "Bob"
///
/// [rules]
/// full_board_policy = "keep_active"
/// load_policy = "recompute"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the game is saved to and loaded from.
    #[serde(default = "default_save_path")]
    save_path: PathBuf,

    /// Player profiles.
    #[serde(default)]
    players: Players,

    /// Rule variants.
    #[serde(default)]
    rules: RulesConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            players: Players::default(),
            rules: RulesConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(save_path = %config.save_path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads the file if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the save file location.
    pub fn with_save_path(mut self, save_path: PathBuf) -> Self {
        self.save_path = save_path;
        self
    }

    /// Overrides the rule variants.
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
