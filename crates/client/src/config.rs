//! Client configuration read from environment variables.
use std::env;
use std::path::PathBuf;

use combat_core::{CharacterClass, EncounterKind};

/// Everything the composition root needs, split by concern.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub player: PlayerConfig,
    pub run: RunConfig,
    pub log: LogConfig,
}

impl ClientConfig {
    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_PLAYER_NAME` - Character name (default: "Adventurer")
    /// - `COMBAT_CLASS` - `human`, `werewolf` or `lumberjack` (default: human)
    /// - `COMBAT_LEVEL` - Starting level (default: 1)
    /// - `COMBAT_WEAPON` - Weapon identifier from the equipment catalog
    /// - `COMBAT_ARMOR` - Comma-separated armor identifiers
    /// - `COMBAT_POTIONS` - Potions carried at the start (default: 3)
    /// - `COMBAT_TIER` - Dungeon tier of every room (default: 1)
    /// - `COMBAT_ROOMS` - Rooms in the run (default: 3)
    /// - `COMBAT_BOSS` - Fight the boss instead of rooms
    /// - `COMBAT_AUTO` - Resolve every choice with the auto-pilot
    /// - `COMBAT_SEED` - Seed for reproducible runs
    /// - `COMBAT_DATA_DIR` - Content directory; built-in content when unset
    /// - `COMBAT_LOG_DIR` - Log root (default: platform cache directory)
    /// - `COMBAT_LOG_LEVEL` - Minimum level written to the log (default: info)
    /// - `COMBAT_SESSION_ID` - Log subdirectory name (default: timestamp)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(name) = env::var("COMBAT_PLAYER_NAME")
            && !name.trim().is_empty()
        {
            config.player.name = name.trim().to_string();
        }
        if let Some(class) = read_env::<CharacterClass>("COMBAT_CLASS") {
            config.player.class = class;
        }
        if let Some(level) = read_env::<u32>("COMBAT_LEVEL") {
            config.player.level = level.max(1);
        }
        config.player.weapon = env::var("COMBAT_WEAPON").ok().filter(|id| !id.is_empty());
        if let Ok(armor) = env::var("COMBAT_ARMOR") {
            config.player.armor = split_list(&armor);
        }
        if let Some(potions) = read_env::<u32>("COMBAT_POTIONS") {
            config.player.potions = potions;
        }

        if let Some(tier) = read_env::<u32>("COMBAT_TIER") {
            config.run.tier = tier.max(1);
        }
        if let Some(rooms) = read_env::<u32>("COMBAT_ROOMS") {
            config.run.rooms = rooms.max(1);
        }
        config.run.boss = read_flag("COMBAT_BOSS");
        config.run.auto = read_flag("COMBAT_AUTO");
        config.run.seed = read_env::<u64>("COMBAT_SEED");
        config.run.data_dir = env::var_os("COMBAT_DATA_DIR").map(PathBuf::from);

        if let Some(dir) = env::var_os("COMBAT_LOG_DIR") {
            config.log.dir = PathBuf::from(dir);
        }
        if let Some(level) = read_env::<tracing::Level>("COMBAT_LOG_LEVEL") {
            config.log.level = level;
        }
        config.log.session_id = env::var("COMBAT_SESSION_ID").ok();

        config
    }
}

/// The character the run starts with.
#[derive(Clone, Debug)]
pub struct PlayerConfig {
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub weapon: Option<String>,
    pub armor: Vec<String>,
    pub potions: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Adventurer".to_string(),
            class: CharacterClass::Human,
            level: 1,
            weapon: None,
            armor: Vec::new(),
            potions: 3,
        }
    }
}

/// Shape of the run.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub tier: u32,
    pub rooms: u32,
    pub boss: bool,
    pub auto: bool,
    pub seed: Option<u64>,
    pub data_dir: Option<PathBuf>,
}

impl RunConfig {
    pub fn encounter_kind(&self) -> EncounterKind {
        if self.boss {
            EncounterKind::Boss
        } else {
            EncounterKind::Room { tier: self.tier }
        }
    }

    /// The boss room is fought once regardless of `rooms`.
    pub fn room_count(&self) -> u32 {
        if self.boss { 1 } else { self.rooms }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tier: 1,
            rooms: 3,
            boss: false,
            auto: false,
            seed: None,
            data_dir: None,
        }
    }
}

/// Session log location.
#[derive(Clone, Debug)]
pub struct LogConfig {
    pub dir: PathBuf,
    pub level: tracing::Level,
    pub session_id: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            level: tracing::Level::INFO,
            session_id: None,
        }
    }
}

/// Platform cache directory for logs, falling back to the temp directory.
fn default_log_dir() -> PathBuf {
    let cache = env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))
        .or_else(|| env::var_os("LOCALAPPDATA").map(PathBuf::from))
        .unwrap_or_else(env::temp_dir);
    cache.join("dungeon").join("logs")
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

fn read_flag(key: &str) -> bool {
    env::var(key)
        .map(|value| parse_flag(&value))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
