//! Game records and the fields used to create them

use chrono::Local;
use game_catalogue_sdk::{FormData, HandlerError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

pub const ATTR_PLATFORM: &str = "platform";
pub const ATTR_GAME_ID: &str = "game_id";
pub const ATTR_STATUS: &str = "status";

/// Which logical collection a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Owned,
    Wishlist,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Owned => "owned",
            GameStatus::Wishlist => "wishlist",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item of the catalogue table, keyed by (`platform`, `game_id`).
///
/// `genre` and `year` are kept as the raw strings the form submitted and are
/// written as null when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub platform: String,
    pub game_id: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<GameStatus>,
    #[serde(default)]
    pub added_date: String,
}

impl GameRecord {
    /// Build a fresh record with a new id and the current local timestamp.
    pub fn create(new: NewGame, status: GameStatus) -> Result<Self, HandlerError> {
        let (platform, game_name) = match (new.platform, new.game_name) {
            (Some(platform), Some(game_name)) if !platform.is_empty() && !game_name.is_empty() => {
                (platform, game_name)
            }
            _ => return Err(HandlerError::missing_fields(&["platform", "game_name"])),
        };

        Ok(Self {
            platform,
            game_id: Uuid::new_v4().to_string(),
            game_name,
            genre: new.genre,
            year: new.year,
            status: Some(status),
            added_date: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        })
    }

    /// Effective status; records written without one count as owned.
    pub fn status(&self) -> GameStatus {
        self.status.unwrap_or(GameStatus::Owned)
    }

    pub fn key(&self) -> GameKey {
        GameKey {
            platform: self.platform.clone(),
            game_id: self.game_id.clone(),
        }
    }
}

/// Composite primary key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameKey {
    pub platform: String,
    pub game_id: String,
}

impl GameKey {
    pub fn new(platform: impl Into<String>, game_id: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            game_id: game_id.into(),
        }
    }

    /// Read `platform` and `game_id` from a submitted form.
    pub fn from_form(form: &FormData) -> Result<Self, HandlerError> {
        let [platform, game_id] = form.require_all([ATTR_PLATFORM, ATTR_GAME_ID])?;
        Ok(Self::new(platform, game_id))
    }
}

/// Fields submitted by the add forms. Presence of `platform` and `game_name`
/// is checked when the record is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewGame {
    pub platform: Option<String>,
    pub game_name: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
}

impl NewGame {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            platform: form.get_owned("platform"),
            game_name: form.get_owned("game_name"),
            genre: form.get_owned("genre"),
            year: form.get_owned("year"),
        }
    }
}

/// Sorted, de-duplicated platform names of the given records.
pub fn platforms_of(records: &[GameRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.platform.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
