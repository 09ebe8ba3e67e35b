//! Fighting-game frame data.
//!
//! The table is loaded once from a JSON file shaped like
//!
//! ```json
//! { "ryu": [ { "name": "c.mk", "data": { "startup": 8, "hitAdvantage": 2 } } ] }
//! ```
//!
//! and never mutated afterwards.
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::Error;

/// Regional character names and the canonical key they map to.
pub const CHARACTER_ALIASES: [(&str, &str); 3] =
    [("bison", "dictator"), ("vega", "claw"), ("balrog", "boxer")];

static RE_CROUCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"cr\.").expect("crouch pattern is valid"));

/// A move statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    /// Frames before the move becomes active.
    Startup,
    /// Frames the move stays active.
    Active,
    /// Frames of recovery after the active frames.
    Recovery,
    /// Frame advantage when blocked.
    BlockAdvantage,
    /// Frame advantage on hit.
    HitAdvantage,
    /// Damage dealt.
    Damage,
    /// Stun dealt.
    Stun,
}

impl Stat {
    /// Every statistic, in display order.
    pub const ALL: [Self; 7] = [
        Self::Startup,
        Self::Active,
        Self::Recovery,
        Self::BlockAdvantage,
        Self::HitAdvantage,
        Self::Damage,
        Self::Stun,
    ];

    /// The key of the statistic in the JSON file.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Active => "active",
            Self::Recovery => "recovery",
            Self::BlockAdvantage => "blockAdvantage",
            Self::HitAdvantage => "hitAdvantage",
            Self::Damage => "damage",
            Self::Stun => "stun",
        }
    }

    /// The human-readable name of the statistic.
    #[must_use]
    pub const fn nice_name(self) -> &'static str {
        match self {
            Self::Startup => "Startup",
            Self::Active => "Active",
            Self::Recovery => "Recovery",
            Self::BlockAdvantage => "Block Advantage",
            Self::HitAdvantage => "Hit Advantage",
            Self::Damage => "Damage",
            Self::Stun => "Stun",
        }
    }
}

/// The statistics recorded for a move. Any of them may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Stats {
    pub startup: Option<i64>,
    pub active: Option<i64>,
    pub recovery: Option<i64>,
    pub block_advantage: Option<i64>,
    pub hit_advantage: Option<i64>,
    pub damage: Option<i64>,
    pub stun: Option<i64>,
}

impl Stats {
    /// Returns the value of `stat`, if recorded.
    #[must_use]
    pub const fn get(&self, stat: Stat) -> Option<i64> {
        match stat {
            Stat::Startup => self.startup,
            Stat::Active => self.active,
            Stat::Recovery => self.recovery,
            Stat::BlockAdvantage => self.block_advantage,
            Stat::HitAdvantage => self.hit_advantage,
            Stat::Damage => self.damage,
            Stat::Stun => self.stun,
        }
    }

    /// Returns the recorded statistics in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Stat, i64)> + '_ {
        Stat::ALL
            .into_iter()
            .filter_map(|stat| self.get(stat).map(|value| (stat, value)))
    }
}

/// A single move record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Move {
    /// The lower-case move name, e.g. `c.mk`.
    pub name: String,
    /// The move's statistics.
    #[serde(default)]
    pub data: Stats,
}

/// Reasons a lookup can fail.
///
/// The display text of each variant is the reply sent to the user.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    /// No character with the given key.
    #[error("Character Not Found")]
    CharacterNotFound,
    /// The character has no move with the given name.
    #[error("Move Not Found")]
    MoveNotFound,
    /// The move has no value for the requested statistic.
    #[error("Situation Not Found")]
    SituationNotFound,
}

/// Move records keyed by character.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct FrameData {
    characters: HashMap<String, Vec<Move>>,
}

impl FrameData {
    /// Loads the frame data file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadFrameData`] if the file can't be opened and
    /// [`Error::ParseFrameData`] if its contents are malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        debug!(?path, "loading frame data");

        let file = File::open(path).map_err(|source| Error::ReadFrameData {
            path: path.display().to_string(),
            source,
        })?;
        let frame_data = Self::from_reader(BufReader::new(file))?;

        debug!(
            num_characters = frame_data.num_characters(),
            "loaded frame data"
        );

        Ok(frame_data)
    }

    /// Parses frame data from a JSON reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseFrameData`] with the path of the offending value.
    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        let jd = &mut serde_json::Deserializer::from_reader(reader);

        serde_path_to_error::deserialize(jd).map_err(Error::ParseFrameData)
    }

    /// Parses frame data from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseFrameData`] with the path of the offending value.
    pub fn from_json(s: &str) -> Result<Self, Error> {
        let jd = &mut serde_json::Deserializer::from_str(s);

        serde_path_to_error::deserialize(jd).map_err(Error::ParseFrameData)
    }

    /// Returns the number of characters in the table.
    #[must_use]
    pub fn num_characters(&self) -> usize {
        self.characters.len()
    }

    /// Returns the moves of the character with the canonical key `character`.
    #[must_use]
    pub fn moves(&self, character: &str) -> Option<&[Move]> {
        self.characters.get(character).map(Vec::as_slice)
    }

    /// Finds the first move named `name` for `character`.
    ///
    /// Both arguments are expected to be normalized already.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::CharacterNotFound`] or [`LookupError::MoveNotFound`].
    pub fn find(&self, character: &str, name: &str) -> Result<&Move, LookupError> {
        self.moves(character)
            .ok_or(LookupError::CharacterNotFound)?
            .iter()
            .find(|m| m.name == name)
            .ok_or(LookupError::MoveNotFound)
    }
}

/// Lower-cases `character` and maps regional names to their canonical key.
#[must_use]
pub fn normalize_character(character: &str) -> String {
    let character = character.to_lowercase();

    CHARACTER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == character)
        .map_or(character, |(_, canonical)| (*canonical).to_string())
}

/// Lower-cases `name` and rewrites the first `cr.` to `c.`.
#[must_use]
pub fn normalize_move(name: &str) -> String {
    RE_CROUCH.replace(&name.to_lowercase(), "c.").into_owned()
}
