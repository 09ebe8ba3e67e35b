//! Layered configuration.
//!
//! Values are read from, in increasing order of priority: built-in defaults, the TOML file,
//! `QUOTEBOT_`-prefixed environment variables (`__` separates nested keys, e.g.
//! `QUOTEBOT_DISCORD__TOKEN`) and finally `DISCORD_TOKEN`.
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{Error, consts};

/// The complete bot configuration.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Discord client configuration
    pub discord: DiscordConfig,
    /// Frame data configuration
    #[serde(default)]
    pub frames: FramesConfig,
    /// Misquote configuration
    #[serde(default)]
    pub misquote: MisquoteConfig,
    /// Tracing configuration
    #[serde(default)]
    pub tracing: TracingConfig,
}

/// Discord client settings.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DiscordConfig {
    /// The bot token used to authenticate with Discord.
    pub token: String,
    /// The prefix that marks a message as a command.
    #[serde(default = "default_command_prefix")]
    pub prefix: String,
}

/// Frame data settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FramesConfig {
    /// Path to the JSON file holding move records.
    #[serde(default = "default_frame_data_path")]
    pub path: PathBuf,
}

/// Misquote settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MisquoteConfig {
    /// How long to wait for the requester's private reply.
    #[serde(default = "default_reply_timeout", with = "humantime_serde")]
    pub reply_timeout: Duration,
    /// How far before the reply the fabricated quote is dated.
    #[serde(default = "default_backdate", with = "humantime_serde")]
    pub backdate: Duration,
}

/// Trace export settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TracingConfig {
    /// Enable OTLP trace export
    pub enabled: bool,
}

impl Config {
    /// Loads the configuration from the TOML file at `path` merged with the environment.
    ///
    /// The file is optional; a token supplied through the environment is enough to start.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the merged sources can't be extracted and
    /// [`Error::MissingToken`] if the token is absent or empty.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        trace!(?path, "loading config");

        Self::from_figment(&Self::figment(path))
    }

    /// Returns the layered providers for the config file at `path`.
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(consts::ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&[consts::TOKEN_ENV_VAR])
                    .map(|_| "discord.token".into()),
            )
    }

    /// Extracts and validates a configuration from `figment`.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, Error> {
        let config: Self = figment.extract()?;

        if config.discord.token.trim().is_empty() {
            return Err(Error::MissingToken);
        }

        debug!(prefix = %config.discord.prefix, frames = ?config.frames.path, "loaded config");

        Ok(config)
    }
}

impl Default for FramesConfig {
    fn default() -> Self {
        Self {
            path: default_frame_data_path(),
        }
    }
}

impl Default for MisquoteConfig {
    fn default() -> Self {
        Self {
            reply_timeout: default_reply_timeout(),
            backdate: default_backdate(),
        }
    }
}

#[must_use]
pub fn default_command_prefix() -> String {
    consts::DEFAULT_COMMAND_PREFIX.to_string()
}

#[must_use]
pub fn default_frame_data_path() -> PathBuf {
    PathBuf::from(consts::DEFAULT_FRAME_DATA_PATH)
}

#[must_use]
pub const fn default_reply_timeout() -> Duration {
    consts::DEFAULT_MISQUOTE_REPLY_TIMEOUT
}

#[must_use]
pub const fn default_backdate() -> Duration {
    consts::DEFAULT_MISQUOTE_BACKDATE
}
