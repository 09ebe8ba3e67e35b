//! Constant default values.

use std::time::Duration;

/// The default command prefix.
pub const DEFAULT_COMMAND_PREFIX: &str = "!";

/// The default location of the frame data file.
pub const DEFAULT_FRAME_DATA_PATH: &str = "moves.json";

/// How long to wait for a private reply during a misquote.
pub const DEFAULT_MISQUOTE_REPLY_TIMEOUT: Duration = Duration::from_secs(60);

/// How far back a misquote is dated.
pub const DEFAULT_MISQUOTE_BACKDATE: Duration = Duration::from_secs(5 * 60);

/// The prefix for environment variables that override configuration values.
pub const ENV_PREFIX: &str = "QUOTEBOT_";

/// Shorthand environment variable for the Discord token.
pub const TOKEN_ENV_VAR: &str = "DISCORD_TOKEN";
