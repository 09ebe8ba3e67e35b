//! Error types

use miette::Diagnostic;
use thiserror::Error;

/// Application errors for configuration, frame data and Discord operations.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The layered configuration could not be extracted.
    #[error("Could not load configuration")]
    #[diagnostic(code(quotebot::config))]
    Config(#[source] Box<figment::Error>),
    /// No Discord token was provided.
    #[error("Missing Discord token")]
    #[diagnostic(
        code(quotebot::missing_token),
        help("set QUOTEBOT_DISCORD__TOKEN or DISCORD_TOKEN in the environment")
    )]
    MissingToken,
    /// The frame data file could not be read.
    #[error("Could not read frame data from {path}")]
    #[diagnostic(code(quotebot::frame_data_io))]
    ReadFrameData {
        /// Path of the file we attempted to read.
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The frame data file is not valid.
    #[error("Could not parse frame data")]
    #[diagnostic(code(quotebot::frame_data_parse))]
    ParseFrameData(#[source] serde_path_to_error::Error<serde_json::Error>),
    /// General Discord client error.
    #[error("Discord error")]
    Discord(#[from] serenity::Error),
    /// A timestamp was outside the representable range.
    #[error("Invalid timestamp")]
    Timestamp(#[from] time::error::ComponentRange),
    /// A timestamp could not be formatted.
    #[error("Could not format timestamp")]
    FormatTimestamp(#[from] time::error::Format),
    /// The tracing subscriber could not be installed.
    #[error("Could not initialize tracing")]
    Tracing(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
