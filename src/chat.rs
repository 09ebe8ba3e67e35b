//! The chat operations available to command handlers.
//!
//! Handlers never talk to Discord directly. They go through [`Chat`], which the bot implements
//! on top of serenity and which tests implement in memory.
use std::time::Duration;

use async_trait::async_trait;
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

use crate::Error;

/// Timestamp format used when rendering quotes.
const QUOTE_TIMESTAMP_FORMAT: &[FormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// A chat user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// The platform id of the user.
    pub id: u64,
    /// The user's name.
    pub name: String,
}

/// A message retrieved from a channel's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessage {
    /// The name of the author.
    pub author: String,
    /// When the message was posted.
    pub timestamp: OffsetDateTime,
    /// The message content with mentions rendered as names.
    pub content: String,
}

/// A private message sent to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// The message content with mentions rendered as names.
    pub content: String,
    /// When the reply was received.
    pub received_at: OffsetDateTime,
}

/// The context of a single command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The id of the message that triggered the command.
    pub message_id: u64,
    /// The channel the command was sent in.
    pub channel_id: u64,
    /// The guild the command was sent in, if any.
    pub guild_id: Option<u64>,
    /// The user who sent the command.
    pub requester: User,
    /// The command name, without prefix.
    pub command: String,
    /// Whitespace-separated arguments following the command name.
    pub args: Vec<String>,
}

impl Invocation {
    /// Returns the argument at `index`, if present.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Returns the arguments from `index` onwards joined by single spaces.
    #[must_use]
    pub fn rest(&self, index: usize) -> String {
        self.args.get(index..).unwrap_or_default().join(" ")
    }
}

/// Operations a command handler may perform against the chat platform.
#[async_trait]
pub trait Chat: Send + Sync {
    /// Fetches `message_id` from the history of `channel_id`.
    ///
    /// Returns `Ok(None)` when the message doesn't exist or the id is malformed.
    async fn fetch_message(
        &self,
        channel_id: u64,
        message_id: &str,
    ) -> Result<Option<ChannelMessage>, Error>;

    /// Posts `text` to `channel_id`.
    async fn say(&self, channel_id: u64, text: &str) -> Result<(), Error>;

    /// Deletes `message_id` from `channel_id`.
    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), Error>;

    /// Resolves a mention, id or member name to a user.
    ///
    /// Returns `Ok(None)` when no such user is known.
    async fn resolve_user(
        &self,
        guild_id: Option<u64>,
        reference: &str,
    ) -> Result<Option<User>, Error>;

    /// Sends `text` to `user_id` in a private channel.
    async fn direct_message(&self, user_id: u64, text: &str) -> Result<(), Error>;

    /// Waits for the next private message authored by `user_id`.
    ///
    /// Returns `Ok(None)` if nothing arrives within `timeout`.
    async fn await_private_reply(
        &self,
        user_id: u64,
        timeout: Duration,
    ) -> Result<Option<Reply>, Error>;
}

/// Formats a timestamp the way quotes display it, e.g. `2016-08-14 19:02:11`.
///
/// # Errors
///
/// Returns [`Error::FormatTimestamp`] if the timestamp can't be rendered.
pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, Error> {
    Ok(timestamp.format(QUOTE_TIMESTAMP_FORMAT)?)
}
