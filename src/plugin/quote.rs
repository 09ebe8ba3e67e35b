//! Re-posts an earlier message from the same channel as an attributed quote.
use std::borrow::Cow;

use serenity::constants::MESSAGE_CODE_LIMIT;
use tracing::{debug, warn};

use crate::chat::{ChannelMessage, format_timestamp};
use crate::plugin::prelude::*;

/// Reply sent when no message id is given.
pub const USAGE: &str = "Usage: `quote <message id> [reply...]`";

/// Quote plugin.
pub struct Quote;

#[async_trait]
impl Plugin for Quote {
    fn new() -> Self {
        Self
    }

    fn name() -> Name {
        Name::from("quote")
    }

    fn author() -> Author {
        Author::from("quotebot")
    }

    fn version() -> Version {
        Version::from("0.1")
    }

    async fn handle_command(
        &self,
        _context: &Context,
        chat: &dyn Chat,
        invocation: &Invocation,
    ) -> Result<(), BotError> {
        let outcome = self.post_quote(chat, invocation).await;

        // The invocation is cleaned up whether or not the quote could be posted.
        let cleanup = chat
            .delete_message(invocation.channel_id, invocation.message_id)
            .await;

        outcome.and(cleanup)
    }
}

impl Quote {
    async fn post_quote(&self, chat: &dyn Chat, invocation: &Invocation) -> Result<(), BotError> {
        let requester = invocation.requester.name.as_str();
        let channel = invocation.channel_id.to_string();

        let Some(message_id) = invocation.arg(0) else {
            return chat.say(invocation.channel_id, USAGE).await;
        };

        debug!(%message_id, %requester, "fetching quoted message");

        match chat.fetch_message(invocation.channel_id, message_id).await? {
            Some(message) => {
                let rebuttal = invocation.rest(1);
                let text = format_quote(&message, requester, &rebuttal)?;

                chat.say(invocation.channel_id, &text).await?;
                events::emit([
                    "quote",
                    "ok",
                    requester,
                    channel.as_str(),
                    message_id,
                ]);
            }
            None => {
                warn!(%message_id, %requester, "quoted message not found");

                chat.say(invocation.channel_id, &not_found(message_id, requester))
                    .await?;
                events::emit([
                    "quote",
                    "not_found",
                    requester,
                    channel.as_str(),
                    message_id,
                ]);
            }
        }

        Ok(())
    }
}

/// Formats `message` as a quote requested by `requester`, followed by an optional `rebuttal`.
///
/// The quoted content is shortened so the whole reply fits in a single Discord message.
///
/// # Errors
///
/// Returns an error if the message timestamp can't be formatted.
pub fn format_quote(
    message: &ChannelMessage,
    requester: &str,
    rebuttal: &str,
) -> Result<String, BotError> {
    let author = &message.author;
    let timestamp = format_timestamp(message.timestamp)?;
    let render = |content: &str| {
        if rebuttal.is_empty() {
            format!("**{author} [{timestamp}] said:** _via {requester}_ ```{content}```")
        } else {
            format!("**{author} [{timestamp}] said:** ```{content}``` **{requester}:** {rebuttal}")
        }
    };

    let text = render(&message.content);
    let length = text.chars().count();

    if length <= MESSAGE_CODE_LIMIT {
        return Ok(text);
    }

    let overhead = length - message.content.chars().count();
    let content = shorten(&message.content, MESSAGE_CODE_LIMIT.saturating_sub(overhead));

    debug!(%length, "shortening quote");

    Ok(shorten(&render(&content), MESSAGE_CODE_LIMIT).into_owned())
}

/// Cuts `text` down to at most `max_chars` characters, ending in an ellipsis when shortened.
fn shorten(text: &str, max_chars: usize) -> Cow<'_, str> {
    if text.chars().count() <= max_chars {
        return Cow::Borrowed(text);
    }

    let Some(keep) = max_chars.checked_sub(1) else {
        return Cow::Borrowed("");
    };

    let mut shortened: String = text.chars().take(keep).collect();
    shortened.push('…');

    Cow::Owned(shortened)
}

/// The reply sent when the quoted message can't be found.
#[must_use]
pub fn not_found(message_id: &str, requester: &str) -> String {
    format!("Quote not found in this channel ('{message_id}' requested by {requester})")
}
