//! Collects a line of text from the requester over DM and posts it as something a third party
//! "definitely said".
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};

use crate::chat::format_timestamp;
use crate::plugin::prelude::*;

/// Reply sent when the misquote target can't be resolved.
pub const USER_NOT_FOUND: &str = "User not found";

/// Misquote plugin.
pub struct Misquote;

#[async_trait]
impl Plugin for Misquote {
    fn new() -> Self {
        Self
    }

    fn name() -> Name {
        Name::from("misquote")
    }

    fn author() -> Author {
        Author::from("quotebot")
    }

    fn version() -> Version {
        Version::from("0.1")
    }

    async fn handle_command(
        &self,
        context: &Context,
        chat: &dyn Chat,
        invocation: &Invocation,
    ) -> Result<(), BotError> {
        let requester = &invocation.requester;
        let reference = invocation.arg(0).unwrap_or_default();
        let target = if reference.is_empty() {
            None
        } else {
            chat.resolve_user(invocation.guild_id, reference).await?
        };

        let Some(target) = target else {
            warn!(%reference, requester = %requester.name, "misquote target not found");

            chat.say(invocation.channel_id, USER_NOT_FOUND).await?;
            events::emit(["misquote", "user_not_found", requester.name.as_str(), reference]);

            return Ok(());
        };

        chat.direct_message(requester.id, &prompt(&target.name))
            .await?;

        let settings = &context.config.misquote;

        debug!(
            requester = %requester.name,
            target = %target.name,
            timeout = ?settings.reply_timeout,
            "waiting for private reply"
        );

        let Some(reply) = chat
            .await_private_reply(requester.id, settings.reply_timeout)
            .await?
        else {
            warn!(requester = %requester.name, target = %target.name, "misquote timed out");

            chat.direct_message(requester.id, &timed_out(&target.name))
                .await?;
            events::emit(["misquote", "timeout", requester.name.as_str(), target.name.as_str()]);

            return Ok(());
        };

        let faketime = backdated(reply.received_at, settings.backdate);
        let text = format_misquote(&target.name, faketime, &reply.content)?;

        chat.say(invocation.channel_id, &text).await?;
        events::emit(["misquote", "ok", requester.name.as_str(), target.name.as_str()]);

        Ok(())
    }
}

/// The private prompt sent to the requester.
#[must_use]
pub fn prompt(target: &str) -> String {
    format!("What would you like to be misattributed to {target}?")
}

/// The private notice sent when the requester doesn't answer in time.
#[must_use]
pub fn timed_out(target: &str) -> String {
    format!("Timed out waiting for something to misattribute to {target}.")
}

/// Returns `received_at` moved `backdate` into the past.
#[must_use]
pub fn backdated(received_at: OffsetDateTime, backdate: std::time::Duration) -> OffsetDateTime {
    received_at.saturating_sub(Duration::try_from(backdate).unwrap_or(Duration::MAX))
}

/// Formats a fabricated quote of `content` attributed to `target` at `timestamp`.
///
/// # Errors
///
/// Returns an error if the timestamp can't be formatted.
pub fn format_misquote(
    target: &str,
    timestamp: OffsetDateTime,
    content: &str,
) -> Result<String, BotError> {
    let timestamp = format_timestamp(timestamp)?;

    Ok(format!(
        "**{target} [{timestamp}] definitely said:** ```{content}```"
    ))
}
