//! The Discord side of the bot: event handling and the serenity-backed [`Chat`].
use std::num::NonZeroU64;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serenity::all::{
    ChannelId, Client, Context as SerenityContext, EventHandler, GatewayIntents, GuildId, Message,
    MessageCollector, MessageId, Ready, UserId,
};
use serenity::http::HttpError;
use time::OffsetDateTime;
use tracing::{debug, error, info};

use crate::chat::{Chat, ChannelMessage, Invocation, Reply, User};
use crate::command::CommandParser;
use crate::{Context, Error, Registry, events};

/// The gateway events the bot subscribes to.
#[must_use]
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

/// The main bot struct that turns Discord messages into plugin invocations.
pub struct Bot {
    /// The shared, read-only context for plugins
    context: Arc<Context>,
    /// The registry holding every command plugin
    registry: Arc<Registry>,
    /// Parser for the configured command prefix
    parser: CommandParser,
}

impl Bot {
    /// Creates a new bot from the shared context and plugin registry.
    #[must_use]
    pub fn new(context: Arc<Context>, registry: Arc<Registry>) -> Self {
        let parser = CommandParser::new(&context.config.discord.prefix);

        Self {
            context,
            registry,
            parser,
        }
    }

    /// Connects to Discord and processes events until the connection ends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Discord`] if the client can't be built or the gateway connection fails.
    pub async fn run(self) -> Result<(), Error> {
        let token = self.context.config.discord.token.clone();
        let mut client = Client::builder(&token, intents())
            .event_handler(self)
            .await?;

        client.start().await?;

        Ok(())
    }

    /// Builds an invocation from `message` if it is a command addressed to the bot.
    fn invocation(&self, message: &Message) -> Option<Invocation> {
        if message.author.bot {
            return None;
        }

        let command = self.parser.parse(&message.content)?;

        Some(Invocation {
            message_id: message.id.get(),
            channel_id: message.channel_id.get(),
            guild_id: message.guild_id.map(GuildId::get),
            requester: User {
                id: message.author.id.get(),
                name: message.author.name.clone(),
            },
            command: command.name.to_string(),
            args: command.args.into_iter().map(str::to_string).collect(),
        })
    }
}

#[async_trait]
impl EventHandler for Bot {
    async fn ready(&self, _ctx: SerenityContext, ready: Ready) {
        let name = &ready.user.name;
        let id = ready.user.id.to_string();

        info!(%name, %id, "logged in");
        events::emit(["ready", name.as_str(), id.as_str()]);
    }

    async fn message(&self, ctx: SerenityContext, message: Message) {
        let Some(invocation) = self.invocation(&message) else {
            return;
        };

        if !self.registry.contains(&invocation.command) {
            return;
        }

        debug!(
            command = %invocation.command,
            requester = %invocation.requester.name,
            channel_id = invocation.channel_id,
            "dispatching command"
        );

        let chat = DiscordChat::new(ctx);

        if let Err(err) = self.registry.dispatch(&self.context, &chat, &invocation).await {
            let reason = err.to_string();

            error!(command = %invocation.command, ?err, "command failed");
            events::emit([
                invocation.command.as_str(),
                "error",
                invocation.requester.name.as_str(),
                reason.as_str(),
            ]);
        }
    }
}

/// A [`Chat`] backed by a serenity client context.
pub struct DiscordChat {
    ctx: SerenityContext,
}

impl DiscordChat {
    /// Wraps the serenity context of the current event.
    #[must_use]
    pub const fn new(ctx: SerenityContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Chat for DiscordChat {
    async fn fetch_message(
        &self,
        channel_id: u64,
        message_id: &str,
    ) -> Result<Option<ChannelMessage>, Error> {
        let Some(message_id) = parse_id(message_id) else {
            return Ok(None);
        };

        let message = match channel(channel_id)
            .message(&self.ctx, MessageId::from(message_id))
            .await
        {
            Ok(message) => message,
            Err(err) => match request_status(&err) {
                Some(status) if is_unretrievable_message(status) => {
                    debug!(%status, %message_id, "message is not retrievable");

                    return Ok(None);
                }
                _ => return Err(err.into()),
            },
        };

        Ok(Some(ChannelMessage {
            author: message.author.name.clone(),
            timestamp: OffsetDateTime::from_unix_timestamp(message.timestamp.unix_timestamp())?,
            content: message.content_safe(&self.ctx.cache),
        }))
    }

    async fn say(&self, channel_id: u64, text: &str) -> Result<(), Error> {
        channel(channel_id).say(&self.ctx.http, text).await?;

        Ok(())
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), Error> {
        let Some(message_id) = NonZeroU64::new(message_id) else {
            return Ok(());
        };

        channel(channel_id)
            .delete_message(&self.ctx.http, MessageId::from(message_id))
            .await?;

        Ok(())
    }

    async fn resolve_user(
        &self,
        guild_id: Option<u64>,
        reference: &str,
    ) -> Result<Option<User>, Error> {
        let user_id = serenity::utils::parse_user_mention(reference)
            .or_else(|| parse_id(reference).map(UserId::from))
            .or_else(|| {
                let guild_id = GuildId::from(NonZeroU64::new(guild_id?)?);
                let guild = guild_id.to_guild_cached(&self.ctx.cache)?;

                guild.member_named(reference).map(|member| member.user.id)
            });

        let Some(user_id) = user_id else {
            return Ok(None);
        };

        match user_id.to_user(&self.ctx).await {
            Ok(user) => Ok(Some(User {
                id: user.id.get(),
                name: user.name,
            })),
            Err(err) if request_status(&err).is_some_and(is_unknown_user) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn direct_message(&self, user_id: u64, text: &str) -> Result<(), Error> {
        let Some(user_id) = NonZeroU64::new(user_id) else {
            return Ok(());
        };

        let private_channel = UserId::from(user_id).create_dm_channel(&self.ctx).await?;

        private_channel.id.say(&self.ctx.http, text).await?;

        Ok(())
    }

    async fn await_private_reply(
        &self,
        user_id: u64,
        timeout: Duration,
    ) -> Result<Option<Reply>, Error> {
        let Some(user_id) = NonZeroU64::new(user_id) else {
            return Ok(None);
        };

        let reply = MessageCollector::new(&self.ctx.shard)
            .author_id(UserId::from(user_id))
            .filter(|message| message.guild_id.is_none())
            .timeout(timeout)
            .next()
            .await;

        let Some(reply) = reply else {
            return Ok(None);
        };

        Ok(Some(Reply {
            content: reply.content_safe(&self.ctx.cache),
            received_at: OffsetDateTime::from_unix_timestamp(reply.timestamp.unix_timestamp())?,
        }))
    }
}

/// Parses a non-zero snowflake id.
fn parse_id(s: &str) -> Option<NonZeroU64> {
    s.trim().parse().ok()
}

/// Returns a channel id handle for a raw id.
///
/// Zero is never a valid snowflake, so it maps to the smallest valid id, which Discord will
/// reject.
fn channel(channel_id: u64) -> ChannelId {
    ChannelId::from(NonZeroU64::new(channel_id).unwrap_or(NonZeroU64::MIN))
}

/// Returns the HTTP status of a request Discord refused.
fn request_status(err: &serenity::Error) -> Option<u16> {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            Some(response.status_code.as_u16())
        }
        _ => None,
    }
}

/// Returns `true` if a message fetch refused with `status` means the message is outside what the
/// bot can retrieve.
///
/// That covers unknown messages (404), malformed ids (400), channels the bot can't read history
/// in (403) and Discord failing the request outright.
const fn is_unretrievable_message(status: u16) -> bool {
    matches!(status, 400..=599)
}

/// Returns `true` if a user fetch refused with `status` means the user doesn't exist.
const fn is_unknown_user(status: u16) -> bool {
    matches!(status, 400 | 404)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_parse_snowflakes() {
        assert_eq!(
            parse_id("80351110224678912").map(NonZeroU64::get),
            Some(80_351_110_224_678_912)
        );
        assert_eq!(parse_id(" 42 ").map(NonZeroU64::get), Some(42));
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("-5"), None);
        assert_eq!(parse_id("hello"), None);
    }

    #[test]
    fn it_should_request_message_content() {
        assert!(intents().contains(GatewayIntents::MESSAGE_CONTENT));
        assert!(intents().contains(GatewayIntents::DIRECT_MESSAGES));
    }

    #[test]
    fn it_should_treat_refused_message_fetches_as_missing() {
        assert!(is_unretrievable_message(403));
        assert!(is_unretrievable_message(404));
        assert!(is_unretrievable_message(400));
        assert!(is_unretrievable_message(500));
    }

    #[test]
    fn it_should_only_treat_unknown_users_as_missing() {
        assert!(is_unknown_user(404));
        assert!(is_unknown_user(400));
        assert!(!is_unknown_user(403));
        assert!(!is_unknown_user(429));
    }

    #[test]
    fn it_should_not_report_a_status_for_client_errors() {
        assert_eq!(request_status(&serenity::Error::Other("shard manager stopped")), None);
    }
}
