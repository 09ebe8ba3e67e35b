//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use figment::Figment;
use figment::providers::{Format, Toml};

use quotebot::chat::{ChannelMessage, Chat, Invocation, Reply, User};
use quotebot::command::CommandParser;
use quotebot::frame_data::FrameData;
use quotebot::{Config, Context, Error};

pub const CHANNEL_ID: u64 = 100;
pub const GUILD_ID: u64 = 200;
pub const COMMAND_MESSAGE_ID: u64 = 300;

/// Something the bot did through [`RecordingChat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Say { channel_id: u64, text: String },
    Delete { channel_id: u64, message_id: u64 },
    DirectMessage { user_id: u64, text: String },
    AwaitReply { user_id: u64, timeout: Duration },
}

/// An in-memory chat that records every action.
#[derive(Default)]
pub struct RecordingChat {
    pub history: HashMap<(u64, String), ChannelMessage>,
    pub users: Vec<User>,
    pub reply: Option<Reply>,
    pub failing_fetch: bool,
    pub actions: Mutex<Vec<Action>>,
}

impl RecordingChat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(
        mut self,
        channel_id: u64,
        message_id: &str,
        message: ChannelMessage,
    ) -> Self {
        self.history.insert((channel_id, message_id.to_string()), message);
        self
    }

    pub fn with_user(mut self, id: u64, name: &str) -> Self {
        self.users.push(User {
            id,
            name: name.to_string(),
        });
        self
    }

    pub fn with_reply(mut self, reply: Reply) -> Self {
        self.reply = Some(reply);
        self
    }

    /// Makes every message fetch fail with a transport error.
    pub fn with_failing_fetch(mut self) -> Self {
        self.failing_fetch = true;
        self
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }

    /// Returns the text of every message posted to a channel.
    pub fn said(&self) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|action| match action {
                Action::Say { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Returns the text of every direct message sent.
    pub fn direct_messages(&self) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|action| match action {
                Action::DirectMessage { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    fn record(&self, action: Action) {
        self.actions.lock().unwrap().push(action);
    }
}

#[async_trait]
impl Chat for RecordingChat {
    async fn fetch_message(
        &self,
        channel_id: u64,
        message_id: &str,
    ) -> Result<Option<ChannelMessage>, Error> {
        if self.failing_fetch {
            return Err(Error::Discord(serenity::Error::Other("connection reset")));
        }

        Ok(self
            .history
            .get(&(channel_id, message_id.to_string()))
            .cloned())
    }

    async fn say(&self, channel_id: u64, text: &str) -> Result<(), Error> {
        self.record(Action::Say {
            channel_id,
            text: text.to_string(),
        });

        Ok(())
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), Error> {
        self.record(Action::Delete {
            channel_id,
            message_id,
        });

        Ok(())
    }

    async fn resolve_user(
        &self,
        _guild_id: Option<u64>,
        reference: &str,
    ) -> Result<Option<User>, Error> {
        let id = reference
            .trim_start_matches("<@")
            .trim_start_matches('!')
            .trim_end_matches('>');

        Ok(self
            .users
            .iter()
            .find(|user| user.name == reference || user.id.to_string() == id)
            .cloned())
    }

    async fn direct_message(&self, user_id: u64, text: &str) -> Result<(), Error> {
        self.record(Action::DirectMessage {
            user_id,
            text: text.to_string(),
        });

        Ok(())
    }

    async fn await_private_reply(
        &self,
        user_id: u64,
        timeout: Duration,
    ) -> Result<Option<Reply>, Error> {
        self.record(Action::AwaitReply { user_id, timeout });

        Ok(self.reply.clone())
    }
}

/// Path to the frame data fixture.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/moves.json")
}

/// A config with a dummy token and defaults for everything else.
pub fn config() -> Config {
    let figment = Figment::new().merge(Toml::string("[discord]\ntoken = \"test-token\""));

    Config::from_figment(&figment).unwrap()
}

/// A context with the fixture frame data loaded.
pub fn context() -> Context {
    Context::new(config(), FrameData::load(fixture_path()).unwrap())
}

/// Parses `input` the way the bot does and builds an invocation by `requester`.
pub fn invocation(input: &str, requester: &str) -> Invocation {
    let command = CommandParser::new("!").parse(input).unwrap();

    Invocation {
        message_id: COMMAND_MESSAGE_ID,
        channel_id: CHANNEL_ID,
        guild_id: Some(GUILD_ID),
        requester: User {
            id: 1,
            name: requester.to_string(),
        },
        command: command.name.to_string(),
        args: command.args.into_iter().map(str::to_string).collect(),
    }
}
