//! Command plugins and the registry that dispatches to them.
use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::Error;
use crate::chat::{Chat, Invocation};
use crate::context::Context;

/// The name of a plugin. This is also the command it answers to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Name(&'static str);
/// The author of a plugin.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Author(&'static str);
/// The version of a plugin.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Version(&'static str);

macro_rules! impl_str_newtype {
    ($($ty:ident),*) => {
        $(
            impl $ty {
                /// Returns the inner string.
                #[must_use]
                pub const fn as_str(&self) -> &'static str {
                    self.0
                }
            }

            impl From<&'static str> for $ty {
                fn from(s: &'static str) -> Self {
                    Self(s)
                }
            }
        )*
    };
}

impl_str_newtype!(Name, Author, Version);

/// Fighting-game frame data lookups
pub mod frames;
/// Emote-style action lines
pub mod me;
/// Fabricated quotes collected over DM
pub mod misquote;
/// Quoting earlier messages
pub mod quote;

/// Common includes used in plugins.
#[allow(unused)]
mod prelude {
    pub use super::{Author, Name, Plugin, Version};
    pub use crate::Error as BotError;
    pub use crate::chat::{Chat, Invocation};
    pub use crate::context::Context;
    pub use crate::events;
    pub use async_trait::async_trait;
}

/// The base trait that all plugins must implement.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Returns the name of the plugin.
    fn name() -> Name
    where
        Self: Sized;

    /// Returns the author of the plugin.
    fn author() -> Author
    where
        Self: Sized;

    /// Returns the version of the plugin.
    fn version() -> Version
    where
        Self: Sized;

    /// The constructor for a new plugin.
    fn new() -> Self
    where
        Self: Sized;

    /// Handles a command addressed to this plugin.
    async fn handle_command(
        &self,
        context: &Context,
        chat: &dyn Chat,
        invocation: &Invocation,
    ) -> Result<(), Error>;
}

/// Plugin registry.
#[derive(Default)]
pub struct Registry {
    /// Loaded plugins, keyed by the command they answer to.
    plugins: HashMap<&'static str, Box<dyn Plugin>>,
}

impl Registry {
    /// Constructs and returns a new, empty plugin registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Constructs and returns a new plugin registry with every command registered.
    #[must_use]
    pub fn preloaded() -> Self {
        let mut registry = Self::new();
        debug!("registering plugins");

        registry.register::<quote::Quote>();
        registry.register::<misquote::Misquote>();
        registry.register::<me::Me>();
        registry.register::<frames::Frames>();

        let num_plugins = registry.plugins.len();
        debug!(%num_plugins, "finished registering plugins");

        registry
    }

    /// Registers a new plugin based on its type.
    ///
    /// Returns `false` if a plugin with the same name was already registered, in which case the
    /// existing one is kept.
    pub fn register<P: Plugin + 'static>(&mut self) -> bool {
        let name = P::name().as_str();

        if self.plugins.contains_key(name) {
            return false;
        }

        trace!(
            %name,
            author = P::author().as_str(),
            version = P::version().as_str(),
            "registering plugin"
        );

        self.plugins.insert(name, Box::new(P::new()));

        true
    }

    /// Returns the number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns `true` if no plugins are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Returns `true` if a plugin answers to `command`.
    #[must_use]
    pub fn contains(&self, command: &str) -> bool {
        self.plugins.contains_key(command)
    }

    /// Runs the plugin matching the invocation's command.
    ///
    /// Returns `Ok(false)` without doing anything if no plugin answers to the command.
    ///
    /// # Errors
    ///
    /// Returns whatever error the plugin's handler returned.
    pub async fn dispatch(
        &self,
        context: &Context,
        chat: &dyn Chat,
        invocation: &Invocation,
    ) -> Result<bool, Error> {
        let Some(plugin) = self.plugins.get(invocation.command.as_str()) else {
            debug!(command = %invocation.command, "ignoring unknown command");

            return Ok(false);
        };

        plugin.handle_command(context, chat, invocation).await?;

        Ok(true)
    }
}
