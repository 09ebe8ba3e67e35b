//! A Discord bot for quoting messages, misattributing quotes and looking up fighting-game
//! frame data.
pub mod bot;
pub mod chat;
pub mod command;
pub mod config;
pub mod consts;
pub mod context;
mod error;
pub mod events;
pub mod frame_data;
pub mod plugin;
pub mod tracing;

pub use bot::Bot;
pub use config::Config;
pub use context::Context;
pub use error::Error;
pub use plugin::{Plugin, Registry};
