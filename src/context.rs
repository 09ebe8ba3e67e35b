//! Shared plugin context.

use crate::Config;
use crate::frame_data::FrameData;

/// Shared context for plugin invocations.
///
/// Built once at startup and only ever read afterwards.
pub struct Context {
    /// The bot configuration.
    pub config: Config,
    /// The frame data table.
    pub frame_data: FrameData,
}

impl Context {
    /// Creates a new context.
    #[must_use]
    pub const fn new(config: Config, frame_data: FrameData) -> Self {
        Self { config, frame_data }
    }
}
