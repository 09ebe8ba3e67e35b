use std::path::PathBuf;
use std::sync::Arc;

use argh::FromArgs;
use miette::WrapErr;
use tracing::{info, warn};

use quotebot::frame_data::FrameData;
use quotebot::{Bot, Config, Context, Registry};

/// Discord bot for quotes, misquotes and frame data.
#[derive(Debug, FromArgs)]
struct Opts {
    /// path to the TOML config file
    #[argh(option, default = "PathBuf::from(\"quotebot.toml\")")]
    config_path: PathBuf,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let opts: Opts = argh::from_env();

    let config = Config::load(&opts.config_path)
        .wrap_err_with(|| format!("loading {}", opts.config_path.display()))?;

    quotebot::tracing::try_init(&config.tracing)?;

    info!(
        "{} v{} starting",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let frame_data = FrameData::load(&config.frames.path)?;
    let context = Arc::new(Context::new(config, frame_data));
    let registry = Arc::new(Registry::preloaded());

    let result = Bot::new(context, registry).run().await;

    warn!("the discord client stopped");

    Ok(result?)
}
