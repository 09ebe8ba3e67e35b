//! Frame data lookups.
//!
//! `frames <character> <move> [situation]` answers with a single statistic when the situation
//! names one, and with a summary of every recorded statistic otherwise.
use tracing::{debug, warn};

use crate::frame_data::{FrameData, LookupError, Move, Stat, normalize_character, normalize_move};
use crate::plugin::prelude::*;

/// Reply sent when the character or move is missing.
pub const USAGE: &str =
    "Usage: `frames <character> <move> [startup|recovery|block|hit|damage|stun]`";

/// Advantage values above this mean the move knocks down or launches.
const KNOCKDOWN_THRESHOLD: i64 = 1000;

/// Frame data plugin.
pub struct Frames;

/// What the user asked about a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Situation {
    /// Frames before the move becomes active.
    Startup,
    /// Recovery frames.
    Recovery,
    /// Frame advantage on block.
    Block,
    /// Frame advantage on hit.
    Hit,
    /// Damage dealt.
    Damage,
    /// Stun dealt.
    Stun,
    /// Every recorded statistic.
    Summary,
}

impl Situation {
    /// Parses a lower-case situation token. Anything unrecognized asks for a summary.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token {
            "startup" => Self::Startup,
            "recovery" => Self::Recovery,
            "block" => Self::Block,
            "hit" => Self::Hit,
            "damage" => Self::Damage,
            "stun" => Self::Stun,
            _ => Self::Summary,
        }
    }

    /// The statistic this situation reads, if it reads exactly one.
    #[must_use]
    pub const fn stat(self) -> Option<Stat> {
        match self {
            Self::Startup => Some(Stat::Startup),
            Self::Recovery => Some(Stat::Recovery),
            Self::Block => Some(Stat::BlockAdvantage),
            Self::Hit => Some(Stat::HitAdvantage),
            Self::Damage => Some(Stat::Damage),
            Self::Stun => Some(Stat::Stun),
            Self::Summary => None,
        }
    }

    /// The word used for this situation in replies.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Recovery => "recovery",
            Self::Block => "block",
            Self::Hit => "hit",
            Self::Damage => "damage",
            Self::Stun => "stun",
            Self::Summary => "summary",
        }
    }
}

#[async_trait]
impl Plugin for Frames {
    fn new() -> Self {
        Self
    }

    fn name() -> Name {
        Name::from("frames")
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
        let (Some(character), Some(name)) = (invocation.arg(0), invocation.arg(1)) else {
            return chat.say(invocation.channel_id, USAGE).await;
        };
        let situation = invocation.arg(2).unwrap_or_default();

        let reply = match lookup(&context.frame_data, character, name, situation) {
            Ok(reply) => reply,
            Err(err) => {
                warn!(%character, %name, %situation, %err, "frame data lookup failed");
                events::emit(["frames", "not_found", character, name, situation]);

                err.to_string()
            }
        };

        chat.say(invocation.channel_id, &reply).await
    }
}

/// Normalizes the user's tokens, looks up the move and formats the answer.
///
/// # Errors
///
/// Returns a [`LookupError`] whose display text is the reply to send instead.
pub fn lookup(
    frame_data: &FrameData,
    character: &str,
    name: &str,
    situation: &str,
) -> Result<String, LookupError> {
    let character = normalize_character(character);
    let name = normalize_move(name);
    let situation = Situation::parse(&situation.to_lowercase());

    debug!(%character, %name, situation = situation.as_str(), "looking up move");

    let record = frame_data.find(&character, &name)?;

    describe(&character, record, situation)
}

/// Formats the answer for `situation` about `record`.
///
/// # Errors
///
/// Returns [`LookupError::SituationNotFound`] if the statistic the situation asks for isn't
/// recorded for the move.
pub fn describe(
    character: &str,
    record: &Move,
    situation: Situation,
) -> Result<String, LookupError> {
    let name = &record.name;
    let kind = situation.as_str();
    let value = || {
        situation
            .stat()
            .and_then(|stat| record.data.get(stat))
            .ok_or(LookupError::SituationNotFound)
    };

    Ok(match situation {
        Situation::Summary => summary(character, record),
        Situation::Startup | Situation::Recovery => {
            format!("{character}'s {name} has {} frames of {kind}.", value()?)
        }
        Situation::Block | Situation::Hit => {
            format!("{character}'s {name} is {} on {kind}", advantage(value()?))
        }
        Situation::Damage | Situation::Stun => {
            format!("{character}'s {name} does {} {kind}.", value()?)
        }
    })
}

/// Renders a frame advantage, e.g. `**+3**`, `**even**` or `**-2**`.
#[must_use]
pub fn advantage(frames: i64) -> String {
    match frames {
        f if f > KNOCKDOWN_THRESHOLD => "**knockdown/launch**".to_string(),
        f if f > 0 => format!("**+{f}**"),
        0 => "**even**".to_string(),
        f => format!("**{f}**"),
    }
}

/// Renders every recorded statistic of `record` in display order.
#[must_use]
pub fn summary(character: &str, record: &Move) -> String {
    let name = &record.name;
    let mut table = String::new();

    for (stat, value) in record.data.iter() {
        table.push_str(stat.nice_name());
        table.push_str(": ");

        if stat == Stat::HitAdvantage && value > KNOCKDOWN_THRESHOLD {
            table.push_str("launch/knockdown");
        } else {
            table.push_str(&value.to_string());
        }

        table.push_str(", ");
    }

    let table = table.trim_end_matches(", ");

    if table.is_empty() {
        format!("{character}'s {name} has no frame data.")
    } else {
        format!("**{character}'s {name}:** ```{table}```")
    }
}

#[cfg(test)]
mod tests {
    use crate::frame_data::Stats;

    use super::*;

    fn record(data: Stats) -> Move {
        Move {
            name: "c.mk".to_string(),
            data,
        }
    }

    #[test]
    fn it_should_format_advantage() {
        assert_eq!(advantage(1200), "**knockdown/launch**");
        assert_eq!(advantage(1001), "**knockdown/launch**");
        assert_eq!(advantage(1000), "**+1000**");
        assert_eq!(advantage(3), "**+3**");
        assert_eq!(advantage(0), "**even**");
        assert_eq!(advantage(-2), "**-2**");
    }

    #[test]
    fn it_should_parse_situations() {
        assert_eq!(Situation::parse("hit"), Situation::Hit);
        assert_eq!(Situation::parse(""), Situation::Summary);
        assert_eq!(Situation::parse("counterhit"), Situation::Summary);
    }

    #[test]
    fn it_should_describe_single_stats() {
        let record = record(Stats {
            startup: Some(5),
            recovery: Some(12),
            block_advantage: Some(-2),
            damage: Some(70),
            stun: Some(100),
            ..Stats::default()
        });

        assert_eq!(
            describe("ryu", &record, Situation::Startup).unwrap(),
            "ryu's c.mk has 5 frames of startup."
        );
        assert_eq!(
            describe("ryu", &record, Situation::Recovery).unwrap(),
            "ryu's c.mk has 12 frames of recovery."
        );
        assert_eq!(
            describe("ryu", &record, Situation::Block).unwrap(),
            "ryu's c.mk is **-2** on block"
        );
        assert_eq!(
            describe("ryu", &record, Situation::Damage).unwrap(),
            "ryu's c.mk does 70 damage."
        );
        assert_eq!(
            describe("ryu", &record, Situation::Stun).unwrap(),
            "ryu's c.mk does 100 stun."
        );
    }

    #[test]
    fn it_should_fail_when_the_stat_is_missing() {
        let record = record(Stats {
            startup: Some(5),
            ..Stats::default()
        });

        assert_eq!(
            describe("ryu", &record, Situation::Hit),
            Err(LookupError::SituationNotFound)
        );
    }

    #[test]
    fn it_should_summarize_in_display_order() {
        let record = record(Stats {
            stun: Some(100),
            startup: Some(5),
            hit_advantage: Some(2000),
            active: Some(3),
            ..Stats::default()
        });

        assert_eq!(
            summary("ryu", &record),
            "**ryu's c.mk:** ```Startup: 5, Active: 3, Hit Advantage: launch/knockdown, Stun: 100```"
        );
    }

    #[test]
    fn it_should_describe_the_summary_situation_as_a_summary() {
        let record = record(Stats {
            damage: Some(70),
            ..Stats::default()
        });

        assert_eq!(
            describe("ryu", &record, Situation::Summary).unwrap(),
            "**ryu's c.mk:** ```Damage: 70```"
        );
    }

    #[test]
    fn it_should_summarize_empty_records() {
        assert_eq!(
            summary("ryu", &record(Stats::default())),
            "ryu's c.mk has no frame data."
        );
    }
}
