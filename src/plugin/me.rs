//! Emote-style action lines posted on behalf of the requester.
use crate::plugin::prelude::*;

/// Posts an emote-style action line for the requester, e.g. `_ryu waves_`.
pub struct Me;

#[async_trait]
impl Plugin for Me {
    fn new() -> Self {
        Self
    }

    fn name() -> Name {
        Name::from("me")
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
        let action = invocation.rest(0);

        if !action.is_empty() {
            chat.say(invocation.channel_id, &emote(&invocation.requester.name, &action))
                .await?;
            events::emit(["me", invocation.requester.name.as_str()]);
        }

        chat.delete_message(invocation.channel_id, invocation.message_id)
            .await
    }
}

fn emote(name: &str, action: &str) -> String {
    format!("_{name} {action}_")
}
