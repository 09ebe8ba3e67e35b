mod common;

use quotebot::Registry;
use quotebot::frame_data::FrameData;
use quotebot::plugin::frames::lookup;

use common::{RecordingChat, context, fixture_path, invocation};

const SITUATIONS: [&str; 8] = [
    "startup", "recovery", "block", "hit", "damage", "stun", "", "counterhit",
];

fn frame_data() -> FrameData {
    FrameData::load(fixture_path()).unwrap()
}

async fn frames(input: &str) -> Vec<String> {
    let chat = RecordingChat::new();

    Registry::preloaded()
        .dispatch(&context(), &chat, &invocation(input, "ryu"))
        .await
        .unwrap();

    chat.said()
}

#[test]
fn it_should_treat_bison_as_dictator() {
    let frame_data = frame_data();

    for situation in SITUATIONS {
        assert_eq!(
            lookup(&frame_data, "bison", "c.mp", situation),
            lookup(&frame_data, "dictator", "c.mp", situation)
        );
    }

    assert_eq!(
        lookup(&frame_data, "BISON", "c.mp", "startup").unwrap(),
        "dictator's c.mp has 5 frames of startup."
    );
}

#[test]
fn it_should_render_hit_advantage() {
    let frame_data = frame_data();

    assert_eq!(
        lookup(&frame_data, "ryu", "c.hk", "hit").unwrap(),
        "ryu's c.hk is **knockdown/launch** on hit"
    );
    assert_eq!(
        lookup(&frame_data, "ryu", "c.mk", "hit").unwrap(),
        "ryu's c.mk is **+3** on hit"
    );
    assert_eq!(
        lookup(&frame_data, "vega", "s.lp", "hit").unwrap(),
        "claw's s.lp is **even** on hit"
    );
    assert_eq!(
        lookup(&frame_data, "ryu", "c.mk", "block").unwrap(),
        "ryu's c.mk is **-2** on block"
    );
}

#[test]
fn it_should_not_find_unknown_characters_in_any_situation() {
    let frame_data = frame_data();

    for situation in SITUATIONS {
        assert_eq!(
            lookup(&frame_data, "dan", "c.mk", situation)
                .unwrap_err()
                .to_string(),
            "Character Not Found"
        );
    }
}

#[test]
fn it_should_be_deterministic_across_loads() {
    let first = frame_data();
    let second = frame_data();

    for situation in SITUATIONS {
        assert_eq!(
            lookup(&first, "ryu", "cr.mk", situation),
            lookup(&second, "ryu", "cr.mk", situation)
        );
    }
}

#[tokio::test]
async fn it_should_reply_with_a_summary() {
    assert_eq!(
        frames("!frames Ryu cr.mk").await,
        vec![
            "**ryu's c.mk:** ```Startup: 8, Active: 3, Recovery: 14, Block Advantage: -2, \
             Hit Advantage: 3, Damage: 60, Stun: 100```"
        ]
    );
    assert_eq!(
        frames("!frames bison taunt").await,
        vec!["dictator's taunt has no frame data."]
    );
}

#[tokio::test]
async fn it_should_reply_with_canned_errors() {
    assert_eq!(frames("!frames dan c.mk hit").await, vec!["Character Not Found"]);
    assert_eq!(frames("!frames ryu j.hk hit").await, vec!["Move Not Found"]);
    assert_eq!(frames("!frames ryu s.hp stun").await, vec!["Situation Not Found"]);
}

#[tokio::test]
async fn it_should_reply_with_usage_when_arguments_are_missing() {
    let said = frames("!frames ryu").await;

    assert_eq!(said.len(), 1);
    assert!(said[0].starts_with("Usage:"));
}
