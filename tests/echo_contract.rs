//! End-to-end checks of the chat contract: message text in, reply out.

use greeter_bot::bot::handlers::{compose_reply, Reply, ReplyFormat, Sender, HELP_TEXT};
use greeter_bot::bot::commands::command_token;
use greeter_bot::bot::Route;
use proptest::prelude::*;

const BOT: &str = "greeter_bot";

fn reply_for(text: Option<&str>, sender: Option<&Sender>) -> Option<Reply> {
    compose_reply(&Route::classify(text, BOT), sender)
}

proptest! {
    /// Any text that does not open with a command token comes back unchanged.
    #[test]
    fn echo_is_identity(text in "\\PC*") {
        prop_assume!(command_token(&text).is_none());

        let reply = reply_for(Some(text.as_str()), None);
        prop_assert_eq!(reply, Some(Reply {
            text: text.clone(),
            format: ReplyFormat::Plain,
            force_reply: false,
        }));
    }

    /// A leading slash alone does not make a command.
    #[test]
    fn slash_without_command_is_echoed(text in "/([^A-Za-z0-9_]\\PC*)?") {
        let reply = reply_for(Some(text.as_str()), None);
        prop_assert_eq!(reply.map(|r| r.text), Some(text.clone()));
    }

    /// The greeting names whoever sent `/start`.
    #[test]
    fn start_mentions_sender(id in any::<u64>(), name in "[A-Za-zА-Яа-я ]{1,32}") {
        let sender = Sender { id, display_name: name.clone() };
        let reply = reply_for(Some("/start"), Some(&sender));

        let reply = reply.ok_or_else(|| TestCaseError::fail("no greeting"))?;
        prop_assert!(reply.text.contains(&name));
        prop_assert!(reply.force_reply);
    }
}

#[test]
fn start_from_alice() {
    let alice = Sender {
        id: 1,
        display_name: "Alice".to_string(),
    };
    let reply = reply_for(Some("/start"), Some(&alice));
    assert!(reply.is_some_and(|r| r.text.contains("Alice") && r.format == ReplyFormat::Html));
}

#[test]
fn help_regardless_of_history() {
    let alice = Sender {
        id: 1,
        display_name: "Alice".to_string(),
    };
    let _ = reply_for(Some("/start"), Some(&alice));
    let _ = reply_for(Some("something"), Some(&alice));

    let reply = reply_for(Some("/help"), Some(&alice));
    assert_eq!(reply.map(|r| r.text), Some(HELP_TEXT.to_string()));
}

#[test]
fn non_text_gets_no_reply() {
    assert_eq!(reply_for(None, None), None);
}

#[test]
fn unknown_command_gets_no_reply() {
    assert_eq!(reply_for(Some("/unknown"), None), None);
    assert_eq!(reply_for(Some("/start@another_bot"), None), None);
}
