use chrono::NaiveDate;
use nova_assistant_lib::actions::ActionTag;
use nova_assistant_lib::responder::DEFAULT_REPLY;
use nova_assistant_lib::session::{DialogueSession, FixedClock};
use nova_assistant_lib::tables::{CommandTable, ConversationTable, PhraseTables};
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;

fn bundled_session(seed: u64) -> DialogueSession {
    DialogueSession::new(PhraseTables::bundled(), "NOVA").with_rng(StdRng::seed_from_u64(seed))
}

fn fallback_replies() -> Vec<String> {
    let table = ConversationTable::bundled();
    table
        .fallback()
        .unwrap()
        .replies
        .iter()
        .map(|r| r.replace("{name}", "NOVA"))
        .collect()
}

#[test]
fn time_trigger_returns_clock_text() {
    let hh_mm = Regex::new(r"\b\d{2}:\d{2}\b").unwrap();
    for input in ["tid", "Vad är klockan?"] {
        let result = bundled_session(1).get_response(input);
        assert_eq!(result.action, Some(ActionTag::ShowTime));
        assert!(hh_mm.is_match(&result.text), "{}", result.text);
    }
}

#[test]
fn fixed_clock_gives_exact_time() {
    let evening = NaiveDate::from_ymd_opt(2025, 6, 6)
        .unwrap()
        .and_hms_opt(21, 7, 33)
        .unwrap();
    let mut session = bundled_session(1).with_clock(FixedClock(evening));
    assert_eq!(session.get_response("tid").text, "Klockan är 21:07.");
    assert_eq!(
        session.get_response("dagens datum").text,
        "Dagens datum är 2025-06-06."
    );
}

#[test]
fn every_bundled_trigger_phrase_selects_its_command() {
    let table = CommandTable::bundled();
    let special = ["open_website", "open_application"];
    for command in table.iter().filter(|c| !special.contains(&c.id.as_str())) {
        for phrase in &command.phrases {
            let expected = table.iter().find(|c| {
                !special.contains(&c.id.as_str()) && c.matches(phrase)
            });
            let result = bundled_session(2).get_response(phrase);
            assert_eq!(
                result.action,
                expected.unwrap().action.clone(),
                "phrase '{phrase}'"
            );
        }
    }
}

#[test]
fn website_extraction_through_session() {
    let mut session = bundled_session(3);
    let result = session.get_response("öppna sidan example.com");
    assert_eq!(result.action, Some(ActionTag::OpenWebsite));
    assert_eq!(result.website(), Some("example.com"));

    let result = session.get_response("gå till example.com/path");
    assert_eq!(result.website(), Some("example.com/path"));
}

#[test]
fn application_extraction_through_session() {
    let mut session = bundled_session(4);
    let result = session.get_response("öppna calculator");
    assert_eq!(result.action, Some(ActionTag::OpenApplication));
    assert_eq!(result.app_name(), Some("calculator"));
    assert_eq!(result.text, "Startar calculator åt dig.");
}

#[test]
fn exit_trigger_sets_flag() {
    let mut session = bundled_session(5);
    assert!(!session.exit_requested());
    let result = session.get_response("nu vill jag avsluta");
    assert_eq!(result.action, Some(ActionTag::ExitApp));
    assert!(session.exit_requested());
}

#[test]
fn unmatched_input_gets_a_fallback_reply() {
    let allowed = fallback_replies();
    for seed in 0..10 {
        let result = bundled_session(seed).get_response("xyzzy plugh");
        assert_eq!(result.action, None);
        assert!(allowed.contains(&result.text), "{}", result.text);
    }
}

#[test]
fn empty_fallback_uses_default_sentence() {
    let tables = PhraseTables {
        commands: CommandTable::default(),
        conversation: ConversationTable::default(),
    };
    let mut session = DialogueSession::new(tables, "NOVA").with_legacy_keywords(false);
    let result = session.get_response("vad som helst");
    assert_eq!(result.text, DEFAULT_REPLY);
    assert!(!session.get_response("").text.is_empty());
}

#[test]
fn conversation_category_reply_is_from_allowed_set() {
    let table = ConversationTable::bundled();
    let greetings = table.categories().find(|c| c.id == "greetings").unwrap();
    let allowed: Vec<String> = greetings
        .replies
        .iter()
        .map(|r| r.replace("{name}", "Stella"))
        .collect();
    let mut session = DialogueSession::new(PhraseTables::bundled(), "Stella")
        .with_rng(StdRng::seed_from_u64(6));
    for _ in 0..10 {
        let result = session.get_response("Hej!");
        assert!(allowed.contains(&result.text), "{}", result.text);
    }
}

#[test]
fn static_template_is_idempotent() {
    let mut session = bundled_session(7);
    let first = session.get_response("vem är du");
    let second = session.get_response("vem är du");
    assert_eq!(first, second);
    assert_eq!(first.action, Some(ActionTag::Other("introduce".to_string())));
    assert!(!session.exit_requested());
}

#[test]
fn minimal_tables_still_answer() {
    let mut session = DialogueSession::new(PhraseTables::minimal(), "NOVA")
        .with_legacy_keywords(true)
        .with_rng(StdRng::seed_from_u64(8));
    assert_eq!(session.get_response("hej").text, "Hej! Jag är NOVA.");
    assert_eq!(session.get_response("tärning").action, Some(ActionTag::RollDice));
    assert_eq!(session.get_response("okänt").text, "Jag förstår inte.");
}

#[test]
fn padded_trigger_phrase_does_not_fire_inside_a_word() {
    let commands =
        CommandTable::from_json(r#"{"commands": {"t": {"phrases": [" tid "], "action": "show_time"}}}"#)
            .unwrap();
    let tables = PhraseTables {
        commands,
        conversation: ConversationTable::default(),
    };
    let mut session = DialogueSession::new(tables, "NOVA").with_legacy_keywords(false);

    let result = session.get_response("jag läser tidningen");
    assert_eq!(result.action, None);
    assert_eq!(result.text, DEFAULT_REPLY);

    let result = session.get_response("vad är det för tid nu");
    assert_eq!(result.action, Some(ActionTag::ShowTime));
}
