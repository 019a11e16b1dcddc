use super::*;
use crate::controller::events::UiErrorCategory;
use shared::{arrange::arrange, error::LookupError, protocol::WordRecord};

fn rhyme_result(query: WordQuery) -> LookupResult {
    arrange(
        query,
        vec![
            WordRecord::new("tape").with_syllables(1),
            WordRecord::new("escape").with_syllables(2),
            WordRecord::new("drape").with_syllables(1),
        ],
    )
}

fn pending_query(cmd: BackendCommand) -> WordQuery {
    match cmd {
        BackendCommand::Lookup { query, .. } => query,
        other => panic!("expected lookup command, got {other:?}"),
    }
}

#[test]
fn parses_commands_and_bare_words() {
    assert_eq!(parse_input("   ").expect("parse"), InputCommand::Nothing);
    assert_eq!(
        parse_input("grape\n").expect("parse"),
        InputCommand::Lookup {
            mode: LookupMode::Rhymes,
            word: "grape".into()
        }
    );
    assert_eq!(
        parse_input("s  happy ").expect("parse"),
        InputCommand::Lookup {
            mode: LookupMode::SimilarMeaning,
            word: "happy".into()
        }
    );
    assert_eq!(
        parse_input("R orange").expect("parse"),
        InputCommand::Lookup {
            mode: LookupMode::Rhymes,
            word: "orange".into()
        }
    );
    assert_eq!(parse_input("save 2").expect("parse"), InputCommand::Save(2));
    assert_eq!(parse_input("saved").expect("parse"), InputCommand::ShowSaved);
    assert_eq!(parse_input("quit").expect("parse"), InputCommand::Quit);
    assert_eq!(
        parse_input("ice cream").expect("parse"),
        InputCommand::Lookup {
            mode: LookupMode::Rhymes,
            word: "ice cream".into()
        }
    );
}

#[test]
fn rejects_missing_word_and_bad_entry_number() {
    let err = parse_input("similar").expect_err("should fail");
    assert_eq!(err.category(), UiErrorCategory::Validation);
    assert_eq!(err.message(), "missing word after 'similar'");

    let err = parse_input("save two").expect_err("should fail");
    assert_eq!(err.category(), UiErrorCategory::Validation);
}

#[test]
fn begin_lookup_uses_configured_limits() {
    let mut controller = PageController::new(12, Some("score".into()));
    let cmd = controller.begin_lookup(LookupMode::Rhymes, "grape");
    let BackendCommand::Lookup { query, group_field } = cmd else {
        panic!("expected lookup command");
    };
    assert_eq!(query.max_results, 12);
    assert_eq!(group_field.as_deref(), Some("score"));
    assert!(controller.is_waiting());
}

#[test]
fn results_for_pending_query_replace_view() {
    let mut controller = PageController::new(50, None);
    let query = pending_query(controller.begin_lookup(LookupMode::Rhymes, "grape"));

    let rendered = controller
        .apply(UiEvent::Results(rhyme_result(query)))
        .expect("rendered");
    assert!(rendered.starts_with("1 syllable:"));
    assert!(!controller.is_waiting());
    assert_eq!(controller.view().map(|v| v.word_count()), Some(3));
}

#[test]
fn stale_results_are_ignored() {
    let mut controller = PageController::new(50, None);
    let _ = controller.begin_lookup(LookupMode::Rhymes, "grape");

    let stale = rhyme_result(WordQuery::new(LookupMode::Rhymes, "orange"));
    assert!(controller.apply(UiEvent::Results(stale)).is_none());
    assert!(controller.is_waiting());
    assert!(controller.view().is_none());
}

#[test]
fn failed_lookup_keeps_previous_view() {
    let mut controller = PageController::new(50, None);
    let first = pending_query(controller.begin_lookup(LookupMode::Rhymes, "grape"));
    controller.apply(UiEvent::Results(rhyme_result(first.clone())));

    let second = pending_query(controller.begin_lookup(LookupMode::SimilarMeaning, "happy"));
    let status = controller
        .apply(UiEvent::LookupFailed {
            query: second,
            error: UiError::from_lookup_error(&LookupError::Status { status: 500 }),
        })
        .expect("status line");

    assert!(status.contains("Word service unavailable"));
    assert!(!controller.is_waiting());
    assert_eq!(controller.view().map(|v| &v.query), Some(&first));
}

#[test]
fn save_appends_in_order_and_allows_duplicates() {
    let mut controller = PageController::new(50, None);
    assert_eq!(controller.saved_line(), "Saved words: (none)");

    let query = pending_query(controller.begin_lookup(LookupMode::Rhymes, "grape"));
    controller.apply(UiEvent::Results(rhyme_result(query)));

    // display order is tape, drape (1 syllable) then escape (2 syllables)
    controller.save(3).expect("save");
    controller.save(1).expect("save");
    let line = controller.save(1).expect("save");

    assert_eq!(controller.saved(), ["escape", "tape", "tape"]);
    assert_eq!(line, "Saved words: escape, tape, tape");
}

#[test]
fn save_out_of_range_leaves_list_unchanged() {
    let mut controller = PageController::new(50, None);
    let err = controller.save(1).expect_err("no view yet");
    assert_eq!(err.category(), UiErrorCategory::Validation);

    let query = pending_query(controller.begin_lookup(LookupMode::Rhymes, "grape"));
    controller.apply(UiEvent::Results(rhyme_result(query)));

    let err = controller.save(4).expect_err("out of range");
    assert_eq!(err.message(), "entry 4 out of range (1-3)");
    let err = controller.save(0).expect_err("out of range");
    assert_eq!(err.category(), UiErrorCategory::Validation);
    assert!(controller.saved().is_empty());
}
