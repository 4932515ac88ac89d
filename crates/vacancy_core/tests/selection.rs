use std::sync::Once;

use vacancy_core::{update, BrowseState, Effect, Msg, PageResult, StaleSelection, VacancyItem};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(bot_logging::initialize_for_tests);
}

fn state_with_three_items() -> BrowseState {
    let items = vec![
        VacancyItem {
            id: Some("11".to_string()),
            position: Some("Lecturer".to_string()),
            ..VacancyItem::default()
        },
        VacancyItem {
            id: Some("12".to_string()),
            position: Some("Lab assistant".to_string()),
            ..VacancyItem::default()
        },
        VacancyItem {
            id: Some("13".to_string()),
            position: None,
            ..VacancyItem::default()
        },
    ];
    let (state, effects) = update(
        BrowseState::new(),
        Msg::SearchSubmitted {
            query: String::new(),
        },
    );
    let request_id = match effects.as_slice() {
        [Effect::FetchPage { request_id, .. }] => *request_id,
        other => panic!("expected a single fetch effect, got {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::FetchCompleted {
            request_id,
            result: Some(PageResult {
                items,
                total_pages: 1,
                total_items: 3,
            }),
        },
    );
    state
}

#[test]
fn valid_index_returns_item_by_reference() {
    init_logging();
    let state = state_with_three_items();
    let before = state.clone();

    let item = state.item(1).expect("index 1 is on the page");
    assert_eq!(item.position.as_deref(), Some("Lab assistant"));

    assert_eq!(state, before);
}

#[test]
fn out_of_range_index_is_stale_selection() {
    init_logging();
    let state = state_with_three_items();
    let before = state.clone();

    let err = state.item(5).expect_err("index 5 is not on the page");
    assert_eq!(
        err,
        StaleSelection {
            index: 5,
            available: 3
        }
    );

    // Selection never mutates the session, valid or not.
    assert_eq!(state, before);
}

#[test]
fn selection_on_idle_session_is_stale() {
    init_logging();
    let state = BrowseState::new();

    let err = state.item(0).expect_err("idle session has no items");
    assert_eq!(
        err,
        StaleSelection {
            index: 0,
            available: 0
        }
    );
}
