use crate::view_model::Notice;
use crate::{BrowseState, Effect, Msg, SessionPhase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: BrowseState, msg: Msg) -> (BrowseState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchSubmitted { query } => {
            // Restarting a search from `Browsing` is tolerated: the old page
            // stays visible until the new fetch completes.
            state.set_query(query.clone());
            let request_id = state.begin_fetch(1, true);
            vec![Effect::FetchPage {
                request_id,
                query,
                page: 1,
            }]
        }
        Msg::PageRequested { page } => {
            if state.phase() != SessionPhase::Browsing {
                return (state, Vec::new());
            }
            match u32::try_from(page) {
                Ok(target) if target >= 1 => {
                    // Targets beyond `total_pages` are fetched, not clamped:
                    // the upstream answers them with a valid empty page.
                    let request_id = state.begin_fetch(target, false);
                    let query = state.query().to_owned();
                    vec![Effect::FetchPage {
                        request_id,
                        query,
                        page: target,
                    }]
                }
                _ => {
                    state.set_notice(Notice::InvalidPage { page });
                    Vec::new()
                }
            }
        }
        Msg::FetchCompleted { request_id, result } => {
            let Some(pending) = state.take_pending_if(request_id) else {
                // Superseded or unsolicited completion; never merged.
                return (state, Vec::new());
            };
            match result {
                None if pending.initial => {
                    state.reset(Some(Notice::SearchFailed));
                }
                None => {
                    // Previous page data stays intact; the error covers
                    // this request only.
                    state.set_notice(Notice::PageUnavailable { page: pending.page });
                }
                Some(page_result) => {
                    if pending.initial && page_result.total_items == 0 {
                        state.reset(Some(Notice::NoResults));
                    } else {
                        state.apply_page(pending.page, page_result);
                    }
                }
            }
            Vec::new()
        }
        Msg::ExitRequested => {
            state.reset(None);
            Vec::new()
        }
    };

    (state, effects)
}
