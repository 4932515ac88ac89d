use std::collections::HashMap;
use std::sync::Arc;

use log::{info, warn};
use teloxide::types::ChatId;
use tokio::sync::Mutex;

use vacancy_core::{update, BrowseState, BrowseView, Effect, Msg, SessionPhase};
use vacancy_engine::CatalogClient;

/// Per-chat browse sessions.
///
/// The outer map lock is held only to look up or insert a chat's handle; the
/// inner lock is held across a whole drive, so two requests from the same
/// user never interleave while different users proceed independently.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<ChatId, Arc<Mutex<BrowseState>>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    async fn handle(&self, chat_id: ChatId) -> Arc<Mutex<BrowseState>> {
        let mut sessions = self.sessions.lock().await;
        sessions.entry(chat_id).or_default().clone()
    }

    async fn evict(&self, chat_id: ChatId) {
        self.sessions.lock().await.remove(&chat_id);
    }

    /// Applies `msg`, runs any resulting fetch effects to completion, and
    /// returns the view to render, or `None` when the message changed
    /// nothing and the previous rendering still stands. Each fetch finishes
    /// (success or failure) before its outcome is applied, so the session
    /// never mixes old items with new page metadata.
    ///
    /// A session that lands back in `Idle` (exit, failed search, empty
    /// catalog) is evicted from the registry.
    pub async fn drive(
        &self,
        chat_id: ChatId,
        client: &dyn CatalogClient,
        msg: Msg,
    ) -> Option<BrowseView> {
        let handle = self.handle(chat_id).await;
        let mut session = handle.lock().await;

        let mut state = std::mem::take(&mut *session);
        let mut inbox = vec![msg];
        while let Some(msg) = inbox.pop() {
            let (next, effects) = update(state, msg);
            state = next;
            for effect in effects {
                match effect {
                    Effect::FetchPage {
                        request_id,
                        query,
                        page,
                    } => {
                        let result = match client.fetch_page(&query, page).await {
                            Ok(page_result) => Some(page_result),
                            Err(err) => {
                                warn!("Catalog fetch failed for chat {chat_id} (page {page}): {err}");
                                None
                            }
                        };
                        inbox.push(Msg::FetchCompleted { request_id, result });
                    }
                }
            }
        }

        let dirty = state.consume_dirty();
        let view = state.view();
        *session = state;
        drop(session);

        if view.phase == SessionPhase::Idle {
            self.evict(chat_id).await;
            info!("Session for chat {chat_id} returned to idle and was evicted");
        }
        dirty.then_some(view)
    }

    /// Read-only access for detail selection; never mutates or creates a
    /// session. Unknown chats observe an empty one, which rejects any index.
    pub async fn with_session<T>(&self, chat_id: ChatId, f: impl FnOnce(&BrowseState) -> T) -> T {
        let handle = {
            let sessions = self.sessions.lock().await;
            sessions.get(&chat_id).cloned()
        };
        match handle {
            Some(handle) => {
                let session = handle.lock().await;
                f(&session)
            }
            None => f(&BrowseState::new()),
        }
    }
}
