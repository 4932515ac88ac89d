use crate::model::{PageResult, VacancyItem};
use crate::view_model::{BrowseView, Notice, VacancyRowView};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No active browse; nothing cached.
    #[default]
    Idle,
    /// A valid current page is loaded.
    Browsing,
}

/// Rejected selection: the index no longer matches the displayed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaleSelection {
    pub index: usize,
    pub available: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingFetch {
    pub request_id: RequestId,
    pub page: u32,
    /// True for the page-1 fetch that opens a session; failures and empty
    /// result sets return the session to `Idle` only in that case.
    pub initial: bool,
}

/// Per-chat browse session.
///
/// Invariant: `items` always corresponds to `current_page` as returned by the
/// most recent applied fetch. Replacement is atomic; a completion whose
/// request id does not match the pending fetch is discarded, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrowseState {
    phase: SessionPhase,
    items: Vec<VacancyItem>,
    current_page: u32,
    total_pages: u32,
    total_items: u32,
    query: String,
    pending: Option<PendingFetch>,
    next_request_id: RequestId,
    notice: Option<Notice>,
    dirty: bool,
}

impl BrowseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn items(&self) -> &[VacancyItem] {
        &self.items
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the item at `index` within the currently displayed page.
    ///
    /// Never mutates the session; an out-of-range index yields
    /// [`StaleSelection`] and the caller re-renders or prompts a restart.
    pub fn item(&self, index: usize) -> Result<&VacancyItem, StaleSelection> {
        self.items.get(index).ok_or(StaleSelection {
            index,
            available: self.items.len(),
        })
    }

    pub fn view(&self) -> BrowseView {
        BrowseView {
            phase: self.phase,
            rows: self
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| VacancyRowView::from_item(index, item))
                .collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_items: self.total_items,
            has_prev: self.current_page > 1,
            has_next: self.current_page < self.total_pages,
            fetch_in_flight: self.pending.is_some(),
            notice: self.notice,
        }
    }

    /// Returns whether a re-render is due, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Records an in-flight fetch, superseding any still-pending request.
    pub(crate) fn begin_fetch(&mut self, page: u32, initial: bool) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.pending = Some(PendingFetch {
            request_id,
            page,
            initial,
        });
        self.notice = None;
        self.dirty = true;
        request_id
    }

    pub(crate) fn set_query(&mut self, query: String) {
        self.query = query;
    }

    /// Claims the pending fetch if `request_id` matches it; a mismatch means
    /// the completion is stale and must be ignored by the caller.
    pub(crate) fn take_pending_if(&mut self, request_id: RequestId) -> Option<PendingFetch> {
        match &self.pending {
            Some(pending) if pending.request_id == request_id => self.pending.take(),
            _ => None,
        }
    }

    /// Atomically replaces the displayed page with a fetched one.
    pub(crate) fn apply_page(&mut self, page: u32, result: PageResult) {
        self.phase = SessionPhase::Browsing;
        self.items = result.items;
        self.current_page = page;
        self.total_pages = result.total_pages;
        self.total_items = result.total_items;
        self.notice = None;
        self.dirty = true;
    }

    /// Discards all session data and returns to `Idle`.
    pub(crate) fn reset(&mut self, notice: Option<Notice>) {
        let next_request_id = self.next_request_id;
        *self = Self {
            next_request_id,
            notice,
            dirty: true,
            ..Self::default()
        };
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.dirty = true;
    }
}
