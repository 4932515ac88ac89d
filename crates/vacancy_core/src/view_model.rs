use crate::{SessionPhase, VacancyItem};

/// User-surfaced outcome of the most recent transition. The front-end turns
/// these into generic messages; diagnostic detail lives in the log only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The initial search could not be completed.
    SearchFailed,
    /// The initial search succeeded but the catalog is empty.
    NoResults,
    /// A pagination fetch failed; the previous page is still shown.
    PageUnavailable { page: u32 },
    /// The requested page number is outside any plausible range.
    InvalidPage { page: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrowseView {
    pub phase: SessionPhase,
    pub rows: Vec<VacancyRowView>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u32,
    pub has_prev: bool,
    pub has_next: bool,
    pub fetch_in_flight: bool,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyRowView {
    /// 0-based index into the currently displayed page.
    pub index: usize,
    pub position: Option<String>,
}

impl VacancyRowView {
    pub(crate) fn from_item(index: usize, item: &VacancyItem) -> Self {
        Self {
            index,
            position: item.position.clone(),
        }
    }
}
