use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};
use teloxide::utils::html;

use vacancy_core::{BrowseView, Notice, VacancyItem};

pub const SEARCH_BUTTON: &str = "🔍 Search vacancies";

/// Telegram rejects callback payloads longer than 64 bytes.
const CALLBACK_DATA_LIMIT: usize = 64;

pub fn start_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(SEARCH_BUTTON)]]).resize_keyboard()
}

pub fn listing_text(view: &BrowseView) -> String {
    let mut text = format!(
        "Vacancies found: {} — page {}/{}",
        view.total_items, view.current_page, view.total_pages
    );
    if view.rows.is_empty() {
        text.push_str("\n\nNo vacancies on this page.");
    }
    text
}

/// One button per item plus a navigation row for adjacent in-range pages.
/// Returns `None` when there is nothing to press at all.
pub fn listing_keyboard(view: &BrowseView) -> Option<InlineKeyboardMarkup> {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = Vec::new();

    for row in &view.rows {
        let label = row
            .position
            .clone()
            .unwrap_or_else(|| format!("Unnamed position #{}", row.index + 1));
        let data = format!("vacancy:{}", row.index);
        if data.len() > CALLBACK_DATA_LIMIT {
            log::warn!("Callback data exceeds {CALLBACK_DATA_LIMIT} bytes, skipping button: {data}");
            continue;
        }
        rows.push(vec![InlineKeyboardButton::callback(label, data)]);
    }

    let mut nav = Vec::new();
    if view.has_prev {
        nav.push(InlineKeyboardButton::callback(
            "⬅️ Back",
            format!("page:{}", view.current_page - 1),
        ));
    }
    if view.has_next {
        nav.push(InlineKeyboardButton::callback(
            "Next ➡️",
            format!("page:{}", view.current_page + 1),
        ));
    }
    if !nav.is_empty() {
        rows.push(nav);
    }

    if rows.is_empty() {
        None
    } else {
        Some(InlineKeyboardMarkup::new(rows))
    }
}

/// Generic user-facing wording; diagnostic detail stays in the log.
pub fn notice_text(notice: Notice) -> &'static str {
    match notice {
        Notice::SearchFailed => {
            "❌ Could not load vacancies. The catalog may be unavailable; please try again later."
        }
        Notice::NoResults => "No active vacancies at the moment.",
        Notice::PageUnavailable { .. } => {
            "❌ Could not load that page. The previous page is still shown."
        }
        Notice::InvalidPage { .. } => "That page number is not valid.",
    }
}

pub fn detail_text(item: &VacancyItem, job_url_base: &str) -> String {
    let field = |value: &Option<String>| match value.as_deref() {
        Some(text) => html::escape(text),
        None => "<i>unknown</i>".to_string(),
    };

    let mut lines = vec![
        format!("<b>Position:</b> {}", field(&item.position)),
        format!("<b>Department:</b> {}", field(&item.department)),
        format!("<b>Salary:</b> {}", field(&item.salary)),
        format!("<b>Required experience:</b> {}", field(&item.experience)),
        format!("<b>Work schedule:</b> {}", field(&item.work_schedule)),
        format!("<b>Requirements:</b> {}", field(&item.requirement)),
        format!("<b>Opens:</b> {}", field(&item.opening_time)),
        format!("<b>Closes:</b> {}", field(&item.end_time)),
    ];
    if let Some(id) = &item.id {
        lines.push(format!(
            "<a href=\"{}{}\">Apply for this vacancy</a>",
            job_url_base,
            html::escape(id)
        ));
    }
    lines.join("\n")
}

pub fn detail_keyboard(current_page: u32) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "⬅️ Back to list",
        format!("page:{current_page}"),
    )]])
}
