use log::{info, warn};
use serde_json::Value;

use vacancy_core::{PageResult, VacancyItem};

use crate::types::{FailureKind, FetchError};

/// Normalizes whichever body shape the catalog sent into a [`PageResult`].
/// All "which shape did the API send this time" branching lives here.
pub(crate) fn normalize_page(
    body: &[u8],
    page: u32,
    default_page_size: u32,
) -> Result<PageResult, FetchError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;

    match value {
        Value::Object(map) => match (map.get("results"), map.get("count")) {
            (Some(Value::Array(results)), Some(count)) => {
                let items: Vec<VacancyItem> =
                    serde_json::from_value(Value::Array(results.clone()))
                        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
                let total_items = parse_count(count);
                let total_pages = page_count(total_items, items.len(), page, default_page_size);
                info!(
                    "Parsed {} vacancies; total items {total_items}, calculated pages {total_pages}",
                    items.len()
                );
                Ok(PageResult {
                    items,
                    total_pages,
                    total_items,
                })
            }
            _ => Err(FetchError::new(
                FailureKind::UnexpectedShape,
                "object without a results list and count field",
            )),
        },
        Value::Array(entries) => {
            warn!("Catalog returned a bare list; pagination metadata is unavailable for this shape");
            let items: Vec<VacancyItem> = serde_json::from_value(Value::Array(entries))
                .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
            let total_items = items.len() as u32;
            Ok(PageResult {
                items,
                total_pages: 1,
                total_items,
            })
        }
        other => Err(FetchError::new(
            FailureKind::UnexpectedShape,
            format!("expected object or array, got {}", value_kind(&other)),
        )),
    }
}

/// `count` is best-effort: an unparseable value degrades to 0 with a warning
/// instead of failing the whole call.
fn parse_count(value: &Value) -> u32 {
    let parsed = match value {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    parsed.unwrap_or_else(|| {
        warn!("Could not parse 'count' field ({value}) as integer");
        0
    })
}

/// The upstream never reports its page size, only a total count, so the size
/// is inferred from page 1's item count with a fallback to the default.
/// Known weakness: if page 1 ever returns fewer items than the true page
/// size (a short filtered result, say), `total_pages` comes out wrong for
/// subsequent navigation. Preserved as-is.
pub(crate) fn page_count(
    total_items: u32,
    items_on_page: usize,
    page: u32,
    default_page_size: u32,
) -> u32 {
    let page_size = if items_on_page > 0 && page == 1 {
        items_on_page as u32
    } else {
        default_page_size
    };
    if total_items == 0 {
        0
    } else if page_size > 0 {
        total_items.div_ceil(page_size)
    } else {
        1
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
