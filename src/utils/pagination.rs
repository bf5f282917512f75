//! Page slicing shared by the countries, continents and cities endpoints.
//!
//! The page count is `round(total / count)`, not a ceiling division, so a
//! trailing partial page holding less than half a page of items is not
//! reachable. Callers rely on the exact numbers, keep it that way.

use crate::models::response::PageResponse;
use thiserror::Error;

pub const DEFAULT_PAGE: usize = 1;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Invalid data to paginate: {0}")]
    InvalidInput(String),
    #[error("All arguments are required")]
    ArgumentsRequired,
}

/// One page window over a borrowed sequence.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
    pub page: usize,
}

/// Lenient numeric coercion for query values: surrounding whitespace is
/// ignored, anything that is not a number yields `None`. Infinities are
/// kept so that callers clamp them like any other oversized value.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| !n.is_nan())
}

/// Parses a requested page number, truncating fractional values.
pub fn parse_page(raw: Option<&str>) -> Option<i64> {
    parse_number(raw).map(|n| n.floor() as i64)
}

/// `max(1, round(total / count))` with halves rounding up.
pub fn total_pages(total: usize, count: usize) -> usize {
    ((2 * total + count) / (2 * count)).max(1)
}

pub fn paginate<T>(
    items: &[T],
    count: usize,
    requested_page: Option<i64>,
) -> Result<Page<'_, T>, PaginationError> {
    if count == 0 {
        return Err(PaginationError::InvalidInput(
            "count must be a positive integer".to_string(),
        ));
    }

    let total_pages = total_pages(items.len(), count);
    let page = match requested_page {
        Some(p) if p >= 1 => usize::try_from(p).unwrap_or(usize::MAX).min(total_pages),
        _ => DEFAULT_PAGE,
    };

    let start = ((page - 1) * count).min(items.len());
    let end = (page * count).min(items.len());

    Ok(Page {
        items: &items[start..end],
        total_pages,
        page,
    })
}

/// Resolves the items-per-page value for a sequence of `len` items.
///
/// Invalid requests (missing, non-numeric, below one) fall back to
/// `default_count`; the result never exceeds `len`.
pub fn derive_count(
    default_count: usize,
    requested: Option<&str>,
    len: usize,
) -> Result<usize, PaginationError> {
    if default_count == 0 || len == 0 {
        return Err(PaginationError::ArgumentsRequired);
    }

    let count = parse_number(requested)
        .map(f64::floor)
        .filter(|n| *n >= 1.0)
        .map(|n| n as usize)
        .unwrap_or(default_count);

    Ok(count.min(len))
}

/// Derives the count, slices the requested page and wraps it in the list
/// envelope.
pub fn page_response<T: Clone>(
    items: &[T],
    default_count: usize,
    requested_count: Option<&str>,
    requested_page: Option<&str>,
) -> Result<PageResponse<T>, PaginationError> {
    let count = derive_count(default_count, requested_count, items.len())?;
    let page = paginate(items, count, parse_page(requested_page))?;

    Ok(PageResponse {
        page: page.page,
        total_pages: page.total_pages,
        count,
        total_count: items.len(),
        data: page.items.to_vec(),
    })
}
