//! `skip`/`limit` paging over filtered results.

use serde::Serialize;

/// A resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    pub limit: usize,
}

impl Page {
    /// Resolve request parameters. A missing or zero `limit` falls back to
    /// `default_limit`; anything above `max_limit` is clamped.
    pub fn new(
        skip: Option<usize>,
        limit: Option<usize>,
        default_limit: usize,
        max_limit: usize,
    ) -> Self {
        let limit = match limit {
            Some(0) | None => default_limit,
            Some(requested) => requested,
        };
        Self {
            skip: skip.unwrap_or(0),
            limit: limit.min(max_limit),
        }
    }
}

/// One page of results plus the size of the full result set.
#[derive(Debug, Clone, Serialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

pub fn paginate<T>(items: Vec<T>, page: Page) -> Paged<T> {
    let total = items.len();
    let window: Vec<T> = items.into_iter().skip(page.skip).take(page.limit).collect();
    Paged {
        items: window,
        total,
        skip: page.skip,
        limit: page.limit,
        has_next: page.skip.saturating_add(page.limit) < total,
        has_prev: page.skip > 0,
    }
}

impl<T> Paged<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            skip: self.skip,
            limit: self.limit,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}
