//! Prayer API endpoints.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::Prayer;
use crate::query::{
    filter_records, paginate, prayer_statistics, Paged, PrayerFilter, PrayerStatistics,
};
use crate::AppState;

/// Prayer list query parameters.
#[derive(Debug, Deserialize)]
pub struct PrayerListQuery {
    /// Matched against title, content and tags.
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub visibility: Option<String>,
    /// Author member id ("my prayers").
    pub created_by: Option<i64>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

impl PrayerListQuery {
    fn filter(&self) -> Result<PrayerFilter, AppError> {
        PrayerFilter::parse(
            self.category.as_deref(),
            self.status.as_deref(),
            self.visibility.as_deref(),
            self.created_by,
        )
    }

    fn matching<'a>(&self, prayers: &'a [Prayer]) -> Result<Vec<&'a Prayer>, AppError> {
        Ok(filter_records(
            prayers,
            self.search.as_deref().unwrap_or_default(),
            &self.filter()?,
        ))
    }
}

/// GET /api/prayers - List prayers matching the search and filters.
pub async fn list_prayers(
    State(state): State<AppState>,
    Query(params): Query<PrayerListQuery>,
) -> ApiResult<Paged<Prayer>> {
    let revision_id = state.store.revision_id();

    let matched = params
        .matching(state.store.prayers())
        .map_err(|e| e.with_revision(revision_id))?;
    tracing::debug!(
        "Prayer query matched {} of {} records",
        matched.len(),
        state.store.prayers().len()
    );

    let page = state.page(params.skip, params.limit);
    success(paginate(matched, page).map(Prayer::clone), revision_id)
}

/// GET /api/prayers/statistics - Status, category and visibility counts over the matching prayers.
pub async fn get_prayer_statistics(
    State(state): State<AppState>,
    Query(params): Query<PrayerListQuery>,
) -> ApiResult<PrayerStatistics> {
    let revision_id = state.store.revision_id();

    let matched = params
        .matching(state.store.prayers())
        .map_err(|e| e.with_revision(revision_id))?;
    success(prayer_statistics(&matched), revision_id)
}

/// GET /api/prayers/:id - Get a single prayer.
pub async fn get_prayer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Prayer> {
    let revision_id = state.store.revision_id();

    match state.store.prayer(id) {
        Some(prayer) => success(prayer.clone(), revision_id),
        None => error(
            AppError::NotFound(format!("Prayer {} not found", id)),
            revision_id,
        ),
    }
}
