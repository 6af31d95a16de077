//! Family API endpoints.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{Family, FamilyDetail};
use crate::query::{family_statistics, filter_records, paginate, FamilyStatistics, Paged};
use crate::AppState;

/// Family list query parameters.
#[derive(Debug, Deserialize)]
pub struct FamilyListQuery {
    /// Matched against family name, head member name and address.
    pub search: Option<String>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

/// GET /api/families - List families matching the search.
pub async fn list_families(
    State(state): State<AppState>,
    Query(params): Query<FamilyListQuery>,
) -> ApiResult<Paged<Family>> {
    let revision_id = state.store.revision_id();

    let families = state.store.families();
    let matched = filter_records(families, params.search.as_deref().unwrap_or_default(), &());
    tracing::debug!(
        "Family query matched {} of {} records",
        matched.len(),
        families.len()
    );

    let page = state.page(params.skip, params.limit);
    success(paginate(matched, page).map(Family::clone), revision_id)
}

/// GET /api/families/statistics - Household size summary over the matching families.
pub async fn get_family_statistics(
    State(state): State<AppState>,
    Query(params): Query<FamilyListQuery>,
) -> ApiResult<FamilyStatistics> {
    let revision_id = state.store.revision_id();

    let matched = filter_records(
        state.store.families(),
        params.search.as_deref().unwrap_or_default(),
        &(),
    );
    success(family_statistics(&matched), revision_id)
}

/// GET /api/families/:id - Get a family and its members.
pub async fn get_family(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<FamilyDetail> {
    let revision_id = state.store.revision_id();

    match state.store.family(id) {
        Some(family) => success(
            FamilyDetail {
                family: family.clone(),
                members: state
                    .store
                    .family_members(id)
                    .into_iter()
                    .cloned()
                    .collect(),
            },
            revision_id,
        ),
        None => error(
            AppError::NotFound(format!("Family {} not found", id)),
            revision_id,
        ),
    }
}
