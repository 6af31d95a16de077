//! Member API endpoints.

use axum::extract::{Path, Query, State};
use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;

use super::{error, resolve_today, success, ApiResult};
use crate::errors::AppError;
use crate::models::{Member, MemberView};
use crate::query::{
    compute_age, filter_records, member_offering_summary, member_statistics, paginate,
    parse_iso_date, ActivityStatus, MemberFilter, MemberOfferingSummary, MemberStatistics, Paged,
    Selector,
};
use crate::AppState;

/// Member list query parameters.
#[derive(Debug, Deserialize)]
pub struct MemberListQuery {
    /// Matched against name, romanized name, phone and email.
    pub search: Option<String>,
    pub district: Option<String>,
    pub position: Option<String>,
    /// `all`, `active` or `inactive`.
    pub status: Option<String>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
    /// Reference date for ages (default: today).
    pub as_of: Option<String>,
}

impl MemberListQuery {
    fn filter(&self) -> Result<MemberFilter, AppError> {
        Ok(MemberFilter {
            district: Selector::parse(self.district.as_deref()),
            position: Selector::parse(self.position.as_deref()),
            status: ActivityStatus::parse(self.status.as_deref())?,
        })
    }

    fn search(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }
}

fn member_view(member: &Member, today: NaiveDate) -> MemberView {
    MemberView {
        member: member.clone(),
        age: parse_iso_date(&member.birth_date).map(|birth| compute_age(birth, today)),
    }
}

/// GET /api/members - List members matching the search and filters.
pub async fn list_members(
    State(state): State<AppState>,
    Query(params): Query<MemberListQuery>,
) -> ApiResult<Paged<MemberView>> {
    let revision_id = state.store.revision_id();

    let filter = params.filter().map_err(|e| e.with_revision(revision_id))?;
    let today = resolve_today(params.as_of.as_deref()).map_err(|e| e.with_revision(revision_id))?;

    let members = state.store.members();
    let matched = filter_records(members, params.search(), &filter);
    tracing::debug!(
        "Member query matched {} of {} records",
        matched.len(),
        members.len()
    );

    let page = state.page(params.skip, params.limit);
    success(
        paginate(matched, page).map(|m| member_view(m, today)),
        revision_id,
    )
}

/// GET /api/members/statistics - Dashboard counters over the matching members.
pub async fn get_member_statistics(
    State(state): State<AppState>,
    Query(params): Query<MemberListQuery>,
) -> ApiResult<MemberStatistics> {
    let revision_id = state.store.revision_id();

    let filter = params.filter().map_err(|e| e.with_revision(revision_id))?;
    let today = resolve_today(params.as_of.as_deref()).map_err(|e| e.with_revision(revision_id))?;

    let matched = filter_records(state.store.members(), params.search(), &filter);
    success(member_statistics(&matched, today), revision_id)
}

/// Detail query parameters.
#[derive(Debug, Deserialize)]
pub struct MemberDetailQuery {
    pub as_of: Option<String>,
}

/// GET /api/members/:id - Get a single member with the derived age.
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<MemberDetailQuery>,
) -> ApiResult<MemberView> {
    let revision_id = state.store.revision_id();

    let today = match resolve_today(params.as_of.as_deref()) {
        Ok(today) => today,
        Err(e) => return error(e, revision_id),
    };

    match state.store.member(id) {
        Some(member) => success(member_view(member, today), revision_id),
        None => error(
            AppError::NotFound(format!("Member {} not found", id)),
            revision_id,
        ),
    }
}

/// Offering summary query parameters.
#[derive(Debug, Deserialize)]
pub struct OfferingSummaryQuery {
    /// Calendar year (default: the current year).
    pub year: Option<i32>,
}

/// GET /api/members/:id/offerings/summary - Per-type giving of one member in a year.
pub async fn get_member_offering_summary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<OfferingSummaryQuery>,
) -> ApiResult<Vec<MemberOfferingSummary>> {
    let revision_id = state.store.revision_id();

    if state.store.member(id).is_none() {
        return error(
            AppError::NotFound(format!("Member {} not found", id)),
            revision_id,
        );
    }

    let year = params.year.unwrap_or_else(|| Local::now().year());

    success(
        member_offering_summary(state.store.offerings(), id, year),
        revision_id,
    )
}
