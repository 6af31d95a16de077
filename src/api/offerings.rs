//! Offering API endpoints.

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::format::{format_currency, format_iso_date, format_month_label};
use crate::models::{Offering, OfferingView};
use crate::query::{
    filter_records, offering_statistics, paginate, AmountRange, DateRange, Group, OfferingFilter,
    Paged, Selector, Totals,
};
use crate::AppState;

/// Offering list query parameters.
#[derive(Debug, Deserialize)]
pub struct OfferingListQuery {
    /// Matched against member name, offering type and memo.
    pub search: Option<String>,
    pub offering_type: Option<String>,
    pub member_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub min_amount: Option<u64>,
    pub max_amount: Option<u64>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

impl OfferingListQuery {
    fn filter(&self) -> Result<OfferingFilter, AppError> {
        Ok(OfferingFilter {
            offering_type: Selector::parse(self.offering_type.as_deref()),
            member_id: self.member_id,
            dates: DateRange::parse(self.start_date.as_deref(), self.end_date.as_deref())?,
            amounts: AmountRange {
                min: self.min_amount,
                max: self.max_amount,
            },
        })
    }
}

/// GET /api/offerings - List offerings matching the search and filters.
pub async fn list_offerings(
    State(state): State<AppState>,
    Query(params): Query<OfferingListQuery>,
) -> ApiResult<Paged<Offering>> {
    let revision_id = state.store.revision_id();

    let filter = params.filter().map_err(|e| e.with_revision(revision_id))?;

    let offerings = state.store.offerings();
    let matched = filter_records(
        offerings,
        params.search.as_deref().unwrap_or_default(),
        &filter,
    );
    tracing::debug!(
        "Offering query matched {} of {} records",
        matched.len(),
        offerings.len()
    );

    let page = state.page(params.skip, params.limit);
    success(paginate(matched, page).map(Offering::clone), revision_id)
}

/// GET /api/offerings/:id - Get a single offering with display fields.
pub async fn get_offering(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<OfferingView> {
    let revision_id = state.store.revision_id();

    match state.store.offering(id) {
        Some(offering) => success(
            OfferingView {
                offering: offering.clone(),
                formatted_amount: format_currency(offering.amount),
                formatted_date: format_iso_date(&offering.offering_date),
            },
            revision_id,
        ),
        None => error(
            AppError::NotFound(format!("Offering {} not found", id)),
            revision_id,
        ),
    }
}

/// Statistics query parameters.
#[derive(Debug, Deserialize)]
pub struct OfferingStatisticsQuery {
    pub offering_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Number of donors to rank (default: configured top-N).
    pub top: Option<usize>,
}

/// Month group with its display label.
#[derive(Debug, Serialize)]
pub struct MonthGroup {
    #[serde(flatten)]
    pub group: Group,
    pub label: Option<String>,
}

/// Offering dashboard response.
#[derive(Debug, Serialize)]
pub struct OfferingStatisticsResponse {
    pub total: Totals,
    pub formatted_total: String,
    pub formatted_average: String,
    pub by_type: Vec<Group>,
    pub by_month: Vec<MonthGroup>,
    pub by_member: Vec<Group>,
}

/// GET /api/offerings/statistics - Totals, per type, per month and top donors.
pub async fn get_offering_statistics(
    State(state): State<AppState>,
    Query(params): Query<OfferingStatisticsQuery>,
) -> ApiResult<OfferingStatisticsResponse> {
    let revision_id = state.store.revision_id();

    let dates = DateRange::parse(params.start_date.as_deref(), params.end_date.as_deref())
        .map_err(|e| e.with_revision(revision_id))?;
    let filter = OfferingFilter {
        offering_type: Selector::parse(params.offering_type.as_deref()),
        dates,
        ..Default::default()
    };
    let top = params.top.unwrap_or(state.config.default_top_n);

    let matched = filter_records(state.store.offerings(), "", &filter);
    let stats = offering_statistics(&matched, top);
    tracing::debug!(
        "Offering statistics over {} records, {} types",
        stats.total.count,
        stats.by_type.len()
    );

    success(
        OfferingStatisticsResponse {
            formatted_total: format_currency(stats.total.sum),
            formatted_average: format_currency(stats.total.average),
            total: stats.total,
            by_type: stats.by_type,
            by_month: stats
                .by_month
                .into_iter()
                .map(|group| MonthGroup {
                    label: format_month_label(&group.key),
                    group,
                })
                .collect(),
            by_member: stats.by_member,
        },
        revision_id,
    )
}
