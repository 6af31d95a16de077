//! Dashboard API endpoints.

use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use super::{resolve_today, success, ApiResult};
use crate::format::format_currency;
use crate::query::{dashboard_statistics, DashboardStatistics};
use crate::AppState;

/// Dashboard query parameters.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Any date in the month to report (default: today).
    pub as_of: Option<String>,
}

/// Front-page counters with the display amount.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub stats: DashboardStatistics,
    pub formatted_offering_amount: String,
}

/// GET /api/dashboard/statistics - Member, family, prayer and offering counters.
pub async fn get_dashboard_statistics(
    State(state): State<AppState>,
    Query(params): Query<DashboardQuery>,
) -> ApiResult<DashboardResponse> {
    let revision_id = state.store.revision_id();

    let today = resolve_today(params.as_of.as_deref()).map_err(|e| e.with_revision(revision_id))?;
    let stats = dashboard_statistics(&state.store, today);
    tracing::debug!(
        "Dashboard for {}: {} offerings total",
        stats.month,
        stats.monthly_offering_amount
    );

    success(
        DashboardResponse {
            formatted_offering_amount: format_currency(stats.monthly_offering_amount),
            stats,
        },
        revision_id,
    )
}
