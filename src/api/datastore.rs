//! Datastore API endpoints.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::RevisionInfo;
use crate::AppState;

/// GET /api/datastore/revision - Get the loaded revision info.
pub async fn get_revision(State(state): State<AppState>) -> ApiResult<RevisionInfo> {
    let revision_info = state.store.revision_info();
    success(revision_info.clone(), revision_info.revision_id)
}
