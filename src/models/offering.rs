//! Offering (donation) model.

use serde::{Deserialize, Serialize};

/// A single donation record. `amount` is in whole currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    pub id: i64,
    pub member_id: i64,
    /// Denormalized from the member record by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
    pub offering_date: String,
    pub offering_type: String,
    pub amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Offering as rendered by the detail view.
#[derive(Debug, Clone, Serialize)]
pub struct OfferingView {
    #[serde(flatten)]
    pub offering: Offering,
    pub formatted_amount: String,
    pub formatted_date: Option<String>,
}
