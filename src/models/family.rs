//! Family model grouping members into households.

use serde::{Deserialize, Serialize};

use super::Member;

/// A household grouping several members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Family {
    pub id: i64,
    pub family_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_member_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_member_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub member_count: u64,
}

/// Family detail including the members linked to it.
#[derive(Debug, Clone, Serialize)]
pub struct FamilyDetail {
    #[serde(flatten)]
    pub family: Family,
    pub members: Vec<Member>,
}
