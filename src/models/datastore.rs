//! Datastore document holding every record collection.

use serde::{Deserialize, Serialize};

use super::{Family, Member, Offering, Prayer};

/// The root document the record store is loaded from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Datastore {
    #[serde(default = "default_schema_version")]
    pub schema_version: i32,
    #[serde(default)]
    pub generated_at: String,
    #[serde(default)]
    pub revision_id: i64,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub families: Vec<Family>,
    #[serde(default)]
    pub offerings: Vec<Offering>,
    #[serde(default)]
    pub prayers: Vec<Prayer>,
}

fn default_schema_version() -> i32 {
    1
}

/// Revision information for change detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionInfo {
    pub revision_id: i64,
    pub generated_at: String,
}
