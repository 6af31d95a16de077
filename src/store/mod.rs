//! In-memory record store.
//!
//! Records are owned by the backend; this store holds a read-only snapshot
//! loaded from a datastore JSON document and validated once at startup.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::errors::AppError;
use crate::models::{Datastore, Family, Identified, Member, Offering, Prayer, RevisionInfo};

/// Read-only snapshot of every record collection.
#[derive(Debug, Clone)]
pub struct RecordStore {
    datastore: Datastore,
}

impl RecordStore {
    /// Load and validate a datastore document from disk.
    pub async fn load(path: &Path) -> Result<Self, AppError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let datastore: Datastore = serde_json::from_str(&raw)?;
        let store = Self::from_datastore(datastore)?;

        tracing::info!(
            "Loaded revision {} from {:?}: {} members, {} families, {} offerings, {} prayers",
            store.datastore.revision_id,
            path,
            store.datastore.members.len(),
            store.datastore.families.len(),
            store.datastore.offerings.len(),
            store.datastore.prayers.len()
        );
        Ok(store)
    }

    /// Validate identities and fill in offering donor names from the member roll.
    pub fn from_datastore(mut datastore: Datastore) -> Result<Self, AppError> {
        ensure_unique_ids("member", &datastore.members)?;
        ensure_unique_ids("family", &datastore.families)?;
        ensure_unique_ids("offering", &datastore.offerings)?;
        ensure_unique_ids("prayer", &datastore.prayers)?;

        let names: HashMap<i64, &str> = datastore
            .members
            .iter()
            .map(|m| (m.id, m.name.as_str()))
            .collect();
        let mut resolved = 0usize;
        for offering in &mut datastore.offerings {
            let missing = offering
                .member_name
                .as_deref()
                .is_none_or(|name| name.trim().is_empty());
            if missing {
                if let Some(name) = names.get(&offering.member_id) {
                    offering.member_name = Some(name.to_string());
                    resolved += 1;
                }
            }
        }
        if resolved > 0 {
            tracing::debug!("Resolved donor names for {} offerings", resolved);
        }

        Ok(Self { datastore })
    }

    pub fn revision_id(&self) -> i64 {
        self.datastore.revision_id
    }

    pub fn revision_info(&self) -> RevisionInfo {
        RevisionInfo {
            revision_id: self.datastore.revision_id,
            generated_at: self.datastore.generated_at.clone(),
        }
    }

    pub fn members(&self) -> &[Member] {
        &self.datastore.members
    }

    pub fn families(&self) -> &[Family] {
        &self.datastore.families
    }

    pub fn offerings(&self) -> &[Offering] {
        &self.datastore.offerings
    }

    pub fn prayers(&self) -> &[Prayer] {
        &self.datastore.prayers
    }

    pub fn member(&self, id: i64) -> Option<&Member> {
        find(&self.datastore.members, id)
    }

    pub fn family(&self, id: i64) -> Option<&Family> {
        find(&self.datastore.families, id)
    }

    pub fn offering(&self, id: i64) -> Option<&Offering> {
        find(&self.datastore.offerings, id)
    }

    pub fn prayer(&self, id: i64) -> Option<&Prayer> {
        find(&self.datastore.prayers, id)
    }

    /// Members linked to `family_id`, in store order.
    pub fn family_members(&self, family_id: i64) -> Vec<&Member> {
        self.datastore
            .members
            .iter()
            .filter(|m| m.family_id == Some(family_id))
            .collect()
    }
}

fn find<R: Identified>(records: &[R], id: i64) -> Option<&R> {
    records.iter().find(|r| r.id() == id)
}

fn ensure_unique_ids<R: Identified>(kind: &str, records: &[R]) -> Result<(), AppError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(AppError::InvalidInput(format!(
                "duplicate {} id {}",
                kind,
                record.id()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn datastore(value: serde_json::Value) -> Datastore {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let ds = datastore(json!({
            "prayers": [
                { "id": 7, "title": "a", "content": "a", "created_by": 1 },
                { "id": 7, "title": "b", "content": "b", "created_by": 1 }
            ]
        }));

        let err = RecordStore::from_datastore(ds).unwrap_err();
        assert_eq!(err, AppError::InvalidInput("duplicate prayer id 7".to_string()));
    }

    #[test]
    fn test_lookups() {
        let ds = datastore(json!({
            "revision_id": 3,
            "generated_at": "2024-06-01T00:00:00Z",
            "members": [
                { "id": 1, "name": "김철수", "birth_date": "1980-01-01", "family_id": 10 },
                { "id": 2, "name": "이영희", "birth_date": "1982-01-01" },
                { "id": 3, "name": "김민지", "birth_date": "2010-01-01", "family_id": 10 }
            ],
            "families": [ { "id": 10, "family_name": "김씨 가정", "member_count": 2 } ]
        }));

        let store = RecordStore::from_datastore(ds).unwrap();
        assert_eq!(store.revision_id(), 3);
        assert_eq!(store.member(2).map(|m| m.name.as_str()), Some("이영희"));
        assert!(store.member(99).is_none());
        assert_eq!(store.family(10).map(|f| f.member_count), Some(2));

        let ids: Vec<i64> = store.family_members(10).iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_offering_donor_names_are_resolved() {
        let ds = datastore(json!({
            "members": [ { "id": 1, "name": "김철수", "birth_date": "1980-01-01" } ],
            "offerings": [
                {
                    "id": 1, "member_id": 1, "offering_date": "2024-01-07",
                    "offering_type": "십일조", "amount": 1000
                },
                {
                    "id": 2, "member_id": 1, "member_name": " ", "offering_date": "2024-01-14",
                    "offering_type": "십일조", "amount": 1000
                },
                {
                    "id": 3, "member_id": 1, "member_name": "무명", "offering_date": "2024-01-21",
                    "offering_type": "감사헌금", "amount": 500
                },
                {
                    "id": 4, "member_id": 42, "offering_date": "2024-01-28",
                    "offering_type": "감사헌금", "amount": 500
                }
            ]
        }));

        let store = RecordStore::from_datastore(ds).unwrap();
        let names: Vec<Option<&str>> = store
            .offerings()
            .iter()
            .map(|o| o.member_name.as_deref())
            .collect();
        assert_eq!(
            names,
            vec![Some("김철수"), Some("김철수"), Some("무명"), None]
        );

        let found = crate::query::filter_records(store.offerings(), "김철수", &());
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_load_rejects_missing_identity() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datastore.json");
        std::fs::write(
            &path,
            json!({
                "offerings": [
                    {
                        "member_id": 1, "offering_date": "2024-01-07",
                        "offering_type": "십일조", "amount": 1000
                    }
                ]
            })
            .to_string(),
        )
        .unwrap();

        let err = RecordStore::load(&path).await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_load_rejects_negative_amount() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datastore.json");
        std::fs::write(
            &path,
            json!({
                "offerings": [
                    {
                        "id": 1, "member_id": 1, "offering_date": "2024-01-07",
                        "offering_type": "십일조", "amount": -5
                    }
                ]
            })
            .to_string(),
        )
        .unwrap();

        assert!(RecordStore::load(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = RecordStore::load(Path::new("/nonexistent/datastore.json"))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}
