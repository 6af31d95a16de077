//! Free-text predicate shared by every list view.

use super::RecordFilter;
use crate::models::{Family, Member, Offering, Prayer};

/// Records exposing the string fields a free-text search looks at.
pub trait Searchable {
    /// Searchable fields; `None` entries are absent values and never match.
    fn search_fields(&self) -> Vec<Option<&str>>;
}

impl Searchable for Member {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.name.as_str()),
            self.name_en.as_deref(),
            self.phone.as_deref(),
            self.email.as_deref(),
        ]
    }
}

impl Searchable for Family {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.family_name.as_str()),
            self.head_member_name.as_deref(),
            self.address.as_deref(),
        ]
    }
}

impl Searchable for Offering {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.member_name.as_deref(),
            Some(self.offering_type.as_str()),
            self.memo.as_deref(),
        ]
    }
}

impl Searchable for Prayer {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.title.as_str()),
            Some(self.content.as_str()),
            self.tags.as_deref(),
        ]
    }
}

/// Case-insensitive substring query. A blank term matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextQuery {
    needle: Option<String>,
}

impl TextQuery {
    pub fn new(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self { needle: None }
        } else {
            Self {
                needle: Some(raw.to_lowercase()),
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        self.needle.is_none()
    }

    pub fn matches<R: Searchable + ?Sized>(&self, record: &R) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };

        record
            .search_fields()
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Keep the records that match `text` and every active discrete filter, in input order.
pub fn filter_records<'a, R, F>(records: &'a [R], text: &str, filter: &F) -> Vec<&'a R>
where
    R: Searchable,
    F: RecordFilter<R> + ?Sized,
{
    let query = TextQuery::new(text);
    records
        .iter()
        .filter(|&record| query.matches(record) && filter.admits(record))
        .collect()
}
