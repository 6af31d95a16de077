//! Grouped reductions used by the dashboard views.

use std::collections::HashMap;

use serde::Serialize;

/// Group key used when a record has no value for the discriminator.
pub const UNCATEGORIZED: &str = "미분류";

/// Number of groups kept by a ranking when the caller does not say.
pub const DEFAULT_TOP_N: usize = 5;

/// Count, sum and average over a whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub count: u64,
    pub sum: u64,
    pub average: u64,
}

/// One partition of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub key: String,
    pub count: u64,
    pub sum: u64,
    pub average: u64,
}

/// `sum / count` rounded half up; zero when there is nothing to average.
pub fn average(sum: u64, count: u64) -> u64 {
    if count == 0 {
        return 0;
    }
    let (sum, count) = (u128::from(sum), u128::from(count));
    ((sum + count / 2) / count) as u64
}

pub fn totals<R, V>(records: &[R], value: V) -> Totals
where
    V: Fn(&R) -> u64,
{
    let count = records.len() as u64;
    let sum = records.iter().map(value).fold(0u64, u64::saturating_add);
    Totals {
        count,
        sum,
        average: average(sum, count),
    }
}

/// The group a discriminator value falls into: trimmed, or [`UNCATEGORIZED`] when blank.
pub fn group_key(raw: Option<&str>) -> &str {
    raw.map(str::trim)
        .filter(|k| !k.is_empty())
        .unwrap_or(UNCATEGORIZED)
}

/// Partition `records` by `key`, keeping groups in first-seen order.
///
/// Blank or missing keys are collected under [`UNCATEGORIZED`].
pub fn aggregate_by_key<R, K, V>(records: &[R], key: K, value: V) -> Vec<Group>
where
    K: Fn(&R) -> Option<&str>,
    V: Fn(&R) -> u64,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for record in records {
        let bucket = group_key(key(record));
        let amount = value(record);

        match index.get(bucket) {
            Some(&position) => {
                let group = &mut groups[position];
                group.count += 1;
                group.sum = group.sum.saturating_add(amount);
            }
            None => {
                index.insert(bucket.to_string(), groups.len());
                groups.push(Group {
                    key: bucket.to_string(),
                    count: 1,
                    sum: amount,
                    average: 0,
                });
            }
        }
    }

    for group in &mut groups {
        group.average = average(group.sum, group.count);
    }
    groups
}

/// Order groups by sum, largest first. Ties keep their incoming order.
pub fn rank_by_sum(mut groups: Vec<Group>) -> Vec<Group> {
    groups.sort_by(|a, b| b.sum.cmp(&a.sum));
    groups
}

/// The `n` groups with the largest sums.
pub fn top_n(groups: Vec<Group>, n: usize) -> Vec<Group> {
    let mut ranked = rank_by_sum(groups);
    ranked.truncate(n);
    ranked
}
