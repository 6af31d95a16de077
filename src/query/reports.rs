//! Dashboard reports composed from the grouped reductions.

use std::borrow::Borrow;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::{
    aggregate_by_key, compute_age, group_key, month_key, parse_iso_date, rank_by_sum, top_n,
    totals, Group, Totals,
};
use crate::models::{Family, Member, Offering, Prayer, PrayerStatus};
use crate::store::RecordStore;

/// Offering dashboard: totals, per type, per month and the top donors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferingStatistics {
    pub total: Totals,
    /// Sorted by sum, largest first
    pub by_type: Vec<Group>,
    /// Chronological by `YYYY-MM`
    pub by_month: Vec<Group>,
    /// Top donors by member name
    pub by_member: Vec<Group>,
}

pub fn offering_statistics<O: Borrow<Offering>>(
    offerings: &[O],
    top: usize,
) -> OfferingStatistics {
    let amount = |o: &O| o.borrow().amount;

    let mut by_month = aggregate_by_key(
        offerings,
        |o| month_key(&o.borrow().offering_date),
        amount,
    );
    by_month.sort_by(|a, b| a.key.cmp(&b.key));

    OfferingStatistics {
        total: totals(offerings, amount),
        by_type: rank_by_sum(aggregate_by_key(
            offerings,
            |o| Some(o.borrow().offering_type.as_str()),
            amount,
        )),
        by_month,
        by_member: top_n(
            aggregate_by_key(offerings, |o| o.borrow().member_name.as_deref(), amount),
            top,
        ),
    }
}

/// One member's giving for one offering type within a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberOfferingSummary {
    pub offering_type: String,
    pub total_amount: u64,
    pub count: u64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// Per-type giving of `member_id` during `year`, largest total first.
pub fn member_offering_summary<O: Borrow<Offering>>(
    offerings: &[O],
    member_id: i64,
    year: i32,
) -> Vec<MemberOfferingSummary> {
    let in_year: Vec<&Offering> = offerings
        .iter()
        .map(<O as Borrow<Offering>>::borrow)
        .filter(|o| o.member_id == member_id)
        .filter(|o| parse_iso_date(&o.offering_date).is_some_and(|d| d.year() == year))
        .collect();

    let groups = rank_by_sum(aggregate_by_key(
        &in_year,
        |o| Some(o.offering_type.as_str()),
        |o| o.amount,
    ));

    groups
        .into_iter()
        .map(|group| {
            let dates = in_year
                .iter()
                .filter(|o| group_key(Some(o.offering_type.as_str())) == group.key)
                .filter_map(|o| parse_iso_date(&o.offering_date));
            let (first_date, last_date) = dates.fold((None, None), |(first, last), d| {
                (
                    Some(first.map_or(d, |f: NaiveDate| f.min(d))),
                    Some(last.map_or(d, |l: NaiveDate| l.max(d))),
                )
            });
            MemberOfferingSummary {
                offering_type: group.key,
                total_amount: group.sum,
                count: group.count,
                first_date,
                last_date,
            }
        })
        .collect()
}

/// Member dashboard counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberStatistics {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub baptized: u64,
    pub registered_this_year: u64,
    /// Over members whose birth date parses
    pub average_age: u64,
    pub by_district: Vec<Group>,
    pub by_position: Vec<Group>,
}

pub fn member_statistics<M: Borrow<Member>>(members: &[M], today: NaiveDate) -> MemberStatistics {
    let ages: Vec<u64> = members
        .iter()
        .filter_map(|m| parse_iso_date(&m.borrow().birth_date))
        .map(|birth| compute_age(birth, today).max(0) as u64)
        .collect();

    MemberStatistics {
        total: members.len() as u64,
        active: count_where(members, |m| m.is_active),
        inactive: count_where(members, |m| !m.is_active),
        baptized: count_where(members, |m| {
            m.baptism_date
                .as_deref()
                .and_then(parse_iso_date)
                .is_some()
        }),
        registered_this_year: count_where(members, |m| {
            m.registration_date
                .as_deref()
                .and_then(parse_iso_date)
                .is_some_and(|d| d.year() == today.year())
        }),
        average_age: totals(&ages, |age| *age).average,
        by_district: aggregate_by_key(members, |m| m.borrow().district.as_deref(), |_| 1),
        by_position: aggregate_by_key(members, |m| Some(m.borrow().position.as_str()), |_| 1),
    }
}

fn count_where<M: Borrow<Member>>(members: &[M], pred: impl Fn(&Member) -> bool) -> u64 {
    members.iter().filter(|m| pred((*m).borrow())).count() as u64
}

/// Household size summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyStatistics {
    pub total_families: u64,
    pub total_members: u64,
    pub average_size: u64,
}

pub fn family_statistics<F: Borrow<Family>>(families: &[F]) -> FamilyStatistics {
    let sizes = totals(families, |f| f.borrow().member_count);
    FamilyStatistics {
        total_families: sizes.count,
        total_members: sizes.sum,
        average_size: sizes.average,
    }
}

/// Prayer counts per status. Statuses outside the known set land in `other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub active: u64,
    pub answered: u64,
    pub completed: u64,
    pub other: u64,
}

/// Prayer dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrayerStatistics {
    pub total: u64,
    pub by_status: StatusCounts,
    pub by_category: Vec<Group>,
    pub by_visibility: Vec<Group>,
    /// Most used tags first
    pub by_tag: Vec<Group>,
}

pub fn prayer_statistics<P: Borrow<Prayer>>(prayers: &[P]) -> PrayerStatistics {
    let tags: Vec<&str> = prayers
        .iter()
        .flat_map(|p| p.borrow().tag_list())
        .collect();

    let mut by_status = StatusCounts::default();
    for prayer in prayers {
        match prayer.borrow().status {
            PrayerStatus::Active => by_status.active += 1,
            PrayerStatus::Answered => by_status.answered += 1,
            PrayerStatus::Completed => by_status.completed += 1,
            PrayerStatus::Unknown => by_status.other += 1,
        }
    }

    PrayerStatistics {
        total: prayers.len() as u64,
        by_status,
        by_category: aggregate_by_key(prayers, |p| p.borrow().category.as_deref(), |_| 1),
        by_visibility: aggregate_by_key(
            prayers,
            |p| Some(p.borrow().visibility.as_str()),
            |_| 1,
        ),
        by_tag: rank_by_sum(aggregate_by_key(&tags, |tag| Some(*tag), |_| 1)),
    }
}

/// Front-page counters for the month containing `today`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStatistics {
    /// `YYYY-MM`
    pub month: String,
    /// Active members only
    pub member_count: u64,
    pub family_count: u64,
    /// Prayer requests created this month
    pub monthly_prayer_count: u64,
    pub monthly_offering_amount: u64,
}

pub fn dashboard_statistics(store: &RecordStore, today: NaiveDate) -> DashboardStatistics {
    let month = today.format("%Y-%m").to_string();
    let in_month = |raw: Option<&str>| raw.and_then(month_key) == Some(month.as_str());

    let monthly_offerings: Vec<&Offering> = store
        .offerings()
        .iter()
        .filter(|o| in_month(Some(o.offering_date.as_str())))
        .collect();

    DashboardStatistics {
        member_count: count_where(store.members(), |m| m.is_active),
        family_count: store.families().len() as u64,
        monthly_prayer_count: store
            .prayers()
            .iter()
            .filter(|p| in_month(p.created_at.as_deref()))
            .count() as u64,
        monthly_offering_amount: totals(&monthly_offerings, |o| o.amount).sum,
        month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::UNCATEGORIZED;

    fn offering(id: i64, member: &str, date: &str, kind: &str, amount: u64) -> Offering {
        Offering {
            id,
            member_id: if member == "김철수" { 1 } else { 2 },
            member_name: Some(member.to_string()),
            offering_date: date.to_string(),
            offering_type: kind.to_string(),
            amount,
            memo: None,
        }
    }

    fn sample_offerings() -> Vec<Offering> {
        vec![
            offering(1, "김철수", "2024-02-04", "주일헌금", 30_000),
            offering(2, "김철수", "2024-01-07", "십일조", 100_000),
            offering(3, "이영희", "2024-01-14", "십일조", 50_000),
            offering(4, "이영희", "2024-02-11", "감사헌금", 200_000),
            offering(5, "김철수", "2023-12-31", "십일조", 70_000),
        ]
    }

    fn date(raw: &str) -> NaiveDate {
        parse_iso_date(raw).unwrap()
    }

    #[test]
    fn test_offering_statistics() {
        let stats = offering_statistics(&sample_offerings(), 1);

        assert_eq!(stats.total.count, 5);
        assert_eq!(stats.total.sum, 450_000);
        assert_eq!(stats.total.average, 90_000);

        let types: Vec<(&str, u64)> = stats
            .by_type
            .iter()
            .map(|g| (g.key.as_str(), g.sum))
            .collect();
        assert_eq!(
            types,
            vec![("십일조", 220_000), ("감사헌금", 200_000), ("주일헌금", 30_000)]
        );

        let months: Vec<&str> = stats.by_month.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-02"]);

        assert_eq!(stats.by_member.len(), 1);
        assert_eq!(stats.by_member[0].key, "이영희");
        assert_eq!(stats.by_member[0].sum, 250_000);
    }

    #[test]
    fn test_offering_statistics_over_filtered_refs() {
        let offerings = sample_offerings();
        let january: Vec<&Offering> = offerings
            .iter()
            .filter(|o| o.offering_date.starts_with("2024-01"))
            .collect();

        let stats = offering_statistics(&january, 5);
        assert_eq!(stats.total.count, 2);
        assert_eq!(stats.by_month.len(), 1);
        assert_eq!(stats.by_month[0].sum, 150_000);
    }

    #[test]
    fn test_empty_offering_statistics() {
        let stats = offering_statistics::<Offering>(&[], 5);
        assert_eq!(stats.total, Totals::default());
        assert!(stats.by_type.is_empty());
        assert!(stats.by_month.is_empty());
        assert!(stats.by_member.is_empty());
    }

    #[test]
    fn test_member_offering_summary() {
        let summary = member_offering_summary(&sample_offerings(), 1, 2024);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].offering_type, "십일조");
        assert_eq!(summary[0].total_amount, 100_000);
        assert_eq!(summary[0].first_date, Some(date("2024-01-07")));
        assert_eq!(summary[1].offering_type, "주일헌금");
        assert_eq!(summary[1].last_date, Some(date("2024-02-04")));

        assert!(member_offering_summary(&sample_offerings(), 1, 2022).is_empty());
    }

    #[test]
    fn test_member_statistics() {
        let members: Vec<Member> = serde_json::from_value(serde_json::json!([
            {
                "id": 1, "name": "김철수", "birth_date": "1980-05-15",
                "district": "1교구", "position": "집사",
                "registration_date": "2024-03-01", "baptism_date": "2000-01-01"
            },
            {
                "id": 2, "name": "이영희", "birth_date": "1990-05-16",
                "position": "성도", "is_active": false,
                "registration_date": "2010-01-01"
            },
            {
                "id": 3, "name": "박민수", "birth_date": "unknown",
                "district": "1교구"
            }
        ]))
        .unwrap();

        let stats = member_statistics(&members, date("2024-05-15"));

        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.inactive, 1);
        assert_eq!(stats.baptized, 1);
        assert_eq!(stats.registered_this_year, 1);
        // 44 and 33
        assert_eq!(stats.average_age, 39);
        assert_eq!(stats.by_district[0].key, "1교구");
        assert_eq!(stats.by_district[0].count, 2);
        assert_eq!(stats.by_district[1].key, UNCATEGORIZED);
        assert_eq!(stats.by_position[0].key, "집사");
        assert_eq!(stats.by_position[1].count, 2);
    }

    #[test]
    fn test_family_statistics() {
        let families: Vec<Family> = serde_json::from_value(serde_json::json!([
            { "id": 1, "family_name": "김씨 가정", "member_count": 4 },
            { "id": 2, "family_name": "이씨 가정", "member_count": 3 }
        ]))
        .unwrap();

        let stats = family_statistics(&families);
        assert_eq!(stats.total_families, 2);
        assert_eq!(stats.total_members, 7);
        assert_eq!(stats.average_size, 4);

        assert_eq!(family_statistics::<Family>(&[]).average_size, 0);
    }

    #[test]
    fn test_prayer_statistics() {
        let prayers: Vec<Prayer> = serde_json::from_value(serde_json::json!([
            {
                "id": 1, "title": "a", "content": "a", "created_by": 1,
                "category": "건강", "status": "active", "tags": "건강, 가족"
            },
            {
                "id": 2, "title": "b", "content": "b", "created_by": 1,
                "status": "answered", "visibility": "private", "tags": "취업"
            },
            {
                "id": 3, "title": "c", "content": "c", "created_by": 2,
                "category": "건강", "status": "paused", "tags": "건강"
            }
        ]))
        .unwrap();

        let stats = prayer_statistics(&prayers);
        assert_eq!(stats.total, 3);
        assert_eq!(
            stats.by_status,
            StatusCounts {
                active: 1,
                answered: 1,
                completed: 0,
                other: 1,
            }
        );
        assert_eq!(stats.by_category[0].key, "건강");
        assert_eq!(stats.by_category[0].count, 2);
        assert_eq!(stats.by_category[1].key, UNCATEGORIZED);
        assert_eq!(stats.by_visibility[0].key, "public");
        assert_eq!(stats.by_visibility[0].count, 2);

        let tags: Vec<(&str, u64)> = stats
            .by_tag
            .iter()
            .map(|g| (g.key.as_str(), g.count))
            .collect();
        assert_eq!(tags, vec![("건강", 2), ("가족", 1), ("취업", 1)]);
    }

    #[test]
    fn test_blank_offering_type_keeps_its_dates() {
        let mut blank = offering(1, "김철수", "2024-03-03", "", 1_000);
        blank.offering_type = "  ".to_string();
        let offerings = vec![blank, offering(2, "김철수", "2024-04-07", "", 2_000)];

        let summary = member_offering_summary(&offerings, 1, 2024);

        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].offering_type, UNCATEGORIZED);
        assert_eq!(summary[0].count, 2);
        assert_eq!(summary[0].total_amount, 3_000);
        assert_eq!(summary[0].first_date, Some(date("2024-03-03")));
        assert_eq!(summary[0].last_date, Some(date("2024-04-07")));
    }

    #[test]
    fn test_dashboard_statistics() {
        let datastore: crate::models::Datastore = serde_json::from_value(serde_json::json!({
            "members": [
                { "id": 1, "name": "김철수", "birth_date": "1980-05-15" },
                { "id": 2, "name": "이영희", "birth_date": "1990-05-16", "is_active": false }
            ],
            "families": [{ "id": 1, "family_name": "김씨 가정", "member_count": 2 }],
            "offerings": [
                {
                    "id": 1, "member_id": 1, "offering_date": "2024-05-05",
                    "offering_type": "십일조", "amount": 100000
                },
                {
                    "id": 2, "member_id": 2, "offering_date": "2024-05-31T10:00:00",
                    "offering_type": "감사헌금", "amount": 50000
                },
                {
                    "id": 3, "member_id": 1, "offering_date": "2024-04-30",
                    "offering_type": "십일조", "amount": 100000
                }
            ],
            "prayers": [
                {
                    "id": 1, "title": "a", "content": "a", "created_by": 1,
                    "created_at": "2024-05-02T08:00:00"
                },
                {
                    "id": 2, "title": "b", "content": "b", "created_by": 2,
                    "created_at": "2023-05-02"
                },
                { "id": 3, "title": "c", "content": "c", "created_by": 2 }
            ]
        }))
        .unwrap();
        let store = RecordStore::from_datastore(datastore).unwrap();

        let stats = dashboard_statistics(&store, date("2024-05-15"));

        assert_eq!(
            stats,
            DashboardStatistics {
                month: "2024-05".to_string(),
                member_count: 1,
                family_count: 1,
                monthly_prayer_count: 1,
                monthly_offering_amount: 150_000,
            }
        );

        let empty = dashboard_statistics(&store, date("2025-01-01"));
        assert_eq!(empty.monthly_prayer_count, 0);
        assert_eq!(empty.monthly_offering_amount, 0);
    }
}
